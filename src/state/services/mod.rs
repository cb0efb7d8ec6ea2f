//! Application services for workspace state synchronisation.

mod sync;

pub use sync::{StateService, StateServiceError, StateServiceResult};
