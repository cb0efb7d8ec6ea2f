//! In-memory adapters for workspace state.

mod repository;

pub use repository::InMemoryStateRepository;
