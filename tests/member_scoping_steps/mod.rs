//! Step definitions for member task scoping scenarios.

pub mod when;
