//! Unit tests for the role module.
