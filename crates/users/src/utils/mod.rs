//! Internal utilities for the users crate.

pub mod validation;
