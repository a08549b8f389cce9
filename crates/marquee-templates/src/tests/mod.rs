//! Test modules for the templates crate.
