//! Utility functions

pub mod domain_name;
