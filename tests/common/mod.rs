//! Common test utilities for tasklane-rs
//!
//! This module provides shared test infrastructure for all tests:
//! - `FakeRemote`, an in-memory workspace with scriptable failures
//! - CSV fixtures and reference data factories
//! - Custom assertions and helpers

pub mod fixtures;
pub mod remote;

// Re-export commonly used items
pub use fixtures::{csv_of_size, reference_config, sample_csv};
pub use remote::FakeRemote;

/// Skip test if environment variable is not set
#[macro_export]
macro_rules! skip_without_env {
    ($var:expr) => {
        if std::env::var($var).is_err() {
            eprintln!("Skipping test: {} environment variable not set", $var);
            return;
        }
    };
}

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
