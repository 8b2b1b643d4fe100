//! Common test utilities for landscape-health
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{fixtures, transport::{Behavior, ScriptedTransport}};
//!
//! #[tokio::test(start_paused = true)]
//! async fn my_test() {
//!     let registry = fixtures::RegistryFactory::standard();
//!     let transport = ScriptedTransport::new().with("c1", Behavior::Up(100));
//!     // ...
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod transport;

pub use fixtures::{ComponentFactory, RegistryFactory};
pub use transport::{Behavior, ScriptedTransport};

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
