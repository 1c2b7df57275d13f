//! Provider implementations.
//!
//! - `JSearchProvider` - the JSearch REST API (RapidAPI)
//! - `MockProvider` - canned responses for testing

pub mod jsearch;
pub mod mock;

pub use jsearch::{JSearchConfig, JSearchProvider};
pub use mock::MockProvider;
