//! Integration tests
//!
//! These verify component interactions through the public API, using the
//! in-memory `FakeRemote` for pipeline behavior and wiremock for the HTTP
//! client.

pub mod registry_tests;
pub mod service_tests;
