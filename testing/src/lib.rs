//! Shared test fixtures for the Keep bridge workspace.
//!
//! Provides the in-memory [`FakeKeepClient`] standing in for the external
//! notes service, plus builders for notes and unique test identifiers.
//! No containers or network access required.

mod fixtures;

pub use fixtures::*;
