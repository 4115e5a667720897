//! Test utilities for Structr integration tests
//!
//! - TestFixture: graph store on the test schema
//! - ConsoleFixture: full instance rooted in a temporary directory

pub mod console_fixture;
pub mod test_fixture;
