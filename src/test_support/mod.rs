//! Test fakes for Jellypack unit tests.

pub mod fake_tools;

pub use fake_tools::FakeTools;
