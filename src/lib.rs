//! Jellypack - packaging and build orchestration for the Fossil Jellyfish C library
//!
//! This crate provides the core library functionality for Jellypack:
//! the package lifecycle orchestrator (layout, toolchain generation, source
//! acquisition, build, install, consumer metadata) and the test-source
//! lister used by the external test harness.

pub mod backend;
pub mod core;
pub mod lister;
pub mod orchestrator;
pub mod util;

/// Test utilities and fakes for Jellypack unit tests.
///
/// This module is only available when compiling tests. It provides a
/// recording fake for the external build-tool interface so lifecycle
/// logic can be exercised without Meson or git installed.
#[cfg(test)]
pub mod test_support;

pub use core::{descriptor::PackageDescriptor, layout::FolderLayout, metadata::ConsumerMetadata};

pub use backend::BuildTools;
pub use orchestrator::{LifecycleError, LifecycleState, Orchestrator};
