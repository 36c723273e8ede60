//! Package lifecycle orchestration.
//!
//! The orchestrator sequences the fixed lifecycle for one package run:
//! layout, toolchain generation, source acquisition, build, install, and
//! consumer metadata export. Heavy lifting is delegated to the injected
//! [`crate::backend::BuildTools`] implementation.

pub mod errors;
pub mod lifecycle;
pub mod toolchain;

pub use errors::{LifecycleError, LifecycleState};
pub use lifecycle::{InstalledArtifactSet, Orchestrator};
pub use toolchain::ToolchainConfig;
