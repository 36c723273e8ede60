//! Lifecycle error taxonomy and state machine states.

use std::fmt;

use thiserror::Error;

/// States of one orchestration run.
///
/// Each lifecycle step requires its predecessor to have completed in the
/// same run. A failed run is non-resumable; a fresh run restarts from
/// `Uninitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecycleState {
    Uninitialized,
    LayoutResolved,
    ToolchainGenerated,
    SourceAcquired,
    Built,
    Packaged,
    MetadataExported,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::LayoutResolved => "layout-resolved",
            LifecycleState::ToolchainGenerated => "toolchain-generated",
            LifecycleState::SourceAcquired => "source-acquired",
            LifecycleState::Built => "built",
            LifecycleState::Packaged => "packaged",
            LifecycleState::MetadataExported => "metadata-exported",
        })
    }
}

/// Error from a lifecycle step.
///
/// Every variant carries the originating step name and the external tool's
/// raw diagnostic where one exists. Errors are propagated unmodified; no
/// step is retried or recovered locally.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("step `{step}`: toolchain generation failed: {diagnostic}")]
    ToolchainGeneration {
        step: &'static str,
        diagnostic: String,
    },

    #[error("step `{step}`: source acquisition of {url} at tag {tag} failed: {diagnostic}")]
    SourceAcquisition {
        step: &'static str,
        url: String,
        tag: String,
        diagnostic: String,
    },

    #[error("step `{step}`: build failed: {diagnostic}")]
    Build {
        step: &'static str,
        diagnostic: String,
    },

    #[error("step `{step}`: packaging failed: {diagnostic}")]
    Packaging {
        step: &'static str,
        diagnostic: String,
    },

    #[error(
        "step `{attempted}` invoked out of order: requires state `{required}`, \
         current state is `{actual}`"
    )]
    Sequence {
        attempted: &'static str,
        required: LifecycleState,
        actual: LifecycleState,
    },
}

impl LifecycleError {
    /// The lifecycle step this error originated from.
    pub fn step(&self) -> &'static str {
        match self {
            LifecycleError::ToolchainGeneration { step, .. }
            | LifecycleError::Build { step, .. }
            | LifecycleError::Packaging { step, .. }
            | LifecycleError::SourceAcquisition { step, .. } => step,
            LifecycleError::Sequence { attempted, .. } => attempted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_ordering() {
        assert!(LifecycleState::Uninitialized < LifecycleState::LayoutResolved);
        assert!(LifecycleState::Built < LifecycleState::Packaged);
        assert!(LifecycleState::Packaged < LifecycleState::MetadataExported);
    }

    #[test]
    fn test_sequence_error_message() {
        let err = LifecycleError::Sequence {
            attempted: "build",
            required: LifecycleState::SourceAcquired,
            actual: LifecycleState::LayoutResolved,
        };
        let msg = err.to_string();
        assert!(msg.contains("`build`"));
        assert!(msg.contains("source-acquired"));
        assert!(msg.contains("layout-resolved"));
        assert_eq!(err.step(), "build");
    }
}
