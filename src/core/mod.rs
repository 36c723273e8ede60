//! Core data model: package identity, folder layout, consumer metadata.

pub mod descriptor;
pub mod layout;
pub mod metadata;

pub use descriptor::{
    Arch, BuildSettings, BuildType, Compiler, PackageDescriptor, PackageOptions, TargetOs,
};
pub use layout::FolderLayout;
pub use metadata::ConsumerMetadata;
