//! Consumer-facing package metadata.

use serde::{Deserialize, Serialize};

use crate::core::descriptor::PackageDescriptor;

/// Information downstream projects need to link against the built package.
///
/// Derived deterministically from the package name; computing it twice for
/// the same descriptor yields identical output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerMetadata {
    /// Library names to link.
    pub libs: Vec<String>,

    /// Include directories relative to the package root.
    pub includedirs: Vec<String>,
}

impl ConsumerMetadata {
    /// Derive metadata for a package.
    pub fn for_package(descriptor: &PackageDescriptor) -> Self {
        ConsumerMetadata {
            libs: vec![descriptor.name.clone()],
            includedirs: vec!["include".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_values() {
        let desc = PackageDescriptor::fossil_jellyfish();
        let meta = ConsumerMetadata::for_package(&desc);
        assert_eq!(meta.libs, vec!["fossil_jellyfish".to_string()]);
        assert_eq!(meta.includedirs, vec!["include".to_string()]);
    }

    #[test]
    fn test_metadata_is_deterministic() {
        let desc = PackageDescriptor::fossil_jellyfish();
        let first = ConsumerMetadata::for_package(&desc);
        let second = ConsumerMetadata::for_package(&desc);
        assert_eq!(first, second);
    }

    #[test]
    fn test_metadata_serializes() {
        let desc = PackageDescriptor::fossil_jellyfish();
        let meta = ConsumerMetadata::for_package(&desc);
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("fossil_jellyfish"));
        assert!(json.contains("includedirs"));
    }
}
