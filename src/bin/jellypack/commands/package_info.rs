//! `jellypack package-info` command

use anyhow::Result;

use jellypack::{ConsumerMetadata, PackageDescriptor};

use crate::cli::PackageInfoArgs;

pub fn execute(args: PackageInfoArgs) -> Result<()> {
    let descriptor = PackageDescriptor::fossil_jellyfish();
    let metadata = ConsumerMetadata::for_package(&descriptor);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
    } else {
        println!("libs: {}", metadata.libs.join(", "));
        println!("includedirs: {}", metadata.includedirs.join(", "));
    }

    Ok(())
}
