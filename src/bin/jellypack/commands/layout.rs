//! `jellypack layout` command

use anyhow::Result;

use jellypack::FolderLayout;

use crate::cli::LayoutArgs;

pub fn execute(args: LayoutArgs) -> Result<()> {
    let layout = FolderLayout::resolve();

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "source": layout.source_root.display().to_string(),
                "build": layout.build_root.display().to_string(),
            })
        );
    } else {
        println!("source: {}", layout.source_root.display());
        println!("build: {}", layout.build_root.display());
    }

    Ok(())
}
