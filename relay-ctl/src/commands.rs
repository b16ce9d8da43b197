use cmd_relay::RelayConfig;
use cmd_relay::stage::stage_files;
use log::info;
use std::path::{Path, PathBuf};

use crate::variants::VariantArg;

pub fn list_variants(config: &RelayConfig) {
    info!("Listing invocation variants");
    println!("Available variants:\n");

    for variant in VariantArg::all() {
        println!(
            "  {:10} - {}",
            format!("{:?}", variant).to_lowercase(),
            variant.description()
        );
        println!("               {}", variant.details(config));
        println!();
    }

    println!("Use run --variant <VARIANT> to relay one of them");
}

pub fn show_config(config: &RelayConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

pub fn stage(src: &Path, dest: &Path, files: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    info!("Staging {} file(s) into {}", files.len(), dest.display());
    let staged = stage_files(src, dest, files)?;
    for path in staged {
        println!("{}", path.display());
    }
    Ok(())
}
