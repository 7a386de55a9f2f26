use std::path::PathBuf;

use clap::Args;

use reltrace_core::dump::{DumpConfig, DumpTarget};

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to a dump configuration (YAML or JSON)
    pub config: PathBuf,
}

pub async fn execute(args: ValidateArgs) -> anyhow::Result<()> {
    println!("Validating {}...", args.config.display());

    let config = DumpConfig::from_file(&args.config)?;
    println!("  Parsing: OK");
    println!("  Source: {}", config.source_config.describe());
    println!("  Mode: {}", config.mode);
    println!("  Target: {}", config.target);
    if let (DumpTarget::ToDatabase, Some(target)) = (config.target, &config.target_config) {
        println!("  Import into: {}", target.describe());
    }
    if !config.output_path.is_empty() {
        println!("  Output: {}", config.output_path);
    }

    let errors = config.violations();

    println!();
    if errors.is_empty() {
        println!("Validation PASSED");
    } else {
        println!("Validation FAILED with {} error(s):", errors.len());
        for err in &errors {
            eprintln!("  - {err}");
        }
        std::process::exit(1);
    }

    Ok(())
}
