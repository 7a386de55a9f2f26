use clap::Args;

use reltrace_core::dump::{DumpMode, DumpTarget};

#[derive(Args)]
pub struct ModesArgs {
    /// Only list modes that filter by a root record
    #[arg(long)]
    pub root_only: bool,
}

pub async fn execute(args: ModesArgs) -> anyhow::Result<()> {
    println!("{:<4} {:<36} {:<6} {}", "#", "MODE", "ROOT", "DESCRIPTION");
    println!("{}", "-".repeat(90));

    for mode in DumpMode::ALL {
        if args.root_only && !mode.requires_root() {
            continue;
        }
        println!(
            "{:<4} {:<36} {:<6} {}",
            mode.ordinal(),
            mode.as_str(),
            if mode.requires_root() { "yes" } else { "no" },
            mode.description()
        );
    }

    println!();
    println!("{:<4} {:<36} {}", "#", "TARGET", "DESCRIPTION");
    println!("{}", "-".repeat(90));
    for target in DumpTarget::ALL {
        println!(
            "{:<4} {:<36} {}",
            target.ordinal(),
            target.as_str(),
            target.description()
        );
    }

    Ok(())
}
