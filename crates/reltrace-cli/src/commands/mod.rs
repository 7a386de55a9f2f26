use clap::Subcommand;

pub mod modes;
pub mod validate;

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a dump configuration file without running it
    Validate(validate::ValidateArgs),
    /// List the dump modes and export targets
    Modes(modes::ModesArgs),
}
