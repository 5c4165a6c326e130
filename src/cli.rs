use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mas-ensure")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Ensure Mac App Store apps are installed", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: ~/.config/mas-ensure/config.toml)
    #[arg(long, env = "MAS_ENSURE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Install an app unless it is already present
    Ensure(EnsureArgs),

    /// Run as a configuration-management module (JSON args file in, JSON out)
    Module {
        /// Path to the JSON arguments file
        args_file: PathBuf,
    },

    /// List installed App Store apps
    List {
        /// Explicit path to the mas binary
        #[arg(long)]
        mas_path: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show known app names and their store ids
    Catalog,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
#[command(group(clap::ArgGroup::new("app").required(true).args(["id", "name"])))]
pub struct EnsureArgs {
    /// App Store identifier
    #[arg(long)]
    pub id: Option<String>,

    /// App name from the catalog
    #[arg(long)]
    pub name: Option<String>,

    /// Explicit path to the mas binary
    #[arg(long)]
    pub mas_path: Option<String>,

    /// Refresh the catalog before translating the name
    #[arg(long)]
    pub update_cache: bool,

    /// Dry run - show what would be done
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ensure_requires_exactly_one_of_id_or_name() {
        assert!(Cli::try_parse_from(["mas-ensure", "ensure"]).is_err());
        assert!(
            Cli::try_parse_from(["mas-ensure", "ensure", "--id", "1", "--name", "Xcode"]).is_err()
        );

        let cli = Cli::try_parse_from(["mas-ensure", "ensure", "--name", "Xcode", "-n"]).unwrap();
        match cli.command {
            Command::Ensure(args) => {
                assert_eq!(args.name.as_deref(), Some("Xcode"));
                assert!(args.dry_run);
            }
            _ => panic!("expected ensure"),
        }
    }
}
