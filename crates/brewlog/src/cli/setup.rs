use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-readable text
    #[default]
    Text,
    /// The structured command result as JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "brewlog",
    bin_name = "brewlog",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Track brewing batches and their dated stages", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (overrides config and BREWLOG_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Output format
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputMode::Text,
        help_heading = "Options"
    )]
    pub output: OutputMode,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// List all batches
    #[command(alias = "ls", display_order = 1)]
    List,

    /// Show a batch and its stages
    #[command(alias = "v", display_order = 2)]
    Show {
        /// Batch id, position or id prefix
        id: String,
    },

    /// Create a batch
    #[command(alias = "n", display_order = 3)]
    Create {
        name: String,

        /// Volume, in the preferred unit
        #[arg(allow_hyphen_values = true)]
        quantity: String,

        #[arg(long, short)]
        description: Option<String>,
    },

    /// Change a batch's name, quantity or description
    #[command(display_order = 4)]
    Edit {
        /// Batch id, position or id prefix
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        quantity: Option<String>,

        /// New description; pass "" to clear it
        #[arg(long, short)]
        description: Option<String>,
    },

    /// Delete a batch
    #[command(alias = "rm", display_order = 5)]
    Delete {
        /// Batch id, position or id prefix
        id: String,
    },

    /// Add or remove a batch's stages
    #[command(display_order = 6)]
    Stage {
        #[command(subcommand)]
        action: StageCommands,
    },

    /// Stages on a day (YYYY-MM-DD), or the days that have stages
    #[command(alias = "cal", display_order = 7)]
    Calendar { date: Option<String> },

    /// Show or set the preferred volume unit (L or Gal)
    #[command(display_order = 8)]
    Unit { unit: Option<String> },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum StageCommands {
    /// Add a dated stage to a batch
    Add {
        /// Batch id, position or id prefix
        batch: String,
        description: String,
        /// YYYY-MM-DD
        date: String,
    },

    /// Remove a stage from a batch
    #[command(alias = "rm")]
    Remove {
        /// Batch id, position or id prefix
        batch: String,
        /// Stage id or position within the batch
        stage: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("brewlog").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_naked_invocation_has_no_command() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert_eq!(cli.output, OutputMode::Text);
    }

    #[test]
    fn test_create_with_description() {
        let cli = parse(&["create", "IPA #1", "20", "-d", "Citra"]);
        assert_eq!(
            cli.command,
            Some(Commands::Create {
                name: "IPA #1".to_string(),
                quantity: "20".to_string(),
                description: Some("Citra".to_string()),
            })
        );
    }

    #[test]
    fn test_negative_quantity_reaches_validation() {
        let cli = parse(&["create", "IPA", "-5"]);
        match cli.command {
            Some(Commands::Create { quantity, .. }) => assert_eq!(quantity, "-5"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_stage_subcommands() {
        let cli = parse(&["stage", "add", "1", "Dry hop", "2024-05-01"]);
        assert_eq!(
            cli.command,
            Some(Commands::Stage {
                action: StageCommands::Add {
                    batch: "1".to_string(),
                    description: "Dry hop".to_string(),
                    date: "2024-05-01".to_string(),
                }
            })
        );

        let cli = parse(&["stage", "rm", "1", "2"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Stage {
                action: StageCommands::Remove { .. }
            })
        ));
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = parse(&["list", "--data", "/tmp/brew", "--output", "json", "-v"]);
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/brew")));
        assert_eq!(cli.output, OutputMode::Json);
        assert!(cli.verbose);
    }
}
