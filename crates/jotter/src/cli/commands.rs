//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Create command arguments.
#[derive(Debug, Args)]
pub struct NewCommand {
    /// Title for the note
    #[arg(short, long)]
    pub title: Option<String>,

    /// Markdown content for the note
    #[arg(short = 'b', long)]
    pub content: Option<String>,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show notes whose title or content contains this text
    pub query: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Id of the note to show
    pub id: String,

    /// Print the rendered HTML preview instead of the markdown source
    #[arg(long)]
    pub html: bool,
}

/// Edit command arguments.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Id of the note to edit
    pub id: String,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New markdown content
    #[arg(short = 'b', long)]
    pub content: Option<String>,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the note to delete
    pub id: String,

    /// Delete without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Plans command arguments.
#[derive(Debug, Args)]
pub struct PlansCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Checkout command arguments.
#[derive(Debug, Args)]
pub struct CheckoutCommand {
    /// Plan to subscribe to (defaults to the configured plan)
    #[arg(short, long)]
    pub plan: Option<String>,

    /// Receipt email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// Card number
    #[arg(long, default_value = "")]
    pub card: String,

    /// Card expiry as MM/YY
    #[arg(long, default_value = "")]
    pub expiry: String,

    /// Card security code
    #[arg(long, default_value = "")]
    pub cvc: String,

    /// Cardholder name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Billing country
    #[arg(long)]
    pub country: Option<String>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_command_debug() {
        let cmd = DeleteCommand {
            id: "abc".to_string(),
            yes: true,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("abc"));
        assert!(debug_str.contains("yes"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        assert!(format!("{cmd:?}").contains("Show"));
    }
}
