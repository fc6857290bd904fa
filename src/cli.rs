use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// `leapread` - summarize official-account articles and pull out their links.
#[derive(Parser, Debug)]
#[command(name = "leapread")]
#[command(version)]
#[command(about = "Summarize articles and extract their links.", long_about = None)]
pub struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract an article and summarize it
    Summarize {
        /// Article url or path to a saved HTML page
        source: String,

        /// Prompt to use for this run only
        #[arg(short, long)]
        prompt: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Extract the links of an article without summarizing
    Links {
        /// Article url or path to a saved HTML page
        source: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Inspect or change the API configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Manage the saved prompt override
    Prompt {
        #[command(subcommand)]
        command: PromptCommands,
    },
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Also write a standalone HTML page to this file
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,

    /// Print the machine-readable result instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the stored configuration (key masked)
    Show,

    /// Write default endpoint, model and prompt, keeping any stored key
    Init,

    /// Change individual settings
    Set {
        #[arg(long)]
        endpoint: Option<String>,

        #[arg(long)]
        api_key: Option<String>,

        #[arg(long)]
        model: Option<String>,

        /// Default prompt used when no override is saved
        #[arg(long)]
        default_prompt: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PromptCommands {
    /// Show the prompt summaries will use
    Show,

    /// Save a prompt override
    Set { prompt: String },

    /// Remove the prompt override
    Reset,
}
