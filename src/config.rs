// Command-line configuration. Every global option can also come from the
// environment so the scripted run still works with no flags at all.

use crate::api::{ApiClient, DEFAULT_BASE_URL, DEFAULT_GENERATE_LENGTH};
use crate::error::ApiResult;
use clap::{ArgAction, Parser, Subcommand};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Client for the GPT x LUTs API", long_about = None)]
pub struct Args {
    /// Base URL of the LUT service
    #[arg(long, env = "LUT_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Request timeout in seconds. Requests wait indefinitely when unset
    #[arg(long, env = "LUT_API_TIMEOUT", global = true)]
    pub timeout_secs: Option<u64>,

    /// Unique ID of your personal LUT
    #[arg(short, long, env = "LUT_NAME", global = true)]
    pub lut_name: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Train the sample label, then generate from the sample prompt
    Demo,

    /// Interactive generate and train panels
    Ui,

    /// Generate a completion for PROMPT
    Generate {
        prompt: String,

        /// How many tokens to generate
        #[arg(long, default_value_t = DEFAULT_GENERATE_LENGTH)]
        length: u32,
    },

    /// Train LABEL into the LUT
    Train {
        label: String,

        /// Context the label should be associated with
        #[arg(short, long)]
        context: Option<String>,
    },
}

impl Args {
    /// The subcommand to run; a bare invocation runs the demo.
    pub fn command(&self) -> Commands {
        self.cmd.clone().unwrap_or(Commands::Demo)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn client(&self) -> ApiResult<ApiClient> {
        ApiClient::new(&self.base_url, self.timeout())
    }
}
