use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(
    name = "topic-mcq",
    version,
    about = "Generate multiple-choice questions for a topic and take them as a quiz"
)]
pub struct Cli {
    /// generateContent endpoint of the generation service
    #[arg(long, env = "GEMINI_API_URL", global = true)]
    pub api_url: Option<String>,

    /// API key sent as the `key` query parameter
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Number of questions to ask the service for
    #[arg(short = 'n', long, env = "QUESTION_COUNT", global = true)]
    pub count: Option<u16>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a question set and print or export it
    Generate(GenerateArgs),
    /// Generate (or load) a question set and take the test
    Quiz(QuizArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    pub topic: String,

    /// Write the set as CSV to this path
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Write the set as CSV to `<topic>_MCQs.csv` in the current directory
    #[arg(long, conflicts_with = "csv")]
    pub export: bool,

    /// Write the set as pretty-printed JSON to this path
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct QuizArgs {
    /// Prompted for when omitted
    pub topic: Option<String>,

    /// Take the test from a previously exported CSV instead of generating
    #[arg(long, value_name = "PATH")]
    pub from_csv: Option<PathBuf>,

    /// Also write the generated set to `<topic>_MCQs.csv`
    #[arg(long)]
    pub export: bool,
}

impl Cli {
    /// Flags win over the environment-derived config.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(url) = &self.api_url {
            config = config.with_api_url(url.clone());
        }
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key.clone());
        }
        if let Some(count) = self.count {
            config = config.with_question_count(count);
        }
        config
    }

    /// Only loading a CSV works without the generation service.
    pub fn needs_generator(&self) -> bool {
        !matches!(
            &self.command,
            Command::Quiz(QuizArgs {
                from_csv: Some(_),
                ..
            })
        )
    }
}
