use crate::core::Draft;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "poetic-mail")]
#[command(about = "Compose poetic emails and send them to @bhavyabgada.dev recipients")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to a TOML settings file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, global = true, env = "EMAIL_SENDER")]
    pub sender: Option<String>,

    #[arg(long, global = true, env = "EMAIL_PASSWORD", hide_env_values = true)]
    pub sender_password: Option<String>,

    #[arg(long, global = true, env = "OPENAI_BASE_URL")]
    pub endpoint: Option<String>,

    #[arg(long, global = true)]
    pub model: Option<String>,

    #[arg(long, global = true)]
    pub temperature: Option<f64>,

    #[arg(long, global = true)]
    pub smtp_host: Option<String>,

    #[arg(long, global = true)]
    pub smtp_port: Option<u16>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Generate and print the poetic version without sending it
    Preview(DraftArgs),
    /// Generate the poetic version and send it
    Send(DraftArgs),
    /// Preview, ask for confirmation, then send the previewed version
    Compose(ComposeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct DraftArgs {
    #[arg(long, help = "Recipient email (@bhavyabgada.dev only)")]
    pub to: String,

    #[arg(long, default_value = "")]
    pub subject: String,

    #[arg(long, help = "Your message")]
    pub body: String,
}

#[derive(Debug, Clone, Args)]
pub struct ComposeArgs {
    #[command(flatten)]
    pub draft: DraftArgs,

    #[arg(long, short, help = "Send without asking for confirmation")]
    pub yes: bool,
}

impl From<&DraftArgs> for Draft {
    fn from(args: &DraftArgs) -> Self {
        Draft::new(args.to.clone(), args.subject.clone(), args.body.clone())
    }
}
