use anyhow::Result;
use artic_tools::config::Config;
use artic_tools::llm::{LlmClient, Provider};
use artic_tools::user;
use clap::Parser;
use clap::error::ErrorKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "user-creation",
    version,
    about = "Turn an introduction message into a JSON user record using an LLM"
)]
struct Cli {
    /// Introduction message, e.g. "Hi, I'm Sam, 19, from Tulsa, squadron 4, studying physics"
    #[arg(allow_hyphen_values = true)]
    introduction: String,

    /// Path to config file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// LLM provider override: ollama, openai, openrouter
    #[arg(long)]
    provider: Option<Provider>,

    /// LLM model override
    #[arg(long)]
    model: Option<String>,
}

/// Usage errors exit with status 1; help and version keep clap's behaviour.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = parse_cli();

    artic_tools::init_tracing();
    dotenvy::dotenv().ok();

    let mut config = Config::load_or_default(&cli.config)?;
    if let Some(provider) = cli.provider {
        config.llm.provider = provider;
    }
    if let Some(model) = cli.model {
        config.llm.model = model;
    }
    config.validate()?;

    let llm = LlmClient::from_config(&config.llm)?;
    let record = user::create_user(&llm, &cli.introduction).await?;
    println!("{record}");
    Ok(())
}
