use anyhow::Result;
use artic_tools::config::Config;
use artic_tools::exhibition::ExhibitionClient;
use artic_tools::explorer::Explorer;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "exhibition-explorer",
    version,
    about = "Search Art Institute of Chicago exhibitions and browse their artworks"
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    artic_tools::init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)?;
    config.validate()?;

    let client = ExhibitionClient::new(&config.artic)?;
    let stdin = std::io::stdin();
    let mut explorer = Explorer::new(&client, stdin.lock(), std::io::stdout());
    explorer.run().await?;
    Ok(())
}
