pub mod config;
pub mod error;
pub mod exhibition;
pub mod explorer;
pub mod http;
pub mod llm;
pub mod user;

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber shared by both binaries.
/// `RUST_LOG` overrides the default `artic_tools=warn` filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("artic_tools=warn")),
        )
        .init();
}
