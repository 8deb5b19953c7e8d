use clap::Parser;

/// Terminal front end for the dog registry
#[derive(Debug, Parser)]
#[command(name = "registry-frontend", about = "Terminal front end for the dog registry", long_about = None)]
pub struct Cli {
    /// Base URL of the registry backend
    #[arg(long, env = "REGISTRY_API_URL", default_value = "http://127.0.0.1:5000")]
    pub api_url: String,

    /// Global timeout for each request, in seconds
    #[arg(long, env = "REGISTRY_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,
}

impl Cli {
    /// Load configuration from `.env`, the environment and CLI arguments.
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();
        Self::try_parse()
    }
}
