use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "agent-apply",
    version,
    about = "Sign a request payload and submit it to a running agent"
)]
struct AppCli {
    /// Agent config file with bind-address, bind-port and shared-secret
    #[arg(short, long, default_value = "agent-config.toml")]
    config: PathBuf,

    /// Request payload file (YAML)
    #[arg(short, long, default_value = "request.yaml")]
    request: PathBuf,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = AppCli::parse();

    agent_apply::utils::logging::init();

    let code = agent_apply::run(&cli.config, &cli.request).await?;

    Ok(ExitCode::from(code))
}
