use clap::Parser;
use env_logger::Env;

use report_cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let report = run(Cli::parse()).await?;
    match report.saved_to {
        Some(path) => println!("{}", path.display()),
        None => println!("{}", report.download_url),
    }
    Ok(())
}
