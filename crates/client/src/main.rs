use clap::Parser;
use finance_client::{App, Result, cli::Cli, config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("finance_client=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::load(&cli.global)?;
    let mut app = App::new(&config, cli.global.today)?;
    let output = app.run(cli.command).await?;
    print!("{output}");
    Ok(())
}
