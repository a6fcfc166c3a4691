use clap::{Parser, Subcommand};
use sea_orm::Database;
use sea_orm_migration::prelude::*;

const DEFAULT_DATABASE_URL: &str = "sqlite:./finance.db?mode=rwc";

/// Schema maintenance for the finance tracker document store.
#[derive(Debug, Parser)]
#[command(name = "finance-migrate")]
struct Cli {
    /// Database to migrate. Falls back to `DATABASE_URL`, then `./finance.db`.
    #[arg(long, env = "FINANCE_DATABASE_URL")]
    database_url: Option<String>,
    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Action {
    /// Apply pending migrations (default).
    Up,
    /// Roll back every applied migration.
    Down,
    /// Drop every table and reapply all migrations.
    Fresh,
    /// List applied and pending migrations.
    Status,
}

impl Cli {
    fn database_url(&self) -> String {
        self.database_url
            .clone()
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let db = Database::connect(&cli.database_url()).await?;

    match cli.action.unwrap_or(Action::Up) {
        Action::Up => migration::Migrator::up(&db, None).await?,
        Action::Down => migration::Migrator::down(&db, None).await?,
        Action::Fresh => migration::Migrator::fresh(&db).await?,
        Action::Status => migration::Migrator::status(&db).await?,
    }

    Ok(())
}
