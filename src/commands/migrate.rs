//! `migrate` subcommand: manual control over the schema.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::open(&config).await?;

    match args.action {
        MigrateAction::Up => {
            db.migrate_up().await?;
            tracing::info!("Pending migrations applied");
        }
        MigrateAction::Down => {
            db.migrate_down().await?;
            tracing::info!("Last migration reverted");
        }
        MigrateAction::Status => {
            for migration in db.migrations().await? {
                let mark = if migration.applied { "x" } else { " " };
                println!("[{}] {}", mark, migration.name);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables before re-applying migrations");
            db.migrate_fresh().await?;
            tracing::info!("Schema rebuilt from scratch");
        }
    }

    Ok(())
}
