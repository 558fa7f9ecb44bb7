//! Connection pool and schema management.
//!
//! `serve` opens the pool through [`Database::connect`], which brings the
//! schema up to date. The `migrate` subcommand uses [`Database::open`] and
//! drives the migrator by hand.

use std::collections::HashSet;

use sea_orm::{
    ConnectOptions, Database as SeaDatabase, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
};
use sea_orm_migration::{seaql_migrations, MigratorTrait};

use crate::config::Config;

pub mod migrations;

pub use migrations::Migrator;

/// One migration known to the binary and whether the database has it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

/// Pooled connection shared by repositories and the health probe.
#[derive(Clone)]
pub struct Database {
    pool: DatabaseConnection,
}

impl Database {
    /// Open the pool and apply every pending migration.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let db = Self::open(config).await?;
        db.migrate_up().await?;

        tracing::info!(
            max_connections = config.database_max_connections,
            "Database ready"
        );
        Ok(db)
    }

    /// Open the pool and leave the schema alone.
    pub async fn open(config: &Config) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.database_url.as_str());
        options.max_connections(config.database_max_connections);

        Ok(Self {
            pool: SeaDatabase::connect(options).await?,
        })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.pool
    }

    pub async fn migrate_up(&self) -> Result<(), DbErr> {
        Migrator::up(&self.pool, None).await
    }

    /// Revert the most recent migration only.
    pub async fn migrate_down(&self) -> Result<(), DbErr> {
        Migrator::down(&self.pool, Some(1)).await
    }

    /// Drop all tables, then apply every migration from scratch.
    pub async fn migrate_fresh(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.pool).await
    }

    /// Every migration in the binary, in order, with its applied flag.
    pub async fn migrations(&self) -> Result<Vec<MigrationState>, DbErr> {
        let applied: HashSet<String> = seaql_migrations::Entity::find()
            .order_by_asc(seaql_migrations::Column::Version)
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|row| row.version)
            .collect();

        Ok(Migrator::migrations()
            .into_iter()
            .map(|migration| {
                let name = migration.name().to_string();
                MigrationState {
                    applied: applied.contains(&name),
                    name,
                }
            })
            .collect())
    }

    pub async fn ping(&self) -> Result<(), DbErr> {
        self.pool.ping().await
    }
}
