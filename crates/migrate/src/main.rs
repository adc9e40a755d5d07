//! `nginwho-migrate` -- one-shot v1 -> v2 database migration.
//!
//! Reads the flat v1 access-log table and writes the v2 star schema, one
//! transaction per batch.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default         | Description                    |
//! |------------------------|----------|-----------------|--------------------------------|
//! | `NGINWHO_V1_DB`        | no       | `nginwho_v1.db` | Source database file           |
//! | `NGINWHO_V2_DB`        | no       | `nginwho_v2.db` | Target database file           |
//! | `MIGRATION_BATCH_SIZE` | no       | `50000`         | Records per transaction        |
//! | `MIGRATION_PAGE_SIZE`  | no       | batch size      | Rows fetched from v1 per query |

use std::process::ExitCode;

use nginwho_migrate::config::MigrationConfig;
use nginwho_migrate::migration::Migration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nginwho_migrate=info,nginwho_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match MigrationConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        source = %config.source_path.display(),
        target = %config.target_path.display(),
        batch_size = config.batch_size,
        page_size = config.page_size,
        "Starting nginwho-migrate",
    );

    match Migration::new(config).run().await {
        Ok(report) => {
            tracing::info!(
                facts_written = report.facts_written,
                skipped = ?report.skipped,
                "Migration complete",
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            if let Some(command) = e.recovery_command() {
                tracing::error!("Retry after recovering your DB with: {command}");
            }
            ExitCode::FAILURE
        }
    }
}
