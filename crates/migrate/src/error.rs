use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("V1 database does not exist at {}", path.display())]
    SourceMissing { path: PathBuf },

    #[error("Could not count rows in {}: {source}", path.display())]
    SourceUnreadable { path: PathBuf, source: sqlx::Error },

    #[error("Could not open v2 database at {}: {source}", path.display())]
    TargetUnavailable { path: PathBuf, source: sqlx::Error },

    #[error("Could not create v2 schema: {0}")]
    Schema(#[source] sqlx::Error),

    #[error("Could not read rows with limit {limit} from offset {offset}: {source}")]
    Read {
        offset: u64,
        limit: u64,
        source: sqlx::Error,
    },

    #[error("Could not write batch of {records} logs: {source}")]
    Write { records: usize, source: sqlx::Error },
}

impl MigrateError {
    /// Command the operator should run before retrying, if any.
    pub fn recovery_command(&self) -> Option<String> {
        match self {
            Self::SourceUnreadable { path, .. } => Some(recovery_command(path)),
            _ => None,
        }
    }
}

/// `sqlite3 .recover` pipeline that salvages `path` into `<stem>_recovered.db`
/// next to it.
pub fn recovery_command(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "nginwho".into());
    let recovered = path.with_file_name(format!("{stem}_recovered.db"));
    format!(
        "sqlite3 {} '.recover' | sqlite3 {}",
        path.display(),
        recovered.display()
    )
}
