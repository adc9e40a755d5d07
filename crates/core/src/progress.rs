//! Migration run phases and the paging cursor.

use serde::Serialize;

/// Default number of records committed per transaction.
pub const DEFAULT_BATCH_SIZE: usize = 50_000;

/// Phase of a migration run.
///
/// `Init -> Counting -> (Reading <-> Writing) -> Draining -> Done`. Source
/// problems fail the run from `Init` or `Counting`; schema, read and write
/// errors fail it from whichever phase they happen in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationState {
    Init,
    Counting,
    Reading,
    Writing,
    Draining,
    Done,
    Failed,
}

impl MigrationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Counting => "counting",
            Self::Reading => "reading",
            Self::Writing => "writing",
            Self::Draining => "draining",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Whether moving from `self` to `next` is a legal step.
    pub fn can_transition_to(&self, next: MigrationState) -> bool {
        use MigrationState::*;
        if next == Failed {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (Init, Counting)
                | (Counting, Reading)
                | (Reading, Reading)
                | (Reading, Writing)
                | (Reading, Draining)
                | (Writing, Reading)
                | (Draining, Done)
        )
    }
}

impl std::fmt::Display for MigrationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Offset cursor over the source table plus a display-only remaining estimate.
///
/// `remaining` does not account for rows dropped by validation or filtered by
/// the reader, so it can drift from the true amount of work left. The run ends
/// when a page comes back empty, never because `remaining` hit zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageCursor {
    pub total: u64,
    pub remaining: u64,
    pub offset: u64,
    pub page_size: u64,
}

impl PageCursor {
    pub fn new(total: u64, page_size: u64) -> Self {
        Self {
            total,
            remaining: total,
            offset: 0,
            page_size,
        }
    }

    /// Move past the current page, however many of its rows were accepted.
    pub fn advance(&mut self) {
        self.offset += self.page_size;
        self.remaining = self.remaining.saturating_sub(self.page_size);
    }
}
