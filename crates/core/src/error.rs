use crate::attribute::Attribute;

/// A source timestamp that does not match `dd-Mon-YYYY:HH:MM:SS`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse '{input}' as dd-Mon-YYYY:HH:MM:SS: {reason}")]
pub struct DateParseError {
    pub input: String,
    pub reason: String,
}

/// Why a source row was dropped instead of migrated.
///
/// Rejections are never fatal: the row is skipped and the run continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowRejection {
    #[error("garbled http method: {method:?}")]
    MalformedMethod { method: String },

    #[error("missing mandatory attribute: {0}")]
    MissingAttribute(Attribute),

    #[error(transparent)]
    UnparseableDate(#[from] DateParseError),
}

impl RowRejection {
    /// Stable label used as the key in run reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedMethod { .. } => "malformed_method",
            Self::MissingAttribute(_) => "missing_attribute",
            Self::UnparseableDate(_) => "unparseable_date",
        }
    }
}
