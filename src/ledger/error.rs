/// Failures of the account store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The backend rejected or failed a statement.
    Storage(String),
    /// In-process state is unusable after a panic while it was held.
    Poisoned,
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(s) => write!(f, "storage error: {}", s),
            Self::Poisoned => write!(f, "ledger state poisoned"),
        }
    }
}

impl std::error::Error for LedgerError {}

#[cfg(feature = "database")]
impl From<tokio_postgres::Error> for LedgerError {
    fn from(e: tokio_postgres::Error) -> Self {
        Self::Storage(e.to_string())
    }
}
