use thiserror::Error;

/// Errors surfaced by the off-chain store. The ledger never sees these; a
/// caller that hits one simply never submits a transaction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("identity is not registered in the voter set")]
    UnknownVoter,

    #[error("leaf index {index} out of range")]
    IndexOutOfRange { index: usize },

    #[error("voter set is full ({max} leaves)")]
    TreeFull { max: usize },

    #[error("identity already registered at leaf {index}")]
    DuplicateIdentity { index: usize },

    #[error("invalid decision tag {0}, expected 0, 1 or 2")]
    InvalidDecision(u32),
}
