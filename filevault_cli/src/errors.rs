use std::io;
use thiserror::Error;
use filevault::ledger::{
    AccountError, AdminError, CreateError, FileError, FolderError, MemberError, OpenError, QueryError,
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Ledger is not open. Please open or create a ledger first.")]
    LedgerNotOpen,

    #[error("Invalid name provided: {0}")]
    InvalidName(String),

    #[error("Action was not confirmed by the user.")]
    ConfirmationFailed,

    #[error("The ledger lock was poisoned by an earlier panic.")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("REPL Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("Failed to create ledger: {0}")]
    Create(#[from] CreateError),

    #[error("Failed to open ledger: {0}")]
    Open(#[from] OpenError),

    #[error("Administrative operation failed: {0}")]
    Admin(#[from] AdminError),

    #[error("Folder operation failed: {0}")]
    Folder(#[from] FolderError),

    #[error("Member operation failed: {0}")]
    Member(#[from] MemberError),

    #[error("File operation failed: {0}")]
    File(#[from] FileError),

    #[error("Account operation failed: {0}")]
    Account(#[from] AccountError),

    #[error("Failed to query ledger: {0}")]
    Query(#[from] QueryError),
}
