//! Error types for the registry, using snafu.

use std::path::PathBuf;

use snafu::Snafu;

use relaydb_types::CodecError;

/// Result type for registry operations.
pub type Result<T, E = RegistryError> = std::result::Result<T, E>;

/// Errors surfaced by the registry.
///
/// Access-level violations are not represented here: invoking an operation
/// under the wrong access level is a programmer error in the calling plane
/// and aborts via a fatal assertion instead of unwinding into a
/// recoverable variant. Any error returned inside an update rolls back the
/// whole transaction.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RegistryError {
    /// The registry directory must exist before initialization.
    #[snafu(display("registry directory does not exist: {}", path.display()))]
    MissingDirectory {
        /// The directory that was expected to exist.
        path: PathBuf,
    },

    /// The engine store could not be configured or opened.
    #[snafu(display("failed to open the registry store: {source}"))]
    OpenDatabase { source: redb::DatabaseError },

    /// A registry table could not be created during initialization.
    #[snafu(display("failed to create table {name}: {source}"))]
    CreateTable {
        name: &'static str,
        source: redb::TableError,
    },

    /// A transaction could not be started.
    #[snafu(display("failed to begin transaction: {source}"))]
    Transaction { source: redb::TransactionError },

    /// A registry table could not be opened inside a transaction.
    #[snafu(display("failed to open table: {source}"))]
    Table { source: redb::TableError },

    /// An engine read or write failed.
    #[snafu(display("storage operation failed: {source}"))]
    Storage { source: redb::StorageError },

    /// A transaction could not be committed.
    #[snafu(display("failed to commit transaction: {source}"))]
    Commit { source: redb::CommitError },

    /// A stored value failed to decode.
    #[snafu(display("stored value is corrupt: {source}"))]
    Codec { source: CodecError },
}
