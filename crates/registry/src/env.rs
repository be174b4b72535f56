//! Registry storage environment.
//!
//! The environment exclusively owns the engine handle and both tables.
//! All reads and writes go through closure-scoped transactions, so a
//! transaction can never outlive the call that owns it. The engine
//! provides the single-writer/multiple-reader model: one update at a
//! time, any number of concurrent views on stable snapshots.

use std::path::{Path, PathBuf};

use redb::Database;
use snafu::{ensure, ResultExt};
use tracing::{debug, info};

use relaydb_types::{Access, RegistryConfig};

use crate::error::{
    CommitSnafu, CreateTableSnafu, MissingDirectorySnafu, OpenDatabaseSnafu, RegistryError,
    Result, TransactionSnafu,
};
use crate::tables::Tables;
use crate::txn::{ReadTxn, WriteTxn};

/// File name of the embedded store inside the registry directory.
pub const DB_FILE_NAME: &str = "registry.redb";

/// A registry of channels and their rate-limit timestamps.
///
/// The access level is fixed at open time and stamped on every
/// transaction. The control and relay planes open their own environments
/// on the same directory; coordination between handles is delegated to
/// the engine's locking.
pub struct Environment {
    db: Database,
    access: Access,
    path: PathBuf,
}

impl Environment {
    /// Initializes the registry in `config.data_dir`, creating the store
    /// file and both tables.
    ///
    /// The directory must already exist. Meant to be run once at
    /// deployment; not safe to run concurrently with active use.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingDirectory`] when the directory does
    /// not exist, [`RegistryError::OpenDatabase`] when the store cannot be
    /// created, and [`RegistryError::CreateTable`] when a table cannot be
    /// created.
    pub fn initialize(access: Access, config: &RegistryConfig) -> Result<()> {
        ensure!(
            config.data_dir.is_dir(),
            MissingDirectorySnafu {
                path: &config.data_dir
            }
        );

        let env = Self::open(access, config)?;

        let txn = env.db.begin_write().context(TransactionSnafu)?;
        {
            let _channels = txn
                .open_table(Tables::CHANNELS)
                .context(CreateTableSnafu { name: "channel" })?;
            let _timestamps = txn
                .open_table(Tables::TIMESTAMPS)
                .context(CreateTableSnafu { name: "timestamp" })?;
        }
        txn.commit().context(CommitSnafu)?;

        info!(path = %env.path.display(), "initialized channel registry");
        env.close();
        Ok(())
    }

    /// Opens the registry store in `config.data_dir` with the access level
    /// every transaction of this environment will carry.
    ///
    /// The engine is configured with the page-cache size from `config`.
    /// Opening does not create the tables; a view on a registry that was
    /// never initialized fails.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::OpenDatabase`] on engine misconfiguration
    /// or OS-level failure.
    pub fn open(access: Access, config: &RegistryConfig) -> Result<Environment> {
        let path = config.data_dir.join(DB_FILE_NAME);
        let db = Database::builder()
            .set_cache_size(config.cache_size_bytes)
            .create(&path)
            .context(OpenDatabaseSnafu)?;

        debug!(path = %path.display(), access = %access, "opened channel registry");
        Ok(Environment { db, access, path })
    }

    /// Runs `f` inside one read-write transaction.
    ///
    /// Commits atomically iff `f` returns `Ok`; any error aborts and
    /// rolls back every write made by `f`. A crash during commit never
    /// leaves a partially-applied transaction visible.
    pub fn update<T, E>(&self, f: impl FnOnce(&mut WriteTxn<'_>) -> Result<T, E>) -> Result<T, E>
    where
        E: From<RegistryError>,
    {
        let txn = self
            .db
            .begin_write()
            .context(TransactionSnafu)
            .map_err(E::from)?;

        let outcome = match WriteTxn::open(&txn, self.access) {
            Ok(mut write) => f(&mut write),
            Err(err) => Err(E::from(err)),
        };

        match outcome {
            Ok(value) => {
                txn.commit().context(CommitSnafu).map_err(E::from)?;
                Ok(value)
            }
            Err(err) => {
                let _ = txn.abort();
                Err(err)
            }
        }
    }

    /// Runs `f` inside a read-only, point-in-time-consistent transaction.
    ///
    /// Any number of views may run concurrently with each other and with
    /// an in-flight update without observing its uncommitted effects.
    pub fn view<T, E>(&self, f: impl FnOnce(&ReadTxn) -> Result<T, E>) -> Result<T, E>
    where
        E: From<RegistryError>,
    {
        let txn = self
            .db
            .begin_read()
            .context(TransactionSnafu)
            .map_err(E::from)?;
        let read = ReadTxn::open(&txn, self.access).map_err(E::from)?;
        f(&read)
    }

    /// Access level this environment was opened with.
    pub fn access(&self) -> Access {
        self.access
    }

    /// Path of the embedded store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Releases the engine handle.
    ///
    /// The environment is consumed, so further use is a compile error;
    /// the close-exactly-once contract is enforced by ownership.
    pub fn close(self) {
        let Environment { db, path, .. } = self;
        debug!(path = %path.display(), "closing channel registry");
        drop(db);
    }
}
