//! Storage layer for Tally
//!
//! A single SQLite file holds the transaction and budget tables. Repositories
//! borrow the connection owned by [`Storage`].

pub mod budgets;
pub mod schema;
pub mod transactions;

pub use budgets::BudgetRepository;
pub use schema::{initialize_schema, CreateTable, MapRow};
pub use transactions::{
    CategoryCount, CategoryKindTotal, KindTotal, MonthKindTotal, TransactionQuery,
    TransactionRepository,
};

use std::path::PathBuf;

use rusqlite::Connection;

use crate::config::paths::TallyPaths;
use crate::error::TallyResult;

/// Owns the database connection and hands out repositories
pub struct Storage {
    connection: Connection,
    path: Option<PathBuf>,
}

impl Storage {
    /// Open (creating if necessary) the ledger database under `paths`
    pub fn open(paths: &TallyPaths) -> TallyResult<Self> {
        paths.ensure_directories()?;

        let path = paths.database_file();
        let connection = Connection::open(&path)?;
        initialize_schema(&connection)?;
        tracing::debug!(path = %path.display(), "opened ledger database");

        Ok(Self {
            connection,
            path: Some(path),
        })
    }

    /// Open a throwaway in-memory ledger
    pub fn open_in_memory() -> TallyResult<Self> {
        let connection = Connection::open_in_memory()?;
        initialize_schema(&connection)?;

        Ok(Self {
            connection,
            path: None,
        })
    }

    /// Location of the database file, `None` for in-memory storage
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    pub fn transactions(&self) -> TransactionRepository<'_> {
        TransactionRepository::new(&self.connection)
    }

    pub fn budgets(&self) -> BudgetRepository<'_> {
        BudgetRepository::new(&self.connection)
    }

    /// Run several reads against one consistent snapshot of the database
    pub fn snapshot<T>(&self, read: impl FnOnce(&Self) -> TallyResult<T>) -> TallyResult<T> {
        let tx = self.connection.unchecked_transaction()?;
        let result = read(self)?;
        tx.commit()?;
        Ok(result)
    }
}
