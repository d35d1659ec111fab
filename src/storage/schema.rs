//! Table definitions and row mapping for the ledger database.

use rusqlite::{Connection, Error, Row};

use crate::models::{Budget, Transaction};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create the table (and its indexes) for the model if it does not exist.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), Error>;
}

/// A trait for mapping from a `rusqlite::Row` to a concrete rust type.
pub trait MapRow {
    type ReturnType;

    /// Convert a row into a concrete type.
    ///
    /// **Note:** This function expects that the row object contains all the table columns in the order they were defined.
    fn map_row(row: &Row) -> Result<Self::ReturnType, Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert a row into a concrete type, reading from column `offset` onwards.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, Error>;
}

/// Column list matching [`MapRow`] for [`Transaction`]
pub const TRANSACTION_COLUMNS: &str =
    "id, date, amount_cents, category, description, kind, created_at";

/// Column list matching [`MapRow`] for [`Budget`]
pub const BUDGET_COLUMNS: &str = "id, category, limit_cents, month";

impl CreateTable for Transaction {
    fn create_table(connection: &Connection) -> Result<(), Error> {
        connection.execute_batch(
            "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                amount_cents INTEGER NOT NULL CHECK (amount_cents > 0),
                category TEXT NOT NULL CHECK (length(category) > 0),
                description TEXT,
                kind TEXT NOT NULL CHECK (kind IN ('expense', 'income')),
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions (date);
            CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions (category);",
        )
    }
}

impl MapRow for Transaction {
    type ReturnType = Self;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self, Error> {
        Ok(Self {
            id: row.get(offset)?,
            date: row.get(offset + 1)?,
            amount: row.get(offset + 2)?,
            category: row.get(offset + 3)?,
            description: row.get(offset + 4)?,
            kind: row.get(offset + 5)?,
            created_at: row.get(offset + 6)?,
        })
    }
}

impl CreateTable for Budget {
    fn create_table(connection: &Connection) -> Result<(), Error> {
        connection.execute_batch(
            "CREATE TABLE IF NOT EXISTS budgets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL,
                limit_cents INTEGER NOT NULL CHECK (limit_cents >= 0),
                month TEXT NOT NULL,
                UNIQUE (category, month)
            );",
        )
    }
}

impl MapRow for Budget {
    type ReturnType = Self;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self, Error> {
        Ok(Self {
            id: row.get(offset)?,
            category: row.get(offset + 1)?,
            limit: row.get(offset + 2)?,
            month: row.get(offset + 3)?,
        })
    }
}

/// Create every table the ledger needs.
pub fn initialize_schema(connection: &Connection) -> Result<(), Error> {
    Transaction::create_table(connection)?;
    Budget::create_table(connection)?;
    Ok(())
}
