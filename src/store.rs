use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row};

use crate::db::{get_connection, init_db};
use crate::error::{ChiTieuError, Result};
use crate::icons::Icon;
use crate::models::{Budget, ExpenseCategory, NewTransaction, Transaction, TransactionType, Wallet};

const TXN_COLUMNS: &str = "id, amount, txn_type, category_id, wallet_id, date, note, created_at";

fn row_to_transaction(row: &Row) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        txn_type: row.get(2)?,
        category_id: row.get(3)?,
        wallet_id: row.get(4)?,
        date: row.get(5)?,
        note: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn row_to_category(row: &Row) -> rusqlite::Result<ExpenseCategory> {
    Ok(ExpenseCategory {
        id: row.get(0)?,
        name: row.get(1)?,
        icon: row.get(2)?,
        color: row.get(3)?,
        category_type: row.get(4)?,
    })
}

fn row_to_wallet(row: &Row) -> rusqlite::Result<Wallet> {
    Ok(Wallet {
        id: row.get(0)?,
        name: row.get(1)?,
        balance: row.get(2)?,
        icon: row.get(3)?,
        color: row.get(4)?,
    })
}

fn row_to_budget(row: &Row) -> rusqlite::Result<Budget> {
    Ok(Budget {
        id: row.get(0)?,
        category_id: row.get(1)?,
        amount: row.get(2)?,
        month: row.get(3)?,
        year: row.get(4)?,
    })
}

/// Signed effect of a transaction on its wallet balance.
fn balance_delta(txn_type: TransactionType, amount: f64) -> f64 {
    match txn_type {
        TransactionType::Income => amount,
        TransactionType::Expense => -amount,
    }
}

/// Owns the database connection and every read/write of ledger data.
pub struct Ledger {
    conn: Connection,
}

impl Ledger {
    /// Open (creating and seeding if needed) the ledger database at `db_path`.
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = get_connection(db_path)?;
        init_db(&conn)?;
        Ok(Self { conn })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    // -----------------------------------------------------------------------
    // Categories
    // -----------------------------------------------------------------------

    pub fn categories(&self) -> Result<Vec<ExpenseCategory>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, icon, color, category_type FROM categories ORDER BY position, id",
        )?;
        let rows = stmt.query_map([], row_to_category)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn categories_of(&self, category_type: TransactionType) -> Result<Vec<ExpenseCategory>> {
        Ok(self
            .categories()?
            .into_iter()
            .filter(|c| c.category_type == category_type)
            .collect())
    }

    pub fn category(&self, id: &str) -> Result<ExpenseCategory> {
        self.conn
            .query_row(
                "SELECT id, name, icon, color, category_type FROM categories WHERE id = ?1",
                [id],
                row_to_category,
            )
            .optional()?
            .ok_or_else(|| ChiTieuError::UnknownCategory(id.to_string()))
    }

    pub fn add_category(&self, category: &ExpenseCategory) -> Result<()> {
        if category.id.trim().is_empty() || category.name.trim().is_empty() {
            return Err(ChiTieuError::Invalid("category id and name must not be empty".to_string()));
        }
        if self.category(&category.id).is_ok() {
            return Err(ChiTieuError::Invalid(format!("category '{}' already exists", category.id)));
        }
        let position: i64 = self.conn.query_row(
            "SELECT IFNULL(MAX(position), -1) + 1 FROM categories",
            [],
            |r| r.get(0),
        )?;
        self.conn.execute(
            "INSERT INTO categories (id, name, icon, color, category_type, position) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                category.id,
                category.name,
                category.icon,
                category.color,
                category.category_type,
                position
            ],
        )?;
        tracing::info!(id = %category.id, "added category");
        Ok(())
    }

    /// Remove a category. Existing transactions keep the old id; the
    /// suggestion engine never returns it again.
    pub fn delete_category(&self, id: &str) -> Result<ExpenseCategory> {
        let category = self.category(id)?;
        self.conn.execute("DELETE FROM categories WHERE id = ?1", [id])?;
        self.conn.execute("DELETE FROM budgets WHERE category_id = ?1", [id])?;
        tracing::info!(id, "deleted category");
        Ok(category)
    }

    // -----------------------------------------------------------------------
    // Wallets
    // -----------------------------------------------------------------------

    pub fn wallets(&self) -> Result<Vec<Wallet>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, balance, icon, color FROM wallets ORDER BY created_at, id")?;
        let rows = stmt.query_map([], row_to_wallet)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn wallet(&self, id: &str) -> Result<Wallet> {
        self.conn
            .query_row(
                "SELECT id, name, balance, icon, color FROM wallets WHERE id = ?1",
                [id],
                row_to_wallet,
            )
            .optional()?
            .ok_or_else(|| ChiTieuError::UnknownWallet(id.to_string()))
    }

    pub fn add_wallet(&self, id: &str, name: &str, balance: f64, icon: Icon, color: &str) -> Result<Wallet> {
        if id.trim().is_empty() || name.trim().is_empty() {
            return Err(ChiTieuError::Invalid("wallet id and name must not be empty".to_string()));
        }
        if self.wallet(id).is_ok() {
            return Err(ChiTieuError::Invalid(format!("wallet '{id}' already exists")));
        }
        self.conn.execute(
            "INSERT INTO wallets (id, name, balance, icon, color) VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![id, name, balance, icon, color],
        )?;
        tracing::info!(id, balance, "added wallet");
        self.wallet(id)
    }

    pub fn total_balance(&self) -> Result<f64> {
        Ok(self
            .conn
            .query_row("SELECT IFNULL(SUM(balance), 0) FROM wallets", [], |r| r.get(0))?)
    }

    // -----------------------------------------------------------------------
    // Transactions
    // -----------------------------------------------------------------------

    /// All transactions, newest first.
    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        let sql = format!("SELECT {TXN_COLUMNS} FROM transactions ORDER BY date DESC, id DESC");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_transaction)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Transactions dated in the given month, newest first.
    pub fn transactions_in_month(&self, year: i32, month: u32) -> Result<Vec<Transaction>> {
        let sql = format!(
            "SELECT {TXN_COLUMNS} FROM transactions WHERE date LIKE ?1 ORDER BY date DESC, id DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([format!("{year:04}-{month:02}-%")], row_to_transaction)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn transaction(&self, id: i64) -> Result<Transaction> {
        let sql = format!("SELECT {TXN_COLUMNS} FROM transactions WHERE id = ?1");
        self.conn
            .query_row(&sql, [id], row_to_transaction)
            .optional()?
            .ok_or(ChiTieuError::UnknownTransaction(id))
    }

    /// Record a transaction and apply it to its wallet balance atomically.
    pub fn add_transaction(&self, new: &NewTransaction) -> Result<Transaction> {
        if !new.amount.is_finite() || new.amount <= 0.0 {
            return Err(ChiTieuError::Invalid(format!(
                "amount must be a positive number, got {}",
                new.amount
            )));
        }
        if chrono::NaiveDate::parse_from_str(&new.date, "%Y-%m-%d").is_err() {
            return Err(ChiTieuError::Invalid(format!("date must be YYYY-MM-DD, got '{}'", new.date)));
        }
        let category = self.category(&new.category_id)?;
        if category.category_type != new.txn_type {
            return Err(ChiTieuError::Invalid(format!(
                "category '{}' is an {} category, not {}",
                category.id, category.category_type, new.txn_type
            )));
        }
        self.wallet(&new.wallet_id)?;

        let note = new
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO transactions (amount, txn_type, category_id, wallet_id, date, note) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![new.amount, new.txn_type, new.category_id, new.wallet_id, new.date, note],
        )?;
        let id = tx.last_insert_rowid();
        tx.execute(
            "UPDATE wallets SET balance = balance + ?1 WHERE id = ?2",
            rusqlite::params![balance_delta(new.txn_type, new.amount), new.wallet_id],
        )?;
        tx.commit()?;

        tracing::info!(id, amount = new.amount, txn_type = %new.txn_type, wallet = %new.wallet_id, "added transaction");
        self.transaction(id)
    }

    /// Delete a transaction and reverse its effect on the wallet balance.
    pub fn delete_transaction(&self, id: i64) -> Result<Transaction> {
        let txn = self.transaction(id)?;
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM transactions WHERE id = ?1", [id])?;
        tx.execute(
            "UPDATE wallets SET balance = balance - ?1 WHERE id = ?2",
            rusqlite::params![balance_delta(txn.txn_type, txn.amount), txn.wallet_id],
        )?;
        tx.commit()?;
        tracing::info!(id, "deleted transaction");
        Ok(txn)
    }

    // -----------------------------------------------------------------------
    // Budgets
    // -----------------------------------------------------------------------

    /// Create or update the budget for a category (or the whole month when
    /// `category_id` is `None`).
    pub fn set_budget(&self, category_id: Option<&str>, amount: f64, year: i32, month: u32) -> Result<Budget> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ChiTieuError::Invalid(format!("budget must be a positive number, got {amount}")));
        }
        if !(1..=12).contains(&month) {
            return Err(ChiTieuError::Invalid(format!("month must be 1-12, got {month}")));
        }
        if let Some(id) = category_id {
            let category = self.category(id)?;
            if category.category_type != TransactionType::Expense {
                return Err(ChiTieuError::Invalid(format!("budgets apply to expense categories, '{id}' is income")));
            }
        }

        let existing: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM budgets WHERE IFNULL(category_id, '') = IFNULL(?1, '') AND month = ?2 AND year = ?3",
                rusqlite::params![category_id, month, year],
                |r| r.get(0),
            )
            .optional()?;

        let id = match existing {
            Some(id) => {
                self.conn
                    .execute("UPDATE budgets SET amount = ?1 WHERE id = ?2", rusqlite::params![amount, id])?;
                id
            }
            None => {
                self.conn.execute(
                    "INSERT INTO budgets (category_id, amount, month, year) VALUES (?1, ?2, ?3, ?4)",
                    rusqlite::params![category_id, amount, month, year],
                )?;
                self.conn.last_insert_rowid()
            }
        };
        tracing::info!(id, ?category_id, amount, year, month, "set budget");
        self.budget(id)
    }

    pub fn budget(&self, id: i64) -> Result<Budget> {
        self.conn
            .query_row(
                "SELECT id, category_id, amount, month, year FROM budgets WHERE id = ?1",
                [id],
                row_to_budget,
            )
            .optional()?
            .ok_or_else(|| ChiTieuError::Invalid(format!("no budget with ID {id}")))
    }

    /// Budgets for one month; the overall budget first.
    pub fn budgets_for_month(&self, year: i32, month: u32) -> Result<Vec<Budget>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, category_id, amount, month, year FROM budgets \
             WHERE year = ?1 AND month = ?2 ORDER BY category_id IS NOT NULL, category_id",
        )?;
        let rows = stmt.query_map(rusqlite::params![year, month], row_to_budget)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn delete_budget(&self, id: i64) -> Result<Budget> {
        let budget = self.budget(id)?;
        self.conn.execute("DELETE FROM budgets WHERE id = ?1", [id])?;
        Ok(budget)
    }
}

#[cfg(test)]
pub(crate) fn test_ledger() -> (tempfile::TempDir, Ledger) {
    let (dir, conn) = crate::db::test_db();
    (dir, Ledger::from_connection(conn))
}

#[cfg(test)]
pub(crate) fn expense(amount: f64, category_id: &str, date: &str, note: &str) -> NewTransaction {
    NewTransaction {
        amount,
        txn_type: TransactionType::Expense,
        category_id: category_id.to_string(),
        wallet_id: "cash".to_string(),
        date: date.to_string(),
        note: Some(note.to_string()),
    }
}
