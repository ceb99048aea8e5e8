use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::error::ChiTieuError;
use crate::icons::Icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Vietnamese label used in CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Thu nhập",
            Self::Expense => "Chi tiêu",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ChiTieuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "thu" => Ok(Self::Income),
            "expense" | "chi" => Ok(Self::Expense),
            other => Err(ChiTieuError::Invalid(format!(
                "transaction type must be income or expense, got '{other}'"
            ))),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: f64,
    #[serde(rename = "type")]
    pub txn_type: TransactionType,
    pub category_id: String,
    pub wallet_id: String,
    pub date: String,
    pub note: Option<String>,
    pub created_at: String,
}

/// Input for a new transaction; the store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: f64,
    pub txn_type: TransactionType,
    pub category_id: String,
    pub wallet_id: String,
    pub date: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub id: String,
    pub name: String,
    pub icon: Icon,
    pub color: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: String,
    pub name: String,
    pub balance: f64,
    pub icon: Icon,
    pub color: String,
}

/// A spending limit for one month. `category_id == None` is the overall
/// monthly budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category_id: Option<String>,
    pub amount: f64,
    pub month: u32,
    pub year: i32,
}

/// Transaction draft produced from a speech transcript.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoiceTransactionData {
    pub amount: Option<u64>,
    pub note: String,
    pub is_income: bool,
}

impl VoiceTransactionData {
    pub fn txn_type(&self) -> TransactionType {
        if self.is_income {
            TransactionType::Income
        } else {
            TransactionType::Expense
        }
    }
}
