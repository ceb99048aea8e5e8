use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::error::ChiTieuError;

/// Icon identifiers for categories and wallets.
///
/// Stored as their lowercase key; an unknown key read back from the
/// database is an error rather than a silent fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Bill,
    Health,
    Education,
    House,
    Clothing,
    Beauty,
    Sports,
    Travel,
    Phone,
    Shield,
    Family,
    Pets,
    Gift,
    Other,
    Salary,
    Trophy,
    Investment,
    Business,
    Clock,
    Refund,
    Rent,
    Wallet,
    Bank,
    Card,
}

impl Icon {
    pub const ALL: [Icon; 28] = [
        Icon::Food,
        Icon::Transport,
        Icon::Shopping,
        Icon::Entertainment,
        Icon::Bill,
        Icon::Health,
        Icon::Education,
        Icon::House,
        Icon::Clothing,
        Icon::Beauty,
        Icon::Sports,
        Icon::Travel,
        Icon::Phone,
        Icon::Shield,
        Icon::Family,
        Icon::Pets,
        Icon::Gift,
        Icon::Other,
        Icon::Salary,
        Icon::Trophy,
        Icon::Investment,
        Icon::Business,
        Icon::Clock,
        Icon::Refund,
        Icon::Rent,
        Icon::Wallet,
        Icon::Bank,
        Icon::Card,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Shopping => "shopping",
            Self::Entertainment => "entertainment",
            Self::Bill => "bill",
            Self::Health => "health",
            Self::Education => "education",
            Self::House => "house",
            Self::Clothing => "clothing",
            Self::Beauty => "beauty",
            Self::Sports => "sports",
            Self::Travel => "travel",
            Self::Phone => "phone",
            Self::Shield => "shield",
            Self::Family => "family",
            Self::Pets => "pets",
            Self::Gift => "gift",
            Self::Other => "other",
            Self::Salary => "salary",
            Self::Trophy => "trophy",
            Self::Investment => "investment",
            Self::Business => "business",
            Self::Clock => "clock",
            Self::Refund => "refund",
            Self::Rent => "rent",
            Self::Wallet => "wallet",
            Self::Bank => "bank",
            Self::Card => "card",
        }
    }

    /// Terminal glyph shown next to a category or wallet name.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Food => "\u{1F35C}",
            Self::Transport => "\u{1F6F5}",
            Self::Shopping => "\u{1F6CD}",
            Self::Entertainment => "\u{1F3AC}",
            Self::Bill => "\u{1F9FE}",
            Self::Health => "\u{1F48A}",
            Self::Education => "\u{1F4DA}",
            Self::House => "\u{1F3E0}",
            Self::Clothing => "\u{1F455}",
            Self::Beauty => "\u{1F484}",
            Self::Sports => "\u{26BD}",
            Self::Travel => "\u{2708}",
            Self::Phone => "\u{1F4F1}",
            Self::Shield => "\u{1F6E1}",
            Self::Family => "\u{1F46A}",
            Self::Pets => "\u{1F43E}",
            Self::Gift => "\u{1F381}",
            Self::Other => "\u{2022}",
            Self::Salary => "\u{1F4B5}",
            Self::Trophy => "\u{1F3C6}",
            Self::Investment => "\u{1F4C8}",
            Self::Business => "\u{1F4BC}",
            Self::Clock => "\u{23F0}",
            Self::Refund => "\u{21A9}",
            Self::Rent => "\u{1F511}",
            Self::Wallet => "\u{1F45B}",
            Self::Bank => "\u{1F3E6}",
            Self::Card => "\u{1F4B3}",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Icon {
    type Err = ChiTieuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Icon::ALL
            .iter()
            .copied()
            .find(|icon| icon.key() == key)
            .ok_or_else(|| ChiTieuError::UnknownIcon(s.to_string()))
    }
}

impl ToSql for Icon {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.key()))
    }
}

impl FromSql for Icon {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
