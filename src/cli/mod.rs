pub mod add;
pub mod budget;
pub mod categories;
pub mod history;
pub mod init;
pub mod report;
pub mod status;
pub mod suggest;
pub mod voice;
pub mod wallets;

use chrono::Datelike;
use clap::{Parser, Subcommand};

use crate::error::{ChiTieuError, Result};
use crate::settings::{db_path, load_settings, Settings};
use crate::store::Ledger;

/// Parse `YYYY-MM`, defaulting to the current month.
pub(crate) fn parse_month(month: Option<&str>) -> Result<(i32, u32)> {
    let Some(m) = month else {
        let today = chrono::Local::now().date_naive();
        return Ok((today.year(), today.month()));
    };
    let invalid = || ChiTieuError::Invalid(format!("month must be YYYY-MM, got '{m}'"));
    let (y, mm) = m.split_once('-').ok_or_else(invalid)?;
    let year: i32 = y.parse().map_err(|_| invalid())?;
    let month: u32 = mm.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

pub(crate) fn open_ledger() -> Result<(Settings, Ledger)> {
    let settings = load_settings();
    let path = db_path();
    if !path.exists() {
        return Err(ChiTieuError::Settings(format!(
            "no ledger at {}; run `chitieu init` first",
            path.display()
        )));
    }
    Ok((settings, Ledger::open(&path)?))
}

#[derive(Parser)]
#[command(
    name = "chitieu",
    about = "Personal expense tracker with Vietnamese voice entry and learned category suggestions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up chitieu: choose a data directory and initialize the ledger.
    Init {
        /// Path for chitieu data (default: ~/Documents/chitieu)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Parse a spoken transcript into a transaction draft.
    Voice {
        /// Transcript, e.g. "chi 35k mua cafe"
        #[arg(required_unless_present = "examples")]
        text: Vec<String>,
        /// Print the draft as JSON
        #[arg(long)]
        json: bool,
        /// Show example utterances
        #[arg(long)]
        examples: bool,
    },
    /// Suggest an expense category for a note from past transactions.
    Suggest {
        /// Note text
        #[arg(required = true)]
        note: Vec<String>,
        /// Print the suggestion as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a transaction, optionally seeded from a voice transcript.
    Add {
        /// Transcript to pre-fill amount, type and note
        #[arg(long)]
        voice: Option<String>,
        /// Amount in đồng
        #[arg(long)]
        amount: Option<f64>,
        /// income or expense
        #[arg(long = "type")]
        txn_type: Option<String>,
        /// Category ID (default: suggested from history)
        #[arg(long)]
        category: Option<String>,
        /// Wallet ID (default: from settings)
        #[arg(long)]
        wallet: Option<String>,
        /// Date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Free-text note
        #[arg(long)]
        note: Option<String>,
    },
    /// Delete a transaction and restore its wallet balance.
    Delete {
        /// Transaction ID (shown in `chitieu history`)
        id: i64,
    },
    /// List transactions, newest first.
    History {
        /// Month filter: YYYY-MM
        #[arg(long)]
        month: Option<String>,
        /// Maximum rows to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Manage wallets.
    Wallets {
        #[command(subcommand)]
        command: WalletsCommands,
    },
    /// Manage categories.
    Categories {
        #[command(subcommand)]
        command: CategoriesCommands,
    },
    /// Manage monthly budgets.
    Budget {
        #[command(subcommand)]
        command: BudgetCommands,
    },
    /// Monthly income/expense report with category breakdown and budgets.
    Report {
        /// Month: YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
    },
    /// Show data location and ledger counts.
    Status,
}

#[derive(Subcommand)]
pub enum WalletsCommands {
    /// Add a wallet.
    Add {
        /// Wallet ID, e.g. 'momo'
        id: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// Opening balance
        #[arg(long, default_value = "0")]
        balance: f64,
        /// Icon key, e.g. wallet, bank, card
        #[arg(long, default_value = "wallet")]
        icon: String,
        /// Hex colour
        #[arg(long, default_value = "#10b981")]
        color: String,
    },
    /// List wallets and the total balance.
    List,
}

#[derive(Subcommand)]
pub enum CategoriesCommands {
    /// Add a category.
    Add {
        /// Category ID, e.g. 'coffee'
        id: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// income or expense
        #[arg(long = "type", default_value = "expense")]
        category_type: String,
        /// Icon key, e.g. food, transport, gift
        #[arg(long, default_value = "other")]
        icon: String,
        /// Hex colour
        #[arg(long, default_value = "#6b7280")]
        color: String,
    },
    /// List categories.
    List {
        /// Only show income or expense categories
        #[arg(long = "type")]
        category_type: Option<String>,
    },
    /// Delete a category.
    Delete {
        /// Category ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the overall or per-category budget for a month.
    Set {
        /// Budget amount in đồng
        amount: f64,
        /// Expense category ID (omit for the overall monthly budget)
        #[arg(long)]
        category: Option<String>,
        /// Month: YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
    },
    /// List budgets for a month.
    List {
        #[arg(long)]
        month: Option<String>,
    },
    /// Delete a budget by ID.
    Delete {
        /// Budget ID (shown in `chitieu budget list`)
        id: i64,
    },
}
