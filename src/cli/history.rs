use std::collections::HashMap;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{open_ledger, parse_month};
use crate::error::Result;
use crate::fmt::{date, money};
use crate::models::TransactionType;

pub fn list(month: Option<&str>, limit: usize) -> Result<()> {
    let (_, ledger) = open_ledger()?;
    let transactions = match month {
        Some(_) => {
            let (year, m) = parse_month(month)?;
            ledger.transactions_in_month(year, m)?
        }
        None => ledger.transactions()?,
    };

    let categories: HashMap<String, String> = ledger
        .categories()?
        .into_iter()
        .map(|c| (c.id, format!("{} {}", c.icon.glyph(), c.name)))
        .collect();
    let wallets: HashMap<String, String> = ledger
        .wallets()?
        .into_iter()
        .map(|w| (w.id, w.name))
        .collect();

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Category", "Wallet", "Amount", "Note"]);
    for txn in transactions.iter().take(limit) {
        let amount = match txn.txn_type {
            TransactionType::Income => format!("+{}", money(txn.amount)).green().to_string(),
            TransactionType::Expense => format!("-{}", money(txn.amount)).red().to_string(),
        };
        table.add_row(vec![
            Cell::new(txn.id),
            Cell::new(date(&txn.date)),
            // Deleted categories still show their id.
            Cell::new(categories.get(&txn.category_id).unwrap_or(&txn.category_id)),
            Cell::new(wallets.get(&txn.wallet_id).unwrap_or(&txn.wallet_id)),
            Cell::new(amount),
            Cell::new(txn.note.as_deref().unwrap_or("")),
        ]);
    }
    println!("Transactions ({} of {})\n{table}", transactions.len().min(limit), transactions.len());
    Ok(())
}

pub fn delete(id: i64) -> Result<()> {
    let (_, ledger) = open_ledger()?;
    let txn = ledger.delete_transaction(id)?;
    let wallet = ledger.wallet(&txn.wallet_id)?;
    println!(
        "Deleted transaction {id} ({} {}); {} balance is now {}",
        txn.txn_type.label(),
        money(txn.amount),
        wallet.name,
        money(wallet.balance)
    );
    Ok(())
}
