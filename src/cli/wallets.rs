use comfy_table::{Cell, Table};

use crate::cli::open_ledger;
use crate::error::Result;
use crate::fmt::money;
use crate::icons::Icon;

pub fn add(id: &str, name: &str, balance: f64, icon: &str, color: &str) -> Result<()> {
    let (_, ledger) = open_ledger()?;
    let icon: Icon = icon.parse()?;
    let wallet = ledger.add_wallet(id, name, balance, icon, color)?;
    println!("Added wallet: {} {} ({})", wallet.icon.glyph(), wallet.name, money(wallet.balance));
    Ok(())
}

pub fn list() -> Result<()> {
    let (settings, ledger) = open_ledger()?;
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Balance", "Color"]);
    for wallet in ledger.wallets()? {
        let name = if wallet.id == settings.default_wallet {
            format!("{} {} *", wallet.icon.glyph(), wallet.name)
        } else {
            format!("{} {}", wallet.icon.glyph(), wallet.name)
        };
        table.add_row(vec![
            Cell::new(wallet.id),
            Cell::new(name),
            Cell::new(money(wallet.balance)),
            Cell::new(wallet.color),
        ]);
    }
    println!("Wallets (* default)\n{table}");
    println!("Total balance: {}", money(ledger.total_balance()?));
    Ok(())
}
