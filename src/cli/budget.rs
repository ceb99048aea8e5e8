use comfy_table::{Cell, Table};

use crate::cli::{open_ledger, parse_month};
use crate::error::Result;
use crate::fmt::money;

pub fn set(amount: f64, category: Option<&str>, month: Option<&str>) -> Result<()> {
    let (_, ledger) = open_ledger()?;
    let (year, m) = parse_month(month)?;
    let budget = ledger.set_budget(category, amount, year, m)?;
    let scope = match &budget.category_id {
        Some(id) => ledger.category(id)?.name,
        None => "Overall".to_string(),
    };
    println!("Budget {year:04}-{m:02} {scope}: {}", money(budget.amount));
    Ok(())
}

pub fn list(month: Option<&str>) -> Result<()> {
    let (_, ledger) = open_ledger()?;
    let (year, m) = parse_month(month)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Category", "Amount"]);
    for budget in ledger.budgets_for_month(year, m)? {
        let scope = match &budget.category_id {
            Some(id) => ledger.category(id).map(|c| c.name).unwrap_or_else(|_| id.clone()),
            None => "Overall".to_string(),
        };
        table.add_row(vec![
            Cell::new(budget.id),
            Cell::new(scope),
            Cell::new(money(budget.amount)),
        ]);
    }
    println!("Budgets {year:04}-{m:02}\n{table}");
    Ok(())
}

pub fn delete(id: i64) -> Result<()> {
    let (_, ledger) = open_ledger()?;
    let budget = ledger.delete_budget(id)?;
    println!("Deleted budget {id} ({:04}-{:02}, {})", budget.year, budget.month, money(budget.amount));
    Ok(())
}
