use std::collections::HashMap;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{open_ledger, parse_month};
use crate::error::Result;
use crate::fmt::{money, percent};
use crate::reports::{self, BudgetProgress, CategoryShare, MonthReport};

pub fn run(month: Option<&str>) -> Result<()> {
    let (_, ledger) = open_ledger()?;
    let (year, m) = parse_month(month)?;
    let report = reports::get_month_report(&ledger, year, m)?;

    let names: HashMap<String, String> = ledger
        .categories()?
        .into_iter()
        .map(|c| (c.id, format!("{} {}", c.icon.glyph(), c.name)))
        .collect();
    println!("{}", format_report(&report, &names));
    Ok(())
}

fn category_name<'a>(names: &'a HashMap<String, String>, id: &'a str) -> &'a str {
    names.get(id).map(String::as_str).unwrap_or(id)
}

fn shares_table(title: &str, shares: &[CategoryShare], names: &HashMap<String, String>) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Category", "Amount", "Share"]);
    for share in shares {
        table.add_row(vec![
            Cell::new(category_name(names, &share.category_id)),
            Cell::new(money(share.amount)),
            Cell::new(percent(share.percentage)),
        ]);
    }
    format!("{title}\n{table}")
}

fn budgets_table(budgets: &[BudgetProgress], names: &HashMap<String, String>) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Budget", "Limit", "Spent", "Remaining"]);
    for b in budgets {
        let scope = b
            .category_id
            .as_deref()
            .map_or("Overall", |id| category_name(names, id));
        let remaining = if b.over {
            money(b.remaining).red().to_string()
        } else {
            money(b.remaining).green().to_string()
        };
        table.add_row(vec![
            Cell::new(scope),
            Cell::new(money(b.limit)),
            Cell::new(money(b.spent)),
            Cell::new(remaining),
        ]);
    }
    format!("Budgets\n{table}")
}

pub fn format_report(report: &MonthReport, names: &HashMap<String, String>) -> String {
    let stats = &report.stats;
    let balance = if stats.balance >= 0.0 {
        money(stats.balance).green().bold().to_string()
    } else {
        money(stats.balance).red().bold().to_string()
    };

    let mut sections = vec![format!(
        "Report {:04}-{:02}\nIncome:   {}\nExpense:  {}\nBalance:  {balance}",
        report.year,
        report.month,
        money(stats.income).green(),
        money(stats.expense).red(),
    )];
    if !report.expenses.is_empty() {
        sections.push(shares_table("Expenses by category", &report.expenses, names));
    }
    if !report.income.is_empty() {
        sections.push(shares_table("Income by category", &report.income, names));
    }
    if !report.budgets.is_empty() {
        sections.push(budgets_table(&report.budgets, names));
    }
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{expense, test_ledger};

    #[test]
    fn test_format_report_lists_categories_and_budgets() {
        colored::control::set_override(false);
        let (_dir, ledger) = test_ledger();
        ledger.set_budget(Some("food"), 100_000.0, 2025, 3).unwrap();
        ledger.add_transaction(&expense(150_000.0, "food", "2025-03-01", "lẩu")).unwrap();
        let report = reports::get_month_report(&ledger, 2025, 3).unwrap();
        let names = HashMap::from([("food".to_string(), "Ăn uống".to_string())]);

        let text = format_report(&report, &names);
        assert!(text.contains("Report 2025-03"));
        assert!(text.contains("Expenses by category"));
        assert!(text.contains("Ăn uống"));
        assert!(text.contains("150.000"));
        assert!(text.contains("-50.000"));
        assert!(!text.contains("Income by category"));
    }
}
