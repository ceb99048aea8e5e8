use serde::Serialize;

use crate::error::Result;
use crate::models::{Transaction, TransactionType};
use crate::store::Ledger;

// ---------------------------------------------------------------------------
// Monthly totals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub total: f64,
}

pub fn monthly_stats(transactions: &[Transaction]) -> MonthlyStats {
    let sum = |kind: TransactionType| -> f64 {
        transactions
            .iter()
            .filter(|t| t.txn_type == kind)
            .map(|t| t.amount)
            .sum()
    };
    let income = sum(TransactionType::Income);
    let expense = sum(TransactionType::Expense);
    MonthlyStats {
        income,
        expense,
        balance: income - expense,
        total: income + expense,
    }
}

// ---------------------------------------------------------------------------
// Per-category breakdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category_id: String,
    pub amount: f64,
    pub percentage: f64,
}

/// Totals per category for one transaction type, largest first. Empty when
/// there is nothing of that type.
pub fn transactions_by_category(transactions: &[Transaction], kind: TransactionType) -> Vec<CategoryShare> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for txn in transactions.iter().filter(|t| t.txn_type == kind) {
        match totals.iter_mut().find(|(id, _)| *id == txn.category_id) {
            Some((_, amount)) => *amount += txn.amount,
            None => totals.push((txn.category_id.clone(), txn.amount)),
        }
    }

    let total: f64 = totals.iter().map(|(_, a)| a).sum();
    if total == 0.0 {
        return Vec::new();
    }

    let mut shares: Vec<CategoryShare> = totals
        .into_iter()
        .map(|(category_id, amount)| CategoryShare {
            category_id,
            amount,
            percentage: amount / total * 100.0,
        })
        .collect();
    shares.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    shares
}

// ---------------------------------------------------------------------------
// Budget progress
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub budget_id: i64,
    pub category_id: Option<String>,
    pub limit: f64,
    pub spent: f64,
    pub remaining: f64,
    pub over: bool,
}

pub fn budget_progress(ledger: &Ledger, year: i32, month: u32) -> Result<Vec<BudgetProgress>> {
    let transactions = ledger.transactions_in_month(year, month)?;
    let progress = ledger
        .budgets_for_month(year, month)?
        .into_iter()
        .map(|budget| {
            let spent: f64 = transactions
                .iter()
                .filter(|t| t.txn_type == TransactionType::Expense)
                .filter(|t| budget.category_id.as_ref().map_or(true, |id| *id == t.category_id))
                .map(|t| t.amount)
                .sum();
            BudgetProgress {
                budget_id: budget.id,
                category_id: budget.category_id,
                limit: budget.amount,
                spent,
                remaining: budget.amount - spent,
                over: spent > budget.amount,
            }
        })
        .collect();
    Ok(progress)
}

// ---------------------------------------------------------------------------
// Month report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct MonthReport {
    pub year: i32,
    pub month: u32,
    pub stats: MonthlyStats,
    pub expenses: Vec<CategoryShare>,
    pub income: Vec<CategoryShare>,
    pub budgets: Vec<BudgetProgress>,
}

pub fn get_month_report(ledger: &Ledger, year: i32, month: u32) -> Result<MonthReport> {
    let transactions = ledger.transactions_in_month(year, month)?;
    Ok(MonthReport {
        year,
        month,
        stats: monthly_stats(&transactions),
        expenses: transactions_by_category(&transactions, TransactionType::Expense),
        income: transactions_by_category(&transactions, TransactionType::Income),
        budgets: budget_progress(ledger, year, month)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTransaction;
    use crate::store::{expense, test_ledger};

    fn salary(amount: f64, date: &str) -> NewTransaction {
        NewTransaction {
            amount,
            txn_type: TransactionType::Income,
            category_id: "salary".to_string(),
            wallet_id: "bank".to_string(),
            date: date.to_string(),
            note: None,
        }
    }

    #[test]
    fn test_monthly_stats_only_counts_month() {
        let (_dir, ledger) = test_ledger();
        ledger.add_transaction(&salary(10_000_000.0, "2025-03-01")).unwrap();
        ledger.add_transaction(&expense(300_000.0, "food", "2025-03-04", "lẩu")).unwrap();
        ledger.add_transaction(&expense(999_000.0, "food", "2025-02-27", "tiệc")).unwrap();

        let march = ledger.transactions_in_month(2025, 3).unwrap();
        let stats = monthly_stats(&march);
        assert_eq!(stats.income, 10_000_000.0);
        assert_eq!(stats.expense, 300_000.0);
        assert_eq!(stats.balance, 9_700_000.0);
        assert_eq!(stats.total, 10_300_000.0);
    }

    #[test]
    fn test_breakdown_sorted_and_sums_to_100() {
        let (_dir, ledger) = test_ledger();
        ledger.add_transaction(&expense(100_000.0, "food", "2025-03-01", "a")).unwrap();
        ledger.add_transaction(&expense(50_000.0, "food", "2025-03-02", "b")).unwrap();
        ledger.add_transaction(&expense(250_000.0, "transport", "2025-03-03", "c")).unwrap();
        ledger.add_transaction(&expense(100_000.0, "bills", "2025-03-04", "d")).unwrap();

        let txns = ledger.transactions().unwrap();
        let shares = transactions_by_category(&txns, TransactionType::Expense);
        let ids: Vec<&str> = shares.iter().map(|s| s.category_id.as_str()).collect();
        assert_eq!(ids, vec!["transport", "food", "bills"]);
        assert_eq!(shares[0].percentage, 50.0);
        let sum: f64 = shares.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_breakdown_empty_without_transactions_of_type() {
        let (_dir, ledger) = test_ledger();
        ledger.add_transaction(&expense(100_000.0, "food", "2025-03-01", "a")).unwrap();
        let txns = ledger.transactions().unwrap();
        assert!(transactions_by_category(&txns, TransactionType::Income).is_empty());
    }

    #[test]
    fn test_budget_progress() {
        let (_dir, ledger) = test_ledger();
        ledger.set_budget(None, 1_000_000.0, 2025, 3).unwrap();
        ledger.set_budget(Some("food"), 200_000.0, 2025, 3).unwrap();
        ledger.add_transaction(&expense(150_000.0, "food", "2025-03-01", "a")).unwrap();
        ledger.add_transaction(&expense(100_000.0, "food", "2025-03-02", "b")).unwrap();
        ledger.add_transaction(&expense(400_000.0, "transport", "2025-03-03", "c")).unwrap();
        ledger.add_transaction(&expense(900_000.0, "transport", "2025-04-01", "d")).unwrap();

        let progress = budget_progress(&ledger, 2025, 3).unwrap();
        assert_eq!(progress.len(), 2);

        let overall = &progress[0];
        assert_eq!(overall.category_id, None);
        assert_eq!(overall.spent, 650_000.0);
        assert_eq!(overall.remaining, 350_000.0);
        assert!(!overall.over);

        let food = &progress[1];
        assert_eq!(food.spent, 250_000.0);
        assert!(food.over);
    }

    #[test]
    fn test_month_report() {
        let (_dir, ledger) = test_ledger();
        ledger.add_transaction(&salary(8_000_000.0, "2025-03-01")).unwrap();
        ledger.add_transaction(&expense(80_000.0, "food", "2025-03-01", "bún")).unwrap();
        let report = get_month_report(&ledger, 2025, 3).unwrap();
        assert_eq!(report.stats.balance, 7_920_000.0);
        assert_eq!(report.income.len(), 1);
        assert_eq!(report.expenses.len(), 1);
        assert!(report.budgets.is_empty());
    }
}
