use colored::Colorize;

use crate::cli::open_ledger;
use crate::error::{ChiTieuError, Result};
use crate::fmt::{date, money};
use crate::models::{NewTransaction, TransactionType};
use crate::settings::Settings;
use crate::store::Ledger;
use crate::suggest::{learn_from_history, should_suggest, suggest_category_with_learning};
use crate::voice::parse_voice_input;

#[derive(Debug, Default)]
pub struct AddArgs {
    pub voice: Option<String>,
    pub amount: Option<f64>,
    pub txn_type: Option<String>,
    pub category: Option<String>,
    pub wallet: Option<String>,
    pub date: Option<String>,
    pub note: Option<String>,
}

/// Where the category of a new transaction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySource {
    Explicit,
    Suggested,
    Default,
}

/// Fill in a transaction from flags, a voice draft and history. Explicit
/// flags always win over the transcript.
pub fn resolve(
    ledger: &Ledger,
    settings: &Settings,
    args: AddArgs,
    today: &str,
) -> Result<(NewTransaction, CategorySource)> {
    let draft = args.voice.as_deref().map(parse_voice_input);

    let amount = args
        .amount
        .or_else(|| draft.as_ref().and_then(|d| d.amount).map(|a| a as f64))
        .ok_or_else(|| ChiTieuError::Invalid("no amount: pass --amount or say one".to_string()))?;

    let txn_type = match args.txn_type.as_deref() {
        Some(t) => t.parse()?,
        None => draft.as_ref().map_or(TransactionType::Expense, |d| d.txn_type()),
    };

    let note = args
        .note
        .or_else(|| draft.map(|d| d.note))
        .filter(|n| !n.trim().is_empty());

    let (category_id, source) = match args.category {
        Some(id) => (id, CategorySource::Explicit),
        None => {
            let categories = ledger.categories_of(txn_type)?;
            let suggested = match note.as_deref() {
                Some(n) if should_suggest(n, txn_type, settings.suggest_min_len) => {
                    let model = learn_from_history(&ledger.transactions()?, &categories);
                    suggest_category_with_learning(n, &model, &categories)
                }
                _ => None,
            };
            match suggested {
                Some(category) => (category.id, CategorySource::Suggested),
                None => {
                    let first = categories.first().ok_or_else(|| {
                        ChiTieuError::UnknownCategory(format!("no {txn_type} categories defined"))
                    })?;
                    (first.id.clone(), CategorySource::Default)
                }
            }
        }
    };

    let new = NewTransaction {
        amount,
        txn_type,
        category_id,
        wallet_id: args.wallet.unwrap_or_else(|| settings.default_wallet.clone()),
        date: args.date.unwrap_or_else(|| today.to_string()),
        note,
    };
    Ok((new, source))
}

pub fn run(args: AddArgs) -> Result<()> {
    let (settings, ledger) = open_ledger()?;
    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    let (new, source) = resolve(&ledger, &settings, args, &today)?;
    let txn = ledger.add_transaction(&new)?;

    let category = ledger.category(&txn.category_id)?;
    let wallet = ledger.wallet(&txn.wallet_id)?;
    let amount = match txn.txn_type {
        TransactionType::Income => format!("+{}", money(txn.amount)).green(),
        TransactionType::Expense => format!("-{}", money(txn.amount)).red(),
    };
    let hint = match source {
        CategorySource::Suggested => " (suggested)",
        CategorySource::Default => " (default)",
        CategorySource::Explicit => "",
    };

    println!("Added {} #{}: {amount}", txn.txn_type.label(), txn.id);
    println!("  Category: {} {}{hint}", category.icon.glyph(), category.name);
    println!("  Wallet:   {} ({})", wallet.name, money(wallet.balance));
    println!("  Date:     {}", date(&txn.date));
    if let Some(note) = &txn.note {
        println!("  Note:     {note}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{expense, test_ledger};

    const TODAY: &str = "2025-03-10";

    #[test]
    fn test_voice_seeds_amount_type_and_note() {
        let (_dir, ledger) = test_ledger();
        let args = AddArgs {
            voice: Some("Thu nhập 5 triệu lương tháng".to_string()),
            ..Default::default()
        };
        let (new, source) = resolve(&ledger, &Settings::default(), args, TODAY).unwrap();
        assert_eq!(new.amount, 5_000_000.0);
        assert_eq!(new.txn_type, TransactionType::Income);
        assert_eq!(new.note.as_deref(), Some("lương tháng"));
        // Suggestions are only made for expenses.
        assert_eq!(source, CategorySource::Default);
        assert_eq!(new.category_id, "salary");
        assert_eq!(new.wallet_id, "cash");
        assert_eq!(new.date, TODAY);
    }

    #[test]
    fn test_flags_override_voice() {
        let (_dir, ledger) = test_ledger();
        let args = AddArgs {
            voice: Some("chi 35k cafe".to_string()),
            amount: Some(40_000.0),
            note: Some("bạc xỉu".to_string()),
            wallet: Some("bank".to_string()),
            category: Some("food".to_string()),
            ..Default::default()
        };
        let (new, source) = resolve(&ledger, &Settings::default(), args, TODAY).unwrap();
        assert_eq!(new.amount, 40_000.0);
        assert_eq!(new.note.as_deref(), Some("bạc xỉu"));
        assert_eq!(new.wallet_id, "bank");
        assert_eq!(source, CategorySource::Explicit);
    }

    #[test]
    fn test_category_suggested_from_history() {
        let (_dir, ledger) = test_ledger();
        ledger.add_transaction(&expense(30_000.0, "transport", "2025-03-01", "grab đi làm")).unwrap();
        ledger.add_transaction(&expense(25_000.0, "transport", "2025-03-02", "grab về nhà")).unwrap();

        let args = AddArgs {
            voice: Some("chi 28k grab".to_string()),
            ..Default::default()
        };
        let (new, source) = resolve(&ledger, &Settings::default(), args, TODAY).unwrap();
        assert_eq!(new.category_id, "transport");
        assert_eq!(source, CategorySource::Suggested);
    }

    #[test]
    fn test_short_note_falls_back_to_first_category() {
        let (_dir, ledger) = test_ledger();
        ledger.add_transaction(&expense(30_000.0, "transport", "2025-03-01", "xe")).unwrap();
        let args = AddArgs {
            amount: Some(10_000.0),
            note: Some("xe".to_string()),
            ..Default::default()
        };
        let (new, source) = resolve(&ledger, &Settings::default(), args, TODAY).unwrap();
        assert_eq!(new.category_id, "food");
        assert_eq!(source, CategorySource::Default);
    }

    #[test]
    fn test_missing_amount_is_an_error() {
        let (_dir, ledger) = test_ledger();
        let args = AddArgs {
            voice: Some("ăn sáng".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            resolve(&ledger, &Settings::default(), args, TODAY),
            Err(ChiTieuError::Invalid(_))
        ));
    }
}
