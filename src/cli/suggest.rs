use crate::cli::open_ledger;
use crate::error::Result;
use crate::models::TransactionType;
use crate::suggest::{learn_from_history, suggest_category_with_learning};

pub fn run(note: &[String], json: bool) -> Result<()> {
    let (_, ledger) = open_ledger()?;
    let note = note.join(" ");

    let categories = ledger.categories_of(TransactionType::Expense)?;
    let model = learn_from_history(&ledger.transactions()?, &categories);
    let suggestion = suggest_category_with_learning(&note, &model, &categories);

    if json {
        println!("{}", serde_json::json!({ "note": note, "category": suggestion }));
        return Ok(());
    }

    match suggestion {
        Some(category) => println!(
            "Suggested: {} {} ({})",
            category.icon.glyph(),
            category.name,
            category.id
        ),
        None => println!("No suggestion for '{note}' yet."),
    }
    Ok(())
}
