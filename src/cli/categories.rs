use comfy_table::{Cell, Table};

use crate::cli::open_ledger;
use crate::error::Result;
use crate::models::{ExpenseCategory, TransactionType};

pub fn add(id: &str, name: &str, category_type: &str, icon: &str, color: &str) -> Result<()> {
    let (_, ledger) = open_ledger()?;
    let category = ExpenseCategory {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.parse()?,
        color: color.to_string(),
        category_type: category_type.parse()?,
    };
    ledger.add_category(&category)?;
    println!("Added category: {} {} ({})", category.icon.glyph(), category.name, category.id);
    Ok(())
}

pub fn list(category_type: Option<&str>) -> Result<()> {
    let (_, ledger) = open_ledger()?;
    let categories = match category_type {
        Some(t) => ledger.categories_of(t.parse::<TransactionType>()?)?,
        None => ledger.categories()?,
    };

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Type", "Icon", "Color"]);
    for cat in categories {
        table.add_row(vec![
            Cell::new(cat.id),
            Cell::new(format!("{} {}", cat.icon.glyph(), cat.name)),
            Cell::new(cat.category_type.label()),
            Cell::new(cat.icon),
            Cell::new(cat.color),
        ]);
    }
    println!("Categories\n{table}");
    Ok(())
}

pub fn delete(id: &str) -> Result<()> {
    let (_, ledger) = open_ledger()?;
    let category = ledger.delete_category(id)?;
    println!("Deleted category {id} ({})", category.name);
    Ok(())
}
