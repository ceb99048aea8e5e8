use crate::error::Result;
use crate::fmt::money;
use crate::settings::{db_path, load_settings};
use crate::store::Ledger;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let db_path = db_path();

    println!("Data dir:       {}", settings.data_dir);
    println!("Database:       {}", db_path.display());
    println!("Default wallet: {}", settings.default_wallet);

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:        {size} bytes");

        let ledger = Ledger::open(&db_path)?;
        let conn = ledger.connection();
        let count = |table: &str| -> Result<i64> {
            Ok(conn.query_row(&format!("SELECT count(*) FROM {table}"), [], |r| r.get(0))?)
        };

        println!();
        println!("Wallets:       {}", count("wallets")?);
        println!("Categories:    {}", count("categories")?);
        println!("Transactions:  {}", count("transactions")?);
        println!("Budgets:       {}", count("budgets")?);
        println!("Total balance: {}", money(ledger.total_balance()?));
    } else {
        println!();
        println!("Database not found. Run `chitieu init` to set up.");
    }

    Ok(())
}
