use std::path::PathBuf;

use crate::db::DB_FILE;
use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_file_exists, expand_path};
use crate::store::Ledger;

pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();

    if let Some(dir) = data_dir {
        settings.data_dir = expand_path(&dir);
    } else if !settings_file_exists() {
        // First run: prompt for data dir
        println!("Data directory [{}]: ", settings.data_dir);
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).ok();
        let chosen = input.trim();
        if !chosen.is_empty() {
            settings.data_dir = expand_path(chosen);
        }
    }

    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)?;
    let ledger = Ledger::open(&resolved.join(DB_FILE))?;

    println!(
        "Initialized chitieu at {} ({} categories, {} wallets)",
        resolved.display(),
        ledger.categories()?.len(),
        ledger.wallets()?.len()
    );
    Ok(())
}
