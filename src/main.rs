use clap::Parser;
use tracing_subscriber::EnvFilter;

use chitieu::cli::{
    self, add::AddArgs, BudgetCommands, CategoriesCommands, Cli, Commands, WalletsCommands,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CHITIEU_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Voice {
            text,
            json,
            examples,
        } => cli::voice::run(&text, json, examples),
        Commands::Suggest { note, json } => cli::suggest::run(&note, json),
        Commands::Add {
            voice,
            amount,
            txn_type,
            category,
            wallet,
            date,
            note,
        } => cli::add::run(AddArgs {
            voice,
            amount,
            txn_type,
            category,
            wallet,
            date,
            note,
        }),
        Commands::Delete { id } => cli::history::delete(id),
        Commands::History { month, limit } => cli::history::list(month.as_deref(), limit),
        Commands::Wallets { command } => match command {
            WalletsCommands::Add {
                id,
                name,
                balance,
                icon,
                color,
            } => cli::wallets::add(&id, &name, balance, &icon, &color),
            WalletsCommands::List => cli::wallets::list(),
        },
        Commands::Categories { command } => match command {
            CategoriesCommands::Add {
                id,
                name,
                category_type,
                icon,
                color,
            } => cli::categories::add(&id, &name, &category_type, &icon, &color),
            CategoriesCommands::List { category_type } => {
                cli::categories::list(category_type.as_deref())
            }
            CategoriesCommands::Delete { id } => cli::categories::delete(&id),
        },
        Commands::Budget { command } => match command {
            BudgetCommands::Set {
                amount,
                category,
                month,
            } => cli::budget::set(amount, category.as_deref(), month.as_deref()),
            BudgetCommands::List { month } => cli::budget::list(month.as_deref()),
            BudgetCommands::Delete { id } => cli::budget::delete(id),
        },
        Commands::Report { month } => cli::report::run(month.as_deref()),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
