use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;
use crate::icons::Icon;
use crate::models::TransactionType;

pub const DB_FILE: &str = "chitieu.db";

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS wallets (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    balance REAL NOT NULL DEFAULT 0,
    icon TEXT NOT NULL,
    color TEXT NOT NULL,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS categories (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    icon TEXT NOT NULL,
    color TEXT NOT NULL,
    category_type TEXT NOT NULL,
    position INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY,
    amount REAL NOT NULL,
    txn_type TEXT NOT NULL,
    category_id TEXT NOT NULL,
    wallet_id TEXT NOT NULL,
    date TEXT NOT NULL,
    note TEXT,
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (wallet_id) REFERENCES wallets(id)
);

CREATE TABLE IF NOT EXISTS budgets (
    id INTEGER PRIMARY KEY,
    category_id TEXT,
    amount REAL NOT NULL,
    month INTEGER NOT NULL,
    year INTEGER NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS budgets_period
    ON budgets (IFNULL(category_id, ''), month, year);
";

// (id, name, icon, color, type)
const DEFAULT_CATEGORIES: &[(&str, &str, Icon, &str, TransactionType)] = &[
    // Expense
    ("food", "Ăn uống", Icon::Food, "#ef4444", TransactionType::Expense),
    ("transport", "Di chuyển", Icon::Transport, "#f59e0b", TransactionType::Expense),
    ("shopping", "Mua sắm", Icon::Shopping, "#ec4899", TransactionType::Expense),
    ("entertainment", "Giải trí", Icon::Entertainment, "#8b5cf6", TransactionType::Expense),
    ("bills", "Hóa đơn", Icon::Bill, "#06b6d4", TransactionType::Expense),
    ("health", "Sức khỏe", Icon::Health, "#10b981", TransactionType::Expense),
    ("education", "Giáo dục", Icon::Education, "#3b82f6", TransactionType::Expense),
    ("housing", "Nhà ở", Icon::House, "#059669", TransactionType::Expense),
    ("clothing", "Quần áo", Icon::Clothing, "#d946ef", TransactionType::Expense),
    ("beauty", "Làm đẹp", Icon::Beauty, "#f472b6", TransactionType::Expense),
    ("sports", "Thể thao", Icon::Sports, "#0ea5e9", TransactionType::Expense),
    ("travel", "Du lịch", Icon::Travel, "#14b8a6", TransactionType::Expense),
    ("communication", "Liên lạc", Icon::Phone, "#3b82f6", TransactionType::Expense),
    ("insurance", "Bảo hiểm", Icon::Shield, "#6366f1", TransactionType::Expense),
    ("family", "Gia đình", Icon::Family, "#f59e0b", TransactionType::Expense),
    ("pets", "Thú cưng", Icon::Pets, "#84cc16", TransactionType::Expense),
    ("gifts", "Quà tặng", Icon::Gift, "#f43f5e", TransactionType::Expense),
    ("other-expense", "Khác", Icon::Other, "#6b7280", TransactionType::Expense),
    // Income
    ("salary", "Lương", Icon::Salary, "#10b981", TransactionType::Income),
    ("bonus", "Thưởng", Icon::Trophy, "#f59e0b", TransactionType::Income),
    ("gift", "Quà tặng", Icon::Gift, "#ec4899", TransactionType::Income),
    ("investment", "Đầu tư", Icon::Investment, "#3b82f6", TransactionType::Income),
    ("business", "Kinh doanh", Icon::Business, "#8b5cf6", TransactionType::Income),
    ("part-time", "Làm thêm", Icon::Clock, "#06b6d4", TransactionType::Income),
    ("refund", "Hoàn tiền", Icon::Refund, "#14b8a6", TransactionType::Income),
    ("rental", "Cho thuê", Icon::Rent, "#84cc16", TransactionType::Income),
    ("other-income", "Khác", Icon::Other, "#6b7280", TransactionType::Income),
];

// (id, name, icon, color)
const DEFAULT_WALLETS: &[(&str, &str, Icon, &str)] = &[
    ("cash", "Tiền mặt", Icon::Wallet, "#10b981"),
    ("bank", "Tài khoản ngân hàng", Icon::Bank, "#3b82f6"),
    ("ewallet", "Ví điện tử", Icon::Card, "#8b5cf6"),
];

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;

    let count: i64 = conn.query_row("SELECT count(*) FROM categories", [], |row| row.get(0))?;
    if count == 0 {
        for (position, cat) in DEFAULT_CATEGORIES.iter().enumerate() {
            conn.execute(
                "INSERT INTO categories (id, name, icon, color, category_type, position) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![cat.0, cat.1, cat.2, cat.3, cat.4, position as i64],
            )?;
        }
        tracing::info!(count = DEFAULT_CATEGORIES.len(), "seeded default categories");
    }

    let count: i64 = conn.query_row("SELECT count(*) FROM wallets", [], |row| row.get(0))?;
    if count == 0 {
        for wallet in DEFAULT_WALLETS {
            conn.execute(
                "INSERT INTO wallets (id, name, balance, icon, color) VALUES (?1, ?2, 0, ?3, ?4)",
                rusqlite::params![wallet.0, wallet.1, wallet.2, wallet.3],
            )?;
        }
        tracing::info!(count = DEFAULT_WALLETS.len(), "seeded default wallets");
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_db() -> (tempfile::TempDir, Connection) {
    let dir = tempfile::tempdir().unwrap();
    let conn = get_connection(&dir.path().join(DB_FILE)).unwrap();
    init_db(&conn).unwrap();
    (dir, conn)
}
