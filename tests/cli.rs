use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn chitieu(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("chitieu").unwrap();
    cmd.env("HOME", home.path()).env("NO_COLOR", "1");
    cmd
}

fn initialized() -> TempDir {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("data");
    chitieu(&home)
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized chitieu"));
    home
}

#[test]
fn voice_prints_json_draft() {
    let home = tempfile::tempdir().unwrap();
    chitieu(&home)
        .args(["voice", "--json", "Chi 50000 ăn sáng"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"amount\": 50000"))
        .stdout(predicate::str::contains("\"note\": \"ăn sáng\""))
        .stdout(predicate::str::contains("\"is_income\": false"));
}

#[test]
fn voice_recognizes_income() {
    let home = tempfile::tempdir().unwrap();
    chitieu(&home)
        .args(["voice", "Thu", "nhập", "5", "triệu", "lương", "tháng"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Thu nhập"))
        .stdout(predicate::str::contains("5.000.000"))
        .stdout(predicate::str::contains("lương tháng"));
}

#[test]
fn voice_examples() {
    let home = tempfile::tempdir().unwrap();
    chitieu(&home)
        .args(["voice", "--examples"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chi 35k mua cafe"));
}

#[test]
fn commands_need_init() {
    let home = tempfile::tempdir().unwrap();
    chitieu(&home)
        .args(["suggest", "cafe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("chitieu init"));
}

#[test]
fn add_then_suggest_from_history() {
    let home = initialized();
    chitieu(&home)
        .args(["add", "--voice", "chi 30k grab đi làm", "--category", "transport", "--date", "2025-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("30.000"));

    chitieu(&home)
        .args(["add", "--voice", "chi 25k grab về nhà", "--date", "2025-03-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Di chuyển (suggested)"));

    chitieu(&home)
        .args(["suggest", "--json", "grab"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\":\"transport\""));

    chitieu(&home)
        .args(["history", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("grab đi làm"))
        .stdout(predicate::str::contains("Transactions (2 of 2)"));

    chitieu(&home)
        .args(["report", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("55.000"))
        .stdout(predicate::str::contains("Expenses by category"));
}

#[test]
fn add_without_amount_fails() {
    let home = initialized();
    chitieu(&home)
        .args(["add", "--voice", "ăn sáng"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no amount"));
}

#[test]
fn delete_restores_wallet_balance() {
    let home = initialized();
    chitieu(&home)
        .args(["add", "--amount", "45000", "--category", "food", "--date", "2025-03-05", "--note", "bún chả"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1"));

    chitieu(&home)
        .args(["wallets", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total balance: -45.000"));

    chitieu(&home).args(["delete", "1"]).assert().success();

    chitieu(&home)
        .args(["wallets", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total balance: 0 \u{20AB}"));
}

#[test]
fn budget_set_and_list() {
    let home = initialized();
    chitieu(&home)
        .args(["budget", "set", "2000000", "--category", "food", "--month", "2025-03"])
        .assert()
        .success();
    chitieu(&home)
        .args(["budget", "set", "2500000", "--category", "food", "--month", "2025-03"])
        .assert()
        .success();
    chitieu(&home)
        .args(["budget", "list", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2.500.000"))
        .stdout(predicate::str::contains("2.000.000").not());
}

#[test]
fn categories_reject_unknown_icon() {
    let home = initialized();
    chitieu(&home)
        .args(["categories", "add", "coffee", "--name", "Cà phê", "--icon", "spaceship"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown icon"));
}
