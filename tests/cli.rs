use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fairshare(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fairshare").unwrap();
    cmd.env("FAIRSHARE_DATA_DIR", data_dir.path())
        .env_remove("FAIRSHARE_OCCASION")
        .env_remove("FAIRSHARE_LOG");
    cmd
}

fn run(data_dir: &TempDir, args: &[&str]) {
    fairshare(data_dir).args(args).assert().success();
}

fn trip_with_people(data_dir: &TempDir) {
    run(data_dir, &["init"]);
    run(data_dir, &["occasion", "create", "Lisbon"]);
    for name in ["Alice", "Bob", "Carol"] {
        run(data_dir, &["person", "add", name]);
    }
}

#[test]
fn init_and_config() {
    let data_dir = TempDir::new().unwrap();

    fairshare(&data_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    fairshare(&data_dir)
        .args(["config", "--currency", "€"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Currency symbol: €"))
        .stdout(predicate::str::contains("Subgroup policy: ignore"));
}

#[test]
fn commands_without_occasion_fail() {
    let data_dir = TempDir::new().unwrap();

    fairshare(&data_dir)
        .arg("balances")
        .assert()
        .failure()
        .stderr(predicate::str::contains("occasion"));
}

#[test]
fn split_and_settle_up() {
    let data_dir = TempDir::new().unwrap();
    trip_with_people(&data_dir);

    run(&data_dir, &["expense", "add", "Alice", "30.00", "Dinner", "--category", "Food"]);

    fairshare(&data_dir)
        .arg("balances")
        .assert()
        .success()
        .stdout(predicate::str::contains("$20.00"))
        .stdout(predicate::str::contains("-$10.00"));

    fairshare(&data_dir)
        .arg("suggest")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bob"))
        .stdout(predicate::str::contains("2 transfer(s), $20.00 in total"));

    fairshare(&data_dir)
        .args(["settle", "record", "Bob", "Alice", "10"])
        .assert()
        .success();

    fairshare(&data_dir)
        .args(["suggest", "--record"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded 1 settlement(s)."));

    fairshare(&data_dir)
        .arg("suggest")
        .assert()
        .success()
        .stdout(predicate::str::contains("Everyone is settled up!"));

    fairshare(&data_dir)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("No integrity issues found."));
}

#[test]
fn subgroup_payer_policy() {
    let data_dir = TempDir::new().unwrap();
    trip_with_people(&data_dir);

    run(&data_dir, &["subgroup", "create", "Couple", "--members", "Alice,Bob"]);
    run(&data_dir, &["expense", "add", "Couple", "90", "Hotel"]);

    fairshare(&data_dir)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("not counted in balances"));

    run(&data_dir, &["config", "--subgroup-policy", "split_among_members"]);

    fairshare(&data_dir)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("No integrity issues found."));

    fairshare(&data_dir)
        .args(["summary", "Couple"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Members: Alice, Bob"));
}

#[test]
fn occasion_override_and_stats() {
    let data_dir = TempDir::new().unwrap();
    trip_with_people(&data_dir);
    run(&data_dir, &["occasion", "create", "Ski"]);

    fairshare(&data_dir)
        .args(["--occasion", "Ski", "person", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No people in this occasion."));

    run(&data_dir, &["expense", "add", "Bob", "12.50", "Coffee", "--among", "Bob,Carol"]);

    fairshare(&data_dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Spent: $12.50"))
        .stdout(predicate::str::contains("General"));

    fairshare(&data_dir)
        .args(["audit", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense"));
}

#[test]
fn duplicate_names_are_rejected() {
    let data_dir = TempDir::new().unwrap();
    trip_with_people(&data_dir);

    fairshare(&data_dir)
        .args(["subgroup", "create", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
