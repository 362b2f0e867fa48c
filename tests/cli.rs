use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn creatorflow(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("creatorflow").unwrap();
    cmd.env("CREATORFLOW_DATA_DIR", dir.path())
        .env_remove("CREATORFLOW_PASSWORD")
        .env("RUST_LOG", "warn");
    cmd
}

fn signed_in(sample: bool) -> TempDir {
    let dir = TempDir::new().unwrap();
    let mut init = creatorflow(&dir);
    init.arg("init");
    if sample {
        init.arg("--sample");
    }
    init.assert().success();
    creatorflow(&dir)
        .args(["login", "ops@studio.test", "--password", "secret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as"));
    dir
}

/// Pull the value of the "  ID: ..." line out of command output
fn printed_id(output: &[u8]) -> String {
    String::from_utf8_lossy(output)
        .lines()
        .find_map(|line| line.trim().strip_prefix("ID: ").map(str::to_string))
        .unwrap()
}

#[test]
fn test_commands_require_init() {
    let dir = TempDir::new().unwrap();
    creatorflow(&dir)
        .args(["project", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("creatorflow init"));
}

#[test]
fn test_commands_require_login() {
    let dir = TempDir::new().unwrap();
    creatorflow(&dir).arg("init").assert().success();

    creatorflow(&dir)
        .args(["project", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));

    creatorflow(&dir)
        .args(["login", "ops@studio.test", "--password", "secret"])
        .assert()
        .success();
    creatorflow(&dir).args(["project", "list"]).assert().success();

    creatorflow(&dir).arg("logout").assert().success();
    creatorflow(&dir).arg("whoami").assert().failure();
}

#[test]
fn test_login_reads_password_from_env() {
    let dir = TempDir::new().unwrap();
    creatorflow(&dir).arg("init").assert().success();
    creatorflow(&dir)
        .env("CREATORFLOW_PASSWORD", "secret")
        .args(["login", "ops@studio.test"])
        .assert()
        .success();
    creatorflow(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("ops@studio.test"));
}

#[test]
fn test_project_costs_and_payment() {
    let dir = signed_in(false);

    creatorflow(&dir)
        .args(["project", "create", "Spring Launch", "--budget", "1000"])
        .assert()
        .success();
    creatorflow(&dir)
        .args([
            "project", "add-item", "Spring Launch", "--description", "Camera rental",
            "--category", "Equipment", "--quantity", "2", "--price", "450",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Cost: $900.00"));

    creatorflow(&dir)
        .args(["project", "pay", "Spring Launch", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    creatorflow(&dir)
        .args(["project", "pay", "Spring Launch", "900"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Balance Due: $0.00"))
        .stdout(predicate::str::contains("Status: Paid"));

    creatorflow(&dir)
        .args(["report", "projects"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spring Launch"));
}

#[test]
fn test_default_category_is_protected() {
    let dir = signed_in(false);

    creatorflow(&dir)
        .args(["category", "delete", "Other"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cannot be deleted"));
    creatorflow(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Other"));
}

#[test]
fn test_invoice_show_and_share_fallback() {
    let dir = signed_in(false);

    creatorflow(&dir)
        .args(["project", "create", "Podcast"])
        .assert()
        .success();
    creatorflow(&dir)
        .args(["project", "add-item", "Podcast", "--description", "Editing", "--price", "300"])
        .assert()
        .success();

    creatorflow(&dir)
        .args([
            "invoice", "show", "Podcast", "--client", "Acme", "--number", "INV-7",
            "--discount", "50",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("#INV-7"))
        .stdout(predicate::str::contains("Bill To:   Acme"))
        .stdout(predicate::str::contains("-$50.00"))
        .stdout(predicate::str::contains("$250.00"));

    creatorflow(&dir)
        .args(["invoice", "share", "Podcast", "--number", "INV-8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invoice INV-8 for Podcast"));
}

#[test]
fn test_delivery_bulk_update_and_delete() {
    let dir = signed_in(true);

    let mut ids = Vec::new();
    for product in ["Headphones", "Ring light"] {
        let output = creatorflow(&dir)
            .args(["delivery", "add", "alex_tech_tips", product, "--price", "80"])
            .output()
            .unwrap();
        assert!(output.status.success());
        ids.push(printed_id(&output.stdout));
    }

    creatorflow(&dir)
        .args(["delivery", "bulk-update", &ids[0], &ids[1], "--payment", "paid"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 2 deliveries"));

    creatorflow(&dir)
        .args(["delivery", "list", "--search", "ring", "--payment", "paid"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ring light"))
        .stdout(predicate::str::contains("Headphones").not());

    creatorflow(&dir)
        .args(["delivery", "bulk-delete", &ids[0], &ids[1]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 deliveries"));

    creatorflow(&dir)
        .args(["history", "--entity", &ids[0]])
        .assert()
        .success()
        .stdout(predicate::str::contains(ids[0].as_str()));
}

#[test]
fn test_task_toggle() {
    let dir = signed_in(false);

    let output = creatorflow(&dir)
        .args(["task", "add", "Send contracts", "--due", "2025-03-01", "--priority", "high"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let id = printed_id(&output.stdout);

    creatorflow(&dir)
        .args(["task", "toggle", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Send contracts: Done"));

    creatorflow(&dir)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Done: 1"));
}
