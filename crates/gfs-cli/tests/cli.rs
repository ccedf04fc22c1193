use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const REFERENCE: &str = "\
Item Code,Description,GL Code,GL Description
123456,CHICKEN BREAST,500100,Food
7654321,COLA 24X355ML,500200,N/A BEV
";

const INVOICE: &str = "\
GORDON FOOD SERVICE
123456 2 CHICKEN 10.00 20.00
7654321 1 COLA 12.00 12.00
CONTAINER DEPOSIT 1.20
\u{0c}999999 CS NEW ITEM 4.50 9.00
ECOLOGY FEE 1.00 0.05
CONTAINER DEPOSIT TOTAL 1.20
GST/HST $3.45
";

fn setup() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("GFS_DATABASE.csv"), REFERENCE).unwrap();
    fs::write(dir.path().join("invoice.txt"), INVOICE).unwrap();
    dir
}

fn gfs(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gfs").unwrap();
    cmd.current_dir(dir);
    cmd
}

#[test]
fn process_prints_text_report() {
    let dir = setup();

    gfs(dir.path())
        .args(["process", "invoice.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary by GL Description:"))
        .stdout(predicate::str::contains("N/A BEV                        $13.25"))
        .stdout(predicate::str::contains("ASK BOSS FOR PROPER GL         $9.00"))
        .stdout(predicate::str::contains("Container Deposit              $").not())
        .stdout(predicate::str::contains("GST/HST: $3.45"))
        .stdout(predicate::str::contains("Grand Total: $45.70"))
        .stderr(predicate::str::contains("999999"));
}

#[test]
fn process_writes_json() {
    let dir = setup();

    gfs(dir.path())
        .args(["process", "invoice.txt", "-f", "json", "-o", "out.json"])
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("out.json")).unwrap()).unwrap();
    assert_eq!(json["records"].as_array().unwrap().len(), 5);
    assert_eq!(json["records"][2]["item_code"], "N/A-CD");
    assert_eq!(json["summary"]["grand_total"], "45.70");
}

#[test]
fn process_empty_invoice() {
    let dir = setup();
    fs::write(dir.path().join("empty.txt"), "").unwrap();

    gfs(dir.path())
        .args(["process", "empty.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GST/HST: $0.00"))
        .stdout(predicate::str::contains("Grand Total: $0.00"));
}

#[test]
fn missing_reference_table_is_fatal() {
    let dir = setup();

    gfs(dir.path())
        .args(["process", "invoice.txt", "--reference", "nope.csv"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Summary").not())
        .stderr(predicate::str::contains("Reference table not found"));
}

#[test]
fn missing_invoice_is_fatal() {
    let dir = setup();

    gfs(dir.path())
        .args(["process", "nope.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_continues_on_error() {
    let dir = setup();
    fs::write(dir.path().join("broken.pdf"), "not a pdf").unwrap();

    gfs(dir.path())
        .args(["batch", "*.*", "--continue-on-error", "-o", "reports"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 2 files (1 failed)"))
        .stdout(predicate::str::contains("45.70"));

    assert!(dir.path().join("reports").join("invoice.report.txt").exists());
}

#[test]
fn batch_report_beside_input_keeps_input() {
    let dir = setup();

    gfs(dir.path())
        .args(["batch", "invoice.txt", "-o", "."])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(dir.path().join("invoice.txt")).unwrap(), INVOICE);
    let report = fs::read_to_string(dir.path().join("invoice.report.txt")).unwrap();
    assert!(report.contains("Grand Total: $45.70"));
}

#[test]
fn batch_stops_on_first_error() {
    let dir = setup();
    fs::write(dir.path().join("broken.pdf"), "not a pdf").unwrap();

    gfs(dir.path())
        .args(["batch", "*.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.pdf"));
}

#[test]
fn config_init_and_get() {
    let dir = setup();

    gfs(dir.path())
        .args(["--config", "gfs.json", "config", "init"])
        .assert()
        .success();

    gfs(dir.path())
        .args(["--config", "gfs.json", "config", "set", "reference.path", "GFS_DATABASE.csv"])
        .assert()
        .success();

    gfs(dir.path())
        .args(["--config", "gfs.json", "config", "get", "reference.path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GFS_DATABASE.csv"));

    gfs(dir.path())
        .args(["--config", "gfs.json", "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
