use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

const CATALOG: &str = r#"[
    {"title": "Widget", "price": 10},
    {"title": "Gadget", "price": 2.5},
    {"title": "Widget", "price": 12}
]"#;

const SALES: &str = r#"[
    {"SALE_ID": 1, "Product": "Widget", "Quantity": 3},
    {"SALE_ID": 1, "Product": "Gizmo", "Quantity": 1},
    {"SALE_ID": 2, "Product": "Gadget", "Quantity": 4}
]"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn compute_sales(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("compute-sales").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("COMPUTE_SALES_OUT_DIR")
        .env_remove("COMPUTE_SALES_RESULTS_FILE")
        .env_remove("COMPUTE_SALES_PRECISION")
        .env_remove("COMPUTE_SALES_FORMAT")
        .env_remove("COMPUTE_SALES_CONFIG");
    cmd
}

#[test]
fn prints_and_writes_report() {
    let dir = TempDir::new().unwrap();
    let catalog = write(&dir, "products.json", CATALOG);
    let sales = write(&dir, "sales.json", SALES);

    compute_sales(&dir)
        .arg(&catalog)
        .arg(&sales)
        .assert()
        .success()
        .stdout(predicate::str::contains("=== SALES REPORT: sales.json ==="))
        .stdout(predicate::str::contains("unknown product Gizmo in record 0"))
        .stdout(predicate::str::contains("duplicate id Widget, overwritten"))
        .stdout(predicate::str::is_match(r"GRAND TOTAL\s+46\.00").unwrap())
        .stdout(predicate::str::contains("2 warning(s) detected."));

    let written = fs::read_to_string(dir.path().join("SalesResults.txt")).unwrap();
    assert!(written.contains("Elapsed time (s): "));
}

#[test]
fn json_format_and_precision_from_environment() {
    let dir = TempDir::new().unwrap();
    let catalog = write(&dir, "products.json", r#"{"A": 0.125}"#);
    let sales = write(&dir, "sales.json", r#"[[{"product_id": "A", "quantity": 1}]]"#);

    let output = compute_sales(&dir)
        .env("COMPUTE_SALES_FORMAT", "json")
        .env("COMPUTE_SALES_PRECISION", "2")
        .arg(&catalog)
        .arg(&sales)
        .arg("--no-write")
        .output()
        .unwrap();

    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["grand_total"], "0.12");
    assert_eq!(doc["warning_count"], 0);
    assert!(!dir.path().join("SalesResults.txt").exists());
}

#[test]
fn config_file_in_working_directory_is_used() {
    let dir = TempDir::new().unwrap();
    let catalog = write(&dir, "products.json", r#"{"A": 1}"#);
    let sales = write(&dir, "sales.json", r#"[[{"product_id": "A", "quantity": 2}]]"#);
    write(
        &dir,
        "compute-sales.toml",
        "[report]\nout_dir = \"reports\"\nresults_file = \"out.txt\"\nprecision = 0\n",
    );

    compute_sales(&dir)
        .arg(&catalog)
        .arg(&sales)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(dir.path().join("reports").join("out.txt")).unwrap();
    assert!(predicate::str::is_match(r"GRAND TOTAL\s+2\n").unwrap().eval(&written));
}

#[test]
fn missing_catalog_fails() {
    let dir = TempDir::new().unwrap();
    let sales = write(&dir, "sales.json", "[]");

    compute_sales(&dir)
        .arg("nope.json")
        .arg(&sales)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("catalog data unavailable: nope.json"));
}

#[test]
fn malformed_sales_fails_without_report() {
    let dir = TempDir::new().unwrap();
    let catalog = write(&dir, "products.json", r#"{"A": 1}"#);
    let sales = write(&dir, "sales.json", "12");

    compute_sales(&dir)
        .arg(&catalog)
        .arg(&sales)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("sales.json: Malformed sales input"));

    assert!(!dir.path().join("SalesResults.txt").exists());
}

#[test]
fn multiple_inputs_get_prefixed_files() {
    let dir = TempDir::new().unwrap();
    let catalog = write(&dir, "products.json", CATALOG);
    let first = write(&dir, "TC1.json", SALES);
    let second = write(&dir, "TC2.json", "[]");

    compute_sales(&dir)
        .arg(&catalog)
        .arg(&first)
        .arg(&second)
        .assert()
        .success();

    assert!(dir.path().join("TC1_SalesResults.txt").is_file());
    assert!(dir.path().join("TC2_SalesResults.txt").is_file());
    assert!(!dir.path().join("SalesResults.txt").exists());
}

#[test]
fn usage_error_exits_two() {
    let dir = TempDir::new().unwrap();

    compute_sales(&dir).arg("products.json").assert().code(2);
}
