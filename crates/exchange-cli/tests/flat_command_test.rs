use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

fn cargo_bin() -> PathBuf {
    if let Ok(path) = env::var("CARGO_BIN_EXE_edix") {
        return PathBuf::from(path);
    }

    let target_dir = env::var("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| repo_root().join("target"));
    let executable_name = format!("edix{}", std::env::consts::EXE_SUFFIX);
    let fallback = target_dir.join("debug").join(executable_name);

    if fallback.exists() {
        return fallback;
    }

    panic!(
        "CARGO_BIN_EXE_edix is not set and fallback binary was not found at {}",
        fallback.display()
    );
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn unique_temp_path(name: &str, extension: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time after epoch")
        .as_nanos();
    let counter = TEMP_FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let filename = format!(
        "exchange-cli-{name}-{}-{nanos}-{counter}.{extension}",
        std::process::id()
    );
    env::temp_dir().join(filename)
}

fn write_temp_file(name: &str, extension: &str, content: &str) -> PathBuf {
    let path = unique_temp_path(name, extension);
    fs::write(&path, content).expect("temporary file should be writable");
    path
}

fn run_edix(args: &[&str]) -> Output {
    Command::new(cargo_bin())
        .args(args)
        .output()
        .expect("run edix")
}

const STOCK_SCHEMA_YAML: &str = "\
name: stock
fields:
  - name: code
    start: 0
    length: 10
  - name: qty
    start: 10
    length: 6
    type: number
";

#[test]
fn flat_parse_produces_typed_records() {
    let schema = write_temp_file("stock-schema", "yaml", STOCK_SCHEMA_YAML);
    let input = write_temp_file("stock-data", "txt", "PROD-A    000042\nPROD-B    000007\n");

    let output = run_edix(&[
        "flat",
        "parse",
        input.to_string_lossy().as_ref(),
        "--schema",
        schema.to_string_lossy().as_ref(),
    ]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let records: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should contain valid JSON");
    let records = records.as_array().expect("output should be a JSON array");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["code"], "PROD-A");
    assert_eq!(records[0]["qty"], 42.0);
    assert_eq!(records[1]["qty"], 7.0);

    let _ = fs::remove_file(schema);
    let _ = fs::remove_file(input);
}

#[test]
fn flat_generate_pads_and_aligns_fields() {
    let schema = write_temp_file("stock-schema-gen", "yaml", STOCK_SCHEMA_YAML);
    let input = write_temp_file(
        "stock-records",
        "json",
        r#"[{"code": "PROD-A", "qty": 42}]"#,
    );
    let out = unique_temp_path("stock-out", "txt");

    let output = run_edix(&[
        "flat",
        "generate",
        input.to_string_lossy().as_ref(),
        "--schema",
        schema.to_string_lossy().as_ref(),
        "--output",
        out.to_string_lossy().as_ref(),
    ]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let content = fs::read_to_string(&out).expect("output file should exist");
    assert_eq!(content.trim_end_matches('\n'), "PROD-A    000042");

    let _ = fs::remove_file(schema);
    let _ = fs::remove_file(input);
    let _ = fs::remove_file(out);
}

#[test]
fn invalid_schema_fails_with_context() {
    let schema = write_temp_file("bad-schema", "yaml", "fields: 12");
    let input = write_temp_file("stock-data-bad", "txt", "PROD-A    000042\n");

    let output = run_edix(&[
        "flat",
        "parse",
        input.to_string_lossy().as_ref(),
        "--schema",
        schema.to_string_lossy().as_ref(),
    ]);

    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("invalid schema"),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let _ = fs::remove_file(schema);
    let _ = fs::remove_file(input);
}
