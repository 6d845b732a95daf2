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

#[test]
fn parse_orders_outputs_order_json() {
    let edi_input = write_temp_file(
        "parse-orders",
        "edi",
        "UNH+1+ORDERS:D:96A:UN'\nBGM+220+PO-2026-001+9'\nDTM+137:20260115:102'\nNAD+BY+BUYER01::9'\nLIN+1++7891000100103:SA'\nQTY+21:120'\nPRI+AAA:4.35'\nUNT+8+1'\n",
    );

    let output = run_edix(&["parse-orders", edi_input.to_string_lossy().as_ref(), "--pretty"]);

    assert!(
        output.status.success(),
        "expected parse to succeed; stdout: {}; stderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout should be UTF-8");
    let order: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should contain valid JSON");
    assert_eq!(order["order_number"], "PO-2026-001");
    assert_eq!(order["buyer_code"], "BUYER01");
    assert_eq!(order["order_date"], "2026-01-15");
    assert_eq!(order["items"][0]["product_code"], "7891000100103");
    assert_eq!(order["items"][0]["quantity"], 120.0);

    let _ = fs::remove_file(edi_input);
}

#[test]
fn parse_orders_without_bgm_fails() {
    let edi_input = write_temp_file("parse-orders-no-bgm", "edi", "DTM+137:20260115:102'\n");

    let output = run_edix(&["parse-orders", edi_input.to_string_lossy().as_ref()]);

    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("no BGM segment"),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let _ = fs::remove_file(edi_input);
}

#[test]
fn missing_input_file_fails_with_context() {
    let output = run_edix(&["parse-orders", "/nonexistent/orders.edi"]);

    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("could not read"),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}
