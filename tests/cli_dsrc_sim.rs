use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "dsrc-sim-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn run_json(args: &[&str]) -> Value {
    let output = Command::new(env!("CARGO_BIN_EXE_dsrc_sim"))
        .arg("--json")
        .args(args)
        .output()
        .expect("run dsrc_sim");
    assert!(
        output.status.success(),
        "dsrc_sim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is a JSON report")
}

#[test]
fn default_scenario_reports_full_delivery() {
    let v = run_json(&[]);
    let flows = v["flows"].as_array().expect("flows array");
    assert_eq!(flows.len(), 1);
    assert_eq!(flows[0]["tx_packets"], 90);
    assert_eq!(flows[0]["rx_packets"], 90);
    assert_eq!(flows[0]["delivery_ratio_pct"], 100.0);
    assert_eq!(flows[0]["src_addr"], "10.1.1.1");
}

#[test]
fn low_tx_power_drops_everything() {
    let v = run_json(&["--tx-power-dbm", "-50"]);
    let flow = &v["flows"][0];
    assert_eq!(flow["tx_packets"], 90);
    assert_eq!(flow["rx_packets"], 0);
    assert!(flow["avg_delay_s"].is_null());
}

#[test]
fn text_output_warns_when_nothing_is_received() {
    let output = Command::new(env!("CARGO_BIN_EXE_dsrc_sim"))
        .args(["--tx-power-dbm", "-50"])
        .output()
        .expect("run dsrc_sim");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== Simulation Results ==="));
    assert!(stdout.contains("Tx Packets: 90"));
    assert!(stdout.contains("WARNING: No packets received!"));
}

#[test]
fn config_file_and_trace_json_are_honoured() {
    let dir = unique_temp_dir("config-trace");
    let config = dir.join("scenario.json");
    fs::write(
        &config,
        r#"{ "interval_s": 0.5, "app_start_s": 0.0, "app_stop_s": 2.0, "stop_s": 2.0 }"#,
    )
    .expect("write config");
    let trace = dir.join("trace.jsonl");

    let v = run_json(&[
        "--config",
        config.to_str().unwrap(),
        "--trace-json",
        trace.to_str().unwrap(),
    ]);
    assert_eq!(v["flows"][0]["tx_packets"], 4);

    let raw = fs::read_to_string(&trace).expect("read trace");
    let kinds: Vec<String> = raw
        .lines()
        .map(|l| {
            let v: Value = serde_json::from_str(l).expect("json line");
            v["kind"].as_str().unwrap_or_default().to_string()
        })
        .collect();
    assert_eq!(kinds.iter().filter(|k| *k == "sent").count(), 4);
    assert_eq!(kinds.iter().filter(|k| *k == "delivered").count(), 4);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn invalid_config_exits_with_failure() {
    let output = Command::new(env!("CARGO_BIN_EXE_dsrc_sim"))
        .args(["--interval-ms", "0"])
        .output()
        .expect("run dsrc_sim");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid scenario config"));
}
