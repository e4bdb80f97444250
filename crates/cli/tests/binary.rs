use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const BIN: &str = env!("CARGO_BIN_EXE_analyze-trades");

fn analyze(dir: &Path, args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_no_arguments_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();

    let output = analyze(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(!dir.path().join("results.csv").exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
}

#[test]
fn test_two_arguments_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.xml"), "<Trades/>").unwrap();
    fs::write(dir.path().join("b.xml"), "<Trades/>").unwrap();

    let output = analyze(dir.path(), &["a.xml", "b.xml"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(!dir.path().join("results.csv").exists());
    let log = fs::read_to_string(dir.path().join("server.log")).unwrap();
    assert!(log.contains("unexpected argument"));
}

#[test]
fn test_malformed_value_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("trades.xml"),
        r#"<Trades>
    <Trade CorrelationId="701" NumberOfTrades="1" Limit="1000" TradeID="A1">seven</Trade>
</Trades>"#,
    )
    .unwrap();

    let output = analyze(dir.path(), &["trades.xml"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("results.csv").exists());
    let log = fs::read_to_string(dir.path().join("server.log")).unwrap();
    assert!(log.contains("InputFormatError"));
    assert!(log.contains("--ending unsuccessfully--"));
}

#[test]
fn test_sample_run_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("trades.xml"),
        r#"<Trades>
    <Trade CorrelationId="701" NumberOfTrades="1" Limit="1000" TradeID="A1">700</Trade>
    <Trade CorrelationId="002" NumberOfTrades="1" Limit="1000" TradeID="B2">1170</Trade>
    <Trade CorrelationId="103" NumberOfTrades="2" Limit="500"  TradeID="C3">200</Trade>
</Trades>"#,
    )
    .unwrap();

    let output = analyze(dir.path(), &["trades.xml"]);

    assert_eq!(output.status.code(), Some(0));
    let csv = fs::read_to_string(dir.path().join("results.csv")).unwrap();
    assert_eq!(
        csv,
        "CorrelationID,NumberOfTrades,State\n002,1,Rejected\n103,2,Pending\n701,1,Accepted\n"
    );
}
