//! Tests for the command-line interface

use super::*;
use crate::config::parse_config;
use clap::Parser;
use std::io::Write as _;
use tempfile::NamedTempFile;

const CLR_PLAN: &str = r#"
steps: 4
optimizer:
  groups: 2
  lr: [1.0, 2.0]
  momentum: 0.95
schedule:
  kind: clr
  lr_factor: 2
"#;

fn plan_file(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

fn run(args: &[&str]) -> (Result<()>, String) {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    let result = execute(&cli, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_parse_preview_args() {
    let cli = Cli::try_parse_from(["kerosene", "-v", "preview", "plan.yaml", "--every", "5"]).unwrap();
    assert!(cli.verbose);
    assert_eq!(cli.log_filter(), LevelFilter::Debug);
    assert_eq!(
        cli.command,
        Command::Preview(PreviewArgs {
            config: PathBuf::from("plan.yaml"),
            every: 5,
            format: OutputFormat::Table,
        })
    );
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["kerosene", "validate", "plan.yaml", "-q"]).unwrap();
    assert!(cli.quiet);
    assert_eq!(cli.log_filter(), LevelFilter::Error);
}

#[test]
fn test_default_log_filter() {
    let cli = Cli::try_parse_from(["kerosene", "validate", "plan.yaml"]).unwrap();
    assert_eq!(cli.log_filter(), LevelFilter::Info);
}

#[test]
fn test_bad_format_rejected() {
    assert!(Cli::try_parse_from(["kerosene", "preview", "p.yaml", "--format", "xml"]).is_err());
}

#[test]
fn test_preview_rows() {
    let config = parse_config(CLR_PLAN).unwrap();
    let rows = preview_rows(&config, 1).unwrap();
    let lrs: Vec<Vec<f64>> = rows.iter().map(|r| r.lr.clone()).collect();
    assert_eq!(
        lrs,
        vec![vec![0.5, 1.0], vec![0.75, 1.5], vec![1.0, 2.0], vec![0.75, 1.5], vec![0.5, 1.0]]
    );
    assert!(rows.iter().all(|r| r.momentum == vec![0.95, 0.95]));
}

#[test]
fn test_preview_every_keeps_first_and_last() {
    let config = parse_config(CLR_PLAN.replace("steps: 4", "steps: 7").as_str()).unwrap();
    let steps: Vec<usize> = preview_rows(&config, 3).unwrap().iter().map(|r| r.step).collect();
    assert_eq!(steps, vec![0, 3, 6, 7]);

    let steps: Vec<usize> = preview_rows(&config, 0).unwrap().iter().map(|r| r.step).collect();
    assert_eq!(steps.len(), 8);
}

#[test]
fn test_preview_table_output() {
    let file = plan_file(CLR_PLAN);
    let path = file.path().to_str().unwrap();
    let (result, out) = run(&["kerosene", "preview", path]);
    result.unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("step       lr[0]      lr[1]      momentum[0]"));
    assert!(lines[1].starts_with("    0      0.5        1.0        0.95"));
    assert!(lines[3].starts_with("    2      1.0        2.0 "));
}

#[test]
fn test_preview_json_output() {
    let file = plan_file(CLR_PLAN);
    let path = file.path().to_str().unwrap();
    let (result, out) = run(&["kerosene", "preview", path, "--format", "json", "--every", "2"]);
    result.unwrap();

    let rows: Vec<PreviewRow> = serde_json::from_str(&out).unwrap();
    assert_eq!(rows.iter().map(|r| r.step).collect::<Vec<_>>(), vec![0, 2, 4]);
    assert_eq!(rows[1].lr, vec![1.0, 2.0]);
    assert_eq!(rows[2].wd, vec![0.0, 0.0]);
}

#[test]
fn test_single_group_table_header() {
    let mut buf = Vec::new();
    let rows = vec![PreviewRow { step: 0, lr: vec![0.1], momentum: vec![0.9], wd: vec![0.0] }];
    render_table(&rows, &mut buf).unwrap();
    let out = String::from_utf8(buf).unwrap();
    assert!(out.starts_with("step       lr         momentum   wd"));
}

#[test]
fn test_validate_output() {
    let file = plan_file(CLR_PLAN);
    let path = file.path().to_str().unwrap();
    let (result, out) = run(&["kerosene", "validate", path]);
    result.unwrap();
    assert!(out.contains("Config is valid"));
    assert!(out.contains("Steps: 4"));
    assert!(out.contains("Learning rate: [1.0, 2.0]"));
    assert!(out.contains("Schedule: clr"));
}

#[test]
fn test_validate_quiet() {
    let file = plan_file(CLR_PLAN);
    let path = file.path().to_str().unwrap();
    let (result, out) = run(&["kerosene", "-q", "validate", path]);
    result.unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_validate_rejects_bad_plan() {
    let file = plan_file(&CLR_PLAN.replace("lr_factor: 2", "lr_factor: -2"));
    let path = file.path().to_str().unwrap();
    let (result, _) = run(&["kerosene", "validate", path]);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("lr factor"));
}

#[test]
fn test_run_command_reports_error_code() {
    let cli = Cli::try_parse_from(["kerosene", "validate", "/nonexistent/plan.yaml"]).unwrap();
    let err = run_command(cli).unwrap_err();
    assert!(err.starts_with("[E040]"), "{err}");
    assert!(err.contains("Failed to read config file"));
}
