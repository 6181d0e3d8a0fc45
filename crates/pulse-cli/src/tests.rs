//! CLI command tests

use std::io::Write;

use clap::Parser;
use pulse_core::KpiService;

use crate::cli::{Cli, Commands};
use crate::commands::{self, truncate};

fn embedded_service() -> KpiService {
    commands::load_service(None, None).unwrap()
}

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

// ========== Argument Parsing ==========

#[test]
fn test_parse_reason_json() {
    let cli = Cli::parse_from(["pulse", "reason", "--json"]);
    assert!(matches!(cli.command, Commands::Reason { json: true }));
    assert!(cli.dataset.is_none());
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::parse_from(["pulse", "impact", "ED_Wait_Time", "--upstream", "--dataset", "x.toml", "-v"]);
    assert!(cli.verbose);
    assert_eq!(cli.dataset.unwrap().to_str(), Some("x.toml"));
    match cli.command {
        Commands::Impact { id, upstream } => {
            assert_eq!(id, "ED_Wait_Time");
            assert!(upstream);
        }
        _ => panic!("expected impact command"),
    }
}

#[test]
fn test_parse_serve_defaults() {
    let cli = Cli::parse_from(["pulse", "serve"]);
    match cli.command {
        Commands::Serve { port, host } => {
            assert_eq!(port, 3000);
            assert_eq!(host, "127.0.0.1");
        }
        _ => panic!("expected serve command"),
    }
}

// ========== Service Loading ==========

#[test]
fn test_load_service_embedded() {
    let service = embedded_service();
    assert_eq!(service.metric_count(), 10);
}

#[test]
fn test_load_service_custom_dataset_and_config() {
    let dataset = write_temp(
        r#"
[[departments]]
id = "D"
name = "Dept"

[[metrics]]
id = "Hospital_Operating_Margin"
name = "Operating Margin"
department = "D"
actual = 2.5
target = 5.0
"#,
    );
    let config = write_temp(
        r#"
[rules.capacity_crisis]
enabled = false

[rules.financial_stress]
margin_below = 2.0
"#,
    );

    let service = commands::load_service(Some(dataset.path()), Some(config.path())).unwrap();
    let report = service.run_reasoning().unwrap();
    assert!(report.alerts.is_empty());
}

#[test]
fn test_load_service_missing_dataset() {
    let err = commands::load_service(Some(std::path::Path::new("/nonexistent/data.toml")), None)
        .err()
        .unwrap();
    assert!(err.to_string().contains("Failed to read dataset"));
}

// ========== Commands ==========

#[test]
fn test_cmd_metrics() {
    assert!(commands::cmd_metrics(&embedded_service()).is_ok());
}

#[test]
fn test_cmd_reason() {
    let service = embedded_service();
    assert!(commands::cmd_reason(&service, false).is_ok());
    assert!(commands::cmd_reason(&service, true).is_ok());
    assert!(service.list_metrics().iter().all(|m| m.alert_level.is_some()));
}

#[test]
fn test_cmd_departments_and_summary() {
    let service = embedded_service();
    assert!(commands::cmd_departments(&service).is_ok());
    assert!(commands::cmd_summary(&service).is_ok());
}

#[test]
fn test_cmd_summary_no_data() {
    let dataset = write_temp("[[departments]]\nid = \"D\"\nname = \"Dept\"\n");
    let service = commands::load_service(Some(dataset.path()), None).unwrap();
    assert!(commands::cmd_summary(&service).is_err());
}

#[test]
fn test_parse_show() {
    let cli = Cli::parse_from(["pulse", "show", "ED_LWBS"]);
    assert!(matches!(cli.command, Commands::Show { id } if id == "ED_LWBS"));
}

#[test]
fn test_cmd_show() {
    let service = embedded_service();
    assert!(commands::cmd_show(&service, "ED_LWBS").is_ok());
    assert!(commands::cmd_show(&service, "Hospital_Operating_Margin").is_ok());
    assert!(commands::cmd_show(&service, "Nope").is_err());
}

#[test]
fn test_metrics_listing_classifies_without_publishing() {
    let service = embedded_service();
    assert!(commands::cmd_metrics(&service).is_ok());
    assert!(service.list_metrics().iter().all(|m| m.alert_level.is_none()));
    assert_eq!(service.classification().len(), 10);
}

#[test]
fn test_cmd_impact() {
    let service = embedded_service();
    assert!(commands::cmd_impact(&service, "ED_Wait_Time", false).is_ok());
    assert!(commands::cmd_impact(&service, "ED_LWBS", true).is_ok());
    assert!(commands::cmd_impact(&service, "Nope", false).is_err());
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("Left Without Being Seen Rate", 10), "Left Wi...");
}
