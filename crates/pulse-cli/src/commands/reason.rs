//! Reasoning command

use anyhow::{Context, Result};
use pulse_core::{KpiService, ReasoningReport};

use super::metrics::level_icon;

pub fn cmd_reason(service: &KpiService, json: bool) -> Result<()> {
    let report = service.run_reasoning().context("Reasoning run failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &ReasoningReport) {
    println!();
    println!("🧠 Reasoning (revision {})", report.revision);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   🟢 {} normal   🟡 {} warning   🔴 {} critical",
        report.counts.normal, report.counts.warning, report.counts.critical
    );

    println!();
    println!("🚨 Alerts");
    if report.alerts.is_empty() {
        println!("   (none)");
    }
    for alert in &report.alerts {
        println!(
            "   {} [{}] {}",
            level_icon(Some(alert.level)),
            alert.alert_type,
            alert.message
        );
    }

    println!();
    println!("💡 Insights");
    if report.insights.is_empty() {
        println!("   (none)");
    }
    for insight in &report.insights {
        println!("   • {}", insight);
    }

    println!();
    println!("📋 Recommendations");
    if report.recommendations.is_empty() {
        println!("   (none)");
    }
    for rec in &report.recommendations {
        println!(
            "   {:12} {} ({}, within {})",
            rec.priority.as_str(),
            rec.action,
            rec.owner,
            rec.timeline
        );
    }
}
