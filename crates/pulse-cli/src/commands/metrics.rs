//! Metric listing, detail and impact commands

use anyhow::{Context, Result};
use pulse_core::{AlertLevel, EdgeKind, KpiService, Unit};

use super::truncate;

fn value_str(value: Option<f64>) -> String {
    value
        .map(|v| format!("{}", v))
        .unwrap_or_else(|| "?".to_string())
}

fn with_unit(value: Option<f64>, unit: Unit) -> String {
    match value {
        Some(v) if unit == Unit::Currency => format!("{}{}", unit.symbol(), v),
        Some(v) => format!("{}{}", v, unit.symbol()),
        None => "-".to_string(),
    }
}

pub(crate) fn level_icon(level: Option<AlertLevel>) -> &'static str {
    match level {
        Some(AlertLevel::Normal) => "🟢",
        Some(AlertLevel::Warning) => "🟡",
        Some(AlertLevel::Critical) => "🔴",
        None => "⚪",
    }
}

pub fn cmd_metrics(service: &KpiService) -> Result<()> {
    let metrics = service.list_metrics();
    let classification = service.classification();

    if metrics.is_empty() {
        println!("No metrics in dataset.");
        return Ok(());
    }

    println!();
    println!("📊 Metrics");
    println!("   ─────────────────────────────────────────────────────────────");

    for m in metrics {
        println!(
            "   {} {:32} │ {:24} │ {:>7} / {:<7} │ {}",
            level_icon(classification.level(m.id.as_str())),
            truncate(&m.name, 32),
            truncate(&m.department_name, 24),
            value_str(m.actual),
            value_str(m.target),
            m.trend
        );
    }

    Ok(())
}

pub fn cmd_show(service: &KpiService, id: &str) -> Result<()> {
    let m = service
        .metric_detail(id)
        .with_context(|| format!("Failed to load metric {}", id))?;

    println!();
    println!("{} {} ({})", level_icon(m.status), m.name, m.id);
    println!("   ─────────────────────────────────────────────────────────────");
    if !m.description.is_empty() {
        println!("   {}", m.description);
    }
    println!("   Department:   {}", m.department.name);
    if let Some(beds) = m.department.bed_capacity {
        println!("   Beds:         {}", beds);
    }
    if let Some(staff) = m.department.staff_count {
        println!("   Staff:        {}", staff);
    }
    let categories: Vec<&str> = m.categories.iter().map(|c| c.as_str()).collect();
    println!("   Categories:   {}", categories.join(", "));
    println!("   Period:       {}", m.time_period);
    println!("   Weight:       {}", m.weight);
    println!(
        "   Actual:       {} (target {}, trend {})",
        with_unit(m.actual, m.unit),
        with_unit(m.target, m.unit),
        m.trend
    );
    println!(
        "   Thresholds:   warning {}, critical {}",
        with_unit(m.warning_threshold, m.unit),
        with_unit(m.critical_threshold, m.unit)
    );
    match m.performance_ratio {
        Some(ratio) => println!("   Performance:  {:.1}% of target", ratio),
        None => println!("   Performance:  not classifiable"),
    }
    if !m.depends_on.is_empty() {
        let ids: Vec<&str> = m.depends_on.iter().map(|i| i.as_str()).collect();
        println!("   Depends on:   {}", ids.join(", "));
    }
    if !m.affects.is_empty() {
        let ids: Vec<&str> = m.affects.iter().map(|i| i.as_str()).collect();
        println!("   Affects:      {}", ids.join(", "));
    }

    Ok(())
}

pub fn cmd_impact(service: &KpiService, id: &str, upstream: bool) -> Result<()> {
    let direction = if upstream {
        EdgeKind::DependsOn
    } else {
        EdgeKind::Affects
    };

    let reached = service
        .impact(id, direction)
        .with_context(|| format!("Failed to trace {}", id))?;

    println!();
    if upstream {
        println!("⬆️  Metrics influencing {}", id);
    } else {
        println!("⬇️  Metrics influenced by {}", id);
    }
    println!("   ─────────────────────────────────────────────────────────────");

    if reached.is_empty() {
        println!("   (none)");
        return Ok(());
    }

    let graph = service.store().snapshot();
    for r in reached {
        let name = graph
            .get_metric(r.id.as_str())
            .map(|m| m.name.clone())
            .unwrap_or_else(|_| r.id.to_string());
        println!("   {}{} ({})", "  ".repeat(r.depth - 1), name, r.id);
    }

    Ok(())
}
