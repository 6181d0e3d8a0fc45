//! Department and executive summary commands

use anyhow::{Context, Result};
use pulse_core::KpiService;

use super::truncate;

pub fn cmd_departments(service: &KpiService) -> Result<()> {
    let summary = service.department_summary();

    println!();
    println!("🏥 Department Health");
    println!("   ─────────────────────────────────────────────────────────────");

    for (name, dept) in &summary {
        let icon = if dept.critical_count > 0 {
            "🔴"
        } else if dept.health_score >= 100.0 {
            "🟢"
        } else {
            "🟡"
        };
        println!(
            "   {} {:28} │ health {:>5.1} │ {} KPIs, {} critical",
            icon,
            truncate(name, 28),
            dept.health_score,
            dept.total_kpis,
            dept.critical_count
        );
    }

    Ok(())
}

pub fn cmd_summary(service: &KpiService) -> Result<()> {
    let summary = service
        .executive_summary()
        .context("No KPI data found")?;

    println!();
    println!("📈 Executive Summary");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Total KPIs:        {}", summary.total_kpis);
    println!("   On target:         {}", summary.on_target);
    println!("   Below target:      {}", summary.below_target);
    println!("   Avg performance:   {:.2}", summary.avg_performance_ratio);

    Ok(())
}
