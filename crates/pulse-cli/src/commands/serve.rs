//! Server command implementation

use anyhow::Result;
use pulse_core::KpiService;

pub async fn cmd_serve(service: KpiService, host: &str, port: u16) -> Result<()> {
    println!("🚀 Starting Pulse web server...");
    println!("   Metrics: {}", service.metric_count());
    println!("   Listening: http://{}:{}", host, port);
    println!();
    println!("   Press Ctrl+C to stop");

    let allowed_origins: Vec<String> = std::env::var("PULSE_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let config = pulse_server::ServerConfig { allowed_origins };
    pulse_server::serve(service, host, port, config).await?;

    Ok(())
}
