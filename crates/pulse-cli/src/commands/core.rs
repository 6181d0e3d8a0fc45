//! Shared command utilities
//!
//! - `load_service` - Build the KPI service from dataset and config

use std::path::Path;

use anyhow::{Context, Result};
use pulse_core::{Dataset, KpiService, PulseConfig, Reasoner};

/// Load config and dataset, returning a ready service
pub fn load_service(dataset_path: Option<&Path>, config: Option<&Path>) -> Result<KpiService> {
    let config = PulseConfig::load(config).context("Failed to load configuration")?;

    let dataset = match dataset_path {
        Some(path) => Dataset::load(path)
            .with_context(|| format!("Failed to read dataset {}", path.display()))?,
        None => Dataset::embedded().context("Failed to parse built-in dataset")?,
    };
    let store = dataset.into_store().context("Invalid dataset")?;

    tracing::debug!(
        dataset = %dataset_label(dataset_path),
        metrics = store.snapshot().get_all_metrics().len(),
        "Service ready"
    );

    Ok(KpiService::new(store, Reasoner::new(&config)))
}

fn dataset_label(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string())
}
