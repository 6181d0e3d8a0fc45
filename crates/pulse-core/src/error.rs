//! Error types for Pulse

use thiserror::Error;

use crate::reasoner::Phase;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid relation: {0}")]
    InvalidRelation(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Missing data for metric {metric}: {reason}")]
    MissingData { metric: String, reason: String },

    #[error("No classifiable KPI data found")]
    NoData,

    #[error("Rule {rule} references unknown metric {metric}")]
    RuleConfig { rule: String, metric: String },

    #[error("Reasoning failed during {phase}: {source}")]
    Reasoning {
        phase: Phase,
        #[source]
        source: Box<Error>,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Wrap an error with the reasoning phase it surfaced in
    pub fn in_phase(self, phase: Phase) -> Self {
        match self {
            // Keep the innermost phase when errors bubble through nested calls
            Error::Reasoning { .. } => self,
            other => Error::Reasoning {
                phase,
                source: Box::new(other),
            },
        }
    }

    /// True for errors caused by an unknown entity id, at any nesting depth
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound(_) | Error::RuleConfig { .. } => true,
            Error::Reasoning { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
