use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::dump::{DumpConfig, DumpTarget};
use crate::error::{ReltraceError, ReltraceResult};

/// What an engine reports back after accepting a dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpReport {
    pub id: Uuid,
    pub engine: String,
    pub accepted_at: DateTime<Utc>,
    pub summary: String,
}

/// The component that actually performs a dump. The wizard only produces
/// the [`DumpConfig`]; an engine takes it from there.
#[async_trait]
pub trait DumpEngine: Send + Sync {
    fn name(&self) -> &str;

    async fn execute(&self, config: &DumpConfig) -> ReltraceResult<DumpReport>;
}

/// Checks the configuration and accepts it for an external tool, without
/// touching any database or file.
pub struct HandoffEngine;

#[async_trait]
impl DumpEngine for HandoffEngine {
    fn name(&self) -> &str {
        "handoff"
    }

    async fn execute(&self, config: &DumpConfig) -> ReltraceResult<DumpReport> {
        config.validate().map_err(|e| ReltraceError::Engine {
            engine: self.name().to_string(),
            source: anyhow::anyhow!("{e}"),
        })?;

        let destination = match (config.target, &config.target_config) {
            (DumpTarget::ToDatabase, Some(target)) => target.describe(),
            _ if config.output_path.is_empty() => "default output file".to_string(),
            _ => config.output_path.clone(),
        };
        let summary = format!(
            "{} from {} to {}",
            config.mode,
            config.source_config.describe(),
            destination
        );

        let report = DumpReport {
            id: Uuid::new_v4(),
            engine: self.name().to_string(),
            accepted_at: Utc::now(),
            summary,
        };
        tracing::info!(id = %report.id, summary = %report.summary, "Dump configuration accepted");
        Ok(report)
    }
}
