use std::{fs::File, io::BufReader, path::Path, time::Duration};

use anyhow::Context as _;

use crate::foundation::error::{PaintError, PaintResult};

/// Engine-wide tunables. Missing JSON fields take their defaults.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Spray timer period in milliseconds.
    pub spray_period_ms: u64,
    /// Spray jitter radius in pixels; offsets are drawn from `[-r, r)` on both axes.
    pub spray_jitter_px: f64,
    /// Seed for the default jitter generator.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            spray_period_ms: 100,
            spray_jitter_px: 5.0,
            seed: 0,
        }
    }
}

impl EngineConfig {
    /// Spray timer period.
    pub fn spray_period(&self) -> Duration {
        Duration::from_millis(self.spray_period_ms)
    }

    /// Check value ranges.
    pub fn validate(&self) -> PaintResult<()> {
        if self.spray_period_ms == 0 {
            return Err(PaintError::validation("spray_period_ms must be > 0"));
        }
        if !self.spray_jitter_px.is_finite() || self.spray_jitter_px < 0.0 {
            return Err(PaintError::validation(
                "spray_jitter_px must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json(s: &str) -> PaintResult<Self> {
        let cfg: Self = serde_json::from_str(s).context("parse engine config JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> PaintResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open engine config '{}'", path.display()))?;
        let cfg: Self =
            serde_json::from_reader(BufReader::new(f)).context("parse engine config JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }
}
