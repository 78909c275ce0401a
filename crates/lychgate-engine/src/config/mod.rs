//! Access config loader (strict parsing).

pub mod schema;

use std::fs;

use lychgate_core::{AccessError, Result};

pub use schema::{AccessConfig, CacheSection, UpstreamSection};

pub fn load_from_file(path: &str) -> Result<AccessConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| AccessError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AccessConfig> {
    let cfg: AccessConfig = serde_yaml::from_str(s)
        .map_err(|e| AccessError::Configuration(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
