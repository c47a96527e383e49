//! Concrete adapters the CLI can fuzz.

use anyhow::{bail, Context, Result};
use echoprobe::{Adapter, AdapterError, MemoryCell};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Where `--target` points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    Memory,
    Http(String),
}

impl FromStr for TargetSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "memory" {
            return Ok(TargetSpec::Memory);
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            return Ok(TargetSpec::Http(s.trim_end_matches('/').to_string()));
        }
        bail!(
            "Unknown target '{}': expected 'memory' or an http(s):// base URL",
            s
        )
    }
}

impl TargetSpec {
    /// Build the adapter, failing if the target cannot be reached
    pub fn connect(&self, timeout: Duration) -> Result<Box<dyn Adapter<i64>>> {
        match self {
            TargetSpec::Memory => Ok(Box::new(MemoryCell::<i64>::new())),
            TargetSpec::Http(base) => Ok(Box::new(HttpTarget::connect(base, timeout)?)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ValueBody {
    value: i64,
}

/// Adapter for a server exposing `PUT /value` and `GET /value`
///
/// Each request is bounded by the client timeout, so a hung target turns
/// into an adapter error instead of stalling the run.
pub struct HttpTarget {
    client: Client,
    base: String,
}

impl HttpTarget {
    pub fn connect(base: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let health = format!("{}/health", base);
        client
            .get(&health)
            .send()
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("Target unreachable at {}", health))?;
        info!("Connected to target at {}", base);

        Ok(Self {
            client,
            base: base.to_string(),
        })
    }

    fn value_url(&self) -> String {
        format!("{}/value", self.base)
    }
}

impl Adapter<i64> for HttpTarget {
    fn write(&mut self, value: &i64) -> Result<(), AdapterError> {
        debug!("PUT {} <- {}", self.value_url(), value);
        self.client
            .put(self.value_url())
            .json(&ValueBody { value: *value })
            .send()
            .and_then(|r| r.error_for_status())
            .map(|_| ())
            .map_err(|e| AdapterError::from_error(&e))
    }

    fn read(&mut self) -> Result<i64, AdapterError> {
        self.client
            .get(self.value_url())
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json::<ValueBody>())
            .map(|body| body.value)
            .map_err(|e| AdapterError::from_error(&e))
    }
}
