//! Runtime configuration from the environment, plus the simulated latency profile.

use crate::fixtures::{DEMO_INVITE_CODE, DEMO_MEMBER_ADDRESS};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const MAX_LATENCY_SCALE: f64 = 100.0;

/// Artificial delays standing in for network / chain confirmation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Latency {
    pub fetch: Duration,
    pub connect: Duration,
    pub deposit: Duration,
    pub submit: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            fetch: Duration::from_millis(1000),
            connect: Duration::from_millis(1000),
            deposit: Duration::from_millis(2000),
            submit: Duration::from_millis(1500),
        }
    }
}

impl Latency {
    pub fn none() -> Self {
        Self {
            fetch: Duration::ZERO,
            connect: Duration::ZERO,
            deposit: Duration::ZERO,
            submit: Duration::ZERO,
        }
    }

    /// Default profile multiplied by `factor` (0 disables the delays).
    pub fn scaled(factor: f64) -> Self {
        let base = Self::default();
        let factor = if factor.is_finite() && factor > 0.0 { factor.min(MAX_LATENCY_SCALE) } else { 0.0 };
        Self {
            fetch: base.fetch.mul_f64(factor),
            connect: base.connect.mul_f64(factor),
            deposit: base.deposit.mul_f64(factor),
            submit: base.submit.mul_f64(factor),
        }
    }
}

/// Sleep for `delay`; a zero delay returns immediately.
pub(crate) async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub storage_path: PathBuf,
    pub latency: Latency,
    pub demo_address: String,
    pub demo_invite_code: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(".jamaeya"),
            latency: Latency::default(),
            demo_address: DEMO_MEMBER_ADDRESS.to_string(),
            demo_invite_code: DEMO_INVITE_CODE.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            storage_path: env::var("JAMAEYA_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            latency: env::var("JAMAEYA_LATENCY_SCALE")
                .ok()
                .and_then(|s| s.parse::<f64>().ok())
                .map(Latency::scaled)
                .unwrap_or(defaults.latency),
            demo_address: env::var("JAMAEYA_DEMO_ADDRESS")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.demo_address),
            demo_invite_code: env::var("JAMAEYA_DEMO_INVITE_CODE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.demo_invite_code),
        }
    }

    /// Same config without simulated delays. Used by tests.
    pub fn instant(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: storage_path.into(),
            latency: Latency::none(),
            ..Self::default()
        }
    }
}
