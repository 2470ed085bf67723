//! Engine policy configuration
//!
//! The refund split is deliberately a policy parameter rather than a
//! hardcoded constant: the source marketplace never clarified whether the
//! retained cancellation fee accrues to the host or the platform.
//! Configuration can be loaded from environment variables and config files,
//! or constructed directly by the embedding application.

use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Top-level engine policy configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PolicyConfig {
    #[serde(default)]
    pub refund: RefundPolicy,
}

/// Refund settlement policy
#[derive(Debug, Deserialize, Clone)]
pub struct RefundPolicy {
    /// Percentage of the total refunded to the guest on a
    /// guest-initiated cancellation of a confirmed booking.
    #[serde(default = "default_cancellation_refund_percent")]
    pub cancellation_refund_percent: Decimal,

    /// Share of the retained cancellation fee that accrues to the host
    /// (the remainder is the platform's). 100 = all to the host.
    #[serde(default = "default_host_retention_percent")]
    pub host_retention_percent: Decimal,
}

fn default_cancellation_refund_percent() -> Decimal {
    Decimal::from(90)
}

fn default_host_retention_percent() -> Decimal {
    Decimal::from(100)
}

impl Default for RefundPolicy {
    fn default() -> Self {
        Self {
            cancellation_refund_percent: default_cancellation_refund_percent(),
            host_retention_percent: default_host_retention_percent(),
        }
    }
}

impl RefundPolicy {
    /// Reject percentages outside [0, 100].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hundred = Decimal::from(100);
        if self.cancellation_refund_percent < Decimal::ZERO
            || self.cancellation_refund_percent > hundred
        {
            return Err(ConfigError::Message(format!(
                "cancellation_refund_percent out of range: {}",
                self.cancellation_refund_percent
            )));
        }
        if self.host_retention_percent < Decimal::ZERO || self.host_retention_percent > hundred {
            return Err(ConfigError::Message(format!(
                "host_retention_percent out of range: {}",
                self.host_retention_percent
            )));
        }
        Ok(())
    }
}

impl PolicyConfig {
    /// Load configuration from an optional config file and environment
    /// variables with the `STAYBOOK` prefix.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/staybook").required(false))
            .add_source(
                Environment::with_prefix("STAYBOOK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let policy: PolicyConfig = config.try_deserialize()?;
        policy.refund.validate()?;
        Ok(policy)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder().add_source(File::with_name(path)).build()?;

        let policy: PolicyConfig = config.try_deserialize()?;
        policy.refund.validate()?;
        Ok(policy)
    }
}
