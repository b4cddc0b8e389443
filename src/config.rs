//! Storefront configuration

use std::{num::NonZeroU32, path::PathBuf};

use clap::{Args, Parser};
use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    checkout::CheckoutPolicy,
    pricing::{PricingError, major_to_minor},
};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Command line or environment could not be parsed
    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// A configured amount could not be converted to minor units
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Checkout pricing settings, in major currency units.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// Tax rate applied to the subtotal ("18%" or "0.18")
    #[arg(long, env = "STOREFRONT_TAX_RATE", default_value = "18%", value_parser = parse_percentage)]
    pub tax_rate: Percentage,

    /// Flat shipping fee
    #[arg(long, env = "STOREFRONT_SHIPPING_FEE", default_value = "49")]
    pub shipping_fee: Decimal,

    /// Subtotal at or above which shipping is free
    #[arg(long, env = "STOREFRONT_FREE_SHIPPING_THRESHOLD", default_value = "699")]
    pub free_shipping_threshold: Option<Decimal>,

    /// Maximum units of one product per cart line (uncapped when unset)
    #[arg(long, env = "STOREFRONT_MAX_QUANTITY")]
    pub max_quantity: Option<NonZeroU32>,
}

impl CheckoutConfig {
    /// Checkout policy in `currency`'s minor units.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount is negative or too large.
    pub fn policy(&self, currency: &Currency) -> Result<CheckoutPolicy, ConfigError> {
        let free_shipping_threshold_minor = self
            .free_shipping_threshold
            .map(|threshold| major_to_minor(threshold, currency))
            .transpose()?;

        Ok(CheckoutPolicy {
            tax_rate: self.tax_rate,
            shipping_fee_minor: major_to_minor(self.shipping_fee, currency)?,
            free_shipping_threshold_minor,
        })
    }
}

/// Storefront configuration
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront cart and checkout", long_about = None)]
pub struct StorefrontConfig {
    /// Catalog file (JSON or YAML)
    #[arg(short, long, env = "STOREFRONT_CATALOG", default_value = "fixtures/catalog.json")]
    pub catalog: PathBuf,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Checkout pricing settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,
}

impl StorefrontConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Ok(Self::try_parse()?)
    }
}

/// Parse percentage string (e.g., "15%" or "0.15") into a `Percentage`
///
/// # Errors
///
/// Returns an error if the string cannot be parsed.
pub fn parse_percentage(s: &str) -> Result<Percentage, ConfigError> {
    let trimmed = s.trim();

    if let Some(percent_str) = trimmed.strip_suffix('%') {
        let value = percent_str
            .trim()
            .parse::<f64>()
            .map_err(|_err| ConfigError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value / 100.0))
    } else {
        let value = trimmed
            .parse::<f64>()
            .map_err(|_err| ConfigError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value))
    }
}
