//! Runtime configuration.

use chrono::TimeDelta;
use clap::Parser;
use rust_decimal::Decimal;

/// Longest accepted cart TTL, roughly ten years.
pub const MAX_CART_TTL_DAYS: u32 = 3650;

/// Food market core configuration, from CLI flags or `MARKET_*` environment variables.
#[derive(Debug, Clone, Parser)]
#[command(name = "food-market", about = "Food marketplace core demo", long_about = None)]
pub struct MarketConfig {
    /// Capacity of each actor's request channel
    #[arg(long, env = "MARKET_CHANNEL_BUFFER", default_value_t = 32)]
    pub channel_buffer: usize,

    /// Days a cart survives without being modified
    #[arg(long, env = "MARKET_CART_TTL_DAYS", default_value_t = 7)]
    pub cart_ttl_days: u32,

    /// Tax rate applied to the order subtotal, as a fraction (0.08 for 8%)
    #[arg(long, env = "MARKET_TAX_RATE", default_value = "0")]
    pub tax_rate: Decimal,

    /// Secret internal services present to act on behalf of a user; unset disables them
    #[arg(long, env = "MARKET_INTERNAL_SECRET", hide_env_values = true)]
    pub internal_secret: Option<String>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            cart_ttl_days: 7,
            tax_rate: Decimal::ZERO,
            internal_secret: None,
        }
    }
}

impl MarketConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed or a value is out of range
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        let config = Self::try_parse()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), clap::Error> {
        use clap::error::ErrorKind;

        if self.channel_buffer == 0 {
            return Err(clap::Error::raw(
                ErrorKind::ValueValidation,
                "channel buffer must be at least 1\n",
            ));
        }
        if !(1..=MAX_CART_TTL_DAYS).contains(&self.cart_ttl_days) {
            return Err(clap::Error::raw(
                ErrorKind::ValueValidation,
                format!("cart TTL must be between 1 and {MAX_CART_TTL_DAYS} days\n"),
            ));
        }
        if self.tax_rate < Decimal::ZERO || self.tax_rate > Decimal::ONE {
            return Err(clap::Error::raw(
                ErrorKind::ValueValidation,
                "tax rate must be between 0 and 1\n",
            ));
        }
        Ok(())
    }

    pub fn cart_ttl(&self) -> TimeDelta {
        TimeDelta::days(i64::from(self.cart_ttl_days))
    }
}
