//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Notification configuration.
    pub notification: NotificationConfig,
    /// Budget configuration.
    pub budget: BudgetConfig,
}

/// Settings carried on outbound notification payloads.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Display name used as the sender identity.
    #[serde(default = "default_company_name")]
    pub company_name: String,
    /// Sender address handed to the delivery collaborator.
    #[serde(default = "default_from_email")]
    pub from_email: String,
    /// Prefix for payment references on settlement requests.
    #[serde(default = "default_payment_reference_prefix")]
    pub payment_reference_prefix: String,
}

fn default_company_name() -> String {
    "Splitledger".to_string()
}

fn default_from_email() -> String {
    "noreply@splitledger.app".to_string()
}

fn default_payment_reference_prefix() -> String {
    "SPLIT".to_string()
}

/// Monthly budget configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetConfig {
    /// Monthly budget applied when a user profile carries none.
    #[serde(default = "default_monthly_budget")]
    pub default_monthly_budget: Decimal,
}

fn default_monthly_budget() -> Decimal {
    Decimal::ZERO
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SPLITLEDGER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            notification: NotificationConfig {
                company_name: default_company_name(),
                from_email: default_from_email(),
                payment_reference_prefix: default_payment_reference_prefix(),
            },
            budget: BudgetConfig {
                default_monthly_budget: default_monthly_budget(),
            },
        }
    }
}
