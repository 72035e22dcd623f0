//! # Configuration State
//!
//! Editor configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TALLY_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization, so no mutex.

use serde::{Deserialize, Serialize};
use tally_core::listing::{PageQuery, Pagination};
use tally_core::{Money, DEFAULT_PER_PAGE};

/// Editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Base URL of the bookkeeping API, without trailing slash
    pub api_base_url: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency display
    pub currency_decimals: u8,

    /// Page size for list requests
    pub per_page: u32,

    /// Reject lines whose discount exceeds their subtotal on submit
    pub strict_discounts: bool,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - API: `http://localhost:8000/api`
    /// - Currency: `$` with 2 decimals
    /// - Page size: 10
    /// - Strict discounts: on
    fn default() -> Self {
        ConfigState {
            api_base_url: "http://localhost:8000/api".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            per_page: DEFAULT_PER_PAGE,
            strict_discounts: true,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `TALLY_API_URL`: API base URL
    /// - `TALLY_CURRENCY_SYMBOL`: currency symbol
    /// - `TALLY_CURRENCY_DECIMALS`: display decimals (0-4)
    /// - `TALLY_PER_PAGE`: list page size
    /// - `TALLY_STRICT_DISCOUNTS`: `true`/`false`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(url) = lookup("TALLY_API_URL") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(symbol) = lookup("TALLY_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(decimals) = lookup("TALLY_CURRENCY_DECIMALS") {
            match decimals.parse::<u8>() {
                Ok(d) if d <= 4 => config.currency_decimals = d,
                _ => tracing::warn!(%decimals, "Ignoring invalid TALLY_CURRENCY_DECIMALS"),
            }
        }

        if let Some(per_page) = lookup("TALLY_PER_PAGE") {
            match per_page.parse::<u32>() {
                Ok(n) if n > 0 => config.per_page = n,
                _ => tracing::warn!(%per_page, "Ignoring invalid TALLY_PER_PAGE"),
            }
        }

        if let Some(strict) = lookup("TALLY_STRICT_DISCOUNTS") {
            match strict.parse::<bool>() {
                Ok(b) => config.strict_discounts = b,
                Err(_) => tracing::warn!(%strict, "Ignoring invalid TALLY_STRICT_DISCOUNTS"),
            }
        }

        config
    }

    /// Formats a computed amount for display, rounding to cents first.
    ///
    /// ## Example
    /// ```rust
    /// use tally_editor::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_amount(103.5), "$103.50");
    /// ```
    pub fn format_amount(&self, amount: f64) -> String {
        Money::from_amount(amount).format_with(&self.currency_symbol, self.currency_decimals)
    }

    /// List request for the current page, sized by `per_page`.
    pub fn page_query(&self, pagination: &Pagination, search: &str) -> PageQuery {
        pagination.query(search, self.per_page)
    }

    /// Absolute URL of a collection or resource path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}
