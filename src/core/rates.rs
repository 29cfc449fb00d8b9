//! Static exchange-rate table

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const BASE_CURRENCY: &str = "USD";

/// Rates relative to USD, in the order they are listed to clients.
const DEFAULT_RATES: [(&str, f64); 14] = [
    ("USD", 1.0),
    ("EUR", 0.85),
    ("GBP", 0.73),
    ("JPY", 110.0),
    ("INR", 74.5),
    ("CAD", 1.25),
    ("AUD", 1.35),
    ("CHF", 0.92),
    ("CNY", 6.45),
    ("AED", 3.67),
    ("PKR", 160.0),
    ("BDT", 85.0),
    ("LKR", 200.0),
    ("NPR", 120.0),
];

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CurrencyRate {
    pub code: String,
    pub rate: f64,
}

/// An immutable mapping from currency code to a rate against the base currency.
///
/// Entries keep their insertion order. Lookups are exact and case-sensitive.
#[derive(Debug, Clone)]
pub struct RateTable {
    base: String,
    entries: Vec<CurrencyRate>,
}

impl RateTable {
    /// Builds a table after checking that every rate is finite and positive,
    /// that codes are unique and that `base` is present with a rate of exactly 1.0.
    pub fn new(base: &str, entries: Vec<CurrencyRate>) -> Result<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.code.trim().is_empty() {
                bail!("Currency code must not be empty");
            }
            if !seen.insert(entry.code.as_str()) {
                bail!("Duplicate currency code: {}", entry.code);
            }
            if !entry.rate.is_finite() || entry.rate <= 0.0 {
                bail!(
                    "Rate for {} must be a finite positive number, got {}",
                    entry.code,
                    entry.rate
                );
            }
        }

        match entries.iter().find(|e| e.code == base) {
            Some(e) if e.rate == 1.0 => {}
            Some(e) => bail!("Base currency {} must have a rate of 1.0, got {}", base, e.rate),
            None => bail!("Base currency {} is missing from the rate table", base),
        }

        Ok(Self {
            base: base.to_string(),
            entries,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.code == code).map(|e| e.rate)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.code.as_str())
    }

    pub fn entries(&self) -> &[CurrencyRate] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            base: BASE_CURRENCY.to_string(),
            entries: default_rates(),
        }
    }
}

pub fn default_rates() -> Vec<CurrencyRate> {
    DEFAULT_RATES
        .iter()
        .map(|(code, rate)| CurrencyRate {
            code: code.to_string(),
            rate: *rate,
        })
        .collect()
}
