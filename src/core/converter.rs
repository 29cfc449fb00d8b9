//! Pairwise rates and amount conversion over a [`RateTable`].

use super::error::ConvertError;
use super::rates::RateTable;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const AMOUNT_DECIMALS: u32 = 2;
pub const RATE_DECIMALS: u32 = 4;

/// 2^52: every finite `f64` at or above this magnitude is a whole number.
const WHOLE_NUMBER_THRESHOLD: f64 = 4_503_599_627_370_496.0;

/// An amount as it arrives on the wire: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    fn is_blank(&self) -> bool {
        matches!(self, AmountInput::Text(s) if s.trim().is_empty())
    }

    fn parse(&self) -> Result<f64, ConvertError> {
        let value = match self {
            AmountInput::Number(n) => *n,
            AmountInput::Text(s) => s.trim().parse::<f64>().map_err(|e| {
                ConvertError::Validation(format!("amount {s:?} is not a number: {e}"))
            })?,
        };
        if !value.is_finite() {
            return Err(ConvertError::Validation(format!(
                "amount {value} is not a finite number"
            )));
        }
        Ok(value)
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Number(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ConversionRequest {
    #[serde(default)]
    pub amount: Option<AmountInput>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

impl ConversionRequest {
    pub fn new(amount: impl Into<AmountInput>, from: &str, to: &str) -> Self {
        Self {
            amount: Some(amount.into()),
            from: Some(from.to_string()),
            to: Some(to.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub original_amount: f64,
    pub from_currency: String,
    pub to_currency: String,
    pub converted_amount: f64,
    pub exchange_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub from: String,
    pub to: String,
    pub rate: f64,
}

/// Rounds half away from zero, working on the exact binary value of `value`.
///
/// The result is the `f64` nearest to the rounded decimal text. Magnitudes of
/// 2^52 and above carry no fractional bits and are returned unchanged.
pub fn round_to(value: f64, decimals: u32) -> Option<f64> {
    if value.abs() >= WHOLE_NUMBER_THRESHOLD {
        return Some(value);
    }
    Decimal::from_f64_retain(value)?
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
        .to_string()
        .parse()
        .ok()
}

#[derive(Debug, Clone, Default)]
pub struct Converter {
    table: RateTable,
}

impl Converter {
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }

    pub fn currencies(&self) -> Vec<String> {
        self.table.codes().map(str::to_string).collect()
    }

    pub fn rate_of(&self, from: &str, to: &str) -> Result<RateQuote, ConvertError> {
        let (from_rate, to_rate) = self.lookup_pair(from, to)?;
        let rate = rounded(to_rate / from_rate, RATE_DECIMALS, "rate")?;
        debug!(from, to, rate, "Computed pairwise rate");

        Ok(RateQuote {
            from: from.to_string(),
            to: to.to_string(),
            rate,
        })
    }

    pub fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, ConvertError> {
        let (amount, from, to) = match (&request.amount, &request.from, &request.to) {
            (Some(amount), Some(from), Some(to))
                if !amount.is_blank() && !from.is_empty() && !to.is_empty() =>
            {
                (amount, from.as_str(), to.as_str())
            }
            _ => {
                return Err(ConvertError::Validation(format!(
                    "missing required field in {request:?}"
                )));
            }
        };

        let amount = amount.parse()?;
        let (from_rate, to_rate) = self.lookup_pair(from, to)?;

        let converted = amount / from_rate * to_rate;
        let converted_amount = rounded(converted, AMOUNT_DECIMALS, "converted amount")?;
        let exchange_rate = rounded(to_rate / from_rate, RATE_DECIMALS, "exchange rate")?;
        debug!(amount, from, to, converted_amount, exchange_rate, "Converted amount");

        Ok(ConversionResult {
            original_amount: amount,
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            converted_amount,
            exchange_rate,
        })
    }

    fn lookup_pair(&self, from: &str, to: &str) -> Result<(f64, f64), ConvertError> {
        let lookup = |code: &str| {
            self.table
                .get(code)
                .ok_or_else(|| ConvertError::InvalidCurrency(format!("unknown currency {code:?}")))
        };
        Ok((lookup(from)?, lookup(to)?))
    }
}

fn rounded(value: f64, decimals: u32, what: &str) -> Result<f64, ConvertError> {
    if !value.is_finite() {
        return Err(ConvertError::Internal(format!("{what} is not finite: {value}")));
    }
    round_to(value, decimals)
        .ok_or_else(|| ConvertError::Internal(format!("{what} cannot be rounded: {value}")))
}
