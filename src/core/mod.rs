//! Core business logic: the rate table, conversion rules and configuration

pub mod config;
pub mod converter;
pub mod error;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use converter::{AmountInput, ConversionRequest, ConversionResult, Converter, RateQuote};
pub use error::ConvertError;
pub use rates::{CurrencyRate, RateTable};
