use super::ui;
use crate::core::converter::{AMOUNT_DECIMALS, RATE_DECIMALS};
use crate::core::{
    AmountInput, ConversionRequest, ConversionResult, ConvertError, Converter, RateQuote,
    RateTable,
};
use anyhow::{Result, anyhow};
use comfy_table::Cell;

const AMOUNT_WIDTH: usize = AMOUNT_DECIMALS as usize;
const RATE_WIDTH: usize = RATE_DECIMALS as usize;

fn into_anyhow(err: ConvertError) -> anyhow::Error {
    anyhow!("{err} ({})", err.detail())
}

pub fn display_rate_table(table: &RateTable) -> String {
    let base = table.base();
    let mut out = ui::new_styled_table();
    out.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Per 1 {base}")),
        ui::header_cell(&format!("In {base}")),
    ]);

    for entry in table.entries() {
        out.add_row(vec![
            Cell::new(&entry.code),
            ui::number_cell(entry.rate, RATE_WIDTH),
            ui::number_cell(1.0 / entry.rate, RATE_WIDTH),
        ]);
    }

    format!(
        "{}\n{}",
        ui::style_text("Exchange rates", ui::StyleType::Title),
        out
    )
}

pub fn display_rate(quote: &RateQuote) -> String {
    let mut out = ui::new_styled_table();
    out.set_header(vec![
        ui::header_cell("From"),
        ui::header_cell("To"),
        ui::header_cell("Rate"),
    ]);
    out.add_row(vec![
        Cell::new(&quote.from),
        Cell::new(&quote.to),
        ui::result_cell(quote.rate, RATE_WIDTH),
    ]);
    out.to_string()
}

pub fn display_conversion(result: &ConversionResult) -> String {
    let mut out = ui::new_styled_table();
    out.set_header(vec![
        ui::header_cell(&format!("Amount ({})", result.from_currency)),
        ui::header_cell(&format!("Converted ({})", result.to_currency)),
        ui::header_cell("Rate"),
    ]);
    out.add_row(vec![
        ui::number_cell(result.original_amount, AMOUNT_WIDTH),
        ui::result_cell(result.converted_amount, AMOUNT_WIDTH),
        ui::number_cell(result.exchange_rate, RATE_WIDTH),
    ]);
    let summary = format!(
        "{} {} = {} {}",
        result.original_amount,
        result.from_currency,
        ui::style_text(
            &format!("{:.prec$}", result.converted_amount, prec = AMOUNT_WIDTH),
            ui::StyleType::Value
        ),
        result.to_currency
    );
    format!(
        "{out}\n{}",
        ui::style_text(&summary, ui::StyleType::Subtle)
    )
}

pub fn currencies(converter: &Converter) -> Result<()> {
    println!("{}", display_rate_table(converter.table()));
    Ok(())
}

pub fn rate(converter: &Converter, from: &str, to: &str) -> Result<()> {
    let quote = converter.rate_of(from, to).map_err(into_anyhow)?;
    println!("{}", display_rate(&quote));
    Ok(())
}

pub fn convert(converter: &Converter, amount: &str, from: &str, to: &str) -> Result<()> {
    let request = ConversionRequest {
        amount: Some(AmountInput::Text(amount.to_string())),
        from: Some(from.to_string()),
        to: Some(to.to_string()),
    };
    let result = converter.convert(&request).map_err(into_anyhow)?;
    println!("{}", display_conversion(&result));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rate_table_lists_every_currency() {
        let table = RateTable::default();
        let output = display_rate_table(&table);
        for code in table.codes() {
            assert!(output.contains(code), "missing {code}");
        }
        assert!(output.contains("110.0000"));
        assert!(output.contains("Per 1 USD"));
    }

    #[test]
    fn test_display_conversion() {
        let converter = Converter::default();
        let result = converter
            .convert(&ConversionRequest::new(100.0, "EUR", "USD"))
            .unwrap();
        let output = display_conversion(&result);
        assert!(output.contains("117.65"));
        assert!(output.contains("1.1765"));
        assert!(output.contains("Amount (EUR)"));
    }

    #[test]
    fn test_display_rate() {
        let quote = Converter::default().rate_of("USD", "JPY").unwrap();
        assert!(display_rate(&quote).contains("110.0000"));
    }

    #[test]
    fn test_cli_errors_keep_detail() {
        let converter = Converter::default();
        let err = convert(&converter, "ten", "USD", "EUR").unwrap_err();
        assert!(err.to_string().contains("required"));
        assert!(err.to_string().contains("ten"));

        let err = rate(&converter, "USD", "XYZ").unwrap_err();
        assert!(err.to_string().contains("Invalid currency code"));
    }
}
