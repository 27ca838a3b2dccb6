use serenity::builder::{CreateEmbed, CreateEmbedFooter};
use crate::models::{ConversionResult, ConversionRow, Currency, CurrencyCode, ExchangeRates};
use crate::services::selection_service::SelectionCoordinator;
use crate::utils::errors::AmountError;
use crate::utils::Table;

pub const MAX_INTEGER_DIGITS: usize = 20;
pub const MAX_FRACTION_DIGITS: usize = 4;

/// Validate and parse an amount typed by the user.
///
/// Accepts digits with one optional decimal separator (`.` or `,`).
/// Grouping separators are not supported.
pub fn parse_amount(input: &str) -> Result<f64, AmountError> {
    let input = input.trim();
    let mut integer = String::new();
    let mut fraction = String::new();
    let mut seen_separator = false;

    for c in input.chars() {
        match c {
            '0'..='9' if seen_separator => fraction.push(c),
            '0'..='9' => integer.push(c),
            '.' | ',' if seen_separator => return Err(AmountError::MultipleSeparators),
            '.' | ',' => seen_separator = true,
            other => return Err(AmountError::InvalidCharacter(other)),
        }
    }

    if integer.is_empty() && fraction.is_empty() {
        return Err(AmountError::Empty);
    }
    if integer.len() > MAX_INTEGER_DIGITS {
        return Err(AmountError::TooManyIntegerDigits { max: MAX_INTEGER_DIGITS });
    }
    if fraction.len() > MAX_FRACTION_DIGITS {
        return Err(AmountError::TooManyFractionDigits { max: MAX_FRACTION_DIGITS });
    }

    let integer = if integer.is_empty() { "0".to_string() } else { integer };
    let fraction = if fraction.is_empty() { "0".to_string() } else { fraction };

    format!("{}.{}", integer, fraction)
        .parse::<f64>()
        .map_err(|_| AmountError::Empty)
}

/// Convert `amount` of the focused currency into every active currency.
///
/// Rows follow the active order. A row has no amount when either side
/// lacks a rate; the focused row always echoes the input.
pub fn run_conversions(
    active: &[Currency],
    focused: &Currency,
    amount: f64,
    rates: &ExchangeRates,
) -> ConversionResult {
    let rows = active
        .iter()
        .map(|currency| {
            let is_focused = currency.code == focused.code;
            let hint = if is_focused {
                Some(1.0)
            } else {
                rates.cross_rate(&focused.code, &currency.code)
            };

            ConversionRow {
                code: currency.code.clone(),
                is_focused,
                amount: if is_focused { Some(amount) } else { hint.map(|rate| amount * rate) },
                hint,
            }
        })
        .collect();

    ConversionResult {
        focused: focused.code.clone(),
        input: amount,
        rows,
        rates_timestamp: rates.timestamp,
    }
}

/// Convert `amount` of the coordinator's focused currency
pub fn convert_active(
    coordinator: &SelectionCoordinator,
    amount: f64,
    rates: &ExchangeRates,
) -> Result<ConversionResult, String> {
    let focused = coordinator
        .focused()
        .ok_or("Your active list is empty. Add a currency with `$add <CODE>` first.".to_string())?;

    Ok(run_conversions(coordinator.active().as_slice(), focused, amount, rates))
}

/// Focus `code`, then convert. Nothing changes if the focus fails.
pub fn focus_and_convert(
    coordinator: &mut SelectionCoordinator,
    code: &CurrencyCode,
    amount: f64,
    rates: &ExchangeRates,
) -> Result<ConversionResult, String> {
    coordinator.focus(code).map_err(|e| e.to_string())?;
    convert_active(coordinator, amount, rates)
}

/// Format an amount for display: thousands grouped, two decimals from 1 up,
/// four significant fractional digits below 1.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }

    let magnitude = value.abs();
    let decimals = if magnitude == 0.0 || magnitude >= 1.0 {
        2
    } else {
        let leading_zeros = (-magnitude.log10()).floor() as usize;
        (leading_zeros + 4).min(10)
    };

    let formatted = format!("{:.*}", decimals, magnitude);
    let (integer, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), ""));

    let mut fraction = fraction.trim_end_matches('0').to_string();
    while fraction.len() < 2 {
        fraction.push('0');
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, group_thousands(integer), fraction)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Table of converted amounts, focused row marked with `*`
pub fn render_conversion_table(result: &ConversionResult) -> String {
    let mut table = Table::new(vec!["Code", "Amount", "Per 1 unit"])
        .align_right(1)
        .align_right(2);

    for row in &result.rows {
        let code = if row.is_focused { format!("{}*", row.code) } else { row.code.to_string() };
        let amount = row.amount.map(format_amount).unwrap_or_else(|| "n/a".to_string());
        let hint = row.hint.map(format_amount).unwrap_or_else(|| "n/a".to_string());
        table.add_row(vec![code, amount, hint]);
    }

    table.render()
}

pub fn create_conversion_embed(result: &ConversionResult) -> CreateEmbed {
    let missing: Vec<String> = result
        .rows
        .iter()
        .filter(|row| row.amount.is_none())
        .map(|row| row.code.to_string())
        .collect();

    let mut embed = CreateEmbed::default()
        .title(format!("💱 {} {}", format_amount(result.input), result.focused))
        .description(render_conversion_table(result))
        .footer(CreateEmbedFooter::new(format!(
            "Rates as of {}",
            result.rates_timestamp.format("%Y-%m-%d %H:%M UTC")
        )))
        .color(0x00ff00);

    if !missing.is_empty() {
        embed = embed.field("No rate available", missing.join(", "), false);
    }

    embed
}
