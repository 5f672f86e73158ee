//! # Prompt Helpers
//!
//! Line-oriented console input with graceful re-prompting.
//!
//! ## Parsing Policy
//! Garbage numeric input (letters where a quantity should be, three
//! decimal places in a price) is never fatal: the helper prints what
//! went wrong and asks again. Only a closed stdin ends the loop.
//!
//! Money and discounts are parsed here, at the very edge, into the
//! integer representations the rest of the system uses - `parse_money`
//! and `parse_discount` are the only places raw decimal text is read.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use shopkeep_core::{DiscountRate, Money};

use crate::error::{CliError, CliResult};

/// Prints a prompt (no newline) and reads one trimmed line.
///
/// ## Errors
/// `InputClosed` on EOF - the caller unwinds to a clean exit.
pub fn read_line(prompt: &str) -> CliResult<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    let n = io::stdin().lock().read_line(&mut line)?;
    if n == 0 {
        return Err(CliError::InputClosed);
    }
    Ok(line.trim().to_string())
}

/// Prompts until the input parses as `T`.
///
/// Used for product ids and quantities. Parse failures are reported and
/// re-prompted; they never abort the session.
pub fn read_parse<T: FromStr>(prompt: &str) -> CliResult<T> {
    loop {
        let line = read_line(prompt)?;
        match line.parse::<T>() {
            Ok(value) => return Ok(value),
            Err(_) => println!("Invalid number '{}', please try again.", line),
        }
    }
}

/// Prompts until the input parses as a non-negative decimal price.
pub fn read_money(prompt: &str) -> CliResult<Money> {
    loop {
        let line = read_line(prompt)?;
        match parse_money(&line) {
            Some(money) => return Ok(money),
            None => println!(
                "Invalid price '{}': expected an amount like 12 or 12.99.",
                line
            ),
        }
    }
}

/// Prompts until the input parses as a percentage in [0, 100].
pub fn read_discount(prompt: &str) -> CliResult<DiscountRate> {
    loop {
        let line = read_line(prompt)?;
        match parse_discount(&line) {
            Some(rate) => return Ok(rate),
            None => println!(
                "Invalid discount '{}': expected a percentage between 0 and 100.",
                line
            ),
        }
    }
}

// =============================================================================
// Pure Parsers
// =============================================================================

/// Largest unit amount a prompt accepts ($9,999,999,999).
///
/// Keeps every derived value (cents, line totals at quantity 999, cart
/// subtotals across 100 lines) far away from i64 overflow.
const MAX_PRICE_UNITS: i64 = 9_999_999_999;

/// Parses a decimal amount like `12`, `12.5` or `12.99` into cents.
///
/// Rejects negatives, more than two decimal places, amounts above
/// [`MAX_PRICE_UNITS`], and anything that isn't digits around an
/// optional single dot. Exact by construction - no float ever touches
/// the amount.
pub fn parse_money(input: &str) -> Option<Money> {
    let input = input.trim();
    if input.is_empty() || input.starts_with('-') || input.starts_with('+') {
        return None;
    }

    let (units_part, cents_part) = match input.split_once('.') {
        Some((units, frac)) => (units, frac),
        None => (input, ""),
    };

    if units_part.is_empty() || !units_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if cents_part.len() > 2 || !cents_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let units: i64 = units_part.parse().ok()?;
    if units > MAX_PRICE_UNITS {
        return None;
    }
    let cents: i64 = if cents_part.is_empty() {
        0
    } else if cents_part.len() == 1 {
        // "12.5" means 50 cents, not 5
        cents_part.parse::<i64>().ok()? * 10
    } else {
        cents_part.parse().ok()?
    };

    Some(Money::from_major_minor(units, cents))
}

/// Parses a percentage like `0`, `25` or `12.5` into a discount rate.
///
/// Range-checked here so an out-of-range discount is caught at the
/// prompt; `validate_discount` guards the same rule inside the store.
pub fn parse_discount(input: &str) -> Option<DiscountRate> {
    let pct: f64 = input.trim().parse().ok()?;
    if !(0.0..=100.0).contains(&pct) {
        return None;
    }
    Some(DiscountRate::from_percentage(pct))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_money_whole_amounts() {
        assert_eq!(parse_money("12"), Some(Money::from_cents(1200)));
        assert_eq!(parse_money("0"), Some(Money::from_cents(0)));
        assert_eq!(parse_money(" 7 "), Some(Money::from_cents(700)));
    }

    #[test]
    fn test_parse_money_decimals() {
        assert_eq!(parse_money("12.99"), Some(Money::from_cents(1299)));
        assert_eq!(parse_money("12.5"), Some(Money::from_cents(1250)));
        assert_eq!(parse_money("0.05"), Some(Money::from_cents(5)));
        assert_eq!(parse_money("12."), Some(Money::from_cents(1200)));
    }

    #[test]
    fn test_parse_money_rejects_garbage() {
        assert_eq!(parse_money(""), None);
        assert_eq!(parse_money("abc"), None);
        assert_eq!(parse_money("-5"), None);
        assert_eq!(parse_money("+5"), None);
        assert_eq!(parse_money("12.999"), None); // sub-cent precision
        assert_eq!(parse_money("1.2.3"), None);
        assert_eq!(parse_money(".99"), None);
        assert_eq!(parse_money("1e3"), None);
    }

    #[test]
    fn test_parse_money_caps_the_amount() {
        assert_eq!(
            parse_money("9999999999.99"),
            Some(Money::from_cents(999_999_999_999))
        );
        // One unit over the cap, and an 18-digit amount whose cents
        // arithmetic would no longer be safe
        assert_eq!(parse_money("10000000000"), None);
        assert_eq!(parse_money("999999999999999999"), None);
    }

    #[test]
    fn test_parse_discount() {
        assert_eq!(parse_discount("0"), Some(DiscountRate::from_bps(0)));
        assert_eq!(parse_discount("25"), Some(DiscountRate::from_bps(2500)));
        assert_eq!(parse_discount("12.5"), Some(DiscountRate::from_bps(1250)));
        assert_eq!(parse_discount("100"), Some(DiscountRate::from_bps(10000)));
    }

    #[test]
    fn test_parse_discount_rejects_out_of_range() {
        assert_eq!(parse_discount("101"), None);
        assert_eq!(parse_discount("-1"), None);
        assert_eq!(parse_discount("ten"), None);
    }
}
