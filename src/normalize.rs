use regex::Regex;
use std::sync::OnceLock;

use crate::utils::error::{AppError, Result};

fn number_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").unwrap())
}

/// Parse a European-formatted price string into a float.
///
/// `.` is a thousands separator, `,` the decimal separator, so
/// `"1.299,50 €"` becomes `1299.5`. Input with no digits at all is a
/// `Parse` error rather than a zero.
pub fn parse_price(text: &str) -> Result<f64> {
    let cleaned = text
        .replace('\u{a0}', " ")
        .replace('€', "")
        .replace('.', "")
        .replace(',', ".");

    let filtered: String = cleaned
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let token = number_token()
        .find(&filtered)
        .ok_or_else(|| AppError::Parse {
            input: text.to_string(),
        })?;

    token.as_str().parse::<f64>().map_err(|_| AppError::Parse {
        input: text.to_string(),
    })
}
