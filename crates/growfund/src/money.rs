//! Naira amount helpers.
//!
//! Amounts travel as `f64` naira. Anything that is persisted or shown to a
//! member is rounded to the kobo first.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An amount that renders as naira in messages.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Naira(pub f64);

impl fmt::Display for Naira {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_naira(self.0))
    }
}

/// Round to the nearest kobo (two decimal places).
pub fn round_to_kobo(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// `true` when the amount can be charged or credited.
pub fn is_positive_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

/// Render an amount as `₦12,500` or `₦12,500.50`.
pub fn format_naira(amount: f64) -> String {
    let kobo = (amount * 100.0).round() as i64;
    let sign = if kobo < 0 { "-" } else { "" };
    let kobo = kobo.unsigned_abs();
    let whole = (kobo / 100).to_string();
    let fraction = kobo % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if fraction == 0 {
        format!("{sign}₦{grouped}")
    } else {
        format!("{sign}₦{grouped}.{fraction:02}")
    }
}
