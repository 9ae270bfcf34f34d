//! Resolved color values carried by color entities.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Color code is empty")]
    Empty,

    #[error("Color code must have 3 or 6 hex digits, found {len}: {code:?}")]
    InvalidLength { code: String, len: usize },

    #[error("Invalid hex digit {digit:?} in color code {code:?}")]
    InvalidDigit { code: String, digit: char },
}

/// An RGB color parsed from `#rgb` or `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let hex = code.strip_prefix('#').unwrap_or(code);
        if hex.is_empty() {
            return Err(ColorError::Empty);
        }

        let mut digits = Vec::with_capacity(6);
        for c in hex.chars() {
            let digit = c.to_digit(16).ok_or_else(|| ColorError::InvalidDigit {
                code: code.to_string(),
                digit: c,
            })?;
            digits.push(digit as u8);
        }

        match digits.as_slice() {
            // Short form doubles each digit: #f80 == #ff8800
            &[r, g, b] => Ok(Self::new(r * 17, g * 17, b * 17)),
            &[r1, r2, g1, g2, b1, b2] => Ok(Self::new(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2)),
            other => Err(ColorError::InvalidLength {
                code: code.to_string(),
                len: other.len(),
            }),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
