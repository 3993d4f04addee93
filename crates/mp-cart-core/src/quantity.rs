//! Coercion for the quantity selector's text input and +/- buttons.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuantityBounds {
    pub min: u32,
    pub max: u32,
}

impl Default for QuantityBounds {
    fn default() -> Self {
        Self { min: 1, max: 99 }
    }
}

impl QuantityBounds {
    pub fn new(min: u32, max: u32) -> Self {
        let min = min.max(1);
        Self {
            min,
            max: max.max(min),
        }
    }

    /// Bounds from an input's `min`/`max` attributes. Missing, zero or
    /// unparsable attributes keep the defaults.
    pub fn from_attributes(min: Option<&str>, max: Option<&str>) -> Self {
        Self::default().with_attributes(min, max)
    }

    /// Override these bounds with whichever attributes parse to a positive
    /// integer.
    pub fn with_attributes(self, min: Option<&str>, max: Option<&str>) -> Self {
        let attr = |raw: Option<&str>, fallback: u32| {
            raw.and_then(parse_leading_int)
                .filter(|value| *value > 0)
                .map_or(fallback, clamp_to_u32)
        };
        Self::new(attr(min, self.min), attr(max, self.max))
    }

    pub fn coerce(&self, raw: &str) -> u32 {
        match parse_leading_int(raw) {
            Some(value) if value < i64::from(self.min) => self.min,
            Some(value) if value > i64::from(self.max) => self.max,
            Some(value) => clamp_to_u32(value),
            None => self.min,
        }
    }

    /// Next value for the "+" button, or `None` when already at `max` or the
    /// input does not hold a number.
    pub fn step_up(&self, raw: &str) -> Option<u32> {
        let value = parse_leading_int(raw)?;
        (value < i64::from(self.max)).then(|| self.coerce_i64(value + 1))
    }

    pub fn step_down(&self, raw: &str) -> Option<u32> {
        let value = parse_leading_int(raw)?;
        (value > i64::from(self.min)).then(|| self.coerce_i64(value - 1))
    }

    fn coerce_i64(&self, value: i64) -> u32 {
        clamp_to_u32(value.clamp(i64::from(self.min), i64::from(self.max)))
    }
}

fn clamp_to_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Leading-integer parse: optional whitespace and sign, then digits; trailing
/// text is ignored (`"12abc"` is 12). Overlong digit runs saturate.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
