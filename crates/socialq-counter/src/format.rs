//! Digit grouping for displayed counts.
//!
//! Formatting is a pure `i64 -> String` function; it is applied to every
//! sampled value but never animated itself. Separators and grouping come from
//! the CLDR tables in `num_format`.

use num_format::{Buffer, Locale};

/// Reference locale: `en-US` grouping with commas.
pub const DEFAULT_LOCALE: Locale = Locale::en;

/// Locale-specific integer formatting with grouping by thousands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    locale: Locale,
}

impl NumberFormat {
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub const fn en_us() -> Self {
        Self::new(Locale::en)
    }

    pub const fn de_de() -> Self {
        Self::new(Locale::de)
    }

    pub const fn fr_fr() -> Self {
        Self::new(Locale::fr)
    }

    pub const fn de_ch() -> Self {
        Self::new(Locale::de_CH)
    }

    /// Looks up a BCP 47 tag (`de-CH`, `de_DE`, `fr`).
    ///
    /// A tag with no exact match falls back to its language, then to `en-US`.
    pub fn for_locale(tag: &str) -> Self {
        let canonical = canonical_tag(tag);
        let language = canonical.split('-').next().unwrap_or_default();
        let locale = Locale::from_name(&canonical)
            .or_else(|_| Locale::from_name(language))
            .unwrap_or_else(|_| {
                log::debug!("no grouping rules for locale {tag:?}; using en-US");
                DEFAULT_LOCALE
            });
        Self::new(locale)
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn group_separator(&self) -> &'static str {
        self.locale.separator()
    }

    pub fn format(&self, value: i64) -> String {
        let mut buf = Buffer::default();
        buf.write_formatted(&value, &self.locale);
        buf.as_str().to_owned()
    }

    /// Reads back a value shown by this format (or plain digits).
    ///
    /// Returns `None` for anything that is not an optionally signed run of
    /// digits and separators, or that overflows `i64`.
    pub fn parse(&self, text: &str) -> Option<i64> {
        let trimmed = text.trim();
        let (negative, body) = match trimmed
            .strip_prefix(self.locale.minus_sign())
            .or_else(|| trimmed.strip_prefix('-'))
        {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let separator = self.group_separator();
        let body = if separator.is_empty() {
            body.to_owned()
        } else {
            body.replace(separator, "")
        };
        let mut magnitude: u64 = 0;
        let mut seen_digit = false;
        for ch in body.chars() {
            let digit = ch.to_digit(10)?;
            magnitude = magnitude.checked_mul(10)?.checked_add(u64::from(digit))?;
            seen_digit = true;
        }
        if !seen_digit {
            return None;
        }
        if negative {
            0i64.checked_sub_unsigned(magnitude)
        } else {
            i64::try_from(magnitude).ok()
        }
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::en_us()
    }
}

/// `de_ch` -> `de-CH`: lowercase language, uppercase two-letter region.
fn canonical_tag(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .enumerate()
        .map(|(index, part)| {
            if index == 0 {
                part.to_ascii_lowercase()
            } else if part.len() == 2 {
                part.to_ascii_uppercase()
            } else {
                part.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod tests;
