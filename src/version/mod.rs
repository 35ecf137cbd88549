// mcbundle: Minecraft Mod Bundle Builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version ranges and lenient version ordering.
//!
//! ```text
//! "[44,45.0.0)"  --strip "[]() "-->  "44,45.0.0"  --split ','-->  min=44  max=45.0.0
//! "1.2.3"        --no comma------------------------------------>  min=max=1.2.3
//! ","            ---------------------------------------------->  min=None max=None
//! "1,2,3"        ---------------------------------------------->  RangeError::Malformed
//! ```
//!
//! Bound indicators are discarded: both bounds are treated as inclusive.
//!
//! Ordering splits versions into tokens on `.`, `-`, `+` and `_`:
//!
//! ```text
//! number  vs number   numeric
//! word    vs word     case-insensitive
//! number  vs word     number wins
//! missing vs number   missing acts as 0      (44 == 44.0.0)
//! missing vs word     missing wins           (1.0-beta < 1.0)
//! ```

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RangeError;

/// Characters stripped from both ends of a range before splitting.
const BOUND_INDICATORS: &[char] = &['[', ']', '(', ')', ' '];

/// Inclusive version window; `None` leaves that side unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionRange {
    pub minimum: Option<String>,
    pub maximum: Option<String>,
}

impl VersionRange {
    /// Parses bounded-range notation such as `[44,)` or `1.2.3`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::Malformed`] when the text has more than one
    /// separating comma.
    pub fn parse(range: &str) -> Result<Self, RangeError> {
        let bare = range.trim_matches(BOUND_INDICATORS);
        let bounds: Vec<&str> = bare.split(',').collect();

        match bounds.as_slice() {
            [point] => Ok(Self {
                minimum: non_empty(point),
                maximum: non_empty(point),
            }),
            [minimum, maximum] => Ok(Self {
                minimum: non_empty(minimum),
                maximum: non_empty(maximum),
            }),
            _ => Err(RangeError::Malformed {
                range: range.to_string(),
            }),
        }
    }

    /// Unbounded on both sides.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            minimum: None,
            maximum: None,
        }
    }

    /// Returns true when `version` lies within both bounds.
    ///
    /// Versions or bounds that do not look like versions at all (templated
    /// strings such as `${file.jarVersion}`) never satisfy a bound.
    #[must_use]
    pub fn contains(&self, version: &str) -> bool {
        let above_minimum = self.minimum.as_deref().is_none_or(|minimum| {
            compare_versions(version, minimum).is_some_and(Ordering::is_ge)
        });
        let below_maximum = self.maximum.as_deref().is_none_or(|maximum| {
            compare_versions(version, maximum).is_some_and(Ordering::is_le)
        });
        above_minimum && below_maximum
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.minimum, &self.maximum) {
            (None, None) => write!(f, "any"),
            (Some(min), Some(max)) if min == max => write!(f, "{min}"),
            (min, max) => write!(
                f,
                "[{},{}]",
                min.as_deref().unwrap_or_default(),
                max.as_deref().unwrap_or_default()
            ),
        }
    }
}

/// Free-function form of [`VersionRange::parse`].
///
/// # Errors
///
/// See [`VersionRange::parse`].
pub fn get_range(range: &str) -> Result<VersionRange, RangeError> {
    VersionRange::parse(range)
}

fn non_empty(bound: &str) -> Option<String> {
    let bound = bound.trim();
    (!bound.is_empty()).then(|| bound.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Number(u64),
    Word(&'a str),
}

/// Splits a version into comparable tokens, or `None` if it is not a version.
fn tokenize(version: &str) -> Option<Vec<Token<'_>>> {
    let version = version.trim();
    let version = version
        .strip_prefix(['v', 'V'])
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
        .unwrap_or(version);

    if !version.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let mut tokens = Vec::new();
    for part in version.split(['.', '-', '+', '_']) {
        if part.is_empty() {
            continue;
        }
        // "45beta2" compares as 45, beta, 2
        let mut rest = part;
        while !rest.is_empty() {
            let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            if digits > 0 {
                let number = rest[..digits].parse::<u64>().ok()?;
                tokens.push(Token::Number(number));
                rest = &rest[digits..];
            } else {
                let letters = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
                tokens.push(Token::Word(&rest[..letters]));
                rest = &rest[letters..];
            }
        }
    }
    Some(tokens)
}

fn compare_tokens(a: Option<&Token<'_>>, b: Option<&Token<'_>>) -> Ordering {
    match (a, b) {
        (Some(Token::Number(x)), Some(Token::Number(y))) => x.cmp(y),
        (Some(Token::Word(x)), Some(Token::Word(y))) => {
            x.to_ascii_lowercase().cmp(&y.to_ascii_lowercase())
        }
        (Some(Token::Number(_)), Some(Token::Word(_))) => Ordering::Greater,
        (Some(Token::Word(_)), Some(Token::Number(_))) => Ordering::Less,
        (None, Some(Token::Number(y))) => 0.cmp(y),
        (Some(Token::Number(x)), None) => x.cmp(&0),
        (None, Some(Token::Word(_))) => Ordering::Greater,
        (Some(Token::Word(_)), None) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Orders two version strings, or `None` if either is not a version.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Option<Ordering> {
    let left = tokenize(a)?;
    let right = tokenize(b)?;

    let len = left.len().max(right.len());
    let ordering = (0..len)
        .map(|i| compare_tokens(left.get(i), right.get(i)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal);
    Some(ordering)
}

#[cfg(test)]
mod tests;
