//! Reduces a raw detected name string to first given name + first surname.

use certikeeper_cert_models::StudentName;
use strum_macros::{Display, EnumString};

use crate::tables::NOISE_WORDS;

/// How to pick the two output tokens from a cleaned multi-token name.
///
/// The observed document families diverge on this, so it is a named
/// policy rather than a fixed rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum NameSplitPolicy {
    /// With 4 or more tokens, take tokens 0 and 2, skipping a presumed
    /// middle name ("first middle surname1 surname2" order). Canonical.
    #[default]
    SkipMiddle,
    /// Always take the first two tokens. Parity with the simpler
    /// template variants.
    FirstTwo,
}

/// Splits a raw name-detector string into (first name, first surname).
///
/// Whitespace and hyphens are normalized to single spaces, then tokens
/// that are non-alphabetic, shorter than two letters, or in the noise
/// set are discarded. Fewer than two clean tokens means the name is
/// unusable and `None` is returned.
#[must_use]
pub fn split_name(raw: &str, policy: NameSplitPolicy) -> Option<StudentName> {
    let normalized = raw.replace('-', " ");
    let tokens: Vec<&str> = normalized
        .split_whitespace()
        .filter(|t| is_name_token(t))
        .collect();

    if tokens.len() < 2 {
        return None;
    }

    let surname_index = match policy {
        NameSplitPolicy::SkipMiddle if tokens.len() >= 4 => 2,
        _ => 1,
    };

    Some(StudentName {
        first_name: tokens[0].to_owned(),
        surname: tokens[surname_index].to_owned(),
    })
}

fn is_name_token(token: &str) -> bool {
    token.chars().count() >= 2
        && token.chars().all(char::is_alphabetic)
        && !NOISE_WORDS.contains(&token)
}
