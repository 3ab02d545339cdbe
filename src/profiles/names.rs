//! Profile name validation and sanitization
//!
//! Profile names double as filenames, so they are restricted to ASCII letters,
//! digits, underscores and hyphens.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("static pattern is valid"));

/// Whether `c` may appear in a profile name
#[inline]
pub fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Validate a profile name
///
/// Valid names are non-empty and contain only ASCII alphanumeric characters,
/// underscores, and hyphens. This also rules out dots and path separators.
///
/// # Errors
///
/// [`Error::EmptyProfileName`] or [`Error::InvalidProfileName`] naming the
/// first offending character.
pub fn validate_profile_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::EmptyProfileName);
    }

    if let Some(character) = name.chars().find(|c| !is_allowed_char(*c)) {
        return Err(Error::InvalidProfileName {
            name: name.to_string(),
            character,
        });
    }

    Ok(())
}

/// Turn arbitrary input into a usable profile name
///
/// Disallowed characters are deleted (not replaced), then leading and trailing
/// hyphens and underscores are trimmed. The result may be empty.
pub fn sanitize_profile_name(raw: &str) -> String {
    let cleaned = DISALLOWED.replace_all(raw, "");
    cleaned.trim_matches(|c: char| c == '-' || c == '_').to_string()
}

/// Pick `base`, or the first `base-N` (N >= 2) that `taken` reports as free
pub fn unique_profile_name(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    (2u64..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Sanitize `raw` and make it unique
///
/// # Errors
///
/// [`Error::EmptyProfileName`] when sanitization leaves nothing usable.
pub fn derive_profile_name(raw: &str, taken: impl Fn(&str) -> bool) -> Result<String> {
    let base = sanitize_profile_name(raw);
    if base.is_empty() {
        return Err(Error::EmptyProfileName);
    }
    Ok(unique_profile_name(&base, taken))
}
