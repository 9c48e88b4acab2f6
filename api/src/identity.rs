//! Canonical ids, titles and slugs.

use crate::{Participant, Provider};
use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder image service used when a provider sends no logo.
pub const PLACEHOLDER_LOGO_BASE: &str = "https://placehold.co/64x64.png";

static SIDE_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s+(?:at|@|v|v\.|vs|vs\.|versus)\s+").expect("separator pattern")
});

/// `"<prefix>-<native>"`, the dedup and cache key.
pub fn event_id(provider: Provider, native_id: &str) -> String {
    format!("{}-{native_id}", provider.prefix())
}

/// Id for a child record of a multi-part event (a bout on a card, a session
/// of a race weekend).
pub fn composite_native_id(parent: &str, child: &str) -> String {
    format!("{parent}_{child}")
}

/// Rewrites every preposition separator between sides to `" vs "`.
pub fn canonical_title(raw: &str) -> String {
    SIDE_SEPARATOR.replace_all(raw.trim(), " vs ").into_owned()
}

pub fn versus(away: &str, home: &str) -> String {
    format!("{} vs {}", away.trim(), home.trim())
}

/// URL-safe slug: lowercased title with anything outside `[a-z0-9]` dropped,
/// words joined by `-`, then the native id.
pub fn derive_slug(title: &str, native_id: &str) -> String {
    let lowered = title.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '_')
        .collect();
    let base = kept
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if base.is_empty() {
        native_id.to_owned()
    } else {
        format!("{base}-{native_id}")
    }
}

/// Filter key for a sport or league display name: `"Premier League"` →
/// `"premier-league"`.
pub fn scope_slug(display: &str) -> String {
    display
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

pub fn placeholder_logo(text: &str) -> String {
    let text: String = text.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    format!("{PLACEHOLDER_LOGO_BASE}?text={text}")
}

/// First `len` letters/digits of a name, uppercased.
pub fn abbreviate(name: &str, len: usize) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .take(len)
        .collect::<String>()
        .to_uppercase()
}

/// Synthesized side for events that have no real opponents (race sessions,
/// golf tournaments).
pub fn placeholder_participant(provider: Provider, name: &str, suffix: &str) -> Participant {
    let key: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    let abbreviation = format!("{}{}", abbreviate(name, 2), suffix.to_uppercase());
    Participant {
        id: format!("{}-team-{key}-{}", provider.prefix(), suffix.to_lowercase()),
        name: name.trim().to_owned(),
        logo_ref: placeholder_logo(&abbreviation),
        abbreviation,
    }
}
