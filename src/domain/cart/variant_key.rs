//! Variant key derivation for cart lines.
//!
//! A cart line's identity is its product reference plus a fingerprint of
//! any per-unit customization. Multi-slot color choices are kept in slot
//! order, so `[white, pink]` and `[pink, white]` are different lines.
//!
//! Separator characters occurring inside a part are percent-escaped, so
//! `grip` with `[a-b]` and `grip` with `[a, b]` never share a key, nor do
//! the plain product `grip::white` and `grip` with `[white]`.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

use crate::domain::foundation::ProductRef;

/// Color used for a slot the shopper left unfilled.
pub const RANDOM_COLOR: &str = "random";

/// Most color slots a single customization may carry.
pub const MAX_COLOR_SLOTS: usize = 8;

const KEY_SEPARATOR: &str = "::";
const COLOR_SEPARATOR: char = '-';
const ESCAPE: char = '%';

/// Optional per-unit customization attached to a cart line.
///
/// The payload is stored exactly as built so that it round-trips through
/// the persisted cart; key derivation normalizes it on the fly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Customization {
    /// Chosen colors, one entry per slot, in slot order.
    #[serde(default)]
    pub colors: Vec<String>,
}

impl Customization {
    /// Creates a customization from explicit slot colors.
    pub fn colors<I, S>(colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            colors: colors.into_iter().map(|c| normalize_color(c.as_ref())).collect(),
        }
    }

    /// Creates a customization with `slot_count` slots, filling every slot
    /// without a usable choice with [`RANDOM_COLOR`].
    ///
    /// Choices beyond `slot_count` are ignored, and `slot_count` itself is
    /// capped at [`MAX_COLOR_SLOTS`].
    pub fn with_slots(slot_count: usize, chosen: &[Option<&str>]) -> Self {
        let colors = (0..slot_count.min(MAX_COLOR_SLOTS))
            .map(|slot| {
                chosen
                    .get(slot)
                    .copied()
                    .flatten()
                    .map(normalize_color)
                    .unwrap_or_else(|| RANDOM_COLOR.to_string())
            })
            .collect();
        Self { colors }
    }

    /// True when no slot is present; such a customization carries no identity.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    fn write_fingerprint(&self, out: &mut String) {
        for (slot, color) in self.colors.iter().enumerate() {
            if slot > 0 {
                out.push(COLOR_SEPARATOR);
            }
            escape_into(out, &normalize_color(color), COLOR_SEPARATOR);
        }
    }
}

/// Appends `part`, percent-escaping the escape character and `reserved`.
fn escape_into(out: &mut String, part: &str, reserved: char) {
    for c in part.chars() {
        if c == ESCAPE || c == reserved {
            // writing to a String cannot fail
            let _ = write!(out, "%{:02X}", u32::from(c));
        } else {
            out.push(c);
        }
    }
}

fn normalize_color(raw: &str) -> String {
    let color = raw.trim().to_lowercase();
    if color.is_empty() {
        RANDOM_COLOR.to_string()
    } else {
        color
    }
}

/// Composite identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantKey(String);

impl VariantKey {
    /// Wraps a key received from a client (e.g. a path segment).
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derives the variant key for a product and optional customization.
///
/// Without customization (or with an empty one) the key is the product
/// reference itself. Otherwise it is `{product}::{color}-{color}-...`.
/// A `:` in the product or a `-` in a color is written as `%3A` / `%2D`,
/// and `%` as `%25`.
pub fn derive_key(base: &ProductRef, customization: Option<&Customization>) -> VariantKey {
    let mut key = String::with_capacity(base.as_str().len());
    escape_into(&mut key, base.as_str(), ':');
    if let Some(custom) = customization.filter(|c| !c.is_empty()) {
        key.push_str(KEY_SEPARATOR);
        custom.write_fingerprint(&mut key);
    }
    VariantKey(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(s: &str) -> ProductRef {
        ProductRef::new(s).unwrap()
    }

    #[test]
    fn key_without_customization_is_base_id() {
        let key = derive_key(&product("racket-pro"), None);
        assert_eq!(key.as_str(), "racket-pro");
    }

    #[test]
    fn empty_customization_is_treated_as_absent() {
        let key = derive_key(&product("racket-pro"), Some(&Customization::default()));
        assert_eq!(key.as_str(), "racket-pro");
    }

    #[test]
    fn key_with_colors_is_order_sensitive() {
        let a = derive_key(&product("grip"), Some(&Customization::colors(["white", "pink"])));
        let b = derive_key(&product("grip"), Some(&Customization::colors(["pink", "white"])));

        assert_eq!(a.as_str(), "grip::white-pink");
        assert_eq!(b.as_str(), "grip::pink-white");
        assert_ne!(a, b);
    }

    #[test]
    fn derivation_is_deterministic() {
        let custom = Customization::colors(["Black", " yellow "]);
        let first = derive_key(&product("grip"), Some(&custom));
        let second = derive_key(&product("grip"), Some(&custom));
        assert_eq!(first, second);
        assert_eq!(first.as_str(), "grip::black-yellow");
    }

    #[test]
    fn unfilled_slots_default_to_random() {
        let custom = Customization::with_slots(3, &[Some("white"), None]);
        assert_eq!(custom.colors, vec!["white", "random", "random"]);
    }

    #[test]
    fn blank_slot_choice_defaults_to_random() {
        let custom = Customization::with_slots(2, &[Some("  "), Some("pink")]);
        assert_eq!(custom.colors, vec!["random", "pink"]);
    }

    #[test]
    fn extra_choices_beyond_slot_count_are_ignored() {
        let custom = Customization::with_slots(1, &[Some("pink"), Some("white")]);
        assert_eq!(custom.colors, vec!["pink"]);
    }

    #[test]
    fn slot_count_is_capped() {
        let custom = Customization::with_slots(400_000_000, &[Some("pink")]);
        assert_eq!(custom.colors.len(), MAX_COLOR_SLOTS);
        assert_eq!(custom.colors[0], "pink");
    }

    #[test]
    fn dash_inside_color_does_not_split_slot() {
        let joined = derive_key(&product("grip"), Some(&Customization::colors(["a-b"])));
        let split = derive_key(&product("grip"), Some(&Customization::colors(["a", "b"])));

        assert_eq!(joined.as_str(), "grip::a%2Db");
        assert_eq!(split.as_str(), "grip::a-b");
        assert_ne!(joined, split);
    }

    #[test]
    fn separator_inside_product_ref_is_escaped() {
        let plain = derive_key(&product("grip::white"), None);
        let custom = derive_key(&product("grip"), Some(&Customization::colors(["white"])));

        assert_eq!(plain.as_str(), "grip%3A%3Awhite");
        assert_ne!(plain, custom);
    }

    #[test]
    fn escape_character_itself_is_escaped() {
        let literal = derive_key(&product("grip"), Some(&Customization::colors(["a%2db"])));
        let dashed = derive_key(&product("grip"), Some(&Customization::colors(["a-b"])));

        assert_eq!(literal.as_str(), "grip::a%252db");
        assert_ne!(literal, dashed);
    }

    #[test]
    fn dash_in_product_ref_is_kept_verbatim() {
        let key = derive_key(&product("racket-pro"), Some(&Customization::colors(["white"])));
        assert_eq!(key.as_str(), "racket-pro::white");
    }

    #[test]
    fn raw_deserialized_colors_normalize_in_key() {
        let custom: Customization = serde_json::from_str(r#"{"colors":["WHITE",""]}"#).unwrap();
        let key = derive_key(&product("grip"), Some(&custom));
        assert_eq!(key.as_str(), "grip::white-random");
        // payload itself is untouched
        assert_eq!(custom.colors, vec!["WHITE", ""]);
    }
}
