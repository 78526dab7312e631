//! # Variant Classification
//!
//! Reduces a creature snapshot to a stable, lower-case variant key.
//!
//! Each creature type maps to one pure projection of its sub-state:
//!
//! | Shape       | Types                                           | Example          |
//! |-------------|-------------------------------------------------|------------------|
//! | categorical | axolotl, cat, fox, horse, villager, ...         | `"tabby"`        |
//! | behavioral  | bee, ghast, goat, snow golem, strider, ...      | `"angry"`        |
//! | compound    | wolf                                            | `"angry_pale"`   |
//! | name tag    | sheep named `jeb_`                              | `"jeb_"`         |
//!
//! Types missing from [`CLASSIFIERS`] have no variants. Sub-state the
//! classifier cannot read yields `None`.

use trophy_shared::{CreatureSnapshot, CreatureTraits};

use crate::config::VariantTokenScheme;

/// Reserved custom name that turns any sheep into the party sheep.
pub const PARTY_NAME: &str = "jeb_";

/// A classification function for one creature type.
pub type ClassifyFn = fn(&CreatureSnapshot, VariantTokenScheme) -> Option<String>;

/// Type key → classification function.
///
/// Add a creature type by adding a row.
pub const CLASSIFIERS: &[(&str, ClassifyFn)] = &[
    ("WOLF", wolf),
    ("AXOLOTL", registry_variant),
    ("FROG", registry_variant),
    ("CHICKEN", registry_variant),
    ("COW", registry_variant),
    ("PIG", registry_variant),
    ("MOOSHROOM", registry_variant),
    ("PARROT", registry_variant),
    ("CAT", registry_variant),
    ("FOX", registry_variant),
    ("PANDA", registry_variant),
    ("RABBIT", registry_variant),
    ("SHEEP", sheep),
    ("HORSE", coat_color),
    ("LLAMA", llama),
    ("TRADER_LLAMA", llama),
    ("BEE", bee),
    ("GHAST", ghast),
    ("HAPPY_GHAST", happy_ghast),
    ("GOAT", goat),
    ("SNOW_GOLEM", snow_golem),
    ("STRIDER", strider),
    ("VILLAGER", profession),
    ("ZOMBIE_VILLAGER", zombie_profession),
];

/// Classifies creatures into variant keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct VariantClassifier {
    scheme: VariantTokenScheme,
}

impl VariantClassifier {
    /// Creates a classifier emitting tokens from `scheme`.
    #[must_use]
    pub const fn new(scheme: VariantTokenScheme) -> Self {
        Self { scheme }
    }

    /// Returns the variant key for a snapshot, if its type has one.
    #[must_use]
    pub fn classify(&self, snapshot: &CreatureSnapshot) -> Option<String> {
        let classify = classifier_for(&snapshot.type_key)?;
        classify(snapshot, self.scheme)
    }
}

/// Looks up the classification function for a type key.
#[must_use]
pub fn classifier_for(type_key: &str) -> Option<ClassifyFn> {
    CLASSIFIERS
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(type_key))
        .map(|(_, classify)| *classify)
}

/// Canonical lower-case key for a raw enum name or registry key.
///
/// Strips a `namespace:` prefix. Anything outside `[a-z0-9_]` after
/// lowercasing (spaces, dots, stray punctuation) makes the value unusable.
#[must_use]
pub fn canonical_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let bare = trimmed.rsplit_once(':').map_or(trimmed, |(_, path)| path);
    if bare.is_empty() {
        return None;
    }
    let key = bare.to_ascii_lowercase();
    key.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        .then_some(key)
}

fn canonical(field: Option<&String>) -> Option<String> {
    field.and_then(|raw| canonical_key(raw))
}

fn binary(flag: bool, on: &str, off: &str) -> Option<String> {
    Some(if flag { on } else { off }.to_string())
}

// ============================================================================
// Categorical
// ============================================================================

fn registry_variant(snapshot: &CreatureSnapshot, _: VariantTokenScheme) -> Option<String> {
    canonical(snapshot.traits.variant.as_ref())
}

fn coat_color(snapshot: &CreatureSnapshot, _: VariantTokenScheme) -> Option<String> {
    canonical(snapshot.traits.color.as_ref())
}

fn profession(snapshot: &CreatureSnapshot, _: VariantTokenScheme) -> Option<String> {
    canonical(snapshot.traits.profession.as_ref())
}

fn zombie_profession(snapshot: &CreatureSnapshot, _: VariantTokenScheme) -> Option<String> {
    canonical(snapshot.traits.profession.as_ref()).filter(|p| p != "none")
}

fn llama(snapshot: &CreatureSnapshot, scheme: VariantTokenScheme) -> Option<String> {
    let color = canonical(snapshot.traits.color.as_ref())?;
    match scheme {
        VariantTokenScheme::Registry => Some(color),
        VariantTokenScheme::Legacy if snapshot.type_key.eq_ignore_ascii_case("TRADER_LLAMA") => {
            Some(format!("trader_llama_{color}"))
        }
        VariantTokenScheme::Legacy => Some(format!("llama_{color}")),
    }
}

// ============================================================================
// Behavioral
// ============================================================================

fn bee(snapshot: &CreatureSnapshot, _: VariantTokenScheme) -> Option<String> {
    binary(snapshot.traits.anger > 0, "angry", "calm")
}

fn ghast(snapshot: &CreatureSnapshot, scheme: VariantTokenScheme) -> Option<String> {
    let charging_token = match scheme {
        VariantTokenScheme::Registry => "shooting",
        VariantTokenScheme::Legacy => "charging",
    };
    binary(snapshot.traits.charging, charging_token, "idle")
}

fn happy_ghast(snapshot: &CreatureSnapshot, _: VariantTokenScheme) -> Option<String> {
    binary(snapshot.traits.saddled, "saddled", "happy")
}

fn goat(snapshot: &CreatureSnapshot, _: VariantTokenScheme) -> Option<String> {
    binary(snapshot.traits.screaming, "screaming", "normal")
}

fn snow_golem(snapshot: &CreatureSnapshot, _: VariantTokenScheme) -> Option<String> {
    binary(snapshot.traits.derp, "derp", "normal")
}

fn strider(snapshot: &CreatureSnapshot, _: VariantTokenScheme) -> Option<String> {
    binary(snapshot.traits.shivering, "shivering", "normal")
}

// ============================================================================
// Compound / name tag
// ============================================================================

fn wolf(snapshot: &CreatureSnapshot, _: VariantTokenScheme) -> Option<String> {
    let CreatureTraits { variant, angry, .. } = &snapshot.traits;
    let variant = canonical(variant.as_ref())?;
    Some(if *angry { format!("angry_{variant}") } else { variant })
}

fn sheep(snapshot: &CreatureSnapshot, _: VariantTokenScheme) -> Option<String> {
    if snapshot.traits.custom_name.as_deref() == Some(PARTY_NAME) {
        return Some(PARTY_NAME.to_string());
    }
    canonical(snapshot.traits.color.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(type_key: &str, traits: CreatureTraits) -> CreatureSnapshot {
        CreatureSnapshot::new(type_key).with_traits(traits)
    }

    fn classify(type_key: &str, traits: CreatureTraits) -> Option<String> {
        VariantClassifier::default().classify(&snapshot(type_key, traits))
    }

    #[test]
    fn test_categorical_keys_are_lowercase() {
        let cat = CreatureTraits {
            variant: Some("minecraft:all_black".into()),
            ..Default::default()
        };
        assert_eq!(classify("CAT", cat).as_deref(), Some("all_black"));

        let horse = CreatureTraits {
            color: Some("CHESTNUT".into()),
            ..Default::default()
        };
        assert_eq!(classify("HORSE", horse).as_deref(), Some("chestnut"));

        let villager = CreatureTraits {
            profession: Some("minecraft:librarian".into()),
            ..Default::default()
        };
        assert_eq!(classify("VILLAGER", villager).as_deref(), Some("librarian"));
    }

    #[test]
    fn test_behavioral_types_use_two_tokens() {
        let angry_bee = CreatureTraits { anger: 400, ..Default::default() };
        assert_eq!(classify("BEE", angry_bee).as_deref(), Some("angry"));
        assert_eq!(classify("BEE", CreatureTraits::default()).as_deref(), Some("calm"));

        let screaming = CreatureTraits { screaming: true, ..Default::default() };
        assert_eq!(classify("GOAT", screaming).as_deref(), Some("screaming"));
        assert_eq!(classify("GOAT", CreatureTraits::default()).as_deref(), Some("normal"));

        let derp = CreatureTraits { derp: true, ..Default::default() };
        assert_eq!(classify("SNOW_GOLEM", derp).as_deref(), Some("derp"));

        let shivering = CreatureTraits { shivering: true, ..Default::default() };
        assert_eq!(classify("STRIDER", shivering).as_deref(), Some("shivering"));

        let saddled = CreatureTraits { saddled: true, ..Default::default() };
        assert_eq!(classify("HAPPY_GHAST", saddled).as_deref(), Some("saddled"));
        assert_eq!(classify("HAPPY_GHAST", CreatureTraits::default()).as_deref(), Some("happy"));
    }

    #[test]
    fn test_angry_wolf_is_compound() {
        let wolf = CreatureTraits {
            variant: Some("minecraft:pale".into()),
            angry: true,
            ..Default::default()
        };
        assert_eq!(classify("WOLF", wolf).as_deref(), Some("angry_pale"));

        let calm = CreatureTraits {
            variant: Some("minecraft:pale".into()),
            ..Default::default()
        };
        assert_eq!(classify("WOLF", calm).as_deref(), Some("pale"));
    }

    #[test]
    fn test_party_sheep_short_circuits_color() {
        let jeb = CreatureTraits {
            color: Some("WHITE".into()),
            custom_name: Some("jeb_".into()),
            ..Default::default()
        };
        assert_eq!(classify("SHEEP", jeb).as_deref(), Some("jeb_"));

        let almost = CreatureTraits {
            color: Some("WHITE".into()),
            custom_name: Some("Jeb_".into()),
            ..Default::default()
        };
        assert_eq!(classify("SHEEP", almost).as_deref(), Some("white"));
    }

    #[test]
    fn test_token_schemes_differ_for_ghast_and_llama() {
        let charging = snapshot("GHAST", CreatureTraits { charging: true, ..Default::default() });
        let legacy = VariantClassifier::new(VariantTokenScheme::Legacy);
        let registry = VariantClassifier::new(VariantTokenScheme::Registry);
        assert_eq!(registry.classify(&charging).as_deref(), Some("shooting"));
        assert_eq!(legacy.classify(&charging).as_deref(), Some("charging"));

        let brown = CreatureTraits { color: Some("BROWN".into()), ..Default::default() };
        let llama = snapshot("LLAMA", brown.clone());
        let trader = snapshot("TRADER_LLAMA", brown);
        assert_eq!(registry.classify(&llama).as_deref(), Some("brown"));
        assert_eq!(legacy.classify(&llama).as_deref(), Some("llama_brown"));
        assert_eq!(legacy.classify(&trader).as_deref(), Some("trader_llama_brown"));
    }

    #[test]
    fn test_unclassified_and_unreadable_yield_none() {
        assert_eq!(classify("ZOMBIE", CreatureTraits::default()), None);
        assert_eq!(classify("CAT", CreatureTraits::default()), None);

        let garbage = CreatureTraits {
            variant: Some("not a key!".into()),
            ..Default::default()
        };
        assert_eq!(classify("FROG", garbage), None);

        let jobless = CreatureTraits {
            profession: Some("NONE".into()),
            ..Default::default()
        };
        assert_eq!(classify("ZOMBIE_VILLAGER", jobless), None);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let traits = CreatureTraits {
            variant: Some("minecraft:rusty".into()),
            angry: true,
            ..Default::default()
        };
        let wolf = snapshot("WOLF", traits);
        let classifier = VariantClassifier::default();
        assert_eq!(classifier.classify(&wolf), classifier.classify(&wolf));
    }

    #[test]
    fn test_canonical_key() {
        assert_eq!(canonical_key("minecraft:Tabby").as_deref(), Some("tabby"));
        assert_eq!(canonical_key("  RED ").as_deref(), Some("red"));
        assert_eq!(canonical_key("minecraft:"), None);
        assert_eq!(canonical_key("two words"), None);
    }
}
