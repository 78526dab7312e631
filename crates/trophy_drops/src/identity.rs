//! # Item Identity
//!
//! Turns resolved settings into the head the host materializes: display
//! name, lore, material, sound, skin and the short profile name the skin
//! system requires.
//!
//! Synthesis never fails. Missing pieces fall back to defaults; the worst
//! case is a plain `"<Type> Head"` player head.

use siphasher::sip128::{Hasher128, SipHasher24};
use std::hash::Hasher;
use uuid::Uuid;

use trophy_shared::{MaterialKind, DEFAULT_PROFILE_NAME, MAX_PROFILE_NAME_LEN};

use crate::resolver::DropSettings;
use crate::text::{RichText, RichTextCodec};

/// Fixed SipHash keys for skin profile ids. Changing them changes every
/// restored head's profile id.
const PROFILE_KEYS: (u64, u64) = (0x7472_6f70_6879_6472, 0x6f70_732d_736b_696e);

/// A synthesized or restored head.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemIdentity {
    /// Head material.
    pub material: MaterialKind,
    /// Display name.
    pub display_name: Option<RichText>,
    /// Lore lines in order.
    pub lore: Vec<RichText>,
    /// Sound token for note blocks.
    pub sound: Option<String>,
    /// Skin token. Only ever set on player heads.
    pub skin_token: Option<String>,
    /// Sanitized profile name derived from the display name.
    pub profile_name: String,
    /// Whether the certification line has been applied.
    pub certified: bool,
}

impl ItemIdentity {
    /// A plain player head with nothing configured.
    #[must_use]
    pub fn bare(material: MaterialKind) -> Self {
        Self {
            material,
            display_name: None,
            lore: Vec::new(),
            sound: None,
            skin_token: None,
            profile_name: DEFAULT_PROFILE_NAME.to_string(),
            certified: false,
        }
    }

    /// Skin profile for the host, when this is a skinned player head.
    #[must_use]
    pub fn skin_profile(&self) -> Option<SkinProfile> {
        if !self.material.is_player_head() {
            return None;
        }
        let token = self.skin_token.as_deref()?;
        Some(SkinProfile::new(&self.profile_name, token))
    }

    /// Plain-text lore, one string per line.
    #[must_use]
    pub fn plain_lore(&self) -> Vec<String> {
        self.lore.iter().map(RichText::plain).collect()
    }
}

/// Skin reference attached to a player head.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkinProfile {
    /// Deterministic id derived from the texture.
    pub id: Uuid,
    /// Sanitized profile name.
    pub name: String,
    /// Texture payload.
    pub texture: String,
}

impl SkinProfile {
    /// Builds a profile whose id depends only on `texture`.
    #[must_use]
    pub fn new(name: &str, texture: &str) -> Self {
        Self {
            id: profile_id(texture),
            name: name.to_string(),
            texture: texture.to_string(),
        }
    }
}

/// Stable profile id for a skin token.
#[must_use]
pub fn profile_id(texture: &str) -> Uuid {
    let mut hasher = SipHasher24::new_with_keys(PROFILE_KEYS.0, PROFILE_KEYS.1);
    hasher.write(texture.as_bytes());
    let hash = hasher.finish128();
    Uuid::from_u128((u128::from(hash.h1) << 64) | u128::from(hash.h2))
}

/// Reduces plain text to a valid profile name.
///
/// Keeps `[A-Za-z0-9_]`, truncates to 16 characters and falls back to
/// `"MobHead"` when nothing is left.
#[must_use]
pub fn sanitize_profile_name(plain: &str) -> String {
    let name: String = plain
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .take(MAX_PROFILE_NAME_LEN)
        .collect();
    if name.is_empty() {
        DEFAULT_PROFILE_NAME.to_string()
    } else {
        name
    }
}

/// Profile name for a display name given as markup.
#[must_use]
pub fn profile_name_from_markup(codec: &dyn RichTextCodec, markup: &str) -> String {
    sanitize_profile_name(&codec.parse(markup).plain())
}

/// Upper-cases the first character only.
#[must_use]
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Generated name for a head with no configured display name.
#[must_use]
pub fn default_display_name(type_key: &str, variant: Option<&str>) -> String {
    let creature = capitalize(&type_key.to_lowercase());
    match variant.filter(|v| !v.is_empty()) {
        Some(variant) => format!("{} {creature} Head", capitalize(variant)),
        None => format!("{creature} Head"),
    }
}

/// Builds [`ItemIdentity`] values from resolved settings.
#[derive(Clone, Copy)]
pub struct IdentitySynthesizer<'a> {
    codec: &'a dyn RichTextCodec,
    debug: bool,
}

impl<'a> IdentitySynthesizer<'a> {
    /// Creates a synthesizer using `codec` for markup.
    #[must_use]
    pub fn new(codec: &'a dyn RichTextCodec, debug: bool) -> Self {
        Self { codec, debug }
    }

    /// Synthesizes the head for one drop.
    #[must_use]
    pub fn synthesize(
        &self,
        settings: &DropSettings,
        type_key: &str,
        variant: Option<&str>,
    ) -> ItemIdentity {
        let item = &settings.item;

        let display_name = match item.display_name.as_deref() {
            Some(markup) => self.codec.parse(markup),
            None => RichText::plain_text(default_display_name(type_key, variant)),
        };
        let lore = item.lore.iter().map(|line| self.codec.parse(line)).collect();

        let material = item.material_kind();
        if self.debug {
            if let Some(raw) = item.material.as_deref().filter(|m| MaterialKind::from_name(m).is_none()) {
                tracing::warn!(type_key, material = raw, "unknown head material, using PLAYER_HEAD");
            }
        }

        let skin_token = item.skin.clone().filter(|_| material.is_player_head());
        let profile_name = sanitize_profile_name(&display_name.plain());

        let identity = ItemIdentity {
            material,
            display_name: Some(display_name),
            lore,
            sound: item.sound.clone(),
            skin_token,
            profile_name,
            certified: false,
        };

        if self.debug {
            tracing::info!(
                type_key,
                variant,
                material = %identity.material,
                profile = %identity.profile_name,
                skinned = identity.skin_token.is_some(),
                "synthesized head"
            );
        } else {
            tracing::trace!(type_key, variant, material = %identity.material, "synthesized head");
        }
        identity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{ItemTemplate, SettingsSource};
    use crate::text::MiniMarkup;

    fn settings(item: ItemTemplate) -> DropSettings {
        DropSettings {
            base_chance: 0.05,
            bonus_per_level: 0.02,
            item,
            source: SettingsSource::Base,
        }
    }

    fn synthesize(item: ItemTemplate, type_key: &str, variant: Option<&str>) -> ItemIdentity {
        IdentitySynthesizer::new(&MiniMarkup, false).synthesize(&settings(item), type_key, variant)
    }

    #[test]
    fn test_default_names() {
        let zombie = synthesize(ItemTemplate::default(), "ZOMBIE", None);
        assert_eq!(zombie.display_name.unwrap().plain(), "Zombie Head");
        assert_eq!(zombie.profile_name, "ZombieHead");
        assert_eq!(zombie.material, MaterialKind::PlayerHead);
        assert!(zombie.lore.is_empty());
        assert!(!zombie.certified);

        let wolf = synthesize(ItemTemplate::default(), "WOLF", Some("angry_pale"));
        assert_eq!(wolf.display_name.unwrap().plain(), "Angry_pale Wolf Head");
        assert_eq!(wolf.profile_name, "Angry_paleWolfHe");
    }

    #[test]
    fn test_whitespace_name_is_used_verbatim() {
        let item = ItemTemplate {
            display_name: Some("   ".into()),
            ..Default::default()
        };
        let head = synthesize(item, "SKELETON", None);
        assert_eq!(head.display_name.unwrap().plain(), "   ");
        assert_eq!(head.profile_name, "MobHead");
    }

    #[test]
    fn test_configured_name_and_lore_are_parsed() {
        let item = ItemTemplate {
            display_name: Some("<red>Angry <bold>Pale</bold> Wolf".into()),
            lore: vec!["<gray>Rare".into(), "Bites".into()],
            ..Default::default()
        };
        let head = synthesize(item, "WOLF", Some("angry_pale"));
        assert_eq!(head.display_name.as_ref().unwrap().plain(), "Angry Pale Wolf");
        assert_eq!(head.plain_lore(), vec!["Rare", "Bites"]);
        assert_eq!(head.profile_name, "AngryPaleWolf");
    }

    #[test]
    fn test_skin_only_on_player_heads() {
        let skinned = ItemTemplate {
            skin: Some("eyJ0ZXh0dXJlcyI6e30=".into()),
            sound: Some("entity.wolf.growl".into()),
            ..Default::default()
        };
        let head = synthesize(skinned.clone(), "WOLF", None);
        assert_eq!(head.skin_token.as_deref(), Some("eyJ0ZXh0dXJlcyI6e30="));
        assert_eq!(head.sound.as_deref(), Some("entity.wolf.growl"));
        assert!(head.skin_profile().is_some());

        let creeper = ItemTemplate {
            material: Some("CREEPER_HEAD".into()),
            ..skinned
        };
        let head = synthesize(creeper, "CREEPER", None);
        assert_eq!(head.material, MaterialKind::CreeperHead);
        assert_eq!(head.skin_token, None);
        assert!(head.skin_profile().is_none());
        assert_eq!(head.sound.as_deref(), Some("entity.wolf.growl"));
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(profile_name_from_markup(&MiniMarkup, "§lFire §4Head"), "FireHead");
        assert_eq!(sanitize_profile_name(""), "MobHead");
        assert_eq!(sanitize_profile_name("!!! ???"), "MobHead");
        let long = "abcdefghijklmnopqrstuvwxyz0123";
        assert_eq!(long.len(), 30);
        assert_eq!(sanitize_profile_name(long), "abcdefghijklmnop");
        assert_eq!(sanitize_profile_name("Ünïcode_Head"), "ncode_Head");
    }

    #[test]
    fn test_profile_id_is_stable() {
        let a = SkinProfile::new("A", "token");
        let b = SkinProfile::new("B", "token");
        assert_eq!(a.id, b.id);
        assert_ne!(profile_id("token"), profile_id("other"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("zombie"), "Zombie");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("already Big"), "Already Big");
    }
}
