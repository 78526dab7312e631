//! # Config Resolution
//!
//! Picks the settings that apply to one (type, variant) pair.
//!
//! Exactly two levels are consulted, most specific first:
//!
//! 1. `drops.<TYPE>.variants.<variant>`
//! 2. `drops.<TYPE>`
//!
//! A matching variant section replaces the base section wholesale; fields it
//! leaves out take their defaults, never the base section's values.

use trophy_shared::MaterialKind;

use crate::config::{DropTree, ItemStackSection};

/// Which level of the drop tree produced a [`DropSettings`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsSource {
    /// `drops.<TYPE>.variants.<variant>`.
    Variant,
    /// `drops.<TYPE>`.
    Base,
}

/// Item appearance, resolved from one itemstack section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemTemplate {
    /// Configured material name, unvalidated.
    pub material: Option<String>,
    /// Display name markup.
    pub display_name: Option<String>,
    /// Lore markup lines.
    pub lore: Vec<String>,
    /// Sound token.
    pub sound: Option<String>,
    /// Skin token.
    pub skin: Option<String>,
}

impl ItemTemplate {
    /// Resolves the configured material, falling back to a player head.
    #[must_use]
    pub fn material_kind(&self) -> MaterialKind {
        self.material
            .as_deref()
            .and_then(MaterialKind::from_name)
            .unwrap_or_default()
    }
}

impl From<&ItemStackSection> for ItemTemplate {
    fn from(section: &ItemStackSection) -> Self {
        Self {
            material: non_empty(section.material.as_ref()),
            display_name: non_empty(section.display_name.as_ref()),
            lore: section
                .lore
                .as_ref()
                .map(crate::config::LoreTemplate::lines)
                .unwrap_or_default(),
            sound: non_empty(section.head_sound.as_ref()),
            skin: non_empty(section.internal.as_ref()),
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|s| !s.is_empty()).cloned()
}

/// Settings for one drop attempt. Built fresh per resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct DropSettings {
    /// Chance with no bonus, as configured.
    pub base_chance: f64,
    /// Chance added per bonus level.
    pub bonus_per_level: f64,
    /// Item appearance.
    pub item: ItemTemplate,
    /// Level of the tree these settings came from.
    pub source: SettingsSource,
}

/// Walks the drop tree.
#[derive(Clone, Copy, Debug)]
pub struct ConfigResolver<'a> {
    tree: &'a DropTree,
    debug: bool,
}

impl<'a> ConfigResolver<'a> {
    /// Creates a resolver over a loaded tree.
    #[must_use]
    pub const fn new(tree: &'a DropTree, debug: bool) -> Self {
        Self { tree, debug }
    }

    /// Returns the most specific settings for `type_key` and `variant`.
    ///
    /// `None` means the combination is not configured and nothing drops.
    #[must_use]
    pub fn resolve(&self, type_key: &str, variant: Option<&str>) -> Option<DropSettings> {
        let Some(section) = self.tree.get(type_key) else {
            self.log(type_key, variant, "unconfigured");
            return None;
        };

        if let Some(found) = variant.and_then(|v| section.variants.get(v)) {
            self.log(type_key, variant, "variant");
            return Some(DropSettings {
                base_chance: found.base_drop_chance,
                bonus_per_level: found.looting_bonus,
                item: ItemTemplate::from(&found.itemstack),
                source: SettingsSource::Variant,
            });
        }

        self.log(type_key, variant, "base");
        Some(DropSettings {
            base_chance: section.base_drop_chance,
            bonus_per_level: section.looting_bonus,
            item: ItemTemplate::from(&section.itemstack),
            source: SettingsSource::Base,
        })
    }

    fn log(&self, type_key: &str, variant: Option<&str>, level: &str) {
        if self.debug {
            tracing::info!(type_key, variant, level, "resolved drop settings");
        } else {
            tracing::trace!(type_key, variant, level, "resolved drop settings");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrophyConfig;

    fn tree() -> DropTree {
        TrophyConfig::from_toml_str(
            r#"
            [drops.WOLF]
            base-drop-chance = 0.01
            looting-bonus = 0.01
            [drops.WOLF.itemstack]
            display-name = "<gray>Wolf Head"
            head-sound = "entity.wolf.ambient"

            [drops.WOLF.variants.angry_pale]
            base-drop-chance = 0.25

            [drops.ZOMBIE]
            base-drop-chance = 0.05
            looting-bonus = 0.02
            [drops.ZOMBIE.itemstack]
            type = "zombie_head"
            display-name = ""

            [drops.SKELETON.itemstack]
            display-name = "   "
            "#,
        )
        .unwrap()
        .drops
    }

    #[test]
    fn test_variant_wins_over_base() {
        let tree = tree();
        let resolver = ConfigResolver::new(&tree, false);
        let settings = resolver.resolve("WOLF", Some("angry_pale")).unwrap();
        assert_eq!(settings.source, SettingsSource::Variant);
        assert!((settings.base_chance - 0.25).abs() < f64::EPSILON);
        // No inheritance from the base section.
        assert!(settings.bonus_per_level.abs() < f64::EPSILON);
        assert_eq!(settings.item, ItemTemplate::default());
    }

    #[test]
    fn test_unknown_variant_falls_back_to_base() {
        let tree = tree();
        let resolver = ConfigResolver::new(&tree, false);
        let settings = resolver.resolve("WOLF", Some("striped")).unwrap();
        assert_eq!(settings.source, SettingsSource::Base);
        assert!((settings.base_chance - 0.01).abs() < f64::EPSILON);
        assert_eq!(settings.item.sound.as_deref(), Some("entity.wolf.ambient"));

        let none = resolver.resolve("WOLF", None).unwrap();
        assert_eq!(none.source, SettingsSource::Base);
    }

    #[test]
    fn test_unconfigured_type_is_none() {
        let tree = tree();
        let resolver = ConfigResolver::new(&tree, true);
        assert!(resolver.resolve("CREEPER", None).is_none());
        assert!(resolver.resolve("CREEPER", Some("charged")).is_none());
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let tree = tree();
        let resolver = ConfigResolver::new(&tree, false);
        let settings = resolver.resolve("ZOMBIE", None).unwrap();
        assert_eq!(settings.item.display_name, None);
        assert_eq!(settings.item.material_kind(), MaterialKind::ZombieHead);

        let spaces = resolver.resolve("SKELETON", None).unwrap();
        assert_eq!(spaces.item.display_name.as_deref(), Some("   "));
    }

    #[test]
    fn test_unknown_material_defaults_to_player_head() {
        let template = ItemTemplate {
            material: Some("DIAMOND_SWORD".into()),
            ..Default::default()
        };
        assert_eq!(template.material_kind(), MaterialKind::PlayerHead);
        assert_eq!(ItemTemplate::default().material_kind(), MaterialKind::PlayerHead);
    }
}
