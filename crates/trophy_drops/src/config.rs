//! # Drop Configuration
//!
//! The layered drop tree, loaded once from TOML:
//!
//! ```toml
//! debug = false
//! variant-tokens = "registry"
//!
//! [drops.ZOMBIE]
//! base-drop-chance = 0.05
//! looting-bonus = 0.02
//!
//! [drops.ZOMBIE.itemstack]
//! type = "ZOMBIE_HEAD"
//!
//! [drops.WOLF.variants.angry_pale]
//! base-drop-chance = 0.10
//! itemstack = { display-name = "<red>Angry Pale Wolf Head", internal = "eyJ0ZXh0dXJlcyI6..." }
//! ```
//!
//! The tree is read-only after load. Values that are out of range are kept
//! as written and reported as warnings; the decision engine clamps them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use trophy_shared::MaterialKind;

use crate::error::{TrophyError, TrophyResult};

/// Drop sections keyed by upper-case type key.
pub type DropTree = BTreeMap<String, DropSection>;

/// Which generation of variant tokens the classifier emits.
///
/// The two generations disagree for ghasts (`shooting` vs `charging`) and
/// llamas (`<color>` vs `llama_<color>` / `trader_llama_<color>`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantTokenScheme {
    /// Registry-key based tokens.
    #[default]
    Registry,
    /// Tokens from the older entity-state table.
    Legacy,
}

/// Root configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TrophyConfig {
    /// Emit diagnostic decisions at `info` instead of `trace`.
    pub debug: bool,
    /// Variant token generation.
    pub variant_tokens: VariantTokenScheme,
    /// Fixed RNG seed for reproducible rolls. Entropy-seeded when absent.
    pub rng_seed: Option<u64>,
    /// Drop sections.
    pub drops: DropTree,
}

/// Base drop section for one creature type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DropSection {
    /// Chance of a drop with no bonus (0.0-1.0).
    pub base_drop_chance: f64,
    /// Chance added per bonus level.
    pub looting_bonus: f64,
    /// Item appearance.
    pub itemstack: ItemStackSection,
    /// Variant overrides keyed by lower-case variant key.
    pub variants: BTreeMap<String, VariantSection>,
}

/// Variant override. Replaces the base section wholesale when it matches.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct VariantSection {
    /// Chance of a drop with no bonus (0.0-1.0).
    pub base_drop_chance: f64,
    /// Chance added per bonus level.
    pub looting_bonus: f64,
    /// Item appearance.
    pub itemstack: ItemStackSection,
}

/// Item appearance settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ItemStackSection {
    /// Material name, e.g. `PLAYER_HEAD`.
    #[serde(rename = "type")]
    pub material: Option<String>,
    /// Display name markup.
    pub display_name: Option<String>,
    /// Lore markup, one line or several.
    pub lore: Option<LoreTemplate>,
    /// Sound played by a note block under the placed head.
    pub head_sound: Option<String>,
    /// Skin token (base64 texture payload).
    pub internal: Option<String>,
    /// Skin texture URL, used to match placed heads to sounds.
    pub url: Option<String>,
}

/// Lore given as a single line or a list of lines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoreTemplate {
    /// One line. Empty means no lore.
    Line(String),
    /// Ordered lines.
    Lines(Vec<String>),
}

impl LoreTemplate {
    /// Returns the configured lines in order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Line(line) if line.is_empty() => Vec::new(),
            Self::Line(line) => vec![line.clone()],
            Self::Lines(lines) => lines.clone(),
        }
    }
}

/// A suspicious value found while loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted path of the offending value.
    pub path: String,
    /// What is wrong with it.
    pub message: String,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl TrophyConfig {
    /// Parses configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`TrophyError::InvalidConfig`] if the text is not valid TOML
    /// or does not match the expected shape.
    pub fn from_toml_str(text: &str) -> TrophyResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| TrophyError::InvalidConfig(e.to_string()))?;
        for warning in config.lint() {
            tracing::warn!(path = %warning.path, "{}", warning.message);
        }
        tracing::info!(
            drops = config.drops.len(),
            variants = config.drops.values().map(|d| d.variants.len()).sum::<usize>(),
            "loaded drop configuration"
        );
        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`TrophyError::ConfigIo`] if the file cannot be read and
    /// [`TrophyError::InvalidConfig`] if it cannot be parsed.
    pub fn from_file(path: impl AsRef<Path>) -> TrophyResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| TrophyError::ConfigIo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Reports values that will be clamped or defaulted at drop time.
    #[must_use]
    pub fn lint(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        for (type_key, section) in &self.drops {
            let base = format!("drops.{type_key}");
            lint_section(
                &base,
                section.base_drop_chance,
                section.looting_bonus,
                &section.itemstack,
                &mut warnings,
            );
            for (variant, variant_section) in &section.variants {
                lint_section(
                    &format!("{base}.variants.{variant}"),
                    variant_section.base_drop_chance,
                    variant_section.looting_bonus,
                    &variant_section.itemstack,
                    &mut warnings,
                );
            }
        }
        warnings
    }
}

fn lint_section(
    path: &str,
    chance: f64,
    bonus: f64,
    itemstack: &ItemStackSection,
    warnings: &mut Vec<ConfigWarning>,
) {
    if !chance.is_finite() || !(0.0..=1.0).contains(&chance) {
        warnings.push(ConfigWarning {
            path: format!("{path}.base-drop-chance"),
            message: format!("{chance} is outside 0.0-1.0 and will be clamped"),
        });
    }
    if !bonus.is_finite() || bonus < 0.0 {
        warnings.push(ConfigWarning {
            path: format!("{path}.looting-bonus"),
            message: format!("{bonus} should be a non-negative number"),
        });
    }
    if let Some(material) = &itemstack.material {
        if MaterialKind::from_name(material).is_none() {
            warnings.push(ConfigWarning {
                path: format!("{path}.itemstack.type"),
                message: format!("unknown head material {material:?}, PLAYER_HEAD will be used"),
            });
        }
    }
}
