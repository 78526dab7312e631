//! # Creature Snapshots
//!
//! Read-only view of a creature at the moment it died. The host fills in
//! whatever sub-state its creature type carries; fields that do not apply
//! stay at their defaults.

use serde::{Deserialize, Serialize};

/// Type-specific sub-state of a creature.
///
/// String fields hold the host's raw value (an enum name such as `"RED"` or a
/// registry key such as `"minecraft:pale"`); the classifier canonicalizes them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CreatureTraits {
    /// Registry-backed subtype (wolf/cat/frog variant, fox type, panda gene...).
    pub variant: Option<String>,
    /// Coat or dye color.
    pub color: Option<String>,
    /// Villager profession.
    pub profession: Option<String>,
    /// Plain-text custom name tag.
    pub custom_name: Option<String>,
    /// Hostile toward a target (wolves).
    pub angry: bool,
    /// Remaining anger ticks (bees).
    pub anger: u32,
    /// Charging a fireball.
    pub charging: bool,
    /// Wearing a harness in the chest slot.
    pub saddled: bool,
    /// Screaming variant (goats).
    pub screaming: bool,
    /// Pumpkin removed (snow golems).
    pub derp: bool,
    /// Out of lava and cold (striders).
    pub shivering: bool,
}

/// A creature as seen by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CreatureSnapshot {
    /// Upper-case entity type name, e.g. `"ZOMBIE"`.
    pub type_key: String,
    /// Whether the creature is a mob (players, armor stands etc. are not).
    #[serde(default = "default_is_mob")]
    pub is_mob: bool,
    /// Type-specific sub-state.
    #[serde(default)]
    pub traits: CreatureTraits,
}

fn default_is_mob() -> bool {
    true
}

impl CreatureSnapshot {
    /// Creates a mob snapshot with no sub-state.
    #[must_use]
    pub fn new(type_key: impl Into<String>) -> Self {
        Self {
            type_key: type_key.into(),
            is_mob: true,
            traits: CreatureTraits::default(),
        }
    }

    /// Replaces the sub-state.
    #[must_use]
    pub fn with_traits(mut self, traits: CreatureTraits) -> Self {
        self.traits = traits;
        self
    }

    /// Marks the snapshot as a non-mob entity.
    #[must_use]
    pub fn not_mob(mut self) -> Self {
        self.is_mob = false;
        self
    }
}
