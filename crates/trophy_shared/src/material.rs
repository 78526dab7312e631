//! # Head Materials
//!
//! The closed set of head items and their wall-mounted block forms.

use serde::{Deserialize, Serialize};

/// Material of a head item or placed head block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialKind {
    /// Generic player-likeness head; the only kind that carries a skin.
    #[default]
    PlayerHead,
    /// Player head mounted on a wall.
    PlayerWallHead,
    /// Zombie head.
    ZombieHead,
    /// Zombie head mounted on a wall.
    ZombieWallHead,
    /// Skeleton skull.
    SkeletonSkull,
    /// Skeleton skull mounted on a wall.
    SkeletonWallSkull,
    /// Wither skeleton skull.
    WitherSkeletonSkull,
    /// Wither skeleton skull mounted on a wall.
    WitherSkeletonWallSkull,
    /// Creeper head.
    CreeperHead,
    /// Creeper head mounted on a wall.
    CreeperWallHead,
    /// Dragon head.
    DragonHead,
    /// Dragon head mounted on a wall.
    DragonWallHead,
    /// Piglin head.
    PiglinHead,
    /// Piglin head mounted on a wall.
    PiglinWallHead,
}

impl MaterialKind {
    /// Every material kind.
    pub const ALL: [Self; 14] = [
        Self::PlayerHead,
        Self::PlayerWallHead,
        Self::ZombieHead,
        Self::ZombieWallHead,
        Self::SkeletonSkull,
        Self::SkeletonWallSkull,
        Self::WitherSkeletonSkull,
        Self::WitherSkeletonWallSkull,
        Self::CreeperHead,
        Self::CreeperWallHead,
        Self::DragonHead,
        Self::DragonWallHead,
        Self::PiglinHead,
        Self::PiglinWallHead,
    ];

    /// Canonical upper-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PlayerHead => "PLAYER_HEAD",
            Self::PlayerWallHead => "PLAYER_WALL_HEAD",
            Self::ZombieHead => "ZOMBIE_HEAD",
            Self::ZombieWallHead => "ZOMBIE_WALL_HEAD",
            Self::SkeletonSkull => "SKELETON_SKULL",
            Self::SkeletonWallSkull => "SKELETON_WALL_SKULL",
            Self::WitherSkeletonSkull => "WITHER_SKELETON_SKULL",
            Self::WitherSkeletonWallSkull => "WITHER_SKELETON_WALL_SKULL",
            Self::CreeperHead => "CREEPER_HEAD",
            Self::CreeperWallHead => "CREEPER_WALL_HEAD",
            Self::DragonHead => "DRAGON_HEAD",
            Self::DragonWallHead => "DRAGON_WALL_HEAD",
            Self::PiglinHead => "PIGLIN_HEAD",
            Self::PiglinWallHead => "PIGLIN_WALL_HEAD",
        }
    }

    /// Parses a material name.
    ///
    /// Case-insensitive; a leading `minecraft:` namespace is accepted.
    /// Returns `None` for anything that is not a head.
    #[must_use]
    pub fn from_name(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let bare = trimmed
            .strip_prefix("minecraft:")
            .or_else(|| trimmed.strip_prefix("MINECRAFT:"))
            .unwrap_or(trimmed);
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(bare))
    }

    /// Returns the item form of a wall-mounted block.
    #[must_use]
    pub const fn item_form(self) -> Self {
        match self {
            Self::PlayerWallHead => Self::PlayerHead,
            Self::ZombieWallHead => Self::ZombieHead,
            Self::SkeletonWallSkull => Self::SkeletonSkull,
            Self::WitherSkeletonWallSkull => Self::WitherSkeletonSkull,
            Self::CreeperWallHead => Self::CreeperHead,
            Self::DragonWallHead => Self::DragonHead,
            Self::PiglinWallHead => Self::PiglinHead,
            other => other,
        }
    }

    /// True for the player-likeness head in either form.
    #[inline]
    #[must_use]
    pub const fn is_player_head(self) -> bool {
        matches!(self, Self::PlayerHead | Self::PlayerWallHead)
    }
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
