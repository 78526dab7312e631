//! Fixed values shared by the engine and the host.

macro_rules! namespaced {
    () => {
        "trophydrops"
    };
    ($key:literal) => {
        concat!(namespaced!(), ":", $key)
    };
}

/// Namespace prefix for every key written into a block store.
pub const NAMESPACE: &str = namespaced!();

/// Lore line marking a head as produced by the engine.
pub const CERTIFICATION_LINE: &str = "[Certified Authentic]";

/// Profile name used when a display name sanitizes to nothing.
pub const DEFAULT_PROFILE_NAME: &str = "MobHead";

/// Longest profile name the skin-profile system accepts.
pub const MAX_PROFILE_NAME_LEN: usize = 16;

/// Separator between serialized lore lines (ASCII unit separator).
pub const LORE_DELIMITER: char = '\u{1F}';

/// Block store keys.
pub mod keys {
    /// Material kind name of the placed head.
    pub const MATERIAL: &str = namespaced!("head_material");
    /// Serialized display name.
    pub const NAME: &str = namespaced!("head_name");
    /// Serialized lore lines joined by [`super::LORE_DELIMITER`].
    pub const LORE: &str = namespaced!("head_lore");
    /// Skin token (texture payload).
    pub const TEXTURE: &str = namespaced!("head_texture");
    /// Sound token.
    pub const SOUND: &str = namespaced!("head_sound");
    /// One-byte certified flag.
    pub const CERTIFIED: &str = namespaced!("certified_added");
}
