//! # Note Block Sounds
//!
//! A note block under a skinned player head plays that head's sound instead
//! of a note. Lookup order:
//!
//! 1. the sound stored in the head block's store
//! 2. a configured `head-sound` whose `internal` skin token matches
//! 3. a configured `head-sound` whose `url` matches (case-insensitive)

use std::collections::HashMap;

use trophy_shared::constants::keys;
use trophy_shared::MaterialKind;

use crate::config::{DropTree, ItemStackSection};
use crate::persistence::BlockStore;

/// Skin data read from a placed player head.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeadSkin {
    /// Texture payload.
    pub token: Option<String>,
    /// Texture URL decoded by the host.
    pub url: Option<String>,
}

/// Skin → sound lookup built from the drop tree.
#[derive(Clone, Debug, Default)]
pub struct HeadSoundIndex {
    by_token: HashMap<String, String>,
    by_url: HashMap<String, String>,
}

impl HeadSoundIndex {
    /// Indexes every base and variant section that has a sound.
    #[must_use]
    pub fn build(tree: &DropTree) -> Self {
        let mut index = Self::default();
        for section in tree.values() {
            index.add(&section.itemstack);
            for variant in section.variants.values() {
                index.add(&variant.itemstack);
            }
        }
        index
    }

    fn add(&mut self, itemstack: &ItemStackSection) {
        let Some(sound) = itemstack.head_sound.as_ref().filter(|s| !s.is_empty()) else {
            return;
        };
        if let Some(token) = itemstack.internal.as_ref().filter(|t| !t.is_empty()) {
            self.by_token.entry(token.clone()).or_insert_with(|| sound.clone());
        }
        if let Some(url) = itemstack.url.as_ref().filter(|u| !u.is_empty()) {
            self.by_url
                .entry(url.to_lowercase())
                .or_insert_with(|| sound.clone());
        }
    }

    /// Number of indexed skins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_token.len() + self.by_url.len()
    }

    /// True when no section has a sound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sound configured for a skin.
    #[must_use]
    pub fn lookup(&self, skin: &HeadSkin) -> Option<&str> {
        let by_token = skin
            .token
            .as_ref()
            .and_then(|token| self.by_token.get(token));
        let by_url = || {
            skin.url
                .as_ref()
                .and_then(|url| self.by_url.get(&url.to_lowercase()))
        };
        by_token.or_else(by_url).map(String::as_str)
    }

    /// Sound a note block should play given the block above it.
    #[must_use]
    pub fn resolve_note_sound(
        &self,
        above: MaterialKind,
        store: Option<&dyn BlockStore>,
        skin: &HeadSkin,
    ) -> Option<String> {
        if !above.is_player_head() {
            return None;
        }
        store
            .and_then(|store| store.get_string(keys::SOUND))
            .filter(|sound| !sound.is_empty())
            .or_else(|| self.lookup(skin).map(str::to_string))
    }
}
