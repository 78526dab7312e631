//! # Head Persistence
//!
//! Round-trips a head's identity through the key-value store attached to a
//! placed head block, so breaking the block gives back the same head.
//!
//! ## Record Layout
//!
//! ```text
//! trophydrops:head_material   string  MaterialKind name
//! trophydrops:head_name       string  rendered display name markup
//! trophydrops:head_lore       string  rendered lore lines joined by U+001F
//! trophydrops:head_texture    string  skin token
//! trophydrops:head_sound      string  sound token
//! trophydrops:certified_added byte    1 once the certification line exists
//! ```
//!
//! ## Certification
//!
//! A restored head carries the certification line exactly once. Two checks
//! guard it: the stored flag, and a plain-text scan of the stored lore for
//! records written before the flag existed. The line is appended only when
//! both come up empty. Neither check may be dropped.

use std::collections::BTreeMap;

use trophy_shared::constants::keys;
use trophy_shared::{MaterialKind, CERTIFICATION_LINE, DEFAULT_PROFILE_NAME, LORE_DELIMITER};

use crate::identity::{sanitize_profile_name, ItemIdentity};
use crate::text::{RichText, RichTextCodec};

// ============================================================================
// Block store
// ============================================================================

/// Key-value storage bound to one placed block.
pub trait BlockStore {
    /// Reads a string value.
    fn get_string(&self, key: &str) -> Option<String>;
    /// Writes a string value.
    fn set_string(&mut self, key: &str, value: String);
    /// Reads a byte value.
    fn get_byte(&self, key: &str) -> Option<u8>;
    /// Writes a byte value.
    fn set_byte(&mut self, key: &str, value: u8);
    /// Deletes a value of either kind.
    fn remove(&mut self, key: &str);
}

/// A stored value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreValue {
    /// String value.
    Text(String),
    /// Byte value.
    Byte(u8),
}

/// In-memory [`BlockStore`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryBlockStore {
    values: BTreeMap<String, StoreValue>,
}

impl MemoryBlockStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

}

impl BlockStore for MemoryBlockStore {
    fn get_string(&self, key: &str) -> Option<String> {
        match self.values.get(key) {
            Some(StoreValue::Text(text)) => Some(text.clone()),
            _ => None,
        }
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), StoreValue::Text(value));
    }

    fn get_byte(&self, key: &str) -> Option<u8> {
        match self.values.get(key) {
            Some(StoreValue::Byte(byte)) => Some(*byte),
            _ => None,
        }
    }

    fn set_byte(&mut self, key: &str, value: u8) {
        self.values.insert(key.to_string(), StoreValue::Byte(value));
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

// ============================================================================
// Record
// ============================================================================

/// The serialized form of a head, field for field as stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersistedRecord {
    /// Material kind name.
    pub material: Option<String>,
    /// Rendered display name.
    pub display_name: Option<String>,
    /// Rendered lore lines joined by [`LORE_DELIMITER`].
    pub lore: Option<String>,
    /// Skin token.
    pub skin_token: Option<String>,
    /// Sound token.
    pub sound: Option<String>,
    /// Certified flag.
    pub certified: bool,
}

impl PersistedRecord {
    /// Reads whatever is present in `store`.
    #[must_use]
    pub fn read_from(store: &dyn BlockStore) -> Self {
        Self {
            material: store.get_string(keys::MATERIAL),
            display_name: store.get_string(keys::NAME),
            lore: store.get_string(keys::LORE),
            skin_token: store.get_string(keys::TEXTURE),
            sound: store.get_string(keys::SOUND),
            certified: store.get_byte(keys::CERTIFIED).is_some(),
        }
    }

    /// Writes every field. Absent fields are removed from the store; the
    /// certified flag is only ever added.
    pub fn write_to(&self, store: &mut dyn BlockStore) {
        for (key, value) in [
            (keys::MATERIAL, &self.material),
            (keys::NAME, &self.display_name),
            (keys::LORE, &self.lore),
            (keys::TEXTURE, &self.skin_token),
            (keys::SOUND, &self.sound),
        ] {
            match value {
                Some(value) => store.set_string(key, value.clone()),
                None => store.remove(key),
            }
        }
        if self.certified {
            store.set_byte(keys::CERTIFIED, 1);
        }
    }
}

// ============================================================================
// Codec
// ============================================================================

/// Saves and restores heads through a [`BlockStore`].
#[derive(Clone, Copy)]
pub struct PersistenceCodec<'a> {
    codec: &'a dyn RichTextCodec,
    debug: bool,
}

impl<'a> PersistenceCodec<'a> {
    /// Creates a codec using `codec` for markup.
    #[must_use]
    pub fn new(codec: &'a dyn RichTextCodec, debug: bool) -> Self {
        Self { codec, debug }
    }

    /// Serializes an identity.
    ///
    /// The certified flag is set when the identity already carries it or
    /// its lore already holds the certification line in plain text.
    #[must_use]
    pub fn encode(&self, identity: &ItemIdentity) -> PersistedRecord {
        let lore = (!identity.lore.is_empty()).then(|| {
            let rendered: Vec<String> = identity
                .lore
                .iter()
                .map(|line| self.codec.render(line))
                .collect();
            rendered.join(&LORE_DELIMITER.to_string())
        });

        PersistedRecord {
            material: Some(identity.material.name().to_string()),
            display_name: identity
                .display_name
                .as_ref()
                .map(|name| self.codec.render(name)),
            lore,
            skin_token: identity.skin_token.clone(),
            sound: identity.sound.clone(),
            certified: identity.certified || has_certification_line(&identity.lore),
        }
    }

    /// Writes an identity into a freshly placed block's store.
    pub fn save(&self, identity: &ItemIdentity, store: &mut dyn BlockStore) {
        let record = self.encode(identity);
        record.write_to(store);
        if self.debug {
            tracing::info!(
                material = record.material.as_deref(),
                name = record.display_name.as_deref(),
                lore = record.lore.as_deref(),
                texture = record.skin_token.is_some(),
                certified = record.certified,
                "saved head to block"
            );
        } else {
            tracing::trace!(material = record.material.as_deref(), "saved head to block");
        }
    }

    /// Rebuilds an identity from a stored record.
    ///
    /// `observed` is the material of the block being broken. It is used,
    /// in item form, when the stored material is missing or unreadable.
    #[must_use]
    pub fn decode(&self, record: &PersistedRecord, observed: MaterialKind) -> ItemIdentity {
        self.decode_certifying(record, observed).0
    }

    /// Decodes a record and reports whether the certification line was
    /// appended.
    fn decode_certifying(
        &self,
        record: &PersistedRecord,
        observed: MaterialKind,
    ) -> (ItemIdentity, bool) {
        let material = match record.material.as_deref().map(MaterialKind::from_name) {
            Some(Some(kind)) => kind.item_form(),
            Some(None) => {
                if self.debug {
                    tracing::warn!(stored = record.material.as_deref(), %observed, "unreadable stored material");
                }
                observed.item_form()
            }
            None => observed.item_form(),
        };

        let display_name = record
            .display_name
            .as_deref()
            .filter(|markup| !markup.is_empty())
            .map(|markup| self.codec.parse(markup));

        let mut lore: Vec<RichText> = record
            .lore
            .as_deref()
            .filter(|joined| !joined.is_empty())
            .map(|joined| {
                joined
                    .split(LORE_DELIMITER)
                    .map(|line| self.codec.parse(line))
                    .collect()
            })
            .unwrap_or_default();

        let appended = !record.certified && !has_certification_line(&lore);
        if appended {
            lore.push(self.codec.parse(CERTIFICATION_LINE));
        }

        let skin_token = record
            .skin_token
            .clone()
            .filter(|token| !token.is_empty() && material.is_player_head());

        let profile_name = display_name
            .as_ref()
            .map_or_else(|| DEFAULT_PROFILE_NAME.to_string(), |name| sanitize_profile_name(&name.plain()));

        let identity = ItemIdentity {
            material,
            display_name,
            lore,
            sound: record.sound.clone().filter(|s| !s.is_empty()),
            skin_token,
            profile_name,
            certified: true,
        };
        (identity, appended)
    }

    /// Restores the head of a block being broken.
    ///
    /// Sets the certified flag in `store` if the line had to be added.
    pub fn restore(&self, store: &mut dyn BlockStore, observed: MaterialKind) -> ItemIdentity {
        let record = PersistedRecord::read_from(store);
        let (identity, appended) = self.decode_certifying(&record, observed);
        if appended {
            store.set_byte(keys::CERTIFIED, 1);
        }
        if self.debug {
            tracing::info!(
                material = %identity.material,
                lore_lines = identity.lore.len(),
                profile = %identity.profile_name,
                "restored head from block"
            );
        } else {
            tracing::trace!(material = %identity.material, "restored head from block");
        }
        identity
    }
}

/// True when any line reads exactly as the certification line.
#[must_use]
pub fn has_certification_line(lore: &[RichText]) -> bool {
    lore.iter().any(|line| line.plain() == CERTIFICATION_LINE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::MiniMarkup;

    fn codec() -> PersistenceCodec<'static> {
        PersistenceCodec::new(&MiniMarkup, false)
    }

    fn head() -> ItemIdentity {
        ItemIdentity {
            material: MaterialKind::PlayerHead,
            display_name: Some(MiniMarkup.parse("<red>Angry <bold>Pale</bold> Wolf")),
            lore: vec![MiniMarkup.parse("<gray>Rare"), MiniMarkup.parse("Bites")],
            sound: Some("entity.wolf.growl".into()),
            skin_token: Some("eyJ0ZXh0dXJlcyI6e30=".into()),
            profile_name: "AngryPaleWolf".into(),
            certified: false,
        }
    }

    fn count_certified(identity: &ItemIdentity) -> usize {
        identity
            .plain_lore()
            .iter()
            .filter(|line| *line == CERTIFICATION_LINE)
            .count()
    }

    #[test]
    fn test_round_trip_keeps_fields_and_certifies() {
        let original = head();
        let mut store = MemoryBlockStore::new();
        codec().save(&original, &mut store);
        assert_eq!(store.get_byte(keys::CERTIFIED), None);

        let restored = codec().restore(&mut store, MaterialKind::PlayerHead);
        assert_eq!(restored.material, original.material);
        assert_eq!(restored.display_name, original.display_name);
        assert_eq!(&restored.lore[..2], &original.lore[..]);
        assert_eq!(restored.lore.len(), 3);
        assert_eq!(count_certified(&restored), 1);
        assert_eq!(restored.skin_token, original.skin_token);
        assert_eq!(restored.sound, original.sound);
        assert_eq!(restored.profile_name, "AngryPaleWolf");
        assert!(restored.certified);
        assert_eq!(store.get_byte(keys::CERTIFIED), Some(1));
    }

    #[test]
    fn test_repeated_cycles_never_duplicate_line() {
        let mut identity = head();
        for _ in 0..5 {
            let mut store = MemoryBlockStore::new();
            codec().save(&identity, &mut store);
            identity = codec().restore(&mut store, MaterialKind::PlayerHead);
            assert_eq!(count_certified(&identity), 1);
        }
        assert_eq!(identity.lore.len(), 3);
    }

    #[test]
    fn test_already_certified_lore_is_untouched() {
        let mut identity = head();
        identity.lore.push(MiniMarkup.parse("<gold><italic>[Certified Authentic]"));
        let mut store = MemoryBlockStore::new();
        codec().save(&identity, &mut store);
        assert_eq!(store.get_byte(keys::CERTIFIED), Some(1));

        let restored = codec().restore(&mut store, MaterialKind::PlayerHead);
        assert_eq!(restored.lore, identity.lore);
        assert_eq!(count_certified(&restored), 1);
    }

    #[test]
    fn test_flag_alone_blocks_the_line() {
        let mut store = MemoryBlockStore::new();
        store.set_string(keys::MATERIAL, "PLAYER_HEAD".into());
        store.set_byte(keys::CERTIFIED, 1);
        let restored = codec().restore(&mut store, MaterialKind::PlayerHead);
        assert!(restored.lore.is_empty());
        assert!(restored.certified);
    }

    #[test]
    fn test_legacy_record_without_flag_is_detected_by_scan() {
        let mut store = MemoryBlockStore::new();
        store.set_string(keys::LORE, format!("Old{LORE_DELIMITER}[Certified Authentic]"));
        let restored = codec().restore(&mut store, MaterialKind::PlayerHead);
        assert_eq!(restored.plain_lore(), vec!["Old", CERTIFICATION_LINE]);
        assert_eq!(store.get_byte(keys::CERTIFIED), None);
    }

    #[test]
    fn test_backslash_names_survive_round_trip() {
        let mut identity = head();
        identity.display_name = Some(MiniMarkup.parse(r"<red>C:\"));
        identity.lore = vec![MiniMarkup.parse(r"<gray>back\slash\"), MiniMarkup.parse(r"\")];
        let mut store = MemoryBlockStore::new();
        codec().save(&identity, &mut store);

        let restored = codec().restore(&mut store, MaterialKind::PlayerHead);
        assert_eq!(restored.display_name, identity.display_name);
        assert_eq!(&restored.lore[..2], &identity.lore[..]);
        assert_eq!(restored.profile_name, "C");
    }

    #[test]
    fn test_bad_material_falls_back_to_observed_item_form() {
        let mut store = MemoryBlockStore::new();
        store.set_string(keys::MATERIAL, "NOT_A_HEAD".into());
        store.set_string(keys::TEXTURE, "token".into());
        let restored = codec().restore(&mut store, MaterialKind::ZombieWallHead);
        assert_eq!(restored.material, MaterialKind::ZombieHead);
        assert_eq!(restored.skin_token, None);

        let mut empty = MemoryBlockStore::new();
        let restored = codec().restore(&mut empty, MaterialKind::PlayerWallHead);
        assert_eq!(restored.material, MaterialKind::PlayerHead);
        assert_eq!(restored.display_name, None);
        assert_eq!(restored.profile_name, "MobHead");
        assert_eq!(restored.plain_lore(), vec![CERTIFICATION_LINE]);
    }

    #[test]
    fn test_empty_lore_string_is_no_lore() {
        let record = PersistedRecord {
            lore: Some(String::new()),
            certified: true,
            ..Default::default()
        };
        assert!(codec().decode(&record, MaterialKind::PlayerHead).lore.is_empty());
    }

    #[test]
    fn test_restored_skin_profile_is_deterministic() {
        let mut first = MemoryBlockStore::new();
        let mut second = MemoryBlockStore::new();
        codec().save(&head(), &mut first);
        codec().save(&head(), &mut second);
        let a = codec().restore(&mut first, MaterialKind::PlayerHead).skin_profile();
        let b = codec().restore(&mut second, MaterialKind::PlayerHead).skin_profile();
        assert_eq!(a, b);
        assert!(a.is_some());
    }

    #[test]
    fn test_encode_omits_absent_fields() {
        let mut bare = ItemIdentity::bare(MaterialKind::SkeletonSkull);
        bare.display_name = None;
        let record = codec().encode(&bare);
        assert_eq!(record.material.as_deref(), Some("SKELETON_SKULL"));
        assert_eq!(record.display_name, None);
        assert_eq!(record.lore, None);
        assert!(!record.certified);

        let mut store = MemoryBlockStore::new();
        store.set_string(keys::NAME, "stale".into());
        record.write_to(&mut store);
        assert_eq!(store.len(), 1);
    }
}
