//! # Trophy System
//!
//! The one object a host keeps around. It owns the loaded configuration,
//! the markup codec and the drop RNG, and wires the components together
//! for each host notification.
//!
//! ## The Kill Pipeline
//!
//! ```text
//! Creature dies -> on_creature_death() ->
//!   1. Classify variant
//!   2. Resolve settings (variant section, then base)
//!   3. Roll base + level * bonus
//!   4. Synthesize the head on success
//! ```
//!
//! ## The Block Pipeline
//!
//! ```text
//! Head placed  -> on_head_placed() -> save identity into block store
//! Head broken  -> on_head_broken() -> restore identity, certify once
//! Note played  -> on_note_played() -> stored sound, else configured sound
//! ```

use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use trophy_shared::{CreatureSnapshot, MaterialKind};

use crate::catalog::DropCatalog;
use crate::chance::{self, DropDecision, DropStats};
use crate::config::TrophyConfig;
use crate::error::{TrophyError, TrophyResult};
use crate::identity::{IdentitySynthesizer, ItemIdentity};
use crate::persistence::{BlockStore, PersistenceCodec};
use crate::resolver::{ConfigResolver, DropSettings};
use crate::sound::{HeadSkin, HeadSoundIndex};
use crate::text::{MiniMarkup, RichTextCodec};
use crate::variant::VariantClassifier;

/// What happened to one kill.
#[derive(Clone, Debug, PartialEq)]
pub enum KillOutcome {
    /// Nothing is configured for this type and variant.
    Unconfigured {
        /// Upper-case type key of the creature.
        type_key: String,
        /// Classified variant.
        variant: Option<String>,
    },
    /// The roll failed.
    Missed {
        /// Classified variant.
        variant: Option<String>,
        /// The roll.
        decision: DropDecision,
    },
    /// A head dropped.
    Dropped {
        /// Classified variant.
        variant: Option<String>,
        /// The roll.
        decision: DropDecision,
        /// The head to spawn.
        identity: ItemIdentity,
    },
}

impl KillOutcome {
    /// The dropped head, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&ItemIdentity> {
        match self {
            Self::Dropped { identity, .. } => Some(identity),
            _ => None,
        }
    }

    /// Takes the dropped head, if any.
    #[must_use]
    pub fn into_identity(self) -> Option<ItemIdentity> {
        match self {
            Self::Dropped { identity, .. } => Some(identity),
            _ => None,
        }
    }
}

/// Drop engine bound to one loaded configuration.
pub struct TrophySystem {
    config: TrophyConfig,
    codec: Box<dyn RichTextCodec>,
    classifier: VariantClassifier,
    sounds: HeadSoundIndex,
    rng: ChaCha8Rng,
    stats: DropStats,
}

impl TrophySystem {
    /// Creates a system using [`MiniMarkup`] for rich text.
    #[must_use]
    pub fn new(config: TrophyConfig) -> Self {
        Self::with_codec(config, Box::new(MiniMarkup))
    }

    /// Creates a system with a custom rich-text codec.
    #[must_use]
    pub fn with_codec(config: TrophyConfig, codec: Box<dyn RichTextCodec>) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let classifier = VariantClassifier::new(config.variant_tokens);
        let sounds = HeadSoundIndex::build(&config.drops);
        tracing::info!(
            drops = config.drops.len(),
            sounds = sounds.len(),
            seeded = config.rng_seed.is_some(),
            debug = config.debug,
            "trophy system ready"
        );
        Self {
            config,
            codec,
            classifier,
            sounds,
            rng,
            stats: DropStats::default(),
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> TrophyResult<Self> {
        Ok(Self::new(TrophyConfig::from_file(path)?))
    }

    /// Loaded configuration.
    #[must_use]
    pub fn config(&self) -> &TrophyConfig {
        &self.config
    }

    /// Kill counters since creation.
    #[must_use]
    pub fn stats(&self) -> DropStats {
        self.stats
    }

    /// Listing of configured drops.
    #[must_use]
    pub fn catalog(&self) -> DropCatalog<'_> {
        DropCatalog::new(&self.config.drops)
    }

    /// Classifies a creature with the configured token scheme.
    #[must_use]
    pub fn classify(&self, snapshot: &CreatureSnapshot) -> Option<String> {
        self.classifier.classify(snapshot)
    }

    /// Resolves settings for a type and variant.
    #[must_use]
    pub fn resolve(&self, type_key: &str, variant: Option<&str>) -> Option<DropSettings> {
        ConfigResolver::new(&self.config.drops, self.config.debug).resolve(type_key, variant)
    }

    // ========================================================================
    // Kills
    // ========================================================================

    /// Handles a qualifying kill, rolling with the system RNG.
    pub fn on_creature_death(&mut self, snapshot: &CreatureSnapshot, bonus_level: u32) -> KillOutcome {
        self.handle_kill(snapshot, |settings, rng| {
            chance::decide(settings, bonus_level, rng)
        })
    }

    /// Handles a qualifying kill with a pre-drawn value in `[0, 1)`.
    pub fn on_creature_death_with_draw(
        &mut self,
        snapshot: &CreatureSnapshot,
        bonus_level: u32,
        draw: f64,
    ) -> KillOutcome {
        self.handle_kill(snapshot, |settings, _| {
            chance::decide_with_draw(settings, bonus_level, draw)
        })
    }

    fn handle_kill<F>(&mut self, snapshot: &CreatureSnapshot, roll: F) -> KillOutcome
    where
        F: FnOnce(&DropSettings, &mut ChaCha8Rng) -> DropDecision,
    {
        self.stats.kills += 1;
        let upper = snapshot.type_key.trim().to_uppercase();
        let type_key = upper.as_str();
        let variant = self.classifier.classify(snapshot);

        let Some(settings) = self.resolve(type_key, variant.as_deref()) else {
            self.stats.unconfigured += 1;
            return KillOutcome::Unconfigured {
                type_key: type_key.to_string(),
                variant,
            };
        };

        let decision = roll(&settings, &mut self.rng);
        self.stats.record(&decision);
        if self.config.debug {
            tracing::info!(
                type_key,
                variant = variant.as_deref(),
                chance = decision.chance,
                draw = decision.draw,
                dropped = decision.dropped,
                "rolled head drop"
            );
        } else {
            tracing::trace!(type_key, dropped = decision.dropped, "rolled head drop");
        }

        if !decision.dropped {
            return KillOutcome::Missed { variant, decision };
        }
        let identity = self.synthesizer().synthesize(&settings, type_key, variant.as_deref());
        KillOutcome::Dropped {
            variant,
            decision,
            identity,
        }
    }

    // ========================================================================
    // Blocks
    // ========================================================================

    /// Persists a head being placed into its block store.
    pub fn on_head_placed(&self, identity: &ItemIdentity, store: &mut dyn BlockStore) {
        self.persistence().save(identity, store);
    }

    /// Rebuilds the head of a block being broken.
    ///
    /// `block` is the broken block's material; wall forms come back as
    /// their item form.
    pub fn on_head_broken(&self, block: MaterialKind, store: &mut dyn BlockStore) -> ItemIdentity {
        self.persistence().restore(store, block)
    }

    /// Sound for a note block with `above` on top.
    #[must_use]
    pub fn on_note_played(
        &self,
        above: MaterialKind,
        store: Option<&dyn BlockStore>,
        skin: &HeadSkin,
    ) -> Option<String> {
        let sound = self.sounds.resolve_note_sound(above, store, skin);
        if self.config.debug {
            tracing::info!(%above, sound = sound.as_deref(), "note block under head");
        }
        sound
    }

    // ========================================================================
    // Admin
    // ========================================================================

    /// Synthesizes a head for a configured type and optional variant,
    /// without rolling.
    ///
    /// # Errors
    ///
    /// [`TrophyError::UnknownDrop`] or [`TrophyError::UnknownVariant`] when
    /// the requested section does not exist.
    pub fn issue_head(&self, type_key: &str, variant: Option<&str>) -> TrophyResult<ItemIdentity> {
        let selection = self.catalog().select(type_key, variant)?;
        let settings = self
            .resolve(&selection.type_key, selection.variant.as_deref())
            .ok_or_else(|| TrophyError::UnknownDrop(type_key.to_string()))?;
        Ok(self.synthesizer().synthesize(
            &settings,
            &selection.type_key,
            selection.variant.as_deref(),
        ))
    }

    fn synthesizer(&self) -> IdentitySynthesizer<'_> {
        IdentitySynthesizer::new(self.codec.as_ref(), self.config.debug)
    }

    fn persistence(&self) -> PersistenceCodec<'_> {
        PersistenceCodec::new(self.codec.as_ref(), self.config.debug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryBlockStore;
    use trophy_shared::{CreatureTraits, CERTIFICATION_LINE};

    const CONFIG: &str = r#"
        rng-seed = 1

        [drops.ZOMBIE]
        base-drop-chance = 0.05
        looting-bonus = 0.02

        [drops.WOLF]
        base-drop-chance = 0.01
        [drops.WOLF.itemstack]
        display-name = "<gray>Wolf Head"

        [drops.WOLF.variants.angry_pale]
        base-drop-chance = 0.5
        [drops.WOLF.variants.angry_pale.itemstack]
        display-name = "<red>Angry Pale Wolf Head"
        head-sound = "entity.wolf.growl"
        internal = "pale-token"
    "#;

    fn system() -> TrophySystem {
        TrophySystem::new(TrophyConfig::from_toml_str(CONFIG).unwrap())
    }

    fn angry_pale_wolf() -> CreatureSnapshot {
        CreatureSnapshot::new("WOLF").with_traits(CreatureTraits {
            variant: Some("minecraft:pale".into()),
            angry: true,
            ..Default::default()
        })
    }

    #[test]
    fn test_zombie_drop_with_injected_draw() {
        let mut system = system();
        let outcome = system.on_creature_death_with_draw(&CreatureSnapshot::new("ZOMBIE"), 3, 0.05);
        let KillOutcome::Dropped { decision, identity, variant } = outcome else {
            panic!("expected a drop");
        };
        assert!((decision.chance - 0.11).abs() < 1e-12);
        assert_eq!(variant, None);
        assert_eq!(identity.display_name.unwrap().plain(), "Zombie Head");
        assert_eq!(identity.material, MaterialKind::PlayerHead);
    }

    #[test]
    fn test_variant_chance_is_used() {
        let mut system = system();
        let outcome = system.on_creature_death_with_draw(&angry_pale_wolf(), 0, 0.3);
        let identity = outcome.into_identity().unwrap();
        assert_eq!(identity.display_name.unwrap().plain(), "Angry Pale Wolf Head");
        assert_eq!(identity.skin_token.as_deref(), Some("pale-token"));

        let calm = CreatureSnapshot::new("WOLF").with_traits(CreatureTraits {
            variant: Some("minecraft:pale".into()),
            ..Default::default()
        });
        assert!(matches!(
            system.on_creature_death_with_draw(&calm, 0, 0.3),
            KillOutcome::Missed { .. }
        ));
    }

    #[test]
    fn test_lowercase_type_key_resolves() {
        let mut system = system();
        let wolf = CreatureSnapshot::new("wolf").with_traits(CreatureTraits {
            variant: Some("minecraft:pale".into()),
            angry: true,
            ..Default::default()
        });
        let identity = system.on_creature_death_with_draw(&wolf, 0, 0.3).into_identity().unwrap();
        assert_eq!(identity.display_name.unwrap().plain(), "Angry Pale Wolf Head");

        let outcome = system.on_creature_death_with_draw(&CreatureSnapshot::new("Zombie"), 0, 0.0);
        assert!(matches!(outcome, KillOutcome::Dropped { .. }));
        let missing = system.on_creature_death_with_draw(&CreatureSnapshot::new("creeper"), 0, 0.0);
        assert!(matches!(missing, KillOutcome::Unconfigured { type_key, .. } if type_key == "CREEPER"));
    }

    #[test]
    fn test_unconfigured_and_stats() {
        let mut system = system();
        let outcome = system.on_creature_death(&CreatureSnapshot::new("CREEPER"), 0);
        assert!(matches!(outcome, KillOutcome::Unconfigured { .. }));
        system.on_creature_death_with_draw(&CreatureSnapshot::new("ZOMBIE"), 0, 0.9);
        system.on_creature_death_with_draw(&CreatureSnapshot::new("ZOMBIE"), 0, 0.0);

        let stats = system.stats();
        assert_eq!(stats.kills, 3);
        assert_eq!(stats.unconfigured, 1);
        assert_eq!(stats.rolls, 2);
        assert_eq!(stats.drops, 1);
    }

    #[test]
    fn test_seeded_rolls_repeat() {
        let mut a = system();
        let mut b = system();
        let zombie = CreatureSnapshot::new("ZOMBIE");
        for _ in 0..50 {
            assert_eq!(a.on_creature_death(&zombie, 10), b.on_creature_death(&zombie, 10));
        }
    }

    #[test]
    fn test_place_break_note_cycle() {
        let system = system();
        let head = system.issue_head("wolf", Some("ANGRY_PALE")).unwrap();
        let mut store = MemoryBlockStore::new();
        system.on_head_placed(&head, &mut store);

        let sound = system.on_note_played(MaterialKind::PlayerHead, Some(&store), &HeadSkin::default());
        assert_eq!(sound.as_deref(), Some("entity.wolf.growl"));

        let restored = system.on_head_broken(MaterialKind::PlayerWallHead, &mut store);
        assert_eq!(restored.material, MaterialKind::PlayerHead);
        assert_eq!(restored.display_name, head.display_name);
        assert_eq!(restored.plain_lore(), vec![CERTIFICATION_LINE]);
    }

    #[test]
    fn test_issue_head_errors() {
        let system = system();
        assert!(matches!(system.issue_head("pig", None), Err(TrophyError::UnknownDrop(_))));
        assert!(matches!(
            system.issue_head("wolf", Some("ashen")),
            Err(TrophyError::UnknownVariant { .. })
        ));
        assert_eq!(
            system.issue_head("ZOMBIE", None).unwrap().display_name.unwrap().plain(),
            "Zombie Head"
        );
    }
}
