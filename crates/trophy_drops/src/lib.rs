//! # Trophy Drops
//!
//! Drop resolution and identity persistence for creature head trophies.
//!
//! ## Design Principles
//!
//! 1. **Two-level config** - a variant section beats the base section, nothing else is consulted
//! 2. **Never fail on data** - bad materials, markup or stored records fall back to defaults
//! 3. **Certified once** - a restored head carries the certification line exactly once
//! 4. **Host owns the world** - the engine returns identities and sounds, it spawns nothing
//!
//! ## Threading
//!
//! Everything runs synchronously inside one host notification. The loaded
//! configuration is read-only; block stores are only touched by the handler
//! for their own block.
//!
//! ## Example
//!
//! ```rust,ignore
//! use trophy_drops::TrophySystem;
//! use trophy_shared::CreatureSnapshot;
//!
//! let mut system = TrophySystem::from_file("data/drops.toml")?;
//! let outcome = system.on_creature_death(&CreatureSnapshot::new("ZOMBIE"), looting_level);
//! if let Some(head) = outcome.identity() {
//!     host.spawn_item(head);
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod catalog;
pub mod chance;
pub mod config;
pub mod error;
pub mod identity;
pub mod persistence;
pub mod resolver;
pub mod sound;
pub mod systems;
pub mod text;
pub mod variant;

pub use catalog::{CatalogEntry, DropCatalog, HeadSelection};
pub use chance::{decide, decide_with_draw, final_chance, simulate_drop_rate, DropDecision, DropStats};
pub use config::{DropSection, DropTree, ItemStackSection, LoreTemplate, TrophyConfig, VariantSection, VariantTokenScheme};
pub use error::{TrophyError, TrophyResult};
pub use identity::{sanitize_profile_name, IdentitySynthesizer, ItemIdentity, SkinProfile};
pub use persistence::{BlockStore, MemoryBlockStore, PersistedRecord, PersistenceCodec};
pub use resolver::{ConfigResolver, DropSettings, ItemTemplate, SettingsSource};
pub use sound::{HeadSkin, HeadSoundIndex};
pub use systems::{KillOutcome, TrophySystem};
pub use text::{MiniMarkup, RichText, RichTextCodec, Span, Style};
pub use variant::VariantClassifier;
