//! # Trophy Listener
//!
//! Drives a [`TrophySystem`] from host notifications and publishes the
//! resulting effects on an [`EventSender`].
//!
//! Filtering done here, before the engine sees anything:
//!
//! - kills count only when a player killed a mob
//! - place and break only apply to head materials
//! - note blocks only react to the block directly above them

use trophy_drops::{BlockStore, KillOutcome, TrophySystem};
use trophy_shared::MaterialKind;

use crate::events::{EventSender, HostEvent, Killer, TrophyEvent};
use crate::stores::{BlockStores, MemoryBlockStores};

/// Connects host events to the drop engine.
pub struct TrophyListener<S: BlockStores = MemoryBlockStores> {
    system: TrophySystem,
    stores: S,
    events: EventSender,
}

impl<S: BlockStores> TrophyListener<S> {
    /// Creates a listener.
    #[must_use]
    pub fn new(system: TrophySystem, stores: S, events: EventSender) -> Self {
        Self {
            system,
            stores,
            events,
        }
    }

    /// The engine.
    #[must_use]
    pub fn system(&self) -> &TrophySystem {
        &self.system
    }

    /// Block stores of placed heads.
    #[must_use]
    pub fn stores(&self) -> &S {
        &self.stores
    }

    /// Handles one host notification.
    ///
    /// Returns `true` if an event was published.
    pub fn handle(&mut self, event: HostEvent) -> bool {
        match event {
            HostEvent::CreatureDied {
                creature,
                position,
                killer,
            } => {
                let Some(looting) = qualifying_kill(creature.is_mob, killer) else {
                    tracing::trace!(type_key = %creature.type_key, "kill ignored");
                    return false;
                };
                match self.system.on_creature_death(&creature, looting) {
                    KillOutcome::Dropped { identity, .. } => {
                        self.publish(TrophyEvent::DropItem { position, identity })
                    }
                    _ => false,
                }
            }

            HostEvent::HeadPlaced {
                pos,
                material,
                identity,
            } => {
                if MaterialKind::from_name(&material).is_none() {
                    return false;
                }
                let store = self.stores.create(pos);
                self.system.on_head_placed(&identity, store);
                false
            }

            HostEvent::HeadBroken { pos, material } => {
                let Some(block) = MaterialKind::from_name(&material) else {
                    return false;
                };
                let mut store = self.stores.remove(pos).unwrap_or_default();
                let identity = self.system.on_head_broken(block, &mut store);
                self.publish(TrophyEvent::ReplaceBlockDrop { pos, identity })
            }

            HostEvent::NotePlayed { pos, above, skin } => {
                let Some(above) = MaterialKind::from_name(&above) else {
                    return false;
                };
                let store = self.stores.get(pos.up()).map(|s| s as &dyn BlockStore);
                match self.system.on_note_played(above, store, &skin) {
                    Some(sound) => self.publish(TrophyEvent::PlaySound { pos, sound }),
                    None => false,
                }
            }
        }
    }

    fn publish(&self, event: TrophyEvent) -> bool {
        self.events.send(event)
    }
}

/// Looting level for a kill that may drop a head.
fn qualifying_kill(is_mob: bool, killer: Option<Killer>) -> Option<u32> {
    let killer = killer.filter(|k| k.is_player)?;
    is_mob.then_some(killer.looting_level)
}
