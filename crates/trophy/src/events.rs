//! # Trophy Event System
//!
//! Host notifications in, trophy effects out.
//!
//! ```text
//! ┌─────────────┐  HostEvent   ┌──────────────────┐  TrophyEvent  ┌─────────────┐
//! │    Host     │─────────────>│  TrophyListener  │──────────────>│    Host     │
//! │   (World)   │              │  (TrophySystem)  │   (channel)   │  (Spawner)  │
//! └─────────────┘              └──────────────────┘               └─────────────┘
//! ```
//!
//! Outgoing events go through a bounded crossbeam channel. A full channel
//! drops the event rather than stalling the simulation thread.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use trophy_drops::{HeadSkin, ItemIdentity};
use trophy_shared::{BlockPos, CreatureSnapshot, Vec3};

/// The entity responsible for a kill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Killer {
    /// Whether the killer is a player.
    pub is_player: bool,
    /// Looting level of the killer's weapon.
    pub looting_level: u32,
}

impl Killer {
    /// A player with the given looting level.
    #[must_use]
    pub const fn player(looting_level: u32) -> Self {
        Self {
            is_player: true,
            looting_level,
        }
    }
}

/// Notifications from the host world.
#[derive(Clone, Debug)]
pub enum HostEvent {
    // =========================================================================
    // Kills
    // =========================================================================
    /// A creature died.
    CreatureDied {
        /// The creature at the moment of death.
        creature: CreatureSnapshot,
        /// Where it died.
        position: Vec3,
        /// Who killed it, if anyone.
        killer: Option<Killer>,
    },

    // =========================================================================
    // Head blocks
    // =========================================================================
    /// A head item was placed as a block.
    HeadPlaced {
        /// Block position.
        pos: BlockPos,
        /// Raw material name of the placed item.
        material: String,
        /// Identity of the item in hand.
        identity: ItemIdentity,
    },

    /// A head block is being broken.
    HeadBroken {
        /// Block position.
        pos: BlockPos,
        /// Raw material name of the block.
        material: String,
    },

    /// A note block fired.
    NotePlayed {
        /// Note block position.
        pos: BlockPos,
        /// Raw material name of the block above.
        above: String,
        /// Skin of the block above, if it is a player head.
        skin: HeadSkin,
    },
}

/// Effects for the host to carry out.
#[derive(Clone, Debug, PartialEq)]
pub enum TrophyEvent {
    /// Spawn a head where a creature died.
    DropItem {
        /// Spawn position.
        position: Vec3,
        /// The head.
        identity: ItemIdentity,
    },

    /// Cancel the default drop of a broken head block and spawn this instead.
    ReplaceBlockDrop {
        /// Broken block.
        pos: BlockPos,
        /// The restored head.
        identity: ItemIdentity,
    },

    /// Play a sound at a note block instead of its note.
    PlaySound {
        /// Note block position.
        pos: BlockPos,
        /// Sound key.
        sound: String,
    },
}

/// Bounded channel carrying [`TrophyEvent`]s.
pub struct EventBus {
    sender: Sender<TrophyEvent>,
    receiver: Receiver<TrophyEvent>,
}

impl EventBus {
    /// Creates a bus holding at most `capacity` pending events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// A new sending handle.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// A new receiving handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a bus and returns both ends.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

/// Sending end of an [`EventBus`].
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<TrophyEvent>,
}

impl EventSender {
    /// Sends without blocking. Returns `false` if the event was dropped.
    #[inline]
    pub fn send(&self, event: TrophyEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(dropped)) => {
                tracing::warn!(?dropped, "trophy event channel full");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Receiving end of an [`EventBus`].
#[derive(Clone)]
pub struct EventReceiver {
    receiver: Receiver<TrophyEvent>,
}

impl EventReceiver {
    /// Takes every pending event.
    #[inline]
    pub fn drain(&self) -> Vec<TrophyEvent> {
        let mut events = Vec::with_capacity(8);
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Takes one pending event.
    #[inline]
    pub fn try_recv(&self) -> Option<TrophyEvent> {
        self.receiver.try_recv().ok()
    }

    /// Number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}
