//! # Trophy
//!
//! Host integration for the trophy drop engine.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        HOST WORLD                            │
//! │   kills · head place/break · note blocks                     │
//! └───────────────┬──────────────────────────────▲───────────────┘
//!                 │ HostEvent                    │ TrophyEvent
//! ┌───────────────▼──────────────────────────────┴───────────────┐
//! │  TrophyListener                                              │
//! │    ├─ TrophySystem (trophy_drops)                            │
//! │    │    classify → resolve → roll → synthesize               │
//! │    │    save / restore / certify                             │
//! │    └─ BlockStores (one store per placed head)                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `events`: host notifications and the outgoing event channel
//! - `listener`: dispatch from host notifications into the engine
//! - `stores`: per-block key-value stores

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod events;
pub mod listener;
pub mod stores;

pub use trophy_drops as drops;
pub use trophy_shared as shared;

pub use events::{EventBus, EventReceiver, EventSender, HostEvent, Killer, TrophyEvent};
pub use listener::TrophyListener;
pub use stores::{BlockStores, MemoryBlockStores};
