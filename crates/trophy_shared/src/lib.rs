//! # Trophy Shared
//!
//! Common types used by both the drop engine and the host world.
//!
//! ## CRITICAL RULE
//!
//! This crate describes data only. Anything that decides, rolls, parses
//! configuration or touches a block store belongs in `trophy_drops`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod creature;
pub mod material;
pub mod math;

pub use constants::{
    CERTIFICATION_LINE, DEFAULT_PROFILE_NAME, LORE_DELIMITER, MAX_PROFILE_NAME_LEN, NAMESPACE,
};
pub use creature::{CreatureSnapshot, CreatureTraits};
pub use material::MaterialKind;
pub use math::{BlockPos, Vec3};
