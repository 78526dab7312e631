//! # Drop Catalog
//!
//! Read-only listing of what is configured, for admin listings, direct
//! head issue and prefix completion.

use crate::config::DropTree;
use crate::error::{TrophyError, TrophyResult};

/// One configured creature type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Upper-case type key.
    pub type_key: String,
    /// Variant keys, sorted.
    pub variants: Vec<String>,
}

/// A validated (type, variant) request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadSelection {
    /// Upper-case type key.
    pub type_key: String,
    /// Lower-case variant key.
    pub variant: Option<String>,
}

/// Listing over a loaded drop tree.
#[derive(Clone, Copy, Debug)]
pub struct DropCatalog<'a> {
    tree: &'a DropTree,
}

impl<'a> DropCatalog<'a> {
    /// Wraps a loaded tree.
    #[must_use]
    pub const fn new(tree: &'a DropTree) -> Self {
        Self { tree }
    }

    /// Every configured type with its variants, sorted by key.
    #[must_use]
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.tree
            .iter()
            .map(|(type_key, section)| CatalogEntry {
                type_key: type_key.clone(),
                variants: section.variants.keys().cloned().collect(),
            })
            .collect()
    }

    /// Normalizes and validates a request for a specific head.
    ///
    /// # Errors
    ///
    /// [`TrophyError::UnknownDrop`] when the type has no section and
    /// [`TrophyError::UnknownVariant`] when a named variant is missing.
    pub fn select(&self, type_key: &str, variant: Option<&str>) -> TrophyResult<HeadSelection> {
        let upper = type_key.trim().to_uppercase();
        let section = self
            .tree
            .get(&upper)
            .ok_or_else(|| TrophyError::UnknownDrop(type_key.to_string()))?;

        let variant = variant.map(|v| v.trim().to_lowercase());
        if let Some(variant) = &variant {
            if !section.variants.contains_key(variant) {
                return Err(TrophyError::UnknownVariant {
                    type_key: upper,
                    variant: variant.clone(),
                });
            }
        }
        Ok(HeadSelection {
            type_key: upper,
            variant,
        })
    }

    /// Type keys starting with `prefix`, ignoring case.
    #[must_use]
    pub fn suggest_types(&self, prefix: &str) -> Vec<String> {
        starting_with(self.tree.keys(), prefix)
    }

    /// Variant keys of `type_key` starting with `prefix`, ignoring case.
    #[must_use]
    pub fn suggest_variants(&self, type_key: &str, prefix: &str) -> Vec<String> {
        self.tree
            .get(&type_key.to_uppercase())
            .map(|section| starting_with(section.variants.keys(), prefix))
            .unwrap_or_default()
    }
}

fn starting_with<'k>(keys: impl Iterator<Item = &'k String>, prefix: &str) -> Vec<String> {
    let prefix = prefix.to_lowercase();
    keys.filter(|key| key.to_lowercase().starts_with(&prefix))
        .cloned()
        .collect()
}
