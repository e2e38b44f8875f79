//! FighterRegistry resource providing lookup of loaded fighter profiles.

use std::collections::HashMap;
use std::sync::Arc;

use bevy::prelude::*;

use super::data::FighterDef;
use crate::fighter::FighterProfile;

/// Every playable fighter, keyed by id. Profiles are shared with the
/// `Fighter` components spawned from them.
#[derive(Resource, Default, Debug)]
pub struct FighterRegistry {
    fighters: HashMap<String, Arc<FighterProfile>>,
}

impl FighterRegistry {
    /// Registry holding only the built-in fighter.
    pub fn fallback() -> Self {
        let mut registry = Self::default();
        registry.insert(&FighterDef::sparring_partner());
        registry
    }

    /// Returns false if the id was already taken; the earlier entry is kept.
    pub fn insert(&mut self, def: &FighterDef) -> bool {
        if self.fighters.contains_key(&def.id) {
            return false;
        }
        self.fighters
            .insert(def.id.clone(), Arc::new(FighterProfile::from_def(def)));
        true
    }

    pub fn get(&self, id: &str) -> Option<Arc<FighterProfile>> {
        self.fighters.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.fighters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fighters.is_empty()
    }

    /// Returns a summary of loaded fighters for logging.
    pub fn summary(&self) -> String {
        let mut ids: Vec<_> = self.fighters.keys().map(String::as_str).collect();
        ids.sort_unstable();

        let moves: usize = self.fighters.values().map(|p| p.moves.len()).sum();
        format!(
            "FighterRegistry loaded:\n\
             - Fighters: {} ({})\n\
             - Moves: {}",
            self.fighters.len(),
            ids.join(", "),
            moves
        )
    }
}
