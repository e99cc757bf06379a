use super::{FactoryHook, GeneratorId};
use crate::{UuidGenerator, UuidRequirements};
use std::collections::{BTreeMap, BTreeSet};

/// Keeps, for every declared tag, the ids of the generators declaring it, and discards
/// candidates that miss any requested tag.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct TagFilterHook {
    ids_by_tag: BTreeMap<String, BTreeSet<GeneratorId>>,
}

impl TagFilterHook {
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns the ids of the generators declaring `tag`.
    pub fn ids_with_tag(&self, tag: &str) -> Option<&BTreeSet<GeneratorId>> {
        self.ids_by_tag.get(tag)
    }
}

impl FactoryHook for TagFilterHook {
    fn add_generator(&mut self, id: GeneratorId, generator: &dyn UuidGenerator) {
        for tag in generator.capacities().tags() {
            self.ids_by_tag.entry(tag.to_owned()).or_default().insert(id);
        }
    }

    fn remove_generator(&mut self, id: GeneratorId) {
        self.ids_by_tag.retain(|_, ids| {
            ids.remove(&id);
            !ids.is_empty()
        });
    }

    fn preselect_generators(
        &self,
        requirements: &UuidRequirements,
        candidates: &BTreeSet<GeneratorId>,
    ) -> BTreeSet<GeneratorId> {
        let mut selected = candidates.clone();
        for tag in requirements.tags() {
            match self.ids_by_tag.get(tag) {
                Some(ids) => selected.retain(|id| ids.contains(id)),
                // no generator declares it
                None => return BTreeSet::new(),
            }
        }
        selected
    }
}
