//! Registry of generators that dispatches requirements to the first capable one.

use crate::{Error, Rfc4122Generator, Rfc4122Uuid, UuidGenerator, UuidRequirements};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

mod tag_filter;
pub use tag_filter::TagFilterHook;

/// Identifies a registered generator. Higher ids are tried first.
pub type GeneratorId = i64;

/// Priority at which [`UuidFactory::with_defaults`] registers its random generator.
pub const DEFAULT_PRIORITY: GeneratorId = 100;

/// Observes the generators of a [`UuidFactory`] and narrows the candidates for a generation.
///
/// A hook only ever prunes the candidate set. Checking capacities against the requirements is
/// left to the factory.
pub trait FactoryHook: Send {
    /// Called for every generator registered with the factory, including those registered before
    /// the hook was added.
    fn add_generator(&mut self, id: GeneratorId, generator: &dyn UuidGenerator);

    /// Called when the factory drops a generator.
    fn remove_generator(&mut self, id: GeneratorId);

    /// Returns the subset of `candidates` worth trying for `requirements`.
    fn preselect_generators(
        &self,
        requirements: &UuidRequirements,
        candidates: &BTreeSet<GeneratorId>,
    ) -> BTreeSet<GeneratorId>;
}

/// Holds generators by priority and produces UUIDs from requirements.
///
/// Generation is synchronous and takes `&mut self`, because a generator that fails after
/// accepting the requirements is dropped from the registry. To share a factory between threads,
/// wrap it in a mutex:
///
/// ```rust
/// use std::{sync, thread};
/// use uuid_factory::{library, UuidFactory, UuidRequirements};
///
/// let factory = sync::Arc::new(sync::Mutex::new(UuidFactory::with_defaults()?));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let factory = sync::Arc::clone(&factory);
///         s.spawn(move || {
///             let mut requirements = UuidRequirements::new();
///             library::request_rfc4122(&mut requirements, Some(4)).unwrap();
///             let uuid = factory.lock().unwrap().generate(&requirements).unwrap();
///             println!("{} by thread {}", uuid, i);
///         });
///     }
/// });
/// # Ok::<(), uuid_factory::Error>(())
/// ```
#[derive(Default)]
pub struct UuidFactory {
    generators: BTreeMap<GeneratorId, Box<dyn UuidGenerator>>,
    hooks: Vec<Box<dyn FactoryHook>>,
}

impl UuidFactory {
    /// Creates an empty factory.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a factory with a [`TagFilterHook`] and a random RFC 4122 generator registered at
    /// [`DEFAULT_PRIORITY`].
    pub fn with_defaults() -> Result<Self, Error> {
        let mut factory = Self::new();
        factory.add_hook(TagFilterHook::new());
        factory.add_generator(DEFAULT_PRIORITY, Rfc4122Generator::random()?)?;
        Ok(factory)
    }

    /// Appends a hook and hands it every generator registered so far.
    pub fn add_hook(&mut self, mut hook: impl FactoryHook + 'static) -> &mut Self {
        for (&id, generator) in &self.generators {
            hook.add_generator(id, generator.as_ref());
        }
        self.hooks.push(Box::new(hook));
        tracing::debug!(hooks = self.hooks.len(), "added factory hook");
        self
    }

    /// Registers a generator and returns its id.
    ///
    /// The id is the first free one at or above `priority`.
    pub fn add_generator(
        &mut self,
        priority: GeneratorId,
        generator: impl UuidGenerator + 'static,
    ) -> Result<GeneratorId, Error> {
        let mut id = priority;
        while self.generators.contains_key(&id) {
            id = id
                .checked_add(1)
                .ok_or_else(|| Error::configuration("no free generator id above priority"))?;
        }

        for hook in &mut self.hooks {
            hook.add_generator(id, &generator);
        }
        self.generators.insert(id, Box::new(generator));
        tracing::debug!(priority, id, "registered generator");
        Ok(id)
    }

    /// Returns the registered ids in ascending order.
    pub fn generator_ids(&self) -> impl Iterator<Item = GeneratorId> + '_ {
        self.generators.keys().copied()
    }

    pub fn generator(&self, id: GeneratorId) -> Option<&dyn UuidGenerator> {
        self.generators.get(&id).map(|e| e.as_ref() as &dyn UuidGenerator)
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Generates a UUID satisfying `requirements`.
    ///
    /// The hooks narrow the registered ids first; the remaining generators are then tried from
    /// the highest id down, and the first one whose capacities fulfill the requirements produces
    /// the UUID. A generator that fails at that point is removed and the next one is tried.
    ///
    /// Returns [`Error::NoGenerator`] if no generator produced a UUID.
    pub fn generate(&mut self, requirements: &UuidRequirements) -> Result<Rfc4122Uuid, Error> {
        let mut candidates: BTreeSet<GeneratorId> = self.generators.keys().copied().collect();
        for hook in &self.hooks {
            let selected = hook.preselect_generators(requirements, &candidates);
            candidates.retain(|id| selected.contains(id));
            tracing::trace!(remaining = candidates.len(), "preselected generators");
            if candidates.is_empty() {
                return Err(Error::NoGenerator);
            }
        }

        for id in candidates.into_iter().rev() {
            let Some(generator) = self.generators.get_mut(&id) else {
                continue;
            };
            if !generator.capacities().fulfill_requirements(requirements) {
                continue;
            }
            match generator.generate_uuid(requirements) {
                Ok(uuid) => return Ok(uuid),
                Err(err) => {
                    tracing::warn!(id, %err, "removing generator that failed on accepted requirements");
                    self.remove_generator(id);
                }
            }
        }
        Err(Error::NoGenerator)
    }

    fn remove_generator(&mut self, id: GeneratorId) {
        for hook in &mut self.hooks {
            hook.remove_generator(id);
        }
        self.generators.remove(&id);
    }
}

impl fmt::Debug for UuidFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UuidFactory")
            .field("generators", &self.generators.keys().collect::<Vec<_>>())
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
