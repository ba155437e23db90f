use super::{AttrModifier, builtins};
use crate::error::{OrmError, OrmResult};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{OnceLock, PoisonError, RwLock};

/// Link-time modifier registration, collected with `inventory`.
///
/// Entries are added to [`ModifierRegistry::global`] when it is first used.
pub struct ModifierRegistration {
    pub key: &'static str,
    pub build: fn() -> AttrModifier,
}

impl ModifierRegistration {
    pub const fn new(key: &'static str, build: fn() -> AttrModifier) -> Self {
        Self { key, build }
    }
}

inventory::collect!(ModifierRegistration);

/// Name → modifier table.
///
/// Keys are never removed or replaced: registering an existing key (built-ins
/// included) fails with [`OrmError::ModifierCollision`].
#[derive(Debug, Default)]
pub struct ModifierRegistry {
    modifiers: RwLock<HashMap<String, AttrModifier>>,
}

impl ModifierRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in modifiers.
    pub fn with_builtins() -> Self {
        let modifiers = builtins::all()
            .into_iter()
            .map(|(key, modifier)| (key.to_string(), modifier))
            .collect();
        Self {
            modifiers: RwLock::new(modifiers),
        }
    }

    /// The process-wide registry: built-ins plus every submitted
    /// [`ModifierRegistration`].
    ///
    /// # Panics
    ///
    /// On first use, if two registrations share a key. Duplicate keys are a
    /// build mistake and the process must not run with an ambiguous registry.
    pub fn global() -> &'static ModifierRegistry {
        static GLOBAL: OnceLock<ModifierRegistry> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let registry = ModifierRegistry::with_builtins();
            for reg in inventory::iter::<ModifierRegistration> {
                if let Err(err) = registry.register(reg.key, (reg.build)()) {
                    panic!("tagsql: {err}");
                }
            }
            registry
        })
    }

    /// Add a modifier under a new key.
    ///
    /// The existence check and the insert happen under one write lock, so of
    /// two concurrent registrations of the same key exactly one succeeds.
    pub fn register(&self, key: impl Into<String>, modifier: AttrModifier) -> OrmResult<()> {
        let key = key.into();
        let mut modifiers = self.modifiers.write().unwrap_or_else(PoisonError::into_inner);
        match modifiers.entry(key) {
            Entry::Occupied(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "tagsql.modifiers", key = %e.key(), "modifier key already registered");
                Err(OrmError::ModifierCollision(e.key().clone()))
            }
            Entry::Vacant(e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(target: "tagsql.modifiers", key = %e.key(), "registered modifier");
                e.insert(modifier);
                Ok(())
            }
        }
    }

    /// Look up a modifier by key.
    pub fn load(&self, key: &str) -> OrmResult<AttrModifier> {
        self.modifiers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
            .ok_or_else(|| OrmError::ModifierNotFound(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.modifiers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .modifiers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.modifiers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Register a modifier in the global registry.
///
/// Meant for process startup. A collision is returned rather than raised so
/// the bootstrap code decides how to stop.
pub fn register_modifier(key: impl Into<String>, modifier: AttrModifier) -> OrmResult<()> {
    ModifierRegistry::global().register(key, modifier)
}

/// Look up a modifier in the global registry.
pub fn load_modifier(key: &str) -> OrmResult<AttrModifier> {
    ModifierRegistry::global().load(key)
}
