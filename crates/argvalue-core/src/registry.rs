//! The parser registry.
//!
//! A [`ParserRegistry`] maps type identities to strategies. Lookups resolve
//! in a fixed order:
//!
//! 1. an exact registration for the key;
//! 2. for an enumeration, a freshly synthesized [`EnumParser`];
//! 3. for `Option<T>`, a [`NullableParser`] around the *registered* strategy
//!    for `T` (synthesized strategies are not wrapped, so neither
//!    `Option<Option<T>>` nor `Option<E>` of an unregistered enum resolve);
//! 4. nothing.
//!
//! Exact registrations always win, so registering an enum or an `Option<T>`
//! directly overrides the synthesized behavior for that type.
//!
//! # Default instance
//!
//! [`ParserRegistry::global`] returns the process-wide registry. It is built
//! on first access (or by [`ParserRegistry::init_global`]) with the built-in
//! strategies and every link-time registration, and lives until the process
//! exits. Independent registries can be created with [`ParserRegistry::new`]
//! and passed around explicitly when isolation is needed.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use crate::builtin::builtin_parsers;
use crate::enumeration::EnumParser;
use crate::error::{ArgValueError, RegistryError, RegistryResult};
use crate::key::{ArgType, TypeKey, TypeShape};
use crate::linked::PARSER_REGISTRATIONS;
use crate::nullable::NullableParser;
use crate::parser::{ErasedParser, Strategy, ValueParser};
use crate::settings::RegistrySettings;

static GLOBAL: OnceLock<ParserRegistry> = OnceLock::new();

/// Mapping from type identity to parse strategy.
pub struct ParserRegistry {
    /// Registered strategies. Written only by registration.
    parsers: RwLock<HashMap<TypeKey, Arc<dyn ErasedParser>>>,
    /// Memoized synthesized strategies, used when `cache_synthesized` is set.
    synthesized: RwLock<HashMap<TypeKey, Arc<dyn ErasedParser>>>,
    settings: RegistrySettings,
}

impl ParserRegistry {
    /// Creates a registry holding the built-in strategies.
    pub fn new() -> Self {
        Self::with_settings(RegistrySettings::default())
    }

    /// Creates a registry holding the built-in strategies configured by `settings`.
    pub fn with_settings(settings: RegistrySettings) -> Self {
        let registry = Self::bare(settings);
        {
            let mut parsers = registry.parsers.write();
            for (key, parser) in builtin_parsers(&registry.settings) {
                parsers.insert(key, parser);
            }
        }
        registry
    }

    /// Creates a registry without any strategies.
    pub fn bare(settings: RegistrySettings) -> Self {
        Self {
            parsers: RwLock::new(HashMap::new()),
            synthesized: RwLock::new(HashMap::new()),
            settings,
        }
    }

    /// Returns the process-wide registry, building it with default settings
    /// on first access.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| Self::build_global(RegistrySettings::default()))
    }

    /// Builds the process-wide registry with `settings`.
    ///
    /// Fails with [`RegistryError::GlobalAlreadyInitialized`] if it was
    /// already built, including implicitly through [`global`](Self::global).
    pub fn init_global(settings: RegistrySettings) -> RegistryResult<&'static Self> {
        let mut built = false;
        let registry = GLOBAL.get_or_init(|| {
            built = true;
            Self::build_global(settings)
        });

        if built {
            Ok(registry)
        } else {
            Err(RegistryError::GlobalAlreadyInitialized)
        }
    }

    fn build_global(settings: RegistrySettings) -> Self {
        let registry = Self::with_settings(settings);
        let linked = registry.register_linked();
        debug!(
            parsers = registry.len(),
            linked, "Initialized global parser registry"
        );
        registry
    }

    /// The settings this registry was built with.
    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    // ─── Lookup ───────────────────────────────────────────────────────────────

    /// Resolves the strategy for `key`.
    ///
    /// Returns `None` when nothing is registered and nothing can be
    /// synthesized.
    pub fn lookup(&self, key: &TypeKey) -> Option<Arc<dyn ErasedParser>> {
        if let Some(parser) = self.parsers.read().get(key) {
            return Some(Arc::clone(parser));
        }

        match key.shape() {
            TypeShape::Enum(_) | TypeShape::Nullable(_) => self.synthesize_cached(key),
            TypeShape::Primitive(_) | TypeShape::Unknown => None,
        }
    }

    /// Synthesizes for an enum or nullable key, consulting the cache when
    /// `cache_synthesized` is set.
    fn synthesize_cached(&self, key: &TypeKey) -> Option<Arc<dyn ErasedParser>> {
        if !self.settings.cache_synthesized {
            return self.synthesize(key);
        }

        if let Some(parser) = self.synthesized.read().get(key) {
            trace!(type_name = key.name(), "Reusing synthesized parser");
            return Some(Arc::clone(parser));
        }

        let parser = self.synthesize(key)?;
        let mut cache = self.synthesized.write();
        Some(Arc::clone(cache.entry(key.clone()).or_insert(parser)))
    }

    fn synthesize(&self, key: &TypeKey) -> Option<Arc<dyn ErasedParser>> {
        match key.shape() {
            TypeShape::Enum(_) => {
                let parser = EnumParser::new(key)
                    .ok()?
                    .list_choices(self.settings.list_enum_choices);
                trace!(type_name = key.name(), "Synthesized enum parser");
                Some(Arc::new(parser))
            }
            TypeShape::Nullable(shape) => {
                let inner = self.parsers.read().get(shape.inner()).cloned()?;
                let parser = NullableParser::new(key.clone(), inner).ok()?;
                trace!(type_name = key.name(), "Synthesized nullable parser");
                Some(Arc::new(parser))
            }
            TypeShape::Primitive(_) | TypeShape::Unknown => None,
        }
    }

    /// Resolves the strategy for `T`.
    pub fn get<T: ArgType>(&self) -> Option<Strategy<T>> {
        self.lookup(&T::type_key()).map(Strategy::new)
    }

    /// Resolves the strategy for `T`, failing with [`RegistryError::NotFound`].
    pub fn require<T: ArgType>(&self) -> RegistryResult<Strategy<T>> {
        let key = T::type_key();
        self.lookup(&key)
            .map(Strategy::new)
            .ok_or(RegistryError::NotFound {
                type_name: key.name(),
            })
    }

    /// Resolves the strategy for `T` and parses `value` with it.
    pub fn parse<T: ArgType>(&self, arg_name: &str, value: &str) -> Result<T, ArgValueError> {
        Ok(self.require::<T>()?.parse(arg_name, value)?)
    }

    /// Returns `true` if a strategy is registered for `key`.
    ///
    /// Synthesized strategies do not count.
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.parsers.read().contains_key(key)
    }

    /// Number of registered strategies.
    pub fn len(&self) -> usize {
        self.parsers.read().len()
    }

    /// Returns `true` if no strategy is registered.
    pub fn is_empty(&self) -> bool {
        self.parsers.read().is_empty()
    }

    /// Display names of all registered types, sorted.
    pub fn registered_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.parsers.read().keys().map(TypeKey::name).collect();
        names.sort_unstable();
        names
    }

    // ─── Registration ─────────────────────────────────────────────────────────

    /// Registers `parser` for its output type.
    pub fn register<P>(&self, parser: P) -> RegistryResult<()>
    where
        P: ValueParser,
        P::Output: ArgType,
    {
        self.register_shared(<P::Output as ArgType>::type_key(), Arc::new(parser))
    }

    /// Registers a shared parser under `key`.
    ///
    /// Fails with [`RegistryError::InvalidArgument`] if the parser does not
    /// produce the type denoted by `key`, and with
    /// [`RegistryError::DuplicateRegistration`] if `key` is already
    /// registered. The registry is unchanged on failure.
    pub fn register_shared(&self, key: TypeKey, parser: Arc<dyn ErasedParser>) -> RegistryResult<()> {
        if parser.output_type() != key.id() {
            return Err(RegistryError::invalid_argument(
                "parser",
                format!(
                    "parser produces '{}' but was registered for '{}'",
                    parser.output_name(),
                    key.name()
                ),
            ));
        }

        match self.parsers.write().entry(key) {
            Entry::Occupied(entry) => Err(RegistryError::DuplicateRegistration {
                type_name: entry.key().name(),
            }),
            Entry::Vacant(entry) => {
                debug!(type_name = entry.key().name(), "Registered parser");
                entry.insert(parser);
                Ok(())
            }
        }
    }

    /// Applies every link-time registration, returning how many were added.
    ///
    /// Entries whose type is already registered are skipped.
    pub fn register_linked(&self) -> usize {
        let mut added = 0;
        for make in PARSER_REGISTRATIONS.iter() {
            let (key, parser) = make().into_parts();
            let type_name = key.name();
            match self.register_shared(key, parser) {
                Ok(()) => added += 1,
                Err(err) => warn!(
                    type_name,
                    error = %err,
                    "Skipping link-time parser registration"
                ),
            }
        }
        added
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("types", &self.registered_types())
            .field("settings", &self.settings)
            .finish()
    }
}
