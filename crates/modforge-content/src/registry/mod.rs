mod validate;

use crate::prelude::*;
use std::collections::BTreeMap;
use std::sync::{LazyLock, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error as ThisError;

pub(crate) use validate::validate_registry;

///
/// RegistryError
///

#[derive(Debug, ThisError)]
pub enum RegistryError {
    #[error("content type {ty} is already registered")]
    DuplicateType { ty: ContentTypeId },

    #[error("validation failed: {0}")]
    Validation(ErrorTree),
}

///
/// RegistryRef
///
/// The fixed registries a descriptor is visible in once constructed.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
    derive_more::Display,
)]
pub enum RegistryRef {
    Identity,
    Property,
    Sandbox,
}

/// Every descriptor belongs to all three registries, in this order.
pub const REGISTRY_MEMBERSHIP: [RegistryRef; 3] = [
    RegistryRef::Identity,
    RegistryRef::Property,
    RegistryRef::Sandbox,
];

///
/// ContentRegistry
///
/// Process-lifetime store of registered kinds, keyed by content type.
/// Owns each kind exclusively once inserted.
///

#[derive(Default)]
pub struct ContentRegistry {
    kinds: BTreeMap<ContentTypeId, Box<dyn ContentKind>>,
}

impl ContentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a kind.
    ///
    /// Identity must be unique across the whole population; a second kind
    /// with the same content type is rejected, not replaced.
    pub fn insert(&mut self, kind: Box<dyn ContentKind>) -> Result<(), RegistryError> {
        let ty = kind.descriptor().content_type();

        if self.kinds.contains_key(&ty) {
            return Err(RegistryError::DuplicateType { ty });
        }
        self.kinds.insert(ty, kind);

        Ok(())
    }

    #[must_use]
    pub fn get(&self, ty: ContentTypeId) -> Option<&dyn ContentKind> {
        self.kinds.get(&ty).map(AsRef::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContentTypeId, &dyn ContentKind)> {
        self.kinds.iter().map(|(ty, kind)| (*ty, kind.as_ref()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Run every kind's resource hook; icon convention applies per kind.
    pub fn load_resources(&mut self, ctx: &dyn ResourceContext) {
        for kind in self.kinds.values_mut() {
            kind.load_resources(ctx);
        }
    }
}

///
/// REGISTRY
/// the static data structure
///

static REGISTRY: LazyLock<RwLock<ContentRegistry>> =
    LazyLock::new(|| RwLock::new(ContentRegistry::new()));

static REGISTRY_VALIDATED: OnceLock<bool> = OnceLock::new();

/// Acquire a write guard to the global registry during the content-load phase.
pub fn registry_write() -> RwLockWriteGuard<'static, ContentRegistry> {
    REGISTRY
        .write()
        .expect("registry RwLock poisoned while acquiring write lock")
}

// registry_read
// just reads the registry directly without validation
pub(crate) fn registry_read() -> RwLockReadGuard<'static, ContentRegistry> {
    REGISTRY
        .read()
        .expect("registry RwLock poisoned while acquiring read lock")
}

/// Read the global registry, validating it exactly once per process.
pub fn get_registry() -> Result<RwLockReadGuard<'static, ContentRegistry>, crate::Error> {
    let registry = registry_read();
    validate(&registry).map_err(RegistryError::Validation)?;

    Ok(registry)
}

// validate
fn validate(registry: &ContentRegistry) -> Result<(), ErrorTree> {
    if *REGISTRY_VALIDATED.get_or_init(|| false) {
        return Ok(());
    }

    validate_registry(registry)?;

    REGISTRY_VALIDATED.set(true).ok();

    Ok(())
}

///
/// TESTS
///
