//! The capability set.
//!
//! A kind author implements exactly one trait, [`ContentKind`]. The optional
//! capabilities — property inspection, sandbox unlock/spawn — are blanket
//! impls over it, so every kind is a member of every capability and the host
//! discovers them through the narrow views without any registration calls.

use crate::{
    descriptor::{Descriptor, UnlockDecl},
    error::ErrorTree,
    icon::ResourceContext,
    sandbox::{self, EntitySaveRecord, SandboxEntity, SandboxError, SandboxWorld},
    types::{ContentTypeId, PropertySheet},
};

///
/// WorldObject
///
/// An arbitrary physical object the host may hand to property inspection.
/// Only its content type is read here.
///

pub trait WorldObject {
    fn content_type(&self) -> ContentTypeId;
}

///
/// ContentKind
///
/// The author extension point: one kind, one descriptor, a handful of
/// lifecycle hooks. Kinds are process-lifetime content metadata, so they
/// must be shareable once the registry is published.
///

pub trait ContentKind: Send + Sync {
    fn descriptor(&self) -> &Descriptor;

    fn descriptor_mut(&mut self) -> &mut Descriptor;

    /// One-time setup during content load, before registration.
    fn setup(&mut self) {}

    /// Resource hook; the default applies the descriptor's icon convention.
    fn load_resources(&mut self, ctx: &dyn ResourceContext) {
        self.descriptor_mut().load_resources(ctx);
    }

    /// Custom properties for an object of this kind.
    ///
    /// Called only after the governed-object check has passed; `None` means
    /// "no properties", which is a normal result, not a failure.
    fn properties(&self, _object: &dyn WorldObject) -> Option<PropertySheet> {
        None
    }
}

///
/// Validate
///
/// Local-invariant capability run by registry validation.
///

pub trait Validate {
    fn validate(&self) -> Result<(), ErrorTree> {
        Ok(())
    }
}

///
/// PropertyInspect
///
/// Property-inspection capability view. Mandatory on every kind; a kind
/// that declares no properties simply answers `None`.
///

pub trait PropertyInspect {
    /// Properties for `object`, or `None` when the object is not of the
    /// governed kind or the kind declares none.
    fn inspect(&self, object: &dyn WorldObject) -> Option<PropertySheet>;
}

impl<K: ContentKind + ?Sized> PropertyInspect for K {
    fn inspect(&self, object: &dyn WorldObject) -> Option<PropertySheet> {
        // Objects of many kinds flow through here; only ours answer.
        if object.content_type() != self.descriptor().content_type() {
            return None;
        }

        self.properties(object)
    }
}

///
/// SandboxSpawn
///
/// Sandbox-unlock capability view: the ordered unlock table plus state
/// reconstruction from a persisted record and an unlock payload.
///

pub trait SandboxSpawn {
    /// Unlock declarations in registration order, duplicates included.
    fn unlocks(&self) -> &[UnlockDecl];

    /// Reconstruct a live entity from `record` plus `unlock`'s payload.
    fn parse_from_sandbox(
        &self,
        world: &mut dyn SandboxWorld,
        record: &EntitySaveRecord,
        unlock: &UnlockDecl,
    ) -> Result<Box<dyn SandboxEntity>, SandboxError>;
}

impl<K: ContentKind + ?Sized> SandboxSpawn for K {
    fn unlocks(&self) -> &[UnlockDecl] {
        self.descriptor().unlocks()
    }

    fn parse_from_sandbox(
        &self,
        world: &mut dyn SandboxWorld,
        record: &EntitySaveRecord,
        unlock: &UnlockDecl,
    ) -> Result<Box<dyn SandboxEntity>, SandboxError> {
        sandbox::parse_from_sandbox(world, record, unlock)
    }
}

///
/// TESTS
///
