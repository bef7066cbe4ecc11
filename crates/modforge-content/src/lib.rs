//! Capability-indexed content descriptors for moddable games.
//!
//! External authors define one [`Descriptor`](descriptor::Descriptor) per
//! entity kind, hang it off a [`ContentKind`](traits::ContentKind) impl, and
//! the framework derives every optional capability (property inspection,
//! sandbox unlock/spawn) from that single object — no per-capability
//! registration calls.

pub mod descriptor;
pub mod error;
pub mod icon;
pub mod registry;
pub mod sandbox;
pub mod traits;
pub mod types;

use crate::{registry::RegistryError, sandbox::SandboxError};
use thiserror::Error as ThisError;

/// Asset-name prefix used by the icon resolution convention.
pub const ICON_ASSET_PREFIX: &str = "icon_";

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        descriptor::{ContentError, Descriptor, UnlockDecl},
        err,
        error::ErrorTree,
        icon::{Icon, ResourceContext, Tint},
        registry::RegistryRef,
        sandbox::{
            EntitySaveRecord, SandboxEntity, SandboxError, SandboxWorld, StateError, TemplateRef,
        },
        traits::{ContentKind, PropertyInspect, SandboxSpawn, Validate, WorldObject},
        types::{ContentTypeId, EntityId, Position, Property, PropertySheet, UnlockId},
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum Error {
    #[error(transparent)]
    Content(#[from] descriptor::ContentError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Sandbox(#[from] SandboxError),
}
