pub mod wire;

use crate::{descriptor::UnlockDecl, prelude::*};
use std::any::Any;
use thiserror::Error as ThisError;

///
/// StateError
///
/// Rejection raised by an entity's generic state-loading routine.
///

#[derive(Debug, ThisError)]
#[error("entity state rejected: {message}")]
pub struct StateError {
    pub message: String,
}

impl StateError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

///
/// SandboxError
///
/// Spawn-time failures. Propagated to the caller unmodified; this layer
/// never retries and never substitutes a fallback entity.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum SandboxError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error("no template registered for content type {tag}")]
    TemplateNotFound { tag: ContentTypeId },
}

///
/// TemplateRef
///
/// Opaque host-scoped handle to a resolved entity template.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TemplateRef(pub u32);

///
/// EntitySaveRecord
///
/// The host's generic persisted-entity record. Consumed, never owned:
/// only the identity fields and `custom_data` are read here.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EntitySaveRecord {
    pub id: EntityId,
    pub type_tag: ContentTypeId,
    pub position: Position,
    pub custom_data: String,
}

///
/// SandboxEntity
///
/// A live entity shell under construction. Ownership transfers to the
/// host as soon as the codec returns.
///

pub trait SandboxEntity: std::fmt::Debug {
    fn set_position(&mut self, position: Position);

    /// Load the ordered state sections; the `SandboxData` section's inner
    /// fields are parsed here, not by the codec.
    fn load_state(&mut self, sections: &[&str]) -> Result<(), StateError>;

    /// Recompute derived custom flags after state load.
    fn refresh_custom_flags(&mut self);

    fn as_any(&self) -> &dyn Any;
}

///
/// SandboxWorld
///
/// The host world the codec spawns into.
///

pub trait SandboxWorld {
    /// Resolve the template for a persisted type tag, if any.
    fn resolve_template(&self, tag: ContentTypeId) -> Option<TemplateRef>;

    /// Construct an entity shell. `initial` is the concrete instance to
    /// seed from; sandbox spawns always pass `None`.
    fn spawn_entity(
        &mut self,
        template: TemplateRef,
        initial: Option<&dyn SandboxEntity>,
        position: Position,
        id: EntityId,
    ) -> Box<dyn SandboxEntity>;
}

/// Reconstruct a live entity from a persisted record plus an unlock payload.
///
/// The unlock's `data` is appended to the persisted text as a synthetic
/// `SandboxData` section, and the combined state is replayed through the
/// entity's generic state loader. On any failure the shell is dropped;
/// callers never observe a partial entity.
pub fn parse_from_sandbox(
    world: &mut dyn SandboxWorld,
    record: &EntitySaveRecord,
    unlock: &UnlockDecl,
) -> Result<Box<dyn SandboxEntity>, SandboxError> {
    let state = wire::encode_state(&record.custom_data, unlock.data);

    let template = world
        .resolve_template(record.type_tag)
        .ok_or(SandboxError::TemplateNotFound {
            tag: record.type_tag,
        })?;

    let mut entity = world.spawn_entity(template, None, record.position, record.id);
    // Host constructors have not always honoured the requested position;
    // assign it again explicitly.
    entity.set_position(record.position);

    let sections: Vec<&str> = wire::split_sections(&state).collect();
    entity.load_state(&sections)?;

    entity.refresh_custom_flags();

    Ok(entity)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Debug)]
    struct StubEntity {
        position: Position,
        sections: Vec<String>,
        flags_refreshed: bool,
    }

    impl SandboxEntity for StubEntity {
        fn set_position(&mut self, position: Position) {
            self.position = position;
        }

        fn load_state(&mut self, sections: &[&str]) -> Result<(), StateError> {
            if sections.contains(&"corrupt") {
                return Err(StateError::new("unreadable section"));
            }
            self.sections = sections.iter().map(ToString::to_string).collect();

            Ok(())
        }

        fn refresh_custom_flags(&mut self) {
            self.flags_refreshed = true;
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[derive(Default)]
    struct StubWorld {
        templates: BTreeMap<ContentTypeId, TemplateRef>,
        spawned: u32,
    }

    impl SandboxWorld for StubWorld {
        fn resolve_template(&self, tag: ContentTypeId) -> Option<TemplateRef> {
            self.templates.get(&tag).copied()
        }

        fn spawn_entity(
            &mut self,
            _template: TemplateRef,
            _initial: Option<&dyn SandboxEntity>,
            _position: Position,
            _id: EntityId,
        ) -> Box<dyn SandboxEntity> {
            self.spawned += 1;

            // Deliberately ignores the requested position, like hosts whose
            // constructors default it.
            Box::new(StubEntity {
                position: Position::default(),
                sections: Vec::new(),
                flags_refreshed: false,
            })
        }
    }

    fn world_with(tag: ContentTypeId) -> StubWorld {
        let mut world = StubWorld::default();
        world.templates.insert(tag, TemplateRef(1));

        world
    }

    fn record(tag: ContentTypeId, custom_data: &str) -> EntitySaveRecord {
        EntitySaveRecord {
            id: EntityId::new(9),
            type_tag: tag,
            position: Position::new(24.0, -3.5),
            custom_data: custom_data.to_string(),
        }
    }

    #[test]
    fn spawn_replays_persisted_and_synthetic_sections() {
        let tag = ContentTypeId::new(14);
        let mut world = world_with(tag);
        let unlock = UnlockDecl::new(0, UnlockId::new(4)).with_data(7);

        let entity = parse_from_sandbox(&mut world, &record(tag, "X<cB>"), &unlock).unwrap();
        let entity = entity.as_any().downcast_ref::<StubEntity>().unwrap();

        assert_eq!(entity.sections, ["X", "SandboxData<cC>7"]);
        assert_eq!(entity.position, Position::new(24.0, -3.5));
        assert!(entity.flags_refreshed);
    }

    #[test]
    fn spawn_overwrites_a_defaulted_constructor_position() {
        let tag = ContentTypeId::new(15);
        let mut world = world_with(tag);
        let unlock = UnlockDecl::new(0, UnlockId::new(4));

        let entity = parse_from_sandbox(&mut world, &record(tag, ""), &unlock).unwrap();
        let entity = entity.as_any().downcast_ref::<StubEntity>().unwrap();

        assert_ne!(entity.position, Position::default());
    }

    #[test]
    fn unresolvable_template_propagates_without_spawning() {
        let mut world = StubWorld::default();
        let tag = ContentTypeId::new(16);
        let unlock = UnlockDecl::new(0, UnlockId::new(4));

        let err = parse_from_sandbox(&mut world, &record(tag, ""), &unlock).unwrap_err();

        assert!(matches!(err, SandboxError::TemplateNotFound { tag: t } if t == tag));
        assert_eq!(world.spawned, 0);
    }

    #[test]
    fn state_rejection_propagates_unmodified() {
        let tag = ContentTypeId::new(17);
        let mut world = world_with(tag);
        let unlock = UnlockDecl::new(0, UnlockId::new(4));

        let err = parse_from_sandbox(&mut world, &record(tag, "corrupt<cB>"), &unlock).unwrap_err();

        assert!(matches!(err, SandboxError::State(_)));
    }

    #[test]
    fn zero_payload_reaches_the_loader_explicitly() {
        let tag = ContentTypeId::new(18);
        let mut world = world_with(tag);
        let unlock = UnlockDecl::new(0, UnlockId::new(4));

        let entity = parse_from_sandbox(&mut world, &record(tag, ""), &unlock).unwrap();
        let entity = entity.as_any().downcast_ref::<StubEntity>().unwrap();

        assert_eq!(entity.sections, ["SandboxData<cC>0"]);
    }
}
