use crate::{ICON_ASSET_PREFIX, error::report, prelude::*, registry::REGISTRY_MEMBERSHIP};
use thiserror::Error as ThisError;

///
/// ContentError
///

#[derive(Debug, ThisError)]
pub enum ContentError {
    #[error("content type id must be strictly positive (got {id})")]
    InvalidTypeId { id: i32 },
}

///
/// UnlockDecl
///
/// Declares that this entity kind can be granted via an unlock token.
/// `data` is an opaque payload forwarded verbatim into spawned-entity
/// state; this layer never interprets it. `kill_score` is meaningful only
/// for killable content and is ignored otherwise.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct UnlockDecl {
    pub unlock: UnlockId,
    pub parent: UnlockId,
    pub data: i32,
    pub kill_score: i32,
}

impl UnlockDecl {
    /// A declaration with no prerequisite and a zero payload.
    #[must_use]
    pub const fn new(kill_score: i32, unlock: UnlockId) -> Self {
        Self {
            unlock,
            parent: UnlockId::ALWAYS,
            data: 0,
            kill_score,
        }
    }

    #[must_use]
    pub const fn with_parent(mut self, parent: UnlockId) -> Self {
        self.parent = parent;
        self
    }

    #[must_use]
    pub const fn with_data(mut self, data: i32) -> Self {
        self.data = data;
        self
    }
}

///
/// Descriptor
///
/// The single content definition an author supplies for one entity kind.
/// Identity is fixed at construction; the icon slot and unlock table are
/// the only mutable parts, and both must settle before the descriptor is
/// published to the registries.
///

#[derive(Clone, Debug, Serialize)]
pub struct Descriptor {
    ty: ContentTypeId,
    icon: Icon,
    unlocks: Vec<UnlockDecl>,
}

impl Descriptor {
    /// Construct a descriptor for the given content type.
    ///
    /// Fails for non-positive ids; the failure is logged and returned (both
    /// channels fire before the caller sees the error).
    pub fn new(ty: ContentTypeId) -> Result<Self, ContentError> {
        if !ty.is_valid() {
            return Err(report(ContentError::InvalidTypeId { id: ty.get() }));
        }

        Ok(Self {
            ty,
            icon: Icon::Default,
            unlocks: Vec::new(),
        })
    }

    #[must_use]
    pub const fn content_type(&self) -> ContentTypeId {
        self.ty
    }

    #[must_use]
    pub const fn icon(&self) -> &Icon {
        &self.icon
    }

    /// Author override for the icon; suppresses the naming convention.
    pub fn set_icon(&mut self, icon: Icon) {
        self.icon = icon;
    }

    /// Append an unlock declaration.
    ///
    /// No uniqueness check: registering the same unlock id twice keeps both
    /// entries, and discovery sees them in insertion order.
    pub fn register_unlock(&mut self, decl: UnlockDecl) {
        self.unlocks.push(decl);
    }

    /// Read-only view of the unlock table, in registration order.
    #[must_use]
    pub fn unlocks(&self) -> &[UnlockDecl] {
        &self.unlocks
    }

    /// The registries this descriptor belongs to, in fixed order.
    ///
    /// Pure and stable across calls; every descriptor is a member of all
    /// three.
    #[allow(clippy::unused_self)]
    pub fn registries(&self) -> impl Iterator<Item = RegistryRef> {
        REGISTRY_MEMBERSHIP.into_iter()
    }

    /// Apply the icon naming convention if the author never set one.
    ///
    /// Resolves `icon_{type}` with the fixed content tint iff the slot
    /// still holds the sentinel. Idempotent; repeat calls are no-ops once
    /// an icon is in place.
    pub fn load_resources(&mut self, ctx: &dyn ResourceContext) {
        if self.icon.is_default() {
            let name = format!("{ICON_ASSET_PREFIX}{}", self.ty);
            self.icon = ctx.icon(&name, Tint::CONTENT);
        }
    }
}

impl Validate for Descriptor {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        // Construction already guards this; population validation rechecks
        // descriptors that arrived through other paths.
        if !self.ty.is_valid() {
            err!(errs, "content type id must be strictly positive (got {})", self.ty);
        }

        errs.result()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use tracing::{Event, Level, Metadata, Subscriber, span};

    struct NamePassthrough;

    impl ResourceContext for NamePassthrough {
        fn icon(&self, name: &str, tint: Tint) -> Icon {
            Icon::asset(name, tint)
        }
    }

    // Counts ERROR events on the content diagnostic target.
    struct DiagnosticCounter {
        errors: Arc<AtomicUsize>,
    }

    impl Subscriber for DiagnosticCounter {
        fn enabled(&self, metadata: &Metadata<'_>) -> bool {
            metadata.target() == "modforge::content" && *metadata.level() == Level::ERROR
        }

        fn new_span(&self, _span: &span::Attributes<'_>) -> span::Id {
            span::Id::from_u64(1)
        }

        fn record(&self, _span: &span::Id, _values: &span::Record<'_>) {}

        fn record_follows_from(&self, _span: &span::Id, _follows: &span::Id) {}

        fn event(&self, _event: &Event<'_>) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn enter(&self, _span: &span::Id) {}

        fn exit(&self, _span: &span::Id) {}
    }

    #[test]
    fn rejects_zero_and_negative_type_ids() {
        for id in [0, -1, -500] {
            let err = Descriptor::new(ContentTypeId::new(id)).unwrap_err();
            assert!(matches!(err, ContentError::InvalidTypeId { id: got } if got == id));
        }
    }

    #[test]
    fn rejection_fires_the_diagnostic_channel_before_returning() {
        let errors = Arc::new(AtomicUsize::new(0));
        let subscriber = DiagnosticCounter {
            errors: Arc::clone(&errors),
        };

        let result = tracing::subscriber::with_default(subscriber, || {
            Descriptor::new(ContentTypeId::new(0))
        });

        assert!(matches!(result, Err(ContentError::InvalidTypeId { id: 0 })));
        assert_eq!(errors.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn successful_construction_stays_silent() {
        let errors = Arc::new(AtomicUsize::new(0));
        let subscriber = DiagnosticCounter {
            errors: Arc::clone(&errors),
        };

        let result = tracing::subscriber::with_default(subscriber, || {
            Descriptor::new(ContentTypeId::new(1))
        });

        assert!(result.is_ok());
        assert_eq!(errors.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn descriptor_serializes_with_its_unlock_table() {
        let mut descriptor = Descriptor::new(ContentTypeId::new(6)).unwrap();
        descriptor.register_unlock(UnlockDecl::new(5, UnlockId::new(2)).with_data(9));

        let value = serde_json::to_value(&descriptor).unwrap();

        assert_eq!(value["ty"], 6);
        assert_eq!(value["unlocks"][0]["unlock"], 2);
        assert_eq!(value["unlocks"][0]["data"], 9);
    }

    #[test]
    fn construction_leaves_the_icon_sentinel() {
        let descriptor = Descriptor::new(ContentTypeId::new(3)).unwrap();

        assert_eq!(descriptor.content_type(), ContentTypeId::new(3));
        assert!(descriptor.icon().is_default());
        assert!(descriptor.unlocks().is_empty());
    }

    #[test]
    fn load_resources_applies_the_naming_convention_once() {
        let mut descriptor = Descriptor::new(ContentTypeId::new(12)).unwrap();

        descriptor.load_resources(&NamePassthrough);
        let resolved = descriptor.icon().clone();
        assert_eq!(resolved, Icon::asset("icon_12", Tint::CONTENT));

        descriptor.load_resources(&NamePassthrough);
        assert_eq!(descriptor.icon(), &resolved);
    }

    #[test]
    fn load_resources_keeps_an_author_icon() {
        let mut descriptor = Descriptor::new(ContentTypeId::new(12)).unwrap();
        descriptor.set_icon(Icon::asset("crystal_alt", Tint::rgb(80, 200, 255)));

        descriptor.load_resources(&NamePassthrough);
        descriptor.load_resources(&NamePassthrough);

        assert_eq!(
            descriptor.icon(),
            &Icon::asset("crystal_alt", Tint::rgb(80, 200, 255))
        );
    }

    #[test]
    fn unlock_registration_preserves_order_and_duplicates() {
        let mut descriptor = Descriptor::new(ContentTypeId::new(5)).unwrap();
        let a = UnlockDecl::new(10, UnlockId::new(1));
        let b = UnlockDecl::new(0, UnlockId::new(2)).with_parent(UnlockId::new(1));
        let c = UnlockDecl::new(10, UnlockId::new(1)).with_data(4);

        descriptor.register_unlock(a);
        descriptor.register_unlock(b);
        descriptor.register_unlock(c);

        assert_eq!(descriptor.unlocks(), &[a, b, c]);
    }

    #[test]
    fn unlock_defaults_carry_the_sentinel_parent_and_zero_data() {
        let decl = UnlockDecl::new(25, UnlockId::new(9));

        assert_eq!(decl.parent, UnlockId::ALWAYS);
        assert_eq!(decl.data, 0);
        assert_eq!(decl.kill_score, 25);
    }
}
