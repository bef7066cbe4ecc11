//! Sample content kinds covering both capability extremes: one kind that
//! overrides every hook and one that leans on the defaults.

use modforge_content::prelude::*;

///
/// CrystalBlock
///
/// Placeable kind with custom properties, an author-set icon and a
/// data-carrying unlock.
///

pub struct CrystalBlock {
    descriptor: Descriptor,
}

impl CrystalBlock {
    pub const TYPE: ContentTypeId = ContentTypeId::new(101);
    pub const UNLOCK: UnlockId = UnlockId::new(7);

    pub fn new() -> Result<Self, ContentError> {
        let mut descriptor = Descriptor::new(Self::TYPE)?;
        descriptor.set_icon(Icon::asset("crystal_block", Tint::rgb(120, 220, 255)));
        descriptor.register_unlock(UnlockDecl::new(0, Self::UNLOCK).with_data(3));

        Ok(Self { descriptor })
    }
}

impl ContentKind for CrystalBlock {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn descriptor_mut(&mut self) -> &mut Descriptor {
        &mut self.descriptor
    }

    fn properties(&self, _object: &dyn WorldObject) -> Option<PropertySheet> {
        let mut sheet = PropertySheet::new();
        sheet.push("hardness", "4");
        sheet.push("luminous", "true");

        Some(sheet)
    }
}

///
/// EmberSlime
///
/// Creature kind using every default: no properties, convention icon,
/// kill-score unlock chain with a duplicate entry.
///

pub struct EmberSlime {
    descriptor: Descriptor,
}

impl EmberSlime {
    pub const TYPE: ContentTypeId = ContentTypeId::new(102);

    pub fn new() -> Result<Self, ContentError> {
        let mut descriptor = Descriptor::new(Self::TYPE)?;
        descriptor.register_unlock(UnlockDecl::new(50, UnlockId::new(20)));
        descriptor.register_unlock(
            UnlockDecl::new(250, UnlockId::new(21)).with_parent(UnlockId::new(20)),
        );
        // Same unlock id as the first entry: both must survive discovery.
        descriptor.register_unlock(UnlockDecl::new(50, UnlockId::new(20)).with_data(1));

        Ok(Self { descriptor })
    }
}

impl ContentKind for EmberSlime {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn descriptor_mut(&mut self) -> &mut Descriptor {
        &mut self.descriptor
    }
}

///
/// TaggedObject
///
/// Minimal physical object for property inspection tests.
///

pub struct TaggedObject(pub ContentTypeId);

impl WorldObject for TaggedObject {
    fn content_type(&self) -> ContentTypeId {
        self.0
    }
}

///
/// PassthroughResources
///
/// Resource context that resolves every request to a named asset.
///

pub struct PassthroughResources;

impl ResourceContext for PassthroughResources {
    fn icon(&self, name: &str, tint: Tint) -> Icon {
        Icon::asset(name, tint)
    }
}
