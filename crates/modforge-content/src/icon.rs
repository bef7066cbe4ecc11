use crate::prelude::*;

///
/// Tint
///
/// RGBA multiplier applied to an icon asset.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Tint {
    /// Fixed tint applied to convention-resolved content icons.
    pub const CONTENT: Self = Self::rgb(255, 255, 255);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

///
/// Icon
///
/// A descriptor's icon slot. Starts as the `Default` sentinel and stays
/// there until either the author assigns an asset or resource loading
/// applies the `icon_{type}` naming convention.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Icon {
    #[default]
    Default,
    Asset { name: String, tint: Tint },
}

impl Icon {
    #[must_use]
    pub fn asset(name: impl Into<String>, tint: Tint) -> Self {
        Self::Asset {
            name: name.into(),
            tint,
        }
    }

    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

///
/// ResourceContext
///
/// Host-side asset access handed to `load_resources`. Unbounded work
/// (decode, I/O) lives behind this trait, not in this crate.
///

pub trait ResourceContext {
    /// Resolve a named icon asset with the given tint.
    fn icon(&self, name: &str, tint: Tint) -> Icon;
}

///
/// TESTS
///
