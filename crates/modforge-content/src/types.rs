use crate::prelude::*;
use derive_more::{Display, FromStr};

///
/// ContentTypeId
///
/// Identity of one entity kind across the whole content universe.
/// Strictly positive once a `Descriptor` accepts it; the raw newtype is
/// deliberately unchecked so save records can carry tags that no longer
/// resolve.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
pub struct ContentTypeId(i32);

impl ContentTypeId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// A descriptor-bearing id must be strictly positive.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 > 0
    }
}

///
/// UnlockId
///
/// Identity of a collectible unlock token. `ALWAYS` is the sentinel parent
/// meaning the unlock has no prerequisite.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
pub struct UnlockId(i32);

impl UnlockId {
    /// Sentinel parent: granted from the start, nothing to collect.
    pub const ALWAYS: Self = Self(0);

    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

///
/// EntityId
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
pub struct EntityId(u32);

impl EntityId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

///
/// Position
///

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

///
/// Property
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

///
/// PropertySheet
///
/// Ordered custom properties returned by property inspection. Absence is a
/// normal outcome; an empty sheet is distinct from "no sheet".
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PropertySheet {
    pub entries: Vec<Property>,
}

impl PropertySheet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push(Property::new(name, value));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.entries.iter()
    }
}

///
/// TESTS
///
