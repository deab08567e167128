//! Strongly typed city identifiers and the name registry that issues them.
//!
//! Flow tables name cities by string.  The loader interns every name into a
//! [`CityTable`] once, and everything downstream (trips, scene queries,
//! renderers) works with the `Copy` id.

use std::collections::HashMap;
use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a city in a [`CityTable`].
    pub struct CityId(u32);
}

// ── CityTable ─────────────────────────────────────────────────────────────────

/// Bidirectional city name ↔ [`CityId`] registry.
///
/// Ids are dense and issued in first-seen order, so `names[id.index()]` is
/// the name of `id`.
#[derive(Clone, Debug, Default)]
pub struct CityTable {
    names: Vec<String>,
    by_name: HashMap<String, CityId>,
}

impl CityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `name`, issuing a fresh one on first sight.
    pub fn intern(&mut self, name: &str) -> CityId {
        let name = name.trim();
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = CityId(self.names.len() as u32);
        self.names.push(name.to_owned());
        self.by_name.insert(name.to_owned(), id);
        id
    }

    pub fn get(&self, name: &str) -> Option<CityId> {
        self.by_name.get(name.trim()).copied()
    }

    pub fn name(&self, id: CityId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
