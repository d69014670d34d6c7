//! Typed indices into the scenario's flat arenas.
//!
//! Robots, shelves, stations, and orders live in dense `Vec` arenas and
//! refer to each other by position, never by pointer.  Each arena gets its
//! own index type so a shelf id cannot be handed to the station table by
//! accident.  The inner `u32` stays `pub` because loaders and builders
//! mint ids positionally (`ShelfId(i as u32)`).

use std::fmt;

/// Define an arena index type: a `u32` newtype tied to one flat array,
/// displayed as `label#n` in error messages and logs.
macro_rules! arena_index {
    ($(#[$attr:meta])* $name:ident => $label:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// The arena slot this id addresses.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

arena_index! {
    /// Position of a robot in the fleet.  Doubles as its processing rank:
    /// lower ids win contested reservations.
    RobotId => "robot"
}

arena_index! {
    /// Position of a shelf in the scenario's shelf arena.
    ShelfId => "shelf"
}

arena_index! {
    /// Position of a station in the scenario's station arena.
    StationId => "station"
}

arena_index! {
    /// Position of an order in the scenario's order stream.
    OrderId => "order"
}
