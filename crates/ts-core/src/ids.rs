//! Strongly typed, zero-cost identifier wrappers.
//!
//! Trains and stations are both dense indices (`0..n`) read from the scenario
//! file.  Wrapping them keeps a station index from ever being passed where a
//! train index is expected.  The inner integer is `pub` for direct `Vec`
//! indexing, but callers should prefer `.index()`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
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
    /// Index of a train in the scenario, `0..train_count`.
    pub struct TrainId(u32);
}

typed_id! {
    /// Index of a station in the network, `0..station_count`.
    pub struct StationId(u32);
}

// Console output prints bare numbers ("train: 3", "(0 -> 1)"), so these
// render as the raw index rather than `Name(n)`.

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
