use std::ops::Deref;

use serde::Serialize;

use crate::error::{Error, Result};

macro_rules! nbt_array {
    ($(#[$meta:meta])* $name:ident, $elem:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
        pub struct $name {
            data: Vec<$elem>,
        }

        impl $name {
            pub fn new(data: Vec<$elem>) -> Self {
                Self { data }
            }

            /// Get the element at `index`.
            pub fn get(&self, index: usize) -> Result<$elem> {
                self.data
                    .get(index)
                    .copied()
                    .ok_or_else(|| Error::index_out_of_range(index, self.data.len()))
            }

            /// Replace the element at `index`, returning the old one.
            pub fn set(&mut self, index: usize, value: $elem) -> Result<$elem> {
                let len = self.data.len();
                let slot = self
                    .data
                    .get_mut(index)
                    .ok_or_else(|| Error::index_out_of_range(index, len))?;
                Ok(std::mem::replace(slot, value))
            }

            pub fn push(&mut self, value: $elem) {
                self.data.push(value);
            }

            pub fn into_inner(self) -> Vec<$elem> {
                self.data
            }
        }

        impl Deref for $name {
            type Target = [$elem];

            fn deref(&self) -> &Self::Target {
                &self.data
            }
        }

        impl From<Vec<$elem>> for $name {
            fn from(data: Vec<$elem>) -> Self {
                Self::new(data)
            }
        }

        impl FromIterator<$elem> for $name {
            fn from_iter<I: IntoIterator<Item = $elem>>(iter: I) -> Self {
                Self::new(iter.into_iter().collect())
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $elem;
            type IntoIter = std::slice::Iter<'a, $elem>;

            fn into_iter(self) -> Self::IntoIter {
                self.data.iter()
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_seq(&self.data)
            }
        }
    };
}

nbt_array!(
    /// The payload of a `ByteArray` tag.
    ByteArray,
    i8
);
nbt_array!(
    /// The payload of an `IntArray` tag.
    IntArray,
    i32
);
nbt_array!(
    /// The payload of a `LongArray` tag. Commonly used for packed block
    /// states and heightmaps.
    LongArray,
    i64
);
