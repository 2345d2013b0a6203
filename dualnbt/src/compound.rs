use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::tag::check_str_len;
use crate::{ByteArray, IntArray, Kind, List, LongArray, Payload, Tag};

/// A set of uniquely named tags. Iteration, and therefore the order entries
/// are written out in, follows insertion order. Replacing an existing entry
/// keeps its original position.
///
/// Looking up a missing name gives `None` rather than an error, since data
/// written by older or newer versions routinely lacks or adds keys.
///
/// Iterators borrow the compound, so it cannot be mutated while one is alive.
/// To mutate based on what you find, collect the names first.
#[derive(Debug, Clone, Default)]
pub struct Compound {
    entries: IndexMap<String, Tag>,
}

macro_rules! typed_get {
    ($(#[$meta:meta])* $name:ident, $variant:ident, $ret:ty, |$v:ident| $conv:expr) => {
        $(#[$meta])*
        pub fn $name(&self, name: &str) -> Result<Option<$ret>> {
            match self.entries.get(name) {
                None => Ok(None),
                Some(Tag::$variant($v)) => Ok(Some($conv)),
                Some(other) => Err(Error::kind_mismatch(Kind::$variant, other.kind())),
            }
        }
    };
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the tag under `name`, returning the previous tag if
    /// there was one. A replaced entry stays where it was.
    ///
    /// Fails without modifying the compound if the name or a string value is
    /// longer than [`MAX_STRING_LEN`][crate::MAX_STRING_LEN].
    pub fn insert(&mut self, name: impl Into<String>, tag: impl Into<Tag>) -> Result<Option<Tag>> {
        let name = name.into();
        let tag = tag.into();
        check_str_len(&name)?;
        tag.validate()?;
        Ok(self.entries.insert(name, tag))
    }

    /// Same as [`insert`][Compound::insert], discarding the previous tag.
    pub fn set(&mut self, name: impl Into<String>, tag: impl Into<Tag>) -> Result<()> {
        self.insert(name, tag).map(|_| ())
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.entries.get(name)
    }

    /// Recompute the value of an existing entry in place, keeping its kind.
    /// The new value is validated before it replaces the old one. Returns
    /// false if there is no entry called `name`.
    pub fn update<F>(&mut self, name: &str, f: F) -> Result<bool>
    where
        F: FnOnce(&Tag) -> Payload,
    {
        match self.entries.get_mut(name) {
            Some(tag) => tag.update(f).map(|_| true),
            None => Ok(false),
        }
    }

    /// Remove an entry, keeping the order of the rest. Removing a missing name
    /// does nothing.
    pub fn remove(&mut self, name: &str) -> Option<Tag> {
        self.entries.shift_remove(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order. Calling this again starts from the
    /// beginning.
    pub fn iter(&self) -> CompoundIter<'_> {
        CompoundIter {
            inner: self.entries.iter(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    typed_get!(get_byte, Byte, i8, |v| *v);
    typed_get!(get_short, Short, i16, |v| *v);
    typed_get!(get_int, Int, i32, |v| *v);
    typed_get!(get_long, Long, i64, |v| *v);
    typed_get!(get_float, Float, f32, |v| *v);
    typed_get!(get_double, Double, f64, |v| *v);
    typed_get!(get_str, String, &str, |v| v.as_str());
    typed_get!(get_byte_array, ByteArray, &ByteArray, |v| v);
    typed_get!(get_int_array, IntArray, &IntArray, |v| v);
    typed_get!(get_long_array, LongArray, &LongArray, |v| v);
    typed_get!(get_list, List, &List, |v| v);
    typed_get!(get_compound, Compound, &Compound, |v| v);

    pub fn get_list_mut(&mut self, name: &str) -> Result<Option<&mut List>> {
        match self.entries.get_mut(name) {
            None => Ok(None),
            Some(Tag::List(v)) => Ok(Some(v)),
            Some(other) => Err(Error::kind_mismatch(Kind::List, other.kind())),
        }
    }

    pub fn get_compound_mut(&mut self, name: &str) -> Result<Option<&mut Compound>> {
        match self.entries.get_mut(name) {
            None => Ok(None),
            Some(Tag::Compound(v)) => Ok(Some(v)),
            Some(other) => Err(Error::kind_mismatch(Kind::Compound, other.kind())),
        }
    }

    /// Build from entries already known to be valid, eg fresh from the reader.
    pub(crate) fn from_map(entries: IndexMap<String, Tag>) -> Self {
        Self { entries }
    }
}

/// Compounds are equal when they hold equal entries in the same order.
impl PartialEq for Compound {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

/// Iterator over the entries of a [`Compound`] in insertion order.
pub struct CompoundIter<'a> {
    inner: indexmap::map::Iter<'a, String, Tag>,
}

impl<'a> Iterator for CompoundIter<'a> {
    type Item = (&'a str, &'a Tag);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for CompoundIter<'_> {}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a str, &'a Tag);
    type IntoIter = CompoundIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Compound {
    type Item = (String, Tag);
    type IntoIter = indexmap::map::IntoIter<String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Compound {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.entries.iter())
    }
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for Compound {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let mut compound = Compound::new();
        for entry in u.arbitrary_iter::<(String, Tag)>()? {
            let (name, tag) = entry?;
            if compound.insert(name, tag).is_err() {
                return Err(arbitrary::Error::IncorrectFormat);
            }
        }
        Ok(compound)
    }
}
