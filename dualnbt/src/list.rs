use serde::Serialize;

use crate::error::{Error, Result};
use crate::{Compound, Kind, Tag};

/// An ordered sequence of unnamed tags that all have the same kind.
///
/// The kind is declared up front with [`List::with_kind`], or adopted from the
/// first tag pushed onto a list made with [`List::new`] (declared kind
/// `End`). Tags of any other kind are rejected and the list is left as it
/// was. Removing every element keeps the declared kind.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    kind: Kind,
    tags: Vec<Tag>,
}

impl Default for List {
    fn default() -> Self {
        Self::new()
    }
}

impl List {
    /// An empty list of kind `End`. Takes on the kind of the first tag pushed.
    pub fn new() -> Self {
        Self::with_kind(Kind::End)
    }

    /// An empty list that only accepts tags of `kind`.
    pub fn with_kind(kind: Kind) -> Self {
        Self {
            kind,
            tags: Vec::new(),
        }
    }

    /// Build a list from tags, failing if they do not all share a kind.
    pub fn from_tags(tags: impl IntoIterator<Item = Tag>) -> Result<Self> {
        let mut list = List::new();
        for tag in tags {
            list.push(tag)?;
        }
        Ok(list)
    }

    /// Assemble a list the reader has already checked.
    pub(crate) fn from_raw(kind: Kind, tags: Vec<Tag>) -> Self {
        Self { kind, tags }
    }

    /// The declared element kind. `End` for a list that has never held
    /// anything.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Append a tag.
    ///
    /// ```
    /// use dualnbt::{error::ErrorKind, Kind, List, Tag};
    ///
    /// let mut list = List::new();
    /// list.push(Tag::Byte(1)).unwrap();
    /// assert_eq!(list.kind(), Kind::Byte);
    ///
    /// let err = list.push(Tag::Short(1)).unwrap_err();
    /// assert_eq!(
    ///     err.kind(),
    ///     &ErrorKind::KindMismatch { expected: Kind::Byte, found: Kind::Short }
    /// );
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn push(&mut self, tag: impl Into<Tag>) -> Result<()> {
        let tag = tag.into();
        self.check(&tag)?;

        if self.kind == Kind::End {
            self.kind = tag.kind();
        }
        self.tags.push(tag);
        Ok(())
    }

    /// Same as [`push`][List::push].
    pub fn append(&mut self, tag: impl Into<Tag>) -> Result<()> {
        self.push(tag)
    }

    pub fn get(&self, index: usize) -> Result<&Tag> {
        self.tags
            .get(index)
            .ok_or_else(|| Error::index_out_of_range(index, self.tags.len()))
    }

    /// Replace the tag at `index`, returning the old one. The new tag must
    /// match the list's kind.
    pub fn set(&mut self, index: usize, tag: impl Into<Tag>) -> Result<Tag> {
        let tag = tag.into();
        if index >= self.tags.len() {
            return Err(Error::index_out_of_range(index, self.tags.len()));
        }
        self.check(&tag)?;
        Ok(std::mem::replace(&mut self.tags[index], tag))
    }

    pub fn remove(&mut self, index: usize) -> Result<Tag> {
        if index >= self.tags.len() {
            return Err(Error::index_out_of_range(index, self.tags.len()));
        }
        Ok(self.tags.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    /// Mutable access to a compound element. Handing out `&mut Tag` would let
    /// the element change kind, so nested access goes through these.
    pub fn get_compound_mut(&mut self, index: usize) -> Result<&mut Compound> {
        let len = self.tags.len();
        match self.tags.get_mut(index) {
            Some(Tag::Compound(c)) => Ok(c),
            Some(other) => Err(Error::kind_mismatch(Kind::Compound, other.kind())),
            None => Err(Error::index_out_of_range(index, len)),
        }
    }

    pub fn get_list_mut(&mut self, index: usize) -> Result<&mut List> {
        let len = self.tags.len();
        match self.tags.get_mut(index) {
            Some(Tag::List(l)) => Ok(l),
            Some(other) => Err(Error::kind_mismatch(Kind::List, other.kind())),
            None => Err(Error::index_out_of_range(index, len)),
        }
    }

    fn check(&self, tag: &Tag) -> Result<()> {
        if self.kind != Kind::End && tag.kind() != self.kind {
            return Err(Error::kind_mismatch(self.kind, tag.kind()));
        }
        tag.validate()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

impl IntoIterator for List {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.into_iter()
    }
}

impl Serialize for List {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(&self.tags)
    }
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for List {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let kind: Kind = u.arbitrary()?;
        if kind == Kind::End {
            return Ok(List::new());
        }

        let len = u.arbitrary_len::<Tag>()?;
        let mut tags = Vec::with_capacity(len);
        for _ in 0..len {
            tags.push(crate::tag::arbitrary_of_kind(u, kind)?);
        }
        Ok(List::from_raw(kind, tags))
    }
}
