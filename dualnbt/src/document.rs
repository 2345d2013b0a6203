use std::ops::{Deref, DerefMut};

use serde::Serialize;

use crate::Compound;

/// The root of an NBT snapshot: a single named compound. The name is usually
/// empty, and always is for NBT embedded in network packets.
///
/// Derefs to the root [`Compound`], so entries can be reached directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub name: String,
    pub root: Compound,
}

impl Document {
    pub fn new(name: impl Into<String>, root: Compound) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    pub fn into_root(self) -> Compound {
        self.root
    }
}

impl From<Compound> for Document {
    fn from(root: Compound) -> Self {
        Self::new("", root)
    }
}

impl Deref for Document {
    type Target = Compound;

    fn deref(&self) -> &Self::Target {
        &self.root
    }
}

impl DerefMut for Document {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.root
    }
}
