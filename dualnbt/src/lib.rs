//! dualnbt reads and writes NBT (Named Binary Tag) data, the hierarchical
//! binary format used to store and transmit block, item and entity state.
//!
//! The same tag tree can be encoded two ways, chosen per call with [`Mode`]:
//!
//! * [`Mode::Disk`]: every number has a fixed width, strings carry a 2 byte
//!   length. This is what ends up in saved worlds.
//! * [`Mode::Network`]: `Int` and `Long` values, list and array counts are
//!   zig-zag varints, and string lengths are unsigned varints. Used when NBT
//!   is embedded in packets.
//!
//! Both modes share the tag kinds and tree shape, so a tree decoded in one
//! mode can be written out in the other.
//!
//! * For the tree itself see [`Tag`], [`Compound`] and [`List`].
//! * For the root of a snapshot see [`Document`].
//! * For tuning the codec see [`Opts`].
//!
//! ```toml
//! [dependencies]
//! dualnbt = "0.1"
//! ```
//!
//! # Quick example
//!
//! ```
//! use dualnbt::{Compound, Document, List, Mode, Tag};
//!
//! # fn main() -> dualnbt::error::Result<()> {
//! let mut items = List::new();
//! items.push(Tag::from(1i8))?;
//! items.push(Tag::from(2i8))?;
//!
//! let mut root = Compound::new();
//! root.insert("BurnTime", 200i16)?;
//! root.insert("Items", items)?;
//!
//! let doc = Document::new("", root);
//! let bytes = dualnbt::to_bytes(&doc, Mode::Network)?;
//! let back = dualnbt::from_bytes(&bytes, Mode::Network)?;
//!
//! assert_eq!(back, doc);
//! assert_eq!(back.root.get_short("BurnTime")?, Some(200));
//! # Ok(())
//! # }
//! ```
//!
//! # Threading
//!
//! Trees are plain owned data. A decoded tree can be shared read-only between
//! threads; mutation needs `&mut` and therefore a single owner. The reader and
//! writer never block and never touch I/O other than the sink handed to
//! [`to_writer`].

use std::convert::TryFrom;
use std::fmt;

pub mod error;

mod arrays;
mod compound;
mod de;
mod document;
mod list;
mod opts;
mod ser;
mod tag;
mod varint;

pub use arrays::*;
pub use compound::*;
pub use de::*;
pub use document::*;
pub use list::*;
pub use opts::*;
pub use ser::*;
pub use tag::*;

#[cfg(test)]
mod test;

/// The kind of an NBT tag. This does not carry the value or the name of the
/// data, it is the discriminant written before every named tag.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum Kind {
    /// Represents the end of a Compound object, or the kind of an empty list.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents an array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other objects, all of the same kind.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents an array of Int (i32).
    IntArray = 11,
    /// Represents an array of Long (i64).
    LongArray = 12,
}

// Crates exist to generate this code for us, but the kinds are fixed by the
// format so writing it out costs little.
impl TryFrom<u8> for Kind {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Kind::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Kind> for u8 {
    fn from(kind: Kind) -> Self {
        kind as u8
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::End => "TAG_End",
            Kind::Byte => "TAG_Byte",
            Kind::Short => "TAG_Short",
            Kind::Int => "TAG_Int",
            Kind::Long => "TAG_Long",
            Kind::Float => "TAG_Float",
            Kind::Double => "TAG_Double",
            Kind::ByteArray => "TAG_Byte_Array",
            Kind::String => "TAG_String",
            Kind::List => "TAG_List",
            Kind::Compound => "TAG_Compound",
            Kind::IntArray => "TAG_Int_Array",
            Kind::LongArray => "TAG_Long_Array",
        };
        f.write_str(name)
    }
}
