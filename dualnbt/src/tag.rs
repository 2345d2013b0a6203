use serde::Serialize;

use crate::error::{Error, Result};
use crate::{ByteArray, Compound, IntArray, Kind, List, LongArray};

/// Longest string, in encoded bytes, that can be stored in a `String` tag or
/// used as a compound key.
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

/// Tag is one complete NBT value. It owns its data, compounds and lists own
/// their children, so a tree has exactly one owner.
///
/// Every numeric variant holds a Rust type with exactly the domain of its
/// kind, so a `Tag` cannot hold an out of range number. Building a tag from
/// untyped input goes through [`Tag::construct`], and changing the value of an
/// existing tag through [`Tag::set`], both of which validate first.
///
/// There is no `End` variant. `End` only exists on the wire and as the
/// declared kind of an empty [`List`].
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(ByteArray),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(IntArray),
    LongArray(LongArray),
}

/// Untyped input for [`Tag::construct`] and [`Tag::set`]. The kind decides
/// how it is interpreted and which values are acceptable.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Integer(i64),
    Float(f64),
    Text(String),
    Array(Vec<i64>),
    List(List),
    Compound(Compound),
}

impl Payload {
    fn describe(&self) -> &'static str {
        match self {
            Payload::Integer(_) => "an integer",
            Payload::Float(_) => "a floating point number",
            Payload::Text(_) => "a string",
            Payload::Array(_) => "an array",
            Payload::List(_) => "a list",
            Payload::Compound(_) => "a compound",
        }
    }
}

impl Tag {
    /// Build a tag of the given kind, checking the payload against the kind's
    /// domain. Integers are only accepted for `Float` and `Double` when the
    /// floating point type holds them exactly.
    ///
    /// ```
    /// use dualnbt::{error::ErrorKind, Kind, Payload, Tag};
    ///
    /// assert_eq!(Tag::construct(Kind::Byte, Payload::Integer(127)), Ok(Tag::Byte(127)));
    ///
    /// let err = Tag::construct(Kind::Byte, Payload::Integer(128)).unwrap_err();
    /// assert_eq!(err.kind(), &ErrorKind::OutOfRange);
    ///
    /// let err = Tag::construct(Kind::Int, Payload::Float(1.5)).unwrap_err();
    /// assert_eq!(err.kind(), &ErrorKind::TypeMismatch);
    /// ```
    pub fn construct(kind: Kind, payload: impl Into<Payload>) -> Result<Tag> {
        let payload = payload.into();

        Ok(match (kind, payload) {
            (Kind::Byte, Payload::Integer(v)) => Tag::Byte(narrow(kind, v)?),
            (Kind::Short, Payload::Integer(v)) => Tag::Short(narrow(kind, v)?),
            (Kind::Int, Payload::Integer(v)) => Tag::Int(narrow(kind, v)?),
            (Kind::Long, Payload::Integer(v)) => Tag::Long(v),

            (Kind::Float, Payload::Integer(v)) => {
                let f = v as f32;
                if f as i128 != v as i128 {
                    return Err(out_of_range(kind, v));
                }
                Tag::Float(f)
            }
            (Kind::Float, Payload::Float(v)) => {
                if v.is_finite() && v.abs() > f32::MAX as f64 {
                    return Err(out_of_range(kind, v));
                }
                Tag::Float(v as f32)
            }
            (Kind::Double, Payload::Integer(v)) => {
                let f = v as f64;
                if f as i128 != v as i128 {
                    return Err(out_of_range(kind, v));
                }
                Tag::Double(f)
            }
            (Kind::Double, Payload::Float(v)) => Tag::Double(v),

            (Kind::String, Payload::Text(s)) => {
                check_str_len(&s)?;
                Tag::String(s)
            }

            (Kind::ByteArray, Payload::Array(v)) => Tag::ByteArray(
                v.into_iter()
                    .map(|e| narrow::<i8>(kind, e))
                    .collect::<Result<_>>()?,
            ),
            (Kind::IntArray, Payload::Array(v)) => Tag::IntArray(
                v.into_iter()
                    .map(|e| narrow::<i32>(kind, e))
                    .collect::<Result<_>>()?,
            ),
            (Kind::LongArray, Payload::Array(v)) => Tag::LongArray(LongArray::new(v)),

            (Kind::List, Payload::List(l)) => Tag::List(l),
            (Kind::Compound, Payload::Compound(c)) => Tag::Compound(c),

            (kind, payload) => return Err(Error::type_mismatch(kind, payload.describe())),
        })
    }

    /// Replace the value of this tag, keeping its kind. The new value is
    /// validated first; on error the tag is unchanged.
    pub fn set(&mut self, payload: impl Into<Payload>) -> Result<()> {
        let replacement = Tag::construct(self.kind(), payload)?;
        *self = replacement;
        Ok(())
    }

    /// Compute a new value from the current one and commit it only if it
    /// validates. Useful for in-place counters:
    ///
    /// ```
    /// use dualnbt::{Payload, Tag};
    ///
    /// let mut burn = Tag::Short(10);
    /// burn.update(|t| Payload::Integer(t.as_i64().unwrap_or(0) - 1)).unwrap();
    /// assert_eq!(burn, Tag::Short(9));
    ///
    /// let mut full = Tag::Short(i16::MAX);
    /// assert!(full.update(|t| Payload::Integer(t.as_i64().unwrap_or(0) + 1)).is_err());
    /// assert_eq!(full, Tag::Short(i16::MAX));
    /// ```
    pub fn update<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&Tag) -> Payload,
    {
        let payload = f(self);
        self.set(payload)
    }

    /// The kind of this tag. Never `Kind::End`.
    pub fn kind(&self) -> Kind {
        match self {
            Tag::Byte(_) => Kind::Byte,
            Tag::Short(_) => Kind::Short,
            Tag::Int(_) => Kind::Int,
            Tag::Long(_) => Kind::Long,
            Tag::Float(_) => Kind::Float,
            Tag::Double(_) => Kind::Double,
            Tag::ByteArray(_) => Kind::ByteArray,
            Tag::String(_) => Kind::String,
            Tag::List(_) => Kind::List,
            Tag::Compound(_) => Kind::Compound,
            Tag::IntArray(_) => Kind::IntArray,
            Tag::LongArray(_) => Kind::LongArray,
        }
    }

    /// Checks that can't be expressed in the type, currently just string
    /// length. Containers run this before accepting a tag.
    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            Tag::String(s) => check_str_len(s),
            _ => Ok(()),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Tag::Byte(v) => Some(v as i64),
            Tag::Short(v) => Some(v as i64),
            Tag::Int(v) => Some(v as i64),
            Tag::Long(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Tag::Byte(v) => Some(v as f64),
            Tag::Short(v) => Some(v as f64),
            Tag::Int(v) => Some(v as f64),
            Tag::Long(v) => Some(v as f64),
            Tag::Float(v) => Some(v as f64),
            Tag::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tag::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Tag::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Tag::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Tag::Compound(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match self {
            Tag::Compound(v) => Some(v),
            _ => None,
        }
    }
}

fn narrow<T>(kind: Kind, v: i64) -> Result<T>
where
    T: TryFrom<i64>,
{
    T::try_from(v).map_err(|_| out_of_range(kind, v))
}

fn out_of_range(kind: Kind, v: impl std::fmt::Display) -> Error {
    Error::out_of_range(format!("value {} is out of range for {}", v, kind))
}

pub(crate) fn check_str_len(s: &str) -> Result<()> {
    if s.len() > MAX_STRING_LEN {
        return Err(Error::out_of_range(format!(
            "string of {} bytes is longer than {}",
            s.len(),
            MAX_STRING_LEN
        )));
    }
    Ok(())
}

// ------------- From<T> impls -------------

macro_rules! from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl From<$type> for Tag {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
    };
}
from!(i8, Byte);
from!(i16, Short);
from!(i32, Int);
from!(i64, Long);
from!(f32, Float);
from!(f64, Double);
from!(String, String);
from!(&str, String, .to_owned());
from!(ByteArray, ByteArray);
from!(IntArray, IntArray);
from!(LongArray, LongArray);
from!(List, List);
from!(Compound, Compound);

impl From<bool> for Tag {
    fn from(val: bool) -> Self {
        Self::Byte(i8::from(val))
    }
}

macro_rules! payload_from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl From<$type> for Payload {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
    };
}
payload_from!(i8, Integer, as i64);
payload_from!(i16, Integer, as i64);
payload_from!(i32, Integer, as i64);
payload_from!(i64, Integer);
payload_from!(u8, Integer, as i64);
payload_from!(u16, Integer, as i64);
payload_from!(u32, Integer, as i64);
payload_from!(f32, Float, as f64);
payload_from!(f64, Float);
payload_from!(String, Text);
payload_from!(&str, Text, .to_owned());
payload_from!(Vec<i64>, Array);
payload_from!(List, List);
payload_from!(Compound, Compound);

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Tag::Byte(v) => serializer.serialize_i8(*v),
            Tag::Short(v) => serializer.serialize_i16(*v),
            Tag::Int(v) => serializer.serialize_i32(*v),
            Tag::Long(v) => serializer.serialize_i64(*v),
            Tag::Float(v) => serializer.serialize_f32(*v),
            Tag::Double(v) => serializer.serialize_f64(*v),
            Tag::String(v) => serializer.serialize_str(v),
            Tag::ByteArray(v) => v.serialize(serializer),
            Tag::IntArray(v) => v.serialize(serializer),
            Tag::LongArray(v) => v.serialize(serializer),
            Tag::List(v) => v.serialize(serializer),
            Tag::Compound(v) => v.serialize(serializer),
        }
    }
}

/// Generate a valid tag of a known kind. Lists need this to stay homogeneous.
#[cfg(feature = "arbitrary1")]
pub(crate) fn arbitrary_of_kind(
    u: &mut arbitrary::Unstructured,
    kind: Kind,
) -> arbitrary::Result<Tag> {
    Ok(match kind {
        Kind::End => return Err(arbitrary::Error::IncorrectFormat),
        Kind::Byte => Tag::Byte(u.arbitrary()?),
        Kind::Short => Tag::Short(u.arbitrary()?),
        Kind::Int => Tag::Int(u.arbitrary()?),
        Kind::Long => Tag::Long(u.arbitrary()?),
        Kind::Float => Tag::Float(u.arbitrary()?),
        Kind::Double => Tag::Double(u.arbitrary()?),
        Kind::ByteArray => Tag::ByteArray(u.arbitrary()?),
        Kind::String => {
            let s: String = u.arbitrary()?;
            if s.len() > MAX_STRING_LEN {
                return Err(arbitrary::Error::IncorrectFormat);
            }
            Tag::String(s)
        }
        Kind::List => Tag::List(u.arbitrary()?),
        Kind::Compound => Tag::Compound(u.arbitrary()?),
        Kind::IntArray => Tag::IntArray(u.arbitrary()?),
        Kind::LongArray => Tag::LongArray(u.arbitrary()?),
    })
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for Tag {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let kind: Kind = u.arbitrary()?;
        arbitrary_of_kind(u, kind)
    }
}
