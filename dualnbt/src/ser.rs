//! Encoding of NBT to bytes.
//!
//! Output is always assembled in memory first. A sink only sees bytes once
//! the whole value has encoded successfully.

use std::io::Write;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

use crate::error::{Error, Result};
use crate::varint::{write_var_i32, write_var_i64, write_var_u32};
use crate::{Compound, Document, Endian, Kind, List, Mode, Opts, Tag, MAX_STRING_LEN};

/// Encode a document.
///
/// ```
/// use dualnbt::{to_bytes, Compound, Document, Mode};
///
/// let mut root = Compound::new();
/// root.insert("int", 0xdead).unwrap();
///
/// let bytes = to_bytes(&Document::new("", root), Mode::Disk).unwrap();
/// assert_eq!(bytes, [10, 0, 0, 3, 0, 3, b'i', b'n', b't', 0, 0, 0xde, 0xad, 0]);
/// ```
pub fn to_bytes(doc: &Document, opts: impl Into<Opts>) -> Result<Vec<u8>> {
    let opts = opts.into();
    let mut out = Vec::new();
    out.write_document(doc, &opts)?;
    Ok(out)
}

/// Encode several documents back to back, the inverse of
/// [`from_bytes_multiple`][crate::from_bytes_multiple].
pub fn to_bytes_multiple(docs: &[Document], opts: impl Into<Opts>) -> Result<Vec<u8>> {
    let opts = opts.into();
    let mut out = Vec::new();
    for doc in docs {
        out.write_document(doc, &opts)?;
    }
    Ok(out)
}

/// Encode a document into `writer`. Nothing is written if encoding fails.
pub fn to_writer<W: Write>(mut writer: W, doc: &Document, opts: impl Into<Opts>) -> Result<()> {
    let bytes = to_bytes(doc, opts)?;
    writer.write_all(&bytes)?;
    Ok(())
}

/// Append a single named tag of any kind to `out`. On failure `out` is
/// restored to its previous length.
pub fn write_named_tag(
    out: &mut Vec<u8>,
    name: &str,
    tag: &Tag,
    opts: impl Into<Opts>,
) -> Result<()> {
    let opts = opts.into();
    let start = out.len();

    let res = (|| {
        out.write_kind(tag.kind())?;
        out.write_str(name, &opts)?;
        out.write_payload(tag, &opts, 0)
    })();

    if res.is_err() {
        out.truncate(start);
    }
    res
}

impl Tag {
    /// Encode just the payload of this tag, without kind or name. The inverse
    /// of [`Tag::from_payload_bytes`].
    pub fn to_payload_bytes(&self, opts: impl Into<Opts>) -> Result<Vec<u8>> {
        let opts = opts.into();
        let mut out = Vec::new();
        out.write_payload(self, &opts, 0)?;
        Ok(out)
    }
}

macro_rules! fixed {
    ($self:ident, $opts:ident, $method:ident, $v:expr) => {
        match $opts.endian {
            Endian::Big => $self.$method::<BigEndian>($v)?,
            Endian::Little => $self.$method::<LittleEndian>($v)?,
        }
    };
}

pub(crate) trait WriteNbt: Write + Sized {
    fn write_kind(&mut self, kind: Kind) -> Result<()> {
        self.write_u8(kind.into())?;
        Ok(())
    }

    fn write_document(&mut self, doc: &Document, opts: &Opts) -> Result<()> {
        self.write_kind(Kind::Compound)?;
        self.write_str(&doc.name, opts)?;
        self.write_compound(&doc.root, opts, 0)
    }

    fn write_payload(&mut self, tag: &Tag, opts: &Opts, depth: usize) -> Result<()> {
        match tag {
            Tag::Byte(v) => self.write_i8(*v)?,
            Tag::Short(v) => fixed!(self, opts, write_i16, *v),
            Tag::Int(v) => self.write_int(*v, opts)?,
            Tag::Long(v) => match opts.mode {
                Mode::Disk => fixed!(self, opts, write_i64, *v),
                Mode::Network => write_var_i64(self, *v)?,
            },
            Tag::Float(v) => fixed!(self, opts, write_f32, *v),
            Tag::Double(v) => fixed!(self, opts, write_f64, *v),
            Tag::String(v) => self.write_str(v, opts)?,
            Tag::ByteArray(v) => {
                self.write_count(v.len(), opts)?;
                let bytes: Vec<u8> = v.iter().map(|&b| b as u8).collect();
                self.write_all(&bytes)?;
            }
            Tag::IntArray(v) => {
                self.write_count(v.len(), opts)?;
                for &i in v.iter() {
                    fixed!(self, opts, write_i32, i);
                }
            }
            Tag::LongArray(v) => {
                self.write_count(v.len(), opts)?;
                for &l in v.iter() {
                    fixed!(self, opts, write_i64, l);
                }
            }
            Tag::List(v) => self.write_list(v, opts, depth + 1)?,
            Tag::Compound(v) => self.write_compound(v, opts, depth + 1)?,
        }
        Ok(())
    }

    fn write_list(&mut self, list: &List, opts: &Opts, depth: usize) -> Result<()> {
        check_depth(opts, depth)?;
        self.write_kind(list.kind())?;
        self.write_count(list.len(), opts)?;
        for tag in list {
            self.write_payload(tag, opts, depth)?;
        }
        Ok(())
    }

    fn write_compound(&mut self, compound: &Compound, opts: &Opts, depth: usize) -> Result<()> {
        check_depth(opts, depth)?;
        for (name, tag) in compound {
            self.write_kind(tag.kind())?;
            self.write_str(name, opts)?;
            self.write_payload(tag, opts, depth)?;
        }
        self.write_kind(Kind::End)
    }

    fn write_int(&mut self, v: i32, opts: &Opts) -> Result<()> {
        match opts.mode {
            Mode::Disk => fixed!(self, opts, write_i32, v),
            Mode::Network => write_var_i32(self, v)?,
        }
        Ok(())
    }

    /// Lengths of lists and arrays are written as an Int.
    fn write_count(&mut self, len: usize, opts: &Opts) -> Result<()> {
        let len: i32 = len
            .try_into()
            .map_err(|_| Error::out_of_range(format!("length {} too large", len)))?;
        self.write_int(len, opts)
    }

    fn write_str(&mut self, s: &str, opts: &Opts) -> Result<()> {
        if s.len() > MAX_STRING_LEN {
            return Err(Error::out_of_range(format!(
                "string of {} bytes is longer than {}",
                s.len(),
                MAX_STRING_LEN
            )));
        }

        match opts.mode {
            Mode::Disk => fixed!(self, opts, write_u16, s.len() as u16),
            Mode::Network => write_var_u32(self, s.len() as u32)?,
        }
        self.write_all(s.as_bytes())?;
        Ok(())
    }
}

impl<T> WriteNbt for T where T: Write {}

fn check_depth(opts: &Opts, depth: usize) -> Result<()> {
    if depth > opts.max_depth {
        return Err(Error::out_of_range(format!(
            "nesting exceeds maximum depth of {}",
            opts.max_depth
        )));
    }
    Ok(())
}
