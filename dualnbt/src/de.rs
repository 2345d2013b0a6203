//! Decoding of NBT from bytes.
//!
//! Every function here works on a complete, immutable buffer. Nothing is
//! returned unless the whole requested value decoded, so a truncated or
//! malformed stream never produces a partial tree.

use std::io::Read;

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use indexmap::IndexMap;
use log::{debug, trace};

use crate::error::{Error, Result};
use crate::varint::{read_var_i32, read_var_i64, read_var_u32};
use crate::{
    ByteArray, Compound, Document, Endian, IntArray, Kind, List, LongArray, Mode, Opts, Tag,
    MAX_STRING_LEN,
};

/// Decode a document that fills the whole of `input`. Trailing bytes are an
/// error; use [`from_bytes_prefix`] for NBT followed by other data.
///
/// ```
/// use dualnbt::{from_bytes, Mode};
///
/// // TAG_Compound("") { TAG_Int("int"): 0xdead }
/// let bytes = [10, 0, 0, 3, 0, 3, b'i', b'n', b't', 0, 0, 0xde, 0xad, 0];
/// let doc = from_bytes(&bytes, Mode::Disk).unwrap();
///
/// assert_eq!(doc.name, "");
/// assert_eq!(doc.root.get_int("int").unwrap(), Some(0xdead));
/// ```
pub fn from_bytes(input: &[u8], opts: impl Into<Opts>) -> Result<Document> {
    let (doc, used) = from_bytes_prefix(input, opts)?;
    if used != input.len() {
        return Err(
            Error::malformed(format!("{} trailing bytes", input.len() - used)).at(used),
        );
    }
    Ok(doc)
}

/// Decode one document from the start of `input`, returning it along with the
/// number of bytes it took. This is the form needed for NBT embedded in a
/// packet.
pub fn from_bytes_prefix(input: &[u8], opts: impl Into<Opts>) -> Result<(Document, usize)> {
    let opts = opts.into();
    let mut reader = Reader::new(input);

    match reader.read_document(&opts) {
        Ok(doc) => {
            trace!(
                "decoded root {:?} with {} entries from {} bytes",
                doc.name,
                doc.root.len(),
                reader.position()
            );
            Ok((doc, reader.position()))
        }
        Err(e) => {
            debug!("rejected {:?} nbt: {}", opts.mode, e);
            Err(e.at(reader.position()))
        }
    }
}

/// Decode back to back documents until `input` is exhausted.
pub fn from_bytes_multiple(input: &[u8], opts: impl Into<Opts>) -> Result<Vec<Document>> {
    let opts = opts.into();
    let mut docs = Vec::new();
    let mut offset = 0;

    while offset < input.len() {
        let (doc, used) = from_bytes_prefix(&input[offset..], opts)?;
        docs.push(doc);
        offset += used;
    }
    Ok(docs)
}

/// Read all of `reader` and decode it as a single document.
pub fn from_reader<R: Read>(mut reader: R, opts: impl Into<Opts>) -> Result<Document> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    from_bytes(&buf, opts)
}

/// Decode a single named tag of any kind from the front of `input`. On
/// success `input` is advanced past the tag; on failure it is left alone.
pub fn read_named_tag(input: &mut &[u8], opts: impl Into<Opts>) -> Result<(String, Tag)> {
    let opts = opts.into();
    let data: &[u8] = *input;
    let mut reader = Reader::new(data);

    match reader.read_named(&opts) {
        Ok(named) => {
            *input = &data[reader.position()..];
            Ok(named)
        }
        Err(e) => Err(e.at(reader.position())),
    }
}

impl Tag {
    /// Decode the bare payload of a tag whose kind is known from context, eg
    /// an element of a list. The payload must fill `input`.
    pub fn from_payload_bytes(kind: Kind, input: &[u8], opts: impl Into<Opts>) -> Result<Tag> {
        let opts = opts.into();
        let mut reader = Reader::new(input);

        if kind == Kind::End {
            return Err(Error::malformed("TAG_End has no payload"));
        }
        let tag = reader
            .read_payload(kind, &opts, 0)
            .map_err(|e| e.at(reader.position()))?;

        if reader.position() != input.len() {
            return Err(Error::malformed("trailing bytes after payload").at(reader.position()));
        }
        Ok(tag)
    }
}

macro_rules! fixed {
    ($self:ident, $opts:ident, $method:ident) => {
        match $opts.endian {
            Endian::Big => $self.input.$method::<BigEndian>()?,
            Endian::Little => $self.input.$method::<LittleEndian>()?,
        }
    };
}

/// Cursor over an input buffer. The encoding options are passed to each call
/// rather than stored, so the same reader logic serves both modes.
pub(crate) struct Reader<'a> {
    input: &'a [u8],
    start_len: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            start_len: input.len(),
        }
    }

    /// Bytes consumed so far.
    pub(crate) fn position(&self) -> usize {
        self.start_len - self.input.len()
    }

    pub(crate) fn read_document(&mut self, opts: &Opts) -> Result<Document> {
        let kind = self.read_kind()?;
        if kind != Kind::Compound {
            return Err(Error::no_root_compound());
        }
        let name = self.read_str(opts)?;
        let root = self.read_compound(opts, 0)?;
        Ok(Document { name, root })
    }

    pub(crate) fn read_named(&mut self, opts: &Opts) -> Result<(String, Tag)> {
        let kind = self.read_kind()?;
        if kind == Kind::End {
            return Err(Error::malformed("named tag cannot be TAG_End"));
        }
        let name = self.read_str(opts)?;
        let tag = self.read_payload(kind, opts, 0)?;
        Ok((name, tag))
    }

    pub(crate) fn read_kind(&mut self) -> Result<Kind> {
        let kind = self.input.read_u8()?;
        Kind::try_from(kind).map_err(|_| Error::unknown_kind(kind))
    }

    pub(crate) fn read_payload(&mut self, kind: Kind, opts: &Opts, depth: usize) -> Result<Tag> {
        Ok(match kind {
            Kind::End => return Err(Error::malformed("unexpected TAG_End")),
            Kind::Byte => Tag::Byte(self.input.read_i8()?),
            Kind::Short => Tag::Short(fixed!(self, opts, read_i16)),
            Kind::Int => Tag::Int(self.read_int(opts)?),
            Kind::Long => Tag::Long(self.read_long(opts)?),
            Kind::Float => Tag::Float(fixed!(self, opts, read_f32)),
            Kind::Double => Tag::Double(fixed!(self, opts, read_f64)),
            Kind::String => Tag::String(self.read_str(opts)?),
            Kind::ByteArray => {
                let len = self.read_count(opts, 1)?;
                let (data, rest) = self.input.split_at(len);
                self.input = rest;
                Tag::ByteArray(data.iter().map(|&b| b as i8).collect::<ByteArray>())
            }
            Kind::IntArray => {
                let len = self.read_count(opts, 4)?;
                let mut data = Vec::with_capacity(len);
                for _ in 0..len {
                    data.push(fixed!(self, opts, read_i32));
                }
                Tag::IntArray(IntArray::new(data))
            }
            Kind::LongArray => {
                let len = self.read_count(opts, 8)?;
                let mut data = Vec::with_capacity(len);
                for _ in 0..len {
                    data.push(fixed!(self, opts, read_i64));
                }
                Tag::LongArray(LongArray::new(data))
            }
            Kind::List => Tag::List(self.read_list(opts, depth + 1)?),
            Kind::Compound => Tag::Compound(self.read_compound(opts, depth + 1)?),
        })
    }

    fn read_list(&mut self, opts: &Opts, depth: usize) -> Result<List> {
        check_depth(opts, depth)?;

        let element_kind = self.read_kind()?;
        // Every element takes at least one byte, which bounds the
        // allocation below by the input size.
        let len = self.read_count(opts, 1)?;

        if element_kind == Kind::End && len > 0 {
            return Err(Error::malformed("non-empty list of TAG_End"));
        }

        let mut tags = Vec::with_capacity(len);
        for _ in 0..len {
            tags.push(self.read_payload(element_kind, opts, depth)?);
        }
        Ok(List::from_raw(element_kind, tags))
    }

    fn read_compound(&mut self, opts: &Opts, depth: usize) -> Result<Compound> {
        check_depth(opts, depth)?;

        let mut entries = IndexMap::new();
        loop {
            let kind = self.read_kind()?;
            if kind == Kind::End {
                break;
            }

            let name = self.read_str(opts)?;
            if entries.contains_key(&name) {
                return Err(Error::malformed(format!("duplicate compound key {:?}", name)));
            }
            let tag = self.read_payload(kind, opts, depth)?;
            entries.insert(name, tag);
        }
        Ok(Compound::from_map(entries))
    }

    fn read_int(&mut self, opts: &Opts) -> Result<i32> {
        Ok(match opts.mode {
            Mode::Disk => fixed!(self, opts, read_i32),
            Mode::Network => read_var_i32(&mut self.input)?,
        })
    }

    fn read_long(&mut self, opts: &Opts) -> Result<i64> {
        Ok(match opts.mode {
            Mode::Disk => fixed!(self, opts, read_i64),
            Mode::Network => read_var_i64(&mut self.input)?,
        })
    }

    /// Read an element count written as an Int, checking it against the
    /// remaining input given the minimum size of each element.
    fn read_count(&mut self, opts: &Opts, min_elem_size: usize) -> Result<usize> {
        let count = self.read_int(opts)?;
        let count: usize = count
            .try_into()
            .map_err(|_| Error::malformed(format!("negative length {}", count)))?;

        if count > opts.max_seq_len {
            return Err(Error::malformed(format!(
                "length {} exceeds maximum of {}",
                count, opts.max_seq_len
            )));
        }

        let needed = count.checked_mul(min_elem_size);
        if needed.map_or(true, |n| n > self.input.len()) {
            return Err(Error::unexpected_eof());
        }
        Ok(count)
    }

    pub(crate) fn read_str(&mut self, opts: &Opts) -> Result<String> {
        let len = match opts.mode {
            Mode::Disk => fixed!(self, opts, read_u16) as usize,
            Mode::Network => read_var_u32(&mut self.input)? as usize,
        };

        if len > MAX_STRING_LEN {
            return Err(Error::malformed(format!("string length {} too long", len)));
        }
        if len > self.input.len() {
            return Err(Error::unexpected_eof());
        }

        let (data, rest) = self.input.split_at(len);
        let s = std::str::from_utf8(data).map_err(|_| Error::nonunicode_string(data))?;
        self.input = rest;
        Ok(s.to_owned())
    }
}

fn check_depth(opts: &Opts, depth: usize) -> Result<()> {
    if depth > opts.max_depth {
        return Err(Error::malformed(format!(
            "nesting exceeds maximum depth of {}",
            opts.max_depth
        )));
    }
    Ok(())
}
