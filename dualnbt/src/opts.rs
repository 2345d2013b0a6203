/// Which of the two wire encodings to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Fixed width numbers, 2 byte string lengths. Used for saved data.
    Disk,
    /// Varint `Int`/`Long` values and counts, varint string lengths. Used for
    /// NBT embedded in packets.
    Network,
}

/// Byte order of the fixed width fields. Applies in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    Big,
    Little,
}

/// Default nesting limit for lists and compounds. Decoding and encoding
/// recurse once per level, so this is kept low enough for a default sized
/// thread stack.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options for reading and writing NBT.
///
/// ```
/// use dualnbt::{Endian, Opts};
///
/// let opts = Opts::network().endian(Endian::Little).max_depth(64);
/// ```
///
/// Anything taking `impl Into<Opts>` also accepts a bare [`Mode`], which uses
/// the defaults for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opts {
    pub(crate) mode: Mode,
    pub(crate) endian: Endian,
    pub(crate) max_depth: usize,
    pub(crate) max_seq_len: usize,
}

impl Opts {
    /// Disk mode, big endian, default limits.
    pub fn new() -> Self {
        Self::disk()
    }

    pub fn disk() -> Self {
        Self {
            mode: Mode::Disk,
            endian: Endian::Big,
            max_depth: DEFAULT_MAX_DEPTH,
            max_seq_len: usize::MAX,
        }
    }

    pub fn network() -> Self {
        Self {
            mode: Mode::Network,
            ..Self::disk()
        }
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    /// Maximum nesting of lists and compounds accepted when decoding or
    /// encoding. Deeper trees are rejected. Raising this far above
    /// [`DEFAULT_MAX_DEPTH`] needs a correspondingly larger stack.
    pub fn max_depth(mut self, value: usize) -> Self {
        self.max_depth = value;
        self
    }

    /// Maximum number of elements accepted for a single list or array when
    /// decoding. Protects against huge allocations from hostile lengths.
    pub fn max_seq_len(mut self, value: usize) -> Self {
        self.max_seq_len = value;
        self
    }

    pub fn get_mode(&self) -> Mode {
        self.mode
    }

    pub fn get_endian(&self) -> Endian {
        self.endian
    }
}

impl Default for Opts {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Mode> for Opts {
    fn from(mode: Mode) -> Self {
        Opts::new().mode(mode)
    }
}
