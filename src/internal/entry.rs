use uuid::Uuid;

use crate::internal::{consts, DirEntry};

// ========================================================================= //

/// The kind of object a directory entry describes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    /// An unused directory slot.
    Unallocated,
    /// A storage object (a "directory" within the compound file).
    Storage,
    /// A stream object (a "file" within the compound file).
    Stream,
    /// The root storage, whose data is the mini stream.
    Root,
    /// An object type byte that the format does not define.
    Unknown(u8),
}

impl EntryKind {
    pub(crate) fn from_byte(byte: u8) -> EntryKind {
        match byte {
            consts::OBJ_TYPE_UNALLOCATED => EntryKind::Unallocated,
            consts::OBJ_TYPE_STORAGE => EntryKind::Storage,
            consts::OBJ_TYPE_STREAM => EntryKind::Stream,
            consts::OBJ_TYPE_ROOT => EntryKind::Root,
            other => EntryKind::Unknown(other),
        }
    }
}

// ========================================================================= //

/// Metadata about a single entry of a compound file's directory.
#[derive(Clone, Debug)]
pub struct Entry {
    index: usize,
    name: String,
    kind: EntryKind,
    clsid: Uuid,
    state_bits: u32,
    start_sector: u32,
    stream_len: u64,
}

impl Entry {
    pub(crate) fn new(index: usize, dir_entry: &DirEntry) -> Entry {
        Entry {
            index,
            name: dir_entry.name.clone(),
            kind: EntryKind::from_byte(dir_entry.obj_type),
            clsid: dir_entry.clsid,
            state_bits: dir_entry.state_bits,
            start_sector: dir_entry.start_sector,
            stream_len: dir_entry.stream_len,
        }
    }

    /// Returns the position of this entry in the flat directory list; this
    /// is the index accepted by
    /// [`CompoundFile::read_stream`](crate::CompoundFile::read_stream).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the name of the entry, with NUL padding removed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the object type of the entry.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Returns whether this entry is for a stream object.
    pub fn is_stream(&self) -> bool {
        self.kind == EntryKind::Stream
    }

    /// Returns whether this entry is for a storage object, either the root
    /// or a nested storage.
    pub fn is_storage(&self) -> bool {
        self.kind == EntryKind::Storage || self.kind == EntryKind::Root
    }

    /// Returns whether this entry is the root storage object.
    pub fn is_root(&self) -> bool {
        self.kind == EntryKind::Root
    }

    /// Returns the declared size, in bytes, of the entry's data.
    pub fn len(&self) -> u64 {
        self.stream_len
    }

    /// Returns true if the entry declares no data.
    pub fn is_empty(&self) -> bool {
        self.stream_len == 0
    }

    /// Returns true if the data lives in the mini stream rather than in
    /// regular sectors.  The root entry's own data never does.
    pub fn in_mini_stream(&self) -> bool {
        !self.is_root() && self.stream_len < consts::MINI_STREAM_CUTOFF
    }

    /// Returns the first sector of the entry's data, in whichever sector
    /// chain its size class uses.
    pub fn start_sector(&self) -> u32 {
        self.start_sector
    }

    /// Returns the class id stored with the entry (all zeros for streams).
    pub fn clsid(&self) -> &Uuid {
        &self.clsid
    }

    /// Returns the application-defined state flags of the entry.
    pub fn state_bits(&self) -> u32 {
        self.state_bits
    }
}

// ========================================================================= //

/// An iterator over the allocated entries of a compound file's directory.
pub struct Entries<'a> {
    directory: std::iter::Enumerate<std::slice::Iter<'a, DirEntry>>,
}

impl<'a> Entries<'a> {
    pub(crate) fn new(directory: &'a [DirEntry]) -> Entries<'a> {
        Entries { directory: directory.iter().enumerate() }
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        for (index, dir_entry) in &mut self.directory {
            if !dir_entry.is_unallocated() {
                return Some(Entry::new(index, dir_entry));
            }
        }
        None
    }
}

// ========================================================================= //


// ========================================================================= //
