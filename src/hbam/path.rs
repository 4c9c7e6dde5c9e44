//! # Path machine
//! 
//! Every data chunk is addressed by the stack of `PathPush` payloads that
//! are live when it is decoded.  The stack resets at the start of every
//! sector.  A chunk handler sees the stack as it stood before the chunk's
//! own push or pop takes effect, which is what the path signatures in the
//! `db` module are written against.
//! 
//! Path elements decode to unsigned integers with a length-dependent
//! formula that differs between the two variants; those integers are the
//! coordinate system of the whole format.

use super::Version;
use super::chunk::{Chunk,Data};

/// Decode a path element to its numeric value.  Elements longer than 3
/// bytes have no numeric meaning and decode to 0.
pub fn path_value(version: Version,bytes: &[u8]) -> u64 {
    match bytes.len() {
        1 => bytes[0] as u64,
        2 => 0x80 + (((bytes[0] & 0x7F) as u64) << 8) + bytes[1] as u64,
        3 if !version.modern() => 0xC000 + (((bytes[0] & 0x3F) as u64) << 16) + ((bytes[1] as u64) << 8) + bytes[2] as u64,
        3 => 0x80 + ((bytes[1] as u64) << 8) + bytes[2] as u64,
        _ => 0
    }
}

/// A chunk as delivered to a visitor: the chunk itself, the payload it
/// indexes into, and a snapshot of the path stack.
pub struct ChunkCtx<'a> {
    pub chunk: &'a Chunk,
    pub payload: &'a [u8],
    pub path: &'a [Data],
    pub version: Version
}

impl<'a> ChunkCtx<'a> {
    pub fn path_level(&self) -> usize {
        self.path.len()
    }
    /// numeric value of path element `idx`, 0 if the stack is shallower
    pub fn path_value(&self,idx: usize) -> u64 {
        match self.path.get(idx) {
            Some(elem) => path_value(self.version,elem.bytes(self.payload)),
            None => 0
        }
    }
    /// numeric value of the innermost path element, 0 on an empty stack
    pub fn last_path_value(&self) -> u64 {
        match self.path.len() {
            0 => 0,
            n => self.path_value(n - 1)
        }
    }
    /// Depth at which a table's own entries live.  Modern files prefix
    /// every table address with one top-level node, hence the offset.
    pub fn table_depth(&self) -> i64 {
        match self.version.modern() {
            true => self.path.len() as i64 - 1,
            false => self.path.len() as i64
        }
    }
    /// True when the table depth matches and the leading path value equals
    /// the literal.  Modern files additionally require a top node >= 128.
    pub fn match_start1(&self,depth: i64,val: u64) -> bool {
        if self.table_depth() != depth {
            return false;
        }
        match self.version.modern() {
            false => self.path_value(0) == val,
            true => self.path_value(0) >= 128 && self.path_value(1) == val
        }
    }
    /// Same as `match_start1` with two leading literals.
    pub fn match_start2(&self,depth: i64,val1: u64,val2: u64) -> bool {
        if self.table_depth() != depth {
            return false;
        }
        match self.version.modern() {
            false => self.path_value(0) == val1 && self.path_value(1) == val2,
            true => self.path_value(0) >= 128 && self.path_value(1) == val1 && self.path_value(2) == val2
        }
    }
    /// the chunk's payload bytes, empty for pops
    pub fn data(&self) -> &'a [u8] {
        match self.chunk.data() {
            Some(data) => data.bytes(self.payload),
            None => &[]
        }
    }
    pub fn ref_simple(&self) -> Option<u16> {
        self.chunk.ref_simple()
    }
}
