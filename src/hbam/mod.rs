//! # HBAM Format Module
//! 
//! This module decodes the on-disk structure of FileMaker files without
//! interpreting it: the header probe, the sector linked list, the opcode
//! driven chunk stream inside each sector, and the hierarchical path that
//! addresses every chunk.  The `db` module builds the catalogue and row
//! semantics on top of the traversal offered here.
//! 
//! Both on-disk generations share one magic number and little else.  The
//! legacy layout (FileMaker 3 through 6) uses 1024-byte sectors with an
//! explicit payload length; the modern layout (signature `HBAM7`, FileMaker
//! 7 through 12) uses 4096-byte sectors, a different opcode table, and
//! XOR-obfuscated SCSU text.  All multi-byte integers are big-endian.
//! 
//! The sector list is untrusted input.  Traversal keeps a visited bitmap
//! and stops on the first repeat, so a corrupt or malicious link structure
//! terminates cleanly instead of looping.

pub mod sector;
pub mod chunk;
pub mod path;
mod dump;
#[cfg(test)]
mod chunk_test;

use std::fmt;
use chrono::NaiveDate;
use log::{debug,trace};
use crate::text;
use crate::DYNERR;
use sector::Sector;
use chunk::ChunkBody;
use path::ChunkCtx;

/// first 15 bytes of every FileMaker file regardless of generation
const MAGIC: [u8;15] = [0x00,0x01,0x00,0x00,0x00,0x02,0x00,0x01,0x00,0x05,0x00,0x02,0x00,0x02,0xC0];
/// mask applied to text bytes in modern files
const XOR_MASK_V7: u8 = 0x5A;
/// the release version is a Pascal string at this header offset
const VERSION_STRING_OFFSET: usize = 541;
/// modern files carry a DDMMMYY release date at this header offset
const VERSION_DATE_OFFSET: usize = 531;
/// a modern file with this value at offset 521 was written by FileMaker 12
const V12_MARKER_OFFSET: usize = 521;

/// Enumerates format-level errors.  The `Display` trait will print an
/// equivalent long message.  I/O errors pass through separately as
/// `std::io::Error`.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("bad magic number in file header")]
    BadMagicNumber,
    #[error("sector payload length does not fit the sector")]
    BadSector,
    #[error("sector count is inconsistent with the file size")]
    BadSectorCount,
    #[error("chunk data runs past the end of the sector")]
    DataExceedsSectorSize,
    #[error("file ends in the middle of a sector")]
    IncompleteSector,
    #[error("unrecognized chunk code")]
    UnrecognizedCode,
    #[error("character set is not supported")]
    UnsupportedCharacterSet,
    #[error("aborted by caller")]
    UserAborted
}

/// On-disk generation of a file.  V12 differs from V7 only by a marker
/// byte in the header; the decoder treats them identically.
#[derive(PartialEq,Eq,Clone,Copy,Debug)]
pub enum Version {
    /// FileMaker 3 through 6
    V3,
    V7,
    V12
}

impl Version {
    pub fn modern(&self) -> bool {
        !matches!(self,Version::V3)
    }
    pub fn sector_size(&self) -> usize {
        match self.modern() {
            true => 4096,
            false => 1024
        }
    }
    pub fn sector_head_len(&self) -> usize {
        match self.modern() {
            true => 20,
            false => 14
        }
    }
    pub fn prev_id_offset(&self) -> usize {
        match self.modern() {
            true => 4,
            false => 2
        }
    }
    pub fn next_id_offset(&self) -> usize {
        match self.modern() {
            true => 8,
            false => 6
        }
    }
    /// legacy sectors carry an explicit payload length word
    pub fn payload_len_offset(&self) -> Option<usize> {
        match self.modern() {
            true => None,
            false => Some(12)
        }
    }
    /// sectors preceding the index sector: header only for modern files,
    /// header plus one throwaway sector for legacy files
    fn leading_sectors(&self) -> usize {
        match self.modern() {
            true => 1,
            false => 2
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self,f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V3 => write!(f,"3-6"),
            Self::V7 => write!(f,"7-11"),
            Self::V12 => write!(f,"12")
        }
    }
}

/// Verdict of a chunk handler, controls the traversal.
#[derive(PartialEq,Eq,Clone,Copy)]
pub enum ChunkStatus {
    /// keep going
    Next,
    /// stop walking this sector, traversal continues with the next one
    Done,
    /// stop the whole traversal with `Error::UserAborted`
    Abort
}

/// An open FileMaker database.  Owns every sector and all chunk storage;
/// visitors borrow into it during a traversal.  Dropping the handle
/// releases everything.
#[derive(Debug)]
pub struct FmpFile {
    pub version: Version,
    /// basename of the source file, names the single table of legacy files
    pub filename: String,
    /// release version from the header, e.g. "Pro 12.0"
    pub release: String,
    /// best-effort release date, only modern files carry a usable one
    pub release_date: Option<NaiveDate>,
    converter: text::Converter,
    sectors: Vec<Sector>
}

impl FmpFile {
    /// Probe the header and materialize the sector array.  Any byte source
    /// works; nothing is read after this returns.
    pub fn from_bytes(buf: &[u8],filename: Option<&str>) -> Result<Self,DYNERR> {
        let header = match buf.get(0..1024) {
            Some(h) => h,
            None => return Err(Box::new(Error::IncompleteSector))
        };
        if header[0..15] != MAGIC {
            return Err(Box::new(Error::BadMagicNumber));
        }
        let version = match &header[15..20] == b"HBAM7" {
            true => match header[V12_MARKER_OFFSET] {
                0x1E => Version::V12,
                _ => Version::V7
            },
            false => Version::V3
        };
        let converter = match version.modern() {
            true => text::Converter::new(text::Charset::Scsu,XOR_MASK_V7),
            false => text::Converter::new(text::Charset::MacRoman,0)
        };
        let release = pascal_string(&header[VERSION_STRING_OFFSET..]);
        let release_date = release_date(&header[VERSION_DATE_OFFSET..VERSION_DATE_OFFSET+6]);
        let ss = version.sector_size();
        let start = version.leading_sectors() * ss;
        let first_raw = match buf.get(start..start+ss) {
            Some(raw) => raw,
            None => return Err(Box::new(Error::IncompleteSector))
        };
        let first = Sector::from_raw(version,first_raw)?;
        if first.next_id == 0 {
            return Err(Box::new(Error::BadSectorCount));
        }
        let count = first.next_id as usize;
        let extra = match version.modern() {
            true => 0,
            false => 1
        };
        if (count as u64 + 1 + extra) * ss as u64 != buf.len() as u64 {
            return Err(Box::new(Error::BadSectorCount));
        }
        debug!("file has {} sectors of {} bytes",count,ss);
        let mut sectors = Vec::with_capacity(count);
        sectors.push(first);
        for i in 1..count {
            let off = start + i * ss;
            let raw = match buf.get(off..off+ss) {
                Some(raw) => raw,
                None => return Err(Box::new(Error::BadSectorCount))
            };
            sectors.push(Sector::from_raw(version,raw)?);
        }
        Ok(Self {
            version,
            filename: filename.unwrap_or("").to_string(),
            release,
            release_date,
            converter,
            sectors
        })
    }
    /// the text converter matching this file's generation, cheap to copy
    pub fn converter(&self) -> text::Converter {
        self.converter
    }
    pub fn num_sectors(&self) -> usize {
        self.sectors.len()
    }
    /// Walk the sector chain starting at id 2, decoding lazily, and thread
    /// every chunk through the path machine and the handler.  Terminates on
    /// a zero link, an out of range link, or a revisited sector.
    pub fn process_sectors<H>(&mut self,on_chunk: H) -> Result<(),DYNERR>
    where H: FnMut(&ChunkCtx) -> ChunkStatus {
        self.process_sectors_full(|_id,_sec| true,on_chunk)
    }
    /// Like `process_sectors` with a per-sector gate: the sector handler
    /// runs first and a false return skips that sector's chunk walk.
    pub fn process_sectors_full<B,H>(&mut self,mut on_sector: B,mut on_chunk: H) -> Result<(),DYNERR>
    where B: FnMut(usize,&Sector) -> bool, H: FnMut(&ChunkCtx) -> ChunkStatus {
        let version = self.version;
        let mut visited = vec![false;self.sectors.len()];
        let mut id: usize = 2;
        while id != 0 && id <= self.sectors.len() && !visited[id-1] {
            visited[id-1] = true;
            self.sectors[id-1].decode(version)?;
            let sec = &self.sectors[id-1];
            trace!("sector {} -> {} with {} chunks",id,sec.next_id,sec.chunks().len());
            if on_sector(id,sec) {
                let mut path: Vec<chunk::Data> = Vec::new();
                for chk in sec.chunks() {
                    let ctx = ChunkCtx { chunk: chk, payload: &sec.payload, path: &path, version };
                    let status = on_chunk(&ctx);
                    match chk.body {
                        ChunkBody::PathPush(data) => path.push(data),
                        ChunkBody::PathPop => {
                            path.pop();
                        },
                        _ => {}
                    }
                    match status {
                        ChunkStatus::Next => {},
                        ChunkStatus::Done => break,
                        ChunkStatus::Abort => return Err(Box::new(Error::UserAborted))
                    }
                }
            }
            id = sec.next_id as usize;
        }
        Ok(())
    }
}

/// Pascal string: length byte followed by that many characters.
fn pascal_string(buf: &[u8]) -> String {
    let mut len = buf[0] as usize;
    if len > 9 {
        len = 9;
    }
    if len + 1 > buf.len() {
        len = buf.len() - 1;
    }
    String::from_utf8_lossy(&buf[1..1+len]).to_string()
}

/// The header's DDMMMYY release date, e.g. "7Mar04".  Legacy files leave
/// the field zeroed, in which case the parse fails and we report None.
fn release_date(buf: &[u8]) -> Option<NaiveDate> {
    let s = String::from_utf8_lossy(buf);
    let trimmed = s.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    NaiveDate::parse_from_str(trimmed,"%d%b%y").ok()
}
