//! # Sector blocks
//! 
//! A FileMaker file is an array of fixed-size sectors threaded into a
//! doubly-linked list by `prev_id`/`next_id` header fields.  Sector ids are
//! 1-based; id 1 is the index sector whose `next_id` doubles as the sector
//! count.  The payload decodes into a chunk list on first visit and the
//! decoded list is kept for the life of the file handle.

use super::{Error,Version};
use super::chunk::{self,Chunk};

fn be_u32(raw: &[u8],off: usize) -> u32 {
    u32::from_be_bytes([raw[off],raw[off+1],raw[off+2],raw[off+3]])
}

#[derive(Debug)]
pub struct Sector {
    pub deleted: u8,
    pub level: u8,
    pub prev_id: u32,
    pub next_id: u32,
    pub payload: Vec<u8>,
    chunks: Option<Vec<Chunk>>
}

impl Sector {
    /// Parse one raw sector.  `raw` must be exactly one sector long.
    /// The explicit payload length of legacy sectors is validated against
    /// the sector size here; modern sectors fill the space after the header.
    pub fn from_raw(version: Version,raw: &[u8]) -> Result<Self,Error> {
        if raw.len() != version.sector_size() {
            return Err(Error::IncompleteSector);
        }
        let head = version.sector_head_len();
        let payload_len = match version.payload_len_offset() {
            Some(off) => u16::from_be_bytes([raw[off],raw[off+1]]) as usize,
            None => version.sector_size() - head
        };
        if payload_len > version.sector_size() - head {
            return Err(Error::BadSector);
        }
        Ok(Self {
            deleted: raw[0],
            level: raw[1],
            prev_id: be_u32(raw,version.prev_id_offset()),
            next_id: be_u32(raw,version.next_id_offset()),
            payload: raw[head..head+payload_len].to_vec(),
            chunks: None
        })
    }
    /// Decode the payload into chunks.  Idempotent: a successful decode is
    /// kept, a failed decode is not, so a re-run fails the same way.
    pub fn decode(&mut self,version: Version) -> Result<(),Error> {
        if self.chunks.is_none() {
            let list = match version.modern() {
                true => chunk::decode_v7(&self.payload)?,
                false => chunk::decode_v3(&self.payload)?
            };
            self.chunks = Some(list);
        }
        Ok(())
    }
    /// Decoded chunks, empty if `decode` has not succeeded yet
    pub fn chunks(&self) -> &[Chunk] {
        match &self.chunks {
            Some(list) => list,
            None => &[]
        }
    }
}
