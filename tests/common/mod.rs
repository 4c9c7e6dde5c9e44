//! Builders for synthetic FileMaker files.  Real fixtures cannot be
//! distributed, so the tests assemble byte-exact files in memory: header,
//! index sector, and a chain of payload sectors.
#![allow(dead_code)]

pub const V3_SECTOR: usize = 1024;
pub const V7_SECTOR: usize = 4096;
pub const MAGIC: [u8;15] = [0x00,0x01,0x00,0x00,0x00,0x02,0x00,0x01,0x00,0x05,0x00,0x02,0x00,0x02,0xC0];

pub fn put_u32(buf: &mut [u8],off: usize,val: u32) {
    buf[off..off+4].copy_from_slice(&val.to_be_bytes());
}

fn put_pascal(buf: &mut [u8],off: usize,s: &str) {
    buf[off] = s.len() as u8;
    buf[off+1..off+1+s.len()].copy_from_slice(s.as_bytes());
}

pub fn v3_header() -> Vec<u8> {
    let mut header = vec![0u8;V3_SECTOR];
    header[0..15].copy_from_slice(&MAGIC);
    put_pascal(&mut header,541,"Pro 6.0");
    header
}

pub fn v7_header(v12: bool) -> Vec<u8> {
    let mut header = vec![0u8;V7_SECTOR];
    header[0..15].copy_from_slice(&MAGIC);
    header[15..20].copy_from_slice(b"HBAM7");
    if v12 {
        header[521] = 0x1E;
    }
    header[531..537].copy_from_slice(b"7Mar04");
    put_pascal(&mut header,541,if v12 { "Pro 12.0" } else { "Pro 7.0" });
    header
}

pub fn v3_sector(prev: u32,next: u32,payload: &[u8]) -> Vec<u8> {
    assert!(payload.len() <= V3_SECTOR - 14);
    let mut sec = vec![0u8;V3_SECTOR];
    put_u32(&mut sec,2,prev);
    put_u32(&mut sec,6,next);
    sec[12..14].copy_from_slice(&(payload.len() as u16).to_be_bytes());
    sec[14..14+payload.len()].copy_from_slice(payload);
    sec
}

pub fn v7_sector(prev: u32,next: u32,content: &[u8]) -> Vec<u8> {
    // room for the implicit 00 00 terminator
    assert!(content.len() <= V7_SECTOR - 22);
    let mut sec = vec![0u8;V7_SECTOR];
    put_u32(&mut sec,4,prev);
    put_u32(&mut sec,8,next);
    sec[20..20+content.len()].copy_from_slice(content);
    sec
}

/// header + throwaway + index sector + linked payload sectors
pub fn v3_file(payloads: &[Vec<u8>]) -> Vec<u8> {
    let count = (payloads.len() + 1) as u32;
    let mut file = v3_header();
    file.extend_from_slice(&vec![0u8;V3_SECTOR]);
    file.extend_from_slice(&v3_sector(0,count,&[]));
    for (i,payload) in payloads.iter().enumerate() {
        let id = (i + 2) as u32;
        let next = match i + 1 == payloads.len() {
            true => 0,
            false => id + 1
        };
        file.extend_from_slice(&v3_sector(id-1,next,payload));
    }
    file
}

/// header + index sector + linked payload sectors
pub fn v7_file(v12: bool,payloads: &[Vec<u8>]) -> Vec<u8> {
    let count = (payloads.len() + 1) as u32;
    let mut file = v7_header(v12);
    file.extend_from_slice(&v7_sector(0,count,&[]));
    for (i,payload) in payloads.iter().enumerate() {
        let id = (i + 2) as u32;
        let next = match i + 1 == payloads.len() {
            true => 0,
            false => id + 1
        };
        file.extend_from_slice(&v7_sector(id-1,next,payload));
    }
    file
}

/// file offset of the `next_id` field of the given v3 sector id
pub fn v3_next_id_offset(id: u32) -> usize {
    2 * V3_SECTOR + (id as usize - 1) * V3_SECTOR + 6
}

/// file offset of the `next_id` field of the given v7 sector id
pub fn v7_next_id_offset(id: u32) -> usize {
    V7_SECTOR + (id as usize - 1) * V7_SECTOR + 8
}

/// XOR-obfuscate text the way modern files store it
pub fn ob(s: &str) -> Vec<u8> {
    s.bytes().map(|b| b ^ 0x5A).collect()
}

pub fn obs(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|b| b ^ 0x5A).collect()
}

pub fn cat(parts: &[Vec<u8>]) -> Vec<u8> {
    parts.concat()
}

/// legacy opcode stream helpers
pub mod v3 {
    pub fn push1(val: u8) -> Vec<u8> {
        vec![0xC1,val]
    }
    pub fn pop() -> Vec<u8> {
        vec![0xC0]
    }
    pub fn field(ref_simple: u8,data: &[u8]) -> Vec<u8> {
        assert!(ref_simple < 0x40 && data.len() < 256);
        let mut ans = vec![0x40 + ref_simple,data.len() as u8];
        ans.extend_from_slice(data);
        ans
    }
}

/// modern opcode stream helpers
pub mod v7 {
    pub fn push1(val: u8) -> Vec<u8> {
        assert!(val != 0xFE);
        vec![0x20,val]
    }
    /// two-byte path element for values 128 and up
    pub fn push2(val: u16) -> Vec<u8> {
        assert!(val >= 0x80);
        let bias = val - 0x80;
        vec![0x28,(bias >> 8) as u8,(bias & 0xFF) as u8]
    }
    pub fn pop() -> Vec<u8> {
        vec![0x40]
    }
    pub fn field(ref_simple: u8,data: &[u8]) -> Vec<u8> {
        assert!(data.len() < 256);
        let mut ans = vec![0x06,ref_simple,data.len() as u8];
        ans.extend_from_slice(data);
        ans
    }
}
