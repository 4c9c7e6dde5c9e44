//! # Text Module
//! 
//! FileMaker stores text in one of two ways: legacy files use Mac Roman
//! (Windows-1252 exists in the wild and is kept as a reserved backend),
//! modern files use SCSU with every byte XOR-obfuscated.  This module
//! turns either into UTF-8.  Conversion order matters and is always
//! unmask, strip leading spaces, decode.
//! 
//! Entity names (tables, columns) are fixed 64-byte fields on disk, so the
//! name helper additionally caps the converted string at 63 bytes without
//! splitting a character.

pub mod scsu;

use encoding_rs::{MACINTOSH,WINDOWS_1252};

/// longest entity name in bytes of UTF-8
const MAX_NAME_LEN: usize = 63;

#[derive(PartialEq,Eq,Clone,Copy,Debug)]
pub enum Charset {
    MacRoman,
    WinAnsi,
    Scsu
}

/// Decodes on-disk text to UTF-8.  Carries the charset and the XOR mask of
/// one file generation; copies are cheap and independent.
#[derive(Clone,Copy,Debug)]
pub struct Converter {
    charset: Charset,
    xor_mask: u8
}

impl Converter {
    pub fn new(charset: Charset,xor_mask: u8) -> Self {
        Self { charset, xor_mask }
    }
    pub fn charset(&self) -> Charset {
        self.charset
    }
    pub fn xor_mask(&self) -> u8 {
        self.xor_mask
    }
    /// same charset without the mask, for data that is stored in the clear
    pub fn plain(&self) -> Self {
        Self { charset: self.charset, xor_mask: 0 }
    }
    /// Unmask, strip leading spaces, decode to UTF-8.  Bytes with no
    /// mapping come out as U+FFFD, never as an error.
    pub fn convert(&self,src: &[u8]) -> String {
        let unmasked: Vec<u8>;
        let mut bytes: &[u8] = match self.xor_mask {
            0 => src,
            mask => {
                unmasked = src.iter().map(|b| b ^ mask).collect();
                &unmasked
            }
        };
        while let Some((first,rest)) = bytes.split_first() {
            if *first != b' ' {
                break;
            }
            bytes = rest;
        }
        match self.charset {
            Charset::MacRoman => MACINTOSH.decode_without_bom_handling(bytes).0.into_owned(),
            Charset::WinAnsi => WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned(),
            Charset::Scsu => scsu::to_utf8(bytes)
        }
    }
    /// `convert` plus the 63-byte cap for entity names
    pub fn convert_name(&self,src: &[u8]) -> String {
        let mut ans = self.convert(src);
        truncate_name(&mut ans);
        ans
    }
}

/// Cap a string at 63 bytes on a char boundary.
pub fn truncate_name(s: &mut String) {
    if s.len() > MAX_NAME_LEN {
        let mut end = MAX_NAME_LEN;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        s.truncate(end);
    }
}
