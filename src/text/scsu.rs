//! # SCSU decoder
//! 
//! Decoder for the Standard Compression Scheme for Unicode (Unicode
//! Technical Report #6), the text encoding of modern FileMaker files.
//! Only decoding is provided.  The stream starts in single-byte mode with
//! dynamic window 0 active; tags switch or redefine windows, quote single
//! characters, or enter Unicode (UTF-16BE) mode.  UTF-16 surrogate pairs
//! are combined into supplementary code points.
//! 
//! One deliberate deviation from a plain transcoder: the control bytes
//! tab, line feed, and carriage return become spaces.  FileMaker uses them
//! for in-cell layout, not content, and every consumer here wants
//! single-line cell values.  A truncated multi-byte sequence ends the
//! decode with whatever was produced up to that point.

const SQ0: u8 = 0x01;
const SQ7: u8 = 0x08;
const SDX: u8 = 0x0B;
const SQU: u8 = 0x0E;
const SCU: u8 = 0x0F;
const SC0: u8 = 0x10;
const SC7: u8 = 0x17;
const SD0: u8 = 0x18;
const SD7: u8 = 0x1F;
const UC0: u8 = 0xE0;
const UC7: u8 = 0xE7;
const UD0: u8 = 0xE8;
const UD7: u8 = 0xEF;
const UQU: u8 = 0xF0;
const UDX: u8 = 0xF1;

const STATIC_WINDOWS: [u32;8] = [
    0x0000, // quoting tags
    0x0080, // Latin-1 Supplement
    0x0100, // Latin Extended-A
    0x0300, // Combining Diacritical Marks
    0x2000, // General Punctuation
    0x2080, // Currency Symbols
    0x2100, // Letterlike Symbols and Number Forms
    0x3000  // CJK Symbols and Punctuation
];

const DEFAULT_DYNAMIC_WINDOWS: [u32;8] = [
    0x0080, // Latin-1 Supplement
    0x00C0, // partial Latin-1 Supplement + Latin Extended-A
    0x0400, // Cyrillic
    0x0600, // Arabic
    0x0900, // Devanagari
    0x3040, // Hiragana
    0x30A0, // Katakana
    0xFF00  // Fullwidth ASCII
];

/// TR6 window offset table for the SDn/UDn tags.
fn window_offset(x: u8) -> u32 {
    match x {
        0x01..=0x67 => x as u32 * 0x80,
        0x68..=0xA7 => x as u32 * 0x80 + 0xAC00,
        0xF9 => 0xC0,
        0xFA => 0x0250,
        0xFB => 0x0370,
        0xFC => 0x0530,
        0xFD => 0x3040,
        0xFE => 0x30A0,
        0xFF => 0xFF60,
        _ => 0 // reserved
    }
}

/// TR6 extended window: offset beyond the BMP, window index in the high
/// three bits of the first operand byte.
fn extended_offset(hbyte: u8,lbyte: u8) -> u32 {
    0x10000 + 0x80 * ((((hbyte & 0x1F) as u32) << 8) + lbyte as u32)
}

pub fn to_utf8(src: &[u8]) -> String {
    let mut ans = String::with_capacity(src.len());
    let mut dynamic = DEFAULT_DYNAMIC_WINDOWS;
    let mut active: usize = 0;
    let mut unicode = false;
    let mut quote_window: Option<u8> = None;
    let mut high_surrogate: Option<u32> = None;
    let mut pos: usize = 0;
    while pos < src.len() {
        let c = src[pos];
        pos += 1;
        let mut u: u32;
        if unicode {
            match c {
                UQU => {
                    if pos + 2 > src.len() {
                        break;
                    }
                    u = ((src[pos] as u32) << 8) + src[pos+1] as u32;
                    pos += 2;
                },
                UC0..=UC7 => {
                    active = (c - UC0) as usize;
                    unicode = false;
                    continue;
                },
                UD0..=UD7 => {
                    if pos >= src.len() {
                        break;
                    }
                    active = (c - UD0) as usize;
                    dynamic[active] = window_offset(src[pos]);
                    pos += 1;
                    unicode = false;
                    continue;
                },
                UDX => {
                    if pos + 2 > src.len() {
                        break;
                    }
                    active = (src[pos] >> 5) as usize;
                    dynamic[active] = extended_offset(src[pos],src[pos+1]);
                    pos += 2;
                    unicode = false;
                    continue;
                },
                _ => {
                    if pos >= src.len() {
                        break;
                    }
                    u = ((c as u32) << 8) + src[pos] as u32;
                    pos += 1;
                }
            }
        } else if let Some(tag) = quote_window.take() {
            let window = (tag - SQ0) as usize;
            u = match c {
                0x00..=0x7F => STATIC_WINDOWS[window] + c as u32,
                _ => dynamic[window] + (c - 0x80) as u32
            };
        } else {
            match c {
                SCU => {
                    unicode = true;
                    continue;
                },
                SQU => {
                    if pos + 2 > src.len() {
                        break;
                    }
                    u = ((src[pos] as u32) << 8) + src[pos+1] as u32;
                    pos += 2;
                },
                SQ0..=SQ7 => {
                    quote_window = Some(c);
                    continue;
                },
                SC0..=SC7 => {
                    active = (c - SC0) as usize;
                    continue;
                },
                SD0..=SD7 => {
                    if pos >= src.len() {
                        break;
                    }
                    active = (c - SD0) as usize;
                    dynamic[active] = window_offset(src[pos]);
                    pos += 1;
                    continue;
                },
                SDX => {
                    if pos + 2 > src.len() {
                        break;
                    }
                    active = (src[pos] >> 5) as usize;
                    dynamic[active] = extended_offset(src[pos],src[pos+1]);
                    pos += 2;
                    continue;
                },
                0x09 | 0x0A | 0x0D => {
                    u = 0x20; // in-cell layout bytes, not content
                },
                0x20..=0x7F => {
                    u = c as u32;
                },
                0x80..=0xFF => {
                    u = dynamic[active] + (c - 0x80) as u32;
                },
                _ => {
                    u = 0xFFFD;
                }
            }
        }
        if (0xD800..0xDC00).contains(&u) {
            if high_surrogate.replace(u).is_some() {
                ans.push('\u{FFFD}'); // unpaired high surrogate
            }
            continue;
        }
        if (0xDC00..0xE000).contains(&u) {
            u = match high_surrogate.take() {
                Some(high) => 0x10000 + ((high - 0xD800) << 10) + (u - 0xDC00),
                None => 0xFFFD
            };
        } else if high_surrogate.take().is_some() {
            ans.push('\u{FFFD}');
        }
        if u > 0 {
            ans.push(char::from_u32(u).unwrap_or('\u{FFFD}'));
        }
    }
    ans
}
