//! # Diagnostic dump
//! 
//! Prints every sector and chunk to stdout in a form meant for eyeballing
//! unknown files.  Dev-only surface, the format is not stable.

use std::cell::Cell;
use crate::text;
use crate::STDRESULT;
use super::{FmpFile,Version,ChunkStatus};
use super::chunk::{Data,ChunkBody};
use super::path::{self,ChunkCtx};

/// Small payloads are usually path values or counters; print those as
/// numbers and everything else as converted text.
fn dump_data(version: Version,conv: &text::Converter,payload: &[u8],data: Data) {
    let bytes = data.bytes(payload);
    let mask = conv.xor_mask();
    if bytes.is_empty() {
        print!("\"\"");
    } else if bytes.len() == 1 || (bytes.len() <= 3 && (bytes[0] ^ mask) >= 0x80) {
        print!("[{}]",path::path_value(version,bytes));
    } else if bytes.len() <= 4 && ((bytes[0] ^ mask) < 0x20 || (bytes[0] ^ mask) >= 0x80) {
        let mut val: u64 = 0;
        for b in bytes {
            val = (val << 8) + *b as u64;
        }
        print!("[{}]",val);
    } else {
        print!("\"{}\"",conv.convert(bytes));
    }
}

fn dump_path(ctx: &ChunkCtx,conv: &text::Converter) {
    for elem in ctx.path {
        if elem.len <= 3 {
            print!("[{}]",path::path_value(ctx.version,elem.bytes(ctx.payload)));
        } else {
            dump_data(ctx.version,conv,ctx.payload,*elem);
        }
        print!(".");
    }
}

impl FmpFile {
    /// Write the whole file as a diagnostic text stream on stdout.
    pub fn dump(&mut self) -> STDRESULT {
        println!("Version: FileMaker {}",self.release);
        if let Some(date) = self.release_date {
            println!("Released: {}",date.format("%Y-%m-%d"));
        }
        let conv = self.converter();
        let fresh_path = Cell::new(false);
        self.process_sectors_full(|id,sec| {
            fresh_path.set(true);
            println!("== {} -> [ BLOCK {} ] -> {} ==",sec.prev_id,id,sec.next_id);
            println!("        [ Len: {} ]",sec.payload.len());
            true
        },|ctx| {
            match ctx.chunk.body {
                ChunkBody::PathPop => {
                    fresh_path.set(true);
                    println!("-- POP 0x{:02X} --",ctx.chunk.code);
                },
                ChunkBody::PathPush(data) => {
                    fresh_path.set(true);
                    println!("-- PUSH 0x{:02X} [ {} ] --",ctx.chunk.code,hex::encode_upper(data.bytes(ctx.payload)));
                },
                _ => {
                    if fresh_path.get() && ctx.path_level() > 0 {
                        dump_path(ctx,&conv);
                        println!();
                        fresh_path.set(false);
                    }
                    print!("{:1$}","",ctx.path_level());
                }
            }
            match ctx.chunk.body {
                ChunkBody::DataSimple(data) => {
                    print!("-- data simple (0x{:02X}): ",ctx.chunk.code);
                    dump_data(ctx.version,&conv.plain(),ctx.payload,data);
                    println!(" --");
                },
                ChunkBody::FieldRefSimple { ref_simple, data } => {
                    print!("-- field (0x{:02X}): [{}] => ",ctx.chunk.code,ref_simple);
                    dump_data(ctx.version,&conv,ctx.payload,data);
                    println!(" --");
                },
                ChunkBody::FieldRefLong { ref_long, data } => {
                    print!("-- field (0x{:02X}): ",ctx.chunk.code);
                    dump_data(ctx.version,&conv,ctx.payload,ref_long);
                    print!(" => ");
                    dump_data(ctx.version,&conv,ctx.payload,data);
                    println!(" --");
                },
                ChunkBody::DataSegment { index, data } => {
                    println!("-- segment #{} ({} bytes) --",index,data.len);
                },
                _ => {}
            }
            if ctx.chunk.extended {
                println!("   => EXTENDED <=");
            }
            ChunkStatus::Next
        })
    }
}
