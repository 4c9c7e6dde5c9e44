//! # Column catalogue
//! 
//! Column descriptors of both generations live at the path signature
//! `[3,5,c]` relative to the table (the legacy file's only table is the
//! whole file; modern files prefix the table's top node).  The short key
//! ref selects what a descriptor chunk carries: the name under one key,
//! the type descriptor under another.

use crate::hbam::{FmpFile,ChunkStatus};
use crate::DYNERR;
use super::{Table,Column,ColumnType};

pub fn list_columns(fmp: &mut FmpFile,table: &Table) -> Result<Vec<Column>,DYNERR> {
    let conv = fmp.converter();
    let modern = fmp.version.modern();
    let target = table.index as u64;
    let name_ref: u16 = match modern {
        true => 16,
        false => 1
    };
    let mut slots: Vec<Column> = Vec::new();
    fmp.process_sectors(|ctx| {
        if modern {
            if ctx.path_value(0) > target + 128 {
                return ChunkStatus::Done;
            }
            if ctx.path_value(0) < target + 128 {
                return ChunkStatus::Next;
            }
        } else if ctx.path_value(0) > 3 {
            return ChunkStatus::Done;
        }
        let Some(ref_simple) = ctx.ref_simple() else {
            return ChunkStatus::Next;
        };
        if !ctx.match_start2(3,3,5) {
            return ChunkStatus::Next;
        }
        let index = ctx.last_path_value() as usize;
        if index == 0 {
            return ChunkStatus::Next;
        }
        if ref_simple == name_ref {
            if index > slots.len() {
                slots.resize_with(index,Column::default);
            }
            let column = &mut slots[index-1];
            column.name = conv.convert_name(ctx.data());
            column.index = index;
        } else if ref_simple == 2 && index <= slots.len() {
            // type descriptor, applies only to a column already seen
            if let Some(code) = ctx.data().get(1) {
                slots[index-1].kind = ColumnType::from_byte(*code);
            }
        }
        ChunkStatus::Next
    })?;
    Ok(slots.into_iter().filter(|c| c.index != 0).collect())
}
