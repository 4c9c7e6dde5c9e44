//! # Row values
//! 
//! The hardest visitor.  It rebuilds the column list on the fly (rows can
//! only be interpreted against the columns seen so far) while recognizing
//! two kinds of cell data: direct table data, one chunk per cell, and long
//! strings, where one logical value arrives as several consecutive chunks
//! one path level deeper and must be stitched back together.
//! 
//! Rows are numbered by emission order starting at 1.  The row advances
//! whenever the chunk's path row changes or the column index moves
//! backwards; raw path row values never reach the caller.

use crate::hbam::{FmpFile,ChunkStatus};
use crate::hbam::path::ChunkCtx;
use crate::STDRESULT;
use super::{Table,Column,ColumnType,HandlerStatus};

/// Long-string chunks sit one level below the row and carry the column in
/// their last path element.  The row test is deliberately asymmetric
/// between the generations; this reproduces how the files are written and
/// must not be "normalized".
fn is_long_string(ctx: &ChunkCtx,modern: bool,last_row: u64) -> bool {
    if !ctx.match_start1(3,5) {
        return false;
    }
    match modern {
        true => {
            let column_index = ctx.path_value(3);
            ctx.path_value(2) == last_row.wrapping_add((column_index == 1) as u64)
        },
        false => {
            let column_index = ctx.path_value(2);
            ctx.path_value(1) == last_row.wrapping_sub((column_index == 1) as u64)
        }
    }
}

fn path_row(ctx: &ChunkCtx,modern: bool) -> u64 {
    match modern {
        true => ctx.path_value(2),
        false => ctx.path_value(1)
    }
}

pub fn read_values<F>(fmp: &mut FmpFile,table: &Table,mut handler: F) -> STDRESULT
where F: FnMut(u32,&Column,&str) -> HandlerStatus {
    let conv = fmp.converter();
    let modern = fmp.version.modern();
    let target = table.index as u64;
    let name_ref: u16 = match modern {
        true => 16,
        false => 1
    };
    let mut columns: Vec<Column> = Vec::new();
    let mut current_row: u32 = 0;
    let mut last_row: u64 = 0;
    let mut last_column: usize = 0;
    let mut long_string = String::new();
    fmp.process_sectors(|ctx| {
        if modern {
            if ctx.path_value(0) > target + 128 {
                return ChunkStatus::Done;
            }
            if ctx.path_value(0) < target + 128 {
                return ChunkStatus::Next;
            }
        } else if ctx.path_value(0) > 5 {
            return ChunkStatus::Done;
        }
        let Some(ref_simple) = ctx.ref_simple() else {
            return ChunkStatus::Next;
        };
        // keep the running column list current
        if ctx.match_start2(3,3,5) {
            let index = ctx.last_path_value() as usize;
            if index == 0 {
                return ChunkStatus::Next;
            }
            if index > columns.len() {
                columns.resize_with(index,Column::default);
            }
            if ref_simple == name_ref {
                let column = &mut columns[index-1];
                column.name = conv.convert_name(ctx.data());
                column.index = index;
            } else if ref_simple == 2 {
                match (modern,ctx.data().get(1).copied()) {
                    (true,Some(code)) => columns[index-1].kind = ColumnType::from_byte(code),
                    (false,Some(1)) => columns[index-1].kind = ColumnType::Text,
                    (false,Some(2)) => columns[index-1].kind = ColumnType::Number,
                    _ => {}
                }
            }
            return ChunkStatus::Next;
        }
        // cell data
        let mut long = false;
        let mut column_index: usize = 0;
        if is_long_string(ctx,modern,last_row) {
            if ref_simple == 0 {
                return ChunkStatus::Next; // rich-text formatting
            }
            long = true;
            column_index = ctx.last_path_value() as usize;
        } else if ctx.match_start1(2,5) && ref_simple as usize <= columns.len() && ref_simple != 252 {
            column_index = ref_simple as usize;
        }
        if column_index == 0 || column_index > columns.len() {
            return ChunkStatus::Next;
        }
        let column = columns[column_index-1].clone();
        // a long string ends at the first chunk for some other column
        if column.index != last_column && !long_string.is_empty() {
            if last_column >= 1 && last_column <= columns.len() {
                if handler(current_row,&columns[last_column-1],&long_string) == HandlerStatus::Abort {
                    return ChunkStatus::Abort;
                }
            }
            long_string.clear();
        }
        let row = path_row(ctx,modern);
        if row != last_row || column.index < last_column {
            current_row += 1;
        }
        let value = conv.convert(ctx.data());
        if long {
            long_string.push_str(&value);
        } else if handler(current_row,&column,&value) == HandlerStatus::Abort {
            return ChunkStatus::Abort;
        }
        last_row = row;
        last_column = column.index;
        ChunkStatus::Next
    })?;
    // flush a value still being accumulated when the traversal ended
    if !long_string.is_empty() && last_column >= 1 && last_column <= columns.len() {
        handler(current_row,&columns[last_column-1],&long_string);
    }
    Ok(())
}
