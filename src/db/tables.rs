//! # Table catalogue
//! 
//! Modern files keep a real table catalogue under the path `[3,16,5,t]`
//! where `t` is the table's index plus 128.  Legacy files hold exactly one
//! table and never name it; the convention, inherited from FileMaker
//! itself, is to name it after the file.

use crate::hbam::{FmpFile,ChunkStatus};
use crate::text;
use crate::DYNERR;
use super::Table;

pub fn list_tables(fmp: &mut FmpFile) -> Result<Vec<Table>,DYNERR> {
    if !fmp.version.modern() {
        return Ok(vec![synthesize_table(&fmp.filename)]);
    }
    let conv = fmp.converter();
    let mut slots: Vec<Table> = Vec::new();
    fmp.process_sectors(|ctx| {
        // the catalogue lives under top node 3, nothing to find past it
        if ctx.path_value(0) > 3 {
            return ChunkStatus::Done;
        }
        let Some(ref_simple) = ctx.ref_simple() else {
            return ChunkStatus::Next;
        };
        if ctx.path_level() == 4 && ctx.path_value(0) == 3 && ctx.path_value(1) == 16
            && ctx.path_value(2) == 5 && ctx.path_value(3) >= 128 {
            let index = (ctx.last_path_value() - 128) as usize;
            if index >= 1 && ref_simple == 16 {
                if index > slots.len() {
                    slots.resize_with(index,Table::default);
                }
                let table = &mut slots[index-1];
                table.name = conv.convert_name(ctx.data());
                table.index = index;
            }
        }
        ChunkStatus::Next
    })?;
    Ok(slots.into_iter().filter(|t| t.index != 0).collect())
}

/// The one table of a legacy file, named after the file with a single
/// trailing extension stripped.
fn synthesize_table(filename: &str) -> Table {
    let mut name = filename.to_string();
    if let Some(i) = name.rfind('.') {
        if i > 0 {
            name.truncate(i);
        }
    }
    text::truncate_name(&mut name);
    Table { index: 1, name, skip: false }
}
