//! Open arbitrary bytes, enumerate everything, read every value, drop.
//! Any input must produce a handle or an error, never a crash or an out
//! of bounds access.
#![no_main]

use libfuzzer_sys::fuzz_target;
use fmkit::db::{self,HandlerStatus};

fuzz_target!(|data: &[u8]| {
    if let Ok(mut fmp) = fmkit::open_fmp_from_bytestream(data,Some("fuzz.fp7")) {
        if let Ok(tables) = db::list_tables(&mut fmp) {
            for table in &tables {
                let _ = db::list_columns(&mut fmp,table);
                let _ = db::read_values(&mut fmp,table,|_row,_column,_value| HandlerStatus::Ok);
            }
        }
    }
});
