//! # `fmkit` main library
//! 
//! This library reads FileMaker Pro databases (the "FMP" family of on-disk
//! formats) and exposes their logical content: tables, columns, and row
//! values.  It is a read-only, offline decoder.  There is no write path and
//! no query engine; exporters are thin consumers of the value callback
//! stream.
//! 
//! ## Architecture
//! 
//! The decoding work is split across three modules:
//! * `hbam` decodes the on-disk structure: the sector linked list, the
//!   opcode-driven chunk stream inside each sector, and the hierarchical
//!   path that addresses every chunk.  It knows nothing about tables.
//! * `db` interprets the chunk stream as a database catalogue and row data.
//!   Its three visitors (`list_tables`, `list_columns`, `read_values`)
//!   recognize path signatures and collate chunks into entities and cells.
//! * `text` converts the obfuscated on-disk text (Mac Roman for legacy
//!   files, SCSU for modern ones) into UTF-8.
//! 
//! ## Format Variants
//! 
//! Two deeply different layouts hide behind one magic number.  Legacy files
//! (FileMaker 3 through 6) use 1024-byte sectors and one opcode table;
//! modern files (7 through 12, signature `HBAM7`) use 4096-byte sectors,
//! another opcode table, and XOR-masked SCSU text.  The variant is probed
//! once at open and is immutable for the life of the handle.
//! 
//! ## Typical Use
//! 
//! ```no_run
//! let mut fmp = fmkit::open_fmp_from_file("accounts.fp7").expect("open failed");
//! for table in fmkit::db::list_tables(&mut fmp).expect("bad catalogue") {
//!     let columns = fmkit::db::list_columns(&mut fmp, &table).expect("bad columns");
//!     println!("{} has {} columns", table.name, columns.len());
//! }
//! ```

pub mod hbam;
pub mod db;
pub mod text;
pub mod commands;

use std::path::Path;
use log::{warn,info};

type DYNERR = Box<dyn std::error::Error>;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

const KNOWN_FILE_EXTENSIONS: &str = "fp3,fp5,fp7,fmp12";

/// Open a FileMaker database from the host file system.  The file's
/// basename is retained; legacy files name their single table after it.
pub fn open_fmp_from_file(path: &str) -> Result<hbam::FmpFile,DYNERR> {
    if let Some(ext) = Path::new(path).extension() {
        let ext = ext.to_string_lossy().to_lowercase();
        if !KNOWN_FILE_EXTENSIONS.split(',').any(|known| known == ext) {
            warn!("extension `{}` is not a usual FileMaker extension",ext);
        }
    }
    let dat = std::fs::read(path)?;
    let basename = Path::new(path).file_name().map(|s| s.to_string_lossy().to_string());
    let fmp = hbam::FmpFile::from_bytes(&dat, basename.as_deref())?;
    info!("identified FileMaker {} file with {} sectors",fmp.version,fmp.num_sectors());
    Ok(fmp)
}

/// Open a FileMaker database from a byte buffer.  The optional name stands
/// in for the filename, which legacy files use to name their single table.
pub fn open_fmp_from_bytestream(dat: &[u8],name: Option<&str>) -> Result<hbam::FmpFile,DYNERR> {
    let fmp = hbam::FmpFile::from_bytes(dat, name)?;
    info!("identified FileMaker {} buffer with {} sectors",fmp.version,fmp.num_sectors());
    Ok(fmp)
}
