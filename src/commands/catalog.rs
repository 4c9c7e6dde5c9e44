use clap;
use crate::db;
use crate::STDRESULT;

pub fn catalog(cmd: &clap::ArgMatches) -> STDRESULT {
    let mut fmp = super::open_from_matches(cmd)?;
    let tables = db::list_tables(&mut fmp)?;
    for table in &tables {
        println!("{}. {}",table.index,table.name);
        let columns = db::list_columns(&mut fmp,table)?;
        if columns.is_empty() {
            println!("    (no columns)");
            continue;
        }
        for column in &columns {
            println!("    {:<4} {:<32} {:<10} {}",column.index,column.name,column.kind.to_string(),column.collation.language_tag());
        }
    }
    return Ok(());
}
