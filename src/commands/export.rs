//! Exporters are deliberately thin: they consume the value callback
//! stream and do nothing the library could not reproduce elsewhere.

use std::collections::HashMap;
use clap;
use crate::db::{self,Column,HandlerStatus,Table};
use crate::hbam::FmpFile;
use crate::{DYNERR,STDRESULT};
use super::CommandError;

/// Gather one table into dense rows, one slot per column in catalogue
/// order.  Cells the file never wrote stay `None`.
fn collect_rows(fmp: &mut FmpFile,table: &Table,columns: &Vec<Column>) -> Result<Vec<Vec<Option<String>>>,DYNERR> {
    let position: HashMap<usize,usize> = columns.iter().enumerate().map(|(i,c)| (c.index,i)).collect();
    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    let mut current: Vec<Option<String>> = vec![None;columns.len()];
    let mut last_row: u32 = 0;
    db::read_values(fmp,table,|row,column,value| {
        if row != last_row && last_row != 0 {
            rows.push(std::mem::replace(&mut current,vec![None;columns.len()]));
        }
        if let Some(i) = position.get(&column.index) {
            current[*i] = Some(value.to_string());
        }
        last_row = row;
        HandlerStatus::Ok
    })?;
    if last_row != 0 {
        rows.push(current);
    }
    Ok(rows)
}

pub fn json(cmd: &clap::ArgMatches) -> STDRESULT {
    let mut fmp = super::open_from_matches(cmd)?;
    let mut tables = db::list_tables(&mut fmp)?;
    let mut root = json::JsonValue::new_array();
    for table in tables.iter_mut() {
        let columns = db::list_columns(&mut fmp,table)?;
        if columns.is_empty() {
            table.skip = true;
        }
        let mut obj = json::JsonValue::new_object();
        obj["name"] = json::JsonValue::String(table.name.clone());
        obj["columns"] = json::JsonValue::new_array();
        for column in &columns {
            obj["columns"].push(column.name.clone())?;
        }
        let mut rows = json::JsonValue::new_array();
        if !table.skip {
            let mut row_obj = json::JsonValue::new_object();
            let mut last_row: u32 = 0;
            db::read_values(&mut fmp,table,|row,column,value| {
                if row != last_row && last_row != 0 {
                    rows.push(std::mem::replace(&mut row_obj,json::JsonValue::new_object())).ok();
                }
                row_obj[column.name.as_str()] = json::JsonValue::String(value.to_string());
                last_row = row;
                HandlerStatus::Ok
            })?;
            if last_row != 0 {
                rows.push(row_obj).ok();
            }
        }
        obj["values"] = rows;
        root.push(obj)?;
    }
    let mut ans = match cmd.get_one::<u16>("indent") {
        Some(spaces) => json::stringify_pretty(root,*spaces),
        None => json::stringify(root)
    };
    ans.push('\n');
    return super::write_output(cmd,&ans);
}

fn csv_quote(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        return format!("\"{}\"",field.replace('"',"\"\""));
    }
    field.to_string()
}

pub fn csv(cmd: &clap::ArgMatches) -> STDRESULT {
    let mut fmp = super::open_from_matches(cmd)?;
    let tables = db::list_tables(&mut fmp)?;
    let selector = cmd.get_one::<String>("table").expect("required argument");
    let table = match tables.iter().find(|t| t.name == *selector || t.index.to_string() == *selector) {
        Some(t) => t.clone(),
        None => return Err(Box::new(CommandError::TableNotFound))
    };
    let columns = db::list_columns(&mut fmp,&table)?;
    if columns.is_empty() {
        return Err(Box::new(CommandError::TableNotFound));
    }
    let mut ans = columns.iter().map(|c| csv_quote(&c.name)).collect::<Vec<String>>().join(",");
    ans.push('\n');
    for row in collect_rows(&mut fmp,&table,&columns)? {
        let flat = row.iter().map(|cell| match cell {
            Some(value) => csv_quote(value),
            None => String::new()
        }).collect::<Vec<String>>().join(",");
        ans += &flat;
        ans.push('\n');
    }
    return super::write_output(cmd,&ans);
}

fn sql_ident(name: &str) -> String {
    format!("\"{}\"",name.replace('"',"\"\""))
}

fn sql_text(value: &str) -> String {
    format!("'{}'",value.replace('\'',"''"))
}

pub fn sql(cmd: &clap::ArgMatches) -> STDRESULT {
    let mut fmp = super::open_from_matches(cmd)?;
    let mut tables = db::list_tables(&mut fmp)?;
    let mut ans = String::from("PRAGMA journal_mode = OFF;\n");
    for table in tables.iter_mut() {
        let columns = db::list_columns(&mut fmp,table)?;
        if columns.is_empty() {
            table.skip = true;
            continue;
        }
        let decl = columns.iter().map(|c| format!("{} TEXT",sql_ident(&c.name))).collect::<Vec<String>>().join(", ");
        ans += &format!("CREATE TABLE {} ({});\n",sql_ident(&table.name),decl);
        ans += "BEGIN TRANSACTION;\n";
        for row in collect_rows(&mut fmp,table,&columns)? {
            let flat = row.iter().map(|cell| match cell {
                Some(value) => sql_text(value),
                None => "NULL".to_string()
            }).collect::<Vec<String>>().join(", ");
            ans += &format!("INSERT INTO {} VALUES ({});\n",sql_ident(&table.name),flat);
        }
        ans += "COMMIT;\n";
    }
    return super::write_output(cmd,&ans);
}
