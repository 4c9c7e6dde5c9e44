use clap::{arg,crate_version,Arg,Command};

const OUT_HELP: &str = "use `-` or omit the option to write to stdout";

pub fn build_cli() -> Command {
    let long_help = "fmkit is always invoked with exactly one of several subcommands.
Legacy files (FileMaker 3-6) and modern files (FileMaker 7-12) are both
handled; the variant is probed from the file header.
Set RUST_LOG environment variable to control logging level.
  levels: trace,debug,info,warn,error

Examples:
---------
list the catalogue:      `fmkit catalog -f contacts.fp7`
export every table:      `fmkit json -f contacts.fp7 -o contacts.json --indent 2`
one table as a sheet:    `fmkit csv -f contacts.fp7 -t Contacts -o contacts.csv`
SQL import script:       `fmkit sql -f contacts.fp5 -o contacts.sql`
low level chunk dump:    `fmkit dump -f mystery.fp7 > dump.txt`";
    Command::new("fmkit")
        .about("fmkit reads FileMaker Pro databases")
        .after_long_help(long_help)
        .version(crate_version!())
        .subcommand(Command::new("catalog")
            .arg(arg!(-f --fmp <PATH> "path to the database file").required(true))
            .about("display tables and columns"))
        .subcommand(Command::new("json")
            .arg(arg!(-f --fmp <PATH> "path to the database file").required(true))
            .arg(arg!(-o --output <PATH> "output file").required(false).help(OUT_HELP))
            .arg(Arg::new("indent").long("indent").value_name("SPACES")
                .value_parser(clap::value_parser!(u16))
                .help("pretty print with the given indentation"))
            .about("export all tables as JSON"))
        .subcommand(Command::new("csv")
            .arg(arg!(-f --fmp <PATH> "path to the database file").required(true))
            .arg(arg!(-t --table <NAME> "table to export, name or index").required(true))
            .arg(arg!(-o --output <PATH> "output file").required(false).help(OUT_HELP))
            .about("export one table as CSV with a header row"))
        .subcommand(Command::new("sql")
            .arg(arg!(-f --fmp <PATH> "path to the database file").required(true))
            .arg(arg!(-o --output <PATH> "output file").required(false).help(OUT_HELP))
            .about("export all tables as a SQL script"))
        .subcommand(Command::new("dump")
            .arg(arg!(-f --fmp <PATH> "path to the database file").required(true))
            .about("write a low level diagnostic dump to stdout"))
}
