use clap;
use crate::STDRESULT;

pub fn dump(cmd: &clap::ArgMatches) -> STDRESULT {
    let mut fmp = super::open_from_matches(cmd)?;
    return fmp.dump();
}
