//! # Database Module
//! 
//! Interprets the decoded chunk stream as a database: the table catalogue,
//! each table's columns, and the cell values of each row.  The three
//! visitors in the submodules recognize path signatures in the stream and
//! collate matching chunks into entities.  Nothing here touches raw
//! sectors; everything goes through `hbam`'s traversal.
//! 
//! Entity indices are 1-based, exactly as they appear in the file.  The
//! visitors collect into growable slot arrays indexed by entity index and
//! squash the empty slots afterwards, so results are dense and ordered.

pub mod tables;
pub mod columns;
pub mod values;

pub use tables::list_tables;
pub use columns::list_columns;
pub use values::read_values;

use std::fmt;

/// Column types a FileMaker file can declare.  Legacy files only document
/// Text and Number; everything else shows up as written by modern files.
#[derive(PartialEq,Eq,Clone,Copy,Debug,Default)]
pub enum ColumnType {
    #[default]
    Unknown,
    Text,
    Number,
    Date,
    Time,
    Container,
    Calc,
    Summary,
    Global
}

impl ColumnType {
    /// the on-disk type code; out of range codes report Unknown
    pub fn from_byte(code: u8) -> Self {
        match code {
            1 => Self::Text,
            2 => Self::Number,
            3 => Self::Date,
            4 => Self::Time,
            5 => Self::Container,
            6 => Self::Calc,
            7 => Self::Summary,
            8 => Self::Global,
            _ => Self::Unknown
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self,f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f,"UNKNOWN"),
            Self::Text => write!(f,"TEXT"),
            Self::Number => write!(f,"NUMBER"),
            Self::Date => write!(f,"DATE"),
            Self::Time => write!(f,"TIME"),
            Self::Container => write!(f,"CONTAINER"),
            Self::Calc => write!(f,"CALC"),
            Self::Summary => write!(f,"SUMMARY"),
            Self::Global => write!(f,"GLOBAL")
        }
    }
}

/// FileMaker's per-column locale identifier.  The on-disk byte mapping is
/// not documented for either generation, so enumerated columns carry the
/// default; the table is here so consumers can present the known codes.
#[derive(PartialEq,Eq,Clone,Copy,Debug,Default)]
pub enum Collation {
    #[default]
    English,
    French,
    German,
    Italian,
    Dutch,
    Swedish,
    Spanish,
    Danish,
    Portuguese,
    Norwegian,
    Finnish,
    Greek,
    Icelandic,
    Turkish,
    Romanian,
    Polish,
    Hungarian,
    Russian,
    Czech,
    Ukrainian,
    Croatian,
    Catalan,
    FinnishAlt,
    SwedishAlt,
    GermanAlt,
    SpanishAlt,
    Ascii
}

impl Collation {
    pub fn from_byte(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Self::English),
            0x01 => Some(Self::French),
            0x03 => Some(Self::German),
            0x04 => Some(Self::Italian),
            0x05 => Some(Self::Dutch),
            0x07 => Some(Self::Swedish),
            0x08 => Some(Self::Spanish),
            0x09 => Some(Self::Danish),
            0x0A => Some(Self::Portuguese),
            0x0C => Some(Self::Norwegian),
            0x11 => Some(Self::Finnish),
            0x14 => Some(Self::Greek),
            0x15 => Some(Self::Icelandic),
            0x18 => Some(Self::Turkish),
            0x27 => Some(Self::Romanian),
            0x2A => Some(Self::Polish),
            0x2B => Some(Self::Hungarian),
            0x31 => Some(Self::Russian),
            0x38 => Some(Self::Czech),
            0x3E => Some(Self::Ukrainian),
            0x42 => Some(Self::Croatian),
            0x49 => Some(Self::Catalan),
            0x62 => Some(Self::FinnishAlt),
            0x63 => Some(Self::SwedishAlt),
            0x64 => Some(Self::GermanAlt),
            0x65 => Some(Self::SpanishAlt),
            0x66 => Some(Self::Ascii),
            _ => None
        }
    }
    /// short ISO-like language tag for downstream consumers
    pub fn language_tag(&self) -> &'static str {
        match self {
            Self::English | Self::Ascii => "en",
            Self::French => "fr",
            Self::German | Self::GermanAlt => "de",
            Self::Italian => "it",
            Self::Dutch => "nl",
            Self::Swedish | Self::SwedishAlt => "sv",
            Self::Spanish | Self::SpanishAlt => "es",
            Self::Danish => "da",
            Self::Portuguese => "pt",
            Self::Norwegian => "no",
            Self::Finnish | Self::FinnishAlt => "fi",
            Self::Greek => "el",
            Self::Icelandic => "is",
            Self::Turkish => "tr",
            Self::Romanian => "ro",
            Self::Polish => "pl",
            Self::Hungarian => "hu",
            Self::Russian => "ru",
            Self::Czech => "cs",
            Self::Ukrainian => "uk",
            Self::Croatian => "hr",
            Self::Catalan => "ca"
        }
    }
}

impl fmt::Display for Collation {
    fn fmt(&self,f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,"{}",self.language_tag())
    }
}

#[derive(PartialEq,Eq,Clone,Debug,Default)]
pub struct Table {
    /// 1-based index as stored in the file
    pub index: usize,
    pub name: String,
    /// set by consumers that want to pass over this table, e.g. exporters
    /// skip tables with no columns
    pub skip: bool
}

#[derive(PartialEq,Eq,Clone,Debug,Default)]
pub struct Column {
    /// 1-based index as stored in the file
    pub index: usize,
    pub name: String,
    pub kind: ColumnType,
    pub collation: Collation
}

/// Verdict of a value callback.
#[derive(PartialEq,Eq,Clone,Copy,Debug)]
pub enum HandlerStatus {
    Ok,
    /// the value still counts as emitted, but the caller ignored it
    Skip,
    /// stop everything, `read_values` returns `UserAborted`
    Abort
}
