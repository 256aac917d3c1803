//! File-reading and reporting collaborators around the parsing engine.
//!
//! The engine itself ([`amis_parser::LineParser`]) is a pure line →
//! entries transform; this crate supplies the host side: loading the
//! dictionary file ([`source::LineSource`]) and rendering the entries
//! ([`report`]).

pub mod report;
pub mod source;

pub use report::{OutputFormat, parse_format, write_entries};
pub use source::{LineSource, LoadMode, parse_load_mode};
