//! Shared types for parsed Amis↔Chinese dictionary entries.
//!
//! A parser turns one raw dictionary line into zero or more [`Entry`]
//! records. The types here mirror what downstream storage or publishing
//! consumes: a headword, its optional stem and dialect tags, one or more
//! Chinese glosses, an optional illustrative sentence pair, and the other
//! members of the headword's synonym group.
//!
//! All optional fields are omitted from serialized output when absent —
//! an entry either carries a stem or it doesn't, there is no null.
//!
//! ```rust
//! use amis_types::{Description, Entry};
//!
//! let entry = Entry {
//!     term: "caleg".into(),
//!     stem: None,
//!     dialects: None,
//!     description: Description::from_glosses(vec!["松樹".into(), "松柏科".into()]),
//!     example: None,
//!     synonyms: None,
//! };
//! assert!(!entry.description.is_empty());
//! ```

use serde::{Deserialize, Serialize};

/// Full display name of a dialect or source language (e.g. `國語`).
///
/// Only ever produced by looking a short code up in a dialect table,
/// never invented from raw text.
pub type DialectName = String;

/// An illustrative sentence pair: Amis source text and its Chinese gloss.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub amis: String,
    pub chinese: String,
}

/// One or more Chinese glosses for a headword.
///
/// Serializes as a bare string when a single gloss was found and as an
/// array when the line enumerated alternatives. `Single("")` is the
/// sentinel for "no gloss" — a headword listed without a definition.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Single(String),
    Multiple(Vec<String>),
}

impl Description {
    /// Collapse a gloss list into the stored form: one gloss stays a
    /// string, several stay a list, none (or a single blank) becomes the
    /// empty-string sentinel.
    pub fn from_glosses(mut glosses: Vec<String>) -> Self {
        match glosses.len() {
            0 => Description::Single(String::new()),
            1 => {
                let only = glosses.remove(0);
                if only.trim().is_empty() {
                    Description::Single(String::new())
                } else {
                    Description::Single(only)
                }
            }
            _ => Description::Multiple(glosses),
        }
    }

    /// True for the "no gloss" sentinel.
    pub fn is_empty(&self) -> bool {
        match self {
            Description::Single(text) => text.is_empty(),
            Description::Multiple(glosses) => glosses.is_empty(),
        }
    }
}

impl Default for Description {
    fn default() -> Self {
        Description::Single(String::new())
    }
}

/// One structured lexical entry produced from a dictionary line.
///
/// `stem` is present only when the headword was derived from that stem
/// on its line (not merely co-occurring with it) and differs from the
/// headword itself. `synonyms` lists the *other* members of the
/// headword's synonym group, in source order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub term: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialects: Option<Vec<DialectName>>,
    pub description: Description,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Example>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Vec<String>>,
}
