//! Parsing engine for a bilingual Amis↔Chinese dictionary source.
//!
//! The source uses an informal textual markup: one line holds a term
//! part and a description part split on `：`, with ` - ` marking stems
//! or setting off dialect tags, ` = ` chaining synonyms, `{…}` carrying
//! dialect codes, and `；` enumerating glosses. The same delimiter plays
//! different roles depending on context, so parsing is a cascade of
//! ordered disambiguation rules rather than a grammar.
//!
//! [`LineParser`] is the entry point: a pure `line → entries` transform
//! with no I/O and no state beyond the injected [`DialectTable`], so
//! callers may parse lines in any order or in parallel.
//!
//! ```rust
//! use amis_parser::LineParser;
//!
//! let parser = LineParser::new();
//! let entries = parser.parse_line("kolong {S}{Tw}：水牛")?;
//! assert_eq!(entries[0].term, "kolong");
//! assert_eq!(entries[0].dialects.as_deref(), Some(&["南方話".to_string(), "閩南語".to_string()][..]));
//! # Ok::<(), amis_parser::ParseError>(())
//! ```

use thiserror::Error;

pub mod description;
pub mod dialects;
mod generate;
mod preextract;
pub mod term;

pub use amis_types::{Description, DialectName, Entry, Example};
pub use description::{DescriptionInfo, Parenthetical, parse_description_part};
pub use dialects::DialectTable;
pub use term::{TaggedTerm, TermInfo, parse_term_part};

use term::{STEM_MARKER, SYNONYM_MARKER};

/// Fatal-for-the-line conditions. Anything else the markup throws at the
/// parser is resolved by rule priority, not reported.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The primary separator was present but nothing preceded it.
    #[error("empty term part in line: {line:?}")]
    EmptyTermPart { line: String },
    /// Entry materialization was attempted for an empty headword.
    #[error("cannot create entry with empty term in line: {line:?}")]
    EmptyTerm { line: String },
}

/// Turns raw dictionary lines into structured entries.
#[derive(Clone, Debug)]
pub struct LineParser {
    dialects: DialectTable,
}

impl LineParser {
    /// Parser with the built-in dialect code table.
    pub fn new() -> Self {
        Self::with_table(DialectTable::default())
    }

    /// Parser with a caller-supplied dialect code table.
    pub fn with_table(dialects: DialectTable) -> Self {
        Self { dialects }
    }

    pub fn dialects(&self) -> &DialectTable {
        &self.dialects
    }

    /// Parse one line into zero or more entries.
    ///
    /// Blank lines and lines without the primary `：` separator yield an
    /// empty sequence. The two [`ParseError`] conditions abort the line.
    pub fn parse_line(&self, line: &str) -> Result<Vec<Entry>, ParseError> {
        if line.trim().is_empty() {
            return Ok(Vec::new());
        }

        // The source mixes fullwidth and ASCII equals for the same marker.
        let normalized = line.replace('＝', "=");

        let (processed, pre_example) = preextract::pre_extract(&normalized);

        let Some((term_part, description_part)) = processed.split_once('：') else {
            // Not an entry line (e.g. prose or a page header).
            return Ok(Vec::new());
        };
        let term_part = term_part.trim();
        let description_part = description_part.trim();

        if term_part.is_empty() {
            return Err(ParseError::EmptyTermPart {
                line: line.to_string(),
            });
        }

        // Competing interpretation: a `=`-chain in the description while
        // the term part holds only a stem relation means the description
        // tail lists synonyms of the headword, not alternative glosses.
        if description_part.contains(SYNONYM_MARKER)
            && !description_part.contains(STEM_MARKER)
            && term_part.contains(STEM_MARKER)
            && !term_part.contains(SYNONYM_MARKER)
        {
            return self.parse_with_description_synonyms(
                term_part,
                description_part,
                pre_example,
                line,
            );
        }

        let term_info = term::parse_term_part(&self.dialects, term_part);
        let mut desc_info = description::parse_description_part(&self.dialects, description_part);
        if desc_info.example.is_none() {
            desc_info.example = pre_example;
        }

        generate::generate(&term_info, &desc_info, line)
    }

    /// Cross-part synonym merge: the description's `=`-tail becomes
    /// additional terms, every term joins one synonym group, and only
    /// the first description piece survives as the gloss.
    fn parse_with_description_synonyms(
        &self,
        term_part: &str,
        description_part: &str,
        pre_example: Option<Example>,
        line: &str,
    ) -> Result<Vec<Entry>, ParseError> {
        let mut term_info = term::parse_term_part(&self.dialects, term_part);

        let mut pieces = description_part.split(SYNONYM_MARKER).map(str::trim);
        let gloss = pieces.next().unwrap_or_default().to_string();
        for piece in pieces {
            let (text, dialects) = self.dialects.split_tagged(piece);
            if text.is_some() {
                term_info.push_term(text, dialects, false);
            }
        }
        term_info.regroup_all();

        let desc_info = DescriptionInfo {
            glosses: vec![gloss],
            example: pre_example,
            parenthetical: None,
        };
        generate::generate(&term_info, &desc_info, line)
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_yield_nothing() {
        let parser = LineParser::new();
        assert!(parser.parse_line("").unwrap().is_empty());
        assert!(parser.parse_line("   \t").unwrap().is_empty());
    }

    #[test]
    fn lines_without_separator_yield_nothing() {
        let parser = LineParser::new();
        assert!(parser.parse_line("阿美語字典 第三頁").unwrap().is_empty());
    }

    #[test]
    fn empty_term_part_is_reported() {
        let parser = LineParser::new();
        let err = parser.parse_line("：孤立的解釋").unwrap_err();
        assert!(matches!(err, ParseError::EmptyTermPart { .. }));
        assert!(err.to_string().contains("孤立的解釋"));
    }

    #[test]
    fn tag_only_term_part_yields_nothing() {
        // The headword vanished after tag stripping; not an error, the
        // line simply produces no entries.
        let parser = LineParser::new();
        assert!(parser.parse_line("{Ch}：國語借詞").unwrap().is_empty());
    }

    #[test]
    fn cross_part_synonyms_merge_into_term_structure() {
        let parser = LineParser::new();
        let entries = parser
            .parse_line("lotok - talotok：上山 = miladom = mikilom")
            .unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].term, "talotok");
        assert_eq!(entries[0].stem.as_deref(), Some("lotok"));
        assert_eq!(entries[1].term, "miladom");
        assert_eq!(entries[1].stem, None);
        for entry in &entries {
            assert_eq!(entry.description, Description::Single("上山".into()));
            assert_eq!(entry.synonyms.as_ref().unwrap().len(), 2);
        }
    }

    #[test]
    fn description_equals_without_stem_term_stays_glosses() {
        // Without a stem marker in the term part the merge must not fire.
        let parser = LineParser::new();
        let entries = parser.parse_line("soda：雪 = 冰霜").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].description,
            Description::Multiple(vec!["雪".into(), "冰霜".into()])
        );
        assert_eq!(entries[0].synonyms, None);
    }
}
