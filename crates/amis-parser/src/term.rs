//! Term-part decomposition.
//!
//! The text before the primary `：` separator mixes four constructs that
//! all reuse the same two delimiters: ` - ` marks a stem/derived-form
//! relationship *or* sets a dialect tag off from its term, and ` = `
//! chains synonyms. Disambiguation is an ordered cascade — the cases
//! below are tried top to bottom and the first match wins.

use once_cell::sync::Lazy;
use regex::Regex;

use amis_types::DialectName;

use crate::dialects::DialectTable;

/// Separator between a stem and its derived forms.
pub const STEM_MARKER: &str = " - ";
/// Separator between mutually synonymous forms.
pub const SYNONYM_MARKER: &str = " = ";

/// `{tag} = synonyms` — the tag qualifies what precedes the dash.
static TAG_EQ_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\{[^}]+\})\s*=\s*(.+)$").expect("tag-eq regex"));

/// `term - {tag} = synonym` — tagged derived form plus a sibling synonym.
static TERM_TAG_EQ_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s*-\s*(\{[^}]+\})\s*=\s*(.+)$").expect("term-tag-eq regex"));

/// `{tag} - term = synonym` — same construct with tag and term reversed.
static TAG_TERM_EQ_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\{[^}]+\})\s*-\s*(.+?)\s*=\s*(.+)$").expect("tag-term-eq regex"));

/// One slot of the term part: the cleaned headword text (or `None` when
/// nothing but dialect tags remained), its own dialect names, and
/// whether it was derived from the line's stem.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaggedTerm {
    pub text: Option<String>,
    pub dialects: Vec<DialectName>,
    pub stem_derived: bool,
}

/// Structured view of the term part of one line.
///
/// `None` slots in `terms` keep synonym-group positions aligned but
/// never become entries.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TermInfo {
    pub stem: Option<String>,
    pub terms: Vec<TaggedTerm>,
    pub synonym_groups: Vec<Vec<String>>,
}

impl TermInfo {
    pub fn push_term(&mut self, text: Option<String>, dialects: Vec<DialectName>, stem_derived: bool) {
        self.terms.push(TaggedTerm {
            text,
            dialects,
            stem_derived,
        });
    }

    /// Replace the synonym groups with one group holding every present
    /// term, provided at least two are present.
    pub fn regroup_all(&mut self) {
        self.synonym_groups.clear();
        let present: Vec<String> = self
            .terms
            .iter()
            .filter_map(|t| t.text.clone())
            .collect();
        if present.len() > 1 {
            self.synonym_groups.push(present);
        }
    }

    /// The other members of `term`'s synonym group, in source order.
    /// `None` when the term belongs to no group.
    pub fn synonyms_for(&self, term: &str) -> Option<Vec<String>> {
        self.synonym_groups
            .iter()
            .find(|group| group.iter().any(|t| t == term))
            .map(|group| group.iter().filter(|t| *t != term).cloned().collect())
    }
}

/// Decompose the term part according to which markers it carries.
pub fn parse_term_part(table: &DialectTable, term_part: &str) -> TermInfo {
    let has_synonyms = term_part.contains(SYNONYM_MARKER);
    match term_part.split_once(STEM_MARKER) {
        Some((stem_raw, rest)) if has_synonyms => {
            parse_stem_with_synonyms(table, stem_raw.trim(), rest.trim())
        }
        Some(_) => parse_stem_chain(table, term_part),
        None if has_synonyms => {
            let mut info = TermInfo::default();
            for slot in parse_synonym_chain(table, term_part) {
                info.terms.push(slot);
            }
            info.regroup_all();
            info
        }
        None => {
            let mut info = TermInfo::default();
            let (text, dialects) = table.split_tagged(term_part);
            if text.is_some() {
                info.push_term(text, dialects, false);
            }
            info
        }
    }
}

/// Both markers present: `stem - …` where `…` still contains ` = `.
fn parse_stem_with_synonyms(table: &DialectTable, stem_raw: &str, rest: &str) -> TermInfo {
    // `stem - {tag} = synonyms`: the tag belongs to the stem itself,
    // which is therefore an ordinary term here, not a stem.
    if let Some(cap) = TAG_EQ_RE.captures(rest) {
        let mut info = TermInfo::default();
        info.push_term(Some(stem_raw.to_string()), table.extract(&cap[1]), false);
        for token in synonym_tokens(&cap[2]) {
            info.push_term(Some(token), Vec::new(), false);
        }
        info.regroup_all();
        return info;
    }

    // `stem - term - {tag} = synonym`
    if let Some(cap) = TERM_TAG_EQ_RE.captures(rest) {
        let (term, tag, syn) = (cap[1].trim().to_string(), cap[2].to_string(), cap[3].to_string());
        return tagged_derived_with_synonym(table, stem_raw, term, &tag, &syn);
    }

    // `stem - {tag} - term = synonym`
    if let Some(cap) = TAG_TERM_EQ_RE.captures(rest) {
        let (tag, term, syn) = (cap[1].to_string(), cap[2].trim().to_string(), cap[3].to_string());
        return tagged_derived_with_synonym(table, stem_raw, term, &tag, &syn);
    }

    // Fallback: `rest` is a plain synonym chain; only its first form is
    // derived from the stem.
    let mut info = TermInfo::default();
    info.stem = stem_text(stem_raw);
    for (idx, mut slot) in parse_synonym_chain(table, rest).into_iter().enumerate() {
        slot.stem_derived = idx == 0;
        info.terms.push(slot);
    }
    info.regroup_all();
    info
}

fn tagged_derived_with_synonym(
    table: &DialectTable,
    stem_raw: &str,
    derived: String,
    tag: &str,
    synonym_part: &str,
) -> TermInfo {
    let mut info = TermInfo::default();
    info.stem = stem_text(stem_raw);
    info.push_term(Some(derived.clone()), table.extract(tag), true);
    if let Some(first) = synonym_tokens(synonym_part).into_iter().next() {
        info.push_term(Some(first.clone()), Vec::new(), false);
        info.synonym_groups.push(vec![derived, first]);
    }
    info
}

/// Stem marker only: `stem - term…`, with one trap — a lone trailing
/// dialect tag means the dash was typographic, not derivational.
fn parse_stem_chain(table: &DialectTable, term_part: &str) -> TermInfo {
    let parts: Vec<&str> = term_part.split(STEM_MARKER).collect();
    let first = parts[0].trim();

    if parts.len() == 2 {
        let second = parts[1].trim();
        if DialectTable::strip_tags(second).is_empty() {
            // `term - {tag}`: a single tagged term, no stem relation.
            let mut info = TermInfo::default();
            let (text, dialects) = table.split_tagged(&format!("{first} {second}"));
            if text.is_some() {
                info.push_term(text, dialects, false);
            }
            return info;
        }
    }

    let mut info = TermInfo::default();
    info.stem = stem_text(first);
    let rest = parts[1..].join(STEM_MARKER);
    if rest.contains(SYNONYM_MARKER) {
        // `stem - term1 = term2`: chain, first form stem-derived.
        for (idx, mut slot) in parse_synonym_chain(table, &rest).into_iter().enumerate() {
            slot.stem_derived = idx == 0;
            info.terms.push(slot);
        }
        info.regroup_all();
    } else {
        // `stem - term1 - term2`: every segment derives from the stem.
        for segment in &parts[1..] {
            let (text, dialects) = table.split_tagged(segment.trim());
            if text.is_some() {
                info.push_term(text, dialects, true);
            }
        }
    }
    info
}

/// Split a ` = ` chain into aligned slots, one per piece. A piece that is
/// nothing but tags keeps its slot with `text: None`.
pub fn parse_synonym_chain(table: &DialectTable, text: &str) -> Vec<TaggedTerm> {
    text.split(SYNONYM_MARKER)
        .map(|piece| {
            let (text, dialects) = table.split_tagged(piece.trim());
            TaggedTerm {
                text,
                dialects,
                stem_derived: false,
            }
        })
        .collect()
}

/// Bare synonym tokens from free text: whitespace/`=`-separated words
/// with anything structural (brace tags) rejected.
fn synonym_tokens(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == '=')
        .filter(|t| !t.is_empty() && !t.contains('{') && !t.contains('}'))
        .map(str::to_string)
        .collect()
}

fn stem_text(raw: &str) -> Option<String> {
    let clean = DialectTable::strip_tags(raw);
    (!clean.is_empty()).then_some(clean)
}
