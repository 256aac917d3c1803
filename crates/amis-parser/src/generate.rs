//! Entry fan-out.
//!
//! Combines the parsed term structure with the parsed description into
//! the final ordered entry sequence: one entry per present term, plus a
//! separate dialect-scoped entry per term when the description carried a
//! parenthetical gloss.

use amis_types::{Description, Entry};

use crate::ParseError;
use crate::description::DescriptionInfo;
use crate::term::{TaggedTerm, TermInfo};

pub fn generate(
    term_info: &TermInfo,
    desc_info: &DescriptionInfo,
    line: &str,
) -> Result<Vec<Entry>, ParseError> {
    let mut entries = Vec::new();

    for slot in &term_info.terms {
        let Some(term) = slot.text.as_deref() else {
            continue;
        };

        if let Some(paren) = &desc_info.parenthetical {
            if !desc_info.glosses.is_empty() {
                entries.push(build_entry(
                    term_info,
                    slot,
                    term,
                    desc_info.glosses.clone(),
                    desc_info,
                    line,
                )?);
            }
            // The parenthetical gloss gets its own entry, carrying the
            // parenthetical's dialects instead of the term's own.
            entries.push(Entry {
                term: checked_term(term, line)?,
                stem: stem_for(term_info, slot, term),
                dialects: non_empty(paren.dialects.clone()),
                description: Description::from_glosses(vec![paren.text.clone()]),
                example: None,
                synonyms: None,
            });
        } else {
            entries.push(build_entry(
                term_info,
                slot,
                term,
                desc_info.glosses.clone(),
                desc_info,
                line,
            )?);
        }
    }

    Ok(entries)
}

fn build_entry(
    term_info: &TermInfo,
    slot: &TaggedTerm,
    term: &str,
    glosses: Vec<String>,
    desc_info: &DescriptionInfo,
    line: &str,
) -> Result<Entry, ParseError> {
    Ok(Entry {
        term: checked_term(term, line)?,
        stem: stem_for(term_info, slot, term),
        dialects: non_empty(slot.dialects.clone()),
        description: Description::from_glosses(glosses),
        example: desc_info.example.clone(),
        synonyms: term_info.synonyms_for(term).and_then(non_empty),
    })
}

fn checked_term(term: &str, line: &str) -> Result<String, ParseError> {
    if term.trim().is_empty() {
        return Err(ParseError::EmptyTerm {
            line: line.to_string(),
        });
    }
    Ok(term.to_string())
}

/// A stem is attached only to terms actually derived from it, and never
/// when it equals the term itself.
fn stem_for(term_info: &TermInfo, slot: &TaggedTerm, term: &str) -> Option<String> {
    if !slot.stem_derived {
        return None;
    }
    term_info
        .stem
        .clone()
        .filter(|stem| stem != term)
}

fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
    (!values.is_empty()).then_some(values)
}
