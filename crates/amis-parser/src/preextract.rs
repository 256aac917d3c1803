//! Pre-pass for examples embedded in the term part.
//!
//! Some lines tack an illustrative sentence onto the term structure
//! itself: `<term structure> - <short phrase>：<translation>`. Left
//! alone, the main `：` split would hand the phrase to the term parser,
//! which would misread it as a derived form. This pass extracts the
//! sentence first and rewrites the line with an empty description, so
//! the main split runs on simplified input.

use once_cell::sync::Lazy;
use regex::Regex;

use amis_types::Example;

use crate::term::SYNONYM_MARKER;

/// `main - phrase：translation` where the phrase is structurally plain
/// (no `=`, no braces, no further `：`).
static EMBEDDED_EXAMPLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s*-\s*([^：={}]+)：(.+)$").expect("embedded example regex"));

/// A phrase longer than this is a definition fragment, not an example.
const MAX_PHRASE_TOKENS: usize = 4;

/// Extract an embedded example if the line matches, returning the
/// rewritten line. Non-matching lines pass through untouched.
pub fn pre_extract(line: &str) -> (String, Option<Example>) {
    if let Some(cap) = EMBEDDED_EXAMPLE_RE.captures(line) {
        let main = cap[1].trim();
        let phrase = cap[2].trim();
        let translation = cap[3].trim();

        // Only fires when the part kept as the term side already shows
        // term structure, has no separator of its own, and the phrase
        // is short enough to plausibly be a sentence.
        let structured = main.contains(SYNONYM_MARKER) || main.contains('{');
        if !main.contains('：')
            && structured
            && phrase.split_whitespace().count() <= MAX_PHRASE_TOKENS
        {
            return (
                format!("{main}："),
                Some(Example {
                    amis: phrase.to_string(),
                    chinese: translation.to_string(),
                }),
            );
        }
    }
    (line.to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_example_after_synonym_chain() {
        let (rewritten, example) = pre_extract("soda = solda - Ira ko soda：有雪");
        assert_eq!(rewritten, "soda = solda：");
        let example = example.unwrap();
        assert_eq!(example.amis, "Ira ko soda");
        assert_eq!(example.chinese, "有雪");
    }

    #[test]
    fn extracts_example_after_tagged_term() {
        let (rewritten, example) = pre_extract("kolong {S} - Ira ko kolong：有水牛");
        assert_eq!(rewritten, "kolong {S}：");
        assert!(example.is_some());
    }

    #[test]
    fn plain_stem_lines_pass_through() {
        // No synonym marker, no tag: this dash is a stem relation.
        let line = "'aca - pa'aca：賣，售";
        let (rewritten, example) = pre_extract(line);
        assert_eq!(rewritten, line);
        assert_eq!(example, None);
    }

    #[test]
    fn long_phrases_pass_through() {
        let line = "soda = solda - Ira ko soda i lotok a maemin：山上都有雪";
        let (rewritten, example) = pre_extract(line);
        assert_eq!(rewritten, line);
        assert_eq!(example, None);
    }

    #[test]
    fn main_part_with_separator_passes_through() {
        let line = "caleg：松樹 - kilag：樹木";
        let (_, example) = pre_extract(line);
        assert_eq!(example, None);
    }
}
