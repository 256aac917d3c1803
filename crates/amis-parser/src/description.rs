//! Description-part decomposition.
//!
//! The text after the primary `：` separator holds the Chinese glosses,
//! possibly followed by one illustrative sentence and possibly ending in
//! a dialect-scoped parenthetical gloss. The rules below are tried in
//! strict priority order and the first match wins: the quoted citation
//! form is the most distinctive and must be recognised before the plain
//! `-`/`：` example rule can misread its internal punctuation, and the
//! parenthetical rule runs last because an example translation may
//! legitimately contain parentheses.

use once_cell::sync::Lazy;
use regex::Regex;

use amis_types::{DialectName, Example};

use crate::dialects::DialectTable;
use crate::term::SYNONYM_MARKER;

/// `gloss - “source”(reference)“translation”`, straight or curly quotes.
static CITED_EXAMPLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(.+?)\s*-\s*[“"]([^“”"]+)[”"]\s*\(([^)]+)\)\s*[“"]([^“”"]+)[”"]$"#)
        .expect("cited example regex")
});

/// `gloss - source：translation`.
static PLAIN_EXAMPLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s*-\s*([^：]+)：(.+)$").expect("plain example regex"));

/// `(text)suffix{tag}`, matched against the last `；` segment only.
static PAREN_DIALECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(([^)]+)\)(.+?)\s*(\{[^}]+\})$").expect("parenthetical regex"));

/// A secondary gloss scoped to specific dialects. Always rendered as its
/// own entry, never merged into the main gloss list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parenthetical {
    pub text: String,
    pub dialects: Vec<DialectName>,
}

/// Structured view of the description part of one line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DescriptionInfo {
    pub glosses: Vec<String>,
    pub example: Option<Example>,
    pub parenthetical: Option<Parenthetical>,
}

/// Decompose the description part, first matching rule wins.
pub fn parse_description_part(table: &DialectTable, description: &str) -> DescriptionInfo {
    if let Some(cap) = CITED_EXAMPLE_RE.captures(description) {
        let reference = cap[3].trim();
        let translation = cap[4].trim();
        return DescriptionInfo {
            glosses: split_glosses(cap[1].trim()),
            example: Some(Example {
                amis: cap[2].trim().to_string(),
                chinese: format!("({reference}){translation}"),
            }),
            parenthetical: None,
        };
    }

    if let Some(cap) = PLAIN_EXAMPLE_RE.captures(description) {
        return DescriptionInfo {
            glosses: split_glosses(cap[1].trim()),
            example: Some(Example {
                amis: cap[2].trim().to_string(),
                chinese: cap[3].trim().to_string(),
            }),
            parenthetical: None,
        };
    }

    let segments: Vec<&str> = description.split('；').map(str::trim).collect();
    if segments.len() > 1
        && let Some(last) = segments.last()
        && let Some(cap) = PAREN_DIALECT_RE.captures(last)
    {
        let text = cap[1].trim();
        let suffix = cap[2].trim();
        return DescriptionInfo {
            glosses: segments[..segments.len() - 1]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            example: None,
            parenthetical: Some(Parenthetical {
                text: format!("({text}){suffix}"),
                dialects: table.extract(&cap[3]),
            }),
        };
    }

    let glosses = if description.contains(SYNONYM_MARKER) {
        description.split(SYNONYM_MARKER).map(|s| s.trim().to_string()).collect()
    } else {
        segments.iter().map(|s| s.to_string()).collect()
    };
    DescriptionInfo {
        glosses,
        example: None,
        parenthetical: None,
    }
}

/// Gloss text splits on ` = ` when the line lists alternatives, else on
/// the `；` enumeration separator.
fn split_glosses(text: &str) -> Vec<String> {
    if text.contains(SYNONYM_MARKER) {
        text.split(SYNONYM_MARKER).map(|s| s.trim().to_string()).collect()
    } else {
        text.split('；').map(|s| s.trim().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DialectTable {
        DialectTable::default()
    }

    #[test]
    fn enumerated_glosses() {
        let info = parse_description_part(&table(), "松樹；松柏科；木麻黃");
        assert_eq!(info.glosses, vec!["松樹", "松柏科", "木麻黃"]);
        assert_eq!(info.example, None);
        assert_eq!(info.parenthetical, None);
    }

    #[test]
    fn alternative_glosses_split_on_equals() {
        let info = parse_description_part(&table(), "陳列 (為使乾) = 翻亂 (如 小孩子亂翻)");
        assert_eq!(info.glosses, vec!["陳列 (為使乾)", "翻亂 (如 小孩子亂翻)"]);
    }

    #[test]
    fn cited_example_with_reference() {
        let info = parse_description_part(
            &table(),
            "松樹；松柏科；木麻黃 - “Padipog ko tolatolaw i caleg a kilag”(詩；03,17)“鳥兒在香柏樹(雪松樹)裏築巢”",
        );
        assert_eq!(info.glosses, vec!["松樹", "松柏科", "木麻黃"]);
        let example = info.example.unwrap();
        assert_eq!(example.amis, "Padipog ko tolatolaw i caleg a kilag");
        assert_eq!(example.chinese, "(詩；03,17)鳥兒在香柏樹(雪松樹)裏築巢");
    }

    #[test]
    fn cited_example_accepts_straight_quotes() {
        let info = parse_description_part(
            &table(),
            r#"買 - "Mi'aca kako to fodoy"(創；12,3)"我買衣服""#,
        );
        let example = info.example.unwrap();
        assert_eq!(example.amis, "Mi'aca kako to fodoy");
        assert_eq!(example.chinese, "(創；12,3)我買衣服");
        assert_eq!(info.glosses, vec!["買"]);
    }

    #[test]
    fn plain_example_after_dash() {
        let info = parse_description_part(&table(), "賣，售 - Pa'acaay kako to titi：我賣豬肉");
        assert_eq!(info.glosses, vec!["賣，售"]);
        let example = info.example.unwrap();
        assert_eq!(example.amis, "Pa'acaay kako to titi");
        assert_eq!(example.chinese, "我賣豬肉");
    }

    #[test]
    fn trailing_parenthetical_with_dialect() {
        let info = parse_description_part(&table(), "文字；字體；筆跡；(解釋內容)補充 {Ch}");
        assert_eq!(info.glosses, vec!["文字", "字體", "筆跡"]);
        let paren = info.parenthetical.unwrap();
        assert_eq!(paren.text, "(解釋內容)補充");
        assert_eq!(paren.dialects, vec!["國語"]);
    }

    #[test]
    fn lone_parenthetical_segment_stays_a_gloss() {
        // Needs at least two segments before the trailing rule applies.
        let info = parse_description_part(&table(), "(解釋內容)補充 {Ch}");
        assert_eq!(info.parenthetical, None);
        assert_eq!(info.glosses.len(), 1);
    }

    #[test]
    fn empty_description_yields_single_blank_gloss() {
        let info = parse_description_part(&table(), "");
        assert_eq!(info.glosses, vec![""]);
    }
}
