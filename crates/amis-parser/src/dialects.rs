//! Dialect code table and brace-tag handling.
//!
//! Terms and glosses in the source carry tags like `{Ch}` or `{S}{Tw}`,
//! short codes naming the dialect or source language a form belongs to.
//! The table maps codes to display names; unknown codes are dropped, not
//! errors, since the source material is hand-typed and inconsistent.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use amis_types::DialectName;

/// `{code}` groups, possibly several in a row.
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^}]+)\}").expect("tag regex"));

/// A tag together with any whitespace that set it off from the term text.
static STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\{[^}]+\}").expect("strip regex"));

/// Read-only mapping from short dialect codes to display names.
///
/// Supplied to the parser at construction; the built-in [`Default`]
/// table covers the codes observed in the source material.
#[derive(Clone, Debug)]
pub struct DialectTable {
    codes: HashMap<String, String>,
}

impl DialectTable {
    /// Build a table from `(code, display name)` pairs.
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let codes = pairs
            .into_iter()
            .map(|(code, name)| (code.into(), name.into()))
            .collect();
        Self { codes }
    }

    /// Display name for a short code, if known.
    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.codes.get(code).map(String::as_str)
    }

    /// All dialect names found in the `{…}` tags of `text`, in order.
    /// Unknown codes are skipped.
    pub fn extract(&self, text: &str) -> Vec<DialectName> {
        TAG_RE
            .captures_iter(text)
            .filter_map(|cap| {
                let code = &cap[1];
                let name = self.lookup(code);
                if name.is_none() {
                    debug!(code, "dropping unknown dialect code");
                }
                name.map(str::to_string)
            })
            .collect()
    }

    /// `text` with every brace tag (and its leading whitespace) removed.
    pub fn strip_tags(text: &str) -> String {
        STRIP_RE.replace_all(text, "").trim().to_string()
    }

    /// Split `text` into its clean term and its dialect names.
    ///
    /// Returns `None` for the term when nothing but tags remained — the
    /// caller keeps the slot so synonym-group indices stay aligned, but
    /// such a placeholder must never become an entry.
    pub fn split_tagged(&self, text: &str) -> (Option<String>, Vec<DialectName>) {
        let dialects = self.extract(text);
        let clean = Self::strip_tags(text);
        if clean.is_empty() {
            (None, dialects)
        } else {
            (Some(clean), dialects)
        }
    }
}

impl Default for DialectTable {
    fn default() -> Self {
        Self::from_pairs([
            ("Ch", "國語"),
            ("S", "南方話"),
            ("F", "鳳林話"),
            ("T", "富田語"),
            ("J", "日語"),
            ("Tw", "閩南語"),
            ("N", "北方話"),
            ("Z", "撒奇萊雅語"),
            ("豐濱", "豐濱"),
            ("英語", "英語"),
            ("玉里", "玉里"),
            ("Tingalaw", "豐濱豐富部落"),
            ("希伯來語", "希伯來語"),
            ("光復鄉", "光復鄉"),
            ("希臘文", "希臘文"),
        ])
    }
}
