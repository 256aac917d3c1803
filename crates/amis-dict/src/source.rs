//! Line source for the raw dictionary file.
//!
//! The file is loaded either memory-mapped (fast, zero-copy) or into an
//! owned buffer (portable fallback); callers choose at runtime via
//! [`LoadMode`]. Lines borrow from the backing bytes; a line that is not
//! valid UTF-8 is surfaced per line so the rest of the file still parses.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::Utf8Error;

use anyhow::{Context, Result};
use memmap2::Mmap;

/// Strategy for loading the dictionary file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map the file.
    Mmap,
    /// Read the file into an owned buffer.
    Owned,
}

#[derive(Debug)]
enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

/// One dictionary file, ready to iterate line by line.
#[derive(Debug)]
pub struct LineSource {
    buf: Buffer,
}

impl LineSource {
    pub fn load(path: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let path = path.as_ref();
        let buf = match mode {
            LoadMode::Mmap => {
                let file =
                    File::open(path).with_context(|| format!("open {}", path.display()))?;
                unsafe { Mmap::map(&file) }
                    .map(Buffer::Mmap)
                    .with_context(|| format!("mmap {}", path.display()))?
            }
            LoadMode::Owned => {
                let mut file =
                    File::open(path).with_context(|| format!("open {}", path.display()))?;
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes)
                    .with_context(|| format!("read {}", path.display()))?;
                Buffer::Owned(bytes)
            }
        };
        Ok(Self { buf })
    }

    /// Iterate `\n`-separated lines with trailing `\r` stripped. A final
    /// newline does not produce a phantom empty line.
    pub fn lines(&self) -> impl Iterator<Item = Result<&str, Utf8Error>> {
        let bytes = self.buf.as_slice();
        let mut raw_lines: Vec<&[u8]> = bytes.split(|b| *b == b'\n').collect();
        if matches!(raw_lines.last(), Some(last) if last.is_empty()) {
            raw_lines.pop();
        }
        raw_lines
            .into_iter()
            .map(|line| std::str::from_utf8(strip_cr(line)))
    }
}

fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Parse a `--mode=` value.
pub fn parse_load_mode(raw: &str) -> Option<LoadMode> {
    match raw.to_ascii_lowercase().as_str() {
        "mmap" => Some(LoadMode::Mmap),
        "owned" => Some(LoadMode::Owned),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(content: &[u8]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dict.txt"), content).unwrap();
        dir
    }

    #[test]
    fn modes_agree_on_line_sequence() {
        let dir = fixture("kolong {S}：水牛\n'aca - pa'aca：賣\n".as_bytes());
        let path = dir.path().join("dict.txt");

        let collect = |mode| {
            let source = LineSource::load(&path, mode).unwrap();
            source
                .lines()
                .map(|l| l.unwrap().to_string())
                .collect::<Vec<_>>()
        };
        let mmap_lines = collect(LoadMode::Mmap);
        let owned_lines = collect(LoadMode::Owned);
        assert_eq!(mmap_lines, owned_lines);
        assert_eq!(mmap_lines, vec!["kolong {S}：水牛", "'aca - pa'aca：賣"]);
    }

    #[test]
    fn crlf_lines_come_back_clean() {
        let dir = fixture(b"a\r\nb\r\n");
        let source = LineSource::load(dir.path().join("dict.txt"), LoadMode::Owned).unwrap();
        let lines: Vec<&str> = source.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn invalid_utf8_only_poisons_its_own_line() {
        let dir = fixture(b"ok\n\xff\xfe\nalso ok\n");
        let source = LineSource::load(dir.path().join("dict.txt"), LoadMode::Owned).unwrap();
        let lines: Vec<_> = source.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].is_ok());
        assert!(lines[1].is_err());
        assert_eq!(lines[2], Ok("also ok"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = LineSource::load("/no/such/dict.txt", LoadMode::Mmap).unwrap_err();
        assert!(format!("{err:#}").contains("/no/such/dict.txt"));
    }

    #[test]
    fn mode_parsing() {
        assert_eq!(parse_load_mode("mmap"), Some(LoadMode::Mmap));
        assert_eq!(parse_load_mode("OWNED"), Some(LoadMode::Owned));
        assert_eq!(parse_load_mode("other"), None);
    }
}
