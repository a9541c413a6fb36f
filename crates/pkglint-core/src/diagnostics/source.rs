//! Byte spans of JSON nodes in the manifest text.
//!
//! `serde_json` gives us values but not where they came from. [`SourceMap`]
//! re-scans the same text into a small position tree so a JSON path can be
//! turned back into a byte range, and [`LineIndex`] turns that range into
//! line/column positions.

use std::ops::Range;

use super::{format_json_path, PathKey, Position, Span};
use crate::error::{Error, Result};

/// Maps byte offsets in a source string to line and column positions.
///
/// Lines and columns are 0-indexed. Columns count characters, not bytes.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the start of each line. `line_starts[0]` is always 0.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Build a `LineIndex` from source text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0usize];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset to a [`Position`].
    ///
    /// Offsets past the end of `text` are clamped to its length.
    #[must_use]
    pub fn position(&self, text: &str, offset: usize) -> Position {
        let offset = offset.min(text.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next.saturating_sub(1),
        };
        let line_start = self.line_starts[line];
        let column = text
            .get(line_start..offset)
            .map_or(offset - line_start, |s| s.chars().count());
        Position {
            line,
            column,
            offset,
        }
    }
}

#[derive(Debug)]
enum NodeKind {
    Object(Vec<Member>),
    Array(Vec<Node>),
    Scalar,
}

#[derive(Debug)]
struct Member {
    key: String,
    value: Node,
}

#[derive(Debug)]
struct Node {
    range: Range<usize>,
    kind: NodeKind,
}

/// Position tree over a JSON document.
#[derive(Debug)]
pub struct SourceMap {
    text: String,
    root: Node,
    lines: LineIndex,
}

impl SourceMap {
    /// Scan `text` into a position tree.
    ///
    /// # Errors
    /// Returns [`Error::SourceScan`] if `text` is not well-formed JSON.
    pub fn parse(text: &str) -> Result<Self> {
        let mut scanner = Scanner {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        };
        scanner.skip_ws();
        let root = scanner.value()?;
        scanner.skip_ws();
        if scanner.pos != scanner.bytes.len() {
            return Err(Error::SourceScan {
                offset: scanner.pos,
            });
        }
        Ok(Self {
            text: text.to_string(),
            root,
            lines: LineIndex::new(text),
        })
    }

    /// Byte range of the value at `path`. An empty path is the whole document.
    ///
    /// When an object repeats a key, the last occurrence wins, matching what
    /// the parsed value holds.
    ///
    /// # Errors
    /// Returns [`Error::PathNotInSource`] if no node exists at `path`.
    pub fn range_of(&self, path: &[PathKey]) -> Result<Range<usize>> {
        if path.is_empty() {
            return Ok(0..self.text.len());
        }

        let mut node = &self.root;
        for key in path {
            let next = match (&node.kind, key) {
                (NodeKind::Object(members), PathKey::Key(k)) => members
                    .iter()
                    .rev()
                    .find(|m| &m.key == k)
                    .map(|m| &m.value),
                (NodeKind::Array(items), PathKey::Index(i)) => items.get(*i),
                _ => None,
            };
            node = next.ok_or_else(|| Error::PathNotInSource {
                path: format_json_path(path),
            })?;
        }
        Ok(node.range.clone())
    }

    /// Line/column span of the value at `path`.
    ///
    /// # Errors
    /// Returns [`Error::PathNotInSource`] if no node exists at `path`.
    pub fn span_of(&self, path: &[PathKey]) -> Result<Span> {
        let range = self.range_of(path)?;
        Ok(Span {
            start: self.lines.position(&self.text, range.start),
            end: self.lines.position(&self.text, range.end),
        })
    }
}

struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl Scanner<'_> {
    fn error(&self) -> Error {
        Error::SourceScan { offset: self.pos }
    }

    fn skip_ws(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.bytes.get(self.pos) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        if self.bytes.get(self.pos) == Some(&byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error())
        }
    }

    fn value(&mut self) -> Result<Node> {
        let start = self.pos;
        let kind = match self.bytes.get(self.pos) {
            Some(b'{') => NodeKind::Object(self.object()?),
            Some(b'[') => NodeKind::Array(self.array()?),
            Some(b'"') => {
                self.string()?;
                NodeKind::Scalar
            }
            Some(_) => {
                self.literal()?;
                NodeKind::Scalar
            }
            None => return Err(self.error()),
        };
        Ok(Node {
            range: start..self.pos,
            kind,
        })
    }

    fn object(&mut self) -> Result<Vec<Member>> {
        self.expect(b'{')?;
        let mut members = Vec::new();
        self.skip_ws();
        if self.bytes.get(self.pos) == Some(&b'}') {
            self.pos += 1;
            return Ok(members);
        }
        loop {
            self.skip_ws();
            let key_range = self.string()?;
            let key: String =
                serde_json::from_str(&self.text[key_range]).map_err(|_| self.error())?;
            self.skip_ws();
            self.expect(b':')?;
            self.skip_ws();
            let value = self.value()?;
            members.push(Member { key, value });
            self.skip_ws();
            match self.bytes.get(self.pos) {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(members);
                }
                _ => return Err(self.error()),
            }
        }
    }

    fn array(&mut self) -> Result<Vec<Node>> {
        self.expect(b'[')?;
        let mut items = Vec::new();
        self.skip_ws();
        if self.bytes.get(self.pos) == Some(&b']') {
            self.pos += 1;
            return Ok(items);
        }
        loop {
            self.skip_ws();
            items.push(self.value()?);
            self.skip_ws();
            match self.bytes.get(self.pos) {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    return Ok(items);
                }
                _ => return Err(self.error()),
            }
        }
    }

    /// Scan a string literal, returning its range including the quotes.
    fn string(&mut self) -> Result<Range<usize>> {
        let start = self.pos;
        self.expect(b'"')?;
        loop {
            match self.bytes.get(self.pos) {
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(start..self.pos);
                }
                // Escapes are decoded later; only skip the escaped byte here
                Some(b'\\') => self.pos += 2,
                Some(_) => self.pos += 1,
                None => return Err(self.error()),
            }
        }
    }

    /// Scan a number, `true`, `false` or `null`.
    fn literal(&mut self) -> Result<()> {
        let start = self.pos;
        while let Some(b) = self.bytes.get(self.pos) {
            if matches!(b, b',' | b'}' | b']' | b' ' | b'\t' | b'\n' | b'\r') {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error());
        }
        serde_json::from_str::<serde_json::Value>(&self.text[start..self.pos])
            .map(|_| ())
            .map_err(|_| Error::SourceScan { offset: start })
    }
}
