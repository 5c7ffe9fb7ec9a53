// src/block.rs

//! The three-part view of an ignore file: lines before the managed block,
//! the managed entries, and lines after it.
//!
//! Only the managed entries are ever interpreted. Preamble and trailing lines
//! are carried around verbatim and written back in the same order.

use std::path::Path;

use crate::errors::{AutoIgnoreError, Result};

/// First line of the managed block.
pub const BLOCK_HEADER: &str = "# [BEGIN AUTO IGNORE]";
/// Last line of the managed block.
pub const BLOCK_FOOTER: &str = "# [END AUTO IGNORE]";

/// Line terminator of an ignore file, taken from its first line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Style of the first terminator in `text`; `Lf` when there is none.
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(idx) if text[..idx].ends_with('\r') => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Parsed ignore file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreFileContent {
    pub preamble: Vec<String>,
    pub managed: Vec<String>,
    pub trailing: Vec<String>,
    /// Terminator written after every line.
    pub line_ending: LineEnding,
    /// Whether the last line is terminated. Files without one keep it that way.
    pub final_newline: bool,
}

impl Default for IgnoreFileContent {
    fn default() -> Self {
        Self {
            preamble: Vec::new(),
            managed: Vec::new(),
            trailing: Vec::new(),
            line_ending: LineEnding::Lf,
            final_newline: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Section {
    Preamble,
    /// Inside the block; remembers the 1-based line of its header.
    Managed { header_line: usize },
    Trailing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Header,
    Footer,
}

fn marker_of(line: &str) -> Option<Marker> {
    match line.trim_end() {
        BLOCK_HEADER => Some(Marker::Header),
        BLOCK_FOOTER => Some(Marker::Footer),
        _ => None,
    }
}

impl IgnoreFileContent {
    /// Split `text` (the contents of the ignore file at `path`) into its
    /// three sections.
    ///
    /// A file without markers is all preamble. Unbalanced markers are
    /// rejected with [`AutoIgnoreError::MalformedBlock`]; `path` only feeds
    /// the error message.
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        let mut content = IgnoreFileContent {
            line_ending: LineEnding::detect(text),
            final_newline: text.is_empty() || text.ends_with('\n'),
            ..IgnoreFileContent::default()
        };
        let mut section = Section::Preamble;

        let malformed = |line: usize, reason: &str| AutoIgnoreError::MalformedBlock {
            path: path.to_path_buf(),
            line,
            reason: reason.to_string(),
        };

        for (idx, line) in text.lines().enumerate() {
            let lineno = idx + 1;

            match (section, marker_of(line)) {
                (Section::Preamble, Some(Marker::Header)) => {
                    section = Section::Managed { header_line: lineno };
                }
                (Section::Managed { .. }, Some(Marker::Footer)) => {
                    section = Section::Trailing;
                }
                (Section::Preamble, Some(Marker::Footer)) => {
                    return Err(malformed(lineno, "footer without a preceding header"));
                }
                (Section::Managed { header_line }, Some(Marker::Header)) => {
                    return Err(malformed(
                        lineno,
                        &format!("header nested inside the block opened at line {header_line}"),
                    ));
                }
                (Section::Trailing, Some(Marker::Header)) => {
                    return Err(malformed(lineno, "a second managed block is not supported"));
                }
                (Section::Trailing, Some(Marker::Footer)) => {
                    return Err(malformed(lineno, "footer without a preceding header"));
                }
                (Section::Preamble, None) => content.preamble.push(line.to_string()),
                (Section::Trailing, None) => content.trailing.push(line.to_string()),
                (Section::Managed { .. }, None) => {
                    let entry = line.trim_end();
                    if !entry.is_empty() {
                        content.managed.push(entry.to_string());
                    }
                }
            }
        }

        if let Section::Managed { header_line } = section {
            return Err(malformed(header_line, "header has no matching footer"));
        }

        Ok(content)
    }

    /// Render back to file text, using the loaded line ending and final
    /// newline. The block and its markers are left out entirely when there
    /// are no entries.
    pub fn render(&self) -> String {
        let mut lines: Vec<&str> = self.preamble.iter().map(String::as_str).collect();

        if !self.managed.is_empty() {
            lines.push(BLOCK_HEADER);
            lines.extend(self.managed.iter().map(String::as_str));
            lines.push(BLOCK_FOOTER);
        }

        lines.extend(self.trailing.iter().map(String::as_str));

        let eol = self.line_ending.as_str();
        let mut out = lines.join(eol);
        if self.final_newline && !lines.is_empty() {
            out.push_str(eol);
        }
        out
    }
}
