//! Output formatting for search hits and tree statistics

use crate::tree::TreeStats;
use memchr::{memchr, memchr_iter, memrchr};
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// A located occurrence of one pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Pattern as given on the command line
    pub pattern: String,
    /// Byte offset of the occurrence in the text
    pub offset: usize,
    /// 1-based line number of the occurrence
    pub line_number: usize,
    /// 1-based byte column of the occurrence within its line
    pub column: usize,
    /// The line containing the start of the occurrence (lossy UTF-8)
    pub line_content: String,
    /// Match range within `line_content`, clipped to the line
    pub match_start: usize,
    pub match_end: usize,
}

impl SearchHit {
    /// Locate a `len`-byte occurrence at `offset` in `text`
    pub fn locate(text: &[u8], pattern: &str, offset: usize, len: usize) -> Self {
        let line_start = memrchr(b'\n', &text[..offset]).map_or(0, |i| i + 1);
        let line_end = memchr(b'\n', &text[offset..]).map_or(text.len(), |i| offset + i);
        let line_number = memchr_iter(b'\n', &text[..line_start]).count() + 1;

        let line = &text[line_start..line_end];
        let line_content = String::from_utf8_lossy(line).trim_end_matches('\r').to_string();

        // Lossy decoding can change byte lengths, so only trust the offsets
        // when the line was valid UTF-8
        let (match_start, match_end) = if std::str::from_utf8(line).is_ok() {
            let start = (offset - line_start).min(line_content.len());
            let end = (offset + len - line_start).min(line_content.len());
            (start, end)
        } else {
            (0, 0)
        };

        Self {
            pattern: pattern.to_string(),
            offset,
            line_number,
            column: offset - line_start + 1,
            line_content,
            match_start,
            match_end,
        }
    }
}

/// Print hits in ripgrep style: `source:line:column:offset:content`
pub fn print_hits<W: WriteColor>(out: &mut W, source: &str, hits: &[SearchHit]) -> io::Result<()> {
    for hit in hits {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "{}", source)?;
        out.reset()?;
        write!(out, ":")?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{}", hit.line_number)?;
        out.reset()?;
        write!(out, ":{}:{}:", hit.column, hit.offset)?;

        let content = &hit.line_content;
        if hit.match_start > 0 {
            write!(out, "{}", &content[..hit.match_start])?;
        }

        // The match itself (highlighted)
        if hit.match_end > hit.match_start {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(out, "{}", &content[hit.match_start..hit.match_end])?;
            out.reset()?;
        }

        if hit.match_end < content.len() {
            write!(out, "{}", &content[hit.match_end..])?;
        }

        writeln!(out)?;
    }

    Ok(())
}

/// Print tree statistics as aligned text
pub fn print_stats<W: Write>(out: &mut W, source: &str, stats: &TreeStats) -> io::Result<()> {
    writeln!(out, "Suffix Tree Statistics")?;
    writeln!(out, "======================")?;
    writeln!(out)?;
    writeln!(out, "Source:           {}", source)?;
    writeln!(out, "Text size:        {}", format_size(stats.text_len as u64))?;
    writeln!(out, "Nodes:            {}", stats.node_count)?;
    writeln!(out, "Leaves:           {}", stats.leaf_count)?;
    writeln!(out, "Max depth:        {}", stats.max_depth)?;
    writeln!(out, "Longest path:     {} bytes", stats.max_path_len)?;
    Ok(())
}

/// Human-readable byte size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
