//! Line and column arithmetic between Rust strings and LSP positions.
//!
//! LSP columns count UTF-16 code units; Rust slices count bytes.

use lsp_types::Position;

/// Split on `\n`, dropping a trailing `\r` from each line.
///
/// Unlike `str::lines`, a trailing newline yields a final empty line, so the
/// caret can sit on it.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Length of `s` in UTF-16 code units.
pub fn utf16_len(s: &str) -> u32 {
    s.chars().map(|c| c.len_utf16() as u32).sum()
}

/// Byte offset within `line` of a UTF-16 column, clamped to the line end.
pub fn byte_col(line: &str, utf16_col: u32) -> usize {
    let mut units = 0u32;
    for (i, ch) in line.char_indices() {
        if units >= utf16_col {
            return i;
        }
        units += ch.len_utf16() as u32;
    }
    line.len()
}

/// Text of line `pos.line` from column 0 up to the caret.
///
/// `None` when the line does not exist.
pub fn line_prefix(content: &str, pos: Position) -> Option<&str> {
    let line = lines(content).nth(pos.line as usize)?;
    Some(&line[..byte_col(line, pos.character)])
}

/// Byte offset of `pos` in `text`, clamped to the document bounds.
pub fn position_to_offset(text: &str, pos: Position) -> usize {
    let mut line_start = 0usize;
    for _ in 0..pos.line {
        match text[line_start..].find('\n') {
            Some(i) => line_start += i + 1,
            None => return text.len(),
        }
    }
    let line_end = text[line_start..]
        .find('\n')
        .map_or(text.len(), |i| line_start + i);
    let line = &text[line_start..line_end];
    let line = line.strip_suffix('\r').unwrap_or(line);
    line_start + byte_col(line, pos.character)
}
