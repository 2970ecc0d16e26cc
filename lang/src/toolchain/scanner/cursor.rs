use bstr;
use bstr::ByteSlice;

use crate::toolchain::source::SourceBuffer;

use super::symbol::SymbolId;

/// The host lexing interface the scanner drives.
///
/// The host owns the source text and the lexing position; the scanner only reads ahead,
/// consumes, and records its verdict through this trait. Consumption is permanent: a decision
/// routine that advances past a character and then declines does not rewind, and the host's
/// incremental re-lexing depends on that consumption staying deterministic.
pub trait Cursor {
    /// The next unconsumed codepoint, or `'\0'` at end of input.
    fn lookahead(&self) -> char;

    fn is_eof(&self) -> bool;

    /// Consumes the current lookahead codepoint.
    fn advance(&mut self);

    /// Commits the token's end boundary at the current position. Scanning may continue past the
    /// boundary; characters consumed after the last mark are lookahead only and stay out of the
    /// committed token.
    fn mark_end(&mut self);

    /// Zero-based column of the current position.
    fn column(&self) -> i32;

    /// Records the token kind this scan resolved to. A few routines record the kind they were
    /// after even when they go on to decline, so the host can tell what failed.
    fn set_result(&mut self, symbol: SymbolId);
}

/// A [Cursor] over a [SourceBuffer].
///
/// Iterates codepoints with `bstr`, so file-backed buffers need no up-front utf-8 validation.
/// A U+FFFD from the iterator, whether substituted for an invalid sequence or present in the
/// input itself, truncates the stream: from that point the cursor reports end of input, and the
/// bytes past it never join a committed token.
///
/// Design roughly inspired by the rustc lexer Cursor.
pub struct SourceCursor<'s> {
    chars: bstr::Chars<'s>,
    string: &'s bstr::BStr,
    bytes_total: usize,
    consumed: usize,
    marked: Option<usize>,
    column: i32,
    result: Option<SymbolId>,
}

impl<'s> SourceCursor<'s> {
    pub const EOF: char = '\0';

    // The bstr::Chars iterator substitutes invalid utf-8 sequences with the placeholder
    // codepoint U+FFFD. A genuine U+FFFD in valid input is indistinguishable from the
    // substitution, so both read as end of input.
    const BAD: char = '\u{fffd}';

    pub fn new(source: &'s SourceBuffer) -> SourceCursor<'s> {
        let input = source.code();
        SourceCursor {
            chars: input.chars(),
            string: input,
            bytes_total: input.len(),
            consumed: 0,
            marked: None,
            column: 0,
            result: None,
        }
    }

    /// The substring the last scan covered: source start through the last boundary mark, or
    /// through everything consumed when no mark was made.
    pub fn token_text(&self) -> &'s str {
        let end = self.marked.unwrap_or(self.consumed);
        let (prefix, _) = self.string.split_at(end);
        // Every codepoint below |end| was checked while advancing, and advancing stops at the
        // first invalid sequence, so the prefix is valid utf-8.
        unsafe { prefix.to_str_unchecked() }
    }

    /// Total bytes consumed, including lookahead past the last boundary mark.
    pub fn consumed_bytes(&self) -> usize {
        self.consumed
    }

    pub fn result(&self) -> Option<SymbolId> {
        self.result
    }

    fn first(&self) -> Option<char> {
        self.chars.clone().next()
    }
}

impl<'s> Cursor for SourceCursor<'s> {
    fn lookahead(&self) -> char {
        match self.first() {
            None => Self::EOF,
            Some(c) if c == Self::BAD => Self::EOF,
            Some(c) => c,
        }
    }

    fn is_eof(&self) -> bool {
        match self.first() {
            None => true,
            Some(c) => c == Self::BAD,
        }
    }

    fn advance(&mut self) {
        match self.chars.next() {
            None => {}
            Some(c) if c == Self::BAD => {
                // Invalidate the iterator; |consumed| stays at the end of the valid prefix.
                self.chars = bstr::BStr::new(b"").chars();
            }
            Some(c) => {
                self.consumed = self.bytes_total - self.chars.as_bytes().len();
                if c == '\n' {
                    self.column = 0;
                } else {
                    self.column += 1;
                }
            }
        }
    }

    fn mark_end(&mut self) {
        self.marked = Some(self.consumed);
    }

    fn column(&self) -> i32 {
        self.column
    }

    fn set_result(&mut self, symbol: SymbolId) {
        self.result = Some(symbol);
    }
}
