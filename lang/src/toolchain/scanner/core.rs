use super::cursor::Cursor;
use super::symbol::{CoreSymbol, SymbolId, SymbolSet};

/// Upper bound on the length of an embedded SQL marker, in codepoints.
pub const MARKER_CAPACITY: usize = 30;

/// Exact size in bytes of a serialized [CoreScanner]: the marker codepoints as little-endian
/// u32 values followed by one length byte.
pub const CORE_SERIALIZED_LEN: usize = MARKER_CAPACITY * 4 + 1;

const_assert_eq!(CORE_SERIALIZED_LEN, 121);

/// Scanner state for the core ObjectScript grammar.
///
/// The scanner itself is stateless between calls with one exception: a successful
/// [CoreSymbol::EmbeddedSqlMarker] scan records the marker's codepoints here so a later
/// [CoreSymbol::EmbeddedSqlReverseMarker] scan can match the mirrored closer. The buffer is a
/// fixed-size array so the state serializes into a fixed byte region; overflowing it fails the
/// current scan but leaves the state well-defined for the next one.
pub struct CoreScanner {
    marker_buffer: [char; MARKER_CAPACITY],
    marker_len: u8,
}

impl CoreScanner {
    pub fn new() -> CoreScanner {
        CoreScanner { marker_buffer: ['\0'; MARKER_CAPACITY], marker_len: 0 }
    }

    /// Runs one scan over |cursor|, restricted to the symbols in |valid|.
    ///
    /// Returns true after committing a token, recording its kind with
    /// [Cursor::set_result]. Returns false to decline, leaving the host to match the position
    /// with its own rules. Characters consumed while deciding stay consumed either way.
    pub fn scan(&mut self, cursor: &mut impl Cursor, valid: &SymbolSet) -> bool {
        // The host marks every terminal valid while recovering from an error. The sentinel is
        // never valid in a clean parse, so seeing it means recovery is in progress and the
        // scanner must stay out of the host's way. Checked before everything else.
        if valid.contains(CoreSymbol::Sentinel) {
            return false;
        }

        if valid.contains(CoreSymbol::SingleSpaceBeforeArgument)
            || valid.contains(CoreSymbol::ArgumentlessCommandEnd)
            || valid.contains(CoreSymbol::WhitespaceBeforeBlock)
        {
            return self.command_spacing(cursor, valid);
        }

        if valid.contains(CoreSymbol::NoSpaceBetweenRules) {
            // Zero-width assertion that the neighboring productions touch.
            if !cursor.lookahead().is_whitespace() {
                cursor.set_result(CoreSymbol::NoSpaceBetweenRules.id());
                return true;
            }
            return false;
        }

        if cursor.column() == 0 && valid.contains(CoreSymbol::Tag) {
            if cursor.lookahead().is_alphanumeric() || cursor.lookahead() == '%' {
                while cursor.lookahead().is_alphanumeric() || cursor.lookahead() == '%' {
                    cursor.advance();
                }
                cursor.set_result(CoreSymbol::Tag.id());
                return true;
            }
            // Declining here is fine: the host lexes a literal newline at column zero itself.
            return false;
        }

        if valid.contains(CoreSymbol::AngleFencedText) {
            return lex_fenced_text(cursor, CoreSymbol::AngleFencedText.id(), '<', '>');
        }

        if valid.contains(CoreSymbol::ParenFencedText) {
            return lex_fenced_text(cursor, CoreSymbol::ParenFencedText.id(), '(', ')');
        }

        if valid.contains(CoreSymbol::EmbeddedSqlMarker) {
            return self.embedded_sql_marker(cursor);
        }

        if valid.contains(CoreSymbol::EmbeddedSqlReverseMarker) {
            return self.embedded_sql_reverse_marker(cursor);
        }

        if valid.contains(CoreSymbol::LineCommentInner) {
            cursor.set_result(CoreSymbol::LineCommentInner.id());
            loop {
                if cursor.is_eof() {
                    return true;
                }
                if cursor.lookahead() == '\n' {
                    // Leave the newline to the grammar; consuming it here would glue the next
                    // line onto the comment.
                    return true;
                }
                cursor.advance();
            }
        }

        if valid.contains(CoreSymbol::BlockCommentInner) {
            return block_comment_inner(cursor);
        }

        if valid.contains(CoreSymbol::MacroLineWithContinue) {
            return macro_line_with_continue(cursor);
        }

        if valid.contains(CoreSymbol::Whitespace) {
            eat_whitespace(cursor);
            cursor.set_result(CoreSymbol::Whitespace.id());
            return true;
        }

        false
    }

    /// Disambiguates the whitespace after a command that has both argumentful and argumentless
    /// forms, QUIT or RETURN for example, or IF and FOR which may instead be followed by a
    /// `{ }` block.
    ///
    /// The argumentful form needs exactly one space followed by something that is not a
    /// terminator. The argumentless form needs the command end to come right away: a second
    /// space, the end of the line, a closing brace, or a comment opener. The block form allows
    /// unlimited whitespace, newlines included, before the block's `{`. All three possibilities
    /// have to be considered at once while scanning, so the terminator patterns are matched in
    /// parallel, eliminating candidates one input character at a time.
    fn command_spacing(&self, cursor: &mut impl Cursor, valid: &SymbolSet) -> bool {
        // Completing any of these after the single space means the command was argumentless.
        const TERMINATIONS: [&str; 8] = [
            " ",  // a second space
            "\n", // newline
            "\t", // tab
            ";",  // semicolon comment
            "}",  // closing brace
            "//", // line comment
            "/*", // block comment start
            "#;", // macro preprocessor comment
        ];

        if cursor.lookahead() == ' ' {
            cursor.advance();
            // Lock the token boundary right after the space; everything past it is lookahead.
            cursor.mark_end();

            let mut active = [true; TERMINATIONS.len()];
            let mut active_count = TERMINATIONS.len();
            let mut char_pos = 0;

            'scan: while active_count > 0 && !cursor.is_eof() {
                let current = cursor.lookahead();

                for i in 0..TERMINATIONS.len() {
                    if !active[i] {
                        continue;
                    }
                    let candidate = TERMINATIONS[i];

                    match candidate.chars().nth(char_pos) {
                        Some(expected) if expected == current => {
                            if candidate.chars().nth(char_pos + 1).is_some() {
                                // Matched, but this candidate has more characters to check.
                                continue;
                            }
                            // A terminator completed: argumentless wins outright if requested.
                            if valid.contains(CoreSymbol::ArgumentlessCommandEnd) {
                                cursor.set_result(CoreSymbol::ArgumentlessCommandEnd.id());
                                return true;
                            }
                            // A completed whitespace terminator may instead be the start of the
                            // run leading to a block. Keep consuming and check below.
                            if valid.contains(CoreSymbol::WhitespaceBeforeBlock)
                                && current.is_whitespace()
                            {
                                break;
                            }
                            // Terminated, but nobody asked for a form this terminator produces.
                            return false;
                        }
                        _ => {
                            // Elimination is monotonic; a candidate never comes back.
                            active[i] = false;
                            active_count -= 1;
                        }
                    }
                }

                if active_count == 0 {
                    break 'scan;
                }

                cursor.advance();
                char_pos += 1;
            }

            // Either every candidate was eliminated or a whitespace terminator broke out above.
            if !cursor.is_eof() {
                if valid.contains(CoreSymbol::WhitespaceBeforeBlock)
                    && cursor.lookahead().is_whitespace()
                {
                    while !cursor.is_eof() && cursor.lookahead().is_whitespace() {
                        cursor.advance();
                    }
                    if cursor.lookahead() == '{' {
                        cursor.set_result(CoreSymbol::WhitespaceBeforeBlock.id());
                        return true;
                    }
                } else if valid.contains(CoreSymbol::SingleSpaceBeforeArgument) {
                    // One space followed by a non-terminating character: argumentful.
                    cursor.set_result(CoreSymbol::SingleSpaceBeforeArgument.id());
                    return true;
                }
            }
        } else if matches!(cursor.lookahead(), '\n' | '\t' | '}') {
            // No space at all still ends an argumentless command when the line or block does.
            if valid.contains(CoreSymbol::ArgumentlessCommandEnd) {
                cursor.set_result(CoreSymbol::ArgumentlessCommandEnd.id());
                return true;
            }
        }

        false
    }

    /// Collects a user-chosen embedded SQL marker into the marker buffer, stopping at the `(`
    /// that introduces the quoted region.
    fn embedded_sql_marker(&mut self, cursor: &mut impl Cursor) -> bool {
        // Wipe whatever a previous region left behind.
        self.marker_len = 0;

        while !cursor.is_eof() {
            let c = cursor.lookahead();

            if c == '(' {
                // A marker can be zero width, and that is load-bearing: making it non-zero
                // width and optional would leave no way to report a region whose opener was
                // fine but whose closer never matched.
                cursor.set_result(CoreSymbol::EmbeddedSqlMarker.id());
                return true;
            }

            // A marker may not contain `+ - / \ * )` or whitespace. Record the kind we were
            // scanning for anyway, so the host can tell what the bad input was meant to be.
            if matches!(c, '+' | '-' | '/' | '\\' | '*' | ')') || c.is_whitespace() {
                cursor.set_result(CoreSymbol::EmbeddedSqlMarker.id());
                return false;
            }

            // Overflow fails this scan the same way; the buffer keeps what fit.
            if self.marker_len as usize == MARKER_CAPACITY {
                cursor.set_result(CoreSymbol::EmbeddedSqlMarker.id());
                return false;
            }

            self.marker_buffer[self.marker_len as usize] = c;
            self.marker_len += 1;
            cursor.advance();
        }

        false
    }

    /// Matches the closing marker of an embedded SQL region: the character-reverse of the
    /// recorded opening marker, not a literal repeat of it. The buffer drains as a stack, one
    /// codepoint per input character; any mismatch aborts without committing.
    fn embedded_sql_reverse_marker(&mut self, cursor: &mut impl Cursor) -> bool {
        while self.marker_len > 0 {
            if self.marker_buffer[self.marker_len as usize - 1] != cursor.lookahead() {
                return false;
            }
            cursor.advance();
            self.marker_len -= 1;
        }
        cursor.set_result(CoreSymbol::EmbeddedSqlReverseMarker.id());
        true
    }

    /// Writes the serialized state image into |buffer|, which must hold at least
    /// [CORE_SERIALIZED_LEN] bytes. Returns the number of bytes written.
    pub fn serialize(&self, buffer: &mut [u8]) -> usize {
        assert!(buffer.len() >= CORE_SERIALIZED_LEN);
        for (i, c) in self.marker_buffer.iter().enumerate() {
            buffer[i * 4..i * 4 + 4].copy_from_slice(&(*c as u32).to_le_bytes());
        }
        buffer[CORE_SERIALIZED_LEN - 1] = self.marker_len;
        CORE_SERIALIZED_LEN
    }

    /// Overwrites the state from a serialized image. Length-driven: a shorter image from an
    /// older layout restores the fields it covers and zeroes the rest. Malformed bytes decode
    /// to a well-defined state rather than failing.
    pub fn deserialize(&mut self, buffer: &[u8]) {
        *self = CoreScanner::new();

        let count = (buffer.len() / 4).min(MARKER_CAPACITY);
        for i in 0..count {
            let raw = u32::from_le_bytes([
                buffer[i * 4],
                buffer[i * 4 + 1],
                buffer[i * 4 + 2],
                buffer[i * 4 + 3],
            ]);
            self.marker_buffer[i] = char::from_u32(raw).unwrap_or('\0');
        }
        if buffer.len() >= CORE_SERIALIZED_LEN {
            self.marker_len = buffer[CORE_SERIALIZED_LEN - 1].min(MARKER_CAPACITY as u8);
        }
    }
}

impl Default for CoreScanner {
    fn default() -> CoreScanner {
        CoreScanner::new()
    }
}

/// Consumes text balanced between |left| and |right|, committing |symbol| on the way out.
///
/// The grammar has already consumed the opening delimiter, so the depth starts at one. The
/// committed span runs up to and excluding the matching closer, which stays unconsumed for the
/// grammar. Running out of input before the fences balance declines.
///
/// Shared with the UDL scanner, which instantiates it for `{ }` method bodies.
pub(crate) fn lex_fenced_text(
    cursor: &mut impl Cursor,
    symbol: SymbolId,
    left: char,
    right: char,
) -> bool {
    let mut depth = 1;
    while !cursor.is_eof() {
        if cursor.lookahead() == right {
            depth -= 1;
        } else if cursor.lookahead() == left {
            depth += 1;
        }
        if depth == 0 {
            cursor.set_result(symbol);
            return true;
        }
        cursor.advance();
    }
    false
}

/// Scans block comment content, committing just before the closing `*/`.
///
/// The boundary is tentative: it trails every accepted character, and a `*` holds it back one
/// step while the next character is checked for `/`. A lone `*` is a false alarm and folds back
/// into the content on the following iteration. Input exhaustion without a closer declines.
fn block_comment_inner(cursor: &mut impl Cursor) -> bool {
    while !cursor.is_eof() {
        if cursor.lookahead() == '*' {
            cursor.mark_end();
            cursor.advance();
            if cursor.lookahead() == '/' {
                cursor.set_result(CoreSymbol::BlockCommentInner.id());
                return true;
            }
        } else {
            cursor.advance();
            cursor.mark_end();
        }
    }
    false
}

/// Looks for a case-insensitive `##continue` anywhere on the current line, after mandatory
/// leading whitespace. Commits a token ending right where the keyword starts.
fn macro_line_with_continue(cursor: &mut impl Cursor) -> bool {
    const PATTERN: &[u8] = b"##continue";

    let mut pos = 0;

    if !cursor.is_eof() && !cursor.lookahead().is_whitespace() {
        return false;
    }

    while !cursor.is_eof() && cursor.lookahead() != '\n' {
        let ch = cursor.lookahead().to_ascii_lowercase();

        if pos < PATTERN.len() && ch == PATTERN[pos] as char {
            if pos == 0 {
                // First character of a match attempt: the token ends here, just before the
                // keyword, however far the scan continues.
                cursor.mark_end();
            }
            pos += 1;
            if pos == PATTERN.len() {
                cursor.advance();
                cursor.set_result(CoreSymbol::MacroLineWithContinue.id());
                return true;
            }
        } else if ch == PATTERN[0] as char {
            // Mismatch, but this character alone can restart the pattern.
            pos = 1;
            cursor.mark_end();
        } else {
            pos = 0;
        }

        cursor.advance();
    }

    // The line ended without a completed keyword.
    false
}

fn eat_whitespace(cursor: &mut impl Cursor) {
    while cursor.lookahead().is_whitespace() {
        cursor.advance();
    }
}
