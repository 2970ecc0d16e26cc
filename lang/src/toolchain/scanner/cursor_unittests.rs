#[cfg(test)]
mod tests {
    use crate::oscript;
    use crate::toolchain::scanner::cursor::{Cursor, SourceCursor};
    use crate::toolchain::source;

    #[test]
    fn lookahead_and_advance_track_columns() {
        let source = oscript!("ab\ncd");
        let mut cursor = SourceCursor::new(source);

        assert_eq!(cursor.lookahead(), 'a');
        assert_eq!(cursor.column(), 0);
        cursor.advance();
        assert_eq!(cursor.lookahead(), 'b');
        assert_eq!(cursor.column(), 1);
        cursor.advance();
        assert_eq!(cursor.lookahead(), '\n');
        cursor.advance();
        // A newline puts the next character back in column zero.
        assert_eq!(cursor.lookahead(), 'c');
        assert_eq!(cursor.column(), 0);
        cursor.advance();
        assert_eq!(cursor.column(), 1);
    }

    #[test]
    fn empty_input_is_end_of_input() {
        let source = oscript!("");
        let mut cursor = SourceCursor::new(source);
        assert!(cursor.is_eof());
        assert_eq!(cursor.lookahead(), SourceCursor::EOF);
        // Advancing at the end is a no-op, not a failure.
        cursor.advance();
        assert_eq!(cursor.consumed_bytes(), 0);
    }

    #[test]
    fn token_text_covers_consumed_input_without_a_mark() {
        let source = oscript!("hello");
        let mut cursor = SourceCursor::new(source);
        cursor.advance();
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.token_text(), "hel");
        assert_eq!(cursor.consumed_bytes(), 3);
    }

    #[test]
    fn mark_end_pins_the_token_while_lookahead_continues() {
        let source = oscript!("hello");
        let mut cursor = SourceCursor::new(source);
        cursor.advance();
        cursor.advance();
        cursor.mark_end();
        cursor.advance();
        cursor.advance();
        // Everything past the mark was lookahead only.
        assert_eq!(cursor.token_text(), "he");
        assert_eq!(cursor.consumed_bytes(), 4);
    }

    #[test]
    fn a_later_mark_extends_the_boundary() {
        let source = oscript!("hello");
        let mut cursor = SourceCursor::new(source);
        cursor.advance();
        cursor.mark_end();
        cursor.advance();
        cursor.advance();
        cursor.mark_end();
        assert_eq!(cursor.token_text(), "hel");
    }

    #[test]
    fn multibyte_codepoints_consume_their_full_width() {
        let source = oscript!("é∂x");
        let mut cursor = SourceCursor::new(source);
        assert_eq!(cursor.lookahead(), 'é');
        cursor.advance();
        assert_eq!(cursor.consumed_bytes(), 2);
        assert_eq!(cursor.lookahead(), '∂');
        cursor.advance();
        assert_eq!(cursor.consumed_bytes(), 5);
        assert_eq!(cursor.token_text(), "é∂");
    }

    #[test]
    fn invalid_utf8_truncates_the_stream() {
        // Invalid bytes can only arrive through unvalidated file mappings; build the same shape
        // by hand here. The bytes are assembled at runtime so no invalid literal ever exists.
        let mut bytes = b"ab".to_vec();
        bytes.push(0xFF);
        bytes.extend_from_slice(b"cd");
        let string = unsafe { std::str::from_utf8_unchecked(&bytes) };
        let buffer = source::SourceBuffer::new_from_string(string, "cursor_unittests").unwrap();
        let mut cursor = SourceCursor::new(&buffer);

        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.consumed_bytes(), 2);
        // The invalid sequence reads as end of input; nothing after it joins a token.
        assert!(cursor.is_eof());
        assert_eq!(cursor.lookahead(), SourceCursor::EOF);
        cursor.advance();
        assert!(cursor.is_eof());
        assert_eq!(cursor.consumed_bytes(), 2);
        assert_eq!(cursor.token_text(), "ab");
    }

    #[test]
    fn replacement_character_in_valid_input_also_truncates() {
        // A real U+FFFD cannot be told apart from the substitution for an invalid sequence, so
        // it ends the stream the same way.
        let source = oscript!("ab\u{fffd}cd");
        let mut cursor = SourceCursor::new(source);
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_eof());
        assert_eq!(cursor.consumed_bytes(), 2);
        assert_eq!(cursor.token_text(), "ab");
    }

    #[test]
    fn result_symbol_is_recorded() {
        let source = oscript!("x");
        let mut cursor = SourceCursor::new(source);
        assert_eq!(cursor.result(), None);
        cursor.set_result(5);
        assert_eq!(cursor.result(), Some(5));
    }
}
