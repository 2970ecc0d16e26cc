#[cfg(test)]
mod tests {
    use crate::toolchain::scanner::core::CORE_SERIALIZED_LEN;
    use crate::toolchain::scanner::cursor::SourceCursor;
    use crate::toolchain::scanner::symbol::{CoreSymbol, SymbolSet, CORE_SYMBOL_COUNT};
    use crate::toolchain::scanner::udl::{UdlScanner, UdlSymbol, UDL_SERIALIZED_LEN};
    use crate::toolchain::source::SourceBuffer;

    #[test]
    fn symbol_numbering_continues_where_core_stops() {
        assert_eq!(UdlSymbol::MethodBodyContent.id(), CORE_SYMBOL_COUNT);
        assert_eq!(UdlSymbol::MethodBodyContent.id(), CoreSymbol::Sentinel.id() + 1);
        assert_eq!(UDL_SERIALIZED_LEN, CORE_SERIALIZED_LEN + 1);
    }

    #[test]
    fn method_body_balances_nested_braces() {
        let source = SourceBuffer::new_from_string("a{b}c}rest", "udl_unittests").unwrap();
        let mut cursor = SourceCursor::new(&source);
        let mut scanner = UdlScanner::new();
        let valid = SymbolSet::new().with(UdlSymbol::MethodBodyContent);
        assert!(scanner.scan(&mut cursor, &valid));
        assert_eq!(cursor.result(), Some(UdlSymbol::MethodBodyContent.id()));
        // The span stops just before the brace that balances the body's opener.
        assert_eq!(cursor.token_text(), "a{b}c");
    }

    #[test]
    fn unbalanced_method_body_declines() {
        let source = SourceBuffer::new_from_string("{{}", "udl_unittests").unwrap();
        let mut cursor = SourceCursor::new(&source);
        let mut scanner = UdlScanner::new();
        let valid = SymbolSet::new().with(UdlSymbol::MethodBodyContent);
        assert!(!scanner.scan(&mut cursor, &valid));
    }

    #[test]
    fn method_body_outranks_delegated_decisions() {
        let source = SourceBuffer::new_from_string(" }", "udl_unittests").unwrap();
        let mut cursor = SourceCursor::new(&source);
        let mut scanner = UdlScanner::new();
        let valid =
            SymbolSet::new().with(UdlSymbol::MethodBodyContent).with(CoreSymbol::Whitespace);
        assert!(scanner.scan(&mut cursor, &valid));
        assert_eq!(cursor.result(), Some(UdlSymbol::MethodBodyContent.id()));
        assert_eq!(cursor.token_text(), " ");
    }

    #[test]
    fn sentinel_guard_applies_before_the_method_body() {
        let source = SourceBuffer::new_from_string("x}", "udl_unittests").unwrap();
        let mut cursor = SourceCursor::new(&source);
        let mut scanner = UdlScanner::new();
        let valid =
            SymbolSet::new().with(CoreSymbol::Sentinel).with(UdlSymbol::MethodBodyContent);
        assert!(!scanner.scan(&mut cursor, &valid));
        assert_eq!(cursor.consumed_bytes(), 0);
    }

    #[test]
    fn everything_else_delegates_to_the_core_scanner() {
        let source = SourceBuffer::new_from_string("Label\n", "udl_unittests").unwrap();
        let mut cursor = SourceCursor::new(&source);
        let mut scanner = UdlScanner::new();
        let valid = SymbolSet::new().with(CoreSymbol::Tag);
        assert!(scanner.scan(&mut cursor, &valid));
        assert_eq!(cursor.result(), Some(CoreSymbol::Tag.id()));
        assert_eq!(cursor.token_text(), "Label");
    }

    #[test]
    fn serialize_carries_the_embedded_core_state() {
        let mut scanner = UdlScanner::new();

        // Record a marker through the delegation path.
        let opener = SourceBuffer::new_from_string("AB(", "udl_unittests").unwrap();
        let mut cursor = SourceCursor::new(&opener);
        assert!(scanner.scan(&mut cursor, &SymbolSet::new().with(CoreSymbol::EmbeddedSqlMarker)));

        let mut image = [0u8; UDL_SERIALIZED_LEN];
        assert_eq!(scanner.serialize(&mut image), UDL_SERIALIZED_LEN);

        let mut restored = UdlScanner::new();
        restored.deserialize(&image);
        let mut check = [0u8; UDL_SERIALIZED_LEN];
        restored.serialize(&mut check);
        assert_eq!(image, check);

        let closer = SourceBuffer::new_from_string("BA", "udl_unittests").unwrap();
        let mut closer_cursor = SourceCursor::new(&closer);
        let reverse = SymbolSet::new().with(CoreSymbol::EmbeddedSqlReverseMarker);
        assert!(restored.scan(&mut closer_cursor, &reverse));
    }

    #[test]
    fn deserialize_tolerates_short_images() {
        let mut scanner = UdlScanner::new();
        scanner.deserialize(&[]);
        scanner.deserialize(&[1]);
        scanner.deserialize(&[0, 65, 0, 0]);

        // Still usable afterwards.
        let source = SourceBuffer::new_from_string("x}", "udl_unittests").unwrap();
        let mut cursor = SourceCursor::new(&source);
        let valid = SymbolSet::new().with(UdlSymbol::MethodBodyContent);
        assert!(scanner.scan(&mut cursor, &valid));
    }
}
