#![no_main]

use libfuzzer_sys::fuzz_target;

use oscript_lang::toolchain::scanner::{
    CoreScanner, SourceCursor, SymbolSet, ALL_CORE_SYMBOLS, CORE_SERIALIZED_LEN,
};
use oscript_lang::toolchain::source::SourceBuffer;

fuzz_target!(|data: &[u8]| {
    // The scanner cursor is expected to tolerate invalid utf-8, so feed it the raw bytes.
    let s = unsafe { std::str::from_utf8_unchecked(data) };
    let source =
        SourceBuffer::new_from_string(s, "fuzz_targets/scan_core.rs").unwrap();

    // Drive every decision routine over the same input, then round-trip the state it left.
    for symbol in ALL_CORE_SYMBOLS {
        let mut cursor = SourceCursor::new(&source);
        let mut scanner = CoreScanner::new();
        let _ = scanner.scan(&mut cursor, &SymbolSet::new().with(symbol));
        assert!(cursor.consumed_bytes() <= data.len());

        let mut image = [0u8; CORE_SERIALIZED_LEN];
        scanner.serialize(&mut image);
        let mut restored = CoreScanner::new();
        restored.deserialize(&image);
        let mut check = [0u8; CORE_SERIALIZED_LEN];
        restored.serialize(&mut check);
        assert_eq!(image, check);
    }
});
