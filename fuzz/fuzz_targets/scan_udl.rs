#![no_main]

use libfuzzer_sys::fuzz_target;

use oscript_lang::toolchain::scanner::{
    SourceCursor, SymbolSet, UdlScanner, UdlSymbol, UDL_SERIALIZED_LEN,
};
use oscript_lang::toolchain::source::SourceBuffer;

fuzz_target!(|data: &[u8]| {
    let s = unsafe { std::str::from_utf8_unchecked(data) };
    let source = SourceBuffer::new_from_string(s, "fuzz_targets/scan_udl.rs").unwrap();

    let mut cursor = SourceCursor::new(&source);
    let mut scanner = UdlScanner::new();
    let _ = scanner.scan(&mut cursor, &SymbolSet::new().with(UdlSymbol::MethodBodyContent));
    assert!(cursor.consumed_bytes() <= data.len());

    // Deserializing an arbitrary prefix of the data must never fail.
    let mut scanner = UdlScanner::new();
    scanner.deserialize(&data[..data.len().min(UDL_SERIALIZED_LEN)]);
});
