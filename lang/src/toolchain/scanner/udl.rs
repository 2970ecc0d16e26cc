use super::core::{lex_fenced_text, CoreScanner, CORE_SERIALIZED_LEN};
use super::cursor::Cursor;
use super::symbol::{CoreSymbol, SymbolId, SymbolSet, CORE_SYMBOL_COUNT};

/// Exact size in bytes of a serialized [UdlScanner]: the reserved flag byte followed by the
/// complete core image.
pub const UDL_SERIALIZED_LEN: usize = CORE_SERIALIZED_LEN + 1;

const_assert_eq!(UDL_SERIALIZED_LEN, 122);

/// The token kinds the UDL scanner adds on top of [CoreSymbol].
///
/// There is no way to extend an enum, so these continue the numbering exactly where the core
/// symbols stop. New entries append at the bottom; the two tables never renumber independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum UdlSymbol {
    /// The balanced `{ }` body of a method implemented in an external language.
    MethodBodyContent = CORE_SYMBOL_COUNT,
}

impl UdlSymbol {
    pub fn id(self) -> SymbolId {
        self as SymbolId
    }

    pub fn name(self) -> &'static str {
        match self {
            UdlSymbol::MethodBodyContent => "method_body_content",
        }
    }

    pub fn from_name(name: &str) -> Option<UdlSymbol> {
        match name {
            "method_body_content" => Some(UdlSymbol::MethodBodyContent),
            _ => None,
        }
    }
}

impl From<UdlSymbol> for SymbolId {
    fn from(symbol: UdlSymbol) -> SymbolId {
        symbol.id()
    }
}

/// Scanner for the UDL grammar: one owned [CoreScanner] plus the method-body decision.
///
/// Composition, not inheritance: every request this scanner does not own is forwarded to the
/// embedded core instance unchanged.
pub struct UdlScanner {
    // Reserved; kept so the serialized layout stays stable.
    in_body: u8,
    core: CoreScanner,
}

impl UdlScanner {
    pub fn new() -> UdlScanner {
        UdlScanner { in_body: 0, core: CoreScanner::new() }
    }

    pub fn scan(&mut self, cursor: &mut impl Cursor, valid: &SymbolSet) -> bool {
        // Same recovery guard as the core scanner, checked before the owned decision.
        if valid.contains(CoreSymbol::Sentinel) {
            return false;
        }

        if valid.contains(UdlSymbol::MethodBodyContent) {
            // A method body is valid when its `{ }` fences balance out:
            // `{{{ [^{}]* }}}` is fine, `{{{ [^{}]* }` is not.
            return lex_fenced_text(cursor, UdlSymbol::MethodBodyContent.id(), '{', '}');
        }

        self.core.scan(cursor, valid)
    }

    /// Writes the serialized state image into |buffer|, which must hold at least
    /// [UDL_SERIALIZED_LEN] bytes. Returns the number of bytes written.
    pub fn serialize(&self, buffer: &mut [u8]) -> usize {
        assert!(buffer.len() >= UDL_SERIALIZED_LEN);
        buffer[0] = self.in_body;
        self.core.serialize(&mut buffer[1..]);
        UDL_SERIALIZED_LEN
    }

    /// Overwrites the state from a serialized image, length-driven like the core scanner's.
    pub fn deserialize(&mut self, buffer: &[u8]) {
        *self = UdlScanner::new();
        if buffer.is_empty() {
            return;
        }
        self.in_body = buffer[0];
        self.core.deserialize(&buffer[1..]);
    }
}

impl Default for UdlScanner {
    fn default() -> UdlScanner {
        UdlScanner::new()
    }
}
