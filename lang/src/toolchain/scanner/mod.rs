//! A context-sensitive scanner resolving the token decisions the ObjectScript grammars cannot
//! make locally.
//!
//! The host parser owns ordinary tokenization. At each lexing position it hands the scanner a
//! [Cursor] over the remaining input plus a [SymbolSet] of the token kinds it would currently
//! accept. The scanner picks at most one applicable decision routine and either commits a token
//! (recording a result symbol and a boundary on the cursor) or declines, in which case the host
//! falls back to its built-in matching. Each invocation is a one-shot decision; the only state
//! that survives between calls is the embedded-SQL marker buffer, which must serialize byte-exact
//! so the host can suspend and resume lexing across incremental edits.
//!
//! Two scanners exist. [CoreScanner] makes every decision the core grammar needs. [UdlScanner]
//! wraps an owned core scanner, adds the method-body fence decision the UDL grammar needs, and
//! delegates everything else.
//!

pub mod core;
pub mod cursor;
pub mod symbol;
pub mod udl;

pub use self::core::{CoreScanner, CORE_SERIALIZED_LEN, MARKER_CAPACITY};
pub use self::cursor::{Cursor, SourceCursor};
pub use self::symbol::{CoreSymbol, SymbolId, SymbolSet, ALL_CORE_SYMBOLS, CORE_SYMBOL_COUNT};
pub use self::udl::{UdlScanner, UdlSymbol, UDL_SERIALIZED_LEN};

#[cfg(test)]
mod cursor_unittests;
#[cfg(test)]
mod udl_unittests;
