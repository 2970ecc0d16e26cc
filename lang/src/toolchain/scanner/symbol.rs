use std::fmt;
use std::fmt::Display;

/// A raw token kind identifier shared with the host grammar.
///
/// The host declares its external token kinds as a flat enumeration and refers to them by
/// position, so these are plain integers at the boundary. [CoreSymbol] and
/// [super::udl::UdlSymbol] give the ids names inside the crate.
pub type SymbolId = u16;

/// One past the highest [CoreSymbol] id. Extension scanners number from here.
pub const CORE_SYMBOL_COUNT: SymbolId = 14;

/// The token kinds the core scanner can resolve, in the order the host grammar declares them.
///
/// The discriminants are part of the host contract: ids are append-only and never renumbered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum CoreSymbol {
    /// Arbitrary whitespace, newlines included, between a command and its `{` block.
    WhitespaceBeforeBlock = 0,

    /// Exactly one space between a command and its first argument.
    SingleSpaceBeforeArgument = 1,

    /// Zero-width assertion that two productions touch with no space between them.
    NoSpaceBetweenRules = 2,

    /// The end of a command used without arguments.
    ArgumentlessCommandEnd = 3,

    /// A maximal run of whitespace.
    Whitespace = 4,

    /// A line label starting in column zero, made of alphanumerics and `%`.
    Tag = 5,

    /// Text balanced between `<` and `>`.
    AngleFencedText = 6,

    /// Text balanced between `(` and `)`.
    ParenFencedText = 7,

    /// The user-chosen marker opening an embedded SQL region.
    EmbeddedSqlMarker = 8,

    /// The mirrored marker closing an embedded SQL region.
    EmbeddedSqlReverseMarker = 9,

    /// The text of a line comment, up to but excluding the newline.
    LineCommentInner = 10,

    /// The text of a block comment, up to but excluding the closing `*/`.
    BlockCommentInner = 11,

    /// A macro value line carrying a `##continue` keyword.
    MacroLineWithContinue = 12,

    /// Offered by the host only during error recovery; the scanner never produces it.
    Sentinel = 13,
}

impl CoreSymbol {
    pub fn id(self) -> SymbolId {
        self as SymbolId
    }

    /// The grammar-facing name of the symbol.
    pub fn name(self) -> &'static str {
        match self {
            CoreSymbol::WhitespaceBeforeBlock => "whitespace_before_block",
            CoreSymbol::SingleSpaceBeforeArgument => "single_space_before_argument",
            CoreSymbol::NoSpaceBetweenRules => "no_space_between_rules",
            CoreSymbol::ArgumentlessCommandEnd => "argumentless_command_end",
            CoreSymbol::Whitespace => "whitespace",
            CoreSymbol::Tag => "tag",
            CoreSymbol::AngleFencedText => "angle_fenced_text",
            CoreSymbol::ParenFencedText => "paren_fenced_text",
            CoreSymbol::EmbeddedSqlMarker => "embedded_sql_marker",
            CoreSymbol::EmbeddedSqlReverseMarker => "embedded_sql_reverse_marker",
            CoreSymbol::LineCommentInner => "line_comment_inner",
            CoreSymbol::BlockCommentInner => "block_comment_inner",
            CoreSymbol::MacroLineWithContinue => "macro_line_with_continue",
            CoreSymbol::Sentinel => "sentinel",
        }
    }

    pub fn from_name(name: &str) -> Option<CoreSymbol> {
        ALL_CORE_SYMBOLS.iter().copied().find(|s| s.name() == name)
    }

    pub fn from_id(id: SymbolId) -> Option<CoreSymbol> {
        ALL_CORE_SYMBOLS.get(id as usize).copied()
    }
}

/// Every core symbol, indexed by id.
pub const ALL_CORE_SYMBOLS: [CoreSymbol; CORE_SYMBOL_COUNT as usize] = [
    CoreSymbol::WhitespaceBeforeBlock,
    CoreSymbol::SingleSpaceBeforeArgument,
    CoreSymbol::NoSpaceBetweenRules,
    CoreSymbol::ArgumentlessCommandEnd,
    CoreSymbol::Whitespace,
    CoreSymbol::Tag,
    CoreSymbol::AngleFencedText,
    CoreSymbol::ParenFencedText,
    CoreSymbol::EmbeddedSqlMarker,
    CoreSymbol::EmbeddedSqlReverseMarker,
    CoreSymbol::LineCommentInner,
    CoreSymbol::BlockCommentInner,
    CoreSymbol::MacroLineWithContinue,
    CoreSymbol::Sentinel,
];

impl From<CoreSymbol> for SymbolId {
    fn from(symbol: CoreSymbol) -> SymbolId {
        symbol.id()
    }
}

impl Display for CoreSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of token kinds the host grammar will accept at the current parse position.
///
/// The host rebuilds this before every scan; the scanner never stores one. Symbol ids index
/// directly into a bitmask, so membership checks are O(1).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SymbolSet(u32);

impl SymbolSet {
    pub fn new() -> SymbolSet {
        SymbolSet(0)
    }

    pub fn with(mut self, symbol: impl Into<SymbolId>) -> SymbolSet {
        self.insert(symbol);
        self
    }

    pub fn insert(&mut self, symbol: impl Into<SymbolId>) {
        let id = symbol.into();
        debug_assert!(id < u32::BITS as SymbolId);
        self.0 |= 1 << id;
    }

    pub fn contains(&self, symbol: impl Into<SymbolId>) -> bool {
        let id = symbol.into();
        debug_assert!(id < u32::BITS as SymbolId);
        self.0 & (1 << id) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}
