use std::fmt;

use crate::scanner::LexErrorKind;

/// Source location for error reporting. Both fields are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// Reserved words of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Launch,
    BigBang,
    MilkyWay,
    Mass,
    Flux,
    Quantum,
    Nebula,
    Star,
    /// Boolean true, spelled `truth` or `starlight`.
    Truth,
    /// Boolean false.
    Voidness,
    Vacuum,
    /// `return`
    BlackHole,
    /// `break`
    DarkMatter,
    /// `continue`
    Warp,
    /// `for`
    Rotate,
    /// `while`
    Orbit,
    /// `if`
    Phase,
    /// `else`
    Eclipse,
    Supernova,
    StarPath,
    BlackVoid,
    Moon,
    Shine,
    Galaxy,
    Earth,
    Constellation,
    Construct,
    Deorbit,
    Shield,
    Recover,
    Eject,
    Open,
    Core,
    OrbitShield,
}

impl Keyword {
    /// Every keyword with its canonical spelling.
    ///
    /// `starlight` is an alias of `truth` and is listed separately in the
    /// scanner's keyword table.
    pub const ALL: [(&'static str, Self); 34] = [
        ("launch", Self::Launch),
        ("bigbang", Self::BigBang),
        ("milkyway", Self::MilkyWay),
        ("mass", Self::Mass),
        ("flux", Self::Flux),
        ("quantum", Self::Quantum),
        ("nebula", Self::Nebula),
        ("star", Self::Star),
        ("truth", Self::Truth),
        ("voidness", Self::Voidness),
        ("vacuum", Self::Vacuum),
        ("blackHole", Self::BlackHole),
        ("darkMatter", Self::DarkMatter),
        ("warp", Self::Warp),
        ("rotate", Self::Rotate),
        ("orbit", Self::Orbit),
        ("phase", Self::Phase),
        ("eclipse", Self::Eclipse),
        ("supernova", Self::Supernova),
        ("starPath", Self::StarPath),
        ("blackVoid", Self::BlackVoid),
        ("moon", Self::Moon),
        ("shine", Self::Shine),
        ("galaxy", Self::Galaxy),
        ("earth", Self::Earth),
        ("constellation", Self::Constellation),
        ("construct", Self::Construct),
        ("deorbit", Self::Deorbit),
        ("shield", Self::Shield),
        ("recover", Self::Recover),
        ("eject", Self::Eject),
        ("open", Self::Open),
        ("core", Self::Core),
        ("orbitshield", Self::OrbitShield),
    ];

    /// Canonical source spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(_, kw)| *kw == self)
            .map_or("", |(spelling, _)| spelling)
    }

    /// Upper-case name used by the token dump, e.g. `BLACKHOLE`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Launch => "LAUNCH",
            Self::BigBang => "BIGBANG",
            Self::MilkyWay => "MILKYWAY",
            Self::Mass => "MASS",
            Self::Flux => "FLUX",
            Self::Quantum => "QUANTUM",
            Self::Nebula => "NEBULA",
            Self::Star => "STAR",
            Self::Truth => "TRUTH",
            Self::Voidness => "VOIDNESS",
            Self::Vacuum => "VACUUM",
            Self::BlackHole => "BLACKHOLE",
            Self::DarkMatter => "DARKMATTER",
            Self::Warp => "WARP",
            Self::Rotate => "ROTATE",
            Self::Orbit => "ORBIT",
            Self::Phase => "PHASE",
            Self::Eclipse => "ECLIPSE",
            Self::Supernova => "SUPERNOVA",
            Self::StarPath => "STARPATH",
            Self::BlackVoid => "BLACKVOID",
            Self::Moon => "MOON",
            Self::Shine => "SHINE",
            Self::Galaxy => "GALAXY",
            Self::Earth => "EARTH",
            Self::Constellation => "CONSTELLATION",
            Self::Construct => "CONSTRUCT",
            Self::Deorbit => "DEORBIT",
            Self::Shield => "SHIELD",
            Self::Recover => "RECOVER",
            Self::Eject => "EJECT",
            Self::Open => "OPEN",
            Self::Core => "CORE",
            Self::OrbitShield => "ORBITSHIELD",
        }
    }

    /// Keywords that open a variable or function declaration.
    #[must_use]
    pub const fn is_type(self) -> bool {
        matches!(self, Self::Vacuum | Self::Mass | Self::Flux | Self::Quantum)
    }

    /// Keywords that are boolean literal values.
    #[must_use]
    pub const fn is_boolean(self) -> bool {
        matches!(self, Self::Truth | Self::Voidness)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token kinds produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Semicolon,
    Colon,

    Plus,
    PlusPlus,
    PlusEqual,
    Minus,
    MinusMinus,
    MinusEqual,
    /// `->`
    Arrow,
    Star,
    StarEqual,
    Slash,
    SlashEqual,
    Percent,
    PercentEqual,
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    /// `&&`
    And,
    /// `||`
    Or,
    BitAnd,
    BitOr,
    /// `^`
    Caret,

    Identifier,
    /// Double-quoted string; the lexeme excludes the quotes.
    String,
    Number,
    Keyword(Keyword),

    /// Line separator.
    Newline,
    /// `// ...`
    LineComment,
    /// `/* ... */`
    BlockComment,

    /// Lexical error; the token's lexeme holds the diagnostic message.
    Error(LexErrorKind),
    /// End-of-input sentinel.
    Eof,
}

impl TokenKind {
    /// Newlines and comments carry no grammar meaning.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Newline | Self::LineComment | Self::BlockComment)
    }

    /// Whether this kind starts a declaration (`vacuum`, `mass`, ...).
    #[must_use]
    pub const fn is_type_keyword(self) -> bool {
        match self {
            Self::Keyword(kw) => kw.is_type(),
            _ => false,
        }
    }

    /// Stable upper-case name used by the token dump.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LeftParen => "LEFT_PAREN",
            Self::RightParen => "RIGHT_PAREN",
            Self::LeftBrace => "LEFT_BRACE",
            Self::RightBrace => "RIGHT_BRACE",
            Self::Comma => "COMMA",
            Self::Dot => "DOT",
            Self::Semicolon => "SEMICOLON",
            Self::Colon => "COLON",
            Self::Plus => "PLUS",
            Self::PlusPlus => "PLUS_PLUS",
            Self::PlusEqual => "PLUS_EQ",
            Self::Minus => "MINUS",
            Self::MinusMinus => "MINUS_MINUS",
            Self::MinusEqual => "MINUS_EQ",
            Self::Arrow => "ARROW",
            Self::Star => "STAR",
            Self::StarEqual => "STAR_EQ",
            Self::Slash => "SLASH",
            Self::SlashEqual => "SLASH_EQ",
            Self::Percent => "PERCENT",
            Self::PercentEqual => "PERCENT_EQ",
            Self::Bang => "BANG",
            Self::BangEqual => "BANG_EQ",
            Self::Equal => "EQUAL",
            Self::EqualEqual => "EQUAL_EQ",
            Self::Greater => "GREATER",
            Self::GreaterEqual => "GREATER_EQ",
            Self::Less => "LESS",
            Self::LessEqual => "LESS_EQ",
            Self::And => "AND",
            Self::Or => "OR",
            Self::BitAnd => "BIT_AND",
            Self::BitOr => "BIT_OR",
            Self::Caret => "XOR",
            Self::Identifier => "IDENTIFIER",
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::Keyword(kw) => kw.name(),
            Self::Newline => "NEW_LINE",
            Self::LineComment => "COMMENT",
            Self::BlockComment => "BLOCK_COMMENT",
            Self::Error(_) => "ERROR",
            Self::Eof => "END_OF_FILE",
        }
    }

    /// Fixed source text for punctuation and operators, `None` for
    /// kinds whose text varies.
    #[must_use]
    pub const fn symbol(self) -> Option<&'static str> {
        let s = match self {
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Plus => "+",
            Self::PlusPlus => "++",
            Self::PlusEqual => "+=",
            Self::Minus => "-",
            Self::MinusMinus => "--",
            Self::MinusEqual => "-=",
            Self::Arrow => "->",
            Self::Star => "*",
            Self::StarEqual => "*=",
            Self::Slash => "/",
            Self::SlashEqual => "/=",
            Self::Percent => "%",
            Self::PercentEqual => "%=",
            Self::Bang => "!",
            Self::BangEqual => "!=",
            Self::Equal => "=",
            Self::EqualEqual => "==",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::And => "&&",
            Self::Or => "||",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::Caret => "^",
            _ => return None,
        };
        Some(s)
    }
}

/// Human-readable description used in parse errors, e.g. `')'` or
/// `identifier`.
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(symbol) = self.symbol() {
            return write!(f, "'{symbol}'");
        }
        match self {
            Self::Identifier => write!(f, "identifier"),
            Self::String => write!(f, "string"),
            Self::Number => write!(f, "number"),
            Self::Keyword(kw) => write!(f, "'{kw}'"),
            Self::Newline => write!(f, "newline"),
            Self::LineComment | Self::BlockComment => write!(f, "comment"),
            Self::Error(kind) => write!(f, "{kind}"),
            _ => write!(f, "end of input"),
        }
    }
}

/// A single token with its kind, text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text, or the diagnostic message for error tokens.
    pub lexeme: String,
    /// Decoded value; present for numbers and strings only.
    pub literal: Option<String>,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub const fn line(&self) -> usize {
        self.span.line
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.span.column
    }
}

/// Dump format: `[line:col] KIND lexeme`.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lexeme = if self.kind == TokenKind::Newline {
            "\\n"
        } else {
            &self.lexeme
        };
        // The `truth` alias keeps its own name in the dump.
        let name = match self.kind {
            TokenKind::Keyword(Keyword::Truth) if self.lexeme == "starlight" => "STARLIGHT",
            kind => kind.name(),
        };
        write!(f, "[{}:{}] {name} {lexeme}", self.span.line, self.span.column)
    }
}
