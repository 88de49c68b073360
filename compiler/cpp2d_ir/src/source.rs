//! Source positions, ranges, and attached comments.
//!
//! Offsets are byte offsets into the main file text held by the
//! [`TranslationUnit`](crate::TranslationUnit). A location produced by macro
//! expansion carries the offset of its expansion point but is flagged so
//! the comment machinery can refuse to read text around it.

/// A position in the source.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SourceLoc {
    /// Compiler-synthesized node with no position.
    #[default]
    Invalid,
    /// Byte offset in the main file.
    File(u32),
    /// Position inside a macro expansion.
    Macro(u32),
}

impl SourceLoc {
    #[inline]
    pub const fn is_valid(self) -> bool {
        !matches!(self, SourceLoc::Invalid)
    }

    #[inline]
    pub const fn is_macro(self) -> bool {
        matches!(self, SourceLoc::Macro(_))
    }

    /// File offset, if this location can be used to slice source text.
    #[inline]
    pub const fn file_offset(self) -> Option<u32> {
        match self {
            SourceLoc::File(offset) => Some(offset),
            SourceLoc::Invalid | SourceLoc::Macro(_) => None,
        }
    }
}

/// Half-open range: `begin` is the first byte, `end` is one past the last.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SourceRange {
    pub begin: SourceLoc,
    pub end: SourceLoc,
}

impl SourceRange {
    pub const INVALID: SourceRange = SourceRange {
        begin: SourceLoc::Invalid,
        end: SourceLoc::Invalid,
    };

    #[inline]
    pub const fn new(begin: SourceLoc, end: SourceLoc) -> Self {
        SourceRange { begin, end }
    }

    /// Range covering `start..end` in the main file.
    #[inline]
    pub const fn file(start: u32, end: u32) -> Self {
        SourceRange {
            begin: SourceLoc::File(start),
            end: SourceLoc::File(end),
        }
    }
}

/// A comment the front end attached to a declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RawComment {
    /// Raw comment text including its `//` or `/*` delimiters.
    pub text: String,
    /// Comment sits after the declaration on the same line (`int x; // ...`).
    pub trailing: bool,
}

impl RawComment {
    pub fn leading(text: impl Into<String>) -> Self {
        RawComment {
            text: text.into(),
            trailing: false,
        }
    }

    pub fn trailing(text: impl Into<String>) -> Self {
        RawComment {
            text: text.into(),
            trailing: true,
        }
    }
}

/// Declaration visibility as written.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Access {
    Public,
    Protected,
    Private,
    /// Not a class member.
    #[default]
    None,
}

impl Access {
    pub const fn keyword(self) -> &'static str {
        match self {
            Access::Public | Access::None => "public",
            Access::Protected => "protected",
            Access::Private => "private",
        }
    }
}
