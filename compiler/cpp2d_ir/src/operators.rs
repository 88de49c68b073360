//! Operator kinds appearing in expressions and operator declarations.

/// An overloadable C++ operator, named by its token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OverloadedOperator {
    New,
    Delete,
    ArrayNew,
    ArrayDelete,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Amp,
    Pipe,
    Tilde,
    Exclaim,
    Equal,
    Less,
    Greater,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,
    CaretEqual,
    AmpEqual,
    PipeEqual,
    LessLess,
    GreaterGreater,
    LessLessEqual,
    GreaterGreaterEqual,
    EqualEqual,
    ExclaimEqual,
    LessEqual,
    GreaterEqual,
    Spaceship,
    AmpAmp,
    PipePipe,
    PlusPlus,
    MinusMinus,
    Comma,
    ArrowStar,
    Arrow,
    Call,
    Subscript,
}

impl OverloadedOperator {
    /// The operator as spelled in source.
    pub const fn spelling(self) -> &'static str {
        use OverloadedOperator::*;
        match self {
            New => "new",
            Delete => "delete",
            ArrayNew => "new[]",
            ArrayDelete => "delete[]",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Percent => "%",
            Caret => "^",
            Amp => "&",
            Pipe => "|",
            Tilde => "~",
            Exclaim => "!",
            Equal => "=",
            Less => "<",
            Greater => ">",
            PlusEqual => "+=",
            MinusEqual => "-=",
            StarEqual => "*=",
            SlashEqual => "/=",
            PercentEqual => "%=",
            CaretEqual => "^=",
            AmpEqual => "&=",
            PipeEqual => "|=",
            LessLess => "<<",
            GreaterGreater => ">>",
            LessLessEqual => "<<=",
            GreaterGreaterEqual => ">>=",
            EqualEqual => "==",
            ExclaimEqual => "!=",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Spaceship => "<=>",
            AmpAmp => "&&",
            PipePipe => "||",
            PlusPlus => "++",
            MinusMinus => "--",
            Comma => ",",
            ArrowStar => "->*",
            Arrow => "->",
            Call => "()",
            Subscript => "[]",
        }
    }

    /// Compound assignments such as `+=` (but not plain `=`).
    pub const fn is_compound_assign(self) -> bool {
        use OverloadedOperator::*;
        matches!(
            self,
            PlusEqual
                | MinusEqual
                | StarEqual
                | SlashEqual
                | PercentEqual
                | CaretEqual
                | AmpEqual
                | PipeEqual
                | LessLessEqual
                | GreaterGreaterEqual
        )
    }
}

/// Binary operator in a built-in binary expression.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    PtrMemD,
    PtrMemI,
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Shl,
    Shr,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    BitAnd,
    BitXor,
    BitOr,
    LAnd,
    LOr,
    Assign,
    MulAssign,
    DivAssign,
    RemAssign,
    AddAssign,
    SubAssign,
    ShlAssign,
    ShrAssign,
    AndAssign,
    XorAssign,
    OrAssign,
    Comma,
}

impl BinaryOp {
    pub const fn spelling(self) -> &'static str {
        use BinaryOp::*;
        match self {
            PtrMemD => ".*",
            PtrMemI => "->*",
            Mul => "*",
            Div => "/",
            Rem => "%",
            Add => "+",
            Sub => "-",
            Shl => "<<",
            Shr => ">>",
            Lt => "<",
            Gt => ">",
            Le => "<=",
            Ge => ">=",
            Eq => "==",
            Ne => "!=",
            BitAnd => "&",
            BitXor => "^",
            BitOr => "|",
            LAnd => "&&",
            LOr => "||",
            Assign => "=",
            MulAssign => "*=",
            DivAssign => "/=",
            RemAssign => "%=",
            AddAssign => "+=",
            SubAssign => "-=",
            ShlAssign => "<<=",
            ShrAssign => ">>=",
            AndAssign => "&=",
            XorAssign => "^=",
            OrAssign => "|=",
            Comma => ",",
        }
    }

    pub const fn is_compound_assign(self) -> bool {
        use BinaryOp::*;
        matches!(
            self,
            MulAssign
                | DivAssign
                | RemAssign
                | AddAssign
                | SubAssign
                | ShlAssign
                | ShrAssign
                | AndAssign
                | XorAssign
                | OrAssign
        )
    }
}

/// Unary operator in a built-in unary expression.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    PostInc,
    PostDec,
    PreInc,
    PreDec,
    AddrOf,
    Deref,
    Plus,
    Minus,
    Not,
    LNot,
    Real,
    Imag,
    Extension,
    Coawait,
}

impl UnaryOp {
    pub const fn spelling(self) -> &'static str {
        use UnaryOp::*;
        match self {
            PostInc | PreInc => "++",
            PostDec | PreDec => "--",
            AddrOf => "&",
            Deref => "*",
            Plus => "+",
            Minus => "-",
            Not => "~",
            LNot => "!",
            Real => "__real ",
            Imag => "__imag ",
            Extension => "__extension__ ",
            Coawait => "co_await ",
        }
    }

    pub const fn is_postfix(self) -> bool {
        matches!(self, UnaryOp::PostInc | UnaryOp::PostDec)
    }

    pub const fn is_increment(self) -> bool {
        matches!(self, UnaryOp::PostInc | UnaryOp::PreInc)
    }
}
