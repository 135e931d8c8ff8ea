use std::fmt;

/// A literal argument appearing in rule text, and the value type of the
/// symbol table.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Literal {
    /// A short type label used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Int(_) => "int",
            Literal::Float(_) => "float",
            Literal::Str(_) => "string",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{v}"),
            Literal::Float(v) => write!(f, "{v}"),
            Literal::Str(v) => write!(f, "\"{v}\""),
        }
    }
}

impl From<i64> for Literal {
    fn from(v: i64) -> Self {
        Literal::Int(v)
    }
}

impl From<f64> for Literal {
    fn from(v: f64) -> Self {
        Literal::Float(v)
    }
}

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Literal::Str(v.to_owned())
    }
}

impl From<String> for Literal {
    fn from(v: String) -> Self {
        Literal::Str(v)
    }
}

/// Rule expression AST produced by [`parse`](crate::parse::parse).
///
/// Boolean nodes are binary here; the validator algebra flattens chained
/// `&&`/`||` into N-ary composers during the build.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Ident(String),
    Call { name: String, args: Vec<Expr> },
    Eq(Box<Expr>, Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// A short node label used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Literal(lit) => lit.kind(),
            Expr::Ident(_) => "identifier",
            Expr::Call { .. } => "call",
            Expr::Eq(_, _) | Expr::And(_, _) | Expr::Or(_, _) => "expression",
        }
    }
}
