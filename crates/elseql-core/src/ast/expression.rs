//! Expression AST types and their Lucene query-string rendering.

use serde_json::Value;

/// A `name`/`value` pair: a field with its literal in comparisons, a
/// field with its direction in sorts, a script name with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct NameValue {
    /// Field path, script name or sort key.
    pub name: String,
    /// The associated literal.
    pub value: Value,
}

impl NameValue {
    /// Creates a new pair.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Comparison operators accepted between a field and a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `>`
    Gt,
    /// `>=`
    Gte,
}

impl CompareOp {
    /// Returns the source representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
        }
    }
}

/// A boolean search expression.
///
/// `And`/`Or` nodes are n-ary: chains of the same textual operator are
/// flattened into a single node, so a well-formed tree never holds a
/// boolean node with fewer than two operands.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Raw Lucene fragment, passed through verbatim.
    StringExpr(String),
    /// `field = value`
    Eq(NameValue),
    /// `field != value`
    Ne(NameValue),
    /// `field < value`
    Lt(NameValue),
    /// `field <= value`
    Lte(NameValue),
    /// `field > value`
    Gt(NameValue),
    /// `field >= value`
    Gte(NameValue),
    /// `field IN (v1, v2, …)`; the value is the list.
    In(NameValue),
    /// `EXIST field`
    Exists(String),
    /// `MISSING field`
    Missing(String),
    /// `NOT expr`
    Not(Box<Expression>),
    /// `a AND b AND …`
    And(Vec<Expression>),
    /// `a OR b OR …`
    Or(Vec<Expression>),
}

impl Expression {
    /// Builds the comparison variant for `op`.
    pub fn compare(op: CompareOp, name: impl Into<String>, value: Value) -> Self {
        let nv = NameValue::new(name, value);
        match op {
            CompareOp::Eq => Self::Eq(nv),
            CompareOp::Ne => Self::Ne(nv),
            CompareOp::Lt => Self::Lt(nv),
            CompareOp::Lte => Self::Lte(nv),
            CompareOp::Gt => Self::Gt(nv),
            CompareOp::Gte => Self::Gte(nv),
        }
    }

    /// Returns true for the bare `EXIST field` form.
    #[must_use]
    pub const fn is_exists(&self) -> bool {
        matches!(self, Self::Exists(_))
    }

    /// Returns true for the bare `MISSING field` form.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }

    /// Appends an operand to an `And`/`Or` node. No-op on leaves.
    pub(crate) fn push_operand(&mut self, expr: Expression) {
        if let Self::And(operands) | Self::Or(operands) = self {
            operands.push(expr);
        }
    }

    /// Renders the expression in Lucene query-string syntax.
    #[must_use]
    pub fn query_string(&self) -> String {
        match self {
            Self::StringExpr(s) => s.clone(),
            Self::Eq(nv) => format!("{}:{}", nv.name, eq_value(&nv.value)),
            Self::Ne(nv) => format!("NOT {}:{}", nv.name, eq_value(&nv.value)),
            Self::Lt(nv) => format!("{}:{{* TO {}}}", nv.name, quote_value(&nv.value)),
            Self::Lte(nv) => format!("{}:[* TO {}]", nv.name, quote_value(&nv.value)),
            Self::Gt(nv) => format!("{}:{{{} TO *}}", nv.name, quote_value(&nv.value)),
            Self::Gte(nv) => format!("{}:[{} TO *]", nv.name, quote_value(&nv.value)),
            Self::In(nv) => {
                let items = nv
                    .value
                    .as_array()
                    .map(|list| {
                        list.iter()
                            .map(quote_value)
                            .collect::<Vec<_>>()
                            .join(" OR ")
                    })
                    .unwrap_or_default();
                format!("{}:({items})", nv.name)
            }
            Self::Exists(field) => format!("_exists_:{field}"),
            Self::Missing(field) => format!("NOT _exists_:{field}"),
            Self::Not(expr) => format!("NOT {}", expr.query_string()),
            Self::And(operands) => join_operands(operands, "AND"),
            Self::Or(operands) => join_operands(operands, "OR"),
        }
    }
}

fn join_operands(operands: &[Expression], op: &str) -> String {
    operands
        .iter()
        .map(Expression::query_string)
        .collect::<Vec<_>>()
        .join(&format!(" {op} "))
}

/// Renders a value with strings double-quoted (ranges, IN lists).
fn quote_value(value: &Value) -> String {
    // Value::to_string is JSON: strings quoted and escaped, numbers
    // and booleans bare, null as the literal `null`.
    value.to_string()
}

/// Renders the right-hand side of an equality test.
///
/// Strings get three special cases: an empty value matches any
/// (`field:*`); a value starting a Lucene group/range or carrying a
/// wildcard stays unquoted; everything else is double-quoted.
fn eq_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.is_empty() => String::from("*"),
        Value::String(s) if s.starts_with(['(', '[', '{']) || s.contains('*') => s.clone(),
        other => other.to_string(),
    }
}
