//! ELSEQL recursive descent parser implementation.

use log::debug;
use serde_json::Value;

use super::error::ParseError;
use super::keyword::Keyword;
use crate::ast::{CompareOp, Expression, NameValue, Query};
use crate::cursor;
use crate::lexer::{Lexer, Token};

/// `AND`/`OR` flavor of an n-ary boolean node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoolOp {
    And,
    Or,
}

/// States of the dotted-path machine: a segment, then either a `.`
/// separator (back to segment) or, for sort entries, an optional
/// direction keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathState {
    Segment,
    Separator,
    Direction,
}

/// ELSEQL parser with one-token lookahead.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    debug: bool,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            debug: false,
        }
    }

    /// Enables `debug!`-level diagnostics for this parser instance.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Parses a complete ELSEQL statement.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] naming the expected syntactic class and
    /// the offending token when the input is malformed.
    pub fn parse(&mut self) -> Result<Query, ParseError> {
        let mut query = Query::default();

        self.expect_keyword(Keyword::Select)?;
        if !self.accept_punct('*') {
            query.select_list = self.parse_identifiers()?;
        }

        if self.accept_keyword(Keyword::Facets) {
            query.facet_list = self.parse_identifiers()?;
        }

        if self.accept_keyword(Keyword::Script) {
            query.script = Some(self.parse_script()?);
        }

        self.expect_keyword(Keyword::From)?;
        query.index = self.parse_identifier()?;

        if self.accept_keyword(Keyword::Where) {
            query.where_expr = Some(self.parse_expression()?);
        }

        if self.accept_keyword(Keyword::Filter) {
            query.filter_expr = Some(self.parse_filter()?);
        }

        if self.accept_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            query.order_list = self.parse_order_list()?;
        }

        if self.accept_keyword(Keyword::Limit) {
            let n = self.parse_integer()?;
            if self.accept_punct(',') {
                query.from = n;
                query.size = self.parse_integer()?;
            } else {
                query.size = n;
            }
        }

        if self.accept_keyword(Keyword::After) {
            query.after = Some(self.parse_string()?);
        }

        if !self.current.is_eof() {
            return Err(self.unexpected("EOF"));
        }

        if self.debug {
            debug!("parsed {query:?}");
        }

        Ok(query)
    }

    // --- Clause productions ---

    /// Parses a comma-separated list of identifiers.
    fn parse_identifiers(&mut self) -> Result<Vec<String>, ParseError> {
        let mut result = Vec::new();
        loop {
            result.push(self.parse_identifier()?);
            if !self.accept_punct(',') {
                break;
            }
        }
        Ok(result)
    }

    /// Parses a dotted-path identifier.
    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        Ok(self.parse_path(false)?.name)
    }

    /// Parses a dotted-path identifier, optionally followed by a sort
    /// direction (`ASC` default).
    ///
    /// The first segment may not be a reserved word; segments after a
    /// dot may, so paths like `body.desc` parse.
    fn parse_path(&mut self, with_direction: bool) -> Result<NameValue, ParseError> {
        let mut state = PathState::Segment;
        let mut ident = String::new();
        let mut direction = String::new();
        let mut allow_keywords = false;

        loop {
            match state {
                PathState::Segment => {
                    let word = match &self.current {
                        Token::Ident(word)
                            if allow_keywords || Keyword::from_str(word).is_none() =>
                        {
                            word.clone()
                        }
                        _ => break,
                    };
                    self.advance();
                    ident.push_str(&word);
                    state = PathState::Separator;
                }
                PathState::Separator => {
                    if self.accept_punct('.') {
                        ident.push('.');
                        allow_keywords = true;
                        state = PathState::Segment;
                    } else if with_direction {
                        state = PathState::Direction;
                    } else {
                        break;
                    }
                }
                PathState::Direction => {
                    let order = match self.keyword() {
                        Some(k @ (Keyword::Asc | Keyword::Desc)) => {
                            self.advance();
                            k
                        }
                        _ => Keyword::Asc,
                    };
                    direction = order.as_str().to_ascii_lowercase();
                    break;
                }
            }
        }

        if ident.is_empty() || ident.ends_with('.') {
            return Err(self.unexpected("identifier"));
        }

        Ok(NameValue::new(ident, Value::String(direction)))
    }

    /// Parses `name = "script source"`.
    fn parse_script(&mut self) -> Result<NameValue, ParseError> {
        let name = match &self.current {
            Token::Ident(word) if Keyword::from_str(word).is_none() => word.clone(),
            _ => return Err(self.unexpected("identifier")),
        };
        self.advance();

        if !self.accept_punct('=') {
            return Err(self.unexpected("\"=\""));
        }

        let source = self.parse_string()?;
        Ok(NameValue::new(name, Value::String(source)))
    }

    /// Parses the `ORDER BY` tail: either a quoted script sort, or a
    /// comma-separated list of identifiers with optional directions.
    fn parse_order_list(&mut self) -> Result<Vec<NameValue>, ParseError> {
        if self.current.is_string() {
            let encoded = self.parse_string()?;
            let script = cursor::decode(&encoded)
                .ok_or_else(|| ParseError::new("invalid script value for ORDER BY"))?;
            return Ok(vec![NameValue::new("_script", script)]);
        }

        let mut result = Vec::new();
        loop {
            result.push(self.parse_path(true)?);
            if !self.accept_punct(',') {
                break;
            }
        }
        Ok(result)
    }

    /// Parses a boolean expression: terms folded left to right over
    /// `AND`/`OR` into n-ary nodes.
    ///
    /// When the operator matches the top of the tree built so far, the
    /// new term is appended to that node; otherwise the tree becomes
    /// the first operand of a fresh node. Both operators share one
    /// precedence level.
    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let mut result: Option<Expression> = None;

        while !self.current.is_eof() {
            let negated = self.accept_keyword(Keyword::Not);
            let mut expr = self.parse_term()?;
            if negated {
                expr = Expression::Not(Box::new(expr));
            }

            let op = match self.boolean_operator() {
                Some(op) => op,
                None => {
                    // end of the expression; close the tree
                    return Ok(match result {
                        None => expr,
                        Some(mut node) => {
                            node.push_operand(expr);
                            node
                        }
                    });
                }
            };

            result = Some(combine(op, result, expr));
        }

        // ran off the end: empty expression or dangling AND/OR
        Err(self.unexpected("expression"))
    }

    /// Parses one expression atom.
    fn parse_term(&mut self) -> Result<Expression, ParseError> {
        // a quoted string is a raw Lucene fragment
        if self.current.is_string() {
            return Ok(Expression::StringExpr(self.parse_string()?));
        }

        if self.accept_keyword(Keyword::Exist) {
            return Ok(Expression::Exists(self.parse_identifier()?));
        }

        let name = self.parse_identifier()?;

        if self.accept_keyword(Keyword::In) {
            if !self.accept_punct('(') {
                return Err(self.unexpected("\"(\""));
            }
            let mut items = Vec::new();
            loop {
                items.push(self.parse_value()?);
                if !self.accept_punct(',') {
                    break;
                }
            }
            if !self.accept_punct(')') {
                return Err(self.unexpected("\")\""));
            }
            return Ok(Expression::In(NameValue::new(name, Value::Array(items))));
        }

        let op = self.parse_operator()?;
        let value = self.parse_value()?;
        Ok(Expression::compare(op, name, value))
    }

    /// Parses the `FILTER` tail: a bare `EXIST`/`MISSING` field test,
    /// or a full expression.
    fn parse_filter(&mut self) -> Result<Expression, ParseError> {
        if self.accept_keyword(Keyword::Exist) {
            Ok(Expression::Exists(self.parse_identifier()?))
        } else if self.accept_keyword(Keyword::Missing) {
            Ok(Expression::Missing(self.parse_identifier()?))
        } else {
            self.parse_expression()
        }
    }

    /// Parses a comparison operator.
    fn parse_operator(&mut self) -> Result<CompareOp, ParseError> {
        let op = match self.current {
            Token::Punct('=') => {
                self.advance();
                CompareOp::Eq
            }
            Token::Punct('!') => {
                self.advance();
                if !self.accept_punct('=') {
                    return Err(self.unexpected("\"=\""));
                }
                CompareOp::Ne
            }
            Token::Punct('<') => {
                self.advance();
                if self.accept_punct('=') {
                    CompareOp::Lte
                } else {
                    CompareOp::Lt
                }
            }
            Token::Punct('>') => {
                self.advance();
                if self.accept_punct('=') {
                    CompareOp::Gte
                } else {
                    CompareOp::Gt
                }
            }
            _ => return Err(self.unexpected("operator")),
        };

        if self.debug {
            debug!("got operator {}", op.as_str());
        }

        Ok(op)
    }

    /// Parses a literal value (string or number).
    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let value = match &self.current {
            Token::Str(s) | Token::RawStr(s) => Value::String(s.clone()),
            Token::Int(n) => Value::from(*n),
            Token::Float(f) => Value::from(*f),
            _ => return Err(self.unexpected("value")),
        };
        self.advance();
        Ok(value)
    }

    /// Parses an integer; a float literal is truncated.
    fn parse_integer(&mut self) -> Result<i64, ParseError> {
        let value = match self.current {
            Token::Int(n) => n,
            Token::Float(f) => f as i64,
            _ => return Err(self.unexpected("integer")),
        };
        self.advance();
        Ok(value)
    }

    /// Parses a quoted string of either form.
    fn parse_string(&mut self) -> Result<String, ParseError> {
        let value = match &self.current {
            Token::Str(s) | Token::RawStr(s) => s.clone(),
            _ => return Err(self.unexpected("quoted string")),
        };
        self.advance();
        Ok(value)
    }

    // --- Helper methods ---

    /// Advances to the next token.
    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// Returns the keyword the current token spells, if any.
    fn keyword(&self) -> Option<Keyword> {
        match &self.current {
            Token::Ident(word) => Keyword::from_str(word),
            _ => None,
        }
    }

    /// Consumes the current token if it is the given keyword.
    fn accept_keyword(&mut self, keyword: Keyword) -> bool {
        if self.keyword() == Some(keyword) {
            if self.debug {
                debug!("got keyword {keyword}");
            }
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is the given keyword, or fails.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.accept_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    /// Consumes the current token if it is the given punctuation.
    fn accept_punct(&mut self, c: char) -> bool {
        if self.current == Token::Punct(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes an `AND`/`OR` keyword, if present.
    fn boolean_operator(&mut self) -> Option<BoolOp> {
        if self.accept_keyword(Keyword::And) {
            Some(BoolOp::And)
        } else if self.accept_keyword(Keyword::Or) {
            Some(BoolOp::Or)
        } else {
            None
        }
    }

    /// Builds the error for an unexpected current token.
    fn unexpected(&self, class: &str) -> ParseError {
        if let Token::Error(message) = &self.current {
            return ParseError::new(message.clone());
        }
        ParseError::expected(class, &self.current)
    }
}

/// Folds `current` into the boolean tree built so far.
fn combine(op: BoolOp, result: Option<Expression>, current: Expression) -> Expression {
    match result {
        None => new_node(op, current),
        Some(mut node) => {
            let same_op = matches!(
                (&node, op),
                (Expression::And(_), BoolOp::And) | (Expression::Or(_), BoolOp::Or)
            );
            node.push_operand(current);
            if same_op {
                node
            } else {
                new_node(op, node)
            }
        }
    }
}

fn new_node(op: BoolOp, first: Expression) -> Expression {
    match op {
        BoolOp::And => Expression::And(vec![first]),
        BoolOp::Or => Expression::Or(vec![first]),
    }
}
