use crate::ast::{Node, PageDocument, Prop, Value};
use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenWithPos};

// ── Parser ────────────────────────────────────────────────────────────────

pub struct Parser {
    tokens: Vec<TokenWithPos>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPos>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current_pos(&self) -> (usize, usize) {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| (t.line, t.col))
            .unwrap_or((1, 1))
    }

    fn peek(&self) -> &Token {
        self.peek_ahead(0)
    }

    fn peek_ahead(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).map(|t| &t.token).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        ParseError::syntax(msg, self.current_pos())
    }

    // ── Document ──────────────────────────────────────────────────────────

    pub fn parse_document(&mut self) -> Result<PageDocument, ParseError> {
        let root = self.parse_node()?;
        if self.peek() != &Token::Eof {
            return Err(self.err(format!(
                "unexpected {:?} after the root node; a document has exactly one root",
                self.peek()
            )));
        }
        Ok(PageDocument { root })
    }

    // ── Node ──────────────────────────────────────────────────────────────

    fn parse_node(&mut self) -> Result<Node, ParseError> {
        let (line, _) = self.current_pos();
        let kind = match self.peek() {
            Token::Ident(s) => s.clone(),
            tok => return Err(self.err(format!("expected a node name, got {:?}", tok))),
        };
        self.advance();

        let label = match self.peek() {
            Token::Str(_) => match self.advance() {
                Token::Str(s) => Some(s),
                _ => None,
            },
            _ => None,
        };

        let (props, children) = if self.peek() == &Token::LBrace {
            self.parse_block()?
        } else {
            (Vec::new(), Vec::new())
        };

        Ok(Node { kind, label, props, children, line })
    }

    // ── Block ─────────────────────────────────────────────────────────────

    /// Parses `{ item* }`. `Ident ":"` starts a property, any other `Ident`
    /// starts a child node.
    fn parse_block(&mut self) -> Result<(Vec<Prop>, Vec<Node>), ParseError> {
        self.advance(); // `{`
        let mut props = Vec::new();
        let mut children = Vec::new();

        loop {
            match self.peek() {
                Token::RBrace => {
                    self.advance();
                    break;
                }
                Token::Eof => return Err(self.err("unclosed '{' block")),
                Token::Ident(_) if self.peek_ahead(1) == &Token::Colon => {
                    props.push(self.parse_prop()?);
                }
                Token::Ident(_) => children.push(self.parse_node()?),
                tok => {
                    return Err(self.err(format!(
                        "unexpected {:?} inside block; expected `key: value` or a node name",
                        tok
                    )));
                }
            }
        }

        Ok((props, children))
    }

    // ── Prop ──────────────────────────────────────────────────────────────

    fn parse_prop(&mut self) -> Result<Prop, ParseError> {
        let key = match self.advance() {
            Token::Ident(s) => s,
            tok => return Err(self.err(format!("expected property name, got {:?}", tok))),
        };
        self.advance(); // `:`
        let value = match self.peek().clone() {
            Token::Str(s) => Value::Str(s),
            Token::Number(n) => Value::Number(n),
            Token::Bool(b) => Value::Bool(b),
            Token::Ident(s) => Value::Ident(s),
            tok => return Err(self.err(format!("expected a value for `{}`, got {:?}", key, tok))),
        };
        self.advance();
        Ok(Prop { key, value })
    }
}

// ── Public parse entry point ──────────────────────────────────────────────

/// Parse a `.vpage` source string into a [`PageDocument`].
pub fn parse_str(src: &str) -> Result<PageDocument, ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    Parser::new(tokens).parse_document()
}
