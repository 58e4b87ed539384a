//! malc-read — the recursive-descent reader.
//!
//! ============================================================================
//! READING OVERVIEW
//! ============================================================================
//!
//! Turns a flat [`Token`](malc_lex::Token) stream into a [`Value`] tree.
//! This is the half of "reading" that understands grammar: lists, vectors,
//! hash-maps, atoms, and the reader-macro shorthands (`'`, `` ` ``, `~`,
//! `~@`, `@`, `^`) that desugar into ordinary lists before evaluation ever
//! sees them.
//!
//! mal makes no syntactic distinction between "expression" and "statement",
//! and has no operator precedence to resolve — every form is either an atom
//! or a parenthesized/bracketed/braced sequence of forms, so reading is a
//! single recursive-descent function with one case per leading token. There
//! is no separate AST type: the `Value` tree produced here is the same type
//! the evaluator walks and the printer renders, so "parsing" and "building
//! the result" are the same step.
//!
//! GRAMMAR (EBNF):
//! ---------------
//! ```ebnf
//! form      = list | vector | hashmap | reader-macro | atom ;
//! list      = "(" { form } ")" ;
//! vector    = "[" { form } "]" ;
//! hashmap   = "{" { (string | keyword) form } "}" ;
//! reader-macro
//!           = "'" form            (* quote *)
//!           | "`" form            (* quasiquote *)
//!           | "~" form            (* unquote *)
//!           | "~@" form           (* splice-unquote *)
//!           | "@" form            (* deref *)
//!           | "^" form form ;     (* with-meta, meta first *)
//! atom      = integer | string | keyword | symbol | "nil" | "true" | "false" ;
//! ```
//!
//! Unlike a language with infix operators, there is no precedence climbing
//! here (compare a Pratt parser's binding-power table): the leading token
//! alone always determines which production applies, so `read_form` is a
//! plain one-token-of-lookahead dispatch rather than a loop with minimum
//! binding powers.
//!
//! READER MACROS:
//! ---------------
//! A reader macro is a single token that expands into a two- or
//! three-element list wrapping the form(s) that follow it, the same way a
//! `'` in a Lisp source file expands to `(quote ...)` before anything reads
//! the rest of the line. `^` is the odd one out: it takes *two* forms (meta,
//! then target) and reorders them into `(with-meta target meta)`, since
//! mal evaluates the target before attaching metadata to it.
//!
//! ERROR CONDITIONS:
//! ------------------
//! - `Underflow` — the token stream ran out before a grammar rule was
//!   satisfied: an empty source, a reader macro with no payload, or EOF
//!   mid-hash-map before its value.
//! - `UnbalancedParenthesis` — a `)`, `]`, or `}` appeared with no opener,
//!   or an opener was never closed.
//! - `KeyIsNotString` / `UnevenHashMap` — `{...}` literal-specific
//!   well-formedness checks; see [`Reader::read_map`].
//! - `Lex(LexError)` — a malformed token (currently just an unterminated
//!   string) propagated through, wrapped transparently.
//!
//! There is no error-recovery pass: unlike a compiler that must keep
//! producing diagnostics after the first syntax error, a single `read_str`
//! call stops at the first error and returns it, since the REPL driver
//! reads one line/form at a time and can simply report and move on.

use malc_lex::{Lexer, Token};
use malc_util::{ReadError, ReadResult};
use malc_value::{Keyword, Value};

/// A cursor over an already-tokenized source, supporting one token of
/// lookahead.
///
/// The whole source is tokenized up front by [`Lexer::tokenize`] rather than
/// pulled lazily; mal sources are small (one REPL line, or a file read in
/// full by `load-file`), so there is no benefit to streaming tokens the way
/// a large-file compiler front end would.
struct Reader<'a> {
    /// The complete token stream for this read, produced once by the lexer.
    tokens: Vec<Token<'a>>,
    /// Index of the next token `peek`/`next` will return.
    position: usize,
}

impl<'a> Reader<'a> {
    fn new(tokens: Vec<Token<'a>>) -> Self {
        Reader { tokens, position: 0 }
    }

    /// Returns the next token without consuming it.
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.position).copied()
    }

    /// Returns the next token and advances the cursor past it.
    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Reads exactly one top-level form, dispatching on the leading token.
    ///
    /// # Errors
    /// `Underflow` if the stream is already exhausted; `UnbalancedParenthesis`
    /// if the leading token is a stray closing delimiter.
    fn read_form(&mut self) -> ReadResult<Value> {
        match self.peek().ok_or(ReadError::Underflow)? {
            Token::LParen => self.read_seq(Token::RParen, Value::List),
            Token::LBracket => self.read_seq(Token::RBracket, Value::Vector),
            Token::LBrace => self.read_map(),
            Token::RParen | Token::RBracket | Token::RBrace => {
                Err(ReadError::UnbalancedParenthesis)
            }
            Token::Quote => self.read_wrapped("quote"),
            Token::Quasiquote => self.read_wrapped("quasiquote"),
            Token::Unquote => self.read_wrapped("unquote"),
            Token::SpliceUnquote => self.read_wrapped("splice-unquote"),
            Token::Deref => self.read_wrapped("deref"),
            Token::Caret => self.read_with_meta(),
            Token::Atom(lexeme) => {
                self.next();
                Ok(read_atom(lexeme))
            }
        }
    }

    /// Reads `(` or `[` delimited sequences of forms, sharing the loop
    /// between `read_list` and `read_vector` since only the closing
    /// delimiter and the wrapping constructor differ.
    ///
    /// # Arguments
    /// * `close` — the delimiter token that ends this sequence (`RParen` for
    ///   a list, `RBracket` for a vector).
    /// * `wrap` — the `Value` constructor to apply to the collected forms.
    fn read_seq(
        &mut self,
        close: Token<'a>,
        wrap: fn(Vec<Value>) -> Value,
    ) -> ReadResult<Value> {
        self.next(); // consume opening delimiter
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => return Err(ReadError::UnbalancedParenthesis),
                Some(tok) if tok == close => {
                    self.next();
                    return Ok(wrap(items));
                }
                Some(_) => items.push(self.read_form()?),
            }
        }
    }

    /// Reads a `{...}` hash-map literal: alternating key/value forms,
    /// where each key must be a string or keyword.
    fn read_map(&mut self) -> ReadResult<Value> {
        self.next(); // consume `{`
        let mut pairs = Vec::new();
        loop {
            match self.peek() {
                None => return Err(ReadError::UnbalancedParenthesis),
                Some(Token::RBrace) => {
                    self.next();
                    return Ok(Value::HashMap(pairs));
                }
                Some(_) => {
                    let key = self.read_form()?;
                    if !matches!(key, Value::Str(_) | Value::Keyword(_)) {
                        return Err(ReadError::KeyIsNotString);
                    }
                    match self.peek() {
                        None => return Err(ReadError::UnbalancedParenthesis),
                        Some(Token::RBrace) => return Err(ReadError::UnevenHashMap),
                        Some(_) => {
                            let value = self.read_form()?;
                            pairs.push((key, value));
                        }
                    }
                }
            }
        }
    }

    /// Desugars a quote-family reader macro token into `(symbol form)`.
    fn read_wrapped(&mut self, symbol: &str) -> ReadResult<Value> {
        self.next();
        if self.peek().is_none() {
            return Err(ReadError::Underflow);
        }
        let form = self.read_form()?;
        Ok(Value::List(vec![Value::symbol(symbol), form]))
    }

    /// Desugars `^meta target` into `(with-meta target meta)` — note the
    /// argument swap: the surface syntax gives meta first, but the
    /// produced form evaluates the target first.
    fn read_with_meta(&mut self) -> ReadResult<Value> {
        self.next(); // consume `^`
        if self.peek().is_none() {
            return Err(ReadError::Underflow);
        }
        let meta = self.read_form()?;
        if self.peek().is_none() {
            return Err(ReadError::Underflow);
        }
        let target = self.read_form()?;
        Ok(Value::List(vec![Value::symbol("with-meta"), target, meta]))
    }
}

/// Classifies a single atom lexeme into its `Value`.
///
/// The lexer does not distinguish atom subkinds — `Token::Atom` covers
/// integers, strings, keywords, symbols, and the `nil`/`true`/`false`
/// literals alike — so this is where that classification actually happens,
/// by trying each subkind's surface form in turn and falling back to
/// `symbol` last.
fn read_atom(lexeme: &str) -> Value {
    if let Some(stripped) = lexeme.strip_prefix('"') {
        // Lexer guarantees a matching trailing quote for any Atom that
        // starts with '"'.
        let body = &stripped[..stripped.len() - 1];
        return Value::Str(unescape(body));
    }
    if let Some(name) = lexeme.strip_prefix(':') {
        return Value::Keyword(Keyword::new(name));
    }
    match lexeme {
        "nil" => return Value::Nil,
        "true" => return Value::Boolean(true),
        "false" => return Value::Boolean(false),
        _ => {}
    }
    if let Ok(n) = lexeme.parse::<i64>() {
        return Value::Integer(n);
    }
    Value::symbol(lexeme)
}

/// Un-escapes a string literal's body (`\"`, `\\`, `\n`).
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Reads a single form from `source`, the main entry point used by the
/// REPL driver.
///
/// # Arguments
/// * `source` — one line (or file) of mal source text.
///
/// # Returns
/// The first top-level form in `source`. Trailing tokens after that form
/// are ignored; the REPL driver only ever needs "the next form", and a
/// file with multiple top-level forms is read one `read_str` call at a
/// time by whatever drives a sequence of them.
///
/// # Errors
/// `Underflow` if `source` tokenizes to nothing (blank line, or a
/// comment-only line); any other `ReadError` from the form actually read.
pub fn read_str(source: &str) -> ReadResult<Value> {
    let tokens = Lexer::tokenize(source)?;
    if tokens.is_empty() {
        return Err(ReadError::Underflow);
    }
    let mut reader = Reader::new(tokens);
    reader.read_form()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(source: &str) -> Value {
        read_str(source).expect("read should succeed")
    }

    #[test]
    fn reads_integers_and_symbols() {
        assert_eq!(read("42"), Value::Integer(42));
        assert_eq!(read("-7"), Value::Integer(-7));
        assert_eq!(read("abc"), Value::symbol("abc"));
    }

    #[test]
    fn reads_nil_true_false() {
        assert_eq!(read("nil"), Value::Nil);
        assert_eq!(read("true"), Value::Boolean(true));
        assert_eq!(read("false"), Value::Boolean(false));
    }

    #[test]
    fn reads_string_with_escapes() {
        assert_eq!(read(r#""a\nb""#), Value::Str("a\nb".to_string()));
    }

    #[test]
    fn reads_keyword() {
        assert_eq!(read(":foo"), Value::Keyword(Keyword::new("foo")));
    }

    #[test]
    fn reads_list_and_vector() {
        assert_eq!(
            read("(1 2 3)"),
            Value::List(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)])
        );
        assert_eq!(
            read("[1 2 3]"),
            Value::Vector(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)])
        );
    }

    #[test]
    fn reads_hash_map() {
        assert_eq!(
            read(r#"{"a" 1}"#),
            Value::HashMap(vec![(Value::string("a"), Value::Integer(1))])
        );
    }

    #[test]
    fn desugars_quote_family() {
        assert_eq!(
            read("'a"),
            Value::List(vec![Value::symbol("quote"), Value::symbol("a")])
        );
        assert_eq!(
            read("`a"),
            Value::List(vec![Value::symbol("quasiquote"), Value::symbol("a")])
        );
        assert_eq!(
            read("~a"),
            Value::List(vec![Value::symbol("unquote"), Value::symbol("a")])
        );
        assert_eq!(
            read("~@a"),
            Value::List(vec![Value::symbol("splice-unquote"), Value::symbol("a")])
        );
        assert_eq!(
            read("@a"),
            Value::List(vec![Value::symbol("deref"), Value::symbol("a")])
        );
    }

    #[test]
    fn desugars_with_meta_target_first() {
        assert_eq!(
            read("^{} []"),
            Value::List(vec![
                Value::symbol("with-meta"),
                Value::Vector(vec![]),
                Value::HashMap(vec![]),
            ])
        );
    }

    #[test]
    fn unbalanced_parenthesis_is_an_error() {
        assert_eq!(read_str("(1 2"), Err(ReadError::UnbalancedParenthesis));
        assert_eq!(read_str(")"), Err(ReadError::UnbalancedParenthesis));
    }

    #[test]
    fn reader_macro_with_no_payload_underflows() {
        assert_eq!(read_str("'"), Err(ReadError::Underflow));
        assert_eq!(read_str("^{}"), Err(ReadError::Underflow));
    }

    #[test]
    fn hash_map_key_must_be_string_or_keyword() {
        assert_eq!(read_str("{1 2}"), Err(ReadError::KeyIsNotString));
    }

    #[test]
    fn uneven_hash_map_is_an_error() {
        assert_eq!(read_str(r#"{"a" 1 "b"}"#), Err(ReadError::UnevenHashMap));
    }

    #[test]
    fn empty_source_underflows() {
        assert_eq!(read_str(""), Err(ReadError::Underflow));
        assert_eq!(read_str("; just a comment"), Err(ReadError::Underflow));
    }
}
