//! malc-lex — the mal tokenizer.
//!
//! ============================================================================
//! LEXICAL ANALYSIS OVERVIEW
//! ============================================================================
//!
//! Tokenization is the first phase of reading a mal form: it turns a flat
//! source string into a flat stream of tokens, without yet knowing anything
//! about lists, vectors, maps, or atom classification — that structure is
//! `malc-read`'s job, one layer up.
//!
//! LEXEME vs TOKEN:
//! ----------------
//! - Lexeme: the literal substring of the source (e.g. `"(`, `"foo"`, `42"`).
//! - Token: the tagged unit the lexeme belongs to (`Token::LParen`,
//!   `Token::Atom("42")`).
//!
//! mal's grammar keeps this split unusually shallow: there are exactly nine
//! punctuation lexemes with a fixed spelling, and everything else — numbers,
//! strings, keywords, symbols, `nil`/`true`/`false` — is a single `Atom`
//! lexeme the lexer does not look inside. Classifying an atom's *meaning* is
//! deferred to `read_atom` in `malc-read`, exactly as mal's reader cursor
//! model expects: the lexer's contract is spelling, not semantics.
//!
//! TOKEN CATEGORIES:
//! ------------------
//! 1. DELIMITERS — `( ) [ ] { }`, always single bytes, always their own
//!    token.
//! 2. READER-MACRO PREFIXES — `' \` ~ ~@ @ ^`, desugared into `(symbol
//!    form)` lists one layer up; `~@` is the one two-character token, built
//!    from a one-byte lookahead after `~`.
//! 3. ATOMS — everything else, scanned as a single run up to the next
//!    delimiter/whitespace/quote byte. A string atom additionally tracks its
//!    own nested quoting and backslash-escaping so an embedded `)` or space
//!    inside `"..."` never ends the atom early.
//!
//! ============================================================================
//! STATE MACHINE
//! ============================================================================
//!
//! Five states, entered fresh for every call to `next_token`:
//!
//! ```text
//!            '('')''['']''{''}' "'" '`' '^' '@'          (byte consumed,
//!                  │                                       token emitted)
//!                  ▼
//!   ┌──────────┐  '~'   ┌───────────┐  '@'    (consume, emit SpliceUnquote)
//!   │ TopLevel │ ─────▶ │ SeenTilde │ ───────▶ done
//!   └──────────┘        └───────────┘  other  (emit Unquote, byte unread)
//!        │  '"'               │
//!        ▼                    ▼
//!   ┌──────────┐         (falls back to TopLevel's other branches)
//!   │  String  │◀─────────────────────────┐
//!   └──────────┘          '\\'             │
//!        │  '"' (close, emit Atom)         │
//!        │                            ┌────┴──────────┐
//!        └───────────────────────────▶│ StringEscape  │
//!                                     └───────────────┘
//!                                      (any byte consumed verbatim,
//!                                       back to String)
//!
//!   anything else at TopLevel ──▶ NonSpecial ──▶ scan to next delimiter,
//!                                                emit Atom
//! ```
//!
//! - `TopLevel` — between tokens, deciding what the next one is from its
//!   first byte.
//! - `SeenTilde` — just consumed a `~`; one more lookahead byte decides
//!   between `~` (unquote) and `~@` (splice-unquote).
//! - `String` — inside a `"..."` string literal; only `"` (close) and `\`
//!   (escape) are special, every other byte is part of the atom.
//! - `StringEscape` — inside a string literal, just consumed a `\`; the very
//!   next byte is consumed verbatim (unescaping happens later, in
//!   `malc-read`'s `read_atom`, not here).
//! - `NonSpecial` — scanning a run of atom characters (a symbol, number,
//!   keyword, or bare `nil`/`true`/`false`) up to the next delimiter.
//!
//! An unterminated string (EOF reached while in `String` or `StringEscape`)
//! is the lexer's one failure mode, `LexError::UnterminatedString`.
//!
//! WHITESPACE AND COMMENTS:
//! -------------------------
//! Whitespace (space, tab, `\n`, `\r`, and `,` — mal treats commas as
//! whitespace) and `;`-prefixed line comments are skipped between tokens and
//! never produce a token of their own; a comment runs to the next `\n` or
//! EOF, whichever comes first.

use malc_util::{LexError, LexResult};

/// A single mal token.
///
/// Everything that is not one of the nine punctuation forms is an opaque
/// `Atom` slice — the reader, not the lexer, decides whether an atom is an
/// integer, a string, a keyword, or a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'source> {
    /// `(` — opens a list.
    LParen,
    /// `)` — closes a list.
    RParen,
    /// `[` — opens a vector.
    LBracket,
    /// `]` — closes a vector.
    RBracket,
    /// `{` — opens a hash-map.
    LBrace,
    /// `}` — closes a hash-map.
    RBrace,
    /// `'` — desugars to `(quote form)`.
    Quote,
    /// `` ` `` — desugars to `(quasiquote form)`.
    Quasiquote,
    /// `~` — desugars to `(unquote form)`.
    Unquote,
    /// `~@` — desugars to `(splice-unquote form)`.
    SpliceUnquote,
    /// `@` — desugars to `(deref form)`.
    Deref,
    /// `^` — desugars to `(with-meta target meta)`, with target and meta
    /// swapped relative to their order in the surface syntax.
    Caret,
    /// A raw, unclassified lexeme: a string literal (including its
    /// quotes), a number, a symbol, or a keyword.
    Atom(&'source str),
}

/// One state in the tokenizer's scanning loop; see the module-level state
/// diagram for the transitions between these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between tokens, deciding what the next one is.
    TopLevel,
    /// Just consumed `~`; one lookahead byte decides `Unquote` vs.
    /// `SpliceUnquote`.
    SeenTilde,
    /// Scanning the body of a `"..."` string literal.
    String,
    /// Inside a string literal, just consumed `\`; the next byte is
    /// consumed verbatim regardless of what it is.
    StringEscape,
    /// Scanning a run of non-delimiter bytes that will become an `Atom`.
    NonSpecial,
}

/// Scans a mal source string into a sequence of tokens.
///
/// Holds a cursor (`position`) over the source; `bytes` is a byte-slice
/// view of the same `source` string used for delimiter checks without
/// re-deriving UTF-8 boundaries on every lookahead.
pub struct Lexer<'source> {
    /// The original source text, used to slice out atom lexemes.
    source: &'source str,
    /// Byte view of `source`, used for all positional scanning.
    bytes: &'source [u8],
    /// Current scan position, a byte offset into `bytes`.
    position: usize,
}

impl<'source> Lexer<'source> {
    /// Create a lexer positioned at the start of `source`.
    ///
    /// # Arguments
    /// * `source` — the mal source text to scan.
    pub fn new(source: &'source str) -> Self {
        Lexer {
            source,
            bytes: source.as_bytes(),
            position: 0,
        }
    }

    /// Tokenize the entire source, returning every token in order.
    ///
    /// # Arguments
    /// * `source` — the mal source text to scan.
    ///
    /// # Returns
    /// * `Ok(Vec<Token>)` — the full token sequence.
    /// * `Err(LexError)` — an unterminated string literal was found.
    pub fn tokenize(source: &'source str) -> LexResult<Vec<Token<'source>>> {
        Lexer::new(source).collect()
    }

    /// The next unconsumed byte, without advancing `position`.
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    /// Whether `byte` ends a run of `NonSpecial` atom characters: any
    /// whitespace byte, the start of a string/comment, or one of the nine
    /// punctuation bytes.
    fn is_delimiter(byte: u8) -> bool {
        matches!(
            byte,
            b' ' | b'\t' | b'\n' | b'\r' | b',' | b'"' | b';' | b'(' | b')' | b'[' | b']' | b'{'
                | b'}' | b'\'' | b'`' | b'~' | b'^' | b'@'
        )
    }

    /// Advances past whitespace, commas, and `;`-prefixed line comments
    /// until the next token's first byte (or EOF).
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') | Some(b',') => {
                    self.position += 1;
                }
                Some(b';') => {
                    while let Some(b) = self.peek() {
                        if b == b'\n' {
                            break;
                        }
                        self.position += 1;
                    }
                }
                _ => break,
            }
        }
    }

    /// Scans and returns the next token, or `None` at EOF.
    ///
    /// # Returns
    /// * `Ok(Some(token))` — the next token was scanned successfully.
    /// * `Ok(None)` — the source is exhausted.
    /// * `Err(LexError::UnterminatedString)` — EOF was reached inside a
    ///   `"..."` string literal.
    fn next_token(&mut self) -> LexResult<Option<Token<'source>>> {
        self.skip_whitespace_and_comments();

        let start = self.position;
        let byte = match self.peek() {
            Some(b) => b,
            None => return Ok(None),
        };

        let mut state = State::TopLevel;
        loop {
            match state {
                State::TopLevel => match byte {
                    b'(' => {
                        self.position += 1;
                        return Ok(Some(Token::LParen));
                    }
                    b')' => {
                        self.position += 1;
                        return Ok(Some(Token::RParen));
                    }
                    b'[' => {
                        self.position += 1;
                        return Ok(Some(Token::LBracket));
                    }
                    b']' => {
                        self.position += 1;
                        return Ok(Some(Token::RBracket));
                    }
                    b'{' => {
                        self.position += 1;
                        return Ok(Some(Token::LBrace));
                    }
                    b'}' => {
                        self.position += 1;
                        return Ok(Some(Token::RBrace));
                    }
                    b'\'' => {
                        self.position += 1;
                        return Ok(Some(Token::Quote));
                    }
                    b'`' => {
                        self.position += 1;
                        return Ok(Some(Token::Quasiquote));
                    }
                    b'^' => {
                        self.position += 1;
                        return Ok(Some(Token::Caret));
                    }
                    b'@' => {
                        self.position += 1;
                        return Ok(Some(Token::Deref));
                    }
                    b'~' => {
                        self.position += 1;
                        state = State::SeenTilde;
                    }
                    b'"' => {
                        self.position += 1;
                        state = State::String;
                    }
                    _ => {
                        state = State::NonSpecial;
                    }
                },
                State::SeenTilde => {
                    if self.peek() == Some(b'@') {
                        self.position += 1;
                        return Ok(Some(Token::SpliceUnquote));
                    }
                    return Ok(Some(Token::Unquote));
                }
                State::String => match self.peek() {
                    None => return Err(LexError::UnterminatedString),
                    Some(b'"') => {
                        self.position += 1;
                        return Ok(Some(Token::Atom(&self.source[start..self.position])));
                    }
                    Some(b'\\') => {
                        self.position += 1;
                        state = State::StringEscape;
                    }
                    Some(_) => {
                        self.position += 1;
                    }
                },
                State::StringEscape => match self.peek() {
                    None => return Err(LexError::UnterminatedString),
                    Some(_) => {
                        self.position += 1;
                        state = State::String;
                    }
                },
                State::NonSpecial => {
                    while let Some(b) = self.peek() {
                        if Self::is_delimiter(b) {
                            break;
                        }
                        self.position += 1;
                    }
                    return Ok(Some(Token::Atom(&self.source[start..self.position])));
                }
            }
        }
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = LexResult<Token<'source>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => None,
            Err(err) => {
                // Advance past EOF so a subsequent call doesn't re-error forever.
                self.position = self.bytes.len() + 1;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token<'_>> {
        Lexer::tokenize(source).expect("lex should succeed")
    }

    #[test]
    fn tokenizes_simple_list() {
        assert_eq!(
            tokens("(+ 1 2)"),
            vec![
                Token::LParen,
                Token::Atom("+"),
                Token::Atom("1"),
                Token::Atom("2"),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn tokenizes_reader_macros() {
        assert_eq!(
            tokens("'(1) `(1) ~a ~@a @a ^{} []"),
            vec![
                Token::Quote,
                Token::LParen,
                Token::Atom("1"),
                Token::RParen,
                Token::Quasiquote,
                Token::LParen,
                Token::Atom("1"),
                Token::RParen,
                Token::Unquote,
                Token::Atom("a"),
                Token::SpliceUnquote,
                Token::Atom("a"),
                Token::Deref,
                Token::Atom("a"),
                Token::Caret,
                Token::LBrace,
                Token::RBrace,
                Token::LBracket,
                Token::RBracket,
            ]
        );
    }

    #[test]
    fn tokenizes_string_with_escapes() {
        assert_eq!(tokens(r#""hello \"world\"""#), vec![Token::Atom(r#""hello \"world\"""#)]);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert_eq!(Lexer::tokenize(r#""abc"#), Err(LexError::UnterminatedString));
    }

    #[test]
    fn skips_comments_and_commas() {
        assert_eq!(
            tokens("; a comment\n(1, 2) ; trailing"),
            vec![Token::LParen, Token::Atom("1"), Token::Atom("2"), Token::RParen]
        );
    }

    #[test]
    fn empty_source_has_no_tokens() {
        assert_eq!(tokens(""), vec![]);
        assert_eq!(tokens("   ; only a comment"), vec![]);
    }
}
