//! Property test: concatenating the tokens the lexer produces, separated
//! by single spaces, re-tokenizes to the same sequence. This is the
//! tokenizer half of the reader's round-trip testable property — distinct
//! from the value-level `print . parse = id` property, which lives in
//! `malc-eval`'s `roundtrip.rs` since it needs the printer.

use malc_lex::{Lexer, Token};
use proptest::prelude::*;

/// One token's canonical source spelling, used to rebuild an input string
/// from a generated token sequence.
fn spelling(token: &Token<'_>) -> String {
    match token {
        Token::LParen => "(".to_string(),
        Token::RParen => ")".to_string(),
        Token::LBracket => "[".to_string(),
        Token::RBracket => "]".to_string(),
        Token::LBrace => "{".to_string(),
        Token::RBrace => "}".to_string(),
        Token::Quote => "'".to_string(),
        Token::Quasiquote => "`".to_string(),
        Token::Unquote => "~".to_string(),
        Token::SpliceUnquote => "~@".to_string(),
        Token::Deref => "@".to_string(),
        Token::Caret => "^".to_string(),
        Token::Atom(lexeme) => lexeme.to_string(),
    }
}

fn arb_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("(".to_string()),
        Just(")".to_string()),
        Just("[".to_string()),
        Just("]".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just("'".to_string()),
        Just("`".to_string()),
        Just("~".to_string()),
        Just("~@".to_string()),
        Just("@".to_string()),
        Just("^".to_string()),
        "[a-zA-Z][a-zA-Z0-9_*+=<>!?-]{0,6}".prop_map(|s| s),
        r#""[a-zA-Z0-9 ]{0,6}""#.prop_map(|s| s),
    ]
}

proptest! {
    #[test]
    fn retokenizing_joined_spellings_reproduces_the_sequence(lexemes in prop::collection::vec(arb_token(), 0..12)) {
        let source = lexemes.join(" ");
        let first_pass: Vec<Token<'_>> = Lexer::tokenize(&source).expect("generated source should lex");

        let rejoined = first_pass.iter().map(spelling).collect::<Vec<_>>().join(" ");
        let second_pass: Vec<Token<'_>> = Lexer::tokenize(&rejoined).expect("rejoined source should lex");

        prop_assert_eq!(first_pass, second_pass);
    }
}
