//! Property test: `read_str(pr_str(v, true)) == v` for any value built
//! without functions (functions have no readable surface syntax, so the
//! round-trip property only claims to hold for the rest of the data
//! model, per the evaluator's testable-properties contract).

use malc_eval::pr_str;
use malc_read::read_str;
use malc_value::{Keyword, Value};
use proptest::prelude::*;

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::Boolean),
        any::<i64>().prop_map(Value::Integer),
        "[a-zA-Z][a-zA-Z0-9_]{0,8}".prop_map(Value::symbol),
        "[a-zA-Z][a-zA-Z0-9_]{0,8}".prop_map(|s| Value::Keyword(Keyword::new(&s))),
        "[a-zA-Z0-9 ]{0,8}".prop_map(Value::string),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = arb_scalar();
    leaf.prop_recursive(4, 32, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Vector),
            prop::collection::vec(
                ("[a-zA-Z][a-zA-Z0-9_]{0,8}".prop_map(Value::string), inner.clone()),
                0..4
            )
            .prop_map(Value::HashMap),
        ]
    })
}

proptest! {
    #[test]
    fn round_trips_through_print_and_read(value in arb_value()) {
        let printed = pr_str(&value, true);
        let parsed = read_str(&printed).expect("printed form should read back");
        prop_assert_eq!(parsed, value);
    }
}
