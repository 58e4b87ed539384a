//! malc-eval — the evaluator, builtin namespace, and printer.
//!
//! This crate is the direct tree-walking counterpart of the static
//! analysis pass other members of this workspace's lineage place at the
//! same pipeline position: instead of type-checking and lowering to an
//! intermediate representation, it evaluates a [`Value`](malc_value::Value)
//! tree directly against a lexical [`Env`](malc_value::Env).

pub mod builtins;
pub mod eval;
pub mod printer;

pub use eval::{apply, eval, eval_ast};
pub use printer::pr_str;

use malc_value::{Env, Value};

/// Builds a fresh root environment seeded with every builtin.
pub fn root_env() -> Env {
    let env = Env::new(None);
    builtins::install(&env);
    eval(&bootstrap_form(), &env);
    env
}

/// The `not` bootstrap binding, defined in terms of already-seeded
/// builtins and `if`, exactly as the reference environment-initialization
/// contract describes. Exposed so the driver can re-run it against an
/// externally constructed environment if needed, and so it's exercised
/// directly in tests.
pub fn bootstrap_form() -> Value {
    read_bootstrap_not()
}

fn read_bootstrap_not() -> Value {
    Value::List(vec![
        Value::symbol("def!"),
        Value::symbol("not"),
        Value::List(vec![
            Value::symbol("fn*"),
            Value::Vector(vec![Value::symbol("a")]),
            Value::List(vec![
                Value::symbol("if"),
                Value::symbol("a"),
                Value::Boolean(false),
                Value::Boolean(true),
            ]),
        ]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_env_has_not_bound() {
        let env = root_env();
        let call = Value::List(vec![Value::symbol("not"), Value::Boolean(true)]);
        assert_eq!(eval(&call, &env), Value::Boolean(false));
    }

    #[test]
    fn root_env_has_arithmetic_builtins() {
        let env = root_env();
        let call = Value::List(vec![Value::symbol("+"), Value::Integer(1), Value::Integer(2)]);
        assert_eq!(eval(&call, &env), Value::Integer(3));
    }
}
