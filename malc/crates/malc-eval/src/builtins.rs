//! The builtin namespace seeded into every root environment.
//!
//! Covers the named minimum from the spec (arithmetic, comparison, list
//! operations, equality, printing) plus a small set of symmetric
//! companions — type predicates, sequence constructors/accessors — without
//! which the named minimum is write-only (e.g. `count` without `first`/
//! `rest` can observe a list's size but never walk it).

use malc_value::{BuiltinFunction, Env, Keyword, Value};

use crate::printer::pr_str;

fn builtin(name: &'static str, func: impl Fn(&[Value]) -> Value + 'static) -> Value {
    Value::BuiltinFunction(BuiltinFunction {
        name,
        func: std::rc::Rc::new(func),
    })
}

fn as_int(value: &Value, context: &str) -> Result<i64, Value> {
    match value {
        Value::Integer(n) => Ok(*n),
        other => Err(Value::error(format!(
            "{context}: expected integer, got {}",
            other.type_name()
        ))),
    }
}

/// Applies a strictly binary integer operator, matching `int_compare`'s
/// arity discipline: `+ - * /` are two-integer operators (spec.md §4.5),
/// not an arbitrary-arity fold.
fn int_op(name: &'static str, args: &[Value], op: fn(i64, i64) -> i64) -> Value {
    if args.len() != 2 {
        return Value::error(format!("{name}: expected 2 arguments, got {}", args.len()));
    }
    let a = match as_int(&args[0], name) {
        Ok(n) => n,
        Err(e) => return e,
    };
    let b = match as_int(&args[1], name) {
        Ok(n) => n,
        Err(e) => return e,
    };
    Value::Integer(op(a, b))
}

fn int_compare(name: &'static str, args: &[Value], op: fn(i64, i64) -> bool) -> Value {
    if args.len() != 2 {
        return Value::error(format!("{name}: expected 2 arguments, got {}", args.len()));
    }
    let a = match as_int(&args[0], name) {
        Ok(n) => n,
        Err(e) => return e,
    };
    let b = match as_int(&args[1], name) {
        Ok(n) => n,
        Err(e) => return e,
    };
    Value::Boolean(op(a, b))
}

fn seq_of<'a>(value: &'a Value, name: &str) -> Result<&'a [Value], Value> {
    value
        .as_seq()
        .ok_or_else(|| Value::error(format!("{name}: expected a list or vector, got {}", value.type_name())))
}

/// Populates `env` with every builtin in the namespace.
pub fn install(env: &Env) {
    env.set("+", builtin("+", |args| int_op("+", args, |a, b| a.wrapping_add(b))));
    env.set("-", builtin("-", |args| int_op("-", args, |a, b| a.wrapping_sub(b))));
    env.set("*", builtin("*", |args| int_op("*", args, |a, b| a.wrapping_mul(b))));
    env.set("/", builtin("/", |args| {
        if args.len() != 2 {
            return Value::error(format!("/: expected 2 arguments, got {}", args.len()));
        }
        let a = match as_int(&args[0], "/") {
            Ok(n) => n,
            Err(e) => return e,
        };
        let b = match as_int(&args[1], "/") {
            Ok(n) => n,
            Err(e) => return e,
        };
        if b == 0 {
            return Value::error("/: division by zero");
        }
        Value::Integer(a / b)
    }));

    env.set("<", builtin("<", |args| int_compare("<", args, |a, b| a < b)));
    env.set("<=", builtin("<=", |args| int_compare("<=", args, |a, b| a <= b)));
    env.set(">", builtin(">", |args| int_compare(">", args, |a, b| a > b)));
    env.set(">=", builtin(">=", |args| int_compare(">=", args, |a, b| a >= b)));

    env.set(
        "list",
        builtin("list", |args| Value::List(args.to_vec())),
    );
    env.set(
        "list?",
        builtin("list?", |args| {
            Value::Boolean(matches!(args.first(), Some(Value::List(_))))
        }),
    );
    env.set(
        "empty?",
        builtin("empty?", |args| match args.first().and_then(|v| v.as_seq()) {
            Some(items) => Value::Boolean(items.is_empty()),
            None => Value::error("empty?: expected a list or vector"),
        }),
    );
    env.set(
        "count",
        builtin("count", |args| match args.first() {
            Some(Value::Nil) => Value::Integer(0),
            Some(v) => match v.as_seq() {
                Some(items) => Value::Integer(items.len() as i64),
                None => Value::error(format!("count: expected a list or vector, got {}", v.type_name())),
            },
            None => Value::error("count: expected 1 argument, got 0"),
        }),
    );

    env.set(
        "=",
        builtin("=", |args| {
            if args.len() != 2 {
                return Value::error(format!("=: expected 2 arguments, got {}", args.len()));
            }
            Value::Boolean(args[0] == args[1])
        }),
    );

    env.set(
        "pr-str",
        builtin("pr-str", |args| {
            Value::Str(args.iter().map(|v| pr_str(v, true)).collect::<Vec<_>>().join(" "))
        }),
    );
    env.set(
        "str",
        builtin("str", |args| {
            Value::Str(args.iter().map(|v| pr_str(v, false)).collect::<Vec<_>>().concat())
        }),
    );
    env.set(
        "prn",
        builtin("prn", |args| {
            println!("{}", args.iter().map(|v| pr_str(v, true)).collect::<Vec<_>>().join(" "));
            Value::Nil
        }),
    );
    env.set(
        "println",
        builtin("println", |args| {
            println!("{}", args.iter().map(|v| pr_str(v, false)).collect::<Vec<_>>().join(" "));
            Value::Nil
        }),
    );

    // --- supplemental constructors/predicates/accessors ---

    env.set("vector", builtin("vector", |args| Value::Vector(args.to_vec())));
    env.set(
        "vector?",
        builtin("vector?", |args| {
            Value::Boolean(matches!(args.first(), Some(Value::Vector(_))))
        }),
    );
    env.set("hash-map", builtin("hash-map", |args| {
        if args.len() % 2 != 0 {
            return Value::error("hash-map: expected an even number of arguments");
        }
        let pairs = args.chunks(2).map(|pair| (pair[0].clone(), pair[1].clone())).collect();
        Value::HashMap(pairs)
    }));
    env.set(
        "map?",
        builtin("map?", |args| {
            Value::Boolean(matches!(args.first(), Some(Value::HashMap(_))))
        }),
    );

    env.set("nil?", builtin("nil?", |args| Value::Boolean(matches!(args.first(), Some(Value::Nil)))));
    env.set("true?", builtin("true?", |args| Value::Boolean(matches!(args.first(), Some(Value::Boolean(true))))));
    env.set("false?", builtin("false?", |args| Value::Boolean(matches!(args.first(), Some(Value::Boolean(false))))));
    env.set("symbol?", builtin("symbol?", |args| Value::Boolean(matches!(args.first(), Some(Value::Symbol(_))))));
    env.set("string?", builtin("string?", |args| Value::Boolean(matches!(args.first(), Some(Value::Str(_))))));
    env.set("keyword?", builtin("keyword?", |args| Value::Boolean(matches!(args.first(), Some(Value::Keyword(_))))));
    env.set(
        "fn?",
        builtin("fn?", |args| {
            Value::Boolean(matches!(
                args.first(),
                Some(Value::Closure(_)) | Some(Value::BuiltinFunction(_))
            ))
        }),
    );

    env.set("cons", builtin("cons", |args| {
        if args.len() != 2 {
            return Value::error(format!("cons: expected 2 arguments, got {}", args.len()));
        }
        match seq_of(&args[1], "cons") {
            Ok(rest) => {
                let mut items = Vec::with_capacity(rest.len() + 1);
                items.push(args[0].clone());
                items.extend_from_slice(rest);
                Value::List(items)
            }
            Err(e) => e,
        }
    }));
    env.set("concat", builtin("concat", |args| {
        let mut items = Vec::new();
        for arg in args {
            match seq_of(arg, "concat") {
                Ok(seq) => items.extend_from_slice(seq),
                Err(e) => return e,
            }
        }
        Value::List(items)
    }));
    env.set("first", builtin("first", |args| match args.first() {
        Some(Value::Nil) | None => Value::Nil,
        Some(v) => match seq_of(v, "first") {
            Ok(items) => items.first().cloned().unwrap_or(Value::Nil),
            Err(e) => e,
        },
    }));
    env.set("rest", builtin("rest", |args| match args.first() {
        Some(Value::Nil) | None => Value::List(vec![]),
        Some(v) => match seq_of(v, "rest") {
            Ok(items) => Value::List(items.iter().skip(1).cloned().collect()),
            Err(e) => e,
        },
    }));
    env.set("nth", builtin("nth", |args| {
        if args.len() != 2 {
            return Value::error(format!("nth: expected 2 arguments, got {}", args.len()));
        }
        let items = match seq_of(&args[0], "nth") {
            Ok(items) => items,
            Err(e) => return e,
        };
        let index = match as_int(&args[1], "nth") {
            Ok(n) => n,
            Err(e) => return e,
        };
        if index < 0 {
            return Value::error("nth: index out of range");
        }
        items
            .get(index as usize)
            .cloned()
            .unwrap_or_else(|| Value::error("nth: index out of range"))
    }));

    env.set("get", builtin("get", |args| {
        if args.len() != 2 {
            return Value::error(format!("get: expected 2 arguments, got {}", args.len()));
        }
        match &args[0] {
            Value::Nil => Value::Nil,
            Value::HashMap(pairs) => pairs
                .iter()
                .find(|(k, _)| *k == args[1])
                .map(|(_, v)| v.clone())
                .unwrap_or(Value::Nil),
            other => Value::error(format!("get: expected a hash-map, got {}", other.type_name())),
        }
    }));
    env.set("contains?", builtin("contains?", |args| {
        if args.len() != 2 {
            return Value::error(format!("contains?: expected 2 arguments, got {}", args.len()));
        }
        match &args[0] {
            Value::HashMap(pairs) => Value::Boolean(pairs.iter().any(|(k, _)| *k == args[1])),
            other => Value::error(format!("contains?: expected a hash-map, got {}", other.type_name())),
        }
    }));
    env.set("keys", builtin("keys", |args| match args.first() {
        Some(Value::HashMap(pairs)) => Value::List(pairs.iter().map(|(k, _)| k.clone()).collect()),
        Some(other) => Value::error(format!("keys: expected a hash-map, got {}", other.type_name())),
        None => Value::error("keys: expected 1 argument, got 0"),
    }));
    env.set("vals", builtin("vals", |args| match args.first() {
        Some(Value::HashMap(pairs)) => Value::List(pairs.iter().map(|(_, v)| v.clone()).collect()),
        Some(other) => Value::error(format!("vals: expected a hash-map, got {}", other.type_name())),
        None => Value::error("vals: expected 1 argument, got 0"),
    }));

    env.set("error-message", builtin("error-message", |args| match args.first() {
        Some(Value::Error(inner)) => (**inner).clone(),
        Some(other) => Value::error(format!("error-message: expected an error, got {}", other.type_name())),
        None => Value::error("error-message: expected 1 argument, got 0"),
    }));
}
