//! The evaluator: special forms and function application.
//!
//! `eval` dispatches on the AST form before touching any sub-expression:
//! a non-list evaluates element-wise through [`eval_ast`]; a list whose
//! head names one of the five special forms (`def!`, `let*`, `do`, `if`,
//! `fn*`) is handled here directly; any other list is evaluated
//! element-wise and then applied.

use malc_value::{Closure, Env, Params, Value};

/// Evaluate `ast` in `env`, returning a [`Value`]. Evaluation never
/// raises a Rust error for an ordinary mal-level failure — those are
/// reported as `Value::Error`, per the error-as-value design.
pub fn eval(ast: &Value, env: &Env) -> Value {
    let mut ast = ast.clone();
    let mut env = env.clone();

    // Direct-recursion loop: `do`/`if`/`let*` tail positions rebind
    // `ast`/`env` and continue instead of recursing, so a long chain of
    // those forms does not grow the Rust call stack. This is the direct
    // recursion the spec's non-goals describe as in scope (full
    // mutual/general TCO across arbitrary function calls is explicitly
    // out of scope).
    loop {
        let list = match &ast {
            Value::List(items) if !items.is_empty() => items.clone(),
            _ => return eval_ast(&ast, &env),
        };

        if let Value::Symbol(head) = &list[0] {
            match head.as_str() {
                "def!" => return eval_def(&list, &env),
                "let*" => {
                    let (new_env, body) = match eval_let_bindings(&list, &env) {
                        Ok(pair) => pair,
                        Err(e) => return e,
                    };
                    ast = body;
                    env = new_env;
                    continue;
                }
                "do" => {
                    if list.len() < 2 {
                        return Value::error("missing operands");
                    }
                    for form in &list[1..list.len() - 1] {
                        let result = eval(form, &env);
                        if matches!(result, Value::Error(_)) {
                            return result;
                        }
                    }
                    ast = list[list.len() - 1].clone();
                    continue;
                }
                "if" => {
                    if list.len() < 3 || list.len() > 4 {
                        return Value::error("missing operands");
                    }
                    let cond = eval(&list[1], &env);
                    if matches!(cond, Value::Error(_)) {
                        return cond;
                    }
                    if cond.is_truthy() {
                        ast = list[2].clone();
                        continue;
                    } else if let Some(else_branch) = list.get(3) {
                        ast = else_branch.clone();
                        continue;
                    } else {
                        return Value::Nil;
                    }
                }
                "fn*" => return eval_fn_star(&list, &env),
                _ => {}
            }
        }

        let evaluated = match eval_ast(&ast, &env) {
            Value::List(items) => items,
            other => return other, // eval_ast only ever returns Error here for a List input
        };

        let (func, args) = evaluated.split_first().expect("non-empty list stays non-empty");
        return apply(func, args);
    }
}

/// Evaluates every element of a list/vector/hash-map; leaves everything
/// else (including symbols, resolved here) untouched aside from the
/// symbol lookup itself.
pub fn eval_ast(ast: &Value, env: &Env) -> Value {
    match ast {
        Value::Symbol(name) => match env.get(name) {
            Some(value) => value,
            None => Value::error(format!("{name} not found")),
        },
        Value::List(items) => match eval_each(items, env) {
            Ok(values) => Value::List(values),
            Err(e) => e,
        },
        Value::Vector(items) => match eval_each(items, env) {
            Ok(values) => Value::Vector(values),
            Err(e) => e,
        },
        Value::HashMap(pairs) => {
            let mut evaluated = Vec::with_capacity(pairs.len());
            for (k, v) in pairs {
                let k = eval(k, env);
                if matches!(k, Value::Error(_)) {
                    return k;
                }
                let v = eval(v, env);
                if matches!(v, Value::Error(_)) {
                    return v;
                }
                evaluated.push((k, v));
            }
            Value::HashMap(evaluated)
        }
        other => other.clone(),
    }
}

fn eval_each(items: &[Value], env: &Env) -> Result<Vec<Value>, Value> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let value = eval(item, env);
        if matches!(value, Value::Error(_)) {
            return Err(value);
        }
        out.push(value);
    }
    Ok(out)
}

fn eval_def(list: &[Value], env: &Env) -> Value {
    if list.len() != 3 {
        return Value::error("missing operands");
    }
    let name = match list[1].as_symbol() {
        Some(name) => name.to_string(),
        None => return Value::error("def! expects a symbol"),
    };
    let value = eval(&list[2], env);
    if matches!(value, Value::Error(_)) {
        return value;
    }
    env.set(&name, value.clone());
    value
}

fn eval_let_bindings(list: &[Value], env: &Env) -> Result<(Value, Env), Value> {
    if list.len() != 3 {
        return Err(Value::error("missing operands"));
    }
    let bindings = match &list[1] {
        Value::List(items) | Value::Vector(items) => items,
        _ => return Err(Value::error("let* bindings expect a list")),
    };
    if bindings.len() % 2 != 0 {
        return Err(Value::error("let* bindings need an even number of arguments"));
    }

    let new_env = Env::new(Some(env.clone()));
    for pair in bindings.chunks(2) {
        let name = match pair[0].as_symbol() {
            Some(name) => name.to_string(),
            None => return Err(Value::error("def! expects a symbol")),
        };
        let value = eval(&pair[1], &new_env);
        if matches!(value, Value::Error(_)) {
            return Err(value);
        }
        new_env.set(&name, value);
    }

    Ok((list[2].clone(), new_env))
}

fn eval_fn_star(list: &[Value], env: &Env) -> Value {
    if list.len() != 3 {
        return Value::error("missing operands");
    }
    let param_forms = match &list[1] {
        Value::List(items) | Value::Vector(items) => items,
        _ => return Value::error("let* bindings expect a list"),
    };

    let mut fixed = Vec::new();
    let mut variadic = None;
    let mut iter = param_forms.iter();
    while let Some(param) = iter.next() {
        let name = match param.as_symbol() {
            Some(name) => name,
            None => return Value::error("def! expects a symbol"),
        };
        if name == "&" {
            let rest_name = match iter.next().and_then(Value::as_symbol) {
                Some(name) => name.to_string(),
                None => return Value::error("def! expects a symbol"),
            };
            if iter.next().is_some() {
                return Value::error("fn* expects & to be followed by exactly one rest parameter");
            }
            variadic = Some(rest_name);
            break;
        }
        fixed.push(name.to_string());
    }

    Value::Closure(Closure {
        params: Params { fixed, variadic },
        body: std::rc::Rc::new(list[2].clone()),
        env: env.clone(),
    })
}

/// Applies `func` to `args`: a `BuiltinFunction` calls straight through, a
/// `Closure` binds its parameters into a fresh child environment and
/// evaluates its body, and anything else is an error.
pub fn apply(func: &Value, args: &[Value]) -> Value {
    match func {
        Value::BuiltinFunction(f) => (f.func)(args),
        Value::Closure(closure) => {
            match Env::with_binds(closure.env.clone(), &closure.params, args) {
                Ok(call_env) => eval(&closure.body, &call_env),
                Err(_message) => Value::error("missing operands"),
            }
        }
        _other => Value::error("trying to apply something else than a function"),
    }
}
