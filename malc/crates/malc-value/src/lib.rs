//! malc-value — the `Value` data model and the lexical `Env` chain.
//!
//! Every other crate in this workspace (the reader, the evaluator, the
//! REPL driver) operates on the types defined here. `Value` is the single
//! tagged union every mal form evaluates to; `Env` is the reference-counted,
//! parent-chained binding table closures capture and `let*`/function calls
//! extend.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use malc_util::FxHashMap;

/// The mal keyword marker: the UTF-8 encoding of U+029E, prepended to a
/// keyword's name so keywords and strings can share one string-keyed
/// representation without colliding.
pub const KEYWORD_MARKER: char = '\u{29E}';

/// A mal keyword, e.g. `:foo`.
///
/// Wrapped in its own newtype (rather than passed around as a bare
/// marker-prefixed `String`) so the marker can never be prepended twice or
/// forgotten — every `Keyword` already carries it internally.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Keyword(String);

impl Keyword {
    /// Build a keyword from its name, without the leading `:` and without
    /// the marker (the marker is added here).
    pub fn new(name: &str) -> Self {
        let mut marked = String::with_capacity(name.len() + KEYWORD_MARKER.len_utf8());
        marked.push(KEYWORD_MARKER);
        marked.push_str(name);
        Keyword(marked)
    }

    /// The keyword's name, without the leading `:` and without the marker.
    pub fn name(&self) -> &str {
        &self.0[KEYWORD_MARKER.len_utf8()..]
    }

    /// The marker-prefixed internal representation, as used wherever a
    /// keyword and a string must compare under one key space (hash-map
    /// keys, `=`).
    pub fn marked(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.name())
    }
}

/// A closure's parameter list: a sequence of names, with an optional
/// trailing variadic name bound to the remaining arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    pub fixed: Vec<String>,
    pub variadic: Option<String>,
}

/// A user-defined function created by `fn*`.
///
/// The body is `Rc`-shared rather than cloned on every `Value::clone` of
/// the closure: the body is immutable once constructed, so sharing it
/// costs nothing observable and avoids a deep copy on every application.
#[derive(Clone)]
pub struct Closure {
    pub params: Params,
    pub body: Rc<Value>,
    pub env: Env,
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure").field("params", &self.params).finish_non_exhaustive()
    }
}

/// A builtin function implemented in Rust.
///
/// `name` is used only for `Debug`/printer output (`#<builtin fn>`), never
/// for dispatch — the function pointer itself is the callable.
#[derive(Clone)]
pub struct BuiltinFunction {
    pub name: &'static str,
    pub func: Rc<dyn Fn(&[Value]) -> Value>,
}

impl fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFunction({})", self.name)
    }
}

/// The single tagged union every mal form evaluates to.
///
/// Equality (`PartialEq`) implements mal's `=`: lists and vectors compare
/// element-wise and interchangeably (a list and a vector with equal
/// elements are equal), hash maps compare by key set and per-key value
/// equality, and functions are never equal to anything (including
/// themselves) since mal has no notion of function identity comparison.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Boolean(bool),
    Integer(i64),
    Str(String),
    Keyword(Keyword),
    Symbol(String),
    List(Vec<Value>),
    Vector(Vec<Value>),
    HashMap(Vec<(Value, Value)>),
    Error(Box<Value>),
    BuiltinFunction(BuiltinFunction),
    Closure(Closure),
}

impl Value {
    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Value::Error(Box::new(Value::Str(message.into())))
    }

    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Boolean(false))
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// The elements of a list or vector, treated interchangeably, as the
    /// evaluator's sequence-oriented builtins require.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Vector(items) => Some(items),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Str(_) => "string",
            Value::Keyword(_) => "keyword",
            Value::Symbol(_) => "symbol",
            Value::List(_) => "list",
            Value::Vector(_) => "vector",
            Value::HashMap(_) => "hash-map",
            Value::Error(_) => "error",
            Value::BuiltinFunction(_) => "function",
            Value::Closure(_) => "function",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Keyword(a), Value::Keyword(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::List(a) | Value::Vector(a), Value::List(b) | Value::Vector(b)) => a == b,
            (Value::HashMap(a), Value::HashMap(b)) => {
                if a.len() != b.len() {
                    return false;
                }
                a.iter().all(|(k, v)| {
                    b.iter().any(|(k2, v2)| k == k2 && v == v2)
                })
            }
            _ => false,
        }
    }
}

/// A single lexical scope: its own bindings plus an optional parent scope
/// to fall back to on lookup miss.
pub struct EnvData {
    bindings: FxHashMap<String, Value>,
    parent: Option<Env>,
}

/// A reference-counted handle to a lexical scope.
///
/// Shared via `Rc` (not an arena index, unlike this workspace's compiler
/// crates) because a closure must keep its captured environment alive for
/// as long as the closure value itself is reachable, independent of
/// whether the lexical block that created the environment has otherwise
/// finished executing.
#[derive(Clone)]
pub struct Env(Rc<RefCell<EnvData>>);

impl Env {
    /// Create a new, empty environment with an optional parent.
    pub fn new(parent: Option<Env>) -> Self {
        Env(Rc::new(RefCell::new(EnvData {
            bindings: FxHashMap::default(),
            parent,
        })))
    }

    /// Create a new environment binding `binds` positionally to `exprs`.
    ///
    /// A trailing `&rest` name in `binds` (per `Params::variadic`) gathers
    /// every remaining expression into a single list value. Arity
    /// mismatches are reported as an error value by the *caller* (the
    /// evaluator's apply step), not here — this constructor assumes the
    /// caller already checked arity and only fails if it did not.
    pub fn with_binds(parent: Env, params: &Params, exprs: &[Value]) -> Result<Env, String> {
        let env = Env::new(Some(parent));
        if exprs.len() < params.fixed.len() {
            return Err(format!(
                "expected at least {} argument(s), got {}",
                params.fixed.len(),
                exprs.len()
            ));
        }
        if params.variadic.is_none() && exprs.len() > params.fixed.len() {
            return Err(format!(
                "expected {} argument(s), got {}",
                params.fixed.len(),
                exprs.len()
            ));
        }
        for (name, value) in params.fixed.iter().zip(exprs.iter()) {
            env.set(name, value.clone());
        }
        if let Some(rest_name) = &params.variadic {
            let rest = exprs[params.fixed.len()..].to_vec();
            env.set(rest_name, Value::List(rest));
        }
        Ok(env)
    }

    /// Bind `name` to `value` in this environment (shadowing any binding
    /// of the same name in a parent environment).
    pub fn set(&self, name: &str, value: Value) {
        self.0.borrow_mut().bindings.insert(name.to_string(), value);
    }

    /// Find the nearest environment in the parent chain (including this
    /// one) that binds `name`, without cloning the bound value.
    pub fn find(&self, name: &str) -> Option<Env> {
        if self.0.borrow().bindings.contains_key(name) {
            Some(self.clone())
        } else {
            let parent = self.0.borrow().parent.clone();
            parent.and_then(|p| p.find(name))
        }
    }

    /// Look up `name` in this environment or any parent, returning a clone
    /// of the bound value.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.0.borrow().bindings.get(name) {
            return Some(value.clone());
        }
        let parent = self.0.borrow().parent.clone();
        parent.and_then(|p| p.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_round_trips_name() {
        let kw = Keyword::new("foo");
        assert_eq!(kw.name(), "foo");
        assert_eq!(kw.to_string(), ":foo");
        assert!(kw.marked().starts_with(KEYWORD_MARKER));
    }

    #[test]
    fn env_chain_resolves_through_parent() {
        let root = Env::new(None);
        root.set("x", Value::Integer(1));
        let child = Env::new(Some(root.clone()));
        child.set("y", Value::Integer(2));

        assert_eq!(child.get("x"), Some(Value::Integer(1)));
        assert_eq!(child.get("y"), Some(Value::Integer(2)));
        assert_eq!(root.get("y"), None);
    }

    #[test]
    fn env_set_shadows_parent_binding() {
        let root = Env::new(None);
        root.set("x", Value::Integer(1));
        let child = Env::new(Some(root.clone()));
        child.set("x", Value::Integer(2));

        assert_eq!(child.get("x"), Some(Value::Integer(2)));
        assert_eq!(root.get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn with_binds_gathers_variadic_rest() {
        let root = Env::new(None);
        let params = Params {
            fixed: vec!["a".to_string()],
            variadic: Some("more".to_string()),
        };
        let env = Env::with_binds(
            root,
            &params,
            &[Value::Integer(1), Value::Integer(2), Value::Integer(3)],
        )
        .unwrap();

        assert_eq!(env.get("a"), Some(Value::Integer(1)));
        assert_eq!(
            env.get("more"),
            Some(Value::List(vec![Value::Integer(2), Value::Integer(3)]))
        );
    }

    #[test]
    fn with_binds_rejects_too_few_arguments() {
        let root = Env::new(None);
        let params = Params {
            fixed: vec!["a".to_string(), "b".to_string()],
            variadic: None,
        };
        assert!(Env::with_binds(root, &params, &[Value::Integer(1)]).is_err());
    }

    #[test]
    fn hash_map_equality_is_order_independent() {
        let a = Value::HashMap(vec![
            (Value::string("a"), Value::Integer(1)),
            (Value::string("b"), Value::Integer(2)),
        ]);
        let b = Value::HashMap(vec![
            (Value::string("b"), Value::Integer(2)),
            (Value::string("a"), Value::Integer(1)),
        ]);
        assert_eq!(a, b);
    }

    #[test]
    fn list_and_vector_with_equal_elements_are_equal() {
        let list = Value::List(vec![Value::Integer(1), Value::Integer(2)]);
        let vector = Value::Vector(vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(list, vector);
    }
}
