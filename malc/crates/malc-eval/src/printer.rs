//! `pr_str` — rendering a [`Value`] back to text.

use malc_value::Value;

/// Renders `value` to a string.
///
/// When `readably` is `true`, strings are escaped and quoted so the result
/// can be read back by the reader (`pr_str(v, true)` round-trips through
/// `read_str`); when `false`, strings are rendered with their contents
/// unescaped, as `str`/`println` want.
pub fn pr_str(value: &Value, readably: bool) -> String {
    match value {
        Value::Nil => "nil".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Str(s) => {
            if readably {
                format!("\"{}\"", escape(s))
            } else {
                s.clone()
            }
        }
        Value::Keyword(kw) => kw.to_string(),
        Value::Symbol(s) => s.clone(),
        Value::List(items) => format!("({})", pr_seq(items, readably)),
        Value::Vector(items) => format!("[{}]", pr_seq(items, readably)),
        Value::HashMap(pairs) => {
            let rendered: Vec<String> = pairs
                .iter()
                .flat_map(|(k, v)| [pr_str(k, readably), pr_str(v, readably)])
                .collect();
            format!("{{{}}}", rendered.join(" "))
        }
        Value::Error(inner) => format!("error: {}", pr_str(inner, false)),
        Value::BuiltinFunction(_) => "#<builtin fn>".to_string(),
        Value::Closure(_) => "#<function>".to_string(),
    }
}

fn pr_seq(items: &[Value], readably: bool) -> String {
    items
        .iter()
        .map(|v| pr_str(v, readably))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_atoms() {
        assert_eq!(pr_str(&Value::Nil, true), "nil");
        assert_eq!(pr_str(&Value::Boolean(true), true), "true");
        assert_eq!(pr_str(&Value::Integer(-5), true), "-5");
    }

    #[test]
    fn prints_string_readably_vs_not() {
        let s = Value::Str("a\"b\n".to_string());
        assert_eq!(pr_str(&s, true), "\"a\\\"b\\n\"");
        assert_eq!(pr_str(&s, false), "a\"b\n");
    }

    #[test]
    fn prints_list_and_vector() {
        let list = Value::List(vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(pr_str(&list, true), "(1 2)");
        let vector = Value::Vector(vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(pr_str(&vector, true), "[1 2]");
    }

    #[test]
    fn prints_hash_map() {
        let map = Value::HashMap(vec![(Value::string("a"), Value::Integer(1))]);
        assert_eq!(pr_str(&map, true), "{\"a\" 1}");
    }

    #[test]
    fn prints_error_with_prefix() {
        let err = Value::error("boom");
        assert_eq!(pr_str(&err, true), "error: boom");
    }
}
