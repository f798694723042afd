use std::collections::HashSet;

use crate::record::Attr;
use crate::value::{Attributes, Value};

/// Canonical key holding the positional query arguments.
pub const ARGS_KEY: &str = "args";

/// Rewrite an attribute key into lowercase snake case.
///
/// Whitespace runs collapse into one underscore and an underscore is
/// inserted at every word boundary inside camel case, including the end of
/// an acronym (`SQLQuery` becomes `sql_query`). Existing underscores are left
/// alone, so the function is idempotent.
pub fn normalize_key(key: &str) -> String {
    let chars: Vec<char> = key.trim().chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);
    let mut in_space = false;

    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
                in_space = true;
            }
            continue;
        }
        in_space = false;

        if is_upper(c) && i > 0 {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let after_lower = prev.is_lowercase() || prev.is_ascii_digit();
            let acronym_end = is_upper(prev) && next.is_some_and(char::is_lowercase);
            if after_lower || acronym_end {
                out.push('_');
            }
        }
        out.push(c);
    }

    out.to_lowercase()
}

// Only letters that actually have a lowercase form count; characters such
// as U+2102 are uppercase but survive lowercasing unchanged.
fn is_upper(c: char) -> bool {
    c.is_uppercase() && !c.to_lowercase().eq(std::iter::once(c))
}

/// Normalize every raw attribute: canonical keys, dereferenced `args`.
///
/// Output follows the sorted order of the raw keys. Keys are unique; see
/// [`dedupe_keys`].
pub fn normalize_attributes(raw: &Attributes) -> Vec<Attr> {
    let mut attrs = normalize_entries(raw);
    dedupe_keys(&mut attrs);
    attrs
}

// Keys may still collide here.
pub(crate) fn normalize_entries(raw: &Attributes) -> Vec<Attr> {
    raw.iter()
        .map(|(key, value)| {
            let key = normalize_key(key);
            let value = if key == ARGS_KEY {
                resolve_args(value)
            } else {
                value.clone()
            };
            Attr { key, value }
        })
        .collect()
}

/// Make every key in `attrs` unique.
///
/// The first attribute keeps its key; each later duplicate gets the first
/// free `_2`, `_3`, ... suffix. Suffixed keys are still canonical.
pub fn dedupe_keys(attrs: &mut [Attr]) {
    let mut taken: HashSet<String> = HashSet::with_capacity(attrs.len());
    for attr in attrs.iter_mut() {
        if taken.insert(attr.key.clone()) {
            continue;
        }
        let mut n = 2usize;
        let key = loop {
            let candidate = format!("{}_{}", attr.key, n);
            if !taken.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        taken.insert(key.clone());
        attr.key = key;
    }
}

/// Replace each live reference inside an argument list with its target.
///
/// Nil references and opaque values are kept as they are, as is any
/// `args` value that is not a list.
pub fn resolve_args(args: &Value) -> Value {
    match args.as_list() {
        Some(items) => Value::List(
            items
                .iter()
                .map(|item| item.dereference().unwrap_or(item).clone())
                .collect(),
        ),
        None => args.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("SQLQuery", "sql_query")]
    #[case("batch size", "batch_size")]
    #[case("already_snake", "already_snake")]
    #[case("sql", "sql")]
    #[case("commandTag", "command_tag")]
    #[case("rowCount", "row_count")]
    #[case("PID", "pid")]
    #[case("time2Live", "time2_live")]
    #[case("HTTPServerError", "http_server_error")]
    #[case("  padded \t key  ", "padded_key")]
    #[case("PGX_LOG_LEVEL", "pgx_log_level")]
    #[case("a__b", "a__b")]
    #[case("", "")]
    fn canonical_keys(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_key(input), expected);
    }

    #[test]
    fn args_references_are_resolved_in_order() {
        let args = Value::List(vec![Value::reference(42), Value::nil(), Value::Int(7)]);
        assert_eq!(
            resolve_args(&args),
            Value::List(vec![Value::Int(42), Value::nil(), Value::Int(7)])
        );
    }

    #[test]
    fn opaque_args_pass_through() {
        let args = Value::List(vec![Value::Opaque("chan int".into())]);
        assert_eq!(resolve_args(&args), args);
    }

    #[test]
    fn non_list_args_are_untouched() {
        let args = Value::reference(1);
        assert_eq!(resolve_args(&args), args);
    }

    #[test]
    fn only_args_are_dereferenced() {
        let mut raw = Attributes::new();
        raw.insert("Args".to_string(), Value::List(vec![Value::reference("a")]));
        raw.insert("pid".to_string(), Value::reference(12));

        let attrs = normalize_attributes(&raw);
        assert_eq!(
            attrs,
            vec![
                Attr::new("args", Value::List(vec![Value::Str("a".into())])),
                Attr::new("pid", Value::reference(12)),
            ]
        );
    }

    #[test]
    fn colliding_keys_keep_every_value() {
        let mut raw = Attributes::new();
        raw.insert("SQL".to_string(), Value::from("SELECT 1"));
        raw.insert("sql".to_string(), Value::from("SELECT 2"));
        raw.insert("batchSize".to_string(), Value::Int(1));
        raw.insert("batch size".to_string(), Value::Int(2));

        let attrs = normalize_attributes(&raw);
        assert_eq!(
            attrs,
            vec![
                Attr::new("sql", "SELECT 1"),
                Attr::new("batch_size", 2),
                Attr::new("batch_size_2", 1),
                Attr::new("sql_2", "SELECT 2"),
            ]
        );
    }

    #[test]
    fn dedupe_skips_suffixes_already_in_use() {
        let mut attrs = vec![
            Attr::new("a", 1),
            Attr::new("a_2", 2),
            Attr::new("a", 3),
        ];
        dedupe_keys(&mut attrs);
        let keys: Vec<&str> = attrs.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "a_2", "a_3"]);
    }

    #[test]
    fn empty_attributes_normalize_to_nothing() {
        assert!(normalize_attributes(&Attributes::new()).is_empty());
    }

    proptest! {
        #[test]
        fn normalize_key_is_idempotent(key in "[A-Za-zÀ-ÿ0-9_ \\t-]{0,32}") {
            let once = normalize_key(&key);
            prop_assert_eq!(normalize_key(&once), once.clone());
        }

        #[test]
        fn normalized_keys_have_no_whitespace_or_capitals(key in "\\PC{0,32}") {
            let key = normalize_key(&key);
            prop_assert!(!key.chars().any(char::is_whitespace));
            prop_assert!(!key.chars().any(is_upper));
        }
    }
}
