use regex::Regex;
use std::sync::OnceLock;

/// Canonical key holding the SQL text of a query event.
pub const SQL_KEY: &str = "sql";

/// Pattern of an operation-name annotation line, e.g. `-- name: get_user :one`.
pub const NAME_PATTERN: &str = r"^\s*--\s*name:\s+(\w+)";

static NAME_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn name_regex() -> Option<&'static Regex> {
    NAME_REGEX.get_or_init(|| Regex::new(NAME_PATTERN).ok()).as_ref()
}

/// Result of [`sanitize`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sanitized {
    /// Query text without comments. Remaining lines are trimmed and joined
    /// with `\n`.
    pub cleaned: String,
    /// Name taken from the first operation-name annotation, if any.
    pub operation: Option<String>,
}

/// Strip comments from `sql` and pull out the operation-name annotation.
///
/// Lines that start with `--` are dropped; a `--` later in a line cuts the
/// rest of the line off unless it sits inside a quoted literal or
/// identifier. Blank lines disappear. Running the function on its own
/// output changes nothing.
pub fn sanitize(sql: &str) -> Sanitized {
    let regex = name_regex();
    let mut operation = None;
    let mut lines: Vec<&str> = Vec::new();

    for line in sql.lines() {
        if operation.is_none() {
            if let Some(caps) = regex.and_then(|re| re.captures(line)) {
                operation = caps.get(1).map(|m| m.as_str().to_string());
                continue;
            }
        }

        let text = line.trim();
        if text.starts_with("--") {
            continue;
        }

        let text = strip_trailing_comment(text).trim();
        if !text.is_empty() {
            lines.push(text);
        }
    }

    Sanitized {
        cleaned: lines.join("\n"),
        operation,
    }
}

/// Query text with comments removed. See [`sanitize`].
pub fn trim_query(sql: &str) -> String {
    sanitize(sql).cleaned
}

fn strip_trailing_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'\'' || b == b'"' => quote = Some(b),
            None if b == b'-' && bytes.get(i + 1) == Some(&b'-') => return &line[..i],
            None => {}
        }
        i += 1;
    }

    line
}
