//! Single-key scalar patching for config files.
//!
//! Two assignment dialects are supported: TOML (`key = "value"`, root table
//! only) and POSIX shell (`KEY="value"`). Only the first matching line is
//! rewritten; everything else, including line endings, is preserved.

/// Assignment dialect of the target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStyle {
    /// `key = "value"`; matches before the first `[table]` header only.
    /// A missing key is inserted as the first line.
    Toml,
    /// `KEY="value"`; a missing key leaves the text unchanged.
    Shell,
}

impl AssignmentStyle {
    fn render(self, key: &str, value: &str) -> String {
        match self {
            AssignmentStyle::Toml => {
                let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
                format!("{key} = \"{escaped}\"")
            }
            AssignmentStyle::Shell => {
                let mut escaped = String::with_capacity(value.len());
                for c in value.chars() {
                    if matches!(c, '\\' | '"' | '$' | '`') {
                        escaped.push('\\');
                    }
                    escaped.push(c);
                }
                format!("{key}=\"{escaped}\"")
            }
        }
    }

    fn ends_search(self, line: &str) -> bool {
        self == AssignmentStyle::Toml && line.trim_start().starts_with('[')
    }
}

/// What happened to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The first matching line was rewritten (0-based line index).
    Replaced(usize),
    /// The key already had this value.
    Unchanged,
    /// No matching line; the assignment was inserted as the first line.
    Inserted,
    /// No matching line and the dialect does not insert.
    Missing,
}

/// Patched text plus outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPatch {
    pub text: String,
    pub outcome: KeyOutcome,
}

impl KeyPatch {
    /// True if the text differs from the input.
    pub fn changed(&self) -> bool {
        matches!(self.outcome, KeyOutcome::Replaced(_) | KeyOutcome::Inserted)
    }
}

/// Set `key` to `value` and return only the new text.
pub fn set_scalar_key(text: &str, key: &str, value: &str, style: AssignmentStyle) -> String {
    patch_scalar_key(text, key, value, style).text
}

/// Set `key` to `value`, reporting what was done.
pub fn patch_scalar_key(text: &str, key: &str, value: &str, style: AssignmentStyle) -> KeyPatch {
    let rendered = style.render(key, value);
    let mut offset = 0;

    for (index, line) in text.split_inclusive('\n').enumerate() {
        let content = line.trim_end_matches(['\n', '\r']);
        if style.ends_search(content) {
            break;
        }
        if assigns_key(content, key) {
            if content == rendered {
                return KeyPatch {
                    text: text.to_string(),
                    outcome: KeyOutcome::Unchanged,
                };
            }
            let terminator = &line[content.len()..];
            let mut out = String::with_capacity(text.len() + rendered.len());
            out.push_str(&text[..offset]);
            out.push_str(&rendered);
            out.push_str(terminator);
            out.push_str(&text[offset + line.len()..]);
            return KeyPatch {
                text: out,
                outcome: KeyOutcome::Replaced(index),
            };
        }
        offset += line.len();
    }

    match style {
        AssignmentStyle::Toml => {
            let eol = if text.contains("\r\n") { "\r\n" } else { "\n" };
            KeyPatch {
                text: format!("{rendered}{eol}{text}"),
                outcome: KeyOutcome::Inserted,
            }
        }
        AssignmentStyle::Shell => KeyPatch {
            text: text.to_string(),
            outcome: KeyOutcome::Missing,
        },
    }
}

/// Read the raw right-hand side of the first `key = ...` line, quotes removed.
///
/// For TOML only the root table is searched.
pub fn read_scalar_key(text: &str, key: &str, style: AssignmentStyle) -> Option<String> {
    for line in text.lines() {
        if style.ends_search(line) {
            break;
        }
        if assigns_key(line, key) {
            let (_, rhs) = line.split_once('=')?;
            let rhs = rhs.trim();
            let unquoted = rhs
                .strip_prefix('"')
                .and_then(|r| r.strip_suffix('"'))
                .unwrap_or(rhs);
            return Some(unquoted.to_string());
        }
    }
    None
}

fn assigns_key(line: &str, key: &str) -> bool {
    line.trim_start()
        .strip_prefix(key)
        .is_some_and(|rest| rest.trim_start().starts_with('='))
}
