//! # Line Classifier
//!
//! Categorizes one raw line of inventory text. The classifier is
//! context-free; section-dependent meaning (a bare token can be a
//! child group reference or a parameterless host) is decided by the
//! parser driving it.

/// One classified line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Blank line or `;`/`#` comment.
    Ignore,
    /// `[group]` section header.
    Group(String),
    /// `[group:vars]` section header.
    GroupVars(String),
    /// `[group:children]` section header.
    GroupChildren(String),
    /// `key=value` assignment.
    Var { key: String, value: String },
    /// A single bare token with no `=`.
    Bare(String),
    /// Host declaration: `name` or `name:port`, then parameters.
    Host { fields: Vec<String> },
}

pub fn classify(line: &str) -> LineKind {
    let line = line.trim();
    if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
        return LineKind::Ignore;
    }

    if line.starts_with('[') && line.ends_with(']') {
        let name = line.trim_matches(['[', ']']);
        if let Some(name) = name.strip_suffix(":children") {
            return LineKind::GroupChildren(name.to_string());
        }
        if let Some(name) = name.strip_suffix(":vars") {
            return LineKind::GroupVars(name.to_string());
        }
        return LineKind::Group(name.to_string());
    }

    let mut fields = split_fields(line);
    if fields.len() == 1 && !fields[0].contains('=') {
        return LineKind::Bare(fields.remove(0));
    }
    if fields.len() <= 3 {
        if let Some((key, value)) = parse_assignment(&fields) {
            return LineKind::Var { key, value };
        }
    }
    LineKind::Host { fields }
}

/// Accepts the `key=value`, `key = value` and `key =value` shapes the
/// format has historically tolerated.
fn parse_assignment(fields: &[String]) -> Option<(String, String)> {
    if fields.iter().all(|field| field.contains('=')) {
        let (key, value) = fields[0].split_once('=')?;
        return Some((key.trim().to_string(), value.trim().to_string()));
    }
    match fields {
        [key, eq, value] if eq == "=" => Some((key.clone(), value.clone())),
        [key, eq] if eq == "=" => Some((key.clone(), String::new())),
        _ => None,
    }
}

/// Splits a line into whitespace-delimited fields, honoring single
/// and double quotes so a quoted value containing spaces stays one
/// field. An unterminated quote runs to the end of the line.
pub(crate) fn split_fields(line: &str) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_field = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_field = true;
            }
            None if ch.is_whitespace() => {
                if in_field {
                    fields.push(std::mem::take(&mut current));
                    in_field = false;
                }
            }
            None => {
                current.push(ch);
                in_field = true;
            }
        }
    }
    if in_field {
        fields.push(current);
    }

    fields
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
