//! Validation context and identifier rules shared by stubgen.toml and
//! class surface parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Selector that stands for every configured target; never a target name.
pub const ALL_TARGETS: &str = "all";

/// Parsing and validation context that carries source information.
///
/// Carries the source content, filename, and the current path through the
/// document so nested validation can produce errors like
/// "parameter in 'Operations.add_column'".
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "stubgen.toml");
/// ctx.validate_target_name("op")?;
///
/// let nested = ctx.push("Operations").push("add_column");
/// nested.validate_python_name("table_name", "parameter", 0)?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation (e.g., ["Operations", "add_column"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "parameter in 'Operations.add_column'" or just "member".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of the `nth` (zero-based) occurrence of a name.
    pub fn find_span(&self, name: &str, nth: usize) -> Option<SourceSpan> {
        find_name_span(self.source.src(), name, nth)
    }

    /// Validate a target table name from stubgen.toml.
    pub fn validate_target_name(&self, name: &str) -> Result<()> {
        if name == ALL_TARGETS {
            return Err(self.source.validation_error(
                format!("'{ALL_TARGETS}' is reserved for selecting every target"),
                self.find_span(name, 0),
            ));
        }

        if let Some(reason) = validate_target_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for("target"),
                reason,
                self.find_span(name, 0),
            ));
        }

        Ok(())
    }

    /// Validate that a member or parameter name is a Python identifier.
    pub fn validate_python_name(&self, name: &str, kind: &str, nth: usize) -> Result<()> {
        if let Some(reason) = validate_python_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name, nth),
            ));
        }
        Ok(())
    }
}

/// Python keywords that cannot name a member or parameter
pub(crate) const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Find the span of a name in the TOML source.
///
/// Looks for `name = "value"` (and the single-quoted form), then table
/// headers such as `[targets.name]`. No fallback: better no span than a
/// wrong one.
pub(crate) fn find_name_span(src: &str, name: &str, nth: usize) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let pattern = format!("name = {quote}{name}{quote}");
        if let Some((pos, _)) = src.match_indices(&pattern).nth(nth) {
            // The name starts after `name = "` (8 characters)
            return Some(SourceSpan::from((pos + 8, name.len())));
        }
    }

    let patterns = [format!(".{}]", name), format!(".{}.", name)];
    for pattern in &patterns {
        if let Some((pos, _)) = src.match_indices(pattern.as_str()).nth(nth) {
            // +1 to skip the leading dot
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    None
}

/// Validate a target name: letters, digits, underscores and single dashes.
/// Returns None if valid, Some(reason) if invalid.
pub(crate) fn validate_target_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    let mut prev_was_dash = false;
    for c in chars {
        if c == '-' {
            if prev_was_dash {
                return Some("name cannot contain consecutive dashes");
            }
            prev_was_dash = true;
        } else if c.is_ascii_alphanumeric() || c == '_' {
            prev_was_dash = false;
        } else {
            return Some("name must contain only letters, numbers, underscores, and dashes");
        }
    }

    if prev_was_dash {
        return Some("name cannot end with a dash");
    }

    None
}

/// Validate a Python identifier (ASCII subset).
/// Returns None if valid, Some(reason) if invalid.
pub(crate) fn validate_python_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Some("name must contain only letters, numbers, and underscores");
    }

    if PYTHON_KEYWORDS.contains(&name) {
        return Some("name is a Python keyword");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_target_identifiers() {
        assert!(validate_target_identifier("op").is_none());
        assert!(validate_target_identifier("env-context").is_none());
        assert!(validate_target_identifier("_private").is_none());
    }

    #[test]
    fn test_invalid_target_identifiers() {
        assert!(validate_target_identifier("").is_some());
        assert!(validate_target_identifier("1op").is_some());
        assert!(validate_target_identifier("op--ctx").is_some());
        assert!(validate_target_identifier("op-").is_some());
        assert!(validate_target_identifier("op.ctx").is_some());
    }

    #[test]
    fn test_python_identifiers() {
        assert!(validate_python_identifier("add_column").is_none());
        assert!(validate_python_identifier("_proxy").is_none());
        assert!(validate_python_identifier("x2").is_none());
        assert_eq!(
            validate_python_identifier("class"),
            Some("name is a Python keyword")
        );
        assert!(validate_python_identifier("add-column").is_some());
        assert!(validate_python_identifier("2x").is_some());
        assert!(validate_python_identifier("").is_some());
    }

    #[test]
    fn test_reserved_all_target() {
        let src = "[targets.all]\n";
        let ctx = ParseContext::new(src, "stubgen.toml");
        let err = ctx.validate_target_name("all").unwrap_err();
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn test_find_name_span_nth() {
        let src = "name = \"x\"\nname = \"x\"\n";
        let first = find_name_span(src, "x", 0).unwrap();
        let second = find_name_span(src, "x", 1).unwrap();
        assert_eq!(first.offset(), 8);
        assert_eq!(second.offset(), 19);
        assert!(find_name_span(src, "x", 2).is_none());
    }

    #[test]
    fn test_find_name_span_table_header() {
        let src = "[targets.op]\nsurface = \"a.toml\"\n";
        let span = find_name_span(src, "op", 0).unwrap();
        assert_eq!(span.offset(), 9);
        assert_eq!(span.len(), 2);
    }

    #[test]
    fn test_context_for_nested_path() {
        let ctx = ParseContext::new("", "surface.toml");
        assert_eq!(ctx.context_for("member"), "member");
        let nested = ctx.push("Operations").push("add_column");
        assert_eq!(
            nested.context_for("parameter"),
            "parameter in 'Operations.add_column'"
        );
    }
}
