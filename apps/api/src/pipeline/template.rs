//! Prompt templates with `{placeholder}` tokens.
//!
//! A template is compiled into literal and token segments up front, then
//! rendered by binding values to token names. Bound values are emitted as
//! opaque literals: a value that itself contains `{something}` is never
//! scanned again, which a naive chain of string replacements gets wrong.
//!
//! A token with no binding renders as its literal `{name}` text and is
//! reported at WARN, so a malformed prompt is visible in logs instead of
//! silently dropping content.

use tracing::warn;

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Token(String),
}

/// A compiled prompt template. Compilation is cheap; templates are compiled
/// at the call site from `const` sources.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Parses `{name}` tokens (ASCII letters, digits, underscore) out of the
    /// source. Braces that do not form a well-formed token stay literal, so
    /// JSON examples inside prompts survive untouched.
    pub fn compile(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let ident_len = after
                .bytes()
                .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
                .count();
            let ident = &after[..ident_len];

            if !ident.is_empty() && after[ident_len..].starts_with('}') {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Token(ident.to_string()));
                rest = &after[ident_len + 1..];
            } else {
                literal.push('{');
                rest = after;
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    /// Renders the template with the given `(name, value)` bindings.
    ///
    /// Every occurrence of a bound token is substituted. Bindings that name
    /// no token are ignored. Unbound tokens are kept as `{name}` and logged.
    pub fn render(&self, bindings: &[(&str, &str)]) -> String {
        let mut out = String::new();
        let mut unresolved: Vec<&str> = Vec::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Token(name) => {
                    match bindings.iter().find(|(key, _)| *key == name.as_str()) {
                        Some((_, value)) => out.push_str(value),
                        None => {
                            out.push('{');
                            out.push_str(name);
                            out.push('}');
                            if !unresolved.contains(&name.as_str()) {
                                unresolved.push(name);
                            }
                        }
                    }
                }
            }
        }

        if !unresolved.is_empty() {
            warn!(
                tokens = ?unresolved,
                "prompt template rendered with unresolved placeholders"
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_every_occurrence() {
        let template = PromptTemplate::compile("{x} and {x} again, plus {y}");
        let rendered = template.render(&[("x", "V"), ("y", "W")]);
        assert_eq!(rendered, "V and V again, plus W");
    }

    #[test]
    fn test_unbound_token_stays_literal() {
        let template = PromptTemplate::compile("hello {who}");
        let rendered = template.render(&[]);
        assert_eq!(rendered, "hello {who}");
    }

    #[test]
    fn test_bound_value_is_not_rescanned() {
        // A value containing placeholder-like text must come through verbatim
        let template = PromptTemplate::compile("{a} then {b}");
        let rendered = template.render(&[("a", "literal {b} inside"), ("b", "B")]);
        assert_eq!(rendered, "literal {b} inside then B");
    }

    #[test]
    fn test_json_braces_stay_literal() {
        let source = r#"Schema: {name, email, skills (array of strings)}. Text: {resume_text}"#;
        let template = PromptTemplate::compile(source);
        let rendered = template.render(&[("resume_text", "RAW")]);
        assert_eq!(
            rendered,
            r#"Schema: {name, email, skills (array of strings)}. Text: RAW"#
        );
    }

    #[test]
    fn test_unknown_binding_is_ignored() {
        let template = PromptTemplate::compile("only {x} here");
        let rendered = template.render(&[("x", "1"), ("nope", "2")]);
        assert_eq!(rendered, "only 1 here");
    }

    #[test]
    fn test_adjacent_tokens() {
        let template = PromptTemplate::compile("{a}{b}");
        let rendered = template.render(&[("a", "1"), ("b", "2")]);
        assert_eq!(rendered, "12");
    }

    #[test]
    fn test_empty_braces_are_literal() {
        let template = PromptTemplate::compile("an {} empty pair");
        let rendered = template.render(&[]);
        assert_eq!(rendered, "an {} empty pair");
    }

    #[test]
    fn test_value_equal_to_own_placeholder_terminates() {
        // Self-referential value must not loop or double-expand
        let template = PromptTemplate::compile("{x}");
        let rendered = template.render(&[("x", "{x}")]);
        assert_eq!(rendered, "{x}");
    }
}
