use thiserror::Error;

use crate::api::{Diagnostic, Severity};
use crate::ast::UnaryOp;
use crate::parser::{Rule, Span};

/// Parser error with the location it was detected at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

/// Specific kinds of parse errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("invalid number literal '{text}'")]
    InvalidNumber { text: String },

    #[error("operator '{op}' can only be applied to a variable")]
    InvalidIncrementTarget { op: UnaryOp },

    #[error("{message}")]
    Other { message: String },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Convert to a Diagnostic for the API boundary.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (code, help) = match &self.kind {
            ParseErrorKind::UnexpectedToken { .. } => ("P001", None),
            ParseErrorKind::InvalidNumber { .. } => (
                "P002",
                Some(format!(
                    "integer literals must fit in {} bits",
                    i64::BITS
                )),
            ),
            ParseErrorKind::InvalidIncrementTarget { .. } => (
                "P003",
                Some("use `name = expr + 1` for anything that is not a plain variable".to_string()),
            ),
            ParseErrorKind::Other { .. } => ("P999", None),
        };

        Diagnostic {
            severity: Severity::Error,
            message: self.kind.to_string(),
            span: Some(self.span.clone()),
            help,
            code: Some(code.to_string()),
        }
    }
}

/// Convert a Pest error into a `ParseError`, describing what was found at
/// the failure position.
pub fn convert_pest_error(err: pest::error::Error<Rule>, source: &str) -> ParseError {
    use pest::error::{ErrorVariant, InputLocation};

    let span = match err.location {
        InputLocation::Pos(pos) => Span(pos..pos),
        InputLocation::Span((start, end)) => Span(start..end),
    };

    let kind = match err.variant {
        ErrorVariant::ParsingError { positives, .. } => ParseErrorKind::UnexpectedToken {
            expected: format_expected_rules(&positives),
            found: describe_found(source, span.0.start),
        },
        ErrorVariant::CustomError { message } => ParseErrorKind::Other { message },
    };

    ParseError::new(kind, span)
}

fn describe_found(source: &str, pos: usize) -> String {
    let rest = source.get(pos..).unwrap_or("");
    match rest.chars().next() {
        None => "end of input".to_string(),
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => {
            let word: String = rest
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect();
            format!("'{}'", word)
        }
        Some(c) => format!("'{}'", c),
    }
}

fn format_expected_rules(rules: &[Rule]) -> String {
    let mut names: Vec<&'static str> = Vec::new();
    for rule in rules {
        let name = rule_name(*rule);
        if !names.contains(&name) {
            names.push(name);
        }
    }

    match names.as_slice() {
        [] => "something else".to_string(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

fn rule_name(rule: Rule) -> &'static str {
    match rule {
        Rule::EOI => "end of input",
        Rule::ident => "identifier",
        Rule::integer => "number",
        Rule::input => "'?'",
        Rule::operation | Rule::assignment | Rule::print_expr => "expression",
        Rule::expr_stmt | Rule::scope | Rule::if_stmt | Rule::while_stmt => "statement",
        Rule::kw_if => "'if'",
        Rule::kw_else => "'else'",
        Rule::kw_while => "'while'",
        Rule::kw_print => "'print'",
        Rule::and
        | Rule::or
        | Rule::eq
        | Rule::ne
        | Rule::le
        | Rule::ge
        | Rule::lt
        | Rule::gt
        | Rule::add
        | Rule::sub
        | Rule::mul
        | Rule::div
        | Rule::rem => "operator",
        Rule::neg | Rule::not => "unary operator",
        Rule::inc | Rule::dec => "'++' or '--'",
        _ => "token",
    }
}
