// Source positions, kept beside the tree rather than inside it.

use core::{cell::RefCell, ops::Range};

use bumpalo::Bump;
use hashbrown::{DefaultHashBuilder, HashMap};

use crate::ast::Node;

/// Source text plus the span of every node the parser produced.
///
/// Spans are keyed by node address, so trees built by hand simply have no
/// entries.
#[derive(Debug)]
pub struct AnnotatedSource<'a> {
    pub source: &'a str,
    spans: RefCell<HashMap<*const Node<'a>, Span, DefaultHashBuilder, &'a Bump>>,
}

impl<'a> AnnotatedSource<'a> {
    pub fn new(arena: &'a Bump, source: &'a str) -> Self {
        Self {
            source,
            spans: RefCell::new(HashMap::new_in(arena)),
        }
    }

    pub fn add_span(&self, node: &Node<'a>, span: Span) {
        self.spans.borrow_mut().insert(node.as_ptr(), span);
    }

    pub fn span_of(&self, node: &Node<'a>) -> Option<Span> {
        self.spans.borrow().get(&node.as_ptr()).cloned()
    }

    pub fn snippet(&self, span: &Span) -> &'a str {
        span.str_of(self.source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span(pub Range<usize>);

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self(start..end)
    }

    pub fn combine(a: &Span, b: &Span) -> Span {
        Span::new(a.0.start.min(b.0.start), a.0.end.max(b.0.end))
    }

    pub fn str_of<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.0.clone()).unwrap_or("")
    }

    /// 1-based line and column of the span start.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let start = self.0.start.min(source.len());
        let before = source.get(..start).unwrap_or("");
        let line = before.matches('\n').count() + 1;
        let col = before.rfind('\n').map_or(start, |nl| start - nl - 1) + 1;
        (line, col)
    }
}

impl From<pest::Span<'_>> for Span {
    fn from(s: pest::Span<'_>) -> Self {
        Self(s.start()..s.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let source = "x = 1;\nprint x;\n";
        assert_eq!(Span::new(0, 1).line_col(source), (1, 1));
        assert_eq!(Span::new(7, 12).line_col(source), (2, 1));
        assert_eq!(Span::new(13, 14).line_col(source), (2, 7));
    }

    #[test]
    fn test_combine() {
        let merged = Span::combine(&Span::new(4, 6), &Span::new(1, 3));
        assert_eq!(merged, Span::new(1, 6));
    }
}
