use bumpalo::Bump;
use lazy_static::lazy_static;
use pest::Parser;
use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;
use tracing::debug;

use crate::ast::{AstBuilder, BinaryOp, Node, NodeKind, UnaryOp};
use crate::parser::error::convert_pest_error;
use crate::parser::{AnnotatedSource, ParseError, ParseErrorKind, Span};

lazy_static! {
    // Note: precedence is defined lowest to highest.
    static ref PRATT_PARSER: PrattParser<Rule> = PrattParser::new()
        // (lowest precedence)
        .op(Op::infix(Rule::and, Assoc::Left) | Op::infix(Rule::or, Assoc::Left))
        .op(
            Op::infix(Rule::eq, Assoc::Left)
                | Op::infix(Rule::ne, Assoc::Left)
                | Op::infix(Rule::lt, Assoc::Left)
                | Op::infix(Rule::le, Assoc::Left)
                | Op::infix(Rule::gt, Assoc::Left)
                | Op::infix(Rule::ge, Assoc::Left)
        )
        .op(Op::infix(Rule::add, Assoc::Left) | Op::infix(Rule::sub, Assoc::Left))
        .op(
            Op::infix(Rule::mul, Assoc::Left)
                | Op::infix(Rule::div, Assoc::Left)
                | Op::infix(Rule::rem, Assoc::Left)
        )
        .op(Op::prefix(Rule::neg) | Op::prefix(Rule::not))
        .op(Op::postfix(Rule::inc) | Op::postfix(Rule::dec))
        // (highest precedence)
        ;
}

#[derive(Parser)]
#[grammar = "parser/paracl.pest"]
pub struct ProgramParser;

/// A parsed program: the root block plus the source spans of its nodes.
#[derive(Debug, Clone, Copy)]
pub struct ParsedProgram<'a> {
    pub root: &'a Node<'a>,
    pub ann: &'a AnnotatedSource<'a>,
}

/// Parse ParaCL source into a tree allocated in `arena`.
///
/// The returned tree is unresolved: run [`resolve`](crate::resolver::resolve)
/// on `root` before evaluating it.
pub fn parse<'a>(arena: &'a Bump, source: &'a str) -> Result<ParsedProgram<'a>, ParseError> {
    let mut pairs =
        ProgramParser::parse(Rule::program, source).map_err(|e| convert_pest_error(e, source))?;
    let program = next_pair(&mut pairs, &Span::new(0, source.len()))?;

    let ann = arena.alloc(AnnotatedSource::new(arena, source));
    let builder = TreeBuilder {
        ast: AstBuilder::new(arena),
        ann,
    };
    let root = builder.build_program(program)?;
    debug!(bytes = source.len(), "parsed program");

    Ok(ParsedProgram { root, ann })
}

fn is_keyword(rule: Rule) -> bool {
    matches!(
        rule,
        Rule::kw_if | Rule::kw_else | Rule::kw_while | Rule::kw_print
    )
}

/// Inner pairs of `pair` with keyword tokens dropped.
fn operands<'i>(pair: Pair<'i, Rule>) -> impl Iterator<Item = Pair<'i, Rule>> {
    pair.into_inner().filter(|p| !is_keyword(p.as_rule()))
}

struct TreeBuilder<'a> {
    ast: AstBuilder<'a>,
    ann: &'a AnnotatedSource<'a>,
}

impl<'a> TreeBuilder<'a> {
    fn spanned(&self, node: &'a Node<'a>, span: Span) -> &'a Node<'a> {
        self.ann.add_span(node, span);
        node
    }

    fn span_of(&self, node: &'a Node<'a>) -> Span {
        self.ann.span_of(node).unwrap_or_default()
    }

    fn build_program(&self, pair: Pair<'_, Rule>) -> Result<&'a Node<'a>, ParseError> {
        let span = Span::from(pair.as_span());
        let statements = pair
            .into_inner()
            .filter(|p| p.as_rule() != Rule::EOI)
            .map(|p| self.build_statement(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.spanned(self.ast.block(&statements), span))
    }

    fn build_statement(&self, pair: Pair<'_, Rule>) -> Result<&'a Node<'a>, ParseError> {
        let span = Span::from(pair.as_span());
        match pair.as_rule() {
            Rule::scope => {
                let statements = pair
                    .into_inner()
                    .map(|p| self.build_statement(p))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(self.spanned(self.ast.block(&statements), span))
            }
            Rule::expr_stmt => {
                let mut inner = pair.into_inner();
                let expr = self.build_expr(next_pair(&mut inner, &span)?)?;
                Ok(self.spanned(self.ast.statement(expr), span))
            }
            Rule::if_stmt => {
                let mut inner = operands(pair);
                let condition = self.build_condition(next_pair(&mut inner, &span)?)?;
                let then_branch = self.build_branch(next_pair(&mut inner, &span)?)?;
                let else_branch = match inner.next() {
                    Some(p) => Some(self.build_branch(p)?),
                    None => None,
                };
                Ok(self.spanned(
                    self.ast.if_else(condition, then_branch, else_branch),
                    span,
                ))
            }
            Rule::while_stmt => {
                let mut inner = operands(pair);
                let condition = self.build_condition(next_pair(&mut inner, &span)?)?;
                let body = self.build_branch(next_pair(&mut inner, &span)?)?;
                Ok(self.spanned(self.ast.while_loop(condition, body), span))
            }
            rule => Err(unexpected_rule(rule, span)),
        }
    }

    /// Branch and loop bodies are always blocks.
    fn build_branch(&self, pair: Pair<'_, Rule>) -> Result<&'a Node<'a>, ParseError> {
        let stmt = self.build_statement(pair)?;
        let block = self.ast.wrap_block(stmt);
        if !core::ptr::eq(block, stmt) {
            self.ann.add_span(block, self.span_of(stmt));
        }
        Ok(block)
    }

    fn build_condition(&self, pair: Pair<'_, Rule>) -> Result<&'a Node<'a>, ParseError> {
        let span = Span::from(pair.as_span());
        let expr = self.build_expr(pair)?;
        Ok(self.spanned(self.ast.condition(expr), span))
    }

    fn build_expr(&self, pair: Pair<'_, Rule>) -> Result<&'a Node<'a>, ParseError> {
        let span = Span::from(pair.as_span());
        match pair.as_rule() {
            Rule::assignment => {
                let mut inner = pair.into_inner();
                let target = self.build_expr(next_pair(&mut inner, &span)?)?;
                let value = self.build_expr(next_pair(&mut inner, &span)?)?;
                Ok(self.spanned(self.ast.assign(target, value), span))
            }
            Rule::print_expr => {
                let mut inner = operands(pair);
                let expr = self.build_expr(next_pair(&mut inner, &span)?)?;
                Ok(self.spanned(self.ast.print(expr), span))
            }
            Rule::operation => self.build_operation(pair.into_inner()),
            Rule::integer => {
                let text = pair.as_str();
                let value = text.parse::<i64>().map_err(|_| {
                    ParseError::new(
                        ParseErrorKind::InvalidNumber {
                            text: text.to_string(),
                        },
                        span.clone(),
                    )
                })?;
                Ok(self.spanned(self.ast.literal(value), span))
            }
            Rule::input => Ok(self.spanned(self.ast.input(), span)),
            Rule::ident => Ok(self.spanned(self.ast.variable(pair.as_str()), span)),
            rule => Err(unexpected_rule(rule, span)),
        }
    }

    fn build_operation(&self, pairs: Pairs<'_, Rule>) -> Result<&'a Node<'a>, ParseError> {
        PRATT_PARSER
            .map_primary(|primary| self.build_expr(primary))
            .map_prefix(|op, rhs| {
                let rhs = rhs?;
                let span = Span::combine(&Span::from(op.as_span()), &self.span_of(rhs));
                let op = match op.as_rule() {
                    Rule::neg => UnaryOp::Neg,
                    Rule::not => UnaryOp::Not,
                    rule => return Err(unexpected_rule(rule, span)),
                };
                Ok(self.spanned(self.ast.unary(op, rhs), span))
            })
            .map_postfix(|lhs, op| {
                let lhs = lhs?;
                let span = Span::combine(&self.span_of(lhs), &Span::from(op.as_span()));
                let op = match op.as_rule() {
                    Rule::inc => UnaryOp::PostInc,
                    Rule::dec => UnaryOp::PostDec,
                    rule => return Err(unexpected_rule(rule, span)),
                };
                if !matches!(lhs.kind(), NodeKind::Variable(_)) {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidIncrementTarget { op },
                        span,
                    ));
                }
                Ok(self.spanned(self.ast.unary(op, lhs), span))
            })
            .map_infix(|lhs, op, rhs| {
                let (lhs, rhs) = (lhs?, rhs?);
                let span = Span::combine(&self.span_of(lhs), &self.span_of(rhs));
                let op = match op.as_rule() {
                    Rule::add => BinaryOp::Add,
                    Rule::sub => BinaryOp::Sub,
                    Rule::mul => BinaryOp::Mul,
                    Rule::div => BinaryOp::Div,
                    Rule::rem => BinaryOp::Mod,
                    Rule::eq => BinaryOp::Eq,
                    Rule::ne => BinaryOp::Ne,
                    Rule::lt => BinaryOp::Lt,
                    Rule::le => BinaryOp::Le,
                    Rule::gt => BinaryOp::Gt,
                    Rule::ge => BinaryOp::Ge,
                    Rule::and => BinaryOp::And,
                    Rule::or => BinaryOp::Or,
                    rule => return Err(unexpected_rule(rule, span)),
                };
                Ok(self.spanned(self.ast.binary(op, lhs, rhs), span))
            })
            .parse(pairs)
    }
}

fn next_pair<'i>(
    pairs: &mut impl Iterator<Item = Pair<'i, Rule>>,
    span: &Span,
) -> Result<Pair<'i, Rule>, ParseError> {
    pairs.next().ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::Other {
                message: "missing expected pair in rule".to_string(),
            },
            span.clone(),
        )
    })
}

fn unexpected_rule(rule: Rule, span: Span) -> ParseError {
    ParseError::new(
        ParseErrorKind::Other {
            message: format!("unexpected rule {:?}", rule),
        },
        span,
    )
}
