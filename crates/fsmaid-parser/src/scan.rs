//! Comment-aware scanner for macro invocations.
//!
//! The scanner does not tokenize the host language. It walks the whole
//! source once, skipping over comments, string literals and `#define`
//! lines, and matches `NAME ( args )` wherever `NAME` starts an identifier.
//! Arguments may span lines and may contain balanced parentheses; they are
//! split on top-level commas and trimmed.
//!
//! Every caller (declaration counting, name listing, record extraction)
//! goes through [`scan`], so there is exactly one matching strategy.

use std::borrow::Cow;

use log::trace;
use winnow::{
    Parser as _,
    ascii::multispace0,
    combinator::{alt, delimited, not, opt, peek, repeat, separated},
    error::{ContextError, ErrMode},
    stream::{LocatingSlice, Location, Stream},
    token::{any, literal, none_of, one_of, rest, take_until, take_while},
};

use crate::Span;

type Input<'src> = LocatingSlice<&'src str>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// One matched macro invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'src> {
    args: Vec<Cow<'src, str>>,
    span: Span,
    closed: bool,
}

impl<'src> Invocation<'src> {
    /// The trimmed arguments, in order, with comments removed. Always holds
    /// at least one entry.
    pub fn args(&self) -> &[Cow<'src, str>] {
        &self.args
    }

    /// The first argument, which names the owning state machine.
    pub fn owner(&self) -> &str {
        self.args.first().map(|arg| &**arg).unwrap_or_default()
    }

    /// The arguments following the owner.
    pub fn fields(&self) -> &[Cow<'src, str>] {
        self.args.get(1..).unwrap_or_default()
    }

    /// From the macro name to the closing parenthesis, or to where
    /// scanning stopped for an unterminated invocation.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns `false` if the argument list never closes.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn line_comment<'src>(input: &mut Input<'src>) -> IResult<()> {
    ("//", take_while(0.., |c| c != '\n')).void().parse_next(input)
}

/// An unterminated block comment runs to the end of the source.
fn block_comment<'src>(input: &mut Input<'src>) -> IResult<()> {
    (
        "/*",
        alt(((take_until(0.., "*/"), "*/").void(), rest.void())),
    )
        .void()
        .parse_next(input)
}

fn comment<'src>(input: &mut Input<'src>) -> IResult<()> {
    alt((line_comment, block_comment)).parse_next(input)
}

/// Parse the body of a string literal, honouring backslash escapes
fn string_body<'src>(input: &mut Input<'src>) -> IResult<()> {
    repeat(
        0..,
        alt((('\\', any).void(), none_of(['"', '\\', '\n']).void())),
    )
    .parse_next(input)
}

fn string_literal<'src>(input: &mut Input<'src>) -> IResult<()> {
    ('"', string_body, opt('"')).void().parse_next(input)
}

/// Parse a parenthesized group, including nested groups
fn nested<'src>(input: &mut Input<'src>) -> IResult<()> {
    delimited('(', balanced, ')').parse_next(input)
}

/// Parse any text in which parentheses outside comments and strings are
/// balanced
fn balanced<'src>(input: &mut Input<'src>) -> IResult<()> {
    repeat(
        0..,
        alt((
            comment,
            string_literal,
            nested,
            take_while(1.., |c: char| !matches!(c, '(' | ')' | '/' | '"')).void(),
            '/'.void(),
        )),
    )
    .parse_next(input)
}

/// One piece of argument text, or `None` for a comment
fn argument_piece<'src>(input: &mut Input<'src>) -> IResult<Option<&'src str>> {
    alt((
        comment.map(|()| None),
        alt((nested, string_literal)).take().map(Some),
        take_while(1.., |c: char| !matches!(c, '(' | ')' | ',' | '/' | '"')).map(Some),
        '/'.take().map(Some),
    ))
    .parse_next(input)
}

/// Parse the text of one argument, stopping at a top-level `,` or `)`.
///
/// Comments read as a single space, so a comment between two words still
/// separates them.
fn argument<'src>(input: &mut Input<'src>) -> IResult<Cow<'src, str>> {
    let (pieces, raw): (Vec<Option<&'src str>>, &'src str) =
        repeat(0.., argument_piece).with_taken().parse_next(input)?;

    if pieces.iter().all(Option::is_some) {
        return Ok(Cow::Borrowed(raw.trim()));
    }

    let text: String = pieces.into_iter().map(|piece| piece.unwrap_or(" ")).collect();
    Ok(Cow::Owned(text.trim().to_owned()))
}

fn arguments<'src>(input: &mut Input<'src>) -> IResult<Vec<Cow<'src, str>>> {
    separated(1.., argument, ',').parse_next(input)
}

/// Parse `name ( args )` where `name` is a whole identifier.
///
/// A missing closing parenthesis does not fail the parse; the invocation is
/// returned unclosed so callers can report it.
fn invocation<'src>(input: &mut Input<'src>, name: &str) -> IResult<Invocation<'src>> {
    let start = input.current_token_start();

    (
        literal(name),
        peek(not(one_of(is_ident_char))),
        multispace0,
        '(',
    )
        .void()
        .parse_next(input)?;

    let args = arguments(input)?;
    let closed = opt(')').parse_next(input)?.is_some();
    let end = input.current_token_start();

    Ok(Invocation {
        args,
        span: Span::new(start..end),
        closed,
    })
}

/// Consume text that cannot start a match: comments, strings, directives,
/// whole identifiers, or a single character
fn skip<'src>(input: &mut Input<'src>) -> IResult<()> {
    alt((
        comment,
        string_literal,
        (
            '#',
            take_while(0.., |c| c == ' ' || c == '\t'),
            literal("define"),
            take_while(0.., |c| c != '\n'),
        )
            .void(),
        take_while(1.., is_ident_char).void(),
        any.void(),
    ))
    .parse_next(input)
}

/// Find every invocation of the macro `name` in `source`, in file order.
pub fn scan<'src>(source: &'src str, name: &str) -> Vec<Invocation<'src>> {
    let mut input = LocatingSlice::new(source);
    let mut found = Vec::new();

    if name.is_empty() {
        return found;
    }

    while !input.is_empty() {
        let checkpoint = input.checkpoint();
        if let Ok(invocation) = invocation(&mut input, name) {
            found.push(invocation);
            continue;
        }
        input.reset(&checkpoint);

        if skip(&mut input).is_err() {
            break;
        }
    }

    trace!(macro_name = name, count = found.len(); "Scanned invocations");
    found
}
