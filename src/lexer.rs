//! Shell-style word splitting.
//!
//! Source text is a flat list of words. Whitespace and unquoted parentheses
//! separate words; `"..."` and `'...'` runs are kept inside the current word
//! with the quotes removed. There are no escape sequences.

use crate::diagnostic::Span;
use crate::token::Token;
use chumsky::prelude::*;
use std::fmt;

type Extra<'a> = extra::Err<Simple<'a, char>>;

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Bare(String),
    Quoted {
        text: String,
        closed: bool,
        start: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct Word {
    text: String,
    quoted: bool,
    /// Offset of an opening quote that never closed.
    unterminated: Option<usize>,
}

impl Word {
    fn from_segments(segments: Vec<Segment>) -> Self {
        let mut word = Word {
            text: String::new(),
            quoted: false,
            unterminated: None,
        };
        for segment in segments {
            match segment {
                Segment::Bare(text) => word.text.push_str(&text),
                Segment::Quoted { text, closed, start } => {
                    word.text.push_str(&text);
                    word.quoted = true;
                    if !closed && word.unterminated.is_none() {
                        word.unterminated = Some(start);
                    }
                }
            }
        }
        word
    }
}

/// An opening quote with no matching close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub span: Span,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unterminated quote")
    }
}

impl std::error::Error for LexError {}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '(' || c == ')'
}

fn separator<'a>() -> impl Parser<'a, &'a str, (), Extra<'a>> + Clone {
    any().filter(|c: &char| is_separator(*c)).repeated()
}

fn quoted<'a>(quote: char) -> impl Parser<'a, &'a str, Segment, Extra<'a>> + Clone {
    just(quote)
        .ignore_then(any().filter(move |c: &char| *c != quote).repeated().to_slice())
        .then(just(quote).or_not())
        .map_with(|(text, close): (&str, Option<char>), e| {
            let span: SimpleSpan = e.span();
            Segment::Quoted {
                text: text.to_string(),
                closed: close.is_some(),
                start: span.start,
            }
        })
}

fn lexer<'a>() -> impl Parser<'a, &'a str, Vec<(Word, SimpleSpan)>, Extra<'a>> {
    let bare = any()
        .filter(|c: &char| !is_separator(*c) && *c != '"' && *c != '\'')
        .repeated()
        .at_least(1)
        .to_slice()
        .map(|text: &str| Segment::Bare(text.to_string()));

    let word = choice((quoted('"'), quoted('\''), bare))
        .repeated()
        .at_least(1)
        .collect::<Vec<Segment>>()
        .map_with(|segments, e| {
            let span: SimpleSpan = e.span();
            (Word::from_segments(segments), span)
        });

    separator()
        .ignore_then(word.then_ignore(separator()).repeated().collect::<Vec<_>>())
        .then_ignore(end())
}

// Every character is a separator, a quote or part of a bare run, so the
// grammar accepts any input and always produces output.
fn lex(source: &str) -> Vec<(Word, SimpleSpan)> {
    lexer().parse(source).into_output().unwrap_or_default()
}

/// Split program text into tokens.
///
/// An unterminated quote is an error pointing at the opening quote.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    lex(source)
        .into_iter()
        .map(|(word, span)| match word.unterminated {
            Some(start) => Err(LexError {
                span: Span::new(start, start + 1),
            }),
            None => Ok(Token::new(word.text, Span::new(span.start, span.end), word.quoted)),
        })
        .collect()
}

/// Split text into words, best effort.
///
/// An unterminated quote runs to the end of the input.
pub fn split_words(text: &str) -> Vec<String> {
    lex(text).into_iter().map(|(word, _)| word.text).collect()
}
