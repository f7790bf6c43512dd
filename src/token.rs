use crate::diagnostic::Span;
use std::fmt;

/// Reserved word that opens and closes a function definition.
pub const FN: &str = "fn";
/// Reserved word that separates parameters from the body.
pub const IS: &str = "is";
/// Reserved word that starts a conditional.
pub const IF: &str = "if";

/// One word of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub span: Span,
    /// Any part of the word was quoted. Quoted words are always data.
    pub quoted: bool,
}

impl Token {
    pub fn new(text: impl Into<String>, span: Span, quoted: bool) -> Self {
        Self {
            text: text.into(),
            span,
            quoted,
        }
    }

    /// Same token without a source position, used for prelude text.
    pub fn detached(mut self) -> Self {
        self.span = Span::dummy();
        self
    }

    /// True if this is the unquoted reserved word `word`.
    pub fn is_keyword(&self, word: &str) -> bool {
        !self.quoted && self.text == word
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quoted {
            write_quoted(f, &self.text)
        } else {
            f.write_str(&self.text)
        }
    }
}

/// Write `text` so that tokenizing the output yields `text` as one word.
///
/// There are no escapes. A quote character is always written inside the
/// other kind of quote, so text holding both kinds becomes several adjacent
/// quoted runs, which the tokenizer joins back into a single word.
pub fn write_quoted(out: &mut impl fmt::Write, text: &str) -> fmt::Result {
    let preferred = if text.contains('"') && !text.contains('\'') {
        '\''
    } else {
        '"'
    };
    let mut open: Option<char> = None;
    for c in text.chars() {
        let quote = match c {
            '"' => '\'',
            '\'' => '"',
            _ => open.unwrap_or(preferred),
        };
        if open != Some(quote) {
            if let Some(current) = open {
                out.write_char(current)?;
            }
            out.write_char(quote)?;
            open = Some(quote);
        }
        out.write_char(c)?;
    }
    match open {
        Some(current) => out.write_char(current),
        None => out.write_str("\"\""),
    }
}
