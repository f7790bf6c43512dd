use owo_colors::{OwoColorize, Style};

/// A byte range in the user's source text.
///
/// Tokens that come from the bundled prelude carry a dummy span, so their
/// diagnostics are rendered without a source snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    pub fn is_dummy(&self) -> bool {
        self.start == 0 && self.end == 0
    }
}

/// A message attached to a span of source.
#[derive(Debug, Clone)]
pub struct Label {
    pub span: Span,
    pub message: String,
}

impl Label {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

/// A complete error message.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub code: Option<&'static str>,
    pub message: String,
    pub label: Option<Label>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            label: None,
            notes: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach a label. Labels on dummy spans are dropped.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        if !span.is_dummy() {
            self.label = Some(Label::new(span, message));
        }
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.notes.push(format!("help: {}", help.into()));
        self
    }
}

/// Computes the 1-based line and column of a byte offset.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

fn line_text(source: &str, line_num: usize) -> &str {
    source.lines().nth(line_num - 1).unwrap_or("")
}

/// Renders diagnostics in a rustc-like layout.
pub struct DiagnosticRenderer<'a> {
    source: &'a str,
    file_name: &'a str,
    use_color: bool,
}

impl<'a> DiagnosticRenderer<'a> {
    pub fn new(source: &'a str, file_name: &'a str, use_color: bool) -> Self {
        Self {
            source,
            file_name,
            use_color,
        }
    }

    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();

        let severity = self.paint("error", Style::new().red().bold());
        let message = self.paint(&diagnostic.message, Style::new().bold());
        match diagnostic.code {
            Some(code) => output.push_str(&format!("{}[{}]: {}\n", severity, code, message)),
            None => output.push_str(&format!("{}: {}\n", severity, message)),
        }

        let gutter = self.paint("|", Style::new().blue());

        if let Some(label) = &diagnostic.label {
            let (line, col) = line_col(self.source, label.span.start);
            let width = line.to_string().len();
            let pad = " ".repeat(width + 1);

            output.push_str(&format!(
                "{}{} {}:{}:{}\n",
                " ".repeat(width),
                self.paint("-->", Style::new().blue()),
                self.file_name,
                line,
                col
            ));
            output.push_str(&format!("{}{}\n", pad, gutter));

            let text = line_text(self.source, line);
            output.push_str(&format!(
                "{} {} {}\n",
                self.paint(&line.to_string(), Style::new().blue()),
                gutter,
                text
            ));

            // Underline to the end of the span, clipped to this line.
            let span_len = self
                .source
                .get(label.span.start..label.span.end.min(self.source.len()))
                .unwrap_or("")
                .chars()
                .take_while(|c| *c != '\n')
                .count()
                .max(1);
            let mut underline = format!("{}{}", " ".repeat(col - 1), "^".repeat(span_len));
            if !label.message.is_empty() {
                underline.push(' ');
                underline.push_str(&label.message);
            }
            output.push_str(&format!(
                "{}{} {}\n",
                pad,
                gutter,
                self.paint(&underline, Style::new().red())
            ));
        }

        for note in &diagnostic.notes {
            output.push_str(&format!("  {} {}\n", self.paint("=", Style::new().blue()), note));
        }

        output
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.use_color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Render every diagnostic followed by an abort summary.
pub fn render_diagnostics(
    source: &str,
    file_name: &str,
    diagnostics: &[Diagnostic],
    use_color: bool,
) -> String {
    let renderer = DiagnosticRenderer::new(source, file_name, use_color);
    let mut output = String::new();

    for diagnostic in diagnostics {
        output.push_str(&renderer.render(diagnostic));
        output.push('\n');
    }

    let error_count = diagnostics.len();
    if error_count > 0 {
        output.push_str(&format!(
            "error: aborting due to {} error{}\n",
            error_count,
            if error_count == 1 { "" } else { "s" }
        ));
    }

    output
}
