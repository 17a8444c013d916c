use std::ops::Range;

/// One semicolon-delimited unit of program text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// The statement text with surrounding whitespace removed.
    pub text: String,
    /// Byte span of `text` within the original source.
    pub span: Range<usize>,
}

/// Split source text on `;` into trimmed, non-empty statements.
///
/// Semicolons are not protected by quotes: `print("a;b")` yields two
/// statements, neither of which classifies.
pub fn split_statements(source: &str) -> Vec<Statement> {
    let mut statements = Vec::new();
    let mut offset = 0;

    for segment in source.split(';') {
        let leading = segment.len() - segment.trim_start().len();
        let text = segment.trim();
        if !text.is_empty() {
            let start = offset + leading;
            statements.push(Statement {
                text: text.to_string(),
                span: start..start + text.len(),
            });
        }
        // Skip the segment and the separator that ended it.
        offset += segment.len() + 1;
    }

    statements
}
