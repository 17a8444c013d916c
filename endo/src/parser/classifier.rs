use std::ops::Range;

use crate::instruction::{ArrayIndex, Instruction};
use crate::parser::cursor::Cursor;
use crate::parser::error::ParseError;
use crate::statement::Statement;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// A shape matcher. Returns `Some` only if it consumes the whole statement.
type Shape = fn(&str, &Range<usize>) -> Option<Instruction>;

/// Recognised statement shapes, in priority order. The first shape that
/// matches the entire statement wins; assignment must stay ahead of array
/// declaration.
const SHAPES: [(&str, Shape); 5] = [
    ("name = \"value\"", assignment),
    ("print(\"text\") or print(name)", print),
    ("name = [a, \"b\", 'c']", array_declaration),
    ("name = array[index]", indexed_assignment),
    ("array[index]", indexed_access),
];

/// Classify one trimmed statement into an Instruction.
pub fn classify(statement: &Statement, file_id: usize) -> Result<Instruction, ParseError> {
    SHAPES
        .iter()
        .find_map(|(_, shape)| shape(&statement.text, &statement.span))
        .ok_or_else(|| syntax_error(statement, file_id))
}

fn syntax_error(statement: &Statement, file_id: usize) -> ParseError {
    let shapes: Vec<&str> = SHAPES.iter().map(|(example, _)| *example).collect();
    ParseError::error(
        format!(
            "Syntax error: Could not parse the line '{}'",
            statement.text
        ),
        statement.text.clone(),
        statement.span.clone(),
        file_id,
    )
    .with_note(format!("expected one of: {}", shapes.join(", ")))
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

/// `name = "value"`
fn assignment(text: &str, span: &Range<usize>) -> Option<Instruction> {
    let mut cur = Cursor::new(text);
    let name = cur.ident()?;
    if !cur.equals() {
        return None;
    }
    let value = cur.quoted(b'"')?;
    cur.at_end().then(|| Instruction::Assign {
        name: name.to_string(),
        value: value.to_string(),
        span: span.clone(),
    })
}

/// `print("text")`, `print(name)` or `print(array[index])`
fn print(text: &str, span: &Range<usize>) -> Option<Instruction> {
    let mut cur = Cursor::new(text);
    if !cur.eat_str("print(") {
        return None;
    }

    let instruction = if let Some(literal) = cur.quoted(b'"') {
        Instruction::PrintLiteral {
            text: literal.to_string(),
            span: span.clone(),
        }
    } else {
        let name = cur.ident()?;
        if let Some(index) = cur.subscript() {
            Instruction::StandaloneArrayAccess {
                array: name.to_string(),
                index: ArrayIndex::new(index),
                span: span.clone(),
            }
        } else {
            Instruction::PrintVariable {
                name: name.to_string(),
                span: span.clone(),
            }
        }
    };

    (cur.eat(b')') && cur.at_end()).then_some(instruction)
}

/// `name = [elem, elem, ...]`
fn array_declaration(text: &str, span: &Range<usize>) -> Option<Instruction> {
    let mut cur = Cursor::new(text);
    let name = cur.ident()?;
    if !cur.equals() || !cur.eat(b'[') {
        return None;
    }

    // Validate element by element, then split the bracketed text on commas.
    // A comma inside a quoted element therefore still splits it.
    let body_start = cur.pos();
    loop {
        cur.skip_whitespace();
        element(&mut cur)?;
        cur.skip_whitespace();
        if cur.eat(b',') {
            continue;
        }
        if cur.peek() == Some(b']') {
            break;
        }
        return None;
    }
    let body = &text[body_start..cur.pos()];
    if !cur.eat(b']') || !cur.at_end() {
        return None;
    }

    Some(Instruction::DeclareArray {
        name: name.to_string(),
        elements: body.split(',').map(unquote).collect(),
        span: span.clone(),
    })
}

/// One array element: double-quoted, single-quoted, or a bare word.
fn element<'a>(cur: &mut Cursor<'a>) -> Option<&'a str> {
    cur.quoted(b'"')
        .or_else(|| cur.quoted(b'\''))
        .or_else(|| cur.ident())
}

/// Trim a comma-separated piece and strip one pair of matching quotes.
fn unquote(piece: &str) -> String {
    let piece = piece.trim();
    for quote in ['"', '\''] {
        if piece.len() >= 2 && piece.starts_with(quote) && piece.ends_with(quote) {
            return piece[1..piece.len() - 1].to_string();
        }
    }
    piece.to_string()
}

/// `target = array[index]`
fn indexed_assignment(text: &str, span: &Range<usize>) -> Option<Instruction> {
    let mut cur = Cursor::new(text);
    let target = cur.ident()?;
    if !cur.equals() {
        return None;
    }
    let array = cur.ident()?;
    let index = cur.subscript()?;
    cur.at_end().then(|| Instruction::AccessArray {
        target: target.to_string(),
        array: array.to_string(),
        index: ArrayIndex::new(index),
        span: span.clone(),
    })
}

/// `array[index]`
fn indexed_access(text: &str, span: &Range<usize>) -> Option<Instruction> {
    let mut cur = Cursor::new(text);
    let array = cur.ident()?;
    let index = cur.subscript()?;
    cur.at_end().then(|| Instruction::StandaloneArrayAccess {
        array: array.to_string(),
        index: ArrayIndex::new(index),
        span: span.clone(),
    })
}
