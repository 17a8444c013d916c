use std::fmt;
use std::ops::Range;

/// A classified statement, consumed immediately by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// String assignment: `name = "value"`
    Assign {
        name: String,
        value: String,
        span: Range<usize>,
    },
    /// `print("text")`
    PrintLiteral { text: String, span: Range<usize> },
    /// `print(name)`
    PrintVariable { name: String, span: Range<usize> },
    /// Array declaration: `name = [a, "b", 'c']`
    DeclareArray {
        name: String,
        elements: Vec<String>,
        span: Range<usize>,
    },
    /// Indexed assignment: `target = array[index]`
    AccessArray {
        target: String,
        array: String,
        index: ArrayIndex,
        span: Range<usize>,
    },
    /// Indexed access whose element is printed: `array[index]` or `print(array[index])`
    StandaloneArrayAccess {
        array: String,
        index: ArrayIndex,
        span: Range<usize>,
    },
}

impl Instruction {
    pub fn span(&self) -> &Range<usize> {
        match self {
            Instruction::Assign { span, .. } => span,
            Instruction::PrintLiteral { span, .. } => span,
            Instruction::PrintVariable { span, .. } => span,
            Instruction::DeclareArray { span, .. } => span,
            Instruction::AccessArray { span, .. } => span,
            Instruction::StandaloneArrayAccess { span, .. } => span,
        }
    }

    /// Short name of the instruction kind, used in debug logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Instruction::Assign { .. } => "assign",
            Instruction::PrintLiteral { .. } => "print",
            Instruction::PrintVariable { .. } => "print_var",
            Instruction::DeclareArray { .. } => "declare_array",
            Instruction::AccessArray { .. } => "access_array",
            Instruction::StandaloneArrayAccess { .. } => "standalone_array_access",
        }
    }
}

/// An array index exactly as written in the source.
///
/// The raw token is kept so that error messages echo it verbatim; the numeric
/// value is only resolved against a concrete array length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayIndex(String);

impl ArrayIndex {
    pub fn new(token: impl Into<String>) -> Self {
        ArrayIndex(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve against an array of `len` elements.
    /// Tokens that don't parse (including overflow) count as out of bounds.
    pub fn position(&self, len: usize) -> Option<usize> {
        self.0.parse::<usize>().ok().filter(|&i| i < len)
    }
}

impl fmt::Display for ArrayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
