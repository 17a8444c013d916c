pub mod instruction;
pub mod parser;
pub mod statement;

use crate::statement::Statement;

/// File extension (without the dot) that endoskeleton sources must carry.
pub const FILE_EXTENSION: &str = "endoskeleton";

/// A split endoskeleton program, ready to be classified statement by statement.
#[derive(Debug, Clone)]
pub struct Program {
    /// Non-empty, trimmed statements in source order.
    pub statements: Vec<Statement>,
    /// The source file ID (for error reporting with codespan-reporting).
    pub source_id: usize,
}

impl Program {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
