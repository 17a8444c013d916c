mod classifier;
mod cursor;
pub mod error;

pub use classifier::classify;
pub use error::ParseError;

use crate::Program;
use crate::statement::split_statements;

/// Parser entry point.
pub struct Parser {
    source: String,
    file_id: usize,
}

impl Parser {
    pub fn new(source: String, file_id: usize) -> Self {
        Parser { source, file_id }
    }

    /// Split the source into statements. Classification happens lazily, one
    /// statement at a time, so that a bad statement only stops the run where
    /// it occurs.
    pub fn parse(&self) -> Program {
        Program {
            statements: split_statements(&self.source),
            source_id: self.file_id,
        }
    }
}
