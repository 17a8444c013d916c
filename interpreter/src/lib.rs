pub mod environment;
pub mod error;
pub mod evaluator;
pub mod executor;
pub mod runtime_value;

pub use environment::VariableStore;
pub use error::{DiagnosticError, RuntimeError};
pub use executor::{check_program, execute_program, execute_source};
pub use runtime_value::Value;
