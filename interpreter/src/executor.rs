use std::io::Write;

use endo::Program;
use endo::parser::{ParseError, Parser, classify};
use log::{debug, error, trace};

use crate::environment::VariableStore;
use crate::error::DiagnosticError;
use crate::evaluator::evaluate;

/// Execute a program, writing its output to `output`.
///
/// Statements are classified and evaluated one at a time, in order. The
/// first statement that fails to classify stops the run: its report is
/// written to `output` and the syntax error is returned. Recoverable runtime
/// errors are written to `output` as they happen and returned together once
/// the run completes.
pub fn execute_program(
    program: &Program,
    output: &mut dyn Write,
) -> Result<Vec<DiagnosticError>, DiagnosticError> {
    let mut store = VariableStore::new();
    let mut diagnostics = Vec::new();

    for statement in &program.statements {
        let instruction = match classify(statement, program.source_id) {
            Ok(instruction) => instruction,
            Err(err) => {
                error!("syntax error at {:?}: {}", statement.span, statement.text);
                write_syntax_report(output, &err)?;
                return Err(err.into());
            }
        };
        debug!("{} <= {:?}", instruction.kind(), statement.text);

        match evaluate(&instruction, &mut store) {
            Ok(Some(line)) => {
                trace!("output: {}", line);
                writeln!(output, "{}", line)?;
            }
            Ok(None) => {}
            Err(err) => {
                debug!("recoverable error in {:?}: {}", statement.text, err);
                writeln!(output, "{}", err)?;
                diagnostics.push(DiagnosticError::warning(
                    err,
                    statement.span.clone(),
                    program.source_id,
                ));
            }
        }
    }

    debug!("run finished; bound: {}", store.names().join(", "));
    Ok(diagnostics)
}

/// Split and execute raw source text (file id 0).
pub fn execute_source(
    source: &str,
    output: &mut dyn Write,
) -> Result<Vec<DiagnosticError>, DiagnosticError> {
    let program = Parser::new(source.to_string(), 0).parse();
    execute_program(&program, output)
}

/// Classify every statement without executing anything, collecting all
/// syntax errors rather than stopping at the first.
pub fn check_program(program: &Program) -> Vec<ParseError> {
    program
        .statements
        .iter()
        .filter_map(|statement| classify(statement, program.source_id).err())
        .collect()
}

fn write_syntax_report(output: &mut dyn Write, err: &ParseError) -> std::io::Result<()> {
    writeln!(output, "Error processing statement: '{}'", err.statement)?;
    writeln!(output, "Error message: {}", err.message)
}
