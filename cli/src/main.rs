mod test_runner;

use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use log::debug;

use interpreter::DiagnosticError;

const SUBCOMMANDS: &[&str] = &["run", "test", "help"];

#[derive(Parser)]
#[command(name = "endo", version, about = "Endoskeleton script interpreter")]
struct Cli {
    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an endoskeleton program
    Run(RunArgs),

    /// Run .test.endoskeleton test files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct RunArgs {
    /// Source file to execute (must end in .endoskeleton)
    file: String,

    /// Classify every statement without executing (exit 0 if all are valid)
    #[arg(long)]
    check: bool,

    /// Dump the classified instructions
    #[arg(long)]
    instructions: bool,

    /// Suppress program output; runtime errors are reported on stderr instead
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.endoskeleton file or directory containing them
    path: String,

    /// Run only tests in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() {
    env_logger::init();

    // `endo file.endoskeleton` is shorthand for `endo run file.endoskeleton`.
    let mut args: Vec<String> = std::env::args().collect();
    if let Some(pos) = args
        .iter()
        .skip(1)
        .position(|a| !a.starts_with('-'))
        .map(|p| p + 1)
    {
        if !SUBCOMMANDS.contains(&args[pos].as_str()) {
            args.insert(pos, "run".to_string());
        }
    }

    let cli = Cli::parse_from(&args);

    match cli.command {
        Command::Run(run_args) => do_run(run_args, cli.no_color),
        Command::Test(test_args) => {
            let path = Path::new(&test_args.path);
            if test_args.list_categories {
                test_runner::list_categories(path);
                return;
            }
            let exit_code = test_runner::run_tests(path, cli.no_color, &test_args.category);
            process::exit(exit_code);
        }
    }
}

fn do_run(args: RunArgs, no_color: bool) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    if !args.file.ends_with(&format!(".{}", endo::FILE_EXTENSION)) {
        println!(
            "Error: File must have a .{} extension.",
            endo::FILE_EXTENSION
        );
        process::exit(1);
    }

    let source = match std::fs::read_to_string(&args.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", args.file, e);
            process::exit(1);
        }
    };

    let mut files = SimpleFiles::new();
    let file_id = files.add(args.file.clone(), source.clone());

    let program = endo::parser::Parser::new(source, file_id).parse();
    debug!("{}: {} statement(s)", args.file, program.statements.len());

    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();

    // --check: classify only
    if args.check {
        let errors = interpreter::check_program(&program);
        if errors.is_empty() {
            eprintln!("ok: {} parsed successfully", args.file);
            return;
        }
        for error in &errors {
            let _ = term::emit_to_write_style(
                &mut writer.lock(),
                &config,
                &files,
                &error.to_diagnostic(),
            );
        }
        process::exit(1);
    }

    // --instructions: dump classified statements
    if args.instructions {
        for statement in &program.statements {
            match endo::parser::classify(statement, program.source_id) {
                Ok(instruction) => println!("{:#?}", instruction),
                Err(error) => {
                    let _ = term::emit_to_write_style(
                        &mut writer.lock(),
                        &config,
                        &files,
                        &error.to_diagnostic(),
                    );
                    process::exit(1);
                }
            }
        }
        return;
    }

    let result = if args.quiet {
        let mut sink = std::io::sink();
        interpreter::execute_program(&program, &mut sink)
    } else {
        let mut stdout = std::io::stdout();
        interpreter::execute_program(&program, &mut stdout)
    };

    match result {
        Ok(diagnostics) => {
            // Runtime errors already went to stdout unless it was discarded.
            if args.quiet {
                emit_diagnostics(&writer, &config, &files, &diagnostics);
            }
        }
        Err(error) => {
            emit_diagnostic_error(&writer, &config, &files, &error);
            process::exit(1);
        }
    }
}

fn emit_diagnostic_error(
    writer: &StandardStream,
    config: &term::Config,
    files: &SimpleFiles<String, String>,
    error: &DiagnosticError,
) {
    if let interpreter::RuntimeError::Syntax(parse_error) = &error.error {
        let _ = term::emit_to_write_style(
            &mut writer.lock(),
            config,
            files,
            &parse_error.to_diagnostic(),
        );
        return;
    }

    if let Some(span) = &error.span {
        let severity = if error.is_warning {
            Severity::Warning
        } else {
            Severity::Error
        };
        let diagnostic = Diagnostic::new(severity)
            .with_message(error.to_string())
            .with_labels(vec![Label::primary(error.source_id, span.clone())]);
        let _ = term::emit_to_write_style(&mut writer.lock(), config, files, &diagnostic);
    } else {
        let prefix = if error.is_warning {
            "warning"
        } else {
            "runtime error"
        };
        eprintln!("{}: {}", prefix, error);
    }
}

fn emit_diagnostics(
    writer: &StandardStream,
    config: &term::Config,
    files: &SimpleFiles<String, String>,
    diagnostics: &[DiagnosticError],
) {
    for diag in diagnostics {
        emit_diagnostic_error(writer, config, files, diag);
    }
}
