use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use interpreter::{DiagnosticError, RuntimeError};

const TEST_SUFFIX: &str = ".test.endoskeleton";

/// Expectations declared in a test file's TOML frontmatter.
#[derive(Debug, Deserialize)]
pub struct TestConfig {
    /// Human-readable test description.
    #[serde(default)]
    pub description: Option<String>,

    /// Expected exact stdout output (trimmed comparison). Checked even when
    /// the run stops on a syntax error.
    #[serde(default)]
    pub expect_output: Option<String>,

    /// The run must stop on a syntax error whose message contains this.
    #[serde(default)]
    pub expect_syntax_error: Option<String>,

    /// Recoverable runtime errors, in order. Each entry is a substring of
    /// the corresponding error line. If present (even empty), the count must
    /// match too.
    #[serde(default)]
    pub expect_errors: Option<Vec<String>>,
}

/// Split a test file into its TOML frontmatter and program source.
fn parse_test_file(content: &str) -> Result<(TestConfig, &str), String> {
    let content = content.trim_start_matches('\u{feff}');

    let after_open = content
        .strip_prefix("---")
        .ok_or("missing opening --- frontmatter delimiter")?;
    let after_open = after_open
        .strip_prefix("\r\n")
        .or_else(|| after_open.strip_prefix('\n'))
        .unwrap_or(after_open);

    let close = after_open
        .find("\n---")
        .ok_or("missing closing --- frontmatter delimiter")?;
    let frontmatter = after_open[..close].trim_end_matches('\r');
    let source = after_open[close + 4..].trim_start_matches(['\r', '\n']);

    let config: TestConfig =
        toml::from_str(frontmatter).map_err(|e| format!("TOML parse error: {}", e))?;

    Ok((config, source))
}

pub enum TestOutcome {
    Pass,
    Fail(String),
}

pub struct TestResult {
    pub path: PathBuf,
    pub description: Option<String>,
    pub outcome: TestOutcome,
}

impl TestResult {
    fn label(&self) -> &str {
        self.description.as_deref().unwrap_or_else(|| {
            self.path
                .file_name()
                .and_then(|s| s.to_str())
                .map(|s| s.trim_end_matches(TEST_SUFFIX))
                .unwrap_or("?")
        })
    }
}

fn run_single_test(path: &Path) -> TestResult {
    let fail = |description: Option<String>, reason: String| TestResult {
        path: path.to_path_buf(),
        description,
        outcome: TestOutcome::Fail(reason),
    };

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return fail(None, format!("cannot read file: {}", e)),
    };

    let (config, source) = match parse_test_file(&content) {
        Ok(pair) => pair,
        Err(e) => return fail(None, format!("frontmatter error: {}", e)),
    };
    let description = config.description.clone();

    let program = endo::parser::Parser::new(source.to_string(), 0).parse();
    let mut output_buf = Vec::new();
    let result = interpreter::execute_program(&program, &mut output_buf);
    let output = String::from_utf8_lossy(&output_buf);

    let (diagnostics, failure) = match (&config.expect_syntax_error, result) {
        (Some(expected), Err(err)) => match &err.error {
            RuntimeError::Syntax(parse_error) if parse_error.message.contains(expected.as_str()) => {
                (Vec::new(), None)
            }
            _ => (
                Vec::new(),
                Some(format!(
                    "expected syntax error containing \"{}\", got: {}",
                    expected, err
                )),
            ),
        },
        (Some(expected), Ok(diagnostics)) => (
            diagnostics,
            Some(format!(
                "expected syntax error containing \"{}\", but the run completed",
                expected
            )),
        ),
        (None, Err(err)) => (Vec::new(), Some(format!("unexpected error: {}", err))),
        (None, Ok(diagnostics)) => (diagnostics, None),
    };

    let failure = failure
        .or_else(|| check_output(config.expect_output.as_deref(), &output))
        .or_else(|| {
            config
                .expect_errors
                .as_deref()
                .and_then(|expected| check_errors(&diagnostics, expected))
        });

    match failure {
        Some(reason) => fail(description, reason),
        None => TestResult {
            path: path.to_path_buf(),
            description,
            outcome: TestOutcome::Pass,
        },
    }
}

fn check_output(expected: Option<&str>, actual: &str) -> Option<String> {
    let expected = expected?.trim();
    let actual = actual.trim();
    (expected != actual).then(|| {
        format!(
            "output mismatch\n  expected:\n{}\n  actual:\n{}",
            indent(expected),
            indent(actual)
        )
    })
}

/// Check recoverable errors against expectations. Returns `Some(reason)` on mismatch.
fn check_errors(diagnostics: &[DiagnosticError], expected: &[String]) -> Option<String> {
    if diagnostics.len() != expected.len() {
        let actual: Vec<String> = diagnostics.iter().map(|d| format!("  - {}", d)).collect();
        return Some(format!(
            "expected {} runtime error(s), got {}\n  actual errors:\n{}",
            expected.len(),
            diagnostics.len(),
            if actual.is_empty() {
                "    (none)".to_string()
            } else {
                actual.join("\n")
            }
        ));
    }

    diagnostics
        .iter()
        .zip(expected)
        .enumerate()
        .find_map(|(i, (actual, expected))| {
            let msg = actual.to_string();
            (!msg.contains(expected.as_str())).then(|| {
                format!(
                    "error[{}]: expected message containing \"{}\", got: {}",
                    i, expected, msg
                )
            })
        })
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Discover test files grouped by category (subfolder relative to root).
/// Files directly in `root` get category "" (uncategorized).
fn discover_categorized(root: &Path) -> BTreeMap<String, Vec<PathBuf>> {
    let mut categories: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    collect_tests(root, root, &mut categories);
    for files in categories.values_mut() {
        files.sort();
    }
    categories
}

fn collect_tests(dir: &Path, root: &Path, out: &mut BTreeMap<String, Vec<PathBuf>>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            collect_tests(&path, root, out);
            continue;
        }
        let is_test = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(TEST_SUFFIX));
        if is_test {
            let category = path
                .parent()
                .and_then(|p| p.strip_prefix(root).ok())
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_default();
            out.entry(category).or_default().push(path);
        }
    }
}

/// List available categories for the given test path.
pub fn list_categories(path: &Path) {
    if path.is_file() {
        eprintln!("(single file, no categories)");
        return;
    }

    let categories = discover_categorized(path);
    if categories.is_empty() {
        eprintln!("no {} files found in {}", TEST_SUFFIX, path.display());
        return;
    }

    eprintln!("available categories:");
    for (cat, files) in &categories {
        let label = if cat.is_empty() { "(root)" } else { cat.as_str() };
        eprintln!("  {} ({} tests)", label, files.len());
    }
}

struct Style {
    no_color: bool,
}

impl Style {
    fn paint(&self, text: &str, code: &str) -> String {
        if self.no_color {
            text.to_string()
        } else {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        }
    }

    fn pass(&self) -> String {
        self.paint("PASS", "32")
    }

    fn fail(&self) -> String {
        self.paint("FAIL", "31")
    }

    fn bold(&self, text: &str) -> String {
        self.paint(text, "1")
    }
}

/// Select the categories to run. Unknown requested categories produce a warning.
fn select_categories<'a>(
    all: &'a BTreeMap<String, Vec<PathBuf>>,
    requested: &[String],
) -> BTreeMap<&'a str, &'a Vec<PathBuf>> {
    if requested.is_empty() {
        return all.iter().map(|(k, v)| (k.as_str(), v)).collect();
    }

    let mut selected = BTreeMap::new();
    for req in requested {
        let req = req.trim_matches('/');
        let prefix = format!("{}/", req);
        let before = selected.len();
        for (cat, files) in all {
            if cat == req || cat.starts_with(&prefix) {
                selected.insert(cat.as_str(), files);
            }
        }
        if selected.len() == before {
            let available: Vec<&str> = all
                .keys()
                .map(|k| if k.is_empty() { "(root)" } else { k.as_str() })
                .collect();
            eprintln!(
                "warning: category '{}' not found (available: {})",
                req,
                available.join(", ")
            );
        }
    }
    selected
}

/// Run all test files under `path` (or a single file).
/// If `categories` is non-empty, only run tests in those categories.
/// Returns exit code: 0 = all pass, 1 = any failure.
pub fn run_tests(path: &Path, no_color: bool, categories: &[String]) -> i32 {
    let style = Style { no_color };

    let groups: Vec<(String, Vec<PathBuf>)> = if path.is_file() {
        vec![(String::new(), vec![path.to_path_buf()])]
    } else {
        let all = discover_categorized(path);
        if all.is_empty() {
            eprintln!("no {} files found in {}", TEST_SUFFIX, path.display());
            return 1;
        }
        let selected = select_categories(&all, categories);
        if selected.is_empty() {
            eprintln!("no matching categories found");
            return 1;
        }
        selected
            .into_iter()
            .map(|(cat, files)| (cat.to_string(), files.clone()))
            .collect()
    };

    let mut passed = 0usize;
    let mut failures: Vec<TestResult> = Vec::new();

    for (cat, files) in &groups {
        eprintln!();
        eprintln!("{}", style.bold(if cat.is_empty() { "(root)" } else { cat.as_str() }));

        for file in files {
            let result = run_single_test(file);
            match result.outcome {
                TestOutcome::Pass => {
                    passed += 1;
                    eprintln!("  {}  {}", style.pass(), result.label());
                }
                TestOutcome::Fail(_) => {
                    eprintln!("  {}  {}", style.fail(), result.label());
                    failures.push(result);
                }
            }
        }
    }

    if !failures.is_empty() {
        eprintln!();
        eprintln!("failures:");
        for f in &failures {
            eprintln!();
            eprintln!("  --- {} ---", f.path.display());
            if let TestOutcome::Fail(reason) = &f.outcome {
                for line in reason.lines() {
                    eprintln!("  {}", line);
                }
            }
        }
    }

    eprintln!();
    let failed = failures.len();
    if failed == 0 {
        eprintln!("test result: {}. {} passed, 0 failed", style.paint("ok", "32"), passed);
        0
    } else {
        eprintln!(
            "test result: {}. {} passed, {} failed (of {})",
            style.paint("FAILED", "31"),
            passed,
            failed,
            passed + failed
        );
        1
    }
}
