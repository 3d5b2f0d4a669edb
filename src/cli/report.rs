//! Report formatting and printing utilities.
//!
//! This module provides functions to display issues in cargo-style format.
//! Separate from core logic to allow loccat to be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CheckSummary, CommandResult, CommandSummary, GenerateSummary, InitSummary};
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    for issue in &sorted {
        print_issue(issue, writer);
    }

    print_summary(&sorted, writer);
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(summary: &CheckSummary, source_files: usize, writer: &mut W) {
    let msg = format!(
        "Compiled {} {} ({} {}) from {} source {} - no issues found",
        summary.contract_count,
        plural(summary.contract_count, "contract", "contracts"),
        summary.key_count,
        plural(summary.key_count, "key", "keys"),
        source_files,
        plural(source_files, "file", "files"),
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

pub fn print(result: &CommandResult) {
    match &result.summary {
        CommandSummary::Check(summary) => {
            let mut stdout = io::stdout().lock();
            if result.issues.is_empty() {
                print_success_to(summary, result.source_files_checked, &mut stdout);
            } else {
                report_to(&result.issues, &mut stdout);
            }
        }
        CommandSummary::Render(summary) => {
            if let Some(text) = &summary.text {
                println!("{}", text);
            }
            let mut stderr = io::stderr().lock();
            if let Some(error) = &summary.error {
                let _ = writeln!(stderr, "{}: {}", "error".bold().red(), error);
            }
            report_to(&result.issues, &mut stderr);
        }
        CommandSummary::Generate(summary) => {
            if let Some(code) = &summary.code {
                print!("{}", code);
            }
            // stdout may hold the generated module, so diagnostics go to stderr.
            let mut stderr = io::stderr().lock();
            report_to(&result.issues, &mut stderr);
            if summary.output.is_some() {
                print_generated_to(summary, &mut io::stdout().lock());
            }
        }
        CommandSummary::Init(summary) if summary.existing => {
            print_init_to(summary, &mut io::stderr().lock());
        }
        CommandSummary::Init(summary) => {
            print_init_to(summary, &mut io::stdout().lock());
        }
    }
}

fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.existing {
        let _ = writeln!(
            writer,
            "{}: {} already exists; remove it to start from the defaults",
            "error".bold().red(),
            summary.path.display()
        );
    } else {
        let msg = format!("Wrote default configuration to {}", summary.path.display());
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
    }
}

fn print_generated_to<W: Write>(summary: &GenerateSummary, writer: &mut W) {
    let Some(path) = &summary.output else {
        return;
    };
    let msg = format!(
        "Generated {} {} for {} {} in {}",
        summary.accessor_count,
        plural(summary.accessor_count, "accessor", "accessors"),
        summary.contract_count,
        plural(summary.contract_count, "contract", "contracts"),
        path.display()
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

// ============================================================
// Internal Functions
// ============================================================

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };
    let location = issue.location();

    // Keys are quoted; other messages are sentences.
    let message = match location {
        ReportLocation::Key { .. } => format!("\"{}\"", issue.message()),
        _ => issue.message(),
    };
    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        message,
        issue.code().dimmed().cyan()
    );

    match location {
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
        ReportLocation::Key { file, key } => {
            let caret_char = match severity {
                Severity::Error => "^".red(),
                Severity::Warning => "^".yellow(),
            };
            let _ = writeln!(writer, "  {} {}", "-->".blue(), file);
            let _ = writeln!(writer, "   {}", "|".blue());
            let _ = writeln!(writer, "   {} {}", "|".blue(), key);
            let carets = caret_char.to_string().repeat(UnicodeWidthStr::width(key).max(1));
            let _ = writeln!(writer, "   {} {}", "|".blue(), carets);
        }
        ReportLocation::Global => {}
    }

    // Print details if present (cargo-style note)
    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "note:".bold(), details);
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "hint:".bold().cyan(), hint);
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            plural(total_problems, "problem", "problems"),
            total_errors,
            plural(total_errors, "error", "errors").red(),
            total_warnings,
            plural(total_warnings, "warning", "warnings").yellow()
        );
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::error::CompileError;
    use crate::issues::{BuildFailureIssue, MissingSourceIssue, MissingTranslationIssue};

    fn strip_ansi(s: &str) -> String {
        // Simple ANSI escape code stripper for testing
        let mut result = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                // Skip until 'm'
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                result.push(c);
            }
        }
        result
    }

    fn render(issues: &[Issue]) -> String {
        let mut output = Vec::new();
        report_to(issues, &mut output);
        strip_ansi(&String::from_utf8(output).unwrap())
    }

    fn missing_translation() -> Issue {
        Issue::MissingTranslation(MissingTranslationIssue {
            contract: "bot.Greetings".to_string(),
            key: "greeting.hello".to_string(),
            locale: "de-DE".to_string(),
            file_path: "localization/de_de/bot/greetings.yaml".to_string(),
        })
    }

    #[test]
    fn test_report_empty() {
        let mut output = Vec::new();
        report_to(&[], &mut output);
        assert!(output.is_empty());
    }

    #[test]
    fn test_report_key_issue() {
        let stripped = render(&[missing_translation()]);

        assert!(stripped.contains("warning: \"greeting.hello\"  missing-translation"));
        assert!(stripped.contains("--> localization/de_de/bot/greetings.yaml"));
        assert!(stripped.contains("| ^^^^^^^^^^^^^^\n"));
        assert!(stripped.contains("1 problem (0 errors, 1 warning)"));
    }

    #[test]
    fn test_report_file_issue() {
        let issue = Issue::MissingSource(MissingSourceIssue {
            contract: "bot.Greetings".to_string(),
            locale: "fr-FR".to_string(),
            file_name: "bot.greetings".to_string(),
            path: "localization/fr_fr/bot/greetings.yaml".to_string(),
        });
        let stripped = render(&[issue]);

        assert!(stripped.contains("warning: no fr-FR source for 'bot.greetings'  missing-source"));
        assert!(stripped.contains("--> localization/fr_fr/bot/greetings.yaml"));
        assert!(stripped.contains("= note: bot.Greetings gets no entries from fr-FR"));
    }

    #[test]
    fn test_report_build_failure_first() {
        let failure = Issue::BuildFailure(BuildFailureIssue::from(
            &CompileError::DuplicateContract("bot.Greetings".to_string()),
        ));
        let stripped = render(&[missing_translation(), failure]);

        let error_pos = stripped.find("error:").unwrap();
        let warning_pos = stripped.find("warning:").unwrap();
        assert!(error_pos < warning_pos);
        assert!(stripped.contains("duplicate-contract"));
        assert!(stripped.contains("2 problems (1 error, 1 warning)"));
    }

    #[test]
    fn test_print_success() {
        let mut output = Vec::new();
        let summary = CheckSummary {
            contract_count: 1,
            key_count: 3,
        };
        print_success_to(&summary, 2, &mut output);
        let stripped = strip_ansi(&String::from_utf8(output).unwrap());
        assert_eq!(
            stripped,
            "\u{2713} Compiled 1 contract (3 keys) from 2 source files - no issues found\n"
        );
    }

    #[test]
    fn test_print_init() {
        let mut output = Vec::new();
        let mut summary = InitSummary {
            path: PathBuf::from("bot/.loccatrc.json"),
            existing: false,
        };
        print_init_to(&summary, &mut output);
        summary.existing = true;
        print_init_to(&summary, &mut output);

        let stripped = strip_ansi(&String::from_utf8(output).unwrap());
        assert_eq!(
            stripped,
            "\u{2713} Wrote default configuration to bot/.loccatrc.json\n\
             error: bot/.loccatrc.json already exists; remove it to start from the defaults\n"
        );
    }

    #[test]
    fn test_print_generated() {
        let mut output = Vec::new();
        let summary = GenerateSummary {
            code: None,
            output: Some(PathBuf::from("src/catalog.rs")),
            contract_count: 2,
            accessor_count: 1,
        };
        print_generated_to(&summary, &mut output);
        let stripped = strip_ansi(&String::from_utf8(output).unwrap());
        assert_eq!(
            stripped,
            "\u{2713} Generated 1 accessor for 2 contracts in src/catalog.rs\n"
        );
    }
}
