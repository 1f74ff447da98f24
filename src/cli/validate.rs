//! Validation command for module payloads.

use crate::cli::common::{print_json, CliContext, CliError, CliResult};
use crate::shell::{AggregatedSolution, ModuleValidations};
use clap::Args;
use serde::Serialize;

/// Render every module tile and report validation results
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

/// JSON response of `validate --json`.
#[derive(Debug, Serialize)]
struct ValidationResponse<'a> {
    valid: bool,
    error_count: usize,
    warning_count: usize,
    modules: &'a ModuleValidations,
    solutions: &'a [AggregatedSolution],
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self, context: &CliContext) -> CliResult<()> {
        let model = context.default_shell()?.render()?;
        let summary = &model.validation;
        let failed = summary.has_errors || (self.strict && summary.warning_count > 0);

        if self.json {
            print_json(&ValidationResponse {
                valid: !failed,
                error_count: summary.error_count,
                warning_count: summary.warning_count,
                modules: &summary.modules,
                solutions: &model.self_healing.solutions,
            })?;
        } else {
            if failed {
                println!("✗ Validation failed");
            } else {
                println!("✓ Validation passed");
            }

            for (identifier, result) in &summary.modules {
                let mark = if result.is_valid() { "✓" } else { "✗" };
                println!("\n{mark} {identifier}: {}", result.summary());
                for error in result.errors() {
                    println!("  ✗ {error}");
                }
                for warning in result.warnings() {
                    println!("  ⚠ {warning}");
                }
            }

            if !model.self_healing.solutions.is_empty() {
                println!("\nSuggested fixes:");
                for solution in &model.self_healing.solutions {
                    println!("  - {} ({} module(s))", solution.text, solution.count);
                }
            }
        }

        if failed {
            let reason = if summary.has_errors {
                format!("{} validation error(s)", summary.error_count)
            } else {
                format!("{} warning(s) in strict mode", summary.warning_count)
            };
            return Err(CliError::validation(format!("Validation failed: {reason}")));
        }
        Ok(())
    }
}
