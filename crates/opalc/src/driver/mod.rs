//! Check pipeline: lex, parse, analyze, report

use crate::common::{CompileResult, DiagnosticReporter};
use crate::frontend::ast::Module;
use crate::frontend::{Lexer, Parser};
use crate::sema::{check_module, Analysis};
use std::fmt::Write as _;
use tracing::info;

/// Options for a single check run
#[derive(Debug, Clone, Default)]
pub struct CheckConfig {
    pub dump_tokens: bool,
    pub dump_ast: bool,
    /// Print every binding with its resolved type
    pub dump_types: bool,
    pub verbose: bool,
}

/// A parsed module together with what the checker found
#[derive(Debug)]
pub struct Checked {
    pub module: Module,
    pub analysis: Analysis,
}

/// Runs one source file through the pipeline
pub struct Driver<'a> {
    reporter: &'a DiagnosticReporter,
    file_id: usize,
    config: CheckConfig,
}

impl<'a> Driver<'a> {
    pub fn new(reporter: &'a DiagnosticReporter, file_id: usize, config: CheckConfig) -> Self {
        Self {
            reporter,
            file_id,
            config,
        }
    }

    /// Check `source`, rendering every diagnostic through the reporter
    ///
    /// Lexer and parser errors abort the run and are returned. Type errors
    /// do not: they are reported and left in the returned [`Analysis`].
    pub fn check_source(&self, source: &str) -> CompileResult<Checked> {
        // Phase 1: Lexing (optional token dump)
        if self.config.dump_tokens {
            match Lexer::new(source).tokenize_all() {
                Ok(tokens) => {
                    eprintln!("=== Tokens ===");
                    for token in &tokens {
                        eprintln!("{:?}", token);
                    }
                    eprintln!("=== End Tokens ===\n");
                }
                Err(e) => {
                    self.reporter.report_error(self.file_id, &e);
                    return Err(e);
                }
            }
        }

        // Phase 2: Parsing
        info!(file_id = self.file_id, "parsing");
        let module = match Parser::new(source).parse_module() {
            Ok(m) => m,
            Err(e) => {
                self.reporter.report_error(self.file_id, &e);
                return Err(e);
            }
        };

        if self.config.dump_ast {
            eprintln!("=== AST ===");
            eprintln!("{:#?}", module);
            eprintln!("=== End AST ===\n");
        }

        // Phase 3: Semantic analysis
        info!(items = module.items.len(), "checking");
        let analysis = check_module(&module);
        info!(errors = analysis.errors.len(), types = analysis.types.len(), "checked");

        for error in &analysis.errors {
            self.reporter.report_type_error(self.file_id, error);
        }

        if self.config.dump_types {
            eprintln!("=== Types ===");
            eprint!("{}", format_bindings(&analysis));
            eprintln!("=== End Types ===\n");
        }

        if self.config.verbose {
            eprintln!(
                "Checked {} declarations: {} error(s)",
                analysis.decl_bindings.len(),
                analysis.errors.len()
            );
        }

        Ok(Checked { module, analysis })
    }
}

/// One line per binding: `name: type`, in declaration order
pub fn format_bindings(analysis: &Analysis) -> String {
    let mut out = String::new();
    for (id, binding) in analysis.symbols.iter() {
        let name = analysis.symbols.name(id);
        let ty = match binding.ty() {
            Some(ty) => analysis.types.display(ty),
            None => "<unchecked>".to_string(),
        };
        let _ = writeln!(out, "{} {}: {}", binding.kind.describe(), name, ty);
    }
    out
}
