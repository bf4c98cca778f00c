use clap::Parser;
use grl_interpreter::Interpreter;
use miette::{IntoDiagnostic, MietteHandlerOpts, Result};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

mod dot;
mod repl;

#[derive(Parser)]
#[command(
    name = "grl",
    version,
    about = "The GRL graph scripting language",
    long_about = "GRL is a small declarative language for building, querying, and analyzing graphs."
)]
struct Cli {
    /// GRL program file to run (use '-' to read from stdin); starts an
    /// interactive session when omitted
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

fn main() {
    setup_miette_handler();

    let cli = Cli::parse();

    let code = match cli.file {
        Some(file) => run_file(&file),
        None => match repl::ReplSession::new() {
            Ok(mut session) => session.run(),
            Err(error) => {
                eprintln!("Failed to start the interactive session: {}", error);
                1
            }
        },
    };
    process::exit(code);
}

/// Configure miette error reporting for the whole process
fn setup_miette_handler() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .color(true)
                .tab_width(4)
                .with_cause_chain()
                .build(),
        )
    }))
    .ok();
}

/// Batch mode: the file either parses and runs as a whole, or the process
/// exits nonzero after reporting the error. An EXIT statement ends the run
/// with status 0.
fn run_file(file: &PathBuf) -> i32 {
    let source = match read_source(file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("{:?}", error);
            return 1;
        }
    };

    let mut interpreter = Interpreter::new();
    interpreter.set_renderer(Box::new(dot::DotRenderer));

    match interpreter.run_source(&source) {
        Ok(_) => 0,
        Err(error) => {
            eprintln!("{:?}", miette::Report::new(error));
            1
        }
    }
}

fn read_source(file: &PathBuf) -> Result<String> {
    if file.to_str() == Some("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).into_diagnostic()?;
        return Ok(buffer);
    }

    if !file.exists() {
        return Err(miette::miette!("File not found: {}", file.display()));
    }

    if file.extension().and_then(|s| s.to_str()) != Some("grl") {
        return Err(miette::miette!(
            "Expected .grl file, got: {}",
            file.display()
        ));
    }

    fs::read_to_string(file).into_diagnostic()
}
