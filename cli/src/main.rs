use std::fs;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use bumpalo::Bump;
use clap::Parser;
use miette::{Diagnostic, Result};
use paracl::{ExecutionOptions, Program, TokenReader, graph, render_error_to};
use thiserror::Error;
use tracing::{debug, info};

/// ParaCL interpreter
#[derive(Parser, Debug)]
#[command(name = "paracl", version)]
#[command(about = "ParaCL interpreter", long_about = None)]
struct Args {
    /// Parse and resolve the program without running it
    #[arg(short, long)]
    build: bool,

    /// Write the syntax tree as a Graphviz digraph
    #[arg(short, long)]
    dump_tree: bool,

    /// Where to write the tree dump
    #[arg(long, value_name = "FILE", default_value = "out.dot")]
    dump_out: PathBuf,

    /// Stop with an error after this many loop iterations
    #[arg(long, value_name = "N")]
    max_iterations: Option<u64>,

    /// Program to run. Its input is read from stdin
    input_file: PathBuf,
}

#[derive(Debug, Error, Diagnostic)]
enum CliError {
    #[error("cannot read {}", path.display())]
    #[diagnostic(code(paracl::read_source))]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write tree dump to {}", path.display())]
    #[diagnostic(code(paracl::write_dump))]
    WriteDump {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    // RUST_LOG controls the level; default to WARN if not set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging();

    let source = fs::read_to_string(&args.input_file).map_err(|source| CliError::ReadSource {
        path: args.input_file.clone(),
        source,
    })?;
    let source_name = args.input_file.display().to_string();

    let arena = Bump::new();
    let program = match Program::compile(&arena, &source) {
        Ok(program) => program,
        Err(e) => {
            render_error_to(&e, &source_name, &mut std::io::stderr(), true).ok();
            return Ok(ExitCode::FAILURE);
        }
    };
    debug!(
        variables = program.resolution().slot_count(),
        "program compiled"
    );

    if args.dump_tree {
        fs::write(&args.dump_out, graph::dump_dot(program.root())).map_err(|source| {
            CliError::WriteDump {
                path: args.dump_out.clone(),
                source,
            }
        })?;
        info!(path = %args.dump_out.display(), "wrote tree dump");
    }

    if args.build {
        println!("Build finished, no errors");
        return Ok(ExitCode::SUCCESS);
    }

    let options = ExecutionOptions {
        max_iterations: args.max_iterations,
        ..Default::default()
    };
    let input = TokenReader::new(std::io::stdin().lock());
    let mut output = BufWriter::new(std::io::stdout().lock());

    let result = program.run(options, input, &mut output);
    output.flush().ok();

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            render_error_to(&e, &source_name, &mut std::io::stderr(), true).ok();
            Ok(ExitCode::FAILURE)
        }
    }
}
