mod cli;
mod repl;
mod rlpl;

use std::path::PathBuf;

use clap::Parser;
use imp_core::{
    eval::prelude::Evaluator,
    parser::prelude::parse_program,
    utils::prelude::Error,
};
use termcolor::Buffer;

#[derive(Parser)]
enum Command {
    /// Parses a source file, evaluates it and writes the generated
    /// three-address code next to it
    Run {
        /// Path of source file
        path: PathBuf,
        /// Do not write the .tac file
        #[arg(long, default_value_t = false)]
        no_tac: bool,
        /// Print the ast before evaluating
        #[arg(long, default_value_t = false)]
        print_ast: bool,
    },
    /// Runs an interactive evaluation loop
    Repl,
    /// Runs Read Lex Print Loop
    Lex,
}

fn main() {
    match Command::parse() {
        Command::Run { path, no_tac, print_ast } => run(path, no_tac, print_ast),
        Command::Repl => {
            if let Err(err) = repl::start() {
                abort_io(err);
            }
        }
        Command::Lex => {
            if let Err(err) = rlpl::start() {
                abort_io(err);
            }
        }
    }
}

fn run(path: PathBuf, no_tac: bool, print_ast: bool) {
    let buf_writer = cli::stderr_buffer_writer();
    let mut buf = buf_writer.buffer();

    cli::print_running(path.to_str().unwrap_or_default());
    let start = std::time::Instant::now();

    let src = match std::fs::read_to_string(&path) {
        Ok(src) => src,
        Err(err) => abort(&buf_writer, &mut buf, Error::StdIo { err: err.kind() }),
    };

    let parsed = match parse_program(&src) {
        Ok(parsed) => parsed,
        Err(error) => abort(&buf_writer, &mut buf, Error::Parse {
            path,
            src: src.clone(),
            error,
        }),
    };

    // Bad characters were skipped during lexing; report them and keep going
    if !parsed.lex_errors.is_empty() {
        report(&buf_writer, &mut buf, Error::Lex {
            path: path.clone(),
            src: src.clone(),
            errors: parsed.lex_errors.clone(),
        });
    }

    if print_ast {
        println!("{:#?}", parsed.program);
    }

    let stdout = std::io::stdout();
    let mut evaluator = Evaluator::new(stdout.lock());

    if let Err(err) = evaluator.eval_program(&parsed.program) {
        abort(&buf_writer, &mut buf, Error::StdIo { err: err.kind() });
    }

    let errors = evaluator.take_errors();
    if !errors.is_empty() {
        report(&buf_writer, &mut buf, Error::Runtime {
            path: path.clone(),
            src,
            errors,
        });
    }

    if !no_tac {
        let code = evaluator
            .instructions()
            .iter()
            .map(|instruction| format!("{instruction}\n"))
            .collect::<String>();

        let mut tac_path = path;
        tac_path.set_extension("tac");

        if let Err(err) = std::fs::write(&tac_path, code) {
            abort(&buf_writer, &mut buf, Error::StdIo { err: err.kind() });
        }
    }

    cli::print_finished(std::time::Instant::now() - start);
}

fn report(buf_writer: &termcolor::BufferWriter, buf: &mut Buffer, error: Error) {
    error.pretty(buf);
    buf_writer.print(buf).expect("Writing error to stderr");
    buf.clear();
}

fn abort(buf_writer: &termcolor::BufferWriter, buf: &mut Buffer, error: Error) -> ! {
    report(buf_writer, buf, error);
    std::process::exit(1);
}

fn abort_io(err: std::io::Error) -> ! {
    let buf_writer = cli::stderr_buffer_writer();
    let mut buf = buf_writer.buffer();

    abort(&buf_writer, &mut buf, Error::StdIo { err: err.kind() });
}
