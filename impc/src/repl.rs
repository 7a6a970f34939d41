use std::io::Write;

use imp_core::{
    eval::prelude::Evaluator,
    parser::prelude::parse_program,
    utils::prelude::LineNumbers,
};

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
    let stdin = std::io::stdin();

    ctrlc::set_handler(|| {
        println!();
        std::process::exit(0);
    })
    .expect("setting the interrupt handler");

    // Declarations, values and emitted code survive across lines
    let mut evaluator = Evaluator::new(std::io::stdout());

    loop {
        let mut input = String::from("");

        print!("{}", PROMPT);
        std::io::stdout().flush()?;

        if stdin.read_line(&mut input)? == 0 {
            return Ok(());
        }

        if let Some('\n') = input.chars().next_back() {
            input.pop();
        }
        if let Some('\r') = input.chars().next_back() {
            input.pop();
        }

        match input.as_str() {
            "" => {}
            ".exit" => return Ok(()),
            ".tac" => {
                for instruction in evaluator.instructions() {
                    println!("{instruction}");
                }
            }
            _ => {
                let line_numbers = LineNumbers::new(&input);

                match parse_program(&input) {
                    Ok(parsed) => {
                        for error in &parsed.lex_errors {
                            println!("{}", error_report(
                                "Lexical error",
                                &line_numbers,
                                error.location.start,
                                error.details(),
                            ));
                        }

                        evaluator.eval_program(&parsed.program)?;

                        for error in evaluator.take_errors() {
                            println!("{}", error_report(
                                "Evaluation error",
                                &line_numbers,
                                error.location.start,
                                error.details(),
                            ));
                        }
                    }
                    Err(err) => {
                        println!("{}", error_report(
                            "Parse error",
                            &line_numbers,
                            err.span.start,
                            err.details(),
                        ));
                    }
                }
            }
        }
    }
}

fn error_report(
    kind: &str,
    line_numbers: &LineNumbers,
    start: u32,
    (message, messages): (&str, Vec<String>),
) -> String {
    let (line, column) = line_numbers.line_and_column(start);
    let mut report = format!("[{line}:{column}] {kind}: {message}.");

    if !messages.is_empty() {
        report.push('\n');
        report.push('\t');
        report.push_str(&messages.join(";\n\t"));
    }

    report
}
