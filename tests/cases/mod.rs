#![allow(dead_code)]

use bumpalo::Bump;
use paracl::{Error, ExecutionOptions, Program, TokenReader, render_error_to_string_no_color};

/// Compile and run `source` with `stdin` as its input.
///
/// Returns the program output, or the rendered error.
pub fn run_program(source: &str, stdin: &str) -> Result<String, String> {
    run_program_with(ExecutionOptions::default(), source, stdin)
}

pub fn run_program_with(
    options: ExecutionOptions,
    source: &str,
    stdin: &str,
) -> Result<String, String> {
    let arena = Bump::new();
    let mut output = Vec::new();
    let result = Program::compile(&arena, source)
        .and_then(|program| program.run(options, TokenReader::new(stdin.as_bytes()), &mut output));

    match result {
        Ok(()) => Ok(String::from_utf8_lossy(&output).into_owned()),
        Err(e) => Err(render(&e)),
    }
}

pub fn render(error: &Error) -> String {
    render_error_to_string_no_color(error)
}

/// Declares a test that runs a program and checks what it prints, or the
/// error it fails with.
///
/// ```ignore
/// test_case! {
///     name: doubles_input,
///     input: { "print ? * 2;" },
///     stdin: { "21" },
///     output: { "42\n" },
/// }
/// ```
///
/// An `error` expectation only has to be contained in the rendered error.
#[macro_export]
macro_rules! test_case {
    (
        name: $name:ident,
        input: { $input:expr },
        $(stdin: { $stdin:expr },)?
        output: { $output:expr } $(,)?
    ) => {
        #[test]
        fn $name() {
            #[allow(unused_variables)]
            let stdin = "";
            $(let stdin = $stdin;)?
            match $crate::cases::run_program($input, stdin) {
                Ok(output) => pretty_assertions::assert_eq!(output, $output),
                Err(rendered) => panic!("program failed:\n{}", rendered),
            }
        }
    };
    (
        name: $name:ident,
        input: { $input:expr },
        $(stdin: { $stdin:expr },)?
        error: { $error:expr } $(,)?
    ) => {
        #[test]
        fn $name() {
            #[allow(unused_variables)]
            let stdin = "";
            $(let stdin = $stdin;)?
            match $crate::cases::run_program($input, stdin) {
                Ok(output) => panic!("expected an error, program printed:\n{}", output),
                Err(rendered) => assert!(
                    rendered.contains($error),
                    "expected error containing {:?}, got:\n{}",
                    $error,
                    rendered
                ),
            }
        }
    };
}
