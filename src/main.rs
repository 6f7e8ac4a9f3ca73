//! todo CLI - track personal tasks in a local SQLite database.

use std::io::{self, IsTerminal};

fn main() -> std::process::ExitCode {
    todo::cli::color_for_stderr(io::stderr().is_terminal());

    let code = todo::cli::run(std::env::args_os(), &mut io::stdout(), &mut io::stderr());
    code.into()
}
