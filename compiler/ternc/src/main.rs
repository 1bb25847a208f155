//! Tern CLI
//!
//! Finds and applies branched-expression unfoldings.

use ternc::commands::{check_file, format_file, parse_args, unfold_file, Command};

fn main() {
    ternc::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    };

    match command {
        Command::Check { path } => check_file(&path),
        Command::Unfold {
            path,
            position,
            write,
        } => unfold_file(&path, position, write),
        Command::Fmt { path } => format_file(&path),
        Command::Help => print_usage(),
    }
}

fn print_usage() {
    eprintln!("Usage: tern <command> [arguments]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  check <file>                      List statements that can be unfolded");
    eprintln!("  unfold <file> <pos> [--write]     Unfold the statement at <pos>");
    eprintln!("  fmt <file>                        Print the file in canonical layout");
    eprintln!("  help                              Show this message");
    eprintln!();
    eprintln!("<pos> is a byte offset or a 1-based <line>:<col>.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  RUST_LOG=tern_unfold=debug        Enable tracing output");
    eprintln!("  TERN_LOG_TREE=1                   Print tracing spans as a tree");
}
