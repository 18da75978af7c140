//! CLI for the Datalog interpreter.
//!
//! Usage:
//!   datalog-interpreter <file>             Interpret a Datalog program
//!   datalog-interpreter --summary <file>   Print the parsed program summary
//!   datalog-interpreter --graph <file>     Print the rule dependency graph

use std::io;
use std::{env, fs, process};

use datalog_eval::{Interpreter, make_dependency_graph};
use datalog_syntax::{DatalogProgram, parse_program};

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None | Some("-h" | "--help") => print_help(),
        Some("--summary") => match args.get(1) {
            Some(path) => print!("Success!\n{}", load_program(path)),
            None => missing_file_operand("--summary"),
        },
        Some("--graph") => match args.get(1) {
            Some(path) => print!("{}", make_dependency_graph(&load_program(path).rules)),
            None => missing_file_operand("--graph"),
        },
        Some(path) => interpret_file(path),
    }
}

fn print_help() {
    println!("Datalog Interpreter\n");
    println!("Usage: datalog-interpreter [--summary | --graph] <file>\n");
    println!("  <file>             Interpret a Datalog program");
    println!("  --summary <file>   Print the parsed program summary");
    println!("  --graph <file>     Print the rule dependency graph");
}

fn missing_file_operand(flag: &str) {
    eprintln!("error: {flag} requires a file operand");
    process::exit(1);
}

fn interpret_file(path: &str) {
    let mut interpreter = Interpreter::new(load_program(path));
    let stdout = io::stdout();
    if let Err(e) = interpreter.interpret(&mut stdout.lock()) {
        eprintln!("error writing output: {e}");
        process::exit(1);
    }
}

/// Reads, scans, and parses a program file, exiting on failure.
fn load_program(path: &str) -> DatalogProgram {
    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error reading {path}: {e}");
            process::exit(1);
        }
    };

    match parse_program(&source) {
        Ok(program) => program,
        Err(e) => {
            println!("Failure!\n  {}", e.token());
            process::exit(1);
        }
    }
}
