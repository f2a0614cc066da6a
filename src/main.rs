use std::fs;

use clap::Parser;
use datable::{
    interpreter::{host::ConsoleHost, table::Workbook},
    run,
};

/// DaTable is a Vietnamese-language scripting DSL for working with tables
/// and data.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells datable to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode automatically prints out the final result value of a
    /// datable script.
    #[arg(short, long)]
    pipe_mode: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let workbook = Workbook::auto_create();
    let mut host = ConsoleHost;

    match run(&script, &workbook, &mut host) {
        Ok(result) => {
            if args.pipe_mode && let Some(value) = result {
                println!("{}", value.to_message());
            }
        },
        Err(e) => eprintln!("{e}"),
    }
}
