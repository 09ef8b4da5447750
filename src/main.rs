//! CLI entry point for fabula
//!
//! Two modes: an interactive terminal player and a parse-and-lint check
//! for script authors.

use std::path::PathBuf;
use std::process;

fn main() {
    // In-game reporting is the primary error surface; library logs are
    // opt-in via RUST_LOG.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "play" => {
            if args.len() < 3 {
                eprintln!("Error: Missing script file path");
                eprintln!();
                print_usage();
                process::exit(1);
            }
            let script_path = PathBuf::from(&args[2]);
            let mut debug = false;
            let mut save_path = PathBuf::from("fabula.sav");
            let mut i = 3;
            while i < args.len() {
                match args[i].as_str() {
                    "--debug" => debug = true,
                    "--save" => {
                        i += 1;
                        match args.get(i) {
                            Some(path) => save_path = PathBuf::from(path),
                            None => {
                                eprintln!("Error: --save needs a file path");
                                process::exit(1);
                            }
                        }
                    }
                    other => {
                        eprintln!("Error: Unknown option '{}'", other);
                        eprintln!();
                        print_usage();
                        process::exit(1);
                    }
                }
                i += 1;
            }
            if let Err(err) = fabula::cli::play::run_play(&script_path, &save_path, debug) {
                eprintln!("Error: Player mode failed");
                eprintln!("Reason: {:#}", err);
                process::exit(1);
            }
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Error: Missing script file path");
                eprintln!();
                print_usage();
                process::exit(1);
            }
            let script_path = PathBuf::from(&args[2]);
            match fabula::cli::check::run_check(&script_path) {
                Ok(true) => {}
                Ok(false) => process::exit(1),
                Err(err) => {
                    eprintln!("Error: Check failed");
                    eprintln!("Reason: {:#}", err);
                    process::exit(1);
                }
            }
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Error: Unknown command '{}'", command);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("fabula - Branching Narrative Script Engine");
    println!();
    println!("USAGE:");
    println!("    cargo run -- <command> <script.txt> [options]");
    println!();
    println!("COMMANDS:");
    println!("    play <file> [options]    Play a script in the terminal");
    println!("    check <file>             Parse and lint a script");
    println!("    --help, -h               Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    --debug          Show node transitions and variable state");
    println!("    --save <path>    Save file location (default: fabula.sav)");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run -- play stories/cellar.txt");
    println!("    cargo run -- play stories/cellar.txt --debug");
    println!("    cargo run -- check stories/cellar.txt");
}
