//! Tensa CLI

use tensa_runtime::RuntimeEnvironment;
use tensac::commands::{check_files, parse_run_args, render_doc, run_file, CliError};

fn main() {
    tensac::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "run" => {
            let (path, options) =
                parse_run_args(&args[2..]).unwrap_or_else(|err| usage_error(&err));
            match run_file(&path, &options) {
                Ok(report) => print!("{}", ensure_newline(report.rendered)),
                Err(err) => fail(&err),
            }
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: tensa check <ast.json>...");
                std::process::exit(1);
            }
            let reports = check_files(&args[2..]);
            let mut clean = true;
            for report in &reports {
                match &report.outcome {
                    Ok(0) => println!("{}: ok", report.path),
                    Ok(n) => {
                        let plural = if *n == 1 { "" } else { "s" };
                        println!("{}: {n} issue{plural}", report.path);
                    }
                    Err(err) => eprintln!("error: {err}"),
                }
                clean &= report.is_clean();
            }
            if !clean {
                std::process::exit(1);
            }
        }
        "doc" => {
            let runtime = RuntimeEnvironment::standard();
            match render_doc(&runtime, args.get(2).map(String::as_str)) {
                Ok(text) => print!("{text}"),
                Err(err) => fail(&err),
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => println!("tensa {}", env!("CARGO_PKG_VERSION")),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn ensure_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

fn fail(err: &CliError) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}

fn usage_error(err: &CliError) -> ! {
    eprintln!("error: {err}");
    eprintln!(
        "Usage: tensa run <ast.json> [--source=<file>] [--format=json|text] [--max-depth=N|none]"
    );
    std::process::exit(1);
}

fn print_usage() {
    println!("Tensa - evaluator for Tensa syntax trees");
    println!();
    println!("Usage: tensa <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <ast.json>        Evaluate a syntax tree and print result, issues and state");
    println!("    --source=<file>     Source text the tree came from, for issue positions");
    println!("    --format=json|text  Output format (default: json)");
    println!("    --max-depth=N|none  Closure call depth limit (default: 256)");
    println!("  check <ast.json>...   Evaluate trees in parallel and report issue counts");
    println!("  doc [name]            List runtime functions, or describe one");
    println!("  help                  Show this help message");
    println!("  version               Show version information");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=tensa_eval=debug) to see resolution warnings.");
}
