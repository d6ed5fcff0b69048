//! CLI entry point for showreel
//!
//! Runs the presentation headless or dumps the composed schedule.

use std::path::PathBuf;
use std::process;

use showreel::cli::play::PlayOptions;
use showreel::config::{PresentationConfig, load_config};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "play" => {
            let (config, rest) = match parse_config(&args[2..]) {
                Ok(parsed) => parsed,
                Err(err) => fail(err),
            };
            let mut options = PlayOptions::default();
            for arg in rest {
                match arg.as_str() {
                    "--trace-audio" => options.trace_audio = true,
                    other if other.starts_with("--fps=") => {
                        match other["--fps=".len()..].parse() {
                            Ok(fps) => options.fps = fps,
                            Err(_) => fail(format!("invalid fps in '{other}'")),
                        }
                    }
                    other => fail(format!("unknown play option '{other}'")),
                }
            }
            if let Err(err) = showreel::cli::play::run_play(config, options).await {
                fail(format!("player failed: {err:#}"));
            }
        }
        "dump" => {
            let (config, rest) = match parse_config(&args[2..]) {
                Ok(parsed) => parsed,
                Err(err) => fail(err),
            };
            if let Some(extra) = rest.first() {
                fail(format!("unknown dump option '{extra}'"));
            }
            if let Err(err) = showreel::cli::dump::run_dump(config).await {
                fail(format!("dump failed: {err:#}"));
            }
        }
        "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Error: Unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    }
}

/// Pull an optional `--config <path>` pair out of the argument list.
fn parse_config(args: &[String]) -> Result<(PresentationConfig, Vec<String>), String> {
    let mut rest = Vec::new();
    let mut config = PresentationConfig::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let path = iter
                .next()
                .ok_or_else(|| "--config needs a file path".to_string())?;
            config = load_config(&PathBuf::from(path)).map_err(|err| format!("{err:#}"))?;
        } else {
            rest.push(arg.clone());
        }
    }
    Ok((config, rest))
}

fn fail(message: String) -> ! {
    eprintln!("Error: {message}");
    process::exit(1);
}

fn print_usage() {
    println!("showreel - linear cutscene presentation engine");
    println!();
    println!("USAGE:");
    println!("    showreel play [--config <file>] [--fps=N] [--trace-audio]");
    println!("    showreel dump [--config <file>]");
    println!();
    println!("COMMANDS:");
    println!("    play    Run the whole presentation headless, printing activity");
    println!("    dump    Print the composed schedule and audio manifest");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run -- play --fps=120 --trace-audio");
    println!("    cargo run -- dump --config presentation.json");
}
