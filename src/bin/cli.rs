//! Strata - Interactive and Batch CLI
//! Opens a data directory directly and drives the engine either from a
//! small REPL or by replaying a command file. Meant for inspection, manual
//! use, and bulk load/verify runs; the server binary owns the directory in
//! normal operation.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::time::Instant;

use strata::config::Config;
use strata::engine::StorageEngine;

fn main() {
    env_logger::init();

    let data_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./data".to_string());
    let batch_file = std::env::args().nth(2);

    let config = Config::new(&data_dir);
    let mut engine = match StorageEngine::open(config) {
        Ok(e) => e,
        Err(err) => {
            eprintln!("[ERROR] Failed to open engine: {}", err);
            std::process::exit(1);
        }
    };

    match batch_file {
        Some(path) => run_batch(&mut engine, &path),
        None => run_repl(&mut engine, &data_dir),
    }
}

/// Replay a command file: one `put <key> <value>` or `get <key> <expected>`
/// per line. Get results are compared against the expected value
/// (`NOT_FOUND` for an absent key) and mismatches are reported, along with
/// the elapsed time.
fn run_batch(engine: &mut StorageEngine, path: &str) {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(err) => {
            eprintln!("[ERROR] Failed to open batch file {}: {}", path, err);
            std::process::exit(1);
        }
    };

    let start = Instant::now();
    let mut mismatches = 0u64;

    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(l) => l,
            Err(err) => {
                eprintln!("[ERROR] Failed reading {}: {}", path, err);
                std::process::exit(1);
            }
        };

        match apply_batch_line(engine, &line) {
            Ok(None) => {}
            Ok(Some(problem)) => {
                println!("  {}", problem);
                mismatches += 1;
            }
            Err(err) => {
                eprintln!("[ERROR] {}", err);
                std::process::exit(1);
            }
        }
    }

    println!("  {} mismatches", mismatches);
    println!("  Time taken: {} ms", start.elapsed().as_millis());
}

/// Apply one batch line against the engine. Returns a description of the
/// problem when the line is malformed or a `get` result differs from the
/// expected value.
fn apply_batch_line(engine: &mut StorageEngine, line: &str) -> strata::Result<Option<String>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.is_empty() {
        return Ok(None);
    }
    if fields.len() != 3 {
        return Ok(Some(format!("expected 3 fields, got {}", fields.len())));
    }

    match fields[0].to_lowercase().as_str() {
        "put" => {
            engine.put(fields[1].to_string(), fields[2].to_string())?;
            Ok(None)
        }
        "get" => {
            let got = engine
                .get(fields[1])?
                .unwrap_or_else(|| "NOT_FOUND".to_string());
            if got == fields[2] {
                Ok(None)
            } else {
                Ok(Some(format!(
                    "get {}: expected {}, got {}",
                    fields[1], fields[2], got
                )))
            }
        }
        method => Ok(Some(format!("unsupported method {}", method))),
    }
}

fn run_repl(engine: &mut StorageEngine, data_dir: &str) {
    println!();
    println!("  Strata Key-Value Store");
    println!("  data dir: {}", data_dir);
    println!();
    println!("  Commands:");
    println!("    put <key> <value>  - Store a key-value pair");
    println!("    get <key>          - Retrieve a value by key");
    println!("    info               - Show engine statistics");
    println!("    exit               - Quit");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("strata> ");
        stdout.flush().unwrap();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap() == 0 {
            break; // EOF
        }

        let parts: Vec<&str> = line.trim().split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "put" | "set" => {
                if parts.len() < 3 {
                    println!("  Usage: put <key> <value>");
                    continue;
                }
                let key = parts[1].to_string();
                let value = parts[2..].join(" ");
                match engine.put(key, value) {
                    Ok(()) => println!("  OK"),
                    Err(e) => {
                        eprintln!("  FATAL: {}", e);
                        std::process::exit(1);
                    }
                }
            }
            "get" => {
                if parts.len() < 2 {
                    println!("  Usage: get <key>");
                    continue;
                }
                match engine.get(parts[1]) {
                    Ok(Some(value)) => println!("  \"{}\"", value),
                    Ok(None) => println!("  (nil)"),
                    Err(e) => {
                        eprintln!("  FATAL: {}", e);
                        std::process::exit(1);
                    }
                }
            }
            "info" | "stats" => {
                println!("  Memtable entries: {}", engine.memtable_len());
                println!("  Next segment:     {}", engine.next_segment_number());
                println!("{}", engine.metrics().report());
            }
            "exit" | "quit" | "q" => {
                break;
            }
            _ => {
                println!("  Unknown command: '{}'. Type 'exit' to quit.", parts[0]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_engine(dir: &std::path::Path) -> StorageEngine {
        StorageEngine::open(Config::new(dir.join("db"))).unwrap()
    }

    #[test]
    fn test_batch_put_then_matching_get() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = temp_engine(dir.path());

        assert_eq!(apply_batch_line(&mut engine, "put a 1").unwrap(), None);
        assert_eq!(apply_batch_line(&mut engine, "get a 1").unwrap(), None);
    }

    #[test]
    fn test_batch_get_mismatch_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = temp_engine(dir.path());

        apply_batch_line(&mut engine, "put a 1").unwrap();
        let problem = apply_batch_line(&mut engine, "get a 2").unwrap();
        assert_eq!(problem, Some("get a: expected 2, got 1".to_string()));
    }

    #[test]
    fn test_batch_absent_key_compares_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = temp_engine(dir.path());

        assert_eq!(
            apply_batch_line(&mut engine, "get missing NOT_FOUND").unwrap(),
            None
        );
    }

    #[test]
    fn test_batch_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = temp_engine(dir.path());

        assert_eq!(apply_batch_line(&mut engine, "").unwrap(), None);
        assert!(apply_batch_line(&mut engine, "put a")
            .unwrap()
            .unwrap()
            .contains("expected 3 fields"));
        assert!(apply_batch_line(&mut engine, "del a 1")
            .unwrap()
            .unwrap()
            .contains("unsupported method"));
    }
}
