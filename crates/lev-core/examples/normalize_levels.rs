//! Re-emit level files in canonical form and report lint findings.
//!
//! `cargo run -p lev-core --example normalize_levels -- [--catalog blocks.json] [--check] LEVEL...`
//!
//! Parsing fills in defaulted fields (`wait`, `circular`) and drops empty
//! elevator paths, so re-emitting upgrades older files in place.

use lev_core::{BlockCatalog, LintSeverity, emit_level_pretty, lint_level, parse_level};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let mut catalog_path: Option<PathBuf> = None;
    let mut check_only = false;
    let mut paths = Vec::new();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--catalog" => catalog_path = args.next().map(PathBuf::from),
            "--check" => check_only = true,
            _ => paths.push(PathBuf::from(arg)),
        }
    }
    if paths.is_empty() {
        eprintln!("usage: normalize_levels [--catalog FILE] [--check] LEVEL...");
        return ExitCode::FAILURE;
    }

    let catalog = match catalog_path.map(fs::read_to_string) {
        Some(Ok(text)) => match BlockCatalog::from_json(&text) {
            Ok(c) => Some(c),
            Err(e) => {
                eprintln!("catalog: {e}");
                return ExitCode::FAILURE;
            }
        },
        Some(Err(e)) => {
            eprintln!("catalog: {e}");
            return ExitCode::FAILURE;
        }
        None => None,
    };

    let mut changed = 0;
    let mut failed = 0;

    for path in &paths {
        let input = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("SKIP {}: {e}", path.display());
                failed += 1;
                continue;
            }
        };

        let map = match parse_level(&input) {
            Ok(map) => map,
            Err(e) => {
                eprintln!("PARSE ERROR {}: {e}", path.display());
                failed += 1;
                continue;
            }
        };

        if let Some(catalog) = &catalog {
            for diag in lint_level(&map, catalog) {
                let tag = match diag.severity {
                    LintSeverity::Warning => "warning",
                    LintSeverity::Info => "info",
                };
                println!("{}: {tag}[{}] {}", path.display(), diag.rule, diag.message);
            }
        }

        let output = match emit_level_pretty(&map) {
            Ok(s) => s + "\n",
            Err(e) => {
                eprintln!("EMIT ERROR {}: {e}", path.display());
                failed += 1;
                continue;
            }
        };
        if output == input {
            continue;
        }
        changed += 1;
        if check_only {
            println!("would rewrite {}", path.display());
        } else if let Err(e) = fs::write(path, &output) {
            eprintln!("ERROR writing {}: {e}", path.display());
            failed += 1;
        } else {
            println!("rewrote {}", path.display());
        }
    }

    println!("\nChanged: {changed}, Failed: {failed}");
    if failed > 0 || (check_only && changed > 0) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
