// Glyph pool builder — CLI entry point.
//
// Builds 5 glyph sprite pools by width class (w1..w5) plus one combined
// sprite with a single representative per class.
//
// Usage:
//   cargo run -p glyphloom_corpus --bin build_pools -- [--per-pool N]
//     [--base-count N] [--seed VALUE] [--out-dir PATH] [--manifest NAME]
//     [--ban-curly | --allow-curly]

use glyphloom_corpus::classify::WIDTH_CLASSES;
use glyphloom_corpus::options::{
    COMBINED_SPRITE_FILE, DEFAULT_BASE_COUNT, DEFAULT_PER_POOL, DEFAULT_POOL_MANIFEST,
    DEFAULT_POOL_OUT_DIR, positive_count,
};
use glyphloom_corpus::{BuildError, PoolOptions, build_pools, resolve_seed};
use glyphloom_lang::default_roots;
use glyphloom_script::StrokeScript;
use std::path::PathBuf;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    match run(&args) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(args: &[String]) -> Result<(), BuildError> {
    let options = parse_options(args)?;

    println!("=== Glyphloom Pool Builder ===");
    println!("Per pool: {}", options.per_pool);
    println!("Base count: {}", options.effective_base_count());
    println!("Seed: {}", options.seed.summary());
    println!("Ban curly diacritics: {}", options.ban_curly);
    println!();

    let report = build_pools(&options, &default_roots(), &StrokeScript::new())?;

    println!(
        "Generated 5 width pools in {} ({} attempts)",
        report.out_dir.display(),
        report.attempts
    );
    for class in WIDTH_CLASSES {
        if let Some(file) = report.pool_files.get(&class) {
            println!("  w{class}: {file} ({} symbols)", report.per_pool);
        }
    }
    println!(
        "Single sprite: {} (5 symbols, w1..w5)",
        report.combined_file
    );
    println!("Manifest: {}", report.manifest_path.display());
    Ok(())
}

fn parse_options(args: &[String]) -> Result<PoolOptions, BuildError> {
    let seed = resolve_seed(parse_value(args, "--seed")?.as_deref());
    let mut options = PoolOptions::with_seed(seed);

    if let Some(raw) = parse_flag::<i64>(args, "--per-pool")? {
        options.per_pool = positive_count(raw, "--per-pool")?;
    }
    if let Some(raw) = parse_flag::<i64>(args, "--base-count")? {
        options.base_count = positive_count(raw, "--base-count")?;
    }
    if let Some(dir) = parse_value(args, "--out-dir")? {
        options.out_dir = PathBuf::from(dir);
    }
    if let Some(name) = parse_value(args, "--manifest")? {
        options.manifest_file = name;
    }
    if args.iter().any(|a| a == "--allow-curly") {
        options.ban_curly = false;
    }
    if args.iter().any(|a| a == "--ban-curly") {
        options.ban_curly = true;
    }

    options.validate()?;
    Ok(options)
}

fn parse_value(args: &[String], flag: &str) -> Result<Option<String>, BuildError> {
    match args.iter().position(|a| a == flag) {
        Some(i) => match args.get(i + 1) {
            Some(value) => Ok(Some(value.clone())),
            None => Err(BuildError::InvalidArgument(format!(
                "{flag} requires a value"
            ))),
        },
        None => Ok(None),
    }
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<Option<T>, BuildError> {
    match parse_value(args, flag)? {
        Some(value) => value.parse().map(Some).map_err(|_| {
            BuildError::InvalidArgument(format!("invalid {flag} value: {value}"))
        }),
        None => Ok(None),
    }
}

fn print_usage() {
    println!(
        "Build 5 glyph sprite pools by width class (w1..w5).\n\
         \n\
         Usage:\n\
         \x20 build_pools [options]\n\
         \n\
         Options:\n\
         \x20 --per-pool <n>     Symbols per width pool (default: {DEFAULT_PER_POOL})\n\
         \x20 --base-count <n>   Initial candidate count before sampling (default: {DEFAULT_BASE_COUNT})\n\
         \x20 --seed <value>     Deterministic RNG seed, number or string (default: random)\n\
         \x20 --out-dir <path>   Output directory (default: {DEFAULT_POOL_OUT_DIR})\n\
         \x20 --manifest <name>  Manifest file name inside out-dir (default: {DEFAULT_POOL_MANIFEST})\n\
         \x20 --ban-curly        Skip symbols containing curved diacritics (default)\n\
         \x20 --allow-curly      Allow curved diacritics\n\
         \n\
         Outputs:\n\
         \x20 glyph-pool-w1.svg ... glyph-pool-w5.svg (same symbol count in each pool).\n\
         \x20 {COMBINED_SPRITE_FILE} (exactly 5 symbols: w1..w5, one per width class)."
    );
}
