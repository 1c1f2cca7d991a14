// Phrase/glyph-slice builder — CLI entry point.
//
// Generates random phrase bundles and splits each phrase into tightly
// trimmed per-glyph SVGs with one shared baseline height.
//
// Usage:
//   cargo run -p glyphloom_corpus --bin build_slices -- [--count N]
//     [--min-glyphs N] [--max-glyphs N] [--seed VALUE] [--out-dir PATH]
//     [--ban-curly | --allow-curly] [--ban-dot-diacritic | --allow-dot-diacritic]
//     [--min-raw-glyph-height N]

use glyphloom_corpus::options::{
    DEFAULT_MAX_GLYPHS, DEFAULT_MIN_GLYPHS, DEFAULT_MIN_RAW_GLYPH_HEIGHT, DEFAULT_SLICE_COUNT,
    DEFAULT_SLICE_OUT_DIR, positive_count,
};
use glyphloom_corpus::{BuildError, SliceOptions, build_slices, resolve_seed};
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
    let report = build_slices(&options, &default_roots(), &StrokeScript::new())?;

    println!(
        "Generated {} phrase bundles in {} ({} attempts)",
        report.count,
        report.out_dir.display(),
        report.attempts
    );
    println!(
        "Glyph range: {}-{}",
        options.min_glyphs, options.max_glyphs
    );
    println!("Ban curly diacritics: {}", options.ban_curly);
    println!("Ban singular dot diacritic: {}", options.ban_dot);
    println!("Min raw glyph height: {}", options.min_raw_glyph_height);
    println!("Unified glyph height: {}", report.glyph_target_height);
    println!("Manifest: {}", report.manifest_path.display());
    println!("Seed: {}", options.seed.summary());
    Ok(())
}

fn parse_options(args: &[String]) -> Result<SliceOptions, BuildError> {
    let seed = resolve_seed(parse_value(args, "--seed")?.as_deref());
    let mut options = SliceOptions::with_seed(seed);

    if let Some(raw) = parse_flag::<i64>(args, "--count")? {
        options.count = positive_count(raw, "--count")?;
    }
    if let Some(raw) = parse_flag::<i64>(args, "--min-glyphs")? {
        options.min_glyphs = positive_count(raw, "--min-glyphs")?;
    }
    if let Some(raw) = parse_flag::<i64>(args, "--max-glyphs")? {
        options.max_glyphs = positive_count(raw, "--max-glyphs")?;
    }
    if let Some(raw) = parse_flag::<f64>(args, "--min-raw-glyph-height")? {
        options.min_raw_glyph_height = raw;
    }
    if let Some(dir) = parse_value(args, "--out-dir")? {
        options.out_dir = PathBuf::from(dir);
    }
    if args.iter().any(|a| a == "--allow-curly") {
        options.ban_curly = false;
    }
    if args.iter().any(|a| a == "--ban-curly") {
        options.ban_curly = true;
    }
    if args.iter().any(|a| a == "--allow-dot-diacritic") {
        options.ban_dot = false;
    }
    if args.iter().any(|a| a == "--ban-dot-diacritic") {
        options.ban_dot = true;
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
        "Build random phrase bundles and split each phrase into per-glyph SVGs.\n\
         \n\
         Usage:\n\
         \x20 build_slices [options]\n\
         \n\
         Options:\n\
         \x20 --count <n>                 Number of phrases to generate (default: {DEFAULT_SLICE_COUNT})\n\
         \x20 --min-glyphs <n>            Minimum glyphs per phrase (default: {DEFAULT_MIN_GLYPHS})\n\
         \x20 --max-glyphs <n>            Maximum glyphs per phrase (default: {DEFAULT_MAX_GLYPHS})\n\
         \x20 --seed <value>              Deterministic RNG seed, number or string (default: random)\n\
         \x20 --out-dir <path>            Output directory (default: {DEFAULT_SLICE_OUT_DIR})\n\
         \x20 --ban-curly                 Skip curved diacritics (default)\n\
         \x20 --allow-curly               Allow curved diacritics\n\
         \x20 --ban-dot-diacritic         Skip singular dot diacritics\n\
         \x20 --allow-dot-diacritic       Allow singular dot diacritics (default)\n\
         \x20 --min-raw-glyph-height <n>  Reject phrases with tiny glyph slices (default: {DEFAULT_MIN_RAW_GLYPH_HEIGHT})"
    );
}
