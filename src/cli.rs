// Command-line front end for oxihuff.
//
// Subcommands with positional or long-form paths, resolved into a flat
// `Options` struct before dispatch.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::codec;
use crate::codec::header::HEADER_LEN;
use crate::huffman::topology::{INTERNAL_MARKER, LEAF_MARKER, LEAF_RECORD_LEN};
use crate::io::{
    BUF_SIZE, CompressStats, DecompressStats, compress_bytes, compressed_path_for,
    decompress_bytes, extracted_path_for, hex_digest,
};

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Huffman text compressor.
#[derive(Parser, Debug)]
#[command(
    name = "oxihuff",
    version,
    about = "Lossless Huffman text compressor",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Compress a UTF-8 text file.
    Compress(CodecArgs),
    /// Decompress an artifact back to text.
    Decompress(CodecArgs),
    /// Print the header and code table of an artifact.
    Inspect(InspectArgs),
    /// Print build/configuration details.
    Config,
}

#[derive(Args, Debug)]
struct CodecArgs {
    /// Input file (default: stdin).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "input_pos")]
    input: Option<PathBuf>,

    /// Output file (default: derived from the input name, or stdout).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "output_pos")]
    output: Option<PathBuf>,

    /// Write output to stdout.
    #[arg(short = 'c', long)]
    stdout: bool,

    /// Input file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    input_pos: Option<PathBuf>,

    /// Output file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    output_pos: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Artifact to inspect.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
}

// ---------------------------------------------------------------------------
// Resolved command + options (flattened from Cli)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Compress,
    Decompress,
    Inspect,
    Config,
}

#[derive(Debug)]
struct Options {
    command: Command,
    use_stdout: bool,
    force: bool,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
}

fn resolve_options(cli: Cli) -> Options {
    let (command, codec_args, inspect_input) = match cli.command {
        Cmd::Compress(args) => (Command::Compress, Some(args), None),
        Cmd::Decompress(args) => (Command::Decompress, Some(args), None),
        Cmd::Inspect(args) => (Command::Inspect, None, Some(args.input)),
        Cmd::Config => (Command::Config, None, None),
    };

    let mut opts = Options {
        command,
        use_stdout: false,
        force: cli.force,
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        json_output: cli.json_output,
        input_file: inspect_input,
        output_file: None,
    };

    if let Some(args) = codec_args {
        opts.use_stdout = args.stdout;
        opts.input_file = args.input.or(args.input_pos);
        opts.output_file = args.output.or(args.output_pos);
    }

    opts
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("oxihuff".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// Output resolution
// ---------------------------------------------------------------------------

/// Where the result of compress/decompress goes.
#[derive(Debug, PartialEq, Eq)]
enum OutputTarget {
    Stdout,
    File(PathBuf),
}

fn resolve_output(opts: &Options, derive: fn(&Path) -> PathBuf) -> OutputTarget {
    if opts.use_stdout {
        return OutputTarget::Stdout;
    }
    match (&opts.output_file, &opts.input_file) {
        (Some(path), _) => OutputTarget::File(path.clone()),
        (None, Some(input)) => OutputTarget::File(derive(input)),
        (None, None) => OutputTarget::Stdout,
    }
}

fn read_input(opts: &Options) -> Result<Vec<u8>, String> {
    let mut data = Vec::new();
    let result = match &opts.input_file {
        Some(path) => File::open(path)
            .and_then(|f| BufReader::with_capacity(BUF_SIZE, f).read_to_end(&mut data))
            .map_err(|e| format!("input file: {}: {e}", path.display())),
        None => io::stdin()
            .lock()
            .read_to_end(&mut data)
            .map_err(|e| format!("stdin: {e}")),
    };
    result.map(|_| data)
}

fn open_output(opts: &Options, target: &OutputTarget) -> Result<Box<dyn Write>, String> {
    match target {
        OutputTarget::Stdout => Ok(Box::new(BufWriter::with_capacity(
            BUF_SIZE,
            io::stdout().lock(),
        ))),
        OutputTarget::File(path) => {
            if path.exists() && !opts.force {
                return Err(format!(
                    "output file exists, use -f to overwrite: {}",
                    path.display()
                ));
            }
            File::create(path)
                .map(|f| Box::new(BufWriter::with_capacity(BUF_SIZE, f)) as Box<dyn Write>)
                .map_err(|e| format!("output file: {}: {e}", path.display()))
        }
    }
}

/// Open `target` and write `data` to it. Only called once the codec has
/// produced its output, so a failed run leaves existing files untouched.
fn write_output(opts: &Options, target: &OutputTarget, data: &[u8]) -> Result<(), String> {
    let mut writer = open_output(opts, target)?;
    writer
        .write_all(data)
        .and_then(|()| writer.flush())
        .map_err(|e| format!("write {}: {e}", target_name(target)))
}

fn target_name(target: &OutputTarget) -> String {
    match target {
        OutputTarget::Stdout => "<stdout>".to_string(),
        OutputTarget::File(path) => path.display().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Compress command
// ---------------------------------------------------------------------------

fn cmd_compress(opts: &Options) -> i32 {
    let target = resolve_output(opts, compressed_path_for);
    let input = match read_input(opts) {
        Ok(data) => data,
        Err(msg) => {
            eprintln!("oxihuff: {msg}");
            return 1;
        }
    };

    let (artifact, stats) = match compress_bytes(&input) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("oxihuff: compress error: {e}");
            return 1;
        }
    };

    if let Err(msg) = write_output(opts, &target, &artifact) {
        eprintln!("oxihuff: {msg}");
        return 1;
    }

    report_compress(opts, &target, &stats);
    0
}

fn report_compress(opts: &Options, target: &OutputTarget, stats: &CompressStats) {
    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "oxihuff: compressed {} bytes ({} symbols, {} distinct) -> {} bytes ({:.1}%) into {}",
            stats.input_size,
            stats.symbol_count,
            stats.distinct_symbols,
            stats.output_size,
            stats.ratio() * 100.0,
            target_name(target)
        );
    }

    if opts.json_output {
        let json = serde_json::json!({
            "command": "compress",
            "input_size": stats.input_size,
            "output_size": stats.output_size,
            "symbol_count": stats.symbol_count,
            "distinct_symbols": stats.distinct_symbols,
            "payload_bits": stats.payload_bits,
            "ratio": stats.ratio(),
            "sha256": stats.input_sha256.map(|d| hex_digest(&d)),
        });
        eprintln!("{json:#}");
    }
}

// ---------------------------------------------------------------------------
// Decompress command
// ---------------------------------------------------------------------------

fn cmd_decompress(opts: &Options) -> i32 {
    let target = resolve_output(opts, extracted_path_for);
    let artifact = match read_input(opts) {
        Ok(data) => data,
        Err(msg) => {
            eprintln!("oxihuff: {msg}");
            return 1;
        }
    };

    let (text, stats) = match decompress_bytes(&artifact) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("oxihuff: decompress error: {e}");
            return 1;
        }
    };

    if let Err(msg) = write_output(opts, &target, text.as_bytes()) {
        eprintln!("oxihuff: {msg}");
        return 1;
    }

    report_decompress(opts, &target, &stats);
    0
}

fn report_decompress(opts: &Options, target: &OutputTarget, stats: &DecompressStats) {
    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "oxihuff: decompressed {} bytes -> {} bytes ({} symbols) into {}",
            stats.input_size,
            stats.output_size,
            stats.symbol_count,
            target_name(target)
        );
    }

    if opts.json_output {
        let json = serde_json::json!({
            "command": "decompress",
            "input_size": stats.input_size,
            "output_size": stats.output_size,
            "symbol_count": stats.symbol_count,
            "sha256": stats.output_sha256.map(|d| hex_digest(&d)),
        });
        eprintln!("{json:#}");
    }
}

// ---------------------------------------------------------------------------
// Inspect command
// ---------------------------------------------------------------------------

fn cmd_inspect(opts: &Options) -> i32 {
    let Some(path) = &opts.input_file else {
        eprintln!("oxihuff: inspect requires an input file");
        return 1;
    };

    let artifact = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("oxihuff: {}: {e}", path.display());
            return 1;
        }
    };

    let summary = match codec::inspect(&artifact) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("oxihuff: invalid artifact: {e}");
            return 1;
        }
    };

    println!("Topology length:              {}", summary.header.topology_len);
    println!("Symbol count:                 {}", summary.header.symbol_count);
    println!("Payload length:               {}", summary.payload_len);
    println!("Artifact length:              {}", summary.artifact_len());
    println!("Distinct symbols:             {}", summary.distinct_symbols);
    println!("Tree depth:                   {}", summary.tree_depth);

    if !opts.quiet {
        println!();
        println!("  Symbol     Scalar     Code");
        for (symbol, code) in summary.codes.iter() {
            let code = if code.is_empty() {
                "(empty)".to_string()
            } else {
                code.to_string()
            };
            println!("  {:<10} U+{:04X}     {code}", format!("{symbol:?}"), u32::from(symbol));
        }
    }

    if opts.json_output {
        let codes: serde_json::Map<String, serde_json::Value> = summary
            .codes
            .iter()
            .map(|(symbol, code)| (symbol.to_string(), code.to_string().into()))
            .collect();
        let json = serde_json::json!({
            "command": "inspect",
            "topology_len": summary.header.topology_len,
            "symbol_count": summary.header.symbol_count,
            "payload_len": summary.payload_len,
            "distinct_symbols": summary.distinct_symbols,
            "tree_depth": summary.tree_depth,
            "codes": codes,
        });
        eprintln!("{json:#}");
    }

    0
}

// ---------------------------------------------------------------------------
// Config command
// ---------------------------------------------------------------------------

fn cmd_config() -> i32 {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("oxihuff version {version} (Rust), Copyright (C) oxihuff contributors");
    eprintln!("Licensed under the MIT License");

    let file_io = cfg!(feature = "file-io") as u8;
    let ptr_size = std::mem::size_of::<*const ()>();

    eprintln!("FILE_IO={file_io}");
    eprintln!("HEADER_LEN={HEADER_LEN}");
    eprintln!("LEAF_MARKER={LEAF_MARKER}");
    eprintln!("INTERNAL_MARKER={INTERNAL_MARKER}");
    eprintln!("LEAF_RECORD_LEN={LEAF_RECORD_LEN}");
    eprintln!("MAX_SYMBOLS={}", u32::MAX);
    eprintln!("sizeof(usize)={ptr_size}");

    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn log_filter(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    }
}

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();
    let mut opts = resolve_options(cli);

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_filter(opts.verbose, opts.quiet)),
    )
    .format_timestamp(None)
    .format_target(false)
    .init();

    // Warn if -c overrides output filename.
    if opts.use_stdout && !opts.quiet {
        if let Some(path) = opts.output_file.take() {
            eprintln!(
                "oxihuff: warning: -c option overrides output filename: {}",
                path.display()
            );
        }
    }

    let exit_code = match opts.command {
        Command::Compress => cmd_compress(&opts),
        Command::Decompress => cmd_decompress(&opts),
        Command::Inspect => cmd_inspect(&opts),
        Command::Config => cmd_config(),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_opts(args: &[&str]) -> Options {
        let argv: Vec<String> = std::iter::once("oxihuff".to_string())
            .chain(args.iter().map(|s| s.to_string()))
            .collect();
        let cli = Cli::try_parse_from(argv).expect("cli parse failed");
        resolve_options(cli)
    }

    #[test]
    fn compress_subcommand_maps_correctly() {
        let opts = parse_opts(&["compress", "in.txt", "out.enc"]);
        assert_eq!(opts.command, Command::Compress);
        assert_eq!(opts.input_file, Some(PathBuf::from("in.txt")));
        assert_eq!(opts.output_file, Some(PathBuf::from("out.enc")));
        assert!(!opts.use_stdout);
    }

    #[test]
    fn decompress_long_form_paths() {
        let opts = parse_opts(&["decompress", "--input", "a.enc", "--output", "a.txt"]);
        assert_eq!(opts.command, Command::Decompress);
        assert_eq!(opts.input_file, Some(PathBuf::from("a.enc")));
        assert_eq!(opts.output_file, Some(PathBuf::from("a.txt")));
    }

    #[test]
    fn long_and_positional_input_conflict() {
        let argv = ["oxihuff", "compress", "--input", "a.txt", "b.txt"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn global_flags() {
        let opts = parse_opts(&["--force", "--json", "compress", "--stdout", "in"]);
        assert!(opts.force);
        assert!(opts.json_output);
        assert!(opts.use_stdout);
    }

    #[test]
    fn verbose_is_capped() {
        let opts = parse_opts(&["-v", "-v", "-v", "compress", "in"]);
        assert_eq!(opts.verbose, 2);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let argv = ["oxihuff", "--quiet", "--verbose", "compress", "in"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn inspect_and_config_map() {
        let opts = parse_opts(&["inspect", "x.enc"]);
        assert_eq!(opts.command, Command::Inspect);
        assert_eq!(opts.input_file, Some(PathBuf::from("x.enc")));
        assert_eq!(parse_opts(&["config"]).command, Command::Config);
    }

    #[test]
    fn output_defaults_to_derived_name() {
        let opts = parse_opts(&["compress", "dir/notes.txt"]);
        assert_eq!(
            resolve_output(&opts, compressed_path_for),
            OutputTarget::File(PathBuf::from("dir/notes.enc"))
        );

        let opts = parse_opts(&["decompress", "dir/notes.enc"]);
        assert_eq!(
            resolve_output(&opts, extracted_path_for),
            OutputTarget::File(PathBuf::from("dir/notes_extracted.txt"))
        );
    }

    #[test]
    fn output_goes_to_stdout_without_paths() {
        let opts = parse_opts(&["compress"]);
        assert_eq!(resolve_output(&opts, compressed_path_for), OutputTarget::Stdout);

        let opts = parse_opts(&["compress", "-c", "in.txt"]);
        assert_eq!(resolve_output(&opts, compressed_path_for), OutputTarget::Stdout);
    }

    #[test]
    fn explicit_output_wins() {
        let opts = parse_opts(&["compress", "in.txt", "custom.bin"]);
        assert_eq!(
            resolve_output(&opts, compressed_path_for),
            OutputTarget::File(PathBuf::from("custom.bin"))
        );
    }

    #[test]
    fn log_filter_levels() {
        assert_eq!(log_filter(0, false), "warn");
        assert_eq!(log_filter(1, false), "info");
        assert_eq!(log_filter(2, false), "debug");
        assert_eq!(log_filter(2, true), "error");
    }

    #[test]
    fn fuzz_parser_tolerates_garbage() {
        fuzz_try_parse_args(&["--bogus".to_string(), "compress".to_string()]);
        fuzz_try_parse_args(&[]);
    }
}
