// Seedsong Melody Generator — CLI entry point.
//
// Generates a melody, prints a JSON report of it to stdout, and writes it to
// a MIDI file. The pipeline: params/config → melody → encode → MIDI output.
// Progress lines go to stderr so stdout stays machine-readable.
//
// Usage:
//   cargo run -p seedsong_music -- [--measures N] [--tempo BPM] [--seed TEXT]
//     [--low-midi N] [--high-midi N] [--out PATH] [--config PATH]
//     [--print-config] [--no-midi] [--quiet]

use clap::Parser;
use seedsong_music::config::GeneratorConfig;
use seedsong_music::encode::encode_melody;
use seedsong_music::error::MelodyError;
use seedsong_music::melody::generate_from_params;
use seedsong_music::midi::write_midi;
use seedsong_music::params::{
    DEFAULT_HIGH_MIDI, DEFAULT_LOW_MIDI, DEFAULT_MEASURES, DEFAULT_TEMPO, GenerationParams,
};
use seedsong_music::report::MelodyReport;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "generate",
    version,
    about = "Seeded random melody generator (JSON report + MIDI file)"
)]
struct Cli {
    /// Number of 4/4 measures to generate
    #[arg(long, default_value_t = DEFAULT_MEASURES,
          value_parser = clap::value_parser!(u32).range(1..))]
    measures: u32,

    /// Tempo in BPM (only affects the MIDI file)
    #[arg(long, default_value_t = DEFAULT_TEMPO,
          value_parser = clap::value_parser!(u32).range(1..))]
    tempo: u32,

    /// Seed text (same seed => same melody). Omit for a random melody.
    #[arg(long)]
    seed: Option<String>,

    /// Lowest allowed MIDI pitch
    #[arg(long, alias = "lowMidi", default_value_t = DEFAULT_LOW_MIDI,
          value_parser = clap::value_parser!(u8).range(0..=127))]
    low_midi: u8,

    /// Highest allowed MIDI pitch
    #[arg(long, alias = "highMidi", default_value_t = DEFAULT_HIGH_MIDI,
          value_parser = clap::value_parser!(u8).range(0..=127))]
    high_midi: u8,

    /// Output MIDI path
    #[arg(long, default_value = "out.mid")]
    out: PathBuf,

    /// JSON file overriding generator constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the active generator config as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Skip writing the MIDI file
    #[arg(long)]
    no_midi: bool,

    /// Suppress progress output on stderr
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), MelodyError> {
    let quiet = cli.quiet;
    let progress = |msg: &str| {
        if !quiet {
            eprintln!("{msg}");
        }
    };

    let config = match &cli.config {
        Some(path) => {
            progress(&format!("Loading generator config from {}...", path.display()));
            GeneratorConfig::load(path)?
        }
        None => GeneratorConfig::default(),
    };

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let params = GenerationParams {
        measures: cli.measures,
        tempo: cli.tempo,
        seed: cli.seed,
        low_midi: cli.low_midi,
        high_midi: cli.high_midi,
    };
    params.validate()?;

    progress("=== Seedsong Melody Generator ===");
    progress(&format!(
        "Measures: {}  Tempo: {} BPM  Range: {}-{}",
        params.measures, params.tempo, params.low_midi, params.high_midi
    ));
    match &params.seed {
        Some(s) => progress(&format!("Seed: {s:?}")),
        None => progress("Seed: (none, output is not reproducible)"),
    }

    progress("[1/3] Generating melody...");
    let melody = generate_from_params(&params, &config);
    progress(&format!(
        "  {} notes over {} beats.",
        melody.notes.len(),
        melody.total_beats()
    ));

    progress("[2/3] Writing report...");
    let report = MelodyReport::new(&params, &melody);
    println!("{}", report.to_json_pretty()?);

    if cli.no_midi {
        progress("[3/3] Skipping MIDI output (--no-midi).");
        return Ok(());
    }

    progress(&format!("[3/3] Writing MIDI to {}...", cli.out.display()));
    let encoded = encode_melody(&melody);
    write_midi(&encoded, params.tempo, &cli.out)?;
    let seconds = melody.total_beats() * 60.0 / params.tempo as f64;
    progress(&format!("  Done! Duration: {seconds:.1}s"));

    Ok(())
}
