//! chiptone CLI - Command-line interface for procedural arcade sounds
//!
//! This binary renders tones, step sequences, request documents and presets
//! to WAV files, and inspects or validates existing ones.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use chiptone_cli::commands;
use chiptone_cli::commands::render::RenderOptions;
use chiptone_cli::commands::sequence::SequenceArgs;
use chiptone_cli::commands::tone::ToneArgs;
use chiptone_cli::logging;
use chiptone_spec::format::DEFAULT_SAMPLE_RATE;
use chiptone_spec::params::{DEFAULT_AMPLITUDE, DEFAULT_SUBDIVISION};

/// chiptone - Procedural tone and sequence synthesizer
#[derive(Parser)]
#[command(name = "chiptone")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase diagnostic logging (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Override the render cache directory
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a single sine tone
    Tone {
        /// Frequency in Hz
        #[arg(short, long)]
        frequency: f64,

        /// Duration in milliseconds
        #[arg(short, long)]
        duration_ms: u32,

        /// Amplitude in [0, 1]
        #[arg(short, long, default_value_t = DEFAULT_AMPLITUDE)]
        amplitude: f64,

        /// Sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,

        /// Output file path
        #[arg(short, long)]
        output: String,

        /// Write headerless little-endian PCM instead of WAV
        #[arg(long)]
        raw: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render a looping step sequence
    Sequence {
        /// Comma-separated MIDI note numbers (e.g. 60,64,67)
        #[arg(short, long, value_delimiter = ',', required = true)]
        notes: Vec<u8>,

        /// Tempo in beats per minute
        #[arg(short, long)]
        bpm: f64,

        /// Step length as a fraction of a beat
        #[arg(short, long, default_value_t = DEFAULT_SUBDIVISION)]
        subdivision: f64,

        /// Attack window in frames
        #[arg(long, default_value_t = 0)]
        attack_frames: u32,

        /// Release window in frames
        #[arg(long, default_value_t = 0)]
        release_frames: u32,

        /// Sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,

        /// Output file path
        #[arg(short, long)]
        output: String,

        /// Write headerless little-endian PCM instead of WAV
        #[arg(long)]
        raw: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render a request document to <out-root>/<id>.wav
    Render {
        /// Path to the request file (JSON)
        #[arg(short, long)]
        request: String,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_root: PathBuf,

        /// Skip the render cache
        #[arg(long)]
        no_cache: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a request document without rendering it
    Validate {
        /// Path to the request file (JSON)
        #[arg(short, long)]
        request: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Decode a WAV file and print its format and payload summary
    Inspect {
        /// Path to the WAV file
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Built-in sound presets
    Preset {
        #[command(subcommand)]
        command: PresetCommands,
    },

    /// Manage the render cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[derive(Subcommand)]
enum PresetCommands {
    /// List available presets
    List {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print a preset as a request document
    Show {
        /// Preset name
        name: String,
    },

    /// Render a preset to <out-root>/<name>.wav
    Render {
        /// Preset name
        name: String,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_root: PathBuf,

        /// Skip the render cache
        #[arg(long)]
        no_cache: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum CacheCommands {
    /// Show cache statistics
    Info,

    /// Remove all cache entries
    Clear,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let cache_dir = cli.cache_dir;
    let result = match cli.command {
        Commands::Tone {
            frequency,
            duration_ms,
            amplitude,
            sample_rate,
            output,
            raw,
            json,
        } => {
            let args = ToneArgs {
                frequency_hz: frequency,
                duration_ms,
                amplitude,
                sample_rate,
            };
            commands::tone::run(&args, &output, raw, json)
        }
        Commands::Sequence {
            notes,
            bpm,
            subdivision,
            attack_frames,
            release_frames,
            sample_rate,
            output,
            raw,
            json,
        } => {
            let args = SequenceArgs {
                notes,
                bpm,
                subdivision,
                attack_frames,
                release_frames,
                sample_rate,
            };
            commands::sequence::run(&args, &output, raw, json)
        }
        Commands::Render {
            request,
            out_root,
            no_cache,
            json,
        } => {
            let options = RenderOptions {
                out_root,
                no_cache,
                cache_dir,
                json,
            };
            commands::render::run(&request, &options)
        }
        Commands::Validate { request, json } => commands::validate::run(&request, json),
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
        Commands::Preset { command } => match command {
            PresetCommands::List { json } => commands::preset::list(json),
            PresetCommands::Show { name } => commands::preset::show(&name),
            PresetCommands::Render {
                name,
                out_root,
                no_cache,
                json,
            } => {
                let options = RenderOptions {
                    out_root,
                    no_cache,
                    cache_dir,
                    json,
                };
                commands::preset::render(&name, &options)
            }
        },
        Commands::Cache { command } => match command {
            CacheCommands::Info => commands::cache::info(cache_dir.as_deref()),
            CacheCommands::Clear => commands::cache::clear(cache_dir.as_deref()),
        },
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
