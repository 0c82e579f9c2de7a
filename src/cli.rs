use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use harmonic_sum::audio::{self, AudioError, ChannelMode, OutputFormat};
use harmonic_sum::config::{self, Config};
use harmonic_sum::export;
use harmonic_sum::harmonics::{self, AnalysisConfig, BlockConfig, BlockOrchestrator, HarmonicError};

/// Decompose audio into a sum of cosines and rebuild it
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the start of a WAV file as one window
    Analyze(AnalyzeArgs),

    /// Analyze a whole WAV file in fixed-size blocks on a worker pool
    Blocks(BlockArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Int16,
    Float32,
}

#[derive(Clone, Copy, ValueEnum)]
enum ChannelArg {
    /// Average all channels
    Mix,
    /// Use the first channel only
    First,
}

/// Analyze the start of a WAV file as one window
#[derive(Parser)]
struct AnalyzeArgs {
    /// Path to the input WAV file
    #[arg(required = true)]
    wav_file: PathBuf,

    /// Number of cosine components to keep (recommended: 10-100)
    #[arg(long)]
    harmonics: Option<usize>,

    /// Seconds to analyze from the start of the file (recommended: 5-10)
    #[arg(long, conflicts_with = "full")]
    duration: Option<u32>,

    /// Analyze the entire file instead of its first seconds
    #[arg(long)]
    full: bool,

    /// Where to write the expression log
    #[arg(long, value_name = "FILE")]
    expr_out: Option<PathBuf>,

    /// Where to write the reconstructed audio
    #[arg(long, value_name = "FILE")]
    audio_out: Option<PathBuf>,

    /// Sample format of the reconstructed audio
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// How to reduce multi-channel input to mono
    #[arg(long, value_enum)]
    channel: Option<ChannelArg>,

    /// Print the sum of cosines to the console
    #[arg(short, long)]
    print: bool,
}

/// Analyze a whole WAV file in fixed-size blocks on a worker pool
#[derive(Parser)]
struct BlockArgs {
    /// Path to the input WAV file
    #[arg(required = true)]
    wav_file: PathBuf,

    /// Samples per block (a power of two is fastest)
    #[arg(long)]
    block_size: Option<usize>,

    /// Number of cosine components to keep per block
    #[arg(long)]
    harmonics: Option<usize>,

    /// Worker threads (0 uses one per CPU)
    #[arg(long)]
    workers: Option<usize>,

    /// Where to write the expression log
    #[arg(long, value_name = "FILE")]
    expr_out: Option<PathBuf>,

    /// Where to write the reconstructed audio
    #[arg(long, value_name = "FILE")]
    audio_out: Option<PathBuf>,

    /// Sample format of the reconstructed audio
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// How to reduce multi-channel input to mono
    #[arg(long, value_enum)]
    channel: Option<ChannelArg>,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Int16 => OutputFormat::Int16,
            FormatArg::Float32 => OutputFormat::Float32,
        }
    }
}

impl From<ChannelArg> for ChannelMode {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Mix => ChannelMode::Mix,
            ChannelArg::First => ChannelMode::First,
        }
    }
}

fn ensure_exists(path: &Path) -> Result<(), AudioError> {
    if !path.exists() {
        return Err(AudioError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("WAV file not found: {}", path.display()),
        )));
    }
    Ok(())
}

fn run_analyze_command(args: &AnalyzeArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&args.wav_file)?;

    let max_harmonics = args.harmonics.unwrap_or(config.analysis.max_harmonics);
    config.limits.check_harmonics(max_harmonics)?;

    let analysis_config = AnalysisConfig {
        max_harmonics,
        duration_seconds: if args.full {
            None
        } else {
            args.duration.or(config.analysis.duration_seconds)
        },
    };
    analysis_config.validate()?;

    let channel_mode = args.channel.map(Into::into).unwrap_or(config.analysis.channel_mode);
    let buffer = audio::read_wav_file(&args.wav_file, channel_mode)?;

    let result = harmonics::analyze_signal(&buffer, &analysis_config)?;

    if args.print {
        println!("{}", result.components.to_pretty_expression());
    }

    let expr_out = args
        .expr_out
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.common.expression_file));
    export::write_expression_file(&expr_out, &result.components)?;

    let audio_out = args
        .audio_out
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.analysis.output_file));
    let format = args.format.map(Into::into).unwrap_or(config.common.output_format);
    export::write_reconstruction(&audio_out, &result.reconstructed, result.sample_rate, format)?;

    println!(
        "Kept {} components; expressions in '{}', audio in '{}'",
        result.components.len(),
        expr_out.display(),
        audio_out.display()
    );
    Ok(())
}

fn run_blocks_command(args: &BlockArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&args.wav_file)?;

    let block_config = BlockConfig {
        block_size: args.block_size.unwrap_or(config.blocks.block_size),
        max_harmonics: args.harmonics.unwrap_or(config.blocks.max_harmonics),
        workers: args.workers.unwrap_or(config.blocks.workers),
    };
    config.limits.check_block_size(block_config.block_size)?;
    config.limits.check_harmonics(block_config.max_harmonics)?;

    let channel_mode = args.channel.map(Into::into).unwrap_or(config.blocks.channel_mode);
    let buffer = audio::read_wav_file(&args.wav_file, channel_mode)?;

    let orchestrator = BlockOrchestrator::new(block_config)?;
    let total_blocks = orchestrator.total_blocks(buffer.len());

    let pb = ProgressBar::new(total_blocks as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} blocks ({eta} remaining)")?
            .progress_chars("=>-"),
    );
    let tick = pb.clone();
    let orchestrator = orchestrator.with_progress(move |_| tick.inc(1));

    let reconstruction = orchestrator.reconstruct(&buffer);
    pb.finish_and_clear();
    let reconstruction = reconstruction?;

    let expr_out = args
        .expr_out
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.common.expression_file));
    export::write_block_expression_file(&expr_out, &reconstruction)?;

    let audio_out = args
        .audio_out
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.blocks.output_file));
    let format = args.format.map(Into::into).unwrap_or(config.common.output_format);
    export::write_reconstruction(
        &audio_out,
        &reconstruction.samples,
        reconstruction.sample_rate,
        format,
    )?;

    println!(
        "Processed {} blocks; expressions in '{}', audio in '{}'",
        reconstruction.blocks.len(),
        expr_out.display(),
        audio_out.display()
    );
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "harmonic_sum=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load_config()?;

    match &cli.command {
        Commands::Analyze(args) => run_analyze_command(args, &config)?,
        Commands::Blocks(args) => run_blocks_command(args, &config)?,
    }

    Ok(())
}

fn main() {
    init_tracing();

    match run() {
        Ok(_) => {}
        Err(err) => {
            eprintln!("\nERROR: {}\n", err);
            match err.downcast_ref::<AudioError>() {
                Some(AudioError::Io(ref io_err)) if io_err.kind() == io::ErrorKind::NotFound => {
                    eprintln!("Please check that:");
                    eprintln!("1. The file path is correct");
                    eprintln!("2. The file exists");
                    eprintln!("3. You have permission to read the file");
                }
                Some(AudioError::WavParse(_)) => {
                    eprintln!("Only PCM WAV files (16/24/32-bit integer or 32-bit float) are supported.");
                }
                _ => {}
            }
            if let Some(HarmonicError::EmptyWindow) = err.downcast_ref::<HarmonicError>() {
                eprintln!("The input is shorter than the analysis window; try a longer file or a smaller block size.");
            }
            process::exit(1);
        }
    }
}
