mod interrupt;
mod narrate;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use thirteenth_core::{GameConfig, LogSink, NullSink, RngState};
use thirteenth_data::{
    export_config_text, load_config_patch, load_config_text, save_game_config, Preset, RunMode,
};
use thirteenth_sim::{
    run_batch, write_json, write_text, BatchConfig, CancelToken, Progress, Simulator,
    DEFAULT_SEED,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PresetArg {
    /// Values used for blank form fields
    Fallback,
    /// Tuned defaults
    Recommended,
}

impl From<PresetArg> for Preset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::Fallback => Preset::Fallback,
            PresetArg::Recommended => Preset::Recommended,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Narration {
    /// Colored lines on stdout
    Stdout,
    /// Through the logger at info level
    Log,
    /// Result line only
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Single,
    Multiple,
}

impl From<ModeArg> for RunMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Single => RunMode::Single,
            ModeArg::Multiple => RunMode::Multiple,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "thirteenth", version)]
#[command(about = "Night of the Thirteenth: seeded games and batch statistics")]
struct Cli {
    /// Preset the config file is layered over
    #[arg(long, value_enum, global = true, default_value_t = PresetArg::Recommended)]
    preset: PresetArg,

    /// JSON config; may set every field or only a few
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play one game and narrate it
    Single {
        /// Seed; random when omitted
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = Narration::Stdout)]
        narrate: Narration,
        /// Write the full trace (.json, anything else gets text)
        #[arg(long)]
        trace: Option<PathBuf>,
    },
    /// Play many games and summarize them
    Batch {
        #[arg(long, default_value_t = 100)]
        runs: u64,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        /// Worker threads; 0 uses every core
        #[arg(long, default_value_t = 0)]
        workers: usize,
        #[arg(long, default_value_t = 10)]
        progress_every: u64,
        /// Write the summary (.json, anything else gets text)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Export, import or show the effective configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Render the copy/paste text block
    Export {
        #[arg(long, value_enum, default_value_t = ModeArg::Single)]
        mode: ModeArg,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Read a text block and print (or save) the merged JSON config
    Import {
        input: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the effective config as JSON
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    let config = resolve_config(&cli)?;

    match cli.command {
        Command::Single {
            seed,
            narrate,
            trace,
        } => run_single(config, seed, narrate, trace.as_deref()),
        Command::Batch {
            runs,
            seed,
            workers,
            progress_every,
            output,
        } => {
            let batch = BatchConfig {
                runs,
                seed,
                workers,
                progress_every,
            };
            run_many(&config, &batch, output.as_deref())
        }
        Command::Config { action } => run_config(config, action),
    }
}

fn init_logging(cli: &Cli) {
    let mut level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    if matches!(
        cli.command,
        Command::Single {
            narrate: Narration::Log,
            ..
        }
    ) && cli.verbose == 0
    {
        level = "info";
    }
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn resolve_config(cli: &Cli) -> Result<GameConfig> {
    let base = Preset::from(cli.preset).config();
    let config = match &cli.config {
        Some(path) => load_config_patch(path, &base)?,
        None => base,
    };
    log::debug!("using {:?} preset, config file {:?}", cli.preset, cli.config);
    Ok(config)
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn run_single(
    config: GameConfig,
    seed: Option<u64>,
    narrate: Narration,
    trace_path: Option<&Path>,
) -> Result<()> {
    let seed = seed.unwrap_or_else(|| RngState::from_entropy().seed());
    let simulator = Simulator::new(config, seed)?;
    let trace = match narrate {
        Narration::Stdout => {
            let mut printer = narrate::StdoutNarrator::default();
            simulator.run_with(&mut printer)
        }
        Narration::Log => simulator.run_with(&mut LogSink::default()),
        Narration::None => simulator.run_with(&mut NullSink),
    };

    println!();
    println!("{}", narrate::result_line(&trace.result));
    println!("seed: {seed}");

    if let Some(path) = trace_path {
        if is_json(path) {
            write_json(path, &trace)?;
        } else {
            write_text(path, &trace)?;
        }
        println!("trace written to {}", path.display());
    }
    Ok(())
}

fn run_many(config: &GameConfig, batch: &BatchConfig, output: Option<&Path>) -> Result<()> {
    println!(
        "{}",
        format!(
            "Running {} games on {} workers (seed {})",
            batch.runs,
            batch.worker_count(),
            batch.seed
        )
        .cyan()
        .bold()
    );
    let cancel = CancelToken::new();
    interrupt::cancel_on_ctrl_c(cancel.clone());
    let mut stderr = std::io::stderr();
    let mut progress_error = None;
    let summary = run_batch(config, batch, &cancel, |progress: &Progress| {
        if progress_error.is_some() {
            return;
        }
        if let Err(err) = write_progress(&mut stderr, progress) {
            log::warn!("progress output disabled: {err}");
            progress_error = Some(err);
        }
    })?;
    if progress_error.is_none() {
        eprintln!();
    }

    println!("{}", narrate::summary_block(&summary));

    if let Some(path) = output {
        if is_json(path) {
            write_json(path, &summary)?;
        } else {
            write_text(path, &summary)?;
        }
        println!("summary written to {}", path.display());
    }
    Ok(())
}

fn write_progress(out: &mut impl Write, progress: &Progress) -> std::io::Result<()> {
    write!(
        out,
        "\r{} / {} simulations completed ({:.1}%) | win rate {:.1}% | avg rounds {:.2} | avg tests {:.1}",
        progress.completed,
        progress.total,
        progress.percent(),
        progress.win_rate,
        progress.avg_rounds,
        progress.avg_tests
    )?;
    out.flush()
}

fn run_config(config: GameConfig, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Export { mode, output } => {
            let text = export_config_text(&config, mode.into());
            match output {
                Some(path) => std::fs::write(&path, text)
                    .with_context(|| format!("write {}", path.display()))?,
                None => println!("{text}"),
            }
        }
        ConfigAction::Import { input, output } => {
            let merged = load_config_text(&input, &config)?;
            match output {
                Some(path) => {
                    save_game_config(&path, &merged)?;
                    println!("config written to {}", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&merged)?),
            }
        }
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            let sizes = format!(
                "threat pool {} cards, number reserve {} cards",
                config.threat_pool_size(),
                config.number_reserve_size()
            );
            eprintln!("{}", sizes.dimmed());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn batch_flags_parse() {
        let cli = Cli::try_parse_from([
            "thirteenth",
            "batch",
            "--runs",
            "500",
            "--workers",
            "3",
            "--preset",
            "fallback",
        ])
        .expect("parse");
        assert_eq!(cli.preset, PresetArg::Fallback);
        match cli.command {
            Command::Batch {
                runs,
                workers,
                seed,
                ..
            } => {
                assert_eq!(runs, 500);
                assert_eq!(workers, 3);
                assert_eq!(seed, DEFAULT_SEED);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn config_import_takes_a_path() {
        let cli = Cli::try_parse_from(["thirteenth", "config", "import", "pasted.txt"])
            .expect("parse");
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigAction::Import { .. }
            }
        ));
    }

    #[test]
    fn progress_line_overwrites_itself() {
        let progress = Progress {
            completed: 25,
            total: 100,
            wins: 5,
            win_rate: 20.0,
            avg_rounds: 12.5,
            avg_tests: 40.0,
        };
        let mut out = Vec::new();
        write_progress(&mut out, &progress).expect("write");
        let line = String::from_utf8(out).expect("utf8");
        assert_eq!(
            line,
            "\r25 / 100 simulations completed (25.0%) | win rate 20.0% | avg rounds 12.50 | avg tests 40.0"
        );
    }

    #[test]
    fn json_extension_detection() {
        assert!(is_json(Path::new("out/summary.JSON")));
        assert!(!is_json(Path::new("out/summary.txt")));
    }
}
