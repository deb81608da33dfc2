//! trainsim — run a scenario file with one thread per train.
//!
//! ```text
//! trainsim [OPTIONS] <INPUT_FILE>
//! ```
//!
//! The input holds the train count, the station count, then one route per
//! train (`k s0 s1 … s(k-1)`), all whitespace-separated.  Every crossing
//! attempt is printed as it happens; a summary of step counts follows.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use ts_core::{Scenario, load_scenario_path};
use ts_output::{CsvSink, Discard, PrintChannel, RecordSink, Tee};
use ts_sim::{ReleasePolicy, SimBuilder, SimReport};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "trainsim", version, about = "Barrier-synchronized train movement simulator")]
struct Cli {
    /// Scenario file.
    #[arg(value_name = "INPUT_FILE")]
    input: PathBuf,

    /// When a train gives its segment back.  With `immediate` two trains
    /// that want the same segment may both cross it in one round;
    /// `end-of-round` lets exactly one train cross a contested segment per
    /// round.
    #[arg(long, value_enum, default_value_t = Release::Immediate)]
    release: Release,

    /// Also write every attempt as a CSV row to PATH.
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Log to stderr (repeat for more).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Don't print individual moves.
    #[arg(short = 'q', long)]
    quiet: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Release {
    /// Right after the attempt is logged.
    Immediate,
    /// After every train has finished the round.
    EndOfRound,
}

impl From<Release> for ReleasePolicy {
    fn from(r: Release) -> Self {
        match r {
            Release::Immediate  => ReleasePolicy::Immediate,
            Release::EndOfRound => ReleasePolicy::EndOfRound,
        }
    }
}

// ── Telemetry ─────────────────────────────────────────────────────────────────

fn init_telemetry(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .with_target(false)
        .try_init();
}

// ── Run ───────────────────────────────────────────────────────────────────────

fn print_header<W: Write + Send>(console: &PrintChannel<W>, scenario: &Scenario) {
    console.print(&format!(
        "nTrains: {} nStations: {}\n",
        scenario.train_count(),
        scenario.station_count(),
    ));
    for (train, route) in scenario.trains() {
        let stops: Vec<String> = route.stations().iter().map(ToString::to_string).collect();
        console.print(&format!(
            "Train: {train} Inserting {} stations {}\n",
            route.len(),
            stops.join(" "),
        ));
    }
}

fn print_summary<W: Write + Send>(console: &PrintChannel<W>, report: &SimReport) {
    console.print("Ending simulation\n");
    for t in report.trains() {
        console.print(&format!("Train: {} finished in {} steps\n", t.train, t.steps));
    }
}

fn run<W: Write + Send>(cli: &Cli, console: &PrintChannel<W>) -> Result<SimReport> {
    let scenario = load_scenario_path(&cli.input)
        .with_context(|| format!("cannot load scenario {}", cli.input.display()))?;
    info!(
        trains   = scenario.train_count(),
        stations = scenario.station_count(),
        "loaded {}",
        cli.input.display()
    );

    let sim = SimBuilder::new(scenario)
        .release_policy(cli.release.into())
        .build()?;
    print_header(console, sim.scenario());

    let moves: Box<dyn RecordSink + '_> = if cli.quiet {
        Box::new(Discard)
    } else {
        Box::new(console)
    };
    let rows: Box<dyn RecordSink> = match &cli.csv {
        Some(path) => Box::new(
            CsvSink::from_path(path)
                .with_context(|| format!("cannot create {}", path.display()))?,
        ),
        None => Box::new(Discard),
    };

    console.print("Running trains\n");
    let report = sim.run(&Tee(moves, rows))?;
    print_summary(console, &report);

    if let Some(e) = console.take_error() {
        return Err(e).context("writing simulation output");
    }
    Ok(report)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version go to stdout and succeed; anything else
            // is a usage error.
            let _ = e.print();
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };
    init_telemetry(cli.verbose);

    match run(&cli, &PrintChannel::stdout()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("trainsim: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::*;

    fn scenario_file(text: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(text.as_bytes()).unwrap();
        f
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("trainsim").chain(args.iter().copied())).unwrap()
    }

    fn output(console: PrintChannel<Vec<u8>>) -> Vec<String> {
        let bytes = console.into_inner();
        String::from_utf8(bytes).unwrap().lines().map(str::to_owned).collect()
    }

    #[test]
    fn missing_input_is_a_usage_error() {
        let e = Cli::try_parse_from(["trainsim"]).unwrap_err();
        assert!(e.use_stderr());
    }

    #[test]
    fn extra_argument_is_a_usage_error() {
        let e = Cli::try_parse_from(["trainsim", "a.txt", "b.txt"]).unwrap_err();
        assert!(e.use_stderr());
    }

    #[test]
    fn parses_options() {
        let c = cli(&["--release", "end-of-round", "-vv", "--quiet", "in.txt"]);
        assert_eq!(c.release, Release::EndOfRound);
        assert_eq!(c.verbose, 2);
        assert!(c.quiet);
        assert_eq!(c.input, PathBuf::from("in.txt"));
        assert!(c.csv.is_none());
    }

    #[test]
    fn release_help_names_the_single_winner_policy() {
        use clap::CommandFactory;

        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("end-of-round"), "{help}");
        assert!(help.contains("exactly one train cross a contested segment"), "{help}");
    }

    #[test]
    fn prints_header_records_and_summary() {
        let f = scenario_file("2 3\n3 0 1 2\n3 2 1 0\n");
        let console = PrintChannel::new(Vec::new());
        let report = run(&cli(&[f.path().to_str().unwrap()]), &console).unwrap();
        assert_eq!(report.rounds(), 2);

        let lines = output(console);
        assert_eq!(lines[0], "nTrains: 2 nStations: 3");
        assert_eq!(lines[1], "Train: 0 Inserting 3 stations 0 1 2");
        assert_eq!(lines[2], "Train: 1 Inserting 3 stations 2 1 0");
        assert_eq!(lines[3], "Running trains");
        // Two rounds of two records; order within a round varies.
        assert!(lines[4..8].iter().all(|l| l.starts_with("step: ")));
        assert_eq!(lines[8..], [
            "Ending simulation",
            "Train: 0 finished in 2 steps",
            "Train: 1 finished in 2 steps",
        ]);
    }

    #[test]
    fn quiet_skips_records_and_csv_gets_them() {
        // Two trains racing for the same segment.
        let f = scenario_file("2 2 2 0 1 2 0 1");
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("moves.csv");
        let args = [
            "--quiet",
            "--release",
            "end-of-round",
            "--csv",
            csv_path.to_str().unwrap(),
            f.path().to_str().unwrap(),
        ];
        let console = PrintChannel::new(Vec::new());
        run(&cli(&args), &console).unwrap();

        let lines = output(console);
        assert!(!lines.iter().any(|l| l.starts_with("step: ")));
        let mut summary = lines[lines.len() - 2..].to_vec();
        summary.sort();
        // One train wins round 0, the other gets through in round 1.
        assert!(
            summary == ["Train: 0 finished in 1 steps", "Train: 1 finished in 2 steps"]
                || summary == ["Train: 0 finished in 2 steps", "Train: 1 finished in 1 steps"],
            "{summary:?}"
        );

        let csv = std::fs::read_to_string(&csv_path).unwrap();
        // Header plus one win, one stay, one retry.
        assert_eq!(csv.lines().count(), 4);
    }

    #[test]
    fn oversized_network_fails_before_printing() {
        let f = scenario_file("1 4000000000\n2 0 1\n");
        let console = PrintChannel::new(Vec::new());
        assert!(run(&cli(&[f.path().to_str().unwrap()]), &console).is_err());
        assert!(output(console).is_empty());
    }

    #[test]
    fn error_chain_names_each_cause_once() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        let console = PrintChannel::new(Vec::new());
        let err = run(&cli(&[missing.to_str().unwrap()]), &console).unwrap_err();

        let message = format!("{err:#}");
        let root = err.root_cause().to_string();
        assert_eq!(message.matches(root.as_str()).count(), 1, "{message}");
        assert!(message.starts_with("cannot load scenario"), "{message}");
    }

    #[test]
    fn invalid_scenario_is_an_error() {
        let f = scenario_file("1 2 2 0 5");
        let console = PrintChannel::new(Vec::new());
        assert!(run(&cli(&[f.path().to_str().unwrap()]), &console).is_err());
        assert!(output(console).is_empty());
    }
}
