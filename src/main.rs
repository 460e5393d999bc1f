// SPDX-License-Identifier: MIT
//
// viewmark: replay editor sessions and watch per-viewport cursor memory.
//
// This is the main binary that wires together the two crates:
//
//   viewmark-core   → Store, Recorder, Watcher, Restore, GC, Tracker
//   viewmark-editor → Session host, script parser and runner
//
// A script flows through:
//
//   file / stdin → runner::run → Session commands → PointMemory hooks
//   print / marks / set queries → stdout
//
// Logs go to stderr so reports stay pipeable. Filter with VIEWMARK_LOG or
// RUST_LOG; `--verbose` raises the default.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use viewmark_core::Options;
use viewmark_editor::Session;
use viewmark_editor::runner;

#[derive(Parser, Debug)]
#[command(name = "viewmark")]
#[command(about = "Replay an editor session script with per-viewport cursor memory")]
struct Args {
    /// Script to run; reads stdin when omitted or `-`
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Tracker options applied before the script, in `:set` syntax
    #[arg(short, long, value_name = "ARGS")]
    set: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

const LOG_ENV: &str = "VIEWMARK_LOG";

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "viewmark=debug,viewmark_core=debug,viewmark_editor=debug"
    } else {
        "warn"
    }
}

fn setup_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .try_init();
}

fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display())),
        _ => {
            let mut script = String::new();
            io::stdin()
                .read_to_string(&mut script)
                .context("reading script from stdin")?;
            Ok(script)
        }
    }
}

fn options_from(set: Option<&str>) -> Result<Options> {
    let mut options = Options::default();
    if let Some(args) = set {
        options
            .apply_str(args)
            .with_context(|| format!("applying --set '{args}'"))?;
    }
    Ok(options)
}

fn run_script(script: &str, options: Options) -> Result<Vec<String>> {
    let mut session = Session::new(options);
    let output = runner::run(&mut session, script).context("script failed")?;
    tracing::info!(
        lines = script.lines().count(),
        frames = session.frames().len(),
        "script finished"
    );
    Ok(output)
}

fn try_main(args: &Args) -> Result<()> {
    let options = options_from(args.set.as_deref())?;
    let script = read_script(args.script.as_deref())?;
    for line in run_script(&script, options)? {
        println!("{line}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_tracing(args.verbose);

    match try_main(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("viewmark: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn args_parse() {
        let args = Args::parse_from(["viewmark", "session.vm", "--verbose", "--set", "nopw"]);
        assert_eq!(args.script, Some(PathBuf::from("session.vm")));
        assert_eq!(args.set.as_deref(), Some("nopw"));
        assert!(args.verbose);

        let args = Args::parse_from(["viewmark"]);
        assert_eq!(args.script, None);
        assert!(!args.verbose);
    }

    #[test]
    fn set_flag_builds_options() {
        let options = options_from(Some("nopw te")).unwrap();
        assert!(!options.prune_windows);
        assert!(options.track_edits);
        assert!(options_from(Some("bogus")).is_err());
    }

    #[test]
    fn runs_a_script() {
        let output = run_script("open a hello\ngoto 3\nprint\n", Options::default()).unwrap();
        assert_eq!(output, vec!["frame 0", "  vp1* a 1:4 @3"]);
    }

    #[test]
    fn script_failure_has_context() {
        let err = run_script("open a\nopen a\n", Options::default()).unwrap_err();
        assert!(
            format!("{err:#}").starts_with("script failed: line 2: document name 'a' already in use")
        );
    }
}
