#![forbid(unsafe_code)]

use std::io::{self, BufWriter};
use std::process;

use logtint_harness::cli::{self, Command, HELP_TEXT, VERSION};
use logtint_harness::render;
use logtint_runtime::Program;
use logtint_style::ColorProfile;
use logtint_view::{FileLogSource, LogView, LogViewConfig, LogViewMsg};
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "LOGTINT_LOG";

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> io::Result<()> {
    let opts = match cli::parse(std::env::args().skip(1), env_string) {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            println!("{HELP_TEXT}");
            return Ok(());
        }
        Ok(Command::Version) => {
            println!("logtint {VERSION}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("logtint: {err}");
            eprintln!("Run with --help for usage information.");
            process::exit(2);
        }
    };
    init_tracing();

    let mut config = LogViewConfig::from_env();
    if let Some(tag) = opts.app_tag.clone() {
        config = config.with_app_tag(tag);
    }
    if let Some(budget) = opts.budget {
        config = config.with_batch_budget(budget);
    }
    let profile = opts.color_profile(ColorProfile::detect());

    let mut program = Program::new(LogView::new(FileLogSource::new(&opts.path), config));
    program.init();
    for &(severity, visible) in &opts.toggles {
        program.send(LogViewMsg::SetSeverityVisible(severity, visible));
    }
    let processed = program.run_until_idle();
    debug_assert!(!program.model().decorating());

    let stats = program.stats();
    let view_stats = program.model().stats();
    info!(
        path = %opts.path.display(),
        processed,
        updates = stats.updates,
        deferred = stats.deferred,
        refreshes = view_stats.refreshes,
        stale_ticks = view_stats.stale_ticks,
        "log decorated"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    render::render(&mut out, program.model().buffer(), profile)
}
