//! `figkeep hold` — Hold simulated windows open from the terminal.

use std::sync::atomic::Ordering;
use std::time::Duration;

use clap::Args;
use figkeep_common::config::HoldConfig;
use figkeep_runtime::backend::{BackendPreferences, configured_backend, recommended_backend};
use figkeep_runtime::hold::{HoldOutcome, hold_windows};

use crate::sim::SimulatedWindows;

/// Arguments for the `hold` command.
#[derive(Args, Debug, Default)]
pub struct HoldArgs {
    /// Key that ends the hold: `any-key` (default) or `enter`.
    #[arg(long)]
    pub trigger: Option<String>,

    /// Event pump interval in milliseconds (default 50).
    #[arg(long)]
    pub poll_ms: Option<u64>,

    /// Number of simulated windows.
    #[arg(long, default_value_t = 1)]
    pub windows: u32,

    /// Close the simulated windows after this many seconds.
    #[arg(long)]
    pub close_after: Option<f64>,

    /// Backend name the simulated windows report; defaults to the
    /// configured or recommended one.
    #[arg(long)]
    pub backend: Option<String>,

    /// Do not print a prompt.
    #[arg(long)]
    pub no_prompt: bool,

    /// Hold even when standard input is not a terminal.
    #[arg(long)]
    pub force: bool,
}

/// Executes the `hold` command.
///
/// # Errors
///
/// Returns an error for an unknown trigger name, a malformed `FIGKEEP_*`
/// override, or a negative lifetime.
pub fn execute(args: HoldArgs) -> anyhow::Result<()> {
    let lifetime = args
        .close_after
        .map(Duration::try_from_secs_f64)
        .transpose()
        .map_err(|e| anyhow::anyhow!("invalid --close-after: {e}"))?;
    let config = hold_config(&args, |key| std::env::var(key).ok())?;
    let backend = args.backend.unwrap_or_else(|| {
        recommended_backend(&BackendPreferences::default(), configured_backend)
    });

    let windows = SimulatedWindows::new(backend, args.windows, lifetime);
    let interrupted = windows.interrupt_flag();
    ctrlc::set_handler(move || {
        interrupted.store(true, Ordering::SeqCst);
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {e}"))?;

    tracing::info!(
        windows = args.windows,
        trigger = %config.trigger,
        poll_interval = ?config.poll_interval,
        "holding simulated windows"
    );
    let outcome = hold_windows(&windows, config);
    eprintln!("  {}", describe(outcome));
    Ok(())
}

/// Builds the hold configuration: environment overrides first, then the
/// flags given on the command line.
fn hold_config(
    args: &HoldArgs,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<HoldConfig> {
    let mut config = HoldConfig::default().apply_overrides(lookup)?;
    if let Some(name) = &args.trigger {
        config = config.trigger_named(name)?;
    }
    if let Some(ms) = args.poll_ms {
        config = config.poll_interval(Duration::from_millis(ms));
    }
    if args.force {
        config = config.only_if_tty(false);
    }
    if args.no_prompt {
        config = config.silent();
    }
    Ok(config)
}

const fn describe(outcome: HoldOutcome) -> &'static str {
    match outcome {
        HoldOutcome::NonGuiBackend => "Backend does not open windows; nothing to hold.",
        HoldOutcome::NotInteractive => {
            "Standard input is not a terminal; not holding (use --force)."
        }
        HoldOutcome::NoWindows => "No windows open.",
        HoldOutcome::TriggerFired => "Key pressed; exiting.",
        HoldOutcome::WindowsClosed => "All windows closed; exiting.",
    }
}
