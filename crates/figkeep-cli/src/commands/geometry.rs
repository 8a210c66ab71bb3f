//! `figkeep geometry` — Inspect the window geometry cache.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use figkeep_runtime::geometry::GeometryCache;

/// Arguments for the `geometry` command.
#[derive(Args, Debug)]
pub struct GeometryArgs {
    /// Cache file to use instead of the default location.
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Print entries as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Action to perform.
    #[command(subcommand)]
    pub action: GeometryAction,
}

/// Geometry cache actions.
#[derive(Subcommand, Debug)]
pub enum GeometryAction {
    /// List every stored placement.
    List,
    /// Forget the placement stored for a tag on this machine.
    Forget {
        /// Window tag.
        tag: String,
    },
    /// Print the cache file location.
    Path,
}

/// Executes the `geometry` command.
///
/// # Errors
///
/// Returns an error if the cache cannot be read or written.
pub fn execute(args: GeometryArgs) -> anyhow::Result<()> {
    let cache = match args.file {
        Some(path) => GeometryCache::open(path)?,
        None => GeometryCache::open_default()?,
    };

    match args.action {
        GeometryAction::Path => println!("{}", cache.path().display()),
        GeometryAction::List if args.json => {
            let entries: serde_json::Map<String, serde_json::Value> = cache
                .entries()
                .map(|(key, entry)| Ok((key.to_owned(), serde_json::to_value(entry)?)))
                .collect::<Result<_, serde_json::Error>>()?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        GeometryAction::List => {
            println!("KEY\tGEOMETRY\tSAVED");
            for (key, entry) in cache.entries() {
                println!(
                    "{key}\t{}\t{}",
                    entry.geometry,
                    entry.saved_at.format("%Y-%m-%d %H:%M:%S")
                );
            }
        }
        GeometryAction::Forget { tag } => {
            let mut cache = cache;
            if cache.remove(&tag) {
                cache.save()?;
                tracing::info!(tag, machine = cache.machine_id(), "geometry forgotten");
                println!("Forgot {tag}@{}", cache.machine_id());
            } else {
                println!("No geometry stored for {tag}@{}", cache.machine_id());
            }
        }
    }
    Ok(())
}
