use clap::Parser;
use lds_driver::{aggregate, DirectoryStore, MalformedPolicy};
use std::path::PathBuf;

/// Averages every `*.bin` record in a folder into one polar map and prints it as JSON.
#[derive(Parser)]
#[command(name = "LiDAR map builder.", disable_version_flag = true)]
struct Args {
    /// Folder containing the record files
    #[arg(default_value = ".")]
    folder: PathBuf,
    /// Leave out malformed records instead of failing
    #[arg(long)]
    skip_malformed: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let policy = if args.skip_malformed {
        MalformedPolicy::Skip
    } else {
        MalformedPolicy::FailFast
    };

    let store = DirectoryStore::new(&args.folder);
    let map = match store.list_records().and_then(|records| aggregate(records, policy)) {
        Ok(map) => map,
        Err(e) => {
            log::error!("Failed to build a map from {}: {}", args.folder.display(), e);
            std::process::exit(1);
        }
    };

    if map.is_empty() {
        log::warn!("No map points found in {}", args.folder.display());
        return;
    }

    match serde_json::to_string_pretty(&map) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("{e}"),
    }
}
