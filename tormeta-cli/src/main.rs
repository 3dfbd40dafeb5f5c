use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use tormeta::TorrentMetadata;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
struct Args {
    /// Path to the .torrent file to inspect.
    torrent: PathBuf,

    /// Print the full file table.
    #[clap(long)]
    files: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("warn"))?;
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter_layer)
        .init();

    let args = Args::parse();
    let metadata = tormeta::parse_from_file(&args.torrent)?;
    print_summary(&metadata);
    if args.files {
        print_files(&metadata);
    }
    Ok(())
}

fn print_summary(metadata: &TorrentMetadata) {
    println!("name:          {}", metadata.name());
    println!("info hash:     {}", metadata.info_hash());
    println!("piece length:  {}", metadata.piece_length());
    println!("pieces:        {}", metadata.pieces_count());
    println!("total size:    {}", metadata.total_size());
    println!("files:         {}", metadata.files().len());
    if let Some(announce) = metadata.main_announce() {
        println!("announce:      {announce}");
    }
    for tracker in metadata.announce_list() {
        println!("tracker:       {tracker}");
    }
    if let Some(comment) = metadata.comment() {
        println!("comment:       {comment}");
    }
    if let Some(created_by) = metadata.created_by() {
        println!("created by:    {created_by}");
    }
    if let Some(date) = metadata.creation_date() {
        println!("creation date: {date}");
    }
}

fn print_files(metadata: &TorrentMetadata) {
    for file in metadata.files() {
        println!("{:>12}  {}", file.length(), file.path_string());
    }
}
