use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use f4m::{BoxError, Downloader, HttpConfig, HttpDownloader, Manifest, Media};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Fetches an F4M manifest and lists what it offers.
#[derive(Parser, Debug)]
#[command(name = "f4m-inspect", version)]
struct Args {
    /// http(s) url of the manifest
    url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Print the parsed manifest as JSON
    #[arg(long)]
    json: bool,

    /// Download bootstrap info that is referenced by url instead of inlined
    #[arg(long)]
    fetch_bootstrap: bool,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), BoxError> {
    let downloader = HttpDownloader::with_config(HttpConfig {
        timeout: Duration::from_secs(args.timeout),
        ..HttpConfig::default()
    })?;

    let manifest = f4m::parse_manifest(&downloader, &args.url)?;
    info!("parsed {} with {} media", args.url, manifest.all_medias().count());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&manifest)?);
        return Ok(());
    }

    print_summary(&manifest);
    for (index, media) in manifest.all_medias().enumerate() {
        print_media(index, media);
        if args.fetch_bootstrap {
            fetch_bootstrap(&downloader, media);
        }
    }

    Ok(())
}

fn print_summary(manifest: &Manifest) {
    println!("id:            {}", manifest.id);
    if let Some(stream_type) = manifest.stream_type {
        println!("stream type:   {:?}", stream_type);
    }
    if let Some(delivery_type) = manifest.delivery_type {
        println!("delivery type: {:?}", delivery_type);
    }
    println!("duration:      {}", manifest.duration);
    println!("base url:      {}", manifest.base_url);
    if !manifest.profiles.is_empty() {
        println!("profiles:      {}", manifest.profiles.join(", "));
    }
}

fn print_media(index: usize, media: &Media) {
    println!();
    println!("media #{}", index);
    println!("  bitrate:   {}", media.bitrate);
    println!("  url:       {}", media.url);
    if let (Some(width), Some(height)) = (media.width, media.height) {
        println!("  size:      {}x{}", width, height);
    }
    if let Some(media_type) = media.media_type {
        println!("  type:      {}", media_type);
    }

    match &media.bootstrap_info {
        Some(bootstrap) if !bootstrap.data.is_empty() => {
            let prefix = &bootstrap.data[..bootstrap.data.len().min(16)];
            println!(
                "  bootstrap: {} bytes ({}...)",
                bootstrap.data.len(),
                hex::encode(prefix)
            );
        }
        Some(bootstrap) => println!("  bootstrap: at {}", bootstrap.url),
        None => println!("  bootstrap: none"),
    }

    if media.metadata.is_empty() {
        println!("  metadata:  none");
    } else {
        println!("  metadata:  {} bytes", media.metadata.len());
    }
    if let Some(dvr_info) = &media.dvr_info {
        println!(
            "  dvr:       window {:?}s, offline {}",
            dvr_info.window_duration, dvr_info.offline
        );
    }
}

fn fetch_bootstrap(downloader: &HttpDownloader, media: &Media) {
    let Some(bootstrap) = &media.bootstrap_info else {
        return;
    };
    if !bootstrap.data.is_empty() || bootstrap.url.is_empty() {
        return;
    }

    // already resolved against the manifest base url
    let url = &bootstrap.url;
    match downloader.download(url) {
        Ok(response) if response.status == 200 => {
            println!("  fetched:   {} bytes from {}", response.body.len(), url);
        }
        Ok(response) => warn!("bootstrap {} answered with status {}", url, response.status),
        Err(e) => warn!("bootstrap {} failed: {}", url, e),
    }
}
