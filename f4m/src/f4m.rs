//! Parser for Adobe Flash Media Manifest (F4M) documents.
//!
//! A manifest is fetched through a [`Downloader`], its version and level are
//! detected, and the elements that version allows are extracted into a
//! [`Manifest`]. Auxiliary records (bootstrap info, DRM headers, DVR info,
//! cue info and so on) are bound onto media by id. A set-level manifest has
//! each rendition replaced by the media of the stream-level manifest it
//! references.
//!
//! ```no_run
//! use f4m::HttpDownloader;
//!
//! let downloader = HttpDownloader::new()?;
//! let manifest = f4m::parse_manifest(&downloader, "http://example.com/live.f4m")?;
//! for media in manifest.all_medias() {
//!     println!("{} kbps at {}", media.bitrate, media.url);
//! }
//! # Ok::<(), Box<dyn std::error::Error + Send + Sync>>(())
//! ```

pub mod binding;
pub mod document;
pub mod error;
pub mod extract;
pub mod grammar;
pub mod manifest;
pub mod merge;
pub mod networking;
pub mod parser;
pub mod parsers;
pub mod utils;

pub use error::{Error, Result};
pub use grammar::{Grammar, Level, Version};
pub use manifest::{
    AdaptiveSet, BestEffortFetchInfo, BootstrapInfo, Cue, DeliveryType, DrmAdditionalHeader,
    DvrInfo, Manifest, Media, MediaType, SmpteTimecode, StreamType,
};
pub use networking::{BoxError, Downloader, HttpConfig, HttpDownloader, Response};
pub use parser::ManifestParser;

/// Fetches and fully resolves the manifest at `url`.
pub fn parse_manifest<D: Downloader + ?Sized>(downloader: &D, url: &str) -> Result<Manifest> {
    parser::parse(downloader, url)
}

/// Fetches the standalone `dvrInfo` document at `url`.
pub fn update_dvr_info<D: Downloader + ?Sized>(downloader: &D, url: &str) -> Result<DvrInfo> {
    parser::update_dvr_info(downloader, url)
}
