//! Orchestration: fetch, detect, extract, bind, and for set-level manifests
//! resolve every rendition through its stream-level manifest.

use tracing::{debug, warn};

use crate::binding;
use crate::document::ManifestDocument;
use crate::error::{Error, Result};
use crate::extract;
use crate::manifest::{DvrInfo, Manifest, Media};
use crate::merge;
use crate::networking::Downloader;
use crate::parsers::xml::{int_value, XmlDocument};
use crate::utils::urls;

/// Parses F4M manifests, fetching documents through a [`Downloader`].
pub struct ManifestParser<D> {
    downloader: D,
}

impl<D: Downloader> ManifestParser<D> {
    pub fn new(downloader: D) -> Self {
        ManifestParser { downloader }
    }

    /// Fetches and fully resolves the manifest at `url`.
    pub fn parse(&self, url: &str) -> Result<Manifest> {
        parse(&self.downloader, url)
    }

    /// Fetches a standalone `dvrInfo` document, as published next to live
    /// streams whose DVR window moves.
    pub fn update_dvr_info(&self, url: &str) -> Result<DvrInfo> {
        update_dvr_info(&self.downloader, url)
    }
}

pub(crate) fn parse<D: Downloader + ?Sized>(downloader: &D, url: &str) -> Result<Manifest> {
    let doc = load(downloader, url, false)?;
    let manifest = parse_document(&doc);

    if doc.grammar().is_set_level() {
        return Ok(resolve_set_level(downloader, manifest));
    }
    Ok(manifest)
}

fn parse_document(doc: &ManifestDocument) -> Manifest {
    let (manifest, records) = extract::extract(doc);
    binding::bind(manifest, &records, doc.grammar())
}

fn load<D: Downloader + ?Sized>(
    downloader: &D,
    url: &str,
    reached_through_href: bool,
) -> Result<ManifestDocument> {
    let body = fetch(downloader, url)?;
    let xml = XmlDocument::parse(&body)?;
    ManifestDocument::new(url, xml, reached_through_href)
}

fn fetch<D: Downloader + ?Sized>(downloader: &D, url: &str) -> Result<Vec<u8>> {
    if url.is_empty() {
        return Err(Error::EmptyUrl);
    }
    if !urls::has_http_scheme(url) {
        return Err(Error::UnsupportedScheme(url.to_string()));
    }

    let response = downloader.download(url).map_err(|source| Error::Download {
        url: url.to_string(),
        source,
    })?;

    if response.status != 200 {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status: response.status,
        });
    }
    if response.body.is_empty() {
        return Err(Error::EmptyBody {
            url: url.to_string(),
        });
    }

    Ok(response.body)
}

/// Replaces every set-level media carrying an `href` by the media of the
/// stream-level manifest it points to. Stream-level manifests are never
/// resolved further, whatever they contain.
fn resolve_set_level<D: Downloader + ?Sized>(downloader: &D, manifest: Manifest) -> Manifest {
    let mut profiles = vec![];

    let mut resolved = binding::map_medias(manifest, |media| {
        if media.href.is_empty() {
            return media;
        }
        match parse_stream_level(downloader, &media.href) {
            Ok((stream, stream_profiles)) => {
                profiles.extend(stream_profiles);
                merge::splice(&media, stream)
            }
            Err(e) => {
                warn!("keeping unresolved media {}: {}", media.href, e);
                media
            }
        }
    });

    resolved.profiles.extend(profiles);
    resolved
}

/// The single media of a stream-level manifest, with that manifest's
/// profiles.
fn parse_stream_level<D: Downloader + ?Sized>(
    downloader: &D,
    href: &str,
) -> Result<(Media, Vec<String>)> {
    debug!("resolving stream-level manifest {}", href);
    let doc = load(downloader, href, true)?;
    let mut manifest = parse_document(&doc);

    if manifest.medias.is_empty() {
        return Err(Error::EmptyStreamLevel {
            url: href.to_string(),
        });
    }
    let media = manifest.medias.swap_remove(0);
    Ok((media, manifest.profiles))
}

pub(crate) fn update_dvr_info<D: Downloader + ?Sized>(downloader: &D, url: &str) -> Result<DvrInfo> {
    let body = fetch(downloader, url)?;
    let xml = XmlDocument::parse(&body)?;

    let root = xml.root();
    if root.name() != "dvrInfo" {
        return Err(Error::UnexpectedRoot {
            expected: "dvrInfo",
            found: root.name().to_string(),
        });
    }

    // a standalone document's `url` is not read
    let mut dvr_info = DvrInfo::default();
    for (name, value) in root.attributes() {
        match name {
            "id" => dvr_info.id = value.to_string(),
            "beginOffset" => dvr_info.begin_offset = Some(int_value(name, value)),
            "endOffset" => dvr_info.end_offset = Some(int_value(name, value)),
            "windowDuration" => dvr_info.window_duration = Some(int_value(name, value)),
            "offline" => dvr_info.offline = true,
            other => debug!("dvrInfo attribute [{}] ignored", other),
        }
    }

    Ok(dvr_info)
}
