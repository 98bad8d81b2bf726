use serde::Serialize;

pub use crate::grammar::{DeliveryType, MediaType, StreamType};

/// A fully resolved manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    /// In seconds. Usually zero for live content.
    pub duration: f64,
    pub start_time: String,
    pub mime_type: String,
    pub stream_type: Option<StreamType>,
    pub delivery_type: Option<DeliveryType>,
    pub label: String,
    pub lang: String,
    /// Base for every relative url in the manifest.
    #[serde(rename = "baseURL")]
    pub base_url: String,
    pub profiles: Vec<String>,
    /// Renditions declared directly under the manifest.
    pub medias: Vec<Media>,
    /// Renditions grouped by `adaptiveSet` (3.0).
    pub adaptive_sets: Vec<AdaptiveSet>,
}

impl Manifest {
    /// Every media in the manifest, top-level ones first, then each adaptive
    /// set in order.
    pub fn all_medias(&self) -> impl Iterator<Item = &Media> {
        self.medias
            .iter()
            .chain(self.adaptive_sets.iter().flat_map(|set| set.medias.iter()))
    }
}

/// One playable rendition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    /// In kbps, as written in the manifest.
    pub bitrate: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub stream_id: String,
    pub url: String,
    /// Reference to a stream-level manifest. Only left set when that manifest
    /// could not be resolved.
    pub href: String,
    #[serde(serialize_with = "hex::serialize")]
    pub metadata: Vec<u8>,
    #[serde(serialize_with = "hex::serialize")]
    pub xmp_metadata: Vec<u8>,
    #[serde(serialize_with = "hex::serialize")]
    pub moov: Vec<u8>,

    pub bootstrap_info_id: String,
    pub bootstrap_info: Option<BootstrapInfo>,
    pub drm_additional_header_id: String,
    pub drm_additional_header: Option<DrmAdditionalHeader>,
    pub drm_additional_header_set_id: String,
    pub drm_additional_header_set: Option<Vec<DrmAdditionalHeader>>,
    pub dvr_info_id: String,
    pub dvr_info: Option<DvrInfo>,
    pub cue_info_id: String,
    pub cue_info: Option<Vec<Cue>>,
    pub best_effort_fetch_info_id: String,
    pub best_effort_fetch_info: Option<BestEffortFetchInfo>,

    pub alternate: bool,
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    pub label: String,
    pub lang: String,
    pub groupspec: String,
    pub multicast_stream_name: String,
    pub audio_codec: String,
    pub video_codec: String,
    pub smpte_time_codes: Vec<SmpteTimecode>,
}

/// A group of alternate renditions sharing defaults (3.0).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveSet {
    pub alternate: bool,
    pub label: String,
    pub lang: String,
    pub audio_codec: String,
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    pub medias: Vec<Media>,
}

/// What a player needs to bootstrap fragmented playback.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapInfo {
    pub id: String,
    /// Usually `named`.
    pub profile: String,
    pub url: String,
    #[serde(serialize_with = "hex::serialize")]
    pub data: Vec<u8>,
    pub fragment_duration: Option<f64>,
    pub segment_duration: Option<f64>,
}

impl BootstrapInfo {
    pub fn has_fetch_durations(&self) -> bool {
        self.fragment_duration.is_some() || self.segment_duration.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrmAdditionalHeader {
    pub id: String,
    pub url: String,
    #[serde(serialize_with = "hex::serialize")]
    pub data: Vec<u8>,
    pub drm_content_id: String,
    /// Only inside a `drmAdditionalHeaderSet`.
    pub prefetch_deadline: Option<f64>,
    /// Only inside a `drmAdditionalHeaderSet`.
    pub start_timestamp: Option<f64>,
}

/// How far back into a live stream a viewer may seek.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DvrInfo {
    pub id: String,
    pub begin_offset: Option<i32>,
    pub end_offset: Option<i32>,
    pub offline: bool,
    pub url: String,
    pub window_duration: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cue {
    pub avail_num: Option<i32>,
    pub avails_expected: Option<i32>,
    pub duration: f64,
    pub id: String,
    pub time: f64,
    /// Always `spliceOut`.
    #[serde(rename = "type")]
    pub cue_type: String,
    pub program_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmpteTimecode {
    pub smpte: String,
    /// In seconds.
    pub timestamp: f64,
    pub date: String,
    pub timezone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestEffortFetchInfo {
    pub id: String,
    pub fragment_duration: Option<f64>,
    pub segment_duration: Option<f64>,
}
