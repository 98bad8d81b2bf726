//! Which parts of the F4M grammar apply to a document.
//!
//! Legality of an element or attribute depends on the format version and on the
//! manifest level. Both are plain values here, and every gate is a pure
//! function of them.

use std::fmt;

use serde::Serialize;

/// F4M format version of a manifest, as `major.minor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub const V1_0: Version = Version { major: 1, minor: 0 };
    pub const V2_0: Version = Version { major: 2, minor: 0 };
    pub const V3_0: Version = Version { major: 3, minor: 0 };

    /// Parses `<major>.<minor>`, as found in a namespace suffix (`2.0`) or a
    /// `version` attribute (`3.0`).
    pub fn parse(value: &str) -> Option<Version> {
        let (major, minor) = value.trim().split_once('.')?;
        Some(Version {
            major: major.parse().ok()?,
            minor: minor.parse().ok()?,
        })
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::V1_0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Level {
    /// A single-level manifest carrying everything.
    SingleLevel,
    /// A multi-level set-level manifest, referencing renditions by `href`.
    SetLevel,
    /// A multi-level stream-level manifest, reached through a parent `href`.
    StreamLevel,
}

impl Level {
    pub fn detect(reached_through_href: bool, version: Version, has_href_media: bool) -> Level {
        if reached_through_href {
            Level::StreamLevel
        } else if version.major < 2 || !has_href_media {
            Level::SingleLevel
        } else {
            Level::SetLevel
        }
    }
}

/// The media `type` values a manifest may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MediaType {
    #[serde(rename = "audio")]
    Audio,
    #[serde(rename = "audio+video")]
    AudioVideo,
    #[serde(rename = "data")]
    Data,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "video-keyframe-only")]
    VideoKeyframeOnly,
}

impl MediaType {
    pub fn parse(value: &str, version: Version) -> Option<MediaType> {
        match value {
            "audio" => Some(MediaType::Audio),
            "audio+video" => Some(MediaType::AudioVideo),
            "data" => Some(MediaType::Data),
            "text" => Some(MediaType::Text),
            "video" => Some(MediaType::Video),
            "video-keyframe-only" if version.major >= 3 => Some(MediaType::VideoKeyframeOnly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Audio => "audio",
            MediaType::AudioVideo => "audio+video",
            MediaType::Data => "data",
            MediaType::Text => "text",
            MediaType::Video => "video",
            MediaType::VideoKeyframeOnly => "video-keyframe-only",
        }
    }

    /// Whether a `videoCodec` makes sense for this type.
    pub fn carries_video(&self) -> bool {
        matches!(
            self,
            MediaType::Video | MediaType::AudioVideo | MediaType::VideoKeyframeOnly
        )
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StreamType {
    #[serde(rename = "live")]
    Live,
    #[serde(rename = "recorded")]
    Recorded,
    #[serde(rename = "liveOrRecorded")]
    LiveOrRecorded,
}

impl StreamType {
    pub fn parse(value: &str) -> Option<StreamType> {
        match value {
            "live" => Some(StreamType::Live),
            "recorded" => Some(StreamType::Recorded),
            "liveOrRecorded" => Some(StreamType::LiveOrRecorded),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeliveryType {
    #[serde(rename = "streaming")]
    Streaming,
    #[serde(rename = "progressive")]
    Progressive,
}

impl DeliveryType {
    pub fn parse(value: &str) -> Option<DeliveryType> {
        match value {
            "streaming" => Some(DeliveryType::Streaming),
            "progressive" => Some(DeliveryType::Progressive),
            _ => None,
        }
    }
}

/// Version and level of one document, with the gates derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grammar {
    pub version: Version,
    pub level: Level,
}

impl Grammar {
    pub fn new(version: Version, level: Level) -> Self {
        Grammar { version, level }
    }

    pub fn major(&self) -> u32 {
        self.version.major
    }

    pub fn is_set_level(&self) -> bool {
        self.level == Level::SetLevel
    }

    /// Single-level manifests are stream level too: they carry playback data.
    pub fn is_stream_level(&self) -> bool {
        matches!(self.level, Level::SingleLevel | Level::StreamLevel)
    }

    pub fn is_single_level(&self) -> bool {
        self.level == Level::SingleLevel
    }

    /// A document fetched through a set-level `href`.
    pub fn is_multi_level_stream_level(&self) -> bool {
        self.level == Level::StreamLevel
    }

    pub fn reads_profiles(&self) -> bool {
        self.major() >= 2
    }

    pub fn reads_adaptive_sets(&self) -> bool {
        self.major() >= 3 && !self.is_multi_level_stream_level()
    }

    pub fn reads_dvr_info(&self) -> bool {
        !self.is_multi_level_stream_level()
    }

    pub fn reads_bootstrap_info(&self) -> bool {
        !self.is_set_level()
    }

    pub fn reads_drm_additional_headers(&self) -> bool {
        !self.is_set_level()
    }

    pub fn reads_drm_additional_header_sets(&self) -> bool {
        self.major() >= 3 && !self.is_set_level()
    }

    pub fn reads_smpte_timecodes(&self) -> bool {
        self.major() >= 3 && !self.is_set_level()
    }

    pub fn reads_cue_infos(&self) -> bool {
        self.major() >= 3 && !self.is_set_level()
    }

    pub fn reads_best_effort_fetch_info(&self) -> bool {
        self.major() >= 3 && self.is_set_level()
    }

    /// From 2.0 on, `dvrInfo` carries no usable id and applies to every media.
    pub fn binds_dvr_info_unconditionally(&self) -> bool {
        self.major() >= 2
    }

    /// At most one media is taken from a document reached through `href`.
    pub fn takes_single_media(&self) -> bool {
        self.is_multi_level_stream_level()
    }

    pub fn accepts_media_attribute(&self, name: &str) -> bool {
        match name {
            "dvrInfoId" => self.major() == 1,
            "href" => self.major() >= 2,
            "audioCodec" | "videoCodec" | "cueInfoId" | "bestEffortFetchInfoId"
            | "drmAdditionalHeaderSetId" => self.major() >= 3,
            // these belong to the set-level parent and are spliced in later
            "bitrate" | "streamId" | "width" | "height" | "type" | "alternate" | "label"
            | "lang" => !self.is_multi_level_stream_level(),
            "url" | "bootstrapInfoId" | "drmAdditionalHeaderId" | "groupspec"
            | "multicastStreamName" => true,
            _ => false,
        }
    }

    pub fn accepts_media_child(&self, name: &str) -> bool {
        match name {
            "moov" | "xmpMetadata" => self.major() == 1,
            "metadata" => true,
            _ => false,
        }
    }

    pub fn accepts_dvr_info_attribute(&self, name: &str) -> bool {
        match name {
            "id" | "beginOffset" | "endOffset" => self.major() == 1,
            "windowDuration" => self.major() >= 2,
            "url" | "offline" => true,
            _ => false,
        }
    }

    pub fn accepts_bootstrap_info_attribute(&self, name: &str) -> bool {
        match name {
            "fragmentDuration" | "segmentDuration" => self.major() >= 3,
            "profile" | "id" | "url" => true,
            _ => false,
        }
    }
}
