//! Splicing a stream-level media into the slot of its set-level media.

use crate::binding::accepts_best_effort;
use crate::manifest::Media;

/// Builds the resolved media from the set-level entry that referenced a
/// stream-level manifest and the single media that manifest declared.
///
/// The set-level manifest is authoritative for presentation facts: dimensions
/// and `alternate` are always copied, and `type`, `label`, `lang`, `bitrate`
/// and `streamId` come from the set level even when they are empty there.
/// DVR info only lives at the set level.
pub fn splice(set_level: &Media, mut stream: Media) -> Media {
    stream.width = set_level.width;
    stream.height = set_level.height;
    stream.alternate = set_level.alternate;

    stream.media_type = set_level.media_type;
    stream.label = set_level.label.clone();
    stream.lang = set_level.lang.clone();
    stream.bitrate = set_level.bitrate.clone();
    stream.stream_id = set_level.stream_id.clone();

    stream.dvr_info = set_level.dvr_info.clone();

    if stream.audio_codec.is_empty() {
        stream.audio_codec = set_level.audio_codec.clone();
    }
    if stream.video_codec.is_empty() {
        stream.video_codec = set_level.video_codec.clone();
    }
    if stream.best_effort_fetch_info_id.is_empty() {
        stream.best_effort_fetch_info_id = set_level.best_effort_fetch_info_id.clone();
    }
    if set_level.best_effort_fetch_info.is_some() && accepts_best_effort(&stream) {
        stream.best_effort_fetch_info = set_level.best_effort_fetch_info.clone();
    }

    stream.href.clear();
    stream
}
