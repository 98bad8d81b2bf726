//! Element extraction: maps the elements of one manifest document onto
//! records, applying the version and level gates of its [`Grammar`].
//!
//! Media are collected into the manifest skeleton; manifest-scope auxiliary
//! elements (bootstrap info, DRM headers, DVR info, ...) are collected into
//! [`ScopeRecords`] and broadcast onto the media afterwards by
//! [`crate::binding`].

use tracing::{debug, warn};

use crate::binding::{CueInfo, DrmAdditionalHeaderSet, ScopeRecords};
use crate::document::ManifestDocument;
use crate::grammar::{DeliveryType, Grammar, MediaType, StreamType};
use crate::manifest::{
    AdaptiveSet, BestEffortFetchInfo, BootstrapInfo, Cue, DrmAdditionalHeader, DvrInfo,
    Manifest, Media, SmpteTimecode,
};
use crate::parsers::encoding::decode_base64;
use crate::parsers::xml::{float_value, int_value, Element};
use crate::utils::urls;

/// Extracts the manifest and its scope records from one document.
pub fn extract(doc: &ManifestDocument) -> (Manifest, ScopeRecords) {
    let mut manifest = manifest_scope(doc);
    let extractor = Extractor {
        doc,
        grammar: doc.grammar(),
        base_url: manifest.base_url.clone(),
    };

    manifest.medias = extractor.medias();
    if extractor.grammar.reads_adaptive_sets() {
        manifest.adaptive_sets = extractor.adaptive_sets();
    }

    (manifest, extractor.scope_records())
}

/// Profiles and the scalar children of `manifest`.
fn manifest_scope(doc: &ManifestDocument) -> Manifest {
    let mut manifest = Manifest::default();

    if doc.grammar().reads_profiles() {
        if let Some(profiles) = doc.root().attribute("profile") {
            manifest.profiles = profiles.split_whitespace().map(str::to_string).collect();
        }
    }

    let mut stream_type = String::new();
    let mut delivery_type = String::new();

    for element in doc.scope_elements() {
        let text = element.text();
        match element.local_name() {
            "baseURL" => manifest.base_url = text.to_string(),
            "startTime" => manifest.start_time = text.to_string(),
            "mimeType" => manifest.mime_type = text.to_string(),
            "streamType" => stream_type = text.to_string(),
            "deliveryType" => delivery_type = text.to_string(),
            "label" => manifest.label = text.to_string(),
            "id" => manifest.id = text.to_string(),
            "lang" => manifest.lang = text.to_string(),
            "duration" => manifest.duration = float_value("duration", text),
            "media" | "bootstrapInfo" | "dvrInfo" | "drmAdditionalHeader" | "smpteTimecodes"
            | "cueInfo" | "bestEffortFetchInfo" | "drmAdditionalHeaderSet" | "adaptiveSet" => {}
            other => debug!("manifest element [{}] ignored", other),
        }
    }

    if !stream_type.is_empty() {
        manifest.stream_type = StreamType::parse(&stream_type);
        if manifest.stream_type.is_none() {
            warn!("streamType {:?} is invalid, clearing it", stream_type);
        }
    }

    if !delivery_type.is_empty() {
        manifest.delivery_type = DeliveryType::parse(&delivery_type);
        if manifest.delivery_type.is_none() {
            warn!("deliveryType {:?} is invalid, clearing it", delivery_type);
        }
    }

    if manifest.base_url.is_empty() {
        manifest.base_url = urls::base_url_of(doc.url());
    }

    manifest
}

struct Extractor<'a> {
    doc: &'a ManifestDocument,
    grammar: Grammar,
    base_url: String,
}

impl Extractor<'_> {
    fn resolve(&self, url: &str) -> String {
        urls::resolve(&self.base_url, url)
    }

    fn medias(&self) -> Vec<Media> {
        let mut medias = vec![];
        for element in self.doc.elements("media") {
            if let Some(media) = self.media(element, Media::default()) {
                medias.push(media);
                if self.grammar.takes_single_media() {
                    break;
                }
            }
        }
        medias
    }

    /// Reads one `media` element on top of `media`, which carries any
    /// defaults inherited from an enclosing adaptive set. Returns `None` when
    /// the element is unusable.
    fn media(&self, element: &Element, mut media: Media) -> Option<Media> {
        for (name, value) in element.attributes() {
            if !self.grammar.accepts_media_attribute(name) {
                debug!("media attribute [{}] ignored", name);
                continue;
            }

            match name {
                "dvrInfoId" => media.dvr_info_id = value.to_string(),
                "href" => media.href = self.resolve(value),
                "audioCodec" => media.audio_codec = value.to_string(),
                "videoCodec" => media.video_codec = value.to_string(),
                "cueInfoId" => media.cue_info_id = value.to_string(),
                "bestEffortFetchInfoId" => media.best_effort_fetch_info_id = value.to_string(),
                "drmAdditionalHeaderSetId" => {
                    media.drm_additional_header_set_id = value.to_string()
                }
                "bitrate" => media.bitrate = value.to_string(),
                "streamId" => media.stream_id = value.to_string(),
                "width" => media.width = Some(int_value(name, value)),
                "height" => media.height = Some(int_value(name, value)),
                "type" => {
                    media.media_type = MediaType::parse(value, self.grammar.version);
                    if media.media_type.is_none() {
                        warn!("invalid media type {:?}, clearing it", value);
                    }
                }
                "alternate" => media.alternate = true,
                "label" => media.label = value.to_string(),
                "lang" => media.lang = value.to_string(),
                "url" => media.url = self.resolve(value),
                "bootstrapInfoId" => media.bootstrap_info_id = value.to_string(),
                "drmAdditionalHeaderId" => media.drm_additional_header_id = value.to_string(),
                "groupspec" => media.groupspec = value.to_string(),
                "multicastStreamName" => media.multicast_stream_name = value.to_string(),
                _ => {}
            }
        }

        for child in element.children() {
            if !child.namespace_starts_with(crate::document::F4M_NAMESPACE_BASE) {
                continue;
            }
            let name = child.local_name();
            if !self.grammar.accepts_media_child(name) {
                continue;
            }
            match name {
                "moov" => media.moov = decode_base64(child.text()),
                "xmpMetadata" => media.xmp_metadata = decode_base64(child.text()),
                "metadata" => media.metadata = decode_base64(child.text()),
                _ => {}
            }
        }

        if !media.groupspec.is_empty() || !media.multicast_stream_name.is_empty() {
            let paired = !media.groupspec.is_empty() && !media.multicast_stream_name.is_empty();
            if !paired || !urls::has_rtmfp_scheme(&media.url) {
                warn!(
                    "dropping multicast media {:?}: needs both multicast attributes and an rtmfp url",
                    media.url
                );
                return None;
            }
        }

        if self.grammar.major() >= 3 {
            if let Some(media_type) = media.media_type {
                if !media.video_codec.is_empty() && !media_type.carries_video() {
                    warn!(
                        "videoCodec {} present on media of type {}, clearing it",
                        media.video_codec, media_type
                    );
                    media.video_codec.clear();
                }
            }
            if !media.drm_additional_header_id.is_empty()
                && !media.drm_additional_header_set_id.is_empty()
            {
                debug!("media has both drmAdditionalHeaderId and drmAdditionalHeaderSetId");
            }
        }

        self.report_misplaced_attributes(&media);
        Some(media)
    }

    fn report_misplaced_attributes(&self, media: &Media) {
        if self.grammar.is_set_level() {
            let stream_only = [
                ("bootstrapInfoId", &media.bootstrap_info_id),
                ("drmAdditionalHeaderId", &media.drm_additional_header_id),
                ("url", &media.url),
                ("cueInfoId", &media.cue_info_id),
                ("drmAdditionalHeaderSetId", &media.drm_additional_header_set_id),
            ];
            for (name, value) in stream_only {
                if !value.is_empty() {
                    debug!("{} present in a set-level manifest", name);
                }
            }
        }

        if self.grammar.is_multi_level_stream_level() {
            let set_only = [
                ("href", &media.href),
                ("audioCodec", &media.audio_codec),
                ("videoCodec", &media.video_codec),
                ("bestEffortFetchInfoId", &media.best_effort_fetch_info_id),
            ];
            for (name, value) in set_only {
                if !value.is_empty() {
                    debug!("{} present in a stream-level manifest", name);
                }
            }
        }
    }

    fn adaptive_sets(&self) -> Vec<AdaptiveSet> {
        self.doc
            .elements("adaptiveSet")
            .map(|element| self.adaptive_set(element))
            .collect()
    }

    fn adaptive_set(&self, element: &Element) -> AdaptiveSet {
        let mut set = AdaptiveSet::default();

        for (name, value) in element.attributes() {
            match name {
                "alternate" => set.alternate = true,
                "label" => set.label = value.to_string(),
                "lang" => set.lang = value.to_string(),
                "audioCodec" => set.audio_codec = value.to_string(),
                "type" => {
                    set.media_type = MediaType::parse(value, self.grammar.version);
                    if set.media_type.is_none() {
                        warn!("invalid adaptiveSet type {:?}", value);
                    }
                }
                other => debug!("adaptiveSet attribute [{}] ignored", other),
            }
        }

        let defaults = Media {
            alternate: set.alternate,
            label: set.label.clone(),
            lang: set.lang.clone(),
            audio_codec: set.audio_codec.clone(),
            media_type: set.media_type,
            ..Media::default()
        };

        for child in element.children() {
            if !ManifestDocument::in_f4m_namespace(child, "media") {
                debug!("adaptiveSet child [{}] ignored", child.name());
                continue;
            }
            if let Some(media) = self.media(child, defaults.clone()) {
                set.medias.push(media);
            }
        }

        set
    }

    fn scope_records(&self) -> ScopeRecords {
        let grammar = self.grammar;
        let mut records = ScopeRecords::default();

        if grammar.reads_dvr_info() {
            records.dvr_infos = self.doc.elements("dvrInfo").map(|e| self.dvr_info(e)).collect();
        }
        if grammar.reads_drm_additional_headers() {
            records.drm_additional_headers = self
                .doc
                .elements("drmAdditionalHeader")
                .filter_map(|e| self.drm_additional_header(e, false))
                .collect();
        }
        if grammar.reads_bootstrap_info() {
            records.bootstrap_infos = self
                .doc
                .elements("bootstrapInfo")
                .filter_map(|e| self.bootstrap_info(e))
                .collect();
        }
        if grammar.reads_smpte_timecodes() {
            records.smpte_timecodes = self.smpte_timecodes();
        }
        if grammar.reads_cue_infos() {
            records.cue_infos = self.doc.elements("cueInfo").filter_map(|e| self.cue_info(e)).collect();
        }
        if grammar.reads_drm_additional_header_sets() {
            records.drm_additional_header_sets = self
                .doc
                .elements("drmAdditionalHeaderSet")
                .map(|e| self.drm_additional_header_set(e))
                .collect();
        }
        if grammar.reads_best_effort_fetch_info() {
            records.best_effort_fetch_infos = self.best_effort_fetch_infos();
        }

        records
    }

    fn dvr_info(&self, element: &Element) -> DvrInfo {
        let mut dvr_info = DvrInfo::default();

        for (name, value) in element.attributes() {
            if !self.grammar.accepts_dvr_info_attribute(name) {
                debug!("dvrInfo attribute [{}] ignored", name);
                continue;
            }
            match name {
                "id" => dvr_info.id = value.to_string(),
                "beginOffset" => dvr_info.begin_offset = Some(int_value(name, value)),
                "endOffset" => dvr_info.end_offset = Some(int_value(name, value)),
                "windowDuration" => dvr_info.window_duration = Some(int_value(name, value)),
                "url" => dvr_info.url = self.resolve(value),
                "offline" => dvr_info.offline = true,
                _ => {}
            }
        }

        dvr_info
    }

    /// `url` or inline base64 data is required; headers with neither are
    /// dropped. The prefetch fields only exist inside a header set.
    fn drm_additional_header(&self, element: &Element, in_set: bool) -> Option<DrmAdditionalHeader> {
        let mut header = DrmAdditionalHeader::default();

        for (name, value) in element.attributes() {
            match name {
                "id" => header.id = value.to_string(),
                "url" => header.url = self.resolve(value),
                "drmContentId" => header.drm_content_id = value.to_string(),
                "prefetchDeadline" if in_set => {
                    header.prefetch_deadline = Some(float_value(name, value))
                }
                "startTimestamp" if in_set => header.start_timestamp = Some(float_value(name, value)),
                other => debug!("drmAdditionalHeader attribute [{}] ignored", other),
            }
        }

        if header.url.is_empty() {
            header.data = decode_base64(element.text());
            if header.data.is_empty() {
                warn!("dropping drmAdditionalHeader {:?}: no url and no data", header.id);
                return None;
            }
        }

        Some(header)
    }

    fn bootstrap_info(&self, element: &Element) -> Option<BootstrapInfo> {
        let mut info = BootstrapInfo::default();

        for (name, value) in element.attributes() {
            if !self.grammar.accepts_bootstrap_info_attribute(name) {
                debug!("bootstrapInfo attribute [{}] ignored", name);
                continue;
            }
            match name {
                "profile" => info.profile = value.to_string(),
                "id" => info.id = value.to_string(),
                "url" => info.url = self.resolve(value),
                "fragmentDuration" => info.fragment_duration = Some(float_value(name, value)),
                "segmentDuration" => info.segment_duration = Some(float_value(name, value)),
                _ => {}
            }
        }

        if info.profile.is_empty() {
            warn!("dropping bootstrapInfo {:?}: no profile", info.id);
            return None;
        }

        if info.url.is_empty() {
            info.data = decode_base64(element.text());
            if info.data.is_empty() {
                warn!("dropping bootstrapInfo {:?}: no url and no data", info.id);
                return None;
            }
        }

        Some(info)
    }

    fn smpte_timecodes(&self) -> Vec<SmpteTimecode> {
        let namespace = self.doc.namespace();
        let mut timecodes = vec![];

        for group in self.doc.elements("smpteTimecodes") {
            for element in group.children_in("smpteTimecode", namespace) {
                let mut timecode = SmpteTimecode::default();
                let mut timestamp = None;

                for (name, value) in element.attributes() {
                    match name {
                        "timestamp" => timestamp = Some(float_value(name, value)),
                        "smpte" => timecode.smpte = value.to_string(),
                        "date" => timecode.date = value.to_string(),
                        "timezone" => timecode.timezone = value.to_string(),
                        other => debug!("smpteTimecode attribute [{}] ignored", other),
                    }
                }

                match timestamp {
                    Some(timestamp) if timestamp >= 0.0 && !timecode.smpte.is_empty() => {
                        timecode.timestamp = timestamp;
                        timecodes.push(timecode);
                    }
                    _ => warn!("dropping malformed smpteTimecode {:?}", timecode.smpte),
                }
            }
        }

        timecodes
    }

    fn cue_info(&self, element: &Element) -> Option<CueInfo> {
        let id = element.attribute("id").unwrap_or_default().to_string();
        if id.is_empty() {
            warn!("dropping cueInfo without id");
            return None;
        }

        let cues: Vec<Cue> = element
            .children()
            .filter(|child| ManifestDocument::in_f4m_namespace(child, "cue"))
            .filter_map(|child| self.cue(child))
            .collect();

        if cues.is_empty() {
            warn!("dropping cueInfo {:?}: no valid cue", id);
            return None;
        }

        Some(CueInfo { id, cues })
    }

    fn cue(&self, element: &Element) -> Option<Cue> {
        let mut cue = Cue::default();
        let mut duration = None;
        let mut time = None;

        for (name, value) in element.attributes() {
            match name {
                "availNum" => cue.avail_num = Some(int_value(name, value)),
                "availsExpected" => cue.avails_expected = Some(int_value(name, value)),
                "duration" => duration = Some(float_value(name, value)),
                "id" => cue.id = value.to_string(),
                "time" => time = Some(float_value(name, value)),
                "type" => cue.cue_type = value.to_string(),
                "programId" => cue.program_id = value.to_string(),
                other => debug!("cue attribute [{}] ignored", other),
            }
        }

        match (duration, time) {
            (Some(duration), Some(time))
                if duration >= 0.0
                    && time >= 0.0
                    && !cue.id.is_empty()
                    && cue.cue_type == "spliceOut" =>
            {
                cue.duration = duration;
                cue.time = time;
                Some(cue)
            }
            _ => {
                warn!("dropping malformed cue {:?}", cue.id);
                None
            }
        }
    }

    fn best_effort_fetch_infos(&self) -> Vec<BestEffortFetchInfo> {
        let infos: Vec<BestEffortFetchInfo> = self
            .doc
            .elements("bestEffortFetchInfo")
            .map(|element| {
                let mut info = BestEffortFetchInfo::default();
                for (name, value) in element.attributes() {
                    match name {
                        "id" => info.id = value.to_string(),
                        "fragmentDuration" => {
                            info.fragment_duration = Some(float_value(name, value))
                        }
                        "segmentDuration" => info.segment_duration = Some(float_value(name, value)),
                        other => debug!("bestEffortFetchInfo attribute [{}] ignored", other),
                    }
                }
                info
            })
            .collect();

        if infos.len() > 1 && infos.iter().any(|info| info.id.is_empty()) {
            debug!("several bestEffortFetchInfo elements, some without id");
        }

        infos
    }

    fn drm_additional_header_set(&self, element: &Element) -> DrmAdditionalHeaderSet {
        let id = element.attribute("id").unwrap_or_default().to_string();
        let headers = element
            .children()
            .filter(|child| ManifestDocument::in_f4m_namespace(child, "drmAdditionalHeader"))
            .filter_map(|child| self.drm_additional_header(child, true))
            .collect();

        DrmAdditionalHeaderSet { id, headers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::xml::XmlDocument;

    const URL: &str = "http://example.com/vod/show.f4m";

    fn extract_xml(xml: &str, reached_through_href: bool) -> (Manifest, ScopeRecords) {
        let xml = XmlDocument::parse(xml.as_bytes()).unwrap();
        let doc = ManifestDocument::new(URL, xml, reached_through_href).unwrap();
        extract(&doc)
    }

    #[test]
    fn reads_manifest_scalars() {
        let (manifest, _) = extract_xml(
            r#"<manifest xmlns="http://ns.adobe.com/f4m/1.0">
                <id>show</id>
                <duration>12.5</duration>
                <mimeType>video/mp4</mimeType>
                <streamType>recorded</streamType>
                <deliveryType>carrier-pigeon</deliveryType>
            </manifest>"#,
            false,
        );

        assert_eq!(manifest.id, "show");
        assert_eq!(manifest.duration, 12.5);
        assert_eq!(manifest.mime_type, "video/mp4");
        assert_eq!(manifest.stream_type, Some(StreamType::Recorded));
        assert_eq!(manifest.delivery_type, None);
        assert_eq!(manifest.base_url, "http://example.com/vod");
    }

    #[test]
    fn relative_urls_use_base_url() {
        let (manifest, records) = extract_xml(
            r#"<manifest xmlns="http://ns.adobe.com/f4m/1.0">
                <baseURL>http://cdn.example.com/show</baseURL>
                <bootstrapInfo profile="named" url="show.bootstrap"/>
                <media url="low" bitrate="300"/>
                <media url="rtmp://live.example.com/high" bitrate="900"/>
            </manifest>"#,
            false,
        );

        assert_eq!(manifest.medias[0].url, "http://cdn.example.com/show/low");
        assert_eq!(manifest.medias[1].url, "rtmp://live.example.com/high");
        assert_eq!(records.bootstrap_infos[0].url, "http://cdn.example.com/show/show.bootstrap");
    }

    #[test]
    fn version_one_ignores_later_attributes() {
        let (manifest, _) = extract_xml(
            r#"<manifest xmlns="http://ns.adobe.com/f4m/1.0">
                <media url="a" href="b.f4m" videoCodec="avc1" dvrInfoId="dvr"/>
            </manifest>"#,
            false,
        );

        let media = &manifest.medias[0];
        assert!(media.href.is_empty());
        assert!(media.video_codec.is_empty());
        assert_eq!(media.dvr_info_id, "dvr");
    }

    #[test]
    fn version_one_reads_moov_and_xmp_metadata() {
        let (manifest, _) = extract_xml(
            r#"<manifest xmlns="http://ns.adobe.com/f4m/1.0">
                <media url="a">
                    <metadata>AQID</metadata>
                    <moov>BAU=</moov>
                    <xmpMetadata>Bg==</xmpMetadata>
                </media>
            </manifest>"#,
            false,
        );

        let media = &manifest.medias[0];
        assert_eq!(media.metadata, vec![1, 2, 3]);
        assert_eq!(media.moov, vec![4, 5]);
        assert_eq!(media.xmp_metadata, vec![6]);
    }

    #[test]
    fn version_two_drops_moov() {
        let (manifest, _) = extract_xml(
            r#"<manifest xmlns="http://ns.adobe.com/f4m/2.0">
                <media url="a"><moov>BAU=</moov></media>
            </manifest>"#,
            false,
        );
        assert!(manifest.medias[0].moov.is_empty());
    }

    #[test]
    fn multicast_media_needs_both_attributes_and_rtmfp() {
        let (manifest, _) = extract_xml(
            r#"<manifest xmlns="http://ns.adobe.com/f4m/1.0">
                <media url="http://example.com/a" bitrate="1"/>
                <media url="rtmfp://example.com/b" groupspec="g" bitrate="2"/>
                <media url="rtmfp://example.com/c" groupspec="g" multicastStreamName="s" bitrate="3"/>
                <media url="http://example.com/d" groupspec="g" multicastStreamName="s" bitrate="4"/>
            </manifest>"#,
            false,
        );

        let bitrates: Vec<_> = manifest.medias.iter().map(|m| m.bitrate.as_str()).collect();
        assert_eq!(bitrates, vec!["1", "3"]);
    }

    #[test]
    fn version_three_clears_video_codec_on_audio() {
        let (manifest, _) = extract_xml(
            r#"<manifest xmlns="http://ns.adobe.com/f4m/3.0">
                <media url="a" type="audio" audioCodec="mp4a" videoCodec="avc1"/>
                <media url="b" type="video" videoCodec="avc1"/>
            </manifest>"#,
            false,
        );

        assert!(manifest.medias[0].video_codec.is_empty());
        assert_eq!(manifest.medias[0].audio_codec, "mp4a");
        assert_eq!(manifest.medias[1].video_codec, "avc1");
    }

    #[test]
    fn invalid_media_type_is_cleared() {
        let (manifest, _) = extract_xml(
            r#"<manifest xmlns="http://ns.adobe.com/f4m/2.0">
                <media url="a" type="video-keyframe-only"/>
                <media url="b" type="hologram"/>
                <media url="c" type="video"/>
            </manifest>"#,
            false,
        );

        let types: Vec<_> = manifest.medias.iter().map(|m| m.media_type).collect();
        assert_eq!(types, vec![None, None, Some(MediaType::Video)]);
    }

    #[test]
    fn stream_level_keeps_first_media_and_skips_set_facts() {
        let (manifest, _) = extract_xml(
            r#"<manifest xmlns="http://ns.adobe.com/f4m/2.0">
                <media url="first" bitrate="800" width="640" type="video"/>
                <media url="second"/>
            </manifest>"#,
            true,
        );

        assert_eq!(manifest.medias.len(), 1);
        let media = &manifest.medias[0];
        assert_eq!(media.url, "http://example.com/vod/first");
        assert!(media.bitrate.is_empty());
        assert_eq!(media.width, None);
        assert_eq!(media.media_type, None);
    }

    #[test]
    fn adaptive_sets_pass_defaults_to_their_media() {
        let (manifest, _) = extract_xml(
            r#"<manifest xmlns="http://ns.adobe.com/f4m/3.0">
                <adaptiveSet alternate="true" label="Director" lang="fr" audioCodec="mp4a" type="audio">
                    <media url="a1"/>
                    <media url="a2" lang="en" label="English"/>
                </adaptiveSet>
            </manifest>"#,
            false,
        );

        assert!(manifest.medias.is_empty());
        let set = &manifest.adaptive_sets[0];
        assert_eq!(set.medias.len(), 2);

        let first = &set.medias[0];
        assert!(first.alternate);
        assert_eq!(first.label, "Director");
        assert_eq!(first.lang, "fr");
        assert_eq!(first.audio_codec, "mp4a");
        assert_eq!(first.media_type, Some(MediaType::Audio));

        let second = &set.medias[1];
        assert_eq!(second.label, "English");
        assert_eq!(second.lang, "en");
    }

    #[test]
    fn adaptive_sets_need_version_three() {
        let (manifest, _) = extract_xml(
            r#"<manifest xmlns="http://ns.adobe.com/f4m/2.0">
                <adaptiveSet><media url="a"/></adaptiveSet>
            </manifest>"#,
            false,
        );
        assert!(manifest.adaptive_sets.is_empty());
    }

    #[test]
    fn bootstrap_info_needs_profile_and_content() {
        let (_, records) = extract_xml(
            r#"<manifest xmlns="http://ns.adobe.com/f4m/1.0">
                <bootstrapInfo id="no-profile">AQID</bootstrapInfo>
                <bootstrapInfo id="empty" profile="named"/>
                <bootstrapInfo id="inline" profile="named">AQID</bootstrapInfo>
                <bootstrapInfo id="remote" profile="named" url="http://example.com/b"/>
            </manifest>"#,
            false,
        );

        let ids: Vec<_> = records.bootstrap_infos.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["inline", "remote"]);
        assert_eq!(records.bootstrap_infos[0].data, vec![1, 2, 3]);
    }

    #[test]
    fn dvr_info_attributes_follow_version() {
        let v1 = r#"<manifest xmlns="http://ns.adobe.com/f4m/1.0">
            <dvrInfo id="d" beginOffset="10" endOffset="20" windowDuration="30" offline="true"/>
        </manifest>"#;
        let (_, records) = extract_xml(v1, false);
        let dvr_info = &records.dvr_infos[0];
        assert_eq!(dvr_info.id, "d");
        assert_eq!(dvr_info.begin_offset, Some(10));
        assert_eq!(dvr_info.end_offset, Some(20));
        assert_eq!(dvr_info.window_duration, None);
        assert!(dvr_info.offline);

        let (_, records) = extract_xml(&v1.replace("1.0", "2.0"), false);
        let dvr_info = &records.dvr_infos[0];
        assert!(dvr_info.id.is_empty());
        assert_eq!(dvr_info.begin_offset, None);
        assert_eq!(dvr_info.window_duration, Some(30));
    }

    #[test]
    fn cue_info_keeps_valid_cues_only() {
        let (_, records) = extract_xml(
            r#"<manifest xmlns="http://ns.adobe.com/f4m/3.0">
                <cueInfo id="ads">
                    <cue id="c1" type="spliceOut" time="10" duration="30" availNum="1"/>
                    <cue id="c2" type="spliceIn" time="40" duration="0"/>
                    <cue id="c3" type="spliceOut" time="-1" duration="30"/>
                </cueInfo>
                <cueInfo id="empty">
                    <cue id="c4" type="spliceOut" duration="30"/>
                </cueInfo>
                <cueInfo>
                    <cue id="c5" type="spliceOut" time="1" duration="1"/>
                </cueInfo>
            </manifest>"#,
            false,
        );

        assert_eq!(records.cue_infos.len(), 1);
        let cue_info = &records.cue_infos[0];
        assert_eq!(cue_info.id, "ads");
        assert_eq!(cue_info.cues.len(), 1);
        assert_eq!(cue_info.cues[0].id, "c1");
        assert_eq!(cue_info.cues[0].avail_num, Some(1));
    }

    #[test]
    fn smpte_timecodes_need_timestamp_and_smpte() {
        let (_, records) = extract_xml(
            r#"<manifest xmlns="http://ns.adobe.com/f4m/3.0">
                <smpteTimecodes>
                    <smpteTimecode smpte="01:00:00:00" timestamp="0" date="2014-01-01"/>
                    <smpteTimecode smpte="01:00:10:00"/>
                    <smpteTimecode timestamp="10"/>
                </smpteTimecodes>
            </manifest>"#,
            false,
        );

        assert_eq!(records.smpte_timecodes.len(), 1);
        assert_eq!(records.smpte_timecodes[0].date, "2014-01-01");
    }

    #[test]
    fn drm_header_sets_read_prefetch_fields() {
        let (_, records) = extract_xml(
            r#"<manifest xmlns="http://ns.adobe.com/f4m/3.0">
                <drmAdditionalHeader id="plain" prefetchDeadline="5">AQID</drmAdditionalHeader>
                <drmAdditionalHeaderSet id="set">
                    <drmAdditionalHeader url="http://example.com/h" prefetchDeadline="5" startTimestamp="7"/>
                    <drmAdditionalHeader/>
                </drmAdditionalHeaderSet>
            </manifest>"#,
            false,
        );

        assert_eq!(records.drm_additional_headers[0].prefetch_deadline, None);
        let set = &records.drm_additional_header_sets[0];
        assert_eq!(set.id, "set");
        assert_eq!(set.headers.len(), 1);
        assert_eq!(set.headers[0].prefetch_deadline, Some(5.0));
        assert_eq!(set.headers[0].start_timestamp, Some(7.0));
    }

    #[test]
    fn version_two_skips_version_three_sections() {
        let (_, records) = extract_xml(
            r#"<manifest xmlns="http://ns.adobe.com/f4m/2.0">
                <cueInfo id="ads"><cue id="c" type="spliceOut" time="1" duration="1"/></cueInfo>
                <bestEffortFetchInfo fragmentDuration="4"/>
                <drmAdditionalHeaderSet id="set"/>
            </manifest>"#,
            false,
        );

        assert!(records.cue_infos.is_empty());
        assert!(records.best_effort_fetch_infos.is_empty());
        assert!(records.drm_additional_header_sets.is_empty());
    }
}
