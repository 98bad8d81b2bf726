//! Broadcast of manifest-scope records onto media.
//!
//! A media receives a record when its reference to that kind of record is
//! empty or equals the record's id. Records are applied in document order, so
//! a later match overwrites an earlier one.

use crate::grammar::Grammar;
use crate::manifest::{
    AdaptiveSet, BestEffortFetchInfo, BootstrapInfo, Cue, DrmAdditionalHeader, DvrInfo,
    Manifest, Media, SmpteTimecode,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CueInfo {
    pub id: String,
    pub cues: Vec<Cue>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrmAdditionalHeaderSet {
    pub id: String,
    pub headers: Vec<DrmAdditionalHeader>,
}

/// Auxiliary records declared at manifest scope, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeRecords {
    pub dvr_infos: Vec<DvrInfo>,
    pub drm_additional_headers: Vec<DrmAdditionalHeader>,
    pub bootstrap_infos: Vec<BootstrapInfo>,
    pub smpte_timecodes: Vec<SmpteTimecode>,
    pub cue_infos: Vec<CueInfo>,
    pub drm_additional_header_sets: Vec<DrmAdditionalHeaderSet>,
    pub best_effort_fetch_infos: Vec<BestEffortFetchInfo>,
}

fn references(media_ref: &str, record_id: &str) -> bool {
    media_ref.is_empty() || media_ref == record_id
}

/// Applies `f` to every media of the manifest: top-level media first, then
/// each adaptive set in order.
pub fn map_medias<F>(manifest: Manifest, mut f: F) -> Manifest
where
    F: FnMut(Media) -> Media,
{
    let medias = manifest.medias.into_iter().map(&mut f).collect();
    let adaptive_sets = manifest
        .adaptive_sets
        .into_iter()
        .map(|set| AdaptiveSet {
            medias: set.medias.into_iter().map(&mut f).collect(),
            ..set
        })
        .collect();

    Manifest {
        medias,
        adaptive_sets,
        ..manifest
    }
}

pub fn bind(manifest: Manifest, records: &ScopeRecords, grammar: Grammar) -> Manifest {
    map_medias(manifest, |media| bind_media(media, records, grammar))
}

/// Everything `records` has for one media. Bootstrap info is bound before
/// best-effort fetch info, which depends on it.
pub fn bind_media(mut media: Media, records: &ScopeRecords, grammar: Grammar) -> Media {
    let dvr_unconditional = grammar.binds_dvr_info_unconditionally();
    for dvr_info in &records.dvr_infos {
        if dvr_unconditional || references(&media.dvr_info_id, &dvr_info.id) {
            media.dvr_info = Some(dvr_info.clone());
        }
    }

    for header in &records.drm_additional_headers {
        if references(&media.drm_additional_header_id, &header.id) {
            media.drm_additional_header = Some(header.clone());
        }
    }

    for info in &records.bootstrap_infos {
        if references(&media.bootstrap_info_id, &info.id) {
            media.bootstrap_info = Some(info.clone());
        }
    }

    media
        .smpte_time_codes
        .extend(records.smpte_timecodes.iter().cloned());

    for cue_info in &records.cue_infos {
        if references(&media.cue_info_id, &cue_info.id) {
            media.cue_info = Some(cue_info.cues.clone());
        }
    }

    for set in &records.drm_additional_header_sets {
        if references(&media.drm_additional_header_set_id, &set.id) {
            media.drm_additional_header_set = Some(set.headers.clone());
        }
    }

    for info in &records.best_effort_fetch_infos {
        if references(&media.best_effort_fetch_info_id, &info.id) && accepts_best_effort(&media) {
            media.best_effort_fetch_info = Some(info.clone());
        }
    }

    media
}

/// Best-effort fetch info only stands in for durations the bootstrap info
/// does not carry itself.
pub fn accepts_best_effort(media: &Media) -> bool {
    !media
        .bootstrap_info
        .as_ref()
        .is_some_and(BootstrapInfo::has_fetch_durations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Level, Version};

    fn grammar(version: Version) -> Grammar {
        Grammar::new(version, Level::SingleLevel)
    }

    fn media(bootstrap_info_id: &str) -> Media {
        Media {
            bootstrap_info_id: bootstrap_info_id.to_string(),
            ..Media::default()
        }
    }

    fn bootstrap(id: &str, profile: &str) -> BootstrapInfo {
        BootstrapInfo {
            id: id.to_string(),
            profile: profile.to_string(),
            data: vec![1],
            ..BootstrapInfo::default()
        }
    }

    #[test]
    fn binds_by_id_or_to_unreferencing_media() {
        let records = ScopeRecords {
            bootstrap_infos: vec![bootstrap("a", "named"), bootstrap("b", "named")],
            ..ScopeRecords::default()
        };
        let manifest = Manifest {
            medias: vec![media("a"), media("b"), media(""), media("c")],
            ..Manifest::default()
        };

        let bound = bind(manifest, &records, grammar(Version::V2_0));
        let ids: Vec<_> = bound
            .medias
            .iter()
            .map(|m| m.bootstrap_info.as_ref().map(|b| b.id.as_str()))
            .collect();
        // the unreferencing media takes the last record in document order
        assert_eq!(ids, vec![Some("a"), Some("b"), Some("b"), None]);
    }

    #[test]
    fn later_duplicate_ids_overwrite() {
        let records = ScopeRecords {
            bootstrap_infos: vec![bootstrap("a", "first"), bootstrap("a", "second")],
            ..ScopeRecords::default()
        };
        let bound = bind_media(media("a"), &records, grammar(Version::V2_0));
        assert_eq!(bound.bootstrap_info.unwrap().profile, "second");
    }

    #[test]
    fn dvr_info_id_matters_only_before_two() {
        let records = ScopeRecords {
            dvr_infos: vec![DvrInfo {
                id: "dvr".to_string(),
                ..DvrInfo::default()
            }],
            ..ScopeRecords::default()
        };
        let other = Media {
            dvr_info_id: "other".to_string(),
            ..Media::default()
        };

        assert!(bind_media(other.clone(), &records, grammar(Version::V1_0))
            .dvr_info
            .is_none());
        assert!(bind_media(other, &records, grammar(Version::V2_0))
            .dvr_info
            .is_some());
    }

    #[test]
    fn smpte_timecodes_accumulate() {
        let timecode = SmpteTimecode {
            smpte: "00:00:01:00".to_string(),
            timestamp: 1.0,
            ..SmpteTimecode::default()
        };
        let records = ScopeRecords {
            smpte_timecodes: vec![timecode.clone(), timecode],
            ..ScopeRecords::default()
        };
        let bound = bind_media(Media::default(), &records, grammar(Version::V3_0));
        assert_eq!(bound.smpte_time_codes.len(), 2);
    }

    #[test]
    fn best_effort_skipped_when_bootstrap_has_durations() {
        let records = ScopeRecords {
            best_effort_fetch_infos: vec![BestEffortFetchInfo {
                id: "bef".to_string(),
                fragment_duration: Some(4.0),
                segment_duration: Some(8.0),
            }],
            ..ScopeRecords::default()
        };

        let mut with_durations = Media::default();
        with_durations.bootstrap_info = Some(BootstrapInfo {
            fragment_duration: Some(2.0),
            ..BootstrapInfo::default()
        });
        assert!(bind_media(with_durations, &records, grammar(Version::V3_0))
            .best_effort_fetch_info
            .is_none());

        assert!(bind_media(Media::default(), &records, grammar(Version::V3_0))
            .best_effort_fetch_info
            .is_some());
    }

    #[test]
    fn adaptive_set_medias_are_visited_after_top_level_ones() {
        let manifest = Manifest {
            medias: vec![media("first")],
            adaptive_sets: vec![AdaptiveSet {
                medias: vec![media("second"), media("third")],
                ..AdaptiveSet::default()
            }],
            ..Manifest::default()
        };

        let mut seen = vec![];
        map_medias(manifest, |m| {
            seen.push(m.bootstrap_info_id.clone());
            m
        });
        assert_eq!(seen, vec!["first", "second", "third"]);
    }
}
