use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use tracing::debug;

// Manifests in the wild drop padding or leave stray trailing bits.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decodes inline base64 element content.
///
/// All whitespace is removed first, since encoders wrap long payloads over
/// several lines. Malformed input decodes to an empty vector so callers can
/// apply their "no data" rule instead of failing.
pub fn decode_base64(content: &str) -> Vec<u8> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return vec![];
    }

    match LENIENT.decode(compact.as_bytes()) {
        Ok(data) => data,
        Err(e) => {
            debug!("discarding malformed base64 payload: {}", e);
            vec![]
        }
    }
}
