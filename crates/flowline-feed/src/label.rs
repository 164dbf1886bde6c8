//! Endpoint label decoding for display.
//!
//! Sensor endpoints appear in the log feed as `sensor:<base64>`. For a
//! human reviewer the decoded form reads better, so renderers run labels
//! through `decode_endpoint_label` at display time. The stored events are
//! never rewritten — decoding is a presentation concern only.

use base64::{engine::general_purpose::STANDARD, Engine};

/// Decode a `sensor:BASE64` label to `sensor:<decoded text>`.
///
/// Any label that is not a sensor label, or whose payload is not valid
/// base64-encoded UTF-8, is returned unchanged.
pub fn decode_endpoint_label(label: &str) -> String {
    if let Some(encoded) = label.strip_prefix("sensor:") {
        if let Ok(bytes) = STANDARD.decode(encoded) {
            if let Ok(text) = String::from_utf8(bytes) {
                return format!("sensor:{}", text);
            }
        }
    }
    label.to_string()
}

#[cfg(test)]
mod tests {
    use super::decode_endpoint_label;

    #[test]
    fn sensor_labels_decode_their_payload() {
        // "c2Vuc29yLTE=" is base64 for "sensor-1".
        assert_eq!(
            decode_endpoint_label("sensor:c2Vuc29yLTE="),
            "sensor:sensor-1"
        );
    }

    #[test]
    fn non_sensor_labels_pass_through() {
        assert_eq!(decode_endpoint_label("did:web:alice"), "did:web:alice");
        assert_eq!(decode_endpoint_label("gateway"), "gateway");
        assert_eq!(decode_endpoint_label(""), "");
    }

    #[test]
    fn invalid_base64_passes_through() {
        assert_eq!(
            decode_endpoint_label("sensor:!!not-base64!!"),
            "sensor:!!not-base64!!"
        );
    }

    #[test]
    fn non_utf8_payload_passes_through() {
        // Valid base64, but the bytes are not UTF-8 ("/w==" is 0xFF).
        assert_eq!(decode_endpoint_label("sensor:/w=="), "sensor:/w==");
    }
}
