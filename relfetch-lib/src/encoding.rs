//! Turning fetched page bytes into text.
//!
//! Release pages are usually UTF-8, but nothing guarantees it. The encoding is
//! taken from a byte order mark if there is one, then from the `charset`
//! parameter of the `Content-Type` header, and is otherwise guessed from the
//! bytes themselves.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// Decodes `body` using the best available encoding information.
/// Malformed sequences become U+FFFD rather than failing.
pub fn decode_page(body: &[u8], content_type: Option<&str>) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(body) {
        let (text, _) = encoding.decode_without_bom_handling(&body[bom_len..]);
        return text.into_owned();
    }

    let encoding = content_type
        .and_then(charset_from_content_type)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or_else(|| detect_encoding(body));

    let (text, had_errors) = encoding.decode_without_bom_handling(body);
    if had_errors {
        tracing::debug!(
            "Page contained bytes that are not valid {}; they were replaced",
            encoding.name()
        );
    }
    text.into_owned()
}

/// Heuristically guesses the encoding of `body`.
pub fn detect_encoding(body: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(body, true);
    detector.guess(None, true)
}

/// Extracts the `charset` parameter from a `Content-Type` value.
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .map(|(_, value)| value.trim().trim_matches('"'))
        .filter(|value| !value.is_empty())
}
