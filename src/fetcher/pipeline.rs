use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

use crate::fetcher::errors::FetchError;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;/>]+)"#).unwrap());

const SNIFF_LEN: usize = 4096;

/// Decode a page body, returning the text and the encoding used.
pub fn decode_body(
    content_type: &str,
    body: &[u8],
) -> Result<(String, &'static Encoding), FetchError> {
    let encoding = detect_encoding(content_type, body);
    let (decoded, _, had_errors) = encoding.decode(body);

    if had_errors {
        return Err(FetchError::Charset(format!(
            "content is not valid {}",
            encoding.name()
        )));
    }

    Ok((decoded.into_owned(), encoding))
}

/// Header charset, then a `<meta>` charset near the top, then a guess.
fn detect_encoding(content_type: &str, body: &[u8]) -> &'static Encoding {
    if let Some(encoding) = charset_label(content_type) {
        return encoding;
    }

    let head = &body[..body.len().min(SNIFF_LEN)];
    if let Some(encoding) = charset_label(&String::from_utf8_lossy(head)) {
        return encoding;
    }

    if std::str::from_utf8(body).is_ok() {
        return UTF_8;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(head, head.len() == body.len());
    detector.guess(None, true)
}

fn charset_label(text: &str) -> Option<&'static Encoding> {
    let captures = CHARSET_REGEX.captures(text)?;
    Encoding::for_label(captures.get(1)?.as_str().as_bytes())
}
