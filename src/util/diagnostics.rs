use crate::BodySnippetConfig;
use http::HeaderMap;

pub(crate) fn request_id(headers: &HeaderMap) -> Option<Box<str>> {
    for name in [
        "x-request-id",
        "x-correlation-id",
        "x-jenkins-session",
        "x-amzn-requestid",
    ] {
        if let Some(value) = headers.get(name).and_then(|v| v.to_str().ok()) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string().into_boxed_str());
            }
        }
    }
    None
}

pub(crate) fn extract_message(body: &[u8]) -> Option<Box<str>> {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
        return None;
    };

    let candidates = ["message", "error", "error_message", "Message", "Error"];
    for key in candidates {
        if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
            let msg = msg.trim();
            if !msg.is_empty() {
                return Some(msg.to_string().into_boxed_str());
            }
        }
    }
    None
}

pub(crate) fn truncate_utf8(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes.min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

pub(crate) fn body_snippet(body: &[u8], config: BodySnippetConfig) -> Option<Box<str>> {
    if !config.enabled || body.is_empty() {
        return None;
    }

    let body = String::from_utf8_lossy(body);
    Some(truncate_utf8(&body, config.max_bytes).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_utf8("héllo", 2), "h");
        assert_eq!(truncate_utf8("héllo", 3), "hé");
        assert_eq!(truncate_utf8("abc", 10), "abc");
    }

    #[test]
    fn extract_message_reads_common_keys() {
        assert_eq!(
            extract_message(br#"{"message":"  no such job  "}"#).as_deref(),
            Some("no such job")
        );
        assert_eq!(extract_message(b"<html>oops</html>"), None);
    }

    #[test]
    fn body_snippet_honours_config() {
        let on = BodySnippetConfig {
            enabled: true,
            max_bytes: 4,
        };
        let off = BodySnippetConfig {
            enabled: false,
            max_bytes: 4,
        };
        assert_eq!(body_snippet(b"abcdef", on).as_deref(), Some("abcd"));
        assert_eq!(body_snippet(b"abcdef", off), None);
        assert_eq!(body_snippet(b"", on), None);
    }

    #[test]
    fn request_id_skips_blank_values() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("  "));
        headers.insert("x-correlation-id", HeaderValue::from_static("abc"));
        assert_eq!(request_id(&headers).as_deref(), Some("abc"));
    }
}
