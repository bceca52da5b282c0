//! Fixed header sets attached to download responses.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_EXPOSE_HEADERS, CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE, EXPIRES,
    HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue, PRAGMA, REFERRER_POLICY,
    X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS, X_XSS_PROTECTION,
};

use crate::artifact::ArtifactDescriptor;

/// Methods the download route accepts; also the `Allow` value on `405`.
pub const ALLOWED_METHODS: &str = "GET, OPTIONS";

const CORS_HEADERS: [(HeaderName, &str); 4] = [
    (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
    (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Range"),
    (ACCESS_CONTROL_EXPOSE_HEADERS, "Content-Length, Content-Range"),
];

const SECURITY_HEADERS: [(HeaderName, &str); 4] = [
    (X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (X_FRAME_OPTIONS, "DENY"),
    (X_XSS_PROTECTION, "1; mode=block"),
    (REFERRER_POLICY, "strict-origin-when-cross-origin"),
];

const NO_CACHE_HEADERS: [(HeaderName, &str); 3] = [
    (CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
    (PRAGMA, "no-cache"),
    (EXPIRES, "0"),
];

fn apply<const N: usize>(headers: &mut HeaderMap, set: [(HeaderName, &'static str); N]) {
    for (name, value) in set {
        headers.insert(name, HeaderValue::from_static(value));
    }
}

/// Inserts the CORS headers.
pub fn apply_cors(headers: &mut HeaderMap) {
    apply(headers, CORS_HEADERS);
}

/// Inserts the anti-sniffing, framing and referrer headers.
pub fn apply_security(headers: &mut HeaderMap) {
    apply(headers, SECURITY_HEADERS);
}

/// Headers sent on every successful download, before range-specific ones.
///
/// Fails only if the configured media type is not a valid header value.
pub fn download_headers(artifact: &ArtifactDescriptor) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut headers = HeaderMap::new();
    apply_cors(&mut headers);
    apply_security(&mut headers);
    headers.insert(CONTENT_TYPE, HeaderValue::from_str(artifact.media_type())?);
    headers.insert(CONTENT_DISPOSITION, content_disposition(artifact.name())?);
    apply(&mut headers, NO_CACHE_HEADERS);
    Ok(headers)
}

/// Builds `attachment; filename="..."; filename*=UTF-8''...`.
///
/// The quoted form carries an ASCII fallback; the extended form carries the
/// exact name percent-encoded as UTF-8 (RFC 6266 / RFC 5987).
pub fn content_disposition(name: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    let value = format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii_filename(name),
        urlencoding::encode(name)
    );
    HeaderValue::try_from(value)
}

/// Replaces characters that cannot appear inside a quoted ASCII filename.
pub(crate) fn ascii_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if !c.is_ascii() || c.is_ascii_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return "_".to_string();
    }
    sanitized
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_plain_ascii_name() {
        let value = content_disposition("UnitConverter-v2.1.0.apk").unwrap();
        assert_eq!(
            value.to_str().unwrap(),
            "attachment; filename=\"UnitConverter-v2.1.0.apk\"; filename*=UTF-8''UnitConverter-v2.1.0.apk"
        );
    }

    #[test]
    fn test_content_disposition_non_ascii_name_is_percent_encoded() {
        let value = content_disposition("Конвертер 2.apk").unwrap();
        let text = value.to_str().unwrap();
        assert!(
            text.contains("filename=\"_________ 2.apk\""),
            "ASCII fallback missing in: {text}"
        );
        assert!(
            text.contains(
                "filename*=UTF-8''%D0%9A%D0%BE%D0%BD%D0%B2%D0%B5%D1%80%D1%82%D0%B5%D1%80%202.apk"
            ),
            "encoded name missing in: {text}"
        );
    }

    #[test]
    fn test_ascii_filename_replaces_quotes_and_controls() {
        assert_eq!(ascii_filename("a\"b\\c\n.apk"), "a_b_c_.apk");
        assert_eq!(ascii_filename(""), "_");
    }

    #[test]
    fn test_download_headers_include_full_base_set() {
        let artifact = ArtifactDescriptor::new(
            "app.apk",
            "/tmp/app.apk",
            "application/vnd.android.package-archive",
            0,
        );
        let headers = download_headers(&artifact).unwrap();

        let expected = [
            ("access-control-allow-origin", "*"),
            ("access-control-allow-methods", "GET, OPTIONS"),
            ("access-control-allow-headers", "Content-Type, Range"),
            ("access-control-expose-headers", "Content-Length, Content-Range"),
            ("x-content-type-options", "nosniff"),
            ("x-frame-options", "DENY"),
            ("x-xss-protection", "1; mode=block"),
            ("referrer-policy", "strict-origin-when-cross-origin"),
            ("content-type", "application/vnd.android.package-archive"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
            ("pragma", "no-cache"),
            ("expires", "0"),
        ];
        for (name, value) in expected {
            assert_eq!(
                headers.get(name).and_then(|v| v.to_str().ok()),
                Some(value),
                "header {name}"
            );
        }
        assert!(headers.contains_key("content-disposition"));
    }

    #[test]
    fn test_download_headers_reject_invalid_media_type() {
        let artifact = ArtifactDescriptor::new("app.apk", "/tmp/app.apk", "bad\ntype", 0);
        assert!(download_headers(&artifact).is_err());
    }
}
