//! Inline `data:` uris (RFC 2397).
//!
//! The whole content of the source is in the uri, so these sources are decoded in place and never cached.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use percent_encoding::percent_decode_str;

use crate::error::LoadError;

const SCHEME: &str = "data:";

/// Returns true if the url is an inline `data:` uri.
pub(crate) fn is_data_uri(url: &str) -> bool {
    url.trim_start()
        .get(..SCHEME.len())
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case(SCHEME))
}

/// Decodes the content of a `data:` uri.
pub(crate) fn decode(url: &str) -> Result<Bytes, LoadError> {
    let url = url.trim();
    let Some(rest) = url
        .get(..SCHEME.len())
        .filter(|scheme| scheme.eq_ignore_ascii_case(SCHEME))
        .map(|_| &url[SCHEME.len()..])
    else {
        return Err(LoadError::DataUri("missing data: scheme".into()));
    };

    let Some((metadata, payload)) = rest.split_once(',') else {
        return Err(LoadError::DataUri("missing ',' separator".into()));
    };

    let is_base64 = metadata
        .split(';')
        .any(|parameter| parameter.trim().eq_ignore_ascii_case("base64"));

    let payload: Vec<u8> = percent_decode_str(payload).collect();
    if is_base64 {
        STANDARD
            .decode(payload)
            .map(Bytes::from)
            .map_err(|err| LoadError::DataUri(format!("invalid base64 payload: {err}")))
    } else {
        Ok(payload.into())
    }
}

/// Shortened form of the uri for log messages.
pub(crate) fn display(url: &str) -> String {
    const MAX_LEN: usize = 48;
    match url.char_indices().nth(MAX_LEN) {
        Some((end, _)) => format!("{}...", &url[..end]),
        None => url.to_owned(),
    }
}
