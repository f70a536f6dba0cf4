//! Photo-reference resolution and best-effort image loading.

use reqwest::Client;
use tracing::error;

use crate::error::ImageLoadError;

/// Normalizes a place photo reference into a fetchable URI.
///
/// Absolute `http://`/`https://` references pass through unchanged; anything
/// else is joined onto `base_url`. The result is not validated here; a
/// malformed URI surfaces later as an [`ImageLoadError`] in the loading
/// layer and leaves the image slot empty.
pub fn resolve_photo_ref(photo_ref: &str, base_url: &str) -> String {
    if photo_ref.starts_with("http://") || photo_ref.starts_with("https://") {
        photo_ref.to_string()
    } else {
        format!("{base_url}{photo_ref}")
    }
}

/// Fetches the bytes behind an already-resolved image URI.
///
/// Failure is scoped to the one image slot: it is logged and handed back so
/// the caller can leave the slot empty, but it must not be propagated into
/// list or filter state.
pub async fn fetch_image(http: &Client, uri: &str) -> Result<Vec<u8>, ImageLoadError> {
    let fetched = async {
        let bytes = http
            .get(uri)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok::<_, reqwest::Error>(bytes.to_vec())
    }
    .await;

    fetched.map_err(|err| {
        let load_err = ImageLoadError {
            uri: uri.to_string(),
            message: err.to_string(),
        };
        error!("{load_err}");
        load_err
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_https_ref_passes_through() {
        assert_eq!(
            resolve_photo_ref("https://x/a.png", "https://dewalaravel.com"),
            "https://x/a.png"
        );
    }

    #[test]
    fn absolute_http_ref_passes_through_for_any_base() {
        assert_eq!(
            resolve_photo_ref("http://cdn.example.com/a.png", "https://unrelated.example"),
            "http://cdn.example.com/a.png"
        );
    }

    #[test]
    fn relative_ref_is_joined_onto_base() {
        assert_eq!(
            resolve_photo_ref("/img/a.png", "https://dewalaravel.com"),
            "https://dewalaravel.com/img/a.png"
        );
    }

    #[test]
    fn scheme_prefix_must_match_exactly() {
        // "httpsomething" is not an absolute reference.
        assert_eq!(
            resolve_photo_ref("httpsomething.png", "https://dewalaravel.com"),
            "https://dewalaravel.comhttpsomething.png"
        );
    }
}
