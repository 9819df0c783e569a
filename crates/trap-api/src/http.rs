//! Shared HTTP response helpers for the collection fetcher.
//!
//! Centralizes status-code checks (non-success → [`ApiError::Api`]) and the
//! pagination metadata carried in response headers.

use crate::error::ApiError;

/// Response header carrying the total number of records in a collection.
pub const TOTAL_COUNT_HEADER: &str = "total-count";

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success, otherwise
/// [`ApiError::Api`] with the status code and response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if !resp.status().is_success() {
        return Err(ApiError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Read the `total-count` header.
///
/// # Errors
///
/// Returns [`ApiError::Parse`] when the header is absent or not a
/// non-negative integer.
pub fn total_count(resp: &reqwest::Response) -> Result<u64, ApiError> {
    let raw = resp
        .headers()
        .get(TOTAL_COUNT_HEADER)
        .ok_or_else(|| ApiError::Parse(format!("missing '{TOTAL_COUNT_HEADER}' header")))?;
    raw.to_str()
        .ok()
        .map(str::trim)
        .and_then(|v| v.parse::<u64>().ok())
        .ok_or_else(|| ApiError::Parse(format!("invalid '{TOTAL_COUNT_HEADER}' header: {raw:?}")))
}

/// Number of page requests needed for `total` records at `page_size` per page.
#[must_use]
pub const fn page_count(total: u64, page_size: u32) -> u64 {
    total.div_ceil(page_size as u64)
}

/// URL of one page of a collection.
#[must_use]
pub fn page_url(base_url: &str, page: u64, page_size: u32) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{separator}page={page}&size={page_size}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body("")
                .unwrap(),
        )
    }

    fn mock_response_with_count(value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(200)
                .header(TOTAL_COUNT_HEADER, value)
                .body("[]")
                .unwrap(),
        )
    }

    #[test]
    fn total_count_from_header() {
        let resp = mock_response_with_count("120");
        assert_eq!(total_count(&resp).unwrap(), 120);
    }

    #[test]
    fn total_count_missing_header() {
        let resp = mock_response(200);
        assert!(matches!(total_count(&resp), Err(ApiError::Parse(_))));
    }

    #[test]
    fn total_count_non_numeric() {
        let resp = mock_response_with_count("many");
        assert!(matches!(total_count(&resp), Err(ApiError::Parse(_))));
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(1, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(95, 20), 5);
    }

    #[test]
    fn page_url_appends_query() {
        assert_eq!(
            page_url("http://h/v1/traps", 2, 50),
            "http://h/v1/traps?page=2&size=50"
        );
        assert_eq!(
            page_url("http://h/v1/traps?island=North", 1, 5),
            "http://h/v1/traps?island=North&page=1&size=5"
        );
    }

    #[tokio::test]
    async fn check_response_api_error() {
        let resp = mock_response(500);
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(err, ApiError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn check_response_success() {
        let resp = mock_response(200);
        assert!(check_response(resp).await.is_ok());
    }
}
