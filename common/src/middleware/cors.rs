//! CORS middleware.
//!
//! Attaches the CORS response headers to every response, before any other
//! processing, and answers pre-flight OPTIONS probes directly with an empty
//! 204. Layered outermost so error responses and panic recoveries carry the
//! headers too.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Origin allow-list policy, parsed once at startup.
#[derive(Debug, Clone)]
pub enum CorsPolicy {
    /// Any origin: the wildcard header is sent on every response.
    Any,
    /// Reflect the request origin only when it matches the list.
    AllowList(Arc<Vec<String>>),
}

impl CorsPolicy {
    /// Parses the configured value: `*` (or empty) means any origin,
    /// otherwise a comma-separated origin allow-list.
    pub fn parse(allowed_origin: &str) -> Self {
        let trimmed = allowed_origin.trim();
        if trimmed.is_empty() || trimmed == "*" {
            return CorsPolicy::Any;
        }
        let origins = trimmed
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
        CorsPolicy::AllowList(Arc::new(origins))
    }

    /// Computes the `Access-Control-Allow-Origin` value for a request.
    ///
    /// Under an allow-list, a non-matching (or absent) origin yields `None`
    /// and the header is omitted; the request origin is never reflected
    /// otherwise.
    pub fn allow_origin_value(&self, request_origin: Option<&HeaderValue>) -> Option<HeaderValue> {
        match self {
            CorsPolicy::Any => Some(HeaderValue::from_static("*")),
            CorsPolicy::AllowList(origins) => {
                let origin = request_origin?.to_str().ok()?;
                if origins.iter().any(|allowed| allowed == origin) {
                    HeaderValue::from_str(origin).ok()
                } else {
                    None
                }
            }
        }
    }
}

/// CORS middleware handler.
///
/// Pre-flight OPTIONS requests terminate here with 204 regardless of path;
/// everything else continues down the stack and gets the headers on the way
/// out.
pub async fn cors_middleware(
    State(policy): State<CorsPolicy>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let allow_origin = policy.allow_origin_value(req.headers().get(header::ORIGIN));

    if req.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        apply_cors_headers(response.headers_mut(), allow_origin);
        return response;
    }

    let mut response = next.run(req).await;
    apply_cors_headers(response.headers_mut(), allow_origin);
    response
}

fn apply_cors_headers(headers: &mut HeaderMap, allow_origin: Option<HeaderValue>) {
    if let Some(origin) = allow_origin {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    }
    headers.insert(header::VARY, HeaderValue::from_static("Origin"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET,POST,OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin(value: &'static str) -> HeaderValue {
        HeaderValue::from_static(value)
    }

    #[test]
    fn test_wildcard_policy_allows_everything() {
        let policy = CorsPolicy::parse("*");
        assert_eq!(
            policy.allow_origin_value(None),
            Some(HeaderValue::from_static("*"))
        );
        assert_eq!(
            policy.allow_origin_value(Some(&origin("http://evil.example"))),
            Some(HeaderValue::from_static("*"))
        );
    }

    #[test]
    fn test_allow_list_reflects_only_matches() {
        let policy = CorsPolicy::parse("http://localhost:3000, https://app.example.com");
        assert_eq!(
            policy.allow_origin_value(Some(&origin("http://localhost:3000"))),
            Some(HeaderValue::from_static("http://localhost:3000"))
        );
        assert_eq!(
            policy.allow_origin_value(Some(&origin("http://evil.example"))),
            None
        );
        assert_eq!(policy.allow_origin_value(None), None);
    }

    #[test]
    fn test_empty_config_falls_back_to_wildcard() {
        assert!(matches!(CorsPolicy::parse("  "), CorsPolicy::Any));
    }
}
