//! # Security Headers Middleware
//!
//! Response hardening headers plus CORS handling for the browser client.

use axum::{
    body::Body,
    extract::Request,
    http::{self, StatusCode, header::HeaderName},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// CORS configuration for the API
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any, `*.example.com` allows subdomains
    pub allowed_origins: Vec<String>,
    /// Allowed HTTP methods
    pub allowed_methods: Vec<http::Method>,
    /// Request headers the server accepts
    pub allowed_headers: Vec<String>,
    /// Response headers the client may read
    pub exposed_headers: Vec<String>,
    /// Maximum age for preflight cache (seconds)
    pub max_age:         u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allowed_methods: vec![
                http::Method::GET,
                http::Method::POST,
                http::Method::PUT,
                http::Method::PATCH,
                http::Method::DELETE,
                http::Method::OPTIONS,
            ],
            allowed_headers: vec![
                "Content-Type".to_string(),
                "Authorization".to_string(),
                "Accept".to_string(),
                "X-Request-ID".to_string(),
            ],
            exposed_headers: vec!["X-Request-ID".to_string()],
            max_age:         3600,
        }
    }
}

impl CorsConfig {
    /// Reads `VITALOG_CORS_ALLOWED_ORIGINS` (comma separated) and
    /// `VITALOG_CORS_MAX_AGE`. No origins are allowed by default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            allowed_origins: std::env::var("VITALOG_CORS_ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
            max_age: std::env::var("VITALOG_CORS_MAX_AGE")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_age),
            ..defaults
        }
    }

    /// Whether `origin` may call the API.
    pub fn allows(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| {
            if allowed == "*" {
                true
            }
            else if let Some(suffix) = allowed.strip_prefix('*') {
                origin.ends_with(suffix)
            }
            else {
                origin == allowed
            }
        })
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Safely insert a header value, returning true on success
fn insert_header(headers: &mut http::HeaderMap, name: &str, value: &str) -> bool {
    if let (Ok(name), Ok(value)) = (
        name.parse::<HeaderName>(),
        value.parse::<http::HeaderValue>(),
    ) {
        headers.insert(name, value);
        true
    }
    else {
        tracing::warn!("Failed to insert header: {} = {}", name, value);
        false
    }
}

/// Security headers middleware
///
/// Adds the following security headers to all responses:
/// - Content-Security-Policy: Restricts resource loading origins
/// - X-Frame-Options: Prevents clickjacking
/// - X-Content-Type-Options: Prevents MIME sniffing
/// - Referrer-Policy: Controls referrer information
/// - Permissions-Policy: Restricts browser features
/// - Cache-Control: Health data must not be cached
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    insert_header(
        headers,
        "Content-Security-Policy",
        "default-src 'none'; frame-ancestors 'none'",
    );
    insert_header(headers, "X-Frame-Options", "DENY");
    insert_header(headers, "X-Content-Type-Options", "nosniff");
    insert_header(headers, "Referrer-Policy", "no-referrer");
    insert_header(
        headers,
        "Permissions-Policy",
        "camera=(), microphone=(), geolocation=(), payment=()",
    );
    insert_header(headers, "Cache-Control", "no-store, private");

    response
}

/// CORS middleware for handling cross-origin requests
///
/// Answers preflight (OPTIONS) requests from allowed origins and tags
/// regular responses for them. Other origins get no CORS headers.
pub async fn cors_middleware(request: Request, next: Next, config: CorsConfig) -> Response {
    let origin = request
        .headers()
        .get(http::header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let allowed_origin = origin.filter(|o| config.allows(o));

    if request.method() == http::Method::OPTIONS {
        let Some(origin) = allowed_origin
        else {
            return (StatusCode::FORBIDDEN, Body::empty()).into_response();
        };

        let mut response = (StatusCode::NO_CONTENT, Body::empty()).into_response();
        let headers = response.headers_mut();
        let methods = config
            .allowed_methods
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        insert_header(headers, "Access-Control-Allow-Origin", &origin);
        insert_header(headers, "Access-Control-Allow-Methods", &methods);
        insert_header(
            headers,
            "Access-Control-Allow-Headers",
            &config.allowed_headers.join(", "),
        );
        insert_header(
            headers,
            "Access-Control-Max-Age",
            &config.max_age.to_string(),
        );
        insert_header(headers, "Vary", "Origin");
        return response;
    }

    let mut response = next.run(request).await;

    if let Some(origin) = allowed_origin {
        let headers = response.headers_mut();
        insert_header(headers, "Access-Control-Allow-Origin", &origin);
        insert_header(
            headers,
            "Access-Control-Expose-Headers",
            &config.exposed_headers.join(", "),
        );
        insert_header(headers, "Vary", "Origin");
    }

    response
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        middleware::from_fn,
        routing::get,
    };
    use tower::ServiceExt;

    use super::*;

    async fn dummy_handler() -> &'static str { "OK" }

    fn cors_app(config: CorsConfig) -> Router {
        Router::new()
            .route("/test", get(dummy_handler))
            .layer(from_fn(move |req, next| cors_middleware(req, next, config.clone())))
    }

    fn trusted() -> CorsConfig {
        CorsConfig {
            allowed_origins: vec!["https://app.vitalog.test".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let app = Router::new()
            .route("/test", get(dummy_handler))
            .layer(from_fn(security_headers_middleware));

        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert!(headers.contains_key("content-security-policy"));
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(headers.get("referrer-policy").unwrap(), "no-referrer");
        assert!(headers.contains_key("permissions-policy"));
        assert!(
            headers
                .get("cache-control")
                .unwrap()
                .to_str()
                .unwrap()
                .contains("no-store")
        );
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let request = Request::builder()
            .uri("/test")
            .header("Origin", "https://app.vitalog.test")
            .body(Body::empty())
            .unwrap();

        let response = cors_app(trusted()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "https://app.vitalog.test"
        );
        assert!(
            response
                .headers()
                .get("access-control-expose-headers")
                .unwrap()
                .to_str()
                .unwrap()
                .contains("X-Request-ID")
        );
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let request = Request::builder()
            .uri("/test")
            .method("OPTIONS")
            .header("Origin", "https://app.vitalog.test")
            .header("Access-Control-Request-Method", "PATCH")
            .body(Body::empty())
            .unwrap();

        let response = cors_app(trusted()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(
            response
                .headers()
                .get("access-control-allow-methods")
                .unwrap()
                .to_str()
                .unwrap()
                .contains("PATCH")
        );
        assert!(response.headers().contains_key("access-control-allow-headers"));
    }

    #[tokio::test]
    async fn test_cors_preflight_from_unknown_origin_is_forbidden() {
        let request = Request::builder()
            .uri("/test")
            .method("OPTIONS")
            .header("Origin", "https://elsewhere.test")
            .body(Body::empty())
            .unwrap();

        let response = cors_app(trusted()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_cors_ignores_unknown_origin() {
        let request = Request::builder()
            .uri("/test")
            .header("Origin", "https://elsewhere.test")
            .body(Body::empty())
            .unwrap();

        let response = cors_app(trusted()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response.headers().contains_key("access-control-allow-origin"));
    }

    #[test]
    fn test_wildcard_subdomain() {
        let config = CorsConfig {
            allowed_origins: parse_origins(" *.vitalog.test , ,https://other.test"),
            ..Default::default()
        };
        assert_eq!(config.allowed_origins.len(), 2);
        assert!(config.allows("https://app.vitalog.test"));
        assert!(config.allows("https://other.test"));
        assert!(!config.allows("https://vitalog.example"));
    }
}
