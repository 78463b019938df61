//! Framework-neutral view of an HTTP exchange

use crate::core::FieldValue;

/// Request metadata the HTTP logger reads
///
/// Implement this for your framework's request type, or build an
/// [`HttpRequest`] from it.
pub trait HttpRequestInfo {
    fn method(&self) -> &str;

    /// Request path as received (leading and trailing `/` are trimmed by the logger)
    fn path(&self) -> &str;

    fn query(&self) -> Vec<(String, String)>;

    fn headers(&self) -> Vec<(String, String)>;

    /// Raw body, if one was read
    fn body(&self) -> Option<&[u8]>;

    fn client_ip(&self) -> Option<String>;

    /// Identifier of the authenticated principal, if any
    fn user_id(&self) -> Option<FieldValue>;

    /// First value of a header, matched case-insensitively
    fn header(&self, name: &str) -> Option<String> {
        self.headers()
            .into_iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    fn user_agent(&self) -> Option<String> {
        self.header("user-agent")
    }
}

/// Status code of a handled response
pub trait ResponseStatus {
    fn status_code(&self) -> u16;
}

impl ResponseStatus for u16 {
    fn status_code(&self) -> u16 {
        *self
    }
}

/// Owned request description
///
/// ```
/// use service_logger::middleware::{HttpRequest, HttpRequestInfo};
///
/// let request = HttpRequest::new("get", "/api/users")
///     .with_query("page", "2")
///     .with_header("User-Agent", "curl/8.0")
///     .with_client_ip("10.0.0.7");
///
/// assert_eq!(request.method(), "GET");
/// assert_eq!(request.user_agent().as_deref(), Some("curl/8.0"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    method: String,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    client_ip: Option<String>,
    user_id: Option<FieldValue>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into().to_ascii_uppercase(),
            path: path.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn with_client_ip(mut self, ip: impl Into<String>) -> Self {
        self.client_ip = Some(ip.into());
        self
    }

    #[must_use]
    pub fn with_user_id(mut self, id: impl Into<FieldValue>) -> Self {
        self.user_id = Some(id.into());
        self
    }
}

impl HttpRequestInfo for HttpRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn query(&self) -> Vec<(String, String)> {
        self.query.clone()
    }

    fn headers(&self) -> Vec<(String, String)> {
        self.headers.clone()
    }

    fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    fn client_ip(&self) -> Option<String> {
        self.client_ip.clone()
    }

    fn user_id(&self) -> Option<FieldValue> {
        self.user_id.clone()
    }
}
