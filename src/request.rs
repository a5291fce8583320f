use std::{fmt, sync::Arc, time::Duration};

use reqwest::{header, Method, RequestBuilder};

type Customize = Arc<dyn Fn(RequestBuilder) -> RequestBuilder + Send + Sync>;

/// Request body sent with every attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// Serialized as JSON with `Content-Type: application/json`.
    Json(serde_json::Value),
    /// Sent as-is.
    Text(String),
    /// Sent as-is.
    Bytes(Vec<u8>),
}

/// Browser credential mode.
///
/// Honored on `wasm32` through the Fetch API. Native clients have no
/// ambient credentials, so the value is ignored there.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Credentials {
    /// Send cookies and auth only to the page's own origin.
    #[default]
    SameOrigin,
    /// Send cookies and auth to every origin, including cross-origin calls.
    Include,
    /// Never send cookies or auth.
    Omit,
}

/// Per-request options, applied unchanged to every attempt.
///
/// Settings this type does not model can be forwarded to the underlying
/// [`reqwest::RequestBuilder`] with [`RequestOptions::customize`].
#[derive(Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    pub credentials: Credentials,
    /// Per-attempt timeout. `None` leaves the client default in place.
    pub timeout: Option<Duration>,
    customize: Option<Customize>,
}

impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case(header::AUTHORIZATION.as_str()) {
                    (name.as_str(), "<redacted>")
                } else {
                    (name.as_str(), value.as_str())
                }
            })
            .collect();
        f.debug_struct("RequestOptions")
            .field("method", &self.method)
            .field("headers", &headers)
            .field("query", &self.query)
            .field("body", &self.body)
            .field("credentials", &self.credentials)
            .field("timeout", &self.timeout)
            .field("customize", &self.customize.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl RequestOptions {
    /// A plain `GET` with no headers or body.
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::default().method(Method::POST)
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Appends a header. Repeated names are sent repeatedly.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self
    }

    pub fn bytes(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(RequestBody::Bytes(body.into()));
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Registers a hook that receives the request builder after all modeled
    /// options are applied. Runs once per attempt.
    ///
    /// ```
    /// use retry_fetch::RequestOptions;
    ///
    /// let options = RequestOptions::get().customize(|builder| builder.basic_auth("kit", Some("pw")));
    /// ```
    pub fn customize<F>(mut self, hook: F) -> Self
    where
        F: Fn(RequestBuilder) -> RequestBuilder + Send + Sync + 'static,
    {
        self.customize = Some(Arc::new(hook));
        self
    }

    pub(crate) fn apply(&self, mut builder: RequestBuilder) -> RequestBuilder {
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !self.query.is_empty() {
            builder = builder.query(&self.query);
        }
        builder = match &self.body {
            Some(RequestBody::Json(value)) => builder.json(value),
            Some(RequestBody::Text(text)) => builder.body(text.clone()),
            Some(RequestBody::Bytes(bytes)) => builder.body(bytes.clone()),
            None => builder,
        };
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder = apply_credentials(builder, self.credentials);
        match &self.customize {
            Some(hook) => hook(builder),
            None => builder,
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn apply_credentials(builder: RequestBuilder, credentials: Credentials) -> RequestBuilder {
    match credentials {
        Credentials::SameOrigin => builder.fetch_credentials_same_origin(),
        Credentials::Include => builder.fetch_credentials_include(),
        Credentials::Omit => builder.fetch_credentials_omit(),
    }
}

// No browser credential store on native targets.
#[cfg(not(target_arch = "wasm32"))]
fn apply_credentials(builder: RequestBuilder, _credentials: Credentials) -> RequestBuilder {
    builder
}
