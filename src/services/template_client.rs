// Template client - builds HTTP requests whose paths are expanded templates

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Request, Response};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::domain::template::{TemplateExpander, Variables};
use crate::error::ClientError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Request body
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Form parameters. Sent in the query string for GET, HEAD and DELETE.
    Form(BTreeMap<String, String>),
    Json(Value),
}

/// HTTP client whose request paths are templates relative to a base URL
#[derive(Debug, Clone)]
pub struct TemplateClient {
    client: reqwest::Client,
    base_url: Url,
    default_headers: HeaderMap,
    expander: TemplateExpander,
}

impl TemplateClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;

        // Relative paths are appended to the base path, not substituted for its last segment
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            default_headers: HeaderMap::new(),
            expander: TemplateExpander::new(),
        })
    }

    /// Header sent with every request unless a request overrides it
    pub fn with_default_header(mut self, name: &str, value: &str) -> Result<Self, ClientError> {
        let (name, value) = parse_header(name, value)?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    pub fn with_expander(mut self, expander: TemplateExpander) -> Self {
        self.expander = expander;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Expand `template` and resolve it against the base URL
    pub fn url_for(&self, template: &str, variables: Variables<'_>) -> Result<Url, ClientError> {
        let path = self.expander.expand(template, variables)?;
        Ok(self.base_url.join(&path)?)
    }

    /// Build a request. Nothing is built if the path cannot be expanded.
    pub fn request(
        &self,
        method: Method,
        template: &str,
        variables: Variables<'_>,
        headers: Option<&HashMap<String, String>>,
        body: Option<&Body>,
    ) -> Result<Request, ClientError> {
        let url = self.url_for(template, variables)?;

        let mut merged = self.default_headers.clone();
        for (name, value) in headers.into_iter().flatten() {
            let (name, value) = parse_header(name, value)?;
            merged.insert(name, value);
        }

        let params_in_query = [Method::GET, Method::HEAD, Method::DELETE].contains(&method);
        let mut builder = self.client.request(method, url).headers(merged);
        builder = match body {
            Some(Body::Form(params)) if params_in_query => builder.query(params),
            Some(Body::Form(params)) => builder.form(params),
            Some(Body::Json(value)) => builder.json(value),
            None => builder,
        };

        let request = builder.build()?;
        debug!(method = %request.method(), url = %request.url(), "built request");
        Ok(request)
    }

    pub fn get(&self, template: &str, variables: Variables<'_>) -> Result<Request, ClientError> {
        self.request(Method::GET, template, variables, None, None)
    }

    pub fn delete(&self, template: &str, variables: Variables<'_>) -> Result<Request, ClientError> {
        self.request(Method::DELETE, template, variables, None, None)
    }

    pub fn post(
        &self,
        template: &str,
        variables: Variables<'_>,
        body: Option<&Body>,
    ) -> Result<Request, ClientError> {
        self.request(Method::POST, template, variables, None, body)
    }

    pub fn put(
        &self,
        template: &str,
        variables: Variables<'_>,
        body: Option<&Body>,
    ) -> Result<Request, ClientError> {
        self.request(Method::PUT, template, variables, None, body)
    }

    pub fn patch(
        &self,
        template: &str,
        variables: Variables<'_>,
        body: Option<&Body>,
    ) -> Result<Request, ClientError> {
        self.request(Method::PATCH, template, variables, None, body)
    }

    /// Execute a request built by this client
    pub async fn send(&self, request: Request) -> Result<Response, ClientError> {
        debug!(method = %request.method(), url = %request.url(), "sending request");
        let response = self.client.execute(request).await?;
        debug!(status = %response.status(), "received response");
        Ok(response)
    }
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), ClientError> {
    let invalid = || ClientError::InvalidHeader {
        name: name.to_string(),
    };
    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
    let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
    Ok((header_name, header_value))
}
