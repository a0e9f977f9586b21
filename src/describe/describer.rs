//! Request-to-description mapping.
//!
//! # Responsibilities
//! - Convert the hosting layer's request into an `InboundRequest`
//! - Build the `RequestDescription` for GET (no body) and POST (with body)
//!
//! # Design Decisions
//! - `InboundRequest` is consumed by value, so its body can be read at most once
//! - GET descriptions never touch the body and carry no `body` key at all
//! - Peer and server addresses come from `ConnectInfo<ConnectionAddrs>`;
//!   synthetic requests have neither
//! - The URL is assembled from the raw request parts and never normalized

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, OriginalUri},
    http::{header, HeaderMap, Request, Uri},
};
use serde::Serialize;

use crate::config::SecurityConfig;
use crate::describe::body::{read_body, BodyContent, BodyError};
use crate::describe::params::ParamMap;

/// Greeting carried by every description.
pub const MESSAGE: &str = "Hello from FastAPI";

/// Connected peer, if the transport exposed one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientInfo {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl From<Option<SocketAddr>> for ClientInfo {
    fn from(addr: Option<SocketAddr>) -> Self {
        match addr {
            Some(addr) => Self {
                host: Some(addr.ip().to_string()),
                port: Some(addr.port()),
            },
            None => Self::default(),
        }
    }
}

/// Both ends of the connection a request arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionAddrs {
    /// The connected client.
    pub peer: SocketAddr,
    /// The server socket that accepted the connection, if known.
    pub local: Option<SocketAddr>,
}

/// A request as seen by the describer.
#[derive(Debug)]
pub struct InboundRequest {
    pub method: String,
    pub path: String,
    pub url: String,
    pub headers: ParamMap,
    pub query_params: ParamMap,
    pub client: ClientInfo,
    pub body: Body,
}

impl InboundRequest {
    /// Take apart an HTTP request delivered by the server.
    ///
    /// The URL host comes from the request URI, else the `Host` header, else
    /// the accepting socket's address; `fallback_host` covers requests with
    /// none of these.
    pub fn from_http(request: Request<Body>, fallback_host: &str) -> Self {
        let (parts, body) = request.into_parts();

        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map(|original| original.0.clone())
            .unwrap_or(parts.uri);
        let conn = parts
            .extensions
            .get::<ConnectInfo<ConnectionAddrs>>()
            .map(|ConnectInfo(conn)| *conn);
        let server = conn.and_then(|conn| conn.local).map(server_host);
        let host = server.as_deref().unwrap_or(fallback_host);

        Self {
            method: parts.method.as_str().to_string(),
            path: uri.path().to_string(),
            url: full_url(&uri, &parts.headers, host),
            headers: ParamMap::from_headers(&parts.headers),
            query_params: ParamMap::from_query(uri.query()),
            client: conn.map(|conn| conn.peer).into(),
            body,
        }
    }
}

/// `host[:port]` of a server socket, omitting the default HTTP port.
fn server_host(addr: SocketAddr) -> String {
    match (addr.port(), addr) {
        (80, SocketAddr::V4(v4)) => v4.ip().to_string(),
        (80, SocketAddr::V6(v6)) => format!("[{}]", v6.ip()),
        _ => addr.to_string(),
    }
}

/// Rebuild the absolute URL the client addressed, verbatim.
fn full_url(uri: &Uri, headers: &HeaderMap, default_host: &str) -> String {
    let scheme = uri.scheme_str().unwrap_or("http");
    let host = uri
        .authority()
        .map(|authority| authority.as_str())
        .or_else(|| headers.get(header::HOST).and_then(|v| v.to_str().ok()))
        .unwrap_or(default_host);

    let mut url = format!("{}://{}{}", scheme, host, uri.path());
    if let Some(query) = uri.query().filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// The structured record returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescription {
    pub message: &'static str,
    pub path: String,
    pub method: String,
    pub headers: ParamMap,
    pub query_params: ParamMap,
    pub client: ClientInfo,
    pub url: String,
    /// Absent unless body inclusion was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyContent>,
}

/// Builds descriptions, reading bodies up to a size limit.
#[derive(Debug, Clone)]
pub struct RequestDescriber {
    max_body_size: usize,
}

impl RequestDescriber {
    pub fn new(max_body_size: usize) -> Self {
        Self { max_body_size }
    }

    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(config.max_body_size)
    }

    /// Describe without reading the body.
    pub fn describe_get(&self, request: InboundRequest) -> RequestDescription {
        let (description, _body) = split(request);
        description
    }

    /// Describe including the body.
    pub async fn describe_post(&self, request: InboundRequest) -> Result<RequestDescription, BodyError> {
        self.describe(request, true).await
    }

    /// Describe a request, reading and classifying its body only when
    /// `include_body` is set. Only a failed body read is an error.
    pub async fn describe(
        &self,
        request: InboundRequest,
        include_body: bool,
    ) -> Result<RequestDescription, BodyError> {
        let (mut description, body) = split(request);
        if !include_body {
            return Ok(description);
        }

        let bytes = read_body(body, self.max_body_size).await?;
        description.body = Some(BodyContent::from_bytes(&bytes));
        Ok(description)
    }
}

impl Default for RequestDescriber {
    fn default() -> Self {
        Self::from_config(&SecurityConfig::default())
    }
}

fn split(request: InboundRequest) -> (RequestDescription, Body) {
    let description = RequestDescription {
        message: MESSAGE,
        path: request.path,
        method: request.method,
        headers: request.headers,
        query_params: request.query_params,
        client: request.client,
        url: request.url,
        body: None,
    };
    (description, request.body)
}
