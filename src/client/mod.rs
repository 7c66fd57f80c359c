// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport for Redfish services.
//!
//! The rest of the crate only depends on the [`Client`] capability: fetch a
//! document by URI and submit a PATCH body. [`RedfishClient`] is the
//! production implementation, speaking HTTP/1.1 over rustls to a BMC.

use crate::error::{RedfishError, Result, ServiceError};
use crate::runtime::{LoggingConfig, RequestLogger};
use async_trait::async_trait;
use base64::Engine;
use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HOST};
use http::{HeaderMap, HeaderValue, Method, Request, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper_util::rt::TokioIo;
use rustls::pki_types::{CertificateDer, ServerName};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

const ODATA_VERSION: &str = "odata-version";

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Response {
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// The `ETag` header, if the service sent one.
    pub fn etag(&self) -> Option<&str> {
        self.headers
            .get(http::header::ETAG)
            .and_then(|v| v.to_str().ok())
    }
}

/// The transport capability resources are fetched and updated through.
///
/// Implementations return an error for any non-2xx status; callers never
/// inspect status codes on a successful [`Response`].
#[async_trait]
pub trait Client: Send + Sync {
    /// Issue a GET for `uri`.
    async fn get(&self, uri: &str) -> Result<Response>;

    /// Issue a PATCH for `uri` with a JSON body.
    async fn patch(&self, uri: &str, body: Bytes) -> Result<Response> {
        self.patch_with_headers(uri, body, &HeaderMap::new()).await
    }

    /// Issue a PATCH with additional request headers (e.g. `If-Match`).
    async fn patch_with_headers(
        &self,
        uri: &str,
        body: Bytes,
        headers: &HeaderMap,
    ) -> Result<Response>;
}

/// Transport handle shared by every resource fetched through it.
pub type SharedClient = Arc<dyn Client>;

#[derive(Clone, Debug)]
pub struct RedfishClientConfig {
    pub endpoint: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub ca_path: Option<String>,
    /// If true, skips TLS verification (insecure)
    pub insecure: bool,
    pub timeout: Duration,
    pub logging: LoggingConfig,
}

impl Default for RedfishClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://127.0.0.1:443".to_string(),
            username: None,
            password: None,
            ca_path: None,
            insecure: false,
            timeout: Duration::from_secs(30),
            logging: LoggingConfig::default(),
        }
    }
}

impl RedfishClientConfig {
    /// Start building a configuration for `endpoint`.
    #[must_use]
    pub fn builder(endpoint: impl Into<String>) -> RedfishClientConfigBuilder {
        RedfishClientConfigBuilder {
            config: RedfishClientConfig {
                endpoint: endpoint.into(),
                ..Default::default()
            },
        }
    }
}

/// Builder for [`RedfishClientConfig`].
#[derive(Debug, Clone)]
pub struct RedfishClientConfigBuilder {
    config: RedfishClientConfig,
}

impl RedfishClientConfigBuilder {
    /// Use HTTP Basic authentication with these credentials.
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.username = Some(username.into());
        self.config.password = Some(password.into());
        self
    }

    /// Verify the service certificate against this PEM bundle.
    #[must_use]
    pub fn ca_cert(mut self, path: impl Into<String>) -> Self {
        self.config.ca_path = Some(path.into());
        self
    }

    /// Skip certificate verification. BMCs commonly ship self-signed certificates.
    #[must_use]
    pub fn insecure(mut self) -> Self {
        self.config.insecure = true;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    #[must_use]
    pub fn build(self) -> RedfishClientConfig {
        self.config
    }
}

/// HTTP client for a single Redfish service.
#[derive(Clone)]
pub struct RedfishClient {
    config: RedfishClientConfig,
    host: String,
    port: u16,
    tls: Option<tokio_rustls::TlsConnector>,
    authorization: Option<HeaderValue>,
    logger: Arc<RequestLogger>,
}

impl std::fmt::Debug for RedfishClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedfishClient")
            .field("endpoint", &self.config.endpoint)
            .field("tls", &self.tls.is_some())
            .finish_non_exhaustive()
    }
}

impl RedfishClient {
    #[allow(clippy::result_large_err)]
    pub fn new(config: RedfishClientConfig) -> Result<Self> {
        // Install ring as default crypto provider
        let _ = rustls::crypto::ring::default_provider().install_default();

        let endpoint_url = if config.endpoint.contains("://") {
            config.endpoint.clone()
        } else {
            format!("https://{}", config.endpoint)
        };
        let parsed_url = url::Url::parse(&endpoint_url)
            .map_err(|e| RedfishError::Config(format!("Invalid endpoint URL: {e}")))?;
        // Kept without brackets so IPv6 literals resolve and validate as SNI.
        let host = match parsed_url.host() {
            Some(url::Host::Ipv6(addr)) => addr.to_string(),
            Some(host) => host.to_string(),
            None => return Err(RedfishError::Config("No host in endpoint".to_string())),
        };
        let port = parsed_url
            .port_or_known_default()
            .ok_or_else(|| RedfishError::Config("No port in endpoint".to_string()))?;

        let tls = match parsed_url.scheme() {
            "http" => None,
            "https" => Some(Self::create_tls_connector(&config)?),
            other => {
                return Err(RedfishError::Config(format!(
                    "Unsupported endpoint scheme: {other}"
                )))
            }
        };

        let authorization = Self::basic_authorization(&config)?;
        let logger = Arc::new(RequestLogger::with_config(config.logging.clone()));

        Ok(Self {
            config,
            host,
            port,
            tls,
            authorization,
            logger,
        })
    }

    /// Wrap this client for use by resources.
    #[must_use]
    pub fn into_shared(self) -> SharedClient {
        Arc::new(self)
    }

    #[must_use]
    pub fn config(&self) -> &RedfishClientConfig {
        &self.config
    }

    /// Request logger, including its counters.
    #[must_use]
    pub fn logger(&self) -> &RequestLogger {
        &self.logger
    }

    #[allow(clippy::result_large_err)]
    fn basic_authorization(config: &RedfishClientConfig) -> Result<Option<HeaderValue>> {
        let Some(username) = &config.username else {
            return Ok(None);
        };
        let password = config.password.as_deref().unwrap_or_default();
        let token = base64::engine::general_purpose::STANDARD
            .encode(format!("{username}:{password}"));
        let mut value = HeaderValue::from_str(&format!("Basic {token}"))
            .map_err(|e| RedfishError::Config(format!("Invalid credentials: {e}")))?;
        value.set_sensitive(true);
        Ok(Some(value))
    }

    #[allow(clippy::result_large_err)]
    fn create_tls_connector(config: &RedfishClientConfig) -> Result<tokio_rustls::TlsConnector> {
        let root_store = if let Some(ca_path) = &config.ca_path {
            let ca_pem = std::fs::read(ca_path)
                .map_err(|e| RedfishError::Config(format!("Failed to read CA cert: {e}")))?;
            let mut root_store = rustls::RootCertStore::empty();
            for cert in Self::load_pem_certs(&ca_pem)? {
                root_store
                    .add(cert)
                    .map_err(|e| RedfishError::Config(format!("Failed to add CA cert: {e}")))?;
            }
            root_store
        } else {
            let mut root_store = rustls::RootCertStore::empty();
            root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
            root_store
        };

        let mut tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        if config.insecure {
            tls_config
                .dangerous()
                .set_certificate_verifier(Arc::new(NoVerifier));
        }

        tls_config.alpn_protocols = vec![b"http/1.1".to_vec()];
        Ok(tokio_rustls::TlsConnector::from(Arc::new(tls_config)))
    }

    /// Load PEM-encoded certificates
    #[allow(clippy::result_large_err)]
    fn load_pem_certs(pem_data: &[u8]) -> Result<Vec<CertificateDer<'static>>> {
        let mut reader = std::io::BufReader::new(pem_data);
        let certs: Vec<CertificateDer<'static>> = rustls_pemfile::certs(&mut reader)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| RedfishError::Config(format!("Failed to parse PEM certificates: {e}")))?;
        if certs.is_empty() {
            return Err(RedfishError::Config(
                "No certificates found in PEM data".to_string(),
            ));
        }
        Ok(certs)
    }

    /// Reduce a URI to the request target sent on the wire.
    ///
    /// Redfish links are service-relative (`/redfish/v1/...`), but absolute
    /// URIs pointing at this service are accepted too.
    #[allow(clippy::result_large_err)]
    fn request_target(uri: &str) -> Result<String> {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            let parsed = url::Url::parse(uri)
                .map_err(|e| RedfishError::Validation(format!("Invalid URI {uri}: {e}")))?;
            let mut target = parsed.path().to_string();
            if let Some(query) = parsed.query() {
                target.push('?');
                target.push_str(query);
            }
            Ok(target)
        } else if uri.starts_with('/') {
            Ok(uri.to_string())
        } else {
            Ok(format!("/{uri}"))
        }
    }

    /// Host as written in a URI authority, bracketing IPv6 literals.
    fn uri_host(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        }
    }

    fn host_header(&self) -> String {
        match (self.tls.is_some(), self.port) {
            (true, 443) | (false, 80) => self.uri_host(),
            _ => format!("{}:{}", self.uri_host(), self.port),
        }
    }

    #[allow(clippy::result_large_err)]
    fn build_request(
        &self,
        method: Method,
        target: &str,
        body: Bytes,
        extra: &HeaderMap,
    ) -> Result<Request<Full<Bytes>>> {
        let mut builder = Request::builder()
            .method(method.clone())
            .uri(target)
            .header(HOST, self.host_header())
            .header(ACCEPT, "application/json")
            .header(ODATA_VERSION, "4.0");
        if method == Method::PATCH {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        if let Some(authorization) = &self.authorization {
            builder = builder.header(AUTHORIZATION, authorization.clone());
        }
        let mut request = builder
            .body(Full::new(body))
            .map_err(|e| RedfishError::Validation(format!("Invalid request: {e}")))?;
        for (name, value) in extra {
            request.headers_mut().insert(name.clone(), value.clone());
        }
        Ok(request)
    }

    async fn send(&self, method: Method, uri: &str, body: Bytes, extra: &HeaderMap) -> Result<Response> {
        let target = Self::request_target(uri)?;
        let request = self.build_request(method.clone(), &target, body, extra)?;
        let span = self.logger.start(method.as_str(), &target);
        self.logger.log_headers(&span, request.headers());

        let outcome = match tokio::time::timeout(self.config.timeout, self.exchange(request)).await {
            Ok(result) => result,
            Err(_) => Err(RedfishError::Timeout(self.config.timeout)),
        };

        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                self.logger.finish_error(span, &e.to_string());
                return Err(e);
            }
        };

        if !response.status.is_success() {
            self.logger
                .finish_error(span, &response.status.to_string());
            return Err(RedfishError::Status {
                method,
                uri: target,
                status: response.status,
                error: ServiceError::from_body(&response.body),
            });
        }

        self.logger.finish_success(span, response.status.as_u16());
        Ok(response)
    }

    /// Open a connection, send one request and read the whole response.
    async fn exchange(&self, request: Request<Full<Bytes>>) -> Result<Response> {
        let tcp = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(|e| {
                RedfishError::Connection(format!("{}:{}: {e}", self.uri_host(), self.port))
            })?;

        match &self.tls {
            Some(connector) => {
                // Use actual hostname for SNI (important for cert verification)
                let server_name = ServerName::try_from(self.host.clone())
                    .map_err(|e| RedfishError::Config(format!("Invalid server name: {e}")))?;
                let tls_stream = connector.connect(server_name, tcp).await?;
                Self::send_on(tls_stream, request).await
            }
            None => Self::send_on(tcp, request).await,
        }
    }

    async fn send_on<S>(io: S, request: Request<Full<Bytes>>) -> Result<Response>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let (mut sender, connection) =
            hyper::client::conn::http1::handshake(TokioIo::new(io)).await?;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::debug!(target: "redfish_api::http", "connection closed: {}", e);
            }
        });

        let response = sender.send_request(request).await?;
        let (parts, body) = response.into_parts();
        let body = body.collect().await?.to_bytes();

        Ok(Response {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }
}

#[async_trait]
impl Client for RedfishClient {
    async fn get(&self, uri: &str) -> Result<Response> {
        self.send(Method::GET, uri, Bytes::new(), &HeaderMap::new())
            .await
    }

    async fn patch_with_headers(
        &self,
        uri: &str,
        body: Bytes,
        headers: &HeaderMap,
    ) -> Result<Response> {
        self.send(Method::PATCH, uri, body, headers).await
    }
}

// Helper for insecure mode
#[derive(Debug)]
struct NoVerifier;

impl rustls::client::danger::ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &rustls::pki_types::CertificateDer<'_>,
        _intermediates: &[rustls::pki_types::CertificateDer<'_>],
        _server_name: &rustls::pki_types::ServerName<'_>,
        _ocsp_response: &[u8],
        _now: rustls::pki_types::UnixTime,
    ) -> std::result::Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &rustls::pki_types::CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &rustls::pki_types::CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        // BMC firmware still ships SHA-1 signed certificates.
        vec![
            rustls::SignatureScheme::RSA_PKCS1_SHA1,
            rustls::SignatureScheme::ECDSA_SHA1_Legacy,
            rustls::SignatureScheme::RSA_PKCS1_SHA256,
            rustls::SignatureScheme::ECDSA_NISTP256_SHA256,
            rustls::SignatureScheme::RSA_PKCS1_SHA384,
            rustls::SignatureScheme::ECDSA_NISTP384_SHA384,
            rustls::SignatureScheme::RSA_PKCS1_SHA512,
            rustls::SignatureScheme::ECDSA_NISTP521_SHA512,
            rustls::SignatureScheme::RSA_PSS_SHA256,
            rustls::SignatureScheme::RSA_PSS_SHA384,
            rustls::SignatureScheme::RSA_PSS_SHA512,
            rustls::SignatureScheme::ED25519,
        ]
    }
}
