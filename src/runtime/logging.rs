// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request logging for the HTTP transport.
//!
//! Every request issued by [`RedfishClient`](crate::RedfishClient) passes
//! through a [`RequestLogger`], which emits a `tracing` event with the method,
//! URI, status and elapsed time, and keeps simple success/failure counters.
//!
//! # Example
//!
//! ```
//! use redfish_api_rs::runtime::{LogLevel, LoggingConfig, RequestLogger};
//!
//! let logger = RequestLogger::with_config(
//!     LoggingConfig::new().with_success_level(LogLevel::Debug),
//! );
//! let span = logger.start("GET", "/redfish/v1");
//! logger.finish_success(span, 200);
//! assert_eq!(logger.metrics().successful_requests(), 1);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use http::HeaderMap;
use tracing::{debug, error, info, trace, warn};

const TARGET: &str = "redfish_api::http";

/// Log level for request logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Trace level - most verbose.
    Trace,
    /// Debug level.
    #[default]
    Debug,
    /// Info level.
    Info,
    /// Warn level.
    Warn,
    /// Error level - only errors.
    Error,
    /// Disabled - no logging.
    Off,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

macro_rules! log_at {
    ($level:expr, $($arg:tt)+) => {
        match $level {
            LogLevel::Trace => trace!(target: TARGET, $($arg)+),
            LogLevel::Debug => debug!(target: TARGET, $($arg)+),
            LogLevel::Info => info!(target: TARGET, $($arg)+),
            LogLevel::Warn => warn!(target: TARGET, $($arg)+),
            LogLevel::Error => error!(target: TARGET, $($arg)+),
            LogLevel::Off => {}
        }
    };
}

/// Configuration for request logging.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for successful requests.
    pub success_level: LogLevel,
    /// Log level for failed requests.
    pub error_level: LogLevel,
    /// Whether to log request headers.
    pub log_headers: bool,
    /// Whether to redact sensitive headers.
    pub redact_sensitive: bool,
    /// List of sensitive header names to redact.
    pub sensitive_headers: Vec<String>,
}

fn default_sensitive_headers() -> Vec<String> {
    vec![
        "authorization".to_string(),
        "x-auth-token".to_string(),
        "cookie".to_string(),
    ]
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            success_level: LogLevel::Debug,
            error_level: LogLevel::Warn,
            log_headers: false,
            redact_sensitive: true,
            sensitive_headers: default_sensitive_headers(),
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the success log level.
    #[must_use]
    pub fn with_success_level(mut self, level: LogLevel) -> Self {
        self.success_level = level;
        self
    }

    /// Set the error log level.
    #[must_use]
    pub fn with_error_level(mut self, level: LogLevel) -> Self {
        self.error_level = level;
        self
    }

    /// Enable or disable header logging.
    #[must_use]
    pub fn with_headers(mut self, enabled: bool) -> Self {
        self.log_headers = enabled;
        self
    }

    /// Enable or disable sensitive data redaction.
    #[must_use]
    pub fn with_redaction(mut self, enabled: bool) -> Self {
        self.redact_sensitive = enabled;
        self
    }

    /// Add a sensitive header to redact.
    #[must_use]
    pub fn with_sensitive_header(mut self, header: impl Into<String>) -> Self {
        self.sensitive_headers.push(header.into());
        self
    }

    /// Verbose configuration for debugging against a BMC.
    #[must_use]
    pub fn verbose() -> Self {
        Self {
            success_level: LogLevel::Info,
            error_level: LogLevel::Error,
            log_headers: true,
            redact_sensitive: true,
            sensitive_headers: default_sensitive_headers(),
        }
    }

    /// Quiet configuration: only failures are logged.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            success_level: LogLevel::Off,
            error_level: LogLevel::Warn,
            log_headers: false,
            redact_sensitive: true,
            sensitive_headers: default_sensitive_headers(),
        }
    }

    fn is_sensitive(&self, name: &str) -> bool {
        self.redact_sensitive
            && self
                .sensitive_headers
                .iter()
                .any(|h| h.eq_ignore_ascii_case(name))
    }

    /// Render headers for a log line, redacting sensitive values.
    #[must_use]
    pub fn format_headers(&self, headers: &HeaderMap) -> String {
        let parts: Vec<String> = headers
            .iter()
            .map(|(name, value)| {
                if self.is_sensitive(name.as_str()) {
                    format!("{}=[REDACTED]", name)
                } else {
                    format!("{}={:?}", name, value)
                }
            })
            .collect();
        parts.join(", ")
    }
}

/// Request counters kept by a [`RequestLogger`].
#[derive(Debug, Default)]
pub struct RequestMetrics {
    total_requests: AtomicU64,
    successful_requests: AtomicU64,
    failed_requests: AtomicU64,
}

impl RequestMetrics {
    /// Create a new metrics instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful request.
    pub fn record_success(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.successful_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed request.
    pub fn record_failure(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn successful_requests(&self) -> u64 {
        self.successful_requests.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn failed_requests(&self) -> u64 {
        self.failed_requests.load(Ordering::Relaxed)
    }
}

/// Tracks timing for requests and logs their outcome.
#[derive(Debug, Default)]
pub struct RequestLogger {
    config: LoggingConfig,
    metrics: RequestMetrics,
}

impl RequestLogger {
    /// Create a request logger with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a request logger with custom configuration.
    #[must_use]
    pub fn with_config(config: LoggingConfig) -> Self {
        Self {
            config,
            metrics: RequestMetrics::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    #[must_use]
    pub fn metrics(&self) -> &RequestMetrics {
        &self.metrics
    }

    /// Start tracking a request.
    #[must_use]
    pub fn start(&self, method: &str, uri: &str) -> RequestSpan {
        RequestSpan {
            method: method.to_string(),
            uri: uri.to_string(),
            start: Instant::now(),
        }
    }

    /// Log outgoing request headers, if enabled.
    pub fn log_headers(&self, span: &RequestSpan, headers: &HeaderMap) {
        if !self.config.log_headers {
            return;
        }
        log_at!(
            self.config.success_level,
            "{} {} headers=[{}]",
            span.method,
            span.uri,
            self.config.format_headers(headers)
        );
    }

    /// Finish tracking a request that got a 2xx answer.
    pub fn finish_success(&self, span: RequestSpan, status: u16) {
        self.metrics.record_success();
        log_at!(
            self.config.success_level,
            "{} {} -> {} in {:?}",
            span.method,
            span.uri,
            status,
            span.start.elapsed()
        );
    }

    /// Finish tracking a request that failed.
    pub fn finish_error(&self, span: RequestSpan, error: &str) {
        self.metrics.record_failure();
        log_at!(
            self.config.error_level,
            "{} {} failed in {:?}: {}",
            span.method,
            span.uri,
            span.start.elapsed(),
            error
        );
    }
}

/// A request in flight.
#[derive(Debug)]
pub struct RequestSpan {
    method: String,
    uri: String,
    start: Instant,
}

impl RequestSpan {
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Elapsed time since the request started.
    #[must_use]
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Trace.to_string(), "TRACE");
        assert_eq!(LogLevel::Warn.to_string(), "WARN");
        assert_eq!(LogLevel::Off.to_string(), "OFF");
        assert_eq!(LogLevel::default(), LogLevel::Debug);
    }

    #[test]
    fn test_logging_config_builder() {
        let config = LoggingConfig::new()
            .with_success_level(LogLevel::Info)
            .with_error_level(LogLevel::Error)
            .with_headers(true)
            .with_redaction(false)
            .with_sensitive_header("x-vendor-session");

        assert_eq!(config.success_level, LogLevel::Info);
        assert_eq!(config.error_level, LogLevel::Error);
        assert!(config.log_headers);
        assert!(!config.redact_sensitive);
        assert!(config
            .sensitive_headers
            .contains(&"x-vendor-session".to_string()));
    }

    #[test]
    fn test_quiet_and_verbose() {
        let quiet = LoggingConfig::quiet();
        assert_eq!(quiet.success_level, LogLevel::Off);
        assert!(!quiet.log_headers);

        let verbose = LoggingConfig::verbose();
        assert_eq!(verbose.success_level, LogLevel::Info);
        assert!(verbose.log_headers);
    }

    #[test]
    fn test_format_headers_redacts() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic cm9vdDpjYWx2aW4="));
        headers.insert("odata-version", HeaderValue::from_static("4.0"));

        let rendered = LoggingConfig::default().format_headers(&headers);
        assert!(rendered.contains("authorization=[REDACTED]"));
        assert!(rendered.contains("odata-version=\"4.0\""));
        assert!(!rendered.contains("cm9vdDpjYWx2aW4="));

        let rendered = LoggingConfig::default()
            .with_redaction(false)
            .format_headers(&headers);
        assert!(rendered.contains("cm9vdDpjYWx2aW4="));
    }

    #[test]
    fn test_request_logger_counts() {
        let logger = RequestLogger::with_config(LoggingConfig::quiet());

        let span = logger.start("GET", "/redfish/v1/Chassis");
        assert_eq!(span.method(), "GET");
        assert_eq!(span.uri(), "/redfish/v1/Chassis");
        logger.finish_success(span, 200);

        let span = logger.start("PATCH", "/redfish/v1/Chassis/1");
        logger.finish_error(span, "400 Bad Request");

        assert_eq!(logger.metrics().total_requests(), 2);
        assert_eq!(logger.metrics().successful_requests(), 1);
        assert_eq!(logger.metrics().failed_requests(), 1);
    }
}
