// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runtime utilities for observability.
//!
//! The HTTP transport logs every request through [`RequestLogger`].

mod logging;

pub use logging::{LogLevel, LoggingConfig, RequestLogger, RequestMetrics, RequestSpan};
