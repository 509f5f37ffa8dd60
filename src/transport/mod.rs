//! Transport abstraction for gateway requests.
//!
//! Every protocol step sends exactly one form-encoded POST and receives one
//! JSON document. The [`Transport`] trait captures that single operation so
//! the payment client can run against the real HTTP transport in production
//! and against recording or failing stubs in tests.

mod http;

pub use http::HttpTransport;

use serde_json::Value;

use crate::error::Result;

/// A single named request field, in wire order.
pub type FormField = (&'static str, String);

/// Sends one gateway request and classifies the outcome.
///
/// Implementations must be stateless across calls apart from connection
/// reuse; the payment client may issue calls for independent transactions
/// concurrently against one transport.
pub trait Transport: Send + Sync {
    /// Sends `fields` as `application/x-www-form-urlencoded` to the fixed
    /// gateway endpoint, merging `headers` over the default content type.
    ///
    /// On HTTP 2xx the decoded JSON body is returned unexamined; business
    /// success or failure is the caller's concern.
    ///
    /// # Errors
    ///
    /// - [`Error::Rejected`](crate::Error::Rejected) for HTTP 4xx
    /// - [`Error::Api`](crate::Error::Api) for HTTP 5xx
    /// - [`Error::Network`](crate::Error::Network) for transport faults,
    ///   timeouts, undecodable success bodies, and unclassified statuses
    fn post_form(
        &self,
        fields: &[FormField],
        headers: &[(&str, &str)],
    ) -> impl Future<Output = Result<Value>> + Send;
}
