//! HTTP transport implementation.
//!
//! Sends gateway requests over HTTPS using reqwest, with the timeouts taken
//! from a validated [`GatewayConfig`].

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::{
    config::GatewayConfig,
    error::{Error, Result},
    protocol::{ENDPOINT_PATH, field},
    transport::{FormField, Transport},
};

/// Default content type for every gateway request.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTPS transport for the BFS gateway.
///
/// Construction validates the supplied configuration and fails fast with a
/// configuration error naming every missing field; nothing is deferred to
/// the first request. The transport holds no mutable state beyond reqwest's
/// connection pool and is safe to share across tasks.
///
/// # Examples
///
/// ```no_run
/// use bfs_gateway::{GatewayConfig, transport::HttpTransport};
///
/// # fn example() -> bfs_gateway::Result<()> {
/// let config = GatewayConfig::from_env();
/// let transport = HttpTransport::new(&config)?;
/// # let _ = transport;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Creates a transport from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the configuration fails its validity
    /// check, or [`Error::Network`] if the HTTP client cannot be built.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        config.validate()?;

        let base = Url::parse(&config.base_url).map_err(|e| Error::Config {
            detail: format!("invalid base_url '{}': {e}", config.base_url),
            missing: Vec::new(),
        })?;
        let endpoint = base.join(ENDPOINT_PATH).map_err(|e| Error::Config {
            detail: format!("cannot derive endpoint from '{}': {e}", config.base_url),
            missing: Vec::new(),
        })?;

        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// The resolved endpoint URL requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, fields, headers), fields(endpoint = %self.endpoint))]
    async fn post_form(&self, fields: &[FormField], headers: &[(&str, &str)]) -> Result<Value> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header("Content-Type", FORM_CONTENT_TYPE)
            .form(fields);

        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        debug!(status, "gateway responded");

        let body = response.text().await?;
        classify_response(status, &body)
    }
}

/// Classifies an HTTP outcome into the error taxonomy.
///
/// - 2xx: decode JSON and return it unexamined
/// - 4xx: client-side rejection carrying the decoded business context
/// - 5xx: server fault carrying the decoded business context
/// - anything else: network-class failure
pub(crate) fn classify_response(status: u16, body: &str) -> Result<Value> {
    match status {
        200..=299 => serde_json::from_str(body)
            .map_err(|e| Error::Network(format!("undecodable gateway response: {e}"))),
        400..=499 => {
            let (code, description) = decode_error_context(body);
            Err(Error::Rejected { status, code, description })
        }
        500..=599 => {
            let (code, description) = decode_error_context(body);
            Err(Error::Api { status, code, description })
        }
        other => Err(Error::Network(format!("unexpected HTTP status {other} from gateway"))),
    }
}

/// Pulls the business response code and description out of an error body.
///
/// The body may be empty or non-JSON; the description then falls back to
/// "Unknown error".
fn decode_error_context(body: &str) -> (Option<String>, String) {
    let result = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|mut v| v.get_mut("result").map(Value::take));

    let code = result
        .as_ref()
        .and_then(|r| r.get(field::RESPONSE_CODE))
        .and_then(Value::as_str)
        .map(str::to_owned);
    let description = result
        .as_ref()
        .and_then(|r| r.get(field::RESPONSE_DESC))
        .and_then(Value::as_str)
        .map_or_else(|| "Unknown error".to_owned(), str::to_owned);

    (code, description)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn complete_config() -> GatewayConfig {
        GatewayConfig {
            base_url: "https://gateway.example.bt".to_owned(),
            key_path: "/etc/bfs/key.pem".to_owned(),
            beneficiary_id: "BE10000001".to_owned(),
            payment_description: "Test payment".to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_resolves_fixed_endpoint() {
        let transport = HttpTransport::new(&complete_config()).unwrap();
        assert_eq!(
            transport.endpoint().as_str(),
            "https://gateway.example.bt/BFSSecure/makePayment"
        );
    }

    #[test]
    fn test_new_fails_fast_on_incomplete_config() {
        let config = GatewayConfig { beneficiary_id: String::new(), ..complete_config() };
        let result = HttpTransport::new(&config);
        let Err(Error::Config { missing, .. }) = result else {
            panic!("expected config error");
        };
        assert_eq!(missing, vec!["beneficiary_id"]);
    }

    #[test]
    fn test_new_rejects_http_scheme() {
        let config =
            GatewayConfig { base_url: "http://gateway.example.bt".to_owned(), ..complete_config() };
        assert!(matches!(HttpTransport::new(&config), Err(Error::Config { .. })));
    }

    #[test]
    fn test_classify_success_returns_raw_body() {
        let body = json!({"result": {"bfs_responseCode": "00", "bfs_bfsTxnId": "TXN1"}});
        let value = classify_response(200, &body.to_string()).unwrap();
        assert_eq!(value["result"]["bfs_bfsTxnId"], "TXN1");
    }

    #[test]
    fn test_classify_success_does_not_inspect_business_code() {
        // Business failure on 2xx is the builder's job, not the transport's.
        let body = json!({"result": {"bfs_responseCode": "04"}});
        assert!(classify_response(200, &body.to_string()).is_ok());
    }

    #[test]
    fn test_classify_undecodable_success_body_is_network_class() {
        let result = classify_response(200, "<html>gateway down</html>");
        assert!(matches!(result, Err(Error::Network(_))));
    }

    #[test]
    fn test_classify_client_error_extracts_context() {
        let body =
            json!({"result": {"bfs_responseCode": "01", "bfs_responseDesc": "Invalid Request"}});
        let result = classify_response(400, &body.to_string());
        let Err(Error::Rejected { status, code, description }) = result else {
            panic!("expected rejection");
        };
        assert_eq!(status, 400);
        assert_eq!(code.as_deref(), Some("01"));
        assert_eq!(description, "Invalid Request");
    }

    #[test]
    fn test_classify_server_error_extracts_context() {
        let body = json!({"result": {"bfs_responseCode": "99", "bfs_responseDesc": "System Error"}});
        let result = classify_response(503, &body.to_string());
        let Err(Error::Api { status, code, description }) = result else {
            panic!("expected api error");
        };
        assert_eq!(status, 503);
        assert_eq!(code.as_deref(), Some("99"));
        assert_eq!(description, "System Error");
    }

    #[test]
    fn test_classify_error_with_undecodable_body_falls_back() {
        let result = classify_response(500, "");
        let Err(Error::Api { code, description, .. }) = result else {
            panic!("expected api error");
        };
        assert!(code.is_none());
        assert_eq!(description, "Unknown error");
    }

    #[test]
    fn test_classify_unexpected_status_is_network_class() {
        for status in [101, 301, 304] {
            let result = classify_response(status, "");
            assert!(matches!(result, Err(Error::Network(_))), "status {status}");
        }
    }
}
