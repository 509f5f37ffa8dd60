//! The three payment protocol steps.
//!
//! [`BfsClient`] exposes one method per step: [`authorize`](BfsClient::authorize),
//! [`inquire_account`](BfsClient::inquire_account), and
//! [`request_debit`](BfsClient::request_debit). Each call is a single
//! stateless round trip; the gateway-issued transaction identifier is the
//! only value that carries between steps, and the caller owns it.
//!
//! ```text
//! Pending --authorize--> Authorized --inquire_account--> AccountVerified
//!         --request_debit--> Completed
//! ```
//!
//! Any step failure is terminal for that transaction from the caller's point
//! of view, except network-class errors, which are safe to retry.

pub mod authorize;
pub mod debit;
pub mod inquiry;


pub use authorize::AuthorizationParams;
pub use debit::DebitParams;
pub use inquiry::AccountInquiryParams;

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::{
    config::GatewayConfig,
    error::{Error, PaymentStep, Result},
    protocol::{ResponseCode, field},
    transport::{HttpTransport, Transport},
};

/// Client for the three-step BFS payment flow.
///
/// The client is stateless between calls: it holds only the validated
/// configuration and a transport. Calls on independent transaction ids may
/// run concurrently against one client.
///
/// # Examples
///
/// ```no_run
/// use bfs_gateway::{AuthorizationParams, BfsClient, GatewayConfig};
/// use rust_decimal::Decimal;
///
/// # async fn example() -> bfs_gateway::Result<()> {
/// let client = BfsClient::new(GatewayConfig::from_env())?;
///
/// let auth = client
///     .authorize(AuthorizationParams {
///         order_no: "ORDER-2024-001".to_owned(),
///         amount: Decimal::new(10050, 2),
///         email: "payer@example.com".to_owned(),
///     })
///     .await?;
///
/// let txn_id = auth.transaction_id().expect("gateway returns a transaction id");
/// println!("authorized: {txn_id}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BfsClient<T = HttpTransport> {
    config: Arc<GatewayConfig>,
    transport: T,
}

impl BfsClient<HttpTransport> {
    /// Creates a client over the HTTPS transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming every missing required field when
    /// the configuration fails its validity check. Construction fails fast;
    /// no validation is deferred to the first call.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self { config: Arc::new(config), transport })
    }
}

impl<T: Transport> BfsClient<T> {
    /// Creates a client over a custom transport.
    ///
    /// The configuration is validated exactly as in [`new`](BfsClient::new).
    /// Intended for tests and for callers that wrap the transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the configuration is unusable.
    pub fn with_transport(config: GatewayConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self { config: Arc::new(config), transport })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Initiates a payment and returns the gateway's result payload.
    ///
    /// Validates the parameters before anything is sent (see
    /// [`AuthorizationParams`] for the exact order), then posts an `AR`
    /// message. On success the returned payload carries the transaction
    /// identifier the caller must thread through the next two steps.
    ///
    /// # Errors
    ///
    /// Always [`Error::Step`] labeled [`PaymentStep::Authorization`]; the
    /// cause is the underlying validation, network, or business failure.
    #[instrument(skip(self, params), fields(order_no = %params.order_no))]
    pub async fn authorize(&self, params: AuthorizationParams) -> Result<ResultFields> {
        info!("initiating payment authorization");
        self.authorize_inner(params)
            .await
            .map_err(|e| e.into_step(PaymentStep::Authorization))
    }

    async fn authorize_inner(&self, params: AuthorizationParams) -> Result<ResultFields> {
        authorize::validate(&params)?;
        let fields = authorize::build_fields(&self.config, &params);
        let body = self.transport.post_form(&fields, &[]).await?;
        validate_response(body)
    }

    /// Binds a payer bank account to a transaction and triggers OTP delivery.
    ///
    /// Posts an `AE` message. Bank id and account number are sent as given;
    /// the gateway's business validation is authoritative for their format.
    /// On success the payload carries the account holder's display name.
    ///
    /// # Errors
    ///
    /// Always [`Error::Step`] labeled [`PaymentStep::AccountInquiry`].
    #[instrument(
        skip(self, params),
        fields(transaction_id = %params.transaction_id, bank_id = %params.bank_id)
    )]
    pub async fn inquire_account(&self, params: AccountInquiryParams) -> Result<ResultFields> {
        info!("submitting account inquiry");
        self.inquire_inner(params)
            .await
            .map_err(|e| e.into_step(PaymentStep::AccountInquiry))
    }

    async fn inquire_inner(&self, params: AccountInquiryParams) -> Result<ResultFields> {
        let fields = inquiry::build_fields(&self.config, &params);
        let body = self.transport.post_form(&fields, &[]).await?;
        validate_response(body)
    }

    /// Finalizes the debit with the one-time passcode.
    ///
    /// Posts a `DR` message. The OTP is opaque to this layer and is never
    /// logged or embedded in error messages. This step is terminal and not
    /// idempotent; deduplication of repeated submissions is the gateway's
    /// concern.
    ///
    /// # Errors
    ///
    /// Always [`Error::Step`] labeled [`PaymentStep::DebitRequest`].
    #[instrument(skip(self, params), fields(transaction_id = %params.transaction_id))]
    pub async fn request_debit(&self, params: DebitParams) -> Result<ResultFields> {
        info!("submitting debit request");
        self.debit_inner(params)
            .await
            .map_err(|e| e.into_step(PaymentStep::DebitRequest))
    }

    async fn debit_inner(&self, params: DebitParams) -> Result<ResultFields> {
        let fields = debit::build_fields(&self.config, &params);
        let body = self.transport.post_form(&fields, &[]).await?;
        validate_response(body)
    }
}

/// The `result` payload of a successful step, passed through unchanged.
///
/// Wire fields keep their exact names; typed accessors cover the common
/// ones and [`get`](Self::get) reaches anything else.
#[derive(Debug, Clone)]
pub struct ResultFields(Map<String, Value>);

impl ResultFields {
    /// Looks up a string field by its wire name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// Gateway-issued transaction identifier (`bfs_bfsTxnId`).
    #[must_use]
    pub fn transaction_id(&self) -> Option<&str> {
        self.get(field::BFS_TXN_ID)
    }

    /// Business response code (`bfs_responseCode`); `"00"` on success.
    #[must_use]
    pub fn response_code(&self) -> Option<&str> {
        self.get(field::RESPONSE_CODE)
    }

    /// Remote response description (`bfs_responseDesc`).
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.get(field::RESPONSE_DESC)
    }

    /// Account holder display name (`bfs_remitterName`), present after a
    /// successful Account Inquiry.
    #[must_use]
    pub fn remitter_name(&self) -> Option<&str> {
        self.get(field::REMITTER_NAME)
    }

    /// Echoed order number (`bfs_orderNo`).
    #[must_use]
    pub fn order_no(&self) -> Option<&str> {
        self.get(field::ORDER_NO)
    }

    /// Echoed amount (`bfs_txnAmount`).
    #[must_use]
    pub fn amount(&self) -> Option<&str> {
        self.get(field::TXN_AMOUNT)
    }

    /// Echoed currency (`bfs_txnCurrency`).
    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        self.get(field::TXN_CURRENCY)
    }

    /// Borrows the raw payload.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the wrapper, yielding the raw payload.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// Checks the business-level outcome shared by all three steps.
///
/// The decoded body must contain a `result` object whose `bfs_responseCode`
/// is the success code; anything else is a business failure carrying the
/// remote description.
fn validate_response(mut body: Value) -> Result<ResultFields> {
    let Some(Value::Object(result)) = body.get_mut("result").map(Value::take) else {
        return Err(Error::missing_result());
    };

    let code = result.get(field::RESPONSE_CODE).and_then(Value::as_str).unwrap_or_default();
    match ResponseCode::from_code(code) {
        ResponseCode::Success => Ok(ResultFields(result)),
        failure => {
            let description = result
                .get(field::RESPONSE_DESC)
                .and_then(Value::as_str)
                .map_or_else(|| "Unknown error".to_owned(), str::to_owned);
            Err(Error::Business { code: failure.code().to_owned(), description })
        }
    }
}
