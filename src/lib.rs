//! BFS Gateway: client for the three-step bank payment authorization protocol.
//!
//! This crate integrates with a BFS payment gateway, where a debit is
//! authorized in three independent request/response exchanges against one
//! HTTPS endpoint, discriminated by the `bfs_msgType` field:
//!
//! 1. **Authorization** (`AR`): initiate a payment, receive a transaction id
//! 2. **Account Inquiry** (`AE`): bind the payer's bank account, trigger a
//!    one-time passcode to their phone
//! 3. **Debit Request** (`DR`): finalize the debit using that passcode
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │    Caller    │  owns the transaction id between steps
//! └──────┬───────┘
//!        │ authorize / inquire_account / request_debit
//! ┌──────▼───────────────────────────────────┐
//! │          BfsClient (this crate)          │
//! │  ┌─────────────┐      ┌──────────────┐   │
//! │  │  builders + │──────│  Transport   │   │
//! │  │  validation │      │  (reqwest)   │   │
//! │  └─────────────┘      └──────────────┘   │
//! └──────┬───────────────────────────────────┘
//!        │ HTTPS form POST, JSON response
//! ┌──────▼───────┐
//! │  BFS gateway │
//! └──────────────┘
//! ```
//!
//! No component stores state between calls. The caller creates the
//! transaction id on Authorization success, passes it through the next two
//! steps unchanged, and discards it once the Debit Request reaches a
//! terminal state.
//!
//! # Quick Start
//!
//! ```no_run
//! use bfs_gateway::{
//!     AccountInquiryParams, AuthorizationParams, BfsClient, DebitParams, GatewayConfig,
//! };
//! use rust_decimal::Decimal;
//!
//! # async fn example() -> bfs_gateway::Result<()> {
//! let client = BfsClient::new(GatewayConfig::from_env())?;
//!
//! // Step 1: authorize
//! let auth = client
//!     .authorize(AuthorizationParams {
//!         order_no: "ORDER-2024-001".to_owned(),
//!         amount: Decimal::new(10050, 2),
//!         email: "payer@example.com".to_owned(),
//!     })
//!     .await?;
//! let txn_id = auth.transaction_id().expect("transaction id").to_owned();
//!
//! // Step 2: bind the payer account, which sends them an OTP
//! let inquiry = client
//!     .inquire_account(AccountInquiryParams {
//!         transaction_id: txn_id.clone(),
//!         bank_id: "1010".to_owned(),
//!         account_no: "0012345678".to_owned(),
//!     })
//!     .await?;
//! println!("debiting {}", inquiry.remitter_name().unwrap_or("account holder"));
//!
//! // Step 3: finalize with the OTP the payer received
//! let otp = String::new(); // collected from the payer
//! let debit = client
//!     .request_debit(DebitParams { transaction_id: txn_id, otp })
//!     .await?;
//! println!("debited {} {}", debit.amount().unwrap_or("?"), debit.currency().unwrap_or("?"));
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`payment`]: the three protocol steps and the [`BfsClient`] facade
//! - [`transport`]: one-request-per-call transport trait and HTTPS impl
//! - [`protocol`]: wire field names, message types, response codes
//! - [`config`]: gateway configuration and its validity check
//! - [`error`]: the error taxonomy with per-step wrapping
//! - [`reliability`]: opt-in retry with backoff for network failures
//! - [`directory`], [`mask`]: bank-code lookup and sensitive-value masking
//!
//! # Error Handling
//!
//! Every step returns a single [`Error::Step`] surface; the underlying
//! cause stays structurally reachable:
//!
//! ```no_run
//! use bfs_gateway::{BfsClient, DebitParams, Error, GatewayConfig};
//!
//! # async fn example(client: BfsClient, params: DebitParams) {
//! match client.request_debit(params).await {
//!     Ok(result) => println!("completed: {:?}", result.order_no()),
//!     Err(err) => match err.cause() {
//!         Error::Business { code, description } => {
//!             eprintln!("declined ({code}): {description}");
//!         }
//!         Error::Network(_) => {
//!             // The only class worth retrying; see reliability::retry_with_backoff.
//!             eprintln!("network failure: {err}");
//!         }
//!         other => eprintln!("failed: {other}"),
//!     },
//! }
//! # }
//! ```
//!
//! # Security Considerations
//!
//! - The gateway base URL must be HTTPS; localhost and loopback are refused
//! - The RSA key is held as an opaque path reference; this crate never
//!   reads or uses the key material
//! - OTPs and account numbers never appear in logs or error messages; use
//!   [`mask::mask`] when displaying account numbers

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod directory;
pub mod error;
pub mod mask;
pub mod payment;
pub mod protocol;
pub mod reliability;
pub mod transport;

pub use config::GatewayConfig;
pub use error::{Error, PaymentStep, Result};
pub use payment::{
    AccountInquiryParams, AuthorizationParams, BfsClient, DebitParams, ResultFields,
};
