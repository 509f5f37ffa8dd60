//! BFS wire protocol vocabulary.
//!
//! Field names, message-type discriminators, the business response-code
//! table, and the formatting rules for amounts and transaction timestamps.
//! Wire names must stay byte-for-byte identical to the gateway's; nothing
//! here is renamed for style.

use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};

/// Fixed request path on the gateway host.
pub const ENDPOINT_PATH: &str = "/BFSSecure/makePayment";

/// Transaction currency sent with every Authorization request.
pub const TXN_CURRENCY: &str = "BTN";

/// Protocol version string sent with every Authorization request.
pub const PROTOCOL_VERSION: &str = "1.0";

/// Default beneficiary bank code for Authorization requests.
pub const DEFAULT_BENF_BANK_CODE: &str = "01";

/// Business success code in `bfs_responseCode`.
pub const SUCCESS_CODE: &str = "00";

/// Canonical wire field names.
///
/// The gateway matches these exactly; they are collected here so every
/// request builder and every test spells them once.
pub mod field {
    /// Transaction timestamp, `YYYYMMDDHHMMSS` in UTC.
    pub const BENF_TXN_TIME: &str = "bfs_benfTxnTime";
    /// Caller-unique order number.
    pub const ORDER_NO: &str = "bfs_orderNo";
    /// Beneficiary bank code.
    pub const BENF_BANK_CODE: &str = "bfs_benfBankCode";
    /// Transaction currency.
    pub const TXN_CURRENCY: &str = "bfs_txnCurrency";
    /// Amount, formatted to exactly two decimal places.
    pub const TXN_AMOUNT: &str = "bfs_txnAmount";
    /// Payer email address.
    pub const REMITTER_EMAIL: &str = "bfs_remitterEmail";
    /// Payment description.
    pub const PAYMENT_DESC: &str = "bfs_paymentDesc";
    /// Beneficiary identifier.
    pub const BENF_ID: &str = "bfs_benfId";
    /// Message-type discriminator.
    pub const MSG_TYPE: &str = "bfs_msgType";
    /// Protocol version.
    pub const VERSION: &str = "bfs_version";
    /// Gateway-issued transaction identifier.
    pub const BFS_TXN_ID: &str = "bfs_bfsTxnId";
    /// Payer bank code.
    pub const REMITTER_BANK_ID: &str = "bfs_remitterBankId";
    /// Payer account number.
    pub const REMITTER_ACC_NO: &str = "bfs_remitterAccNo";
    /// One-time passcode.
    pub const REMITTER_OTP: &str = "bfs_remitterOtp";
    /// Business response code.
    pub const RESPONSE_CODE: &str = "bfs_responseCode";
    /// Business response description.
    pub const RESPONSE_DESC: &str = "bfs_responseDesc";
    /// Account holder display name.
    pub const REMITTER_NAME: &str = "bfs_remitterName";
}

/// Message-type discriminator for the three protocol steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    /// Authorization Request.
    Authorization,
    /// Account Enquiry.
    AccountInquiry,
    /// Debit Request.
    DebitRequest,
}

impl MessageType {
    /// Wire value sent as `bfs_msgType`.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Authorization => "AR",
            Self::AccountInquiry => "AE",
            Self::DebitRequest => "DR",
        }
    }
}

/// Business-layer response codes returned in `bfs_responseCode`.
///
/// Codes outside the documented table are carried through verbatim as
/// [`Other`](Self::Other) so callers always see the gateway's exact value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseCode {
    /// `00`: approved.
    Success,
    /// `01`: invalid request.
    InvalidRequest,
    /// `02`: invalid beneficiary.
    InvalidBeneficiary,
    /// `03`: invalid transaction.
    InvalidTransaction,
    /// `04`: insufficient funds.
    InsufficientFunds,
    /// `05`: invalid OTP.
    InvalidOtp,
    /// `06`: OTP expired.
    OtpExpired,
    /// `99`: gateway-side system error.
    SystemError,
    /// Any other remote-defined code, passed through unchanged.
    Other(String),
}

impl ResponseCode {
    /// Parses a wire code into the known table, keeping unknown values.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "00" => Self::Success,
            "01" => Self::InvalidRequest,
            "02" => Self::InvalidBeneficiary,
            "03" => Self::InvalidTransaction,
            "04" => Self::InsufficientFunds,
            "05" => Self::InvalidOtp,
            "06" => Self::OtpExpired,
            "99" => Self::SystemError,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The wire value of this code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Success => "00",
            Self::InvalidRequest => "01",
            Self::InvalidBeneficiary => "02",
            Self::InvalidTransaction => "03",
            Self::InsufficientFunds => "04",
            Self::InvalidOtp => "05",
            Self::OtpExpired => "06",
            Self::SystemError => "99",
            Self::Other(code) => code,
        }
    }

    /// Human-readable description of the known codes.
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Success => "approved",
            Self::InvalidRequest => "invalid request",
            Self::InvalidBeneficiary => "invalid beneficiary",
            Self::InvalidTransaction => "invalid transaction",
            Self::InsufficientFunds => "insufficient funds",
            Self::InvalidOtp => "invalid OTP",
            Self::OtpExpired => "OTP expired",
            Self::SystemError => "system error",
            Self::Other(_) => "unrecognized response code",
        }
    }

    /// Returns true for the success code.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns true for codes a caller may reasonably retry later.
    ///
    /// Only the gateway's own system error qualifies; every other failure
    /// code describes a condition retrying will not change.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::SystemError)
    }
}

/// Formats an amount to exactly two decimal places for `bfs_txnAmount`.
///
/// Formatting is idempotent: feeding a formatted value back through parse
/// and format yields the same string.
///
/// # Examples
///
/// ```
/// use bfs_gateway::protocol::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::new(1005, 1)), "100.50");
/// assert_eq!(format_amount(Decimal::new(100, 0)), "100.00");
/// ```
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// Generates the `bfs_benfTxnTime` timestamp: `YYYYMMDDHHMMSS` in UTC.
#[must_use]
pub fn txn_time() -> String {
    Utc::now().format("%Y%m%d%H%M%S").to_string()
}
