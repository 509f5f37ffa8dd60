//! Authorization step: initiate a new transaction.

use rust_decimal::Decimal;

use crate::{
    config::GatewayConfig,
    error::{Error, Result},
    protocol::{
        self, DEFAULT_BENF_BANK_CODE, MessageType, PROTOCOL_VERSION, TXN_CURRENCY, field,
        format_amount,
    },
    transport::FormField,
};

/// Parameters for the Authorization step.
///
/// Preconditions are checked in a fixed order before anything is sent, and
/// the first failure wins: order number present, email present, amount
/// greater than zero, email well-formed. An amount of exactly zero is
/// rejected.
#[derive(Debug, Clone)]
pub struct AuthorizationParams {
    /// Caller-unique order number.
    pub order_no: String,
    /// Payment amount; must be strictly positive.
    pub amount: Decimal,
    /// Payer email address, `local@domain.tld`.
    pub email: String,
}

/// Validates authorization parameters, first failure wins.
pub(crate) fn validate(params: &AuthorizationParams) -> Result<()> {
    if params.order_no.trim().is_empty() {
        return Err(Error::Validation {
            field: "order_no",
            reason: "order number must not be empty".to_owned(),
        });
    }
    if params.email.trim().is_empty() {
        return Err(Error::Validation {
            field: "email",
            reason: "email must not be empty".to_owned(),
        });
    }
    if params.amount <= Decimal::ZERO {
        return Err(Error::Validation {
            field: "amount",
            reason: "amount must be greater than zero".to_owned(),
        });
    }
    validate_email(&params.email)
}

/// Checks an email address for `local@domain.tld` structure.
///
/// This is a structural check, not full RFC address parsing: one `@`, a
/// non-empty local part, and a dotted domain with a trailing label of at
/// least two characters.
pub(crate) fn validate_email(email: &str) -> Result<()> {
    let invalid = |reason: &str| Error::Validation { field: "email", reason: reason.to_owned() };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("email must not contain whitespace"));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(invalid("email must contain '@'"));
    };
    if local.is_empty() {
        return Err(invalid("email is missing the part before '@'"));
    }
    if domain.is_empty() || domain.contains('@') {
        return Err(invalid("email must contain exactly one '@' followed by a domain"));
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("email domain must not start or end with '.'"));
    }

    let Some((_, tld)) = domain.rsplit_once('.') else {
        return Err(invalid("email domain is missing a top-level domain"));
    };
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid("email top-level domain must be at least two letters"));
    }

    Ok(())
}

/// Assembles the `AR` request envelope.
pub(crate) fn build_fields(
    config: &GatewayConfig,
    params: &AuthorizationParams,
) -> Vec<FormField> {
    vec![
        (field::BENF_TXN_TIME, protocol::txn_time()),
        (field::ORDER_NO, params.order_no.clone()),
        (field::BENF_BANK_CODE, DEFAULT_BENF_BANK_CODE.to_owned()),
        (field::TXN_CURRENCY, TXN_CURRENCY.to_owned()),
        (field::TXN_AMOUNT, format_amount(params.amount)),
        (field::REMITTER_EMAIL, params.email.clone()),
        (field::PAYMENT_DESC, config.payment_description.clone()),
        (field::BENF_ID, config.beneficiary_id.clone()),
        (field::MSG_TYPE, MessageType::Authorization.code().to_owned()),
        (field::VERSION, PROTOCOL_VERSION.to_owned()),
    ]
}
