//! Account Inquiry step: bind a payer account and trigger OTP delivery.

use crate::{
    config::GatewayConfig,
    protocol::{MessageType, field},
    transport::FormField,
};

/// Parameters for the Account Inquiry step.
///
/// Bank id and account number are sent exactly as given. Unlike the
/// Authorization step there is no local format validation here; the
/// gateway's business validation is authoritative, and malformed values
/// come back as business errors. Callers that want a local membership check
/// can consult [`crate::directory`] first.
#[derive(Debug, Clone)]
pub struct AccountInquiryParams {
    /// Transaction identifier returned by the Authorization step.
    pub transaction_id: String,
    /// Payer bank code (see [`crate::directory`] for the known set).
    pub bank_id: String,
    /// Payer account number.
    pub account_no: String,
}

/// Assembles the `AE` request envelope.
pub(crate) fn build_fields(
    config: &GatewayConfig,
    params: &AccountInquiryParams,
) -> Vec<FormField> {
    vec![
        (field::BFS_TXN_ID, params.transaction_id.clone()),
        (field::REMITTER_BANK_ID, params.bank_id.clone()),
        (field::REMITTER_ACC_NO, params.account_no.clone()),
        (field::BENF_ID, config.beneficiary_id.clone()),
        (field::MSG_TYPE, MessageType::AccountInquiry.code().to_owned()),
    ]
}
