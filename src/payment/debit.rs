//! Debit Request step: finalize the transaction with the OTP.

use crate::{
    config::GatewayConfig,
    protocol::{MessageType, field},
    transport::FormField,
};

/// Parameters for the Debit Request step.
///
/// The passcode is opaque to this layer: its shape and length are the
/// gateway's concern, and it must never appear in logs or error messages.
#[derive(Debug, Clone)]
pub struct DebitParams {
    /// Transaction identifier returned by the Authorization step.
    pub transaction_id: String,
    /// One-time passcode delivered to the payer out of band.
    pub otp: String,
}

/// Assembles the `DR` request envelope.
pub(crate) fn build_fields(config: &GatewayConfig, params: &DebitParams) -> Vec<FormField> {
    vec![
        (field::BFS_TXN_ID, params.transaction_id.clone()),
        (field::REMITTER_OTP, params.otp.clone()),
        (field::BENF_ID, config.beneficiary_id.clone()),
        (field::MSG_TYPE, MessageType::DebitRequest.code().to_owned()),
    ]
}
