//! Integration tests for the three-step payment flow.
//!
//! Drives the client end to end against a recording stub transport, so the
//! tests can assert both what reaches the wire and how outcomes are
//! classified, without a live gateway.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use bfs_gateway::{
    AccountInquiryParams, AuthorizationParams, BfsClient, DebitParams, Error, GatewayConfig,
    PaymentStep, Result,
    transport::{FormField, Transport},
};
use rust_decimal_macros::dec;
use serde_json::{Value, json};

#[derive(Default)]
struct StubState {
    responses: Mutex<VecDeque<Result<Value>>>,
    requests: Mutex<Vec<Vec<(String, String)>>>,
}

/// Transport double that records every request and replays canned outcomes.
#[derive(Clone, Default)]
struct StubTransport(Arc<StubState>);

impl StubTransport {
    fn replying(responses: Vec<Result<Value>>) -> Self {
        let stub = Self::default();
        *stub.0.responses.lock().unwrap() = responses.into();
        stub
    }

    fn request_count(&self) -> usize {
        self.0.requests.lock().unwrap().len()
    }

    fn request(&self, index: usize) -> Vec<(String, String)> {
        self.0.requests.lock().unwrap()[index].clone()
    }
}

impl Transport for StubTransport {
    async fn post_form(&self, fields: &[FormField], _headers: &[(&str, &str)]) -> Result<Value> {
        self.0
            .requests
            .lock()
            .unwrap()
            .push(fields.iter().map(|(k, v)| ((*k).to_owned(), v.clone())).collect());
        self.0.responses.lock().unwrap().pop_front().expect("stub transport ran out of responses")
    }
}

fn config() -> GatewayConfig {
    GatewayConfig {
        base_url: "https://gateway.example.bt".to_owned(),
        key_path: "/etc/bfs/merchant.pem".to_owned(),
        beneficiary_id: "BE10000001".to_owned(),
        payment_description: "Utility payment".to_owned(),
        ..Default::default()
    }
}

fn client_with(responses: Vec<Result<Value>>) -> (BfsClient<StubTransport>, StubTransport) {
    let stub = StubTransport::replying(responses);
    let client = BfsClient::with_transport(config(), stub.clone()).expect("config is complete");
    (client, stub)
}

fn sent_field(request: &[(String, String)], name: &str) -> String {
    request
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.clone())
        .unwrap_or_else(|| panic!("field {name} was not sent"))
}

fn authorization_params() -> AuthorizationParams {
    AuthorizationParams {
        order_no: "ORDER-2024-001".to_owned(),
        amount: dec!(100.5),
        email: "payer@example.com".to_owned(),
    }
}

#[tokio::test]
async fn full_flow_threads_the_transaction_id() {
    let (client, stub) = client_with(vec![
        Ok(json!({"result": {"bfs_responseCode": "00", "bfs_bfsTxnId": "TXN777"}})),
        Ok(json!({"result": {
            "bfs_responseCode": "00",
            "bfs_remitterName": "Tashi Dorji",
            "bfs_remitterAccNo": "0012345678"
        }})),
        Ok(json!({"result": {
            "bfs_responseCode": "00",
            "bfs_orderNo": "ORDER-2024-001",
            "bfs_txnAmount": "100.50",
            "bfs_txnCurrency": "BTN"
        }})),
    ]);

    let auth = client.authorize(authorization_params()).await.unwrap();
    let txn_id = auth.transaction_id().unwrap().to_owned();
    assert_eq!(txn_id, "TXN777");

    let inquiry = client
        .inquire_account(AccountInquiryParams {
            transaction_id: txn_id.clone(),
            bank_id: "1010".to_owned(),
            account_no: "0012345678".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(inquiry.remitter_name(), Some("Tashi Dorji"));

    let debit = client
        .request_debit(DebitParams { transaction_id: txn_id, otp: "482913".to_owned() })
        .await
        .unwrap();
    assert_eq!(debit.amount(), Some("100.50"));
    assert_eq!(debit.currency(), Some("BTN"));

    assert_eq!(stub.request_count(), 3);

    let auth_req = stub.request(0);
    assert_eq!(sent_field(&auth_req, "bfs_msgType"), "AR");
    assert_eq!(sent_field(&auth_req, "bfs_txnAmount"), "100.50");
    assert_eq!(sent_field(&auth_req, "bfs_benfId"), "BE10000001");
    assert_eq!(sent_field(&auth_req, "bfs_paymentDesc"), "Utility payment");

    let inquiry_req = stub.request(1);
    assert_eq!(sent_field(&inquiry_req, "bfs_msgType"), "AE");
    assert_eq!(sent_field(&inquiry_req, "bfs_bfsTxnId"), "TXN777");
    assert_eq!(sent_field(&inquiry_req, "bfs_remitterBankId"), "1010");

    let debit_req = stub.request(2);
    assert_eq!(sent_field(&debit_req, "bfs_msgType"), "DR");
    assert_eq!(sent_field(&debit_req, "bfs_bfsTxnId"), "TXN777");
    assert_eq!(sent_field(&debit_req, "bfs_remitterOtp"), "482913");
}

#[tokio::test]
async fn invalid_amount_fails_before_any_network_call() {
    let (client, stub) = client_with(vec![]);

    for amount in [dec!(0), dec!(-1)] {
        let params = AuthorizationParams { amount, ..authorization_params() };
        let err = client.authorize(params).await.unwrap_err();

        let Error::Step { step, .. } = &err else {
            panic!("expected step wrapper, got {err:?}");
        };
        assert_eq!(*step, PaymentStep::Authorization);
        assert!(matches!(err.cause(), Error::Validation { field: "amount", .. }));
    }

    assert_eq!(stub.request_count(), 0);
}

#[tokio::test]
async fn malformed_email_fails_before_any_network_call() {
    let (client, stub) = client_with(vec![]);

    for email in ["no-at-sign", "user@domain", "user@"] {
        let params =
            AuthorizationParams { email: email.to_owned(), ..authorization_params() };
        let err = client.authorize(params).await.unwrap_err();
        assert!(
            matches!(err.cause(), Error::Validation { field: "email", .. }),
            "{email} should fail email validation"
        );
    }

    assert_eq!(stub.request_count(), 0);
}

#[tokio::test]
async fn invalid_otp_surfaces_the_remote_description() {
    let (client, _stub) = client_with(vec![Ok(json!({
        "result": {"bfs_responseCode": "05", "bfs_responseDesc": "OTP does not match"}
    }))]);

    let err = client
        .request_debit(DebitParams {
            transaction_id: "TXN777".to_owned(),
            otp: "000000".to_owned(),
        })
        .await
        .unwrap_err();

    let Error::Business { code, description } = err.cause() else {
        panic!("expected business error, got {err:?}");
    };
    assert_eq!(code, "05");
    assert_eq!(description, "OTP does not match");
    assert!(err.to_string().contains("OTP does not match"));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn missing_result_payload_is_a_business_error() {
    let (client, _stub) = client_with(vec![Ok(json!({"status": "ok"}))]);

    let err = client.authorize(authorization_params()).await.unwrap_err();
    let Error::Business { description, .. } = err.cause() else {
        panic!("expected business error, got {err:?}");
    };
    assert!(description.contains("result payload"));
}

#[tokio::test]
async fn network_failures_are_retryable_from_every_step() {
    // Authorization
    let (client, _) =
        client_with(vec![Err(Error::Network("connection timed out".to_owned()))]);
    let err = client.authorize(authorization_params()).await.unwrap_err();
    assert!(err.is_retryable());
    let Error::Step { step, .. } = &err else { panic!("expected step wrapper") };
    assert_eq!(*step, PaymentStep::Authorization);

    // Account Inquiry
    let (client, _) =
        client_with(vec![Err(Error::Network("connection timed out".to_owned()))]);
    let err = client
        .inquire_account(AccountInquiryParams {
            transaction_id: "TXN777".to_owned(),
            bank_id: "1010".to_owned(),
            account_no: "0012345678".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    let Error::Step { step, .. } = &err else { panic!("expected step wrapper") };
    assert_eq!(*step, PaymentStep::AccountInquiry);

    // Debit Request
    let (client, _) =
        client_with(vec![Err(Error::Network("connection timed out".to_owned()))]);
    let err = client
        .request_debit(DebitParams {
            transaction_id: "TXN777".to_owned(),
            otp: "482913".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    assert!(matches!(err.cause(), Error::Network(_)));
    let Error::Step { step, .. } = &err else { panic!("expected step wrapper") };
    assert_eq!(*step, PaymentStep::DebitRequest);
}

#[tokio::test]
async fn business_and_network_failures_are_distinguishable() {
    let (client, _) = client_with(vec![Ok(json!({
        "result": {"bfs_responseCode": "99", "bfs_responseDesc": "System Error"}
    }))]);
    let business = client.authorize(authorization_params()).await.unwrap_err();

    let (client, _) = client_with(vec![Err(Error::Network("refused".to_owned()))]);
    let network = client.authorize(authorization_params()).await.unwrap_err();

    assert!(matches!(business.cause(), Error::Business { .. }));
    assert!(matches!(network.cause(), Error::Network(_)));
    assert!(!business.is_retryable());
    assert!(network.is_retryable());
}

#[tokio::test]
async fn inquiry_sends_unknown_bank_codes_through_unvalidated() {
    // Format checking on this step is deliberately deferred to the gateway.
    let (client, stub) = client_with(vec![Ok(json!({
        "result": {"bfs_responseCode": "01", "bfs_responseDesc": "Invalid Request"}
    }))]);

    let err = client
        .inquire_account(AccountInquiryParams {
            transaction_id: "TXN777".to_owned(),
            bank_id: "9999".to_owned(),
            account_no: "whatever".to_owned(),
        })
        .await
        .unwrap_err();

    assert_eq!(stub.request_count(), 1, "the request must reach the gateway");
    assert_eq!(sent_field(&stub.request(0), "bfs_remitterBankId"), "9999");
    assert!(matches!(err.cause(), Error::Business { .. }));
}

#[tokio::test]
async fn http_rejections_keep_their_status_and_context() {
    let (client, _) = client_with(vec![Err(Error::Rejected {
        status: 400,
        code: Some("01".to_owned()),
        description: "Invalid Request".to_owned(),
    })]);

    let err = client.authorize(authorization_params()).await.unwrap_err();
    let Error::Rejected { status, code, description } = err.cause() else {
        panic!("expected rejection, got {err:?}");
    };
    assert_eq!(*status, 400);
    assert_eq!(code.as_deref(), Some("01"));
    assert_eq!(description, "Invalid Request");
    assert!(!err.is_retryable());
}

#[test]
fn client_construction_fails_fast_on_bad_config() {
    let incomplete = GatewayConfig {
        beneficiary_id: String::new(),
        payment_description: String::new(),
        ..config()
    };

    let result = BfsClient::with_transport(incomplete, StubTransport::default());
    let Err(Error::Config { missing, .. }) = result else {
        panic!("expected config error");
    };
    assert_eq!(missing, vec!["beneficiary_id", "payment_description"]);
}
