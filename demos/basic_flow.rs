//! Complete three-step payment flow against a BFS gateway.
//!
//! Walks through Authorization, Account Inquiry, and Debit Request,
//! prompting for the OTP the payer receives after the inquiry step.
//!
//! # Running this example
//!
//! ```bash
//! export BFS_BASE_URL=https://gateway.example.bt
//! export BFS_KEY_PATH=/etc/bfs/merchant.pem
//! export BFS_BENEFICIARY_ID=BE10000001
//! export BFS_PAYMENT_DESC="Utility payment"
//! cargo run --example basic_flow
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "examples report progress on stdout"
)]

use std::io::{BufRead, Write};

use bfs_gateway::{
    AccountInquiryParams, AuthorizationParams, BfsClient, DebitParams, GatewayConfig, directory,
    mask::mask,
};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = GatewayConfig::from_env();
    if !config.missing_fields().is_empty() {
        eprintln!("Configuration incomplete, missing: {}", config.missing_fields().join(", "));
        eprintln!("Set BFS_BASE_URL, BFS_KEY_PATH, BFS_BENEFICIARY_ID, BFS_PAYMENT_DESC");
        std::process::exit(1);
    }

    let client = BfsClient::new(config)?;

    // Step 1: authorize the payment
    let auth = client
        .authorize(AuthorizationParams {
            order_no: format!("DEMO-{}", std::process::id()),
            amount: Decimal::new(10050, 2),
            email: "payer@example.com".to_owned(),
        })
        .await?;
    let txn_id = auth.transaction_id().ok_or("gateway did not return a transaction id")?.to_owned();
    println!("Authorized, transaction id: {txn_id}");

    // Step 2: bind the payer's account; the gateway sends them an OTP
    let bank_id = "1010";
    let account_no = "0012345678";
    println!(
        "Inquiring account {} at {}",
        mask(account_no, 2),
        directory::bank_name(bank_id).unwrap_or("unknown bank")
    );

    let inquiry = client
        .inquire_account(AccountInquiryParams {
            transaction_id: txn_id.clone(),
            bank_id: bank_id.to_owned(),
            account_no: account_no.to_owned(),
        })
        .await?;
    println!("Account holder: {}", inquiry.remitter_name().unwrap_or("(not returned)"));

    // Step 3: finalize with the payer's OTP
    print!("Enter the OTP sent to the payer: ");
    std::io::stdout().flush()?;
    let mut otp = String::new();
    std::io::stdin().lock().read_line(&mut otp)?;

    let debit = client
        .request_debit(DebitParams { transaction_id: txn_id, otp: otp.trim().to_owned() })
        .await?;

    println!(
        "Debited {} {} for order {}",
        debit.amount().unwrap_or("?"),
        debit.currency().unwrap_or("?"),
        debit.order_no().unwrap_or("?"),
    );

    Ok(())
}
