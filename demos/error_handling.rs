//! Error handling example showing how to branch on failure classes.
//!
//! Demonstrates the per-step error surface, recovering the underlying
//! cause, and retrying network failures with backoff.
//!
//! # Running this example
//!
//! ```bash
//! export BFS_BASE_URL=https://gateway.example.bt
//! export BFS_KEY_PATH=/etc/bfs/merchant.pem
//! export BFS_BENEFICIARY_ID=BE10000001
//! export BFS_PAYMENT_DESC="Utility payment"
//! cargo run --example error_handling
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "examples report progress on stdout"
)]

use bfs_gateway::{
    AuthorizationParams, BfsClient, Error, GatewayConfig, protocol::ResponseCode,
    reliability::{RetryPolicy, retry_with_backoff},
};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("BFS Gateway: Error Handling Example\n");

    // Configuration errors name every missing field at once.
    let empty = GatewayConfig::default();
    match BfsClient::new(empty) {
        Err(Error::Config { missing, .. }) => {
            println!("Config error as expected, missing: {}", missing.join(", "));
        }
        other => println!("unexpected outcome: {other:?}"),
    }

    let config = GatewayConfig::from_env();
    if config.missing_fields().is_empty() {
        let client = BfsClient::new(config)?;

        // Validation errors are raised before anything touches the network.
        let bad = AuthorizationParams {
            order_no: "DEMO-1".to_owned(),
            amount: Decimal::ZERO,
            email: "payer@example.com".to_owned(),
        };
        if let Err(err) = client.authorize(bad).await {
            println!("Validation error: {err}");
        }

        // Network failures are the one class worth retrying automatically.
        let params = AuthorizationParams {
            order_no: "DEMO-2".to_owned(),
            amount: Decimal::new(2500, 2),
            email: "payer@example.com".to_owned(),
        };
        let outcome =
            retry_with_backoff(&RetryPolicy::default(), || client.authorize(params.clone())).await;

        match outcome {
            Ok(result) => println!("Authorized: {:?}", result.transaction_id()),
            Err(err) => match err.cause() {
                Error::Business { code, description } => {
                    let known = ResponseCode::from_code(code);
                    println!("Declined ({}): {description}", known.description());
                    if known.is_transient() {
                        println!("The gateway reported a transient fault; try again later.");
                    }
                }
                Error::Network(cause) => {
                    println!("Still failing after retries: {cause}");
                }
                other => println!("Failed: {other}"),
            },
        }
    } else {
        println!("\nSet the BFS_* environment variables to run the live sections.");
    }

    Ok(())
}
