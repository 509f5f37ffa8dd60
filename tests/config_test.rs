//! Integration tests for configuration loading and validation.

use std::collections::HashMap;

use bfs_gateway::{BfsClient, Error, GatewayConfig};

#[test]
fn config_round_trip_from_toml() {
    let toml = r#"
        base_url = "https://gateway.example.bt"
        key_path = "/etc/bfs/merchant.pem"
        beneficiary_id = "BE10000001"
        payment_description = "Utility payment"
        timeout_secs = 45
    "#;

    let config: GatewayConfig = toml::from_str(toml).expect("valid TOML");
    assert!(config.validate().is_ok());
    assert_eq!(config.timeout_secs, 45);
    assert_eq!(config.connect_timeout_secs, 10);
}

#[test]
fn config_from_environment_lookup() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("BFS_BASE_URL", "https://gateway.example.bt"),
        ("BFS_KEY_PATH", "/etc/bfs/merchant.pem"),
        ("BFS_BENEFICIARY_ID", "BE10000001"),
        ("BFS_PAYMENT_DESC", "Utility payment"),
        ("BFS_CONNECT_TIMEOUT_SECS", "5"),
    ]);

    let config = GatewayConfig::from_env_with(|name| vars.get(name).map(|v| (*v).to_owned()));
    assert!(config.validate().is_ok());
    assert_eq!(config.connect_timeout_secs, 5);
    assert_eq!(config.timeout_secs, 30);
}

#[test]
fn incomplete_environment_reports_every_missing_field() {
    let config = GatewayConfig::from_env_with(|name| {
        (name == "BFS_BASE_URL").then(|| "https://gateway.example.bt".to_owned())
    });

    assert_eq!(
        config.missing_fields(),
        vec!["key_path", "beneficiary_id", "payment_description"]
    );

    let Err(Error::Config { detail, missing }) = config.validate() else {
        panic!("expected config error");
    };
    assert_eq!(missing.len(), 3);
    assert!(detail.contains("key_path"));
}

#[test]
fn client_refuses_non_https_gateway() {
    let config = GatewayConfig {
        base_url: "http://gateway.example.bt".to_owned(),
        key_path: "/etc/bfs/merchant.pem".to_owned(),
        beneficiary_id: "BE10000001".to_owned(),
        payment_description: "Utility payment".to_owned(),
        ..Default::default()
    };

    let result = BfsClient::new(config);
    let Err(Error::Config { detail, .. }) = result else {
        panic!("expected config error");
    };
    assert!(detail.contains("HTTPS"));
}
