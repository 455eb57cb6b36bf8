use crate::mock_client;
use etherscan_api::errors::EtherscanError;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const TX_HASH: &str = "0x16197e2a0eacc44c1ebdfddcfcfcafb3538de557c759a66e0ba95263b23d9007";

#[tokio::test]
async fn check_contract_execution_status_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("module", "transaction"))
        .and(query_param("action", "getstatus"))
        .and(query_param("txhash", TX_HASH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"1","message":"OK","result":{"isError":"0","errDescription":""}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    client.check_contract_execution_status(TX_HASH).await.unwrap();
}

#[tokio::test]
async fn check_contract_execution_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"1","message":"OK","result":{"isError":"1","errDescription":"Bad jump destination"}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let err = client.check_contract_execution_status(TX_HASH).await.unwrap_err();
    assert!(matches!(err, EtherscanError::ExecutionFailed(_)));
    assert_eq!(err.to_string(), "Contract execution call failed: Bad jump destination");
}

#[tokio::test]
async fn check_transaction_receipt_status_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "gettxreceiptstatus"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"1","message":"OK","result":{"status":"0"}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let err = client.check_transaction_receipt_status(TX_HASH).await.unwrap_err();
    assert!(matches!(err, EtherscanError::TransactionReceiptFailed));
}
