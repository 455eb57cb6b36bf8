use crate::mock_client;
use etherscan_api::errors::EtherscanError;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn gas_estimate_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("module", "gastracker"))
        .and(query_param("action", "gasestimate"))
        .and(query_param("gasprice", "2000000000"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"1","message":"OK","result":"9227"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let time = client.gas_estimate(2000000000).await.unwrap();
    assert_eq!(time, 9227);
}

#[tokio::test]
async fn gas_estimate_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"0","message":"No record found","result":"unexpected"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let err = client.gas_estimate(2000000000).await.unwrap_err();
    assert!(matches!(err, EtherscanError::GasEstimationFailed));
}

#[tokio::test]
async fn gas_oracle_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "gasoracle"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"1","message":"OK","result":{
                "LastBlock":"13053741",
                "SafeGasPrice":"20",
                "ProposeGasPrice":"22",
                "FastGasPrice":"24",
                "suggestBaseFee":"19.230609716",
                "gasUsedRatio":"0.370119078777807,0.8954731,0.550911766666667"
            }}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let oracle = client.gas_oracle().await.unwrap();
    assert_eq!(oracle.propose_gas_price, 22);
    assert_eq!(oracle.gas_used_ratio.len(), 3);
}
