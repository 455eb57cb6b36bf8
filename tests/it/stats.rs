use crate::mock_client;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn eth_supply_unwraps_the_result_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("module", "stats"))
        .and(query_param("action", "ethsupply"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"1","message":"OK","result":"123"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    // the raw `result` field is the success value, not the envelope
    assert_eq!(client.eth_supply().await.unwrap(), 123);
}

#[tokio::test]
async fn eth_price_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "ethprice"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"1","message":"OK","result":{
                "ethbtc":"0.06116",
                "ethbtc_timestamp":"1624961308",
                "ethusd":"2149.18",
                "ethusd_timestamp":"1624961308"
            }}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let price = client.eth_price().await.unwrap();
    assert_eq!(price.ethusd, 2149.18);
    assert_eq!(price.ethbtc_timestamp.timestamp(), 1624961308);
}

#[tokio::test]
async fn node_count_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "nodecount"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"1","message":"OK","result":{"UTCDate":"2021-06-29","TotalNodeCount":"6413"}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let count = client.node_count().await.unwrap();
    assert_eq!(count.total_node_count, 6413);
}

#[tokio::test]
async fn token_supply_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "tokensupply"))
        .and(query_param("contractaddress", "0x9f8f72aa9304c8b593d555f12ef6589cc3a579a2"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"1","message":"OK","result":"21265524714464"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let supply =
        client.token_supply("0x9f8f72aa9304c8b593d555f12ef6589cc3a579a2").await.unwrap();
    assert_eq!(supply, "21265524714464");
}
