use crate::mock_client;
use etherscan_api::errors::EtherscanError;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn get_block_by_timestamp_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("module", "block"))
        .and(query_param("action", "getblocknobytime"))
        .and(query_param("timestamp", "1577836800"))
        .and(query_param("closest", "before"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"1","message":"OK","result":"9193265"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let block = client.get_block_by_timestamp(1577836800, "before").await.unwrap();
    assert_eq!(block.timestamp, 1577836800);
    assert_eq!(block.block_number, 9193265);
}

#[tokio::test]
async fn get_block_by_timestamp_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"0","message":"No record found","result":"Error! No closest block found"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let err = client.get_block_by_timestamp(99999999999, "after").await.unwrap_err();
    assert!(matches!(err, EtherscanError::BlockNumberByTimestampFailed));
}

#[tokio::test]
async fn get_block_reward_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "getblockreward"))
        .and(query_param("blockno", "2165403"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"1","message":"OK","result":{
                "blockNumber":"2165403",
                "timeStamp":"1472533979",
                "blockMiner":"0x13a06d3dfe21e0db5c016c03ea7d2509f7f8d1e3",
                "blockReward":"5314181600000000000",
                "uncles":[{"miner":"0xbcdfc35b86bedf72f0cda046a3c16829a2ef41d1","unclePosition":"0","blockreward":"3750000000000000000"}],
                "uncleInclusionReward":"312500000000000000"
            }}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let reward = client.get_block_reward(2165403).await.unwrap();
    assert_eq!(reward.block_number, 2165403);
    assert_eq!(reward.uncles.len(), 1);
}
