use crate::mock_client;
use etherscan_api::{account::TokenQueryOption, errors::EtherscanError};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const ADDRESS: &str = "0x58eb28a67731c570ef827c365c89b5751f9e6b0a";
const CONTRACT: &str = "0x9f8f72aa9304c8b593d555f12ef6589cc3a579a2";

#[tokio::test]
async fn get_ether_balance_single_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("module", "account"))
        .and(query_param("action", "balance"))
        .and(query_param("address", ADDRESS))
        .and(query_param("tag", "latest"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"1","message":"OK","result":"40807168566070000000000"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let balance = client.get_ether_balance_single(ADDRESS, None).await.unwrap();
    assert_eq!(balance.account, ADDRESS);
    assert_eq!(balance.balance, "40807168566070000000000");
}

#[tokio::test]
async fn get_ether_balance_multi_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "balancemulti"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            format!(
                r#"{{"status":"1","message":"OK","result":[{{"account":"{ADDRESS}","balance":"40807168566070000000000"}}]}}"#
            ),
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let balances = client.get_ether_balance_multi(&[ADDRESS], None).await.unwrap();
    assert_eq!(balances.len(), 1);
    assert_eq!(balances[0].account, ADDRESS);
}

#[tokio::test]
async fn get_transactions_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "txlist"))
        .and(query_param("address", ADDRESS))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"1","message":"OK","result":[{
                "blockNumber":"14923678",
                "timeStamp":"1654646411",
                "hash":"0xc48fa8d30ca1827f7e1ba6e0b4f7f039014c04d428b8a64854bfaf0abd3a254d",
                "nonce":"1",
                "blockHash":"0xba45d0b1f270d2a615a4c2b03f21a34543586a3fee9737ca94ec9a290eb6e6a8",
                "transactionIndex":"38",
                "from":"0x58eb28a67731c570ef827c365c89b5751f9e6b0a",
                "to":"0xdac17f958d2ee523a2206206994597c13d831ec7",
                "value":"0",
                "gas":"63209",
                "gasPrice":"50294214255",
                "isError":"0",
                "txreceipt_status":"1",
                "input":"0xa9059cbb",
                "contractAddress":"",
                "cumulativeGasUsed":"2172772",
                "gasUsed":"46109",
                "confirmations":"2954061",
                "methodId":"0xa9059cbb",
                "functionName":"transfer(address _to, uint256 _value)"
            }]}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let txs = client.get_transactions(ADDRESS, None).await.unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].block_number, 14923678);
    assert_eq!(txs[0].gas_used, 46109);
    assert_eq!(txs[0].contract_address, None);
    assert_eq!(txs[0].method_id.as_deref(), Some("0xa9059cbb"));
}

#[tokio::test]
async fn get_erc20_transfer_events_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "tokentx"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"1","message":"OK","result":[{
                "blockNumber":"2228258",
                "timeStamp":"1475710778",
                "hash":"0x8c843de8535960d29cdb2d15e4cd9b87fd88f1166e4a8f0a06dcbd1ebd729be3",
                "nonce":"10",
                "blockHash":"0x4bc4e26becac5be752f1c3f2b184f0b1e5b1a6e2a77b116cbc435fcdb4f25bcd",
                "from":"0x1b83c0bfce69a88ed250928ca57e80b9e93cc6ee",
                "contractAddress":"0x9f8f72aa9304c8b593d555f12ef6589cc3a579a2",
                "to":"0x4e83362442b8d1bec281594cea3050c8eb01311c",
                "value":"100000000000000000000",
                "tokenName":"Maker",
                "tokenSymbol":"MKR",
                "tokenDecimal":"18",
                "transactionIndex":"1",
                "gas":"940000",
                "gasPrice":"32010000000",
                "gasUsed":"93657",
                "cumulativeGasUsed":"135759",
                "input":"deprecated",
                "confirmations":"12354348"
            }]}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let txs = client
        .get_erc20_token_transfer_events(
            TokenQueryOption::ByAddress("0x4e83362442b8d1bec281594cea3050c8eb01311c".into()),
            None,
        )
        .await
        .unwrap();
    let tx = &txs[0];
    assert_eq!(tx.gas_used, 93657);
    assert_eq!(tx.nonce, 10);
    assert_eq!(tx.block_number, 2228258);
    assert_eq!(tx.token_symbol, "MKR");
}

#[tokio::test]
async fn get_token_balance_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "tokenbalance"))
        .and(query_param("contractaddress", CONTRACT))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"1","message":"OK","result":"135499"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let balance = client.get_token_balance(CONTRACT, ADDRESS).await.unwrap();
    assert_eq!(balance, "135499");
}

#[tokio::test]
async fn rejects_invalid_addresses() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    let err = client
        .get_erc20_token_transfer_events(TokenQueryOption::ByContract("maker".into()), None)
        .await
        .unwrap_err();
    assert!(matches!(err, EtherscanError::InvalidAddress(_)));
}
