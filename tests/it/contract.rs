use crate::mock_client;
use etherscan_api::{contract::SourceCodeMetadata, errors::EtherscanError};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const ADDRESS: &str = "0xbb9bc244d798123fde783fcc1c72d3bb8c189413";

#[tokio::test]
async fn can_fetch_contract_abi() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("module", "contract"))
        .and(query_param("action", "getabi"))
        .and(query_param("address", ADDRESS))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"1","message":"OK","result":"[{\"constant\":true,\"inputs\":[],\"name\":\"totalSupply\",\"outputs\":[{\"name\":\"\",\"type\":\"uint256\"}],\"type\":\"function\"}]"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let abi = client.contract_abi(ADDRESS).await.unwrap();
    assert!(abi.is_array());
    assert_eq!(abi[0]["name"], "totalSupply");
}

#[tokio::test]
async fn can_fetch_contract_source_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "getsourcecode"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"1","message":"OK","result":[{
                "SourceCode":"contract Token {}",
                "ABI":"[]",
                "ContractName":"Token",
                "CompilerVersion":"v0.4.11+commit.68ef5810",
                "OptimizationUsed":"1",
                "Runs":"200",
                "ConstructorArguments":"",
                "EVMVersion":"Default",
                "Library":"",
                "LicenseType":"MIT",
                "Proxy":"0",
                "Implementation":"",
                "SwarmSource":""
            }]}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let meta = client.contract_source_code(ADDRESS).await.unwrap();
    assert_eq!(meta.items.len(), 1);
    let item = &meta.items[0];
    assert!(matches!(item.source_code, SourceCodeMetadata::SourceCode(_)));
    assert_eq!(item.contract_name, "Token");
    assert_eq!(meta.source_code(), "contract Token {}");
}

#[tokio::test]
async fn can_get_error_on_unverified_contract() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"0","message":"NOTOK","result":"Contract source code not verified"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let client = mock_client(&server);

    let err = client.contract_abi(ADDRESS).await.unwrap_err();
    assert!(matches!(err, EtherscanError::ContractCodeNotVerified(_)));
}
