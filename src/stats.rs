use crate::{errors::EtherscanError, utils::validate_address, Client, Response, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_aux::prelude::deserialize_number_from_string;
use std::{collections::HashMap, str::FromStr};

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct EthSupply2 {
    /// The current amount of ETH in circulation
    #[serde(deserialize_with = "deserialize_number_from_string")]
    #[serde(rename = "EthSupply")]
    pub eth_supply: u128,
    /// The current amount of ETH2 Staking rewards
    #[serde(deserialize_with = "deserialize_number_from_string")]
    #[serde(rename = "Eth2Staking")]
    pub eth2_staking: u128,
    /// The current amount of EIP1559 burnt fees
    #[serde(deserialize_with = "deserialize_number_from_string")]
    #[serde(rename = "BurntFees")]
    pub burnt_fees: u128,
    /// Total withdrawn ETH from the beacon chain
    #[serde(deserialize_with = "deserialize_number_from_string")]
    #[serde(rename = "WithdrawnTotal")]
    pub withdrawn_total: u128,
}

#[derive(Deserialize, Clone, Debug)]
pub struct EthPrice {
    /// ETH-to-BTC exchange rate
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub ethbtc: f64,
    /// Last updated timestamp for the ETH-to-BTC exchange rate
    #[serde(deserialize_with = "deserialize_datetime_from_string")]
    pub ethbtc_timestamp: DateTime<Utc>,
    /// ETH-to-USD exchange rate
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub ethusd: f64,
    /// Last updated timestamp for the ETH-to-USD exchange rate
    #[serde(deserialize_with = "deserialize_datetime_from_string")]
    pub ethusd_timestamp: DateTime<Utc>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct NodeCount {
    /// Last updated date for the total number of discoverable Ethereum nodes
    #[serde(rename = "UTCDate")]
    #[serde(deserialize_with = "deserialize_utc_date_from_string")]
    pub utc_date: DateTime<Utc>,
    /// The total number of discoverable Ethereum nodes
    #[serde(rename = "TotalNodeCount")]
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub total_node_count: usize,
}

fn deserialize_utc_date_from_string<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;

    let naive_date =
        NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(serde::de::Error::custom)?;
    let naive_time =
        NaiveTime::from_hms_opt(0, 0, 0).ok_or_else(|| serde::de::Error::custom("invalid time"))?;

    Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive_date.and_time(naive_time), Utc))
}

fn deserialize_datetime_from_string<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        String(String),
        Number(i64),
    }

    let timestamp = match StringOrInt::deserialize(deserializer)? {
        StringOrInt::String(s) => s.parse::<i64>().map_err(serde::de::Error::custom)?,
        StringOrInt::Number(i) => i,
    };
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .ok_or_else(|| serde::de::Error::custom("timestamp out of range"))
}

impl Client {
    /// Returns the current amount of Ether in circulation excluding ETH2 Staking rewards
    /// and EIP1559 burnt fees.
    pub async fn eth_supply(&self) -> Result<u128> {
        let query = self.create_query("stats", "ethsupply", serde_json::json!({}));
        let response: Response<String> = self.get_json(&query).await?;

        if response.status == "1" {
            Ok(u128::from_str(&response.result).map_err(|_| EtherscanError::EthSupplyFailed)?)
        } else {
            Err(EtherscanError::EthSupplyFailed)
        }
    }

    /// Returns the current amount of Ether in circulation, ETH2 Staking rewards,
    /// EIP1559 burnt fees, and total withdrawn ETH from the beacon chain.
    pub async fn eth_supply2(&self) -> Result<EthSupply2> {
        let query = self.create_query("stats", "ethsupply2", serde_json::json!({}));
        let response: Response<EthSupply2> = self.get_json(&query).await?;

        Ok(response.result)
    }

    /// Returns the latest price of 1 ETH.
    pub async fn eth_price(&self) -> Result<EthPrice> {
        let query = self.create_query("stats", "ethprice", serde_json::json!({}));
        let response: Response<EthPrice> = self.get_json(&query).await?;

        Ok(response.result)
    }

    /// Returns the total number of discoverable Ethereum nodes.
    pub async fn node_count(&self) -> Result<NodeCount> {
        let query = self.create_query("stats", "nodecount", serde_json::json!({}));
        let response: Response<NodeCount> = self.get_json(&query).await?;

        Ok(response.result)
    }

    /// Returns the total supply of an ERC-20 token as the raw decimal string.
    pub async fn token_supply(&self, contract: &str) -> Result<String> {
        validate_address(contract)?;
        let query = self.create_query(
            "stats",
            "tokensupply",
            HashMap::from([("contractaddress", contract)]),
        );
        let response: Response<String> = self.get_json(&query).await?;

        Ok(response.result)
    }
}
