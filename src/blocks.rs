use crate::{errors::EtherscanError, Client, Response, Result};
use serde::{Deserialize, Serialize};
use serde_aux::prelude::deserialize_number_from_string;
use std::collections::HashMap;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BlockNumberByTimestamp {
    pub timestamp: u64,
    pub block_number: u64,
}

/// An uncle entry of the block reward API endpoint
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UncleReward {
    pub miner: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub uncle_position: u64,
    #[serde(rename = "blockreward")]
    pub block_reward: String,
}

/// The raw response from the block reward API endpoint
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockReward {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub block_number: u64,
    pub time_stamp: String,
    pub block_miner: String,
    pub block_reward: String,
    pub uncles: Vec<UncleReward>,
    pub uncle_inclusion_reward: String,
}

impl Client {
    /// Returns the block reward and uncle rewards for a given block number.
    pub async fn get_block_reward(&self, block_number: u64) -> Result<BlockReward> {
        let query = self.create_query(
            "block",
            "getblockreward",
            HashMap::from([("blockno", block_number.to_string())]),
        );
        let response: Response<BlockReward> = self.get_json(&query).await?;

        Ok(response.result)
    }

    /// Returns either (1) the oldest block since a particular timestamp occurred or (2) the newest
    /// block that occurred prior to that timestamp
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn foo(client: etherscan_api::Client) -> Result<(), Box<dyn std::error::Error>> {
    /// // The newest block that occurred prior to 1 January 2020
    /// let block_number_before = client.get_block_by_timestamp(1577836800, "before");
    /// // The oldest block that occurred after 1 January 2020
    /// let block_number_after = client.get_block_by_timestamp(1577836800, "after");
    /// # Ok(()) }
    /// ```
    pub async fn get_block_by_timestamp(
        &self,
        timestamp: u64,
        closest: &str,
    ) -> Result<BlockNumberByTimestamp> {
        let query = self.create_query(
            "block",
            "getblocknobytime",
            HashMap::from([("timestamp", timestamp.to_string()), ("closest", closest.to_string())]),
        );
        let response: Response<String> = self.get_json(&query).await?;

        match response.status.as_str() {
            "0" => Err(EtherscanError::BlockNumberByTimestampFailed),
            "1" => Ok(BlockNumberByTimestamp {
                timestamp,
                block_number: response
                    .result
                    .parse::<u64>()
                    .map_err(|_| EtherscanError::BlockNumberByTimestampFailed)?,
            }),
            err => Err(EtherscanError::BadStatusCode(err.to_string())),
        }
    }
}
