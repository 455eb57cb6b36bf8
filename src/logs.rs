use crate::{utils::validate_address, Client, Response, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Filter arguments for the event log API endpoint.
///
/// Unset fields are left out of the query string entirely.
#[derive(Clone, Debug, Default)]
pub struct LogQuery {
    pub from_block: Option<u64>,
    pub to_block: Option<u64>,
    pub address: Option<String>,
    pub topic0: Option<String>,
    pub topic1: Option<String>,
    pub topic2: Option<String>,
    pub topic3: Option<String>,
    /// `and` / `or` operator between topic0 and topic1
    pub topic0_1_opr: Option<String>,
    /// `and` / `or` operator between topic1 and topic2
    pub topic1_2_opr: Option<String>,
    /// `and` / `or` operator between topic2 and topic3
    pub topic2_3_opr: Option<String>,
}

impl LogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn block_range(mut self, from_block: u64, to_block: u64) -> Self {
        self.from_block = Some(from_block);
        self.to_block = Some(to_block);
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn topic0(mut self, topic: impl Into<String>) -> Self {
        self.topic0 = Some(topic.into());
        self
    }

    #[must_use]
    pub fn topic1(mut self, topic: impl Into<String>) -> Self {
        self.topic1 = Some(topic.into());
        self
    }

    fn into_params(self) -> HashMap<&'static str, String> {
        let mut params = HashMap::new();
        if let Some(from_block) = self.from_block {
            params.insert("fromBlock", from_block.to_string());
        }
        if let Some(to_block) = self.to_block {
            params.insert("toBlock", to_block.to_string());
        }
        if let Some(address) = self.address {
            params.insert("address", address);
        }
        if let Some(topic) = self.topic0 {
            params.insert("topic0", topic);
        }
        if let Some(topic) = self.topic1 {
            params.insert("topic1", topic);
        }
        if let Some(topic) = self.topic2 {
            params.insert("topic2", topic);
        }
        if let Some(topic) = self.topic3 {
            params.insert("topic3", topic);
        }
        if let Some(opr) = self.topic0_1_opr {
            params.insert("topic0_1_opr", opr);
        }
        if let Some(opr) = self.topic1_2_opr {
            params.insert("topic1_2_opr", opr);
        }
        if let Some(opr) = self.topic2_3_opr {
            params.insert("topic2_3_opr", opr);
        }
        params
    }
}

/// The raw response from the event log API endpoint.
///
/// Quantity fields are served as hex strings and passed through untouched.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: String,
    pub topics: Vec<String>,
    pub data: String,
    pub block_number: String,
    pub time_stamp: String,
    pub gas_price: String,
    pub gas_used: String,
    pub log_index: String,
    pub transaction_hash: String,
    pub transaction_index: String,
}

impl Client {
    /// Returns the event logs matching the given filter.
    pub async fn get_logs(&self, filter: LogQuery) -> Result<Vec<Log>> {
        if let Some(address) = &filter.address {
            validate_address(address)?;
        }
        let query = self.create_query("logs", "getLogs", filter.into_params());
        let response: Response<Vec<Log>> = self.get_json(&query).await?;

        Ok(response.result)
    }
}
