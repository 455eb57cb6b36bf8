//! The `proxy` module mirrors a subset of the Ethereum JSON-RPC surface.
//!
//! Responses come back in the raw `{jsonrpc, id, result}` shape rather than
//! the classic envelope; quantity results are decoded from hex, structured
//! results are passed through as JSON for the caller to narrow.

use crate::{
    utils::{parse_hex_u128, parse_hex_u64, validate_address, validate_block_number,
            validate_tx_hash},
    Client, Result,
};
use std::collections::HashMap;

impl Client {
    /// Returns the number of the most recent block.
    pub async fn eth_block_number(&self) -> Result<u64> {
        let query = self.create_query("proxy", "eth_blockNumber", serde_json::json!({}));
        let result: String = self.get_rpc(&query).await?;
        parse_hex_u64(&result)
    }

    /// Returns information about a block by block number.
    ///
    /// With `full_transactions` the block carries complete transaction
    /// objects instead of hashes.
    pub async fn eth_get_block_by_number(
        &self,
        tag: &str,
        full_transactions: bool,
    ) -> Result<serde_json::Value> {
        validate_block_number(tag)?;
        let query = self.create_query(
            "proxy",
            "eth_getBlockByNumber",
            HashMap::from([("tag", tag.to_string()), ("boolean", full_transactions.to_string())]),
        );
        self.get_rpc(&query).await
    }

    /// Returns the number of transactions in a block.
    pub async fn eth_get_block_transaction_count_by_number(&self, tag: &str) -> Result<u64> {
        validate_block_number(tag)?;
        let query = self.create_query(
            "proxy",
            "eth_getBlockTransactionCountByNumber",
            HashMap::from([("tag", tag)]),
        );
        let result: String = self.get_rpc(&query).await?;
        parse_hex_u64(&result)
    }

    /// Returns information about a transaction by its hash.
    pub async fn eth_get_transaction_by_hash(&self, tx_hash: &str) -> Result<serde_json::Value> {
        validate_tx_hash(tx_hash)?;
        let query = self.create_query(
            "proxy",
            "eth_getTransactionByHash",
            HashMap::from([("txhash", tx_hash)]),
        );
        self.get_rpc(&query).await
    }

    /// Returns information about a transaction by block number and index.
    pub async fn eth_get_transaction_by_block_number_and_index(
        &self,
        tag: &str,
        index: u64,
    ) -> Result<serde_json::Value> {
        validate_block_number(tag)?;
        let query = self.create_query(
            "proxy",
            "eth_getTransactionByBlockNumberAndIndex",
            HashMap::from([("tag", tag.to_string()), ("index", format!("{index:#x}"))]),
        );
        self.get_rpc(&query).await
    }

    /// Returns the number of transactions sent from an address.
    pub async fn eth_get_transaction_count(&self, address: &str, tag: &str) -> Result<u64> {
        validate_address(address)?;
        validate_block_number(tag)?;
        let query = self.create_query(
            "proxy",
            "eth_getTransactionCount",
            HashMap::from([("address", address), ("tag", tag)]),
        );
        let result: String = self.get_rpc(&query).await?;
        parse_hex_u64(&result)
    }

    /// Submits a pre-signed transaction for broadcast; returns the
    /// transaction hash.
    pub async fn eth_send_raw_transaction(&self, hex: &str) -> Result<String> {
        let body = self.create_query(
            "proxy",
            "eth_sendRawTransaction",
            HashMap::from([("hex", hex)]),
        );
        self.post_rpc(&body).await
    }

    /// Returns the receipt of a transaction, or null if pending.
    pub async fn eth_get_transaction_receipt(&self, tx_hash: &str) -> Result<serde_json::Value> {
        validate_tx_hash(tx_hash)?;
        let query = self.create_query(
            "proxy",
            "eth_getTransactionReceipt",
            HashMap::from([("txhash", tx_hash)]),
        );
        self.get_rpc(&query).await
    }

    /// Executes a message call without creating a transaction.
    pub async fn eth_call(&self, to: &str, data: &str, tag: &str) -> Result<String> {
        validate_address(to)?;
        validate_block_number(tag)?;
        let query = self.create_query(
            "proxy",
            "eth_call",
            HashMap::from([("to", to), ("data", data), ("tag", tag)]),
        );
        self.get_rpc(&query).await
    }

    /// Returns the code at a given address.
    pub async fn eth_get_code(&self, address: &str, tag: &str) -> Result<String> {
        validate_address(address)?;
        validate_block_number(tag)?;
        let query = self.create_query(
            "proxy",
            "eth_getCode",
            HashMap::from([("address", address), ("tag", tag)]),
        );
        self.get_rpc(&query).await
    }

    /// Returns the value from a storage position at a given address.
    pub async fn eth_get_storage_at(
        &self,
        address: &str,
        position: u64,
        tag: &str,
    ) -> Result<String> {
        validate_address(address)?;
        validate_block_number(tag)?;
        let query = self.create_query(
            "proxy",
            "eth_getStorageAt",
            HashMap::from([
                ("address", address.to_string()),
                ("position", format!("{position:#x}")),
                ("tag", tag.to_string()),
            ]),
        );
        self.get_rpc(&query).await
    }

    /// Returns the current price per gas in wei.
    pub async fn eth_gas_price(&self) -> Result<u128> {
        let query = self.create_query("proxy", "eth_gasPrice", serde_json::json!({}));
        let result: String = self.get_rpc(&query).await?;
        parse_hex_u128(&result)
    }

    /// Estimates the gas needed for a call; `value` and `gas_price` are wei
    /// quantities.
    pub async fn eth_estimate_gas(
        &self,
        to: &str,
        data: &str,
        value: u128,
        gas_price: u128,
    ) -> Result<u64> {
        validate_address(to)?;
        let query = self.create_query(
            "proxy",
            "eth_estimateGas",
            HashMap::from([
                ("to", to.to_string()),
                ("data", data.to_string()),
                ("value", format!("{value:#x}")),
                ("gasPrice", format!("{gas_price:#x}")),
            ]),
        );
        let result: String = self.get_rpc(&query).await?;
        parse_hex_u64(&result)
    }
}
