use crate::{
    errors::EtherscanError,
    utils::{validate_address, validate_tx_hash},
    Client, Response, Result,
};
use serde::{Deserialize, Serialize};
use serde_aux::prelude::{deserialize_number_from_string, deserialize_option_number_from_string};
use std::{
    borrow::Cow,
    collections::HashMap,
    fmt::{Display, Error, Formatter},
};

/// The raw response from the balance-related API endpoints
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountBalance {
    pub account: String,
    pub balance: String,
}

mod genesis_string {
    use super::*;
    use serde::{
        de::{DeserializeOwned, Error as _},
        ser::Error as _,
        Deserializer, Serializer,
    };

    pub fn serialize<T, S>(
        value: &GenesisOption<T>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        let json = match value {
            GenesisOption::None => Cow::from(""),
            GenesisOption::Genesis => Cow::from("GENESIS"),
            GenesisOption::Some(value) => {
                serde_json::to_string(value).map_err(S::Error::custom)?.into()
            }
        };
        serializer.serialize_str(&json)
    }

    pub fn deserialize<'de, T, D>(
        deserializer: D,
    ) -> std::result::Result<GenesisOption<T>, D::Error>
    where
        T: DeserializeOwned,
        D: Deserializer<'de>,
    {
        let json = Cow::<'de, str>::deserialize(deserializer)?;
        if !json.is_empty() && !json.starts_with("GENESIS") {
            serde_json::from_str(&format!("\"{}\"", &json))
                .map(GenesisOption::Some)
                .map_err(D::Error::custom)
        } else if json.starts_with("GENESIS") {
            Ok(GenesisOption::Genesis)
        } else {
            Ok(GenesisOption::None)
        }
    }
}

mod json_string {
    use super::*;
    use serde::{
        de::{DeserializeOwned, Error as _},
        ser::Error as _,
        Deserializer, Serializer,
    };

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        let json = match value {
            Option::None => Cow::from(""),
            Option::Some(value) => serde_json::to_string(value).map_err(S::Error::custom)?.into(),
        };
        serializer.serialize_str(&json)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
    where
        T: DeserializeOwned,
        D: Deserializer<'de>,
    {
        let json = Cow::<'de, str>::deserialize(deserializer)?;
        if json.is_empty() {
            Ok(Option::None)
        } else {
            serde_json::from_str(&format!("\"{}\"", &json))
                .map(Option::Some)
                .map_err(D::Error::custom)
        }
    }
}

mod hex_string {
    use super::*;
    use serde::{
        de::{DeserializeOwned, Error as _},
        ser::Error as _,
        Deserializer, Serializer,
    };

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        let json = match value {
            Option::None => Cow::from("0x"),
            Option::Some(value) => serde_json::to_string(value).map_err(S::Error::custom)?.into(),
        };
        serializer.serialize_str(&json)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
    where
        T: DeserializeOwned,
        D: Deserializer<'de>,
    {
        let json = Cow::<'de, str>::deserialize(deserializer)?;
        if json.is_empty() || json == "0x" {
            Ok(Option::None)
        } else {
            serde_json::from_str(&format!("\"{}\"", &json))
                .map(Option::Some)
                .map_err(D::Error::custom)
        }
    }
}

/// Possible values for some field responses.
///
/// Transactions from the Genesis block may contain fields that do not conform
/// to the expected types.
#[derive(Clone, Debug)]
pub enum GenesisOption<T> {
    None,
    Genesis,
    Some(T),
}

impl<T> From<GenesisOption<T>> for Option<T> {
    fn from(value: GenesisOption<T>) -> Self {
        match value {
            GenesisOption::Some(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> GenesisOption<T> {
    pub fn is_genesis(&self) -> bool {
        matches!(self, GenesisOption::Genesis)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            GenesisOption::Some(value) => Some(value),
            _ => None,
        }
    }
}

/// The raw response from the transaction list API endpoint
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalTransaction {
    pub is_error: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub block_number: u64,
    pub time_stamp: String,
    #[serde(with = "genesis_string")]
    pub hash: GenesisOption<String>,
    #[serde(with = "json_string")]
    pub nonce: Option<String>,
    #[serde(with = "json_string")]
    pub block_hash: Option<String>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub transaction_index: Option<u64>,
    #[serde(with = "genesis_string")]
    pub from: GenesisOption<String>,
    #[serde(with = "json_string")]
    pub to: Option<String>,
    pub value: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub gas: u64,
    #[serde(with = "json_string")]
    pub gas_price: Option<String>,
    #[serde(rename = "txreceipt_status")]
    pub tx_receipt_status: String,
    pub input: String,
    #[serde(with = "json_string")]
    pub contract_address: Option<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub gas_used: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub cumulative_gas_used: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub confirmations: u64,
    #[serde(with = "hex_string")]
    pub method_id: Option<String>,
    #[serde(with = "json_string")]
    pub function_name: Option<String>,
}

/// The raw response from the internal transaction list API endpoint
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalTransaction {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub block_number: u64,
    pub time_stamp: String,
    pub hash: String,
    pub from: String,
    #[serde(with = "genesis_string")]
    pub to: GenesisOption<String>,
    pub value: String,
    #[serde(with = "genesis_string")]
    pub contract_address: GenesisOption<String>,
    #[serde(with = "genesis_string")]
    pub input: GenesisOption<String>,
    #[serde(rename = "type")]
    pub result_type: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub gas: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub gas_used: u64,
    pub trace_id: String,
    pub is_error: String,
    pub err_code: String,
}

/// The raw response from the ERC20 transfer list API endpoint
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ERC20TokenTransferEvent {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub block_number: u64,
    pub time_stamp: String,
    pub hash: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub nonce: u64,
    pub block_hash: String,
    pub from: String,
    pub contract_address: String,
    #[serde(with = "json_string")]
    pub to: Option<String>,
    pub value: String,
    pub token_name: String,
    pub token_symbol: String,
    pub token_decimal: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub transaction_index: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub gas: u64,
    #[serde(with = "json_string")]
    pub gas_price: Option<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub gas_used: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub cumulative_gas_used: u64,
    /// deprecated
    pub input: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub confirmations: u64,
}

/// The raw response from the ERC721 transfer list API endpoint
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ERC721TokenTransferEvent {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub block_number: u64,
    pub time_stamp: String,
    pub hash: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub nonce: u64,
    pub block_hash: String,
    pub from: String,
    pub contract_address: String,
    #[serde(with = "json_string")]
    pub to: Option<String>,
    #[serde(rename = "tokenID")]
    pub token_id: String,
    pub token_name: String,
    pub token_symbol: String,
    pub token_decimal: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub transaction_index: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub gas: u64,
    #[serde(with = "json_string")]
    pub gas_price: Option<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub gas_used: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub cumulative_gas_used: u64,
    /// deprecated
    pub input: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub confirmations: u64,
}

/// The raw response from the ERC1155 transfer list API endpoint
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ERC1155TokenTransferEvent {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub block_number: u64,
    pub time_stamp: String,
    pub hash: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub nonce: u64,
    pub block_hash: String,
    pub from: String,
    pub contract_address: String,
    #[serde(with = "json_string")]
    pub to: Option<String>,
    #[serde(rename = "tokenID")]
    pub token_id: String,
    pub token_value: String,
    pub token_name: String,
    pub token_symbol: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub transaction_index: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub gas: u64,
    #[serde(with = "json_string")]
    pub gas_price: Option<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub gas_used: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub cumulative_gas_used: u64,
    /// deprecated
    pub input: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub confirmations: u64,
}

/// The raw response from the mined blocks API endpoint
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinedBlock {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub block_number: u64,
    pub time_stamp: String,
    pub block_reward: String,
}

/// The pre-defined block parameter for balance API endpoints
#[derive(Clone, Copy, Debug, Default)]
pub enum Tag {
    Earliest,
    Pending,
    #[default]
    Latest,
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), Error> {
        match self {
            Tag::Earliest => write!(f, "earliest"),
            Tag::Pending => write!(f, "pending"),
            Tag::Latest => write!(f, "latest"),
        }
    }
}

/// The list sorting preference
#[derive(Clone, Copy, Debug)]
pub enum Sort {
    Asc,
    Desc,
}

impl Display for Sort {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), Error> {
        match self {
            Sort::Asc => write!(f, "asc"),
            Sort::Desc => write!(f, "desc"),
        }
    }
}

/// Common optional arguments for the transaction or event list API endpoints
#[derive(Clone, Copy, Debug)]
pub struct TxListParams {
    start_block: u64,
    end_block: u64,
    page: u64,
    offset: u64,
    sort: Sort,
}

impl TxListParams {
    pub fn new(start_block: u64, end_block: u64, page: u64, offset: u64, sort: Sort) -> Self {
        Self { start_block, end_block, page, offset, sort }
    }
}

impl Default for TxListParams {
    fn default() -> Self {
        Self { start_block: 0, end_block: 99999999, page: 0, offset: 10000, sort: Sort::Asc }
    }
}

impl From<TxListParams> for HashMap<&'static str, String> {
    fn from(tx_params: TxListParams) -> Self {
        let mut params = HashMap::new();
        params.insert("startBlock", tx_params.start_block.to_string());
        params.insert("endBlock", tx_params.end_block.to_string());
        params.insert("page", tx_params.page.to_string());
        params.insert("offset", tx_params.offset.to_string());
        params.insert("sort", tx_params.sort.to_string());
        params
    }
}

/// Options for querying internal transactions
#[derive(Clone, Debug)]
pub enum InternalTxQueryOption {
    ByAddress(String),
    ByTransactionHash(String),
    ByBlockRange,
}

/// Options for querying ERC20 or ERC721 token transfers
#[derive(Clone, Debug)]
pub enum TokenQueryOption {
    ByAddress(String),
    ByContract(String),
    ByAddressAndContract(String, String),
}

impl TokenQueryOption {
    fn validate(&self) -> Result<()> {
        match self {
            TokenQueryOption::ByAddress(address) => validate_address(address),
            TokenQueryOption::ByContract(contract) => validate_address(contract),
            TokenQueryOption::ByAddressAndContract(address, contract) => {
                validate_address(address)?;
                validate_address(contract)
            }
        }
    }

    pub fn into_params(self, list_params: TxListParams) -> HashMap<&'static str, String> {
        let mut params: HashMap<&'static str, String> = list_params.into();
        match self {
            TokenQueryOption::ByAddress(address) => {
                params.insert("address", address);
                params
            }
            TokenQueryOption::ByContract(contract) => {
                params.insert("contractaddress", contract);
                params
            }
            TokenQueryOption::ByAddressAndContract(address, contract) => {
                params.insert("address", address);
                params.insert("contractaddress", contract);
                params
            }
        }
    }
}

/// The pre-defined block type for retrieving mined blocks
#[derive(Copy, Clone, Debug, Default)]
pub enum BlockType {
    #[default]
    CanonicalBlocks,
    Uncles,
}

impl Display for BlockType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), Error> {
        match self {
            BlockType::CanonicalBlocks => write!(f, "blocks"),
            BlockType::Uncles => write!(f, "uncles"),
        }
    }
}

impl Client {
    /// Returns the Ether balance of a given address.
    ///
    /// ```no_run
    /// # use etherscan_api::{Chain, Client};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    ///     let client = Client::new(Chain::Mainnet, "API_KEY").unwrap();
    ///     let balance = client
    ///         .get_ether_balance_single("0x58eB28A67731c570Ef827C365c89B5751F9E6b0a", None)
    ///         .await.unwrap();
    /// # }
    /// ```
    pub async fn get_ether_balance_single(
        &self,
        address: &str,
        tag: Option<Tag>,
    ) -> Result<AccountBalance> {
        validate_address(address)?;
        let tag_str = tag.unwrap_or_default().to_string();
        let query = self.create_query(
            "account",
            "balance",
            HashMap::from([("address", address), ("tag", &tag_str)]),
        );
        let response: Response<String> = self.get_json(&query).await?;

        match response.status.as_str() {
            "0" => Err(EtherscanError::BalanceFailed),
            "1" => Ok(AccountBalance { account: address.to_string(), balance: response.result }),
            err => Err(EtherscanError::BadStatusCode(err.to_string())),
        }
    }

    /// Returns the balance of the accounts from a list of addresses.
    pub async fn get_ether_balance_multi(
        &self,
        addresses: &[&str],
        tag: Option<Tag>,
    ) -> Result<Vec<AccountBalance>> {
        for address in addresses {
            validate_address(address)?;
        }
        let tag_str = tag.unwrap_or_default().to_string();
        let addrs = addresses.join(",");
        let query = self.create_query(
            "account",
            "balancemulti",
            HashMap::from([("address", addrs.as_str()), ("tag", tag_str.as_str())]),
        );
        let response: Response<Vec<AccountBalance>> = self.get_json(&query).await?;

        match response.status.as_str() {
            "0" => Err(EtherscanError::BalanceFailed),
            "1" => Ok(response.result),
            err => Err(EtherscanError::BadStatusCode(err.to_string())),
        }
    }

    /// Returns the list of transactions performed by an address, with optional pagination.
    pub async fn get_transactions(
        &self,
        address: &str,
        params: Option<TxListParams>,
    ) -> Result<Vec<NormalTransaction>> {
        validate_address(address)?;
        let mut tx_params: HashMap<&str, String> = params.unwrap_or_default().into();
        tx_params.insert("address", address.to_string());
        let query = self.create_query("account", "txlist", tx_params);
        let response: Response<Vec<NormalTransaction>> = self.get_json(&query).await?;

        Ok(response.result)
    }

    /// Returns the list of internal transactions performed by an address or within a transaction,
    /// with optional pagination.
    pub async fn get_internal_transactions(
        &self,
        tx_query_option: InternalTxQueryOption,
        params: Option<TxListParams>,
    ) -> Result<Vec<InternalTransaction>> {
        let mut tx_params: HashMap<&str, String> = params.unwrap_or_default().into();
        match tx_query_option {
            InternalTxQueryOption::ByAddress(address) => {
                validate_address(&address)?;
                tx_params.insert("address", address);
            }
            InternalTxQueryOption::ByTransactionHash(tx_hash) => {
                validate_tx_hash(&tx_hash)?;
                tx_params.insert("txhash", tx_hash);
            }
            _ => {}
        }
        let query = self.create_query("account", "txlistinternal", tx_params);
        let response: Response<Vec<InternalTransaction>> = self.get_json(&query).await?;

        Ok(response.result)
    }

    /// Returns the list of ERC-20 tokens transferred by an address, with optional filtering by
    /// token contract.
    pub async fn get_erc20_token_transfer_events(
        &self,
        event_query_option: TokenQueryOption,
        params: Option<TxListParams>,
    ) -> Result<Vec<ERC20TokenTransferEvent>> {
        event_query_option.validate()?;
        let params = event_query_option.into_params(params.unwrap_or_default());
        let query = self.create_query("account", "tokentx", params);
        let response: Response<Vec<ERC20TokenTransferEvent>> = self.get_json(&query).await?;

        Ok(response.result)
    }

    /// Returns the list of ERC-721 ( NFT ) tokens transferred by an address, with optional
    /// filtering by token contract.
    pub async fn get_erc721_token_transfer_events(
        &self,
        event_query_option: TokenQueryOption,
        params: Option<TxListParams>,
    ) -> Result<Vec<ERC721TokenTransferEvent>> {
        event_query_option.validate()?;
        let params = event_query_option.into_params(params.unwrap_or_default());
        let query = self.create_query("account", "tokennfttx", params);
        let response: Response<Vec<ERC721TokenTransferEvent>> = self.get_json(&query).await?;

        Ok(response.result)
    }

    /// Returns the list of ERC-1155 ( NFT ) tokens transferred by an address, with optional
    /// filtering by token contract.
    pub async fn get_erc1155_token_transfer_events(
        &self,
        event_query_option: TokenQueryOption,
        params: Option<TxListParams>,
    ) -> Result<Vec<ERC1155TokenTransferEvent>> {
        event_query_option.validate()?;
        let params = event_query_option.into_params(params.unwrap_or_default());
        let query = self.create_query("account", "token1155tx", params);
        let response: Response<Vec<ERC1155TokenTransferEvent>> = self.get_json(&query).await?;

        Ok(response.result)
    }

    /// Returns the balance of an ERC-20 token for a given holder address.
    pub async fn get_token_balance(&self, contract: &str, address: &str) -> Result<String> {
        validate_address(contract)?;
        validate_address(address)?;
        let query = self.create_query(
            "account",
            "tokenbalance",
            HashMap::from([
                ("contractaddress", contract),
                ("address", address),
                ("tag", "latest"),
            ]),
        );
        let response: Response<String> = self.get_json(&query).await?;

        match response.status.as_str() {
            "0" => Err(EtherscanError::BalanceFailed),
            "1" => Ok(response.result),
            err => Err(EtherscanError::BadStatusCode(err.to_string())),
        }
    }

    /// Returns the list of blocks mined by an address.
    pub async fn get_mined_blocks(
        &self,
        address: &str,
        block_type: Option<BlockType>,
        page_and_offset: Option<(u64, u64)>,
    ) -> Result<Vec<MinedBlock>> {
        validate_address(address)?;
        let mut params = HashMap::new();
        params.insert("address", address.to_string());
        params.insert("blocktype", block_type.unwrap_or_default().to_string());
        if let Some((page, offset)) = page_and_offset {
            params.insert("page", page.to_string());
            params.insert("offset", offset.to_string());
        }
        let query = self.create_query("account", "getminedblocks", params);
        let response: Response<Vec<MinedBlock>> = self.get_json(&query).await?;

        Ok(response.result)
    }
}
