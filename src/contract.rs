use crate::{errors::EtherscanError, utils::validate_address, Client, Response, Result};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum SourceCodeLanguage {
    #[default]
    Solidity,
    Vyper,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceCodeEntry {
    pub content: String,
}

impl<T: Into<String>> From<T> for SourceCodeEntry {
    fn from(s: T) -> Self {
        Self { content: s.into() }
    }
}

/// The contract metadata's SourceCode field.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceCodeMetadata {
    /// Contains metadata and path mapped source code.
    Metadata {
        /// Programming language of the sources.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<SourceCodeLanguage>,
        /// Source path => source code
        #[serde(default)]
        sources: HashMap<String, SourceCodeEntry>,
        /// Compiler settings, None if the language is not Solidity.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        settings: Option<serde_json::Value>,
    },
    /// Contains only the source code.
    SourceCode(String),
}

impl SourceCodeMetadata {
    pub fn source_code(&self) -> String {
        match self {
            Self::Metadata { sources, .. } => {
                sources.values().map(|s| s.content.clone()).collect::<Vec<_>>().join("\n")
            }
            Self::SourceCode(s) => s.clone(),
        }
    }

    pub fn language(&self) -> Option<SourceCodeLanguage> {
        match self {
            Self::Metadata { language, .. } => language.clone(),
            Self::SourceCode(_) => None,
        }
    }

    pub fn sources(&self) -> HashMap<String, SourceCodeEntry> {
        match self {
            Self::Metadata { sources, .. } => sources.clone(),
            Self::SourceCode(s) => HashMap::from([("Contract".into(), s.into())]),
        }
    }

    pub fn settings(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Metadata { settings, .. } => settings.as_ref(),
            Self::SourceCode(_) => None,
        }
    }
}

/// The `SourceCode` field arrives as a plain source string, a JSON object, or
/// a JSON object wrapped in an extra pair of braces.
fn deserialize_stringified_source_code<'de, D>(
    deserializer: D,
) -> Result<SourceCodeMetadata, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.starts_with("{{") && s.ends_with("}}") {
        let s = &s[1..s.len() - 1];
        serde_json::from_str(s).map_err(de::Error::custom)
    } else if s.starts_with('{') {
        match serde_json::from_str(&s) {
            Ok(metadata) => Ok(metadata),
            Err(_) => Ok(SourceCodeMetadata::SourceCode(s)),
        }
    } else {
        Ok(SourceCodeMetadata::SourceCode(s))
    }
}

/// Etherscan contract metadata.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Metadata {
    /// Includes metadata for compiler settings and language.
    #[serde(deserialize_with = "deserialize_stringified_source_code")]
    pub source_code: SourceCodeMetadata,
    /// The ABI of the contract.
    #[serde(rename = "ABI")]
    pub abi: String,
    /// The name of the contract.
    pub contract_name: String,
    /// The raw compiler version string the contract was compiled with.
    pub compiler_version: String,
    /// Whether the optimizer was used. This value should only be 0 or 1.
    pub optimization_used: String,
    /// The number of optimizer runs.
    pub runs: String,
    /// The constructor arguments the contract was deployed with.
    #[serde(rename = "ConstructorArguments")]
    pub constructor_arguments: String,
    /// The version of the EVM the contract was deployed in.
    #[serde(rename = "EVMVersion")]
    pub evm_version: String,
    // ignored, always empty?
    pub library: String,
    /// The license of the contract.
    pub license_type: String,
    /// Whether this contract is a proxy. This value should only be 0 or 1.
    pub proxy: String,
    /// If this contract is a proxy, the address of its implementation.
    pub implementation: String,
    /// The swarm source of the contract.
    pub swarm_source: String,
}

impl Metadata {
    /// Parses the ABI string into a JSON value.
    pub fn raw_abi(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.abi)?)
    }

    /// Returns the contract's source code.
    pub fn source_code(&self) -> String {
        self.source_code.source_code()
    }
}

/// The raw response from the contract source code API endpoint
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractMetadata {
    pub items: Vec<Metadata>,
}

impl ContractMetadata {
    /// Returns the source code of all contracts, concatenated.
    pub fn source_code(&self) -> String {
        self.items.iter().map(|c| c.source_code()).collect::<Vec<_>>().join("\n")
    }
}

impl Client {
    /// Fetches a verified contract's ABI.
    pub async fn contract_abi(&self, address: &str) -> Result<serde_json::Value> {
        validate_address(address)?;
        let query =
            self.create_query("contract", "getabi", HashMap::from([("address", address)]));
        let response: Response<String> = match self.get_json(&query).await {
            Err(EtherscanError::Api { code, .. })
                if code.starts_with("Contract source code not verified") =>
            {
                return Err(EtherscanError::ContractCodeNotVerified(address.to_string()))
            }
            other => other?,
        };

        if response.result.starts_with("Contract source code not verified") {
            return Err(EtherscanError::ContractCodeNotVerified(address.to_string()))
        }
        Ok(serde_json::from_str(&response.result)?)
    }

    /// Fetches a contract's verified source code and its metadata.
    pub async fn contract_source_code(&self, address: &str) -> Result<ContractMetadata> {
        validate_address(address)?;
        let query =
            self.create_query("contract", "getsourcecode", HashMap::from([("address", address)]));
        let response: Response<ContractMetadata> = match self.get_json(&query).await {
            Err(EtherscanError::Api { code, .. })
                if code.starts_with("Contract source code not verified") =>
            {
                return Err(EtherscanError::ContractCodeNotVerified(address.to_string()))
            }
            other => other?,
        };

        // unverified contracts are reported inside an otherwise-ok envelope
        if response.result.items.iter().any(|item| item.abi == "Contract source code not verified")
        {
            return Err(EtherscanError::ContractCodeNotVerified(address.to_string()))
        }
        Ok(response.result)
    }
}
