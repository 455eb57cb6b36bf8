use serde::{Deserialize, Serialize};
use std::fmt;

/// The networks this client can be pointed at.
///
/// Each indexable chain maps to an API endpoint and a block-explorer site in
/// [`Chain::etherscan_urls`]; local development chains are listed so callers
/// can pass them around, but they resolve to no endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Chain {
    Mainnet,
    Goerli,
    Sepolia,
    BinanceSmartChain,
    Polygon,
    Avalanche,
    Arbitrum,
    Optimism,
    AnvilHardhat,
    Dev,
}

impl Chain {
    /// Returns `(api url, site url)` for the chain, or `None` if the chain
    /// has no explorer deployment.
    pub fn etherscan_urls(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Chain::Mainnet => Some(("https://api.etherscan.io/api", "https://etherscan.io")),
            Chain::Goerli => {
                Some(("https://api-goerli.etherscan.io/api", "https://goerli.etherscan.io"))
            }
            Chain::Sepolia => {
                Some(("https://api-sepolia.etherscan.io/api", "https://sepolia.etherscan.io"))
            }
            Chain::BinanceSmartChain => Some(("https://api.bscscan.com/api", "https://bscscan.com")),
            Chain::Polygon => Some(("https://api.polygonscan.com/api", "https://polygonscan.com")),
            Chain::Avalanche => Some(("https://api.snowtrace.io/api", "https://snowtrace.io")),
            Chain::Arbitrum => Some(("https://api.arbiscan.io/api", "https://arbiscan.io")),
            Chain::Optimism => Some((
                "https://api-optimistic.etherscan.io/api",
                "https://optimistic.etherscan.io",
            )),
            Chain::AnvilHardhat | Chain::Dev => None,
        }
    }

    /// The environment variable holding the API key for this chain's
    /// explorer.
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            Chain::Mainnet |
            Chain::Goerli |
            Chain::Sepolia |
            Chain::BinanceSmartChain |
            Chain::Arbitrum |
            Chain::Optimism => Some("ETHERSCAN_API_KEY"),
            Chain::Polygon => Some("POLYGONSCAN_API_KEY"),
            Chain::Avalanche => Some("SNOWTRACE_API_KEY"),
            Chain::AnvilHardhat | Chain::Dev => None,
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Chain::Mainnet => "mainnet",
            Chain::Goerli => "goerli",
            Chain::Sepolia => "sepolia",
            Chain::BinanceSmartChain => "bsc",
            Chain::Polygon => "polygon",
            Chain::Avalanche => "avalanche",
            Chain::Arbitrum => "arbitrum",
            Chain::Optimism => "optimism",
            Chain::AnvilHardhat => "anvil-hardhat",
            Chain::Dev => "dev",
        };
        f.write_str(name)
    }
}
