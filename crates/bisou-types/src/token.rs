//! Static token metadata.

use serde::Serialize;

/// Display metadata for the token on sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub name: &'static str,
    pub symbol: &'static str,
    pub contract_address: &'static str,
    pub network: &'static str,
    pub image_url: &'static str,
    pub total_supply: &'static str,
}

/// The $BISOU token on Base.
pub const BISOU: TokenInfo = TokenInfo {
    name: "BISOU",
    symbol: "$BISOU",
    contract_address: "0x951Ed6e6e75e913494C19173C30C6D3C59CffF8F",
    network: "Base",
    image_url: "https://ipfs.io/ipfs/bafkreighrlz43fgcdmqdtyv755zmsqsn5iey5stxvicgxfygfn6mxoy474",
    total_supply: "1,000,000 $BISOU",
};
