// Provider adapters - the HTTP edge of the engine
pub mod chain_state;
pub mod dex_pairs;
pub mod holders;
pub mod rpc;
pub mod social;
pub mod token_metadata;
pub mod traits;
pub mod transactions;

pub use chain_state::RpcChainStateReader;
pub use dex_pairs::DexScreenerPairReader;
pub use holders::RpcHolderListReader;
pub use social::LunarCrushReader;
pub use token_metadata::HttpTokenMetadataReader;
pub use traits::*;
pub use transactions::HttpTransactionHistoryReader;
