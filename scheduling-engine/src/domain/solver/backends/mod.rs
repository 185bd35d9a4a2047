#[cfg(feature = "coin-cbc")]
pub mod coin_cbc;
#[cfg(feature = "highs")]
pub mod highs;
#[cfg(feature = "microlp")]
pub mod microlp;

#[cfg(feature = "coin-cbc")]
pub use coin_cbc::CoinCbcBackend;
#[cfg(feature = "highs")]
pub use highs::HighsBackend;
#[cfg(feature = "microlp")]
pub use microlp::MicrolpBackend;
