#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("wallet not connected")]
    WalletNotConnected,

    #[error("transaction error: {reason}")]
    Transaction { reason: String },

    #[error("price error: {reason}")]
    Price { reason: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
