use thiserror::Error;

/// Failures of the key/value storage behind the stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot could not be encoded: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("storage lock poisoned")]
    Poisoned,
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("customer field `{0}` is required")]
    MissingField(&'static str),
    #[error("cart is empty")]
    EmptyCart,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
    #[error("review author is required")]
    EmptyAuthor,
    #[error("review text is required")]
    EmptyText,
    #[error(transparent)]
    Store(#[from] StoreError),
}
