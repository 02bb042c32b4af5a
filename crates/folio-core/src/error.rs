use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("network request for {url} failed: {reason}")]
    Network { url: String, reason: String },
    #[error("cache storage error: {0}")]
    Storage(String),
    #[error("{url} is unavailable: network failed and nothing is cached")]
    Offline { url: String },
}

pub type CacheResult<T> = Result<T, CacheError>;
