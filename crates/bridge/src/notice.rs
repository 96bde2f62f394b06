use alloy_primitives::TxHash;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// What the user can do about a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RetryHint {
    /// Nothing to do.
    None,
    /// There is no wallet; the user has to install one first.
    InstallWallet,
    /// Nothing happened on chain, the action can be repeated.
    SafeToRetry,
    /// Funds may have moved already; repeating the action could pay twice.
    DoNotRetry,
}

/// A rendered outcome of an action or session change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub retry: RetryHint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<TxHash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>, retry: RetryHint) -> Self {
        Self { level, message: message.into(), retry, tx_hash: None, explorer_url: None }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message, RetryHint::None)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message, RetryHint::None)
    }

    pub fn warning(message: impl Into<String>, retry: RetryHint) -> Self {
        Self::new(NoticeLevel::Warning, message, retry)
    }

    pub fn error(message: impl Into<String>, retry: RetryHint) -> Self {
        Self::new(NoticeLevel::Error, message, retry)
    }

    /// Another action is still running.
    pub fn busy() -> Self {
        Self::warning("Another action is in progress, please wait for it to finish", RetryHint::SafeToRetry)
    }

    /// Attaches the transaction the notice is about.
    pub fn with_tx(mut self, tx_hash: TxHash, explorer_url: Option<String>) -> Self {
        self.tx_hash = Some(tx_hash);
        self.explorer_url = explorer_url;
        self
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(url) = &self.explorer_url {
            write!(f, " ({url})")?;
        } else if let Some(hash) = &self.tx_hash {
            write!(f, " ({hash})")?;
        }
        Ok(())
    }
}
