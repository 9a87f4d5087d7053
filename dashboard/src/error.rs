//! Errors raised at the crate's fallible edges: decoding backend JSON,
//! encoding exports and selecting a locale. The aggregation pipeline itself
//! never fails.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to decode {context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode presentation model: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid language tag `{0}`")]
    InvalidLanguage(String),

    #[error("localization unavailable: {0}")]
    Localization(#[from] i18n_embed::I18nEmbedError),
}
