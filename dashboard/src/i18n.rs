//! Internationalization (i18n) support for `jejak-dashboard`.
//!
//! This module wires together:
//! - `i18n-embed` (language selection + asset loading)
//! - `i18n_embed::fluent` (message formatting)
//! - `rust-embed` (compile-time embedding of `.ftl` files)
//! - `i18n-embed-fl` (`fl!` macro for compile‑time checked lookups)
//!
//! Folder layout (relative to this crate root):
//! ```text
//! i18n.toml
//! i18n/
//!   id-ID/jejak-dashboard.ftl   (fallback/reference)
//!   en-US/jejak-dashboard.ftl   (additional locale)
//! ```
//!
//! Only category labels and share-summary sentences are localized. Chart
//! labels (`Minggu N`, month names) are fixed tables in `footprint::trend`
//! so a presentation model never depends on the active language.
//!
//! Public API surface:
//! - `init()` – load localization bundles for the OS/browser languages (idempotent).
//! - `set_language(tag)` – switch the global loader at runtime.
//! - `loader_for(tag)` – a private loader pinned to one language.
//! - `category_label(loader, slice)` – label for a breakdown slice.
//! - `LOADER` – global `FluentLanguageLoader` consumed by helpers & the `t!` macro.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use tracing::warn;
use unic_langid::LanguageIdentifier;

use crate::error::Error;
use crate::footprint::CanonicalCategory;

pub use i18n_embed_fl::fl; // Re-export for convenience.

/// Ergonomic translation macro against the global loader.
/// Examples:
///     t!("share-title")
///     t!("share-total", value = "12", unit = "kg")
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent "domain" (matches the package name / the fallback FTL filename).
const DOMAIN: &str = "jejak-dashboard";

pub const FALLBACK_LANGUAGE: &str = "id-ID";

/// Embed all locale folders under `i18n/`.
#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Global language loader used with the `t!` macro.
pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(new_loader);

static INIT: Once = Once::new();

fn new_loader() -> FluentLanguageLoader {
    let fallback: LanguageIdentifier = FALLBACK_LANGUAGE
        .parse()
        .expect("valid fallback language identifier");
    FluentLanguageLoader::new(DOMAIN, fallback)
}

/// Load `requested` into `loader`.
fn select(
    loader: &FluentLanguageLoader,
    requested: &[LanguageIdentifier],
) -> Result<(), i18n_embed::I18nEmbedError> {
    i18n_embed::select(loader, &Localizations, requested)?;
    // Share text is copied verbatim; bidi isolation marks would leak into it.
    loader.set_use_isolating(false);
    Ok(())
}

/// Initialize i18n (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = select(&LOADER, &requested) {
            warn!(%err, "failed selecting languages; continuing with fallback");
        }
    });
}

/// Switch the global language at runtime. Unparseable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), Error> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        return Ok(());
    };
    select(&LOADER, &[lang])?;
    Ok(())
}

/// A standalone loader for `tag`, falling back to Indonesian for missing messages.
pub fn loader_for(tag: &str) -> Result<FluentLanguageLoader, Error> {
    let lang: LanguageIdentifier = tag
        .parse()
        .map_err(|_| Error::InvalidLanguage(tag.to_string()))?;
    let loader = new_loader();
    select(&loader, &[lang])?;
    Ok(loader)
}

/// List available (embedded) language identifiers.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

/// Label for a breakdown slice: the localized category name for template
/// slots, the backend's own name for extras.
pub fn category_label(loader: &FluentLanguageLoader, slice: &CanonicalCategory) -> String {
    if !slice.is_extra() && loader.has(&slice.display_key) {
        loader.get(&slice.display_key)
    } else {
        slice.display_key.clone()
    }
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}
