//! # Theme Preference
//!
//! The dark/light choice persisted under the `theme` key.

use foodcart_core::{Theme, THEME_KEY};
use foodcart_storage::KeyValueStorage;
use tracing::debug;

use crate::error::AppResult;

/// Reads the saved theme. Anything other than `"dark"` is light.
pub async fn load_theme<S: KeyValueStorage>(storage: &S) -> AppResult<Theme> {
    let stored = storage.get_item(THEME_KEY).await?;
    let theme = Theme::from_stored(stored.as_deref());
    debug!(stored = ?stored, %theme, "Theme preference loaded");
    Ok(theme)
}

/// Persists `theme`.
pub async fn save_theme<S: KeyValueStorage>(storage: &S, theme: Theme) -> AppResult<()> {
    storage.set_item(THEME_KEY, theme.as_str()).await?;
    debug!(%theme, "Theme preference saved");
    Ok(())
}
