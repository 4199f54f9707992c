//! EDL assembly: render a category as a newline-delimited token feed.

use chrono::{DateTime, Utc};

use palisade_store::{MemoryStore, Result, StoreError};

/// Body served when a category has nothing to publish. Some firewall
/// EDL parsers treat an empty 200 body as a fetch failure.
pub const EMPTY_FEED: &str = "# No entries found";

/// Render the current, non-expired, non-whitelisted indicator set of a
/// category as plain text, one token per line.
///
/// Side-effect free and fresh at call time: this feed drives live
/// firewall blocking, so no stale serving window is acceptable.
pub fn render(store: &MemoryStore, category_name: &str, now: DateTime<Utc>) -> Result<String> {
    let category = store
        .category_by_name(category_name)
        .ok_or_else(|| StoreError::UnknownCategory(category_name.to_string()))?;

    let tokens = store.publishable_tokens(category.id, now);
    if tokens.is_empty() {
        Ok(EMPTY_FEED.to_string())
    } else {
        Ok(tokens.join("\n"))
    }
}
