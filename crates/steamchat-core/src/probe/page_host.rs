use crate::CoreResult;

use std::future::Future;

use serde_json::Value;

/// The embedded page as seen by the core.
///
/// Implementations route each call to the native webview. Script evaluation
/// resolves with the script's JSON value, or an error when the page threw or
/// the host is gone. No method may panic across this boundary.
pub trait PageHost {
    /// URL the page is currently displaying.
    fn current_url(&self) -> String;

    /// Evaluate `script` in the page and resolve with its JSON result.
    fn execute_script(&self, script: &str) -> impl Future<Output = CoreResult<Value>>;

    /// Navigate the page to `url`.
    fn load_url(&self, url: &str) -> CoreResult<()>;

    /// Reload the current page.
    fn reload(&self) -> CoreResult<()>;

    /// Clear cookies, local storage and other browsing data.
    fn clear_storage(&self) -> impl Future<Output = CoreResult<()>>;
}
