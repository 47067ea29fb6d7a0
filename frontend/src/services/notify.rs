//! User-visible notifications.
//!
//! Read and write failures block the operator with a browser alert; poll
//! failures never come through here.

/// Sink for messages the operator must acknowledge.
pub trait Notifier {
    fn alert(&self, message: &str);
}

/// [`Notifier`] backed by `window.alert`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
    fn alert(&self, message: &str) {
        log::warn!("{}", message);
        if let Err(e) = gloo_utils::window().alert_with_message(message) {
            log::error!("Failed to show alert: {:?}", e);
        }
    }
}
