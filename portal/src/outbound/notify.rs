//! Notifier adapter that turns notices into log events.

use tracing::{info, warn};

use crate::domain::ports::Notifier;
use crate::domain::{Notice, NoticeLevel};

/// Notifier emitting each notice as a `tracing` event.
///
/// Success notices log at `info`, error notices at `warn`, under the
/// `notice` field so they can be filtered apart from diagnostic events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!(notice = %notice.message, "success"),
            NoticeLevel::Error => warn!(notice = %notice.message, "error"),
        }
    }
}
