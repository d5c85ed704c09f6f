// Notification surface - One transient banner at a time
use crate::domain::notification::{Banner, BannerKind};
use std::time::Duration;

/// How long a banner stays attached unless replaced.
pub const BANNER_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Default)]
pub struct NotificationSurface {
    current: Option<Banner>,
    next_id: u64,
}

impl NotificationSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever banner is showing and returns the new banner's id.
    pub fn show(&mut self, kind: BannerKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.current = Some(Banner {
            id: self.next_id,
            kind,
            message: message.into(),
        });
        self.next_id
    }

    /// Removes the banner only if it is still the one with `id`.
    pub fn dismiss(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|b| b.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&Banner> {
        self.current.as_ref()
    }

    #[cfg(test)]
    pub fn visible_count(&self) -> usize {
        usize::from(self.current.is_some())
    }
}
