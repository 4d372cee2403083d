use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::capabilities::Context;

pub const DEFAULT_NOTICE_TTL_SECS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
}

/// A short-lived confirmation shown on top of a screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: String,
    pub message: String,
    pub kind: NoticeKind,
    pub raised_at: NaiveDateTime,
}

/// Notices still on screen for a container, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    pub fn raise(&mut self, message: impl Into<String>, kind: NoticeKind, context: &Context) {
        self.items.push(Notice {
            id: context.next_id(),
            message: message.into(),
            kind,
            raised_at: context.now(),
        });
    }

    pub fn dismiss(&mut self, id: &str) {
        self.items.retain(|notice| notice.id != id);
    }

    pub fn expire(&mut self, now: NaiveDateTime, ttl: Duration) {
        self.items.retain(|notice| now - notice.raised_at < ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::{NoticeKind, Notices};
    use crate::capabilities::testing::{at, fixed_context};

    #[test]
    fn notices_expire_after_ttl() {
        let (context, clock) = fixed_context(at(2026, 2, 1, 8, 0));
        let mut notices = Notices::default();
        notices.raise("first", NoticeKind::Info, &context);
        clock.advance(Duration::seconds(2));
        notices.raise("second", NoticeKind::Success, &context);

        notices.expire(context.now(), Duration::seconds(3));
        assert_eq!(notices.len(), 2);

        clock.advance(Duration::seconds(1));
        notices.expire(context.now(), Duration::seconds(3));
        let messages = notices.iter().map(|notice| notice.message.as_str()).collect::<Vec<_>>();
        assert_eq!(messages, ["second"]);
    }

    #[test]
    fn dismiss_removes_only_the_named_notice() {
        let (context, _) = fixed_context(at(2026, 2, 1, 8, 0));
        let mut notices = Notices::default();
        notices.raise("a", NoticeKind::Info, &context);
        notices.raise("b", NoticeKind::Info, &context);
        notices.dismiss("id-1");
        assert_eq!(notices.latest().map(|notice| notice.message.as_str()), Some("b"));
        notices.dismiss("missing");
        assert_eq!(notices.len(), 1);
    }
}
