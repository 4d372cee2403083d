//! Capabilities injected into reducers: the wall clock and the id source.
//!
//! Reducers never read the system clock or a random source directly, so every
//! transition is reproducible with [`FixedClock`] and [`SequentialIds`].

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use uuid::Uuid;

pub trait Clock: Send + Sync {
    /// Current local wall-clock reading.
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    fn hour(&self) -> u32 {
        self.now().hour()
    }
}

pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that reads whatever it was last set to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut guard = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic ids of the form `{prefix}-{n}`, starting at 1.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{n}", self.prefix)
    }
}

/// Capabilities plus the session settings every reducer may consult.
#[derive(Clone)]
pub struct Context {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    pub user_name: String,
    pub notice_ttl: chrono::Duration,
}

impl Context {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            clock,
            ids,
            user_name: crate::seed::DEFAULT_USER_NAME.to_string(),
            notice_ttl: chrono::Duration::seconds(crate::notice::DEFAULT_NOTICE_TTL_SECS),
        }
    }

    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidIds))
    }

    pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = user_name.into();
        self
    }

    pub fn with_notice_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.notice_ttl = ttl;
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn hour(&self) -> u32 {
        self.clock.hour()
    }

    pub fn next_id(&self) -> String {
        self.ids.next_id()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("now", &self.clock.now())
            .field("user_name", &self.user_name)
            .field("notice_ttl", &self.notice_ttl)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use chrono::{NaiveDate, NaiveDateTime};

    use super::{Context, FixedClock, SequentialIds};

    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .expect("valid test timestamp")
    }

    pub fn fixed_context(now: NaiveDateTime) -> (Context, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(now));
        let context = Context::new(clock.clone(), Arc::new(SequentialIds::new("id")));
        (context, clock)
    }
}
