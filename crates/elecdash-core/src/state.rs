use std::collections::VecDeque;

use serde::Serialize;
use url::Url;

use super::config::Config;
use super::dialogs::DialogName;
use super::dialogs::DialogRegistry;
use super::error::ConfigError;
use super::loader::DialogMounts;
use super::loader::TicketCounter;
use super::loader::ViewSlot;
use super::navigation::Direction;
use super::navigation::NavigationState;
use super::navigation::Transition;
use super::navigation::Trigger;
use super::views::ViewId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub seq: u64,
    pub ts_ms: i64,
    pub from: ViewId,
    pub to: ViewId,
    pub direction: Direction,
    pub trigger: Trigger,
}

/// Bounded record of transitions for display. Never read back by the engine.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    cap: usize,
    next_seq: u64,
    buf: VecDeque<ActivityEntry>,
}

impl ActivityLog {
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            cap,
            next_seq: 1,
            buf: VecDeque::with_capacity(cap),
        }
    }

    pub fn record(&mut self, transition: &Transition) {
        let entry = ActivityEntry {
            seq: self.next_seq,
            ts_ms: chrono::Utc::now().timestamp_millis(),
            from: transition.from,
            to: transition.to,
            direction: transition.direction,
            trigger: transition.trigger,
        };
        self.next_seq += 1;

        if self.buf.len() == self.cap {
            self.buf.pop_front();
        }
        self.buf.push_back(entry);
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ActivityEntry> {
        self.buf.iter()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn last(&self) -> Option<&ActivityEntry> {
        self.buf.back()
    }
}

#[derive(Debug, Clone)]
pub struct LocationState {
    pub url: Url,
    pub param: String,
}

/// Everything the coordinator owns. Mutated only by `reducer::reduce`.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub nav: NavigationState,
    pub location: LocationState,
    pub dialogs: DialogRegistry,
    pub dialog_mounts: DialogMounts,
    pub view_slot: ViewSlot,
    pub tickets: TicketCounter,
    pub activity: ActivityLog,
}

impl DashboardState {
    pub fn new(base_url: Url, param: impl Into<String>, history_cap: usize, activity_cap: usize) -> Self {
        Self {
            nav: NavigationState::new(history_cap),
            location: LocationState {
                url: base_url,
                param: param.into(),
            },
            dialogs: DialogRegistry::new(),
            dialog_mounts: DialogMounts::default(),
            view_slot: ViewSlot::Empty,
            tickets: TicketCounter::default(),
            activity: ActivityLog::new(activity_cap),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.base_url()?,
            config.navigation.query_param.clone(),
            config.navigation.history_capacity,
            config.navigation.activity_capacity,
        ))
    }

    pub fn current_view(&self) -> ViewId {
        self.nav.current()
    }

    pub fn location(&self) -> &str {
        self.location.url.as_str()
    }

    pub fn open_dialogs(&self) -> Vec<DialogName> {
        self.dialogs.open_dialogs()
    }
}
