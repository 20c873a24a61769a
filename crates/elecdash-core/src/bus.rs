//! Process-wide command channel between the voice agent and the dashboard.
//!
//! The bus is an injectable value, not a global: whoever owns the dashboard
//! holds a [`Subscription`] for as long as it is active. Events are queued per
//! subscriber in emission order and drained on the owner's event-loop turn.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::sync::Weak;

use crossbeam_channel::Receiver;
use crossbeam_channel::Sender;
use serde::Deserialize;
use serde::Serialize;

/// Dialog half of the voice contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CommandEvent {
    Open {
        #[serde(rename = "dialogName")]
        dialog_name: String,
    },
    CloseAll,
}

impl CommandEvent {
    pub fn open(dialog_name: impl Into<String>) -> Self {
        Self::Open {
            dialog_name: dialog_name.into(),
        }
    }
}

/// Navigation half of the voice contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NavigationCommand {
    Navigate { section: String },
    Back,
    Home,
    Refresh,
}

impl NavigationCommand {
    pub fn navigate(section: impl Into<String>) -> Self {
        Self::Navigate {
            section: section.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "detail", rename_all = "camelCase")]
pub enum BusEvent {
    Navigation(NavigationCommand),
    Dialog(CommandEvent),
}

impl BusEvent {
    pub fn parse_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<CommandEvent> for BusEvent {
    fn from(value: CommandEvent) -> Self {
        Self::Dialog(value)
    }
}

impl From<NavigationCommand> for BusEvent {
    fn from(value: NavigationCommand) -> Self {
        Self::Navigation(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

#[derive(Debug, Default)]
struct BusInner {
    next_id: u64,
    subscribers: Vec<(SubscriberId, Sender<BusEvent>)>,
}

#[derive(Debug, Clone, Default)]
pub struct CommandBus {
    inner: Arc<Mutex<BusInner>>,
}

fn lock(inner: &Mutex<BusInner>) -> MutexGuard<'_, BusInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl CommandBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut inner = lock(&self.inner);
        inner.next_id = inner.next_id.saturating_add(1);
        let id = SubscriberId(inner.next_id);
        inner.subscribers.push((id, tx));
        tracing::debug!(subscriber = id.0, "command bus subscription opened");
        Subscription {
            id,
            bus: Arc::downgrade(&self.inner),
            rx,
        }
    }

    /// Fans the event out to every live subscriber. Returns how many
    /// received it; zero is not an error.
    pub fn emit(&self, event: impl Into<BusEvent>) -> usize {
        let event = event.into();
        let mut inner = lock(&self.inner);
        inner
            .subscribers
            .retain(|(_, tx)| tx.send(event.clone()).is_ok());
        let delivered = inner.subscribers.len();
        if delivered == 0 {
            tracing::debug!(?event, "command bus event had no subscribers");
        }
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).subscribers.len()
    }
}

/// Receiving end; unsubscribes when dropped.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    bus: Weak<Mutex<BusInner>>,
    rx: Receiver<BusEvent>,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn drain(&self) -> Vec<BusEvent> {
        self.rx.try_iter().collect()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            lock(&inner).subscribers.retain(|(id, _)| *id != self.id);
            tracing::debug!(subscriber = self.id.0, "command bus subscription closed");
        }
    }
}
