use super::bus::BusEvent;
use super::dialogs::DialogName;
use super::loader::ModuleContent;
use super::loader::Ticket;
use super::views::ViewId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashAction {
    Host(HostAction),
    User(UserAction),
    Bus(BusEvent),
    Runtime(RuntimeAction),
}

/// Signals from the environment the dashboard runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    Load { location: String },
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    SelectView(ViewId),
    /// The callback handed to every view: canonical id or any known phrase.
    RequestNavigation(String),
    Refresh,
    RetryView,
    /// A form closing itself through its own visibility control.
    DismissDialog(DialogName),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeAction {
    ViewAcquired {
        ticket: Ticket,
        view: ViewId,
        outcome: Result<ModuleContent, String>,
    },
    DialogAcquired {
        ticket: Ticket,
        dialog: DialogName,
        outcome: Result<ModuleContent, String>,
    },
}

impl From<BusEvent> for DashAction {
    fn from(value: BusEvent) -> Self {
        Self::Bus(value)
    }
}

impl From<UserAction> for DashAction {
    fn from(value: UserAction) -> Self {
        Self::User(value)
    }
}

impl From<HostAction> for DashAction {
    fn from(value: HostAction) -> Self {
        Self::Host(value)
    }
}

impl From<RuntimeAction> for DashAction {
    fn from(value: RuntimeAction) -> Self {
        Self::Runtime(value)
    }
}
