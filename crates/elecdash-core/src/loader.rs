use serde::Deserialize;
use serde::Serialize;

use super::dialogs::DialogName;
use super::dialogs::DIALOG_COUNT;
use super::views::ViewId;

/// Identity of one acquisition request. Monotonic per session; a result is
/// applied only while its ticket is the one the slot is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ticket(pub u64);

#[derive(Debug, Clone, Default)]
pub struct TicketCounter {
    last: u64,
}

impl TicketCounter {
    pub fn issue(&mut self) -> Ticket {
        self.last = self.last.saturating_add(1);
        Ticket(self.last)
    }
}

/// Whatever the acquisition mechanism produced for a view or form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleContent {
    pub title: String,
    #[serde(default)]
    pub body: Vec<String>,
}

/// The visual slot the current view renders into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewSlot {
    Empty,
    /// Placeholder shown while the module is fetched.
    Pending { view: ViewId, ticket: Ticket },
    Ready {
        view: ViewId,
        ticket: Ticket,
        content: ModuleContent,
    },
    Failed {
        view: ViewId,
        ticket: Ticket,
        reason: String,
    },
}

impl ViewSlot {
    pub fn view(&self) -> Option<ViewId> {
        match self {
            Self::Empty => None,
            Self::Pending { view, .. } | Self::Ready { view, .. } | Self::Failed { view, .. } => {
                Some(*view)
            }
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Pending { .. } => "loading",
            Self::Ready { .. } => "ready",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Outcome of resolving an acquisition against the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    Applied,
    Stale,
}

impl ViewSlot {
    pub fn begin(&mut self, view: ViewId, ticket: Ticket) {
        *self = Self::Pending { view, ticket };
    }

    pub fn settle(
        &mut self,
        view: ViewId,
        ticket: Ticket,
        outcome: Result<ModuleContent, String>,
    ) -> Settle {
        match &*self {
            Self::Pending {
                view: waiting_view,
                ticket: waiting_ticket,
            } if *waiting_ticket == ticket && *waiting_view == view => {}
            _ => return Settle::Stale,
        }
        *self = match outcome {
            Ok(content) => Self::Ready {
                view,
                ticket,
                content,
            },
            Err(reason) => Self::Failed {
                view,
                ticket,
                reason,
            },
        };
        Settle::Applied
    }
}

/// Mount state of one form, slaved to its DialogFlag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DialogMount {
    #[default]
    Unmounted,
    Acquiring {
        ticket: Ticket,
    },
    Mounted {
        ticket: Ticket,
        content: ModuleContent,
    },
    Failed {
        ticket: Ticket,
        reason: String,
    },
}

impl DialogMount {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unmounted => "unmounted",
            Self::Acquiring { .. } => "loading",
            Self::Mounted { .. } => "mounted",
            Self::Failed { .. } => "failed",
        }
    }

    pub fn holds_resource(&self) -> bool {
        matches!(self, Self::Acquiring { .. } | Self::Mounted { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct DialogMounts {
    mounts: [DialogMount; DIALOG_COUNT],
}

impl DialogMounts {
    pub fn get(&self, dialog: DialogName) -> &DialogMount {
        &self.mounts[dialog as usize]
    }

    /// Starts acquisition unless the form is already loading or mounted.
    pub fn begin(&mut self, dialog: DialogName, ticket: Ticket) -> bool {
        let slot = &mut self.mounts[dialog as usize];
        if slot.holds_resource() {
            return false;
        }
        *slot = DialogMount::Acquiring { ticket };
        true
    }

    pub fn settle(
        &mut self,
        dialog: DialogName,
        ticket: Ticket,
        outcome: Result<ModuleContent, String>,
    ) -> Settle {
        let slot = &mut self.mounts[dialog as usize];
        match &*slot {
            DialogMount::Acquiring { ticket: waiting } if *waiting == ticket => {}
            _ => return Settle::Stale,
        }
        *slot = match outcome {
            Ok(content) => DialogMount::Mounted { ticket, content },
            Err(reason) => DialogMount::Failed { ticket, reason },
        };
        Settle::Applied
    }

    /// Returns true when something was held and is now released.
    pub fn release(&mut self, dialog: DialogName) -> bool {
        let slot = &mut self.mounts[dialog as usize];
        let held = slot.holds_resource();
        *slot = DialogMount::Unmounted;
        held
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn content(title: &str) -> ModuleContent {
        ModuleContent {
            title: title.to_string(),
            body: Vec::new(),
        }
    }

    #[test]
    fn tickets_are_monotonic() {
        let mut counter = TicketCounter::default();
        let a = counter.issue();
        let b = counter.issue();
        assert!(b > a);
        assert_eq!(a, Ticket(1));
    }

    #[test]
    fn view_slot_ignores_superseded_ticket() {
        let mut slot = ViewSlot::Empty;
        slot.begin(ViewId::Quotes, Ticket(1));
        slot.begin(ViewId::Team, Ticket(2));

        let stale = slot.settle(ViewId::Quotes, Ticket(1), Ok(content("Quotes")));
        assert_eq!(stale, Settle::Stale);
        assert_eq!(
            slot,
            ViewSlot::Pending {
                view: ViewId::Team,
                ticket: Ticket(2)
            }
        );

        let applied = slot.settle(ViewId::Team, Ticket(2), Ok(content("Team")));
        assert_eq!(applied, Settle::Applied);
        assert_eq!(slot.view(), Some(ViewId::Team));
        assert_eq!(slot.label(), "ready");
    }

    #[test]
    fn view_slot_records_failure_locally() {
        let mut slot = ViewSlot::Empty;
        slot.begin(ViewId::Fleet, Ticket(4));
        slot.settle(ViewId::Fleet, Ticket(4), Err("offline".to_string()));
        assert!(slot.is_failed());
        // A late duplicate resolution cannot overwrite the recorded outcome.
        assert_eq!(
            slot.settle(ViewId::Fleet, Ticket(4), Ok(content("Fleet"))),
            Settle::Stale
        );
    }

    #[test]
    fn dialog_mount_release_discards_late_result() {
        let mut mounts = DialogMounts::default();
        assert!(mounts.begin(DialogName::Job, Ticket(1)));
        assert!(!mounts.begin(DialogName::Job, Ticket(2)));
        assert!(mounts.release(DialogName::Job));
        assert_eq!(
            mounts.settle(DialogName::Job, Ticket(1), Ok(content("Job"))),
            Settle::Stale
        );
        assert_eq!(mounts.get(DialogName::Job), &DialogMount::Unmounted);
        assert!(!mounts.release(DialogName::Job));
    }

    #[test]
    fn failed_dialog_can_be_retried() {
        let mut mounts = DialogMounts::default();
        mounts.begin(DialogName::Note, Ticket(1));
        mounts.settle(DialogName::Note, Ticket(1), Err("boom".to_string()));
        assert!(mounts.begin(DialogName::Note, Ticket(2)));
        mounts.settle(DialogName::Note, Ticket(2), Ok(content("Note")));
        assert!(matches!(
            mounts.get(DialogName::Note),
            DialogMount::Mounted { ticket: Ticket(2), .. }
        ));
    }
}
