use elecdash_core::DialogName;
use elecdash_core::ModuleContent;
use elecdash_core::RuntimeAction;
use elecdash_core::Ticket;
use elecdash_core::ViewId;
use serde::Deserialize;
use serde::Serialize;

pub type LoadedModule = ModuleContent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum AcquireTarget {
    View(ViewId),
    Dialog(DialogName),
}

impl AcquireTarget {
    pub fn manifest_dir(self) -> &'static str {
        match self {
            Self::View(_) => "views",
            Self::Dialog(_) => "dialogs",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::View(view) => view.as_str(),
            Self::Dialog(dialog) => dialog.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquireRequest {
    pub ticket: Ticket,
    pub target: AcquireTarget,
}

impl AcquireRequest {
    /// Turns a finished acquisition back into the action the reducer expects.
    pub fn into_action(self, outcome: Result<LoadedModule, String>) -> RuntimeAction {
        match self.target {
            AcquireTarget::View(view) => RuntimeAction::ViewAcquired {
                ticket: self.ticket,
                view,
                outcome,
            },
            AcquireTarget::Dialog(dialog) => RuntimeAction::DialogAcquired {
                ticket: self.ticket,
                dialog,
                outcome,
            },
        }
    }
}
