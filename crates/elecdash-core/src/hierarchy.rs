use super::views::ViewId;
use super::views::ROOT_VIEW;

/// Coarse nesting class used only to pick an animation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DepthClass {
    Root = 0,
    Hub = 1,
    Leaf = 2,
}

impl DepthClass {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Hub => "hub",
            Self::Leaf => "leaf",
        }
    }
}

pub const HUB_VIEWS: [ViewId; 4] = [
    ViewId::PeopleHub,
    ViewId::FinanceHub,
    ViewId::JobsHub,
    ViewId::SafetyHub,
];

/// Parent used when "back" has no history to consume. Idempotent at the root.
pub fn parent_of(view: ViewId) -> ViewId {
    use ViewId::*;
    match view {
        Overview => Overview,
        PeopleHub | FinanceHub | JobsHub | SafetyHub | Settings => Overview,
        Team | ElecId | Timesheets | Leave | Comms | TalentPool | Vacancies | Training => {
            PeopleHub
        }
        Quotes | Invoices | Tenders | Expenses | Procurement | Financials | Reports
        | Signatures | PriceBook => FinanceHub,
        Jobs | JobPacks | JobBoard | Timeline | Tracking | ProgressLogs | Issues | Testing
        | Quality | ClientPortal | Fleet | PhotoGallery => JobsHub,
        Rams | Incidents | Policies | Contracts | Briefings | Compliance => SafetyHub,
    }
}

pub fn depth_of(view: ViewId) -> DepthClass {
    if view == ROOT_VIEW {
        DepthClass::Root
    } else if HUB_VIEWS.contains(&view) {
        DepthClass::Hub
    } else {
        DepthClass::Leaf
    }
}

/// String-keyed variant for ids that come from outside the enum (links,
/// persisted state). Unknown ids degrade to the root.
pub fn parent_of_id(id: &str) -> ViewId {
    match ViewId::from_canonical(id) {
        Some(view) => parent_of(view),
        None => {
            tracing::debug!(id, "parent lookup for unknown view; using root");
            ROOT_VIEW
        }
    }
}

/// Unknown ids report depth 0 rather than failing.
pub fn depth_of_id(id: &str) -> DepthClass {
    ViewId::from_canonical(id).map_or(DepthClass::Root, depth_of)
}

/// Ancestors of `view`, nearest first, ending at the root.
pub fn ancestors(view: ViewId) -> Vec<ViewId> {
    let mut chain = Vec::new();
    let mut cursor = view;
    // Parent edges form a tree; the bound only guards a corrupted table.
    for _ in 0..=super::views::ALL_VIEWS.len() {
        if cursor == ROOT_VIEW {
            break;
        }
        cursor = parent_of(cursor);
        chain.push(cursor);
    }
    chain
}

/// Root-first path ending at `view`, for breadcrumbs.
pub fn breadcrumb(view: ViewId) -> Vec<ViewId> {
    let mut path = ancestors(view);
    path.reverse();
    path.push(view);
    path
}
