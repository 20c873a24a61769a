use serde::Deserialize;
use serde::Serialize;

/// Canonical identifier of one dashboard section.
///
/// The set is closed: every table keyed by a view (hierarchy, vocabulary,
/// module specs) matches on this enum, so adding a variant fails to compile
/// until each of them knows about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewId {
    Overview,
    // hubs
    PeopleHub,
    FinanceHub,
    JobsHub,
    SafetyHub,
    // people
    Team,
    ElecId,
    Timesheets,
    Leave,
    Comms,
    TalentPool,
    Vacancies,
    Training,
    // finance
    Quotes,
    Invoices,
    Tenders,
    Expenses,
    Procurement,
    Financials,
    Reports,
    Signatures,
    PriceBook,
    // jobs
    Jobs,
    JobPacks,
    JobBoard,
    Timeline,
    Tracking,
    ProgressLogs,
    Issues,
    Testing,
    Quality,
    ClientPortal,
    Fleet,
    PhotoGallery,
    // safety
    Rams,
    Incidents,
    Policies,
    Contracts,
    Briefings,
    Compliance,
    Settings,
}

pub const ROOT_VIEW: ViewId = ViewId::Overview;

pub const ALL_VIEWS: [ViewId; 41] = [
    ViewId::Overview,
    ViewId::PeopleHub,
    ViewId::FinanceHub,
    ViewId::JobsHub,
    ViewId::SafetyHub,
    ViewId::Team,
    ViewId::ElecId,
    ViewId::Timesheets,
    ViewId::Leave,
    ViewId::Comms,
    ViewId::TalentPool,
    ViewId::Vacancies,
    ViewId::Training,
    ViewId::Quotes,
    ViewId::Invoices,
    ViewId::Tenders,
    ViewId::Expenses,
    ViewId::Procurement,
    ViewId::Financials,
    ViewId::Reports,
    ViewId::Signatures,
    ViewId::PriceBook,
    ViewId::Jobs,
    ViewId::JobPacks,
    ViewId::JobBoard,
    ViewId::Timeline,
    ViewId::Tracking,
    ViewId::ProgressLogs,
    ViewId::Issues,
    ViewId::Testing,
    ViewId::Quality,
    ViewId::ClientPortal,
    ViewId::Fleet,
    ViewId::PhotoGallery,
    ViewId::Rams,
    ViewId::Incidents,
    ViewId::Policies,
    ViewId::Contracts,
    ViewId::Briefings,
    ViewId::Compliance,
    ViewId::Settings,
];

impl ViewId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::PeopleHub => "peoplehub",
            Self::FinanceHub => "financehub",
            Self::JobsHub => "jobshub",
            Self::SafetyHub => "safetyhub",
            Self::Team => "team",
            Self::ElecId => "elecid",
            Self::Timesheets => "timesheets",
            Self::Leave => "leave",
            Self::Comms => "comms",
            Self::TalentPool => "talentpool",
            Self::Vacancies => "vacancies",
            Self::Training => "training",
            Self::Quotes => "quotes",
            Self::Invoices => "invoices",
            Self::Tenders => "tenders",
            Self::Expenses => "expenses",
            Self::Procurement => "procurement",
            Self::Financials => "financials",
            Self::Reports => "reports",
            Self::Signatures => "signatures",
            Self::PriceBook => "pricebook",
            Self::Jobs => "jobs",
            Self::JobPacks => "jobpacks",
            Self::JobBoard => "jobboard",
            Self::Timeline => "timeline",
            Self::Tracking => "tracking",
            Self::ProgressLogs => "progresslogs",
            Self::Issues => "issues",
            Self::Testing => "testing",
            Self::Quality => "quality",
            Self::ClientPortal => "clientportal",
            Self::Fleet => "fleet",
            Self::PhotoGallery => "photogallery",
            Self::Rams => "rams",
            Self::Incidents => "incidents",
            Self::Policies => "policies",
            Self::Contracts => "contracts",
            Self::Briefings => "briefings",
            Self::Compliance => "compliance",
            Self::Settings => "settings",
        }
    }

    /// Exact canonical lookup; no aliasing, no case folding.
    pub fn from_canonical(value: &str) -> Option<Self> {
        ALL_VIEWS.iter().copied().find(|view| view.as_str() == value)
    }

    pub fn label(self) -> &'static str {
        view_spec(self).title
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of the module that renders a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSpec {
    pub id: ViewId,
    pub title: &'static str,
    pub summary: &'static str,
    /// Opaque keys handed to the data layer on a refresh gesture.
    pub cache_keys: &'static [&'static str],
}

const fn spec(
    id: ViewId,
    title: &'static str,
    summary: &'static str,
    cache_keys: &'static [&'static str],
) -> ViewSpec {
    ViewSpec {
        id,
        title,
        summary,
        cache_keys,
    }
}

pub fn view_spec(view: ViewId) -> ViewSpec {
    use ViewId::*;
    match view {
        Overview => spec(
            view,
            "Overview",
            "Business snapshot: live jobs, cash position, alerts.",
            &["dashboard-stats", "alerts"],
        ),
        PeopleHub => spec(view, "People", "Team, recruitment and HR tools.", &["employees"]),
        FinanceHub => spec(
            view,
            "Finance",
            "Quotes, invoices, spend and reporting.",
            &["finance-summary"],
        ),
        JobsHub => spec(view, "Jobs", "Live work, scheduling and site records.", &["jobs"]),
        SafetyHub => spec(
            view,
            "Safety",
            "RAMS, incidents, briefings and compliance.",
            &["safety-summary"],
        ),
        Team => spec(view, "Team", "Employees and their roles.", &["employees"]),
        ElecId => spec(view, "Elec-ID", "Worker credentials and ID cards.", &["elec-id-profiles"]),
        Timesheets => spec(view, "Timesheets", "Clock-ins and approvals.", &["timesheets"]),
        Leave => spec(view, "Leave", "Holiday and absence requests.", &["leave-requests"]),
        Comms => spec(view, "Comms", "Team messages and announcements.", &["conversations"]),
        TalentPool => spec(view, "Talent Pool", "Candidate pipeline.", &["candidates"]),
        Vacancies => spec(view, "Vacancies", "Open roles and applications.", &["vacancies"]),
        Training => spec(view, "Training", "Training records and certifications.", &["training-records"]),
        Quotes => spec(view, "Quotes", "Draft and sent quotes.", &["quotes"]),
        Invoices => spec(view, "Invoices", "Issued and overdue invoices.", &["invoices"]),
        Tenders => spec(view, "Tenders", "Bids and tender tracking.", &["tenders"]),
        Expenses => spec(view, "Expenses", "Receipts and expense claims.", &["expenses"]),
        Procurement => spec(view, "Procurement", "Materials, orders and suppliers.", &["orders", "suppliers"]),
        Financials => spec(view, "Job Financials", "Per-job profit and margin.", &["job-financials"]),
        Reports => spec(view, "Reports", "Analytics and exports.", &["reports"]),
        Signatures => spec(view, "Signatures", "Sign-offs awaiting action.", &["signature-requests"]),
        PriceBook => spec(view, "Price Book", "Material and labour pricing.", &["price-book"]),
        Jobs => spec(view, "Jobs", "Projects and sites.", &["jobs"]),
        JobPacks => spec(view, "Job Packs", "Job documentation bundles.", &["job-packs"]),
        JobBoard => spec(view, "Job Board", "Kanban view of work in progress.", &["jobs"]),
        Timeline => spec(view, "Timeline", "Job schedule.", &["job-schedule"]),
        Tracking => spec(view, "Tracking", "Worker locations.", &["worker-locations"]),
        ProgressLogs => spec(view, "Progress Logs", "Site diary entries.", &["progress-logs"]),
        Issues => spec(view, "Issues", "Problems raised on jobs.", &["job-issues"]),
        Testing => spec(view, "Testing", "Inspection and testing workflow.", &["test-results"]),
        Quality => spec(view, "Quality", "Snags and defects.", &["snags"]),
        ClientPortal => spec(view, "Client Portal", "What clients can see.", &["client-portal-links"]),
        Fleet => spec(view, "Fleet", "Vehicles and transport.", &["vehicles"]),
        PhotoGallery => spec(view, "Photo Gallery", "Site photos.", &["job-photos"]),
        Rams => spec(view, "RAMS", "Risk assessments and method statements.", &["rams"]),
        Incidents => spec(view, "Incidents", "Accidents and near misses.", &["incidents"]),
        Policies => spec(view, "Policies", "Company policies and procedures.", &["policies"]),
        Contracts => spec(view, "Contracts", "Client and subcontractor agreements.", &["contracts"]),
        Briefings => spec(view, "Briefings", "Toolbox talks.", &["briefings"]),
        Compliance => spec(view, "Compliance", "Regulations and audits.", &["compliance-items"]),
        Settings => spec(view, "Settings", "Company preferences.", &[]),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn canonical_names_round_trip() {
        for view in ALL_VIEWS {
            assert_eq!(ViewId::from_canonical(view.as_str()), Some(view));
        }
    }

    #[test]
    fn all_views_has_no_duplicates() {
        let mut seen = std::collections::BTreeSet::new();
        for view in ALL_VIEWS {
            assert!(seen.insert(view), "duplicate {view}");
        }
    }

    #[test]
    fn serde_uses_canonical_names() {
        let json = serde_json::to_string(&ViewId::TalentPool).unwrap();
        assert_eq!(json, "\"talentpool\"");
        let back: ViewId = serde_json::from_str("\"peoplehub\"").unwrap();
        assert_eq!(back, ViewId::PeopleHub);
    }

    #[test]
    fn spec_table_is_keyed_by_its_own_view() {
        for view in ALL_VIEWS {
            assert_eq!(view_spec(view).id, view);
        }
    }
}
