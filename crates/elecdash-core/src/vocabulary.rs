use std::sync::OnceLock;

use regex::Regex;

use super::views::ViewId;
use super::views::ALL_VIEWS;

/// Spoken phrase (already normalized) to canonical view. Many-to-one.
///
/// Canonical ids are deliberately absent: they resolve through the
/// pass-through fallback in [`resolve_view`].
pub const VIEW_ALIASES: &[(&str, ViewId)] = &[
    // root
    ("dashboard", ViewId::Overview),
    ("home", ViewId::Overview),
    ("main page", ViewId::Overview),
    ("main menu", ViewId::Overview),
    // hubs
    ("people-hub", ViewId::PeopleHub),
    ("people hub", ViewId::PeopleHub),
    ("people", ViewId::PeopleHub),
    ("hr", ViewId::PeopleHub),
    ("finance-hub", ViewId::FinanceHub),
    ("finance hub", ViewId::FinanceHub),
    ("finance", ViewId::FinanceHub),
    ("money", ViewId::FinanceHub),
    ("jobs-hub", ViewId::JobsHub),
    ("jobs hub", ViewId::JobsHub),
    ("job hub", ViewId::JobsHub),
    ("operations", ViewId::JobsHub),
    ("safety-hub", ViewId::SafetyHub),
    ("safety hub", ViewId::SafetyHub),
    ("safety", ViewId::SafetyHub),
    ("health and safety", ViewId::SafetyHub),
    // people
    ("employees", ViewId::Team),
    ("employee", ViewId::Team),
    ("workers", ViewId::Team),
    ("worker", ViewId::Team),
    ("staff", ViewId::Team),
    ("my team", ViewId::Team),
    ("team members", ViewId::Team),
    ("elec-id", ViewId::ElecId),
    ("elec id", ViewId::ElecId),
    ("credentials", ViewId::ElecId),
    ("id cards", ViewId::ElecId),
    ("timesheet", ViewId::Timesheets),
    ("time sheets", ViewId::Timesheets),
    ("time sheet", ViewId::Timesheets),
    ("hours", ViewId::Timesheets),
    ("holidays", ViewId::Leave),
    ("holiday", ViewId::Leave),
    ("annual leave", ViewId::Leave),
    ("time off", ViewId::Leave),
    ("communications", ViewId::Comms),
    ("messages", ViewId::Comms),
    ("message", ViewId::Comms),
    ("chat", ViewId::Comms),
    ("talent-pool", ViewId::TalentPool),
    ("talent pool", ViewId::TalentPool),
    ("candidates", ViewId::TalentPool),
    ("candidate", ViewId::TalentPool),
    ("job-vacancies", ViewId::Vacancies),
    ("job vacancies", ViewId::Vacancies),
    ("vacancy", ViewId::Vacancies),
    ("recruitment", ViewId::Vacancies),
    ("hiring", ViewId::Vacancies),
    ("training-records", ViewId::Training),
    ("training records", ViewId::Training),
    ("certifications", ViewId::Training),
    ("certs", ViewId::Training),
    ("qualifications", ViewId::Training),
    // finance
    ("quote", ViewId::Quotes),
    ("quotes-invoices", ViewId::Quotes),
    ("quotes and invoices", ViewId::Quotes),
    ("estimates", ViewId::Quotes),
    ("estimate", ViewId::Quotes),
    ("invoice", ViewId::Invoices),
    ("billing", ViewId::Invoices),
    ("tender", ViewId::Tenders),
    ("bids", ViewId::Tenders),
    ("bid", ViewId::Tenders),
    ("expense", ViewId::Expenses),
    ("receipts", ViewId::Expenses),
    ("receipt", ViewId::Expenses),
    ("materials", ViewId::Procurement),
    ("purchasing", ViewId::Procurement),
    ("orders", ViewId::Procurement),
    ("suppliers", ViewId::Procurement),
    ("job-financials", ViewId::Financials),
    ("job financials", ViewId::Financials),
    ("profit", ViewId::Financials),
    ("margins", ViewId::Financials),
    ("report", ViewId::Reports),
    ("analytics", ViewId::Reports),
    ("signature", ViewId::Signatures),
    ("sign-offs", ViewId::Signatures),
    ("sign offs", ViewId::Signatures),
    ("approvals", ViewId::Signatures),
    ("price-book", ViewId::PriceBook),
    ("price book", ViewId::PriceBook),
    ("pricing", ViewId::PriceBook),
    ("price list", ViewId::PriceBook),
    // jobs
    ("job", ViewId::Jobs),
    ("projects", ViewId::Jobs),
    ("project", ViewId::Jobs),
    ("sites", ViewId::Jobs),
    ("site", ViewId::Jobs),
    ("job-packs", ViewId::JobPacks),
    ("job packs", ViewId::JobPacks),
    ("job pack", ViewId::JobPacks),
    ("documentation", ViewId::JobPacks),
    ("job-board", ViewId::JobBoard),
    ("job board", ViewId::JobBoard),
    ("kanban", ViewId::JobBoard),
    ("job-timeline", ViewId::Timeline),
    ("job timeline", ViewId::Timeline),
    ("schedule", ViewId::Timeline),
    ("calendar", ViewId::Timeline),
    ("worker-tracking", ViewId::Tracking),
    ("worker tracking", ViewId::Tracking),
    ("location", ViewId::Tracking),
    ("gps", ViewId::Tracking),
    ("map", ViewId::Tracking),
    ("progress-logs", ViewId::ProgressLogs),
    ("progress logs", ViewId::ProgressLogs),
    ("progress", ViewId::ProgressLogs),
    ("diary", ViewId::ProgressLogs),
    ("site diary", ViewId::ProgressLogs),
    ("job-issues", ViewId::Issues),
    ("job issues", ViewId::Issues),
    ("problems", ViewId::Issues),
    ("issue", ViewId::Issues),
    ("testing-workflow", ViewId::Testing),
    ("testing workflow", ViewId::Testing),
    ("inspections", ViewId::Testing),
    ("inspection", ViewId::Testing),
    ("tests", ViewId::Testing),
    ("snags", ViewId::Quality),
    ("snag", ViewId::Quality),
    ("snagging", ViewId::Quality),
    ("defects", ViewId::Quality),
    ("client-portal", ViewId::ClientPortal),
    ("client portal", ViewId::ClientPortal),
    ("customer portal", ViewId::ClientPortal),
    ("vehicles", ViewId::Fleet),
    ("vehicle", ViewId::Fleet),
    ("vans", ViewId::Fleet),
    ("van", ViewId::Fleet),
    ("transport", ViewId::Fleet),
    ("photo-gallery", ViewId::PhotoGallery),
    ("photo gallery", ViewId::PhotoGallery),
    ("photos", ViewId::PhotoGallery),
    ("gallery", ViewId::PhotoGallery),
    // safety
    ("risk-assessments", ViewId::Rams),
    ("risk assessments", ViewId::Rams),
    ("risk assessment", ViewId::Rams),
    ("method-statements", ViewId::Rams),
    ("method statements", ViewId::Rams),
    ("incident", ViewId::Incidents),
    ("accidents", ViewId::Incidents),
    ("accident", ViewId::Incidents),
    ("near-misses", ViewId::Incidents),
    ("near misses", ViewId::Incidents),
    ("procedures", ViewId::Policies),
    ("policy", ViewId::Policies),
    ("agreements", ViewId::Contracts),
    ("contract", ViewId::Contracts),
    ("toolbox-talks", ViewId::Briefings),
    ("toolbox talks", ViewId::Briefings),
    ("toolbox talk", ViewId::Briefings),
    ("briefing", ViewId::Briefings),
    ("regulations", ViewId::Compliance),
    ("audits", ViewId::Compliance),
    ("audit", ViewId::Compliance),
    ("preferences", ViewId::Settings),
    ("configuration", ViewId::Settings),
    ("config", ViewId::Settings),
];

const _: () = assert!(
    alias_table_is_consistent(VIEW_ALIASES),
    "view alias table has a duplicate, non-normalized or shadowing phrase"
);

pub(crate) const fn str_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Lower-case, no surrounding or doubled spaces.
pub(crate) const fn is_normalized(phrase: &str) -> bool {
    let bytes = phrase.as_bytes();
    if bytes.is_empty() || bytes[0] == b' ' || bytes[bytes.len() - 1] == b' ' {
        return false;
    }
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_uppercase() || (bytes[i] == b' ' && bytes[i + 1] == b' ') {
            return false;
        }
        i += 1;
    }
    true
}

const fn alias_table_is_consistent(table: &[(&str, ViewId)]) -> bool {
    let mut i = 0;
    while i < table.len() {
        let phrase = table[i].0;
        if !is_normalized(phrase) {
            return false;
        }
        let mut j = i + 1;
        while j < table.len() {
            if str_eq(phrase, table[j].0) {
                return false;
            }
            j += 1;
        }
        // A phrase equal to a canonical id must point at that same view.
        let mut k = 0;
        while k < ALL_VIEWS.len() {
            let view = ALL_VIEWS[k];
            if str_eq(phrase, view.as_str()) && view as usize != table[i].1 as usize {
                return false;
            }
            k += 1;
        }
        i += 1;
    }
    true
}

/// Case-fold and collapse whitespace. Underscores count as spaces so
/// snake_case tool arguments match the spoken form.
pub fn normalize_phrase(raw: &str) -> String {
    raw.replace('_', " ")
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn leading_filler() -> Option<&'static Regex> {
    static LEADING: OnceLock<Option<Regex>> = OnceLock::new();
    LEADING
        .get_or_init(|| {
            Regex::new(
                r"^(?:please )?(?:(?:go|navigate|take me|switch|jump) to|open(?: up)?|show(?: me)?|bring up) (?:the )?",
            )
            .ok()
        })
        .as_ref()
}

fn trailing_filler() -> Option<&'static Regex> {
    static TRAILING: OnceLock<Option<Regex>> = OnceLock::new();
    TRAILING
        .get_or_init(|| Regex::new(r" (?:page|section|tab|view|screen)$").ok())
        .as_ref()
}

/// Drops conversational framing around a target ("go to the quotes page").
pub fn strip_filler(phrase: &str) -> String {
    let mut out = phrase.to_string();
    if let Some(re) = leading_filler() {
        out = re.replace(&out, "").into_owned();
    }
    if let Some(re) = trailing_filler() {
        out = re.replace(&out, "").into_owned();
    }
    out
}

pub fn alias_target(phrase: &str) -> Option<ViewId> {
    VIEW_ALIASES
        .iter()
        .find(|(alias, _)| *alias == phrase)
        .map(|(_, view)| *view)
}

fn lookup(phrase: &str) -> Option<ViewId> {
    alias_target(phrase).or_else(|| ViewId::from_canonical(phrase))
}

/// Free text to canonical view.
///
/// The alias table is consulted first, then the normalized text is tried as a
/// canonical id. `None` means the caller must keep the current view.
pub fn resolve_view(raw: &str) -> Option<ViewId> {
    let phrase = normalize_phrase(raw);
    if phrase.is_empty() {
        return None;
    }
    if let Some(view) = lookup(&phrase) {
        return Some(view);
    }
    let stripped = strip_filler(&phrase);
    if stripped.is_empty() || stripped == phrase {
        return None;
    }
    lookup(&stripped)
}

pub fn aliases_for(view: ViewId) -> impl Iterator<Item = &'static str> {
    VIEW_ALIASES
        .iter()
        .filter(move |(_, target)| *target == view)
        .map(|(alias, _)| *alias)
}
