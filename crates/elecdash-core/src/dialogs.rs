use serde::Deserialize;
use serde::Serialize;

use super::vocabulary::is_normalized;
use super::vocabulary::normalize_phrase;
use super::vocabulary::str_eq;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogName {
    Quote,
    Job,
    Employee,
    Invoice,
    Expense,
    TimeEntry,
    Certification,
    Order,
    Supplier,
    Vacancy,
    JobPack,
    Rams,
    Tender,
    Incident,
    Training,
    Briefing,
    Skill,
    Note,
    WorkHistory,
}

pub const DIALOG_COUNT: usize = 19;

pub const ALL_DIALOGS: [DialogName; DIALOG_COUNT] = [
    DialogName::Quote,
    DialogName::Job,
    DialogName::Employee,
    DialogName::Invoice,
    DialogName::Expense,
    DialogName::TimeEntry,
    DialogName::Certification,
    DialogName::Order,
    DialogName::Supplier,
    DialogName::Vacancy,
    DialogName::JobPack,
    DialogName::Rams,
    DialogName::Tender,
    DialogName::Incident,
    DialogName::Training,
    DialogName::Briefing,
    DialogName::Skill,
    DialogName::Note,
    DialogName::WorkHistory,
];

impl DialogName {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::Job => "job",
            Self::Employee => "employee",
            Self::Invoice => "invoice",
            Self::Expense => "expense",
            Self::TimeEntry => "timeentry",
            Self::Certification => "certification",
            Self::Order => "order",
            Self::Supplier => "supplier",
            Self::Vacancy => "vacancy",
            Self::JobPack => "jobpack",
            Self::Rams => "rams",
            Self::Tender => "tender",
            Self::Incident => "incident",
            Self::Training => "training",
            Self::Briefing => "briefing",
            Self::Skill => "skill",
            Self::Note => "note",
            Self::WorkHistory => "workhistory",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Quote => "New quote",
            Self::Job => "New job",
            Self::Employee => "Add employee",
            Self::Invoice => "New invoice",
            Self::Expense => "Log expense",
            Self::TimeEntry => "Manual time entry",
            Self::Certification => "Add certification",
            Self::Order => "New material order",
            Self::Supplier => "Add supplier",
            Self::Vacancy => "Post vacancy",
            Self::JobPack => "New job pack",
            Self::Rams => "Create RAMS",
            Self::Tender => "New tender",
            Self::Incident => "Report incident",
            Self::Training => "Add training record",
            Self::Briefing => "Create briefing",
            Self::Skill => "Add skill",
            Self::Note => "Add note",
            Self::WorkHistory => "Add work history",
        }
    }

    pub fn from_canonical(value: &str) -> Option<Self> {
        ALL_DIALOGS.iter().copied().find(|dialog| dialog.as_str() == value)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for DialogName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DIALOG_ALIASES: &[(&str, DialogName)] = &[
    ("createquote", DialogName::Quote),
    ("create-quote", DialogName::Quote),
    ("create quote", DialogName::Quote),
    ("new quote", DialogName::Quote),
    ("addjob", DialogName::Job),
    ("newjob", DialogName::Job),
    ("create-job", DialogName::Job),
    ("create job", DialogName::Job),
    ("add-job", DialogName::Job),
    ("new job", DialogName::Job),
    ("addemployee", DialogName::Employee),
    ("add-employee", DialogName::Employee),
    ("add employee", DialogName::Employee),
    ("worker", DialogName::Employee),
    ("new starter", DialogName::Employee),
    ("createinvoice", DialogName::Invoice),
    ("create-invoice", DialogName::Invoice),
    ("create invoice", DialogName::Invoice),
    ("new invoice", DialogName::Invoice),
    ("createexpense", DialogName::Expense),
    ("create-expense", DialogName::Expense),
    ("log expense", DialogName::Expense),
    ("receipt", DialogName::Expense),
    ("manualtimeentry", DialogName::TimeEntry),
    ("time-entry", DialogName::TimeEntry),
    ("time entry", DialogName::TimeEntry),
    ("manual time entry", DialogName::TimeEntry),
    ("addcertification", DialogName::Certification),
    ("add-certification", DialogName::Certification),
    ("add certification", DialogName::Certification),
    ("createorder", DialogName::Order),
    ("create-order", DialogName::Order),
    ("material order", DialogName::Order),
    ("createsupplier", DialogName::Supplier),
    ("create-supplier", DialogName::Supplier),
    ("add supplier", DialogName::Supplier),
    ("postvacancy", DialogName::Vacancy),
    ("post-vacancy", DialogName::Vacancy),
    ("post vacancy", DialogName::Vacancy),
    ("addjobpack", DialogName::JobPack),
    ("job-pack", DialogName::JobPack),
    ("job pack", DialogName::JobPack),
    ("createrams", DialogName::Rams),
    ("create-rams", DialogName::Rams),
    ("risk assessment", DialogName::Rams),
    ("createtender", DialogName::Tender),
    ("create-tender", DialogName::Tender),
    ("reportincident", DialogName::Incident),
    ("report-incident", DialogName::Incident),
    ("report incident", DialogName::Incident),
    ("addtraining", DialogName::Training),
    ("add-training", DialogName::Training),
    ("createbriefing", DialogName::Briefing),
    ("create-briefing", DialogName::Briefing),
    ("toolbox talk", DialogName::Briefing),
    ("addskill", DialogName::Skill),
    ("add-skill", DialogName::Skill),
    ("addnote", DialogName::Note),
    ("add-note", DialogName::Note),
    ("addworkhistory", DialogName::WorkHistory),
    ("work-history", DialogName::WorkHistory),
    ("work history", DialogName::WorkHistory),
];

const _: () = assert!(
    dialog_aliases_are_consistent(DIALOG_ALIASES),
    "dialog alias table has a duplicate, non-normalized or shadowing phrase"
);

const fn dialog_aliases_are_consistent(table: &[(&str, DialogName)]) -> bool {
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
        let mut k = 0;
        while k < ALL_DIALOGS.len() {
            let dialog = ALL_DIALOGS[k];
            if str_eq(phrase, dialog.as_str()) && dialog as usize != table[i].1 as usize {
                return false;
            }
            k += 1;
        }
        i += 1;
    }
    true
}

/// Same permissive policy as view resolution: alias first, then canonical.
pub fn resolve_dialog(raw: &str) -> Option<DialogName> {
    let phrase = normalize_phrase(raw);
    if phrase.is_empty() {
        return None;
    }
    DIALOG_ALIASES
        .iter()
        .find(|(alias, _)| *alias == phrase)
        .map(|(_, dialog)| *dialog)
        .or_else(|| DialogName::from_canonical(&phrase))
}

/// Authoritative open/closed flag per modal form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogRegistry {
    flags: [bool; DIALOG_COUNT],
}

impl DialogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, dialog: DialogName) -> bool {
        self.flags[dialog.index()]
    }

    /// Returns true when the flag changed.
    pub fn set(&mut self, dialog: DialogName, open: bool) -> bool {
        let slot = &mut self.flags[dialog.index()];
        let changed = *slot != open;
        *slot = open;
        changed
    }

    /// Lowers every flag in one step; returns the dialogs that were open.
    pub fn close_all(&mut self) -> Vec<DialogName> {
        let was_open = self.open_dialogs();
        self.flags = [false; DIALOG_COUNT];
        was_open
    }

    pub fn open_dialogs(&self) -> Vec<DialogName> {
        ALL_DIALOGS
            .iter()
            .copied()
            .filter(|dialog| self.is_open(*dialog))
            .collect()
    }

    pub fn any_open(&self) -> bool {
        self.flags.iter().any(|open| *open)
    }
}
