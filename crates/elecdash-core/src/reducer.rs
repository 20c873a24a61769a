use super::actions::DashAction;
use super::actions::HostAction;
use super::actions::RuntimeAction;
use super::actions::UserAction;
use super::bus::BusEvent;
use super::bus::CommandEvent;
use super::bus::NavigationCommand;
use super::dialogs::resolve_dialog;
use super::dialogs::DialogName;
use super::dialogs::ALL_DIALOGS;
use super::loader::Settle;
use super::loader::Ticket;
use super::location::parse_location;
use super::location::view_from_location;
use super::location::with_view;
use super::navigation::Transition;
use super::navigation::Trigger;
use super::state::DashboardState;
use super::views::view_spec;
use super::views::ViewId;
use super::views::ROOT_VIEW;
use super::vocabulary::resolve_view;

/// Work the host must carry out after a reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashEffect {
    ReflectLocation(String),
    Animate(Transition),
    AcquireView { view: ViewId, ticket: Ticket },
    AcquireDialog { dialog: DialogName, ticket: Ticket },
    ReleaseDialog(DialogName),
    InvalidateCache(Vec<&'static str>),
    RequestFrame,
}

pub fn reduce(state: &mut DashboardState, action: DashAction) -> Vec<DashEffect> {
    match action {
        DashAction::Host(host) => reduce_host(state, host),
        DashAction::User(user) => reduce_user(state, user),
        DashAction::Bus(event) => reduce_bus(state, event),
        DashAction::Runtime(runtime) => reduce_runtime(state, runtime),
    }
}

fn reduce_host(state: &mut DashboardState, action: HostAction) -> Vec<DashEffect> {
    match action {
        HostAction::Load { location } => {
            let url = match parse_location(&location, &state.location.url) {
                Ok(url) => url,
                Err(err) => {
                    tracing::warn!(%location, %err, "unreadable location; entering at root");
                    state.location.url.clone()
                }
            };
            let view = view_from_location(&url, &state.location.param).unwrap_or(ROOT_VIEW);
            state.location.url = url;
            let transition = state.nav.enter(view);
            enter(state, transition)
        }
        HostAction::Back => back(state),
    }
}

fn reduce_user(state: &mut DashboardState, action: UserAction) -> Vec<DashEffect> {
    match action {
        UserAction::SelectView(view) => navigate(state, view, Trigger::User),
        UserAction::RequestNavigation(phrase) => navigate_phrase(state, &phrase, Trigger::User),
        UserAction::Refresh => refresh(state),
        UserAction::RetryView => retry_view(state),
        UserAction::DismissDialog(dialog) => close_dialog(state, dialog),
    }
}

fn reduce_bus(state: &mut DashboardState, event: BusEvent) -> Vec<DashEffect> {
    match event {
        BusEvent::Navigation(NavigationCommand::Navigate { section }) => {
            navigate_phrase(state, &section, Trigger::Voice)
        }
        BusEvent::Navigation(NavigationCommand::Back) => back(state),
        BusEvent::Navigation(NavigationCommand::Home) => navigate(state, ROOT_VIEW, Trigger::Voice),
        BusEvent::Navigation(NavigationCommand::Refresh) => refresh(state),
        BusEvent::Dialog(CommandEvent::Open { dialog_name }) => match resolve_dialog(&dialog_name) {
            Some(dialog) => open_dialog(state, dialog),
            None => {
                tracing::debug!(%dialog_name, "ignoring unknown dialog");
                Vec::new()
            }
        },
        BusEvent::Dialog(CommandEvent::CloseAll) => close_all_dialogs(state),
    }
}

fn reduce_runtime(state: &mut DashboardState, action: RuntimeAction) -> Vec<DashEffect> {
    match action {
        RuntimeAction::ViewAcquired {
            ticket,
            view,
            outcome,
        } => {
            let failure = outcome.as_ref().err().cloned();
            match state.view_slot.settle(view, ticket, outcome) {
                Settle::Applied => {
                    if let Some(reason) = failure {
                        tracing::warn!(%view, ticket = ticket.0, %reason, "view acquisition failed");
                    }
                    vec![DashEffect::RequestFrame]
                }
                Settle::Stale => {
                    tracing::debug!(%view, ticket = ticket.0, "discarding stale view acquisition");
                    Vec::new()
                }
            }
        }
        RuntimeAction::DialogAcquired {
            ticket,
            dialog,
            outcome,
        } => {
            if !state.dialogs.is_open(dialog) {
                tracing::debug!(%dialog, ticket = ticket.0, "dialog closed before it loaded");
                return Vec::new();
            }
            let failure = outcome.as_ref().err().cloned();
            match state.dialog_mounts.settle(dialog, ticket, outcome) {
                Settle::Applied => {
                    if let Some(reason) = failure {
                        tracing::warn!(%dialog, ticket = ticket.0, %reason, "dialog acquisition failed");
                    }
                    vec![DashEffect::RequestFrame]
                }
                Settle::Stale => {
                    tracing::debug!(%dialog, ticket = ticket.0, "discarding stale dialog acquisition");
                    Vec::new()
                }
            }
        }
    }
}

fn navigate_phrase(state: &mut DashboardState, phrase: &str, trigger: Trigger) -> Vec<DashEffect> {
    match resolve_view(phrase) {
        Some(view) => navigate(state, view, trigger),
        None => {
            tracing::debug!(phrase, "unresolved navigation phrase; keeping current view");
            Vec::new()
        }
    }
}

fn navigate(state: &mut DashboardState, view: ViewId, trigger: Trigger) -> Vec<DashEffect> {
    match state.nav.advance(view, trigger) {
        Some(transition) => enter(state, transition),
        // Re-selecting a view whose load failed is how the user retries it.
        None if state.view_slot.is_failed() => retry_view(state),
        None => Vec::new(),
    }
}

fn back(state: &mut DashboardState) -> Vec<DashEffect> {
    match state.nav.back() {
        Some(transition) => enter(state, transition),
        None => Vec::new(),
    }
}

fn enter(state: &mut DashboardState, transition: Transition) -> Vec<DashEffect> {
    tracing::info!(
        from = %transition.from,
        to = %transition.to,
        direction = transition.direction.label(),
        trigger = transition.trigger.label(),
        "navigated"
    );
    state.activity.record(&transition);
    state.location.url = with_view(&state.location.url, &state.location.param, transition.to);

    let ticket = state.tickets.issue();
    state.view_slot.begin(transition.to, ticket);

    vec![
        DashEffect::ReflectLocation(state.location.url.to_string()),
        DashEffect::Animate(transition),
        DashEffect::AcquireView {
            view: transition.to,
            ticket,
        },
        DashEffect::RequestFrame,
    ]
}

fn retry_view(state: &mut DashboardState) -> Vec<DashEffect> {
    if !(state.view_slot.is_failed() || state.view_slot.view().is_none()) {
        return Vec::new();
    }
    let view = state.nav.current();
    let ticket = state.tickets.issue();
    state.view_slot.begin(view, ticket);
    tracing::info!(%view, ticket = ticket.0, "retrying view acquisition");
    vec![
        DashEffect::AcquireView { view, ticket },
        DashEffect::RequestFrame,
    ]
}

fn refresh(state: &DashboardState) -> Vec<DashEffect> {
    let keys = view_spec(state.nav.current()).cache_keys;
    if keys.is_empty() {
        return Vec::new();
    }
    vec![DashEffect::InvalidateCache(keys.to_vec())]
}

fn open_dialog(state: &mut DashboardState, dialog: DialogName) -> Vec<DashEffect> {
    let mut effects = Vec::new();
    if state.dialogs.set(dialog, true) {
        tracing::info!(%dialog, "dialog opened");
    }
    if !state.dialog_mounts.get(dialog).holds_resource() {
        let ticket = state.tickets.issue();
        state.dialog_mounts.begin(dialog, ticket);
        effects.push(DashEffect::AcquireDialog { dialog, ticket });
    }
    effects.push(DashEffect::RequestFrame);
    effects
}

fn close_dialog(state: &mut DashboardState, dialog: DialogName) -> Vec<DashEffect> {
    let changed = state.dialogs.set(dialog, false);
    let released = state.dialog_mounts.release(dialog);
    if !changed && !released {
        return Vec::new();
    }
    tracing::info!(%dialog, "dialog closed");
    let mut effects = Vec::new();
    if released {
        effects.push(DashEffect::ReleaseDialog(dialog));
    }
    effects.push(DashEffect::RequestFrame);
    effects
}

fn close_all_dialogs(state: &mut DashboardState) -> Vec<DashEffect> {
    let closed = state.dialogs.close_all();
    let mut effects: Vec<DashEffect> = ALL_DIALOGS
        .iter()
        .copied()
        .filter(|dialog| state.dialog_mounts.release(*dialog))
        .map(DashEffect::ReleaseDialog)
        .collect();
    if !closed.is_empty() || !effects.is_empty() {
        tracing::info!(count = closed.len(), "all dialogs closed");
        effects.push(DashEffect::RequestFrame);
    }
    effects
}

#[cfg(test)]
mod tests;
