use url::Url;

pub(super) use super::reduce;
pub(super) use super::DashEffect;
pub(super) use crate::actions::DashAction;
pub(super) use crate::actions::HostAction;
pub(super) use crate::actions::RuntimeAction;
pub(super) use crate::actions::UserAction;
pub(super) use crate::bus::BusEvent;
pub(super) use crate::bus::CommandEvent;
pub(super) use crate::bus::NavigationCommand;
pub(super) use crate::dialogs::DialogName;
pub(super) use crate::dialogs::ALL_DIALOGS;
pub(super) use crate::hierarchy::depth_of;
pub(super) use crate::hierarchy::parent_of;
pub(super) use crate::loader::DialogMount;
pub(super) use crate::loader::ModuleContent;
pub(super) use crate::loader::Ticket;
pub(super) use crate::loader::ViewSlot;
pub(super) use crate::navigation::Direction;
pub(super) use crate::navigation::Trigger;
pub(super) use crate::state::DashboardState;
pub(super) use crate::views::ViewId;
pub(super) use crate::views::ALL_VIEWS;

mod back_navigation;
mod location_sync;
mod refresh;

const BASE: &str = "https://app.local/employer";

fn state() -> DashboardState {
    DashboardState::new(Url::parse(BASE).unwrap(), "section", 64, 200)
}

fn loaded(location: &str) -> DashboardState {
    let mut state = state();
    load(&mut state, location);
    state
}

fn load(state: &mut DashboardState, location: &str) -> Vec<DashEffect> {
    reduce(
        state,
        DashAction::Host(HostAction::Load {
            location: location.to_string(),
        }),
    )
}

fn select(state: &mut DashboardState, view: ViewId) -> Vec<DashEffect> {
    reduce(state, DashAction::User(UserAction::SelectView(view)))
}

fn voice_navigate(state: &mut DashboardState, phrase: &str) -> Vec<DashEffect> {
    reduce(
        state,
        DashAction::Bus(BusEvent::Navigation(NavigationCommand::navigate(phrase))),
    )
}

fn host_back(state: &mut DashboardState) -> Vec<DashEffect> {
    reduce(state, DashAction::Host(HostAction::Back))
}

fn emit_dialog(state: &mut DashboardState, event: CommandEvent) -> Vec<DashEffect> {
    reduce(state, DashAction::Bus(BusEvent::Dialog(event)))
}

fn content(title: &str) -> ModuleContent {
    ModuleContent {
        title: title.to_string(),
        body: vec![format!("{title} body")],
    }
}

fn view_ticket(effects: &[DashEffect]) -> Option<(ViewId, Ticket)> {
    effects.iter().find_map(|effect| match effect {
        DashEffect::AcquireView { view, ticket } => Some((*view, *ticket)),
        _ => None,
    })
}

fn dialog_ticket(effects: &[DashEffect]) -> Option<(DialogName, Ticket)> {
    effects.iter().find_map(|effect| match effect {
        DashEffect::AcquireDialog { dialog, ticket } => Some((*dialog, *ticket)),
        _ => None,
    })
}

fn settle_view(
    state: &mut DashboardState,
    view: ViewId,
    ticket: Ticket,
    outcome: Result<ModuleContent, String>,
) -> Vec<DashEffect> {
    reduce(
        state,
        DashAction::Runtime(RuntimeAction::ViewAcquired {
            ticket,
            view,
            outcome,
        }),
    )
}

fn settle_dialog(
    state: &mut DashboardState,
    dialog: DialogName,
    ticket: Ticket,
    outcome: Result<ModuleContent, String>,
) -> Vec<DashEffect> {
    reduce(
        state,
        DashAction::Runtime(RuntimeAction::DialogAcquired {
            ticket,
            dialog,
            outcome,
        }),
    )
}

fn animation(effects: &[DashEffect]) -> Option<Direction> {
    effects.iter().find_map(|effect| match effect {
        DashEffect::Animate(transition) => Some(transition.direction),
        _ => None,
    })
}
