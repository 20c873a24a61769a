use super::*;
use pretty_assertions::assert_eq;

#[test]
fn back_from_team_without_history_goes_to_people_hub() {
    let mut state = loaded("?section=team");
    assert_eq!(state.nav.history_len(), 0);

    let effects = host_back(&mut state);

    assert_eq!(state.current_view(), ViewId::PeopleHub);
    assert_eq!(animation(&effects), Some(Direction::Backward));
    assert!(state.location().ends_with("section=peoplehub"));
}

#[test]
fn back_without_history_yields_parent_for_every_view() {
    for view in ALL_VIEWS {
        if view == ViewId::Overview {
            continue;
        }
        let mut state = loaded(&format!("?section={view}"));
        host_back(&mut state);
        assert_eq!(state.current_view(), parent_of(view), "back from {view}");
    }
}

#[test]
fn back_at_root_without_history_stays() {
    let mut state = loaded(BASE);
    let effects = host_back(&mut state);
    assert!(effects.is_empty());
    assert_eq!(state.current_view(), ViewId::Overview);
}

#[test]
fn back_replays_lateral_history_in_reverse() {
    let mut state = loaded(BASE);
    select(&mut state, ViewId::Quotes);
    select(&mut state, ViewId::Team);
    select(&mut state, ViewId::Fleet);

    host_back(&mut state);
    assert_eq!(state.current_view(), ViewId::Team);
    host_back(&mut state);
    assert_eq!(state.current_view(), ViewId::Quotes);
    host_back(&mut state);
    assert_eq!(state.current_view(), ViewId::Overview);
}

#[test]
fn history_runs_out_then_hierarchy_takes_over() {
    let mut state = loaded("?section=rams");
    select(&mut state, ViewId::Incidents);

    host_back(&mut state);
    assert_eq!(state.current_view(), ViewId::Rams);
    host_back(&mut state);
    assert_eq!(state.current_view(), ViewId::SafetyHub);
    host_back(&mut state);
    assert_eq!(state.current_view(), ViewId::Overview);
}

#[test]
fn voice_back_uses_the_same_policy() {
    let mut state = loaded("?section=vacancies");
    reduce(
        &mut state,
        DashAction::Bus(BusEvent::Navigation(NavigationCommand::Back)),
    );
    assert_eq!(state.current_view(), ViewId::PeopleHub);
    assert_eq!(state.activity.last().unwrap().trigger, Trigger::Back);
}
