use super::*;
use pretty_assertions::assert_eq;

#[test]
fn refresh_invalidates_the_current_views_keys() {
    let mut state = loaded("?section=procurement");
    let effects = reduce(&mut state, DashAction::User(UserAction::Refresh));
    assert_eq!(
        effects,
        vec![DashEffect::InvalidateCache(vec!["orders", "suppliers"])]
    );
}

#[test]
fn voice_refresh_matches_gesture() {
    let mut state = loaded("?section=team");
    let effects = reduce(
        &mut state,
        DashAction::Bus(BusEvent::Navigation(NavigationCommand::Refresh)),
    );
    assert_eq!(effects, vec![DashEffect::InvalidateCache(vec!["employees"])]);
}

#[test]
fn views_without_keys_emit_nothing() {
    let mut state = loaded("?section=settings");
    assert!(reduce(&mut state, DashAction::User(UserAction::Refresh)).is_empty());
}

#[test]
fn refresh_does_not_navigate() {
    let mut state = loaded("?section=quotes");
    let before = state.activity.len();
    reduce(&mut state, DashAction::User(UserAction::Refresh));
    assert_eq!(state.current_view(), ViewId::Quotes);
    assert_eq!(state.activity.len(), before);
}
