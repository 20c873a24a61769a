use super::*;
use pretty_assertions::assert_eq;

#[test]
fn load_reads_section_from_location() {
    let mut state = state();
    let effects = load(&mut state, "https://app.local/employer?section=quotes");

    assert_eq!(state.current_view(), ViewId::Quotes);
    assert_eq!(state.nav.previous(), None);
    assert_eq!(animation(&effects), Some(Direction::Forward));
    assert_eq!(state.activity.last().unwrap().trigger, Trigger::Load);
}

#[test]
fn load_canonicalizes_alias_links() {
    let mut state = state();
    let effects = load(&mut state, "?section=talent-pool&ref=email");

    assert_eq!(state.current_view(), ViewId::TalentPool);
    assert_eq!(
        effects.first(),
        Some(&DashEffect::ReflectLocation(
            "https://app.local/employer?ref=email&section=talentpool".to_string()
        ))
    );
}

#[test]
fn load_without_or_with_bad_section_enters_root() {
    let state = loaded(BASE);
    assert_eq!(state.current_view(), ViewId::Overview);

    let state = loaded("?section=nowhere");
    assert_eq!(state.current_view(), ViewId::Overview);

    let state = loaded("http://[broken");
    assert_eq!(state.current_view(), ViewId::Overview);
}

#[test]
fn every_navigation_updates_the_location() {
    let mut state = loaded(BASE);
    for view in [ViewId::FinanceHub, ViewId::Expenses, ViewId::Settings] {
        let effects = select(&mut state, view);
        let expected = format!("{BASE}?section={view}");
        assert_eq!(state.location(), expected);
        assert!(effects.contains(&DashEffect::ReflectLocation(expected)));
    }
}

#[test]
fn reloading_the_reflected_location_reproduces_the_view() {
    for view in ALL_VIEWS {
        let mut original = loaded(BASE);
        select(&mut original, view);
        let shared = original.location().to_string();

        let reloaded = loaded(&shared);
        assert_eq!(reloaded.current_view(), view);
        assert_eq!(reloaded.nav.history_len(), 0);
    }
}

#[test]
fn reload_resets_history_and_previous() {
    let mut state = loaded(BASE);
    select(&mut state, ViewId::Quotes);
    select(&mut state, ViewId::Team);
    let shared = state.location().to_string();

    load(&mut state, &shared);

    assert_eq!(state.nav.history_len(), 0);
    assert_eq!(state.nav.previous(), None);
    host_back(&mut state);
    assert_eq!(state.current_view(), ViewId::PeopleHub);
}
