use std::collections::VecDeque;

use serde::Serialize;

use super::hierarchy::depth_of;
use super::hierarchy::parent_of;
use super::views::ViewId;
use super::views::ROOT_VIEW;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Deeper or equal depth counts as forward, so moving between sibling
    /// leaves animates like drilling in.
    pub fn infer(prev: ViewId, next: ViewId) -> Self {
        if depth_of(next) >= depth_of(prev) {
            Self::Forward
        } else {
            Self::Backward
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }

    pub fn animation(self) -> SlideAnimation {
        match self {
            Self::Forward => SlideAnimation {
                enter_from: Edge::Trailing,
                exit_to: Edge::Leading,
            },
            Self::Backward => SlideAnimation {
                enter_from: Edge::Leading,
                exit_to: Edge::Trailing,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Leading,
    Trailing,
}

impl Edge {
    /// Signed horizontal offset for a left-to-right layout.
    pub fn offset(self) -> i8 {
        match self {
            Self::Leading => -1,
            Self::Trailing => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideAnimation {
    pub enter_from: Edge,
    pub exit_to: Edge,
}

/// What caused a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Load,
    User,
    Voice,
    Back,
}

impl Trigger {
    pub fn label(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::User => "user",
            Self::Voice => "voice",
            Self::Back => "back",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: ViewId,
    pub to: ViewId,
    pub direction: Direction,
    pub trigger: Trigger,
}

/// Where "back" goes from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackTarget {
    History(ViewId),
    Parent(ViewId),
    Stay,
}

/// Current view plus session-local history. Never persisted; a reload
/// rebuilds it from the location alone.
#[derive(Debug, Clone)]
pub struct NavigationState {
    current: ViewId,
    previous: Option<ViewId>,
    last_direction: Direction,
    history: VecDeque<ViewId>,
    history_cap: usize,
}

impl NavigationState {
    pub fn new(history_cap: usize) -> Self {
        Self {
            current: ROOT_VIEW,
            previous: None,
            last_direction: Direction::Forward,
            history: VecDeque::new(),
            history_cap: history_cap.max(1),
        }
    }

    pub fn current(&self) -> ViewId {
        self.current
    }

    pub fn previous(&self) -> Option<ViewId> {
        self.previous
    }

    pub fn last_direction(&self) -> Direction {
        self.last_direction
    }

    pub fn history(&self) -> impl Iterator<Item = &ViewId> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Entry from a location: no history, and the entrance counts as a
    /// forward move from the implicit root.
    pub fn enter(&mut self, view: ViewId) -> Transition {
        self.history.clear();
        self.previous = None;
        self.current = view;
        self.last_direction = Direction::Forward;
        Transition {
            from: ROOT_VIEW,
            to: view,
            direction: Direction::Forward,
            trigger: Trigger::Load,
        }
    }

    /// Records `current` in history and moves to `next`. `None` when `next`
    /// is already current.
    pub fn advance(&mut self, next: ViewId, trigger: Trigger) -> Option<Transition> {
        if next == self.current {
            return None;
        }
        if self.history.len() == self.history_cap {
            self.history.pop_front();
        }
        self.history.push_back(self.current);
        Some(self.apply(next, trigger))
    }

    pub fn back_target(&self) -> BackTarget {
        if let Some(view) = self.history.back() {
            BackTarget::History(*view)
        } else if self.current != ROOT_VIEW {
            BackTarget::Parent(parent_of(self.current))
        } else {
            BackTarget::Stay
        }
    }

    /// Consumes history when there is some, otherwise climbs to the parent.
    pub fn back(&mut self) -> Option<Transition> {
        let target = match self.back_target() {
            BackTarget::History(view) => {
                self.history.pop_back();
                view
            }
            BackTarget::Parent(view) => view,
            BackTarget::Stay => return None,
        };
        if target == self.current {
            return None;
        }
        Some(self.apply(target, Trigger::Back))
    }

    fn apply(&mut self, next: ViewId, trigger: Trigger) -> Transition {
        let from = self.current;
        let direction = Direction::infer(from, next);
        self.previous = Some(from);
        self.current = next;
        self.last_direction = direction;
        Transition {
            from,
            to: next,
            direction,
            trigger,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::views::ALL_VIEWS;

    #[test]
    fn direction_follows_depth_for_every_pair() {
        for prev in ALL_VIEWS {
            for next in ALL_VIEWS {
                let expected = if depth_of(next) >= depth_of(prev) {
                    Direction::Forward
                } else {
                    Direction::Backward
                };
                assert_eq!(Direction::infer(prev, next), expected, "{prev} -> {next}");
            }
        }
    }

    #[test]
    fn sibling_leaves_count_as_forward() {
        assert_eq!(Direction::infer(ViewId::Team, ViewId::Leave), Direction::Forward);
    }

    #[test]
    fn animations_mirror_each_other() {
        let forward = Direction::Forward.animation();
        let backward = Direction::Backward.animation();
        assert_eq!(forward.enter_from, backward.exit_to);
        assert_eq!(forward.exit_to, backward.enter_from);
        assert_eq!(forward.enter_from.offset(), 1);
    }

    #[test]
    fn back_without_history_climbs_to_parent() {
        let mut nav = NavigationState::new(8);
        nav.enter(ViewId::Team);
        let transition = nav.back().unwrap();
        assert_eq!(transition.to, ViewId::PeopleHub);
        assert_eq!(transition.direction, Direction::Backward);
        let transition = nav.back().unwrap();
        assert_eq!(transition.to, ViewId::Overview);
        assert_eq!(nav.back(), None);
    }

    #[test]
    fn back_prefers_history_over_hierarchy() {
        let mut nav = NavigationState::new(8);
        nav.advance(ViewId::Quotes, Trigger::User);
        nav.advance(ViewId::Team, Trigger::Voice);
        assert_eq!(nav.back_target(), BackTarget::History(ViewId::Quotes));
        assert_eq!(nav.back().unwrap().to, ViewId::Quotes);
        assert_eq!(nav.back().unwrap().to, ViewId::Overview);
        assert_eq!(nav.history_len(), 0);
    }

    #[test]
    fn history_is_bounded() {
        let mut nav = NavigationState::new(2);
        nav.advance(ViewId::Quotes, Trigger::User);
        nav.advance(ViewId::Team, Trigger::User);
        nav.advance(ViewId::Fleet, Trigger::User);
        let kept: Vec<ViewId> = nav.history().copied().collect();
        assert_eq!(kept, vec![ViewId::Quotes, ViewId::Team]);
    }

    #[test]
    fn advancing_to_current_view_is_not_a_transition() {
        let mut nav = NavigationState::new(8);
        assert_eq!(nav.advance(ViewId::Overview, Trigger::User), None);
        assert_eq!(nav.history_len(), 0);
        assert_eq!(nav.previous(), None);
    }

    #[test]
    fn enter_resets_previous_and_history() {
        let mut nav = NavigationState::new(8);
        nav.advance(ViewId::Quotes, Trigger::User);
        let transition = nav.enter(ViewId::Incidents);
        assert_eq!(transition.direction, Direction::Forward);
        assert_eq!(nav.previous(), None);
        assert_eq!(nav.history_len(), 0);
        assert_eq!(nav.current(), ViewId::Incidents);
    }
}
