use std::collections::VecDeque;

use elecdash_core::reduce;
use elecdash_core::CommandBus;
use elecdash_core::Config;
use elecdash_core::ConfigError;
use elecdash_core::DashAction;
use elecdash_core::DashEffect;
use elecdash_core::DashboardState;
use elecdash_core::HostAction;
use elecdash_core::Subscription;
use elecdash_core::Transition;

use crate::contracts::AcquireRequest;
use crate::contracts::AcquireTarget;
use crate::refresh::RefreshSink;
use crate::source::BundledSource;
use crate::source::DirectorySource;
use crate::source::ModuleSource;

/// Owns the dashboard state, feeds it actions and carries out the effects.
pub struct Coordinator {
    state: DashboardState,
    source: Box<dyn ModuleSource>,
    refresh: Box<dyn RefreshSink>,
    subscription: Option<Subscription>,
    inflight: VecDeque<AcquireRequest>,
    last_transition: Option<Transition>,
    frames_requested: u64,
}

impl Coordinator {
    pub fn new(
        state: DashboardState,
        source: Box<dyn ModuleSource>,
        refresh: Box<dyn RefreshSink>,
    ) -> Self {
        Self {
            state,
            source,
            refresh,
            subscription: None,
            inflight: VecDeque::new(),
            last_transition: None,
            frames_requested: 0,
        }
    }

    /// Picks the module source the config names; bundled content otherwise.
    pub fn from_config(
        config: &Config,
        refresh: impl RefreshSink + 'static,
    ) -> Result<Self, ConfigError> {
        let state = DashboardState::from_config(config)?;
        let source: Box<dyn ModuleSource> = match &config.loader.modules_dir {
            Some(dir) => Box::new(DirectorySource::new(dir)),
            None => Box::new(BundledSource),
        };
        tracing::debug!(source = source.name(), "module source selected");
        Ok(Self::new(state, source, Box::new(refresh)))
    }

    /// Subscribes to the bus. Activating an active coordinator does nothing
    /// so a repeated mount never handles an event twice.
    pub fn activate(&mut self, bus: &CommandBus) -> bool {
        if self.subscription.is_some() {
            tracing::debug!("coordinator already subscribed");
            return false;
        }
        self.subscription = Some(bus.subscribe());
        true
    }

    pub fn teardown(&mut self) {
        if self.subscription.take().is_some() {
            tracing::debug!("coordinator unsubscribed");
        }
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn load(&mut self, location: &str) {
        self.dispatch(HostAction::Load {
            location: location.to_string(),
        });
    }

    pub fn dispatch(&mut self, action: impl Into<DashAction>) {
        let effects = reduce(&mut self.state, action.into());
        for effect in effects {
            self.execute(effect);
        }
    }

    /// Handles every bus event delivered since the last pump.
    pub fn pump(&mut self) -> usize {
        let events = match &self.subscription {
            Some(subscription) => subscription.drain(),
            None => return 0,
        };
        let handled = events.len();
        for event in events {
            self.dispatch(DashAction::Bus(event));
        }
        handled
    }

    /// Resolves queued acquisitions oldest first.
    pub fn settle(&mut self) -> usize {
        let mut settled = 0;
        while self.settle_next() {
            settled += 1;
        }
        settled
    }

    pub fn settle_next(&mut self) -> bool {
        let Some(request) = self.inflight.pop_front() else {
            return false;
        };
        let outcome = self
            .source
            .acquire(&request)
            .map_err(|err| err.to_string());
        self.dispatch(request.into_action(outcome));
        true
    }

    pub fn pending_acquisitions(&self) -> usize {
        self.inflight.len()
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn location(&self) -> &str {
        self.state.location()
    }

    pub fn last_transition(&self) -> Option<Transition> {
        self.last_transition
    }

    pub fn frames_requested(&self) -> u64 {
        self.frames_requested
    }

    fn execute(&mut self, effect: DashEffect) {
        match effect {
            DashEffect::ReflectLocation(location) => {
                tracing::debug!(%location, "location reflected");
            }
            DashEffect::Animate(transition) => {
                self.last_transition = Some(transition);
            }
            DashEffect::AcquireView { view, ticket } => self.inflight.push_back(AcquireRequest {
                ticket,
                target: AcquireTarget::View(view),
            }),
            DashEffect::AcquireDialog { dialog, ticket } => {
                self.inflight.push_back(AcquireRequest {
                    ticket,
                    target: AcquireTarget::Dialog(dialog),
                })
            }
            DashEffect::ReleaseDialog(dialog) => {
                self.inflight
                    .retain(|request| request.target != AcquireTarget::Dialog(dialog));
            }
            DashEffect::InvalidateCache(keys) => {
                self.refresh.invalidate(self.state.current_view(), &keys);
            }
            DashEffect::RequestFrame => self.frames_requested += 1,
        }
    }
}
