use crate::capabilities::Context;

/// A screen's state model: a pure transition function plus on-demand metrics.
pub trait Screen: Clone {
    type Action: std::fmt::Debug;
    type Metrics;

    /// Computes the next state from this one. Never performs I/O.
    fn reduce(&self, action: Self::Action, context: &Context) -> Self;

    fn metrics(&self, context: &Context) -> Self::Metrics;
}

/// Owns one screen's current state and the capabilities its reducer needs.
#[derive(Debug, Clone)]
pub struct Store<S> {
    state: S,
    context: Context,
}

impl<S: Screen> Store<S> {
    pub fn new(state: S, context: Context) -> Self {
        Self { state, context }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn dispatch(&mut self, action: S::Action) -> &S {
        tracing::debug!(?action, "dispatch");
        self.state = self.state.reduce(action, &self.context);
        &self.state
    }

    pub fn metrics(&self) -> S::Metrics {
        self.state.metrics(&self.context)
    }
}
