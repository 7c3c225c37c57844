//! Stack of behaviour units ("states").
//!
//! The most recently pushed state is the active one: it alone receives
//! `update` and `render`. The stack never pauses anything itself; a state that
//! is covered simply stops being updated and resumes exactly where its own
//! fields left it once it is on top again.
//!
//! States never touch the stack directly. They queue [`StackCommand`]s on
//! their context, and the frame driver applies them through [`StateStack::apply`]
//! once the hook that queued them has returned.

use crate::ui::Renderer;

/// Lifecycle hooks of a stacked state. Every hook is optional.
pub trait State<C> {
    /// Continuation values routed to states by [`StateStack::dispatch`].
    type Signal;

    fn enter(&mut self, _ctx: &mut C) {}

    fn exit(&mut self, _ctx: &mut C) {}

    fn update(&mut self, _ctx: &mut C, _dt: f64) {}

    fn render(&self, _ctx: &C, _renderer: &mut dyn Renderer) {}

    /// Returns true if the signal was meant for this state.
    fn on_signal(&mut self, _ctx: &mut C, _signal: &Self::Signal) -> bool {
        false
    }
}

/// A deferred stack operation.
#[derive(Debug)]
pub enum StackCommand<S> {
    Push(S),
    Pop,
    /// Replace the whole stack with a single state.
    Change(S),
}

#[derive(Debug)]
pub struct StateStack<S> {
    states: Vec<S>,
    started: bool,
}

impl<S> Default for StateStack<S> {
    fn default() -> Self {
        Self {
            states: Vec::new(),
            started: false,
        }
    }
}

impl<S> StateStack<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The active state.
    pub fn top(&self) -> Option<&S> {
        self.states.last()
    }

    /// States from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.states.iter()
    }

    /// Enters the root state. Only the driver calls this, once.
    pub fn start<C>(&mut self, ctx: &mut C)
    where
        S: State<C>,
    {
        if self.started {
            tracing::warn!("state stack already started");
            return;
        }
        self.started = true;
        if let Some(root) = self.states.first_mut() {
            root.enter(ctx);
        }
    }

    /// Places `state` on top. It is entered unless it becomes the root.
    pub fn push<C>(&mut self, state: S, ctx: &mut C)
    where
        S: State<C>,
    {
        let was_empty = self.states.is_empty();
        self.states.push(state);
        if !was_empty {
            if let Some(top) = self.states.last_mut() {
                top.enter(ctx);
            }
        }
    }

    /// Exits and removes the active state. The state beneath is not re-entered.
    ///
    /// # Panics
    /// Popping an empty stack is a programming error.
    pub fn pop<C>(&mut self, ctx: &mut C) -> S
    where
        S: State<C>,
    {
        let Some(mut state) = self.states.pop() else {
            panic!("popped an empty state stack");
        };
        state.exit(ctx);
        state
    }

    /// Exits every state (top first) and replaces them with `state`.
    pub fn change<C>(&mut self, state: S, ctx: &mut C)
    where
        S: State<C>,
    {
        while let Some(mut old) = self.states.pop() {
            old.exit(ctx);
        }
        self.states.push(state);
        if let Some(top) = self.states.last_mut() {
            top.enter(ctx);
        }
    }

    pub fn apply<C>(&mut self, command: StackCommand<S>, ctx: &mut C)
    where
        S: State<C>,
    {
        match command {
            StackCommand::Push(state) => self.push(state, ctx),
            StackCommand::Pop => {
                self.pop(ctx);
            }
            StackCommand::Change(state) => self.change(state, ctx),
        }
    }

    pub fn update<C>(&mut self, ctx: &mut C, dt: f64)
    where
        S: State<C>,
    {
        if let Some(top) = self.states.last_mut() {
            top.update(ctx, dt);
        }
    }

    pub fn render<C>(&self, ctx: &C, renderer: &mut dyn Renderer)
    where
        S: State<C>,
    {
        if let Some(top) = self.states.last() {
            top.render(ctx, renderer);
        }
    }

    /// Offers `signal` to each state from the top down until one accepts it.
    pub fn dispatch<C>(&mut self, ctx: &mut C, signal: &S::Signal) -> bool
    where
        S: State<C>,
    {
        self.states
            .iter_mut()
            .rev()
            .any(|state| state.on_signal(ctx, signal))
    }
}
