//! State broadcasting: a replay-latest subject and the view/history derivation.
//!
//! [`Subject`] holds one current value. A new subscriber is called with that
//! value right away, then once per later value, in publication order.
//! Nothing is buffered beyond the current value.
//!
//! [`Broadcaster`] feeds three subjects from every published [`GameState`]:
//! the raw states, the derived [`GameView`], and the history of views that
//! are no longer live (most recent first).
//!
//! Everything here is single-threaded. Listeners run synchronously inside
//! `next`, so they must not call back into whatever owns the subject.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::state::{GameState, GameView};

type Listener<T> = Box<dyn FnMut(&T)>;

struct Listeners<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
    /// Ids cancelled while their entry was checked out for an emission.
    cancelled: Vec<u64>,
}

impl<T> Listeners<T> {
    fn remove(&mut self, id: u64) {
        let before = self.entries.len();
        self.entries.retain(|(i, _)| *i != id);
        if self.entries.len() == before {
            self.cancelled.push(id);
        }
    }
}

/// Handle returned by [`Subject::subscribe`].
///
/// The listener stays registered until [`Subscription::unsubscribe`] is
/// called. Dropping the handle does not unsubscribe.
#[must_use = "keep the handle to be able to unsubscribe"]
pub struct Subscription {
    cancel: Box<dyn FnOnce()>,
}

impl Subscription {
    /// Remove the listener. Safe to call from inside that listener.
    pub fn unsubscribe(self) {
        (self.cancel)();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Subscription")
    }
}

/// A value that replays its latest state to new subscribers.
pub struct Subject<T> {
    current: T,
    listeners: Rc<RefCell<Listeners<T>>>,
}

impl<T: 'static> Subject<T> {
    pub fn new(initial: T) -> Self {
        Self {
            current: initial,
            listeners: Rc::new(RefCell::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
                cancelled: Vec::new(),
            })),
        }
    }

    /// The latest published value.
    pub fn value(&self) -> &T {
        &self.current
    }

    /// Register a listener. It is called immediately with the current value.
    pub fn subscribe(&self, mut listener: impl FnMut(&T) + 'static) -> Subscription {
        listener(&self.current);

        let id = {
            let mut listeners = self.listeners.borrow_mut();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.push((id, Box::new(listener)));
            id
        };

        let weak: Weak<RefCell<Listeners<T>>> = Rc::downgrade(&self.listeners);
        Subscription {
            cancel: Box::new(move || {
                if let Some(listeners) = weak.upgrade() {
                    listeners.borrow_mut().remove(id);
                }
            }),
        }
    }

    /// Replace the current value and notify every listener.
    pub fn next(&mut self, value: T) {
        self.current = value;

        // Check the listeners out so one of them can unsubscribe mid-emission.
        let mut entries = std::mem::take(&mut self.listeners.borrow_mut().entries);
        for (_, listener) in entries.iter_mut() {
            listener(&self.current);
        }

        let mut listeners = self.listeners.borrow_mut();
        let cancelled = std::mem::take(&mut listeners.cancelled);
        entries.retain(|(id, _)| !cancelled.contains(id));
        listeners.entries = entries;
    }

    /// Number of registered listeners.
    pub fn observer_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

/// Publishes game states and derives the live view and the view history.
pub struct Broadcaster {
    states: Subject<GameState>,
    views: Subject<GameView>,
    history: Subject<Vec<GameView>>,
    past: VecDeque<GameView>,
    history_limit: Option<usize>,
}

impl Broadcaster {
    /// Start broadcasting from `initial`, which becomes the first live state.
    ///
    /// `history_limit` caps how many past views are kept; `None` keeps all.
    pub fn new(initial: GameState, history_limit: Option<usize>) -> Self {
        Self {
            states: Subject::new(initial),
            views: Subject::new(GameView::derive(&initial)),
            history: Subject::new(Vec::new()),
            past: VecDeque::new(),
            history_limit,
        }
    }

    /// Publish a new live state.
    ///
    /// Subscribers see the state first, then the updated history, then the
    /// new view.
    pub fn publish(&mut self, state: GameState) {
        self.states.next(state);

        let view = GameView::derive(&state);
        self.past.push_front(self.views.value().clone());
        if let Some(limit) = self.history_limit {
            self.past.truncate(limit);
        }
        self.history.next(self.past.iter().cloned().collect());
        self.views.next(view);
    }

    pub fn state(&self) -> &GameState {
        self.states.value()
    }

    pub fn view(&self) -> &GameView {
        self.views.value()
    }

    /// Past views, most recent first. Never contains the live view.
    pub fn history(&self) -> &[GameView] {
        self.history.value()
    }

    pub fn subscribe_states(&self, listener: impl FnMut(&GameState) + 'static) -> Subscription {
        self.states.subscribe(listener)
    }

    pub fn subscribe_views(&self, listener: impl FnMut(&GameView) + 'static) -> Subscription {
        self.views.subscribe(listener)
    }

    pub fn subscribe_history(
        &self,
        listener: impl FnMut(&Vec<GameView>) + 'static,
    ) -> Subscription {
        self.history.subscribe(listener)
    }
}
