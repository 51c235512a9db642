//! Subscriber sets for grid events.

use super::navigation::FocusOutPolicy;
use super::selection::PendingDirection;
use crate::model::{Direction, KeyInput, SubscriptionId};

/// Events the grid container publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    /// The selected item changed.
    ChildSelected {
        /// New selected index, `None` when the grid became empty.
        index: Option<usize>,
        /// Stable id reported by the provider.
        item_id: Option<u64>,
    },
    /// No focusable item exists in the requested direction.
    FocusSearchFailed {
        /// Requested direction.
        direction: Direction,
        /// Focused index at the time of the search.
        current: Option<usize>,
        /// Item count at the time of the search.
        count: usize,
    },
    /// A smooth scroll started or ended.
    ScrollStateChanged(ScrollState),
    /// The confirm key was pressed on the focused item.
    ItemActivated {
        /// Activated index.
        index: usize,
    },
    /// A key the grid did not consume.
    UnhandledKey(KeyInput),
}

/// Smooth-scroll lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollState {
    /// The animation began.
    Started,
    /// The animation settled.
    Ended,
}

type Callback<E> = Box<dyn FnMut(&E)>;

/// Ordered subscriber set. Later subscribers are notified first.
pub struct Listeners<E> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback<E>)>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<E> std::fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("subscribers", &self.entries.len())
            .finish()
    }
}

impl<E> Listeners<E> {
    /// No subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback`; the handle removes it again.
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Returns false for an unknown handle.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        before != self.entries.len()
    }

    /// Number of subscribers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True without subscribers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deliver `event` to every subscriber, most recent first.
    pub fn notify(&mut self, event: &E) {
        for (_, callback) in self.entries.iter_mut().rev() {
            callback(event);
        }
    }
}

/// Failed-search report plus whether the container keeps the key.
pub fn focus_search_failed(
    policy: &FocusOutPolicy,
    movement: PendingDirection,
    scrolling: bool,
    direction: Direction,
    current: Option<usize>,
    count: usize,
) -> (GridEvent, bool) {
    (
        GridEvent::FocusSearchFailed {
            direction,
            current,
            count,
        },
        policy.consumes(movement, scrolling),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(char, u32)>>>;

    fn recorder(listeners: &mut Listeners<u32>, log: &Log, tag: char) -> SubscriptionId {
        let log = Rc::clone(log);
        listeners.subscribe(move |event| log.borrow_mut().push((tag, *event)))
    }

    #[test]
    fn notification_runs_in_reverse_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();
        recorder(&mut listeners, &log, 'a');
        recorder(&mut listeners, &log, 'b');
        listeners.notify(&7);
        assert_eq!(*log.borrow(), vec![('b', 7), ('a', 7)]);
    }

    #[test]
    fn unsubscribed_callback_is_not_called() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();
        let a = recorder(&mut listeners, &log, 'a');
        recorder(&mut listeners, &log, 'b');
        assert!(listeners.unsubscribe(a));
        assert!(!listeners.unsubscribe(a));
        listeners.notify(&1);
        assert_eq!(*log.borrow(), vec![('b', 1)]);
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn failed_search_reports_and_consumes_by_default() {
        let (event, consumed) = focus_search_failed(
            &FocusOutPolicy::default(),
            PendingDirection::Next,
            false,
            Direction::Right,
            Some(9),
            10,
        );
        assert!(consumed);
        assert_eq!(
            event,
            GridEvent::FocusSearchFailed {
                direction: Direction::Right,
                current: Some(9),
                count: 10
            }
        );
    }
}
