//! Current-value subject with an ordered subscriber list.
//!
//! A [`Subject`] owns a value and a list of observers. Each call to
//! [`Subject::next`] replaces the value and then notifies every observer in
//! registration order with the new value. Subscribing delivers the current
//! value immediately, so an observer never has to ask for the initial state.

use core::fmt;

/// Callback notified with each new value.
pub type Observer<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`Subject::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A value plus the observers interested in it.
pub struct Subject<T> {
    value: T,
    observers: Vec<(SubscriptionId, Observer<T>)>,
    next_id: u64,
}

impl<T> Subject<T> {
    /// Create a subject holding `initial`, with no observers.
    #[must_use]
    pub const fn new(initial: T) -> Self {
        Self {
            value: initial,
            observers: Vec::new(),
            next_id: 0,
        }
    }

    /// The current value.
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Register an observer and immediately notify it with the current value.
    pub fn subscribe(&mut self, observer: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        observer(&self.value);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Replace the value, then notify observers in registration order.
    pub fn next(&mut self, value: T) {
        self.value = value;
        for (_, observer) in &self.observers {
            observer(&self.value);
        }
    }

    /// Number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<T: Default> Default for Subject<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("value", &self.value)
            .field("observers", &self.observers.len())
            .finish()
    }
}
