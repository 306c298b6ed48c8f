//! Observable state container.
//!
//! A plain get/set/subscribe cell, decoupled from any specific reactivity
//! runtime. The widget exposes its revision counter through this so a host
//! can schedule re-renders without the core depending on the host's signal
//! or entity system.

/// A value with change subscribers.
///
/// Subscribers are invoked synchronously, in registration order, on every
/// `set`/`update`. There is no unsubscribe: the container lives exactly as
/// long as the widget that owns it.
pub struct Observable<T> {
    value: T,
    subscribers: Vec<Box<dyn Fn(&T)>>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Observable<T> {
    /// Create a new container with the given initial value.
    pub fn new(value: T) -> Self {
        Self {
            value,
            subscribers: Vec::new(),
        }
    }

    /// Get a reference to the current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Set the value and notify all subscribers.
    pub fn set(&mut self, value: T) {
        self.value = value;
        for sub in &self.subscribers {
            sub(&self.value);
        }
    }

    /// Update the value in place and notify all subscribers.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
        for sub in &self.subscribers {
            sub(&self.value);
        }
    }

    /// Register a change subscriber.
    pub fn subscribe(&mut self, f: impl Fn(&T) + 'static) {
        self.subscribers.push(Box::new(f));
    }
}

impl<T: Copy> Observable<T> {
    /// Get the current value by copy.
    pub fn value(&self) -> T {
        self.value
    }
}
