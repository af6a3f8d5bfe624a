use crate::reference::Ref;

/// Contains the [StateSignal](state::StateSignal).
pub mod state;

/// A listener called with the new value whenever a signal changes.
pub type Listener<T> = Box<dyn Fn(Ref<'_, T>)>;

/// A reactive value container.
///
/// Signals hold a value, hand it out through [Ref] and notify listeners
/// when it changes.
pub trait Signal<T: 'static> {
    /// Get a reference to the current value.
    fn get(&self) -> Ref<'_, T>;

    /// Replace the current value and notify listeners.
    fn set_value(&self, value: T);

    /// Register a listener called on every change.
    fn listen(&self, listener: Listener<T>);

    /// Notify all listeners with the current value.
    fn notify(&self);
}
