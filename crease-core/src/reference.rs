use std::cell;
use std::ops::Deref;

/// A reference to the value held by a signal.
///
/// Wraps the [RefCell](cell::RefCell) borrow so the signal's storage stays
/// private. The value cannot be replaced while a [Ref] is alive.
pub struct Ref<'a, T>(pub(crate) cell::Ref<'a, T>);

impl<T> Deref for Ref<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
