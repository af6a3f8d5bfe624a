// SPDX-License-Identifier: LGPL-3.0-only
//! Reactive binding between a container's measured width and the collapsed strip.
//!
//! The binding owns the current items, the active id and the last measured
//! width, and re-runs [collapse] whenever one of them changes. The result is
//! published through a [StateSignal] so presentation code can listen for it.
//!
//! The host environment reports widths through a [ResizeObserver]; the binding
//! is the only piece that knows about it.

use crate::collapsible::Collapsible;
use crate::item::{ItemId, Measurable};
use crate::layout::{collapse, collapsed_count, CollapsePolicy, LayoutContext};
use crate::reference::Ref;
use crate::signal::state::StateSignal;
use crate::signal::Signal;
use nalgebra::Vector2;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Identifier of a registered resize callback.
pub type ObserverId = u64;

/// Callback invoked with the container width, or [None] while it is unknown.
pub type ResizeCallback = Box<dyn FnMut(Option<f32>)>;

/// Ids of callbacks released while their observer was borrowed.
pub type ReleaseQueue = Rc<RefCell<Vec<ObserverId>>>;

/// A host mechanism reporting container width changes.
pub trait ResizeObserver {
    /// Register a callback. It stays registered until [ResizeObserver::unobserve].
    fn observe(&mut self, callback: ResizeCallback) -> ObserverId;

    /// Release a callback registered with [ResizeObserver::observe].
    fn unobserve(&mut self, id: ObserverId);

    /// Queue for releases that arrive while the observer is borrowed, for
    /// example from inside one of its own callbacks.
    ///
    /// An observer returning a queue must drop the queued callbacks before it
    /// next reports a width.
    fn release_queue(&self) -> Option<ReleaseQueue> {
        None
    }
}

/// A [ResizeObserver] driven by explicit [ManualResizeObserver::emit] calls.
///
/// Useful for headless hosts and tests.
#[derive(Default)]
pub struct ManualResizeObserver {
    next_id: ObserverId,
    callbacks: Vec<(ObserverId, ResizeCallback)>,
    released: ReleaseQueue,
}

impl ManualResizeObserver {
    /// Create an observer without callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a width to every registered callback.
    ///
    /// Callbacks released while the width is being reported are skipped and
    /// dropped once every other callback has run.
    pub fn emit(&mut self, width: Option<f32>) {
        self.drain_released();
        for (id, callback) in self.callbacks.iter_mut() {
            if self.released.borrow().contains(id) {
                continue;
            }
            callback(width);
        }
        self.drain_released();
    }

    /// Number of registered callbacks.
    pub fn observer_count(&self) -> usize {
        let released = self.released.borrow();
        self.callbacks
            .iter()
            .filter(|(id, _)| !released.contains(id))
            .count()
    }

    fn drain_released(&mut self) {
        let released: Vec<ObserverId> = self.released.borrow_mut().drain(..).collect();
        if !released.is_empty() {
            log::trace!("ManualResizeObserver: dropping {} released callbacks", released.len());
            self.callbacks.retain(|(id, _)| !released.contains(id));
        }
    }
}

impl ResizeObserver for ManualResizeObserver {
    fn observe(&mut self, callback: ResizeCallback) -> ObserverId {
        let id = self.next_id;
        self.next_id += 1;
        self.callbacks.push((id, callback));
        id
    }

    fn unobserve(&mut self, id: ObserverId) {
        self.callbacks.retain(|(registered, _)| *registered != id);
    }

    fn release_queue(&self) -> Option<ReleaseQueue> {
        Some(self.released.clone())
    }
}

type ActiveFn<T> = Box<dyn Fn(&[T]) -> Option<ItemId>>;

/// Measurement state of the bound container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasureState {
    /// Not attached to anything; the full strip is shown.
    #[default]
    Unmeasured,
    /// Attached but no width reported yet; the full strip is shown.
    Measuring,
    /// The container was measured at the given width.
    Measured(u32),
}

impl MeasureState {
    /// The measured width, if any.
    pub fn width(&self) -> Option<u32> {
        match self {
            MeasureState::Measured(width) => Some(*width),
            _ => None,
        }
    }
}

struct BindingState<T> {
    items: Vec<T>,
    active_id: Option<ItemId>,
    context: LayoutContext,
    policy: CollapsePolicy,
    measure: MeasureState,
    fixed_width: Option<u32>,
    /// Group size of the published output; [None] forces the next publish.
    published: Option<usize>,
}

impl<T: Measurable + Clone> BindingState<T> {
    fn available_width(&self) -> Option<u32> {
        self.fixed_width.or(self.measure.width())
    }

    /// Compute the new strip, or [None] when the published one is still current.
    fn compute(&mut self) -> Option<Vec<Collapsible<T>>> {
        let width = self.available_width();
        let active = self.active_id.as_ref();
        let grouped = collapsed_count(&self.items, width, active, &self.context, self.policy);

        if self.published == Some(grouped) {
            log::trace!("MeasurementBinding: {} grouped, output unchanged", grouped);
            return None;
        }

        self.published = Some(grouped);
        Some(collapse(&self.items, width, active, &self.context, self.policy))
    }
}

fn publish<T: Measurable + Clone + 'static>(
    state: &RefCell<BindingState<T>>,
    output: &StateSignal<Vec<Collapsible<T>>>,
) {
    // The state borrow ends before listeners run.
    let next = state.borrow_mut().compute();
    if let Some(strip) = next {
        output.set_value(strip);
    }
}

fn observe_into<T: Measurable + Clone + 'static>(
    state: &RefCell<BindingState<T>>,
    output: &StateSignal<Vec<Collapsible<T>>>,
    width: Option<f32>,
) {
    let width = to_width(width);
    {
        let mut state = state.borrow_mut();
        let next = match width {
            Some(width) => MeasureState::Measured(width),
            None => MeasureState::Measuring,
        };
        if state.measure == next {
            return;
        }

        log::debug!("MeasurementBinding: {:?} -> {:?}", state.measure, next);
        state.measure = next;
    }

    publish(state, output);
}

/// Convert a reported width into whole pixels. Unusable widths mean "unknown".
fn to_width(width: Option<f32>) -> Option<u32> {
    width
        .filter(|width| width.is_finite() && *width >= 1.0)
        .map(|width| width.floor() as u32)
}

struct Attachment {
    observer: Rc<RefCell<dyn ResizeObserver>>,
    queue: Option<ReleaseQueue>,
    id: ObserverId,
}

impl Attachment {
    fn release(self) {
        if let Ok(mut observer) = self.observer.try_borrow_mut() {
            observer.unobserve(self.id);
            return;
        }

        match self.queue {
            Some(queue) => {
                log::debug!("MeasurementBinding: observer busy, queueing release of {}", self.id);
                queue.borrow_mut().push(self.id);
            },
            None => log::warn!("MeasurementBinding: observer busy, callback {} not released", self.id),
        }
    }
}

/// Keeps a collapsed strip in sync with its container width.
///
/// # Example
///
/// ```rust
/// use crease_core::binding::{ManualResizeObserver, MeasurementBinding};
/// use crease_core::item::Item;
/// use crease_core::layout::{CollapsePolicy, LayoutContext};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let items: Vec<_> = (0..8u64).map(|i| Item::new(i).with_label("Section")).collect();
/// let mut binding = MeasurementBinding::new(items, LayoutContext::default(), CollapsePolicy::tail());
///
/// let observer = Rc::new(RefCell::new(ManualResizeObserver::new()));
/// binding.attach(observer.clone());
/// observer.borrow_mut().emit(Some(240.0));
///
/// assert!(binding.collapsed().iter().any(|element| element.is_group()));
/// ```
pub struct MeasurementBinding<T: Measurable + Clone + 'static> {
    state: Rc<RefCell<BindingState<T>>>,
    output: StateSignal<Vec<Collapsible<T>>>,
    attachment: Option<Attachment>,
}

impl<T: Measurable + Clone + 'static> MeasurementBinding<T> {
    /// Create an unmeasured binding showing the full strip.
    pub fn new(items: Vec<T>, context: LayoutContext, policy: CollapsePolicy) -> Self {
        let initial = items.iter().cloned().map(Collapsible::Item).collect();
        let state = BindingState {
            items,
            active_id: None,
            context,
            policy,
            measure: MeasureState::Unmeasured,
            fixed_width: None,
            published: Some(0),
        };

        Self {
            state: Rc::new(RefCell::new(state)),
            output: StateSignal::new(initial),
            attachment: None,
        }
    }

    /// Set the active item.
    pub fn with_active(self, active_id: Option<ItemId>) -> Self {
        self.set_active(active_id);
        self
    }

    /// Use a fixed width instead of live measurements.
    pub fn with_fixed_width(self, width: u32) -> Self {
        self.set_fixed_width(Some(width));
        self
    }

    /// Start observing container widths from `observer`.
    ///
    /// Replaces any previous attachment.
    pub fn attach<O: ResizeObserver + 'static>(&mut self, observer: Rc<RefCell<O>>) {
        self.release_attachment();

        let weak: Weak<RefCell<BindingState<T>>> = Rc::downgrade(&self.state);
        let output = self.output.clone();
        let callback: ResizeCallback = Box::new(move |width| {
            if let Some(state) = weak.upgrade() {
                observe_into(&state, &output, width);
            }
        });

        let (id, queue) = {
            let mut observer = observer.borrow_mut();
            (observer.observe(callback), observer.release_queue())
        };
        self.attachment = Some(Attachment {
            observer,
            queue,
            id,
        });

        let mut state = self.state.borrow_mut();
        if state.measure == MeasureState::Unmeasured {
            log::debug!("MeasurementBinding: Unmeasured -> Measuring");
            state.measure = MeasureState::Measuring;
        }
    }

    /// Stop observing and return to the unmeasured state.
    pub fn detach(&mut self) {
        self.release_attachment();
        self.state.borrow_mut().measure = MeasureState::Unmeasured;
        publish(&self.state, &self.output);
    }

    /// Check if the binding is attached to an observer.
    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// Report a container width directly.
    pub fn observe_width(&self, width: Option<f32>) {
        observe_into(&self.state, &self.output, width);
    }

    /// Report a container size; only the width is used.
    pub fn observe_size(&self, size: Vector2<f32>) {
        self.observe_width(Some(size.x));
    }

    /// Report the computed layout of the container.
    pub fn observe_layout(&self, layout: &taffy::Layout) {
        self.observe_width(Some(layout.size.width));
    }

    /// Replace the items.
    pub fn set_items(&self, items: Vec<T>) {
        self.update(|state| state.items = items);
    }

    /// Replace the active item.
    pub fn set_active(&self, active_id: Option<ItemId>) {
        self.update(|state| state.active_id = active_id);
    }

    /// Replace the layout context.
    pub fn set_context(&self, context: LayoutContext) {
        self.update(|state| state.context = context);
    }

    /// Replace the collapse policy.
    pub fn set_policy(&self, policy: CollapsePolicy) {
        self.update(|state| state.policy = policy);
    }

    /// Override the available width, or return to live measurements with [None].
    pub fn set_fixed_width(&self, width: Option<u32>) {
        self.update(|state| state.fixed_width = width);
    }

    /// Recompute whenever `items` changes.
    pub fn bind_items(&self, items: &StateSignal<Vec<T>>) {
        self.listen_items(items, None);
    }

    /// Recompute whenever `items` changes, deriving the active item from them.
    ///
    /// Items and active id are replaced together, so each change publishes once.
    pub fn bind_items_with_active(
        &self,
        items: &StateSignal<Vec<T>>,
        active: impl Fn(&[T]) -> Option<ItemId> + 'static,
    ) {
        self.listen_items(items, Some(Box::new(active)));
    }

    /// Recompute whenever `active` changes.
    pub fn bind_active(&self, active: &StateSignal<Option<ItemId>>) {
        self.set_active(active.get().clone());
        let weak = Rc::downgrade(&self.state);
        let output = self.output.clone();
        active.listen(Box::new(move |active_id: Ref<'_, Option<ItemId>>| {
            if let Some(state) = weak.upgrade() {
                {
                    let mut state = state.borrow_mut();
                    state.active_id = active_id.clone();
                    state.published = None;
                }
                publish(&state, &output);
            }
        }));
    }

    /// The signal carrying the collapsed strip.
    pub fn output(&self) -> StateSignal<Vec<Collapsible<T>>> {
        self.output.clone()
    }

    /// A copy of the current collapsed strip.
    pub fn collapsed(&self) -> Vec<Collapsible<T>> {
        self.output.get().clone()
    }

    /// The current measurement state.
    pub fn state(&self) -> MeasureState {
        self.state.borrow().measure
    }

    /// The width collapsing currently uses.
    pub fn available_width(&self) -> Option<u32> {
        self.state.borrow().available_width()
    }

    /// The current active id.
    pub fn active_id(&self) -> Option<ItemId> {
        self.state.borrow().active_id.clone()
    }

    /// A copy of the current items.
    pub fn items(&self) -> Vec<T> {
        self.state.borrow().items.clone()
    }

    /// The current layout context.
    pub fn context(&self) -> LayoutContext {
        self.state.borrow().context.clone()
    }

    fn listen_items(&self, items: &StateSignal<Vec<T>>, derive_active: Option<ActiveFn<T>>) {
        let sync = move |state: &RefCell<BindingState<T>>, items: &[T]| {
            let mut state = state.borrow_mut();
            state.items = items.to_vec();
            if let Some(derive) = &derive_active {
                state.active_id = derive(items);
            }
            state.published = None;
        };

        sync(&self.state, items.get().as_slice());
        publish(&self.state, &self.output);

        let weak = Rc::downgrade(&self.state);
        let output = self.output.clone();
        items.listen(Box::new(move |items: Ref<'_, Vec<T>>| {
            if let Some(state) = weak.upgrade() {
                sync(&state, items.as_slice());
                publish(&state, &output);
            }
        }));
    }

    fn update(&self, op: impl FnOnce(&mut BindingState<T>)) {
        {
            let mut state = self.state.borrow_mut();
            op(&mut state);
            state.published = None;
        }
        publish(&self.state, &self.output);
    }

    fn release_attachment(&mut self) {
        if let Some(attachment) = self.attachment.take() {
            log::debug!("MeasurementBinding: releasing resize callback {}", attachment.id);
            attachment.release();
        }
    }
}

impl<T: Measurable + Clone + 'static> Drop for MeasurementBinding<T> {
    fn drop(&mut self) {
        self.release_attachment();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;

    fn items() -> Vec<Item> {
        (1..=5u64)
            .map(|id| Item::new(id).with_label(format!("Item {}", id)).with_max_width(95))
            .collect()
    }

    #[test]
    fn test_starts_unmeasured_with_full_strip() {
        let binding = MeasurementBinding::new(items(), LayoutContext::default(), CollapsePolicy::tail());
        assert_eq!(binding.state(), MeasureState::Unmeasured);
        assert_eq!(binding.collapsed().len(), 5);
        assert!(binding.collapsed().iter().all(|e| !e.is_group()));
    }

    #[test]
    fn test_attach_moves_to_measuring() {
        let mut binding =
            MeasurementBinding::new(items(), LayoutContext::default(), CollapsePolicy::tail());
        let observer = Rc::new(RefCell::new(ManualResizeObserver::new()));

        binding.attach(observer.clone());
        assert_eq!(binding.state(), MeasureState::Measuring);
        assert_eq!(observer.borrow().observer_count(), 1);

        observer.borrow_mut().emit(Some(300.5));
        assert_eq!(binding.state(), MeasureState::Measured(300));

        observer.borrow_mut().emit(None);
        assert_eq!(binding.state(), MeasureState::Measuring);
        assert_eq!(binding.collapsed().len(), 5);
    }

    #[test]
    fn test_unchanged_width_does_not_republish() {
        let binding = MeasurementBinding::new(items(), LayoutContext::default(), CollapsePolicy::tail());
        let publishes = Rc::new(std::cell::Cell::new(0));
        let counter = publishes.clone();
        binding
            .output()
            .listen(Box::new(move |_| counter.set(counter.get() + 1)));

        binding.observe_width(Some(300.0));
        binding.observe_width(Some(300.4));
        assert_eq!(publishes.get(), 1);

        // Same split at a slightly different width.
        binding.observe_width(Some(310.0));
        assert_eq!(publishes.get(), 1);

        binding.observe_width(Some(1000.0));
        assert_eq!(publishes.get(), 2);
    }

    #[test]
    fn test_fixed_width_takes_precedence() {
        let binding = MeasurementBinding::new(items(), LayoutContext::default(), CollapsePolicy::tail())
            .with_fixed_width(300);
        binding.observe_width(Some(2000.0));

        assert_eq!(binding.available_width(), Some(300));
        assert!(binding.collapsed().last().is_some_and(Collapsible::is_group));

        binding.set_fixed_width(None);
        assert_eq!(binding.available_width(), Some(2000));
        assert!(binding.collapsed().iter().all(|e| !e.is_group()));
    }

    #[test]
    fn test_drop_releases_observer() {
        let observer = Rc::new(RefCell::new(ManualResizeObserver::new()));
        {
            let mut binding =
                MeasurementBinding::new(items(), LayoutContext::default(), CollapsePolicy::tail());
            binding.attach(observer.clone());
            assert_eq!(observer.borrow().observer_count(), 1);
        }
        assert_eq!(observer.borrow().observer_count(), 0);
        observer.borrow_mut().emit(Some(100.0));
    }

    #[test]
    fn test_release_during_emit_is_deferred() {
        let observer = Rc::new(RefCell::new(ManualResizeObserver::new()));
        let calls = Rc::new(std::cell::Cell::new(0));

        let counter = calls.clone();
        let id = observer
            .borrow_mut()
            .observe(Box::new(move |_| counter.set(counter.get() + 1)));
        let queue = observer.borrow().release_queue().unwrap();

        queue.borrow_mut().push(id);
        assert_eq!(observer.borrow().observer_count(), 0);

        observer.borrow_mut().emit(Some(100.0));
        assert_eq!(calls.get(), 0);
        assert!(queue.borrow().is_empty());
        assert_eq!(observer.borrow().observer_count(), 0);
    }

    #[test]
    fn test_rejects_unusable_widths() {
        assert_eq!(to_width(Some(f32::NAN)), None);
        assert_eq!(to_width(Some(f32::INFINITY)), None);
        assert_eq!(to_width(Some(0.4)), None);
        assert_eq!(to_width(Some(-20.0)), None);
        assert_eq!(to_width(Some(299.9)), Some(299));
    }
}
