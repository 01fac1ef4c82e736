//! Adapter keeping a rendered view in sync with the store.
//!
//! A [`ViewBinding`] owns a [`View`]. Mounting renders the view once from the
//! current state and subscribes it; every later change re-renders it from
//! the full state. Unmounting, or dropping the binding, releases the
//! subscription.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use tracing::debug;

use crate::domain::state::StoreState;
use crate::domain::store::DirectoryStore;
use crate::domain::subscriptions::Subscription;

/// Anything that can redraw itself from the store state.
pub trait View {
    /// Redraw from `state`.
    fn render(&mut self, state: StoreState<'_>);
}

/// Whether a binding is currently subscribed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    /// Not subscribed; the view keeps its last render.
    Unmounted,
    /// Subscribed and re-rendering on every change.
    Mounted,
}

/// Owns a view and its subscription.
#[derive(Debug)]
pub struct ViewBinding<V> {
    view: Rc<RefCell<V>>,
    renders: Rc<Cell<usize>>,
    subscription: Option<Subscription>,
}

impl<V: View + 'static> ViewBinding<V> {
    /// Wrap `view` in an unmounted binding.
    #[must_use]
    pub fn new(view: V) -> Self {
        Self {
            view: Rc::new(RefCell::new(view)),
            renders: Rc::new(Cell::new(0)),
            subscription: None,
        }
    }

    /// Render once from `store` and subscribe. Does nothing when already
    /// mounted.
    pub fn mount(&mut self, store: &DirectoryStore) {
        if self.subscription.is_some() {
            return;
        }

        render_into(&self.view, &self.renders, store.state());

        let view = Rc::clone(&self.view);
        let renders = Rc::clone(&self.renders);
        self.subscription = Some(store.subscribe(move |change, state| {
            debug!(%change, "re-rendering bound view");
            render_into(&view, &renders, state);
        }));
    }

    /// Release the subscription. Returns `true` if the binding was mounted.
    pub fn unmount(&mut self) -> bool {
        let Some(subscription) = self.subscription.take() else {
            return false;
        };
        subscription.unsubscribe();
        true
    }

    /// Current mount state.
    #[must_use]
    pub const fn state(&self) -> BindingState {
        if self.subscription.is_some() {
            BindingState::Mounted
        } else {
            BindingState::Unmounted
        }
    }

    /// Returns `true` while subscribed.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        matches!(self.state(), BindingState::Mounted)
    }

    /// Number of renders performed so far.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.renders.get()
    }

    /// Borrow the bound view.
    ///
    /// # Panics
    ///
    /// Panics if called from inside the view's own `render`.
    #[must_use]
    pub fn view(&self) -> Ref<'_, V> {
        self.view.borrow()
    }
}

fn render_into<V: View>(view: &RefCell<V>, renders: &Cell<usize>, state: StoreState<'_>) {
    view.borrow_mut().render(state);
    renders.set(renders.get().saturating_add(1));
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ids::UserId;
    use crate::outbound::storage::MemorySnapshotStorage;

    #[derive(Debug, Default)]
    struct CountingView {
        user_counts: Vec<usize>,
    }

    impl View for CountingView {
        fn render(&mut self, state: StoreState<'_>) {
            self.user_counts.push(state.users().len());
        }
    }

    #[fixture]
    fn store() -> DirectoryStore {
        DirectoryStore::seeded(MemorySnapshotStorage::new())
    }

    #[rstest]
    fn mount_renders_immediately(store: DirectoryStore) {
        let mut binding = ViewBinding::new(CountingView::default());
        assert_eq!(binding.state(), BindingState::Unmounted);

        binding.mount(&store);

        assert!(binding.is_mounted());
        assert_eq!(binding.render_count(), 1);
        assert_eq!(binding.view().user_counts, vec![2]);
        assert_eq!(store.subscriber_count(), 1);
    }

    #[rstest]
    fn changes_rerender_from_full_state(mut store: DirectoryStore) {
        let mut binding = ViewBinding::new(CountingView::default());
        binding.mount(&store);

        store
            .delete_user(&UserId::new("2"))
            .expect("delete user");

        assert_eq!(binding.render_count(), 2);
        assert_eq!(binding.view().user_counts, vec![2, 1]);
    }

    #[rstest]
    fn second_mount_is_a_no_op(store: DirectoryStore) {
        let mut binding = ViewBinding::new(CountingView::default());

        binding.mount(&store);
        binding.mount(&store);

        assert_eq!(binding.render_count(), 1);
        assert_eq!(store.subscriber_count(), 1);
    }

    #[rstest]
    fn unmounted_views_stop_rendering(mut store: DirectoryStore) {
        let mut binding = ViewBinding::new(CountingView::default());
        binding.mount(&store);

        assert!(binding.unmount());
        assert!(!binding.unmount());
        store
            .delete_user(&UserId::new("1"))
            .expect("delete user");

        assert_eq!(binding.render_count(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[rstest]
    fn unmount_reports_a_mounted_binding_after_the_store_is_gone(store: DirectoryStore) {
        let mut binding = ViewBinding::new(CountingView::default());
        binding.mount(&store);

        drop(store);

        assert!(binding.unmount());
        assert_eq!(binding.state(), BindingState::Unmounted);
        assert!(!binding.unmount());
    }

    #[rstest]
    fn dropping_the_binding_unsubscribes(store: DirectoryStore) {
        let mut binding = ViewBinding::new(CountingView::default());
        binding.mount(&store);

        drop(binding);

        assert_eq!(store.subscriber_count(), 0);
    }

    #[rstest]
    fn remounting_renders_again(store: DirectoryStore) {
        let mut binding = ViewBinding::new(CountingView::default());
        binding.mount(&store);
        binding.unmount();

        binding.mount(&store);

        assert_eq!(binding.render_count(), 2);
        assert!(binding.is_mounted());
    }
}
