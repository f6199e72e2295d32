//! Observable selection store

use std::sync::{Arc, Weak};

use ahash::AHashMap;
use parking_lot::RwLock;
use tracing::debug;

use super::{CountryId, Selection, SelectionEvent, SelectionSubscriber};
use crate::{AxisKind, Field, UnknownFieldError, ViewFields, ViewId};

/// State stored behind the lock
#[derive(Debug)]
struct SelectionInner {
    selection: Selection,
    fields: AHashMap<ViewId, ViewFields>,
}

/// Process-wide selection and per-view field choices
///
/// Writes happen on the UI thread only. Subscribers are held weakly, so a
/// dropped view simply stops receiving events.
pub struct SelectionState {
    state: RwLock<SelectionInner>,
    subscribers: RwLock<Vec<(ViewId, Weak<dyn SelectionSubscriber>)>>,
}

impl SelectionState {
    /// Create a state with nothing selected and default field choices
    pub fn new() -> Self {
        let fields = ViewId::ALL
            .into_iter()
            .map(|view| (view, view.default_fields()))
            .collect();

        Self {
            state: RwLock::new(SelectionInner {
                selection: Selection::None,
                fields,
            }),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Select exactly one country
    pub fn select(&self, id: CountryId) {
        self.replace_selection(Selection::Country(id));
    }

    /// Drop any selection
    pub fn clear(&self) {
        self.replace_selection(Selection::None);
    }

    /// Click semantics: selecting the already selected country clears it
    pub fn toggle(&self, id: CountryId) {
        if self.current().as_ref() == Some(&id) {
            self.clear();
        } else {
            self.select(id);
        }
    }

    /// Select every country inside a brush region
    pub fn brush(&self, ids: impl IntoIterator<Item = CountryId>) {
        self.replace_selection(Selection::from_ids(ids));
    }

    /// The single selected country, if any
    pub fn current(&self) -> Option<CountryId> {
        self.state.read().selection.current().cloned()
    }

    pub fn selection(&self) -> Selection {
        self.state.read().selection.clone()
    }

    pub fn is_selected(&self, id: &CountryId) -> bool {
        self.state.read().selection.contains(id)
    }

    /// Field choices of one view
    pub fn view_fields(&self, view: ViewId) -> ViewFields {
        self.state
            .read()
            .fields
            .get(&view)
            .copied()
            .unwrap_or_else(|| view.default_fields())
    }

    /// Set a view's field from a name coming from UI or configuration input
    pub fn set_view_field(
        &self,
        view: ViewId,
        kind: AxisKind,
        field_name: &str,
    ) -> Result<(), UnknownFieldError> {
        let field = Field::from_name(field_name)?;
        self.set_view_field_typed(view, kind, field);
        Ok(())
    }

    /// Set a view's field; only that view's subscribers are notified
    pub fn set_view_field_typed(&self, view: ViewId, kind: AxisKind, field: Field) {
        let mut state = self.state.write();
        let fields = state
            .fields
            .entry(view)
            .or_insert_with(|| view.default_fields());

        if !fields.set(kind, field) {
            return;
        }

        let fields = *fields;
        drop(state);

        debug!(?view, ?kind, ?field, "View field changed");
        self.notify(Some(view), &SelectionEvent::FieldsChanged { view, fields });
    }

    /// Register a subscriber on behalf of a view
    pub fn subscribe(&self, view: ViewId, subscriber: Arc<dyn SelectionSubscriber>) {
        self.subscribers.write().push((view, Arc::downgrade(&subscriber)));
    }

    /// Number of subscribers that are still alive
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .iter()
            .filter(|(_, weak)| weak.strong_count() > 0)
            .count()
    }

    fn replace_selection(&self, selection: Selection) {
        let mut state = self.state.write();
        if state.selection == selection {
            return;
        }
        state.selection = selection.clone();
        drop(state);

        debug!(?selection, "Selection changed");
        self.notify(None, &SelectionEvent::SelectionChanged(selection));
    }

    /// Deliver an event to every subscriber, or only to one view's subscribers
    fn notify(&self, only: Option<ViewId>, event: &SelectionEvent) {
        let targets: Vec<Arc<dyn SelectionSubscriber>> = {
            let mut subscribers = self.subscribers.write();

            // Remove any dead weak references
            subscribers.retain(|(_, weak)| weak.strong_count() > 0);

            subscribers
                .iter()
                .filter(|(view, _)| only.map_or(true, |target| *view == target))
                .filter_map(|(_, weak)| weak.upgrade())
                .collect()
        };

        // Lock released, so a subscriber may read the state back
        for subscriber in targets {
            subscriber.on_selection_event(event);
        }
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ViewInvalidation;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<SelectionEvent>>,
    }

    impl SelectionSubscriber for Recorder {
        fn on_selection_event(&self, event: &SelectionEvent) {
            self.events.lock().push(event.clone());
        }
    }

    fn id(code: &str) -> CountryId {
        CountryId::new(code)
    }

    #[test]
    fn test_select_replaces_previous_selection() {
        let state = SelectionState::new();
        state.select(id("FIN"));
        state.select(id("DNK"));

        assert_eq!(state.current(), Some(id("DNK")));
        assert!(!state.is_selected(&id("FIN")));
        assert_eq!(state.selection().len(), 1);
    }

    #[test]
    fn test_toggle_same_country_clears() {
        let state = SelectionState::new();
        state.toggle(id("FIN"));
        assert_eq!(state.current(), Some(id("FIN")));

        state.toggle(id("FIN"));
        assert_eq!(state.current(), None);
        assert!(state.selection().is_empty());
    }

    #[test]
    fn test_selection_change_notifies_every_view() {
        let state = SelectionState::new();
        let left = Arc::new(Recorder::default());
        let right = Arc::new(Recorder::default());
        state.subscribe(ViewId::BrushLeft, left.clone());
        state.subscribe(ViewId::BrushRight, right.clone());

        state.select(id("ISL"));

        let expected = SelectionEvent::SelectionChanged(Selection::Country(id("ISL")));
        assert_eq!(left.events.lock().as_slice(), &[expected.clone()]);
        assert_eq!(right.events.lock().as_slice(), &[expected]);
    }

    #[test]
    fn test_unchanged_selection_is_silent() {
        let state = SelectionState::new();
        let recorder = Arc::new(Recorder::default());
        state.subscribe(ViewId::Map, recorder.clone());

        state.clear();
        state.select(id("NOR"));
        state.select(id("NOR"));

        assert_eq!(recorder.events.lock().len(), 1);
    }

    #[test]
    fn test_field_change_only_notifies_owner() {
        let state = SelectionState::new();
        let left = Arc::new(Recorder::default());
        let right = Arc::new(Recorder::default());
        state.subscribe(ViewId::BrushLeft, left.clone());
        state.subscribe(ViewId::BrushRight, right.clone());

        state
            .set_view_field(ViewId::BrushLeft, AxisKind::X, "Generosity")
            .unwrap();

        assert_eq!(left.events.lock().len(), 1);
        assert!(right.events.lock().is_empty());
        assert_eq!(state.view_fields(ViewId::BrushLeft).x, Field::Generosity);
        assert_eq!(state.view_fields(ViewId::BrushRight), ViewId::BrushRight.default_fields());
    }

    #[test]
    fn test_field_change_does_not_touch_selection() {
        let state = SelectionState::new();
        state.select(id("CHE"));
        state
            .set_view_field(ViewId::Bubble, AxisKind::X, "social_support")
            .unwrap();
        assert_eq!(state.current(), Some(id("CHE")));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let state = SelectionState::new();
        let err = state
            .set_view_field(ViewId::Map, AxisKind::Color, "Ladder score in Dystopia")
            .unwrap_err();
        assert_eq!(err.name, "Ladder score in Dystopia");
        assert_eq!(state.view_fields(ViewId::Map), ViewId::Map.default_fields());
    }

    #[test]
    fn test_brush_normalizes_selection() {
        let state = SelectionState::new();
        state.brush(vec![id("FIN"), id("DNK")]);
        assert!(state.is_selected(&id("FIN")));
        assert!(state.is_selected(&id("DNK")));
        assert_eq!(state.current(), None);

        state.brush(vec![id("FIN")]);
        assert_eq!(state.current(), Some(id("FIN")));

        state.brush(Vec::new());
        assert!(state.selection().is_empty());
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let state = SelectionState::new();
        let flags = ViewInvalidation::new();
        state.subscribe(ViewId::Map, flags.clone());
        assert_eq!(state.subscriber_count(), 1);

        drop(flags);
        state.select(id("SWE"));
        assert_eq!(state.subscriber_count(), 0);
    }

    #[test]
    fn test_invalidation_flags_follow_events() {
        let state = SelectionState::new();
        let flags = ViewInvalidation::new();
        state.subscribe(ViewId::Bubble, flags.clone());
        assert!(flags.take_highlight());
        assert!(flags.take_layout());

        state.select(id("NLD"));
        assert!(flags.is_highlight_dirty());
        assert!(!flags.is_layout_dirty());

        state.set_view_field_typed(ViewId::Bubble, AxisKind::X, Field::Generosity);
        assert!(flags.take_layout());
        assert!(!flags.take_layout());
    }
}
