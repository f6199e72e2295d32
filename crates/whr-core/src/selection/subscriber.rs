//! Selection subscriber trait

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::SelectionEvent;

/// Trait for components that need to respond to selection or field changes
pub trait SelectionSubscriber: Send + Sync {
    /// Called after the selection state changed
    fn on_selection_event(&self, event: &SelectionEvent);
}

/// Dirty flags a view registers as its subscriber
///
/// Immediate-mode views cannot be mutated from inside a notification, so the
/// notification only marks the affected layer and the view rebuilds it on its
/// next frame.
#[derive(Debug)]
pub struct ViewInvalidation {
    highlight: AtomicBool,
    layout: AtomicBool,
}

impl ViewInvalidation {
    /// Create flags with both layers dirty so the first frame builds everything
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            highlight: AtomicBool::new(true),
            layout: AtomicBool::new(true),
        })
    }

    /// Consume the highlight flag
    pub fn take_highlight(&self) -> bool {
        self.highlight.swap(false, Ordering::AcqRel)
    }

    /// Consume the layout flag
    pub fn take_layout(&self) -> bool {
        self.layout.swap(false, Ordering::AcqRel)
    }

    pub fn mark_layout(&self) {
        self.layout.store(true, Ordering::Release);
    }

    pub fn is_highlight_dirty(&self) -> bool {
        self.highlight.load(Ordering::Acquire)
    }

    pub fn is_layout_dirty(&self) -> bool {
        self.layout.load(Ordering::Acquire)
    }
}

impl SelectionSubscriber for ViewInvalidation {
    fn on_selection_event(&self, event: &SelectionEvent) {
        match event {
            SelectionEvent::SelectionChanged(_) => self.highlight.store(true, Ordering::Release),
            SelectionEvent::FieldsChanged { .. } => self.layout.store(true, Ordering::Release),
        }
    }
}
