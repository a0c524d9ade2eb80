//! Interaction events and selection-change notifications.
//!
//! Input side: every gesture the front end understands (zoom, pan, reset,
//! clicks, sliders) is described by a [`SelectionEvent`] and handed to the
//! [`InteractionController`](crate::controllers::InteractionController).
//!
//! Output side: each committed change is broadcast through an
//! [`EventController`] as a [`SelectionChange`] carrying a set of
//! [`ChangeKind`] flags. Subscribers pick what they want with an
//! [`EventFilter`]; an event is delivered when `(event.kinds & filter) != 0`.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::data::grid::Axis;
use crate::data::selection::SelectionState;

// ─────────────────────────────────────────────────────────────────────────────
// SelectionEvent – input vocabulary
// ─────────────────────────────────────────────────────────────────────────────

/// A user gesture, already decoded from the rendering backend.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// The visible range of `axis` changed (box zoom, pan, wheel zoom).
    WindowChanged { axis: Axis, min: f64, max: f64 },
    /// The view of `axis` was auto-ranged back to the full extent.
    WindowReset(Axis),
    /// A data point was clicked. `None` leaves that focus index alone.
    PointSelected {
        col_index: Option<f64>,
        row_index: Option<f64>,
    },
    /// The focus sliders moved.
    SliderChanged { col_index: f64, row_index: f64 },
    /// A tick label on `axis` was clicked.
    LabelClicked { axis: Axis, label: String },
    /// Double click: back to the startup selection.
    Reset,
}

// ─────────────────────────────────────────────────────────────────────────────
// ChangeKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing what a committed selection change touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangeKind(pub u32);

impl ChangeKind {
    /// At least one window bound changed (surface view refresh).
    pub const WINDOW: Self = Self(1 << 0);
    /// A focus index changed (slice views refresh).
    pub const FOCUS: Self = Self(1 << 1);
    /// The change came from a full reset to the startup selection.
    pub const RESET: Self = Self(1 << 2);

    /// Wildcard: matches every kind.
    pub const ALL: Self = Self(u32::MAX);

    pub const NONE: Self = Self(0);

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check whether `self` contains all bits in `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether `self` shares at least one bit with `other`.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for ChangeKind {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for ChangeKind {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for ChangeKind {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }
        if *self == ChangeKind::ALL {
            return write!(f, "ALL");
        }

        let pairs: &[(ChangeKind, &str)] = &[
            (ChangeKind::WINDOW, "WINDOW"),
            (ChangeKind::FOCUS, "FOCUS"),
            (ChangeKind::RESET, "RESET"),
        ];

        let mut names = Vec::new();
        let mut known_bits = 0;
        for (kind, name) in pairs {
            known_bits |= kind.0;
            if self.contains(*kind) {
                names.push((*name).to_string());
            }
        }
        let extra = self.0 & !known_bits;
        if extra != 0 {
            names.push(format!("0x{:x}", extra));
        }
        write!(f, "{}", names.join("|"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SelectionChange – broadcast payload
// ─────────────────────────────────────────────────────────────────────────────

/// A committed selection change.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChange {
    pub kinds: ChangeKind,
    /// Seconds since the controller was created; set on emit.
    pub timestamp: f64,
    pub previous: SelectionState,
    pub current: SelectionState,
}

impl SelectionChange {
    pub fn new(kinds: ChangeKind, previous: SelectionState, current: SelectionState) -> Self {
        Self {
            kinds,
            timestamp: 0.0,
            previous,
            current,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventFilter
// ─────────────────────────────────────────────────────────────────────────────

/// OR-mask over [`ChangeKind`].
#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    pub mask: ChangeKind,
}

impl EventFilter {
    pub const fn all() -> Self {
        Self {
            mask: ChangeKind::ALL,
        }
    }

    pub const fn only(mask: ChangeKind) -> Self {
        Self { mask }
    }

    #[inline]
    pub fn matches(&self, event: &SelectionChange) -> bool {
        event.kinds.intersects(self.mask)
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::all()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventController
// ─────────────────────────────────────────────────────────────────────────────

struct Subscriber {
    filter: EventFilter,
    sender: Sender<SelectionChange>,
}

/// Fan-out hub for [`SelectionChange`] notifications.
///
/// Cloning shares the same subscriber list.
#[derive(Clone)]
pub struct EventController {
    inner: Arc<Mutex<EventCtrlInner>>,
}

struct EventCtrlInner {
    subscribers: Vec<Subscriber>,
    start_instant: std::time::Instant,
}

impl EventController {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EventCtrlInner {
                subscribers: Vec::new(),
                start_instant: std::time::Instant::now(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EventCtrlInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Subscribe to changes matching `filter`.
    pub fn subscribe(&self, filter: EventFilter) -> Receiver<SelectionChange> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.lock().subscribers.push(Subscriber { filter, sender: tx });
        rx
    }

    pub fn subscribe_all(&self) -> Receiver<SelectionChange> {
        self.subscribe(EventFilter::all())
    }

    /// Deliver `event` to matching subscribers, dropping those whose
    /// receiver has gone away.
    pub fn emit(&self, mut event: SelectionChange) {
        let mut inner = self.lock();
        event.timestamp = inner.start_instant.elapsed().as_secs_f64();
        inner.subscribers.retain(|sub| {
            if sub.filter.matches(&event) {
                sub.sender.send(event.clone()).is_ok()
            } else {
                true
            }
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}

impl Default for EventController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(col_index: usize) -> SelectionState {
        SelectionState {
            col_min: 0.0,
            col_max: 8.0,
            row_min: 0.0,
            row_max: 5.0,
            col_index,
            row_index: 0,
        }
    }

    #[test]
    fn change_kind_union_and_intersection() {
        let both = ChangeKind::WINDOW | ChangeKind::FOCUS;
        assert!(both.contains(ChangeKind::WINDOW));
        assert!(both.contains(ChangeKind::FOCUS));
        assert!(!both.contains(ChangeKind::RESET));
        assert!(!ChangeKind::RESET.intersects(both));
        assert!(ChangeKind::NONE.is_empty());
    }

    #[test]
    fn change_kind_display() {
        assert_eq!(format!("{}", ChangeKind::WINDOW), "WINDOW");
        assert_eq!(
            format!("{}", ChangeKind::WINDOW | ChangeKind::RESET),
            "WINDOW|RESET"
        );
        assert_eq!(format!("{}", ChangeKind::ALL), "ALL");
        assert_eq!(format!("{}", ChangeKind::NONE), "NONE");
        assert!(format!("{}", ChangeKind(1 << 20)).starts_with("0x"));
    }

    #[test]
    fn controller_filters_by_kind() {
        let ctrl = EventController::new();
        let rx_all = ctrl.subscribe_all();
        let rx_window = ctrl.subscribe(EventFilter::only(ChangeKind::WINDOW));
        let rx_focus = ctrl.subscribe(EventFilter::only(ChangeKind::FOCUS));

        ctrl.emit(SelectionChange::new(ChangeKind::FOCUS, state(0), state(1)));

        assert!(rx_all.try_recv().is_ok());
        assert!(rx_window.try_recv().is_err());
        let evt = rx_focus.try_recv().unwrap();
        assert_eq!(evt.current.col_index, 1);
    }

    #[test]
    fn dropped_receiver_is_pruned() {
        let ctrl = EventController::new();
        let rx1 = ctrl.subscribe_all();
        let rx2 = ctrl.subscribe_all();
        drop(rx1);

        ctrl.emit(SelectionChange::new(ChangeKind::WINDOW, state(0), state(0)));
        assert!(rx2.try_recv().is_ok());
        assert_eq!(ctrl.subscriber_count(), 1);
    }
}
