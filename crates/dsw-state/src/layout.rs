//! Layout store - panel visibility, panel sizes and full-screen mode.
//!
//! # Full-screen state machine
//!
//! ```text
//!   normal --toggle--> fullscreen   (snapshot visibility, hide all panels)
//!   fullscreen --toggle--> normal   (restore snapshot, clear it)
//! ```
//!
//! The snapshot is present exactly while full-screen is active, so two
//! toggles always restore the original visibility triple.
//!
//! Width and height setters clamp into [`PanelLimits`]; callers never have to
//! pre-validate the values they pass.

use serde::{Deserialize, Serialize};

use crate::observable::{Store, Subscription};

/// Default width of the left (explorer) panel in pixels.
pub const DEFAULT_LEFT_WIDTH: f64 = 200.0;
/// Default width of the right (toolkit) panel in pixels.
pub const DEFAULT_RIGHT_WIDTH: f64 = 200.0;
/// Default height of the bottom panel in pixels.
pub const DEFAULT_BOTTOM_HEIGHT: f64 = 120.0;

// =============================================================================
// LIMITS
// =============================================================================

/// Pixel bounds enforced by the layout setters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelLimits {
    /// Minimum width of either side panel.
    pub min_side_width: f64,
    /// Maximum width of either side panel.
    pub max_side_width: f64,
    /// Minimum height of the bottom panel.
    pub min_bottom_height: f64,
    /// Maximum height of the bottom panel.
    pub max_bottom_height: f64,
}

impl Default for PanelLimits {
    fn default() -> Self {
        Self {
            min_side_width: 180.0,
            max_side_width: 600.0,
            min_bottom_height: 80.0,
            max_bottom_height: 600.0,
        }
    }
}

impl PanelLimits {
    /// Clamp a side panel width. Returns `None` for non-finite input.
    pub fn clamp_side_width(&self, width: f64) -> Option<f64> {
        width
            .is_finite()
            .then(|| width.clamp(self.min_side_width, self.max_side_width))
    }

    /// Clamp a bottom panel height. Returns `None` for non-finite input.
    pub fn clamp_bottom_height(&self, height: f64) -> Option<f64> {
        height
            .is_finite()
            .then(|| height.clamp(self.min_bottom_height, self.max_bottom_height))
    }

    /// Repair bounds that cannot be clamped against.
    ///
    /// Non-finite bounds fall back to the defaults; an inverted pair is swapped.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let (min_side_width, max_side_width) = sanitize_bounds(
            "side width",
            (self.min_side_width, self.max_side_width),
            (defaults.min_side_width, defaults.max_side_width),
        );
        let (min_bottom_height, max_bottom_height) = sanitize_bounds(
            "bottom height",
            (self.min_bottom_height, self.max_bottom_height),
            (defaults.min_bottom_height, defaults.max_bottom_height),
        );
        Self {
            min_side_width,
            max_side_width,
            min_bottom_height,
            max_bottom_height,
        }
    }
}

fn sanitize_bounds(name: &str, (min, max): (f64, f64), defaults: (f64, f64)) -> (f64, f64) {
    let min = if min.is_finite() {
        min
    } else {
        tracing::warn!(bound = name, value = min, "non-finite minimum; using default");
        defaults.0
    };
    let max = if max.is_finite() {
        max
    } else {
        tracing::warn!(bound = name, value = max, "non-finite maximum; using default");
        defaults.1
    };
    if min > max {
        tracing::warn!(bound = name, min, max, "minimum above maximum; swapping");
        (max, min)
    } else {
        (min, max)
    }
}

// =============================================================================
// STATE
// =============================================================================

/// Visibility of the three collapsible panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelVisibility {
    /// Left explorer panel.
    pub left: bool,
    /// Right toolkit panel.
    pub right: bool,
    /// Bottom assistant panel.
    pub bottom: bool,
}

impl PanelVisibility {
    /// All panels open.
    pub const ALL_OPEN: Self = Self {
        left: true,
        right: true,
        bottom: true,
    };

    /// All panels closed.
    pub const ALL_CLOSED: Self = Self {
        left: false,
        right: false,
        bottom: false,
    };
}

/// Layout slice of the UI state.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    pub left_open: bool,
    pub right_open: bool,
    pub bottom_open: bool,
    pub left_width: f64,
    pub right_width: f64,
    pub bottom_height: f64,
    pub is_full_screen: bool,
    /// Visibility before entering full-screen. `Some` only while full-screen.
    pub saved_state: Option<PanelVisibility>,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            left_open: true,
            right_open: true,
            bottom_open: true,
            left_width: DEFAULT_LEFT_WIDTH,
            right_width: DEFAULT_RIGHT_WIDTH,
            bottom_height: DEFAULT_BOTTOM_HEIGHT,
            is_full_screen: false,
            saved_state: None,
        }
    }
}

impl LayoutState {
    /// Current visibility triple.
    pub fn visibility(&self) -> PanelVisibility {
        PanelVisibility {
            left: self.left_open,
            right: self.right_open,
            bottom: self.bottom_open,
        }
    }

    fn apply_visibility(&mut self, visibility: PanelVisibility) {
        self.left_open = visibility.left;
        self.right_open = visibility.right;
        self.bottom_open = visibility.bottom;
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Observable layout store.
#[derive(Debug, Clone)]
pub struct LayoutStore {
    store: Store<LayoutState>,
    limits: PanelLimits,
}

impl LayoutStore {
    /// Create a store with default sizes and limits.
    pub fn create() -> Self {
        Self::create_with(LayoutState::default(), PanelLimits::default())
    }

    /// Create a store from explicit initial state; sizes are clamped into `limits`.
    ///
    /// Unusable limits are repaired first (see [`PanelLimits::sanitized`]), and
    /// a saved visibility snapshot is dropped unless full-screen is active.
    pub fn create_with(mut initial: LayoutState, limits: PanelLimits) -> Self {
        let limits = limits.sanitized();
        if !initial.is_full_screen && initial.saved_state.take().is_some() {
            tracing::warn!("saved layout outside full-screen discarded");
        }
        initial.left_width = limits
            .clamp_side_width(initial.left_width)
            .unwrap_or(DEFAULT_LEFT_WIDTH);
        initial.right_width = limits
            .clamp_side_width(initial.right_width)
            .unwrap_or(DEFAULT_RIGHT_WIDTH);
        initial.bottom_height = limits
            .clamp_bottom_height(initial.bottom_height)
            .unwrap_or(DEFAULT_BOTTOM_HEIGHT);
        Self {
            store: Store::new(initial),
            limits,
        }
    }

    /// Tear down every subscription.
    pub fn dispose(&self) {
        self.store.dispose();
    }

    /// Snapshot of the layout.
    pub fn state(&self) -> LayoutState {
        self.store.get()
    }

    /// Bounds applied by the size setters.
    pub fn limits(&self) -> PanelLimits {
        self.limits
    }

    /// Current visibility triple.
    pub fn visibility(&self) -> PanelVisibility {
        self.store.with(LayoutState::visibility)
    }

    pub fn subscribe(&self, listener: impl Fn(&LayoutState) + Send + Sync + 'static) -> Subscription {
        self.store.subscribe(listener)
    }

    pub fn toggle_left(&self) {
        self.store.update(|s| s.left_open = !s.left_open);
    }

    pub fn toggle_right(&self) {
        self.store.update(|s| s.right_open = !s.right_open);
    }

    pub fn toggle_bottom(&self) {
        self.store.update(|s| s.bottom_open = !s.bottom_open);
    }

    pub fn set_left(&self, open: bool) {
        self.store.update(|s| s.left_open = open);
    }

    pub fn set_right(&self, open: bool) {
        self.store.update(|s| s.right_open = open);
    }

    pub fn set_bottom(&self, open: bool) {
        self.store.update(|s| s.bottom_open = open);
    }

    /// Set the left panel width, clamped. Non-finite values are ignored.
    pub fn set_left_width(&self, width: f64) {
        if let Some(width) = self.limits.clamp_side_width(width) {
            self.store.update(|s| s.left_width = width);
        }
    }

    /// Set the right panel width, clamped. Non-finite values are ignored.
    pub fn set_right_width(&self, width: f64) {
        if let Some(width) = self.limits.clamp_side_width(width) {
            self.store.update(|s| s.right_width = width);
        }
    }

    /// Set the bottom panel height, clamped. Non-finite values are ignored.
    pub fn set_bottom_height(&self, height: f64) {
        if let Some(height) = self.limits.clamp_bottom_height(height) {
            self.store.update(|s| s.bottom_height = height);
        }
    }

    /// Drag the left panel's right edge by `delta` pixels.
    pub fn resize_left(&self, delta: f64) {
        let limits = self.limits;
        self.store.update(|s| {
            if let Some(width) = limits.clamp_side_width(s.left_width + delta) {
                s.left_width = width;
            }
        });
    }

    /// Drag the right panel's left edge by `delta` pixels (moving right shrinks it).
    pub fn resize_right(&self, delta: f64) {
        let limits = self.limits;
        self.store.update(|s| {
            if let Some(width) = limits.clamp_side_width(s.right_width - delta) {
                s.right_width = width;
            }
        });
    }

    /// Drag the bottom panel's top edge by `delta` pixels (moving down shrinks it).
    pub fn resize_bottom(&self, delta: f64) {
        let limits = self.limits;
        self.store.update(|s| {
            if let Some(height) = limits.clamp_bottom_height(s.bottom_height - delta) {
                s.bottom_height = height;
            }
        });
    }

    /// Enter or leave full-screen mode.
    pub fn toggle_full_screen(&self) {
        self.store.update(|s| {
            if s.is_full_screen {
                let saved = s.saved_state.take().unwrap_or_else(|| {
                    tracing::warn!("leaving full-screen without a saved layout; opening all panels");
                    PanelVisibility::ALL_OPEN
                });
                s.apply_visibility(saved);
                s.is_full_screen = false;
            } else {
                s.saved_state = Some(s.visibility());
                s.apply_visibility(PanelVisibility::ALL_CLOSED);
                s.is_full_screen = true;
            }
        });
    }
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::create()
    }
}
