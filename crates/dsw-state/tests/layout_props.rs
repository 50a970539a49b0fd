//! Property tests for the layout store.
//!
//! 1. Two full-screen toggles restore any visibility triple.
//! 2. Sizes set through any sequence of setters and resizes stay in bounds.

use dsw_state::{LayoutStore, PanelLimits, PanelVisibility};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    SetLeft(f64),
    SetRight(f64),
    SetBottom(f64),
    ResizeLeft(f64),
    ResizeRight(f64),
    ResizeBottom(f64),
    ToggleFullScreen,
}

fn size_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        -5_000.0f64..5_000.0,
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        size_strategy().prop_map(Op::SetLeft),
        size_strategy().prop_map(Op::SetRight),
        size_strategy().prop_map(Op::SetBottom),
        size_strategy().prop_map(Op::ResizeLeft),
        size_strategy().prop_map(Op::ResizeRight),
        size_strategy().prop_map(Op::ResizeBottom),
        Just(Op::ToggleFullScreen),
    ]
}

fn visibility_strategy() -> impl Strategy<Value = PanelVisibility> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, bottom)| {
        PanelVisibility {
            left,
            right,
            bottom,
        }
    })
}

proptest! {
    #[test]
    fn full_screen_round_trip_restores_visibility(visibility in visibility_strategy()) {
        let layout = LayoutStore::create();
        layout.set_left(visibility.left);
        layout.set_right(visibility.right);
        layout.set_bottom(visibility.bottom);

        layout.toggle_full_screen();
        prop_assert_eq!(layout.visibility(), PanelVisibility::ALL_CLOSED);
        prop_assert_eq!(layout.state().saved_state, Some(visibility));

        layout.toggle_full_screen();
        let state = layout.state();
        prop_assert_eq!(state.visibility(), visibility);
        prop_assert!(!state.is_full_screen);
        prop_assert!(state.saved_state.is_none());
    }

    #[test]
    fn sizes_always_within_limits(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let layout = LayoutStore::create();
        let limits = PanelLimits::default();

        for op in &ops {
            match *op {
                Op::SetLeft(v) => layout.set_left_width(v),
                Op::SetRight(v) => layout.set_right_width(v),
                Op::SetBottom(v) => layout.set_bottom_height(v),
                Op::ResizeLeft(v) => layout.resize_left(v),
                Op::ResizeRight(v) => layout.resize_right(v),
                Op::ResizeBottom(v) => layout.resize_bottom(v),
                Op::ToggleFullScreen => layout.toggle_full_screen(),
            }

            let state = layout.state();
            prop_assert!(state.left_width >= limits.min_side_width);
            prop_assert!(state.left_width <= limits.max_side_width);
            prop_assert!(state.right_width >= limits.min_side_width);
            prop_assert!(state.right_width <= limits.max_side_width);
            prop_assert!(state.bottom_height >= limits.min_bottom_height);
            prop_assert!(state.bottom_height <= limits.max_bottom_height);
            prop_assert_eq!(state.saved_state.is_some(), state.is_full_screen);
        }
    }
}
