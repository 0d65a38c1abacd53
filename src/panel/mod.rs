// Disclosure panel — the draggable bottom sheet over the map.
//
// Split into the animation drivers (explicitly ticked, no wall clock) and
// the interaction state machine that maps taps and drags onto them.

pub mod animation;
pub mod state;

pub use animation::AnimatedValue;
pub use state::{
    decide_drag_target, DisclosureState, DragTarget, PanelConfig, PanelPhase, TapOutcome,
};
