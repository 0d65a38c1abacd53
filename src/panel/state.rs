// Disclosure interaction state machine.
//
// Receives discrete events (taps, drag start/move/release, focus loss)
// and drives the two animated values. The drag keeps an explicit
// committed height; the live height during a drag is committed minus the
// gesture delta, clamped to the panel range.

use tracing::debug;

use crate::cluster::{GroupKey, PinGroup};

use super::animation::AnimatedValue;

/// Tunable geometry and timing for the panel. Defaults match the shipped
/// sheet; tests pin them.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Fully-open panel height in layout points.
    pub full_height: f64,
    /// Half-open resting height.
    pub partial_height: f64,
    /// Release speed past which a flick decides the target outright.
    pub flick_velocity: f64,
    /// Below `partial_height * close_fraction` a release closes the panel.
    pub close_fraction: f64,
    /// Above `partial_height * full_fraction` a release opens it fully.
    pub full_fraction: f64,
    /// Content fade duration in seconds.
    pub open_fade: f64,
    /// Closing tween duration in seconds.
    pub close_duration: f64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            full_height: 520.0,
            partial_height: 220.0,
            flick_velocity: 0.5,
            close_fraction: 0.5,
            full_fraction: 1.5,
            open_fade: 0.2,
            close_duration: 0.25,
        }
    }
}

/// Where a released drag (or a tap) sends the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Closed,
    Partial,
    Full,
}

/// Lifecycle phase of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPhase {
    Closed,
    /// Animating toward Partial or Full.
    Opening,
    OpenPartial,
    OpenFull,
    /// Animating toward zero height.
    Closing,
}

/// What a pin tap did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// The group is now selected and the panel is opening.
    Opened,
    /// The already-selected pin was tapped again; the panel is closing.
    Dismissed,
}

/// Height captured when a drag begins. The live height is composed from
/// this plus the gesture delta at event time — no hidden offset state.
#[derive(Debug, Clone, Copy)]
struct DragSession {
    committed_height: f64,
}

/// Decide where a released drag settles. Evaluated in order: a fast
/// downward flick or a low release closes; a fast upward flick or a high
/// release opens fully; anything else rests at partial.
pub fn decide_drag_target(
    config: &PanelConfig,
    velocity_y: f64,
    final_height: f64,
) -> DragTarget {
    if velocity_y > config.flick_velocity
        || final_height < config.partial_height * config.close_fraction
    {
        DragTarget::Closed
    } else if velocity_y < -config.flick_velocity
        || final_height > config.partial_height * config.full_fraction
    {
        DragTarget::Full
    } else {
        DragTarget::Partial
    }
}

/// The bottom sheet's full interaction state: selection, animated height
/// and content opacity, and the current gesture if one is in progress.
pub struct DisclosureState {
    config: PanelConfig,
    selected: Option<PinGroup>,
    height: AnimatedValue,
    opacity: AnimatedValue,
    phase: PanelPhase,
    /// Where the running animation is headed; read when it settles.
    target: DragTarget,
    drag: Option<DragSession>,
}

impl DisclosureState {
    pub fn new(config: PanelConfig) -> Self {
        Self {
            config,
            selected: None,
            height: AnimatedValue::new(0.0),
            opacity: AnimatedValue::new(0.0),
            phase: PanelPhase::Closed,
            target: DragTarget::Closed,
            drag: None,
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn selected(&self) -> Option<&PinGroup> {
        self.selected.as_ref()
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    pub fn height(&self) -> f64 {
        self.height.value()
    }

    pub fn opacity(&self) -> f64 {
        self.opacity.value()
    }

    pub fn is_fully_open(&self) -> bool {
        self.phase == PanelPhase::OpenFull
    }

    /// Handle a pin tap.
    ///
    /// Tapping the selected pin again toggles the panel closed; tapping a
    /// different pin re-targets without an explicit close-then-open. A tap
    /// always opens straight to full height.
    pub fn select_pin(&mut self, group: &PinGroup) -> TapOutcome {
        let same_pin = self
            .selected
            .as_ref()
            .is_some_and(|s| s.first().id == group.first().id);

        if same_pin && self.phase != PanelPhase::Closed {
            self.begin_close();
            return TapOutcome::Dismissed;
        }

        self.selected = Some(group.clone());
        self.drag = None;
        self.phase = PanelPhase::Opening;
        self.target = DragTarget::Full;
        self.height.spring_to(self.config.full_height);
        self.opacity.tween_to(1.0, self.config.open_fade);
        TapOutcome::Opened
    }

    /// Handle the close button. The selection clears immediately so the
    /// map can deselect the pin before the panel finishes animating away.
    /// A no-op when already closed.
    pub fn close_pressed(&mut self) {
        if self.phase == PanelPhase::Closed {
            return;
        }
        self.begin_close();
    }

    fn begin_close(&mut self) {
        self.selected = None;
        self.drag = None;
        self.phase = PanelPhase::Closing;
        self.target = DragTarget::Closed;
        self.height.tween_to(0.0, self.config.close_duration);
        self.opacity.tween_to(0.0, self.config.open_fade);
    }

    /// Begin a drag: capture the committed height and freeze animations.
    /// Ignored when nothing is selected.
    pub fn drag_started(&mut self) {
        if self.selected.is_none() {
            return;
        }
        let committed = self.height.value();
        self.height.set(committed);
        self.drag = Some(DragSession {
            committed_height: committed,
        });
    }

    /// Track the finger 1:1. `dy` is positive downward, so the height is
    /// committed minus dy, clamped to the panel range. Content opacity
    /// follows the height proportionally so it fades in lockstep.
    pub fn drag_moved(&mut self, dy: f64) {
        let Some(drag) = self.drag else {
            return;
        };
        let height = (drag.committed_height - dy).clamp(0.0, self.config.full_height);
        self.height.set(height);
        self.opacity.set(height / self.config.full_height);
    }

    /// End a drag and animate to the decided target. Closed uses the
    /// fixed-duration tween (deterministic timing keeps opacity and
    /// height in sync); partial and full settle with the spring.
    pub fn drag_released(&mut self, velocity_y: f64, final_height: f64) -> DragTarget {
        if self.drag.take().is_none() {
            return DragTarget::Closed;
        }

        let target = decide_drag_target(&self.config, velocity_y, final_height);
        debug!(velocity_y, final_height, ?target, "Drag released");

        match target {
            DragTarget::Closed => self.begin_close(),
            DragTarget::Partial => {
                self.phase = PanelPhase::Opening;
                self.target = DragTarget::Partial;
                self.height.spring_to(self.config.partial_height);
                self.opacity.tween_to(1.0, self.config.open_fade);
            }
            DragTarget::Full => {
                self.phase = PanelPhase::Opening;
                self.target = DragTarget::Full;
                self.height.spring_to(self.config.full_height);
                self.opacity.tween_to(1.0, self.config.open_fade);
            }
        }
        target
    }

    /// Advance both animations. A transition settles only when height and
    /// opacity have both finished — a gesture landing mid-animation never
    /// sees a half-settled phase.
    pub fn tick(&mut self, dt: f64) {
        if self.drag.is_some() {
            // Height is pinned to the finger.
            return;
        }

        self.height.tick(dt);
        self.opacity.tick(dt);

        if self.height.is_animating() || self.opacity.is_animating() {
            return;
        }

        match self.phase {
            PanelPhase::Opening => {
                // The selection can vanish mid-animation (close button,
                // focus loss); re-check before committing the open state.
                if self.selected.is_none() {
                    self.phase = PanelPhase::Closed;
                    return;
                }
                self.phase = match self.target {
                    DragTarget::Full => PanelPhase::OpenFull,
                    DragTarget::Partial => PanelPhase::OpenPartial,
                    DragTarget::Closed => PanelPhase::Closed,
                };
            }
            PanelPhase::Closing => {
                self.phase = PanelPhase::Closed;
                self.selected = None;
            }
            _ => {}
        }
    }

    /// Force-reset to the closed state with no animation. Called when the
    /// map view loses focus so a stale open panel never reappears.
    pub fn focus_lost(&mut self) {
        self.selected = None;
        self.drag = None;
        self.height.set(0.0);
        self.opacity.set(0.0);
        self.phase = PanelPhase::Closed;
        self.target = DragTarget::Closed;
    }

    /// Apply a freshly resolved address to the selected group, if it is
    /// the one the result belongs to.
    pub fn update_selected_address(&mut self, key: GroupKey, address: &str) {
        if let Some(selected) = self.selected.as_mut() {
            if selected.key() == key {
                selected.address = address.to_string();
            }
        }
    }
}
