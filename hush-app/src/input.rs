//! Typed input actions.
//!
//! The window layer (out of scope here) reports logical actions instead of
//! keys. Each action is either edge-triggered (fires once per press) or
//! level-triggered (fires on every tick it is held).

use std::collections::HashSet;
use std::fmt;

/// Logical actions the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Step the denoise cycle.
    AdvanceDenoise,
    /// Displace vertices along their normals.
    InjectNoise,
    /// Switch between Phong and diffuse-only shading.
    ToggleShading,
    /// Switch between filled and wireframe display.
    ToggleWireframe,
    /// Move to the next mesh color.
    CycleColor,
}

/// When an action fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Once, on the tick the action goes down.
    Edge,
    /// Every tick the action is down.
    Level,
}

impl Action {
    pub fn all() -> &'static [Action] {
        &[
            Action::AdvanceDenoise,
            Action::InjectNoise,
            Action::ToggleShading,
            Action::ToggleWireframe,
            Action::CycleColor,
        ]
    }

    pub fn trigger(self) -> Trigger {
        match self {
            Action::InjectNoise => Trigger::Level,
            _ => Trigger::Edge,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::AdvanceDenoise => write!(f, "denoise"),
            Action::InjectNoise => write!(f, "noise"),
            Action::ToggleShading => write!(f, "shading"),
            Action::ToggleWireframe => write!(f, "wireframe"),
            Action::CycleColor => write!(f, "color"),
        }
    }
}

/// Phase of an action within the tick stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Pressed,
    Held,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionEvent {
    pub action: Action,
    pub state: ActionState,
}

impl ActionEvent {
    pub fn new(action: Action, state: ActionState) -> Self {
        Self { action, state }
    }

    pub fn pressed(action: Action) -> Self {
        Self::new(action, ActionState::Pressed)
    }

    pub fn held(action: Action) -> Self {
        Self::new(action, ActionState::Held)
    }

    pub fn released(action: Action) -> Self {
        Self::new(action, ActionState::Released)
    }
}

/// Per-tick snapshot of which actions are down and which changed this tick.
#[derive(Debug, Default)]
pub struct InputState {
    down: HashSet<Action>,
    pressed: HashSet<Action>,
    released: HashSet<Action>,
}

impl InputState {
    pub fn is_down(&self, action: Action) -> bool {
        self.down.contains(&action)
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    pub fn just_released(&self, action: Action) -> bool {
        self.released.contains(&action)
    }

    /// Whether the action should take effect this tick, given its trigger.
    pub fn fires(&self, action: Action) -> bool {
        match action.trigger() {
            Trigger::Edge => self.just_pressed(action),
            Trigger::Level => self.is_down(action),
        }
    }

    /// Record one event from the action stream.
    ///
    /// An explicit `Pressed` is always a new edge, even if the action is
    /// already down (a lost release). A `Held` for an action that was not
    /// down counts as its press, so a stream that starts mid-hold still fires
    /// edge-triggered actions once.
    pub fn record(&mut self, event: ActionEvent) {
        let action = event.action;
        match event.state {
            ActionState::Pressed => {
                self.down.insert(action);
                self.pressed.insert(action);
                self.released.remove(&action);
            }
            ActionState::Held => {
                if self.down.insert(action) {
                    self.pressed.insert(action);
                }
                self.released.remove(&action);
            }
            ActionState::Released => {
                self.down.remove(&action);
                self.released.insert(action);
                self.pressed.remove(&action);
            }
        }
    }

    /// Turn a polled "is it down right now" reading into an event and record it.
    ///
    /// Returns `None` when the action stays up.
    pub fn sample(&mut self, action: Action, is_down: bool) -> Option<ActionEvent> {
        let state = match (self.is_down(action), is_down) {
            (false, true) => ActionState::Pressed,
            (true, true) => ActionState::Held,
            (true, false) => ActionState::Released,
            (false, false) => return None,
        };
        let event = ActionEvent::new(action, state);
        self.record(event);
        Some(event)
    }

    /// Clear per-tick edges. Actions that are down stay down.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }
}
