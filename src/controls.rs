//! Keyboard and pointer bindings for the viewer.
//!
//! Keys become [`ControlAction`]s; parameter keys step the value along its
//! [`ParameterRange`] grid, ten steps at a time while Shift is held.
//!
//! | Keys        | Action                      |
//! |-------------|-----------------------------|
//! | `[` / `]`   | point count down / up       |
//! | `-` / `=`   | radius down / up            |
//! | `B` / `N`   | branches down / up          |
//! | `,` / `.`   | randomness down / up        |
//! | `;` / `'`   | randomness power down / up  |
//! | `R`         | reset to defaults           |
//! | `Space`     | pause / resume animation    |
//! | `Escape`    | quit                        |

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::params::{GalaxyParameters, ParameterChange, ParameterRange};

/// Multiplier applied to steps while Shift is held.
pub const COARSE_STEPS: i32 = 10;

/// What a key press asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    Change(ParameterChange),
    TogglePause,
    Quit,
}

/// Map a key to an action given the current parameters.
///
/// `steps` is the signed magnitude for parameter keys (1, or
/// [`COARSE_STEPS`] with Shift); the key decides the sign.
pub fn action_for_key(
    key: KeyCode,
    params: &GalaxyParameters,
    steps: i32,
) -> Option<ControlAction> {
    let change = match key {
        KeyCode::BracketLeft => count_change(params, -steps),
        KeyCode::BracketRight => count_change(params, steps),
        KeyCode::Minus => radius_change(params, -steps),
        KeyCode::Equal => radius_change(params, steps),
        KeyCode::KeyB => branches_change(params, -steps),
        KeyCode::KeyN => branches_change(params, steps),
        KeyCode::Comma => randomness_change(params, -steps),
        KeyCode::Period => randomness_change(params, steps),
        KeyCode::Semicolon => randomness_power_change(params, -steps),
        KeyCode::Quote => randomness_power_change(params, steps),
        KeyCode::KeyR => ParameterChange::ResetToDefaults,
        KeyCode::Space => return Some(ControlAction::TogglePause),
        KeyCode::Escape => return Some(ControlAction::Quit),
        _ => return None,
    };
    Some(ControlAction::Change(change))
}

fn count_change(params: &GalaxyParameters, steps: i32) -> ParameterChange {
    let next = ParameterRange::COUNT.nudge(params.count as f64, steps);
    ParameterChange::Count(next.round() as i64)
}

fn radius_change(params: &GalaxyParameters, steps: i32) -> ParameterChange {
    ParameterChange::Radius(ParameterRange::RADIUS.nudge(params.radius as f64, steps) as f32)
}

fn branches_change(params: &GalaxyParameters, steps: i32) -> ParameterChange {
    let next = ParameterRange::BRANCHES.nudge(params.branches as f64, steps);
    ParameterChange::Branches(next.round() as u32)
}

fn randomness_change(params: &GalaxyParameters, steps: i32) -> ParameterChange {
    let next = ParameterRange::RANDOMNESS.nudge(params.randomness as f64, steps);
    ParameterChange::Randomness(next as f32)
}

fn randomness_power_change(params: &GalaxyParameters, steps: i32) -> ParameterChange {
    let next = ParameterRange::RANDOMNESS_POWER.nudge(params.randomness_power as f64, steps);
    ParameterChange::RandomnessPower(next as f32)
}

/// Raw input the viewer cares about, decoded from one window event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key pressed (repeats excluded) with Shift state.
    Key { key: KeyCode, shift: bool },
    /// Left-button drag moved by this many pixels.
    Drag(Vec2),
    /// Wheel moved; positive means "away from the user" (zoom out).
    Wheel(f32),
}

/// Tracks button and modifier state across window events.
#[derive(Debug, Default)]
pub struct InputState {
    dragging: bool,
    last_cursor: Option<Vec2>,
    shift: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Feed a window event; returns the decoded input, if any.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift = modifiers.state().shift_key();
                None
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return None;
                }
                match event.physical_key {
                    PhysicalKey::Code(key) => Some(InputEvent::Key {
                        key,
                        shift: self.shift,
                    }),
                    PhysicalKey::Unidentified(_) => None,
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if *button == MouseButton::Left {
                    self.set_dragging(*state == ElementState::Pressed);
                }
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32))
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta_y = wheel_delta(*delta);
                (delta_y != 0.0).then_some(InputEvent::Wheel(delta_y))
            }
            _ => None,
        }
    }

    fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
        if !dragging {
            self.last_cursor = None;
        }
    }

    fn cursor_moved(&mut self, position: Vec2) -> Option<InputEvent> {
        if !self.dragging {
            return None;
        }
        let last = self.last_cursor.replace(position)?;
        Some(InputEvent::Drag(position - last))
    }
}

/// Normalize a winit scroll delta so that positive zooms out.
///
/// winit reports scrolling up (away from the user) as positive `y`.
pub fn wheel_delta(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y,
        MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32) / 100.0,
    }
}
