//! Tick scripts for headless runs.
//!
//! A script is a list of ticks separated by whitespace or commas. Each tick
//! names the actions held down during it, joined with `+`; `idle` holds
//! nothing. `name*N` repeats a tick N times.
//!
//! ```text
//! noise*20 idle denoise idle denoise denoise idle noise+denoise
//! ```
//!
//! Consecutive ticks holding the same action read as one long press, so
//! `denoise denoise` advances the cycle once while `denoise idle denoise`
//! advances it twice.

use crate::errors::AppError;
use crate::input::{Action, ActionEvent, InputState};

/// Actions held down during one tick.
pub type Tick = Vec<Action>;

fn parse_action(name: &str) -> Option<Action> {
    match name {
        "noise" | "n" => Some(Action::InjectNoise),
        "denoise" | "d" | "advance" => Some(Action::AdvanceDenoise),
        "shading" | "shade" => Some(Action::ToggleShading),
        "wireframe" | "wire" => Some(Action::ToggleWireframe),
        "color" | "c" => Some(Action::CycleColor),
        _ => None,
    }
}

/// Parse a script into ticks.
pub fn parse_script(script: &str) -> Result<Vec<Tick>, AppError> {
    let mut ticks = Vec::new();

    for token in script
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        let tick_index = ticks.len();
        let script_error = || AppError::Script {
            token: token.to_string(),
            tick: tick_index,
        };

        let (body, repeat) = match token.split_once('*') {
            Some((body, count)) => (body, count.parse::<usize>().map_err(|_| script_error())?),
            None => (token, 1),
        };

        let mut actions = Vec::new();
        if body != "idle" && body != "-" {
            for name in body.split('+') {
                let action = parse_action(name).ok_or_else(script_error)?;
                if !actions.contains(&action) {
                    actions.push(action);
                }
            }
        }

        for _ in 0..repeat {
            ticks.push(actions.clone());
        }
    }

    Ok(ticks)
}

/// Poll every action against `tick`, recording the resulting events.
pub fn feed_tick(input: &mut InputState, tick: &[Action]) -> Vec<ActionEvent> {
    Action::all()
        .iter()
        .filter_map(|&action| input.sample(action, tick.contains(&action)))
        .collect()
}
