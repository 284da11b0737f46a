#![deny(unused_variables)]
#![deny(unused_imports)]

//! ASCII rendering of utilities and policies over a grid world.

use std::collections::HashMap;

use crate::grid_world::{Action, GridWorld, State};

/// Width of the text inside a cell, between the padding spaces.
const CELL_TEXT_WIDTH: usize = 8;

/// Draws a boxed grid, highest row first, with one label per cell.
///
/// Cells without a label are left blank.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use gridworld_value_iteration::grid_world::State;
/// use gridworld_value_iteration::render::render_grid;
///
/// let cells = HashMap::from([(State::new(1, 1), "start".to_string())]);
/// let grid = render_grid(1, 1, &cells);
///
/// assert_eq!(grid.lines().count(), 4);
/// assert!(grid.contains("| start    |"));
/// ```
pub fn render_grid(num_rows: i32, num_cols: i32, cells: &HashMap<State, String>) -> String {
    let cols = num_cols.max(0) as usize;
    let mut output = String::new();

    output.push(' ');
    output.push_str(&"_".repeat(((CELL_TEXT_WIDTH + 3) * cols).saturating_sub(1)));
    output.push_str("  \n");

    for y in (1..=num_rows).rev() {
        output.push('|');
        output.push_str(&format!("{:width$}|", "", width = CELL_TEXT_WIDTH + 2).repeat(cols));
        output.push_str(" \n");

        output.push('|');
        for x in 1..=num_cols {
            let label = cells.get(&State { x, y }).map(String::as_str).unwrap_or("");
            output.push_str(&format!(" {:width$} |", label, width = CELL_TEXT_WIDTH));
        }
        output.push_str(" \n");

        output.push('|');
        output.push_str(&format!("{}|", "_".repeat(CELL_TEXT_WIDTH + 2)).repeat(cols));
        output.push_str(" \n");
    }

    return output;
}

/// Renders each state's utility with four decimals.
pub fn utility_grid(env: &GridWorld, utilities: &HashMap<State, f64>) -> String {
    let cells: HashMap<State, String> = utilities
        .iter()
        .map(|(state, utility)| (*state, format!("{:8.4}", utility)))
        .collect();
    return render_grid(env.num_rows(), env.num_cols(), &cells);
}

/// Renders each state's action as an arrow, `x` for terminal states.
pub fn policy_grid(env: &GridWorld, policy: &HashMap<State, Option<Action>>) -> String {
    let cells: HashMap<State, String> = policy
        .iter()
        .map(|(state, action)| {
            let symbol = match action {
                Some(action) => action.symbol(),
                None => " x ",
            };
            (*state, format!("   {}  ", symbol))
        })
        .collect();
    return render_grid(env.num_rows(), env.num_cols(), &cells);
}
