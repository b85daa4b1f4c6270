use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{
        step::Step,
        summary::{LoadSummary, Summary},
    },
    quantity::{cost::Cost, power::Megawatts},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

pub fn build_steps_table(steps: &[Step], capacity: Megawatts) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Hour", "Residual", "Adjusted", "Mode", "Charge", "SoC", "Price"]);
    for step in steps {
        let working_mode = step.working_mode();
        table.add_row(vec![
            Cell::new(step.index).add_attribute(Attribute::Dim),
            Cell::new(step.residual_load).set_alignment(CellAlignment::Right),
            Cell::new(step.adjusted_load).set_alignment(CellAlignment::Right).fg(
                if step.adjusted_load < step.residual_load {
                    Color::Green
                } else if step.adjusted_load > step.residual_load {
                    Color::DarkYellow
                } else {
                    Color::Reset
                },
            ),
            Cell::new(working_mode).fg(working_mode.color()),
            Cell::new(step.charge).set_alignment(CellAlignment::Right).fg(
                if step.charge.abs() >= capacity && capacity > Megawatts::ZERO {
                    Color::Red
                } else {
                    Color::Reset
                },
            ),
            Cell::new(step.state_of_charge).set_alignment(CellAlignment::Right),
            step.price.map_or_else(
                || Cell::new("").add_attribute(Attribute::Dim),
                |price| Cell::new(price).set_alignment(CellAlignment::Right),
            ),
        ]);
    }
    table
}

pub fn build_summary_table(summary: &Summary) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Load", "Peak", "Trough", "Mean", "Span"]);
    table.add_row(load_row("Residual", &summary.residual_load));
    table.add_row(load_row("Adjusted", &summary.adjusted_load));
    table.add_row(vec![
        Cell::new("Charged"),
        Cell::new(summary.charged).set_alignment(CellAlignment::Right).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Discharged"),
        Cell::new(summary.discharged).set_alignment(CellAlignment::Right).fg(Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Max SoC"),
        Cell::new(summary.max_state_of_charge).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Transfers"),
        Cell::new(summary.n_transfers).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Iterations"),
        Cell::new(summary.n_iterations).set_alignment(CellAlignment::Right),
    ]);
    if let Some(revenue) = summary.revenue {
        table.add_row(vec![
            Cell::new("Revenue"),
            Cell::new(revenue).set_alignment(CellAlignment::Right).fg(if revenue >= Cost::ZERO {
                Color::Green
            } else {
                Color::Red
            }),
        ]);
    }
    table
}

fn load_row(title: &str, load: &LoadSummary) -> Vec<Cell> {
    vec![
        Cell::new(title),
        Cell::new(load.peak).set_alignment(CellAlignment::Right),
        Cell::new(load.trough).set_alignment(CellAlignment::Right),
        Cell::new(load.mean).set_alignment(CellAlignment::Right),
        Cell::new(load.span()).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
    ]
}
