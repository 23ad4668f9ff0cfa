use crate::core::TraceHistory;
use crate::simulation::Simulation;

pub const CHART_ROWS: usize = 21;
pub const CHART_COLS: usize = 100;

// Matches the position clamp; the plot never needs more headroom.
const CHART_VALUE_LIMIT: f64 = 2.2;

const POSITION_MARK: char = '#';
const SETPOINT_MARK: char = '=';
const ERROR_MARK: char = '.';
const BASELINE_MARK: char = '-';

pub struct DisplayData {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub setpoint: f64,
    pub position: f64,
    pub velocity: f64,
    pub force: f64,
    pub mean_squared_error: f64,
    pub paused: bool,
}

fn value_to_row(value: f64) -> Option<usize> {
    if !value.is_finite() {
        return None;
    }
    let clamped = value.clamp(-CHART_VALUE_LIMIT, CHART_VALUE_LIMIT);
    let row = (CHART_VALUE_LIMIT - clamped) / (2.0 * CHART_VALUE_LIMIT) * (CHART_ROWS - 1) as f64;
    Some(row.round() as usize)
}

fn plot_trace(grid: &mut [Vec<char>], samples: &[f64], mark: char) {
    if samples.is_empty() {
        return;
    }
    for (col, row) in (0..CHART_COLS)
        .map(|col| samples[col * samples.len() / CHART_COLS])
        .enumerate()
        .filter_map(|(col, v)| value_to_row(v).map(|row| (col, row)))
    {
        grid[row][col] = mark;
    }
}

/// Renders the rolling window as a character grid: zero baseline, error
/// under setpoint under position, oldest sample on the left.
pub fn render_chart(history: &TraceHistory) -> Vec<String> {
    let mut grid = vec![vec![' '; CHART_COLS]; CHART_ROWS];
    grid[CHART_ROWS / 2] = vec![BASELINE_MARK; CHART_COLS];

    let errors: Vec<f64> = history.error.iter().collect();
    let setpoints: Vec<f64> = history.setpoint.iter().collect();
    let positions: Vec<f64> = history.position.iter().collect();

    // Draw order decides the overlay: position wins over setpoint wins
    // over error.
    plot_trace(&mut grid, &errors, ERROR_MARK);
    plot_trace(&mut grid, &setpoints, SETPOINT_MARK);
    plot_trace(&mut grid, &positions, POSITION_MARK);

    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}

pub fn log_to_terminal(sim: &Simulation, paused: bool) {
    let (kp, ki, kd) = sim.get_pid().get_gains();
    let display_data = DisplayData {
        kp,
        ki,
        kd,
        setpoint: sim.get_pid().get_setpoint(),
        position: sim.get_motor().get_position(),
        velocity: sim.get_motor().get_velocity(),
        force: sim.get_last_force(),
        mean_squared_error: sim.get_history().mean_squared_error(),
        paused,
    };

    print!("\x1B[2J\x1B[1;1H");

    println!("--- Controller ---");
    println!(
        "Gains: kp={:.2} ki={:.2} kd={:.2}",
        display_data.kp, display_data.ki, display_data.kd
    );
    println!("Setpoint: {:.3}", display_data.setpoint);
    println!("Control Force: {:.3}", display_data.force);
    println!("MSE (window): {:.4}", display_data.mean_squared_error);

    println!("\n--- Motor ---");
    println!("Position: {:.3}", display_data.position);
    println!("Velocity: {:.3}", display_data.velocity);
    if display_data.paused {
        println!("State: PAUSED");
    }

    println!(
        "\n--- Trace ({} position, {} setpoint, {} error) ---",
        POSITION_MARK, SETPOINT_MARK, ERROR_MARK
    );
    for line in render_chart(sim.get_history()) {
        println!("{}", line);
    }
    println!("----------------------\n");
}

#[cfg(test)]
mod terminal_ui_tests {
    use super::*;
    use crate::core::TraceHistory;

    #[test]
    fn test_value_to_row_mapping() {
        assert_eq!(value_to_row(0.0), Some(CHART_ROWS / 2), "zero sits on the baseline");
        assert_eq!(value_to_row(2.2), Some(0), "top of range is the top row");
        assert_eq!(value_to_row(-2.2), Some(CHART_ROWS - 1), "bottom of range is the last row");
        assert_eq!(value_to_row(5.0), Some(0), "out-of-range values pin to the edge");
        assert_eq!(value_to_row(f64::NAN), None, "non-finite samples are skipped");
    }

    #[test]
    fn test_chart_dimensions() {
        let history = TraceHistory::new();
        let chart = render_chart(&history);

        assert_eq!(chart.len(), CHART_ROWS);
        for line in &chart {
            assert_eq!(line.chars().count(), CHART_COLS);
        }
    }

    #[test]
    fn test_position_overlays_setpoint_on_baseline() {
        // A zero-filled history puts all three traces on the baseline;
        // the position mark must win the overlay.
        let history = TraceHistory::new();
        let chart = render_chart(&history);

        let baseline = &chart[CHART_ROWS / 2];
        assert!(baseline.chars().all(|c| c == POSITION_MARK));
    }

    #[test]
    fn test_setpoint_step_shows_on_its_own_row() {
        let mut history = TraceHistory::with_capacity(500);
        for _ in 0..500 {
            history.record(0.0, 2.2);
        }

        let chart = render_chart(&history);
        assert!(
            chart[0].contains(SETPOINT_MARK),
            "setpoint 2.2 must land on the top row"
        );
        assert!(
            chart[CHART_ROWS - 1].contains(ERROR_MARK),
            "error -2.2 must land on the bottom row"
        );
    }
}
