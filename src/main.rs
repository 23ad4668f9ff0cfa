use std::{
    sync::mpsc,
    thread,
    time::Duration,
};

use chrono::Local;
use fern::Dispatch;
use pid_sim::ui::log_to_terminal;
use pid_sim::{PIDController, Parameter, SimpleMotor, Simulation};

pub enum UserCommand {
    SetKp(f64),
    SetKi(f64),
    SetKd(f64),
    SetSetpoint(f64),
    TogglePause,
    Quit,
}

const TIME_STEP: f64 = 0.016;

fn setup_logger() -> Result<(), Box<dyn std::error::Error>> {
    Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::fs::File::create("pid-sim.log")?)
        .apply()?;

    Ok(())
}

// A scripted tuning session standing in for interactive sliders: step the
// setpoint, bring in P, watch it oscillate, add D to damp it, add I to
// close the steady-state gap.
fn run_tuning_script(input_tx: mpsc::Sender<UserCommand>) {
    let script: Vec<(u64, UserCommand)> = vec![
        (200, UserCommand::SetSetpoint(1.0)),
        (800, UserCommand::SetKp(0.05)),
        (2000, UserCommand::SetKp(0.15)),
        (2000, UserCommand::SetKd(0.5)),
        (2000, UserCommand::SetKi(0.02)),
        // Out-of-range and non-numeric entries exercise the binding
        // layer: the first clamps, the second is dropped.
        (1000, UserCommand::SetKp(9.0)),
        (500, UserCommand::SetKi(f64::NAN)),
        (1000, UserCommand::TogglePause),
        (1500, UserCommand::TogglePause),
        (2000, UserCommand::SetSetpoint(-0.5)),
        (3000, UserCommand::Quit),
    ];

    for (delay_ms, command) in script {
        thread::sleep(Duration::from_millis(delay_ms));
        if input_tx.send(command).is_err() {
            return;
        }
    }
}

fn main() {
    setup_logger().expect("failed");

    println!("pid-sim.");

    // Each gain is a linked slider/number-box pair; commands land in the
    // number box and propagate to the slider the controller reads.
    let kp_slider = Parameter::new("kp-slider", 0.0, 0.0, 5.0, 0.01);
    let kp_input = Parameter::new("kp-input", 0.0, 0.0, 5.0, 0.01);
    Parameter::link(&kp_slider, &kp_input);

    let ki_slider = Parameter::new("ki-slider", 0.0, 0.0, 2.0, 0.01);
    let ki_input = Parameter::new("ki-input", 0.0, 0.0, 2.0, 0.01);
    Parameter::link(&ki_slider, &ki_input);

    let kd_slider = Parameter::new("kd-slider", 0.0, 0.0, 5.0, 0.01);
    let kd_input = Parameter::new("kd-input", 0.0, 0.0, 5.0, 0.01);
    Parameter::link(&kd_slider, &kd_input);

    let setpoint_slider = Parameter::new("setpoint", 0.0, -2.0, 2.0, 0.1);

    let pid = PIDController::new(kp_slider.get(), ki_slider.get(), kd_slider.get());
    let motor = SimpleMotor::new(0.01, 0.01);
    let mut sim = Simulation::new(pid, motor);

    // User input from the script thread to the main loop
    let (input_tx, input_rx) = mpsc::channel::<UserCommand>();
    thread::spawn(move || run_tuning_script(input_tx));

    log::info!("session start, time step {}", TIME_STEP);

    let mut paused = false;
    loop {
        // Process user input (non-blocking); rejected input never reaches
        // the controller, the cells log it and keep their value.
        match input_rx.try_recv() {
            Ok(UserCommand::SetKp(value)) => {
                let _ = kp_input.set(value);
            }
            Ok(UserCommand::SetKi(value)) => {
                let _ = ki_input.set(value);
            }
            Ok(UserCommand::SetKd(value)) => {
                let _ = kd_input.set(value);
            }
            Ok(UserCommand::SetSetpoint(value)) => {
                let _ = setpoint_slider.set(value);
            }
            Ok(UserCommand::TogglePause) => {
                paused = !paused;
                log::info!("paused: {}", paused);
            }
            Ok(UserCommand::Quit) => {
                log::info!("shutdown");
                break;
            }
            Err(mpsc::TryRecvError::Disconnected) => {
                log::info!("script thread disconnected, shutting down");
                break;
            }
            Err(mpsc::TryRecvError::Empty) => {}
        }

        if !paused {
            // Gains flow slider -> controller every frame.
            sim.set_gains(kp_slider.get(), ki_slider.get(), kd_slider.get());
            sim.set_setpoint(setpoint_slider.get());

            sim.tick(TIME_STEP);
        }

        log_to_terminal(&sim, paused);
        println!("Time: {}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"));

        thread::sleep(Duration::from_millis(16));
    }
}
