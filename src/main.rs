use anyhow::{bail, Context};
use std::sync::Arc;
use zlevelkit::{
    auto_z_positions_command, init_logging, probe_plane_command, CalibrationConfig,
    MachineSession, SimulatedMachine,
};

fn usage() -> &'static str {
    "usage: zlevelkit <command> [options]

commands:
  probe-plane        probe the bed surface once and report the plane
  auto-z-positions   run the full pivot-point calibration

options:
  --config <path>    load calibration settings from a TOML file
  --simulate         run against the built-in simulated machine
"
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    let mut command = None;
    let mut config_path = None;
    let mut simulate = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config_path = Some(
                    args.next()
                        .context("--config requires a file path argument")?,
                );
            }
            "--simulate" => simulate = true,
            "--help" | "-h" => {
                print!("{}", usage());
                return Ok(());
            }
            other if command.is_none() && !other.starts_with('-') => {
                command = Some(other.to_string());
            }
            other => bail!("unrecognized argument '{}'\n{}", other, usage()),
        }
    }

    let Some(command) = command else {
        bail!("no command given\n{}", usage());
    };

    let config = match &config_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path))?;
            toml::from_str::<CalibrationConfig>(&text)
                .with_context(|| format!("failed to parse config file '{}'", path))?
        }
        None => CalibrationConfig::default(),
    };

    if !simulate {
        bail!(
            "no machine backend configured; run with --simulate to use the built-in machine \
             model, or connect a real machine through the ProbeInterface/MotionInterface traits"
        );
    }

    let machine = Arc::new(SimulatedMachine::new());
    let session = MachineSession::connect(machine.clone(), machine).await?;

    match command.as_str() {
        "probe-plane" => {
            let report = probe_plane_command(&session, &config).await?;
            println!("{}", report);
        }
        "auto-z-positions" => {
            let report = auto_z_positions_command(&session, &config).await?;
            println!("{}", report);
        }
        other => bail!("unknown command '{}'\n{}", other, usage()),
    }

    Ok(())
}
