use crate::cpu::instructions::ParseError;
use crate::{GameBoy, RunConfig};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("error decoding CPU instruction: {source}")]
    InstructionDecode {
        #[from]
        source: ParseError,
    },
}

/// Drive the emulator until an error occurs or the configured cycle limit
/// is reached.
///
/// Each iteration executes one instruction and then drains the owed clock
/// cycles, advancing the timer and (while the LCD is enabled) the PPU.
pub fn run(mut gb: GameBoy, run_config: &RunConfig) -> Result<(), RunError> {
    log::info!("Running with config:\n{run_config}");

    loop {
        if run_config.trace_enabled {
            gb.dump();
        }

        gb.step()?;
        gb.wait();

        if let Some(max_cycles) = run_config.max_cycles {
            if gb.cycle_count() >= max_cycles {
                log::info!("Reached cycle limit of {max_cycles}, stopping");
                return Ok(());
            }
        }
    }
}
