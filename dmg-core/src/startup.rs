use crate::GameBoy;
use std::path::Path;
use std::{fs, io};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("error reading ROM file at {file_path}: {source}")]
    FileRead {
        file_path: String,
        #[source]
        source: io::Error,
    },
}

/// Read the ROM file at the given path and build an emulator in the
/// post-boot state, ready to execute from the cartridge entry point.
pub fn initialize(rom_file_path: &str) -> Result<GameBoy, StartupError> {
    log::info!("Loading ROM image from '{rom_file_path}'");

    let rom = fs::read(Path::new(rom_file_path)).map_err(|err| StartupError::FileRead {
        file_path: rom_file_path.into(),
        source: err,
    })?;

    log::info!("Loaded {} bytes of ROM data", rom.len());

    Ok(GameBoy::from_rom(&rom))
}
