use clap::Parser;
use dmg_core::RunConfig;
use std::error::Error;

#[derive(Parser)]
#[command(about = "Headless DMG Game Boy emulator")]
struct Cli {
    /// Path to the ROM file to run
    #[arg(short = 'f', long = "rom-file-path")]
    rom_file_path: String,
    /// Print a CPU trace line before every instruction
    #[arg(short = 't', long = "trace", default_value_t = false)]
    trace: bool,
    /// Stop after this many clock cycles instead of running forever
    #[arg(long = "max-cycles")]
    max_cycles: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Cli::parse();

    let run_config = RunConfig {
        rom_file_path: args.rom_file_path,
        trace_enabled: args.trace,
        max_cycles: args.max_cycles,
    };

    dmg_core::run(&run_config)
}
