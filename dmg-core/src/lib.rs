//! DMG Game Boy emulator core.
//!
//! The [`GameBoy`] facade wires together the CPU interpreter, the
//! memory-mapped bus, the timer, and the PPU. A host drives it by calling
//! [`GameBoy::step`] (execute one instruction) followed by
//! [`GameBoy::wait`] (drain the owed clock cycles into timer and PPU
//! advancement), applying button events between steps and presenting the
//! frame buffer at its own rate.

pub mod config;
pub mod cpu;
pub mod debug;
pub mod eventloop;
pub mod joypad;
pub mod memory;
pub mod ppu;
pub mod serial;
pub mod startup;
pub mod timer;

use crate::cpu::{instructions, CpuRegisters};
use crate::joypad::Button;
use crate::memory::ioregisters::IoRegister;
use crate::memory::AddressSpace;
use crate::ppu::{FrameBuffer, GraphicsMode, PpuState};
use crate::serial::{DebugConsoleSink, SerialSink};
use crate::timer::TimerCounter;
use std::error::Error;

pub use config::RunConfig;
pub use cpu::instructions::ParseError;
pub use startup::StartupError;

pub struct GameBoy {
    pub(crate) address_space: AddressSpace,
    pub(crate) cpu_registers: CpuRegisters,
    pub(crate) ppu_state: PpuState,
    pub(crate) timer_counter: TimerCounter,
    pub(crate) cycles_to_wait: u64,
}

impl GameBoy {
    /// Read the ROM file at the given path and build an emulator in the
    /// post-boot state.
    pub fn initialize(rom_file_path: &str) -> Result<Self, StartupError> {
        startup::initialize(rom_file_path)
    }

    /// Build an emulator in the post-boot state from an in-memory ROM
    /// image, with serial output going to stderr.
    pub fn from_rom(rom: &[u8]) -> Self {
        Self::from_rom_with_serial_sink(rom, Box::new(DebugConsoleSink))
    }

    /// Build an emulator in the post-boot state with a custom serial sink.
    pub fn from_rom_with_serial_sink(rom: &[u8], serial_sink: Box<dyn SerialSink>) -> Self {
        Self {
            address_space: AddressSpace::new(rom, serial_sink),
            cpu_registers: CpuRegisters::new(),
            ppu_state: PpuState::new(),
            timer_counter: TimerCounter::new(),
            cycles_to_wait: 0,
        }
    }

    /// Execute one instruction, or let one M-cycle pass if the CPU is
    /// halted. Any cycles owed (instruction cost, OAM DMA stall, interrupt
    /// service) accumulate until the next [`Self::wait`] call.
    pub fn step(&mut self) -> Result<(), ParseError> {
        if self.cpu_registers.halted {
            self.cycles_to_wait += cpu::HALTED_CYCLES;
            if self.address_space.needs_interrupt_poll() {
                self.cycles_to_wait +=
                    cpu::poll_interrupts(&mut self.cpu_registers, &mut self.address_space);
            }
            return Ok(());
        }

        let (instruction, pc) =
            instructions::parse_next_instruction(&self.address_space, self.cpu_registers.pc)?;

        log::trace!(
            "Executing {instruction:02X?} at {:04X}, next PC {pc:04X}",
            self.cpu_registers.pc
        );

        self.cpu_registers.pc = pc;

        // Cycle counts for conditional control flow depend on the flags as
        // they are before execution
        self.cycles_to_wait += u64::from(instruction.cycles_required(&self.cpu_registers));

        instruction.execute(&mut self.address_space, &mut self.cpu_registers);

        self.cycles_to_wait += self.address_space.take_dma_stall_cycles();

        if self.address_space.needs_interrupt_poll() {
            self.cycles_to_wait +=
                cpu::poll_interrupts(&mut self.cpu_registers, &mut self.address_space);
        }

        Ok(())
    }

    /// Drain all owed clock cycles, one M-cycle at a time: the timer always
    /// advances, the PPU only while LCDC bit 7 reads set at that iteration
    /// (disabling the LCD freezes the PPU mid-frame).
    pub fn wait(&mut self) {
        while self.cycles_to_wait > 0 {
            let cycles = self.cycles_to_wait.min(ppu::DOTS_PER_M_CYCLE);
            self.cycles_to_wait -= cycles;

            timer::update_timer_registers(&mut self.address_space, &mut self.timer_counter, cycles);

            if self.address_space.lcd_enabled() {
                ppu::tick_m_cycle(&mut self.ppu_state, &mut self.address_space);
            }
        }
    }

    /// Record a button press and raise the joypad interrupt.
    pub fn press_button(&mut self, button: Button) {
        self.address_space.joypad_mut().set_pressed(button, true);
        self.address_space.request_interrupt(cpu::InterruptType::Joypad);
    }

    /// Record a button release.
    pub fn release_button(&mut self, button: Button) {
        self.address_space.joypad_mut().set_pressed(button, false);
    }

    /// The scroll origin (SCY, SCX) for presenting the frame buffer.
    pub fn get_origin(&self) -> (u8, u8) {
        (
            self.address_space.read_register(IoRegister::SCY),
            self.address_space.read_register(IoRegister::SCX),
        )
    }

    /// Print the one-line CPU trace to stdout.
    pub fn dump(&self) {
        println!("{}", self.trace_line());
    }

    /// The one-line CPU trace: registers plus the four bytes at PC.
    pub fn trace_line(&self) -> String {
        debug::trace_line(&self.cpu_registers, &self.address_space)
    }

    /// The 256x256 frame buffer of 2-bit colors, indexed `[y][x]`. The
    /// visible 160x144 region starts at the scroll origin and wraps on
    /// both axes.
    pub fn frame_buffer(&self) -> &FrameBuffer {
        self.ppu_state.frame_buffer()
    }

    pub fn graphics_mode(&self) -> GraphicsMode {
        self.ppu_state.mode()
    }

    /// Total clock cycles elapsed since power-on.
    pub fn cycle_count(&self) -> u64 {
        self.timer_counter.cycle_count()
    }
}

/// Load the configured ROM and run the emulator until it stops.
pub fn run(run_config: &RunConfig) -> Result<(), Box<dyn Error>> {
    let gb = startup::initialize(&run_config.rom_file_path)?;

    eventloop::run(gb, run_config)?;

    Ok(())
}
