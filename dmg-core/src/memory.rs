pub mod address;
pub mod ioregisters;

use crate::cpu::InterruptType;
use crate::joypad::{JoypadMode, JoypadState};
use crate::memory::ioregisters::IoRegister;
use crate::serial::SerialSink;

pub const ADDRESS_SPACE_LEN: usize = 0x10000;

const OAM_SIZE: u16 = 0xA0;

// An OAM DMA transfer stalls the CPU for 160 M-cycles
const OAM_DMA_STALL_CYCLES: u64 = 160 * 4;

/// The flat 64 KiB address space plus the hardware hanging off of it: the
/// joypad port, the serial sink, the OAM DMA engine, and the interrupt poll
/// latch that IF/IE writes set.
///
/// Reads and writes are routed: echo RAM is normalized onto working RAM
/// before anything else happens, a handful of I/O registers have side
/// effects on write, and writes outside the writable regions are logged and
/// dropped.
pub struct AddressSpace {
    bytes: Box<[u8; ADDRESS_SPACE_LEN]>,
    joypad: JoypadState,
    serial_sink: Box<dyn SerialSink>,
    needs_interrupt_poll: bool,
    dma_stall_cycles: u64,
}

/// Map echo RAM (0xE000-0xFDFF) onto the working RAM it mirrors. Applied
/// before any dispatch so that side effects and writability checks see the
/// real address.
fn normalize_echo_ram(address: u16) -> u16 {
    match address {
        address::ECHO_RAM_START..=address::ECHO_RAM_END => address - 0x2000,
        _ => address,
    }
}

fn is_writable(address: u16) -> bool {
    matches!(
        address,
        address::VRAM_START..=address::WORKING_RAM_END
            | address::OAM_START..=address::OAM_END
            | address::IO_REGISTERS_START..=address::IO_REGISTERS_END
            | address::HRAM_START..=address::HRAM_END
            | address::IE_REGISTER
    )
}

impl AddressSpace {
    /// Create a new address space with the given ROM image copied in
    /// starting at address 0x0000, and all I/O registers set to their
    /// post-boot values.
    ///
    /// Images larger than the 64 KiB address space are truncated (bank
    /// switching is not implemented at this level).
    pub fn new(rom: &[u8], serial_sink: Box<dyn SerialSink>) -> Self {
        let mut bytes = Box::new([0; ADDRESS_SPACE_LEN]);

        let rom_len = rom.len().min(ADDRESS_SPACE_LEN);
        if rom.len() > ADDRESS_SPACE_LEN {
            log::warn!(
                "ROM image is {} bytes, larger than the address space; truncating",
                rom.len()
            );
        }
        bytes[..rom_len].copy_from_slice(&rom[..rom_len]);

        let mut address_space = Self {
            bytes,
            joypad: JoypadState::new(),
            serial_sink,
            needs_interrupt_poll: true,
            dma_stall_cycles: 0,
        };
        address_space.reset_io_registers();

        address_space
    }

    // Post-boot I/O register values, applied on top of whatever the ROM
    // image put in the I/O range.
    fn reset_io_registers(&mut self) {
        for (register, value) in [
            (IoRegister::DIV, 0x18),
            (IoRegister::TIMA, 0x00),
            (IoRegister::TMA, 0x00),
            (IoRegister::TAC, 0xF8),
            (IoRegister::IF, 0xE1),
            (IoRegister::LCDC, 0x91),
            (IoRegister::STAT, 0x81),
            (IoRegister::SCY, 0x00),
            (IoRegister::SCX, 0x00),
            (IoRegister::LY, 0x91),
            (IoRegister::LYC, 0x00),
            (IoRegister::DMA, 0xFF),
            (IoRegister::BGP, 0xFC),
            (IoRegister::OBP0, 0xFC),
            (IoRegister::OBP1, 0xFC),
            (IoRegister::WY, 0x00),
            (IoRegister::WX, 0x00),
        ] {
            self.bytes[register.to_address() as usize] = value;
        }
        self.bytes[address::IE_REGISTER as usize] = 0x00;
    }

    /// Read the byte at the given address. Echo RAM reads come from the
    /// mirrored working RAM; the joypad port is synthesized from the
    /// current button and row-select state; everything else returns the raw
    /// backing byte.
    pub fn read_address_u8(&self, address: u16) -> u8 {
        let address = normalize_echo_ram(address);
        match address {
            address::JOYP_REGISTER => self.joypad.joyp_value(),
            _ => self.bytes[address as usize],
        }
    }

    /// Read the byte at the given address and the following address as a
    /// little-endian 16-bit value.
    pub fn read_address_u16(&self, address: u16) -> u16 {
        let lsb = self.read_address_u8(address);
        let msb = self.read_address_u8(address.wrapping_add(1));
        u16::from_le_bytes([lsb, msb])
    }

    /// Assign a value to the given address, applying register side effects.
    /// Writes to non-writable addresses are logged and dropped.
    pub fn write_address_u8(&mut self, address: u16, value: u8) {
        let address = normalize_echo_ram(address);
        match address {
            // Any write to the divider resets it, regardless of value
            address::DIV_REGISTER => {
                self.bytes[address as usize] = 0;
            }
            // Serial data bytes go to the debug sink and are not stored
            address::SB_REGISTER => {
                self.serial_sink.transmit(value);
            }
            address::JOYP_REGISTER => {
                let idx = address as usize;
                self.bytes[idx] = (self.bytes[idx] & 0x0F) | (value & 0xF0);
                self.joypad.set_mode(JoypadMode::from_joyp_write(value));
            }
            address::IF_REGISTER | address::IE_REGISTER => {
                self.bytes[address as usize] = value;
                self.needs_interrupt_poll = true;
            }
            address::DMA_REGISTER => {
                self.run_oam_dma(value);
            }
            _ => {
                if is_writable(address) {
                    self.bytes[address as usize] = value;
                } else if (address::HEADER_START..address::VRAM_START).contains(&address) {
                    log::warn!(
                        "Write of {value:02X} to ROM address {address:04X}: bank switching is not implemented"
                    );
                } else {
                    log::warn!("Dropping illegal write of {value:02X} to {address:04X}");
                }
            }
        }
    }

    /// Assign a 16-bit value to the given address and the following
    /// address, using little-endian.
    pub fn write_address_u16(&mut self, address: u16, value: u16) {
        let [lsb, msb] = value.to_le_bytes();
        self.write_address_u8(address, lsb);
        self.write_address_u8(address.wrapping_add(1), msb);
    }

    // Copy 160 bytes from (source_page << 8) into OAM. The source is read
    // through the normal read path so echo RAM sources mirror correctly.
    fn run_oam_dma(&mut self, source_page: u8) {
        let source_base = u16::from(source_page) << 8;
        log::debug!("OAM DMA transfer from {source_base:04X}");

        for i in 0..OAM_SIZE {
            let byte = self.read_address_u8(source_base + i);
            self.bytes[(address::OAM_START + i) as usize] = byte;
        }

        self.dma_stall_cycles += OAM_DMA_STALL_CYCLES;
    }

    /// Read the given I/O register.
    pub fn read_register(&self, register: IoRegister) -> u8 {
        self.read_address_u8(register.to_address())
    }

    /// Write the given I/O register through the normal dispatch, with all
    /// side effects.
    pub fn write_register(&mut self, register: IoRegister, value: u8) {
        self.write_address_u8(register.to_address(), value);
    }

    /// Retrieve the current value of the IE register (interrupts enabled).
    pub fn get_ie_register(&self) -> u8 {
        self.bytes[address::IE_REGISTER as usize]
    }

    /// Set the requested bit in the IF register. Goes through the normal
    /// write path, so the interrupt poll latch is set as well.
    pub fn request_interrupt(&mut self, interrupt_type: InterruptType) {
        let flags = self.read_register(IoRegister::IF);
        self.write_register(IoRegister::IF, flags | interrupt_type.bit());
    }

    /// Clear the requested bit in the IF register without touching the
    /// interrupt poll latch. Used by interrupt dispatch itself.
    pub fn privileged_clear_interrupt_flag(&mut self, interrupt_type: InterruptType) {
        self.bytes[address::IF_REGISTER as usize] &= !interrupt_type.bit();
    }

    /// Set DIV directly, bypassing the reset-on-write behavior of the CPU
    /// write path. Only the timer should call this.
    pub fn privileged_set_div(&mut self, value: u8) {
        self.bytes[address::DIV_REGISTER as usize] = value;
    }

    /// Set LY directly. Only the PPU should call this.
    pub fn privileged_set_ly(&mut self, value: u8) {
        self.bytes[address::LY_REGISTER as usize] = value;
    }

    /// Set STAT directly. Only the PPU should call this.
    pub fn privileged_set_stat(&mut self, value: u8) {
        self.bytes[address::STAT_REGISTER as usize] = value;
    }

    /// Whether LCDC bit 7 (LCD enable) is set. While it is clear the PPU is
    /// not advanced at all.
    pub fn lcd_enabled(&self) -> bool {
        self.read_register(IoRegister::LCDC) & 0x80 != 0
    }

    /// Whether IF, IE, or IME may have changed since interrupts were last
    /// polled.
    pub fn needs_interrupt_poll(&self) -> bool {
        self.needs_interrupt_poll
    }

    pub fn set_needs_interrupt_poll(&mut self) {
        self.needs_interrupt_poll = true;
    }

    pub fn clear_needs_interrupt_poll(&mut self) {
        self.needs_interrupt_poll = false;
    }

    /// Take the CPU stall cycles owed for OAM DMA transfers triggered since
    /// the last call.
    pub fn take_dma_stall_cycles(&mut self) -> u64 {
        std::mem::take(&mut self.dma_stall_cycles)
    }

    pub fn joypad_mut(&mut self) -> &mut JoypadState {
        &mut self.joypad
    }
}
