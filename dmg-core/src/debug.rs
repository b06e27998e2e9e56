use crate::cpu::CpuRegisters;
use crate::memory::AddressSpace;

/// Format the one-line CPU trace: every 8-bit register, SP, PC, and the
/// four bytes at PC.
///
/// The format matches what Game Boy doctor style logging tools expect, one
/// line per instruction:
/// `A:01 F:B0 B:00 C:13 D:00 E:D8 H:01 L:4D SP:FFFE PC:0100 PCMEM:00,C3,50,01`
pub fn trace_line(cpu_registers: &CpuRegisters, address_space: &AddressSpace) -> String {
    let pc = cpu_registers.pc;
    format!(
        "A:{:02X} F:{:02X} B:{:02X} C:{:02X} D:{:02X} E:{:02X} H:{:02X} L:{:02X} SP:{:04X} PC:{:04X} PCMEM:{:02X},{:02X},{:02X},{:02X}",
        cpu_registers.accumulator,
        cpu_registers.flags,
        cpu_registers.b,
        cpu_registers.c,
        cpu_registers.d,
        cpu_registers.e,
        cpu_registers.h,
        cpu_registers.l,
        cpu_registers.sp,
        pc,
        address_space.read_address_u8(pc),
        address_space.read_address_u8(pc.wrapping_add(1)),
        address_space.read_address_u8(pc.wrapping_add(2)),
        address_space.read_address_u8(pc.wrapping_add(3)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serial::DebugConsoleSink;

    #[test]
    fn trace_line_format() {
        let mut rom = vec![0x00; 0x101];
        rom[0x100] = 0xC3;
        let address_space = AddressSpace::new(&rom, Box::new(DebugConsoleSink));
        let cpu_registers = CpuRegisters::new();

        assert_eq!(
            "A:01 F:B0 B:00 C:13 D:00 E:D8 H:01 L:4D SP:FFFE PC:0100 PCMEM:C3,00,00,00",
            trace_line(&cpu_registers, &address_space)
        );
    }
}
