use crate::cpu;
use crate::memory::address;
use crate::memory::ioregisters::IoRegister;
use crate::GameBoy;

fn empty_rom() -> Vec<u8> {
    vec![0x00; 0x8000]
}

#[test]
fn dispatch_services_the_interrupt() {
    let mut gb = GameBoy::from_rom(&empty_rom());

    gb.address_space.write_address_u8(address::IE_REGISTER, 0x01);
    gb.address_space.write_register(IoRegister::IF, 0x01);
    gb.cpu_registers.ime = true;
    gb.cpu_registers.sp = 0xFFFE;
    gb.cpu_registers.pc = 0x2000;

    let cycles = cpu::poll_interrupts(&mut gb.cpu_registers, &mut gb.address_space);

    assert_eq!(cpu::ISR_CYCLES_REQUIRED, cycles);
    assert!(!gb.cpu_registers.ime);
    assert_eq!(0x00, gb.address_space.read_register(IoRegister::IF) & 0x01);
    assert_eq!(0xFFFC, gb.cpu_registers.sp);
    assert_eq!(0x0040, gb.cpu_registers.pc);
    assert_eq!(0x2000, gb.address_space.read_address_u16(0xFFFC));
}

#[test]
fn dispatch_respects_priority_order() {
    let mut gb = GameBoy::from_rom(&empty_rom());

    // Joypad and timer both pending; timer has higher priority
    gb.address_space.write_address_u8(address::IE_REGISTER, 0x1F);
    gb.address_space.write_register(IoRegister::IF, 0x14);
    gb.cpu_registers.ime = true;

    cpu::poll_interrupts(&mut gb.cpu_registers, &mut gb.address_space);

    assert_eq!(0x0050, gb.cpu_registers.pc);
    // The joypad request is still pending
    assert_eq!(0x10, gb.address_space.read_register(IoRegister::IF) & 0x1F);
}

#[test]
fn dispatch_only_services_enabled_interrupts() {
    let mut gb = GameBoy::from_rom(&empty_rom());

    gb.address_space.write_address_u8(address::IE_REGISTER, 0x10);
    gb.address_space.write_register(IoRegister::IF, 0x04);
    gb.cpu_registers.ime = true;
    gb.cpu_registers.pc = 0x0150;

    let cycles = cpu::poll_interrupts(&mut gb.cpu_registers, &mut gb.address_space);

    assert_eq!(0, cycles);
    assert_eq!(0x0150, gb.cpu_registers.pc);
    assert!(gb.cpu_registers.ime);
}

#[test]
fn no_dispatch_with_ime_unset() {
    let mut gb = GameBoy::from_rom(&empty_rom());

    gb.address_space.write_address_u8(address::IE_REGISTER, 0x01);
    gb.address_space.write_register(IoRegister::IF, 0x01);
    gb.cpu_registers.pc = 0x0150;

    let cycles = cpu::poll_interrupts(&mut gb.cpu_registers, &mut gb.address_space);

    assert_eq!(0, cycles);
    assert_eq!(0x0150, gb.cpu_registers.pc);
    assert_eq!(0x01, gb.address_space.read_register(IoRegister::IF) & 0x01);
}

#[test]
fn enable_interrupts_is_delayed_one_instruction() {
    // EI; DI leaves no window for dispatch
    let mut rom = empty_rom();
    rom[0x100] = 0xFB;
    rom[0x101] = 0xF3;

    let mut gb = GameBoy::from_rom(&rom);
    gb.address_space.write_address_u8(address::IE_REGISTER, 0x01);
    gb.address_space.write_register(IoRegister::IF, 0x01);

    gb.step().unwrap();
    gb.wait();
    assert!(gb.cpu_registers.ime);
    assert_eq!(0x0101, gb.cpu_registers.pc);

    gb.step().unwrap();
    gb.wait();
    assert!(!gb.cpu_registers.ime);
    assert_eq!(0x0102, gb.cpu_registers.pc);
    // The request was never serviced
    assert_eq!(0x01, gb.address_space.read_register(IoRegister::IF) & 0x01);
}

#[test]
fn enable_interrupts_takes_effect_after_the_next_instruction() {
    // EI; NOP, with a VBlank request pending
    let mut rom = empty_rom();
    rom[0x100] = 0xFB;

    let mut gb = GameBoy::from_rom(&rom);
    gb.address_space.write_address_u8(address::IE_REGISTER, 0x01);
    gb.address_space.write_register(IoRegister::IF, 0x01);

    gb.step().unwrap();
    gb.wait();
    assert_eq!(0x0101, gb.cpu_registers.pc);

    // The NOP runs, and the pending interrupt is serviced right after it
    gb.step().unwrap();
    gb.wait();
    assert_eq!(0x0040, gb.cpu_registers.pc);
    assert!(!gb.cpu_registers.ime);
    assert_eq!(0x00, gb.address_space.read_register(IoRegister::IF) & 0x01);
    assert_eq!(0x0102, gb.address_space.read_address_u16(gb.cpu_registers.sp));
}

#[test]
fn halt_wakes_and_dispatches_with_ime_set() {
    let mut rom = empty_rom();
    rom[0x100] = 0x76;

    let mut gb = GameBoy::from_rom(&rom);
    gb.address_space.write_register(IoRegister::IF, 0x00);
    gb.cpu_registers.ime = true;

    gb.step().unwrap();
    gb.wait();
    assert!(gb.cpu_registers.halted);

    gb.address_space.write_address_u8(address::IE_REGISTER, 0x04);
    gb.address_space.request_interrupt(cpu::InterruptType::Timer);

    gb.step().unwrap();
    gb.wait();

    assert!(!gb.cpu_registers.halted);
    assert_eq!(0x0050, gb.cpu_registers.pc);
    assert_eq!(0x0101, gb.address_space.read_address_u16(gb.cpu_registers.sp));
}
