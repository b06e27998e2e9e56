use crate::cpu::InterruptType;
use crate::memory::ioregisters::IoRegister;
use crate::memory::AddressSpace;

/// Monotonic clock cycle counter. Drives both the divider and the
/// configurable timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerCounter(u64);

impl TimerCounter {
    pub fn new() -> Self {
        Self(0)
    }

    /// Total clock cycles elapsed since power-on.
    pub fn cycle_count(self) -> u64 {
        self.0
    }
}

// DIV increments at 16384 Hz, once per 64 M-cycles
const DIV_UPDATE_FREQUENCY: u64 = 256;

/// Advance the divider and timer registers by the given number of clock
/// cycles.
///
/// DIV increments on every 256-cycle boundary the counter crosses. TIMA,
/// when enabled via TAC bit 2, increments at the TAC-selected rate; on
/// overflow it is reloaded from TMA and a timer interrupt is requested.
pub fn update_timer_registers(
    address_space: &mut AddressSpace,
    counter: &mut TimerCounter,
    cycles: u64,
) {
    if cycles > DIV_UPDATE_FREQUENCY {
        panic!("cycles must be <= {DIV_UPDATE_FREQUENCY}, was {cycles}");
    }

    let old_cycles = counter.0;
    let new_cycles = old_cycles + cycles;
    counter.0 = new_cycles;

    if old_cycles / DIV_UPDATE_FREQUENCY != new_cycles / DIV_UPDATE_FREQUENCY {
        let old_div = address_space.read_register(IoRegister::DIV);
        address_space.privileged_set_div(old_div.wrapping_add(1));
    }

    let timer_control = address_space.read_register(IoRegister::TAC);
    if timer_control & 0x04 == 0 {
        // TIMA updates are disabled
        return;
    }

    let tima_update_frequency_bits = match timer_control & 0x03 {
        0x00 => 10, // 1024
        0x01 => 4,  // 16
        0x02 => 6,  // 64
        0x03 => 8,  // 256
        _ => unreachable!("2-bit value"),
    };

    let tima_diff = (new_cycles >> tima_update_frequency_bits)
        - (old_cycles >> tima_update_frequency_bits);

    // Generally this loop executes 0 or 1 times
    for _ in 0..tima_diff {
        let old_tima = address_space.read_register(IoRegister::TIMA);
        match old_tima.overflowing_add(1) {
            (new_tima, false) => {
                address_space.write_register(IoRegister::TIMA, new_tima);
            }
            (_, true) => {
                let timer_modulo = address_space.read_register(IoRegister::TMA);
                address_space.write_register(IoRegister::TIMA, timer_modulo);

                address_space.request_interrupt(InterruptType::Timer);
            }
        }
    }
}
