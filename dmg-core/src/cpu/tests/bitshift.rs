use super::{hash_map, run_test, ExpectedState};

#[test]
fn rotate_accumulator_clears_z() {
    // LD A, 0x85; RLCA (bit 7 out to carry and bit 0, Z always 0)
    run_test(
        "3E8507",
        &ExpectedState { a: Some(0x0B), f: Some(0x10), ..ExpectedState::empty() },
    );

    // OR A; LD A, 0x00; RLCA (result zero but Z stays 0)
    run_test(
        "B73E0007",
        &ExpectedState { a: Some(0x00), f: Some(0x00), ..ExpectedState::empty() },
    );
}

#[test]
fn rotate_accumulator_thru_carry() {
    // OR A; LD A, 0x95; RLA (carry in 0, bit 7 out)
    run_test(
        "B73E9517",
        &ExpectedState { a: Some(0x2A), f: Some(0x10), ..ExpectedState::empty() },
    );

    // SCF; LD A, 0x95; RLA (carry in 1)
    run_test(
        "373E9517",
        &ExpectedState { a: Some(0x2B), f: Some(0x10), ..ExpectedState::empty() },
    );

    // OR A; LD A, 0x81; RRA
    run_test(
        "B73E811F",
        &ExpectedState { a: Some(0x40), f: Some(0x10), ..ExpectedState::empty() },
    );

    // SCF; LD A, 0x81; RRA
    run_test(
        "373E811F",
        &ExpectedState { a: Some(0xC0), f: Some(0x10), ..ExpectedState::empty() },
    );
}

#[test]
fn rotate_right_accumulator() {
    // LD A, 0x3B; RRCA
    run_test(
        "3E3B0F",
        &ExpectedState { a: Some(0x9D), f: Some(0x10), ..ExpectedState::empty() },
    );

    // LD A, 0x3A; RRCA (no carry out)
    run_test(
        "3E3A0F",
        &ExpectedState { a: Some(0x1D), f: Some(0x00), ..ExpectedState::empty() },
    );
}

#[test]
fn prefixed_rotate_left() {
    // LD B, 0x85; RLC B
    run_test(
        "0685CB00",
        &ExpectedState { b: Some(0x0B), f: Some(0x10), ..ExpectedState::empty() },
    );

    // LD B, 0x00; RLC B (prefixed rotates do set Z)
    run_test(
        "0600CB00",
        &ExpectedState { b: Some(0x00), f: Some(0x80), ..ExpectedState::empty() },
    );

    // OR A; LD C, 0x80; RL C (bit 7 to carry, zero result)
    run_test(
        "B70E80CB11",
        &ExpectedState { c: Some(0x00), f: Some(0x90), ..ExpectedState::empty() },
    );
}

#[test]
fn prefixed_rotate_right() {
    // LD D, 0x01; RRC D
    run_test(
        "1601CB0A",
        &ExpectedState { d: Some(0x80), f: Some(0x10), ..ExpectedState::empty() },
    );

    // OR A; LD E, 0x01; RR E
    run_test(
        "B71E01CB1B",
        &ExpectedState { e: Some(0x00), f: Some(0x90), ..ExpectedState::empty() },
    );

    // SCF; LD E, 0x00; RR E (carry rotates into bit 7)
    run_test(
        "371E00CB1B",
        &ExpectedState { e: Some(0x80), f: Some(0x00), ..ExpectedState::empty() },
    );
}

#[test]
fn shift_left_arithmetic() {
    // LD L, 0xFF; SLA L
    run_test(
        "2EFFCB25",
        &ExpectedState { l: Some(0xFE), f: Some(0x10), ..ExpectedState::empty() },
    );

    // LD HL, 0x8000; LD (HL), 0x80; SLA (HL)
    // Bit 7 goes out to carry and the result is exactly zero
    run_test(
        "2100803680CB26",
        &ExpectedState {
            f: Some(0x90),
            memory: hash_map! { 0x8000: 0x00 },
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn shift_right_arithmetic() {
    // LD A, 0x8A; SRA A (sign bit is kept)
    run_test(
        "3E8ACB2F",
        &ExpectedState { a: Some(0xC5), f: Some(0x00), ..ExpectedState::empty() },
    );

    // LD HL, 0xC2D0; LD (HL), 0x01; SRA (HL)
    run_test(
        "21D0C23601CB2E",
        &ExpectedState {
            f: Some(0x90),
            memory: hash_map! { 0xC2D0: 0x00 },
            ..ExpectedState::empty()
        },
    );
}

#[test]
fn shift_right_logical() {
    // LD A, 0xFF; SRL A (high bit cleared)
    run_test(
        "3EFFCB3F",
        &ExpectedState { a: Some(0x7F), f: Some(0x10), ..ExpectedState::empty() },
    );

    // LD B, 0x01; SRL B
    run_test(
        "0601CB38",
        &ExpectedState { b: Some(0x00), f: Some(0x90), ..ExpectedState::empty() },
    );
}

#[test]
fn swap() {
    // SCF; LD A, 0xF1; SWAP A (carry always cleared)
    run_test(
        "373EF1CB37",
        &ExpectedState { a: Some(0x1F), f: Some(0x00), ..ExpectedState::empty() },
    );

    // LD B, 0x00; SWAP B
    run_test(
        "0600CB30",
        &ExpectedState { b: Some(0x00), f: Some(0x80), ..ExpectedState::empty() },
    );

    // LD HL, 0xC2D0; LD (HL), 0xA5; SWAP (HL)
    run_test(
        "21D0C236A5CB36",
        &ExpectedState {
            f: Some(0x00),
            memory: hash_map! { 0xC2D0: 0x5A },
            ..ExpectedState::empty()
        },
    );
}
