mod cpu;
mod op;
mod reg;


pub use self::op::{AluOp, Cond, Op, OpcodeTable, Operand8, Reg16, Reg8};

use thiserror::Error;

/// Failures surfaced by `CPU::step`.
///
/// Unrecognized flag names, the other failure class of the reference
/// implementation, cannot occur here: `Flag` is a closed enum.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
  /// The fetched byte has no registered handler. `pc` is the address the
  /// byte was fetched from; the program counter has already moved past it.
  #[error("illegal opcode {opcode:#04x} at pc {pc:#06x}")]
  IllegalOpcode { opcode: u8, pc: u16 },
}

pub struct CPU {
  pub regs: Registers,

  /// Cost of the most recent instruction.
  pub clocks: Clocks,

  pub halted: bool,
  pub stopped: bool,

  /// Interrupt master enable. Gates a dispatch mechanism that lives
  /// outside this core; the CPU only exposes the flag.
  pub ime: bool,

  table: OpcodeTable,
}

/// Machine-cycle and T-state cost of one instruction, `t = 4 * m`.
/// Overwritten on every step; never cumulative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Clocks {
  pub m: u32,
  pub t: u32,
}

#[derive(Debug, Eq, PartialEq)]
pub struct Registers {
  /// General-purpose registers.
  pub a: u8,
  pub b: u8,
  pub c: u8,
  pub d: u8,
  pub e: u8,
  pub f: u8, // Flag register; bits 0-3 always read zero.
  pub h: u8,
  pub l: u8,

  /// Program counter.
  pub pc: u16,

  /// Stack pointer.
  pub sp: u16,
}

/// The four meaningful bits of F.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
  /// Bit 7, set when the last flag-affecting result was zero.
  Zero,
  /// Bit 6, set when the last operation was a subtraction.
  Subtract,
  /// Bit 5, carry out of bit 3 (or bit 11 for 16-bit adds).
  HalfCarry,
  /// Bit 4, carry out of bit 7 (or bit 15 for 16-bit adds).
  Carry,
}
