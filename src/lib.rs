//! Execution engine of a Game-Boy-style 8-bit CPU.
//!
//! The crate owns the register file, flag computation, opcode decode and
//! per-instruction semantics. Memory is a collaborator behind the
//! [`mem::Memory`] trait; display, audio, cartridge banking and interrupt
//! vectoring live outside this core.

pub mod cpu;
pub mod mem;

pub use crate::cpu::{Clocks, CpuError, Flag, Registers, CPU};
pub use crate::mem::{FlatMemory, Memory};
