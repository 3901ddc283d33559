//! Byte-addressable storage the CPU executes against.
//!
//! The core performs no bounds checking of its own; the address-space size
//! is fixed when the backing store is constructed.

/// Read/write-byte contract consumed by the CPU.
pub trait Memory {
  /// Read a byte at address `addr`.
  fn rb(&self, addr: u16) -> u8;

  /// Write `value` at address `addr`.
  fn wb(&mut self, addr: u16, value: u8);

  /// Read a 2-byte little-endian word from `addr`.
  fn rw(&self, addr: u16) -> u16 {
    let a = u16::from(self.rb(addr));
    let b = u16::from(self.rb(addr.wrapping_add(1)));
    (b << 8) | a
  }

  /// Write a 2-byte little-endian word to `addr`.
  fn ww(&mut self, addr: u16, value: u16) {
    self.wb(addr, (value & 0xff) as u8);
    self.wb(addr.wrapping_add(1), (value >> 8) as u8);
  }
}

/// Flat fixed-size store with no banking or MMIO. Addresses wrap modulo the
/// configured size.
pub struct FlatMemory {
  bytes: Vec<u8>,
}

impl FlatMemory {
  pub fn new(size: usize) -> FlatMemory {
    FlatMemory { bytes: vec![0; size] }
  }

  /// Copy `values` into memory starting at `addr`.
  pub fn load(&mut self, addr: u16, values: &[u8]) {
    let mut cur = addr;
    for v in values {
      self.wb(cur, *v);
      cur = cur.wrapping_add(1);
    }
  }
}

impl Memory for FlatMemory {
  fn rb(&self, addr: u16) -> u8 {
    self.bytes[addr as usize % self.bytes.len()]
  }

  fn wb(&mut self, addr: u16, value: u8) {
    let idx = addr as usize % self.bytes.len();
    self.bytes[idx] = value;
  }
}
