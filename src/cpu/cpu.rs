use log::info;

use crate::cpu::op::{AluOp, Cond, Op, OpcodeTable, Operand8};
use crate::cpu::{Clocks, CpuError, Flag, Registers, CPU};
use crate::mem::Memory;

impl CPU {
  pub fn new() -> CPU {
    CPU {
      regs: Registers::new(),
      clocks: Clocks::default(),
      halted: false,
      stopped: false,
      ime: false,
      table: OpcodeTable::new(),
    }
  }

  pub fn enable_interrupts(&mut self) {
    self.ime = true;
  }

  pub fn disable_interrupts(&mut self) {
    self.ime = false;
  }

  /// Run one instruction: fetch the byte at PC, decode it, execute it.
  ///
  /// Records the cost of the instruction in `self.clocks` and returns it.
  /// On an unmapped opcode the fetch stands (PC has advanced past the byte)
  /// but nothing else is mutated.
  ///
  /// A halted CPU does not fetch or execute; it idles at one machine cycle
  /// per call until an external controller clears `halted`.
  pub fn step<M: Memory>(&mut self, mem: &mut M) -> Result<Clocks, CpuError> {
    if self.halted {
      self.clocks = Clocks { m: 1, t: 4 };
      return Ok(self.clocks);
    }

    let at = self.regs.pc;
    let opcode = self.fetch(mem);
    let op = self
      .table
      .lookup(opcode)
      .ok_or(CpuError::IllegalOpcode { opcode, pc: at })?;

    let m = self.exec(op, mem);
    self.clocks = Clocks { m, t: 4 * m };
    Ok(self.clocks)
  }

  /// Read the byte at PC and advance PC, wrapping at the end of the
  /// address space.
  fn fetch<M: Memory>(&mut self, mem: &mut M) -> u8 {
    let result = mem.rb(self.regs.pc);
    self.regs.pc = self.regs.pc.wrapping_add(1);
    result
  }

  /// Fetch a little-endian word: low byte first.
  fn fetch_word<M: Memory>(&mut self, mem: &mut M) -> u16 {
    let a = self.fetch(mem);
    let b = self.fetch(mem);
    u16::from(a) | (u16::from(b) << 8)
  }

  /// Execute a decoded instruction and return its m-cycle cost.
  fn exec<M: Memory>(&mut self, op: Op, mem: &mut M) -> u32 {
    match op {
      Op::Nop => 1,
      Op::Stop => {
        // STOP leaves the machine in a running sub-state; the surrounding
        // power controller decides what to do with the flag.
        self.stopped = true;
        info!("stop at pc {:#06x}", self.regs.pc);
        1
      }
      Op::Halt => {
        self.halted = true;
        info!("halt at pc {:#06x}", self.regs.pc);
        1
      }

      Op::Ld(dst, src) => {
        let value = self.regs.r8(src);
        self.regs.set_r8(dst, value);
        1
      }
      Op::LdImm(dst) => {
        let value = self.fetch(mem);
        self.regs.set_r8(dst, value);
        2
      }
      Op::LdFromHl(dst) => {
        let value = mem.rb(self.regs.hl());
        self.regs.set_r8(dst, value);
        2
      }
      Op::LdToHl(src) => {
        mem.wb(self.regs.hl(), self.regs.r8(src));
        2
      }
      Op::LdHlImm => {
        let value = self.fetch(mem);
        mem.wb(self.regs.hl(), value);
        3
      }
      Op::LdAInd(pair) => {
        self.regs.a = mem.rb(self.regs.r16(pair));
        2
      }
      Op::LdIndA(pair) => {
        mem.wb(self.regs.r16(pair), self.regs.a);
        2
      }
      Op::LdPairImm(pair) => {
        let value = self.fetch_word(mem);
        self.regs.set_r16(pair, value);
        3
      }
      Op::LdAddrSp => {
        let addr = self.fetch_word(mem);
        mem.ww(addr, self.regs.sp);
        5
      }
      Op::LdiHlA => {
        mem.wb(self.regs.hl(), self.regs.a);
        self.regs.hl_inc();
        2
      }
      Op::LddHlA => {
        mem.wb(self.regs.hl(), self.regs.a);
        self.regs.hl_dec();
        2
      }
      Op::LdiAHl => {
        self.regs.a = mem.rb(self.regs.hl());
        self.regs.hl_inc();
        2
      }
      Op::LddAHl => {
        self.regs.a = mem.rb(self.regs.hl());
        self.regs.hl_dec();
        2
      }

      Op::Alu(alu, operand) => {
        let (n, m) = match operand {
          Operand8::Reg(r) => (self.regs.r8(r), 1),
          Operand8::HlInd => (mem.rb(self.regs.hl()), 2),
          Operand8::Imm => (self.fetch(mem), 2),
        };
        match alu {
          AluOp::Add => self.add_a(n),
          AluOp::Adc => self.adc_a(n),
          AluOp::Sub => self.sub_a(n),
          AluOp::Sbc => self.sbc_a(n),
          AluOp::And => self.and_a(n),
          AluOp::Xor => self.xor_a(n),
          AluOp::Or => self.or_a(n),
          AluOp::Cp => self.cp_a(n),
        }
        m
      }
      Op::AddHl(pair) => {
        self.add_hl(self.regs.r16(pair));
        2
      }

      Op::Inc(reg) => {
        let result = self.inc8(self.regs.r8(reg));
        self.regs.set_r8(reg, result);
        1
      }
      Op::Dec(reg) => {
        let result = self.dec8(self.regs.r8(reg));
        self.regs.set_r8(reg, result);
        1
      }
      Op::IncHlInd => {
        let result = self.inc8(mem.rb(self.regs.hl()));
        mem.wb(self.regs.hl(), result);
        3
      }
      Op::DecHlInd => {
        let result = self.dec8(mem.rb(self.regs.hl()));
        mem.wb(self.regs.hl(), result);
        3
      }
      Op::IncPair(pair) => {
        // 16-bit pair form; no flags.
        let value = self.regs.r16(pair).wrapping_add(1);
        self.regs.set_r16(pair, value);
        2
      }
      Op::DecPair(pair) => {
        let value = self.regs.r16(pair).wrapping_sub(1);
        self.regs.set_r16(pair, value);
        2
      }

      Op::Rlca => {
        let carry = self.regs.a >> 7;
        self.regs.a = (self.regs.a << 1) | carry;
        self.regs.set_znhc(false, false, false, carry == 1);
        1
      }
      Op::Rrca => {
        let carry = self.regs.a & 0x1;
        self.regs.a = (self.regs.a >> 1) | (carry << 7);
        self.regs.set_znhc(false, false, false, carry == 1);
        1
      }
      Op::Rla => {
        let b7 = self.regs.a >> 7;
        let carry_in = if self.regs.c() { 1 } else { 0 };
        self.regs.a = (self.regs.a << 1) | carry_in;
        self.regs.set_znhc(false, false, false, b7 == 1);
        1
      }
      Op::Rra => {
        let b0 = self.regs.a & 0x1;
        let carry_in = if self.regs.c() { 0x80 } else { 0 };
        self.regs.a = (self.regs.a >> 1) | carry_in;
        self.regs.set_znhc(false, false, false, b0 == 1);
        1
      }

      Op::Jr(cond) => {
        if self.cond(cond) {
          // Offset is relative to the address after the operand byte.
          let offset = self.fetch(mem) as i8;
          self.regs.pc = self.regs.pc.wrapping_add(offset as u16);
          3
        } else {
          self.regs.pc = self.regs.pc.wrapping_add(1);
          2
        }
      }

      Op::Daa => {
        self.daa();
        1
      }
      Op::Cpl => {
        self.regs.a = !self.regs.a;
        self.regs.set_flag(Flag::Subtract, true);
        self.regs.set_flag(Flag::HalfCarry, true);
        1
      }
      Op::Scf => {
        self.regs.set_flag(Flag::Subtract, false);
        self.regs.set_flag(Flag::HalfCarry, false);
        self.regs.set_flag(Flag::Carry, true);
        1
      }
      Op::Ccf => {
        let carry = self.regs.c();
        self.regs.set_flag(Flag::Subtract, false);
        self.regs.set_flag(Flag::HalfCarry, false);
        self.regs.set_flag(Flag::Carry, !carry);
        1
      }
    }
  }

  fn cond(&self, cond: Cond) -> bool {
    match cond {
      Cond::Always => true,
      Cond::NotZero => !self.regs.z(),
      Cond::Zero => self.regs.z(),
      Cond::NotCarry => !self.regs.c(),
      Cond::Carry => self.regs.c(),
    }
  }

  fn add_a(&mut self, n: u8) {
    let a = self.regs.a;
    let result = a.wrapping_add(n);
    self.regs.a = result;
    self.regs.set_znhc(
      result == 0,
      false,
      (a & 0xf) + (n & 0xf) > 0xf,
      u16::from(a) + u16::from(n) > 0xff,
    );
  }

  fn adc_a(&mut self, n: u8) {
    let a = self.regs.a;
    let c = if self.regs.c() { 1 } else { 0 };
    let result = a.wrapping_add(n).wrapping_add(c);
    self.regs.a = result;
    self.regs.set_znhc(
      result == 0,
      false,
      (a & 0xf) + (n & 0xf) + c > 0xf,
      u16::from(a) + u16::from(n) + u16::from(c) > 0xff,
    );
  }

  fn sub_a(&mut self, n: u8) {
    let a = self.regs.a;
    let result = a.wrapping_sub(n);
    self.regs.a = result;
    self
      .regs
      .set_znhc(result == 0, true, (a & 0xf) < (n & 0xf), a < n);
  }

  fn sbc_a(&mut self, n: u8) {
    let a = u16::from(self.regs.a);
    let n = u16::from(n);
    let c = if self.regs.c() { 1 } else { 0 };
    let result = a.wrapping_sub(n + c) as u8;
    self.regs.a = result;
    self.regs.set_znhc(
      result == 0,
      true,
      (a & 0xf) < (n & 0xf) + c,
      a < n + c,
    );
  }

  fn and_a(&mut self, n: u8) {
    self.regs.a &= n;
    self.regs.set_znhc(self.regs.a == 0, false, true, false);
  }

  fn xor_a(&mut self, n: u8) {
    self.regs.a ^= n;
    self.regs.set_znhc(self.regs.a == 0, false, false, false);
  }

  fn or_a(&mut self, n: u8) {
    self.regs.a |= n;
    self.regs.set_znhc(self.regs.a == 0, false, false, false);
  }

  /// Compare: SUB flags without storing the result.
  fn cp_a(&mut self, n: u8) {
    let a = self.regs.a;
    self
      .regs
      .set_znhc(a == n, true, (a & 0xf) < (n & 0xf), a < n);
  }

  /// ADD HL, nn. Half-carry is out of bit 11, carry out of bit 15; Zero is
  /// untouched.
  fn add_hl(&mut self, n: u16) {
    let hl = self.regs.hl();
    let result = u32::from(hl) + u32::from(n);
    self.regs.set_flag(Flag::Subtract, false);
    self
      .regs
      .set_flag(Flag::HalfCarry, (hl & 0xfff) + (n & 0xfff) > 0xfff);
    self.regs.set_flag(Flag::Carry, result > 0xffff);
    self.regs.set_hl(result as u16);
  }

  /// INC and DEC compute half-carry from the pre-op value and leave Carry
  /// untouched.
  fn inc8(&mut self, n: u8) -> u8 {
    let result = n.wrapping_add(1);
    self.regs.set_flag(Flag::Zero, result == 0);
    self.regs.set_flag(Flag::Subtract, false);
    self.regs.set_flag(Flag::HalfCarry, n & 0xf == 0xf);
    result
  }

  fn dec8(&mut self, n: u8) -> u8 {
    let result = n.wrapping_sub(1);
    self.regs.set_flag(Flag::Zero, result == 0);
    self.regs.set_flag(Flag::Subtract, true);
    self.regs.set_flag(Flag::HalfCarry, n & 0xf == 0);
    result
  }

  /// Decimal-adjust A after BCD arithmetic. The Subtract flag picks the
  /// correction direction; the nibble checks and incoming Carry/HalfCarry
  /// pick the 0x06/0x60 terms. Recomputes Zero and Carry, clears HalfCarry.
  fn daa(&mut self) {
    let negative = self.regs.n();
    let mut correction = 0u8;
    if self.regs.h() || (!negative && self.regs.a & 0xf > 0x9) {
      correction |= 0x06;
    }
    let carry = self.regs.c() || (!negative && self.regs.a > 0x99);
    if carry {
      correction |= 0x60;
    }

    self.regs.a = if negative {
      self.regs.a.wrapping_sub(correction)
    } else {
      self.regs.a.wrapping_add(correction)
    };

    self.regs.set_flag(Flag::Zero, self.regs.a == 0);
    self.regs.set_flag(Flag::HalfCarry, false);
    self.regs.set_flag(Flag::Carry, carry);
  }
}

impl Default for CPU {
  fn default() -> CPU {
    CPU::new()
  }
}
