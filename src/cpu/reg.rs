use crate::cpu::{Flag, Reg16, Reg8, Registers};

impl Flag {
  pub(crate) const fn mask(self) -> u8 {
    match self {
      Flag::Zero => 0x80,
      Flag::Subtract => 0x40,
      Flag::HalfCarry => 0x20,
      Flag::Carry => 0x10,
    }
  }
}

impl Registers {
  pub fn new() -> Registers {
    Registers {
      a: 0x00,
      f: 0x00,
      b: 0x00,
      c: 0x00,
      d: 0x00,
      e: 0x00,
      h: 0x00,
      l: 0x00,

      sp: 0x0000,
      pc: 0x0000,
    }
  }

  pub fn af(&self) -> u16 {
    (u16::from(self.a) << 8) | u16::from(self.f)
  }
  pub fn bc(&self) -> u16 {
    (u16::from(self.b) << 8) | u16::from(self.c)
  }
  pub fn de(&self) -> u16 {
    (u16::from(self.d) << 8) | u16::from(self.e)
  }
  pub fn hl(&self) -> u16 {
    (u16::from(self.h) << 8) | u16::from(self.l)
  }

  pub fn set_af(&mut self, value: u16) {
    self.a = (value >> 8) as u8;
    // Bits 0-3 of F do not exist on hardware.
    self.f = (value & 0xf0) as u8;
  }
  pub fn set_bc(&mut self, value: u16) {
    self.b = (value >> 8) as u8;
    self.c = (value & 0xff) as u8;
  }
  pub fn set_de(&mut self, value: u16) {
    self.d = (value >> 8) as u8;
    self.e = (value & 0xff) as u8;
  }
  pub fn set_hl(&mut self, value: u16) {
    self.h = (value >> 8) as u8;
    self.l = (value & 0xff) as u8;
  }

  pub fn hl_inc(&mut self) {
    if self.l == 0xff {
      self.h = self.h.wrapping_add(1);
    }
    self.l = self.l.wrapping_add(1);
  }
  pub fn hl_dec(&mut self) {
    if self.l == 0 {
      self.h = self.h.wrapping_sub(1);
    }
    self.l = self.l.wrapping_sub(1);
  }

  pub(crate) fn r8(&self, reg: Reg8) -> u8 {
    match reg {
      Reg8::A => self.a,
      Reg8::B => self.b,
      Reg8::C => self.c,
      Reg8::D => self.d,
      Reg8::E => self.e,
      Reg8::H => self.h,
      Reg8::L => self.l,
    }
  }
  pub(crate) fn set_r8(&mut self, reg: Reg8, value: u8) {
    match reg {
      Reg8::A => self.a = value,
      Reg8::B => self.b = value,
      Reg8::C => self.c = value,
      Reg8::D => self.d = value,
      Reg8::E => self.e = value,
      Reg8::H => self.h = value,
      Reg8::L => self.l = value,
    }
  }

  pub(crate) fn r16(&self, reg: Reg16) -> u16 {
    match reg {
      Reg16::BC => self.bc(),
      Reg16::DE => self.de(),
      Reg16::HL => self.hl(),
      Reg16::SP => self.sp,
    }
  }
  pub(crate) fn set_r16(&mut self, reg: Reg16, value: u16) {
    match reg {
      Reg16::BC => self.set_bc(value),
      Reg16::DE => self.set_de(value),
      Reg16::HL => self.set_hl(value),
      Reg16::SP => self.sp = value,
    }
  }

  /// Set or clear a single flag bit, leaving the others untouched.
  pub fn set_flag(&mut self, flag: Flag, value: bool) {
    if value {
      self.f |= flag.mask();
    } else {
      self.f &= !flag.mask();
    }
  }

  pub fn flag(&self, flag: Flag) -> bool {
    self.f & flag.mask() != 0
  }

  /// Overwrite all four flags at once.
  pub(crate) fn set_znhc(&mut self, z: bool, n: bool, h: bool, c: bool) {
    let mut f = 0;
    if z {
      f |= Flag::Zero.mask();
    }
    if n {
      f |= Flag::Subtract.mask();
    }
    if h {
      f |= Flag::HalfCarry.mask();
    }
    if c {
      f |= Flag::Carry.mask();
    }
    self.f = f;
  }

  pub fn z(&self) -> bool {
    //! Zero flag
    self.flag(Flag::Zero)
  }
  pub fn n(&self) -> bool {
    //! Subtract flag
    self.flag(Flag::Subtract)
  }
  pub fn h(&self) -> bool {
    //! Half carry flag
    self.flag(Flag::HalfCarry)
  }
  pub fn c(&self) -> bool {
    //! Carry flag
    self.flag(Flag::Carry)
  }
}

impl Default for Registers {
  fn default() -> Registers {
    Registers::new()
  }
}
