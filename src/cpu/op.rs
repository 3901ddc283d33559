//! Decoded instruction forms.
//!
//! Every implemented opcode maps to one `Op` variant tagged with its operand
//! shape. The executor drives a single exhaustive match over `Op`, so a
//! variant without semantics is a compile error rather than a silent hole in
//! a table of function pointers.

/// 8-bit register operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg8 {
  A,
  B,
  C,
  D,
  E,
  H,
  L,
}

/// 16-bit operand: a register pair or the stack pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg16 {
  BC,
  DE,
  HL,
  SP,
}

/// Second operand of an 8-bit ALU instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand8 {
  Reg(Reg8),
  /// The byte at address HL.
  HlInd,
  /// The byte following the opcode.
  Imm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
  Add,
  Adc,
  Sub,
  Sbc,
  And,
  Xor,
  Or,
  Cp,
}

/// Branch condition of a relative jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cond {
  Always,
  NotZero,
  Zero,
  NotCarry,
  Carry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
  Nop,
  Stop,
  Halt,

  /// LD r, r'
  Ld(Reg8, Reg8),
  /// LD r, d8
  LdImm(Reg8),
  /// LD r, (HL)
  LdFromHl(Reg8),
  /// LD (HL), r
  LdToHl(Reg8),
  /// LD (HL), d8
  LdHlImm,
  /// LD A, (BC) / LD A, (DE)
  LdAInd(Reg16),
  /// LD (BC), A / LD (DE), A
  LdIndA(Reg16),
  /// LD rr, d16
  LdPairImm(Reg16),
  /// LD (a16), SP
  LdAddrSp,
  /// LD (HL+), A
  LdiHlA,
  /// LD (HL-), A
  LddHlA,
  /// LD A, (HL+)
  LdiAHl,
  /// LD A, (HL-)
  LddAHl,

  /// 8-bit accumulator arithmetic and logic.
  Alu(AluOp, Operand8),
  /// ADD HL, rr
  AddHl(Reg16),

  Inc(Reg8),
  Dec(Reg8),
  /// INC (HL)
  IncHlInd,
  /// DEC (HL)
  DecHlInd,
  IncPair(Reg16),
  DecPair(Reg16),

  Rlca,
  Rrca,
  Rla,
  Rra,

  /// JR r8 / JR cc, r8
  Jr(Cond),

  Daa,
  Cpl,
  Scf,
  Ccf,
}

/// Fixed 256-slot decode table, built once and immutable afterwards.
///
/// `None` is meaningful data: the opcode is unimplemented and dispatch must
/// fail loudly on it, never no-op.
pub struct OpcodeTable {
  slots: [Option<Op>; 256],
}

impl OpcodeTable {
  pub fn new() -> OpcodeTable {
    let mut slots = [None; 256];
    for (byte, slot) in slots.iter_mut().enumerate() {
      *slot = decode(byte as u8);
    }
    OpcodeTable { slots }
  }

  pub fn lookup(&self, opcode: u8) -> Option<Op> {
    self.slots[opcode as usize]
  }
}

impl Default for OpcodeTable {
  fn default() -> OpcodeTable {
    OpcodeTable::new()
  }
}

/// Map an opcode byte to its decoded form.
///
/// Coverage is the documented families: the 0x00-0xbf block plus the eight
/// ALU-immediate encodings. Everything else (calls, returns, stack ops, the
/// 0xcb prefix page) decodes to `None`.
pub(crate) fn decode(opcode: u8) -> Option<Op> {
  use self::AluOp::*;
  use self::Operand8::Imm;

  let op = match opcode {
    0x00 => Op::Nop,
    0x01 => Op::LdPairImm(Reg16::BC),
    0x02 => Op::LdIndA(Reg16::BC),
    0x03 => Op::IncPair(Reg16::BC),
    0x04 => Op::Inc(Reg8::B),
    0x05 => Op::Dec(Reg8::B),
    0x06 => Op::LdImm(Reg8::B),
    0x07 => Op::Rlca,
    0x08 => Op::LdAddrSp,
    0x09 => Op::AddHl(Reg16::BC),
    0x0a => Op::LdAInd(Reg16::BC),
    0x0b => Op::DecPair(Reg16::BC),
    0x0c => Op::Inc(Reg8::C),
    0x0d => Op::Dec(Reg8::C),
    0x0e => Op::LdImm(Reg8::C),
    0x0f => Op::Rrca,

    0x10 => Op::Stop,
    0x11 => Op::LdPairImm(Reg16::DE),
    0x12 => Op::LdIndA(Reg16::DE),
    0x13 => Op::IncPair(Reg16::DE),
    0x14 => Op::Inc(Reg8::D),
    0x15 => Op::Dec(Reg8::D),
    0x16 => Op::LdImm(Reg8::D),
    0x17 => Op::Rla,
    0x18 => Op::Jr(Cond::Always),
    0x19 => Op::AddHl(Reg16::DE),
    0x1a => Op::LdAInd(Reg16::DE),
    0x1b => Op::DecPair(Reg16::DE),
    0x1c => Op::Inc(Reg8::E),
    0x1d => Op::Dec(Reg8::E),
    0x1e => Op::LdImm(Reg8::E),
    0x1f => Op::Rra,

    0x20 => Op::Jr(Cond::NotZero),
    0x21 => Op::LdPairImm(Reg16::HL),
    0x22 => Op::LdiHlA,
    0x23 => Op::IncPair(Reg16::HL),
    0x24 => Op::Inc(Reg8::H),
    0x25 => Op::Dec(Reg8::H),
    0x26 => Op::LdImm(Reg8::H),
    0x27 => Op::Daa,
    0x28 => Op::Jr(Cond::Zero),
    0x29 => Op::AddHl(Reg16::HL),
    0x2a => Op::LdiAHl,
    0x2b => Op::DecPair(Reg16::HL),
    0x2c => Op::Inc(Reg8::L),
    0x2d => Op::Dec(Reg8::L),
    0x2e => Op::LdImm(Reg8::L),
    0x2f => Op::Cpl,

    0x30 => Op::Jr(Cond::NotCarry),
    0x31 => Op::LdPairImm(Reg16::SP),
    0x32 => Op::LddHlA,
    0x33 => Op::IncPair(Reg16::SP),
    0x34 => Op::IncHlInd,
    0x35 => Op::DecHlInd,
    0x36 => Op::LdHlImm,
    0x37 => Op::Scf,
    0x38 => Op::Jr(Cond::Carry),
    0x39 => Op::AddHl(Reg16::SP),
    0x3a => Op::LddAHl,
    0x3b => Op::DecPair(Reg16::SP),
    0x3c => Op::Inc(Reg8::A),
    0x3d => Op::Dec(Reg8::A),
    0x3e => Op::LdImm(Reg8::A),
    0x3f => Op::Ccf,

    // LD block. 0x76 would be LD (HL), (HL); the hardware reuses the
    // encoding for HALT.
    0x76 => Op::Halt,
    0x40..=0x7f => {
      let dst = ld_target((opcode >> 3) & 0x7);
      let src = ld_target(opcode & 0x7);
      match (dst, src) {
        (Some(d), Some(s)) => Op::Ld(d, s),
        (Some(d), None) => Op::LdFromHl(d),
        (None, Some(s)) => Op::LdToHl(s),
        (None, None) => unreachable!("0x76 handled above"),
      }
    }

    // ALU block: operation in bits 5-3, operand in bits 2-0.
    0x80..=0xbf => {
      let alu = alu_op((opcode >> 3) & 0x7);
      let operand = match ld_target(opcode & 0x7) {
        Some(r) => Operand8::Reg(r),
        None => Operand8::HlInd,
      };
      Op::Alu(alu, operand)
    }

    0xc6 => Op::Alu(Add, Imm),
    0xce => Op::Alu(Adc, Imm),
    0xd6 => Op::Alu(Sub, Imm),
    0xde => Op::Alu(Sbc, Imm),
    0xe6 => Op::Alu(And, Imm),
    0xee => Op::Alu(Xor, Imm),
    0xf6 => Op::Alu(Or, Imm),
    0xfe => Op::Alu(Cp, Imm),

    _ => return None,
  };
  Some(op)
}

/// Register selector used by the LD and ALU blocks. `None` is the (HL)
/// column (index 6).
fn ld_target(bits: u8) -> Option<Reg8> {
  match bits {
    0 => Some(Reg8::B),
    1 => Some(Reg8::C),
    2 => Some(Reg8::D),
    3 => Some(Reg8::E),
    4 => Some(Reg8::H),
    5 => Some(Reg8::L),
    6 => None,
    7 => Some(Reg8::A),
    _ => unreachable!("selector is masked to 3 bits"),
  }
}

fn alu_op(bits: u8) -> AluOp {
  match bits {
    0 => AluOp::Add,
    1 => AluOp::Adc,
    2 => AluOp::Sub,
    3 => AluOp::Sbc,
    4 => AluOp::And,
    5 => AluOp::Xor,
    6 => AluOp::Or,
    7 => AluOp::Cp,
    _ => unreachable!("selector is masked to 3 bits"),
  }
}
