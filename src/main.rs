use std::fs;

use anyhow::{Context, Result};
use clap::{App, Arg};
use log::debug;

use gboy::{FlatMemory, CPU};

fn main() -> Result<()> {
  env_logger::init()?;

  let matches = App::new("gboy")
    .about("Run a raw program image on the CPU core")
    .arg(
      Arg::with_name("image")
        .help("Raw binary image loaded at address 0")
        .required(true),
    )
    .arg(
      Arg::with_name("steps")
        .short("n")
        .long("steps")
        .takes_value(true)
        .help("Maximum number of instructions to execute"),
    )
    .arg(
      Arg::with_name("pc")
        .long("pc")
        .takes_value(true)
        .help("Initial program counter (hex)"),
    )
    .get_matches();

  let path = matches.value_of("image").unwrap();
  let steps: u64 = matches
    .value_of("steps")
    .unwrap_or("100000")
    .parse()
    .context("--steps must be a number")?;
  let pc = match matches.value_of("pc") {
    Some(s) => u16::from_str_radix(s.trim_start_matches("0x"), 16)
      .context("--pc must be a hex address")?,
    None => 0,
  };

  let image =
    fs::read(path).with_context(|| format!("failed to read {}", path))?;

  let mut mem = FlatMemory::new(0x10000);
  mem.load(0, &image);

  let mut cpu = CPU::new();
  cpu.regs.pc = pc;

  let mut total_t: u64 = 0;
  for executed in 0..steps {
    if cpu.halted || cpu.stopped {
      println!("machine idle after {} instructions", executed);
      break;
    }
    let clocks = cpu.step(&mut mem)?;
    total_t += u64::from(clocks.t);
    debug!(
      "pc={:#06x} af={:#06x} bc={:#06x} de={:#06x} hl={:#06x} sp={:#06x} t={}",
      cpu.regs.pc,
      cpu.regs.af(),
      cpu.regs.bc(),
      cpu.regs.de(),
      cpu.regs.hl(),
      cpu.regs.sp,
      clocks.t,
    );
  }

  println!(
    "a={:#04x} f={:#04x} bc={:#06x} de={:#06x} hl={:#06x} pc={:#06x} \
     sp={:#06x} t-states={}",
    cpu.regs.a,
    cpu.regs.f,
    cpu.regs.bc(),
    cpu.regs.de(),
    cpu.regs.hl(),
    cpu.regs.pc,
    cpu.regs.sp,
    total_t,
  );
  Ok(())
}
