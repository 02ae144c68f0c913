//! Minimal Hack CPU for checking translated programs in tests.

use arch::Jump;

pub struct Cpu {
    pub a: u16,
    pub d: u16,
    pub pc: u16,
    pub ram: Vec<u16>,
    rom: Vec<u16>,
}

impl Cpu {
    /// Load binary text (one 16-character word per line).
    pub fn load(hack: &str) -> Self {
        let rom = hack
            .lines()
            .map(|line| u16::from_str_radix(line, 2).unwrap())
            .collect();
        Cpu {
            a: 0,
            d: 0,
            pc: 0,
            ram: vec![0; 0x10000],
            rom,
        }
    }

    pub fn step(&mut self) {
        let word = self.rom[self.pc as usize];
        if word & 0x8000 == 0 {
            self.a = word;
            self.pc += 1;
            return;
        }

        let x = self.d;
        let y = if word & 0x1000 != 0 {
            self.ram[self.a as usize]
        } else {
            self.a
        };
        let c = (word >> 6) & 0x3F;
        let x = if c & 0x20 != 0 { 0 } else { x };
        let x = if c & 0x10 != 0 { !x } else { x };
        let y = if c & 0x08 != 0 { 0 } else { y };
        let y = if c & 0x04 != 0 { !y } else { y };
        let out = if c & 0x02 != 0 { x.wrapping_add(y) } else { x & y };
        let out = if c & 0x01 != 0 { !out } else { out };

        let addr = self.a;
        let dest = (word >> 3) & 0x7;
        if dest & 0b001 != 0 {
            self.ram[addr as usize] = out;
        }
        if dest & 0b100 != 0 {
            self.a = out;
        }
        if dest & 0b010 != 0 {
            self.d = out;
        }

        let jump = Jump::try_from((word & 0x7) as u8).unwrap();
        if jump.taken(out as i16) {
            self.pc = addr;
        } else {
            self.pc += 1;
        }
    }

    /// Run until the program counter reaches `stop`.
    pub fn run_until(&mut self, stop: u16, max_steps: usize) {
        for _ in 0..max_steps {
            if self.pc == stop {
                return;
            }
            self.step();
        }
        panic!("did not reach {} within {} steps (pc = {})", stop, max_steps, self.pc);
    }
}
