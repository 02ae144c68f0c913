use crate::{Assembled, SymbolTable};
use arch::{Addr, Inst, Stmt};
use color_print::cformat;

const RULE: &str =
    "-------------------------------------+-----------------------------------------------------";

pub fn print_dump(asm: &Assembled) {
    let mut code = asm.code.iter().peekable();
    let mut pc: u16 = 0;
    let mut file = "";

    for (idx, line) in asm.lines.iter().enumerate() {
        if line.file != file {
            file = line.file.as_str();
            println!(
                "{}+------[{}]{}",
                "-".repeat(37),
                file,
                "-".repeat(45usize.saturating_sub(file.len()))
            );
        }

        let comment = line
            .comment
            .as_ref()
            .map(|s| cformat!("<dim>//{}</>", s))
            .unwrap_or_default();
        let line_num = line.idx + 1;

        let body = match &line.stmt {
            None => format!("{:37}| {:>4}: {}", "", line_num, comment),
            Some(Stmt::Label(name)) => {
                let label = cformat!("<g>({})</>", name);
                format!("{:37}| {:>4}: {} {}", "", line_num, label, comment)
            }
            Some(Stmt::Inst(inst)) => {
                let word = match code.next_if(|word| word.line == idx) {
                    Some(word) => format!("{:016b} {:<12}", word.bin, disasm(word.bin)),
                    None => cformat!("<r,s>!!!!!!!!!!!!!!!! {:<12}</>", "?"),
                };
                let text = format!(
                    "[{:04X}] {} | {:>4}:   {} {}",
                    pc,
                    word,
                    line_num,
                    annotate(inst, &asm.symbols),
                    comment
                );
                pc += 1;
                text
            }
        };
        println!("{}", body);
    }
    println!("{}", RULE);
}

/// The word read back as an instruction.
fn disasm(bin: u16) -> String {
    match Inst::<u16>::from_bin(bin) {
        Some(inst) => inst.to_string(),
        None => "???".to_string(),
    }
}

fn annotate(inst: &Inst<Addr>, symbols: &SymbolTable) -> String {
    match inst {
        Inst::A(Addr::Lit(val)) => match symbols.var_at(*val) {
            Some(name) => cformat!("<y>@</>{}<dim>(={})</>", val, name),
            None => inst.cformat(),
        },
        Inst::A(Addr::Sym(name)) => match symbols.get(name) {
            Some(addr) if symbols.is_label(name) => {
                cformat!("<y>@</><g>{}</>(0x{:04X})", name, addr)
            }
            Some(addr) => cformat!("<y>@</><c>{}</>(0x{:04X})", name, addr),
            None => cformat!("<y>@</><r,u>{}</>", name),
        },
        inst => inst.cformat(),
    }
}
