use vmtr::{translate, translate_unit, Bootstrap, Config, Error};

fn assert(code: &str, expect: &[&[&str]]) {
    let groups = translate_unit("Main", code).unwrap();
    for (inst, stmts) in &groups {
        println!("// {}", inst);
        for stmt in stmts {
            println!("{}", stmt);
        }
    }
    assert_eq!(groups.len(), expect.len());
    for ((_, stmts), expect) in groups.iter().zip(expect) {
        let text: Vec<String> = stmts.iter().map(|stmt| stmt.to_string()).collect();
        assert_eq!(text, *expect);
    }
}

macro_rules! case {
    ($name:ident, $code:expr, $expect:expr) => {
        #[test]
        fn $name() {
            assert($code, &$expect);
        }
    };
}

const PUSH_D: [&str; 5] = ["@SP", "A=M", "M=D", "@SP", "M=M+1"];

case!(
    push_push_add,
    "push constant 7\npush constant 8\nadd",
    [
        &["@7", "D=A", "@SP", "A=M", "M=D", "@SP", "M=M+1"][..],
        &["@8", "D=A", "@SP", "A=M", "M=D", "@SP", "M=M+1"][..],
        &["@SP", "AM=M-1", "D=M", "A=A-1", "M=D+M"][..],
    ]
);

case!(
    unary_in_place,
    "neg\nnot",
    [
        &["@SP", "A=M-1", "M=-M"][..],
        &["@SP", "A=M-1", "M=!M"][..],
    ]
);

case!(
    compare_eq,
    "eq",
    [&[
        "@SP", "AM=M-1", "D=M", "@SP", "AM=M-1", "D=M-D", "@Main.TRUE.0", "D;JEQ", "@SP", "A=M",
        "M=0", "@Main.END.0", "0;JMP", "(Main.TRUE.0)", "@SP", "A=M", "M=-1", "(Main.END.0)",
        "@SP", "M=M+1",
    ][..]]
);

case!(
    push_local,
    "push local 2",
    [&["@2", "D=A", "@LCL", "A=D+M", "D=M", "@SP", "A=M", "M=D", "@SP", "M=M+1"][..]]
);

case!(
    pop_argument,
    "pop argument 1",
    [&[
        "@1", "D=A", "@ARG", "D=D+M", "@R13", "M=D", "@SP", "AM=M-1", "D=M", "@R13", "A=M", "M=D",
    ][..]]
);

case!(
    fixed_segments,
    "push temp 2\npop pointer 1\npush static 4",
    [
        &["@7", "D=M", "@SP", "A=M", "M=D", "@SP", "M=M+1"][..],
        &["@SP", "AM=M-1", "D=M", "@THAT", "M=D"][..],
        &["@Main.4", "D=M", "@SP", "A=M", "M=D", "@SP", "M=M+1"][..],
    ]
);

case!(
    branches,
    "label LOOP\ngoto LOOP\nif-goto LOOP",
    [
        &["(Main$LOOP)"][..],
        &["@Main$LOOP", "0;JMP"][..],
        &["@SP", "AM=M-1", "D=M", "@Main$LOOP", "D;JNE"][..],
    ]
);

case!(
    function_zeroes_locals,
    "function Main.f 2",
    [&[
        "(Main.f)", "@SP", "A=M", "M=0", "@SP", "M=M+1", "@SP", "A=M", "M=0", "@SP", "M=M+1",
    ][..]]
);

case!(
    call_saves_frame,
    "call Foo.bar 2",
    [&[
        "@Main.RETURN.0", "D=A", "@SP", "A=M", "M=D", "@SP", "M=M+1",
        "@LCL", "D=M", "@SP", "A=M", "M=D", "@SP", "M=M+1",
        "@ARG", "D=M", "@SP", "A=M", "M=D", "@SP", "M=M+1",
        "@THIS", "D=M", "@SP", "A=M", "M=D", "@SP", "M=M+1",
        "@THAT", "D=M", "@SP", "A=M", "M=D", "@SP", "M=M+1",
        "@SP", "D=M", "@5", "D=D-A", "@2", "D=D-A", "@ARG", "M=D",
        "@SP", "D=M", "@LCL", "M=D",
        "@Foo.bar", "0;JMP", "(Main.RETURN.0)",
    ][..]]
);

#[test]
fn push_sequence_shape() {
    let groups = translate_unit("Main", "push constant 1").unwrap();
    let text: Vec<String> = groups[0].1.iter().map(|stmt| stmt.to_string()).collect();
    assert_eq!(&text[2..], PUSH_D);
}

fn units(list: &[(&str, &str)]) -> Vec<(String, String)> {
    list.iter()
        .map(|(name, code)| (name.to_string(), code.to_string()))
        .collect()
}

#[test]
fn entry_unit_first_with_bootstrap() {
    let asm = translate(
        &units(&[("Main", "function Main.main 0\n"), ("Sys", "function Sys.init 0\n")]),
        &Config::default(),
    )
    .unwrap();
    let lines: Vec<&str> = asm.lines().collect();
    assert_eq!(lines[0], "// bootstrap");
    assert_eq!(&lines[1..5], ["@256", "D=A", "@SP", "M=D"]);
    assert!(lines.contains(&"@Sys.init"));
    let sys = lines.iter().position(|line| *line == "(Sys.init)").unwrap();
    let main = lines.iter().position(|line| *line == "(Main.main)").unwrap();
    let halt = lines.iter().position(|line| *line == "($halt)").unwrap();
    assert!(halt < sys && sys < main);
}

#[test]
fn standalone_unit_ends_with_halt() {
    let asm = translate(&units(&[("Main", "push constant 1\n")]), &Config::default()).unwrap();
    assert!(!asm.contains("@256"));
    assert!(asm.starts_with("// push constant 1\n@1\n"));
    assert!(asm.ends_with("// halt\n($halt)\n@$halt\n0;JMP\n"));
}

#[test]
fn configured_bootstrap() {
    let config = Config {
        stack_base: 300,
        entry_function: "Main.main".to_string(),
        bootstrap: Bootstrap::Always,
        halt_loop: false,
        annotate: false,
        ..Config::default()
    };
    let asm = translate(&units(&[("Main", "function Main.main 0\n")]), &config).unwrap();
    assert!(asm.starts_with("@300\nD=A\n@SP\nM=D\n@$boot.RETURN.0\n"));
    assert!(asm.contains("@Main.main\n0;JMP\n($boot.RETURN.0)\n(Main.main)\n"));
    assert!(!asm.contains("$halt"));
    assert!(!asm.contains("//"));
}

#[test]
fn labels_do_not_collide_across_units() {
    let config = Config {
        bootstrap: Bootstrap::Never,
        ..Config::default()
    };
    let asm = translate(&units(&[("A", "eq\nlabel L\n"), ("B", "eq\nlabel L\n")]), &config).unwrap();
    for label in ["(A.TRUE.0)", "(B.TRUE.0)", "(A$L)", "(B$L)"] {
        assert_eq!(asm.lines().filter(|line| *line == label).count(), 1);
    }
}

#[test]
fn error_names_unit_and_line() {
    let err = translate(
        &units(&[("Main", "push constant 1\npop constant 0\n")]),
        &Config::default(),
    )
    .unwrap_err();
    assert_eq!(err.location(), Some(("Main.vm", 2)));
    assert!(matches!(err.kind(), Error::PopConstant));
}

#[test]
fn several_units_need_the_entry_unit() {
    let program = units(&[
        ("Ball", "function Ball.f 0\npush constant 1\nreturn\n"),
        ("Main", "function Main.main 0\ncall Ball.f 0\nreturn\n"),
    ]);
    let err = translate(&program, &Config::default()).unwrap_err();
    assert!(matches!(
        err.kind(),
        Error::MissingEntry { entry, units: 2 } if entry == "Sys"
    ));

    // Naming another entry unit links them with a bootstrap.
    let config = Config {
        entry_unit: "Main".to_string(),
        entry_function: "Main.main".to_string(),
        ..Config::default()
    };
    let asm = translate(&program, &config).unwrap();
    assert!(asm.starts_with("// bootstrap\n@256\nD=A\n@SP\nM=D\n"));
    assert!(asm.contains("@Main.main\n0;JMP\n"));
    let main = asm.find("(Main.main)").unwrap();
    let ball = asm.find("(Ball.f)").unwrap();
    assert!(main < ball);
}
