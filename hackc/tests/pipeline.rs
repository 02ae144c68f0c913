#[path = "../../vm/tests/cpu/mod.rs"]
mod cpu;

use cpu::Cpu;
use hackc::{build, Error};
use vmtr::{Bootstrap, Config};

const RESULT: usize = 8000;

const SYS: &str = "
class Sys {
    function void init() {
        var Array out;
        let out = 8000;
        let out[0] = Main.main();
        while (true) { }
        return;
    }
}";

/// Bump allocator from the start of the heap.
const MEMORY: &str = "
class Memory {
    static int next;
    function int alloc(int size) {
        var int block;
        if (next = 0) { let next = 2048; }
        let block = next;
        let next = next + size;
        return block;
    }
}";

const POINT: &str = "
class Point {
    field int x, y;
    constructor Point new(int ax, int ay) {
        let x = ax;
        let y = ay;
        return this;
    }
    method int sum() { return x + y; }
    method void shift(int d) {
        let x = x + d;
        return;
    }
}";

fn sources(main: &str) -> Vec<(String, String)> {
    [("Sys", SYS), ("Memory", MEMORY), ("Point", POINT), ("Main", main)]
        .iter()
        .map(|(name, code)| (format!("{}.jack", name), code.to_string()))
        .collect()
}

/// Build and run until `Sys.init` reaches its idle loop.
fn assert(main: &str, expect: u16) {
    let artifacts = build(&sources(main), &Config::default()).unwrap();
    let stop = artifacts.symbols.labels["Sys$Sys.init$WHILE_COND.0"];

    let mut cpu = Cpu::load(&artifacts.hack);
    cpu.run_until(stop, 1_000_000);
    assert_eq!(cpu.ram[RESULT], expect);
}

macro_rules! case {
    ($name:ident, $main:expr, $expect:expr) => {
        #[test]
        fn $name() {
            assert($main, $expect as u16);
        }
    };
}

case!(
    constant,
    "class Main { function int main() { return 42; } }",
    42
);

case!(
    recursion,
    "class Main {
        function int fib(int n) {
            if (n < 2) { return n; }
            return Main.fib(n - 1) + fib(n - 2);
        }
        function int main() { return fib(10); }
    }",
    55
);

case!(
    objects,
    "class Main {
        function int main() {
            var Point p;
            let p = Point.new(3, 4);
            do p.shift(10);
            return p.sum();
        }
    }",
    17
);

case!(
    array_loop,
    "class Main {
        function int main() {
            var Array a;
            var int i, sum;
            let a = Memory.alloc(5);
            let i = 0;
            while (i < 5) {
                let a[i] = i + 1;
                let i = i + 1;
            }
            let i = 0;
            while (i < 5) {
                let sum = sum + a[i];
                let i = i + 1;
            }
            return sum;
        }
    }",
    15
);

case!(
    array_store_uses_index_before_rhs,
    "class Main {
        static int i;
        function int next() {
            let i = i + 1;
            return i;
        }
        function int main() {
            var Array a;
            let a = Memory.alloc(4);
            let i = 1;
            let a[i] = Main.next();
            return a[1];
        }
    }",
    2
);

case!(
    booleans,
    "class Main {
        function boolean main() { return ~(1 = 2) & (3 > 2); }
    }",
    0xFFFF
);

case!(
    negative_arithmetic,
    "class Main {
        function int main() { return 3 - 5; }
    }",
    0xFFFE
);

#[test]
fn units_keep_input_order() {
    let main = "class Main { function int main() { return 0; } }";
    let artifacts = build(&sources(main), &Config::default()).unwrap();
    let classes: Vec<&str> = artifacts.vm.iter().map(|(class, _)| class.as_str()).collect();
    assert_eq!(classes, ["Sys", "Memory", "Point", "Main"]);
    assert!(artifacts.vm[3].1.starts_with("function Main.main 0\n"));
    // Bootstrap first: SP = 256
    assert!(artifacts.asm.starts_with("// bootstrap\n@256\n"));
}

#[test]
fn deterministic() {
    let main = "class Main { function int main() { return 7; } }";
    let first = build(&sources(main), &Config::default()).unwrap();
    let second = build(&sources(main), &Config::default()).unwrap();
    assert_eq!(first.hack, second.hack);
    assert_eq!(first.to_yaml().unwrap(), second.to_yaml().unwrap());
}

#[test]
fn report_lists_artifacts() {
    let main = "class Main { function int main() { return 7; } }";
    let yaml = build(&sources(main), &Config::default())
        .unwrap()
        .to_yaml()
        .unwrap();
    assert!(yaml.contains("vm:"));
    assert!(yaml.contains("asm:"));
    assert!(yaml.contains("hack:"));
    assert!(yaml.contains("labels:"));
}

#[test]
fn without_bootstrap() {
    let config = Config {
        bootstrap: Bootstrap::Never,
        ..Config::default()
    };
    let sources = vec![(
        "Main.jack".to_string(),
        "class Main { function void main() { return; } }".to_string(),
    )];
    let artifacts = build(&sources, &config).unwrap();
    assert!(artifacts.asm.starts_with("// function Main.main 0\n"));
    assert!(artifacts.hack.lines().all(|line| line.len() == 16));
}

#[test]
fn compile_error_stops_the_build() {
    let sources = vec![(
        "Main.jack".to_string(),
        "class Main { function void main() { let x = 1; return; } }".to_string(),
    )];
    match build(&sources, &Config::default()) {
        Err(Error::Compile(jackc::Error::UnknownSymbol { name, .. })) => assert_eq!(name, "x"),
        other => panic!("unexpected result: {:?}", other.map(|a| a.hack)),
    }
}

#[test]
fn several_classes_need_sys() {
    let main = "class Main { function int main() { return 0; } }";
    let sources: Vec<(String, String)> = [("Point", POINT), ("Main", main)]
        .iter()
        .map(|(name, code)| (format!("{}.jack", name), code.to_string()))
        .collect();
    match build(&sources, &Config::default()) {
        Err(Error::Translate(err)) => assert!(
            matches!(err.kind(), vmtr::Error::MissingEntry { entry, units: 2 } if entry == "Sys"),
            "unexpected error: {:?}",
            err
        ),
        other => panic!("unexpected result: {:?}", other.map(|a| a.hack)),
    }
}
