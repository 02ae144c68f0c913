use crate::{reg::Reg, KBD, SCREEN};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use strum::IntoEnumIterator;

/// Symbols every assembly program can use without declaring them.
///
/// `R0`..`R15` alias the first sixteen words; `SP`, `LCL`, `ARG`, `THIS` and
/// `THAT` alias words 0..4.
pub static PREDEFINED: Lazy<IndexMap<String, u16>> = Lazy::new(|| {
    let mut map = IndexMap::new();
    for r in 0..16u16 {
        map.insert(format!("R{r}"), r);
    }
    map.insert("SCREEN".to_string(), SCREEN);
    map.insert("KBD".to_string(), KBD);
    for reg in Reg::iter().filter(|reg| reg.addr() <= Reg::THAT.addr()) {
        map.insert(reg.to_string(), reg.addr());
    }
    map
});

pub fn predefined(name: &str) -> Option<u16> {
    PREDEFINED.get(name).copied()
}

/// Whether `name` is a legal user symbol: letters, digits, `_`, `.`, `$`
/// and `:`, not starting with a digit.
pub fn is_symbol(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(ch) if ch.is_ascii_digit() => false,
        Some(_) => name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '$' | ':')),
        None => false,
    }
}
