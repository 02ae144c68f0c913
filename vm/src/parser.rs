/// A non-blank source line split into whitespace-separated fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 0-based line number in the source text.
    pub idx: usize,
    pub fields: Vec<String>,
}

/// Split intermediate text into lines of fields. Comments and blank lines
/// are dropped; nothing else is checked.
pub fn parse(text: &str) -> Vec<Line> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let code = raw.split("//").next().unwrap_or("");
            let fields: Vec<String> = code.split_whitespace().map(str::to_string).collect();
            (!fields.is_empty()).then_some(Line { idx, fields })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields() {
        let lines = parse("// header\n\npush constant 7   // seven\n  add\nbogus x y z\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].idx, 2);
        assert_eq!(lines[0].fields, vec!["push", "constant", "7"]);
        assert_eq!(lines[1].fields, vec!["add"]);
        assert_eq!(lines[2].fields, vec!["bogus", "x", "y", "z"]);
    }
}
