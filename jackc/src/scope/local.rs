use indexmap::IndexMap;

use super::{ClassScope, Entry, Kind, SubroutineKind};
use crate::error::Error;

/// Bindings of one subroutine (`argument`, `local`) on top of its class.
pub struct Local<'c> {
    class: &'c ClassScope,
    name: String,
    kind: SubroutineKind,
    vars: IndexMap<String, Entry>,
}

impl<'c> Local<'c> {
    pub fn fork(class: &'c ClassScope, sub: &str, kind: SubroutineKind) -> Self {
        Self {
            class,
            name: format!("{}.{}", class.name(), sub),
            kind,
            vars: IndexMap::new(),
        }
    }

    /// Qualified name, `Class.subroutine`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SubroutineKind {
        self.kind
    }

    pub fn class(&self) -> &'c ClassScope {
        self.class
    }

    pub fn var_count(&self, kind: Kind) -> u16 {
        self.vars.values().filter(|entry| entry.kind == kind).count() as u16
    }

    /// Methods keep argument 0 for the receiver.
    pub fn define(&mut self, name: &str, ty: &str, kind: Kind) -> Result<&Entry, Error> {
        if self.vars.contains_key(name) {
            return Err(Error::DuplicateSymbol {
                name: name.to_string(),
                scope: self.name.clone(),
                token: None,
            });
        }
        let offset = match (kind, self.kind) {
            (Kind::Argument, SubroutineKind::Method) => 1,
            _ => 0,
        };
        let entry = Entry {
            ty: ty.to_string(),
            kind,
            index: self.var_count(kind) + offset,
        };
        Ok(&*self.vars.entry(name.to_string()).or_insert(entry))
    }

    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        self.vars.get(name).or_else(|| self.class.get(name))
    }

    pub fn resolve(&self, name: &str) -> Result<&Entry, Error> {
        self.lookup(name).ok_or_else(|| Error::UnknownSymbol {
            name: name.to_string(),
            scope: self.name.clone(),
            token: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class() -> ClassScope {
        let mut class = ClassScope::new("Point");
        class.define("x", "int", Kind::Field).unwrap();
        class.define("y", "int", Kind::Field).unwrap();
        class
    }

    #[test]
    fn method_arguments_skip_receiver() {
        let class = class();
        let mut local = Local::fork(&class, "dist", SubroutineKind::Method);
        assert_eq!(local.define("other", "Point", Kind::Argument).unwrap().index, 1);
        assert_eq!(local.define("dx", "int", Kind::Local).unwrap().index, 0);

        let mut local = Local::fork(&class, "new", SubroutineKind::Constructor);
        assert_eq!(local.define("ax", "int", Kind::Argument).unwrap().index, 0);
    }

    #[test]
    fn local_shadows_class() {
        let class = class();
        let mut local = Local::fork(&class, "f", SubroutineKind::Function);
        local.define("x", "boolean", Kind::Local).unwrap();
        assert_eq!(local.resolve("x").unwrap().kind, Kind::Local);
        assert_eq!(local.resolve("y").unwrap().kind, Kind::Field);
        assert!(matches!(
            local.resolve("z"),
            Err(Error::UnknownSymbol { .. })
        ));
        assert!(matches!(
            local.define("x", "int", Kind::Argument),
            Err(Error::DuplicateSymbol { .. })
        ));
    }

    #[test]
    fn fresh_scope_per_subroutine() {
        let class = class();
        let mut first = Local::fork(&class, "a", SubroutineKind::Function);
        first.define("i", "int", Kind::Local).unwrap();
        let second = Local::fork(&class, "b", SubroutineKind::Function);
        assert!(second.lookup("i").is_none());
        assert_eq!(second.var_count(Kind::Local), 0);
        assert_eq!(second.name(), "Point.b");
    }
}
