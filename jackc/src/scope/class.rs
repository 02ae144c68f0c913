use indexmap::IndexMap;

use super::{Entry, Kind, Signature};
use crate::error::Error;

/// Class-level bindings (`static`, `field`) and the signatures of every
/// subroutine of the class.
#[derive(Debug, Clone)]
pub struct ClassScope {
    name: String,
    vars: IndexMap<String, Entry>,
    subs: IndexMap<String, Signature>,
}

impl ClassScope {
    pub fn new(name: &str) -> Self {
        ClassScope {
            name: name.to_string(),
            vars: IndexMap::new(),
            subs: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn define(&mut self, name: &str, ty: &str, kind: Kind) -> Result<&Entry, Error> {
        if self.vars.contains_key(name) {
            return Err(Error::DuplicateSymbol {
                name: name.to_string(),
                scope: format!("class {}", self.name),
                token: None,
            });
        }
        let entry = Entry {
            ty: ty.to_string(),
            kind,
            index: self.var_count(kind),
        };
        Ok(&*self.vars.entry(name.to_string()).or_insert(entry))
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.vars.get(name)
    }

    pub fn var_count(&self, kind: Kind) -> u16 {
        self.vars.values().filter(|entry| entry.kind == kind).count() as u16
    }

    pub fn register(&mut self, name: &str, sig: Signature) -> Result<(), Error> {
        if self.subs.contains_key(name) {
            return Err(Error::DuplicateSymbol {
                name: name.to_string(),
                scope: format!("class {}", self.name),
                token: None,
            });
        }
        self.subs.insert(name.to_string(), sig);
        Ok(())
    }

    pub fn signature(&self, name: &str) -> Option<&Signature> {
        self.subs.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::SubroutineKind;

    #[test]
    fn per_kind_indices() {
        let mut class = ClassScope::new("Point");
        assert_eq!(class.define("x", "int", Kind::Field).unwrap().index, 0);
        assert_eq!(class.define("count", "int", Kind::Static).unwrap().index, 0);
        assert_eq!(class.define("y", "int", Kind::Field).unwrap().index, 1);
        assert_eq!(class.var_count(Kind::Field), 2);
        assert_eq!(class.var_count(Kind::Static), 1);
        assert!(matches!(
            class.define("x", "boolean", Kind::Static),
            Err(Error::DuplicateSymbol { .. })
        ));
    }

    #[test]
    fn signatures() {
        let mut class = ClassScope::new("Point");
        let sig = Signature {
            kind: SubroutineKind::Method,
            ret: "int".to_string(),
            n_args: 2,
            n_locals: 0,
        };
        class.register("dist", sig.clone()).unwrap();
        assert_eq!(class.signature("dist").map(Signature::arity), Some(3));
        assert!(class.register("dist", sig).is_err());
        assert!(class.signature("norm").is_none());
    }
}
