use arch::{symbols::predefined, SCREEN, VAR_BASE};
use bimap::BiMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Labels bound in the first pass and variables allocated in the second.
/// Predefined symbols are consulted but never stored.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    labels: IndexMap<String, u16>,
    vars: BiMap<String, u16>,
    next: u16,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            labels: IndexMap::new(),
            vars: BiMap::new(),
            next: VAR_BASE,
        }
    }

    pub fn define_label(&mut self, name: &str, addr: u16) -> Result<(), Error> {
        if predefined(name).is_some() || self.labels.contains_key(name) {
            return Err(Error::DuplicateLabel(name.to_string()));
        }
        self.labels.insert(name.to_string(), addr);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        predefined(name)
            .or_else(|| self.labels.get(name).copied())
            .or_else(|| self.vars.get_by_left(name).copied())
    }

    /// Address of `name`, allocating the next free variable slot when the
    /// name is not yet bound.
    pub fn resolve(&mut self, name: &str) -> Result<u16, Error> {
        if let Some(addr) = self.get(name) {
            return Ok(addr);
        }
        if self.next >= SCREEN {
            return Err(Error::OutOfMemory(name.to_string()));
        }
        let addr = self.next;
        self.vars.insert(name.to_string(), addr);
        self.next += 1;
        Ok(addr)
    }

    pub fn is_label(&self, name: &str) -> bool {
        self.labels.contains_key(name)
    }

    /// Variable allocated at `addr`, if any.
    pub fn var_at(&self, addr: u16) -> Option<&str> {
        self.vars.get_by_right(&addr).map(|name| name.as_str())
    }

    pub fn labels(&self) -> &IndexMap<String, u16> {
        &self.labels
    }

    /// Variables in allocation order.
    pub fn variables(&self) -> Vec<(&str, u16)> {
        let mut vars: Vec<(&str, u16)> = self
            .vars
            .iter()
            .map(|(name, addr)| (name.as_str(), *addr))
            .collect();
        vars.sort_by_key(|(_, addr)| *addr);
        vars
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymbolMap {
    pub labels: IndexMap<String, u16>,
    pub variables: IndexMap<String, u16>,
}

impl SymbolMap {
    pub fn generate(table: &SymbolTable) -> Self {
        SymbolMap {
            labels: table.labels().clone(),
            variables: table
                .variables()
                .into_iter()
                .map(|(name, addr)| (name.to_string(), addr))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variables_from_base() {
        let mut table = SymbolTable::new();
        assert_eq!(table.resolve("i").unwrap(), 16);
        assert_eq!(table.resolve("sum").unwrap(), 17);
        assert_eq!(table.resolve("i").unwrap(), 16);
        assert_eq!(table.resolve("SCREEN").unwrap(), 16384);
        assert_eq!(table.resolve("R3").unwrap(), 3);
        assert_eq!(table.var_at(17), Some("sum"));
        assert_eq!(table.variables(), vec![("i", 16), ("sum", 17)]);
    }

    #[test]
    fn labels_shadow_variables() {
        let mut table = SymbolTable::new();
        table.define_label("LOOP", 4).unwrap();
        assert_eq!(table.resolve("LOOP").unwrap(), 4);
        assert_eq!(table.resolve("x").unwrap(), 16);
        assert!(table.is_label("LOOP"));
    }

    #[test]
    fn duplicate_labels() {
        let mut table = SymbolTable::new();
        table.define_label("END", 0).unwrap();
        assert!(matches!(
            table.define_label("END", 3),
            Err(Error::DuplicateLabel(_))
        ));
        assert!(matches!(
            table.define_label("SP", 3),
            Err(Error::DuplicateLabel(_))
        ));
    }

    #[test]
    fn variable_memory_exhausted() {
        let mut table = SymbolTable::new();
        for i in VAR_BASE..SCREEN {
            table.resolve(&format!("v{}", i)).unwrap();
        }
        assert!(matches!(table.resolve("one_more"), Err(Error::OutOfMemory(_))));
    }
}
