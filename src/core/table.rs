// File: src/core/table.rs
use crate::core::hash::stable_hash;
use crate::core::ranked::RankedFrequencyList;
use crate::core::types::Context;
use crate::error::{Result, ShannonError};
use serde::Serialize;
use std::fmt;

/// Stores a context:successors pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrefixEntry {
    pub context: Context,
    pub successors: RankedFrequencyList,
}

impl fmt::Display for PrefixEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PfI('{}': {})", self.context, self.successors)
    }
}

/// A fixed-capacity hash table from contexts to their successor lists.
///
/// Collisions are resolved by linear probing from
/// `stable_hash(context) % slots`, wrapping at the end. The table never
/// grows and never deletes, so the first empty slot along that sequence
/// proves the context is absent.
#[derive(Debug, Clone, Serialize)]
pub struct PrefixTable {
    slots: Vec<Option<PrefixEntry>>,
    items: usize,
}

impl PrefixTable {
    /// Creates a table with `slots` slots. The table cannot store more
    /// contexts than this.
    pub fn new(slots: usize) -> Result<Self> {
        if slots == 0 {
            return Err(ShannonError::ZeroCapacity);
        }
        Ok(Self {
            slots: vec![None; slots],
            items: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items == 0
    }

    pub fn load_factor(&self) -> f64 {
        self.items as f64 / self.slots.len() as f64
    }

    /// Stores `successors` under `context` in the first free slot along its
    /// search sequence. Returns `false`, leaving the table untouched, when
    /// every slot is taken.
    ///
    /// No duplicate check is made; callers fetch first.
    pub fn store(&mut self, context: Context, successors: RankedFrequencyList) -> bool {
        if self.items == self.slots.len() {
            return false;
        }
        let mut index = self.home(&context);
        while self.slots[index].is_some() {
            index = (index + 1) % self.slots.len();
        }
        self.slots[index] = Some(PrefixEntry { context, successors });
        self.items += 1;
        true
    }

    /// Returns the successors stored for `context`.
    pub fn fetch(&self, context: &Context) -> Option<&RankedFrequencyList> {
        self.locate(context)
            .and_then(|i| self.slots[i].as_ref())
            .map(|entry| &entry.successors)
    }

    pub fn fetch_mut(&mut self, context: &Context) -> Option<&mut RankedFrequencyList> {
        let index = self.locate(context)?;
        self.slots[index].as_mut().map(|entry| &mut entry.successors)
    }

    pub fn contains(&self, context: &Context) -> bool {
        self.fetch(context).is_some()
    }

    /// Every slot in index order, for diagnostic dumps.
    pub fn slots(&self) -> impl Iterator<Item = (usize, Option<&PrefixEntry>)> + '_ {
        self.slots.iter().enumerate().map(|(i, slot)| (i, slot.as_ref()))
    }

    fn home(&self, context: &Context) -> usize {
        stable_hash(&context.as_string()) as usize % self.slots.len()
    }

    /// Visits at most `slots` positions, stopping early at an empty slot.
    fn locate(&self, context: &Context) -> Option<usize> {
        let mut index = self.home(context);
        for _ in 0..self.slots.len() {
            match &self.slots[index] {
                None => return None,
                Some(entry) if entry.context == *context => return Some(index),
                Some(_) => index = (index + 1) % self.slots.len(),
            }
        }
        None
    }
}

impl fmt::Display for PrefixTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Prefix hash Table\n-----------------")?;
        for (i, slot) in self.slots() {
            match slot {
                Some(entry) => write!(f, "\n{i:5}: {entry}")?,
                None => write!(f, "\n{i:5}: None")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(s: &str) -> Context {
        Context::trailing(s).unwrap()
    }

    fn list(pairs: &[(char, u64)]) -> RankedFrequencyList {
        let mut l = RankedFrequencyList::new();
        for &(s, n) in pairs {
            l.increment_or_insert(s, n);
        }
        l
    }

    #[test]
    fn zero_slots_rejected() {
        assert!(matches!(PrefixTable::new(0), Err(ShannonError::ZeroCapacity)));
    }

    #[test]
    fn single_slot_table() {
        let mut p = PrefixTable::new(1).unwrap();
        assert!(p.store(ctx("th"), RankedFrequencyList::new()));
        assert_eq!(
            p.to_string(),
            "Prefix hash Table\n-----------------\n    0: PfI('th': SFL())"
        );
        assert!(!p.store(ctx("ca"), RankedFrequencyList::new()));
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn accepts_exactly_capacity_stores() {
        let mut r = PrefixTable::new(5).unwrap();
        for c in ["aa", "ab", "ac", "ac", "ad"] {
            assert!(r.store(ctx(c), RankedFrequencyList::new()));
        }
        let before = r.to_string();
        assert!(!r.store(ctx("ae"), RankedFrequencyList::new()));
        assert!(!r.store(ctx("af"), RankedFrequencyList::new()));
        assert_eq!(r.to_string(), before);
        assert_eq!(r.len(), 5);
    }

    #[test]
    fn fetch_returns_stored_list() {
        let mut p = PrefixTable::new(1).unwrap();
        assert!(p.store(ctx("th"), list(&[('e', 40), ('o', 10)])));
        assert_eq!(p.fetch(&ctx("th")).unwrap().to_string(), "SFL(<'e': 40>, <'o': 10>)");
        assert!(p.fetch(&ctx("ca")).is_none());

        let mut t = PrefixTable::new(5).unwrap();
        assert!(t.store(ctx("aa"), list(&[('e', 20), ('r', 10), ('a', 15)])));
        assert!(t.store(ctx("ab"), list(&[('r', 30), ('w', 20)])));
        assert_eq!(t.fetch(&ctx("ab")), Some(&list(&[('r', 30), ('w', 20)])));
        assert!(!t.contains(&ctx("rr")));
    }

    #[test]
    fn colliding_contexts_step_forward_and_wrap() {
        let mut t = PrefixTable::new(3).unwrap();
        for c in ["th", "he", "er"] {
            assert!(t.store(ctx(c), list(&[('x', 1)])));
        }
        for c in ["th", "he", "er"] {
            assert!(t.contains(&ctx(c)), "missing {c}");
        }
        assert_eq!(t.slots().filter(|(_, s)| s.is_some()).count(), 3);
    }

    #[test]
    fn fetch_mut_updates_in_place() {
        let mut t = PrefixTable::new(4).unwrap();
        assert!(t.store(ctx("ff"), list(&[(' ', 1)])));
        t.fetch_mut(&ctx("ff")).unwrap().increment_or_insert(' ', 1);
        assert_eq!(t.fetch(&ctx("ff")).unwrap().find(' ').map(|e| e.count), Some(2));
    }
}
