//! Ordered rule collection.

use std::ops::{Index, IndexMut};

use canvas_model::{CssRule, RuleDescriptor};

/// Rules in insertion order.
///
/// The store is a plain container: it appends whatever it is given and
/// never checks for duplicate identities. Use
/// [`Composer::add`](crate::Composer::add) for create-if-absent semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleStore {
    rules: Vec<CssRule>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_descriptors(descriptors: &[RuleDescriptor]) -> Self {
        let mut store = Self::new();
        store.add_all(descriptors);
        store
    }

    /// Append a rule built from a descriptor.
    pub fn add(&mut self, descriptor: &RuleDescriptor) -> &mut CssRule {
        self.push(CssRule::from(descriptor))
    }

    /// Append one rule per descriptor.
    pub fn add_all(&mut self, descriptors: &[RuleDescriptor]) {
        self.rules.extend(descriptors.iter().map(CssRule::from));
    }

    /// Append a rule and return a reference to it.
    pub fn push(&mut self, rule: CssRule) -> &mut CssRule {
        let index = self.rules.len();
        self.rules.push(rule);
        &mut self.rules[index]
    }

    /// Replace every rule with rules built from `descriptors`.
    pub fn reset(&mut self, descriptors: &[RuleDescriptor]) {
        self.rules = descriptors.iter().map(CssRule::from).collect();
    }

    /// Visit every rule in order.
    pub fn each<F>(&self, visitor: F)
    where
        F: FnMut(&CssRule),
    {
        self.rules.iter().for_each(visitor);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CssRule> {
        self.rules.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, CssRule> {
        self.rules.iter_mut()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CssRule> {
        self.rules.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut CssRule> {
        self.rules.get_mut(index)
    }

    /// Snapshot of every rule, in order.
    pub fn descriptors(&self) -> Vec<RuleDescriptor> {
        self.rules.iter().map(CssRule::to_descriptor).collect()
    }
}

impl Index<usize> for RuleStore {
    type Output = CssRule;

    fn index(&self, index: usize) -> &CssRule {
        &self.rules[index]
    }
}

impl IndexMut<usize> for RuleStore {
    fn index_mut(&mut self, index: usize) -> &mut CssRule {
        &mut self.rules[index]
    }
}

impl<'a> IntoIterator for &'a RuleStore {
    type Item = &'a CssRule;
    type IntoIter = std::slice::Iter<'a, CssRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
