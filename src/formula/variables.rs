use crate::formula::{Assignment, Variable};
use std::collections::BTreeSet;
use std::convert::TryFrom;

#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct VariableSet {
    variables: BTreeSet<Variable>,
}

impl VariableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, variables: impl IntoIterator<Item = Variable>) {
        self.variables.extend(variables);
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn contains(&self, variable: &Variable) -> bool {
        self.variables.contains(variable)
    }

    pub fn iter(&self) -> impl Iterator<Item = Variable> + '_ {
        self.variables.iter().copied()
    }

    /// Every total assignment over this set, 2^n of them for n variables.
    ///
    /// Assignments come out in lexicographic order over the variables in ascending order, with
    /// `false < true` and the lowest variable most significant: the first is all-false and the
    /// last all-true. The returned iterator can be cloned to restart enumeration from any point.
    ///
    /// The position is a `u128`, so at most 127 variables can be enumerated exhaustively; larger
    /// sets trip a debug assertion.
    pub fn all_assignments(&self) -> Assignments {
        Assignments::new(self.iter().collect())
    }
}

/// Iterator over the total assignments of a fixed list of variables.
///
/// Each candidate is the binary expansion of a counter, so there is no state beyond the position.
#[derive(Clone, Debug)]
pub struct Assignments {
    variables: Vec<Variable>,
    next: u128,
    end: u128,
}

impl Assignments {
    fn new(variables: Vec<Variable>) -> Self {
        debug_assert!(variables.len() < 128, "cannot enumerate {} variables", variables.len());
        let end = u32::try_from(variables.len())
            .ok()
            .and_then(|n| 1u128.checked_shl(n))
            .unwrap_or(u128::MAX);
        Self { variables, next: 0, end }
    }

    fn assignment_for(&self, bits: u128) -> Assignment {
        let n = self.variables.len();
        self.variables
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let shift = n - 1 - i;
                (*v, shift < 128 && (bits >> shift) & 1 == 1)
            })
            .collect()
    }
}

impl Iterator for Assignments {
    type Item = Assignment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let assignment = self.assignment_for(self.next);
        self.next += 1;
        Some(assignment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.end - self.next) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}
