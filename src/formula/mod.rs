pub mod dimacs;
mod variables;

pub use variables::{Assignments, VariableSet};

use crate::brute_force::{self, Solutions};
use crate::SatResult;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::Debug;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Largest number of distinct literals a clause may hold.
pub const MAX_CLAUSE_LEN: usize = 3;

/// Variables are identified by positive integers, as in DIMACS.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(usize);

impl Variable {
    /// `None` for 0, which DIMACS reserves as the clause terminator.
    pub fn new(idx: usize) -> Option<Self> {
        if idx == 0 {
            None
        } else {
            Some(Variable(idx))
        }
    }

    pub fn idx(&self) -> usize {
        self.0
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A (possibly partial) mapping from variables to truth values.
pub type Assignment = BTreeMap<Variable, bool>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    TooManyLiterals,
    InvalidLiteralToken(String),
}

impl Display for FormulaError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            FormulaError::TooManyLiterals => f.write_str("cannot add another literal to this clause"),
            FormulaError::InvalidLiteralToken(token) => write!(f, "cannot parse token `{}` as literal", token),
        }
    }
}

impl Error for FormulaError {}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    pub fn new(variable: Variable, sign: bool) -> Self {
        if sign {
            Literal::Positive(variable)
        } else {
            Literal::Negative(variable)
        }
    }

    /// Parses a signed decimal token such as `3` or `-12`.
    pub fn from_token(token: &str) -> Result<Self, FormulaError> {
        let invalid = || FormulaError::InvalidLiteralToken(token.to_string());
        let (sign, digits) = match token.strip_prefix('-') {
            Some(rest) => (false, rest),
            None => (true, token),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let idx = usize::from_str_radix(digits, 10).map_err(|_| invalid())?;
        let variable = Variable::new(idx).ok_or_else(invalid)?;
        Ok(Literal::new(variable, sign))
    }

    pub fn variable(&self) -> &Variable {
        match self {
            Literal::Positive(v) => v,
            Literal::Negative(v) => v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn idx(&self) -> usize {
        self.variable().0
    }

    pub fn negated(&self) -> Self {
        match self {
            Literal::Positive(v) => Literal::Negative(*v),
            Literal::Negative(v) => Literal::Positive(*v),
        }
    }

    /// An unset variable never satisfies a literal.
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        assignment.get(self.variable()) == Some(&self.is_positive())
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Ord for Literal {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.variable(), self.is_positive()).cmp(&(other.variable(), other.is_positive()))
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Literal::Positive(Variable(x)) => write!(f, "{}", x),
            Literal::Negative(Variable(x)) => write!(f, "-{}", x),
        }
    }
}

impl FromStr for Literal {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Literal::from_token(s)
    }
}

/// A disjunction of at most [`MAX_CLAUSE_LEN`] distinct literals.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Clause {
    literals: BTreeSet<Literal>,
}

impl Clause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_from_literals(literals: impl IntoIterator<Item = Literal>) -> Result<Self, FormulaError> {
        let mut clause = Self::new();
        clause.add_literals(literals)?;
        Ok(clause)
    }

    /// Adds each literal in turn. Literals already present don't count toward the limit. If any
    /// literal would exceed the limit the clause is left exactly as it was before the call.
    pub fn add_literals(&mut self, literals: impl IntoIterator<Item = Literal>) -> Result<(), FormulaError> {
        let mut staged = self.literals.clone();
        for literal in literals {
            if staged.contains(&literal) {
                continue;
            }
            if staged.len() >= MAX_CLAUSE_LEN {
                return Err(FormulaError::TooManyLiterals);
            }
            staged.insert(literal);
        }
        self.literals = staged;
        Ok(())
    }

    /// Parses a DIMACS clause line, e.g. `-3 1 2 0`.
    pub fn from_token(line: &str) -> Result<Self, FormulaError> {
        let mut tokens: Vec<&str> = line.split_whitespace().collect();
        while tokens.last() == Some(&"0") {
            tokens.pop();
        }
        let literals = tokens
            .into_iter()
            .map(Literal::from_token)
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_from_literals(literals)
    }

    /// Literals in ascending order of variable, negative first.
    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.literals.iter().map(|literal| *literal.variable())
    }

    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.literals.iter().any(|literal| literal.is_satisfied_by(assignment))
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut first_literal = true;
        for literal in &self.literals {
            if first_literal {
                first_literal = false;
            } else {
                f.write_str(" ")?;
            }
            write!(f, "{}", literal)?;
        }
        Ok(())
    }
}

impl FromStr for Clause {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Clause::from_token(s)
    }
}

/// A conjunction of clauses, together with the set of variables they mention.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Problem {
    clauses: BTreeSet<Clause>,
    variables: VariableSet,
}

impl Problem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Result<Self, dimacs::DimacsParseError> {
        dimacs::parse_str(text)
    }

    /// Adding a clause that is already present changes nothing.
    pub fn add_clause(&mut self, clause: Clause) {
        self.variables.add(clause.variables());
        self.clauses.insert(clause);
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn variables(&self) -> &VariableSet {
        &self.variables
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.clauses.iter().all(|clause| clause.is_satisfied_by(assignment))
    }

    /// Lazily enumerates the satisfying assignments of this problem.
    pub fn solutions(&self) -> Solutions<'_> {
        Solutions::new(self)
    }

    /// Every satisfying assignment, in enumeration order. Empty when the problem is unsatisfiable.
    pub fn brute_force_solve(&self) -> Vec<Assignment> {
        brute_force::all_solutions(self)
    }

    pub fn solve(&self) -> SatResult {
        brute_force::solve_brute_force(self)
    }

    pub fn render(&self) -> String {
        dimacs::render(self)
    }
}

impl Display for Problem {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for Problem {
    type Err = dimacs::DimacsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Problem::from_text(s)
    }
}

impl Debug for Problem {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        if self.clauses.is_empty() {
            return f.write_str("true");
        }
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            if clause.is_empty() {
                f.write_str("false")?;
                continue;
            }
            if clause.len() > 1 {
                f.write_str("(")?;
            }
            let mut first_literal = true;
            for literal in clause.literals() {
                if first_literal {
                    first_literal = false;
                } else {
                    f.write_str(" | ")?;
                }
                match literal {
                    Literal::Positive(Variable(x)) => f.write_fmt(format_args!("{}", x))?,
                    Literal::Negative(Variable(x)) => f.write_fmt(format_args!("!{}", x))?,
                }
            }
            if clause.len() > 1 {
                f.write_str(")")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

#[cfg(test)]
pub(crate) fn assignment(values: &[(usize, bool)]) -> Assignment {
    values.iter().map(|&(v, b)| (Variable(v), b)).collect()
}

#[cfg(test)]
pub(crate) fn literal_strategy() -> impl proptest::strategy::Strategy<Value = Literal> {
    use proptest::prelude::*;

    const MAX_VARS: usize = 8;
    (1..=MAX_VARS, any::<bool>()).prop_map(|(v, sign)| Literal::new(Variable(v), sign))
}

#[cfg(test)]
pub(crate) fn clause_strategy() -> impl proptest::strategy::Strategy<Value = Clause> {
    use proptest::prelude::*;

    proptest::collection::vec(literal_strategy(), 0..=MAX_CLAUSE_LEN)
        .prop_map(|literals| Clause::try_from_literals(literals).expect("at most three literals"))
}

#[cfg(test)]
pub(crate) fn problem_3sat_strategy() -> impl proptest::strategy::Strategy<Value = Problem> {
    use proptest::prelude::*;

    proptest::collection::vec(clause_strategy(), 0..10).prop_map(|clauses| {
        let mut problem = Problem::new();
        for clause in clauses {
            problem.add_clause(clause);
        }
        problem
    })
}
