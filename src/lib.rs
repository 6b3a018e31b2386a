pub mod brute_force;
pub mod formula;

use formula::Assignment;

#[derive(PartialEq, Clone, Debug)]
pub enum SatResult {
    Satisfiable(Assignment),
    Unsatisfiable,
}

impl SatResult {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SatResult::Satisfiable(_))
    }

    pub fn model(&self) -> Option<&Assignment> {
        match self {
            SatResult::Satisfiable(model) => Some(model),
            SatResult::Unsatisfiable => None,
        }
    }
}

pub use brute_force::Solutions;
pub use formula::dimacs::DimacsParseError;
pub use formula::{Clause, FormulaError, Literal, Problem, Variable, VariableSet};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{assignment, n, p};
    use test_env_log::test;

    // (x1 | x2 | !x3) & (x2 | x3 | !x4) & (!x1 | x3 | !x4) & (x1 | !x2 | x4)
    fn four_clause_four_vars() -> Problem {
        let variables = [[1, 2, 3], [2, 3, 4], [1, 3, 4], [1, 2, 4]];
        let signs = [
            [true, true, false],
            [true, true, false],
            [false, true, false],
            [true, false, true],
        ];
        let mut problem = Problem::new();
        for (vars, signs) in variables.iter().zip(signs.iter()) {
            let literals = vars
                .iter()
                .zip(signs.iter())
                .map(|(&v, &sign)| Literal::new(Variable::new(v).unwrap(), sign));
            problem.add_clause(Clause::try_from_literals(literals).unwrap());
        }
        problem
    }

    #[test]
    fn check_invalid_solution() {
        let problem = four_clause_four_vars();
        let invalid = assignment(&[(1, false), (2, false), (3, true), (4, false)]);
        assert!(!problem.is_satisfied_by(&invalid));
        assert!(!problem.brute_force_solve().contains(&invalid));
    }

    #[test]
    fn check_valid_solution() {
        let problem = four_clause_four_vars();
        let valid = assignment(&[(1, true), (2, false), (3, true), (4, false)]);
        assert!(problem.is_satisfied_by(&valid));
        assert!(problem.brute_force_solve().contains(&valid));
    }

    #[test]
    fn partial_assignments() {
        let problem = four_clause_four_vars();
        // nothing set in `2 3 -4`
        assert!(!problem.is_satisfied_by(&assignment(&[(1, true)])));
        assert!(problem.is_satisfied_by(&assignment(&[(1, true), (3, true)])));
    }

    #[test]
    fn to_string_4clause_4vars() {
        let problem = four_clause_four_vars();
        let clause = Clause::try_from_literals(vec![p(2), p(3), n(4)]).unwrap();
        assert!(problem.clauses().any(|c| c.render() == clause.render()));

        let expected = ["p cnf 4 4", "-1 3 -4", "1 -2 4", "1 2 -3", "2 3 -4"].join("\n");
        assert_eq!(problem.render(), expected);
        assert_eq!(problem.to_string(), expected);
    }

    #[test]
    fn from_string() {
        let input = ["p cnf 4 4", "-1 3 -4", "1 -2 4", "1 2 -3", "2 3 -4"].join("\n");
        let parsed: Problem = input.parse().unwrap();
        assert_eq!(parsed, four_clause_four_vars());
        assert_eq!(parsed.render(), input);
    }

    #[test]
    fn solve_reports_first_model() {
        let problem = four_clause_four_vars();
        let result = problem.solve();
        let model = result.model().expect("satisfiable");
        assert!(problem.is_satisfied_by(model));
        assert_eq!(Some(model), problem.solutions().next().as_ref());
    }
}
