use crate::formula::{Assignment, Assignments, Problem};
use crate::SatResult;
use log::{debug, trace};

/// Exhaustive search over every total assignment of a problem's variables, yielding the ones that
/// satisfy every clause. O(2^n * m) for n variables and m clauses; nothing is pruned.
#[derive(Clone)]
pub struct Solutions<'a> {
    problem: &'a Problem,
    candidates: Assignments,
}

impl<'a> Solutions<'a> {
    pub fn new(problem: &'a Problem) -> Self {
        debug!(
            "brute force search over {} variables, {} clauses",
            problem.num_variables(),
            problem.num_clauses()
        );
        Self {
            problem,
            candidates: problem.variables().all_assignments(),
        }
    }
}

impl Iterator for Solutions<'_> {
    type Item = Assignment;

    fn next(&mut self) -> Option<Self::Item> {
        let problem = self.problem;
        let found = self.candidates.find(|assignment| problem.is_satisfied_by(assignment));
        if let Some(assignment) = &found {
            trace!("satisfying assignment {:?}", assignment);
        }
        found
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.candidates.size_hint().1)
    }
}

pub fn all_solutions(problem: &Problem) -> Vec<Assignment> {
    Solutions::new(problem).collect()
}

pub fn solve_brute_force(problem: &Problem) -> SatResult {
    match Solutions::new(problem).next() {
        Some(model) => SatResult::Satisfiable(model),
        None => SatResult::Unsatisfiable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{assignment, n, p, problem_3sat_strategy, Clause, Literal};
    use proptest::prelude::*;
    use test_env_log::test;

    fn problem(clauses: Vec<Vec<Literal>>) -> Problem {
        let mut f = Problem::new();
        for literals in clauses {
            f.add_clause(Clause::try_from_literals(literals).unwrap());
        }
        f
    }

    #[test]
    fn solve_bcp_sat() {
        let f = problem(vec![vec![p(1), p(2)], vec![n(1)]]);
        assert_eq!(
            solve_brute_force(&f),
            SatResult::Satisfiable(assignment(&[(1, false), (2, true)]))
        );
        assert_eq!(all_solutions(&f).len(), 1);
    }

    #[test]
    fn solve_bcp_unsat() {
        let f = problem(vec![vec![p(1), p(2)], vec![n(1)], vec![n(2)]]);
        assert_eq!(solve_brute_force(&f), SatResult::Unsatisfiable);
        assert!(all_solutions(&f).is_empty());
    }

    #[test]
    fn solve_bcp_decide_sat() {
        let f = problem(vec![vec![p(1), p(2)], vec![p(1)]]);
        assert_eq!(
            all_solutions(&f),
            vec![
                assignment(&[(1, true), (2, false)]),
                assignment(&[(1, true), (2, true)]),
            ]
        );
    }

    #[test]
    fn solve_conflict_sat() {
        let f = problem(vec![vec![p(1), p(2), p(3)], vec![n(1), n(2), p(3)], vec![n(2), n(3)]]);
        assert!(solve_brute_force(&f).is_satisfiable());
    }

    #[test]
    fn solve_tautology() {
        let f = problem(vec![vec![p(1), n(1)]]);
        assert_eq!(all_solutions(&f).len(), 2);
    }

    #[test]
    fn solve_empty_problem() {
        assert_eq!(all_solutions(&Problem::new()), vec![Assignment::new()]);
    }

    #[test]
    fn empty_clause_is_unsat() {
        let mut f = problem(vec![vec![p(1)]]);
        f.add_clause(Clause::new());
        assert_eq!(solve_brute_force(&f), SatResult::Unsatisfiable);
    }

    #[test]
    fn solutions_is_lazy() {
        let f = problem(vec![vec![p(1), p(2), p(3)]]);
        let mut solutions = Solutions::new(&f);
        assert_eq!(solutions.next(), Some(assignment(&[(1, false), (2, false), (3, true)])));
        assert_eq!(solutions.count(), 6);
    }

    proptest! {
        #[test]
        fn proptest_solutions_are_exact(f in problem_3sat_strategy()) {
            let solutions = all_solutions(&f);
            for candidate in f.variables().all_assignments() {
                prop_assert_eq!(f.is_satisfied_by(&candidate), solutions.contains(&candidate));
            }
            let result = solve_brute_force(&f);
            log::trace!("result = {:?}", result);
            prop_assert_eq!(result.is_satisfiable(), !solutions.is_empty());
        }
    }
}
