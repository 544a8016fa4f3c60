use crate::formula::{Assignment, Clause, Cnf, Literal, Model};

use super::Solver;

/// Signals that propagation emptied a clause: the current branch cannot
/// satisfy the formula. Handled inside the search, never returned by
/// `solve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict;

/// Produces the formula under the assumption `literal` is true.
///
/// Clauses containing `literal` are satisfied and dropped; occurrences of
/// its negation are removed. A clause left with no literals is a
/// conflict. The input formula is never mutated, so sibling branches can
/// simplify independently.
pub fn propagate(literal: Literal, formula: &Cnf) -> Result<Cnf, Conflict> {
    let mut clauses = Vec::with_capacity(formula.num_clauses());

    for clause in formula.clauses() {
        if clause.contains(literal) {
            continue;
        }

        if clause.contains(!literal) {
            let remaining: Vec<Literal> =
                clause.iter().filter(|&other| other != !literal).collect();
            if remaining.is_empty() {
                return Err(Conflict);
            }
            clauses.push(Clause::new(remaining));
        } else {
            clauses.push(clause.clone());
        }
    }

    Ok(Cnf::from_clauses(clauses))
}

/// Picks the next decision literal from the live formula.
///
/// Any deterministic choice preserves correctness; only the number of
/// explored nodes differs.
pub trait Brancher {
    fn pick(&mut self, formula: &Cnf) -> Option<Literal>;
}

/// First literal of the first remaining clause.
/// Note: This is an inefficient heuristics.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLiteral;

impl Brancher for FirstLiteral {
    fn pick(&mut self, formula: &Cnf) -> Option<Literal> {
        formula
            .clauses()
            .first()
            .and_then(|clause| clause.iter().next())
    }
}

#[derive(Debug)]
pub struct DpllSolver<B = FirstLiteral> {
    formula: Cnf,
    assignment: Assignment,
    brancher: B,
}

impl<B: Brancher> DpllSolver<B> {
    /// Creates a solver with a custom branching strategy.
    pub fn with_brancher(formula: Cnf, brancher: B) -> Self {
        DpllSolver {
            formula,
            assignment: Assignment::new(),
            brancher,
        }
    }

    /// Runs the search and hands back the witness on success.
    pub fn into_model(mut self) -> Option<Model> {
        let root = self.formula.clone();
        if self.search(root) {
            Some(Model::new(self.formula, self.assignment))
        } else {
            None
        }
    }

    /// Fixes unit-clause literals until none remain.
    fn propagate_units(&mut self, mut formula: Cnf) -> Result<Cnf, Conflict> {
        while let Some(literal) = formula.unit_literal() {
            formula = propagate(literal, &formula)?;
            self.assignment.assign(literal);
        }

        Ok(formula)
    }

    /// Satisfies every literal that is pure in `formula`.
    ///
    /// Purity is judged once against the incoming formula; eliminations
    /// within the round do not re-derive it. A pure literal cannot
    /// conflict at the moment it is chosen, so the `?` below only fires
    /// if the purity computation itself is wrong.
    fn eliminate_pure(&mut self, mut formula: Cnf) -> Result<Cnf, Conflict> {
        for literal in formula.pure_literals() {
            formula = propagate(literal, &formula)?;
            self.assignment.assign(literal);
        }

        Ok(formula)
    }

    fn search(&mut self, formula: Cnf) -> bool {
        let formula = match self.propagate_units(formula) {
            Ok(formula) => formula,
            Err(Conflict) => return false,
        };
        let formula = match self.eliminate_pure(formula) {
            Ok(formula) => formula,
            Err(Conflict) => return false,
        };

        if formula.is_empty() {
            // Every clause is satisfied; unassigned variables are free.
            return true;
        }

        let decision = match self.brancher.pick(&formula) {
            Some(literal) => literal,
            // Live clauses but nothing to branch on. Only reachable when
            // the input contained an empty clause.
            None => return false,
        };

        let mark = self.assignment.mark();

        if let Ok(simplified) = propagate(decision, &formula) {
            self.assignment.assign(decision);
            if self.search(simplified) {
                return true;
            }
        }
        self.assignment.rollback(mark);

        if let Ok(simplified) = propagate(!decision, &formula) {
            self.assignment.assign(!decision);
            if self.search(simplified) {
                return true;
            }
        }
        self.assignment.rollback(mark);

        false
    }
}

impl Solver for DpllSolver {
    fn new(formula: Cnf) -> Self {
        DpllSolver::with_brancher(formula, FirstLiteral)
    }

    fn solve(self) -> Option<Model> {
        self.into_model()
    }
}
