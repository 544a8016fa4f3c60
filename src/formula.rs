/*!
A module to represent conjunctive normal form formula.
*/

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
    num::NonZeroU32,
    str::FromStr,
};

use crate::prelude::*;

#[derive(Debug, Snafu)]
pub enum LiteralParseError {
    #[snafu(display("Failed to parse literal"))]
    ParseIntError { source: std::num::ParseIntError },
    #[snafu(display("Literal magnitude must be non-zero"))]
    ZeroLiteral,
}

/// Newtype wrapper for variable ID.
/// Invariant: 0 < ID <= MAX_VARIABLE_ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(NonZeroU32);

impl Variable {
    pub const MAX_VARIABLE_ID: u32 = std::u32::MAX;

    /// Creates a variable from its raw ID.
    /// Returns `None` when the ID is zero.
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Variable)
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A variable or its negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    id: Variable,
    positive: bool,
}

impl Literal {
    pub fn new(id: Variable, positive: bool) -> Self {
        Literal { id, positive }
    }

    pub fn variable(&self) -> Variable {
        self.id
    }

    pub fn positive(&self) -> bool {
        self.positive
    }
}

impl FromStr for Literal {
    type Err = LiteralParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (positive, digits) = match s.strip_prefix('-') {
            Some(rest) => (false, rest),
            None => (true, s),
        };

        let num = digits.parse::<u32>().context(ParseIntError)?;
        let id = Variable::new(num).context(ZeroLiteral)?;

        Ok(Literal { id, positive })
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", if self.positive { "" } else { "¬" }, self.id)
    }
}

impl std::ops::Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal {
            id: self.id,
            positive: !self.positive,
        }
    }
}

/// Disjunction of literals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    pub fn num_literals(&self) -> usize {
        self.literals.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Literal> + '_ {
        self.literals.iter().copied()
    }

    pub fn contains(&self, literal: Literal) -> bool {
        self.literals.contains(&literal)
    }

    /// Returns the forced literal when the clause is unit.
    pub fn unit_literal(&self) -> Option<Literal> {
        if self.literals.len() == 1 {
            Some(self.literals[0])
        } else {
            None
        }
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;

        let mut iter = self.literals.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
        }
        for literal in iter {
            write!(f, " ∨ {}", literal)?;
        }

        write!(f, ")")?;

        Ok(())
    }
}

/// Formula representation in Conjunctive Normal Form.
///
/// No variable count is declared up front; clauses may mention any
/// non-zero variable ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cnf {
    clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new() -> Self {
        Cnf {
            clauses: Vec::new(),
        }
    }

    pub fn from_clauses(clauses: Vec<Clause>) -> Self {
        Cnf { clauses }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// An empty formula is vacuously satisfied.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn add_clause(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// Returns the forced literal of some unit clause, if any exists.
    pub fn unit_literal(&self) -> Option<Literal> {
        self.clauses.iter().find_map(|clause| clause.unit_literal())
    }

    /// Literals whose negation occurs in no clause, evaluated against the
    /// current clause list as one simultaneous round.
    pub fn pure_literals(&self) -> Vec<Literal> {
        let mut seen = BTreeSet::new();
        let mut order = Vec::new();

        for clause in &self.clauses {
            for literal in clause.iter() {
                if seen.insert(literal) {
                    order.push(literal);
                }
            }
        }

        order
            .into_iter()
            .filter(|&literal| !seen.contains(&!literal))
            .collect()
    }

    /// Checks that every clause contains a literal the assignment makes
    /// true. Unassigned variables cannot help a clause.
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.clauses.iter().all(|clause| {
            clause
                .iter()
                .any(|literal| assignment.literal_value(literal) == Some(true))
        })
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CNF with {} clauses (", self.clauses.len())?;

        let mut iter = self.clauses.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
        }
        for clause in iter {
            write!(f, " ∧ {}", clause)?;
        }

        write!(f, ")")?;

        Ok(())
    }
}

/// Partial truth assignment with an undo trail.
///
/// An entry, once set on a search path, is never altered by that path.
/// Backtracking removes exactly the entries recorded since a `mark`.
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    values: BTreeMap<Variable, bool>,
    trail: Vec<Variable>,
}

impl Assignment {
    pub fn new() -> Self {
        Default::default()
    }

    /// Records `literal` as true.
    pub fn assign(&mut self, literal: Literal) {
        let prev = self.values.insert(literal.variable(), literal.positive());
        debug_assert!(prev.is_none(), "variable assigned twice on one path");
        self.trail.push(literal.variable());
    }

    pub fn value(&self, variable: Variable) -> Option<bool> {
        self.values.get(&variable).copied()
    }

    /// Truth value of `literal` under this assignment, `None` when its
    /// variable is unassigned.
    pub fn literal_value(&self, literal: Literal) -> Option<bool> {
        self.value(literal.variable())
            .map(|value| value == literal.positive())
    }

    /// Snapshot of the trail position, to be passed to `rollback`.
    pub fn mark(&self) -> usize {
        self.trail.len()
    }

    /// Removes every entry recorded after `mark`.
    pub fn rollback(&mut self, mark: usize) {
        while self.trail.len() > mark {
            if let Some(variable) = self.trail.pop() {
                self.values.remove(&variable);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.values
            .iter()
            .map(|(&variable, &value)| (variable, value))
    }
}

/// Represents a satisfying assignment for a formula.
///
/// The assignment may be partial; variables no clause forced are left
/// unassigned and may take either value.
#[derive(Debug)]
pub struct Model {
    formula: Cnf,
    assignment: Assignment,
}

impl Model {
    /// Creates a new model from a formula and an assignment.
    ///
    /// # Panics
    ///
    /// Panics when `assignment` does not satisfy `formula`.
    pub fn new(formula: Cnf, assignment: Assignment) -> Self {
        assert!(formula.is_satisfied_by(&assignment));

        Model {
            formula,
            assignment,
        }
    }

    pub fn formula(&self) -> &Cnf {
        &self.formula
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Model for {}\nAssignment:", self.formula)?;
        for (variable, value) in self.assignment.iter() {
            write!(f, "\n  {}: {}", variable, value)?;
        }

        Ok(())
    }
}
