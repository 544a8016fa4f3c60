use paste::paste;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    bench,
    formula::{Assignment, Clause, Cnf, Literal, Variable},
    parser::parse_file,
    solver::{DpllSolver, Solver},
};

macro_rules! batch_testcase {
    ($name:ident, $satisfiable:expr, $total:expr) => {
        paste! {
            #[test]
            fn [< batch_ $name >]() {
                let problems = parse_file(
                    concat!("testcases/", stringify!($name), ".csv")
                ).unwrap();
                let records = bench::run::<DpllSolver>(problems);
                let summary = bench::summarize(&records);

                assert_eq!(summary.total, $total);
                assert_eq!(summary.satisfiable, $satisfiable);
            }
        }
    };
}

batch_testcase!(mixed, 2, 3);
batch_testcase!(small3, 3, 5);

fn random_formula(rng: &mut StdRng) -> Cnf {
    let num_variables = rng.gen_range(1..=6u32);
    let num_clauses = rng.gen_range(1..=8);

    let mut formula = Cnf::new();
    for _ in 0..num_clauses {
        let len = rng.gen_range(1..=3);
        let literals = (0..len)
            .map(|_| {
                let id = rng.gen_range(1..=num_variables);
                Literal::new(Variable::new(id).unwrap(), rng.gen())
            })
            .collect();
        formula.add_clause(Clause::new(literals));
    }

    formula
}

fn brute_force_satisfiable(formula: &Cnf) -> bool {
    let variables: Vec<Variable> = {
        let mut set = std::collections::BTreeSet::new();
        for clause in formula.clauses() {
            for literal in clause.iter() {
                set.insert(literal.variable());
            }
        }
        set.into_iter().collect()
    };

    (0u32..1 << variables.len()).any(|bits| {
        let mut assignment = Assignment::new();
        for (position, &variable) in variables.iter().enumerate() {
            assignment.assign(Literal::new(variable, bits >> position & 1 == 1));
        }
        formula.is_satisfied_by(&assignment)
    })
}

/// SAT verdicts must come with a satisfying witness; UNSAT verdicts must
/// agree with exhaustive enumeration.
#[test]
fn randomized_soundness_and_completeness() {
    let mut rng = StdRng::seed_from_u64(0x5a7c4e1);

    for _ in 0..200 {
        let formula = random_formula(&mut rng);

        match DpllSolver::new(formula.clone()).solve() {
            Some(model) => {
                assert!(formula.is_satisfied_by(model.assignment()));
            }
            None => {
                assert!(
                    !brute_force_satisfiable(&formula),
                    "solver claimed UNSAT for {}",
                    formula
                );
            }
        }
    }
}
