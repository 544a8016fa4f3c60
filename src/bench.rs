/*!
Benchmarking driver: times each solve and aggregates verdicts.
*/

use std::time::{Duration, Instant};

use crate::parser::Problem;
use crate::solver::Solver;

/// Outcome of one timed solve.
#[derive(Debug, Clone)]
pub struct Record {
    pub problem: usize,
    /// Problem size, measured as clause count.
    pub size: usize,
    pub satisfiable: bool,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub satisfiable: usize,
    pub total: usize,
}

/// Solves every problem in the batch, timing the solve call alone.
///
/// Logging happens outside the timed region so it cannot skew the
/// measurement.
pub fn run<S: Solver>(problems: Vec<Problem>) -> Vec<Record> {
    let mut records = Vec::with_capacity(problems.len());

    for problem in problems {
        let number = problem.number;
        let size = problem.formula.num_clauses();

        let start = Instant::now();
        let model = S::new(problem.formula).solve();
        let elapsed = start.elapsed();

        let satisfiable = model.is_some();
        info!(
            "problem {}: {} ({} clauses, {:?})",
            number,
            if satisfiable { "SAT" } else { "UNSAT" },
            size,
            elapsed
        );

        records.push(Record {
            problem: number,
            size,
            satisfiable,
            elapsed,
        });
    }

    records
}

pub fn summarize(records: &[Record]) -> Summary {
    Summary {
        satisfiable: records.iter().filter(|record| record.satisfiable).count(),
        total: records.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_problems;
    use crate::solver::DpllSolver;
    use std::io::Cursor;

    #[test]
    fn records_verdicts_and_sizes() {
        let problems = parse_problems(Cursor::new(
            "p,cnf,1,1\n\
             1,0\n\
             c,next\n\
             p,cnf,1,2\n\
             1,0\n\
             -1,0\n",
        ))
        .unwrap();

        let records = run::<DpllSolver>(problems);

        assert_eq!(records.len(), 2);
        assert!(records[0].satisfiable);
        assert_eq!(records[0].size, 1);
        assert!(!records[1].satisfiable);
        assert_eq!(records[1].size, 2);

        assert_eq!(
            summarize(&records),
            Summary {
                satisfiable: 1,
                total: 2,
            }
        );
    }
}
