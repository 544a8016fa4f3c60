/*!
Reader for the comma-separated batch encoding of CNF problems.

A single file carries many problem instances. Rows whose first field is
`c` are sentinels that close the problem accumulated so far; a `p` row
announces the next problem and contributes no clause; every other
non-empty row is one clause, encoded as signed integers with a trailing
`0` terminator.
*/

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::formula::{Clause, Cnf, Literal, LiteralParseError};
use crate::prelude::*;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("I/O error occurred while parsing CNF file '{}'", path.display()))]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Clause row '{}' does not end with the 0 terminator", row))]
    MissingTerminator { row: String },
    #[snafu(display("Clause row '{}' has no literals before the terminator", row))]
    EmptyClause { row: String },
    #[snafu(display("Invalid literal found in clause row '{}'", row))]
    MalformedLiteral {
        row: String,
        source: LiteralParseError,
    },
}

/// One instance of the batch: its sequential number and its formula.
#[derive(Debug, Clone)]
pub struct Problem {
    pub number: usize,
    pub formula: Cnf,
}

/// Parse a clause row into a clause
fn parse_clause(row: &str) -> Result<Clause, Error> {
    let fields = row.split(',').map(str::trim).collect::<Vec<_>>();

    ensure!(
        fields.last() == Some(&"0"),
        MissingTerminator {
            row: row.to_owned(),
        }
    );
    ensure!(
        fields.len() > 1,
        EmptyClause {
            row: row.to_owned(),
        }
    );

    let mut literals = Vec::with_capacity(fields.len() - 1);
    for field in &fields[..fields.len() - 1] {
        literals.push(field.parse::<Literal>().with_context(|| MalformedLiteral {
            row: row.to_owned(),
        })?);
    }

    Ok(Clause::new(literals))
}

/// Parses every problem in the batch encoding from a reader.
pub fn parse_problems(reader: impl BufRead) -> Result<Vec<Problem>, Error> {
    let mut problems = Vec::new();
    let mut clauses = Vec::new();
    let mut number = 0;

    let mut flush = |clauses: &mut Vec<Clause>, number: usize| {
        if !clauses.is_empty() {
            let formula = Cnf::from_clauses(std::mem::take(clauses));
            debug!(
                "parsed problem {} with {} clauses",
                number,
                formula.num_clauses()
            );
            problems.push(Problem { number, formula });
        }
    };

    for line in reader.lines() {
        let line = line.map_err(|source| Error::IoError {
            path: PathBuf::new(),
            source,
        })?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        match trimmed.split(',').next().map(str::trim) {
            Some("c") => flush(&mut clauses, number),
            Some("p") => {
                // metadata only; the problem's clauses follow
                number += 1;
            }
            _ => clauses.push(parse_clause(trimmed)?),
        }
    }

    flush(&mut clauses, number);

    Ok(problems)
}

/// Parses a batch file of CNF problems
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<Problem>, Error> {
    let path = path.as_ref();
    let file = BufReader::new(File::open(path).context(IoError {
        path: path.to_owned(),
    })?);

    parse_problems(file).map_err(|error| match error {
        // attach the path the reader-level loop could not know
        Error::IoError { source, .. } => Error::IoError {
            path: path.to_owned(),
            source,
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(input: &str) -> Result<Vec<Problem>, Error> {
        parse_problems(Cursor::new(input))
    }

    #[test]
    fn groups_rows_into_problems() {
        let problems = parse(
            "c,start\n\
             p,cnf,2,2\n\
             1,2,0\n\
             -1,2,0\n\
             c,next\n\
             p,cnf,1,1\n\
             1,0\n",
        )
        .unwrap();

        assert_eq!(problems.len(), 2);
        assert_eq!(problems[0].number, 1);
        assert_eq!(problems[0].formula.num_clauses(), 2);
        assert_eq!(problems[1].number, 2);
        assert_eq!(problems[1].formula.num_clauses(), 1);
    }

    #[test]
    fn final_problem_is_flushed_at_end_of_input() {
        let problems = parse("p,cnf,1,1\n1,0\n").unwrap();

        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].formula.num_clauses(), 1);
    }

    #[test]
    fn sentinel_without_clauses_produces_no_problem() {
        let problems = parse("c,header\nc,still nothing\n").unwrap();
        assert!(problems.is_empty());
    }

    #[test]
    fn blank_rows_are_skipped() {
        let problems = parse("p,cnf,1,1\n\n1,0\n\n").unwrap();
        assert_eq!(problems[0].formula.num_clauses(), 1);
    }

    #[test]
    fn clause_row_requires_terminator() {
        assert!(matches!(
            parse("1,2\n"),
            Err(Error::MissingTerminator { .. })
        ));
    }

    #[test]
    fn clause_row_requires_literals() {
        assert!(matches!(parse("0\n"), Err(Error::EmptyClause { .. })));
    }

    #[test]
    fn zero_magnitude_literal_is_rejected() {
        // a 0 before the final field is a zero-magnitude literal, not a
        // terminator
        assert!(matches!(
            parse("1,0,0\n"),
            Err(Error::MalformedLiteral { .. })
        ));
    }

    #[test]
    fn non_integer_literal_is_rejected() {
        assert!(matches!(
            parse("1,x,0\n"),
            Err(Error::MalformedLiteral { .. })
        ));
    }
}
