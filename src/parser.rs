//! DIMACS CNF reader.

use crate::errors::*;
use crate::{Clause, Lit, Var};
use error_chain::bail;
use regex::Regex;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

/// Parse a DIMACS CNF file.
pub fn parse_dimacs_file<P: AsRef<Path>>(path: P) -> Result<Vec<Clause>> {
    let file = File::open(path.as_ref())
        .chain_err(|| format!("cannot open {}", path.as_ref().display()))?;
    parse_dimacs_from_buf_reader(&mut io::BufReader::new(file))
}

/// Parse DIMACS CNF from a buffer reader.
///
/// Comment (`c`) and blank lines are ignored anywhere. The `p cnf V C`
/// header must precede the clauses; `cnf` is matched case-insensitively.
/// Clauses are runs of signed nonzero integers terminated by `0` and may
/// span lines. End of input also terminates a pending clause, so a file
/// whose final `0` is the last byte still yields its last clause. Header
/// counts that disagree with the parsed contents produce a warning, not
/// an error.
pub fn parse_dimacs_from_buf_reader<R: BufRead>(reader: &mut R) -> Result<Vec<Clause>> {
    let header_re = Regex::new(r"^p\s+(?i:cnf)\s+(\d+)\s+(\d+)\s*$").unwrap();

    let mut expected: Option<(usize, usize)> = None;
    let mut clauses = vec![];
    let mut current = vec![];
    let mut seen_vars: HashSet<Var> = HashSet::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        if expected.is_none() {
            if let Some(cap) = header_re.captures(line) {
                expected = Some((cap[1].parse()?, cap[2].parse()?));
                continue;
            }
            bail!("expected DIMACS problem line, got {:?}", line);
        }
        for token in line.split_whitespace() {
            let value: i32 = token
                .parse()
                .chain_err(|| format!("bad DIMACS token {:?}", token))?;
            if value == 0 {
                clauses.push(Clause {
                    lits: std::mem::replace(&mut current, vec![]),
                });
            } else {
                let lit = Lit::from_dimacs(value);
                seen_vars.insert(lit.var());
                current.push(lit);
            }
        }
    }

    if !current.is_empty() {
        // End of input terminates a pending clause even without a
        // closing 0.
        clauses.push(Clause { lits: current });
    }

    match expected {
        None => bail!("missing DIMACS problem line"),
        Some((n_vars, n_clauses)) => {
            if seen_vars.len() != n_vars {
                log::warn!(
                    "DIMACS header variable count mismatch: expected {}, got {}",
                    n_vars,
                    seen_vars.len()
                );
            }
            if clauses.len() != n_clauses {
                log::warn!(
                    "DIMACS header clause count mismatch: expected {}, got {}",
                    n_clauses,
                    clauses.len()
                );
            }
        }
    }

    Ok(clauses)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Vec<Clause>> {
        parse_dimacs_from_buf_reader(&mut io::Cursor::new(input))
    }

    fn as_dimacs(clauses: &[Clause]) -> Vec<Vec<i32>> {
        clauses
            .iter()
            .map(|clause| clause.lits.iter().map(|lit| lit.to_dimacs()).collect())
            .collect()
    }

    #[test]
    fn parses_a_simple_formula() {
        let clauses = parse("c a comment\np cnf 3 2\n1 -3 0\n2 3 -1 0\n").unwrap();
        assert_eq!(as_dimacs(&clauses), vec![vec![1, -3], vec![2, 3, -1]]);
    }

    #[test]
    fn clause_may_span_lines() {
        let clauses = parse("p cnf 3 1\n1\n2\n3 0\n").unwrap();
        assert_eq!(as_dimacs(&clauses), vec![vec![1, 2, 3]]);
    }

    #[test]
    fn several_clauses_on_one_line() {
        let clauses = parse("p cnf 2 2\n1 0 -2 0\n").unwrap();
        assert_eq!(as_dimacs(&clauses), vec![vec![1], vec![-2]]);
    }

    #[test]
    fn end_of_input_terminates_the_last_clause() {
        let clauses = parse("p cnf 2 2\n1 2 0\n-1 -2").unwrap();
        assert_eq!(as_dimacs(&clauses), vec![vec![1, 2], vec![-1, -2]]);
    }

    #[test]
    fn final_zero_without_trailing_newline() {
        let clauses = parse("p cnf 1 1\n1 0").unwrap();
        assert_eq!(as_dimacs(&clauses), vec![vec![1]]);
    }

    #[test]
    fn bare_zero_is_an_empty_clause() {
        let clauses = parse("p cnf 1 1\n0\n").unwrap();
        assert_eq!(clauses.len(), 1);
        assert!(clauses[0].lits.is_empty());
    }

    #[test]
    fn comments_between_clauses() {
        let clauses = parse("p cnf 2 2\n1 0\nc interlude\n2 0\n").unwrap();
        assert_eq!(as_dimacs(&clauses), vec![vec![1], vec![2]]);
    }

    #[test]
    fn header_kind_is_case_insensitive() {
        assert!(parse("p CNF 1 1\n1 0\n").is_ok());
        assert!(parse("p Cnf 1 1\n1 0\n").is_ok());
    }

    #[test]
    fn header_count_mismatch_is_not_fatal() {
        let clauses = parse("p cnf 9 9\n1 0\n").unwrap();
        assert_eq!(clauses.len(), 1);
    }

    #[test]
    fn missing_header_is_an_error() {
        assert!(parse("1 2 0\n").is_err());
        assert!(parse("c only comments\n").is_err());
    }

    #[test]
    fn bad_token_is_an_error() {
        assert!(parse("p cnf 1 1\n1 x 0\n").is_err());
    }
}
