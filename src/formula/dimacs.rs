use crate::formula::{Assignment, Clause, FormulaError, Literal, Problem};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io::{self, BufRead, BufReader, Read, Write};

/// Parses a DIMACS CNF document from any reader.
pub fn parse<R: Read>(reader: R) -> Result<Problem, DimacsParseError> {
    let reader = BufReader::new(reader);
    parse_results(reader.lines().map(|line| line.map_err(DimacsParseError::from)))
}

pub fn parse_str(text: &str) -> Result<Problem, DimacsParseError> {
    parse_lines(text.lines())
}

/// Parses a DIMACS CNF document supplied one line at a time.
///
/// Comment lines (`c ...`) and blank lines are skipped, and a `%` line ends the data as in the
/// SATLIB benchmarks. The `p cnf` header is optional; when present it must be well formed, but
/// its counts are only checked against the parsed problem for a warning.
pub fn parse_lines<I, S>(lines: I) -> Result<Problem, DimacsParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_results(lines.into_iter().map(Ok))
}

fn parse_results<I, S>(lines: I) -> Result<Problem, DimacsParseError>
where
    I: Iterator<Item = Result<S, DimacsParseError>>,
    S: AsRef<str>,
{
    let mut problem = Problem::new();
    let mut header = None;

    for (idx, line) in lines.enumerate() {
        let line = line?;
        let line = line.as_ref().trim();

        if line.is_empty() || line.starts_with('c') {
            continue;
        } else if line.starts_with('%') {
            break;
        } else if line.starts_with('p') {
            header = Some(parse_header(line)?);
        } else {
            // a bare `0` is the empty clause
            let clause = Clause::from_token(line).map_err(|error| DimacsParseError::Clause { line: idx + 1, error })?;
            problem.add_clause(clause);
        }
    }

    if let Some(header) = header {
        if header.num_variables != problem.num_variables() || header.num_clauses != problem.num_clauses() {
            warn!(
                "header declares {} variables and {} clauses, found {} and {}",
                header.num_variables,
                header.num_clauses,
                problem.num_variables(),
                problem.num_clauses()
            );
        }
    }
    debug!(
        "parsed {} clauses over {} variables",
        problem.num_clauses(),
        problem.num_variables()
    );

    Ok(problem)
}

#[derive(Debug, PartialEq, Eq)]
struct Header {
    num_variables: usize,
    num_clauses: usize,
}

fn parse_header(line: &str) -> Result<Header, DimacsParseError> {
    let mut line = line.split_whitespace();

    if line.next() != Some("p") {
        return Err(DimacsParseError::Header("expected 'p'".into()));
    }
    if line.next() != Some("cnf") {
        return Err(DimacsParseError::Header("missing 'cnf'".into()));
    }

    let num_variables = line
        .next()
        .and_then(|c| usize::from_str_radix(c, 10).ok())
        .ok_or_else(|| DimacsParseError::Header("invalid num_variables".into()))?;

    let num_clauses = line
        .next()
        .and_then(|c| usize::from_str_radix(c, 10).ok())
        .ok_or_else(|| DimacsParseError::Header("invalid num_clauses".into()))?;

    Ok(Header {
        num_variables,
        num_clauses,
    })
}

/// Renders the header followed by one clause per line, clauses sorted by their text. The empty
/// clause is written as a bare `0` so it survives a round trip.
pub fn render(problem: &Problem) -> String {
    let mut clauses = problem
        .clauses()
        .map(|clause| if clause.is_empty() { "0".to_string() } else { clause.render() })
        .collect::<Vec<_>>();
    clauses.sort();

    let mut out = format!("p cnf {} {}", problem.num_variables(), problem.num_clauses());
    for clause in clauses {
        out.push('\n');
        out.push_str(&clause);
    }
    out
}

/// Writes a result in the style of the SAT competition output format: a status line followed by
/// one `v ... 0` line per model.
pub fn write_solutions<W: Write>(writer: &mut W, solutions: &[Assignment]) -> io::Result<()> {
    if solutions.is_empty() {
        return writeln!(writer, "s UNSATISFIABLE");
    }
    writeln!(writer, "s SATISFIABLE")?;
    for model in solutions {
        write!(writer, "v")?;
        for (variable, value) in model {
            write!(writer, " {}", Literal::new(*variable, *value))?;
        }
        writeln!(writer, " 0")?;
    }
    Ok(())
}

#[derive(Debug)]
pub enum DimacsParseError {
    Io(std::io::Error),
    Header(String),
    Clause { line: usize, error: FormulaError },
}

impl From<std::io::Error> for DimacsParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl Display for DimacsParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            DimacsParseError::Io(e) => write!(f, "{}", e),
            DimacsParseError::Header(msg) => write!(f, "bad problem line: {}", msg),
            DimacsParseError::Clause { line, error } => write!(f, "line {}: {}", line, error),
        }
    }
}

impl Error for DimacsParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DimacsParseError::Io(e) => Some(e),
            DimacsParseError::Header(_) => None,
            DimacsParseError::Clause { error, .. } => Some(error),
        }
    }
}
