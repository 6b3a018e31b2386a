use clap::{App, Arg, ArgMatches};
use std::fs::File;
use std::io::{self, Write};
use threesat::formula::dimacs::{self, DimacsParseError};
use threesat::formula::Problem;

fn main() {
    env_logger::init();

    let matches = App::new("threesat")
        .about("Brute-force 3-SAT solver for DIMACS CNF problems")
        .arg(Arg::with_name("INPUT").help("input file (in CNF)").index(1))
        .arg(
            Arg::with_name("all")
                .short("a")
                .long("all")
                .help("print every satisfying assignment, not just the first"),
        )
        .arg(
            Arg::with_name("print")
                .short("p")
                .long("print")
                .help("print the parsed problem in DIMACS form before solving"),
        )
        .get_matches();

    let f = if let Some(path) = matches.value_of("INPUT") {
        parse_from_file(path)
    } else {
        dimacs::parse(io::stdin())
    };

    match f.and_then(|f| run(&f, &matches)) {
        Ok(satisfiable) => std::process::exit(if satisfiable { 0 } else { 1 }),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(-1);
        }
    }
}

fn run(f: &Problem, matches: &ArgMatches) -> Result<bool, DimacsParseError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if matches.is_present("print") {
        writeln!(out, "{}", f)?;
    }

    let solutions = if matches.is_present("all") {
        f.brute_force_solve()
    } else {
        f.solutions().take(1).collect()
    };
    dimacs::write_solutions(&mut out, &solutions)?;

    Ok(!solutions.is_empty())
}

fn parse_from_file(path: &str) -> Result<Problem, DimacsParseError> {
    let file = File::open(path)?;
    dimacs::parse(file)
}
