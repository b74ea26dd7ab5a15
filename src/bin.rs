use gedtree::element::ElementKind;
use gedtree::{GedcomError, ParseFileError, Parser, Relation};
use std::env;
use std::fmt;
use std::io;
use std::process;

#[derive(Debug, Default)]
struct CliArgs {
    filename: Option<String>,
    individual_xref: Option<String>,
    criteria: Option<String>,
    ancestors_xref: Option<String>,
    lenient: bool,
    emit: bool,
    help: bool,
}

fn print_help() {
    println!(
        "gedtree - GEDCOM 5.5 inspection tool\n\
\n\
USAGE:\n\
  gedtree <file.ged>\n\
  gedtree --individual <XREF> <file.ged>\n\
  gedtree --criteria <EXPR> <file.ged>\n\
  gedtree --ancestors <XREF> <file.ged>\n\
  gedtree --emit <file.ged>\n\
\n\
OPTIONS:\n\
  -h, --help            Print this help\n\
  --individual <XREF>   Display a single individual (e.g. @I1@)\n\
  --criteria <EXPR>     List individuals matching a criteria string,\n\
                        e.g. surname=Smith:birth_range=1820-1840\n\
  --ancestors <XREF>    List the natural ancestors of an individual\n\
  --emit                Re-serialize the parsed tree to stdout\n\
  --lenient             Recover from malformed lines instead of failing\n\
\n\
Without options, a summary of record counts is printed.\n"
    );
}

fn parse_args(argv: &[String]) -> Result<CliArgs, CliError> {
    let mut out = CliArgs::default();

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "-h" | "--help" => {
                out.help = true;
                i += 1;
            }
            "--individual" => {
                let xref = argv
                    .get(i + 1)
                    .ok_or_else(|| CliError::Usage("--individual expects an XREF".to_string()))?;
                out.individual_xref = Some(xref.clone());
                i += 2;
            }
            "--criteria" => {
                let expr = argv
                    .get(i + 1)
                    .ok_or_else(|| CliError::Usage("--criteria expects an expression".to_string()))?;
                out.criteria = Some(expr.clone());
                i += 2;
            }
            "--ancestors" => {
                let xref = argv
                    .get(i + 1)
                    .ok_or_else(|| CliError::Usage("--ancestors expects an XREF".to_string()))?;
                out.ancestors_xref = Some(xref.clone());
                i += 2;
            }
            "--lenient" => {
                out.lenient = true;
                i += 1;
            }
            "--emit" => {
                out.emit = true;
                i += 1;
            }
            other if other.starts_with('-') => {
                return Err(CliError::Usage(format!("Unknown option: {other}")));
            }
            value => {
                if out.filename.is_some() {
                    return Err(CliError::Usage(format!(
                        "Found more args than expected: {:?}",
                        &argv[1..]
                    )));
                }
                out.filename = Some(value.to_string());
                i += 1;
            }
        }
    }

    Ok(out)
}

#[derive(Debug)]
enum CliError {
    Io(io::Error),
    Gedcom(GedcomError),
    Usage(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CliError::Io(err) => write!(f, "IO error: {err}"),
            CliError::Gedcom(err) => write!(f, "Gedcom error: {err}"),
            CliError::Usage(msg) => write!(f, "Usage error: {msg}"),
        }
    }
}

impl From<ParseFileError> for CliError {
    fn from(err: ParseFileError) -> Self {
        match err {
            ParseFileError::Io(err) => CliError::Io(err),
            ParseFileError::Gedcom(err) => CliError::Gedcom(err),
        }
    }
}

impl From<GedcomError> for CliError {
    fn from(err: GedcomError) -> Self {
        CliError::Gedcom(err)
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Io(err)
    }
}

fn main() {
    match run() {
        Ok(()) => process::exit(0),
        Err(e) => {
            let exit_code = match &e {
                CliError::Io(_) => 1,
                CliError::Gedcom(_) => 2,
                CliError::Usage(_) => 3,
            };
            eprintln!("Error: {e}");
            process::exit(exit_code);
        }
    }
}

fn run() -> Result<(), CliError> {
    let argv: Vec<String> = env::args().collect();
    let args = parse_args(&argv)?;

    if args.help {
        print_help();
        return Ok(());
    }

    let filename = args
        .filename
        .as_deref()
        .ok_or_else(|| CliError::Usage("Missing filename.".to_string()))?;

    let mut parser = Parser::new();
    parser.parse_file(filename, !args.lenient)?;

    if args.emit {
        let stdout = io::stdout();
        parser.save_gedcom(&mut stdout.lock())?;
        return Ok(());
    }

    if let Some(xref) = args.individual_xref.as_deref() {
        let id = parser.get_element_by_pointer(xref)?;
        let individual = parser.individual(id)?;
        print_individual_summary(xref, individual);
        print!("{}", parser.tree().to_gedcom_string(id, true));
        return Ok(());
    }

    if let Some(expression) = args.criteria.as_deref() {
        for id in parser.get_element_list() {
            let Ok(individual) = parser.individual(id) else {
                continue;
            };
            if individual.criteria_match(expression) {
                print_individual_summary(parser.tree().get(id).get_pointer(), individual);
            }
        }
        return Ok(());
    }

    if let Some(xref) = args.ancestors_xref.as_deref() {
        let id = parser.get_element_by_pointer(xref)?;
        for ancestor in parser.get_ancestors(id, Relation::Natural)? {
            let individual = parser.individual(ancestor)?;
            print_individual_summary(parser.tree().get(ancestor).get_pointer(), individual);
        }
        return Ok(());
    }

    print_stats(&parser);
    Ok(())
}

fn print_individual_summary(xref: &str, individual: gedtree::element::individual::Individual) {
    let (given_name, surname) = individual.get_name();
    let mut line = format!("{xref} {given_name} /{surname}/");
    let birth_year = individual.get_birth_year();
    let death_year = individual.get_death_year();
    if birth_year >= 0 || death_year >= 0 {
        let shown = |year: i32| {
            if year >= 0 {
                year.to_string()
            } else {
                String::from("?")
            }
        };
        line.push_str(&format!(" ({}-{})", shown(birth_year), shown(death_year)));
    }
    println!("{line}");
}

fn print_stats(parser: &Parser) {
    let mut individuals = 0;
    let mut families = 0;
    let mut objects = 0;
    let mut others = 0;
    for &record in parser.get_root_child_elements() {
        match parser.tree().get(record).kind() {
            ElementKind::Individual => individuals += 1,
            ElementKind::Family => families += 1,
            ElementKind::Object => objects += 1,
            _ => others += 1,
        }
    }

    println!("----------------------");
    println!("| GEDCOM Data Stats: |");
    println!("----------------------");
    println!("  individuals: {individuals}");
    println!("  families: {families}");
    println!("  multimedia: {objects}");
    println!("  other records: {others}");
    println!("  elements: {}", parser.get_element_list().len());
    println!("----------------------");
}
