use std::fs;

use clap::Parser;
use tagcalc::{
    evaluate,
    sequence::Tag,
    session::{FormulaSession, Suggestion, SuggestionSource},
};

/// tagcalc evaluates arithmetic formulas built from tags and operator
/// symbols.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells tagcalc to look at a file instead of an inline input.
    #[arg(short, long)]
    file: bool,

    /// Interpret the input as a session script of widget events (tag, pick,
    /// op, set, undo, show, calc) instead of a plain expression.
    #[arg(short, long)]
    session: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let input = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    if args.session {
        run_session(&input);
    } else {
        match evaluate(&input) {
            Ok(value) => println!("{value}"),
            Err(e) => eprintln!("{e}"),
        }
    }
}

/// Built-in demo catalog standing in for the host's suggestion store.
struct Catalog {
    entries: Vec<Suggestion>,
}

impl Catalog {
    fn new() -> Self {
        let entries = [("revenue", "sales", 2500.0),
                       ("cost", "sales", 1200.0),
                       ("margin", "finance", 15.0),
                       ("headcount", "ops", 12.0),
                       ("churn", "growth", 4.0)]
            .into_iter()
            .map(|(name, category, value)| Suggestion { name: name.to_string(),
                                                        value,
                                                        category: category.to_string() })
            .collect();

        Self { entries }
    }
}

impl SuggestionSource for Catalog {
    fn lookup(&self, query: &str) -> Vec<Suggestion> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .filter(|suggestion| suggestion.name.to_lowercase().contains(&query))
            .take(5)
            .cloned()
            .collect()
    }
}

/// Replays a session script against a fresh formula session.
///
/// One event per line; `#` starts a comment. Errors are reported and the
/// session continues, mirroring the widget's correct-and-retry flow.
fn run_session(script: &str) {
    let catalog = Catalog::new();
    let mut session = FormulaSession::new();

    for line in script.lines() {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        if command.starts_with('#') {
            continue;
        }

        match command {
            "tag" => {
                let (Some(title), Some(value)) = (words.next(), words.next()) else {
                    eprintln!("Usage: tag <title> <value> [category]");
                    continue;
                };
                let Ok(value) = value.parse::<f64>() else {
                    eprintln!("'{value}' is not a number.");
                    continue;
                };
                let category = words.next().unwrap_or("custom");
                session.on_add_tag(Tag::new(title, category, value));
            },

            "pick" => {
                let Some(query) = words.next() else {
                    eprintln!("Usage: pick <query>");
                    continue;
                };
                match catalog.lookup(query).into_iter().next() {
                    Some(suggestion) => session.on_add_tag(suggestion.into()),
                    None => eprintln!("No suggestion matches '{query}'."),
                }
            },

            "op" => {
                let Some(symbol) = words.next() else {
                    eprintln!("Usage: op <symbol>");
                    continue;
                };
                if let Err(e) = session.on_add_operator(symbol) {
                    eprintln!("{e}");
                }
            },

            "set" => {
                let (Some(index), Some(value)) = (words.next(), words.next()) else {
                    eprintln!("Usage: set <index> <value>");
                    continue;
                };
                let (Ok(index), Ok(value)) = (index.parse::<usize>(), value.parse::<f64>()) else {
                    eprintln!("Usage: set <index> <value>");
                    continue;
                };
                if let Err(e) = session.on_update_tag_value(index, value) {
                    eprintln!("{e}");
                }
            },

            "undo" => session.on_remove_last(),

            "show" => println!("{}", render_sequence(&session)),

            "calc" => match session.on_compute() {
                Ok(value) => println!("{value}"),
                Err(e) => eprintln!("{e}"),
            },

            other => eprintln!("Unknown session command '{other}'."),
        }
    }
}

/// Renders the current sequence the way the widget displays its chips.
fn render_sequence(session: &FormulaSession) -> String {
    let mut parts = Vec::new();

    for (index, tag) in session.current_tags().iter().enumerate() {
        parts.push(format!("{}({})", tag.title, tag.value));
        if let Some(op) = session.current_operators().get(index) {
            parts.push(op.to_string());
        }
    }

    parts.join(" ")
}
