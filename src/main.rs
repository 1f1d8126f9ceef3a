use clap::Parser;
use numex::engine::{definitions::parse_definition, registry::Registry};

/// numex evaluates a numeric expression against the standard operator,
/// function, and constant set.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Defines a user function, e.g. `-d "f(x) = x^2 + 1"`. May be
    /// repeated; later definitions can reference earlier ones.
    #[arg(short, long = "define")]
    define: Vec<String>,

    /// The expression to evaluate.
    expression: String,
}

fn main() {
    let args = Args::parse();

    let mut registry = Registry::standard();

    for text in &args.define {
        let func = parse_definition(text, &registry).unwrap_or_else(|e| {
                                                        eprintln!("{e}");
                                                        std::process::exit(1);
                                                    });
        if let Err(e) = registry.define_function(func) {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }

    match numex::eval_str(&args.expression, &registry) {
        Ok(value) => println!("{value}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}
