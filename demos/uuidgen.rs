//! Simple command that prints one or '-n count' UUID strings, random by default or name-based
//! with '--name NAME' and '--namespace NAMESPACE'

use std::{env, io, io::Write, process::ExitCode};
use uuid_factory::{library, Rfc4122Generator, UuidFactory, UuidRequirements};

#[derive(Default)]
struct Options {
    count: Option<usize>,
    name: Option<String>,
    namespace: Option<String>,
}

fn main() -> io::Result<ExitCode> {
    let options = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opt) => opt,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} [-n count] [--name NAME [--namespace NAMESPACE]]",
                    program.as_deref().unwrap_or("uuidgen")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let factory = UuidFactory::with_defaults().and_then(|mut factory| {
        factory.add_generator(50, Rfc4122Generator::md5_name(None)?)?;
        Ok(factory)
    });
    let mut factory = match factory {
        Ok(factory) => factory,
        Err(err) => {
            eprintln!("Error: {}", err);
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut requirements = UuidRequirements::new();
    if let Some(name) = &options.name {
        library::request_name(&mut requirements, name);
        library::request_namespace(&mut requirements, options.namespace.as_deref().unwrap_or(""));
    }

    let mut buf = io::BufWriter::new(io::stdout());
    for _ in 0..options.count.unwrap_or(1) {
        match factory.generate(&requirements) {
            Ok(uuid) => writeln!(buf, "{}", uuid)?,
            Err(err) => {
                eprintln!("Error: {}", err);
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut options = Options::default();
    while let Some(arg) = args.next() {
        let slot = match arg.as_str() {
            "-n" => None,
            "--name" => Some(&mut options.name),
            "--namespace" => Some(&mut options.namespace),
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        };
        let Some(value) = args.next() else {
            return Err(format!("argument to option '{}' missing", arg));
        };
        match slot {
            Some(slot) => {
                if slot.replace(value).is_some() {
                    return Err(format!("option '{}' given more than once", arg));
                }
            }
            None => {
                let Ok(c) = value.parse() else {
                    return Err(format!("invalid argument to option 'n': '{}'", value));
                };
                if options.count.replace(c).is_some() {
                    return Err("option 'n' given more than once".to_owned());
                }
            }
        }
    }
    if options.namespace.is_some() && options.name.is_none() {
        return Err("option 'namespace' requires option 'name'".to_owned());
    }
    Ok(options)
}
