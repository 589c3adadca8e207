//! Simple command that prints one or '-n count' UUID strings of '-t 4|7', or inspects '-i TEXT'

use std::{env, io, io::Write, process::ExitCode};

use rfc_uuid::Uuid;

#[derive(Debug, Default)]
struct Options {
    count: Option<usize>,
    version: Option<u8>,
    inspect: Option<String>,
}

fn main() -> io::Result<ExitCode> {
    let opts = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opts) => opts,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} [-n count] [-t 4|7] | -i TEXT",
                    program.as_deref().unwrap_or("uuidgen")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());

    if let Some(text) = opts.inspect {
        let Ok(uuid) = Uuid::from_string(&text) else {
            eprintln!("Error: invalid UUID string: '{}'", text);
            return Ok(ExitCode::FAILURE);
        };
        writeln!(buf, "uuid:    {}", uuid)?;
        writeln!(buf, "urn:     {}", uuid.urn())?;
        writeln!(buf, "variant: {}", uuid.variant() as u8)?;
        match uuid.version() {
            Some(v) => writeln!(buf, "version: {}", v)?,
            None => writeln!(buf, "version: -")?,
        }
        if let Some(ts) = uuid.unix_ts_ms() {
            writeln!(buf, "unix_ts_ms: {}", ts)?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    let generate = match opts.version.unwrap_or(7) {
        4 => rfc_uuid::uuid4,
        _ => rfc_uuid::uuid7,
    };
    for _ in 0..opts.count.unwrap_or(1) {
        writeln!(buf, "{}", generate())?;
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();
    while let Some(arg) = args.next() {
        let name = match arg.as_str() {
            "-n" | "-t" | "-i" => &arg[1..],
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        };
        let Some(value) = args.next() else {
            return Err(format!("argument to option '{}' missing", name));
        };
        match name {
            "n" => {
                if opts.count.is_some() {
                    return Err("option 'n' given more than once".to_owned());
                }
                let Ok(c) = value.parse() else {
                    return Err(format!("invalid argument to option 'n': '{}'", value));
                };
                opts.count.replace(c);
            }
            "t" => {
                if opts.version.is_some() {
                    return Err("option 't' given more than once".to_owned());
                }
                match value.parse() {
                    Ok(v @ (4 | 7)) => opts.version.replace(v),
                    _ => return Err(format!("invalid argument to option 't': '{}'", value)),
                };
            }
            _ => {
                if opts.inspect.is_some() {
                    return Err("option 'i' given more than once".to_owned());
                }
                opts.inspect.replace(value);
            }
        }
    }
    if opts.inspect.is_some() && (opts.count.is_some() || opts.version.is_some()) {
        return Err("option 'i' cannot be combined with 'n' or 't'".to_owned());
    }
    Ok(opts)
}
