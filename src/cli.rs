// File: ./src/cli.rs
//! Command-line parsing and help text shared by the binary.
use crate::import::MarkdownDialect;
use crate::model::Quadrant;
use anyhow::{Result, bail};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Import {
        file: PathBuf,
        dialect: Option<MarkdownDialect>,
        dry_run: bool,
    },
    List {
        quadrant: Option<Quadrant>,
        all: bool,
    },
    Export,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub root: Option<PathBuf>,
    pub command: Command,
}

/// Parses the arguments after the binary name.
pub fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut root = None;
    let mut rest = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-r" | "--root" => match iter.next() {
                Some(path) => root = Some(PathBuf::from(path)),
                None => bail!("{} needs a path", arg),
            },
            _ => rest.push(arg.as_str()),
        }
    }

    let command = match rest.split_first() {
        None => Command::List {
            quadrant: None,
            all: false,
        },
        Some((&("-h" | "--help" | "help"), _)) => Command::Help,
        Some((&"import", opts)) => parse_import(opts)?,
        Some((&"list", opts)) => parse_list(opts)?,
        Some((&"export", [])) => Command::Export,
        Some((&"export", extra)) => bail!("export takes no arguments, got '{}'", extra.join(" ")),
        Some((other, _)) => bail!("Unknown command '{}'. See --help.", other),
    };

    Ok(Invocation { root, command })
}

fn parse_import(opts: &[&str]) -> Result<Command> {
    let mut file = None;
    let mut dialect = None;
    let mut dry_run = false;

    let mut iter = opts.iter();
    while let Some(opt) = iter.next() {
        match *opt {
            "--dry-run" | "-n" => dry_run = true,
            "--dialect" | "-d" => {
                let Some(key) = iter.next() else {
                    bail!("--dialect needs a value (checklist or fields)");
                };
                dialect = Some(
                    MarkdownDialect::from_key(key)
                        .ok_or_else(|| anyhow::anyhow!("Unknown dialect '{}'", key))?,
                );
            }
            "--fields" => dialect = Some(MarkdownDialect::FieldBlock),
            path if file.is_none() && !path.starts_with('-') => file = Some(PathBuf::from(path)),
            other => bail!("Unexpected import argument '{}'", other),
        }
    }

    let Some(file) = file else {
        bail!("import needs a Markdown file");
    };
    Ok(Command::Import {
        file,
        dialect,
        dry_run,
    })
}

fn parse_list(opts: &[&str]) -> Result<Command> {
    let mut quadrant = None;
    let mut all = false;

    let mut iter = opts.iter();
    while let Some(opt) = iter.next() {
        match *opt {
            "--all" | "-a" => all = true,
            "--quadrant" | "-q" => {
                let Some(key) = iter.next() else {
                    bail!("--quadrant needs a value (do, schedule, delegate, eliminate)");
                };
                quadrant = Some(
                    Quadrant::from_key(key)
                        .ok_or_else(|| anyhow::anyhow!("Unknown quadrant '{}'", key))?,
                );
            }
            other => bail!("Unexpected list argument '{}'", other),
        }
    }
    Ok(Command::List { quadrant, all })
}

/// `config_path` is shown when the config directory could be resolved.
pub fn print_help(binary_name: &str, config_path: Option<&str>) {
    println!(
        "Eisen v{} - Eisenhower-matrix tasks from Markdown",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!(
        "    {} [--root <path>] import <file.md> [--dialect checklist|fields] [--dry-run]",
        binary_name
    );
    println!(
        "    {} [--root <path>] list [--quadrant <q>] [--all]",
        binary_name
    );
    println!("    {} [--root <path>] export", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -d, --dialect <d>     checklist (default) or fields.");
    println!("    -n, --dry-run         Print parsed tasks without saving them.");
    println!("    -q, --quadrant <q>    do, schedule, delegate or eliminate (or 1-4).");
    println!("    -a, --all             Include completed tasks.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("CHECKLIST DIALECT:");
    println!("    # Section heading (used as description)");
    println!("    - [ ] Buy milk #errand importance:8 urgency:3");
    println!("    - [x] Done items are skipped");
    println!();
    println!("FIELD-BLOCK DIALECT:");
    println!("    Call dentist");
    println!("    Urgente: Sim");
    println!("    Importante: Não");
    println!("    Status: ❶ Executar      (❶ do, ❷ schedule, ❸ delegate, ❹ eliminate)");
    println!("    Deadlines: 10/05/2024");
    println!("    Finalizado: Não");
    println!();
    println!("EXPORT COMMAND:");
    println!(
        "    {} export > tasks.md      Save tasks as a Markdown checklist",
        binary_name
    );

    if let Some(path) = config_path {
        println!();
        println!("CONFIG FILE:");
        println!("    {}", path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_arguments_lists() {
        let inv = parse_args(&[]).unwrap();
        assert_eq!(inv.root, None);
        assert_eq!(
            inv.command,
            Command::List {
                quadrant: None,
                all: false
            }
        );
    }

    #[test]
    fn test_import_with_root_and_dialect() {
        let inv = parse_args(&args(&[
            "--root",
            "/tmp/x",
            "import",
            "notes.md",
            "--dialect",
            "fields",
            "-n",
        ]))
        .unwrap();
        assert_eq!(inv.root, Some(PathBuf::from("/tmp/x")));
        assert_eq!(
            inv.command,
            Command::Import {
                file: PathBuf::from("notes.md"),
                dialect: Some(MarkdownDialect::FieldBlock),
                dry_run: true,
            }
        );
    }

    #[test]
    fn test_list_quadrant() {
        let inv = parse_args(&args(&["list", "-q", "delegate", "--all"])).unwrap();
        assert_eq!(
            inv.command,
            Command::List {
                quadrant: Some(Quadrant::Delegate),
                all: true
            }
        );
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(parse_args(&args(&["import"])).is_err());
        assert!(parse_args(&args(&["import", "a.md", "--dialect", "yaml"])).is_err());
        assert!(parse_args(&args(&["frobnicate"])).is_err());
        assert!(parse_args(&args(&["--root"])).is_err());
    }
}
