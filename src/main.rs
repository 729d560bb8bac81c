//! kingpad - print files with syntax highlighting

use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

use crossterm::terminal;
use crossterm::tty::IsTty;

use kingpad::config::Config;
use kingpad::document::FileStore;
use kingpad::error::{KingpadError, Result};
use kingpad::render::Renderer;
use kingpad::status::MessageLine;
use kingpad::syntax::SyntaxManager;
use kingpad::workspace::Workspace;

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    files: Vec<PathBuf>,
    line_numbers: bool,
    plain: bool,
    width: Option<usize>,
    list_languages: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(options) = parse_args(&args)? else {
        return Ok(());
    };

    let config = Config::load()?;
    let (syntax, failures) = SyntaxManager::from_config(&config)?;
    for (path, e) in &failures {
        eprintln!("{}: {}", path.display(), e);
    }

    if options.list_languages {
        for name in syntax.list_languages() {
            let exts = syntax
                .language(name)
                .map(|lang| lang.extensions.join(", "))
                .unwrap_or_default();
            println!("{:<12} {}", name, exts);
        }
        return Ok(());
    }

    if options.files.is_empty() {
        print_usage();
        return Err(KingpadError::NoFileName);
    }

    let stdout = io::stdout();
    let is_tty = stdout.is_tty();
    let renderer = Renderer {
        color: !options.plain && is_tty,
        line_numbers: options.line_numbers || config.line_numbers,
        tab_width: config.tab_width,
        max_width: options.width.or_else(|| {
            if is_tty {
                terminal::size().ok().map(|(cols, _)| cols as usize)
            } else {
                None
            }
        }),
    };

    let mut workspace = Workspace::new(Box::new(FileStore), syntax, MessageLine::new());
    let mut out = stdout.lock();
    for path in &options.files {
        let index = workspace.open(path)?;
        let tab = workspace.tab(index)?;
        renderer.render(&mut out, tab.document.text(), tab.highlighter())?;
    }

    Ok(())
}

/// Parse arguments; None means the request was handled (help, version)
fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                println!("kingpad {}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            "--line-numbers" | "-n" => options.line_numbers = true,
            "--plain" => options.plain = true,
            "--languages" => options.list_languages = true,
            "--width" => {
                let value = iter
                    .next()
                    .ok_or_else(|| KingpadError::Message("--width needs a value".to_string()))?;
                let width = value
                    .parse::<usize>()
                    .map_err(|_| KingpadError::Message(format!("Invalid width: {}", value)))?;
                options.width = Some(width);
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(KingpadError::Message(format!("Unknown option: {}", flag)));
            }
            file => options.files.push(PathBuf::from(file)),
        }
    }

    Ok(Some(options))
}

fn print_usage() {
    println!("kingpad {} - print files with syntax highlighting", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: kingpad [OPTIONS] FILE...");
    println!();
    println!("Options:");
    println!("  -h, --help          Show this help message");
    println!("  -V, --version       Show version information");
    println!("  -n, --line-numbers  Number each line");
    println!("      --plain         No colors");
    println!("      --width N       Clip lines to N columns");
    println!("      --languages     List known languages");
    println!();
    println!("Settings are read from ~/.kingpad.toml and language files");
    println!("from ~/.config/kingpad/languages/*.toml.");
}
