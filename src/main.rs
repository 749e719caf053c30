use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;

use runmark::parser::{MarkupParser, Placeholders, tokenize};
use runmark::style::{DefaultStyleResolver, TextStyle, Theme};

mod cli;
use cli::{Cli, Commands, ThemeArg};

/// Parse a placeholder argument like "name=Ada" into (key, text)
fn parse_placeholder_arg(arg: &str) -> Result<(String, String), String> {
    let Some((key, text)) = arg.split_once('=') else {
        return Err(format!(
            "Invalid placeholder '{}'. Expected KEY=TEXT (e.g., name=Ada)",
            arg
        ));
    };

    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return Err(format!(
            "Invalid placeholder key '{}'. Keys use letters, digits and underscores",
            key
        ));
    }

    Ok((key.to_string(), text.to_string()))
}

fn read_all(path: Option<&PathBuf>) -> io::Result<String> {
    let mut buf = match path {
        Some(p) => fs::read_to_string(p)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    // Markup is inline; a single trailing newline is file framing
    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
    Ok(buf)
}

fn start_dir_for(input_path: &Option<PathBuf>) -> io::Result<PathBuf> {
    if let Some(p) = input_path {
        Ok(p.parent().unwrap_or(Path::new(".")).to_path_buf())
    } else {
        std::env::current_dir()
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            file,
            json,
            theme,
            placeholders,
            diagnostics,
        } => {
            let start_dir = start_dir_for(&file)?;
            let (mut cfg, cfg_path) = runmark::config::load(cli.config.as_deref(), &start_dir)?;

            if let Some(path) = &cfg_path {
                log::debug!("Using config from: {}", path.display());
            } else {
                log::debug!("Using default config");
            }

            if let Some(theme) = theme {
                cfg.theme = match theme {
                    ThemeArg::Light => Theme::Light,
                    ThemeArg::Dark => Theme::Dark,
                };
            }

            let mut map = Placeholders::new();
            for arg in &placeholders {
                match parse_placeholder_arg(arg) {
                    Ok((key, text)) => {
                        map.insert(key, text);
                    }
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(2);
                    }
                }
            }

            let input = read_all(file.as_ref())?;
            let resolver = DefaultStyleResolver::from_config(&cfg);
            let parser =
                MarkupParser::new(&resolver).with_max_nesting_depth(cfg.max_nesting_depth);
            let output = parser.parse_with_diagnostics(&input, &TextStyle::new(), &map);

            if json {
                let rendered = serde_json::to_string_pretty(&output.runs)
                    .map_err(|e| io::Error::other(e.to_string()))?;
                println!("{rendered}");
            } else {
                println!("{:#?}", output.runs);
            }

            if diagnostics {
                for diag in &output.diagnostics {
                    eprintln!("\x1b[33mwarning\x1b[0m: {diag}");
                }
            }
            Ok(())
        }
        Commands::Tokens { file } => {
            let input = read_all(file.as_ref())?;
            for token in tokenize(&input) {
                println!("{} {} {:?}", token.position, token.kind.label(), token.raw);
            }
            Ok(())
        }
    }
}
