use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "runmark")]
#[command(author, version)]
#[command(about = "Parse lightweight inline markup into styled text runs")]
#[command(
    long_about = "Runmark turns inline markup such as **bold**, ~~struck~~, ^super^ and \
    [links](example.com) into a flat list of styled runs. Unmatched, crossing or overly \
    nested markers degrade to literal text instead of failing."
)]
#[command(after_help = "\
EXAMPLES:

    # Show the runs for a file
    runmark parse message.txt

    # Parse from stdin as JSON
    echo 'Hello **bold** world' | runmark parse --json

    # Substitute a placeholder
    echo 'Hi {name}!' | runmark parse --placeholder name=Ada

    # Inspect the token stream
    echo '*a* ~b~' | runmark tokens

CONFIGURATION:

Runmark looks for configuration files in this order:
  1. Explicit --config path
  2. runmark.toml or .runmark.toml in current/parent directories
  3. ~/.config/runmark/config.toml (XDG)
  4. Built-in defaults

Example .runmark.toml:

    theme = \"dark\"
    max_nesting_depth = 2

    [styles.code]
    font_family = \"Iosevka\"
")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    #[arg(help = "Path to configuration file")]
    #[arg(
        long_help = "Path to a custom configuration file. If not specified, runmark will \
        search for .runmark.toml or runmark.toml in the current directory and its parents, \
        then fall back to ~/.config/runmark/config.toml."
    )]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse markup and print the resulting runs
    #[command(
        long_about = "Parse inline markup and print the resulting runs: styled text, links, \
        placeholders and super/subscript spans, in document order."
    )]
    #[command(after_help = "\
EXAMPLES:

    # Debug output
    runmark parse message.txt

    # JSON output
    runmark parse --json message.txt

    # Report markers that were rendered literally
    echo '*a~~b*c~~' | runmark parse --diagnostics")]
    Parse {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,

        /// Print runs as JSON
        #[arg(long)]
        json: bool,

        /// Override the configured theme
        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,

        /// Placeholder substitution, repeatable
        #[arg(long = "placeholder", value_name = "KEY=TEXT")]
        #[arg(
            long_help = "Substitute {KEY} or {{KEY}} with an inline object holding TEXT. \
            May be given several times. Unknown keys are left as literal text."
        )]
        placeholders: Vec<String>,

        /// Also print diagnostics to stderr
        #[arg(long)]
        diagnostics: bool,
    },
    /// Print the token stream, one token per line
    #[command(after_help = "\
Each line has the form `<byte offset> <KIND> <raw source>`.")]
    Tokens {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,
    },
}
