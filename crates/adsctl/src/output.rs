//! Output formatting - terminal rendering of reports and messages
//!
//! ASCII markers, colors only on a terminal. Pipes get the plain text view.

use ads_common::render::{self, Block};
use ads_common::Report;
use console::Term;
use owo_colors::OwoColorize;

const MIN_WIDTH: usize = 40;
const MAX_WIDTH: usize = 100;

/// Formats accepted by `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Markdown,
    Json,
}

fn terminal_width() -> usize {
    let (_, cols) = Term::stdout().size();
    (cols as usize).clamp(MIN_WIDTH, MAX_WIDTH)
}

fn fill(text: &str, indent: &str, width: usize) -> String {
    let options = textwrap::Options::new(width)
        .initial_indent(indent)
        .subsequent_indent(indent);
    textwrap::fill(text, options)
}

/// Print a report in the requested format
pub fn print_report(report: &Report, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text if Term::stdout().is_term() => display_report(report),
        OutputFormat::Text => print!("{}", render::format_text(report)),
        OutputFormat::Markdown => print!("{}", render::format_markdown(report)),
        OutputFormat::Json => println!("{}", report.to_json_pretty()?),
    }
    Ok(())
}

/// Colored report view, section by section
pub fn display_report(report: &Report) {
    let width = terminal_width();

    println!();
    println!("{}", "META ADS EXPERT REPORT".bold());
    println!("{}", "=".repeat(width.min(60)).dimmed());

    for section in render::sections(report) {
        println!();
        println!("{}", section.title.to_uppercase().bright_cyan().bold());
        for block in &section.blocks {
            match block {
                Block::Heading(text) => println!("  [{}]", text.bold()),
                Block::Field { label, value } => {
                    println!("  {} {}", format!("{}:", label).dimmed(), value)
                }
                Block::Paragraph(text) => println!("{}", fill(text, "  ", width)),
                Block::Preformatted(text) => {
                    for line in text.lines() {
                        println!("  {} {}", "|".dimmed(), line.bright_green());
                    }
                }
                Block::Item { name, detail } => {
                    println!("  * {}", name.bold());
                    println!("{}", fill(detail, "      ", width).dimmed());
                }
                Block::Tags(tags) => {
                    if !tags.is_empty() {
                        let joined: Vec<String> = tags
                            .iter()
                            .map(|t| format!("[{}]", t).yellow().to_string())
                            .collect();
                        println!("  {}", joined.join(" "));
                    }
                }
                Block::Bullets(items) => {
                    for item in items {
                        println!("  - {}", item);
                    }
                }
            }
        }
    }
    println!();
}

/// Display an error
pub fn display_error(message: &str) {
    eprintln!();
    eprintln!("[ERROR] {}", message.red());
    eprintln!();
}

/// Display a success message. Status lines go to stderr so stdout carries
/// only the report.
pub fn display_success(message: &str) {
    eprintln!("[OK] {}", message.green());
}

/// Display an info message
pub fn display_info(message: &str) {
    eprintln!("[INFO] {}", message);
}

/// Display a warning
pub fn display_warning(message: &str) {
    eprintln!("[WARNING] {}", message.yellow());
}
