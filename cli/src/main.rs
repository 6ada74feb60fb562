//! rtfprint CLI - RTF transcript decoding and pagination tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use rtfprint::{
    detect_format_from_path, parse_file_with_options, render, ApproximateMetrics, JsonFormat,
    Layout, PageSelection, ParseOptions, Printout, TextEncoding, TextOptions,
};

#[derive(Parser)]
#[command(name = "rtfprint")]
#[command(version)]
#[command(about = "Decode RTF transcripts and lay them out into printable pages", long_about = None)]
struct Cli {
    /// Input RTF file (prints its text when no command is given)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump the decoded document stream as JSON
    Stream {
        /// Input RTF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Treat the runtime text encoding as multi-byte
        #[arg(long)]
        multibyte: bool,
    },

    /// Extract the plain text of an RTF file
    Text {
        /// Input RTF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Lay a document out into pages
    Paginate {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Paper size (Letter, Legal, A4, ...)
        #[arg(long, default_value = "Letter", env = "RTFPRINT_MEDIUM")]
        medium: String,

        /// Landscape orientation
        #[arg(long)]
        landscape: bool,

        /// Title printed at the top of every page
        #[arg(long)]
        title: Option<String>,

        /// Subtitle printed under the title
        #[arg(long)]
        subtitle: Option<String>,

        /// Treat the input as plain text instead of RTF
        #[arg(long)]
        plain: bool,

        /// Fail on an unknown paper size instead of using Letter
        #[arg(long)]
        strict: bool,

        /// Default font face
        #[arg(long, default_value = rtfprint::model::DEFAULT_FONT_FACE)]
        font: String,

        /// Default font size in points
        #[arg(long, default_value = "12")]
        font_size: f32,

        /// Treat the runtime text encoding as multi-byte
        #[arg(long)]
        multibyte: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Print a header with the title and page number on each page
        #[arg(long)]
        headers: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Show document information
    Info {
        /// Input RTF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Plain text, pages separated by form feeds
    Text,
    /// Positioned runs as JSON
    Json,
}

struct PaginateArgs {
    medium: String,
    landscape: bool,
    title: Option<String>,
    subtitle: Option<String>,
    plain: bool,
    strict: bool,
    font: String,
    font_size: f32,
    multibyte: bool,
    format: OutputFormat,
    compact: bool,
    headers: bool,
    pages: Option<String>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Stream {
            input,
            output,
            compact,
            multibyte,
        }) => cmd_stream(&input, output.as_deref(), compact, multibyte),
        Some(Commands::Text { input, output }) => cmd_text(&input, output.as_deref()),
        Some(Commands::Paginate {
            input,
            output,
            medium,
            landscape,
            title,
            subtitle,
            plain,
            strict,
            font,
            font_size,
            multibyte,
            format,
            compact,
            headers,
            pages,
        }) => cmd_paginate(
            &input,
            output.as_deref(),
            PaginateArgs {
                medium,
                landscape,
                title,
                subtitle,
                plain,
                strict,
                font,
                font_size,
                multibyte,
                format,
                compact,
                headers,
                pages,
            },
        ),
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(input) = cli.input {
                cmd_text(&input, None)
            } else {
                println!("{}", "Usage: rtfprint <FILE>".yellow());
                println!("       rtfprint --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn parse_options(multibyte: bool) -> ParseOptions {
    let encoding = if multibyte {
        TextEncoding::MultiByte
    } else {
        TextEncoding::SingleByte
    };
    ParseOptions::new().with_text_encoding(encoding)
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_stream(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    multibyte: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let stream = parse_file_with_options(input, &parse_options(multibyte))?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::stream_to_json(&stream, format)?;
    write_output(output, &json)
}

fn cmd_text(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let stream = rtfprint::parse_file(input)?;
    write_output(output, &stream.plain_text())
}

fn cmd_paginate(
    input: &Path,
    output: Option<&Path>,
    args: PaginateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let half_points = (args.font_size * 2.0).round().max(1.0) as u32;

    let mut printout = Printout::new()
        .with_parse_options(parse_options(args.multibyte))
        .with_default_font(args.font, half_points)
        .with_medium(args.medium);
    if args.landscape {
        printout = printout.landscape();
    }
    if args.strict {
        printout = printout.strict();
    }
    if let Some(title) = args.title {
        printout = printout.with_title(title);
    }
    if let Some(subtitle) = args.subtitle {
        printout = printout.with_subtitle(subtitle);
    }

    let metrics = ApproximateMetrics::new();
    let layout = if args.plain {
        let text = fs::read_to_string(input)?;
        printout.paginate_plain_text(&text, &metrics)?
    } else {
        printout.paginate_file(input, &metrics)?
    };

    log::debug!(
        "{} laid out into {} pages ({}x{} px)",
        input.display(),
        layout.page_count(),
        layout.geometry.width_px,
        layout.geometry.height_px
    );

    for warning in &layout.warnings {
        eprintln!("{}: {}", "Warning".yellow().bold(), warning);
    }

    let content = match args.format {
        OutputFormat::Text => {
            let page_selection = if let Some(p) = args.pages.as_deref() {
                PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?
            } else {
                PageSelection::All
            };
            let options = TextOptions::new()
                .with_headers(args.headers)
                .with_pages(page_selection);
            render::to_text(&layout, &options)?
        }
        OutputFormat::Json => {
            let format = if args.compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            render::to_json(&layout, format)?
        }
    };

    write_output(output, &content)
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let format = detect_format_from_path(input)?;
    let stream = rtfprint::parse_file(input)?;
    let layout: Layout = Printout::new()
        .paginator()
        .paginate_stream(&stream, &ApproximateMetrics::new())?;

    let text = stream.plain_text();
    let words = text.split_whitespace().count();
    let chars = text.chars().count();

    if json {
        let info = serde_json::json!({
            "file": input.display().to_string(),
            "version": format.version,
            "fonts": stream.fonts.len(),
            "colors": stream.colors.len(),
            "events": stream.len(),
            "text_runs": stream.run_count(),
            "unclosed_groups": stream.unclosed_groups,
            "words": words,
            "characters": chars,
            "pages": layout.page_count(),
            "lines": layout.line_count(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: RTF {}", "Format".bold(), format.version);
    println!("{}: {}", "Fonts".bold(), stream.fonts.len());
    for (index, face) in stream.fonts.iter() {
        println!("  {} f{} {}", "•".dimmed(), index, face);
    }
    println!("{}: {}", "Colors".bold(), stream.colors.len());
    if stream.unclosed_groups > 0 {
        println!(
            "{}: {}",
            "Unclosed groups".yellow().bold(),
            stream.unclosed_groups
        );
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Text runs".bold(), stream.run_count());
    println!("{}: {}", "Words".bold(), words);
    println!("{}: {}", "Characters".bold(), chars);
    println!("{}: {} (Letter)", "Pages".bold(), layout.page_count());
    println!("{}: {}", "Lines".bold(), layout.line_count());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "rtfprint".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("RTF transcript decoding and pagination tool");
    println!();
    println!("License: MIT");
}
