//! Command-line interface for the umlcanvas utility
//!
//! Imports XMI class diagrams and renders them as ASCII, SVG or PNG.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::colorizer::colorize_output;
use umlcanvas::core::logging::init_logging;
use umlcanvas::prelude::*;

const DEFAULT_PNG_OUTPUT: &str = "diagram.png";

/// umlcanvas - Import XMI class diagrams and draw them
#[derive(Parser)]
#[command(name = "umlcanvas")]
#[command(about = "Import XMI class diagrams and render them as ASCII, SVG or PNG")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import an XMI file and report the classes, relationships and warnings found
    Import {
        /// Input XMI file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the imported session as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render an XMI class diagram
    Render {
        /// Input XMI file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout; PNG defaults to diagram.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
        format: OutputFormat,

        /// Theme (default|darkMode|lightMode|blueprint)
        #[arg(long, default_value = "default", value_parser = parse_theme)]
        theme: Theme,

        /// Blank margin around SVG and PNG output, in pixels
        #[arg(long, default_value_t = 20.0)]
        padding: f64,

        /// When to use colors in ASCII output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },

    /// List available themes
    Themes {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Supported output formats
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Ascii,
    Svg,
    Png,
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    s.parse::<Theme>().map_err(|e| e.to_string())
}

fn is_stdio(path: &Path) -> bool {
    path.to_string_lossy() == "-"
}

/// Main CLI application
#[derive(Default)]
pub struct UmlCanvasApp {
    importer: XmiImporter,
}

impl UmlCanvasApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level = std::env::var("UMLCANVAS_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());
        let log_format = std::env::var("UMLCANVAS_LOG_FORMAT")
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level), Some(&log_format)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("umlcanvas v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Import { input, json } => self.import_command(input, json, cli.verbose),
            Commands::Render {
                input,
                output,
                format,
                theme,
                padding,
                color,
            } => {
                let config = RenderConfig::new(theme).with_padding(padding);
                self.render_command(input, output, format, config, color, cli.verbose)
            }
            Commands::Themes { json } => self.themes_command(json),
        }
    }

    fn import(&self, input: Option<PathBuf>, verbose: bool) -> Result<Diagram> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }
        self.importer.import(&content)
    }

    /// Handle the import command
    fn import_command(&self, input: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
        let diagram = self.import(input, verbose)?;
        let report = if json {
            diagram.to_json()?
        } else {
            describe(&diagram)
        };
        self.write_output(None, &report)
    }

    /// Handle the render command
    fn render_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        format: OutputFormat,
        config: RenderConfig,
        color: ColorChoice,
        verbose: bool,
    ) -> Result<()> {
        let diagram = self.import(input, verbose)?;
        if verbose && !diagram.warnings().is_empty() {
            eprintln!("{} element(s) skipped during import", diagram.warnings().len());
        }

        debug!(?format, theme = %config.theme, "Rendering diagram");
        match format {
            OutputFormat::Ascii => {
                let ascii = AsciiRenderer::with_config(config).render(&diagram)?;
                let text = if should_colorize(output.as_deref(), color) {
                    colorize_output(&ascii, config.theme)
                } else {
                    ascii
                };
                self.write_output(output, &text)
            }
            OutputFormat::Svg => {
                let svg = SvgRenderer::with_config(config).render(&diagram)?;
                self.write_output(output, &svg)
            }
            OutputFormat::Png => {
                let path = output.unwrap_or_else(|| PathBuf::from(DEFAULT_PNG_OUTPUT));
                if is_stdio(&path) {
                    return Err(anyhow!("PNG output needs a file path, not stdout"));
                }
                let bytes = PngRenderer::with_config(config).render(&diagram)?;
                fs::write(&path, &bytes)
                    .with_context(|| format!("Failed to write output file '{}'", path.display()))?;
                info!(path = %path.display(), bytes = bytes.len(), "Wrote PNG");
                Ok(())
            }
        }
    }

    /// Handle the themes command
    fn themes_command(&self, json: bool) -> Result<()> {
        if json {
            let themes: Vec<_> = Theme::ALL
                .iter()
                .map(|theme| {
                    serde_json::json!({
                        "name": theme.to_string(),
                        "palette": theme.palette(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&themes)?);
        } else {
            println!("Available themes:");
            for theme in Theme::ALL {
                let palette = theme.palette();
                println!(
                    "  {:<10} background {}  line {}  text {}",
                    theme.to_string(),
                    palette.background,
                    palette.line,
                    palette.text
                );
            }
        }
        Ok(())
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if !is_stdio(&path) => fs::read_to_string(&path)
                .with_context(|| format!("Failed to read input file '{}'", path.display())),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if !is_stdio(&path) => fs::write(&path, content)
                .with_context(|| format!("Failed to write output file '{}'", path.display())),
            _ => {
                let mut stdout = io::stdout();
                stdout.write_all(content.as_bytes())?;
                if !content.is_empty() && !content.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
                Ok(())
            }
        }
    }
}

/// Determine if we should colorize based on the choice and output destination
fn should_colorize(output: Option<&Path>, color: ColorChoice) -> bool {
    match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            match output {
                Some(path) if !is_stdio(path) => false,
                _ => crossterm::tty::IsTty::is_tty(&io::stdout()),
            }
        }
    }
}

/// Human-readable report of an imported session
fn describe(diagram: &Diagram) -> String {
    let mut lines = vec![format!("Classes: {}", diagram.class_count())];
    for class in diagram.classes() {
        lines.push(format!(
            "  {} ({}) at {},{} size {}x{}, {} attribute(s), {} method(s)",
            class.name,
            class.id,
            class.x,
            class.y,
            class.width,
            class.height,
            class.attributes.len(),
            class.methods.len()
        ));
    }

    lines.push(format!("Relationships: {}", diagram.relationship_count()));
    for rel in diagram.relationships() {
        let name = |class: Option<&ClassRecord>| {
            class.map(|c| c.name.clone()).unwrap_or_default()
        };
        lines.push(format!(
            "  {} {}: {} -> {}",
            rel.kind(),
            rel.id(),
            name(diagram.from_class(rel)),
            name(diagram.to_class(rel))
        ));
    }

    lines.push(format!("Warnings: {}", diagram.warnings().len()));
    for warning in diagram.warnings() {
        lines.push(format!("  - {}", warning));
    }
    lines.join("\n")
}
