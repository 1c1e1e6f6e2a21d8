//! Graphic CLI - Describe, render and compare graphic documents
//!
//! Commands: describe, render, compare, fonts
//! Outputs JSON to stdout
//! Returns 2 when compared graphics differ

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use graphic_core::{
    fingerprint, graphic_size, is_zero_area, print_expression, save_png,
    text::{font_book, install_font_book},
    Config, Graphic, GraphicSpec, Locale,
};

#[derive(Parser)]
#[command(name = "graphic-cli")]
#[command(about = "Graphic CLI - composable 2D pictures from JSON documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the config file
    #[arg(short, long, default_value = "graphic.json")]
    config: PathBuf,

    /// Language of printed expressions (en, it, de, fr); overrides the config
    #[arg(short, long)]
    locale: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the expression, size and anchor of a graphic
    Describe {
        /// Graphic document
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Render a graphic to a PNG file
    Render {
        /// Graphic document
        #[arg(short, long)]
        file: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        out: PathBuf,

        /// Draw the bounds and the anchor on top of the graphic
        #[arg(long)]
        debug: bool,

        /// Also print the image as a data URI
        #[arg(long)]
        data_uri: bool,
    },

    /// Check whether two graphics render identically
    Compare { first: PathBuf, second: PathBuf },

    /// List the font families available to text
    Fonts,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => return fail(e.to_string()),
    };
    let locale = match cli.locale.as_deref() {
        None => config.locale,
        Some(code) => match Locale::from_code(code) {
            Some(locale) => locale,
            None => return fail(format!("Unknown locale: {}", code)),
        },
    };
    install_font_book(config.font_book());

    match cli.command {
        Commands::Describe { file } => {
            let graphic = match load(&file) {
                Ok(g) => g,
                Err(e) => return fail(e),
            };
            let (width, height) = graphic_size(&graphic);
            let anchor = graphic.anchor();
            emit(&json!({
                "expression": print_expression(&graphic, locale),
                "width": width,
                "height": height,
                "anchor": {"x": anchor.x, "y": anchor.y},
                "zeroArea": is_zero_area(&graphic),
                "fingerprint": fingerprint(&graphic),
            }));
            ExitCode::SUCCESS
        }

        Commands::Render {
            file,
            out,
            debug,
            data_uri,
        } => {
            let graphic = match load(&file) {
                Ok(g) => g,
                Err(e) => return fail(e),
            };
            match save_png(&out, &graphic, debug) {
                Ok(image) => {
                    let mut output = json!({
                        "success": true,
                        "file": out,
                        "image": image,
                    });
                    if data_uri {
                        output["dataUri"] = Value::String(image.data_uri());
                    }
                    emit(&output);
                    ExitCode::SUCCESS
                }
                Err(e) => fail(e.to_string()),
            }
        }

        Commands::Compare { first, second } => {
            let (a, b) = match (load(&first), load(&second)) {
                (Ok(a), Ok(b)) => (a, b),
                (Err(e), _) | (_, Err(e)) => return fail(e),
            };
            let equal = a == b;
            emit(&json!({ "equal": equal }));
            if equal {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }

        Commands::Fonts => {
            let book = font_book();
            emit(&json!({
                "count": book.families().len(),
                "families": book.families(),
            }));
            ExitCode::SUCCESS
        }
    }
}

fn load(path: &Path) -> Result<Graphic, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    let tree: GraphicSpec = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid document {}: {}", path.display(), e))?;
    tree.build().map_err(|e| format!("{}: {}", path.display(), e))
}

fn emit(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!(r#"{{"error": "{}"}}"#, e),
    }
}

fn fail(message: impl Into<String>) -> ExitCode {
    let output = json!({
        "success": false,
        "error": message.into(),
    });
    println!("{}", output);
    ExitCode::FAILURE
}
