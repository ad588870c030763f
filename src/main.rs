//! Slide Render CLI
//!
//! Usage:
//!   slide-render [OPTIONS] [PAYLOAD]
//!
//! Options:
//!   -c, --context <CONTEXT>    inline, lightbox or export
//!   -t, --template <ID>        Template id (legacy preset or catalog entry)
//!       --catalog <FILE>       Template catalog (TOML format)
//!       --category <KEY>       Catalog category to pick templates from
//!   -o, --output <FILE>        Write HTML here instead of stdout
//!       --strict               Reject content that breaks the field rules
//!   -d, --debug                Dump the visual tree to stderr
//!   -h, --help                 Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use log::{debug, info};

use slide_render::template::TemplateCatalog;
use slide_render::{
    export_surface, render_slide, resolve_style, ExportPayload, HtmlConfig, RenderConfig,
    RenderContext, StyleResolver, TemplateStyle,
};

#[derive(Parser)]
#[command(name = "slide-render")]
#[command(about = "Render promotional slides from content and a template style")]
struct Cli {
    /// JSON payload file (reads from stdin if not provided)
    payload: Option<PathBuf>,

    /// Render context
    #[arg(short, long, default_value = "inline")]
    context: RenderContext,

    /// Template id; overrides any style in the payload
    #[arg(short, long)]
    template: Option<String>,

    /// Template catalog file (TOML format)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Catalog category to pick templates from
    #[arg(long, requires = "catalog")]
    category: Option<String>,

    /// Output file (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit only the slide markup, without the surrounding document
    #[arg(long)]
    fragment: bool,

    /// Reject content that breaks the field rules instead of rendering it
    #[arg(long)]
    strict: bool,

    /// Debug mode: dump the visual tree to stderr
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // If no payload file and stdin is a terminal (interactive), show intro help
    if cli.payload.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Load catalog
    let catalog = match &cli.catalog {
        Some(path) => match TemplateCatalog::from_file(path) {
            Ok(c) => Some(c),
            Err(e) => {
                eprintln!("Error loading catalog '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    // Read payload
    let source = match &cli.payload {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut payload = match ExportPayload::from_json(&source) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.strict {
        if let Err(e) = payload.content().validate() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    if let Some(style) = choose_style(&cli, catalog.as_ref()) {
        payload.template_style = Some(style);
    }

    let config = RenderConfig::new()
        .with_context(cli.context)
        .with_html(if cli.fragment {
            HtmlConfig::fragment()
        } else {
            HtmlConfig::new()
        })
        .with_debug(cli.debug);

    let html = match cli.context {
        RenderContext::Export => match run_export(payload, &config) {
            Ok(html) => html,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        _ => render_slide(&payload.content(), &payload.style(), &config),
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, html) {
                eprintln!("Error writing file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
            info!("wrote {}", path.display());
        }
        None => println!("{}", html),
    }
}

/// The style selected on the command line, if any
fn choose_style(cli: &Cli, catalog: Option<&TemplateCatalog>) -> Option<TemplateStyle> {
    match (catalog, &cli.category) {
        (Some(catalog), Some(category)) => {
            let resolver = StyleResolver::for_category(catalog, category);
            let id = resolver.effective_id(cli.template.as_deref());
            debug!("category '{}' uses template '{}'", category, id);
            Some(resolver.resolve(id))
        }
        (Some(catalog), None) => {
            let id = cli.template.as_deref()?;
            let entry = catalog.find_template(id).map(|t| t.style());
            Some(resolve_style(id, entry.as_ref()))
        }
        (None, _) => cli.template.as_deref().map(|id| resolve_style(id, None)),
    }
}

/// Drive the export handoff to completion on a single-threaded runtime
fn run_export(payload: ExportPayload, config: &RenderConfig) -> Result<String, Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let surface = runtime.block_on(export_surface(payload, config))?;
    Ok(surface.html)
}

fn print_intro() {
    println!(
        r#"Slide Render - promotional slides from content and a template style

USAGE:
    slide-render [OPTIONS] [PAYLOAD]
    echo '<json>' | slide-render

OPTIONS:
    -c, --context      inline (default), lightbox or export (1920x1080)
    -t, --template     Template id, e.g. template1, template2, template3
    --catalog          Template catalog (TOML file)
    --category         Catalog category, e.g. research_spotlight
    -o, --output       Write HTML to a file
    --fragment         Emit the slide markup only
    --strict           Reject content that breaks the field rules
    -d, --debug        Dump the visual tree
    -h, --help         Print help

PAYLOAD:
    {{"headline": "Q3 Results", "eventDate": "Oct 1", "eventLocation": "Room 100",
     "imageData": "<base64>", "templateStyle": {{"layout_type": "full_hero"}}}}

QUICK START:
    echo '{{"headline": "Hello"}}' | slide-render -t template2 > slide.html"#
    );
}
