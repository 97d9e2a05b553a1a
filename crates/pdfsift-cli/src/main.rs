//! pdfsift command-line entry point.

mod cli;

use std::error::Error;
use std::path::Path;

use clap::Parser;
use pdfsift::{LayoutOptions, Pdf, RenderOptions};
use serde_json::json;

use cli::{Cli, Command, parse_page_range};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let render = RenderOptions::default();
    let layout = LayoutOptions::default();

    match cli.command {
        Command::Text { file } => {
            let paper = open(&file)?.paper(&render, &layout)?;
            for section in &paper.sections {
                if !section.title.is_empty() {
                    println!("# {}", section.title);
                    println!();
                }
                for paragraph in &section.paragraphs {
                    println!("{paragraph}");
                    println!();
                }
            }
        }
        Command::Spans { file, pages } => {
            let pdf = open(&file)?;
            let indices = match pages {
                Some(spec) => parse_page_range(&spec, pdf.page_count())?,
                None => (0..pdf.page_count()).collect(),
            };
            let mut out = Vec::new();
            for index in indices {
                let page = pdf.page(index)?;
                let spans = page.spans(&render)?;
                out.push(json!({ "page": index + 1, "spans": spans }));
            }
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Sections { file } => {
            let paper = open(&file)?.paper(&render, &layout)?;
            println!("{}", serde_json::to_string_pretty(&paper)?);
        }
    }
    Ok(())
}

fn open(path: &Path) -> Result<Pdf, Box<dyn Error>> {
    Ok(Pdf::open_file(path)?)
}
