//! Command-line argument definitions and page-range parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pdfsift",
    version,
    about = "Extract text, spans, and sections from PDF documents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the reconstructed document text (sections and paragraphs)
    Text {
        /// Path to the PDF file
        file: PathBuf,
    },
    /// Print positioned text spans as JSON
    Spans {
        /// Path to the PDF file
        file: PathBuf,
        /// Pages to include, e.g. "1-3,5" (1-based; default: all)
        #[arg(long)]
        pages: Option<String>,
    },
    /// Print reconstructed sections as JSON
    Sections {
        /// Path to the PDF file
        file: PathBuf,
    },
}

/// Parse a 1-based page range spec like `1-3,5` into 0-based indices.
pub fn parse_page_range(spec: &str, page_count: usize) -> Result<Vec<usize>, String> {
    let mut pages = Vec::new();
    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (start, end) = match part.split_once('-') {
            Some((a, b)) => (parse_page_number(a)?, parse_page_number(b)?),
            None => {
                let n = parse_page_number(part)?;
                (n, n)
            }
        };
        if start > end {
            return Err(format!("invalid range '{part}': start exceeds end"));
        }
        for page in start..=end {
            if page > page_count {
                return Err(format!(
                    "page {page} out of range (document has {page_count} pages)"
                ));
            }
            pages.push(page - 1);
        }
    }
    pages.sort_unstable();
    pages.dedup();
    Ok(pages)
}

fn parse_page_number(text: &str) -> Result<usize, String> {
    let n: usize = text
        .trim()
        .parse()
        .map_err(|_| format!("invalid page number '{}'", text.trim()))?;
    if n == 0 {
        return Err("page numbers are 1-based".to_string());
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_page() {
        assert_eq!(parse_page_range("3", 10).unwrap(), vec![2]);
    }

    #[test]
    fn range_and_list() {
        assert_eq!(parse_page_range("1-3,5", 10).unwrap(), vec![0, 1, 2, 4]);
    }

    #[test]
    fn overlapping_parts_dedupe() {
        assert_eq!(parse_page_range("2-4,3", 10).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn out_of_range_rejected() {
        assert!(parse_page_range("11", 10).is_err());
        assert!(parse_page_range("8-12", 10).is_err());
    }

    #[test]
    fn zero_and_garbage_rejected() {
        assert!(parse_page_range("0", 10).is_err());
        assert!(parse_page_range("abc", 10).is_err());
        assert!(parse_page_range("5-2", 10).is_err());
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::parse_from(["pdfsift", "text", "doc.pdf"]);
        assert!(matches!(cli.command, Command::Text { .. }));

        let cli = Cli::parse_from(["pdfsift", "spans", "doc.pdf", "--pages", "1-2"]);
        match cli.command {
            Command::Spans { pages, .. } => assert_eq!(pages.as_deref(), Some("1-2")),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
