//! Paragraph detection by indent offset.
//!
//! Within a container, most lines share a common left offset; a line
//! that deviates from that typical offset (an indented first line, a
//! centered heading remnant) starts a new paragraph. The typical offset
//! is the median across all of the container's lines — except that a
//! container with exactly two lines takes the *second* line's offset as
//! the baseline, biasing toward reading an indented first line as a
//! paragraph start.

use std::collections::HashMap;

use crate::LayoutOptions;
use crate::lines::Line;

/// Split lines into paragraphs. Line order is preserved.
pub fn detect_paragraphs(lines: Vec<Line>, options: &LayoutOptions) -> Vec<Vec<Line>> {
    if lines.is_empty() {
        return Vec::new();
    }

    let mut offsets_by_container: HashMap<usize, Vec<f64>> = HashMap::new();
    for line in &lines {
        offsets_by_container
            .entry(line.container)
            .or_default()
            .push(line.indent());
    }
    let typical: HashMap<usize, f64> = offsets_by_container
        .into_iter()
        .map(|(container, offsets)| (container, typical_offset(&offsets, options.two_line_bias)))
        .collect();

    let mut paragraphs: Vec<Vec<Line>> = Vec::new();
    let mut current: Vec<Line> = Vec::new();
    for line in lines {
        let expected = typical.get(&line.container).copied().unwrap_or(0.0);
        let deviates = (line.indent() - expected).abs() > options.indent_threshold;
        if deviates && !current.is_empty() {
            paragraphs.push(std::mem::take(&mut current));
        }
        current.push(line);
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs
}

/// The container's typical left offset.
fn typical_offset(offsets: &[f64], two_line_bias: bool) -> f64 {
    if two_line_bias && offsets.len() == 2 {
        return offsets[1];
    }
    let mut sorted = offsets.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted[sorted.len() / 2]
}
