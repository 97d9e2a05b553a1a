//! Draw-order span clustering into page containers.
//!
//! Two linear passes over the emission-order span list:
//!
//! 1. A new container starts whenever a span's vertical displacement
//!    from the current container's reference top exceeds a threshold —
//!    consecutive drawing operations on the same visual line land in
//!    the same container.
//! 2. Adjacent containers merge when their boxes nearly touch on both
//!    axes. Only each container's immediate predecessor is considered —
//!    a deliberate single-pass simplification that trades a little
//!    recall for linear cost.

use pdfsift_core::{Container, TextSpan};

use crate::LayoutOptions;

/// A span annotated with the container it was assigned to.
#[derive(Debug, Clone)]
pub struct PlacedSpan {
    pub span: TextSpan,
    /// Index into the page's container list.
    pub container: usize,
    /// Left edge of that container (the indent reference).
    pub container_left: f64,
}

/// One page's spans after clustering.
#[derive(Debug, Clone)]
pub struct PageSpans {
    /// Spans in original emission order, each with its container.
    pub spans: Vec<PlacedSpan>,
    /// The merged containers, in first-appearance order.
    pub containers: Vec<Container<TextSpan>>,
}

/// Cluster one page's spans (emission order preserved).
pub fn cluster_page(spans: Vec<TextSpan>, options: &LayoutOptions) -> PageSpans {
    // Pass 1: split the draw order at vertical jumps.
    let mut containers: Vec<Container<TextSpan>> = Vec::new();
    let mut assignment: Vec<usize> = Vec::with_capacity(spans.len());
    let mut reference_top = 0.0;

    for span in &spans {
        let same_container = containers
            .last()
            .is_some_and(|_| (span.rect.min_y - reference_top).abs() <= options.line_cluster_dy);
        if same_container {
            if let Some(current) = containers.last_mut() {
                current.push(span.clone());
            }
        } else {
            containers.push(Container::new(span.clone()));
        }
        assignment.push(containers.len() - 1);
        reference_top = span.rect.min_y;
    }

    // Pass 2: merge each container into its predecessor when adjacent.
    let mut merged: Vec<Container<TextSpan>> = Vec::new();
    let mut remap: Vec<usize> = Vec::with_capacity(containers.len());
    for container in containers {
        if let Some(prev) = merged.last_mut() {
            let rect = container.rect();
            if prev.rect().gap_x(&rect) <= options.merge_dx
                && prev.rect().gap_y(&rect) <= options.merge_dy
            {
                prev.absorb(container);
                remap.push(merged.len() - 1);
                continue;
            }
        }
        merged.push(container);
        remap.push(merged.len() - 1);
    }

    let spans = spans
        .into_iter()
        .zip(assignment)
        .map(|(span, raw_index)| {
            let container = remap[raw_index];
            PlacedSpan {
                container_left: merged[container].rect().min_x,
                container,
                span,
            }
        })
        .collect();

    PageSpans {
        spans,
        containers: merged,
    }
}
