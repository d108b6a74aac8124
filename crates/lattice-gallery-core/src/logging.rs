//! Logging and debugging facilities for Lattice Gallery.
//!
//! This module provides:
//! - Target and span names for filtering the `tracing` output of each subsystem
//! - [`TreeDebug`] for rendering a visual subtree as text
//! - [`PerfSpan`] for timing layout passes
//!
//! # Tracing Integration
//!
//! Lattice Gallery uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("lattice_gallery::layout=debug")
//!     .init();
//! ```

use std::fmt::Write as FmtWrite;

use crate::object::ObjectId;
use crate::tree::TreeAccess;

/// Span names used throughout Lattice Gallery for tracing.
pub mod span_names {
    /// One full layout pass driven by the host.
    pub const LAYOUT_PASS: &str = "lattice_gallery::layout_pass";
    /// Recomputation of per-row extent bounds.
    pub const ROW_BOUNDS: &str = "lattice_gallery::row_bounds";
    /// Measure pass over a visual subtree.
    pub const MEASURE: &str = "lattice_gallery::measure";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal system target.
    pub const SIGNAL: &str = "lattice_gallery_core::signal";
    /// Layout (row bounds, layout driver) target.
    pub const LAYOUT: &str = "lattice_gallery::layout";
    /// Visual tree target.
    pub const TREE: &str = "lattice_gallery::tree";
    /// Settings loading target.
    pub const CONFIG: &str = "lattice_gallery::config";
    /// Performance spans target.
    pub const PERF: &str = "lattice_gallery::perf";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact representation with dashes.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show object IDs.
    pub show_ids: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Options for minimal output (labels only).
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            ..Default::default()
        }
    }
}

/// Debug utility for rendering any [`TreeAccess`] subtree as text.
#[derive(Debug, Clone, Default)]
pub struct TreeDebug {
    options: TreeFormatOptions,
}

impl TreeDebug {
    /// Create a new debug visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debug visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the subtree rooted at `root`, root included.
    pub fn format_subtree<T: TreeAccess + ?Sized>(&self, tree: &T, root: ObjectId) -> String {
        let mut output = String::new();
        self.format_into(tree, root, 0, true, &mut output);
        output
    }

    fn format_into<T: TreeAccess + ?Sized>(
        &self,
        tree: &T,
        id: ObjectId,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return;
        }

        output.push_str(&self.build_prefix(depth, is_last));
        output.push_str(&tree.describe(id));
        if self.options.show_ids {
            // Writing to a String cannot fail.
            let _ = write!(output, " [{:?}]", id);
        }
        output.push('\n');

        let children = tree.children(id);
        let child_count = children.len();
        for (i, &child) in children.iter().enumerate() {
            self.format_into(tree, child, depth + 1, i + 1 == child_count, output);
        }
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            prefix.push_str(&" ".repeat(self.options.indent_size));
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time layout passes.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
