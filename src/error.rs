//! Error types shared by the heap, grid ingestion, search and configuration.

use grid_util::point::Point;
use thiserror::Error;

/// Errors raised by [PriorityHeap](crate::heap::PriorityHeap).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The heap already holds `capacity` items.
    #[error("priority heap is full (capacity {capacity})")]
    Full { capacity: usize },
}

/// Reasons a search produced no path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The start or goal resolved to a cell that cannot be walked on.
    #[error("endpoint {cell} is not walkable")]
    InvalidEndpoint { cell: Point },

    /// The open set ran dry before the goal was expanded.
    #[error("{goal} is not reachable from {start}")]
    Unreachable { start: Point, goal: Point },

    /// Reaching `cell` costs more than a `u32` can hold.
    #[error("path cost to {cell} overflows")]
    CostOverflow { cell: Point },

    #[error("open set error: {0}")]
    Heap(#[from] HeapError),
}

/// Errors raised while building a [GridModel](crate::grid::GridModel).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    Empty { width: usize, height: usize },

    #[error("expected {expected} cells for the grid, got {actual}")]
    CellCount { expected: usize, actual: usize },

    #[error("unexpected character {found:?} at row {row}, column {column}")]
    InvalidCharacter { found: char, row: usize, column: usize },

    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("cell {point} lies outside the grid")]
    OutOfBounds { point: Point },

    #[error("cell {point} was given more than once")]
    DuplicateCell { point: Point },

    #[error("cell size must be positive and finite, got {0}")]
    CellSize(f32),
}

/// Errors raised while loading a [PathfindingConfig](crate::config::PathfindingConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}
