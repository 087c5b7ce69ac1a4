//! Centralized limits and thresholds for the garnet compiler.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting depth of node compilation.
///
/// Every dispatched child adds a handful of frames to the call stack; a unit
/// nested deeper than this is rejected instead of overflowing the stack.
/// The `returns` rewrite follows the same bound.
///
/// ```ruby
/// # Deeply nested interpolation:
/// "#{"#{"#{"#{ ... 500 levels ... }"}"}"}"
/// ```
pub const MAX_COMPILE_DEPTH: u32 = 500;


// =============================================================================
// Capacity Hints
// =============================================================================

/// Initial fragment capacity for a handler's buffer.
///
/// Most handlers emit fewer than eight pieces (`push "new RegExp(", ..., ")"`).
pub const FRAGMENT_BUFFER_CAPACITY: usize = 8;
