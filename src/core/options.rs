//! Expansion options
//!
//! Ceilings guarding against runaway expansion and the strictness of the
//! scan loop towards commands it has no handler for.

/// Default ceiling on the expansion buffer, in bytes
pub const DEFAULT_MAX_BUFFER: usize = 20 * 1024;

/// Default ceiling on macro invocations per expression
pub const DEFAULT_MAX_MACROS: usize = 10_000;

/// Expansion budget for a single expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionLimits {
    /// Maximum size of the spliced buffer, in bytes
    /// Default: 20 KiB
    pub max_buffer: usize,

    /// Maximum number of handler invocations
    /// Default: 10000
    pub max_macros: usize,
}

impl Default for ExpansionLimits {
    fn default() -> Self {
        Self {
            max_buffer: DEFAULT_MAX_BUFFER,
            max_macros: DEFAULT_MAX_MACROS,
        }
    }
}

/// Options for macro expansion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Expansion budget
    pub limits: ExpansionLimits,

    /// Fail on control words that have no handler instead of passing
    /// them through for the downstream renderer
    /// Default: false
    pub strict: bool,
}

impl ExpandOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict mode options (errors on unknown commands)
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Create options with custom ceilings
    pub fn with_limits(max_buffer: usize, max_macros: usize) -> Self {
        Self {
            limits: ExpansionLimits {
                max_buffer,
                max_macros,
            },
            ..Self::default()
        }
    }
}
