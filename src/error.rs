//! Error types for simdbits operations.
//!
//! Every argument check runs at the API boundary before any tier touches
//! memory, so an error always means nothing was written to the target.

use std::fmt;

/// Errors that can occur during simdbits operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimdbitsError {
    /// A requested element range does not fit inside a buffer.
    OutOfRange {
        /// First element of the requested range.
        start: usize,
        /// Number of elements requested.
        len: usize,
        /// Number of elements actually available in the buffer.
        available: usize,
    },
    /// The target buffer is shorter than the origin buffer.
    LengthMismatch {
        /// Element count of the origin buffer.
        origin: usize,
        /// Element count of the target buffer.
        target: usize,
    },
    /// Element width of zero bytes.
    InvalidElementWidth {
        /// The width that was supplied.
        width: usize,
    },
    /// The mask does not have exactly one element's worth of bytes.
    MaskWidth {
        /// Element width in bytes.
        expected: usize,
        /// Number of mask bytes supplied.
        actual: usize,
    },
    /// A byte buffer does not hold a whole number of elements.
    PartialElement {
        /// Buffer length in bytes.
        len: usize,
        /// Element width in bytes.
        width: usize,
    },
    /// A raw entry point received a null pointer.
    NullPointer,
    /// An operator name could not be parsed.
    UnknownOperation {
        /// The name that failed to parse.
        name: String,
    },
    /// A tier name could not be parsed.
    UnknownTier {
        /// The name that failed to parse.
        name: String,
    },
}

impl fmt::Display for SimdbitsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimdbitsError::OutOfRange {
                start,
                len,
                available,
            } => write!(
                f,
                "Range out of bounds: {}..{} exceeds buffer of {} elements",
                start,
                start.saturating_add(*len),
                available
            ),
            SimdbitsError::LengthMismatch { origin, target } => write!(
                f,
                "Target too short: origin has {} elements, target has {}",
                origin, target
            ),
            SimdbitsError::InvalidElementWidth { width } => {
                write!(f, "Invalid element width: {} bytes", width)
            }
            SimdbitsError::MaskWidth { expected, actual } => write!(
                f,
                "Mask width mismatch: expected {} bytes, got {}",
                expected, actual
            ),
            SimdbitsError::PartialElement { len, width } => write!(
                f,
                "Buffer of {} bytes is not a whole number of {}-byte elements",
                len, width
            ),
            SimdbitsError::NullPointer => write!(f, "Null buffer pointer"),
            SimdbitsError::UnknownOperation { name } => {
                write!(f, "Unknown bitwise operation: {:?}", name)
            }
            SimdbitsError::UnknownTier { name } => write!(f, "Unknown SIMD tier: {:?}", name),
        }
    }
}

impl std::error::Error for SimdbitsError {}

/// Result type alias for simdbits operations.
pub type Result<T> = std::result::Result<T, SimdbitsError>;

/// Creates an out-of-range error.
pub fn out_of_range_error(start: usize, len: usize, available: usize) -> SimdbitsError {
    SimdbitsError::OutOfRange {
        start,
        len,
        available,
    }
}

/// Creates a length mismatch error.
pub fn length_mismatch_error(origin: usize, target: usize) -> SimdbitsError {
    SimdbitsError::LengthMismatch { origin, target }
}

/// Creates an invalid element width error.
pub fn invalid_width_error(width: usize) -> SimdbitsError {
    SimdbitsError::InvalidElementWidth { width }
}

/// Creates a mask width error.
pub fn mask_width_error(expected: usize, actual: usize) -> SimdbitsError {
    SimdbitsError::MaskWidth { expected, actual }
}

/// Creates a partial element error.
pub fn partial_element_error(len: usize, width: usize) -> SimdbitsError {
    SimdbitsError::PartialElement { len, width }
}

/// Creates an unknown operation error.
pub fn unknown_operation_error(name: impl Into<String>) -> SimdbitsError {
    SimdbitsError::UnknownOperation { name: name.into() }
}

/// Creates an unknown tier error.
pub fn unknown_tier_error(name: impl Into<String>) -> SimdbitsError {
    SimdbitsError::UnknownTier { name: name.into() }
}

/// Checks that `start..start + len` lies within a buffer of `available` elements.
pub(crate) fn check_range(start: usize, len: usize, available: usize) -> Result<()> {
    match start.checked_add(len) {
        Some(end) if end <= available => Ok(()),
        _ => Err(out_of_range_error(start, len, available)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let error = out_of_range_error(10, 8, 12);
        let display = format!("{}", error);
        assert!(display.contains("Range out of bounds"));
        assert!(display.contains("10..18"));
        assert!(display.contains("12 elements"));
    }

    #[test]
    fn test_out_of_range_display_saturates() {
        let error = out_of_range_error(usize::MAX, 2, 4);
        let display = format!("{}", error);
        assert!(display.contains(&usize::MAX.to_string()));
    }

    #[test]
    fn test_length_mismatch_display() {
        let error = length_mismatch_error(16, 15);
        let display = format!("{}", error);
        assert!(display.contains("Target too short"));
        assert!(display.contains("16"));
        assert!(display.contains("15"));
    }

    #[test]
    fn test_mask_width_display() {
        let error = mask_width_error(12, 8);
        let display = format!("{}", error);
        assert!(display.contains("expected 12 bytes, got 8"));
    }

    #[test]
    fn test_partial_element_display() {
        let error = partial_element_error(25, 12);
        let display = format!("{}", error);
        assert!(display.contains("25 bytes"));
        assert!(display.contains("12-byte elements"));
    }

    #[test]
    fn test_unknown_operation_display() {
        let error = unknown_operation_error("nxor");
        assert_eq!(format!("{}", error), "Unknown bitwise operation: \"nxor\"");
    }

    #[test]
    fn test_check_range() {
        assert!(check_range(0, 0, 0).is_ok());
        assert!(check_range(4, 4, 8).is_ok());
        assert_eq!(check_range(5, 4, 8), Err(out_of_range_error(5, 4, 8)));
        assert!(check_range(usize::MAX, 1, 8).is_err());
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = invalid_width_error(0);

        let _: &dyn std::error::Error = &error;
        assert!(std::error::Error::source(&error).is_none());
    }
}
