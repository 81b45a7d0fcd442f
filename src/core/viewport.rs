//! Viewport breakpoints

/// Widths below this are treated as phone-sized
pub const COMPACT_BREAKPOINT: f32 = 768.0;

pub fn is_compact(width: f32) -> bool {
    width < COMPACT_BREAKPOINT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint() {
        assert!(is_compact(375.0));
        assert!(is_compact(767.9));
        assert!(!is_compact(768.0));
        assert!(!is_compact(1440.0));
    }
}
