use crate::ByteWindow;

/// Parse an HTTP `Range` header against a known object length.
///
/// Returns `None` when no range was requested (absent or empty header,
/// missing `bytes=` prefix, or neither bound parseable), meaning the full
/// object should be delivered. Malformed numeric components never produce
/// an error; each one degrades to the fallback for its omitted form:
///
/// - `bytes=<start>-<end>` → literal window
/// - `bytes=<start>-` → `{start, length-1}`
/// - `bytes=-<end>` → `{length-end, length-1}`, i.e. the last `end` bytes
///
/// The suffix form treats the number as a byte *count* rather than the
/// standard suffix-range offset; downstream consumers rely on that
/// arithmetic, so it is preserved as-is. A count larger than the object
/// saturates to a window starting at 0.
pub fn parse_range(header: Option<&str>, length: u64) -> Option<ByteWindow> {
    let spec = header?.trim().strip_prefix("bytes=")?;
    let (start, end) = spec.split_once('-')?;

    let start = start.trim().parse::<u64>().ok();
    let end = end.trim().parse::<u64>().ok();
    let last = length.saturating_sub(1);

    match (start, end) {
        (Some(start), Some(end)) => Some(ByteWindow::new(start, end)),
        (Some(start), None) => Some(ByteWindow::new(start, last)),
        (None, Some(count)) => Some(ByteWindow::new(length.saturating_sub(count), last)),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_bounds_are_taken_literally() {
        assert_eq!(parse_range(Some("bytes=2-7"), 100), Some(ByteWindow::new(2, 7)));
        assert_eq!(parse_range(Some("bytes=0-0"), 100), Some(ByteWindow::new(0, 0)));
    }

    #[test]
    fn open_ended_start_runs_to_last_byte() {
        assert_eq!(parse_range(Some("bytes=40-"), 100), Some(ByteWindow::new(40, 99)));
    }

    #[test]
    fn suffix_is_a_byte_count_from_the_end() {
        assert_eq!(parse_range(Some("bytes=-30"), 100), Some(ByteWindow::new(70, 99)));
        assert_eq!(parse_range(Some("bytes=-100"), 100), Some(ByteWindow::new(0, 99)));
    }

    #[test]
    fn suffix_count_larger_than_object_saturates_to_zero() {
        assert_eq!(parse_range(Some("bytes=-500"), 100), Some(ByteWindow::new(0, 99)));
    }

    #[test]
    fn absent_or_empty_header_means_no_range() {
        assert_eq!(parse_range(None, 100), None);
        assert_eq!(parse_range(Some(""), 100), None);
    }

    #[test]
    fn missing_bytes_prefix_means_no_range() {
        assert_eq!(parse_range(Some("0-5"), 100), None);
        assert_eq!(parse_range(Some("items=0-5"), 100), None);
    }

    #[test]
    fn both_bounds_unparseable_means_no_range() {
        assert_eq!(parse_range(Some("bytes=-"), 100), None);
        assert_eq!(parse_range(Some("bytes=abc-def"), 100), None);
    }

    #[test]
    fn malformed_start_degrades_to_suffix_form() {
        assert_eq!(parse_range(Some("bytes=abc-30"), 100), Some(ByteWindow::new(70, 99)));
    }

    #[test]
    fn malformed_end_degrades_to_open_ended_form() {
        assert_eq!(parse_range(Some("bytes=5-xyz"), 100), Some(ByteWindow::new(5, 99)));
    }

    #[test]
    fn zero_length_object_yields_a_representable_window() {
        // Rejected later as unsatisfiable, but must not underflow here.
        assert_eq!(parse_range(Some("bytes=0-"), 0), Some(ByteWindow::new(0, 0)));
    }

    #[test]
    fn out_of_bounds_windows_are_reported_unsatisfiable() {
        let w = parse_range(Some("bytes=150-200"), 100).unwrap();
        assert!(!w.is_satisfiable(100));

        let w = parse_range(Some("bytes=0-100"), 100).unwrap();
        assert!(!w.is_satisfiable(100));

        let w = parse_range(Some("bytes=0-99"), 100).unwrap();
        assert!(w.is_satisfiable(100));
    }

    #[test]
    fn single_byte_window_declares_zero_length() {
        assert_eq!(ByteWindow::new(5, 5).declared_len(), 0);
        assert_eq!(ByteWindow::new(5, 9).declared_len(), 5);
    }
}
