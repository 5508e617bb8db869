use pretty_assertions::assert_eq;
use tabview_downsample::{parse_byte_limit, ByteLimit, DownsampleError};

fn parse(limit: impl Into<ByteLimit>) -> Result<usize, DownsampleError> {
    parse_byte_limit(&limit.into())
}

#[test]
fn suffixed_sizes_use_binary_multiples() {
    assert_eq!(parse("64KB").unwrap(), 65_536);
    assert_eq!(parse("1MB").unwrap(), 1_048_576);
    assert_eq!(parse("512B").unwrap(), 512);
    assert_eq!(parse("1.5KB").unwrap(), 1_536);
    assert_eq!(parse(" 2 MB").unwrap(), 2 * 1_048_576);
}

#[test]
fn numbers_and_bare_strings_are_raw_bytes() {
    assert_eq!(parse(0u64).unwrap(), 0);
    assert_eq!(parse(4096usize).unwrap(), 4_096);
    assert_eq!(parse(12.9).unwrap(), 12);
    assert_eq!(parse("100").unwrap(), 100);
    assert_eq!(parse("12.9").unwrap(), 12);
}

#[test]
fn gigabyte_limits_are_refused() {
    let err = parse("1GB").unwrap_err();
    assert!(matches!(err, DownsampleError::Configuration(_)), "{err:?}");
    assert!(err.to_string().contains("1GB"), "{err}");
}

#[test]
fn malformed_limits_are_configuration_errors() {
    for bad in ["", "abc", "KB", "64kb", "-1KB", "1TB", "NaN"] {
        let err = parse(bad).unwrap_err();
        assert!(
            matches!(err, DownsampleError::Configuration(_)),
            "{bad:?} gave {err:?}"
        );
    }
    assert!(matches!(
        parse(-5.0).unwrap_err(),
        DownsampleError::Configuration(_)
    ));
    assert!(matches!(
        parse(f64::INFINITY).unwrap_err(),
        DownsampleError::Configuration(_)
    ));
}

#[test]
fn resolve_matches_the_free_function() {
    assert_eq!(ByteLimit::from("64KB").resolve().unwrap(), 65_536);
    assert_eq!(ByteLimit::default().resolve().unwrap(), 0);
}
