mod tests {
    use duoflash::pattern::{RAW_LENGTH_END_OF_PATTERN, RAW_LENGTH_FOREVER};
    use duoflash::{
        BuiltinPattern, DEFAULT_LIBRARY, FragmentLength, LinearRamp, Pattern, PatternFragment,
        PatternLibrary,
    };

    const RAMP: LinearRamp = LinearRamp::new(10, 5);

    const THREE_FRAGMENTS: &[PatternFragment] = &[
        PatternFragment::new(4, [RAMP, RAMP]),
        PatternFragment::new(8, [RAMP, RAMP]),
        PatternFragment::new(2, [RAMP, RAMP]),
        PatternFragment::END,
    ];

    const UNTERMINATED: &[PatternFragment] = &[
        PatternFragment::new(4, [RAMP, RAMP]),
        PatternFragment::new(4, [RAMP, RAMP]),
    ];

    const THREE: Pattern = Pattern::new("three", THREE_FRAGMENTS);
    const OPEN: Pattern = Pattern::new("open", UNTERMINATED);

    #[test]
    fn test_fragment_length_from_raw() {
        assert_eq!(
            FragmentLength::from_raw(RAW_LENGTH_FOREVER),
            FragmentLength::Forever
        );
        assert_eq!(
            FragmentLength::from_raw(RAW_LENGTH_END_OF_PATTERN),
            FragmentLength::EndOfPattern
        );
        assert_eq!(FragmentLength::from_raw(1), FragmentLength::Frames(1));
        assert_eq!(FragmentLength::from_raw(254), FragmentLength::Frames(254));
        assert_eq!(FragmentLength::Frames(16).to_raw(), 16);
        assert_eq!(FragmentLength::Forever.to_raw(), 0);
        assert_eq!(FragmentLength::EndOfPattern.to_raw(), 255);
    }

    #[test]
    fn test_fragment_from_raw_sentinels() {
        assert!(PatternFragment::from_raw(255, [RAMP, RAMP]).is_end());
        assert!(PatternFragment::from_raw(0, [RAMP, RAMP]).is_forever());
        assert_eq!(
            PatternFragment::from_raw(16, [RAMP, RAMP]),
            PatternFragment::new(16, [RAMP, RAMP])
        );
    }

    #[test]
    fn test_falling_ramp_wraps() {
        let ramp = LinearRamp::falling(128, 8);
        assert_eq!(ramp.increment, 248);
        assert_eq!(ramp.value_at(0), 128);
        assert_eq!(ramp.value_at(1), 120);
        assert_eq!(ramp.value_at(16), 0);
        // Keeps going through the byte range rather than stopping at zero.
        assert_eq!(ramp.value_at(17), 248);
    }

    #[test]
    fn test_rising_ramp_overflows() {
        let ramp = LinearRamp::new(200, 30);
        assert_eq!(ramp.value_at(1), 230);
        assert_eq!(ramp.value_at(2), 4);
    }

    #[test]
    fn test_next_index_wraps_at_end_marker() {
        assert_eq!(THREE.fragment_count(), 3);
        assert_eq!(THREE.next_index(0), 1);
        assert_eq!(THREE.next_index(1), 2);
        assert_eq!(THREE.next_index(2), 0);
    }

    #[test]
    fn test_next_index_wraps_at_table_end() {
        assert_eq!(OPEN.fragment_count(), 2);
        assert_eq!(OPEN.next_index(0), 1);
        assert_eq!(OPEN.next_index(1), 0);
    }

    #[test]
    fn test_fragment_never_returns_end_marker() {
        assert_eq!(THREE.fragment(3), THREE.first());
        assert_eq!(THREE.fragment(200), THREE.first());
        assert_eq!(THREE.fragment(1).length(), FragmentLength::Frames(8));
    }

    #[test]
    fn test_library_normalize_and_cycle() {
        let library = DEFAULT_LIBRARY;
        assert_eq!(library.len(), 3);
        assert_eq!(library.normalize(2), 2);
        assert_eq!(library.normalize(3), 0);
        assert_eq!(library.normalize(0xFF), 0);
        assert_eq!(library.next_index(0), 1);
        assert_eq!(library.next_index(2), 0);
        assert_eq!(library.pattern(9).name(), "mutual");
    }

    #[test]
    fn test_library_find() {
        assert_eq!(DEFAULT_LIBRARY.find("always_on"), Some(2));
        assert_eq!(DEFAULT_LIBRARY.find("strobe"), None);
    }

    #[test]
    fn test_single_pattern_library() {
        const PATTERNS: &[Pattern] = &[THREE];
        let library = PatternLibrary::new(PATTERNS);
        assert_eq!(library.next_index(0), 0);
    }

    #[test]
    fn test_builtin_pattern_ids() {
        assert_eq!(BuiltinPattern::from_raw(0), Some(BuiltinPattern::Mutual));
        assert_eq!(BuiltinPattern::from_raw(2), Some(BuiltinPattern::AlwaysOn));
        assert_eq!(BuiltinPattern::from_raw(3), None);
        assert_eq!(
            BuiltinPattern::parse_from_str("synchronized"),
            Some(BuiltinPattern::Synchronized)
        );
        assert_eq!(BuiltinPattern::parse_from_str("Mutual"), None);
    }

    #[test]
    fn test_builtin_patterns_match_library_order() {
        for id in [
            BuiltinPattern::Mutual,
            BuiltinPattern::Synchronized,
            BuiltinPattern::AlwaysOn,
        ] {
            let pattern = DEFAULT_LIBRARY.pattern(id.index());
            assert_eq!(pattern.name(), id.as_str());
            assert_eq!(id.pattern().name(), id.as_str());
        }
    }

    #[test]
    fn test_always_on_is_single_forever_fragment() {
        let pattern = BuiltinPattern::AlwaysOn.pattern();
        assert_eq!(pattern.fragment_count(), 1);
        assert!(pattern.first().is_forever());
        assert_eq!(pattern.first().initial_levels(), [128, 128]);
    }
}
