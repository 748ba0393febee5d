mod tests {
    use duoflash::SharedState;

    #[test]
    fn test_boot_state() {
        let shared = SharedState::new(128);
        assert_eq!(shared.targets(), [0, 0]);
        assert_eq!(shared.subframe_counter(), 127);
        assert!(shared.is_frame_pending());
    }

    #[test]
    fn test_claim_requires_boundary() {
        let shared = SharedState::new(64);
        assert!(!shared.claim_frame());
        assert!(!shared.claim_frame());
        assert!(shared.is_frame_pending());
    }

    #[test]
    fn test_publish_replaces_both_levels() {
        let shared = SharedState::new(64);
        shared.publish([12, 250]);
        assert_eq!(shared.targets(), [12, 250]);
        shared.publish([0, 1]);
        assert_eq!(shared.targets(), [0, 1]);
    }

    #[test]
    fn test_single_tick_frame() {
        let shared = SharedState::new(1);
        assert_eq!(shared.subframe_counter(), 0);
        assert!(shared.is_frame_pending());
    }
}
