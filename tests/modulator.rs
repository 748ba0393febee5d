mod tests {
    use duoflash::math8::duty8;
    use duoflash::{PortBits, SharedState, SoftTimer, SubframeModulator, TimerTiming, Waveform};

    const LIMIT: u8 = 64;
    const TIMING: TimerTiming = TimerTiming::COMPACT;

    /// Run the modulator for exactly one frame, starting at a boundary
    fn record_frame(levels: [u8; 2]) -> Waveform<256> {
        let shared = SharedState::new(LIMIT);
        shared.publish(levels);
        let modulator = SubframeModulator::new(&TIMING);
        let mut timer = SoftTimer::new();
        let mut waveform = Waveform::new();
        for _ in 0..LIMIT {
            modulator.tick(&shared, &mut waveform, &mut timer);
        }
        waveform
    }

    #[test]
    fn test_output_bits() {
        assert_eq!(SubframeModulator::output_bits([0, 0], 0), PortBits::OFF);
        assert_eq!(
            SubframeModulator::output_bits([1, 0], 0),
            PortBits::new(true, false)
        );
        assert_eq!(
            SubframeModulator::output_bits([10, 11], 10),
            PortBits::new(false, true)
        );
        assert_eq!(PortBits::new(true, true).bits(), 0b11);
    }

    #[test]
    fn test_duty_matches_level() {
        for level in 0..=LIMIT {
            let waveform = record_frame([level, LIMIT - level]);
            assert_eq!(waveform.len(), LIMIT as usize);
            assert_eq!(waveform.duty(0), level as usize, "level {level}");
            assert_eq!(waveform.duty(1), (LIMIT - level) as usize, "level {level}");
        }
    }

    #[test]
    fn test_lit_run_ends_at_frame_boundary() {
        for level in 1..=LIMIT {
            let waveform = record_frame([level, 0]);
            assert_eq!(waveform.lit_runs(0), 1, "level {level}");
            // Lit while `level > counter` and the counter runs down, so the
            // run is the last `level` ticks of the frame, not the first.
            let start = (LIMIT - level) as usize;
            assert_eq!(waveform.lit_span(0), Some(start..LIMIT as usize));
        }
    }

    #[test]
    fn test_levels_above_limit_stay_lit() {
        for levels in [[200, 255], [LIMIT, LIMIT + 1], [3, 90]] {
            let waveform = record_frame(levels);
            assert_eq!(waveform.duty(0), duty8(levels[0], LIMIT) as usize);
            assert_eq!(waveform.duty(1), duty8(levels[1], LIMIT) as usize);
        }
        assert_eq!(record_frame([200, 255]).duty(0), LIMIT as usize);
    }

    #[test]
    fn test_recorded_frame_matches_of_frame() {
        let levels = [17, 40];
        let recorded = record_frame(levels);
        let computed = Waveform::<256>::of_frame(levels, LIMIT);
        assert_eq!(recorded.ticks(), computed.ticks());
    }

    #[test]
    fn test_frame_boundary_every_limit_ticks() {
        let shared = SharedState::new(LIMIT);
        let modulator = SubframeModulator::new(&TIMING);
        let mut timer = SoftTimer::new();
        let mut waveform = Waveform::<16>::new();

        let mut boundaries = 0;
        for tick in 1..=(LIMIT as u32 * 3) {
            let subframe = modulator.tick(&shared, &mut waveform, &mut timer);
            assert!(subframe.counter < LIMIT);
            assert!(shared.subframe_counter() < LIMIT);
            if subframe.frame_boundary {
                boundaries += 1;
                assert_eq!(tick % LIMIT as u32, 0);
                assert_eq!(subframe.counter, 0);
            }
        }
        assert_eq!(boundaries, 3);
        // The recorder keeps the first ticks and drops the rest.
        assert!(waveform.is_full());
        assert_eq!(waveform.len(), 16);
    }

    #[test]
    fn test_boundary_clears_frame_pending() {
        let shared = SharedState::new(LIMIT);
        let modulator = SubframeModulator::new(&TIMING);
        let mut timer = SoftTimer::new();
        let mut waveform = Waveform::<256>::new();

        assert!(shared.is_frame_pending());
        for _ in 0..LIMIT - 1 {
            modulator.tick(&shared, &mut waveform, &mut timer);
            assert!(shared.is_frame_pending());
        }
        modulator.tick(&shared, &mut waveform, &mut timer);
        assert!(!shared.is_frame_pending());
        assert_eq!(shared.subframe_counter(), LIMIT - 1);
    }

    #[test]
    fn test_timer_reloaded_every_tick() {
        let shared = SharedState::new(LIMIT);
        let modulator = SubframeModulator::new(&TIMING);
        let mut timer = SoftTimer::new();
        let mut waveform = Waveform::<256>::new();
        for _ in 0..100 {
            modulator.tick(&shared, &mut waveform, &mut timer);
        }
        assert_eq!(timer.reloads(), 100);
        assert_eq!(timer.last_reload(), Some(225));
        assert_eq!(modulator.reload(), 225);
    }
}
