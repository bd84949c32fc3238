use std::time::{Duration, Instant};

use space_shooter::clock::{Clock, FrameClock, TickClock};

// ── FrameClock ────────────────────────────────────────────────────────────────

#[test]
fn frame_clock_paces_at_least_one_frame() {
    // 500 Hz: 2 ms frames
    let mut clock = FrameClock::new(500);
    let started = Instant::now();
    clock.pace();
    clock.pace();
    assert!(started.elapsed() >= Duration::from_millis(2));
}

#[test]
fn frame_clock_does_not_sleep_after_a_slow_frame() {
    // 20 Hz: 50 ms frames
    let mut clock = FrameClock::new(20);
    std::thread::sleep(Duration::from_millis(60));
    let started = Instant::now();
    clock.pace();
    // Frame already overran, so pace returns without waiting a full frame
    assert!(started.elapsed() < Duration::from_millis(50));
}

#[test]
fn frame_clock_time_is_monotonic() {
    let mut clock = FrameClock::new(1000);
    let mut last = clock.now_ms();
    for _ in 0..5 {
        clock.pace();
        let now = clock.now_ms();
        assert!(now >= last);
        last = now;
    }
    assert!(last >= 4);
}

#[test]
fn frame_clock_tolerates_zero_rate() {
    // Treated as 1 Hz rather than dividing by zero
    let clock = FrameClock::new(0);
    assert!(clock.now_ms() < 1000);
}

// ── TickClock ─────────────────────────────────────────────────────────────────

#[test]
fn tick_clock_derives_time_from_ticks() {
    let mut clock = TickClock::new(60);
    assert_eq!(clock.now_ms(), 0);
    for _ in 0..60 {
        clock.pace();
    }
    assert_eq!(clock.ticks(), 60);
    assert_eq!(clock.now_ms(), 1000);
}

#[test]
fn tick_clock_rounds_down_partial_milliseconds() {
    let mut clock = TickClock::new(60);
    clock.pace();
    // 1000 / 60 = 16.6
    assert_eq!(clock.now_ms(), 16);
}
