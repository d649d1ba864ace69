// Host-side tests for the rolling frame-rate monitor.
// Time is driven by hand so window boundaries are exact.

use ambient_core::*;
use instant::Instant;
use std::time::Duration;

fn feed(
    m: &mut PerformanceMonitor,
    t0: Instant,
    frames: u32,
    step_ms: u64,
) -> Vec<PerformanceSample> {
    (1..=frames)
        .filter_map(|i| m.record_frame(t0 + Duration::from_millis(step_ms * i as u64)))
        .collect()
}

#[test]
fn idle_monitor_reports_the_default_rate() {
    let m = PerformanceMonitor::new("idle");
    assert!(!m.is_running());
    assert_eq!(m.current_fps(), DEFAULT_FPS);
    assert!(m.is_performance_good());
}

#[test]
fn twenty_frames_in_a_second_is_poor() {
    let t0 = Instant::now();
    let mut m = PerformanceMonitor::new("slow");
    m.start_at(t0);
    let samples = feed(&mut m, t0, 20, 50);
    assert_eq!(samples.len(), 1);
    let s = samples[0];
    assert_eq!(s.frame_count, 20);
    assert!((s.fps - 20.0).abs() < 0.01);
    assert!(s.low_fps);
    assert!(!m.is_performance_good());
}

#[test]
fn smooth_frames_are_good() {
    let t0 = Instant::now();
    let mut m = PerformanceMonitor::new("smooth");
    m.start_at(t0);
    let samples = feed(&mut m, t0, 63, 16);
    assert_eq!(samples.len(), 1);
    assert!(!samples[0].low_fps);
    assert!(m.current_fps() > 60.0);
    assert!(m.is_performance_good());
}

#[test]
fn middling_rate_is_neither_good_nor_low() {
    let t0 = Instant::now();
    let mut m = PerformanceMonitor::new("mid");
    m.start_at(t0);
    // 40 frames at 25ms close the window at exactly 1000ms: 40 fps
    let samples = feed(&mut m, t0, 40, 25);
    assert_eq!(samples.len(), 1);
    assert!(!samples[0].low_fps);
    assert!(!m.is_performance_good());
}

#[test]
fn window_restarts_after_each_sample() {
    let t0 = Instant::now();
    let mut m = PerformanceMonitor::new("windows");
    m.start_at(t0);
    let samples = feed(&mut m, t0, 60, 50);
    // one sample per elapsed second
    assert_eq!(samples.len(), 3);
    assert_eq!(m.pending_frames(), 0);
    assert!(samples.windows(2).all(|w| w[0].window_start < w[1].window_start));
}

#[test]
fn no_sample_before_the_window_elapses() {
    let t0 = Instant::now();
    let mut m = PerformanceMonitor::new("partial");
    m.start_at(t0);
    assert!(feed(&mut m, t0, 10, 50).is_empty());
    assert_eq!(m.pending_frames(), 10);
    assert_eq!(m.current_fps(), DEFAULT_FPS);
}

#[test]
fn stop_is_terminal_until_restarted() {
    let t0 = Instant::now();
    let mut m = PerformanceMonitor::new("stopped");
    m.start_at(t0);
    feed(&mut m, t0, 20, 50);
    assert!(!m.is_performance_good());

    m.stop();
    assert!(!m.is_running());
    assert_eq!(m.current_fps(), DEFAULT_FPS);
    assert!(m.is_performance_good());
    assert!(feed(&mut m, t0, 40, 50).is_empty());
    assert_eq!(m.pending_frames(), 0);
}

#[test]
fn start_while_running_keeps_the_open_window() {
    let t0 = Instant::now();
    let mut m = PerformanceMonitor::new("restart");
    m.start_at(t0);
    feed(&mut m, t0, 5, 50);
    m.start_at(t0 + Duration::from_millis(500));
    assert_eq!(m.pending_frames(), 5);
}

#[test]
fn monitors_do_not_share_state() {
    let t0 = Instant::now();
    let mut a = PerformanceMonitor::new("a");
    let mut b = PerformanceMonitor::new("b");
    a.start_at(t0);
    b.start_at(t0);
    feed(&mut a, t0, 20, 50);
    feed(&mut b, t0, 63, 16);
    assert!(!a.is_performance_good());
    assert!(b.is_performance_good());
    assert_eq!(a.label(), "a");
}
