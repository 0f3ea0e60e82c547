//! Demonstrates enabling verbose logging for siglab.
use siglab::{FftEngine, MovingAverage, StreamingFilter};

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .init();

    // A non-power-of-two length exercises the Bluestein planner, which
    // logs its chirp and twiddle table construction.
    let engine = FftEngine::<f64>::new();
    let signal: Vec<f64> = (0..12).map(|i| (i as f64 * 0.5).sin()).collect();
    let power = engine.spectrum(&signal).unwrap();

    let mut smoother = MovingAverage::<f64>::new(3).unwrap();
    smoother.resize(4).unwrap();
    let smoothed = smoother.filter(&power);
    println!("{} bins, first smoothed {:.3}", smoothed.len(), smoothed[0]);
}
