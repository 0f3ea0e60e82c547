use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use siglab::{MovingAverage, MovingMedian, MovingRms, StreamingFilter};

#[test]
fn average_warms_up_from_a_zero_window() {
    let mut filt = MovingAverage::<f64>::new(3).unwrap();
    let out = filt.filter(&[1.0, 2.0, 3.0, 4.0]);
    let expected = [1.0 / 3.0, 1.0, 2.0, 3.0];
    for (a, b) in out.iter().zip(expected.iter()) {
        assert!((a - b).abs() < 1e-12, "{:?}", out);
    }
}

#[test]
fn sample_by_sample_matches_batch() {
    let mut rng = StdRng::seed_from_u64(21);
    let input: Vec<f64> = (0..64).map(|_| rng.gen_range(-5.0..5.0)).collect();
    let mut batch = MovingRms::<f64>::new(7).unwrap();
    let mut streamed = MovingRms::<f64>::new(7).unwrap();
    let batch_out = batch.filter(&input);
    for (i, &x) in input.iter().enumerate() {
        assert_eq!(streamed.process(x), batch_out[i]);
    }
}

#[test]
fn filters_against_brute_force_windows() {
    let mut rng = StdRng::seed_from_u64(22);
    let capacity = 5usize;
    let input: Vec<f64> = (0..200).map(|_| rng.gen_range(-50.0..50.0)).collect();

    let mut avg = MovingAverage::<f64>::new(capacity).unwrap();
    let mut rms = MovingRms::<f64>::new(capacity).unwrap();
    let mut med = MovingMedian::<f64>::new(capacity).unwrap();

    let mut window = vec![0.0f64; capacity];
    for &x in &input {
        window.remove(0);
        window.push(x);

        let mean: f64 = window.iter().sum::<f64>() / capacity as f64;
        assert!((avg.process(x) - mean).abs() < 1e-9);

        let ms: f64 = window.iter().map(|v| v * v).sum::<f64>() / capacity as f64;
        assert!((rms.process(x) - ms.sqrt()).abs() < 1e-9);

        let mut sorted = window.clone();
        sorted.sort_by(f64::total_cmp);
        assert!((med.process(x) - sorted[capacity / 2]).abs() < 1e-12);
    }
}

#[test]
fn resize_resets_to_a_fresh_window() {
    let input = [8.0, -3.0, 2.0, 5.0, -1.0];
    let mut reused = MovingMedian::<f64>::new(4).unwrap();
    reused.filter(&input);
    reused.resize(3).unwrap();
    assert_eq!(reused.size(), 3);
    let mut fresh = MovingMedian::<f64>::new(3).unwrap();
    assert_eq!(reused.filter(&input), fresh.filter(&input));
}

#[test]
fn growing_also_clears_history() {
    let mut reused = MovingAverage::<f64>::new(2).unwrap();
    reused.filter(&[100.0, 200.0]);
    reused.resize(4).unwrap();
    // No trace of the old samples may remain in the aggregate.
    assert!((reused.process(4.0) - 1.0).abs() < 1e-12);
}

#[test]
fn zero_capacity_rejected_and_state_kept() {
    let mut filt = MovingRms::<f64>::new(3).unwrap();
    filt.process(2.0);
    assert!(filt.resize(0).is_err());
    assert_eq!(filt.size(), 3);
    // The failed resize must not have disturbed the running window.
    let mut twin = MovingRms::<f64>::new(3).unwrap();
    twin.process(2.0);
    assert_eq!(filt.process(1.0), twin.process(1.0));
}

#[test]
fn dyn_filters_run_a_shared_pipeline() {
    let input: Vec<f64> = (0..16).map(|i| (i as f64 * 0.3).sin()).collect();
    let mut stages: Vec<Box<dyn StreamingFilter<f64>>> = vec![
        Box::new(MovingAverage::new(4).unwrap()),
        Box::new(MovingRms::new(4).unwrap()),
        Box::new(MovingMedian::new(5).unwrap()),
    ];
    for stage in stages.iter_mut() {
        let out = stage.filter(&input);
        assert_eq!(out.len(), input.len());
        assert!(out.iter().all(|v| v.is_finite()));
    }
}
