use guardchannel::analytic::urllc_only_loss;
use guardchannel::{GuardSearch, ModelParams, SearchConfig, TrajectorySimulator};
use rand::distributions::Open01;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Generator whose every output is zero, so every uniform is the smallest `Open01` value.
struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        dest.fill(0);
        Ok(())
    }
}

fn search(nb_sim: usize, nb_iter: f64) -> GuardSearch {
    GuardSearch::new(SearchConfig { nb_sim, nb_iter, threshold: 0.0 }).unwrap()
}

#[test]
fn statistics_stay_in_range() {
    let params = ModelParams::new(500.0, 800.0, 1.0, 12, 3).unwrap();
    let simulator = TrajectorySimulator::new(params, 5_000.0).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    for _ in 0..50 {
        let stats = simulator.run(&mut rng);
        assert!((0.0..=1.0).contains(&stats.loss), "loss {}", stats.loss);
        assert!(stats.wait_avg >= 0.0);
        assert!(stats.urllc_max <= params.capacity());
        assert!(stats.wait_avg <= stats.wait_max as f64 + 1e-9);
    }
}

#[test]
fn horizon_is_normalized_by_total_rate() {
    let params = ModelParams::new(500.0, 250.0, 1.0, 10, 0).unwrap();
    let simulator = TrajectorySimulator::new(params, 5e4).unwrap();
    assert!((simulator.horizon() - 5e4 / 750.0).abs() < 1e-12);
}

#[test]
fn rejects_non_positive_iteration_budget() {
    let params = ModelParams::new(1.0, 1.0, 1.0, 2, 0).unwrap();
    assert!(TrajectorySimulator::new(params, 0.0).is_err());
}

#[test]
fn urllc_only_system_matches_erlang_b() {
    // URLLC-only system: S = 10, G = 0, lambda_u = 500, lambda_e = 0
    let params = ModelParams::new(500.0, 0.0, 1.0, 10, 0).unwrap();
    let simulator = TrajectorySimulator::new(params, 5_000.0).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..20 {
        let stats = simulator.run(&mut rng);
        assert_eq!(stats.embb_tot, 0);
        assert_eq!(stats.wait_max, 0);
        assert_eq!(stats.wait_avg, 0.0);
    }

    let mean = search(100, 5_000.0).average_at(params, &mut rng).unwrap();
    let expected = urllc_only_loss(500.0, 1.0, 10);
    assert!((mean.loss - expected).abs() < 0.01, "simulated {} vs analytic {}", mean.loss, expected);
}

#[test]
fn full_guard_band_starves_embb() {
    // G = S sends every eMBB arrival to the waiting counter.
    let base = ModelParams::new(2.0, 2.0, 1.0, 10, 0).unwrap();
    let runner = search(20, 2_000.0);
    let mut rng = StdRng::seed_from_u64(99);

    let open = runner.average_at(base, &mut rng).unwrap();
    let closed = runner.average_at(base.with_guard(10).unwrap(), &mut rng).unwrap();

    assert_eq!(closed.embb_tot, 0.0);
    assert!(open.wait_avg < 1.0, "G = 0 backlog {}", open.wait_avg);
    assert!(closed.wait_avg > 100.0, "G = S backlog {}", closed.wait_avg);
}

#[test]
fn last_holding_time_is_clipped_at_horizon() {
    // Single unit, URLLC only: the path alternates empty (rate 1) and full
    // (rate 2), and the fourth holding time crosses the horizon of 100.
    let params = ModelParams::new(1.0, 0.0, 1.0, 1, 0).unwrap();
    let simulator = TrajectorySimulator::new(params, 100.0).unwrap();
    assert_eq!(simulator.horizon(), 100.0);

    let u: f64 = ZeroRng.sample(Open01);
    let h = -u.ln();
    // empty [0, h), full [h, 1.5h), empty [1.5h, 2.5h), full from 2.5h past 100
    assert!(2.5 * h < 100.0 && 3.0 * h > 100.0, "h = {}", h);

    let stats = simulator.run(&mut ZeroRng);
    let expected = (h / 2.0 + (100.0 - 2.5 * h)) / 100.0;
    assert!((stats.loss - expected).abs() < 1e-12, "loss {} expected {}", stats.loss, expected);
    assert_eq!(stats.urllc_tot, 2);
    assert_eq!(stats.urllc_max, 1);
    assert_eq!(stats.wait_avg, 0.0);
}
