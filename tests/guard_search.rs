use guardchannel::{GuardOutcome, GuardSearch, ModelParams, SearchConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn light_urllc_load_needs_no_guard() {
    // URLLC-only loss is already far below the threshold.
    let load = ModelParams::new(1.0, 0.0, 1.0, 10, 0).unwrap();
    let search = GuardSearch::new(SearchConfig { nb_sim: 20, nb_iter: 500.0, threshold: 1e-3 }).unwrap();
    let mut rng = StdRng::seed_from_u64(5);

    let outcome = search.search(&load, &mut rng).unwrap();
    assert_eq!(outcome.guard(), Some(0));
    assert!(outcome.stats().loss <= 1e-3);
}

#[test]
fn loss_decreases_with_guard() {
    let load = ModelParams::new(2.0, 4.0, 1.0, 5, 0).unwrap();
    let search = GuardSearch::new(SearchConfig { nb_sim: 100, nb_iter: 2_000.0, threshold: 0.0 }).unwrap();
    let mut rng = StdRng::seed_from_u64(17);

    let losses: Vec<f64> = (0..=3)
        .map(|g| search.average_at(load.with_guard(g).unwrap(), &mut rng).unwrap().loss)
        .collect();
    for pair in losses.windows(2) {
        assert!(pair[1] < pair[0], "losses not decreasing: {:?}", losses);
    }
}

#[test]
fn search_stops_at_first_guard_meeting_threshold() {
    // Losses at this load are about 0.64, 0.19, 0.05, 0.016 for G = 0..3.
    let load = ModelParams::new(2.0, 4.0, 1.0, 5, 0).unwrap();
    let search = GuardSearch::new(SearchConfig { nb_sim: 100, nb_iter: 2_000.0, threshold: 0.1 }).unwrap();
    let mut rng = StdRng::seed_from_u64(23);

    match search.search(&load, &mut rng).unwrap() {
        GuardOutcome::Found { guard, stats } => {
            assert_eq!(guard, 2);
            assert!(stats.loss <= 0.1);
        }
        other => panic!("expected a guard, got {:?}", other),
    }
}

#[test]
fn unreachable_threshold_is_infeasible() {
    // URLLC alone saturates two units; no guard can help.
    let load = ModelParams::new(500.0, 0.0, 1.0, 2, 0).unwrap();
    let search = GuardSearch::new(SearchConfig { nb_sim: 5, nb_iter: 500.0, threshold: 0.0 }).unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    let outcome = search.search(&load, &mut rng).unwrap();
    assert!(!outcome.is_feasible());
    assert_eq!(outcome.guard(), None);
    match outcome {
        GuardOutcome::Infeasible { last_guard, stats } => {
            assert_eq!(last_guard, 1);
            assert!(stats.loss > 0.5);
        }
        other => panic!("expected infeasible, got {:?}", other),
    }
}

#[test]
fn rejects_empty_batches() {
    assert!(GuardSearch::new(SearchConfig { nb_sim: 0, nb_iter: 10.0, threshold: 1e-5 }).is_err());
    assert!(GuardSearch::new(SearchConfig { nb_sim: 1, nb_iter: -1.0, threshold: 1e-5 }).is_err());
    assert!(GuardSearch::new(SearchConfig { nb_sim: 1, nb_iter: 1.0, threshold: f64::NAN }).is_err());
}
