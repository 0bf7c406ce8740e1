//! Closed-form loss probability of the URLLC-only system.

/// Erlang-B blocking probability for `capacity` servers and offered load `offered_load`.
///
/// Uses the recursion B(0) = 1, B(k) = a B(k-1) / (k + a B(k-1)), which stays
/// stable for large loads and capacities.
pub fn erlang_b(capacity: u32, offered_load: f64) -> f64 {
    let mut b = 1.0;
    for k in 1..=capacity {
        let ab = offered_load * b;
        b = ab / (k as f64 + ab);
    }
    b
}

/// Full-occupancy probability with URLLC only, where each busy unit departs at rate 2 mu.
pub fn urllc_only_loss(lambda_u: f64, mu: f64, capacity: u32) -> f64 {
    erlang_b(capacity, lambda_u / (2.0 * mu))
}
