//! Covered-call Monte Carlo: probability of profit under GBM, and the
//! deterministic payoff curve used for charting.

use rand::Rng;
use serde::Deserialize;

use crate::types::PayoffCurve;
use crate::utils::round2;

/// Payoff curve spans +/-20% of spot in this many equal steps.
const CURVE_STEPS: usize = 40;

/// Long 100 shares at `underlying`, short one call at `strike` for `premium`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoveredCall {
    pub underlying: f64,
    pub strike: f64,
    pub premium: f64,
}

impl CoveredCall {
    /// Per-share payoff if the underlying ends at `terminal`.
    pub fn payoff(&self, terminal: f64) -> f64 {
        self.premium + terminal.min(self.strike) - self.underlying
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SimulationParams {
    pub days_to_expiry: f64,
    /// Annualized.
    pub volatility: f64,
    pub samples: usize,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            days_to_expiry: 30.0,
            volatility: 0.16,
            samples: 1000,
        }
    }
}

/// Standard normal draw via Box-Muller.
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let mut u = 0.0;
    let mut v = 0.0;
    while u == 0.0 {
        u = rng.gen::<f64>();
    }
    while v == 0.0 {
        v = rng.gen::<f64>();
    }
    (-2.0 * u.ln()).sqrt() * (2.0 * std::f64::consts::PI * v).cos()
}

/// Fraction of simulated terminal prices where the covered call does not lose
/// money. Zero samples yields 0.
pub fn probability_of_profit<R: Rng + ?Sized>(
    rng: &mut R,
    position: &CoveredCall,
    params: &SimulationParams,
) -> f64 {
    if params.samples == 0 {
        return 0.0;
    }
    let t = params.days_to_expiry / 365.0;
    let sigma = params.volatility;
    let drift = -0.5 * sigma.powi(2) * t;
    let diffusion = sigma * t.sqrt();

    let mut profitable = 0usize;
    for _ in 0..params.samples {
        let z = gaussian(rng);
        let terminal = position.underlying * (drift + diffusion * z).exp();
        if position.payoff(terminal) >= 0.0 {
            profitable += 1;
        }
    }
    profitable as f64 / params.samples as f64
}

/// Covered-call and buy-and-hold payoffs over 41 prices from 80% to 120% of
/// spot, all rounded to 2 decimals.
pub fn build_payoff_curve(position: &CoveredCall) -> PayoffCurve {
    let start = position.underlying * 0.8;
    let end = position.underlying * 1.2;
    let step = (end - start) / CURVE_STEPS as f64;

    let mut curve = PayoffCurve {
        prices: Vec::with_capacity(CURVE_STEPS + 1),
        covered_call: Vec::with_capacity(CURVE_STEPS + 1),
        stock: Vec::with_capacity(CURVE_STEPS + 1),
    };
    for i in 0..=CURVE_STEPS {
        let price = start + step * i as f64;
        curve.prices.push(round2(price));
        curve.covered_call.push(round2(position.payoff(price)));
        curve.stock.push(round2(price - position.underlying));
    }
    curve
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cc(underlying: f64, strike: f64, premium: f64) -> CoveredCall {
        CoveredCall {
            underlying,
            strike,
            premium,
        }
    }

    #[test]
    fn payoff_caps_at_strike() {
        let p = cc(100.0, 105.0, 2.0);
        assert_eq!(p.payoff(100.0), 2.0);
        assert_eq!(p.payoff(120.0), 7.0);
        assert_eq!(p.payoff(90.0), -8.0);
    }

    #[test]
    fn gaussian_is_roughly_standard() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let draws: Vec<f64> = (0..n).map(|_| gaussian(&mut rng)).collect();
        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((var - 1.0).abs() < 0.05, "var {var}");
    }

    #[test]
    fn near_zero_vol_far_strike_is_almost_always_profitable() {
        let mut rng = StdRng::seed_from_u64(42);
        let params = SimulationParams {
            days_to_expiry: 5.0,
            volatility: 0.0001,
            samples: 1000,
        };
        let pop = probability_of_profit(&mut rng, &cc(100.0, 200.0, 1.0), &params);
        assert!(pop >= 0.98, "pop {pop}");
    }

    #[test]
    fn probability_is_a_fraction() {
        let mut rng = StdRng::seed_from_u64(1);
        let pop = probability_of_profit(&mut rng, &cc(100.0, 100.0, 2.5), &SimulationParams::default());
        assert!((0.0..=1.0).contains(&pop));
        // ATM call with ~1.3 sigma-days of cushion: comfortably above a coin flip
        assert!(pop > 0.5 && pop < 0.9, "pop {pop}");
    }

    #[test]
    fn same_seed_same_probability() {
        let params = SimulationParams::default();
        let pos = cc(450.0, 470.0, 3.1);
        let a = probability_of_profit(&mut StdRng::seed_from_u64(99), &pos, &params);
        let b = probability_of_profit(&mut StdRng::seed_from_u64(99), &pos, &params);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_samples_is_guarded() {
        let params = SimulationParams {
            samples: 0,
            ..SimulationParams::default()
        };
        let pop = probability_of_profit(&mut StdRng::seed_from_u64(3), &cc(100.0, 100.0, 1.0), &params);
        assert_eq!(pop, 0.0);
    }

    #[test]
    fn curve_has_41_ascending_points_over_band() {
        let curve = build_payoff_curve(&cc(100.0, 105.0, 2.0));
        assert_eq!(curve.prices.len(), 41);
        assert_eq!(curve.covered_call.len(), 41);
        assert_eq!(curve.stock.len(), 41);
        assert_eq!(curve.prices[0], 80.0);
        assert_eq!(curve.prices[40], 120.0);
        assert!(curve.prices.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(curve.stock[0], -20.0);
        assert_eq!(curve.stock[40], 20.0);
        assert_eq!(curve.covered_call[0], -18.0);
        // capped above the strike
        assert_eq!(curve.covered_call[40], 7.0);
    }

    #[test]
    fn curve_is_deterministic() {
        let pos = cc(437.12, 455.0, 4.37);
        assert_eq!(build_payoff_curve(&pos), build_payoff_curve(&pos));
    }
}
