//! Pick covered-call strikes from an options chain (ATM, +5%, +10%) and
//! evaluate each one.

use rand::Rng;

use crate::simulator::{build_payoff_curve, probability_of_profit, CoveredCall, SimulationParams};
use crate::types::{CoveredCallCandidate, OptionQuote, OptionsChain, OptionsReport};
use crate::utils::round2;

/// Target strikes as multiples of spot.
const TARGETS: [f64; 3] = [1.0, 1.05, 1.10];

/// Quote whose strike is closest to `target`; the first one wins ties.
pub fn nearest_strike(options: &[OptionQuote], target: f64) -> Option<OptionQuote> {
    let (first, rest) = options.split_first()?;
    let best = rest.iter().fold(*first, |best, cur| {
        if (cur.strike - target).abs() < (best.strike - target).abs() {
            *cur
        } else {
            best
        }
    });
    Some(best)
}

/// ATM, +5% and +10% candidates in that order. Empty chain, empty result.
pub fn select_candidates(chain: &OptionsChain) -> Vec<OptionQuote> {
    TARGETS
        .iter()
        .filter_map(|m| nearest_strike(&chain.options, chain.underlying_price * m))
        .collect()
}

/// Run the simulator and payoff curve for every selected strike.
pub fn evaluate_candidates<R: Rng + ?Sized>(
    rng: &mut R,
    chain: &OptionsChain,
    params: &SimulationParams,
) -> Vec<CoveredCallCandidate> {
    select_candidates(chain)
        .into_iter()
        .map(|quote| {
            let position = CoveredCall {
                underlying: chain.underlying_price,
                strike: quote.strike,
                premium: quote.price,
            };
            let pop = probability_of_profit(&mut *rng, &position, params);
            let curve = build_payoff_curve(&position);
            CoveredCallCandidate {
                strike: quote.strike,
                premium: quote.price,
                probability_of_profit: round2(pop * 100.0),
                price_range: curve.prices,
                covered_call_payoff: curve.covered_call,
                stock_payoff: curve.stock,
            }
        })
        .collect()
}

/// Candidates for `symbol` wrapped with the chain's spot price.
pub fn options_report<R: Rng + ?Sized>(
    rng: &mut R,
    symbol: &str,
    chain: &OptionsChain,
    params: &SimulationParams,
) -> OptionsReport {
    OptionsReport {
        symbol: symbol.to_string(),
        underlying_price: chain.underlying_price,
        sample_data: true,
        candidates: evaluate_candidates(rng, chain, params),
    }
}
