//! Position engine: replays transactions into per-symbol lot inventories and
//! produces realized/unrealized P/L summaries.
//!
//! Pure and infallible. Malformed numbers (NaN) flow through to the output
//! rather than failing; callers sanitise input first.

use std::collections::{BTreeMap, HashMap, VecDeque};

use tracing::debug;

use crate::types::{CostMethod, Lot, PositionSummary, Transaction, TxnKind};

/// Per-symbol accumulator while replaying.
#[derive(Debug, Default)]
struct Position {
    lots: VecDeque<Lot>,
    premiums: f64,
    realized: f64,
}

impl Position {
    fn open_lot(&mut self, quantity: f64, price: f64) {
        self.lots.push_back(Lot { quantity, price });
    }

    /// Draw `quantity` shares out of the open lots at `price`, realizing P/L.
    /// Returns the part of the sell that found no lots to draw from.
    fn close(&mut self, quantity: f64, price: f64, method: CostMethod) -> f64 {
        let mut to_sell = quantity;
        while to_sell > 0.0 && !self.lots.is_empty() {
            let idx = draw_index(method, self.lots.len());
            let lot = &mut self.lots[idx];
            let sold = to_sell.min(lot.quantity);
            self.realized += sold * price - sold * lot.price;
            lot.quantity -= sold;
            to_sell -= sold;
            if lot.quantity == 0.0 {
                self.lots.remove(idx);
            }
        }
        to_sell
    }

    fn summarize(&self, last_price: f64) -> PositionSummary {
        let quantity: f64 = self.lots.iter().map(|l| l.quantity).sum();
        let total_cost: f64 = self.lots.iter().map(|l| l.quantity * l.price).sum();
        let cost_basis = if quantity > 0.0 { total_cost / quantity } else { 0.0 };
        let realized_pl = self.realized + self.premiums;
        let unrealized_pl = quantity * (last_price - cost_basis);
        PositionSummary {
            quantity,
            cost_basis,
            last_price,
            market_value: quantity * last_price,
            realized_pl,
            unrealized_pl,
            total_pl: realized_pl + unrealized_pl,
        }
    }
}

/// Index of the lot a sale draws from next.
fn draw_index(method: CostMethod, open_lots: usize) -> usize {
    match method {
        CostMethod::Fifo => 0,
        CostMethod::Lifo => open_lots - 1,
        // Average only changes how the remaining basis is reported (always a
        // weighted mean); lots are still consumed oldest first.
        CostMethod::Average => 0,
    }
}

/// Replay `transactions` in date order and summarise each symbol.
///
/// Same-date transactions keep their input order. Symbols missing from
/// `prices` are valued at 0. Selling more than is held silently drops the
/// excess.
pub fn compute_positions(
    transactions: &[Transaction],
    prices: &HashMap<String, f64>,
    method: CostMethod,
) -> BTreeMap<String, PositionSummary> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    // stable: ties keep input order
    sorted.sort_by_key(|t| t.date);

    let mut positions: BTreeMap<String, Position> = BTreeMap::new();
    for txn in sorted {
        let sym = txn.symbol.to_uppercase();
        let pos = positions.entry(sym).or_default();
        match txn.kind {
            TxnKind::Premium => pos.premiums += txn.price,
            TxnKind::Buy => pos.open_lot(txn.quantity, txn.price),
            TxnKind::Sell => {
                let unfilled = pos.close(txn.quantity, txn.price, method);
                if unfilled > 0.0 {
                    debug!(
                        "Sell of {} {} on {} exceeds open lots; dropping {}",
                        txn.quantity, txn.symbol, txn.date, unfilled
                    );
                }
            }
        }
    }

    positions
        .into_iter()
        .map(|(sym, pos)| {
            let last = prices.get(&sym).copied().unwrap_or(0.0);
            let summary = pos.summarize(last);
            (sym, summary)
        })
        .collect()
}
