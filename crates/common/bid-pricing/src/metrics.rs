use crate::decision::BidDecision;
use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, IntCounterVec};

lazy_static! {
    pub static ref BID_DECISIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "bid_decisions_total",
        "Bid decisions produced by the pricing engine",
        &["outcome"]
    )
    .expect("bid_decisions_total metric registers once");
}

pub fn record_decision(decision: &BidDecision) {
    let outcome = match decision {
        BidDecision::Priced { .. } => "priced",
        BidDecision::TooLow { .. } => "too_low",
    };
    BID_DECISIONS_TOTAL.with_label_values(&[outcome]).inc();
}
