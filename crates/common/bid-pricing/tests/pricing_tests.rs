use bid_pricing::{price_request, BidDecision, GpuPriceTable, PriceTargets, PricingError, BLOCKS_PER_MONTH};
use bid_types::{BidRequest, STABLE_DENOMS};
use serde_json::json;

fn scenario_a(denom: &str, amount: &str) -> BidRequest {
    let doc = json!({
        "price": {"denom": denom, "amount": amount},
        "price_precision": 18,
        "resources": [{
            "count": 1,
            "cpu": 100,
            "memory": 268435456u64,
            "storage": [{"name": "ephemeral", "size": 268435456u64}],
            "endpoints": [{"kind": "shared_http"}]
        }]
    });
    serde_json::from_value(doc).unwrap()
}

#[test]
fn scenario_a_small_deployment() {
    let request = scenario_a("uakt", "100000");
    let quote = price_request(&request, &PriceTargets::default(), 2.50).unwrap();

    // 256 MiB of ephemeral storage truncates to 0 GB.
    assert_eq!(quote.resources.ephemeral_gb, 0);
    assert_eq!(quote.gpu_cost_usd, 0.0);
    assert!((quote.monthly_usd - (0.1 * 1.60 + 0.25 * 0.80 + 0.05)).abs() < 1e-12);

    let expected = quote.monthly_usd / 2.50 * 1_000_000.0 / BLOCKS_PER_MONTH;
    assert!((quote.block_rate.per_block_native - expected).abs() < 1e-12);
    assert!((quote.block_rate.per_block_native - 0.381_475_58).abs() < 1e-8);

    match &quote.decision {
        BidDecision::Priced { price } => {
            assert!(price.starts_with("0.381475579795"), "unexpected price {price}");
            assert_eq!(price.split('.').nth(1).unwrap().len(), 18);
        }
        other => panic!("expected a priced bid, got {other:?}"),
    }
}

#[test]
fn scenario_b_no_gpu_contributes_nothing() {
    let mut targets = PriceTargets::default();
    targets.gpu_prices = GpuPriceTable::from_pairs([("a100", 200.0)]);

    let quote = price_request(&scenario_a("uakt", "100000"), &targets, 2.50).unwrap();
    assert_eq!(quote.gpu_cost_usd, 0.0);
}

#[test]
fn scenario_c_unsupported_denom_always_rejects() {
    for amount in ["0.000001", "100000", "999999999999"] {
        let err = price_request(&scenario_a("uatom", amount), &PriceTargets::default(), 2.50).unwrap_err();
        assert_eq!(err, PricingError::UnsupportedDenom("uatom".into()));
        assert!(err.to_string().contains("denom is not supported"));
    }
}

#[test]
fn identical_inputs_give_identical_output() {
    let request = scenario_a("uakt", "100000");
    let targets = PriceTargets::default();

    let first = price_request(&request, &targets, 1.87).unwrap();
    let second = price_request(&request, &targets, 1.87).unwrap();
    assert_eq!(first.decision.to_string(), second.decision.to_string());
    assert_eq!(first.block_rate.canonical, second.block_rate.canonical);
}

#[test]
fn low_ceiling_is_a_decision_not_an_error() {
    let quote = price_request(&scenario_a("uakt", "0.1"), &PriceTargets::default(), 2.50).unwrap();
    match quote.decision {
        BidDecision::TooLow { required, .. } => assert!(required.starts_with("0.3814")),
        other => panic!("expected too-low, got {other:?}"),
    }
}

#[test]
fn stablecoin_quote_ignores_exchange_rate() {
    let request = scenario_a(STABLE_DENOMS[1], "100000");
    let cheap = price_request(&request, &PriceTargets::default(), 0.5).unwrap();
    let dear = price_request(&request, &PriceTargets::default(), 5.0).unwrap();
    assert_eq!(cheap.decision, dear.decision);

    let expected = format!("{:.18}", cheap.monthly_usd / BLOCKS_PER_MONTH * 1_000_000.0);
    assert_eq!(cheap.decision, BidDecision::Priced { price: expected });
}

#[test]
fn gpu_deployment_prices_by_most_specific_key() {
    let mut targets = PriceTargets::default();
    targets.gpu_prices = GpuPriceTable::parse("a100.80Gi.sxm4=280,a100.80Gi=250,a100=200").unwrap();

    let doc = json!({
        "price": {"denom": "uakt", "amount": "1000000"},
        "resources": [
            {"count": 1, "gpu": {"units": 2, "attributes": [
                {"key": "vendor/nvidia/model/a100/ram/80Gi/interface/sxm4", "value": "true"}]}},
            {"count": 3, "gpu": {"units": 1, "attributes": [
                {"key": "vendor/nvidia/model/a100", "value": "true"}]}}
        ]
    });
    let request: BidRequest = serde_json::from_value(doc).unwrap();

    let quote = price_request(&request, &targets, 2.0).unwrap();
    assert_eq!(quote.gpu_cost_usd, 2.0 * 280.0 + 3.0 * 200.0);
    assert!((quote.monthly_usd - 1160.0).abs() < 1e-9);
    assert!(quote.decision.is_priced());
}

#[test]
fn request_without_price_cannot_be_priced() {
    let request = BidRequest::from_json(r#"{"resources": [{"cpu": 1000}]}"#).unwrap();
    assert_eq!(
        price_request(&request, &PriceTargets::default(), 2.0).unwrap_err(),
        PricingError::PriceMissing
    );
}

#[test]
fn quote_serializes_for_reporting() {
    let quote = price_request(&scenario_a("uakt", "0.1"), &PriceTargets::default(), 2.50).unwrap();
    let value = serde_json::to_value(&quote).unwrap();

    assert_eq!(value["resources"]["ephemeral_gb"], 0);
    assert_eq!(value["gpu_cost_usd"], 0.0);
    assert!(value["block_rate"]["canonical"].as_str().unwrap().ends_with("uakt"));
    assert_eq!(value["decision"]["outcome"], "too_low");
    assert_eq!(value["decision"]["denom"], "uakt");
    assert!(value["decision"]["required"].as_str().unwrap().starts_with("0.3814"));
}

#[test]
fn oversized_precision_is_capped() {
    let mut request = scenario_a("uakt", "100000");
    request.price_precision = u32::MAX;
    let quote = price_request(&request, &PriceTargets::default(), 2.50).unwrap();
    match quote.decision {
        BidDecision::Priced { price } => assert_eq!(price.split('.').nth(1).unwrap().len(), 18),
        other => panic!("expected a priced bid, got {other:?}"),
    }
}
