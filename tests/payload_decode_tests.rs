use approx::assert_relative_eq;
use ohlcv_chart::ChartError;
use ohlcv_chart::core::{decimal_to_f64, parse_decimal_price};
use ohlcv_chart::data::{PayloadShape, decode_bars, decode_bars_slice, detect_shape};
use rust_decimal::Decimal;

#[test]
fn flat_payload_decodes_with_wire_names() {
    let payload = r#"[
        {"time": 120, "open": 1.5, "high": 2.0, "low": 1.0, "close": 1.75, "tickVolume": 42},
        {"time": 60, "open": 1.0, "high": 1.5, "low": 0.5, "close": 1.25, "tickVolume": 7}
    ]"#;
    let bars = decode_bars(payload).expect("flat payload");
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].time, 60);
    assert_eq!(bars[1].tick_volume, 42);
    assert_eq!(bars[1].close, 1.75);
}

#[test]
fn chunk_times_are_expanded_and_missing_prices_default() {
    let payload = r#"[{"chunkStart": 1000, "bars": [{"time": 5, "close": 3.5, "tickVolume": 9}]}]"#;
    let bars = decode_bars(payload).expect("chunked payload");
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].time, 1005);
    assert_eq!(bars[0].open, 0.0);
    assert_eq!(bars[0].high, 0.0);
    assert_eq!(bars[0].low, 0.0);
    assert_eq!(bars[0].close, 3.5);
    assert_eq!(bars[0].tick_volume, 9);
}

#[test]
fn chunks_are_merged_and_sorted() {
    let payload = r#"[
        {"chunkStart": 2000, "bars": [
            {"time": 0, "open": 1, "high": 1, "low": 1, "close": 1, "tickVolume": 1},
            {"time": 60, "open": 2, "high": 2, "low": 2, "close": 2, "tickVolume": 2}
        ]},
        {"chunkStart": 1000, "bars": [
            {"time": 30, "open": 3, "high": 3, "low": 3, "close": 3, "tickVolume": 3}
        ]}
    ]"#;
    let bars = decode_bars(payload).expect("chunked payload");
    let times: Vec<i64> = bars.iter().map(|b| b.time).collect();
    assert_eq!(times, vec![1030, 2000, 2060]);
}

#[test]
fn duplicate_times_keep_arrival_order() {
    let payload = r#"[
        {"chunkStart": 0, "bars": [{"time": 10, "close": 1, "tickVolume": 1}]},
        {"chunkStart": 5, "bars": [{"time": 5, "close": 2, "tickVolume": 1}]}
    ]"#;
    let bars = decode_bars(payload).expect("chunked payload");
    assert_eq!(bars[0].time, 10);
    assert_eq!(bars[1].time, 10);
    assert_eq!(bars[0].close, 1.0);
    assert_eq!(bars[1].close, 2.0);
}

#[test]
fn empty_chunks_are_skipped() {
    let payload = r#"[
        {"chunkStart": 0, "bars": null},
        {"chunkStart": 100},
        {"chunkStart": 200, "bars": []},
        {"chunkStart": 300, "bars": [{"time": 1, "close": 4, "tickVolume": 1}]}
    ]"#;
    let bars = decode_bars(payload).expect("chunked payload");
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].time, 301);
}

#[test]
fn empty_array_is_an_empty_flat_payload() {
    assert!(decode_bars("[]").expect("empty payload").is_empty());
    let value = serde_json::json!([]);
    assert_eq!(detect_shape(&value).expect("shape"), PayloadShape::Flat);
}

#[test]
fn byte_payloads_decode_like_strings() {
    let payload = br#"[{"time": 1, "open": 1, "high": 1, "low": 1, "close": 1, "tickVolume": 1}]"#;
    assert_eq!(decode_bars_slice(payload).expect("bytes").len(), 1);
}

#[test]
fn unrecognized_shapes_fail_with_format_error() {
    for payload in [
        r#"{"time": 1}"#,
        "[1, 2, 3]",
        r#"[{"price": 1}]"#,
        "not json",
        r#"[{"time": "yesterday", "tickVolume": 1}]"#,
    ] {
        let err = decode_bars(payload).expect_err("bad payload must fail");
        assert!(matches!(err, ChartError::Format(_)), "{payload}: {err}");
    }
}

#[test]
fn chunk_time_overflow_is_rejected() {
    let payload = format!(
        r#"[{{"chunkStart": {}, "bars": [{{"time": 1, "tickVolume": 1}}]}}]"#,
        i64::MAX
    );
    assert!(matches!(
        decode_bars(&payload),
        Err(ChartError::Format(_))
    ));
}

#[test]
fn quoted_decimal_prices_are_parsed() {
    let payload = r#"[
        {"time": 60, "open": "27123.45", "high": "27200.5", "low": "27000", "close": "2.715e4", "tickVolume": 3}
    ]"#;
    let bars = decode_bars(payload).expect("decimal strings");
    assert_relative_eq!(bars[0].open, 27_123.45);
    assert_relative_eq!(bars[0].high, 27_200.5);
    assert_relative_eq!(bars[0].low, 27_000.0);
    assert_relative_eq!(bars[0].close, 27_150.0);
}

#[test]
fn quoted_prices_inside_chunks_mix_with_numbers() {
    let payload = r#"[{"chunkStart": 100, "bars": [{"time": 1, "open": "1.25", "close": 1.5, "tickVolume": 2}]}]"#;
    let bars = decode_bars(payload).expect("mixed chunk");
    assert_relative_eq!(bars[0].open, 1.25);
    assert_relative_eq!(bars[0].close, 1.5);
    assert_eq!(bars[0].high, 0.0);
}

#[test]
fn non_decimal_price_text_is_a_format_error() {
    let payload =
        r#"[{"time": 1, "open": "n/a", "high": 1, "low": 1, "close": 1, "tickVolume": 1}]"#;
    let err = decode_bars(payload).expect_err("text price must fail");
    assert!(matches!(err, ChartError::Format(_)), "{err}");
}

#[test]
fn decimal_prices_convert_to_f64() {
    let price = Decimal::new(12_345, 2);
    assert_relative_eq!(decimal_to_f64(price, "close").expect("decimal"), 123.45);
    assert_relative_eq!(
        parse_decimal_price(" 0.000125 ", "low").expect("padded text"),
        0.000_125
    );
}
