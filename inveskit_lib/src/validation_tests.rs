use super::*;
use rust_decimal_macros::dec;

fn trade(id: TradeId, name: &str, price: Decimal, quantity: i64) -> Trade {
    Trade {
        id,
        stock_name: name.to_string(),
        trade_type: TradeType::Buy,
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        price,
        quantity,
    }
}

fn point(y: i32, m: u32, d: u32) -> PricePoint {
    PricePoint::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), dec!(100))
}

// -- Trade validation --

#[test]
fn trade_valid() {
    assert!(validate_trade(&trade(1, "A", dec!(100), 1)).is_ok());
}

#[test]
fn trade_zero_price_is_valid() {
    assert!(validate_trade(&trade(1, "A", dec!(0), 1)).is_ok());
}

#[test]
fn trade_zero_quantity() {
    let err = validate_trade(&trade(7, "A", dec!(100), 0)).unwrap_err();
    assert!(matches!(err, EngineError::InvalidTrade { id: 7, .. }));
}

#[test]
fn trade_negative_quantity() {
    assert!(validate_trade(&trade(1, "A", dec!(100), -3)).is_err());
}

#[test]
fn trade_negative_price() {
    let err = validate_trade(&trade(2, "A", dec!(-0.01), 1)).unwrap_err();
    assert!(err.to_string().contains("negative"));
}

#[test]
fn trade_blank_stock_name() {
    assert!(validate_trade(&trade(1, "   ", dec!(100), 1)).is_err());
}

#[test]
fn trades_report_first_offender() {
    let trades = vec![
        trade(1, "A", dec!(100), 1),
        trade(2, "A", dec!(100), 0),
        trade(3, "A", dec!(-1), 1),
    ];
    match validate_trades(&trades) {
        Err(EngineError::InvalidTrade { id, .. }) => assert_eq!(id, 2),
        other => panic!("expected InvalidTrade, got {:?}", other),
    }
}

// -- Price series ordering --

#[test]
fn chronological_accepts_duplicates() {
    let prices = vec![point(2024, 1, 1), point(2024, 1, 1), point(2024, 1, 2)];
    assert!(check_chronological(&prices).is_ok());
}

#[test]
fn chronological_accepts_empty_and_single() {
    assert!(check_chronological(&[]).is_ok());
    assert!(check_chronological(&[point(2024, 1, 1)]).is_ok());
}

#[test]
fn chronological_rejects_backwards_step() {
    let prices = vec![point(2024, 1, 1), point(2024, 1, 3), point(2024, 1, 2)];
    assert_eq!(
        check_chronological(&prices),
        Err(EngineError::UnsortedPriceSeries {
            index: 2,
            previous: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            current: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        })
    );
}

// -- Price parsing --

#[test]
fn price_plain_decimal() {
    assert_eq!(parse_price(1, "70000.25").unwrap(), dec!(70000.25));
}

#[test]
fn price_with_whitespace() {
    assert_eq!(parse_price(1, "  100 ").unwrap(), dec!(100));
}

#[test]
fn price_scientific() {
    assert_eq!(parse_price(1, "1.5e3").unwrap(), dec!(1500));
}

#[test]
fn price_nan_rejected() {
    assert!(parse_price(1, "NaN").is_err());
}

#[test]
fn price_infinity_rejected() {
    assert!(parse_price(1, "inf").is_err());
    assert!(parse_price(1, "Infinity").is_err());
}

#[test]
fn price_empty_rejected() {
    assert!(parse_price(1, "").is_err());
}

#[test]
fn price_negative_rejected() {
    assert!(parse_price(4, "-5").is_err());
}

// -- Trade type / date / name --

#[test]
fn trade_type_parses() {
    assert_eq!(parse_trade_type(1, "Buy").unwrap(), TradeType::Buy);
    assert_eq!(parse_trade_type(1, "sell").unwrap(), TradeType::Sell);
}

#[test]
fn trade_type_unknown() {
    assert!(parse_trade_type(1, "short").is_err());
}

#[test]
fn date_valid() {
    assert_eq!(
        parse_trade_date(1, "2024-01-05").unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    );
}

#[test]
fn date_invalid_format() {
    assert!(parse_trade_date(1, "01/05/2024").is_err());
}

#[test]
fn stock_name_trimmed() {
    assert_eq!(normalize_stock_name(1, "  삼성전자 ").unwrap(), "삼성전자");
}

#[test]
fn stock_name_too_long() {
    let long = "가".repeat(MAX_STOCK_NAME_LENGTH + 1);
    assert!(normalize_stock_name(1, &long).is_err());
}
