use portfolio_dashboard_core::errors::CoreError;
use portfolio_dashboard_core::models::benchmark::{
    Benchmark, BenchmarkCatalog, DEFAULT_BENCHMARK, FALLBACK_LABEL,
};
use portfolio_dashboard_core::models::ordered_map::OrderedMap;
use portfolio_dashboard_core::models::series::{NamedColor, RawTimeSeries, SeriesColor, SeriesKind};
use portfolio_dashboard_core::models::settings::DashboardSettings;
use portfolio_dashboard_core::models::snapshot::IndicatorValue;
use portfolio_dashboard_core::models::transaction::{Transaction, TransactionSide};
use portfolio_dashboard_core::models::wire::{
    ComparisonResponse, ComponentList, EncodedJson, IndivPerfResponse,
};
use serde_json::json;

// ═══════════════════════════════════════════════════════════════════
//  RawTimeSeries
// ═══════════════════════════════════════════════════════════════════

mod raw_time_series {
    use super::*;

    #[test]
    fn deserializes_numbers_and_nulls() {
        let raw: RawTimeSeries =
            serde_json::from_value(json!({"1738713600000": 1000, "1738800000000": null}))
                .unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw.0.get("1738713600000"), Some(&Some(1000.0)));
        assert_eq!(raw.0.get("1738800000000"), Some(&None));
    }

    #[test]
    fn rejects_non_numeric_values() {
        let result: Result<RawTimeSeries, _> =
            serde_json::from_value(json!({"1738713600000": "1000"}));
        assert!(result.is_err());
    }

    #[test]
    fn collects_from_pairs() {
        let raw: RawTimeSeries = [("1", 1.0), ("2", 2.0)].into_iter().collect();
        assert_eq!(raw.len(), 2);
        assert!(!raw.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Transaction
// ═══════════════════════════════════════════════════════════════════

mod transaction {
    use super::*;

    #[test]
    fn accepts_backend_type_field() {
        let txn: Transaction = serde_json::from_value(json!({
            "type": "sell",
            "date": "2025-03-20 12:00:00",
            "quantity": 151,
            "price": 15.11,
        }))
        .unwrap();
        assert_eq!(txn.side, TransactionSide::Sell);
        assert_eq!(txn.quantity, 151.0);
        assert_eq!(txn.date, "2025-03-20 12:00:00");
    }

    #[test]
    fn accepts_side_field() {
        let txn: Transaction = serde_json::from_value(json!({
            "side": "buy", "date": "2023-05-01", "quantity": 3, "price": 150.25,
        }))
        .unwrap();
        assert_eq!(txn, Transaction::new("2023-05-01", TransactionSide::Buy, 150.25, 3.0));
    }

    #[test]
    fn rejects_unknown_side() {
        let result: Result<Transaction, _> = serde_json::from_value(json!({
            "side": "short", "date": "2023-05-01", "quantity": 3, "price": 1.0,
        }));
        assert!(result.is_err());
    }

    #[test]
    fn side_display_is_lowercase() {
        assert_eq!(TransactionSide::Buy.to_string(), "buy");
        assert_eq!(TransactionSide::Sell.to_string(), "sell");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Double-encoded fields
// ═══════════════════════════════════════════════════════════════════

mod encoded_json {
    use super::*;

    #[test]
    fn string_is_parsed_again() {
        let field = EncodedJson::from(json!(r#"{"100": 1.5}"#));
        assert!(matches!(field, EncodedJson::Text(_)));
        let raw: RawTimeSeries = field.decode("prices").unwrap();
        assert_eq!(raw.0.get("100"), Some(&Some(1.5)));
    }

    #[test]
    fn inline_value_is_accepted() {
        let field = EncodedJson::from(json!({"100": 1.5}));
        assert!(matches!(field, EncodedJson::Inline(_)));
        let raw: RawTimeSeries = field.decode("prices").unwrap();
        assert_eq!(raw.len(), 1);
    }

    #[test]
    fn invalid_inner_json_is_malformed() {
        let field = EncodedJson::from(json!("{not json"));
        let err = field.decode::<RawTimeSeries>("prices").unwrap_err();
        match err {
            CoreError::MalformedResponse(msg) => assert!(msg.starts_with("prices:")),
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn column_object_keeps_document_order() {
        let field = EncodedJson::from(json!(
            r#"{"Value": {"1": 1.0}, "Cash": {"1": 2.0}, "Bench": {"1": 3.0}}"#
        ));
        let list = field.decode::<ComponentList>("investment_comp").unwrap().into_vec();
        let firsts: Vec<_> = list.iter().map(|s| s.0.get("1").copied().flatten()).collect();
        assert_eq!(firsts, vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn array_form() {
        let field = EncodedJson::from(json!(r#"[{"1": 1.0}, {}]"#));
        let list = field.decode::<ComponentList>("pnl_data").unwrap().into_vec();
        assert_eq!(list.len(), 2);
        assert!(list[1].is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Backend responses
// ═══════════════════════════════════════════════════════════════════

mod responses {
    use super::*;

    fn comparison_json() -> serde_json::Value {
        json!({
            "investment_comp": "[{}, {}, {}]",
            "pnl_data": "[{}, {}]",
            "composition": {"labels": ["Cash\n(10.00 CAD)"], "sizes": [10.0]},
            "info": {
                "cash_invested": 100,
                "portfolio_value": 110,
                "comp_value": 105,
                "roi_portfolio": 10.0,
                "roi_comp": 5.0,
            },
        })
    }

    #[test]
    fn comparison_summaries_default_to_empty() {
        let resp = ComparisonResponse::from_json(comparison_json()).unwrap();
        assert!(resp.summaries.is_empty());
        assert_eq!(resp.info.roi_comp, Some(5.0));
    }

    #[test]
    fn comparison_missing_info_field_is_malformed() {
        let mut body = comparison_json();
        body["info"].as_object_mut().unwrap().remove("portfolio_value");
        let err = ComparisonResponse::from_json(body).unwrap_err();
        assert!(matches!(err, CoreError::MalformedResponse(_)));
    }

    #[test]
    fn comparison_from_body_rejects_garbage() {
        let err = ComparisonResponse::from_body("<html>502</html>").unwrap_err();
        assert!(matches!(err, CoreError::MalformedResponse(_)));
    }

    #[test]
    fn indiv_performance_keeps_key_order() {
        let holding = json!({
            "performance": {"total_invested": 1.0, "final_value": 2.0, "ROI": 100.0},
            "prices": "{}",
            "transactions": [],
        });
        let body = json!({
            "USD": {"RGTI": holding.clone(), "AAPL": holding.clone()},
            "CAD": {"AC.TO": holding},
        });
        let resp = IndivPerfResponse::from_json(body).unwrap();
        assert_eq!(resp.0.keys().collect::<Vec<_>>(), vec!["USD", "CAD"]);
        let usd = resp.0.get("USD").unwrap();
        assert_eq!(usd.keys().collect::<Vec<_>>(), vec!["RGTI", "AAPL"]);
        assert_eq!(usd.get("RGTI").unwrap().performance.roi, Some(100.0));
    }

    #[test]
    fn indiv_performance_requires_transactions() {
        let body = json!({"USD": {"RGTI": {
            "performance": {"total_invested": 1.0, "final_value": 2.0},
            "prices": "{}",
        }}});
        assert!(IndivPerfResponse::from_json(body).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  IndicatorValue
// ═══════════════════════════════════════════════════════════════════

mod indicator {
    use super::*;

    fn indicator(value: f64, reference: Option<f64>) -> IndicatorValue {
        IndicatorValue {
            value,
            reference,
            prefix: "$".into(),
            currency_suffix: " CAD".into(),
        }
    }

    #[test]
    fn relative_delta_against_reference() {
        let delta = indicator(110.0, Some(100.0)).relative_delta().unwrap();
        assert!((delta - 0.1).abs() < 1e-12);
    }

    #[test]
    fn no_reference_no_delta() {
        let i = indicator(110.0, None);
        assert!(!i.has_delta());
        assert_eq!(i.relative_delta(), None);
    }

    #[test]
    fn zero_reference_has_no_ratio() {
        let i = indicator(5.0, Some(0.0));
        assert!(i.has_delta());
        assert_eq!(i.relative_delta(), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Series styling types
// ═══════════════════════════════════════════════════════════════════

mod series_types {
    use super::*;

    #[test]
    fn named_colors_serialize_as_css_names() {
        assert_eq!(serde_json::to_string(&NamedColor::DarkGreen).unwrap(), "\"darkgreen\"");
        assert_eq!(serde_json::to_string(&NamedColor::CornflowerBlue).unwrap(), "\"cornflowerblue\"");
        assert_eq!(NamedColor::SeaGreen.as_str(), "seagreen");
        assert_eq!(NamedColor::DarkOrange.to_string(), "darkorange");
    }

    #[test]
    fn per_point_color_serializes_as_list() {
        let color = SeriesColor::PerPoint(vec![NamedColor::Green, NamedColor::Red]);
        assert_eq!(
            serde_json::to_value(&color).unwrap(),
            json!({"per_point": ["green", "red"]})
        );
    }

    #[test]
    fn kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&SeriesKind::MarkerOverlay).unwrap(),
            "\"marker_overlay\""
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
//  OrderedMap
// ═══════════════════════════════════════════════════════════════════

mod ordered_map {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut map = OrderedMap::new();
        map.insert("b", 1);
        map.insert("a", 2);
        map.insert("b", 3);
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("b", &3), ("a", &2)]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn get_missing_is_none() {
        let map: OrderedMap<u8> = OrderedMap::default();
        assert!(map.get("x").is_none());
        assert!(map.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Benchmarks
// ═══════════════════════════════════════════════════════════════════

mod benchmarks {
    use super::*;

    #[test]
    fn default_catalog_menu_order() {
        let catalog = BenchmarkCatalog::default();
        let tickers: Vec<_> = catalog.benchmarks.iter().map(|b| b.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["^IXIC", "^GSPC", "^DJI", "^GSPTSE", "^FTSE"]);
        assert_eq!(catalog.benchmarks[0].ticker, DEFAULT_BENCHMARK);
    }

    #[test]
    fn label_lookup() {
        let catalog = BenchmarkCatalog::default();
        assert_eq!(catalog.label_for("^GSPC"), "S&P 500");
        assert_eq!(catalog.label_for("^N225"), FALLBACK_LABEL);
        assert!(catalog.contains("^FTSE"));
        assert!(!catalog.contains("^N225"));
    }

    #[test]
    fn custom_catalog() {
        let catalog = BenchmarkCatalog::new(vec![Benchmark::new("Nikkei", "^N225")]);
        assert_eq!(catalog.label_for("^N225"), "Nikkei");
        assert_eq!(catalog.label_for("^IXIC"), "Comparison");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = DashboardSettings::default();
        assert_eq!(s.base_url, "http://localhost:3000");
        assert_eq!(s.request_timeout_secs, 30);
        assert_eq!(s.display_currency, "CAD");
        assert_eq!(s.default_benchmark, "^IXIC");
        assert!(s.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let s = DashboardSettings::from_json(r#"{"base_url": "http://dash:8080"}"#).unwrap();
        assert_eq!(s.base_url, "http://dash:8080");
        assert_eq!(s.display_currency, "CAD");
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = DashboardSettings::from_json(r#"{"request_timeout_secs": 0}"#).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn rejects_empty_base_url() {
        let s = DashboardSettings {
            base_url: "  ".into(),
            ..DashboardSettings::default()
        };
        assert!(matches!(s.validate(), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn rejects_bad_json() {
        let err = DashboardSettings::from_json("{").unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }
}
