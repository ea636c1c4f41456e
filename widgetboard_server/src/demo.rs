//! Fixed-data widgets used to demonstrate table and chart rendering.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ChainTvl {
    name: &'static str,
    tvl: u64,
    change_1d: f64,
    change_7d: f64,
}

#[derive(Debug, Serialize)]
pub struct NormalizedPrices {
    date: &'static str,
    #[serde(rename = "Ethereum")]
    ethereum: f64,
    #[serde(rename = "Bitcoin")]
    bitcoin: f64,
    #[serde(rename = "Solana")]
    solana: f64,
}

/// GET /table_to_chart_widget
pub async fn table_to_chart_widget() -> Json<Vec<ChainTvl>> {
    Json(vec![
        ChainTvl {
            name: "Ethereum",
            tvl: 45_000_000_000,
            change_1d: 2.5,
            change_7d: 5.2,
        },
        ChainTvl {
            name: "Bitcoin",
            tvl: 35_000_000_000,
            change_1d: 1.2,
            change_7d: 4.8,
        },
        ChainTvl {
            name: "Solana",
            tvl: 8_000_000_000,
            change_1d: -0.5,
            change_7d: 2.1,
        },
    ])
}

/// GET /table_to_time_series_widget
pub async fn table_to_time_series_widget() -> Json<Vec<NormalizedPrices>> {
    const ROWS: [(&str, f64, f64, f64); 5] = [
        ("2024-06-06", 1.0000, 1.0000, 1.0000),
        ("2024-06-07", 1.0235, 0.9822, 1.0148),
        ("2024-06-08", 0.9945, 1.0072, 0.9764),
        ("2024-06-09", 1.0205, 0.9856, 1.0300),
        ("2024-06-10", 0.9847, 1.0195, 0.9897),
    ];
    Json(
        ROWS.iter()
            .map(|&(date, ethereum, bitcoin, solana)| NormalizedPrices {
                date,
                ethereum,
                bitcoin,
                solana,
            })
            .collect(),
    )
}
