//! Fixed display-only market figures.
//!
//! None of these are derived from the ledger; they are the marketplace
//! backdrop the dashboard shows around the live balances.

pub struct Figure {
    pub label: &'static str,
    pub value: &'static str,
}

pub const MARKET_SUMMARY: [Figure; 3] = [
    Figure {
        label: "Assurance Balance",
        value: "$10,999,217,368.64",
    },
    Figure {
        label: "Listed for sale",
        value: "⌀125,101",
    },
    Figure {
        label: "Circulation",
        value: "⌀9,985,243,683",
    },
];

pub const PRICING: [Figure; 3] = [
    Figure {
        label: "New Issue",
        value: "$1.00",
    },
    Figure {
        label: "Market Price",
        value: "$1.00",
    },
    Figure {
        label: "Redemption Price",
        value: "$1.00",
    },
];

/// Order-book stat card: headline volume and an order count badge.
pub struct StatCard {
    pub title: &'static str,
    pub volume: &'static str,
    pub count: u32,
}

pub const STAT_CARDS: [StatCard; 3] = [
    StatCard {
        title: "Buy Orders",
        volume: "⌀25,032,809,951",
        count: 126,
    },
    StatCard {
        title: "Sell Orders",
        volume: "⌀10,030,678,193",
        count: 208,
    },
    StatCard {
        title: "Redemptions",
        volume: "⌀14,032,076,695",
        count: 144,
    },
];

pub const CHART_WINDOW: &str = "Sep 30 - Oct 30";

const BUYS: [f64; 20] = [
    10.0, 12.0, 11.0, 15.0, 14.0, 30.0, 28.0, 45.0, 25.0, 18.0, 60.0, 55.0, 40.0, 45.0, 20.0,
    22.0, 18.0, 15.0, 12.0, 10.0,
];

/// A sparkline card's title and its series.
pub struct ChartSeries {
    pub title: &'static str,
    pub points: Vec<f64>,
}

/// Buys, Sells, Xfers. Sells and Xfers are damped copies of the buy series.
pub fn chart_series() -> [ChartSeries; 3] {
    [
        ChartSeries {
            title: "Buys",
            points: BUYS.to_vec(),
        },
        ChartSeries {
            title: "Sells",
            points: BUYS.iter().map(|v| v * 0.3 + 5.0).collect(),
        },
        ChartSeries {
            title: "Xfers",
            points: BUYS.iter().map(|v| v * 0.1 + 8.0).collect(),
        },
    ]
}

/// Sparkline widgets take integers; keep one decimal of resolution.
pub fn sparkline_data(points: &[f64]) -> Vec<u64> {
    points.iter().map(|v| (v * 10.0).round().max(0.0) as u64).collect()
}
