use serde::{Deserialize, Serialize};

/// One sample of the illustrative market overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPoint {
    pub time: String,
    pub eur_usd: f64,
    pub btc_usd: f64,
}

/// Instruments plotted on the market overview chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    EurUsd,
    BtcUsd,
}

impl Series {
    pub fn label(&self) -> &'static str {
        match self {
            Series::EurUsd => "EUR/USD",
            Series::BtcUsd => "BTC/USD",
        }
    }

    pub fn value(&self, point: &MarketPoint) -> f64 {
        match self {
            Series::EurUsd => point.eur_usd,
            Series::BtcUsd => point.btc_usd,
        }
    }
}

/// Static sample data; there is no live feed behind the chart.
pub fn market_data() -> Vec<MarketPoint> {
    [
        ("00:00", 1.0921, 52000.0),
        ("04:00", 1.0925, 51800.0),
        ("08:00", 1.0918, 52200.0),
        ("12:00", 1.0930, 52400.0),
        ("16:00", 1.0928, 52100.0),
        ("20:00", 1.0932, 52300.0),
    ]
    .into_iter()
    .map(|(time, eur_usd, btc_usd)| MarketPoint {
        time: time.to_string(),
        eur_usd,
        btc_usd,
    })
    .collect()
}

/// Axis bounds for a series: the observed range widened by `padding`
/// (a fraction of the range) on each side. A flat series gets a band
/// of +/- 1% around its value so the line isn't drawn on the border.
pub fn series_bounds(points: &[MarketPoint], series: Series, padding: f64) -> Option<[f64; 2]> {
    let mut values = points.iter().map(|p| series.value(p));
    let first = values.next()?;
    let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

    let range = max - min;
    if range == 0.0 {
        let band = (min.abs() * 0.01).max(f64::EPSILON);
        return Some([min - band, max + band]);
    }
    Some([min - range * padding, max + range * padding])
}

/// Rotating "Did You Know?" facts shown under the hero
pub const FOREX_FACTS: [&str; 4] = [
    "The forex market trades over $6.6 trillion per day",
    "The most traded currency pair is EUR/USD",
    "Forex trading operates 24 hours a day, 5 days a week",
    "The modern forex market began in the 1970s",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_data_shape() {
        let data = market_data();
        assert_eq!(data.len(), 6);
        assert_eq!(data[0].time, "00:00");
        assert_eq!(data[5].time, "20:00");
        assert_eq!(data[3].eur_usd, 1.0930);
        assert_eq!(data[3].btc_usd, 52400.0);
    }

    #[test]
    fn test_series_bounds() {
        let data = market_data();
        let [lo, hi] = series_bounds(&data, Series::BtcUsd, 0.0).expect("bounds");
        assert_eq!(lo, 51800.0);
        assert_eq!(hi, 52400.0);

        let [lo, hi] = series_bounds(&data, Series::BtcUsd, 0.5).expect("bounds");
        assert_eq!(lo, 51500.0);
        assert_eq!(hi, 52700.0);
    }

    #[test]
    fn test_series_bounds_flat_and_empty() {
        let flat = vec![
            MarketPoint { time: "a".into(), eur_usd: 1.0, btc_usd: 100.0 },
            MarketPoint { time: "b".into(), eur_usd: 1.0, btc_usd: 100.0 },
        ];
        let [lo, hi] = series_bounds(&flat, Series::BtcUsd, 0.1).expect("bounds");
        assert!(lo < 100.0 && hi > 100.0);

        assert!(series_bounds(&[], Series::EurUsd, 0.1).is_none());
    }
}
