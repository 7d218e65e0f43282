use chrono::Utc;

use crate::{Pair, Resolution};

/// One query window against the trading-history endpoint. Bounds are unix
/// seconds, both inclusive; the exchange requires `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    pub pair: Pair,
    pub resolution: Resolution,
    pub from: i64,
    pub to: i64,
}

impl Query {
    /// The reference query: daily candles over the past week.
    pub fn new(pair: Pair) -> Self {
        let now = Utc::now().timestamp();
        Query {
            pair,
            resolution: Resolution::Day1,
            from: now - 7 * 86_400,
            to: now,
        }
    }

    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Move `from` back to cover the given number of days before `to`.
    pub fn days_back(mut self, days: i64) -> Self {
        self.from = self.to - days * 86_400;
        self
    }

    pub fn window(mut self, from: i64, to: i64) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn params(&self) -> Vec<(String, String)> {
        vec![
            ("resolution".to_owned(), self.resolution.to_string()),
            ("from".to_owned(), self.from.to_string()),
            ("to".to_owned(), self.to.to_string()),
        ]
    }

    /// The same parameters with the required `from` left out, for the
    /// missing-parameter scenario.
    pub fn params_without_from(&self) -> Vec<(String, String)> {
        self.params()
            .into_iter()
            .filter(|(key, _)| key != "from")
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_defaults() {
        let query = Query::new(Pair::new("btc_twd"));
        assert_eq!(query.resolution, Resolution::Day1);
        assert_eq!(query.to - query.from, 7 * 86_400);
        assert!(query.from <= query.to);
    }

    #[test]
    fn params_cover_all_bounds() {
        let query = Query::new(Pair::new("btc_twd")).window(1_000, 2_000);
        let params = query.params();
        assert_eq!(
            params,
            vec![
                ("resolution".to_owned(), "1d".to_owned()),
                ("from".to_owned(), "1000".to_owned()),
                ("to".to_owned(), "2000".to_owned()),
            ]
        );
    }

    #[test]
    fn from_can_be_omitted() {
        let query = Query::new(Pair::new("btc_twd"));
        let params = query.params_without_from();
        assert!(params.iter().all(|(key, _)| key != "from"));
        assert_eq!(params.len(), 2);
    }
}
