use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize};
use std::{collections::HashSet, fmt, sync::Mutex};

/// A market symbol in the exchange's lowercase `base_quote` spelling,
/// e.g. `btc_twd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pair(&'static str);

impl<'de> Deserialize<'de> for Pair {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Pair::new)
    }
}

impl Pair {
    // Flyweight pattern
    // Leaks memory if and only if no pair with the same symbol exists.
    // This allows us to pass the symbol as a static str, which in turn
    // enables implementing Copy.
    pub fn new<R: AsRef<str>>(symbol: R) -> Self {
        static SET: Lazy<Mutex<HashSet<&'static str>>> = Lazy::new(|| Mutex::new(HashSet::new()));
        let symbol = symbol.as_ref().to_ascii_lowercase();
        let mut set = SET.lock().unwrap();
        if !set.contains(symbol.as_str()) {
            let leaked: &'static str = Box::leak(symbol.clone().into_boxed_str());
            set.insert(leaked);
        }

        Pair(set.get(symbol.as_str()).unwrap())
    }

    pub fn of<B: AsRef<str>, Q: AsRef<str>>(base: B, quote: Q) -> Self {
        Pair::new(format!("{}_{}", base.as_ref(), quote.as_ref()))
    }

    /// The base asset, or the whole symbol if it carries no underscore.
    pub fn base(&self) -> &'static str {
        match self.0.split_once('_') {
            Some((base, _)) => base,
            None => self.0,
        }
    }

    pub fn quote(&self) -> Option<&'static str> {
        self.0.split_once('_').map(|(_, quote)| quote)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning() {
        let pair1 = Pair::new("btc_twd");
        let pair2 = Pair::of("BTC", "TWD");
        let pair3 = Pair::new("eth_twd");
        assert!(std::ptr::eq(pair1.0, pair2.0));
        assert!(!std::ptr::eq(pair1.0, pair3.0));
    }

    #[test]
    fn base_and_quote() {
        let pair = Pair::new("btc_twd");
        assert_eq!(pair.base(), "btc");
        assert_eq!(pair.quote(), Some("twd"));
        assert_eq!(pair.to_string(), "btc_twd");

        let odd = Pair::new("btctwd");
        assert_eq!(odd.base(), "btctwd");
        assert_eq!(odd.quote(), None);
    }
}
