//! Spending categorization
//!
//! Pure lookup from counterparty name to category: lowercase the name, walk
//! the taxonomy in its fixed order, and the first category whose keyword set
//! contains a substring match wins. "Other" is the default. No state, no
//! side effects.
//!
//! The built-in taxonomy can be replaced from TOML, but the contract never
//! changes: ordered keyword sets, first match wins, evaluation order is
//! always Food, Transport, Shopping, Bills, Entertainment, Healthcare.

use serde::Deserialize;

use crate::error::Result;
use crate::models::Category;

/// Ordered keyword sets, one per category
#[derive(Debug, Clone)]
pub struct CategoryTaxonomy {
    entries: Vec<(Category, Vec<String>)>,
}

impl Default for CategoryTaxonomy {
    fn default() -> Self {
        let owned = |words: &[&str]| -> Vec<String> { words.iter().map(|w| w.to_string()).collect() };
        Self {
            entries: vec![
                (
                    Category::Food,
                    owned(&[
                        "swiggy", "zomato", "domino", "pizza", "mcdonald", "kfc", "burger",
                        "subway", "starbucks", "dunkin", "haldiram", "barbeque", "biryani", "cafe",
                        "restaurant", "bakery", "eatsure", "faasos", "bigbasket", "blinkit",
                        "zepto", "jiomart", "dmart", "instamart", "grocer", "food", "kitchen",
                        "dhaba", "sweets", "momo", "chaayos",
                    ]),
                ),
                (
                    Category::Transport,
                    owned(&[
                        "uber", "ola", "rapido", "redbus", "irctc", "blusmart", "metro", "cab",
                        "taxi", "auto", "fastag", "petrol", "fuel", "diesel", "indian oil",
                        "bharat petroleum", "hp petrol", "parking", "toll", "railway", "indigo",
                        "spicejet", "air india", "vistara", "akasa", "travels",
                    ]),
                ),
                (
                    Category::Shopping,
                    owned(&[
                        "amazon", "flipkart", "myntra", "ajio", "meesho", "nykaa", "snapdeal",
                        "tata cliq", "firstcry", "pepperfry", "lenskart", "decathlon", "ikea",
                        "croma", "reliance digital", "reliance trends", "vijay sales", "tanishq",
                        "titan", "westside", "pantaloons", "lifestyle", "shoppers stop",
                        "max fashion", "mall", "mart", "store", "retail", "bazaar", "shop",
                    ]),
                ),
                (
                    Category::Bills,
                    owned(&[
                        "airtel", "jio", "vodafone", "bsnl", "tata play", "dish tv", "d2h",
                        "sun direct", "tata power", "adani electricity", "bescom", "msedcl",
                        "torrent power", "electricity", "water", "gas", "indane", "broadband",
                        "fibernet", "hathway", "recharge", "postpaid", "prepaid", "dth", "bill",
                        "insurance", "premium", "lic", "policybazaar", "rent", "maintenance",
                        "emi",
                    ]),
                ),
                (
                    Category::Entertainment,
                    owned(&[
                        "netflix", "hotstar", "disney", "prime video", "spotify", "gaana", "wynk",
                        "sonyliv", "zee5", "youtube", "jiosaavn", "audible", "kindle",
                        "bookmyshow", "pvr", "inox", "cinema", "movie", "game", "gaming",
                        "playstation", "xbox",
                    ]),
                ),
                (
                    Category::Healthcare,
                    owned(&[
                        "apollo", "medplus", "netmeds", "pharmeasy", "1mg", "practo", "pharmacy",
                        "chemist", "hospital", "clinic", "doctor", "diagnostic", "lab", "medical",
                        "dental", "cult.fit", "cultfit", "healthify",
                    ]),
                ),
            ],
        }
    }
}

/// Raw TOML shape: one optional keyword array per category id
#[derive(Debug, Deserialize)]
struct RawTaxonomy {
    food: Option<Vec<String>>,
    transport: Option<Vec<String>>,
    shopping: Option<Vec<String>>,
    bills: Option<Vec<String>>,
    entertainment: Option<Vec<String>>,
    healthcare: Option<Vec<String>>,
}

impl CategoryTaxonomy {
    /// Map a counterparty name to its spending category
    pub fn categorize(&self, counterparty: &str) -> Category {
        let name = counterparty.to_lowercase();
        for (category, keywords) in &self.entries {
            if keywords.iter().any(|k| name.contains(k.as_str())) {
                return *category;
            }
        }
        Category::Other
    }

    /// Replace keyword sets from a TOML override. Missing categories keep
    /// their built-in keywords; the evaluation order is never configurable.
    ///
    /// ```toml
    /// food = ["swiggy", "zomato"]
    /// bills = ["electricity", "rent"]
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawTaxonomy = toml::from_str(content)?;
        let mut taxonomy = Self::default();

        let overrides = [
            (Category::Food, raw.food),
            (Category::Transport, raw.transport),
            (Category::Shopping, raw.shopping),
            (Category::Bills, raw.bills),
            (Category::Entertainment, raw.entertainment),
            (Category::Healthcare, raw.healthcare),
        ];
        for (category, keywords) in overrides {
            if let Some(keywords) = keywords {
                let lowered = keywords.into_iter().map(|k| k.to_lowercase()).collect();
                if let Some(entry) = taxonomy.entries.iter_mut().find(|(c, _)| *c == category) {
                    entry.1 = lowered;
                }
            }
        }

        Ok(taxonomy)
    }
}
