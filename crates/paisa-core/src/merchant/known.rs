//! Curated known-merchant list
//!
//! Lowercase match patterns paired with canonical display names. Order
//! matters: more specific patterns sit above their prefixes so "amazon pay"
//! resolves before "amazon". Matching is plain substring over the lowercased
//! input, which tolerates the glued and suffixed forms banks emit
//! ("AMAZONRETAIL", "SWIGGY8900524").

/// One curated merchant entry
#[derive(Debug, Clone, Copy)]
pub struct KnownMerchant {
    pub pattern: &'static str,
    pub canonical: &'static str,
}

macro_rules! merchants {
    ($(($pattern:expr, $canonical:expr)),* $(,)?) => {
        &[$(KnownMerchant { pattern: $pattern, canonical: $canonical }),*]
    };
}

pub const KNOWN_MERCHANTS: &[KnownMerchant] = merchants![
    // E-commerce
    ("amazon retail", "Amazon Retail"),
    ("amazon pay", "Amazon Pay"),
    ("amazon", "Amazon"),
    ("flipkart", "Flipkart"),
    ("myntra", "Myntra"),
    ("ajio", "Ajio"),
    ("meesho", "Meesho"),
    ("nykaa", "Nykaa"),
    ("snapdeal", "Snapdeal"),
    ("tata cliq", "Tata CLiQ"),
    ("tatacliq", "Tata CLiQ"),
    ("firstcry", "FirstCry"),
    ("pepperfry", "Pepperfry"),
    ("urbanic", "Urbanic"),
    // Groceries / quick commerce
    ("bigbasket", "BigBasket"),
    ("blinkit", "Blinkit"),
    ("zepto", "Zepto"),
    ("jiomart", "JioMart"),
    ("dmart", "DMart"),
    ("instamart", "Swiggy Instamart"),
    ("grofers", "Blinkit"),
    ("licious", "Licious"),
    ("country delight", "Country Delight"),
    // Food delivery and dining
    ("swiggy", "Swiggy"),
    ("zomato", "Zomato"),
    ("dominos", "Domino's Pizza"),
    ("domino's", "Domino's Pizza"),
    ("pizza hut", "Pizza Hut"),
    ("pizzahut", "Pizza Hut"),
    ("mcdonald", "McDonald's"),
    ("kfc", "KFC"),
    ("burger king", "Burger King"),
    ("burgerking", "Burger King"),
    ("subway", "Subway"),
    ("starbucks", "Starbucks"),
    ("dunkin", "Dunkin"),
    ("haldiram", "Haldiram's"),
    ("barbeque nation", "Barbeque Nation"),
    ("wow momo", "Wow Momo"),
    ("eatsure", "EatSure"),
    ("faasos", "Faasos"),
    ("chaayos", "Chaayos"),
    ("cafe coffee day", "Cafe Coffee Day"),
    // Transport and mobility
    ("uber", "Uber"),
    ("olacabs", "Ola"),
    ("ola cabs", "Ola"),
    ("ola money", "Ola"),
    ("rapido", "Rapido"),
    ("redbus", "redBus"),
    ("irctc", "IRCTC"),
    ("blusmart", "BluSmart"),
    ("fastag", "FASTag"),
    ("indian oil", "Indian Oil"),
    ("indianoil", "Indian Oil"),
    ("bharat petroleum", "Bharat Petroleum"),
    ("bpcl", "Bharat Petroleum"),
    ("hpcl", "HP Petrol"),
    ("hp petrol", "HP Petrol"),
    // Travel
    ("makemytrip", "MakeMyTrip"),
    ("goibibo", "Goibibo"),
    ("yatra", "Yatra"),
    ("cleartrip", "Cleartrip"),
    ("easemytrip", "EaseMyTrip"),
    ("ixigo", "ixigo"),
    ("oyo", "OYO"),
    ("airbnb", "Airbnb"),
    ("treebo", "Treebo"),
    ("fabhotels", "FabHotels"),
    ("indigo", "IndiGo"),
    ("spicejet", "SpiceJet"),
    ("air india", "Air India"),
    ("airindia", "Air India"),
    ("vistara", "Vistara"),
    ("akasa air", "Akasa Air"),
    // Subscriptions and entertainment
    ("netflix", "Netflix"),
    ("hotstar", "Disney+ Hotstar"),
    ("disney+", "Disney+ Hotstar"),
    ("prime video", "Prime Video"),
    ("spotify", "Spotify"),
    ("gaana", "Gaana"),
    ("wynk", "Wynk Music"),
    ("sonyliv", "SonyLIV"),
    ("sony liv", "SonyLIV"),
    ("zee5", "ZEE5"),
    ("youtube premium", "YouTube Premium"),
    ("bookmyshow", "BookMyShow"),
    ("pvr", "PVR Cinemas"),
    ("inox", "INOX"),
    ("jiosaavn", "JioSaavn"),
    ("audible", "Audible"),
    ("kindle", "Kindle"),
    // Telecom, utilities, recharges
    ("airtel", "Airtel"),
    ("jio", "Jio"),
    ("reliance jio", "Jio"),
    ("vodafone", "Vodafone Idea"),
    ("vi recharge", "Vodafone Idea"),
    ("bsnl", "BSNL"),
    ("tata play", "Tata Play"),
    ("tatasky", "Tata Play"),
    ("tata sky", "Tata Play"),
    ("dish tv", "Dish TV"),
    ("dishtv", "Dish TV"),
    ("d2h", "d2h"),
    ("sun direct", "Sun Direct"),
    ("tata power", "Tata Power"),
    ("adani electricity", "Adani Electricity"),
    ("bescom", "BESCOM"),
    ("msedcl", "MSEDCL"),
    ("torrent power", "Torrent Power"),
    ("indane", "Indane Gas"),
    ("hp gas", "HP Gas"),
    ("bharatgas", "Bharat Gas"),
    ("bharat gas", "Bharat Gas"),
    ("act fibernet", "ACT Fibernet"),
    ("hathway", "Hathway"),
    // Fintech and payments
    ("paytm", "Paytm"),
    ("phonepe", "PhonePe"),
    ("google pay", "Google Pay"),
    ("gpay", "Google Pay"),
    ("mobikwik", "MobiKwik"),
    ("freecharge", "Freecharge"),
    ("cred", "CRED"),
    ("razorpay", "Razorpay"),
    ("razorupi", "Razorpay"),
    ("billdesk", "BillDesk"),
    ("ccavenue", "CCAvenue"),
    ("payu", "PayU"),
    ("bharatpe", "BharatPe"),
    ("zerodha", "Zerodha"),
    ("groww", "Groww"),
    ("upstox", "Upstox"),
    ("angel one", "Angel One"),
    ("angelone", "Angel One"),
    ("kuvera", "Kuvera"),
    ("smallcase", "smallcase"),
    ("lic of india", "LIC"),
    ("policybazaar", "Policybazaar"),
    ("acko", "Acko"),
    ("godigit", "Digit Insurance"),
    // Healthcare
    ("apollo pharmacy", "Apollo Pharmacy"),
    ("apollo 247", "Apollo 24|7"),
    ("apollo", "Apollo"),
    ("medplus", "MedPlus"),
    ("netmeds", "Netmeds"),
    ("pharmeasy", "PharmEasy"),
    ("1mg", "Tata 1mg"),
    ("practo", "Practo"),
    ("cult.fit", "Cult.fit"),
    ("cultfit", "Cult.fit"),
    ("healthifyme", "HealthifyMe"),
    // Retail chains and services
    ("lenskart", "Lenskart"),
    ("decathlon", "Decathlon"),
    ("ikea", "IKEA"),
    ("croma", "Croma"),
    ("reliance digital", "Reliance Digital"),
    ("reliance trends", "Reliance Trends"),
    ("vijay sales", "Vijay Sales"),
    ("tanishq", "Tanishq"),
    ("titan", "Titan"),
    ("westside", "Westside"),
    ("pantaloons", "Pantaloons"),
    ("lifestyle", "Lifestyle"),
    ("shoppers stop", "Shoppers Stop"),
    ("max fashion", "Max Fashion"),
    ("urban company", "Urban Company"),
    ("urbanclap", "Urban Company"),
    ("porter", "Porter"),
    ("dunzo", "Dunzo"),
];

/// First curated merchant whose pattern occurs in `text` (case-insensitive).
///
/// Long patterns match as plain substrings, which tolerates glued bank forms
/// ("UPI-SWIGGY8900524"). Patterns under 6 chars are word-bounded so "cred"
/// cannot fire inside "credited".
pub fn find_known(text: &str) -> Option<&'static KnownMerchant> {
    let lower = text.to_lowercase();
    KNOWN_MERCHANTS.iter().find(|m| {
        if m.pattern.len() < 6 {
            crate::text::contains_word(&lower, m.pattern)
        } else {
            lower.contains(m.pattern)
        }
    })
}
