use crate::models::LearnedPattern;
use crate::taxonomy::ParentCategory;

/// Static keyword table: ordered (parent, subcategory, keywords) rows.
/// First row with a matching keyword wins, so more specific rows sit above
/// generic ones. Keywords cover both the US and Danish merchant sets.
const KEYWORD_RULES: &[(ParentCategory, Option<&str>, &[&str])] = &[
    (
        ParentCategory::Subscriptions,
        Some("Streaming"),
        &["netflix", "spotify", "hbo", "disney+", "streaming"],
    ),
    (
        ParentCategory::Subscriptions,
        Some("Software"),
        &["adobe", "icloud", "dropbox", "subscription"],
    ),
    (
        ParentCategory::Food,
        Some("Groceries"),
        &[
            "grocery", "supermarket", "netto", "fotex", "rema", "lidl", "aldi", "irma", "meny",
            "bilka", "kvickly",
        ],
    ),
    (
        ParentCategory::Food,
        Some("Coffee & Snacks"),
        &["cafe", "coffee", "starbucks", "bakery", "7-eleven"],
    ),
    (
        ParentCategory::Food,
        Some("Eating Out"),
        &[
            "restaurant", "pizza", "burger", "sushi", "kebab", "mcdonalds", "subway", "dining",
            "uber eats", "doordash", "grubhub", "deli", "lunch", "dinner", "breakfast",
        ],
    ),
    (
        ParentCategory::Transport,
        Some("Taxi/Uber"),
        &["uber", "lyft", "taxi"],
    ),
    (
        ParentCategory::Transport,
        Some("Public Transport"),
        &["transit", "metro", "bus", "train", "dsb", "rejsekort", "tog"],
    ),
    (
        ParentCategory::Transport,
        Some("Car"),
        &[
            "gas", "fuel", "benzin", "petrol", "parking", "shell", "circle k", "q8", "car rental",
            "automotive",
        ],
    ),
    (
        ParentCategory::Travel,
        Some("Flights"),
        &["airline", "flight"],
    ),
    (
        ParentCategory::Housing,
        Some("Rent/Mortgage"),
        &["rent", "mortgage", "husleje"],
    ),
    (
        ParentCategory::Housing,
        Some("Insurance"),
        &["insurance", "forsikring"],
    ),
    (
        ParentCategory::Housing,
        Some("Utilities"),
        &[
            "electric", "water", "internet", "phone", "mobile", "utility", "cable", "varme",
            "tdc", "yousee", "telenor", "telia",
        ],
    ),
    (
        ParentCategory::Entertainment,
        Some("Games"),
        &["game", "steam", "playstation", "xbox"],
    ),
    (
        ParentCategory::Entertainment,
        Some("Events & Tickets"),
        &["movie", "cinema", "theater", "concert", "ticket", "biograf", "koncert"],
    ),
    (
        ParentCategory::Entertainment,
        None,
        &["bar", "club", "entertainment"],
    ),
    (
        ParentCategory::Shopping,
        Some("Electronics"),
        &["electronics", "elgiganten", "power", "best buy"],
    ),
    (
        ParentCategory::Shopping,
        Some("Clothing"),
        &["clothing", "fashion", "h&m", "zara"],
    ),
    (
        ParentCategory::Shopping,
        Some("Home & Furniture"),
        &["furniture", "ikea", "jysk", "home depot"],
    ),
    (
        ParentCategory::Shopping,
        None,
        &[
            "amazon", "walmart", "target", "ebay", "shop", "store", "mall", "magasin",
            "flying tiger",
        ],
    ),
    (
        ParentCategory::Health,
        Some("Pharmacy"),
        &["pharmacy", "apotek", "medicine"],
    ),
    (
        ParentCategory::Health,
        Some("Fitness"),
        &["gym", "fitness", "sats"],
    ),
    (
        ParentCategory::Health,
        Some("Medical"),
        &["doctor", "hospital", "medical", "dental", "clinic", "therapy", "tandlage"],
    ),
    (
        ParentCategory::Income,
        Some("Salary"),
        &["salary", "payroll", "wages"],
    ),
];

/// Best-guess category for a transaction description.
///
/// Learned patterns always outrank the static table; among learned patterns
/// the longest wins, so a merchant-specific pattern beats a short generic
/// one that happens to be a substring of the same description.
pub fn classify(
    description: &str,
    patterns: &[LearnedPattern],
) -> (ParentCategory, Option<String>) {
    let desc = description.to_lowercase();

    let mut ordered: Vec<&LearnedPattern> = patterns.iter().collect();
    ordered.sort_by(|a, b| b.pattern.len().cmp(&a.pattern.len()));
    for pat in ordered {
        if !pat.pattern.is_empty() && desc.contains(&pat.pattern.to_lowercase()) {
            return (pat.parent, pat.subcategory.clone());
        }
    }

    for (parent, sub, keywords) in KEYWORD_RULES {
        if keywords.iter().any(|kw| desc.contains(kw)) {
            return (*parent, sub.map(str::to_string));
        }
    }

    (ParentCategory::Other, Some("Uncategorized".to_string()))
}
