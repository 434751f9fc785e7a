/// Fixed two-level category tree. Parent keys are a closed enum so a typo'd
/// key is a compile or parse error instead of a silent fallback bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentCategory {
    Income,
    Housing,
    Food,
    Transport,
    Subscriptions,
    Shopping,
    Health,
    Entertainment,
    Travel,
    Savings,
    Other,
}

/// Display order.
pub const ALL_CATEGORIES: &[ParentCategory] = &[
    ParentCategory::Income,
    ParentCategory::Housing,
    ParentCategory::Food,
    ParentCategory::Transport,
    ParentCategory::Subscriptions,
    ParentCategory::Shopping,
    ParentCategory::Health,
    ParentCategory::Entertainment,
    ParentCategory::Travel,
    ParentCategory::Savings,
    ParentCategory::Other,
];

impl ParentCategory {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Housing => "housing",
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Subscriptions => "subscriptions",
            Self::Shopping => "shopping",
            Self::Health => "health",
            Self::Entertainment => "entertainment",
            Self::Travel => "travel",
            Self::Savings => "savings",
            Self::Other => "other",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Housing => "Housing",
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Subscriptions => "Subscriptions",
            Self::Shopping => "Shopping",
            Self::Health => "Health",
            Self::Entertainment => "Entertainment",
            Self::Travel => "Travel & Vacation",
            Self::Savings => "Savings & Investments",
            Self::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Income => "\u{1f4b0}",
            Self::Housing => "\u{1f3e0}",
            Self::Food => "\u{1f37d}\u{fe0f}",
            Self::Transport => "\u{1f697}",
            Self::Subscriptions => "\u{1f4f1}",
            Self::Shopping => "\u{1f6cd}\u{fe0f}",
            Self::Health => "\u{2764}\u{fe0f}",
            Self::Entertainment => "\u{1f389}",
            Self::Travel => "\u{2708}\u{fe0f}",
            Self::Savings => "\u{1f3e6}",
            Self::Other => "\u{1f4e6}",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Income => "#10b981",
            Self::Housing => "#8b5cf6",
            Self::Food => "#f59e0b",
            Self::Transport => "#3b82f6",
            Self::Subscriptions => "#ec4899",
            Self::Shopping => "#14b8a6",
            Self::Health => "#ef4444",
            Self::Entertainment => "#f97316",
            Self::Travel => "#06b6d4",
            Self::Savings => "#22c55e",
            Self::Other => "#6b7280",
        }
    }

    pub fn subcategories(&self) -> &'static [&'static str] {
        match self {
            Self::Income => &["Salary", "Side Income", "Other Income"],
            Self::Housing => &["Rent/Mortgage", "Utilities", "Insurance", "Maintenance"],
            Self::Food => &["Groceries", "Eating Out", "Bars & Nightlife", "Coffee & Snacks"],
            Self::Transport => &["Public Transport", "Car", "Taxi/Uber", "Bike"],
            Self::Subscriptions => &["Streaming", "Software", "Memberships", "Other Subscriptions"],
            Self::Shopping => &["Clothing", "Electronics", "Home & Furniture", "Gifts"],
            Self::Health => &["Medical", "Pharmacy", "Fitness", "Personal Care"],
            Self::Entertainment => &["Events & Tickets", "Hobbies", "Games", "Other Entertainment"],
            Self::Travel => &[
                "Flights",
                "Accommodation",
                "Activities",
                "Travel Food & Transport",
            ],
            Self::Savings => &[
                "Emergency Buffer",
                "Stocks",
                "ETFs/Funds",
                "Pension",
                "Travel Savings",
                "Other Savings",
            ],
            Self::Other => &["Uncategorized"],
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }

    pub fn is_savings(&self) -> bool {
        matches!(self, Self::Savings)
    }

    pub fn is_expense(&self) -> bool {
        !self.is_income() && !self.is_savings()
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ALL_CATEGORIES.iter().find(|c| c.key() == key).copied()
    }
}

impl std::fmt::Display for ParentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// "Food > Groceries" style display string.
pub fn format_category(parent: ParentCategory, subcategory: Option<&str>) -> String {
    match subcategory {
        Some(sub) => format!("{} > {}", parent.name(), sub),
        None => parent.name().to_string(),
    }
}
