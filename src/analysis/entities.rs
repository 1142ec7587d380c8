use serde::Serialize;

const LOCATION_KEYWORDS: &[&str] = &[
    "new york",
    "california",
    "london",
    "tokyo",
    "global",
    "nationwide",
];
const MONEY_KEYWORDS: &[&str] = &["$", "budget", "cost", "price", "dollars"];
const DATE_KEYWORDS: &[&str] = &["today", "tomorrow", "week", "month", "year", "daily"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityKind {
    Location,
    Money,
    Date,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Location => write!(f, "LOCATION"),
            Self::Money => write!(f, "MONEY"),
            Self::Date => write!(f, "DATE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub value: String,
}

/// Extract entities from already lowercased tokens.
///
/// Locations match when any token contains the keyword with its spaces
/// removed ("new york" → "newyork"); money and date keywords must equal a
/// whole token. Output follows table order: locations, money, dates.
pub fn extract_entities(tokens: &[String]) -> Vec<Entity> {
    let mut entities = Vec::new();

    for keyword in LOCATION_KEYWORDS {
        let needle = keyword.replace(' ', "");
        if tokens.iter().any(|t| t.contains(&needle)) {
            entities.push(entity(EntityKind::Location, keyword));
        }
    }

    for (kind, keywords) in [
        (EntityKind::Money, MONEY_KEYWORDS),
        (EntityKind::Date, DATE_KEYWORDS),
    ] {
        for keyword in keywords {
            if tokens.iter().any(|t| t == keyword) {
                entities.push(entity(kind, keyword));
            }
        }
    }

    entities
}

fn entity(kind: EntityKind, value: &str) -> Entity {
    Entity {
        kind,
        value: value.to_string(),
    }
}
