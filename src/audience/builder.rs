//! The audience panel's transient filter set.
//!
//! Filters only live here while the panel is in use; creating an audience
//! snapshots them into an [`Audience`] entity.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use super::{Estimate, estimate};
use crate::error::DashboardError;
use crate::store::{Audience, Filter};

/// Select filters loaded when the panel is first opened.
const DEFAULT_FILTERS: &[(&str, &[&str])] = &[
    ("Age", &["18-24", "25-34", "35-44", "45-54", "55+"]),
    ("Gender", &["Male", "Female", "All"]),
    (
        "Location",
        &["United States", "Canada", "United Kingdom", "Global"],
    ),
];

/// Types a free-text filter added with "Add filter" is drawn from.
pub const EXTRA_FILTER_TYPES: &[&str] = &["Interests", "Behaviors", "Income", "Education", "Device"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "input", rename_all = "snake_case")]
pub enum FilterInput {
    Select { options: Vec<String> },
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSlot {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub input: FilterInput,
    pub value: String,
}

impl FilterSlot {
    fn select(kind: &str, options: &[&str]) -> Self {
        Self {
            kind: kind.to_string(),
            value: options.first().map(|o| o.to_string()).unwrap_or_default(),
            input: FilterInput::Select {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        }
    }

    fn text(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            input: FilterInput::Text,
            value: String::new(),
        }
    }

    /// Placeholder for text inputs, e.g. `Enter interests...`.
    pub fn placeholder(&self) -> Option<String> {
        match self.input {
            FilterInput::Text => Some(format!("Enter {}...", self.kind.to_lowercase())),
            FilterInput::Select { .. } => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct AudienceBuilder {
    filters: Vec<FilterSlot>,
    loaded: bool,
}

impl AudienceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the default filters the first time the panel is shown. Later
    /// calls keep whatever the user has configured.
    pub fn ensure_defaults(&mut self) {
        if self.loaded {
            return;
        }
        self.filters = DEFAULT_FILTERS
            .iter()
            .map(|(kind, options)| FilterSlot::select(kind, options))
            .collect();
        self.loaded = true;
    }

    pub fn filters(&self) -> &[FilterSlot] {
        &self.filters
    }

    pub fn estimate(&self) -> Estimate {
        estimate(self.filters.len())
    }

    /// Append a free-text filter of a random type.
    pub fn add_random_filter<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &FilterSlot {
        let kind = EXTRA_FILTER_TYPES.choose(rng).copied().unwrap_or("Interests");
        self.add_filter(kind)
    }

    pub fn add_filter(&mut self, kind: &str) -> &FilterSlot {
        self.loaded = true;
        self.filters.push(FilterSlot::text(kind));
        &self.filters[self.filters.len() - 1]
    }

    pub fn set_value(&mut self, index: usize, value: &str) -> Result<(), DashboardError> {
        let slot = self
            .filters
            .get_mut(index)
            .ok_or_else(|| missing_filter(index))?;
        if let FilterInput::Select { options } = &slot.input
            && !options.iter().any(|o| o == value)
        {
            return Err(DashboardError::missing_input(
                "Invalid Option",
                &format!("'{value}' is not an option for {}", slot.kind),
            ));
        }
        slot.value = value.to_string();
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<FilterSlot, DashboardError> {
        if index >= self.filters.len() {
            return Err(missing_filter(index));
        }
        Ok(self.filters.remove(index))
    }

    /// Snapshot the current filters and estimate into an audience record.
    /// `ordinal` is the 1-based number used in the generated name.
    pub fn snapshot(&self, id: u64, ordinal: usize) -> Audience {
        let estimate = self.estimate();
        Audience {
            id,
            name: format!("Audience {ordinal}"),
            size: estimate.size,
            potential: estimate.potential,
            filters: self
                .filters
                .iter()
                .map(|slot| Filter {
                    kind: slot.kind.clone(),
                    value: slot.value.clone(),
                })
                .collect(),
        }
    }
}

fn missing_filter(index: usize) -> DashboardError {
    DashboardError::missing_input("Unknown Filter", &format!("no filter at position {index}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audience::ReachPotential;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn defaults_load_once() {
        let mut builder = AudienceBuilder::new();
        assert!(builder.filters().is_empty());

        builder.ensure_defaults();
        assert_eq!(builder.filters().len(), 3);
        assert_eq!(builder.filters()[0].value, "18-24");

        builder.remove(2).unwrap();
        builder.ensure_defaults();
        assert_eq!(builder.filters().len(), 2);
    }

    #[test]
    fn default_estimate_is_high() {
        let mut builder = AudienceBuilder::new();
        builder.ensure_defaults();
        let estimate = builder.estimate();
        assert_eq!(estimate.size, 3_535_533);
        assert_eq!(estimate.potential, ReachPotential::High);
    }

    #[test]
    fn random_filter_is_text_of_known_type() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut builder = AudienceBuilder::new();
        let slot = builder.add_random_filter(&mut rng).clone();

        assert!(EXTRA_FILTER_TYPES.contains(&slot.kind.as_str()));
        assert_eq!(slot.input, FilterInput::Text);
        assert_eq!(
            slot.placeholder(),
            Some(format!("Enter {}...", slot.kind.to_lowercase()))
        );
    }

    #[test]
    fn set_value_validates_select_options() {
        let mut builder = AudienceBuilder::new();
        builder.ensure_defaults();

        builder.set_value(1, "Female").unwrap();
        assert_eq!(builder.filters()[1].value, "Female");
        assert!(builder.set_value(1, "Robot").is_err());
        assert!(builder.set_value(9, "x").is_err());

        builder.add_filter("Income");
        builder.set_value(3, "100k+").unwrap();
        assert_eq!(builder.filters()[3].value, "100k+");
    }

    #[test]
    fn snapshot_copies_filters_and_estimate() {
        let mut builder = AudienceBuilder::new();
        builder.ensure_defaults();
        builder.add_filter("Device");
        builder.set_value(3, "Mobile").unwrap();

        let audience = builder.snapshot(42, 1);
        assert_eq!(audience.name, "Audience 1");
        assert_eq!(audience.size, 2_500_000);
        assert_eq!(audience.filters.len(), 4);
        assert_eq!(audience.filters[3].kind, "Device");
        assert_eq!(audience.filters[3].value, "Mobile");
    }

    #[test]
    fn slot_serializes_input_kind() {
        let slot = FilterSlot::select("Gender", &["Male", "Female"]);
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["type"], "Gender");
        assert_eq!(json["input"], "select");
        assert_eq!(json["options"][1], "Female");
        assert_eq!(json["value"], "Male");
    }
}
