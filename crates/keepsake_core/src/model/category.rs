//! Closed category enumerations, one per app.
//!
//! # Responsibility
//! - Describe each app's category set through the `Category` trait.
//! - Keep string tags stable, since they are the persisted representation.
//!
//! # Invariants
//! - `as_str()` matches the serde tag of the same variant.
//! - `ALL` lists every variant exactly once, in display order.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// A closed set of categories an entry can be filed under.
pub trait Category:
    Copy + Eq + Ord + Hash + Debug + Serialize + DeserializeOwned + 'static
{
    /// Every variant in display order.
    const ALL: &'static [Self];
    /// Default key the owning app persists its collection under.
    const STORAGE_KEY: &'static str;

    /// Stable persisted tag.
    fn as_str(self) -> &'static str;

    /// Human-readable label for pickers and charts.
    fn label(self) -> &'static str;

    /// Parses a persisted tag.
    fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == value)
    }
}

macro_rules! category_enum {
    (
        $(#[$meta:meta])*
        $name:ident, key = $key:literal {
            $($variant:ident => ($tag:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $(
                #[serde(rename = $tag)]
                $variant,
            )+
        }

        impl Category for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];
            const STORAGE_KEY: &'static str = $key;

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $tag,)+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }
    };
}

category_enum! {
    /// Product types tracked by the hair-care journal.
    HairCareCategory, key = "hair_care_entries" {
        Shampoo => ("shampoo", "Shampoo"),
        Conditioner => ("conditioner", "Conditioner"),
        Mask => ("mask", "Mask"),
        Oil => ("oil", "Oil"),
        Styling => ("styling", "Styling"),
        Treatment => ("treatment", "Treatment"),
    }
}

category_enum! {
    /// Spending buckets for the purchase tracker.
    PurchaseCategory, key = "purchases" {
        Groceries => ("groceries", "Groceries"),
        Clothing => ("clothing", "Clothing"),
        Electronics => ("electronics", "Electronics"),
        Home => ("home", "Home"),
        Health => ("health", "Health"),
        Entertainment => ("entertainment", "Entertainment"),
        Other => ("other", "Other"),
    }
}

category_enum! {
    /// Kinds of places kept in the childhood-places archive.
    PlaceCategory, key = "childhood_places" {
        Home => ("home", "Home"),
        School => ("school", "School"),
        Playground => ("playground", "Playground"),
        Nature => ("nature", "Nature"),
        Relatives => ("relatives", "Relatives"),
        Travel => ("travel", "Travel"),
        Other => ("other", "Other"),
    }
}

category_enum! {
    /// Mood attached to a daily reflection.
    ReflectionMood, key = "reflections" {
        Joyful => ("joyful", "Joyful"),
        Calm => ("calm", "Calm"),
        Neutral => ("neutral", "Neutral"),
        Anxious => ("anxious", "Anxious"),
        Sad => ("sad", "Sad"),
    }
}

category_enum! {
    /// What a gratitude calendar entry is thankful for.
    GratitudeCategory, key = "gratitude_entries" {
        People => ("people", "People"),
        Health => ("health", "Health"),
        Nature => ("nature", "Nature"),
        Work => ("work", "Work"),
        Moments => ("moments", "Little moments"),
        Other => ("other", "Other"),
    }
}

category_enum! {
    /// Decks of the conversation-starter app.
    QuestionCategory, key = "conversation_questions" {
        Icebreaker => ("icebreaker", "Icebreaker"),
        Deep => ("deep", "Deep"),
        Funny => ("funny", "Funny"),
        Family => ("family", "Family"),
        Dreams => ("dreams", "Dreams"),
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, GratitudeCategory, HairCareCategory, PurchaseCategory};

    #[test]
    fn tags_match_serde_representation() {
        for category in PurchaseCategory::ALL {
            let encoded = serde_json::to_string(category).unwrap();
            assert_eq!(encoded, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn parse_accepts_known_tags_only() {
        assert_eq!(
            HairCareCategory::parse("mask"),
            Some(HairCareCategory::Mask)
        );
        assert_eq!(HairCareCategory::parse("Mask"), None);
    }

    #[test]
    fn storage_keys_are_distinct_per_app() {
        assert_ne!(
            GratitudeCategory::STORAGE_KEY,
            HairCareCategory::STORAGE_KEY
        );
        assert_eq!(GratitudeCategory::Moments.label(), "Little moments");
    }
}
