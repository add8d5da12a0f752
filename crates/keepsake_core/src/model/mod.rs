//! Domain model shared by every journal-style app.
//!
//! # Responsibility
//! - Define the single record shape (`Entry<C>`) and its form draft.
//! - Define each app's closed category set.
//!
//! # Invariants
//! - Every entry is identified by a stable `EntryId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod category;
pub mod entry;

use category::{
    GratitudeCategory, HairCareCategory, PlaceCategory, PurchaseCategory, QuestionCategory,
    ReflectionMood,
};
use entry::Entry;

pub type HairCareEntry = Entry<HairCareCategory>;
pub type Purchase = Entry<PurchaseCategory>;
pub type ChildhoodPlace = Entry<PlaceCategory>;
pub type Reflection = Entry<ReflectionMood>;
pub type GratitudeEntry = Entry<GratitudeCategory>;
pub type ConversationQuestion = Entry<QuestionCategory>;
