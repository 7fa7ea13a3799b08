mod category;

pub use category::{Category, CategoryDraft, CATEGORY_SCHEMA};
