pub mod edit_distance;
pub mod punctuation;
pub mod tokenization;
