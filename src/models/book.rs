use serde::{Deserialize, Serialize};

/// Dense catalog identifier: the book's row position after cleaning.
pub type BookId = usize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub description: String,
    pub authors: String,
    pub average_rating: f32,
    pub publication_year: Option<i32>,
    pub language_code: Option<String>,
}

/// A single recommended book as returned to API clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRecommendation {
    pub id: BookId,
    pub title: String,
    pub authors: String,
    pub rating: f32,
    pub year: Option<i32>,
    pub language: Option<String>,
    pub description: String,
    pub similarity_score: f32,
}

impl BookRecommendation {
    pub fn new(id: BookId, book: &Book, similarity_score: f32, preview_chars: usize) -> Self {
        Self {
            id,
            title: book.title.clone(),
            authors: book.authors.clone(),
            rating: book.average_rating,
            year: book.publication_year,
            language: book.language_code.clone(),
            description: preview(&book.description, preview_chars),
            similarity_score,
        }
    }
}

/// Truncates on a character boundary and marks the cut with `...`.
fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
