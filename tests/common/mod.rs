use book_recommender::{
    models::Book,
    services::{RecommendationService, RecommenderSettings},
    Catalog, Config,
};
use ndarray::array;
use std::sync::Arc;

fn book(title: &str, authors: &str, rating: f32, year: i32, lang: &str) -> Book {
    Book {
        title: title.to_string(),
        description: format!("{title}, written by {authors}."),
        authors: authors.to_string(),
        average_rating: rating,
        publication_year: Some(year),
        language_code: Some(lang.to_string()),
    }
}

pub fn test_catalog() -> Catalog {
    let books = vec![
        book("The Great Gatsby", "F. Scott Fitzgerald", 4.2, 1925, "en"),
        book("Great Expectations", "Charles Dickens", 3.9, 1861, "en"),
        book("Pride and Prejudice", "Jane Austen", 4.25, 1813, "en"),
        book("The Hobbit", "J.R.R. Tolkien", 4.25, 1937, "en-US"),
        book("Tender Is the Night", "F. Scott Fitzgerald", 3.85, 1934, "en"),
    ];
    let embeddings = array![
        [1.0_f32, 0.2, 0.0],
        [0.8, 0.4, 0.1],
        [0.1, 1.0, 0.2],
        [0.0, 0.3, 1.0],
        [0.9, 0.3, 0.05],
    ];
    Catalog::new(books, embeddings).expect("test catalog is valid")
}

pub fn test_service() -> RecommendationService {
    RecommendationService::with_defaults(Arc::new(test_catalog()), RecommenderSettings::default())
}

pub fn test_config() -> Config {
    Config {
        description_preview_chars: 16,
        ..Config::default()
    }
}
