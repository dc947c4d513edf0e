//! Immutable in-memory book catalog with one embedding row per book.
//!
//! A [`Catalog`] is built once at startup and shared behind an `Arc`. Construction validates
//! that book `i` and embedding row `i` describe the same item, so every later lookup can rely
//! on the alignment without checking it again.

use crate::{
    error::CatalogError,
    models::{Book, BookId},
};
use ndarray::{Array2, ArrayView1, Axis};
use std::{
    collections::{BTreeSet, HashSet},
    ops::Range,
};
use tracing::info;

pub mod loader;

pub use loader::{CatalogLoader, FileCatalogLoader};

#[derive(Debug)]
pub struct Catalog {
    books: Vec<Book>,
    embeddings: Array2<f32>,
}

impl Catalog {
    pub fn new(books: Vec<Book>, embeddings: Array2<f32>) -> Result<Self, CatalogError> {
        if books.len() != embeddings.nrows() {
            return Err(CatalogError::InconsistentCatalog {
                books: books.len(),
                embeddings: embeddings.nrows(),
            });
        }
        if books.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        validate_books(&books)?;

        for (row, vector) in embeddings.axis_iter(Axis(0)).enumerate() {
            if vector.iter().any(|v| !v.is_finite()) {
                return Err(CatalogError::NonFiniteEmbedding { row });
            }
        }

        info!(
            books = books.len(),
            dimension = embeddings.ncols(),
            "Catalog ready"
        );

        Ok(Self { books, embeddings })
    }

    /// Loads and validates a catalog through the given loader.
    pub fn load(loader: &dyn CatalogLoader) -> Result<Self, CatalogError> {
        let (books, embeddings) = loader.load()?;
        Self::new(books, embeddings)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Always false for a constructed catalog; `new` rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.embeddings.ncols()
    }

    pub fn ids(&self) -> Range<BookId> {
        0..self.books.len()
    }

    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.get(id)
    }

    pub fn embedding(&self, id: BookId) -> Option<ArrayView1<'_, f32>> {
        (id < self.embeddings.nrows()).then(|| self.embeddings.row(id))
    }

    /// Books in catalog order, paired with their identifiers.
    pub fn iter(&self) -> impl Iterator<Item = (BookId, &Book)> + '_ {
        self.books.iter().enumerate()
    }

    /// Distinct language codes, sorted.
    pub fn language_codes(&self) -> Vec<String> {
        self.books
            .iter()
            .filter_map(|b| b.language_code.as_deref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

fn validate_books(books: &[Book]) -> Result<(), CatalogError> {
    let mut titles = HashSet::with_capacity(books.len());
    for (row, book) in books.iter().enumerate() {
        for (field, value) in [
            ("title", &book.title),
            ("description", &book.description),
            ("authors", &book.authors),
        ] {
            if value.trim().is_empty() {
                return Err(CatalogError::MissingField { row, field });
            }
        }
        if !titles.insert(book.title.as_str()) {
            return Err(CatalogError::DuplicateTitle(book.title.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use ndarray::array;

    fn book(
        title: &str,
        authors: &str,
        rating: f32,
        year: Option<i32>,
        lang: Option<&str>,
    ) -> Book {
        Book {
            title: title.into(),
            description: format!("{} is a book by {}.", title, authors),
            authors: authors.into(),
            average_rating: rating,
            publication_year: year,
            language_code: lang.map(str::to_string),
        }
    }

    pub(crate) fn sample_books() -> Vec<Book> {
        vec![
            book("The Great Gatsby", "F. Scott Fitzgerald", 4.2, Some(1925), Some("en")),
            book("Great Expectations", "Charles Dickens", 3.9, Some(1861), Some("en")),
            book("Pride and Prejudice", "Jane Austen", 4.25, Some(1813), Some("en")),
            book("The Hobbit", "J.R.R. Tolkien", 4.25, Some(1937), Some("en-US")),
            book(
                "Cien años de soledad",
                "Gabriel García Márquez",
                4.07,
                Some(1967),
                Some("spa"),
            ),
            book("Tender Is the Night", "F. Scott Fitzgerald", 3.85, Some(1934), Some("en")),
            book("Untitled Zero", "Anonymous", 2.0, None, None),
        ]
    }

    pub(crate) fn sample_embeddings() -> Array2<f32> {
        array![
            [1.0, 0.2, 0.0],
            [0.8, 0.4, 0.1],
            [0.1, 1.0, 0.2],
            [0.0, 0.3, 1.0],
            [0.5, 0.5, 0.5],
            [0.9, 0.3, 0.05],
            [0.0, 0.0, 0.0],
        ]
    }

    pub(crate) fn sample_catalog() -> Catalog {
        Catalog::new(sample_books(), sample_embeddings()).expect("valid fixture catalog")
    }
}
