use serde::{Deserialize, Serialize};
use std::fmt;

use super::Book;

/// Optional attribute constraints applied before ranking. `None` never constrains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub min_rating: Option<f32>,
    pub language_code: Option<String>,
    pub min_year: Option<i32>,
    pub author: Option<String>,
}

impl FilterSpec {
    pub fn with_min_rating(mut self, min_rating: f32) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    pub fn with_language(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = Some(language_code.into());
        self
    }

    pub fn with_min_year(mut self, min_year: i32) -> Self {
        self.min_year = Some(min_year);
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.min_rating.is_none()
            && self.language_code.is_none()
            && self.min_year.is_none()
            && self.author.is_none()
    }

    /// Precomputes the lowercase author needle so the per-book check stays allocation-light.
    pub fn predicate(&self) -> FilterPredicate<'_> {
        FilterPredicate {
            spec: self,
            author_needle: self.author.as_ref().map(|a| a.to_lowercase()),
        }
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(min_rating) = self.min_rating {
            parts.push(format!("rating >= {}", min_rating));
        }
        if let Some(lang) = &self.language_code {
            parts.push(format!("language = {}", lang));
        }
        if let Some(min_year) = self.min_year {
            parts.push(format!("year >= {}", min_year));
        }
        if let Some(author) = &self.author {
            parts.push(format!("author contains '{}'", author));
        }

        if parts.is_empty() {
            f.write_str("no filters")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}

pub struct FilterPredicate<'a> {
    spec: &'a FilterSpec,
    author_needle: Option<String>,
}

impl FilterPredicate<'_> {
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(min_rating) = self.spec.min_rating {
            if book.average_rating < min_rating {
                return false;
            }
        }

        if let Some(lang) = &self.spec.language_code {
            if book.language_code.as_deref() != Some(lang.as_str()) {
                return false;
            }
        }

        if let Some(min_year) = self.spec.min_year {
            match book.publication_year {
                Some(year) if year >= min_year => {}
                _ => return false,
            }
        }

        if let Some(needle) = &self.author_needle {
            if !book.authors.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }

        true
    }
}
