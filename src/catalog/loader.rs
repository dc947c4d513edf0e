use crate::{error::CatalogError, models::Book};
use csv::ReaderBuilder;
use ndarray::Array2;
use serde::Deserialize;
use std::{
    collections::HashSet,
    fs::File,
    io::{BufReader, Read},
    path::PathBuf,
};
use tracing::{debug, info, warn};

/// Supplies an already-cleaned book table and its embedding matrix, row-aligned.
pub trait CatalogLoader {
    fn load(&self) -> Result<(Vec<Book>, Array2<f32>), CatalogError>;
}

/// Reads the books CSV and the embeddings JSON (`[[f32; dim]; n]`) from disk.
#[derive(Debug, Clone)]
pub struct FileCatalogLoader {
    books_path: PathBuf,
    embeddings_path: PathBuf,
}

impl FileCatalogLoader {
    pub fn new(books_path: impl Into<PathBuf>, embeddings_path: impl Into<PathBuf>) -> Self {
        Self {
            books_path: books_path.into(),
            embeddings_path: embeddings_path.into(),
        }
    }
}

impl CatalogLoader for FileCatalogLoader {
    fn load(&self) -> Result<(Vec<Book>, Array2<f32>), CatalogError> {
        info!("Reading books from {}", self.books_path.display());
        let books = read_books(File::open(&self.books_path)?)?;

        info!("Reading embeddings from {}", self.embeddings_path.display());
        let embeddings = read_embeddings(BufReader::new(File::open(&self.embeddings_path)?))?;

        if books.len() != embeddings.nrows() {
            return Err(CatalogError::InconsistentCatalog {
                books: books.len(),
                embeddings: embeddings.nrows(),
            });
        }

        Ok((books, embeddings))
    }
}

#[derive(Debug, Deserialize)]
struct BookCsvRecord {
    #[serde(alias = "Title")]
    title: Option<String>,
    #[serde(alias = "Description")]
    description: Option<String>,
    #[serde(alias = "rating", alias = "Rating")]
    average_rating: Option<String>,
    #[serde(alias = "Authors", alias = "author")]
    authors: Option<String>,
    #[serde(alias = "publication_year", alias = "year")]
    original_publication_year: Option<String>,
    #[serde(alias = "language")]
    language_code: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Keeps a row only if title, description, authors and a numeric rating are present.
fn clean_record(record: BookCsvRecord) -> Option<Book> {
    let title = non_empty(record.title)?;
    let description = non_empty(record.description)?;
    let authors = non_empty(record.authors)?;
    let average_rating = non_empty(record.average_rating)?.parse::<f32>().ok()?;

    // Exported tables often write years as floats ("1925.0").
    let publication_year = non_empty(record.original_publication_year)
        .and_then(|y| y.parse::<f64>().ok())
        .filter(|y| y.is_finite())
        .map(|y| y.trunc() as i32);

    Some(Book {
        title,
        description,
        authors,
        average_rating,
        publication_year,
        language_code: non_empty(record.language_code),
    })
}

/// Parses and cleans the books table. Duplicate titles keep their first occurrence.
pub fn read_books<R: Read>(reader: R) -> Result<Vec<Book>, CatalogError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut books = Vec::new();
    let mut seen_titles = HashSet::new();
    let mut dropped = 0usize;
    let mut duplicates = 0usize;

    for (row, result) in rdr.deserialize::<BookCsvRecord>().enumerate() {
        let record = result?;
        let Some(book) = clean_record(record) else {
            debug!(row, "Dropping incomplete book row");
            dropped += 1;
            continue;
        };
        if !seen_titles.insert(book.title.clone()) {
            duplicates += 1;
            continue;
        }
        books.push(book);
    }

    if dropped > 0 || duplicates > 0 {
        warn!(
            kept = books.len(),
            dropped, duplicates, "Cleaned books table"
        );
    }

    Ok(books)
}

/// Parses a JSON array of equal-length float rows into a matrix.
pub fn read_embeddings<R: Read>(reader: R) -> Result<Array2<f32>, CatalogError> {
    let rows: Vec<Vec<f32>> = serde_json::from_reader(reader)?;
    let dimension = rows.first().map_or(0, Vec::len);

    let mut flat = Vec::with_capacity(rows.len() * dimension);
    for (row, values) in rows.iter().enumerate() {
        if values.len() != dimension {
            return Err(CatalogError::RaggedEmbeddings {
                row,
                expected: dimension,
                got: values.len(),
            });
        }
        flat.extend_from_slice(values);
    }

    Ok(Array2::from_shape_vec((rows.len(), dimension), flat)?)
}
