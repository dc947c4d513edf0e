use crate::{catalog::Catalog, models::BookId};
use ndarray::ArrayView1;
use std::{cmp::Ordering, collections::BinaryHeap, sync::Arc};
use tracing::debug;

/// Similarity between a query embedding and a candidate embedding.
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, query: ArrayView1<'_, f32>, candidate: ArrayView1<'_, f32>) -> f32;
}

/// Cosine similarity in `[-1, 1]`; a zero vector scores 0 against everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineSimilarity;

impl SimilarityScorer for CosineSimilarity {
    fn score(&self, query: ArrayView1<'_, f32>, candidate: ArrayView1<'_, f32>) -> f32 {
        let query_norm = query.dot(&query).sqrt();
        let candidate_norm = candidate.dot(&candidate).sqrt();
        if query_norm == 0.0 || candidate_norm == 0.0 {
            return 0.0;
        }
        (query.dot(&candidate) / (query_norm * candidate_norm)).clamp(-1.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredBook {
    pub id: BookId,
    pub score: f32,
}

/// Heap entry ordered so that `Greater` means "ranks lower": lower score, then higher id.
/// The max-heap therefore keeps the weakest retained candidate on top for eviction.
struct Ranked(ScoredBook);

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .score
            .partial_cmp(&self.0.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.0.id.cmp(&other.0.id))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

#[derive(Clone)]
pub struct Ranker {
    scorer: Arc<dyn SimilarityScorer>,
}

impl Ranker {
    pub fn new(scorer: Arc<dyn SimilarityScorer>) -> Self {
        Self { scorer }
    }

    /// Returns the `k` best candidates by descending score, ties by ascending id.
    /// Candidates without an embedding row are skipped.
    pub fn top_k(
        &self,
        query: ArrayView1<'_, f32>,
        candidates: &[BookId],
        catalog: &Catalog,
        k: usize,
    ) -> Vec<ScoredBook> {
        if k == 0 {
            return Vec::new();
        }

        let mut heap = BinaryHeap::with_capacity(k.min(candidates.len()) + 1);
        for &id in candidates {
            let Some(vector) = catalog.embedding(id) else {
                continue;
            };
            let score = self.scorer.score(query, vector);
            let score = if score.is_nan() { 0.0 } else { score };

            heap.push(Ranked(ScoredBook { id, score }));
            if heap.len() > k {
                heap.pop();
            }
        }

        let ranked: Vec<ScoredBook> = heap.into_sorted_vec().into_iter().map(|r| r.0).collect();
        debug!(
            candidates = candidates.len(),
            returned = ranked.len(),
            "Ranked candidates"
        );
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{fixtures::sample_catalog, Catalog};
    use crate::models::Book;
    use ndarray::{array, Array2};

    fn ranker() -> Ranker {
        Ranker::new(Arc::new(CosineSimilarity))
    }

    fn ids(ranked: &[ScoredBook]) -> Vec<BookId> {
        ranked.iter().map(|r| r.id).collect()
    }

    #[test]
    fn cosine_handles_zero_and_parallel_vectors() {
        let scorer = CosineSimilarity;
        let a = array![1.0_f32, 2.0, 3.0];
        let b = array![2.0_f32, 4.0, 6.0];
        let zero = array![0.0_f32, 0.0, 0.0];
        assert!((scorer.score(a.view(), b.view()) - 1.0).abs() < 1e-6);
        assert_eq!(scorer.score(a.view(), zero.view()), 0.0);
        assert_eq!(scorer.score(zero.view(), zero.view()), 0.0);

        let opposite = array![-1.0_f32, -2.0, -3.0];
        assert!((scorer.score(a.view(), opposite.view()) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn ranks_by_descending_similarity() {
        let catalog = sample_catalog();
        let query = catalog.embedding(0).unwrap();
        let candidates: Vec<_> = catalog.ids().collect();

        let ranked = ranker().top_k(query, &candidates, &catalog, 3);
        assert_eq!(ids(&ranked), vec![0, 5, 1]);
        assert!((ranked[0].score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn returns_all_candidates_when_k_exceeds_them() {
        let catalog = sample_catalog();
        let query = catalog.embedding(2).unwrap();

        let ranked = ranker().top_k(query, &[6, 0, 3], &catalog, 10);
        assert_eq!(ids(&ranked), vec![3, 0, 6]);
        assert_eq!(ranked[2].score, 0.0);
    }

    fn uniform_catalog(n: usize) -> Catalog {
        let books = (0..n)
            .map(|i| Book {
                title: format!("Book {i}"),
                description: "Same vector as every other book.".into(),
                authors: "Anon".into(),
                average_rating: 3.0,
                publication_year: None,
                language_code: None,
            })
            .collect();
        Catalog::new(books, Array2::ones((n, 4))).unwrap()
    }

    #[test]
    fn equal_scores_break_ties_by_ascending_id() {
        let catalog = uniform_catalog(6);
        let query = catalog.embedding(4).unwrap();

        let ranked = ranker().top_k(query, &[5, 3, 1, 4, 0, 2], &catalog, 4);
        assert_eq!(ids(&ranked), vec![0, 1, 2, 3]);
    }

    #[test]
    fn partial_selection_matches_full_sort() {
        let n = 200;
        let dim = 8;
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        let values: Vec<f32> = (0..n * dim)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                ((state % 2001) as f32 / 1000.0) - 1.0
            })
            .collect();
        let books = (0..n)
            .map(|i| Book {
                title: format!("Generated {i}"),
                description: "Generated.".into(),
                authors: "Generator".into(),
                average_rating: 3.0,
                publication_year: Some(2000),
                language_code: Some("en".into()),
            })
            .collect();
        let catalog = Catalog::new(books, Array2::from_shape_vec((n, dim), values).unwrap()).unwrap();
        let query = catalog.embedding(17).unwrap();
        let candidates: Vec<_> = catalog.ids().collect();

        let mut expected: Vec<ScoredBook> = candidates
            .iter()
            .map(|&id| ScoredBook {
                id,
                score: CosineSimilarity.score(query, catalog.embedding(id).unwrap()),
            })
            .collect();
        expected.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap().then(a.id.cmp(&b.id)));
        expected.truncate(15);

        let ranked = ranker().top_k(query, &candidates, &catalog, 15);
        assert_eq!(ranked, expected);
        assert_eq!(ranked[0].id, 17);
    }

    struct NanScorer;

    impl SimilarityScorer for NanScorer {
        fn score(&self, _: ArrayView1<'_, f32>, candidate: ArrayView1<'_, f32>) -> f32 {
            if candidate[0] > 0.9 {
                f32::NAN
            } else {
                candidate[0]
            }
        }
    }

    #[test]
    fn nan_scores_are_treated_as_zero() {
        let catalog = sample_catalog();
        let ranker = Ranker::new(Arc::new(NanScorer));
        let query = catalog.embedding(0).unwrap();

        let ranked = ranker.top_k(query, &[0, 1, 3], &catalog, 3);
        assert_eq!(ids(&ranked), vec![1, 0, 3]);
        assert!(ranked.iter().all(|r| !r.score.is_nan()));
    }
}
