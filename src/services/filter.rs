use crate::{
    catalog::Catalog,
    error::RecommendationError,
    models::{BookId, FilterSpec},
};

/// Ids of every book satisfying all present predicates, in catalog order.
pub fn filter_candidates(
    catalog: &Catalog,
    filters: &FilterSpec,
) -> Result<Vec<BookId>, RecommendationError> {
    let candidates: Vec<BookId> = if filters.is_unconstrained() {
        catalog.ids().collect()
    } else {
        let predicate = filters.predicate();
        catalog
            .iter()
            .filter(|(_, book)| predicate.matches(book))
            .map(|(id, _)| id)
            .collect()
    };

    if candidates.is_empty() {
        return Err(RecommendationError::NoCandidatesAfterFilter {
            filters: filters.clone(),
        });
    }
    Ok(candidates)
}
