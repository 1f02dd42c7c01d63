//! Post-scrape identity resolution.
//!
//! Scrapers only return names. Before a scraped scene is handed back, every
//! performer, movie, tag and studio on it is looked up in the [`Catalog`] by
//! exact name. A reference gets the catalog ID only when the lookup is
//! unambiguous; zero or several matches leave `id` unset rather than guess.
//!
//! Lookup failures are real errors and stop reconciliation immediately.
//! References resolved before the failure keep their IDs.

use scrapeforged_common::Result;

use crate::catalog::Catalog;
use crate::scraper::{
    ScrapedScene, ScrapedSceneMovie, ScrapedScenePerformer, ScrapedSceneStudio, ScrapedSceneTag,
};

/// Resolve a scraped performer against catalog performers.
pub fn resolve_performer(catalog: &dyn Catalog, performer: &mut ScrapedScenePerformer) -> Result<()> {
    performer.id = None;

    let found = catalog.find_performers_by_names(std::slice::from_ref(&performer.name))?;
    match found.as_slice() {
        [record] => performer.id = Some(record.id.clone()),
        [] => {}
        many => tracing::debug!(
            "{} performers named {:?}, leaving unmatched",
            many.len(),
            performer.name
        ),
    }

    Ok(())
}

/// Resolve a scraped movie against catalog movies.
pub fn resolve_movie(catalog: &dyn Catalog, movie: &mut ScrapedSceneMovie) -> Result<()> {
    movie.id = None;

    let found = catalog.find_movies_by_names(std::slice::from_ref(&movie.name))?;
    match found.as_slice() {
        [record] => movie.id = Some(record.id.clone()),
        [] => {}
        many => tracing::debug!(
            "{} movies named {:?}, leaving unmatched",
            many.len(),
            movie.name
        ),
    }

    Ok(())
}

/// Resolve a scraped tag. Tag names are unique in the catalog.
pub fn resolve_tag(catalog: &dyn Catalog, tag: &mut ScrapedSceneTag) -> Result<()> {
    tag.id = catalog.find_tag_by_name(&tag.name)?.map(|r| r.id);
    Ok(())
}

/// Resolve a scraped studio. Studio names are unique in the catalog.
pub fn resolve_studio(catalog: &dyn Catalog, studio: &mut ScrapedSceneStudio) -> Result<()> {
    studio.id = catalog.find_studio_by_name(&studio.name)?.map(|r| r.id);
    Ok(())
}

/// Resolve every reference on a scraped scene in place.
///
/// Order: performers, movies, tags, then the studio.
pub fn reconcile_scene(catalog: &dyn Catalog, scene: &mut ScrapedScene) -> Result<()> {
    for performer in &mut scene.performers {
        resolve_performer(catalog, performer)?;
    }

    for movie in &mut scene.movies {
        resolve_movie(catalog, movie)?;
    }

    for tag in &mut scene.tags {
        resolve_tag(catalog, tag)?;
    }

    if let Some(studio) = &mut scene.studio {
        resolve_studio(catalog, studio)?;
    }

    Ok(())
}
