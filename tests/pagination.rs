//! End-to-end pagination and filtering scenarios over the public API,
//! driven by a scripted page source instead of the network.

use holocron::{Catalog, CatalogError, Film, FilmPage, PageSource, Result, SearchFilter, Species};
use std::cell::RefCell;

fn film(title: &str) -> Film {
    Film {
        title: title.to_string(),
        director: "George Lucas".to_string(),
        release_date: "1977-05-25".to_string(),
        species: vec![Species {
            name: "Human".to_string(),
            classification: "mammal".to_string(),
            homeworld: Some("Coruscant".to_string()),
        }],
    }
}

fn page(count: usize, offset: usize, cursor: &str, more: bool) -> FilmPage {
    FilmPage {
        films: (offset..offset + count)
            .map(|i| film(&format!("Film {i}")))
            .collect(),
        end_cursor: Some(cursor.to_string()),
        has_next_page: more,
    }
}

struct Script(RefCell<Vec<Result<FilmPage>>>);

impl Script {
    fn new(pages: Vec<Result<FilmPage>>) -> Self {
        Self(RefCell::new(pages))
    }
}

impl PageSource for Script {
    fn fetch_page(&self, _after: Option<&str>) -> Result<FilmPage> {
        self.0.borrow_mut().remove(0)
    }
}

#[test]
fn ten_plus_four_records_across_two_pages() {
    let source = Script::new(vec![
        Ok(page(10, 0, "C1", true)),
        Ok(page(4, 10, "C2", false)),
    ]);
    let mut catalog = Catalog::new();

    catalog.load_next(&source).unwrap();
    assert!(catalog.has_more());
    assert_eq!(catalog.cursor(), Some("C1"));

    catalog.load_next(&source).unwrap();
    assert_eq!(catalog.len(), 14);
    assert!(!catalog.has_more());
}

#[test]
fn failed_first_fetch_then_successful_retry() {
    let source = Script::new(vec![
        Err(CatalogError::Remote("boom".to_string())),
        Ok(page(3, 0, "C1", false)),
    ]);
    let mut catalog = Catalog::new();

    let err = catalog.load_next(&source).unwrap_err();
    assert!(err.is_fetch());
    assert_eq!(catalog.len(), 0);
    assert_eq!(catalog.cursor(), None);

    catalog.load_next(&source).unwrap();
    assert_eq!(catalog.len(), 3);
}

#[test]
fn visible_subset_is_a_pure_projection_of_the_accumulated_state() {
    let source = Script::new(vec![Ok(FilmPage {
        films: vec![film("A New Hope"), film("The Empire Strikes Back")],
        end_cursor: Some("C1".to_string()),
        has_next_page: false,
    })]);
    let mut catalog = Catalog::new();
    catalog.load_next(&source).unwrap();

    let mut filter = SearchFilter::new();
    filter.set_term("empire");
    let visible = filter.visible(catalog.films());
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "The Empire Strikes Back");

    // Replacing the term does not disturb the accumulated state
    filter.set_term("");
    assert_eq!(filter.visible(catalog.films()).len(), catalog.len());
    let titles: Vec<_> = catalog.films().iter().map(|f| f.title.as_str()).collect();
    assert_eq!(titles, ["A New Hope", "The Empire Strikes Back"]);
}

#[test]
fn filtering_across_multiple_loads_sees_every_page() {
    let source = Script::new(vec![
        Ok(FilmPage {
            films: vec![film("A New Hope")],
            end_cursor: Some("C1".to_string()),
            has_next_page: true,
        }),
        Ok(FilmPage {
            films: vec![film("The Empire Strikes Back"), film("Return of the Jedi")],
            end_cursor: Some("C2".to_string()),
            has_next_page: false,
        }),
    ]);
    let mut catalog = Catalog::new();
    let mut filter = SearchFilter::new();
    filter.set_term("re");

    catalog.load_next(&source).unwrap();
    assert_eq!(filter.visible(catalog.films()).len(), 0);

    catalog.load_next(&source).unwrap();
    let visible = filter.visible(catalog.films());
    let titles: Vec<_> = visible.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(titles, ["The Empire Strikes Back", "Return of the Jedi"]);
}
