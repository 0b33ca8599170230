//! Integration tests for the `Params` derive.

use scoped_params::{Engine, ParamError, ParamSchema, Params, frame, get};

#[derive(Params)]
struct Movie {
    title: String,
    #[param(rename = "tagLine")]
    tag_line: Option<String>,
    #[param(skip)]
    cached: bool,
}

#[derive(Params)]
#[param(crate = "scoped_params")]
struct Listing<T> {
    items: Vec<T>,
}

#[test]
fn derived_schema_lists_declared_names() {
    assert_eq!(Movie::parameter_names(), ["title", "tagLine"]);
    assert_eq!(Movie::TITLE, "title");
    assert_eq!(Movie::TAG_LINE, "tagLine");
}

#[test]
fn generic_structs_and_crate_overrides_expand() {
    assert_eq!(Listing::<u8>::parameter_names(), ["items"]);
    assert_eq!(Listing::<u8>::ITEMS, "items");
}

#[test]
fn derived_schemas_close_the_engine() {
    let engine = Engine::with_schema::<Movie>();
    let out = engine
        .get_evaluated(&frame! { Movie::TITLE => "Heat" }, Movie::TITLE)
        .expect("declared");
    assert_eq!(out, "Heat");

    let err = engine
        .evaluate_in(&frame! { "cached" => true }, &get(Movie::TITLE))
        .expect_err("skipped fields are not parameters");
    assert!(matches!(&*err, ParamError::UnknownParameter { name } if name == "cached"));
}

#[test]
fn struct_fields_stay_usable() {
    let movie = Movie {
        title: "Heat".to_owned(),
        tag_line: None,
        cached: false,
    };
    assert!(!movie.title.is_empty());
    assert!(movie.tag_line.is_none());
    assert!(!movie.cached);
    let listing = Listing { items: vec![1_u8] };
    assert_eq!(listing.items.len(), 1);
}
