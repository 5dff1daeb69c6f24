//! Unit tests for temperature filter composition.
//!
//! Run with: cargo test --test filters_unit_test

use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, DbBackend, EntityTrait, JoinType, QueryFilter, QuerySelect, QueryTrait,
    RelationTrait,
};

use meteo_db::entity::{cities, temperatures};
use meteo_db::filters::{conjunction, FilterError, TemperatureFilter};

fn render(filter: &TemperatureFilter, scope: Option<sea_orm::sea_query::SimpleExpr>) -> String {
    let mut predicates = filter.predicates();
    predicates.extend(scope);
    temperatures::Entity::find()
        .join(JoinType::InnerJoin, temperatures::Relation::City.def())
        .filter(conjunction(predicates))
        .build(DbBackend::Postgres)
        .to_string()
}

#[test]
fn no_criteria_means_no_predicates() {
    let filter = TemperatureFilter::parse(None, None, None, None).unwrap();

    assert_eq!(filter, TemperatureFilter::default());
    assert!(filter.predicates().is_empty());
    let sql = render(&filter, None);
    assert!(!sql.contains(r#""cities"."lat""#), "{sql}");
    assert!(!sql.contains(r#""temperatures"."timestamp" >="#), "{sql}");
    assert!(!sql.contains(r#""temperatures"."timestamp" <="#), "{sql}");
}

#[test]
fn parses_every_criterion() {
    let filter = TemperatureFilter::parse(
        Some("44.43"),
        Some(" 26.1 "),
        Some("2024-01-01"),
        Some("2024-01-31"),
    )
    .unwrap();

    assert_eq!(filter.lat, Some(44.43));
    assert_eq!(filter.lon, Some(26.1));
    assert_eq!(
        filter.from,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0)
    );
    assert_eq!(
        filter.until,
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap().and_hms_opt(0, 0, 0)
    );
    assert_eq!(filter.predicates().len(), 4);
}

#[test]
fn predicates_follow_lat_lon_from_until_order() {
    let filter =
        TemperatureFilter::parse(Some("1.5"), Some("2.5"), Some("2024-01-01"), Some("2024-02-01"))
            .unwrap();
    let sql = render(&filter, None);

    let lat = sql.find(r#""cities"."lat" = 1.5"#).expect(&sql);
    let lon = sql.find(r#""cities"."lon" = 2.5"#).expect(&sql);
    let from = sql
        .find(r#""temperatures"."timestamp" >= '2024-01-01 00:00:00"#)
        .expect(&sql);
    let until = sql
        .find(r#""temperatures"."timestamp" <= '2024-02-01 00:00:00"#)
        .expect(&sql);
    assert!(lat < lon && lon < from && from < until, "{sql}");
    assert!(sql.contains("INNER JOIN \"cities\""), "{sql}");
}

#[test]
fn omitted_criteria_leave_dimension_unconstrained() {
    let filter = TemperatureFilter::parse(None, Some("3"), None, Some("2024-06-30")).unwrap();
    let sql = render(&filter, None);

    assert_eq!(filter.predicates().len(), 2);
    assert!(!sql.contains(r#""cities"."lat""#), "{sql}");
    assert!(!sql.contains(">="), "{sql}");
}

#[test]
fn identity_predicate_is_anded_with_base_filter() {
    let filter = TemperatureFilter::parse(None, None, Some("2024-01-01"), None).unwrap();
    let sql = render(&filter, Some(cities::Column::CountryId.eq(7)));

    assert!(sql.contains(r#""cities"."country_id" = 7"#), "{sql}");
    assert!(sql.contains(" AND "), "{sql}");
}

#[test]
fn malformed_values_are_errors() {
    assert!(matches!(
        TemperatureFilter::parse(None, None, Some("not-a-date"), None),
        Err(FilterError::InvalidDate { field: "from", .. })
    ));
    assert!(matches!(
        TemperatureFilter::parse(None, None, None, Some("2024-02-30")),
        Err(FilterError::InvalidDate { field: "until", .. })
    ));
    assert!(matches!(
        TemperatureFilter::parse(Some("abc"), None, None, None),
        Err(FilterError::InvalidCoordinate { field: "lat", .. })
    ));
    assert!(matches!(
        TemperatureFilter::parse(None, Some(""), None, None),
        Err(FilterError::InvalidCoordinate { field: "lon", .. })
    ));
}
