//! `#[derive(Columns)]` mappings and the queries built from them.

#![allow(dead_code)]

use std::sync::Arc;
use tagsql::prelude::*;
use tagsql::{
    FieldInfo, Method, ModifierRegistry, MySql, OpInfo, Postgres, SelectListCache, ShapeRef, Sqlite,
};

#[derive(Columns)]
struct User {
    id: i64,
    name: String,
    age: i32,
}

#[derive(Columns)]
#[orm(rename_all = "camelCase")]
struct Profile {
    user_id: i64,
    #[orm(column = "display")]
    display_name: String,
    #[orm(modifier = "json")]
    settings: serde_json::Value,
    #[orm(modifier = "timeNowUTC/skipUpdates")]
    created_at: chrono::DateTime<chrono::Utc>,
    #[orm(skip)]
    cached_rank: u32,
    r#type: String,
}

#[derive(Columns)]
struct Borrowed<'a> {
    id: i64,
    name: &'a str,
}

#[derive(Columns)]
struct Tagged<T> {
    id: i64,
    tag: T,
}

#[test]
fn derived_mapping_follows_declaration_order() {
    let fields = User::column_mapping().unwrap();
    assert_eq!(
        fields,
        vec![
            FieldInfo::new(0, "id", "id"),
            FieldInfo::new(1, "name", "name"),
            FieldInfo::new(2, "age", "age"),
        ]
    );
}

#[test]
fn derived_mapping_applies_attributes() {
    let fields = Profile::column_mapping().unwrap();
    let columns: Vec<_> = fields.iter().map(|f| f.column).collect();
    assert_eq!(columns, ["userId", "display", "settings", "createdAt", "type"]);

    assert_eq!(fields[2].modifier, Some("json"));
    assert_eq!(fields[3].modifier, Some("timeNowUTC/skipUpdates"));
    // Skipped fields keep their struct position out of the mapping.
    assert_eq!(fields[4].index, 5);
    assert_eq!(fields[4].field, "type");
}

#[test]
fn end_to_end_select_with_derived_shape() {
    let built = Builder::new(Sqlite)
        .build(
            &Query::of::<User>("users")
                .where_("age > %s", params![18])
                .order_by(order_by("name").desc())
                .limit(10),
        )
        .unwrap();
    assert_eq!(
        built.sql(),
        "SELECT `id`, `name`, `age` FROM users WHERE age > ? ORDER BY name DESC LIMIT 10"
    );
    assert_eq!(built.params(), &[Value::Int(18)]);
}

#[test]
fn optional_filters_compose() {
    let name: Option<&str> = None;
    let min_age = Some(21);

    let query = Query::of::<Arc<User>>("users")
        .where_if("name = %s", name)
        .where_if("age >= %s", min_age)
        .offset(30);
    let built = Builder::new(Postgres).build(&query).unwrap();
    assert_eq!(
        built.sql(),
        r#"SELECT "id", "name", "age" FROM users WHERE age >= $1 OFFSET 30"#
    );
    assert_eq!(built.params(), &[Value::Int(21)]);
}

#[test]
fn builders_for_different_dialects_do_not_leak() {
    let cache = Arc::new(SelectListCache::new());
    let pg = Builder::with_cache(Arc::new(Postgres), Arc::clone(&cache));
    let my = Builder::with_cache(Arc::new(MySql), cache);

    let pg_sql = pg.build(&Query::of::<User>("users")).unwrap();
    let my_sql = my.build(&Query::of::<User>("users")).unwrap();
    assert_eq!(pg_sql.sql(), r#"SELECT "id", "name", "age" FROM users"#);
    assert_eq!(my_sql.sql(), "SELECT `id`, `name`, `age` FROM users");
}

#[test]
fn field_modifiers_resolve_and_apply() {
    let registry = ModifierRegistry::with_builtins();
    let fields = Profile::column_mapping().unwrap();
    let update = OpInfo::new("postgres", Method::Update);

    let created = fields[3].load_modifier(&registry).unwrap().unwrap();
    assert_eq!(created.apply_value(&update, Value::Null).unwrap(), None);

    let settings = fields[2].load_modifier(&registry).unwrap().unwrap();
    let stored = settings
        .apply_value(&update, Value::Json(serde_json::json!({"theme": "dark"})))
        .unwrap();
    assert_eq!(stored, Some(Value::Json(serde_json::json!({"theme": "dark"}))));

    assert!(fields[0].load_modifier(&registry).unwrap().is_none());
}

fn borrowed_shape<'a>(_row: &Borrowed<'a>) -> ShapeRef {
    ShapeRef::of::<Borrowed<'a>>()
}

#[test]
fn borrowing_shapes_share_one_identity() {
    let owned = String::from("ann");
    let row = Borrowed { id: 1, name: &owned };
    assert_eq!(borrowed_shape(&row), ShapeRef::of::<Borrowed<'static>>());

    let built = Builder::new(Postgres)
        .build(&Query::of::<Borrowed<'_>>("people").where_("id = %s", params![row.id]))
        .unwrap();
    assert_eq!(
        built.sql(),
        r#"SELECT "id", "name" FROM people WHERE id = $1"#
    );
}

#[test]
fn generic_shapes_are_keyed_per_instantiation() {
    assert_eq!(
        Tagged::<String>::column_mapping().unwrap(),
        vec![FieldInfo::new(0, "id", "id"), FieldInfo::new(1, "tag", "tag")]
    );
    assert_ne!(
        ShapeRef::of::<Tagged<String>>(),
        ShapeRef::of::<Tagged<i64>>()
    );

    let builder = Builder::new(Sqlite);
    builder.build(&Query::of::<Tagged<String>>("t")).unwrap();
    builder.build(&Query::of::<Tagged<i64>>("t")).unwrap();
    assert_eq!(builder.cache().len(), 2);
}
