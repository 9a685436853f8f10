use super::*;
use crate::condition::Condition;
use crate::error::BuildError;
use crate::where_map::{Direction, LimitSpec, OrderSpec, WhereSpec};
use serde_json::{Map, Value, json};

fn obj(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn select(where_map: Value, fields: &[&str]) -> BuildResult<BuiltQuery> {
    Builder::new().select("tb", &obj(where_map), fields)
}

// ==================== SELECT ====================

#[test]
fn select_count_with_single_condition() {
    let q = select(json!({ "age > ": 23 }), &["count(*) as total"]).unwrap();
    assert_eq!(q.sql(), "SELECT count(*) as total FROM tb WHERE (age>$1)");
    assert_eq!(q.params(), &[json!(23)]);
}

#[test]
fn select_defaults_to_star() {
    let q = select(json!({ "name": "caibirdme" }), &[]).unwrap();
    assert_eq!(q.sql(), "SELECT * FROM tb WHERE (name=$1)");
    assert_eq!(q.params(), &[json!("caibirdme")]);

    let q = select(json!({}), &[]).unwrap();
    assert_eq!(q.sql(), "SELECT * FROM tb");
    assert!(q.params().is_empty());
}

#[test]
fn select_with_all_clauses() {
    let q = select(
        json!({
            "foo": "bar",
            "qq": "tt",
            "age in": [1, 3, 5, 7, 9],
            "faith <>": "Muslim",
            "_orderby": "age desc",
            "_groupby": "department",
            "_limit": [0, 100],
        }),
        &["id", "name", "age"],
    )
    .unwrap();
    assert_eq!(
        q.sql(),
        "SELECT id,name,age FROM tb WHERE (foo=$1 AND qq=$2 AND age IN ($3,$4,$5,$6,$7) AND faith!=$8) GROUP BY department ORDER BY age DESC LIMIT 0 OFFSET 100"
    );
    assert_eq!(
        q.params(),
        &[
            json!("bar"),
            json!("tt"),
            json!(1),
            json!(3),
            json!(5),
            json!(7),
            json!(9),
            json!("Muslim")
        ]
    );
}

#[test]
fn select_without_limit() {
    let q = select(
        json!({
            "foo": "bar",
            "qq": "tt",
            "age in": [1, 3, 5, 7, 9],
            "faith <>": "Muslim",
            "_orderby": "age desc",
            "_groupby": "department",
        }),
        &["id", "name", "age"],
    )
    .unwrap();
    assert_eq!(
        q.sql(),
        "SELECT id,name,age FROM tb WHERE (foo=$1 AND qq=$2 AND age IN ($3,$4,$5,$6,$7) AND faith!=$8) GROUP BY department ORDER BY age DESC"
    );
}

#[test]
fn select_having_numbers_after_where() {
    let q = select(
        json!({
            "age > ": 23,
            "_groupby": "name",
            "_having": { "total >=": 1000, "total <": 50000 },
        }),
        &["name, count(price) as total"],
    )
    .unwrap();
    assert_eq!(
        q.sql(),
        "SELECT name, count(price) as total FROM tb WHERE (age>$1) GROUP BY name HAVING (total>=$2 AND total<$3)"
    );
    assert_eq!(q.params(), &[json!(23), json!(1000), json!(50000)]);
}

#[test]
fn select_having_without_where() {
    let q = select(
        json!({
            "_groupby": "name",
            "_having": { "total >=": 1000, "total <": 50000 },
        }),
        &["name, count(price) as total"],
    )
    .unwrap();
    assert_eq!(
        q.sql(),
        "SELECT name, count(price) as total FROM tb GROUP BY name HAVING (total>=$1 AND total<$2)"
    );
    assert_eq!(q.params(), &[json!(1000), json!(50000)]);
}

#[test]
fn select_ignores_having_without_group_by() {
    let q = select(
        json!({
            "_having": { "total >=": 1000, "total <": 50000 },
            "age in": [1, 2, 3],
        }),
        &["name, age"],
    )
    .unwrap();
    assert_eq!(q.sql(), "SELECT name, age FROM tb WHERE (age IN ($1,$2,$3))");
    assert_eq!(q.params(), &[json!(1), json!(2), json!(3)]);
}

#[test]
fn select_skips_invalid_having_without_group_by() {
    let q = select(json!({ "_having": { "x in": 3 }, "a": 1 }), &[]).unwrap();
    assert_eq!(q.sql(), "SELECT * FROM tb WHERE (a=$1)");
    assert_eq!(q.params(), &[json!(1)]);
}

#[test]
fn select_reserves_padded_pseudo_keys() {
    let q = select(json!({ "_limit ": [1, 2], "a": 1 }), &[]).unwrap();
    assert_eq!(q.sql(), "SELECT * FROM tb WHERE (a=$1) LIMIT 1 OFFSET 2");
    assert_eq!(q.params(), &[json!(1)]);

    let q = select(json!({ " _groupby ": "a", "_orderby ": "a asc" }), &["a"]).unwrap();
    assert_eq!(q.sql(), "SELECT a FROM tb GROUP BY a ORDER BY a ASC");
    assert!(q.params().is_empty());
}

#[test]
fn select_empty_having_is_omitted() {
    let q = select(json!({ "_groupby": "name", "_having": {} }), &["name"]).unwrap();
    assert_eq!(q.sql(), "SELECT name FROM tb GROUP BY name");
}

#[test]
fn select_like_after_other_operators() {
    let q = select(
        json!({ "bar like": "haha%", "baz like": "%some", "foo": 1 }),
        &[],
    )
    .unwrap();
    assert_eq!(
        q.sql(),
        "SELECT * FROM tb WHERE (foo=$1 AND bar LIKE $2 AND baz LIKE $3)"
    );
    assert_eq!(q.params(), &[json!(1), json!("haha%"), json!("%some")]);

    let q = select(
        json!({
            "bar like": "haha%",
            "baz like": "%some",
            "foo": 1,
            "age in": [1, 3, 5, 7, 9],
        }),
        &[],
    )
    .unwrap();
    assert_eq!(
        q.sql(),
        "SELECT * FROM tb WHERE (foo=$1 AND age IN ($2,$3,$4,$5,$6) AND bar LIKE $7 AND baz LIKE $8)"
    );
    assert_eq!(
        q.params(),
        &[
            json!(1),
            json!(1),
            json!(3),
            json!(5),
            json!(7),
            json!(9),
            json!("haha%"),
            json!("%some")
        ]
    );

    let q = select(json!({ "name like": "%James" }), &["name"]).unwrap();
    assert_eq!(q.sql(), "SELECT name FROM tb WHERE (name LIKE $1)");
}

#[test]
fn select_multiple_order_by() {
    let q = select(
        json!({ "foo": "bar", "_orderby": "age desc, id asc" }),
        &["id", "name", "age"],
    )
    .unwrap();
    assert_eq!(
        q.sql(),
        "SELECT id,name,age FROM tb WHERE (foo=$1) ORDER BY age DESC,id ASC"
    );
    assert_eq!(q.params(), &[json!("bar")]);
}

#[test]
fn select_rejects_bad_direction() {
    let err = select(json!({ "foo": "bar", "_orderby": "qq DESCC" }), &[]).unwrap_err();
    assert_eq!(err, BuildError::OrderDirection("DESCC".into()));
    assert!(err.is_order_error());
}

#[test]
fn select_spec_from_explicit_conditions() {
    let spec = WhereSpec {
        conditions: vec![
            Condition::eq([("foo", 1), ("bar", 2)]),
            Condition::in_list([("qq", vec![4, 5, 6])]),
        ],
        order_by: vec![OrderSpec {
            field: "foo".into(),
            direction: Direction::Desc,
        }],
        limit: Some(LimitSpec { first: 10, second: 20 }),
        ..WhereSpec::default()
    };
    let q = Builder::new().select_spec("tb", &spec, &["foo", "bar"]);
    assert_eq!(
        q.sql(),
        "SELECT foo,bar FROM tb WHERE (bar=$1 AND foo=$2 AND qq IN ($3,$4,$5)) ORDER BY foo DESC LIMIT 10 OFFSET 20"
    );
    assert_eq!(q.params(), &[json!(2), json!(1), json!(4), json!(5), json!(6)]);
}

// ==================== INSERT ====================

#[test]
fn insert_single_record_sorts_columns() {
    let q = Builder::new()
        .insert("tb", &[obj(json!({ "foo": "bar", "age": 23 }))])
        .unwrap();
    assert_eq!(q.sql(), "INSERT INTO tb (age,foo) VALUES ($1,$2)");
    assert_eq!(q.params(), &[json!(23), json!("bar")]);
}

#[test]
fn insert_many_records_numbers_sequentially() {
    let records = [
        obj(json!({ "foo": 1, "bar": 2 })),
        obj(json!({ "foo": 3, "bar": 4 })),
        obj(json!({ "foo": 5, "bar": 6 })),
    ];
    let q = Builder::new().insert("tb1", &records).unwrap();
    assert_eq!(
        q.sql(),
        "INSERT INTO tb1 (bar,foo) VALUES ($1,$2),($3,$4),($5,$6)"
    );
    assert_eq!(
        q.params(),
        &[json!(2), json!(1), json!(4), json!(3), json!(6), json!(5)]
    );
}

#[test]
fn insert_without_records_fails() {
    let err = Builder::new().insert("tb", &[]).unwrap_err();
    assert_eq!(err, BuildError::NoData);
    assert!(err.is_insert_error());

    let err = Builder::new().insert("tb", &[Map::new()]).unwrap_err();
    assert_eq!(err, BuildError::NoData);
}

#[test]
fn insert_rejects_missing_and_extra_columns() {
    let missing = [obj(json!({ "a": 1, "b": 2 })), obj(json!({ "a": 3 }))];
    assert_eq!(
        Builder::new().insert("tb", &missing).unwrap_err(),
        BuildError::DataMismatch
    );

    let extra = [obj(json!({ "a": 1 })), obj(json!({ "a": 3, "b": 4 }))];
    assert_eq!(
        Builder::new().insert("tb", &extra).unwrap_err(),
        BuildError::DataMismatch
    );

    let renamed = [obj(json!({ "a": 1 })), obj(json!({ "b": 3 }))];
    assert_eq!(
        Builder::new().insert("tb", &renamed).unwrap_err(),
        BuildError::DataMismatch
    );
}

// ==================== UPDATE ====================

#[test]
fn update_numbers_set_before_where() {
    let q = Builder::new()
        .update(
            "tb",
            &obj(json!({
                "foo": "bar",
                "age >=": 23,
                "sex in": ["male", "female"],
            })),
            &obj(json!({ "score": 50, "district": "010" })),
        )
        .unwrap();
    assert_eq!(
        q.sql(),
        "UPDATE tb SET district=$1,score=$2 WHERE (foo=$3 AND sex IN ($4,$5) AND age>=$6)"
    );
    assert_eq!(
        q.params(),
        &[
            json!("010"),
            json!(50),
            json!("bar"),
            json!("male"),
            json!("female"),
            json!(23)
        ]
    );
}

#[test]
fn update_conditions_explicit() {
    let q = Builder::new()
        .update_conditions(
            "tb",
            &[Condition::eq([("foo", json!("bar")), ("qq", json!(1))])],
            &obj(json!({ "name": "deen", "age": 23 })),
        )
        .unwrap();
    assert_eq!(
        q.sql(),
        "UPDATE tb SET age=$1,name=$2 WHERE (foo=$3 AND qq=$4)"
    );
    assert_eq!(
        q.params(),
        &[json!(23), json!("deen"), json!("bar"), json!(1)]
    );
}

#[test]
fn update_without_where_updates_all_rows() {
    let q = Builder::new()
        .update("tb", &Map::new(), &obj(json!({ "a": 1 })))
        .unwrap();
    assert_eq!(q.sql(), "UPDATE tb SET a=$1");
}

#[test]
fn update_requires_set_fields() {
    let err = Builder::new()
        .update("tb", &obj(json!({ "id": 1 })), &Map::new())
        .unwrap_err();
    assert_eq!(err, BuildError::EmptySet);
}

#[test]
fn update_rejects_clause_pseudo_keys() {
    let err = Builder::new()
        .update(
            "tb",
            &obj(json!({ "id": 1, "_orderby": "id desc" })),
            &obj(json!({ "a": 1 })),
        )
        .unwrap_err();
    assert_eq!(
        err,
        BuildError::UnsupportedPseudoKey {
            key: "_orderby".into(),
            statement: "UPDATE"
        }
    );
}

// ==================== DELETE ====================

#[test]
fn delete_with_in_lists() {
    let q = Builder::new()
        .delete(
            "tb",
            &obj(json!({
                "age >=": 21,
                "sex in": ["male", "female"],
                "hobby in": ["soccer", "basketball", "tenis"],
            })),
        )
        .unwrap();
    assert_eq!(
        q.sql(),
        "DELETE FROM tb WHERE (hobby IN ($1,$2,$3) AND sex IN ($4,$5) AND age>=$6)"
    );
    assert_eq!(
        q.params(),
        &[
            json!("soccer"),
            json!("basketball"),
            json!("tenis"),
            json!("male"),
            json!("female"),
            json!(21)
        ]
    );
}

#[test]
fn delete_conditions_explicit() {
    let q = Builder::new().delete_conditions(
        "tb",
        &[Condition::eq([
            ("foo", json!(1)),
            ("bar", json!(2)),
            ("baz", json!("tt")),
        ])],
    );
    assert_eq!(q.sql(), "DELETE FROM tb WHERE (bar=$1 AND baz=$2 AND foo=$3)");
    assert_eq!(q.params(), &[json!(2), json!("tt"), json!(1)]);
}

#[test]
fn delete_without_conditions_is_unconditional() {
    let q = Builder::new().delete("tb", &Map::new()).unwrap();
    assert_eq!(q.sql(), "DELETE FROM tb");
    assert!(q.params().is_empty());
}

#[test]
fn delete_rejects_padded_limit() {
    let err = Builder::new()
        .delete("tb", &obj(json!({ "_limit ": [1, 2] })))
        .unwrap_err();
    assert_eq!(
        err,
        BuildError::UnsupportedPseudoKey {
            key: "_limit".into(),
            statement: "DELETE"
        }
    );
}

#[test]
fn delete_rejects_limit() {
    let err = Builder::new()
        .delete("tb", &obj(json!({ "_limit": [1, 2] })))
        .unwrap_err();
    assert!(matches!(
        err,
        BuildError::UnsupportedPseudoKey {
            statement: "DELETE",
            ..
        }
    ));
}

// ==================== Configuration ====================

#[test]
fn custom_field_order_applies_everywhere() {
    let builder = Builder::new().field_order(FieldOrder::custom(|a, b| b.cmp(a)));

    let q = builder
        .select("tb", &obj(json!({ "a": 1, "b": 2, "c in": [3, 4], "d in": [5] })), &[])
        .unwrap();
    assert_eq!(q.sql(), "SELECT * FROM tb WHERE (b=$1 AND a=$2 AND d IN ($3) AND c IN ($4,$5))");
    assert_eq!(q.params(), &[json!(2), json!(1), json!(5), json!(3), json!(4)]);

    let q = builder
        .insert("tb", &[obj(json!({ "x": 1, "y": 2 }))])
        .unwrap();
    assert_eq!(q.sql(), "INSERT INTO tb (y,x) VALUES ($1,$2)");
    assert_eq!(q.params(), &[json!(2), json!(1)]);
}

#[test]
fn case_insensitive_field_order() {
    let set = obj(json!({ "b": 1, "a": 2, "C": 3 }));

    let q = Builder::new().update("tb", &Map::new(), &set).unwrap();
    assert_eq!(q.sql(), "UPDATE tb SET C=$1,a=$2,b=$3");

    let q = Builder::new()
        .field_order(FieldOrder::CaseInsensitive)
        .update("tb", &Map::new(), &set)
        .unwrap();
    assert_eq!(q.sql(), "UPDATE tb SET a=$1,b=$2,C=$3");
    assert_eq!(q.params(), &[json!(2), json!(1), json!(3)]);
}

#[test]
fn builder_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync + Clone>() {}
    assert_send_sync::<Builder>();

    let builder = Builder::new();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let builder = builder.clone();
            std::thread::spawn(move || {
                builder
                    .select(
                        "tb",
                        &obj(json!({ "foo": "bar", "qq": "tt", "age in": [1, 3], "_orderby": "age desc" })),
                        &[],
                    )
                    .map(|q| q.sql().to_string())
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(
            handle.join().unwrap().unwrap(),
            "SELECT * FROM tb WHERE (foo=$1 AND qq=$2 AND age IN ($3,$4)) ORDER BY age DESC"
        );
    }
}

#[cfg(feature = "tracing")]
#[test]
fn traced_builder_renders_identical_sql() {
    let traced = Builder::new().trace(SqlTrace::at(tracing::Level::INFO).sql_limit(Some(10)));
    let where_map = obj(json!({ "age >=": 21, "sex in": ["male", "female"] }));

    let q = traced.delete("tb", &where_map).unwrap();
    assert_eq!(q, Builder::new().delete("tb", &where_map).unwrap());
    assert!(traced.insert("tb", &[]).is_err());
}
