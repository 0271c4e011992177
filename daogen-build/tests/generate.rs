use std::fs;
use std::path::Path;

use daogen_build::{ConfigError, generate_daos};
use tempfile::TempDir;

const MODEL: &str = r#"
use daogen::{Embeddable, Entity};

#[derive(Entity, Default)]
#[daogen(table = "suppliers")]
pub struct Supplier {
    #[daogen(id, column(name = "idSuppliers"))]
    pub id: Option<i32>,
    #[daogen(column)]
    pub name: Option<String>,
}

#[derive(Entity, Default)]
#[daogen(table = "article")]
pub struct Article {
    #[daogen(id, generated(strategy = "identity"), column(name = "idArticle"))]
    pub id: Option<i32>,
    #[daogen(column(length = 20))]
    pub code: Option<String>,
    #[daogen(many_to_one, join_column(name = "supplierId"))]
    pub supplier: Option<Supplier>,
    pub cached_label: String,
}

#[derive(Embeddable, Default, Clone)]
pub struct LineId {
    #[daogen(column(name = "orderId"))]
    pub order_id: Option<i64>,
    #[daogen(column)]
    pub line: Option<i32>,
}

#[derive(Entity, Default)]
pub struct Line {
    #[daogen(embedded_id, attribute_override(name = "line", column(name = "lineNo")))]
    pub id: Option<LineId>,
    #[daogen(column)]
    pub amount: Option<i64>,
}
"#;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (path, content) in files {
        let path = dir.path().join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    dir
}

fn read(dir: &Path, file: &str) -> String {
    fs::read_to_string(dir.join(file)).unwrap()
}

#[test]
fn writes_one_module_per_entity() {
    init_logger();
    let dir = project(&[("src/model.rs", MODEL)]);
    let out = dir.path().join("src/generated");

    generate_daos()
        .scan_path(dir.path().join("src"))
        .output_dir(&out)
        .run()
        .unwrap();

    let modules = read(&out, "mod.rs");
    assert!(modules.contains("pub mod article_dao;\npub mod line_dao;\npub mod supplier_dao;\n"));
    assert!(!out.join("line_id_dao.rs").exists());

    let article = read(&out, "article_dao.rs");
    assert!(article.contains("pub const TABLE_NAME: &str = \"article\";"));
    assert!(article.contains("\"INSERT INTO article (code, supplierId) VALUES (?, ?)\""));
    assert!(article.contains("crate::generated::supplier_dao::SupplierIdRowMapper::with_columns"));
    assert!(article.contains("pub struct ArticleDao<X: SqlExecutor>"));
    assert!(article.contains("crate::model::Article"));
    assert!(!article.contains("cached_label"));

    let line = read(&out, "line_dao.rs");
    assert!(line.contains("\"SELECT orderId, lineNo, amount FROM Line WHERE orderId = ? AND lineNo = ?\""));
    assert!(line.contains("id: &crate::model::LineId"));
}

#[test]
fn unchanged_units_are_not_rewritten() {
    init_logger();
    let dir = project(&[("src/model.rs", MODEL)]);
    let out = dir.path().join("generated_out");
    let run = || {
        generate_daos()
            .scan_path(dir.path().join("src"))
            .output_dir(&out)
            .run()
            .unwrap()
    };

    run();
    let unit = out.join("article_dao.rs");
    let first = fs::metadata(&unit).unwrap().modified().unwrap();
    fs::write(out.join("supplier_dao.rs"), "// stale").unwrap();

    run();
    assert_eq!(fs::metadata(&unit).unwrap().modified().unwrap(), first);
    assert!(read(&out, "supplier_dao.rs").contains("SupplierDao"));
}

#[test]
fn module_path_option_qualifies_references() {
    let dir = project(&[("src/model.rs", MODEL)]);
    let units = generate_daos()
        .scan_path(dir.path().join("src"))
        .module_path("crate::db")
        .crate_name("shop")
        .generate()
        .unwrap();

    let article = units.iter().find(|unit| unit.module_name == "article_dao").unwrap();
    assert_eq!(article.entity, "shop::model::Article");
    assert!(article.source.contains("crate::db::supplier_dao::SupplierIdRowMapper"));
    assert_eq!(article.file_name(), "article_dao.rs");
}

#[test]
fn toml_declarations_are_generated_too() {
    let dir = project(&[(
        "schema.toml",
        r#"
        [[types]]
        name = "Tag"
        module = "crate::tags"
        kind = "entity"
        table = "tags"
        schema = "meta"

        [[types.fields]]
        name = "id"
        type = "Option<i64>"
        visible = true
        id = true

        [[types.fields]]
        name = "label"
        type = "String"
        visible = true
        column = { name = "tagLabel" }
        "#,
    )]);

    let units = generate_daos().schema_file(dir.path().join("schema.toml")).generate().unwrap();
    assert_eq!(units.len(), 1);
    let tag = &units[0].source;
    assert!(tag.contains("\"UPDATE meta.tags SET tagLabel = ? WHERE id = ?\""));
    assert!(tag.contains("unwrap_or_default()"));
}

#[test]
fn failing_round_writes_nothing() {
    init_logger();
    let broken = r#"
        use daogen::Entity;

        #[derive(Entity, Default)]
        pub struct Hidden {
            #[daogen(id)]
            id: Option<i32>,
        }
    "#;
    let dir = project(&[("src/model.rs", MODEL), ("src/hidden.rs", broken)]);
    let out = dir.path().join("src/generated");

    let err = generate_daos()
        .scan_path(dir.path().join("src"))
        .output_dir(&out)
        .run()
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::MissingAccessor {
            entity: "crate::hidden::Hidden".into(),
            property: "id".into(),
            accessor: "getter",
        })
    );
    assert!(!out.exists());
}

#[test]
fn ambiguous_references_are_fatal() {
    let owner = |module: &str| {
        format!(
            r#"
            #[derive(daogen::Entity, Default)]
            pub struct Owner {{
                #[daogen(id, column(name = "{module}Id"))]
                pub id: Option<i32>,
            }}
            "#
        )
    };
    let pet = r#"
        #[derive(daogen::Entity, Default)]
        pub struct Pet {
            #[daogen(id)]
            pub id: Option<i32>,
            #[daogen(many_to_one)]
            pub owner: Option<Owner>,
        }
    "#;
    let dir = project(&[("src/a.rs", &owner("a")), ("src/b.rs", &owner("b")), ("src/pets.rs", pet)]);

    let err = generate_daos().scan_path(dir.path().join("src")).generate().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::AmbiguousReference { name, .. }) if name == "Owner"
    ));
}

#[test]
fn inherited_generated_identifier_cannot_join_a_composite_one() {
    let base = r#"
        #[derive(daogen::MappedSuperclass, Default)]
        pub struct Base {
            #[daogen(id, generated(strategy = "identity"))]
            pub id: Option<i64>,
        }
    "#;
    let child = r#"
        #[derive(daogen::Entity, Default)]
        #[daogen(extends = "Base")]
        pub struct Child {
            #[daogen(id)]
            pub code: Option<String>,
            #[daogen(column)]
            pub name: Option<String>,
        }
    "#;
    let dir = project(&[("src/base.rs", base), ("src/child.rs", child)]);
    let out = dir.path().join("src/generated");

    let err = generate_daos()
        .scan_path(dir.path().join("src"))
        .output_dir(&out)
        .run()
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::GeneratedCompositeId {
            entity: "crate::child::Child".into(),
            property: "id".into(),
        })
    );
    assert!(!out.exists());
}

#[test]
fn colliding_module_names_are_fatal() {
    let entity = r#"
        #[derive(daogen::Entity, Default)]
        pub struct Owner {
            #[daogen(id)]
            pub id: Option<i32>,
        }
    "#;
    let dir = project(&[("src/a.rs", entity), ("src/b.rs", entity)]);

    let err = generate_daos().scan_path(dir.path().join("src")).generate().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::DuplicateModule { module, .. }) if module == "owner_dao"
    ));
}

#[test]
fn unparsable_sources_abort_the_round() {
    let dir = project(&[("src/model.rs", "pub struct {")]);
    let err = generate_daos().scan_path(dir.path().join("src")).generate().unwrap_err();
    assert!(format!("{err:#}").contains("model.rs"));
}
