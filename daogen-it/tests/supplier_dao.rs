mod common;

use common::RecordingExecutor;
use daogen::{DaoError, MapRow, RowMapper, Tracked, Value};
use daogen_it::generated::supplier_dao::{self, SupplierDao, SupplierRowMapper};
use daogen_it::model::Supplier;

fn supplier_row(contact: Value) -> MapRow {
    MapRow::new()
        .with("idSuppliers", 3)
        .with("name", "Acme")
        .with("contactEmail", contact)
}

#[test]
fn tracked_column_joins_the_statements() {
    assert_eq!(supplier_dao::DETAIL_COLUMN_LIST, &["name", "contactEmail"]);
    assert_eq!(
        supplier_dao::INSERT_SQL,
        "INSERT INTO suppliers (name, contactEmail, idSuppliers) VALUES (?, ?, ?)"
    );
    assert_eq!(
        supplier_dao::UPDATE_SQL,
        "UPDATE suppliers SET name = ?, contactEmail = ? WHERE idSuppliers = ?"
    );
}

#[test]
fn row_mapping_distinguishes_null_from_a_value() {
    let mapper = SupplierRowMapper::new();

    let supplier = mapper.map_row(&supplier_row(Value::from("sales@acme.test"))).unwrap();
    assert_eq!(supplier.id, Some(3));
    assert_eq!(supplier.contact, Tracked::Set("sales@acme.test".to_string()));

    let supplier = mapper.map_row(&supplier_row(Value::Null)).unwrap();
    assert_eq!(supplier.contact, Tracked::Null);
    assert_eq!(supplier.contact.get("contact").unwrap(), None);
}

#[test]
fn unset_tracked_values_fail_on_read_but_bind_as_null() {
    let supplier = Supplier::with_id(4);
    assert!(matches!(supplier.contact.get("contact"), Err(DaoError::PropertyNotSet { .. })));
    assert_eq!(supplier_dao::get_property_value(&supplier, "contact"), Value::Null);

    let executor = RecordingExecutor::default();
    SupplierDao::new(&executor).update(&supplier).unwrap();
    assert_eq!(executor.last().params, vec![Value::Null, Value::Null, Value::Integer(4)]);
}

#[test]
fn tracked_property_access_by_path() {
    let mut supplier = Supplier::with_id(5);

    supplier_dao::set_property_value(&mut supplier, "contact", Value::Text("ops@acme.test".into())).unwrap();
    assert_eq!(supplier.contact, Tracked::Set("ops@acme.test".to_string()));
    assert_eq!(
        supplier_dao::get_property_value(&supplier, "contact"),
        Value::Text("ops@acme.test".into())
    );

    supplier_dao::set_property_value(&mut supplier, "contact", Value::Null).unwrap();
    assert_eq!(supplier.contact, Tracked::Null);
    assert!(supplier.contact.is_set());

    let err = supplier_dao::set_property_value(&mut supplier, "contact", Value::Integer(1)).unwrap_err();
    assert!(matches!(err, DaoError::TypeMismatch { .. }));
}
