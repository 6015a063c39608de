use super::connection::Connection;
use tokio::sync::mpsc;

#[test]
fn test_connection_new() {
    let (tx, _) = mpsc::unbounded_channel::<String>();
    let conn = Connection::new(tx);
    assert!(!conn.id.is_nil());
}

#[test]
fn test_connection_ids_are_unique() {
    let (tx, _) = mpsc::unbounded_channel::<String>();
    let a = Connection::new(tx.clone());
    let b = Connection::new(tx);
    assert_ne!(a.id, b.id);
}
