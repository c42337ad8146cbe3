use shiny_graph::{GraphError, GraphStore, StoreConfig};

fn checked() -> GraphStore<String, String> {
    GraphStore::with_config(StoreConfig {
        check_invariants: true,
    })
}

fn s(value: &str) -> String {
    value.to_string()
}

#[test]
fn test_node_lifecycle() {
    let mut store = checked();

    for name in ["Wishka", "Irmoupolis", "Larti"] {
        store.insert_node(s(name)).unwrap();
        assert!(store.list_nodes().contains(name));
    }

    store.remove_node(&s("Irmoupolis")).unwrap();
    let nodes = store.list_nodes();
    assert!(!nodes.contains("Irmoupolis"));
    assert!(nodes.contains("Wishka"));
    assert!(nodes.contains("Larti"));
    assert_eq!(store.node_count(), 2);
}

#[test]
fn test_edge_visible_from_both_ends_only() {
    let mut store = checked();
    store.insert_node(s("bystander")).unwrap();
    store.insert_edge(s("child"), s("parent"), s("label")).unwrap();

    assert!(store.list_children(&s("parent")).unwrap()["child"].contains("label"));
    assert!(store.list_parents(&s("child")).unwrap()["parent"].contains("label"));

    assert!(store.list_children(&s("child")).unwrap().is_empty());
    assert!(store.list_parents(&s("parent")).unwrap().is_empty());
    assert!(store.list_children(&s("bystander")).unwrap().is_empty());
    assert!(store.list_parents(&s("bystander")).unwrap().is_empty());
}

#[test]
fn test_multigraph_with_many_parents() {
    let mut store = checked();
    store.insert_edge(s("hub"), s("a"), s("road")).unwrap();
    store.insert_edge(s("hub"), s("a"), s("rail")).unwrap();
    store.insert_edge(s("hub"), s("b"), s("road")).unwrap();
    store.insert_edge(s("hub"), s("hub"), s("ring")).unwrap();

    let parents = store.list_parents(&s("hub")).unwrap();
    assert_eq!(parents.len(), 3);
    assert_eq!(parents["a"].len(), 2);
    assert_eq!(parents["b"].len(), 1);
    assert!(parents["hub"].contains("ring"));
    assert_eq!(store.edge_count(), 4);
}

#[test]
fn test_removing_edges_never_removes_nodes() {
    let mut store = checked();
    store.insert_edge(s("b"), s("a"), s("x")).unwrap();
    store.insert_edge(s("b"), s("a"), s("y")).unwrap();

    store.remove_edge(&s("b"), &s("a"), &s("x")).unwrap();
    assert!(store.list_children(&s("a")).unwrap().contains_key("b"));

    store.remove_edge(&s("b"), &s("a"), &s("y")).unwrap();
    assert!(!store.list_children(&s("a")).unwrap().contains_key("b"));
    assert!(!store.list_parents(&s("b")).unwrap().contains_key("a"));
    assert_eq!(store.node_count(), 2);
    assert_eq!(store.edge_count(), 0);
}

#[test]
fn test_remove_node_then_reinsert_is_clean() {
    let mut store = checked();
    store.insert_edge(s("b"), s("a"), s("x")).unwrap();
    store.insert_edge(s("a"), s("b"), s("y")).unwrap();

    assert_eq!(store.remove_node(&s("a")), Ok(2));
    store.insert_node(s("a")).unwrap();

    assert!(store.list_children(&s("a")).unwrap().is_empty());
    assert!(store.list_parents(&s("a")).unwrap().is_empty());
    assert!(store.list_children(&s("b")).unwrap().is_empty());
}

#[test]
fn test_edge_round_trip_matches_single_insert() {
    let mut churned = checked();
    churned.insert_edge(s("c"), s("p"), s("l")).unwrap();
    churned.remove_edge(&s("c"), &s("p"), &s("l")).unwrap();
    churned.insert_edge(s("c"), s("p"), s("l")).unwrap();

    let mut once = checked();
    once.insert_edge(s("c"), s("p"), s("l")).unwrap();

    assert_eq!(churned.list_nodes(), once.list_nodes());
    assert_eq!(
        churned.list_children(&s("p")).unwrap(),
        once.list_children(&s("p")).unwrap()
    );
    assert_eq!(
        churned.list_parents(&s("c")).unwrap(),
        once.list_parents(&s("c")).unwrap()
    );
    assert_eq!(
        churned.edge_labels(&s("c"), &s("p")).unwrap(),
        once.edge_labels(&s("c"), &s("p")).unwrap()
    );
}

#[test]
fn test_contract_violations() {
    let mut store = checked();
    store.insert_edge(s("b"), s("a"), s("x")).unwrap();

    assert_eq!(store.insert_node(s("a")), Err(GraphError::DuplicateNode(s("a"))));
    assert!(matches!(
        store.insert_edge(s("b"), s("a"), s("x")),
        Err(GraphError::DuplicateEdge { .. })
    ));
    assert_eq!(
        store.insert_edge(s("b"), s(""), s("x")),
        Err(GraphError::InvalidArgument("parent"))
    );
    assert_eq!(store.remove_node(&s("zz")), Err(GraphError::UnknownNode(s("zz"))));
    assert!(matches!(
        store.remove_edge(&s("b"), &s("a"), &s("nope")),
        Err(GraphError::UnknownEdge { label: Some(_), .. })
    ));
    assert!(matches!(
        store.edge_labels(&s("a"), &s("b")),
        Err(GraphError::UnknownEdge { label: None, .. })
    ));

    // Nothing above changed the store
    assert_eq!(store.node_count(), 2);
    assert_eq!(store.edge_count(), 1);
    assert!(store.verify().is_ok());
}

#[test]
fn test_snapshots_are_detached() {
    let mut store = checked();
    store.insert_edge(s("b"), s("a"), s("x")).unwrap();

    let mut children = store.list_children(&s("a")).unwrap();
    children.clear();
    let mut labels = store.edge_labels(&s("b"), &s("a")).unwrap();
    labels.insert(s("injected"));

    assert_eq!(store.edge_labels(&s("b"), &s("a")).unwrap().len(), 1);
    assert!(store.contains_edge(&s("b"), &s("a"), &s("x")));
}
