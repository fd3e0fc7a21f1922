//! Tests for the nested-set menu forest

use rsmenu::domain::{DomainError, MenuForest, MenuNode, MenuOptions, NestedBounds, NodeId};

fn insert(forest: &mut MenuForest, title: &str, parent: Option<NodeId>) -> NodeId {
    forest
        .insert_first_child(title.to_string(), MenuOptions::new(), parent)
        .unwrap()
}

fn titles(nodes: &[MenuNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.title.as_str()).collect()
}

#[test]
fn given_several_roots_when_listing_then_creation_order() {
    // Arrange
    let mut forest = MenuForest::new();
    insert(&mut forest, "main", None);
    insert(&mut forest, "footer", None);
    insert(&mut forest, "sidebar", None);

    // Act
    let roots = forest.root_nodes();

    // Assert
    assert_eq!(titles(&roots), vec!["main", "footer", "sidebar"]);
    assert!(roots.iter().all(|r| r.root == r.id));
}

#[test]
fn given_children_when_inserting_then_newest_goes_first() {
    let mut forest = MenuForest::new();
    let root = insert(&mut forest, "main", None);
    insert(&mut forest, "about", Some(root));
    insert(&mut forest, "blog", Some(root));

    let children = forest.children(root).unwrap();

    assert_eq!(titles(&children), vec!["blog", "about"]);
    assert!(children.iter().all(|c| c.root == Some(root)));
}

#[test]
fn given_tree_when_inserting_then_bounds_are_nested() {
    // Arrange
    let mut forest = MenuForest::new();
    let root = insert(&mut forest, "main", None);
    let about = insert(&mut forest, "about", Some(root));
    let team = insert(&mut forest, "team", Some(about));

    // Act
    let root_bounds = forest.get(root).unwrap().bounds.unwrap();
    let about_bounds = forest.get(about).unwrap().bounds.unwrap();
    let team_bounds = forest.get(team).unwrap().bounds.unwrap();

    // Assert
    assert_eq!(root_bounds, NestedBounds { left: 1, right: 6, level: 0 });
    assert_eq!(about_bounds, NestedBounds { left: 2, right: 5, level: 1 });
    assert_eq!(team_bounds, NestedBounds { left: 3, right: 4, level: 2 });
    forest.verify().unwrap();
}

#[test]
fn given_root_when_building_hierarchy_then_excludes_root_itself() {
    let mut forest = MenuForest::new();
    let root = insert(&mut forest, "main", None);
    let about = insert(&mut forest, "about", Some(root));
    let team = insert(&mut forest, "team", Some(about));

    let hierarchy = forest.hierarchy(root).unwrap();

    assert_eq!(hierarchy.len(), 1);
    assert_eq!(hierarchy[0].id, about);
    assert_eq!(hierarchy[0].level, 1);
    assert_eq!(hierarchy[0].ids(), vec![about, team]);
}

#[test]
fn given_subtree_when_moving_under_other_root_then_root_reference_follows() {
    // Arrange
    let mut forest = MenuForest::new();
    let main = insert(&mut forest, "main", None);
    let footer = insert(&mut forest, "footer", None);
    let about = insert(&mut forest, "about", Some(main));
    let team = insert(&mut forest, "team", Some(about));

    // Act
    forest.move_first_child(about, Some(footer)).unwrap();

    // Assert
    assert_eq!(forest.get(team).unwrap().root, Some(footer));
    assert!(forest.children(main).unwrap().is_empty());
    assert!(forest.is_descendant(footer, team).unwrap());
    forest.verify().unwrap();
}

#[test]
fn given_node_when_moving_into_own_subtree_then_invalid_parent() {
    let mut forest = MenuForest::new();
    let root = insert(&mut forest, "main", None);
    let about = insert(&mut forest, "about", Some(root));
    let team = insert(&mut forest, "team", Some(about));

    let result = forest.move_first_child(about, Some(team));

    assert_eq!(
        result,
        Err(DomainError::InvalidParent {
            node: about,
            parent: team
        })
    );
    assert_eq!(forest.get(about).unwrap().parent, Some(root));
}

#[test]
fn given_subtree_when_removing_then_all_descendants_gone() {
    // Arrange
    let mut forest = MenuForest::new();
    let root = insert(&mut forest, "main", None);
    let about = insert(&mut forest, "about", Some(root));
    let team = insert(&mut forest, "team", Some(about));
    let blog = insert(&mut forest, "blog", Some(root));

    // Act
    let removed = forest.remove_subtree(about).unwrap();

    // Assert
    assert_eq!(removed, vec![team, about]);
    assert!(!forest.contains(team));
    assert_eq!(forest.len(), 2);
    assert_eq!(
        forest.get(root).unwrap().bounds.unwrap(),
        NestedBounds { left: 1, right: 4, level: 0 }
    );
    assert!(forest.contains(blog));
    forest.verify().unwrap();
}

#[test]
fn given_unknown_id_when_removing_then_not_found() {
    let mut forest = MenuForest::new();
    assert_eq!(
        forest.remove_subtree(NodeId(9)),
        Err(DomainError::NodeNotFound(NodeId(9)))
    );
}

#[test]
fn given_snapshots_when_restoring_then_rebuilds_forest() {
    // Arrange
    let nodes = vec![
        MenuNode {
            id: Some(NodeId(3)),
            title: "main".into(),
            ..MenuNode::default()
        },
        MenuNode {
            id: Some(NodeId(7)),
            title: "about".into(),
            parent: Some(NodeId(3)),
            ..MenuNode::default()
        },
    ];

    // Act
    let forest = MenuForest::restore(1, nodes).unwrap();

    // Assert
    assert_eq!(forest.next_id(), NodeId(8));
    assert_eq!(forest.get(NodeId(7)).unwrap().root, Some(NodeId(3)));
}

#[test]
fn given_orphan_snapshot_when_restoring_then_corrupt_forest() {
    let nodes = vec![MenuNode {
        id: Some(NodeId(2)),
        title: "orphan".into(),
        parent: Some(NodeId(1)),
        ..MenuNode::default()
    }];

    let result = MenuForest::restore(1, nodes);

    assert!(matches!(result, Err(DomainError::CorruptForest(_))));
}

#[test]
fn given_duplicate_snapshot_ids_when_restoring_then_duplicate_id() {
    let node = MenuNode {
        id: Some(NodeId(1)),
        title: "main".into(),
        ..MenuNode::default()
    };

    let result = MenuForest::restore(1, vec![node.clone(), node]);

    assert!(matches!(result, Err(DomainError::DuplicateId(NodeId(1)))));
}
