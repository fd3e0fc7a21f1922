//! Tests for MenuAdminService use cases

use serde_json::json;

use rsmenu::application::services::{
    DeleteAction, DeleteOutcome, EditAction, EditOutcome, FlashKind, MenuAdminService,
    MenuItemForm, MenuItemStore, Route, STATUS_CANCELLED, STATUS_REMOVED, STATUS_SAVED,
};
use rsmenu::application::{ApplicationError, OptionRow, ValidationKind};
use rsmenu::domain::{MenuNode, NodeId};
use rsmenu::infrastructure::storage::MemoryTreeStorage;

fn service() -> MenuAdminService {
    MenuAdminService::new(MenuItemStore::new(Box::new(MemoryTreeStorage::new())))
}

fn form(title: &str) -> MenuItemForm {
    MenuItemForm {
        title: title.to_string(),
        ..MenuItemForm::default()
    }
}

fn save(service: &mut MenuAdminService, form: MenuItemForm) -> MenuNode {
    match service.submit_edit(None, form, EditAction::Save).unwrap() {
        EditOutcome::Saved { node, .. } => node,
        other => panic!("expected saved, got {:?}", other),
    }
}

fn id(node: &MenuNode) -> NodeId {
    node.id.unwrap()
}

#[test]
fn given_empty_store_when_listing_then_no_root_nodes() {
    assert!(service().list().root_nodes.is_empty());
}

#[test]
fn given_new_form_when_saving_then_redirects_with_saved_flash() {
    // Arrange
    let mut service = service();
    let mut new_form = form("Main");
    new_form.options.push(OptionRow::new("display+", "yes"));

    // Act
    let outcome = service.submit_edit(None, new_form, EditAction::Save).unwrap();

    // Assert
    let EditOutcome::Saved { node, redirect } = outcome else {
        panic!("expected saved outcome");
    };
    assert_eq!(node.title, "Main");
    assert_eq!(node.options.get("display"), Some(&json!(true)));
    assert_eq!(redirect.route, Route::ListMenus);
    let flash = redirect.flash.unwrap();
    assert_eq!(flash.kind, FlashKind::Status);
    assert_eq!(flash.message, STATUS_SAVED);
    assert_eq!(service.list().root_nodes, vec![node]);
}

#[test]
fn given_root_when_viewing_then_renders_admin_tree_markup() {
    let mut service = service();
    let root = save(&mut service, form("Main"));

    let view = service.view(id(&root)).unwrap();

    assert_eq!(view.menu, root);
    assert_eq!(view.tree.len(), 1);
    assert_eq!(
        view.html,
        "<ul><li class=\"jstree-open\" id=\"node_2\"><a href=\"#\">dummy child (2)</a></li></ul>"
    );
}

#[test]
fn given_custom_prefix_when_viewing_then_dom_ids_use_it() {
    let mut service = service().with_dom_node_prefix("menu-");
    let root = save(&mut service, form("Main"));

    let view = service.view(id(&root)).unwrap();

    assert!(view.html.contains("id=\"menu-2\""));
}

#[test]
fn given_non_root_when_viewing_then_access_denied() {
    let mut service = service();
    let root = save(&mut service, form("Main"));
    let mut child_form = form("About");
    child_form.parent = root.id;
    let child = save(&mut service, child_form);

    let result = service.view(id(&child));

    assert!(matches!(result, Err(ApplicationError::AccessDenied(n)) if n == id(&child)));
}

#[test]
fn given_unknown_id_when_viewing_then_not_found() {
    let result = service().view(NodeId(99));
    assert!(matches!(result, Err(ApplicationError::NotFound(NodeId(99)))));
}

#[test]
fn given_saved_node_when_opening_form_then_prefilled_with_exploded_options() {
    // Arrange
    let mut service = service();
    let mut new_form = form("Main");
    new_form.options = vec![
        OptionRow::new("uri", "/"),
        OptionRow::new("attributes*", r#"{"class":"nav"}"#),
    ];
    let root = save(&mut service, new_form);

    // Act
    let edit = service.edit_form(root.id).unwrap();

    // Assert
    assert_eq!(edit.title, "Main");
    assert_eq!(edit.parent, None);
    assert_eq!(edit.root, root.id);
    assert_eq!(
        edit.options,
        vec![
            OptionRow::new("uri", "/"),
            OptionRow::new("attributes", r#"{"class":"nav"}"#),
        ]
    );
}

#[test]
fn given_no_id_when_opening_form_then_blank() {
    assert_eq!(service().edit_form(None).unwrap(), MenuItemForm::default());
}

#[test]
fn given_invalid_form_when_saving_then_field_errors_and_nothing_persisted() {
    // Arrange
    let mut service = service();
    let mut bad = form("   ");
    bad.options.push(OptionRow::new("colour", "red"));
    bad.parent = Some(NodeId(5));

    // Act
    let outcome = service
        .submit_edit(None, bad.clone(), EditAction::Save)
        .unwrap();

    // Assert
    let EditOutcome::Invalid { form, errors } = outcome else {
        panic!("expected invalid outcome");
    };
    assert_eq!(form, bad);
    assert_eq!(
        errors.for_field("title").collect::<Vec<_>>(),
        vec![&ValidationKind::Blank]
    );
    assert_eq!(errors.for_field("options[0].key").count(), 1);
    assert_eq!(
        errors.for_field("parent").collect::<Vec<_>>(),
        vec![&ValidationKind::UnknownItem(NodeId(5))]
    );
    assert!(service.list().root_nodes.is_empty());
}

#[test]
fn given_non_root_as_root_when_saving_then_root_field_error() {
    let mut service = service();
    let root = save(&mut service, form("Main"));
    let mut child_form = form("About");
    child_form.parent = root.id;
    let child = save(&mut service, child_form);

    let mut bad = form("Team");
    bad.parent = child.id;
    bad.root = child.id;
    let outcome = service.submit_edit(None, bad, EditAction::Save).unwrap();

    let EditOutcome::Invalid { errors, .. } = outcome else {
        panic!("expected invalid outcome");
    };
    assert_eq!(
        errors.for_field("root").collect::<Vec<_>>(),
        vec![&ValidationKind::NotARoot(id(&child))]
    );
}

#[test]
fn given_descendant_as_parent_when_saving_then_parent_field_error() {
    // Arrange
    let mut service = service();
    let root = save(&mut service, form("Main"));
    let mut child_form = form("About");
    child_form.parent = root.id;
    let child = save(&mut service, child_form);
    let mut edit = service.edit_form(root.id).unwrap();
    edit.parent = child.id;
    edit.root = None;

    // Act
    let outcome = service.submit_edit(root.id, edit, EditAction::Save).unwrap();

    // Assert
    let EditOutcome::Invalid { errors, .. } = outcome else {
        panic!("expected invalid outcome");
    };
    assert_eq!(
        errors.for_field("parent").collect::<Vec<_>>(),
        vec![&ValidationKind::InvalidParent(id(&child))]
    );
    assert!(service.view(id(&root)).is_ok());
}

#[test]
fn given_existing_node_when_saving_edit_then_updated_in_place() {
    let mut service = service();
    let root = save(&mut service, form("Main"));
    let mut edit = service.edit_form(root.id).unwrap();
    edit.title = "Main menu".to_string();
    edit.set_option("label", "Start");

    let outcome = service.submit_edit(root.id, edit, EditAction::Save).unwrap();

    let EditOutcome::Saved { node, .. } = outcome else {
        panic!("expected saved outcome");
    };
    assert_eq!(node.id, root.id);
    assert_eq!(node.title, "Main menu");
    assert_eq!(node.options.get("label"), Some(&json!("Start")));
    assert_eq!(service.list().root_nodes.len(), 1);
}

#[test]
fn given_cancel_when_editing_then_nothing_saved() {
    let mut service = service();

    let outcome = service
        .submit_edit(None, form("Main"), EditAction::Cancel)
        .unwrap();

    let EditOutcome::Cancelled(redirect) = outcome else {
        panic!("expected cancelled outcome");
    };
    assert_eq!(redirect.flash.unwrap().message, STATUS_CANCELLED);
    assert!(service.list().root_nodes.is_empty());
}

#[test]
fn given_root_when_confirming_delete_then_counts_descendants() {
    let mut service = service();
    let root = save(&mut service, form("Main"));
    let mut child_form = form("About");
    child_form.parent = root.id;
    save(&mut service, child_form);

    let confirmation = service.delete_form(id(&root)).unwrap();

    assert_eq!(confirmation.node.title, "Main");
    assert_eq!(confirmation.descendants, 3);
}

#[test]
fn given_root_when_deleting_then_removed_with_flash() {
    // Arrange
    let mut service = service();
    let root = save(&mut service, form("Main"));

    // Act
    let outcome = service
        .submit_delete(id(&root), DeleteAction::Delete)
        .unwrap();

    // Assert
    let DeleteOutcome::Deleted { removed, redirect } = outcome else {
        panic!("expected deleted outcome");
    };
    assert_eq!(removed.len(), 2);
    assert_eq!(redirect.flash.unwrap().message, STATUS_REMOVED);
    assert!(service.list().root_nodes.is_empty());
}

#[test]
fn given_cancel_when_deleting_then_node_kept() {
    let mut service = service();
    let root = save(&mut service, form("Main"));

    let outcome = service
        .submit_delete(id(&root), DeleteAction::Cancel)
        .unwrap();

    let DeleteOutcome::Cancelled(redirect) = outcome else {
        panic!("expected cancelled outcome");
    };
    assert_eq!(redirect.route, Route::ListMenus);
    assert_eq!(redirect.flash.unwrap().message, STATUS_CANCELLED);
    assert_eq!(service.list().root_nodes.len(), 1);
}

#[test]
fn given_unknown_id_when_cancelling_delete_then_not_found() {
    let result = service().submit_delete(NodeId(3), DeleteAction::Cancel);
    assert!(matches!(result, Err(ApplicationError::NotFound(NodeId(3)))));
}
