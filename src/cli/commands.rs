//! Command dispatch: one handler per subcommand

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::generate;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::services::{
    DeleteAction, DeleteOutcome, EditAction, EditOutcome, ListView, MenuAdminService, MenuView,
    Redirect, Route,
};
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands, EditArgs, ViewFormat};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{expand_env_vars, global_config_path, Settings};
use crate::domain::{HierarchyNode, NodeId};
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        None => Ok(()),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => config_show(cli),
            ConfigCommands::Path => config_path(cli),
        },
        Some(Commands::List) => {
            let service = admin_service(cli)?;
            print_list(&service.list());
            Ok(())
        }
        Some(Commands::View { id, format }) => view(cli, *id, *format),
        Some(Commands::Edit(args)) => edit(cli, args),
        Some(Commands::Delete { id, cancel, yes }) => delete(cli, *id, *cancel, *yes),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(data_file) = &cli.data_file {
        settings.data_file = PathBuf::from(expand_env_vars(&data_file.to_string_lossy()));
    }
    debug!("effective settings: {:?}", settings);
    Ok(settings)
}

fn admin_service(cli: &Cli) -> CliResult<MenuAdminService> {
    let container = ServiceContainer::new(load_settings(cli)?);
    Ok(container.admin_service()?)
}

fn config_show(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;
    output::info(&settings.to_toml()?);
    Ok(())
}

fn config_path(cli: &Cli) -> CliResult<()> {
    output::header("Config files");
    match global_config_path() {
        Some(path) => {
            let state = if path.exists() { "" } else { " (missing)" };
            output::detail(&format!("global: {}{}", path.display(), state));
        }
        None => output::detail("global: <no home directory>"),
    }
    if let Some(path) = &cli.config {
        output::detail(&format!("explicit: {}", path.display()));
    }
    Ok(())
}

fn print_list(view: &ListView) {
    output::header("Menus");
    if view.root_nodes.is_empty() {
        output::detail("no menus yet");
        return;
    }
    for node in &view.root_nodes {
        output::detail(node);
    }
}

/// Show the flash and follow the redirect.
fn follow(service: &MenuAdminService, redirect: &Redirect) {
    if let Some(flash) = &redirect.flash {
        output::success(&flash.message);
    }
    match redirect.route {
        Route::ListMenus => print_list(&service.list()),
    }
}

#[instrument(level = "debug", skip(cli))]
fn view(cli: &Cli, id: NodeId, format: ViewFormat) -> CliResult<()> {
    let service = admin_service(cli)?;
    let view = service.view(id)?;
    match format {
        ViewFormat::Tree => output::info(&menu_tree(&view)),
        ViewFormat::Html => output::info(&view.html),
        ViewFormat::Json => {
            let json = serde_json::to_string_pretty(&view).map_err(|e| {
                ApplicationError::Persistence {
                    context: format!("encode menu {}", id),
                    source: Box::new(e),
                }
            })?;
            output::info(&json);
        }
    }
    Ok(())
}

fn menu_tree(view: &MenuView) -> Tree<String> {
    fn branch(node: &HierarchyNode) -> Tree<String> {
        Tree::new(format!("{} ({})", node.title, node.id))
            .with_leaves(node.children.iter().map(branch))
    }
    Tree::new(view.menu.to_string()).with_leaves(view.tree.iter().map(branch))
}

fn parse_option(raw: &str) -> CliResult<(&str, &str)> {
    raw.split_once('=')
        .ok_or_else(|| CliError::InvalidArgs(format!("expected KEY=VALUE, got '{}'", raw)))
}

#[instrument(level = "debug", skip(cli))]
fn edit(cli: &Cli, args: &EditArgs) -> CliResult<()> {
    let mut service = admin_service(cli)?;
    let mut form = service.edit_form(args.id)?;

    if let Some(title) = &args.title {
        form.title = title.clone();
    }
    for raw in &args.options {
        let (key, value) = parse_option(raw)?;
        form.set_option(key, value);
    }
    for key in &args.unset {
        form.unset_option(key);
    }
    if args.no_parent {
        form.parent = None;
        form.root = None;
    } else if let Some(parent) = args.parent {
        if form.parent != Some(parent) {
            form.parent = Some(parent);
            form.root = None;
        }
    }
    if let Some(root) = args.root {
        form.root = Some(root);
    }

    let action = if args.cancel {
        EditAction::Cancel
    } else {
        EditAction::Save
    };
    match service.submit_edit(args.id, form, action)? {
        EditOutcome::Saved { node, redirect } => {
            debug!("saved {:?}", node);
            follow(&service, &redirect);
            Ok(())
        }
        EditOutcome::Cancelled(redirect) => {
            follow(&service, &redirect);
            Ok(())
        }
        EditOutcome::Invalid { errors, .. } => {
            output::header("Menu item not saved");
            for error in errors.iter() {
                output::failure(error);
            }
            Err(ApplicationError::Validation(errors).into())
        }
    }
}

#[instrument(level = "debug", skip(cli))]
fn delete(cli: &Cli, id: NodeId, cancel: bool, yes: bool) -> CliResult<()> {
    let mut service = admin_service(cli)?;

    if cancel {
        if let DeleteOutcome::Cancelled(redirect) =
            service.submit_delete(id, DeleteAction::Cancel)?
        {
            follow(&service, &redirect);
        }
        return Ok(());
    }

    if !yes {
        let confirmation = service.delete_form(id)?;
        output::header(&format!("Delete {}?", confirmation.node));
        output::detail(&format!(
            "this also removes {} descendant item(s)",
            confirmation.descendants
        ));
        output::warning("nothing deleted, re-run with --yes to confirm");
        return Ok(());
    }

    match service.submit_delete(id, DeleteAction::Delete)? {
        DeleteOutcome::Deleted { removed, redirect } => {
            debug!("removed {:?}", removed);
            follow(&service, &redirect);
        }
        DeleteOutcome::Cancelled(redirect) => follow(&service, &redirect),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: u64, title: &str) -> HierarchyNode {
        HierarchyNode {
            id: NodeId(id),
            title: title.to_string(),
            level: 1,
            children: vec![],
        }
    }

    #[test]
    fn given_key_value_when_parsing_option_then_splits_on_first_equals() {
        assert_eq!(parse_option("uri=/a?b=c").unwrap(), ("uri", "/a?b=c"));
        assert!(matches!(
            parse_option("display"),
            Err(CliError::InvalidArgs(_))
        ));
    }

    #[test]
    fn given_menu_view_when_building_tree_then_nests_titles_with_ids() {
        let mut child = leaf(2, "About");
        child.children.push(leaf(3, "Team"));
        let mut menu = crate::domain::MenuNode::new("Main");
        menu.id = Some(NodeId(1));
        let view = MenuView {
            menu,
            tree: vec![child],
            html: String::new(),
        };

        let rendered = menu_tree(&view).to_string();

        assert!(rendered.starts_with("Main (1)\n"));
        assert!(rendered.contains("About (2)"));
        assert!(rendered.contains("Team (3)"));
    }
}
