use std::collections::{BTreeMap, HashSet};

use shared::domain::{ActionData, CanvasWidgets, MetaState};
use tracing::debug;

use crate::{
    entity::{BuiltinAction, DataTreeAction, DataTreeEntity, DataTreeWidget},
    tree::DataTree,
};

/// Full snapshot of the state slices a tree is built from.
#[derive(Debug, Clone, Copy)]
pub struct DataTreeSeed<'a> {
    pub actions: &'a [ActionData],
    pub widgets: &'a CanvasWidgets,
    pub widgets_meta: &'a MetaState,
}

pub struct DataTreeFactory;

impl DataTreeFactory {
    /// Builds a fresh tree. Later writers win on a name collision: actions
    /// first, then widgets, then the built-in callables.
    pub fn create(seed: DataTreeSeed<'_>) -> DataTree {
        let mut entities = BTreeMap::new();
        let mut action_paths: Vec<String> = DataTree::builtin_paths().map(String::from).collect();
        let mut seen_paths: HashSet<String> = action_paths.iter().cloned().collect();

        for action in seed.actions {
            let name = action.config.name.clone();
            let entity = DataTreeEntity::Action(DataTreeAction::from_action(action));
            if entities.insert(name.clone(), entity).is_some() {
                debug!(%name, "action replaces an earlier action with the same name");
            }

            let run_path = format!("{name}.run");
            if seen_paths.insert(run_path.clone()) {
                action_paths.push(run_path);
            }
        }

        for (widget_id, widget) in seed.widgets {
            let meta = seed.widgets_meta.get(widget_id);
            let entity = DataTreeEntity::Widget(DataTreeWidget::from_props(widget, meta));
            if let Some(previous) = entities.insert(widget.widget_name.clone(), entity) {
                debug!(
                    name = %widget.widget_name,
                    %widget_id,
                    replaced = previous.kind(),
                    "widget shadows an existing entity"
                );
            }
        }

        for builtin in BuiltinAction::ALL {
            if let Some(previous) =
                entities.insert(builtin.name().to_string(), DataTreeEntity::Callable { builtin })
            {
                debug!(
                    name = builtin.name(),
                    replaced = previous.kind(),
                    "built-in shadows an existing entity"
                );
            }
        }

        debug!(
            actions = seed.actions.len(),
            widgets = seed.widgets.len(),
            entities = entities.len(),
            action_paths = action_paths.len(),
            "built data tree"
        );

        DataTree {
            entities,
            action_paths,
        }
    }
}

#[cfg(test)]
#[path = "tests/factory_tests.rs"]
mod tests;
