//! Entity tree construction for binding evaluation.
//!
//! The host calls [`build`] with the full current snapshot whenever action
//! results, widget definitions or widget runtime state change, and drops the
//! previous tree.

pub mod dispatch;
pub mod entity;
pub mod factory;
pub mod tree;

use shared::domain::{ActionData, CanvasWidgets, MetaState};

pub use dispatch::{
    close_modal, navigate_to, navigate_to_url, run_action, show_alert, show_modal,
    RunActionDispatcher,
};
pub use entity::{BuiltinAction, DataTreeAction, DataTreeEntity, DataTreeWidget};
pub use factory::{DataTreeFactory, DataTreeSeed};
pub use tree::DataTree;

pub fn build(actions: &[ActionData], widgets: &CanvasWidgets, widgets_meta: &MetaState) -> DataTree {
    DataTreeFactory::create(DataTreeSeed {
        actions,
        widgets,
        widgets_meta,
    })
}
