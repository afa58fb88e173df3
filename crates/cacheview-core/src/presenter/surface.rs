use crate::panel::Panel;
use std::cell::RefCell;
use std::collections::HashMap;

/// Render targets, named by their element id in the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerId {
    OperationResult,
    UserResult,
    CacheStatus,
}

impl ContainerId {
    pub fn dom_id(&self) -> &'static str {
        match self {
            ContainerId::OperationResult => "operation-result",
            ContainerId::UserResult => "user-result",
            ContainerId::CacheStatus => "cache-status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputId {
    Param,
    UserId,
}

impl InputId {
    pub fn dom_id(&self) -> &'static str {
        match self {
            InputId::Param => "param",
            InputId::UserId => "user-id",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    RunOperation,
    GetUser,
    ClearCache,
}

impl ActionId {
    pub fn dom_id(&self) -> &'static str {
        match self {
            ActionId::RunOperation => "run-operation",
            ActionId::GetUser => "get-user",
            ActionId::ClearCache => "clear-cache",
        }
    }
}

/// Whatever holds the inputs and draws the containers
pub trait Surface {
    fn input_value(&self, input: InputId) -> String;
    fn paint(&self, container: ContainerId, panel: Panel);
}

/// Surface kept entirely in memory
#[derive(Debug, Default)]
pub struct MemorySurface {
    inputs: RefCell<HashMap<InputId, String>>,
    panels: RefCell<HashMap<ContainerId, Panel>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&self, input: InputId, value: impl Into<String>) {
        self.inputs.borrow_mut().insert(input, value.into());
    }

    pub fn panel(&self, container: ContainerId) -> Panel {
        self.panels
            .borrow()
            .get(&container)
            .cloned()
            .unwrap_or_default()
    }

    pub fn text(&self, container: ContainerId) -> String {
        self.panel(container).to_string()
    }
}

impl Surface for MemorySurface {
    fn input_value(&self, input: InputId) -> String {
        self.inputs.borrow().get(&input).cloned().unwrap_or_default()
    }

    fn paint(&self, container: ContainerId, panel: Panel) {
        self.panels.borrow_mut().insert(container, panel);
    }
}
