use cacheview_core::{ContainerId, InputId, Panel, Surface};
use leptos::prelude::*;

/// Reactive state behind the page: one signal per input and per container
#[derive(Debug, Clone, Copy)]
pub struct PageSignals {
    pub param: RwSignal<String>,
    pub user_id: RwSignal<String>,
    pub operation_result: RwSignal<Panel>,
    pub user_result: RwSignal<Panel>,
    pub cache_status: RwSignal<Panel>,
}

impl PageSignals {
    pub fn new() -> Self {
        Self {
            param: RwSignal::new(String::new()),
            user_id: RwSignal::new(String::new()),
            operation_result: RwSignal::new(Panel::empty()),
            user_result: RwSignal::new(Panel::empty()),
            cache_status: RwSignal::new(Panel::empty()),
        }
    }

    pub fn input(&self, input: InputId) -> RwSignal<String> {
        match input {
            InputId::Param => self.param,
            InputId::UserId => self.user_id,
        }
    }

    pub fn container(&self, container: ContainerId) -> RwSignal<Panel> {
        match container {
            ContainerId::OperationResult => self.operation_result,
            ContainerId::UserResult => self.user_result,
            ContainerId::CacheStatus => self.cache_status,
        }
    }
}

impl Default for PageSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for PageSignals {
    fn input_value(&self, input: InputId) -> String {
        self.input(input).get_untracked()
    }

    fn paint(&self, container: ContainerId, panel: Panel) {
        self.container(container).set(panel);
    }
}
