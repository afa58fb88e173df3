use std::rc::Rc;

use cacheview_core::{ActionId, Block, ContainerId, InputId, Panel, PresenterConfig, ResultPresenter};
use leptos::prelude::*;

use crate::api::FetchApi;
use crate::scheduler::BrowserScheduler;
use crate::surface::PageSignals;

pub type PagePresenter = ResultPresenter<PageSignals, FetchApi, BrowserScheduler>;

/// Build the presenter from explicit page handles
pub fn init(signals: PageSignals, api: FetchApi, scheduler: BrowserScheduler) -> Rc<PagePresenter> {
    Rc::new(ResultPresenter::new(
        Rc::new(signals),
        api,
        scheduler,
        PresenterConfig::default(),
    ))
}

#[component]
pub fn App() -> impl IntoView {
    let signals = PageSignals::new();
    let presenter = StoredValue::new_local(init(signals, FetchApi::same_origin(), BrowserScheduler));

    let dispatch = move |action: ActionId| {
        let presenter = presenter.get_value();
        wasm_bindgen_futures::spawn_local(async move {
            match action {
                ActionId::RunOperation => presenter.run_operation().await,
                ActionId::GetUser => presenter.get_user().await,
                ActionId::ClearCache => presenter.clear_cache().await,
            }
        });
    };

    view! {
        <div class="container">
            <h1>"Caché vs Base de datos"</h1>

            <section class="card">
                <h2>"Operación costosa"</h2>
                <TextInput input=InputId::Param signal=signals.param placeholder="Parámetro" />
                <button
                    id=ActionId::RunOperation.dom_id()
                    on:click=move |_| dispatch(ActionId::RunOperation)
                >
                    "Ejecutar operación"
                </button>
                <ResultBox container=ContainerId::OperationResult panel=signals.operation_result />
            </section>

            <section class="card">
                <h2>"Datos de usuario"</h2>
                <TextInput input=InputId::UserId signal=signals.user_id placeholder="ID de usuario" />
                <button
                    id=ActionId::GetUser.dom_id()
                    on:click=move |_| dispatch(ActionId::GetUser)
                >
                    "Obtener usuario"
                </button>
                <ResultBox container=ContainerId::UserResult panel=signals.user_result />
            </section>

            <section class="card">
                <h2>"Caché"</h2>
                <button
                    id=ActionId::ClearCache.dom_id()
                    on:click=move |_| dispatch(ActionId::ClearCache)
                >
                    "Limpiar caché"
                </button>
                <ResultBox container=ContainerId::CacheStatus panel=signals.cache_status />
            </section>
        </div>
    }
}

#[component]
fn TextInput(input: InputId, signal: RwSignal<String>, placeholder: &'static str) -> impl IntoView {
    view! {
        <input
            id=input.dom_id()
            type="text"
            placeholder=placeholder
            prop:value=move || signal.get()
            on:input=move |ev| signal.set(event_target_value(&ev))
        />
    }
}

#[component]
fn ResultBox(container: ContainerId, panel: RwSignal<Panel>) -> impl IntoView {
    let style = move || {
        panel
            .get()
            .background
            .color()
            .map(|color| format!("background-color: {}", color))
            .unwrap_or_default()
    };

    view! {
        <div id=container.dom_id() class="result" style=style>
            {move || panel.get().blocks.into_iter().map(|block| match block {
                Block::Text(text) => view! { <p>{text}</p> }.into_any(),
                Block::Field { key, value } => view! {
                    <p><strong>{format!("{}:", key)}</strong>" "{value}</p>
                }.into_any(),
            }).collect::<Vec<_>>()}
            {move || panel.get().tag.map(|tag| view! {
                <div class=format!("source-tag {}", tag.class())>{tag.text}</div>
            })}
        </div>
    }
}
