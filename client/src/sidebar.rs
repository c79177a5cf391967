use leptos::prelude::*;

use crate::app::{Controller, PanelOpen, ShelterRows};
use crate::surface::ListEntry;

/// Collapsible shelter list on the map's left edge.
#[component]
pub fn ShelterPanel() -> impl IntoView {
    let PanelOpen(panel) = expect_context();

    view! {
        <div
            id="shelter-panel"
            class="shelter-panel"
            class:collapsed=move || panel.get().is_collapsed()
            style="position: absolute; top: 0; left: 0; bottom: 0; width: 320px; z-index: 1000; transition: transform 0.25s ease;"
            style:transform=move || {
                if panel.get().is_collapsed() { "translateX(-100%)" } else { "translateX(0)" }
            }
        >
            <PanelToggle />
            <div
                class="shelter-panel-inner"
                style="width: 100%; height: 100%; background: #ffffff; border-right: 1px solid #d8dce3; display: flex; flex-direction: column; box-shadow: 4px 0 16px rgba(0,0,0,0.12);"
            >
                <PanelHeader />
                <SearchBar />
                <ShelterList />
            </div>
        </div>
    }
}

#[component]
fn PanelHeader() -> impl IntoView {
    let ShelterRows(rows) = expect_context();

    view! {
        <div style="padding: 16px 18px 12px; border-bottom: 1px solid #e3e6ec;">
            <div style="font-size: 1.05rem; font-weight: 700; color: #1f2937;">"避難所マップ"</div>
            <div style="font-size: 0.75rem; color: #6b7280; margin-top: 4px;">
                {move || format!("{}件の避難所", rows.with(Vec::len))}
            </div>
        </div>
    }
}

/// Query box. Only the button runs a search.
#[component]
fn SearchBar() -> impl IntoView {
    let controller: Controller = expect_context();
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let on_search = move |_| {
        let raw = input_ref.get_untracked().map(|input| input.value());
        controller.with_mut(|c| {
            if let Ok(outcome) = c.perform_search(raw.as_deref()) {
                web_sys::console::info_1(&format!("Search: {outcome}").into());
            }
        });
    };

    view! {
        <div style="padding: 10px 18px; border-bottom: 1px solid #e3e6ec; display: flex; gap: 8px;">
            <input
                id="search-input"
                node_ref=input_ref
                type="text"
                placeholder="避難所名・住所・地名で検索"
                style="flex: 1; min-width: 0; padding: 8px 10px; border: 1px solid #cfd4dc; border-radius: 6px; font-size: 0.9rem;"
            />
            <button
                id="search-button"
                style="padding: 8px 14px; border: none; border-radius: 6px; background: #2563eb; color: #ffffff; font-size: 0.9rem; cursor: pointer;"
                on:click=on_search
            >
                "検索"
            </button>
        </div>
    }
}

#[component]
fn ShelterList() -> impl IntoView {
    let ShelterRows(rows) = expect_context();

    view! {
        <ul id="shelter-list" style="flex: 1; overflow-y: auto; margin: 0; padding: 0; list-style: none;">
            <For
                each=move || rows.get()
                key=|entry| entry.id.clone()
                children=move |entry| view! { <ShelterRow entry=entry /> }
            />
        </ul>
    }
}

/// One list row. Clicking it focuses the shelter on the map.
#[component]
fn ShelterRow(entry: ListEntry) -> impl IntoView {
    let controller: Controller = expect_context();
    let id = entry.id.clone();

    view! {
        <li
            class="shelter-list-item"
            data-shelter-id=entry.id.to_string()
            style="padding: 10px 18px; border-bottom: 1px solid #f0f1f4; cursor: pointer;"
            on:click=move |_| {
                controller.with_mut(|c| {
                    c.focus_shelter(&id);
                });
            }
        >
            <div style="font-weight: 600; color: #111827;">{entry.name}</div>
            {entry.kind.map(|kind| view! {
                <div style="font-size: 0.72rem; color: #2563eb; margin-top: 2px;">{kind}</div>
            })}
            <div style="font-size: 0.78rem; color: #4b5563; margin-top: 2px;">{entry.address}</div>
            <div style="font-size: 0.78rem; color: #6b7280; margin-top: 2px;">
                {format!("収容人数: {}", entry.capacity)}
            </div>
        </li>
    }
}

/// Toggle button attached to the panel's right edge.
#[component]
fn PanelToggle() -> impl IntoView {
    let PanelOpen(panel) = expect_context();
    let controller: Controller = expect_context();

    view! {
        <button
            id="panel-toggle"
            class="panel-toggle"
            title=move || panel.get().title()
            style="position: absolute; top: 16px; right: -40px; width: 32px; height: 32px; background: #ffffff; border: 1px solid #d8dce3; border-radius: 6px; cursor: pointer; display: flex; align-items: center; justify-content: center; color: #374151; font-size: 1.1rem; line-height: 1;"
            on:click=move |_| {
                controller.with_mut(|c| {
                    c.toggle_panel();
                });
            }
        >
            {move || panel.get().glyph()}
        </button>
    }
}
