use yew::prelude::*;
use yew_icons::{Icon, IconData};

use crate::hooks::ViewMode;

#[derive(Properties, PartialEq)]
pub struct ViewToggleProps {
    pub mode: ViewMode,
    pub on_toggle: Callback<()>,
}

/// Switches between the full and the compact view.
#[function_component(ViewToggle)]
pub fn view_toggle(props: &ViewToggleProps) -> Html {
    let onclick = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_: MouseEvent| on_toggle.emit(()))
    };
    let (icon, label, title) = match props.mode {
        ViewMode::Full => (IconData::LUCIDE_LIST, "Compact", "Show one row per hour"),
        ViewMode::Compact => (IconData::LUCIDE_MOVE, "Full", "Show the full timeline"),
    };

    html! {
        <button class="view-toggle" {title} {onclick}>
            <Icon data={icon} width="14px" height="14px" />
            { label }
        </button>
    }
}
