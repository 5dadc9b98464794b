use yew::prelude::*;
use crate::router::navigate;

#[derive(Properties, PartialEq)]
pub struct LinkProps {
    pub to: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

/// Anchor that navigates through the History API instead of reloading
#[function_component(Link)]
pub fn link(props: &LinkProps) -> Html {
    let onclick = {
        let to = props.to.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            navigate(&to);
        })
    };

    html! {
        <a href={props.to.clone()} class={props.class.clone()} {onclick}>
            { props.children.clone() }
        </a>
    }
}
