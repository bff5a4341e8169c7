use std::ops::Deref;

use yew::prelude::*;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|win| win.local_storage().ok().flatten())
}

/// State mirrored to `localStorage[key]` as JSON.
///
/// Unreadable or missing entries fall back to `init_fn`.
#[hook]
pub fn use_localstorage<T, F>(key: &'static str, init_fn: F) -> UseStateHandle<T>
where
    T: 'static + Clone + serde::Serialize + serde::de::DeserializeOwned + PartialEq,
    F: Fn() -> T + 'static,
{
    let state = use_state(|| {
        let stored = local_storage()
            .and_then(|storage| storage.get_item(key).ok().flatten())
            .and_then(|value| match serde_json::from_str::<T>(&value) {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!(key, error = %err, "discarding unreadable localStorage entry");
                    None
                }
            });
        stored.unwrap_or_else(init_fn)
    });
    {
        use_effect_with(state.clone(), move |state| {
            if let Some(storage) = local_storage()
                && let Ok(serialized) = serde_json::to_string(state.deref())
                && storage.set_item(key, &serialized).is_err()
            {
                tracing::warn!(key, "localStorage write failed");
            }
            || ()
        });
    }
    state
}
