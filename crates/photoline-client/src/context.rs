//! Shared state for every element of the day being shown.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use photoline_core::GestureArena;
use yew::prelude::*;

use crate::services::{GrpcPositionStore, TimelineClient};

#[derive(Clone)]
pub struct TimelineContext {
    pub day: NaiveDate,
    pub arena: Rc<RefCell<GestureArena>>,
    pub store: Rc<GrpcPositionStore>,
    pub client: TimelineClient,
    /// Refetch the day after photos or notes were added or removed.
    pub reload: Callback<()>,
}

impl PartialEq for TimelineContext {
    fn eq(&self, other: &Self) -> bool {
        self.day == other.day
            && Rc::ptr_eq(&self.arena, &other.arena)
            && Rc::ptr_eq(&self.store, &other.store)
            && self.reload == other.reload
    }
}

#[hook]
pub fn use_timeline_context() -> TimelineContext {
    use_context::<TimelineContext>().expect("TimelineContext not found")
}
