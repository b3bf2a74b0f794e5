use crate::{SimObject, UpdateContext};

/// An object with no behavior, for wiring states by hand.
#[derive(Debug)]
pub(crate) struct Passive;

impl<T> SimObject<T> for Passive {
    fn update(&mut self, _ctx: &mut UpdateContext<'_, T>) {}
}
