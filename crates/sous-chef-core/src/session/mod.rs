mod command;
mod fetch;
mod machine;
pub(crate) mod phrases;
mod state;

pub(crate) use {fetch::FetchCompletion, machine::SessionMachine, state::LoadedRecipe};

pub use {
    command::Command,
    state::{Progress, Session, TriggerState},
};
