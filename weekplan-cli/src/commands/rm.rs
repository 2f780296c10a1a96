use anyhow::{Result, anyhow};
use owo_colors::OwoColorize;
use weekplan_core::state::AppState;
use weekplan_core::store::EventStore;

pub async fn run(state: &mut AppState, store: &dyn EventStore, id: String) -> Result<()> {
    let name = state
        .event(&id)
        .map(|e| e.name.clone())
        .ok_or_else(|| anyhow!("No event with id {id}"))?;

    state.remove_event(store, &id).await?;

    println!("{}", format!("Deleted '{name}'").green());
    Ok(())
}
