use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use weekplan_core::event::{Color, EventPatch};
use weekplan_core::state::AppState;
use weekplan_core::store::EventStore;

pub async fn run(
    state: &mut AppState,
    store: &dyn EventStore,
    id: String,
    name: Option<String>,
    desc: Option<String>,
    no_desc: bool,
    color: Option<String>,
) -> Result<()> {
    let color = color
        .map(|c| c.parse::<Color>())
        .transpose()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let description = if no_desc { Some(None) } else { desc.map(Some) };

    let patch = EventPatch {
        name,
        description,
        color,
        kind: None,
    };
    if patch.is_empty() {
        bail!("Nothing to change. Pass --name, --desc, --no-desc, or --color.");
    }

    state.edit_event(store, &id, patch).await?;

    let name = state.event(&id).map(|e| e.name.as_str()).unwrap_or(&id);
    println!("{}", format!("Updated '{name}'").green());
    Ok(())
}
