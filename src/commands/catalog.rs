use anyhow::Result;

use crate::Context;
use crate::config::Config;
use crate::ui;

pub fn run(ctx: &Context) -> Result<()> {
    let config = Config::load(ctx.config.as_deref())?;
    let catalog = config.catalog();

    ui::header(&format!("Known apps ({})", catalog.len()));
    let width = ui::id_width(catalog.iter().map(|(_, id)| id));
    for (name, id) in catalog.iter() {
        ui::row(id, name, width);
    }

    Ok(())
}
