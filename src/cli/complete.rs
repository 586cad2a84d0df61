use std::path::Path;

use anupalan::{ItemId, Status};
use clap::Parser;
use tracing::instrument;

use super::{Workspace, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Mark a compliance item as completed")]
pub struct Complete {
    /// The catalog id of the item, e.g. 'pan-registration'
    id: ItemId,
}

impl Complete {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        set_status(root, self.id, Status::Completed)
    }
}

#[derive(Debug, Parser)]
#[command(about = "Mark a compliance item as pending again")]
pub struct Reopen {
    /// The catalog id of the item, e.g. 'pan-registration'
    id: ItemId,
}

impl Reopen {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        set_status(root, self.id, Status::Pending)
    }
}

fn set_status(root: &Path, id: ItemId, status: Status) -> anyhow::Result<()> {
    let mut workspace = Workspace::open(root);

    let known = workspace.registry.items().iter().any(|item| item.id == id);
    workspace.registry.set_item_status(id, status, workspace.today)?;

    if known {
        let verb = match status {
            Status::Completed => "completed",
            Status::Pending => "reopened",
        };
        println!("{}", format!("✅ Marked {id} as {verb}").success());
    } else {
        println!("'{id}' is not part of the current checklist; nothing changed.");
    }

    Ok(())
}
