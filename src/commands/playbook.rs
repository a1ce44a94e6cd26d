//! `playbook-run`: apply the playbook to the inventory.

use ansiblekit::{Client, PlaybookOptions};
use anyhow::Result;

use crate::Context;
use crate::cli::PlaybookArgs;
use crate::ui;

pub fn run(ctx: &Context, args: PlaybookArgs) -> Result<()> {
    let config = super::settings(ctx)?;
    let inputs = [
        ("Inventory", config.playbook.inventory.clone()),
        ("Playbook", config.playbook.playbook.clone()),
        ("Private key", config.playbook.private_key.clone()),
    ];
    let client = Client::new(config.galaxy, config.playbook);
    let options = PlaybookOptions::security(args.security);
    let invocation = client.playbook_command(&options);

    if args.dry_run {
        ui::command(&invocation);
        return Ok(());
    }

    if !ctx.quiet {
        ui::header("Running Playbook");
        if !args.security {
            ui::info("Skipping security-tagged tasks (pass --security to include them)");
        }
        for (what, path) in &inputs {
            super::warn_if_missing(what, path);
        }
        ui::command(&invocation);
        println!();
    }

    client.run_playbook(&options)?;

    if !ctx.quiet {
        println!();
        ui::success("Playbook finished");
    }
    Ok(())
}
