//! `install-requirements`: install Galaxy roles and collections.

use ansiblekit::{Client, InstallOptions};
use anyhow::Result;

use crate::Context;
use crate::cli::InstallArgs;
use crate::ui;

pub fn run(ctx: &Context, args: InstallArgs) -> Result<()> {
    let config = super::settings(ctx)?;
    let requirements = config.galaxy.requirements.clone();
    let client = Client::new(config.galaxy, config.playbook);
    let options = InstallOptions::force(args.force);
    let invocation = client.install_command(&options);

    if args.dry_run {
        ui::command(&invocation);
        return Ok(());
    }

    if !ctx.quiet {
        ui::header("Installing Ansible Requirements");
        if args.force {
            ui::dim("Forcing reinstall of everything in the requirements file");
        }
        super::warn_if_missing("Requirements file", &requirements);
        ui::command(&invocation);
        println!();
    }

    client.install_requirements(&options)?;

    if !ctx.quiet {
        println!();
        ui::success("Requirements installed");
    }
    Ok(())
}
