//! Pure command builders.
//!
//! Nothing here touches the filesystem or spawns processes. Optional flags
//! are either pushed as whole tokens or left out entirely, so a disabled flag
//! never leaves an empty argument behind.

use crate::types::{GalaxySettings, InstallOptions, Invocation, PlaybookOptions, PlaybookSettings};

/// Flag that makes `ansible-galaxy install` reinstall everything.
pub const FORCE_FLAG: &str = "--force";

/// Flag that excludes tagged tasks from a playbook run.
pub const SKIP_TAGS_FLAG: &str = "--skip-tags";

/// Build `ansible-galaxy install -r <requirements> [--force]`.
pub fn install_command(settings: &GalaxySettings, options: &InstallOptions) -> Invocation {
    let mut inv = Invocation::new(&settings.program).args([
        "install",
        "-r",
        settings.requirements.as_str(),
    ]);

    if options.force {
        inv = inv.arg(FORCE_FLAG);
    }

    inv
}

/// Build `ansible-playbook -i <inventory> <playbook> --private-key <key> [--diff] [--skip-tags <tag>]`.
pub fn playbook_command(settings: &PlaybookSettings, options: &PlaybookOptions) -> Invocation {
    let mut inv = Invocation::new(&settings.program).args([
        "-i",
        settings.inventory.as_str(),
        settings.playbook.as_str(),
        "--private-key",
        settings.private_key.as_str(),
    ]);

    if settings.diff {
        inv = inv.arg("--diff");
    }

    if !options.security {
        inv = inv.args([SKIP_TAGS_FLAG, settings.security_tag.as_str()]);
    }

    inv
}
