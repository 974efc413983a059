//! Setup command - install the prerequisite tools

use std::path::Path;

use console::style;
use deployer_core::platform::OS_RELEASE_PATH;
use deployer_core::{CommandRunner, Platform, ToolOutcome, install_all};

use crate::display;
use crate::error::Result;

/// Run the setup command
pub fn run<R: CommandRunner>(runner: &R) -> Result<()> {
    display::step("Installing prerequisites...");

    let outcomes = install_all(runner, &Platform::current(), Path::new(OS_RELEASE_PATH))?;

    let installed = outcomes
        .iter()
        .filter(|(_, outcome)| *outcome == ToolOutcome::Installed)
        .count();

    for (tool, outcome) in &outcomes {
        match outcome {
            ToolOutcome::AlreadyInstalled => {
                println!("  {} {} (already installed)", style("·").dim(), tool)
            }
            ToolOutcome::Installed => println!("  {} {}", style("+").green(), tool),
        }
    }

    if installed == 0 {
        display::success("All prerequisites are already installed");
    } else {
        display::success(&format!(
            "Installed {}",
            display::pluralize(installed, "tool", "tools")
        ));
    }

    Ok(())
}
