use crate::banner;
use specify_core::assistant::ASSISTANTS;
use specify_core::release::GitHubReleases;
use specify_core::tools;

pub fn run() -> anyhow::Result<()> {
    banner::print();
    println!("Checking Specify requirements...");
    println!();

    println!("Internet:");
    if GitHubReleases::new().reachable() {
        println!("  ✓ github.com reachable");
    } else {
        println!("  ✗ no internet connection — required for downloading templates");
    }

    println!();
    println!("Optional tools:");
    print_tool("git", "https://git-scm.com/downloads");

    println!();
    println!("Optional AI tools:");
    for assistant in ASSISTANTS {
        if let Some((tool, hint)) = assistant.required_tool() {
            print_tool(tool, hint);
        }
    }

    println!();
    println!("Specify CLI is ready to use!");
    Ok(())
}

fn print_tool(tool: &str, install_hint: &str) {
    if tools::exists(tool) {
        println!("  ✓ {tool}");
    } else {
        println!("  ⚠ {tool} not found — install: {install_hint}");
    }
}
