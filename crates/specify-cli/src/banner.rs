use std::io::IsTerminal;

const LOGO: &str = r#"
███████╗██████╗ ███████╗ ██████╗██╗███████╗██╗   ██╗
██╔════╝██╔══██╗██╔════╝██╔════╝██║██╔════╝╚██╗ ██╔╝
███████╗██████╔╝█████╗  ██║     ██║█████╗   ╚████╔╝
╚════██║██╔═══╝ ██╔══╝  ██║     ██║██╔══╝    ╚██╔╝
███████║██║     ███████╗╚██████╗██║██║        ██║
╚══════╝╚═╝     ╚══════╝ ╚═════╝╚═╝╚═╝        ╚═╝
"#;

const TAGLINE: &str = "Spec-Driven Development Toolkit";

pub fn print() {
    if std::io::stdout().is_terminal() {
        println!("\x1b[1;36m{}\x1b[0m", LOGO.trim_matches('\n'));
        println!("\x1b[33m{TAGLINE}\x1b[0m");
    } else {
        println!("specify — {TAGLINE}");
    }
    println!();
}
