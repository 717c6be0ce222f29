use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("tiebafetch")
        .version(env!("CARGO_PKG_VERSION"))
        .author("tiebafetch contributors")
        .about("Dump Baidu Tieba threads and thread listings")
        .subcommand_required(true)
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                .global(true)
                .default_value("text")
                .value_parser(["text", "txt", "json"]),
        )
        .arg(clap::arg!(-q --quiet "Only log warnings and errors").global(true))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .global(true)
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").global(true).default_value("30"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests").global(true))
        .arg(clap::arg!(--pretty "Pretty print JSON output").global(true))
        .arg(clap::arg!(--"base-url" <URL> "Root of the mobile site").global(true).hide(true))
        .subcommand(
            clap::Command::new("topic")
                .about("Fetch a whole topic with its split posts and reply threads")
                .arg(clap::arg!(<KZ> "Topic id (the `kz` parameter)"))
                .arg(clap::arg!(-i --imgsrc "Emit original image URLs instead of resized ones")),
        )
        .subcommand(
            clap::Command::new("list")
                .about("Fetch pages START..=END of a forum's thread listing")
                .arg(clap::arg!(<FORUM> "Forum name"))
                .arg(clap::arg!(<START> "First listing page"))
                .arg(clap::arg!(<END> "Last listing page (inclusive)"))
                .arg(clap::arg!(-d --dist "Only list showcase threads")),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "tiebafetch", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "tiebafetch", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "tiebafetch", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "tiebafetch", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
